// ─────────────────────────────────────────────────────────────────────
// FusionSim — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::MBAR_TO_PA;
use crate::error::{FusionError, FusionResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Nuclear reaction channel sampled by the pair loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    #[default]
    Dd,
    Dt,
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReactionKind::Dd => write!(f, "dd"),
            ReactionKind::Dt => write!(f, "dt"),
        }
    }
}

impl FromStr for ReactionKind {
    type Err = FusionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dd" => Ok(ReactionKind::Dd),
            "dt" => Ok(ReactionKind::Dt),
            other => Err(FusionError::ConfigError(format!(
                "unknown reaction '{other}', expected 'dd' or 'dt'"
            ))),
        }
    }
}

/// Top-level run configuration.
///
/// Every field has a default so partial JSON files are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub reaction: ReactionKind,
    /// Farnsworth fusor field when true, Coulomb sphere map otherwise.
    pub fusor: bool,
    pub t_max_s: f64,
    pub dt_s: f64,
    pub particle_count: usize,
    /// Ion temperature used for seeding velocities.
    pub temperature_k: f64,
    /// Cathode (or sphere) potential.
    pub voltage_v: f64,
    pub pressure_mbar: f64,
    /// Worker count; `None` means hardware parallelism.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
    /// Enables the grid/chamber thermal feedback loop.
    pub thermal: bool,
    /// Physical ion number density used in the reaction probability.
    pub particle_density_m3: f64,
    /// Locality gate for pair sampling. This is a numerical knob, not a
    /// physical cross-section radius: reaction probability does not scale
    /// with it, but too small a value starves the sampler and too large a
    /// value only costs time. Revisit when n·r_c³/V approaches 1.
    pub collision_radius_m: f64,
    /// Master seed; `None` draws one from OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub inner_radius_m: f64,
    pub outer_radius_m: f64,
    pub grid_transparency: f64,
    pub magnetic_field_t: [f64; 3],
    pub coulomb_sphere_radius_m: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            reaction: ReactionKind::Dd,
            fusor: true,
            t_max_s: 1.0e-6,
            dt_s: 1.0e-10,
            particle_count: 100,
            temperature_k: 10_000.0,
            voltage_v: -30_000.0,
            pressure_mbar: 0.01,
            threads: None,
            thermal: false,
            particle_density_m3: 2.5e20,
            collision_radius_m: 1.0e-3,
            seed: None,
            inner_radius_m: 0.016,
            outer_radius_m: 0.08,
            grid_transparency: 0.95,
            magnetic_field_t: [0.0, 0.0, 0.0],
            coulomb_sphere_radius_m: 0.01,
        }
    }
}

fn require_positive(value: f64, name: &str) -> FusionResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(FusionError::ConfigError(format!(
            "{name} must be finite and > 0, got {value}"
        )));
    }
    Ok(())
}

impl SimulationConfig {
    /// Load from a JSON file and validate.
    pub fn from_file(path: &str) -> FusionResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> FusionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Chamber pressure in Pa.
    pub fn pressure_pa(&self) -> f64 {
        self.pressure_mbar * MBAR_TO_PA
    }

    /// Number of integration steps needed to cover `t_max_s`.
    pub fn step_count(&self) -> u64 {
        (self.t_max_s / self.dt_s).ceil().max(0.0) as u64
    }

    /// Reject any configuration that cannot produce a meaningful run.
    pub fn validate(&self) -> FusionResult<()> {
        require_positive(self.t_max_s, "t_max_s")?;
        require_positive(self.dt_s, "dt_s")?;
        if self.particle_count < 2 {
            return Err(FusionError::ConfigError(format!(
                "particle_count must be >= 2, got {}",
                self.particle_count
            )));
        }
        require_positive(self.temperature_k, "temperature_k")?;
        if !self.voltage_v.is_finite() {
            return Err(FusionError::ConfigError(
                "voltage_v must be finite".to_string(),
            ));
        }
        if !self.pressure_mbar.is_finite() || self.pressure_mbar < 0.0 {
            return Err(FusionError::ConfigError(format!(
                "pressure_mbar must be finite and >= 0, got {}",
                self.pressure_mbar
            )));
        }
        if let Some(threads) = self.threads {
            if threads == 0 {
                return Err(FusionError::ConfigError(
                    "threads must be >= 1".to_string(),
                ));
            }
        }
        require_positive(self.particle_density_m3, "particle_density_m3")?;
        require_positive(self.collision_radius_m, "collision_radius_m")?;
        require_positive(self.inner_radius_m, "inner_radius_m")?;
        if !self.outer_radius_m.is_finite() || self.outer_radius_m <= self.inner_radius_m {
            return Err(FusionError::ConfigError(format!(
                "outer_radius_m must be finite and > inner_radius_m ({}), got {}",
                self.inner_radius_m, self.outer_radius_m
            )));
        }
        if !self.grid_transparency.is_finite() || !(0.0..=1.0).contains(&self.grid_transparency)
        {
            return Err(FusionError::ConfigError(format!(
                "grid_transparency must be in [0, 1], got {}",
                self.grid_transparency
            )));
        }
        if self.magnetic_field_t.iter().any(|b| !b.is_finite()) {
            return Err(FusionError::ConfigError(
                "magnetic_field_t components must be finite".to_string(),
            ));
        }
        require_positive(self.coulomb_sphere_radius_m, "coulomb_sphere_radius_m")?;
        Ok(())
    }
}
