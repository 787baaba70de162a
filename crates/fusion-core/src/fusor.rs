// ─────────────────────────────────────────────────────────────────────
// FusionSim — Farnsworth Fusor Field
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Spherical-capacitor field of a Farnsworth fusor and its plasma helpers.
//!
//! Inner cathode grid at `V_c` (radius `r_inner`), outer anode grid at 0 V
//! (radius `r_outer`). Between the grids:
//!
//!   Φ(r)   = V_c · (1/r − 1/r_outer) / (1/r_inner − 1/r_outer)
//!   E_r(r) = V_c / ((1/r_inner − 1/r_outer) · r²)
//!
//! Inside the cathode Φ = V_c and E = 0; outside the anode Φ = 0 and E = 0.

use fusion_math::Vec3;
use fusion_types::constants::{
    BOHR_RADIUS, EPSILON0, K_BOLTZMANN, M_DEUTERIUM, M_ELECTRON, Q_ELECTRON, RYDBERG_EV,
};
use fusion_types::error::{FusionError, FusionResult};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub const DEFAULT_INNER_RADIUS_M: f64 = 0.016;
pub const DEFAULT_OUTER_RADIUS_M: f64 = 0.08;
pub const DEFAULT_CATHODE_VOLTAGE_V: f64 = -30_000.0;
pub const DEFAULT_TRANSPARENCY: f64 = 0.95;
pub const DEFAULT_WIRE_DIAMETER_M: f64 = 1.0e-3;
pub const DEFAULT_WIRE_COUNT: usize = 8;

/// Paschen coefficients (A in 1/(pressure·length), B in V/(pressure·length)).
const PASCHEN_A: f64 = 15.0;
const PASCHEN_B: f64 = 365.0;
/// Secondary-electron emission coefficient.
const PASCHEN_GAMMA_SE: f64 = 0.01;

/// Deuterium gas-kinetic collision cross section [m²].
const DEUTERIUM_COLLISION_XS_M2: f64 = 2.0e-19;

/// Pressure above which the pumps are still evacuating the chamber [Pa].
const VACUUM_PUMPING_PRESSURE_PA: f64 = 300.0;
/// Upper pressure bound for star-mode discharge [Pa].
const STAR_MODE_PRESSURE_PA: f64 = 3.0;
/// Star mode requires a weak discharge [A].
const STAR_MODE_CURRENT_A: f64 = 0.1;

pub const GRID_TEMPERATURE_LIMIT_K: f64 = 1273.15;
pub const CHAMBER_TEMPERATURE_LIMIT_K: f64 = 373.15;

/// Concentric-sphere electrostatic field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusorField {
    inner_radius_m: f64,
    outer_radius_m: f64,
    cathode_voltage_v: f64,
    transparency: f64,
    wire_diameter_m: f64,
    wire_count: usize,
    geometry_factor: f64,
}

impl Default for FusorField {
    fn default() -> Self {
        let inv = 1.0 / DEFAULT_INNER_RADIUS_M - 1.0 / DEFAULT_OUTER_RADIUS_M;
        FusorField {
            inner_radius_m: DEFAULT_INNER_RADIUS_M,
            outer_radius_m: DEFAULT_OUTER_RADIUS_M,
            cathode_voltage_v: DEFAULT_CATHODE_VOLTAGE_V,
            transparency: DEFAULT_TRANSPARENCY,
            wire_diameter_m: DEFAULT_WIRE_DIAMETER_M,
            wire_count: DEFAULT_WIRE_COUNT,
            geometry_factor: 1.0 / inv,
        }
    }
}

impl FusorField {
    pub fn new(
        inner_radius_m: f64,
        outer_radius_m: f64,
        cathode_voltage_v: f64,
        transparency: f64,
    ) -> FusionResult<Self> {
        if !inner_radius_m.is_finite() || inner_radius_m <= 0.0 {
            return Err(FusionError::ConfigError(format!(
                "inner_radius_m must be finite and > 0, got {inner_radius_m}"
            )));
        }
        if !outer_radius_m.is_finite() || outer_radius_m <= inner_radius_m {
            return Err(FusionError::ConfigError(format!(
                "outer_radius_m must be finite and > inner_radius_m ({inner_radius_m}), got {outer_radius_m}"
            )));
        }
        if !cathode_voltage_v.is_finite() {
            return Err(FusionError::ConfigError(
                "cathode_voltage_v must be finite".to_string(),
            ));
        }
        if !transparency.is_finite() || !(0.0..=1.0).contains(&transparency) {
            return Err(FusionError::ConfigError(format!(
                "transparency must be in [0, 1], got {transparency}"
            )));
        }
        let inv = 1.0 / inner_radius_m - 1.0 / outer_radius_m;
        let geometry_factor = 1.0 / inv;
        if !geometry_factor.is_finite() || geometry_factor <= 0.0 {
            return Err(FusionError::ConfigError(format!(
                "grid radii {inner_radius_m} / {outer_radius_m} give a degenerate geometry factor"
            )));
        }
        Ok(FusorField {
            inner_radius_m,
            outer_radius_m,
            cathode_voltage_v,
            transparency,
            wire_diameter_m: DEFAULT_WIRE_DIAMETER_M,
            wire_count: DEFAULT_WIRE_COUNT,
            geometry_factor,
        })
    }

    /// Replace the cathode wire description used by [`Self::effective_transparency`].
    pub fn with_grid_wires(mut self, wire_count: usize, wire_diameter_m: f64) -> FusionResult<Self> {
        if !wire_diameter_m.is_finite() || wire_diameter_m < 0.0 {
            return Err(FusionError::ConfigError(format!(
                "wire_diameter_m must be finite and >= 0, got {wire_diameter_m}"
            )));
        }
        self.wire_count = wire_count;
        self.wire_diameter_m = wire_diameter_m;
        Ok(self)
    }

    pub fn inner_radius_m(&self) -> f64 {
        self.inner_radius_m
    }

    pub fn outer_radius_m(&self) -> f64 {
        self.outer_radius_m
    }

    pub fn cathode_voltage_v(&self) -> f64 {
        self.cathode_voltage_v
    }

    pub fn transparency(&self) -> f64 {
        self.transparency
    }

    pub fn wire_count(&self) -> usize {
        self.wire_count
    }

    pub fn wire_diameter_m(&self) -> f64 {
        self.wire_diameter_m
    }

    /// G = 1/(1/r_inner − 1/r_outer).
    pub fn geometry_factor(&self) -> f64 {
        self.geometry_factor
    }

    /// Electrostatic potential Φ(r) [V].
    pub fn potential(&self, r: f64) -> f64 {
        if r <= self.inner_radius_m {
            self.cathode_voltage_v
        } else if r <= self.outer_radius_m {
            self.cathode_voltage_v * (1.0 / r - 1.0 / self.outer_radius_m) * self.geometry_factor
        } else {
            0.0
        }
    }

    /// Signed radial field E_r(r) [V/m]; positive points outward.
    pub fn radial_field(&self, r: f64) -> f64 {
        if r <= self.inner_radius_m || r > self.outer_radius_m {
            return 0.0;
        }
        self.cathode_voltage_v * self.geometry_factor / (r * r)
    }

    /// Field vector E_r · r̂ at `position`. The origin yields zero.
    pub fn field_at(&self, position: Vec3) -> Vec3 {
        let r = position.norm();
        if r == 0.0 {
            return Vec3::ZERO;
        }
        position * (self.radial_field(r) / r)
    }

    /// Kinetic energy gained by a singly charged ion moving from `r_start` to `r_end` [J].
    pub fn kinetic_energy_gain(&self, r_start: f64, r_end: f64) -> f64 {
        Q_ELECTRON * (self.potential(r_start) - self.potential(r_end))
    }

    /// q_e · |V_c| [J].
    pub fn max_ion_energy_j(&self) -> f64 {
        Q_ELECTRON * self.cathode_voltage_v.abs()
    }

    /// Deuteron speed at the cathode after falling through the full potential [m/s].
    pub fn max_ion_speed(&self) -> f64 {
        (2.0 * self.max_ion_energy_j() / M_DEUTERIUM).sqrt()
    }

    /// Characteristic deuteron oscillation period through the cathode [s].
    ///
    /// Infinite for an unbiased cathode.
    pub fn oscillation_period(&self) -> f64 {
        let v = self.cathode_voltage_v.abs();
        if v == 0.0 {
            return f64::INFINITY;
        }
        2.0 * PI
            * (M_DEUTERIUM * self.inner_radius_m * self.outer_radius_m / (2.0 * Q_ELECTRON * v))
                .sqrt()
    }

    /// Geometric transparency of the cathode from its wire count and diameter.
    ///
    /// T = 1 − N·d·π·r_inner / (4π·r_inner²), clamped to [0, 1].
    pub fn effective_transparency(&self) -> f64 {
        let blocked = self.wire_count as f64 * self.wire_diameter_m * PI * self.inner_radius_m;
        let sphere = 4.0 * PI * self.inner_radius_m * self.inner_radius_m;
        (1.0 - blocked / sphere).clamp(0.0, 1.0)
    }

    // ── Static plasma helpers ────────────────────────────────────────

    /// Debye length λ_D = √(ε₀ k_B T / (n q_e²)) [m].
    pub fn debye_length(temperature_k: f64, density_m3: f64) -> f64 {
        if density_m3 <= 0.0 {
            return f64::INFINITY;
        }
        (EPSILON0 * K_BOLTZMANN * temperature_k / (density_m3 * Q_ELECTRON * Q_ELECTRON)).sqrt()
    }

    /// Angular plasma frequency ω_p = √(n q_e² / (ε₀ m)) for a species of mass `mass_kg`.
    pub fn plasma_frequency(density_m3: f64, mass_kg: f64) -> f64 {
        if density_m3 <= 0.0 || mass_kg <= 0.0 {
            return 0.0;
        }
        (density_m3 * Q_ELECTRON * Q_ELECTRON / (EPSILON0 * mass_kg)).sqrt()
    }

    /// Electron plasma frequency [rad/s].
    pub fn electron_plasma_frequency(density_m3: f64) -> f64 {
        Self::plasma_frequency(density_m3, M_ELECTRON)
    }

    /// Deuteron plasma frequency [rad/s].
    pub fn deuteron_plasma_frequency(density_m3: f64) -> f64 {
        Self::plasma_frequency(density_m3, M_DEUTERIUM)
    }

    /// Paschen breakdown voltage for pressure `p` and gap `d` [V].
    ///
    /// V_bd = B·pd / (ln(A·pd) − ln ln(1 + 1/γ_se)). Returns infinity to the
    /// left of the Paschen minimum region, where the denominator is not positive.
    pub fn paschen_breakdown(pressure_pa: f64, gap_m: f64) -> f64 {
        let pd = pressure_pa * gap_m;
        if pd <= 0.0 || !pd.is_finite() {
            return f64::INFINITY;
        }
        let denom = (PASCHEN_A * pd).ln() - (1.0 + 1.0 / PASCHEN_GAMMA_SE).ln().ln();
        if denom <= 0.0 {
            return f64::INFINITY;
        }
        PASCHEN_B * pd / denom
    }

    /// Gas-kinetic mean free path λ = 1/(√2 σ_d n) with n = p/(k_B T) [m].
    pub fn mean_free_path(pressure_pa: f64, temperature_k: f64) -> f64 {
        if pressure_pa <= 0.0 || temperature_k <= 0.0 {
            return f64::INFINITY;
        }
        let n = pressure_pa / (K_BOLTZMANN * temperature_k);
        1.0 / (2.0_f64.sqrt() * DEUTERIUM_COLLISION_XS_M2 * n)
    }

    /// Electron-impact ionisation cross section σ_i(E) [m²], E in eV.
    pub fn ionisation_cross_section(energy_ev: f64) -> f64 {
        if energy_ev < RYDBERG_EV {
            return 0.0;
        }
        let u = energy_ev / RYDBERG_EV;
        PI * BOHR_RADIUS * BOHR_RADIUS * (4.0 / u) * u.ln()
    }
}

/// Discharge regime of the fusor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingMode {
    VacuumPumping,
    StarMode,
    StableOperation,
    /// Ignition transient. Not produced by [`OperatingMode::classify`].
    PlasmaIgnition,
}

impl OperatingMode {
    /// Classify from chamber pressure [Pa] and discharge current [A].
    pub fn classify(pressure_pa: f64, current_a: f64) -> Self {
        if pressure_pa > VACUUM_PUMPING_PRESSURE_PA {
            OperatingMode::VacuumPumping
        } else if pressure_pa <= STAR_MODE_PRESSURE_PA && current_a.abs() < STAR_MODE_CURRENT_A {
            OperatingMode::StarMode
        } else {
            OperatingMode::StableOperation
        }
    }
}

/// Sinusoidal resonant drive I(t) = (I_pp/2) · sin(2π f t + φ).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResonantDrive {
    pub frequency_hz: f64,
    pub peak_to_peak_current_a: f64,
    pub phase_rad: f64,
}

impl Default for ResonantDrive {
    fn default() -> Self {
        ResonantDrive {
            frequency_hz: 100.0e3,
            peak_to_peak_current_a: 0.02,
            phase_rad: 0.0,
        }
    }
}

impl ResonantDrive {
    pub fn current_at(&self, time_s: f64) -> f64 {
        0.5 * self.peak_to_peak_current_a * (2.0 * PI * self.frequency_hz * time_s + self.phase_rad).sin()
    }

    pub fn peak_current_a(&self) -> f64 {
        0.5 * self.peak_to_peak_current_a.abs()
    }
}

/// Mutable operating conditions around an immutable [`FusorField`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusorOperatingState {
    pub pressure_pa: f64,
    pub drive: ResonantDrive,
    pub grid_temperature_k: f64,
    pub chamber_temperature_k: f64,
    pub grid_temperature_limit_k: f64,
    pub chamber_temperature_limit_k: f64,
}

impl FusorOperatingState {
    pub fn new(pressure_pa: f64, ambient_temperature_k: f64) -> Self {
        FusorOperatingState {
            pressure_pa,
            drive: ResonantDrive::default(),
            grid_temperature_k: ambient_temperature_k,
            chamber_temperature_k: ambient_temperature_k,
            grid_temperature_limit_k: GRID_TEMPERATURE_LIMIT_K,
            chamber_temperature_limit_k: CHAMBER_TEMPERATURE_LIMIT_K,
        }
    }

    pub fn set_temperatures(&mut self, grid_k: f64, chamber_k: f64) {
        self.grid_temperature_k = grid_k;
        self.chamber_temperature_k = chamber_k;
    }

    pub fn is_grid_temperature_safe(&self) -> bool {
        self.grid_temperature_k < self.grid_temperature_limit_k
    }

    pub fn is_chamber_temperature_safe(&self) -> bool {
        self.chamber_temperature_k < self.chamber_temperature_limit_k
    }

    /// Regime at simulated time `time_s` using the instantaneous drive current.
    pub fn operating_mode(&self, time_s: f64) -> OperatingMode {
        OperatingMode::classify(self.pressure_pa, self.drive.current_at(time_s))
    }
}
