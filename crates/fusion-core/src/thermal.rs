// ─────────────────────────────────────────────────────────────────────
// FusionSim — Grid and Chamber Thermal Dynamics
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Lumped two-node thermal model: cathode grid and vacuum chamber.
//!
//! Grid heating  = I²·R(T_grid) + (1 − transparency)·Φ·Ē
//! Grid cooling  = ε·σ_SB·A_g·(T_g⁴ − T_amb⁴) + G·(T_g − T_c) + h(p)·A_g·(T_g − T_c)
//! Chamber gains radiation from the outer half of the grid and loses heat
//! convectively to ambient. Both temperatures are clamped to ≥ T_amb.

use fusion_types::constants::{tungsten, CHAMBER_SPECIFIC_HEAT, STEFAN_BOLTZMANN};
use fusion_types::error::{FusionError, FusionResult};
use fusion_types::state::ThermalState;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Reference temperature of the resistivity fit [K].
const RESISTIVITY_REFERENCE_K: f64 = 293.15;
/// Conductance of the grid support stalk [W/K].
const SUPPORT_CONDUCTANCE_W_K: f64 = 0.1;
/// Convective coefficient at atmospheric pressure [W/(m²·K)].
const CONVECTIVE_H_REF: f64 = 10.0;
const ATMOSPHERIC_PRESSURE_PA: f64 = 101_325.0;
/// External chamber-wall convection [W/(m²·K)].
const CHAMBER_EXTERNAL_H: f64 = 20.0;
/// Effective coefficient for the grid time constant [W/(m²·K)].
const GRID_EFFECTIVE_H: f64 = 100.0;
/// Cathode wire geometry used for the resistance estimate.
const GRID_WIRE_LOOPS: f64 = 4.0;
const GRID_LOOP_RADIUS_M: f64 = 0.04;
const GRID_WIRE_RADIUS_M: f64 = 0.5e-3;
/// Upper bracket for the equilibrium search [K].
const EQUILIBRIUM_T_MAX_K: f64 = 6000.0;

/// Cathode grid material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridMaterial {
    #[default]
    Tungsten,
}

/// Material constants of a [`GridMaterial`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialProperties {
    pub specific_heat: f64,
    pub resistivity: f64,
    pub temp_coeff_resistance: f64,
    pub emissivity: f64,
}

impl GridMaterial {
    pub fn properties(&self) -> MaterialProperties {
        match self {
            GridMaterial::Tungsten => MaterialProperties {
                specific_heat: tungsten::SPECIFIC_HEAT,
                resistivity: tungsten::RESISTIVITY,
                temp_coeff_resistance: tungsten::TEMP_COEFF_RESISTANCE,
                emissivity: tungsten::EMISSIVITY,
            },
        }
    }
}

/// Construction parameters for [`ThermalDynamicsModel`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalParams {
    pub grid_mass_kg: f64,
    pub chamber_mass_kg: f64,
    pub grid_area_m2: f64,
    pub chamber_area_m2: f64,
    pub grid_transparency: f64,
    pub ambient_temperature_k: f64,
    pub initial_grid_temperature_k: f64,
    pub initial_chamber_temperature_k: f64,
    pub material: GridMaterial,
}

impl Default for ThermalParams {
    fn default() -> Self {
        ThermalParams {
            grid_mass_kg: 0.05,
            chamber_mass_kg: 2.0,
            grid_area_m2: 0.003,
            chamber_area_m2: 0.5,
            grid_transparency: 0.95,
            ambient_temperature_k: 298.15,
            initial_grid_temperature_k: 298.15,
            initial_chamber_temperature_k: 301.15,
            material: GridMaterial::Tungsten,
        }
    }
}

/// Power terms of a single update, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeatBalance {
    pub grid_heating_w: f64,
    pub grid_cooling_w: f64,
    pub chamber_heating_w: f64,
    pub chamber_cooling_w: f64,
}

#[derive(Debug, Clone)]
pub struct ThermalDynamicsModel {
    params: ThermalParams,
    props: MaterialProperties,
    grid_temperature_k: f64,
    chamber_temperature_k: f64,
    ambient_temperature_k: f64,
    last_balance: HeatBalance,
}

fn require_positive(value: f64, label: &str) -> FusionResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(FusionError::ConfigError(format!(
            "{label} must be finite and > 0, got {value}"
        )));
    }
    Ok(())
}

impl ThermalDynamicsModel {
    pub fn new(params: ThermalParams) -> FusionResult<Self> {
        require_positive(params.grid_mass_kg, "grid_mass_kg")?;
        require_positive(params.chamber_mass_kg, "chamber_mass_kg")?;
        require_positive(params.grid_area_m2, "grid_area_m2")?;
        require_positive(params.chamber_area_m2, "chamber_area_m2")?;
        require_positive(params.ambient_temperature_k, "ambient_temperature_k")?;
        require_positive(params.initial_grid_temperature_k, "initial_grid_temperature_k")?;
        require_positive(
            params.initial_chamber_temperature_k,
            "initial_chamber_temperature_k",
        )?;
        if !(0.0..=1.0).contains(&params.grid_transparency) {
            return Err(FusionError::ConfigError(format!(
                "grid_transparency must be in [0, 1], got {}",
                params.grid_transparency
            )));
        }
        Ok(ThermalDynamicsModel {
            props: params.material.properties(),
            grid_temperature_k: params.initial_grid_temperature_k,
            chamber_temperature_k: params.initial_chamber_temperature_k,
            ambient_temperature_k: params.ambient_temperature_k,
            last_balance: HeatBalance::default(),
            params,
        })
    }

    pub fn params(&self) -> &ThermalParams {
        &self.params
    }

    pub fn grid_temperature_k(&self) -> f64 {
        self.grid_temperature_k
    }

    pub fn chamber_temperature_k(&self) -> f64 {
        self.chamber_temperature_k
    }

    pub fn ambient_temperature_k(&self) -> f64 {
        self.ambient_temperature_k
    }

    pub fn set_grid_temperature(&mut self, temperature_k: f64) {
        self.grid_temperature_k = temperature_k;
    }

    pub fn set_chamber_temperature(&mut self, temperature_k: f64) {
        self.chamber_temperature_k = temperature_k;
    }

    pub fn set_ambient_temperature(&mut self, temperature_k: f64) {
        self.ambient_temperature_k = temperature_k;
    }

    pub fn last_balance(&self) -> HeatBalance {
        self.last_balance
    }

    pub fn state(&self) -> ThermalState {
        ThermalState {
            grid_temperature_k: self.grid_temperature_k,
            chamber_temperature_k: self.chamber_temperature_k,
            ambient_temperature_k: self.ambient_temperature_k,
        }
    }

    /// Advance both nodes by `dt_s`.
    ///
    /// `particle_flux` in particles/s hitting the grid shell, `avg_particle_energy_j`
    /// the mean energy per particle, `pressure_pa` the chamber pressure.
    pub fn update_temperatures(
        &mut self,
        dt_s: f64,
        current_a: f64,
        particle_flux: f64,
        avg_particle_energy_j: f64,
        pressure_pa: f64,
    ) -> ThermalState {
        let grid_heating =
            self.grid_heating_at(self.grid_temperature_k, current_a, particle_flux, avg_particle_energy_j);
        let grid_cooling =
            self.grid_cooling_at(self.grid_temperature_k, self.chamber_temperature_k, pressure_pa);
        self.grid_temperature_k += (grid_heating - grid_cooling) * dt_s
            / (self.params.grid_mass_kg * self.props.specific_heat);

        // outer-facing half of the grid radiates onto the chamber wall
        let chamber_heating = self.props.emissivity
            * STEFAN_BOLTZMANN
            * 0.5
            * self.params.grid_area_m2
            * (self.grid_temperature_k.powi(4) - self.chamber_temperature_k.powi(4));
        let chamber_cooling = CHAMBER_EXTERNAL_H
            * self.params.chamber_area_m2
            * (self.chamber_temperature_k - self.ambient_temperature_k);
        self.chamber_temperature_k += (chamber_heating - chamber_cooling) * dt_s
            / (self.params.chamber_mass_kg * CHAMBER_SPECIFIC_HEAT);

        self.grid_temperature_k = self.grid_temperature_k.max(self.ambient_temperature_k);
        self.chamber_temperature_k = self.chamber_temperature_k.max(self.ambient_temperature_k);

        self.last_balance = HeatBalance {
            grid_heating_w: grid_heating,
            grid_cooling_w: grid_cooling,
            chamber_heating_w: chamber_heating,
            chamber_cooling_w: chamber_cooling,
        };
        self.state()
    }

    /// Wire resistance at the current grid temperature [Ω].
    pub fn grid_resistance(&self) -> f64 {
        self.resistance_at(self.grid_temperature_k)
    }

    /// τ = m·c_p / (h_eff·A) [s].
    pub fn grid_thermal_time_constant(&self) -> f64 {
        self.params.grid_mass_kg * self.props.specific_heat
            / (GRID_EFFECTIVE_H * self.params.grid_area_m2)
    }

    /// Steady grid temperature with the chamber held at ambient [K].
    ///
    /// Bisection on heating − cooling over [T_amb, 6000 K]; returns the upper
    /// bracket when heating still dominates there.
    pub fn equilibrium_grid_temperature(
        &self,
        current_a: f64,
        particle_flux: f64,
        avg_particle_energy_j: f64,
        pressure_pa: f64,
    ) -> f64 {
        let t_amb = self.ambient_temperature_k;
        let net = |t: f64| {
            self.grid_heating_at(t, current_a, particle_flux, avg_particle_energy_j)
                - self.grid_cooling_at(t, t_amb, pressure_pa)
        };
        let (mut lo, mut hi) = (t_amb, EQUILIBRIUM_T_MAX_K);
        if net(lo) <= 0.0 {
            return lo;
        }
        if net(hi) > 0.0 {
            return hi;
        }
        for _ in 0..100 {
            let mid = 0.5 * (lo + hi);
            if net(mid) > 0.0 {
                lo = mid;
            } else {
                hi = mid;
            }
            if hi - lo < 1e-6 {
                break;
            }
        }
        0.5 * (lo + hi)
    }

    fn resistance_at(&self, temperature_k: f64) -> f64 {
        let rho = self.props.resistivity
            * (1.0 + self.props.temp_coeff_resistance * (temperature_k - RESISTIVITY_REFERENCE_K));
        let wire_length = GRID_WIRE_LOOPS * 2.0 * PI * GRID_LOOP_RADIUS_M;
        let wire_area = PI * GRID_WIRE_RADIUS_M * GRID_WIRE_RADIUS_M;
        rho * wire_length / wire_area
    }

    fn grid_heating_at(
        &self,
        temperature_k: f64,
        current_a: f64,
        particle_flux: f64,
        avg_particle_energy_j: f64,
    ) -> f64 {
        let ohmic = current_a * current_a * self.resistance_at(temperature_k);
        let bombardment =
            (1.0 - self.params.grid_transparency) * particle_flux * avg_particle_energy_j;
        ohmic + bombardment
    }

    fn grid_cooling_at(&self, grid_k: f64, chamber_k: f64, pressure_pa: f64) -> f64 {
        let area = self.params.grid_area_m2;
        let radiative = self.props.emissivity
            * STEFAN_BOLTZMANN
            * area
            * (grid_k.powi(4) - self.ambient_temperature_k.powi(4));
        let conductive = SUPPORT_CONDUCTANCE_W_K * (grid_k - chamber_k);
        let h = CONVECTIVE_H_REF * (pressure_pa / ATMOSPHERIC_PRESSURE_PA);
        let convective = h * area * (grid_k - chamber_k);
        radiative + conductive + convective
    }
}
