// ─────────────────────────────────────────────────────────────────────
// FusionSim — Operating Envelope
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Breakdown, plasma-parameter and thermal-equilibrium view of a fusor
//! operating point.

use crate::fusor::{FusorField, FusorOperatingState, OperatingMode};
use crate::thermal::ThermalDynamicsModel;
use fusion_types::constants::{EV_TO_J, Q_ELECTRON};
use serde::{Deserialize, Serialize};

/// Inputs describing the operating point beyond the field geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeInputs {
    pub gas_temperature_k: f64,
    pub plasma_density_m3: f64,
    /// Ion flux onto the grid shell [1/s].
    pub particle_flux: f64,
    /// Mean ion energy at the grid [J].
    pub avg_particle_energy_j: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingEnvelope {
    pub pressure_pa: f64,
    pub gap_m: f64,
    pub paschen_breakdown_v: f64,
    pub exceeds_breakdown: bool,
    pub debye_length_m: f64,
    pub electron_plasma_frequency_rad_s: f64,
    pub deuteron_plasma_frequency_rad_s: f64,
    pub mean_free_path_m: f64,
    /// Mean free path measured in anode–cathode gaps.
    pub gap_knudsen_number: f64,
    pub ionisation_cross_section_m2: f64,
    pub operating_mode: OperatingMode,
    pub max_ion_energy_kev: f64,
    pub max_ion_speed_m_s: f64,
    pub oscillation_period_s: f64,
    pub effective_transparency: f64,
    pub resonant_peak_current_a: f64,
    pub equilibrium_grid_temperature_k: f64,
    pub grid_equilibrium_safe: bool,
}

impl OperatingEnvelope {
    pub fn evaluate(
        field: &FusorField,
        operating: &FusorOperatingState,
        thermal: &ThermalDynamicsModel,
        inputs: &EnvelopeInputs,
    ) -> Self {
        let pressure_pa = operating.pressure_pa;
        let gap_m = field.outer_radius_m() - field.inner_radius_m();
        let paschen_breakdown_v = FusorField::paschen_breakdown(pressure_pa, gap_m);
        let mean_free_path_m = FusorField::mean_free_path(pressure_pa, inputs.gas_temperature_k);
        let cathode_energy_ev = field.cathode_voltage_v().abs();
        let peak_current = operating.drive.peak_current_a();
        let equilibrium_grid_temperature_k = thermal.equilibrium_grid_temperature(
            peak_current,
            inputs.particle_flux,
            inputs.avg_particle_energy_j,
            pressure_pa,
        );

        OperatingEnvelope {
            pressure_pa,
            gap_m,
            paschen_breakdown_v,
            exceeds_breakdown: field.cathode_voltage_v().abs() >= paschen_breakdown_v,
            debye_length_m: FusorField::debye_length(
                inputs.gas_temperature_k,
                inputs.plasma_density_m3,
            ),
            electron_plasma_frequency_rad_s: FusorField::electron_plasma_frequency(
                inputs.plasma_density_m3,
            ),
            deuteron_plasma_frequency_rad_s: FusorField::deuteron_plasma_frequency(
                inputs.plasma_density_m3,
            ),
            mean_free_path_m,
            gap_knudsen_number: mean_free_path_m / gap_m,
            ionisation_cross_section_m2: FusorField::ionisation_cross_section(cathode_energy_ev),
            operating_mode: OperatingMode::classify(pressure_pa, peak_current),
            max_ion_energy_kev: field.max_ion_energy_j() / (1.0e3 * EV_TO_J),
            max_ion_speed_m_s: field.max_ion_speed(),
            oscillation_period_s: field.oscillation_period(),
            effective_transparency: field.effective_transparency(),
            resonant_peak_current_a: peak_current,
            equilibrium_grid_temperature_k,
            grid_equilibrium_safe: equilibrium_grid_temperature_k
                < operating.grid_temperature_limit_k,
        }
    }

    /// Current carried by a singly charged ion flux [A].
    pub fn flux_current_a(particle_flux: f64) -> f64 {
        particle_flux * Q_ELECTRON
    }
}
