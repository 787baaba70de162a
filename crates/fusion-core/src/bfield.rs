// ─────────────────────────────────────────────────────────────────────
// FusionSim — Magnetic Field Models
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Magnetostatic field models. Only a uniform field is provided.

use fusion_math::Vec3;
use fusion_types::constants::Q_ELECTRON;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MagneticField {
    Uniform(Vec3),
}

impl MagneticField {
    /// B(r) [T].
    pub fn field_at(&self, _position: Vec3) -> Vec3 {
        match self {
            MagneticField::Uniform(b) => *b,
        }
    }

    /// True when the field vanishes everywhere.
    pub fn is_zero(&self) -> bool {
        match self {
            MagneticField::Uniform(b) => b.norm_squared() == 0.0,
        }
    }
}

/// Larmor radius r_L = m·v_⊥ / (|q|·|B|) [m].
pub fn larmor_radius(mass_kg: f64, charge_c: f64, v_perp: f64, b_t: f64) -> f64 {
    let qb = (charge_c * b_t).abs();
    if qb == 0.0 {
        return f64::INFINITY;
    }
    mass_kg * v_perp.abs() / qb
}

/// Cyclotron period 2π·m / (|q|·|B|) [s].
pub fn cyclotron_period(mass_kg: f64, charge_c: f64, b_t: f64) -> f64 {
    let qb = (charge_c * b_t).abs();
    if qb == 0.0 {
        return f64::INFINITY;
    }
    2.0 * std::f64::consts::PI * mass_kg / qb
}

/// Larmor radius of a singly charged ion.
pub fn ion_larmor_radius(mass_kg: f64, v_perp: f64, b_t: f64) -> f64 {
    larmor_radius(mass_kg, Q_ELECTRON, v_perp, b_t)
}
