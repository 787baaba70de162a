// ─────────────────────────────────────────────────────────────────────
// FusionSim — Binary Collisions
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Two-body kinematics: centre-of-mass energy of a pair and hard-sphere
//! elastic / inelastic velocity updates.

use crate::particles::Particle;
use fusion_math::Vec3;
use fusion_types::constants::KEV_TO_J;

/// Relative-motion quantities of a particle pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairKinematics {
    /// μ = m₁m₂/(m₁+m₂) [kg]
    pub reduced_mass_kg: f64,
    /// |v₁ − v₂| [m/s]
    pub relative_speed: f64,
    /// ½ μ v² [keV]
    pub e_cm_kev: f64,
}

impl PairKinematics {
    pub fn of(a: &Particle, b: &Particle) -> Self {
        let reduced_mass_kg = a.mass_kg * b.mass_kg / (a.mass_kg + b.mass_kg);
        let relative_speed = (a.velocity - b.velocity).norm();
        let e_cm_kev = 0.5 * reduced_mass_kg * relative_speed * relative_speed / KEV_TO_J;
        PairKinematics {
            reduced_mass_kg,
            relative_speed,
            e_cm_kev,
        }
    }
}

/// Line-of-centres unit normal from `a` to `b`; x-axis when the centres coincide.
fn contact_normal(a: &Particle, b: &Particle) -> Vec3 {
    (b.position - a.position).normalized_or(Vec3::X)
}

/// Perfectly elastic hard-sphere collision along the line of centres.
///
/// Only the normal velocity components change; momentum and kinetic energy
/// are conserved.
pub fn elastic_collision(p1: &mut Particle, p2: &mut Particle) {
    let (m1, m2) = (p1.mass_kg, p2.mass_kg);
    let n = contact_normal(p1, p2);
    let (v1, v2) = (p1.velocity, p2.velocity);
    let v1n = v1.dot(n);
    let v2n = v2.dot(n);
    let total = m1 + m2;

    let v1n_new = (v1n * (m1 - m2) + 2.0 * m2 * v2n) / total;
    let v2n_new = (v2n * (m2 - m1) + 2.0 * m1 * v1n) / total;

    p1.set_velocity(v1 + n * (v1n_new - v1n));
    p2.set_velocity(v2 + n * (v2n_new - v2n));
}

/// Inelastic collision removing `energy_loss_j` from the centre-of-mass frame.
///
/// Both particles collapse onto the CM velocity when the loss reaches the
/// available relative kinetic energy. Momentum is conserved.
pub fn inelastic_collision(p1: &mut Particle, p2: &mut Particle, energy_loss_j: f64) {
    let (m1, m2) = (p1.mass_kg, p2.mass_kg);
    let (v1, v2) = (p1.velocity, p2.velocity);
    let v_cm = (v1 * m1 + v2 * m2) / (m1 + m2);
    let v1_rel = v1 - v_cm;
    let v2_rel = v2 - v_cm;
    let available = 0.5 * m1 * v1_rel.norm_squared() + 0.5 * m2 * v2_rel.norm_squared();

    if available <= energy_loss_j {
        p1.set_velocity(v_cm);
        p2.set_velocity(v_cm);
        return;
    }

    let scale = ((available - energy_loss_j.max(0.0)) / available).sqrt();
    p1.set_velocity(v_cm + v1_rel * scale);
    p2.set_velocity(v_cm + v2_rel * scale);
}
