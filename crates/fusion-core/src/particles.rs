// ─────────────────────────────────────────────────────────────────────
// FusionSim — Particles
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Point ions advanced by RK4 under the Lorentz force.
//!
//! A particle holds shared, read-only handles to the electric and magnetic
//! field models. Neutral reaction products carry no handles and drift freely.

use crate::bfield::MagneticField;
use crate::field::ElectricField;
use fusion_math::integrator::{rk4_step, AccelerationField, PhaseState};
use fusion_math::Vec3;
use fusion_types::constants::{
    K_BOLTZMANN, KEV_TO_J, M_DEUTERIUM, M_HELIUM3, M_HELIUM4, M_NEUTRON, M_PROTON, M_TRITIUM,
    Q_ELECTRON,
};
use fusion_types::error::{FusionError, FusionResult};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::sync::Arc;

/// Fusor seeding shell [m].
pub const FUSOR_SHELL_INNER_M: f64 = 0.065;
pub const FUSOR_SHELL_OUTER_M: f64 = 0.075;
/// Non-fusor seeding ball radius [m].
pub const SEED_BALL_RADIUS_M: f64 = 0.10;
/// Tangential velocity jitter as a fraction of v_th.
const TANGENTIAL_JITTER_FRACTION: f64 = 0.1;

/// Charged or neutral point particle.
#[derive(Debug, Clone)]
pub struct Particle {
    pub mass_kg: f64,
    pub charge_c: f64,
    pub position: Vec3,
    pub velocity: Vec3,
    pub field: Option<Arc<ElectricField>>,
    pub magnetic_field: Option<Arc<MagneticField>>,
}

impl Particle {
    pub fn new(mass_kg: f64, charge_c: f64, position: Vec3, velocity: Vec3) -> Self {
        Particle {
            mass_kg,
            charge_c,
            position,
            velocity,
            field: None,
            magnetic_field: None,
        }
    }

    /// Singly charged deuteron.
    pub fn deuteron(position: Vec3, velocity: Vec3) -> Self {
        Particle::new(M_DEUTERIUM, Q_ELECTRON, position, velocity)
    }

    pub fn with_fields(
        mut self,
        field: Option<Arc<ElectricField>>,
        magnetic_field: Option<Arc<MagneticField>>,
    ) -> Self {
        self.field = field;
        self.magnetic_field = magnetic_field;
        self
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    pub fn is_neutral(&self) -> bool {
        self.charge_c == 0.0
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    pub fn momentum(&self) -> Vec3 {
        self.velocity * self.mass_kg
    }

    /// Non-relativistic kinetic energy [J].
    pub fn kinetic_energy_j(&self) -> f64 {
        0.5 * self.mass_kg * self.velocity.norm_squared()
    }

    pub fn kinetic_energy_kev(&self) -> f64 {
        self.kinetic_energy_j() / KEV_TO_J
    }

    /// Lorentz acceleration (q/m)(E + v × B). Missing handles contribute nothing.
    pub fn acceleration(&self, position: Vec3, velocity: Vec3) -> Vec3 {
        let mut force = Vec3::ZERO;
        if let Some(field) = &self.field {
            force += field.field_at(position);
        }
        if let Some(bfield) = &self.magnetic_field {
            force += velocity.cross(bfield.field_at(position));
        }
        force * (self.charge_c / self.mass_kg)
    }

    /// Advance one RK4 step of length `dt_s` (negative integrates backwards).
    pub fn propagate(&mut self, dt_s: f64) {
        if self.field.is_none() && self.magnetic_field.is_none() {
            if dt_s.is_finite() {
                self.position += self.velocity * dt_s;
            }
            return;
        }
        let mut state = PhaseState {
            r: self.position,
            v: self.velocity,
        };
        rk4_step(&mut state, &LorentzForce(self), dt_s);
        self.position = state.r;
        self.velocity = state.v;
    }

    /// Reject non-finite state or non-positive mass.
    pub fn validate(&self, label: &str) -> FusionResult<()> {
        if !self.position.is_finite() {
            return Err(FusionError::PhysicsViolation(format!(
                "{label} position components must be finite"
            )));
        }
        if !self.velocity.is_finite() {
            return Err(FusionError::PhysicsViolation(format!(
                "{label} velocity components must be finite"
            )));
        }
        if !self.charge_c.is_finite() {
            return Err(FusionError::PhysicsViolation(format!(
                "{label}.charge_c must be finite"
            )));
        }
        if !self.mass_kg.is_finite() || self.mass_kg <= 0.0 {
            return Err(FusionError::PhysicsViolation(format!(
                "{label}.mass_kg must be finite and > 0"
            )));
        }
        Ok(())
    }
}

struct LorentzForce<'a>(&'a Particle);

impl AccelerationField for LorentzForce<'_> {
    fn acceleration(&self, r: Vec3, v: Vec3) -> Vec3 {
        self.0.acceleration(r, v)
    }
}

/// Isotropic unit vector: φ ∼ U(0, 2π), cos θ ∼ U(−1, 1).
pub fn isotropic_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let phi = rng.gen_range(0.0..2.0 * PI);
    let cos_theta: f64 = rng.gen_range(-1.0..=1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    Vec3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
}

/// One-dimensional deuteron thermal speed √(k_B T / m_D) [m/s].
pub fn deuteron_thermal_speed(temperature_k: f64) -> f64 {
    (K_BOLTZMANN * temperature_k / M_DEUTERIUM).sqrt()
}

fn validate_seed_inputs(count: usize, temperature_k: f64) -> FusionResult<()> {
    if count == 0 {
        return Err(FusionError::ConfigError(
            "particle_count must be >= 1".to_string(),
        ));
    }
    if !temperature_k.is_finite() || temperature_k <= 0.0 {
        return Err(FusionError::ConfigError(format!(
            "temperature_k must be finite and > 0, got {temperature_k}"
        )));
    }
    Ok(())
}

/// Seed deuterons in the fusor shell r ∈ [0.065, 0.075] m, falling inward.
///
/// Speed is U(0.5, 1.5)·v_th along −r̂ plus a small Gaussian tangential jitter.
pub fn seed_fusor_shell<R: Rng + ?Sized>(
    count: usize,
    temperature_k: f64,
    field: Option<Arc<ElectricField>>,
    magnetic_field: Option<Arc<MagneticField>>,
    rng: &mut R,
) -> FusionResult<Vec<Particle>> {
    validate_seed_inputs(count, temperature_k)?;
    let v_th = deuteron_thermal_speed(temperature_k);
    let jitter = Normal::new(0.0, TANGENTIAL_JITTER_FRACTION * v_th)
        .map_err(|e| FusionError::ConfigError(format!("tangential jitter: {e}")))?;

    let r3_min = FUSOR_SHELL_INNER_M.powi(3);
    let r3_max = FUSOR_SHELL_OUTER_M.powi(3);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let radius = rng.gen_range(r3_min..=r3_max).cbrt();
        let r_hat = isotropic_direction(rng);
        let t1 = r_hat.any_orthonormal();
        let t2 = r_hat.cross(t1);
        let speed = rng.gen_range(0.5..=1.5) * v_th;
        let velocity = -r_hat * speed + t1 * jitter.sample(rng) + t2 * jitter.sample(rng);
        out.push(
            Particle::deuteron(r_hat * radius, velocity)
                .with_fields(field.clone(), magnetic_field.clone()),
        );
    }
    Ok(out)
}

/// Seed deuterons uniformly in a ball of radius 0.10 m with Maxwellian velocities.
pub fn seed_thermal_ball<R: Rng + ?Sized>(
    count: usize,
    temperature_k: f64,
    field: Option<Arc<ElectricField>>,
    magnetic_field: Option<Arc<MagneticField>>,
    rng: &mut R,
) -> FusionResult<Vec<Particle>> {
    validate_seed_inputs(count, temperature_k)?;
    let maxwell = Normal::new(0.0, deuteron_thermal_speed(temperature_k))
        .map_err(|e| FusionError::ConfigError(format!("thermal velocity: {e}")))?;

    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let radius = SEED_BALL_RADIUS_M * rng.gen::<f64>().cbrt();
        let position = isotropic_direction(rng) * radius;
        let velocity = Vec3::new(
            maxwell.sample(rng),
            maxwell.sample(rng),
            maxwell.sample(rng),
        );
        out.push(
            Particle::deuteron(position, velocity)
                .with_fields(field.clone(), magnetic_field.clone()),
        );
    }
    Ok(out)
}

// ── Population summary ───────────────────────────────────────────────

/// Species inferred from mass and charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Deuteron,
    Triton,
    Proton,
    Neutron,
    Helion,
    Alpha,
    Unknown,
}

impl Species {
    /// Match within 0.5 % in mass and exactly in charge number.
    pub fn classify(mass_kg: f64, charge_c: f64) -> Self {
        let charge_number = (charge_c / Q_ELECTRON).round() as i64;
        let near = |reference: f64| ((mass_kg - reference) / reference).abs() < 5.0e-3;
        match charge_number {
            0 if near(M_NEUTRON) => Species::Neutron,
            1 if near(M_PROTON) => Species::Proton,
            1 if near(M_DEUTERIUM) => Species::Deuteron,
            1 if near(M_TRITIUM) => Species::Triton,
            2 if near(M_HELIUM3) => Species::Helion,
            2 if near(M_HELIUM4) => Species::Alpha,
            _ => Species::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationSummary {
    pub count: usize,
    pub charged_count: usize,
    pub neutral_count: usize,
    pub mean_kinetic_energy_kev: f64,
    pub mean_speed_m_s: f64,
    pub species: BTreeMap<Species, usize>,
}

impl PopulationSummary {
    pub fn species_count(&self, species: Species) -> usize {
        self.species.get(&species).copied().unwrap_or(0)
    }
}

/// Summarize kinetic state and composition of a particle population.
pub fn summarize_population(particles: &[Particle]) -> PopulationSummary {
    let count = particles.len();
    let mut species = BTreeMap::new();
    let mut neutral_count = 0usize;
    let mut energy_sum = 0.0;
    let mut speed_sum = 0.0;
    for p in particles {
        *species
            .entry(Species::classify(p.mass_kg, p.charge_c))
            .or_insert(0usize) += 1;
        if p.is_neutral() {
            neutral_count += 1;
        }
        energy_sum += p.kinetic_energy_kev();
        speed_sum += p.speed();
    }
    let denom = count.max(1) as f64;
    PopulationSummary {
        count,
        charged_count: count - neutral_count,
        neutral_count,
        mean_kinetic_energy_kev: energy_sum / denom,
        mean_speed_m_s: speed_sum / denom,
        species,
    }
}
