// ─────────────────────────────────────────────────────────────────────
// FusionSim — Simulation Manager
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Time loop: optional thermal feedback, parallel RK4 push, all-pairs
//! Monte-Carlo reaction sampling, product merge.
//!
//! Each step:
//! 1. every 100 steps, update grid/chamber temperatures from the population
//! 2. propagate every particle by `dt` (`par_iter_mut`)
//! 3. split the flat pair range `[0, n(n−1)/2)` into one contiguous chunk per
//!    worker; each worker owns a `ChaCha8Rng` and a product buffer
//! 4. append the buffers in worker order
//!
//! Particles are read-only during step 3, and products join the population
//! only after every pair has been sampled.

use crate::bfield::MagneticField;
use crate::collision::PairKinematics;
use crate::envelope::{EnvelopeInputs, OperatingEnvelope};
use crate::field::{CoulombSphereField, ElectricField};
use crate::fusor::{FusorField, FusorOperatingState};
use crate::particles::{
    seed_fusor_shell, seed_thermal_ball, Particle, FUSOR_SHELL_INNER_M, FUSOR_SHELL_OUTER_M,
};
use crate::reaction::ReactionModel;
use crate::thermal::{ThermalDynamicsModel, ThermalParams};
use fusion_math::pairs::{pair_count, partition_range, PairRange};
use fusion_math::Vec3;
use fusion_types::config::SimulationConfig;
use fusion_types::constants::Q_ELECTRON;
use fusion_types::error::{FusionError, FusionResult};
use fusion_types::state::{ProgressReport, RunSummary, ThermalState};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Steps between thermal updates.
pub const THERMAL_UPDATE_INTERVAL: u64 = 100;
/// Steps between progress reports.
pub const PROGRESS_INTERVAL: u64 = 1000;

/// Read-only inputs shared by all pair-sampling workers.
struct PairSampler<'a> {
    particles: &'a [Particle],
    reaction: ReactionModel,
    field: &'a Arc<ElectricField>,
    magnetic_field: Option<&'a Arc<MagneticField>>,
    dt_s: f64,
    density_m3: f64,
    collision_radius_sq: f64,
}

impl PairSampler<'_> {
    /// Sample every pair in `range`; returns the products and local reaction count.
    fn sweep<R: Rng + ?Sized>(&self, range: Range<u64>, rng: &mut R) -> (Vec<Particle>, u64) {
        let mut products = Vec::new();
        let mut reactions = 0u64;
        for (i, j) in PairRange::new(self.particles.len(), range) {
            let (a, b) = (&self.particles[i], &self.particles[j]);
            if a.position.distance_squared(b.position) > self.collision_radius_sq {
                continue;
            }
            let kin = PairKinematics::of(a, b);
            let p = self.reaction.cross_section(kin.e_cm_kev)
                * kin.relative_speed
                * self.dt_s
                * self.density_m3;
            if !(p > 0.0) {
                continue;
            }
            if rng.gen::<f64>() < p {
                let reactants = [a.clone(), b.clone()];
                let out = self.reaction.react(
                    &reactants,
                    Some(self.field),
                    self.magnetic_field,
                    rng,
                );
                if !out.is_empty() {
                    products.extend(out);
                    reactions += 1;
                }
            }
        }
        (products, reactions)
    }
}

pub struct SimulationManager {
    config: SimulationConfig,
    particles: Vec<Particle>,
    field: Arc<ElectricField>,
    magnetic_field: Option<Arc<MagneticField>>,
    reaction: ReactionModel,
    pool: rayon::ThreadPool,
    worker_rngs: Vec<ChaCha8Rng>,
    seed: u64,
    reaction_count: AtomicU64,
    thermal: Option<ThermalDynamicsModel>,
    operating: FusorOperatingState,
    grid_was_safe: bool,
    chamber_was_safe: bool,
    time_s: f64,
    step_index: u64,
    total_steps: u64,
    initial_particle_count: usize,
}

impl SimulationManager {
    /// Build fields, models and a seeded population from a configuration.
    pub fn new(config: SimulationConfig) -> FusionResult<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let field = Arc::new(build_field(&config)?);
        let magnetic_field = build_magnetic_field(&config);

        let mut seed_rng = ChaCha8Rng::seed_from_u64(seed);
        let particles = if config.fusor {
            seed_fusor_shell(
                config.particle_count,
                config.temperature_k,
                Some(field.clone()),
                magnetic_field.clone(),
                &mut seed_rng,
            )?
        } else {
            seed_thermal_ball(
                config.particle_count,
                config.temperature_k,
                Some(field.clone()),
                magnetic_field.clone(),
                &mut seed_rng,
            )?
        };
        Self::assemble(config, seed, field, magnetic_field, particles)
    }

    /// Build around an explicit field and population.
    ///
    /// Charged particles are re-pointed at the manager's field handles; the
    /// configured field geometry and particle count are not used.
    pub fn with_population(
        config: SimulationConfig,
        field: ElectricField,
        magnetic_field: Option<MagneticField>,
        particles: Vec<Particle>,
    ) -> FusionResult<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let field = Arc::new(field);
        let magnetic_field = magnetic_field.map(Arc::new);
        let particles = particles
            .into_iter()
            .map(|p| {
                if p.is_neutral() {
                    p.with_fields(None, None)
                } else {
                    p.with_fields(Some(field.clone()), magnetic_field.clone())
                }
            })
            .collect();
        Self::assemble(config, seed, field, magnetic_field, particles)
    }

    fn assemble(
        config: SimulationConfig,
        seed: u64,
        field: Arc<ElectricField>,
        magnetic_field: Option<Arc<MagneticField>>,
        particles: Vec<Particle>,
    ) -> FusionResult<Self> {
        for (idx, p) in particles.iter().enumerate() {
            p.validate(&format!("particle[{idx}]"))?;
        }

        let threads = config.threads.unwrap_or_else(rayon::current_num_threads).max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("fusionsim-worker-{i}"))
            .build()
            .map_err(|e| FusionError::ThreadPool(e.to_string()))?;
        let worker_rngs = (0..threads)
            .map(|worker| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                // stream 0 seeds the population
                rng.set_stream(worker as u64 + 1);
                rng
            })
            .collect();

        let ambient_k = ThermalParams::default().ambient_temperature_k;
        let thermal = if config.thermal {
            Some(ThermalDynamicsModel::new(ThermalParams {
                grid_transparency: config.grid_transparency,
                ..ThermalParams::default()
            })?)
        } else {
            None
        };
        let mut operating = FusorOperatingState::new(config.pressure_pa(), ambient_k);
        if let Some(model) = &thermal {
            operating.set_temperatures(model.grid_temperature_k(), model.chamber_temperature_k());
        }

        let reaction = ReactionModel::from(config.reaction);
        let total_steps = config.step_count();
        let initial_particle_count = particles.len();

        if config.fusor && config.collision_radius_m > FUSOR_SHELL_OUTER_M - FUSOR_SHELL_INNER_M {
            log::warn!(
                "collision_radius_m = {} exceeds the seeding shell thickness; pair filter is ineffective",
                config.collision_radius_m
            );
        }
        let pairs = pair_count(initial_particle_count);
        if (threads as u64) > pairs {
            log::warn!("{threads} worker threads for only {pairs} particle pairs");
        }

        Ok(SimulationManager {
            config,
            particles,
            field,
            magnetic_field,
            reaction,
            pool,
            worker_rngs,
            seed,
            reaction_count: AtomicU64::new(0),
            thermal,
            operating,
            grid_was_safe: true,
            chamber_was_safe: true,
            time_s: 0.0,
            step_index: 0,
            total_steps,
            initial_particle_count,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn field(&self) -> &Arc<ElectricField> {
        &self.field
    }

    pub fn magnetic_field(&self) -> Option<&Arc<MagneticField>> {
        self.magnetic_field.as_ref()
    }

    pub fn reaction_model(&self) -> ReactionModel {
        self.reaction
    }

    pub fn reaction_count(&self) -> u64 {
        self.reaction_count.load(Ordering::Relaxed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn thread_count(&self) -> usize {
        self.worker_rngs.len()
    }

    pub fn time_s(&self) -> f64 {
        self.time_s
    }

    pub fn step_index(&self) -> u64 {
        self.step_index
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    pub fn initial_particle_count(&self) -> usize {
        self.initial_particle_count
    }

    pub fn thermal_state(&self) -> Option<ThermalState> {
        self.thermal.as_ref().map(ThermalDynamicsModel::state)
    }

    pub fn operating_state(&self) -> &FusorOperatingState {
        &self.operating
    }

    pub fn progress(&self) -> ProgressReport {
        let percent_complete = if self.total_steps == 0 {
            100.0
        } else {
            100.0 * self.step_index as f64 / self.total_steps as f64
        };
        ProgressReport {
            step: self.step_index,
            total_steps: self.total_steps,
            time_s: self.time_s,
            percent_complete,
            particle_count: self.particles.len(),
            reaction_count: self.reaction_count(),
        }
    }

    /// Operating envelope of the current fusor state; `None` without a fusor field.
    pub fn envelope(&self) -> Option<OperatingEnvelope> {
        let fusor = self.field.as_fusor()?;
        let (mean_energy_j, mean_speed) = self.population_means();
        let thermal = match &self.thermal {
            Some(model) => model.clone(),
            None => ThermalDynamicsModel::new(ThermalParams {
                grid_transparency: fusor.transparency(),
                ..ThermalParams::default()
            })
            .ok()?,
        };
        let inputs = EnvelopeInputs {
            gas_temperature_k: self.config.temperature_k,
            plasma_density_m3: self.config.particle_density_m3,
            particle_flux: self.grid_flux(mean_speed, thermal.params().grid_area_m2),
            avg_particle_energy_j: mean_energy_j,
        };
        Some(OperatingEnvelope::evaluate(fusor, &self.operating, &thermal, &inputs))
    }

    /// Advance one time step.
    pub fn step(&mut self) {
        if self.thermal.is_some() && self.step_index % THERMAL_UPDATE_INTERVAL == 0 {
            self.update_thermal();
        }

        self.propagate_all();
        let products = self.sample_reactions();
        if !products.is_empty() {
            log::debug!(
                "step {}: merging {} reaction products",
                self.step_index,
                products.len()
            );
            self.particles.extend(products);
        }

        self.step_index += 1;
        self.time_s = self.step_index as f64 * self.config.dt_s;
    }

    /// Run to `t_max` without progress callbacks.
    pub fn run(&mut self) -> FusionResult<RunSummary> {
        self.run_with_observer(|_| {})
    }

    /// Run to `t_max`, handing a [`ProgressReport`] to `observer` every 1000 steps.
    ///
    /// Fails if a particle state becomes non-finite.
    pub fn run_with_observer<F>(&mut self, mut observer: F) -> FusionResult<RunSummary>
    where
        F: FnMut(&ProgressReport),
    {
        let started = Instant::now();
        log::info!(
            "starting {} run: {} particles, {} pairs, {} steps of {:e} s on {} threads (seed {})",
            self.reaction.name(),
            self.particles.len(),
            pair_count(self.particles.len()),
            self.total_steps,
            self.config.dt_s,
            self.thread_count(),
            self.seed
        );

        while self.step_index < self.total_steps {
            self.step();
            if self.step_index % PROGRESS_INTERVAL == 0 {
                self.check_population()?;
                let report = self.progress();
                log::info!(
                    "{:.1}% complete: {} particles, {} reactions",
                    report.percent_complete,
                    report.particle_count,
                    report.reaction_count
                );
                observer(&report);
            }
        }
        self.check_population()?;

        let summary = RunSummary {
            steps: self.step_index,
            simulated_time_s: self.time_s,
            initial_particle_count: self.initial_particle_count,
            final_particle_count: self.particles.len(),
            reaction_count: self.reaction_count(),
            reaction_name: self.reaction.name().to_string(),
            thermal: self.thermal_state(),
            wall_time_ms: started.elapsed().as_secs_f64() * 1.0e3,
        };
        log::info!(
            "finished: {} reactions, {} -> {} particles in {:.1} ms",
            summary.reaction_count,
            summary.initial_particle_count,
            summary.final_particle_count,
            summary.wall_time_ms
        );
        Ok(summary)
    }

    fn propagate_all(&mut self) {
        let dt = self.config.dt_s;
        let particles = &mut self.particles;
        self.pool.install(|| {
            particles.par_iter_mut().for_each(|p| p.propagate(dt));
        });
    }

    fn sample_reactions(&mut self) -> Vec<Particle> {
        let total = pair_count(self.particles.len());
        if total == 0 {
            return Vec::new();
        }
        let sampler = PairSampler {
            particles: &self.particles,
            reaction: self.reaction,
            field: &self.field,
            magnetic_field: self.magnetic_field.as_ref(),
            dt_s: self.config.dt_s,
            density_m3: self.config.particle_density_m3,
            collision_radius_sq: self.config.collision_radius_m * self.config.collision_radius_m,
        };
        let ranges = partition_range(total, self.worker_rngs.len());
        let counter = &self.reaction_count;
        let rngs = &mut self.worker_rngs;

        let buffers: Vec<Vec<Particle>> = self.pool.install(|| {
            rngs.par_iter_mut()
                .zip(ranges.into_par_iter())
                .map(|(rng, range)| {
                    let (products, reactions) = sampler.sweep(range, rng);
                    if reactions > 0 {
                        counter.fetch_add(reactions, Ordering::Relaxed);
                    }
                    products
                })
                .collect()
        });
        buffers.into_iter().flatten().collect()
    }

    /// Mean kinetic energy [J] and mean speed [m/s] of the population.
    fn population_means(&self) -> (f64, f64) {
        let n = self.particles.len();
        if n == 0 {
            return (0.0, 0.0);
        }
        let (energy, speed) = self
            .particles
            .iter()
            .fold((0.0, 0.0), |(e, s), p| (e + p.kinetic_energy_j(), s + p.speed()));
        (energy / n as f64, speed / n as f64)
    }

    /// Kinetic-theory wall flux n·v̄·A/4 [1/s].
    fn grid_flux(&self, mean_speed: f64, grid_area_m2: f64) -> f64 {
        self.config.particle_density_m3 * mean_speed * grid_area_m2 / 4.0
    }

    fn update_thermal(&mut self) {
        let (mean_energy_j, mean_speed) = self.population_means();
        let Some(grid_area) = self.thermal.as_ref().map(|m| m.params().grid_area_m2) else {
            return;
        };
        let flux = self.grid_flux(mean_speed, grid_area);
        let current = flux * Q_ELECTRON;
        let dt = self.config.dt_s * THERMAL_UPDATE_INTERVAL as f64;
        let pressure = self.operating.pressure_pa;
        let Some(model) = self.thermal.as_mut() else {
            return;
        };
        let state = model.update_temperatures(dt, current, flux, mean_energy_j, pressure);
        self.operating
            .set_temperatures(state.grid_temperature_k, state.chamber_temperature_k);
        log::debug!(
            "step {}: grid {:.2} K, chamber {:.2} K (I = {:.3e} A)",
            self.step_index,
            state.grid_temperature_k,
            state.chamber_temperature_k,
            current
        );

        let grid_safe = self.operating.is_grid_temperature_safe();
        if self.grid_was_safe && !grid_safe {
            log::warn!(
                "grid temperature {:.1} K exceeds {:.1} K",
                state.grid_temperature_k,
                self.operating.grid_temperature_limit_k
            );
        }
        self.grid_was_safe = grid_safe;
        let chamber_safe = self.operating.is_chamber_temperature_safe();
        if self.chamber_was_safe && !chamber_safe {
            log::warn!(
                "chamber temperature {:.1} K exceeds {:.1} K",
                state.chamber_temperature_k,
                self.operating.chamber_temperature_limit_k
            );
        }
        self.chamber_was_safe = chamber_safe;
    }

    fn check_population(&self) -> FusionResult<()> {
        for (idx, p) in self.particles.iter().enumerate() {
            if !p.position.is_finite() || !p.velocity.is_finite() {
                return Err(FusionError::PhysicsViolation(format!(
                    "particle[{idx}] state became non-finite at step {}",
                    self.step_index
                )));
            }
        }
        Ok(())
    }
}

fn build_field(config: &SimulationConfig) -> FusionResult<ElectricField> {
    if config.fusor {
        Ok(ElectricField::Fusor(FusorField::new(
            config.inner_radius_m,
            config.outer_radius_m,
            config.voltage_v,
            config.grid_transparency,
        )?))
    } else {
        Ok(ElectricField::CoulombSphere(CoulombSphereField::new(
            config.coulomb_sphere_radius_m,
            config.voltage_v,
        )?))
    }
}

fn build_magnetic_field(config: &SimulationConfig) -> Option<Arc<MagneticField>> {
    let b = Vec3::from_array(config.magnetic_field_t);
    if b.norm_squared() > 0.0 {
        Some(Arc::new(MagneticField::Uniform(b)))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fusion_types::config::ReactionKind;
    use fusion_types::constants::M_DEUTERIUM;

    fn small_config() -> SimulationConfig {
        SimulationConfig {
            particle_count: 40,
            t_max_s: 2.0e-9,
            dt_s: 1.0e-10,
            threads: Some(3),
            seed: Some(1234),
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_new_seeds_population() {
        let sim = SimulationManager::new(small_config()).unwrap();
        assert_eq!(sim.particles().len(), 40);
        assert_eq!(sim.total_steps(), 20);
        assert_eq!(sim.thread_count(), 3);
        assert!(sim.field().as_fusor().is_some());
        assert!(sim.magnetic_field().is_none());
        assert!(sim.particles().iter().all(|p| p.field.is_some()));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let cfg = SimulationConfig {
            dt_s: 0.0,
            ..small_config()
        };
        let err = SimulationManager::new(cfg).err().expect("dt = 0 must fail");
        assert!(err.is_config());
    }

    #[test]
    fn test_non_fusor_uses_coulomb_sphere_and_ball() {
        let cfg = SimulationConfig {
            fusor: false,
            magnetic_field_t: [0.0, 0.0, 0.5],
            ..small_config()
        };
        let sim = SimulationManager::new(cfg).unwrap();
        assert!(matches!(**sim.field(), ElectricField::CoulombSphere(_)));
        assert!(sim.magnetic_field().is_some());
        assert!(sim.envelope().is_none());
    }

    #[test]
    fn test_same_seed_same_threads_is_reproducible() {
        let cfg = SimulationConfig {
            collision_radius_m: 0.05,
            particle_density_m3: 1.0e35,
            ..small_config()
        };
        let mut a = SimulationManager::new(cfg.clone()).unwrap();
        let mut b = SimulationManager::new(cfg).unwrap();
        let sa = a.run().unwrap();
        let sb = b.run().unwrap();
        assert_eq!(sa.reaction_count, sb.reaction_count);
        assert_eq!(sa.final_particle_count, sb.final_particle_count);
        for (pa, pb) in a.particles().iter().zip(b.particles()) {
            assert_eq!(pa.position, pb.position);
            assert_eq!(pa.velocity, pb.velocity);
        }
    }

    #[test]
    fn test_forced_reactions_conserve_counts() {
        // absurd density makes every close, moving pair react
        let cfg = SimulationConfig {
            reaction: ReactionKind::Dt,
            particle_density_m3: 1.0e40,
            collision_radius_m: 1.0,
            t_max_s: 1.0e-10,
            ..small_config()
        };
        let particles = vec![
            Particle::deuteron(Vec3::ZERO, Vec3::X * 1.0e6),
            Particle::deuteron(Vec3::X * 1e-4, -Vec3::X * 1.0e6),
        ];
        let mut sim =
            SimulationManager::with_population(cfg, ElectricField::zero(), None, particles).unwrap();
        let summary = sim.run().unwrap();
        assert_eq!(summary.reaction_count, 1);
        assert_eq!(summary.final_particle_count, 4);
        let neutrons = sim.particles().iter().filter(|p| p.is_neutral()).count();
        assert_eq!(neutrons, 1);
        assert!(sim.particles()[2..]
            .iter()
            .all(|p| p.is_neutral() == p.field.is_none()));
    }

    #[test]
    fn test_pairs_outside_collision_radius_never_react() {
        let cfg = SimulationConfig {
            particle_density_m3: 1.0e40,
            collision_radius_m: 1.0e-3,
            t_max_s: 5.0e-10,
            ..small_config()
        };
        let particles = vec![
            Particle::deuteron(Vec3::ZERO, Vec3::Y * 1.0e6),
            Particle::deuteron(Vec3::X * 0.01, -Vec3::Y * 1.0e6),
        ];
        let mut sim =
            SimulationManager::with_population(cfg, ElectricField::zero(), None, particles).unwrap();
        let summary = sim.run().unwrap();
        assert_eq!(summary.reaction_count, 0);
        assert_eq!(summary.final_particle_count, 2);
    }

    #[test]
    fn test_single_particle_propagates_without_reactions() {
        let particles = vec![Particle::deuteron(Vec3::ZERO, Vec3::X * 1.0e5)];
        let mut sim = SimulationManager::with_population(
            small_config(),
            ElectricField::zero(),
            None,
            particles,
        )
        .unwrap();
        sim.step();
        assert_eq!(sim.particles().len(), 1);
        assert!((sim.particles()[0].position.x - 1.0e-5).abs() < 1e-15);
        assert_eq!(sim.reaction_count(), 0);
        assert_eq!(sim.step_index(), 1);
    }

    #[test]
    fn test_thermal_feedback_updates_operating_state() {
        let cfg = SimulationConfig {
            thermal: true,
            ..small_config()
        };
        let mut sim = SimulationManager::new(cfg).unwrap();
        let before = sim.thermal_state().unwrap();
        sim.step();
        let after = sim.thermal_state().unwrap();
        assert!(after.grid_temperature_k >= after.ambient_temperature_k);
        assert!(after.grid_temperature_k >= before.grid_temperature_k);
        assert_eq!(sim.operating_state().grid_temperature_k, after.grid_temperature_k);
        let summary = sim.run().unwrap();
        assert!(summary.thermal.is_some());
    }

    #[test]
    fn test_progress_reports_every_thousand_steps() {
        let cfg = SimulationConfig {
            particle_count: 4,
            t_max_s: 2.5e-7,
            dt_s: 1.0e-10,
            threads: Some(1),
            ..small_config()
        };
        let mut sim = SimulationManager::new(cfg).unwrap();
        let mut reports = Vec::new();
        let summary = sim.run_with_observer(|r| reports.push(*r)).unwrap();
        assert_eq!(summary.steps, 2500);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].step, 1000);
        assert!((reports[1].percent_complete - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_envelope_available_for_fusor() {
        let sim = SimulationManager::new(small_config()).unwrap();
        let env = sim.envelope().expect("fusor envelope");
        assert!((env.max_ion_energy_kev - 30.0).abs() < 1e-9);
        assert!(env.equilibrium_grid_temperature_k >= 298.15);
    }

    #[test]
    fn test_with_population_attaches_fields_to_charged_only() {
        let particles = vec![
            Particle::deuteron(Vec3::ZERO, Vec3::ZERO),
            Particle::new(1.0e-27, 0.0, Vec3::X, Vec3::ZERO),
        ];
        let sim = SimulationManager::with_population(
            small_config(),
            ElectricField::from(FusorField::default()),
            Some(MagneticField::Uniform(Vec3::Z)),
            particles,
        )
        .unwrap();
        assert!(sim.particles()[0].field.is_some());
        assert!(sim.particles()[0].magnetic_field.is_some());
        assert!(sim.particles()[1].field.is_none());
        assert_eq!(sim.particles()[0].mass_kg, M_DEUTERIUM);
    }

    #[test]
    fn test_with_population_rejects_nan_particle() {
        let particles = vec![Particle::deuteron(Vec3::new(f64::NAN, 0.0, 0.0), Vec3::ZERO)];
        let err = SimulationManager::with_population(
            small_config(),
            ElectricField::zero(),
            None,
            particles,
        )
        .err()
        .expect("NaN position must fail");
        match err {
            FusionError::PhysicsViolation(msg) => assert!(msg.contains("particle[0]")),
            other => panic!("Unexpected error: {other:?}"),
        }
    }
}
