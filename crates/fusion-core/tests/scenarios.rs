// ─────────────────────────────────────────────────────────────────────
// FusionSim — End-to-End Scenarios
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! End-to-end physics scenarios for the simulation kernel.

use fusion_core::bfield::{ion_larmor_radius, MagneticField};
use fusion_core::field::ElectricField;
use fusion_core::fusor::FusorField;
use fusion_core::particles::Particle;
use fusion_core::reaction::ReactionModel;
use fusion_core::simulation::SimulationManager;
use fusion_math::Vec3;
use fusion_types::config::{ReactionKind, SimulationConfig};
use fusion_types::constants::{
    M_DEUTERIUM, M_HELIUM4, M_NEUTRON, M_TRITIUM, MEV_TO_J, Q_ELECTRON,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

// ── Ion falling through the fusor potential ──────────────────────────

#[test]
fn ion_reaches_cathode_with_full_energy() {
    let fusor = FusorField::new(0.008, 0.04, -30_000.0, 0.95).unwrap();
    let field = Arc::new(ElectricField::from(fusor));
    let mut ion =
        Particle::deuteron(Vec3::new(0.0, 0.0, 0.04), Vec3::ZERO).with_fields(Some(field), None);

    let dt = 1.0e-12;
    let mut steps = 0usize;
    while ion.position.norm() > 0.008 && steps < 200_000 {
        ion.propagate(dt);
        steps += 1;
    }
    assert!(ion.position.norm() <= 0.008, "ion never reached the cathode");

    let expected = (2.0 * 30_000.0 * Q_ELECTRON / M_DEUTERIUM).sqrt();
    let rel = (ion.speed() - expected).abs() / expected;
    assert!(rel < 0.02, "speed {} vs {expected} (rel {rel:.3e})", ion.speed());
    // purely radial fall
    assert!(ion.position.x.abs() < 1e-12 && ion.position.y.abs() < 1e-12);
}

// ── D-T reaction products ────────────────────────────────────────────

#[test]
fn dt_products_have_branch_speeds() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let reactants = [
        Particle::deuteron(Vec3::ZERO, Vec3::ZERO),
        Particle::new(M_TRITIUM, Q_ELECTRON, Vec3::ZERO, Vec3::ZERO),
    ];
    let products = ReactionModel::Dt.react(&reactants, None, None, &mut rng);
    assert_eq!(products.len(), 2);

    let neutron = products.iter().find(|p| p.mass_kg == M_NEUTRON).unwrap();
    let alpha = products.iter().find(|p| p.mass_kg == M_HELIUM4).unwrap();
    let v_n = (2.0 * 14.07 * MEV_TO_J / M_NEUTRON).sqrt();
    assert!((neutron.speed() - v_n).abs() / v_n < 0.01);
    assert!((neutron.speed() - 5.18e7).abs() / 5.18e7 < 0.01);
    assert!((alpha.speed() - 1.30e7).abs() / 1.30e7 < 0.01);

    // back-to-back; fixed branch energies balance momentum to within 1 %
    let total = neutron.momentum() + alpha.momentum();
    assert!(total.norm() / neutron.momentum().norm() < 0.01);
    assert!((neutron.velocity.normalized() + alpha.velocity.normalized()).norm() < 1e-12);
}

// ── Paschen breakdown ────────────────────────────────────────────────

#[test]
fn paschen_breakdown_at_reference_pd() {
    // B·pd / (ln(A·pd) − ln ln(1 + 1/γ)) at pd = 6.4
    let v = FusorField::paschen_breakdown(200.0, 0.032);
    assert!((v - 769.7).abs() / 769.7 < 0.05, "V_bd = {v}");
}

// ── Full DD run ──────────────────────────────────────────────────────

#[test]
fn dd_run_conserves_reaction_products() {
    let cfg = SimulationConfig {
        reaction: ReactionKind::Dd,
        fusor: true,
        particle_count: 100,
        temperature_k: 10_000.0,
        particle_density_m3: 2.5e20,
        dt_s: 1.0e-10,
        t_max_s: 1.0e-6,
        threads: Some(4),
        seed: Some(99),
        ..SimulationConfig::default()
    };
    let mut sim = SimulationManager::new(cfg).unwrap();
    let mut counts = Vec::new();
    let summary = sim.run_with_observer(|r| counts.push(r.particle_count)).unwrap();

    assert_eq!(summary.steps, 10_000);
    assert_eq!(summary.initial_particle_count, 100);
    assert_eq!(
        summary.final_particle_count as u64,
        100 + 2 * summary.reaction_count
    );
    assert!(counts.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(summary.reaction_name, "Deuterium-Deuterium");
}

// ── D-T cross-section peak ───────────────────────────────────────────

#[test]
fn dt_cross_section_near_peak() {
    let sigma = ReactionModel::Dt.cross_section(64.0);
    assert!((sigma - 5.0e-28).abs() / 5.0e-28 < 0.02, "σ = {sigma:e}");
    assert!((sigma - 5.06e-28).abs() / 5.06e-28 < 0.01, "σ = {sigma:e}");
}

// ── Gyration in a uniform magnetic field ─────────────────────────────

#[test]
fn deuteron_gyrates_in_uniform_b() {
    let v0 = 1.0e5;
    let cfg = SimulationConfig {
        dt_s: 1.0e-10,
        t_max_s: 4.0e-7,
        threads: Some(1),
        seed: Some(1),
        ..SimulationConfig::default()
    };
    let ion = Particle::deuteron(Vec3::ZERO, Vec3::X * v0);
    let mut sim = SimulationManager::with_population(
        cfg,
        ElectricField::zero(),
        Some(MagneticField::Uniform(Vec3::Z)),
        vec![ion],
    )
    .unwrap();

    let radius = ion_larmor_radius(M_DEUTERIUM, v0, 1.0);
    // q v × B with v = +x, B = +z pushes a positive ion toward −y
    let centre = Vec3::new(0.0, -radius, 0.0);
    while sim.step_index() < sim.total_steps() {
        sim.step();
        let p = &sim.particles()[0];
        let dev = ((p.position - centre).norm() - radius).abs() / radius;
        assert!(dev < 0.01, "step {}: radial deviation {dev:.3e}", sim.step_index());
        assert!(p.position.z.abs() < 1e-15);
    }
    let speed = sim.particles()[0].speed();
    assert!((speed - v0).abs() / v0 < 1e-6);
}
