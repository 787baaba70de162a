// ─────────────────────────────────────────────────────────────────────
// FusionSim — Property-Based Tests (proptest) for fusion-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for fusion-types using proptest.
//!
//! Covers: Grid2D construction invariants, configuration validation and
//! serialization roundtrip.

use fusion_types::config::{ReactionKind, SimulationConfig};
use fusion_types::state::Grid2D;
use proptest::prelude::*;

// ── Grid2D Construction Invariants ───────────────────────────────────

proptest! {
    /// Grid dimensions match constructor arguments.
    #[test]
    fn grid_dimensions_match(
        nx in 2usize..96,
        ny in 2usize..96,
    ) {
        let grid = Grid2D::new(nx, ny, -0.1, 0.1, -0.05, 0.05, 0.0);

        prop_assert_eq!(grid.nx, nx);
        prop_assert_eq!(grid.ny, ny);
        prop_assert_eq!(grid.x.len(), nx);
        prop_assert_eq!(grid.y.len(), ny);
    }

    /// X coordinates are strictly monotonically increasing.
    #[test]
    fn grid_x_monotone(nx in 3usize..64, half in 0.01f64..1.0) {
        let grid = Grid2D::centred(nx, half, 0.0);
        for i in 1..nx {
            prop_assert!(grid.x[i] > grid.x[i - 1],
                "X not monotone at {}: {} <= {}", i, grid.x[i], grid.x[i - 1]);
        }
        prop_assert!((grid.x[0] + half).abs() < 1e-12);
        prop_assert!((grid.x[nx - 1] - half).abs() < 1e-12);
    }
}

// ── Configuration ────────────────────────────────────────────────────

fn reaction_strategy() -> impl Strategy<Value = ReactionKind> {
    prop_oneof![Just(ReactionKind::Dd), Just(ReactionKind::Dt)]
}

proptest! {
    /// Any valid configuration survives a JSON roundtrip unchanged.
    #[test]
    fn config_json_roundtrip(
        reaction in reaction_strategy(),
        fusor in any::<bool>(),
        thermal in any::<bool>(),
        particle_count in 2usize..10_000,
        dt_s in 1e-13f64..1e-8,
        voltage_v in -1e5f64..1e5,
        threads in proptest::option::of(1usize..64),
        seed in proptest::option::of(any::<u64>()),
    ) {
        let cfg = SimulationConfig {
            reaction,
            fusor,
            thermal,
            particle_count,
            dt_s,
            voltage_v,
            threads,
            seed,
            ..SimulationConfig::default()
        };
        prop_assert!(cfg.validate().is_ok());
        let json = cfg.to_json_pretty().unwrap();
        let back: SimulationConfig = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, cfg);
    }

    /// Non-positive time steps are always rejected.
    #[test]
    fn config_rejects_non_positive_dt(dt_s in -1.0f64..=0.0) {
        let cfg = SimulationConfig { dt_s, ..SimulationConfig::default() };
        prop_assert!(cfg.validate().is_err());
    }

    /// Geometry with the anode inside the cathode is always rejected.
    #[test]
    fn config_rejects_inverted_geometry(inner in 0.01f64..0.1, shrink in 0.0f64..1.0) {
        let cfg = SimulationConfig {
            inner_radius_m: inner,
            outer_radius_m: inner * shrink,
            ..SimulationConfig::default()
        };
        prop_assert!(cfg.validate().is_err());
    }

    /// Step count covers the requested simulated time.
    #[test]
    fn step_count_covers_t_max(t_max in 1e-9f64..1e-5, dt in 1e-12f64..1e-9) {
        let cfg = SimulationConfig { t_max_s: t_max, dt_s: dt, ..SimulationConfig::default() };
        let steps = cfg.step_count() as f64;
        prop_assert!(steps * dt >= t_max * (1.0 - 1e-12));
        prop_assert!((steps - 1.0) * dt < t_max * (1.0 + 1e-9));
    }
}
