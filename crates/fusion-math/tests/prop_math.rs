// ─────────────────────────────────────────────────────────────────────
// FusionSim — Property-Based Tests (proptest) for fusion-math
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for fusion-math using proptest.
//!
//! Covers: Vec3 algebra, RK4 stepping in a magnetic field, flat pair
//! indexing and range partitioning.

use fusion_math::integrator::{rk4_step, PhaseState};
use fusion_math::pairs::{
    flat_index_from_pair, pair_count, pair_from_flat_index, partition_range, PairRange,
};
use fusion_math::Vec3;
use proptest::prelude::*;

fn vec3_strategy() -> impl Strategy<Value = Vec3> {
    (-1e3f64..1e3, -1e3f64..1e3, -1e3f64..1e3).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

// ── Vec3 Algebra ─────────────────────────────────────────────────────

proptest! {
    /// a × b is orthogonal to both a and b.
    #[test]
    fn cross_is_orthogonal(a in vec3_strategy(), b in vec3_strategy()) {
        let c = a.cross(b);
        let scale = a.norm() * b.norm() * (a.norm() + b.norm()) + 1.0;
        prop_assert!(c.dot(a).abs() / scale < 1e-9);
        prop_assert!(c.dot(b).abs() / scale < 1e-9);
    }

    /// Normalised non-zero vectors have unit length.
    #[test]
    fn normalized_has_unit_norm(a in vec3_strategy()) {
        prop_assume!(a.norm() > 1e-6);
        prop_assert!((a.normalized().norm() - 1.0).abs() < 1e-12);
    }

    /// Triangle inequality.
    #[test]
    fn triangle_inequality(a in vec3_strategy(), b in vec3_strategy()) {
        prop_assert!((a + b).norm() <= a.norm() + b.norm() + 1e-9);
    }
}

// ── RK4 Stepping ─────────────────────────────────────────────────────

proptest! {
    /// A pure magnetic force does no work: speed is conserved to RK4 accuracy.
    #[test]
    fn magnetic_rotation_conserves_speed(
        v in vec3_strategy(),
        omega in 0.1f64..2.0,
    ) {
        prop_assume!(v.norm() > 1e-3);
        let b = Vec3::Z * omega;
        let field = move |_r: Vec3, vel: Vec3| vel.cross(b);
        let mut s = PhaseState { r: Vec3::ZERO, v };
        let v0 = v.norm();
        for _ in 0..100 {
            rk4_step(&mut s, &field, 1e-2);
        }
        prop_assert!(((s.v.norm() - v0) / v0).abs() < 1e-6);
        prop_assert!((s.v.z - v.z).abs() <= 1e-9 * v0);
    }
}

// ── Pair Indexing ────────────────────────────────────────────────────

proptest! {
    /// Flat index → pair → flat index is the identity.
    #[test]
    fn flat_index_bijection(n in 2usize..5_000_000, frac in 0.0f64..1.0) {
        let total = pair_count(n);
        let k = ((total as f64 * frac) as u64).min(total - 1);
        let (i, j) = pair_from_flat_index(k, n);
        prop_assert!(i < j && j < n, "bad pair ({}, {}) for n={}", i, j, n);
        prop_assert_eq!(flat_index_from_pair(i, j, n), k);
    }

    /// Partitioned ranges enumerate every pair exactly once, in order.
    #[test]
    fn partition_enumerates_each_pair_once(n in 0usize..60, parts in 1usize..17) {
        let ranges = partition_range(pair_count(n), parts);
        prop_assert_eq!(ranges.len(), parts);
        let chunked: Vec<(usize, usize)> = ranges
            .into_iter()
            .flat_map(|r| PairRange::new(n, r))
            .collect();
        let reference: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .collect();
        prop_assert_eq!(chunked, reference);
    }

    /// Partition sizes differ by at most one.
    #[test]
    fn partition_is_balanced(total in 0u64..1_000_000, parts in 1usize..64) {
        let ranges = partition_range(total, parts);
        let lens: Vec<u64> = ranges.iter().map(|r| r.end - r.start).collect();
        let min = *lens.iter().min().unwrap();
        let max = *lens.iter().max().unwrap();
        prop_assert!(max - min <= 1);
        prop_assert_eq!(lens.iter().sum::<u64>(), total);
    }
}
