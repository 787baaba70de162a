// ─────────────────────────────────────────────────────────────────────
// FusionSim — Integrator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Classical RK4 for second-order systems written as coupled `(r, v)`.
//!
//! `dr/dt = v`, `dv/dt = a(r, v)`. The acceleration may depend on velocity,
//! which is what the Lorentz force needs.

use crate::vec3::Vec3;

/// Phase-space state of a point mass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhaseState {
    pub r: Vec3,
    pub v: Vec3,
}

/// Acceleration law `a(r, v)`.
pub trait AccelerationField {
    fn acceleration(&self, r: Vec3, v: Vec3) -> Vec3;
}

impl<F> AccelerationField for F
where
    F: Fn(Vec3, Vec3) -> Vec3,
{
    fn acceleration(&self, r: Vec3, v: Vec3) -> Vec3 {
        self(r, v)
    }
}

/// Free flight: zero acceleration everywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeFlight;

impl AccelerationField for FreeFlight {
    fn acceleration(&self, _r: Vec3, _v: Vec3) -> Vec3 {
        Vec3::ZERO
    }
}

/// Perform one RK4 step. Negative `dt` integrates backwards.
pub fn rk4_step<A: AccelerationField + ?Sized>(state: &mut PhaseState, field: &A, dt: f64) {
    if !dt.is_finite() || dt == 0.0 {
        return;
    }
    let half = 0.5 * dt;
    let (r, v) = (state.r, state.v);

    let k1r = v;
    let k1v = field.acceleration(r, v);

    let k2r = v + k1v * half;
    let k2v = field.acceleration(r + k1r * half, v + k1v * half);

    let k3r = v + k2v * half;
    let k3v = field.acceleration(r + k2r * half, v + k2v * half);

    let k4r = v + k3v * dt;
    let k4v = field.acceleration(r + k3r * dt, v + k3v * dt);

    let sixth = dt / 6.0;
    state.r = r + (k1r + k2r * 2.0 + k3r * 2.0 + k4r) * sixth;
    state.v = v + (k1v + k2v * 2.0 + k3v * 2.0 + k4v) * sixth;
}

/// Integrate a trajectory with RK4, returning `steps + 1` states.
pub fn integrate_rk4<A: AccelerationField + ?Sized>(
    initial: PhaseState,
    field: &A,
    dt: f64,
    steps: usize,
) -> Vec<PhaseState> {
    let mut traj = Vec::with_capacity(steps + 1);
    let mut state = initial;
    traj.push(state);
    for _ in 0..steps {
        rk4_step(&mut state, field, dt);
        traj.push(state);
    }
    traj
}
