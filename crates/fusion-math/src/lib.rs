//! Mathematical primitives for FusionSim.
//!
//! Vector algebra, RK4 stepping for `(r, v)` systems, and flat pair
//! indexing for the all-pairs reaction sweep.

pub mod integrator;
pub mod pairs;
pub mod vec3;

pub use vec3::Vec3;
