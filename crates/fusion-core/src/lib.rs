//! IEC fusor simulation kernel.
//!
//! Field models, RK4 particle push, Bosch-Hale reaction sampling over all
//! particle pairs, grid/chamber thermal feedback and the operating-envelope view.

pub mod bfield;
pub mod collision;
pub mod envelope;
pub mod field;
pub mod fusor;
pub mod particles;
pub mod reaction;
pub mod simulation;
pub mod snapshot;
pub mod thermal;
