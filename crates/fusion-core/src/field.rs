// ─────────────────────────────────────────────────────────────────────
// FusionSim — Electric Field Models
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Electric field models shared read-only by every particle.

use crate::fusor::FusorField;
use fusion_math::Vec3;
use fusion_types::error::{FusionError, FusionResult};
use fusion_types::state::Grid2D;
use ndarray::Array2;

/// Conducting sphere of radius R held at potential V, centred on the origin.
///
/// Φ = V inside, V·R/r outside; E = 0 inside, V·R/r² · r̂ outside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoulombSphereField {
    radius_m: f64,
    potential_v: f64,
}

impl CoulombSphereField {
    pub fn new(radius_m: f64, potential_v: f64) -> FusionResult<Self> {
        if !radius_m.is_finite() || radius_m <= 0.0 {
            return Err(FusionError::ConfigError(format!(
                "coulomb_sphere_radius_m must be finite and > 0, got {radius_m}"
            )));
        }
        if !potential_v.is_finite() {
            return Err(FusionError::ConfigError(
                "sphere potential must be finite".to_string(),
            ));
        }
        Ok(CoulombSphereField {
            radius_m,
            potential_v,
        })
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    pub fn potential_v(&self) -> f64 {
        self.potential_v
    }

    pub fn potential(&self, r: f64) -> f64 {
        if r <= self.radius_m {
            self.potential_v
        } else {
            self.potential_v * self.radius_m / r
        }
    }

    pub fn field_at(&self, position: Vec3) -> Vec3 {
        let r = position.norm();
        if r <= self.radius_m {
            return Vec3::ZERO;
        }
        // V·R/r² along r̂ = position / r
        position * (self.potential_v * self.radius_m / (r * r * r))
    }
}

/// Closed set of electrostatic field models.
#[derive(Debug, Clone, PartialEq)]
pub enum ElectricField {
    /// Spatially constant field; `Uniform(Vec3::ZERO)` is the field-free case.
    Uniform(Vec3),
    CoulombSphere(CoulombSphereField),
    Fusor(FusorField),
}

impl ElectricField {
    pub fn zero() -> Self {
        ElectricField::Uniform(Vec3::ZERO)
    }

    /// E(r) [V/m].
    pub fn field_at(&self, position: Vec3) -> Vec3 {
        match self {
            ElectricField::Uniform(e) => *e,
            ElectricField::CoulombSphere(sphere) => sphere.field_at(position),
            ElectricField::Fusor(fusor) => fusor.field_at(position),
        }
    }

    /// Φ(r) [V]. The uniform field is referenced to Φ(0) = 0.
    pub fn potential_at(&self, position: Vec3) -> f64 {
        match self {
            ElectricField::Uniform(e) => -e.dot(position),
            ElectricField::CoulombSphere(sphere) => sphere.potential(position.norm()),
            ElectricField::Fusor(fusor) => fusor.potential(position.norm()),
        }
    }

    pub fn as_fusor(&self) -> Option<&FusorField> {
        match self {
            ElectricField::Fusor(fusor) => Some(fusor),
            _ => None,
        }
    }

    /// Sample Φ over the x–y plane of `grid` at height `grid.z`.
    ///
    /// Returns a `[ny, nx]` array matching the grid meshes.
    pub fn potential_slice(&self, grid: &Grid2D) -> Array2<f64> {
        Array2::from_shape_fn((grid.ny, grid.nx), |(iy, ix)| {
            self.potential_at(Vec3::new(grid.x[ix], grid.y[iy], grid.z))
        })
    }

    /// Sample |E| over the x–y plane of `grid` at height `grid.z`.
    pub fn field_magnitude_slice(&self, grid: &Grid2D) -> Array2<f64> {
        Array2::from_shape_fn((grid.ny, grid.nx), |(iy, ix)| {
            self.field_at(Vec3::new(grid.x[ix], grid.y[iy], grid.z)).norm()
        })
    }
}

impl From<FusorField> for ElectricField {
    fn from(fusor: FusorField) -> Self {
        ElectricField::Fusor(fusor)
    }
}

impl From<CoulombSphereField> for ElectricField {
    fn from(sphere: CoulombSphereField) -> Self {
        ElectricField::CoulombSphere(sphere)
    }
}
