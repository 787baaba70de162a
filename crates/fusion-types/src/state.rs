// ─────────────────────────────────────────────────────────────────────
// FusionSim — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Planar sampling grid for potential slices (x–y plane at fixed z).
#[derive(Debug, Clone)]
pub struct Grid2D {
    pub nx: usize,
    pub ny: usize,
    pub x: Array1<f64>, // linspace(x_min, x_max, nx)
    pub y: Array1<f64>, // linspace(y_min, y_max, ny)
    pub z: f64,         // slice height
}

impl Grid2D {
    pub fn new(
        nx: usize,
        ny: usize,
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        z: f64,
    ) -> Self {
        Grid2D {
            nx,
            ny,
            x: Array1::linspace(x_min, x_max, nx),
            y: Array1::linspace(y_min, y_max, ny),
            z,
        }
    }

    /// Square grid centred on the origin spanning [-half_width, half_width].
    pub fn centred(n: usize, half_width: f64, z: f64) -> Self {
        Grid2D::new(n, n, -half_width, half_width, -half_width, half_width, z)
    }
}

/// Grid and chamber temperatures reported by the thermal model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalState {
    pub grid_temperature_k: f64,
    pub chamber_temperature_k: f64,
    pub ambient_temperature_k: f64,
}

/// Progress snapshot emitted every reporting interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub step: u64,
    pub total_steps: u64,
    pub time_s: f64,
    pub percent_complete: f64,
    pub particle_count: usize,
    pub reaction_count: u64,
}

/// Final statistics of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub steps: u64,
    pub simulated_time_s: f64,
    pub initial_particle_count: usize,
    pub final_particle_count: usize,
    pub reaction_count: u64,
    pub reaction_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thermal: Option<ThermalState>,
    pub wall_time_ms: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation_65() {
        let grid = Grid2D::new(65, 33, -0.08, 0.08, -0.04, 0.04, 0.0);
        assert_eq!(grid.nx, 65);
        assert_eq!(grid.ny, 33);
        assert!((grid.x[1] - grid.x[0] - 0.16 / 64.0).abs() < 1e-12);
        assert!((grid.y[1] - grid.y[0] - 0.08 / 32.0).abs() < 1e-12);
        assert!((grid.x[0] + 0.08).abs() < 1e-12);
        assert!((grid.x[64] - 0.08).abs() < 1e-12);
        assert!((grid.y[0] + 0.04).abs() < 1e-12);
        assert!((grid.y[32] - 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_centred_grid_is_symmetric() {
        let grid = Grid2D::centred(12, 0.1, 0.02);
        for i in 0..grid.nx {
            assert!((grid.x[i] + grid.x[grid.nx - 1 - i]).abs() < 1e-15);
            assert!((grid.y[i] - grid.x[i]).abs() < 1e-15);
        }
        assert_eq!(grid.z, 0.02);
    }

    #[test]
    fn test_single_point_grid() {
        let grid = Grid2D::new(1, 1, 0.0, 0.5, 0.0, 0.25, 0.0);
        assert_eq!(grid.x.len(), 1);
        assert_eq!(grid.x[0], 0.0);
        assert_eq!(grid.y[0], 0.0);
    }
}
