// ─────────────────────────────────────────────────────────────────────
// FusionSim — Population Snapshot
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! CSV snapshot of a particle population: one row per particle with
//! columns `x,y,z,vx,vy,vz,mass,charge` (SI units).

use crate::particles::Particle;
use fusion_types::error::FusionResult;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

pub const SNAPSHOT_HEADER: [&str; 8] = ["x", "y", "z", "vx", "vy", "vz", "mass", "charge"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRow {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
    pub mass: f64,
    pub charge: f64,
}

impl From<&Particle> for SnapshotRow {
    fn from(p: &Particle) -> Self {
        SnapshotRow {
            x: p.position.x,
            y: p.position.y,
            z: p.position.z,
            vx: p.velocity.x,
            vy: p.velocity.y,
            vz: p.velocity.z,
            mass: p.mass_kg,
            charge: p.charge_c,
        }
    }
}

/// Write the header and one row per particle. The header is written even
/// for an empty population.
pub fn write_population_csv<W: Write>(writer: W, particles: &[Particle]) -> FusionResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(SNAPSHOT_HEADER)?;
    for p in particles {
        wtr.serialize(SnapshotRow::from(p))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_population_csv_file<P: AsRef<Path>>(path: P, particles: &[Particle]) -> FusionResult<()> {
    let file = File::create(path)?;
    write_population_csv(BufWriter::new(file), particles)
}

/// Read rows back from a snapshot produced by [`write_population_csv`].
pub fn read_population_csv<R: Read>(reader: R) -> FusionResult<Vec<SnapshotRow>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for row in rdr.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}
