// ─────────────────────────────────────────────────────────────────────
// FusionSim — Fusion Reactions
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! D-D and D-T reaction models: Bosch-Hale cross sections and product kinematics.
//!
//! σ(E) = S(E) / (E · exp(B_G/√E)) [mb], E the centre-of-mass energy in keV,
//! with the astrophysical factor S(E) a Padé fit:
//!
//!   S(E) = (A₁ + E(A₂ + E(A₃ + E(A₄ + E·A₅)))) / (1 + E(B₁ + E(B₂ + E(B₃ + E·B₄))))
//!
//! For D-D (³He n branch) all B coefficients vanish.
//!
//! Products leave the reactant midpoint back-to-back along an isotropic
//! direction with speeds fixed by the branch energies.

use crate::bfield::MagneticField;
use crate::field::ElectricField;
use crate::particles::{isotropic_direction, Particle};
use fusion_math::Vec3;
use fusion_types::config::ReactionKind;
use fusion_types::constants::{
    dd, dt, M_HELIUM3, M_HELIUM4, M_NEUTRON, M_PROTON, M_TRITIUM, MEV_TO_J, MILLIBARN, Q_ELECTRON,
};
use rand::Rng;
use std::sync::Arc;

/// Product species definition for one reaction branch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductSpec {
    pub mass_kg: f64,
    pub charge_c: f64,
    pub energy_mev: f64,
}

impl ProductSpec {
    /// Non-relativistic speed from the branch energy [m/s].
    pub fn speed(&self) -> f64 {
        (2.0 * self.energy_mev * MEV_TO_J / self.mass_kg).sqrt()
    }
}

pub const DD_HELIUM3_BRANCH: [ProductSpec; 2] = [
    ProductSpec {
        mass_kg: M_NEUTRON,
        charge_c: 0.0,
        energy_mev: dd::E_NEUTRON_MEV,
    },
    ProductSpec {
        mass_kg: M_HELIUM3,
        charge_c: 2.0 * Q_ELECTRON,
        energy_mev: dd::E_HE3_MEV,
    },
];

pub const DD_TRITON_BRANCH: [ProductSpec; 2] = [
    ProductSpec {
        mass_kg: M_PROTON,
        charge_c: Q_ELECTRON,
        energy_mev: dd::E_PROTON_MEV,
    },
    ProductSpec {
        mass_kg: M_TRITIUM,
        charge_c: Q_ELECTRON,
        energy_mev: dd::E_TRITON_MEV,
    },
];

pub const DT_BRANCH: [ProductSpec; 2] = [
    ProductSpec {
        mass_kg: M_NEUTRON,
        charge_c: 0.0,
        energy_mev: dt::E_NEUTRON_MEV,
    },
    ProductSpec {
        mass_kg: M_HELIUM4,
        charge_c: 2.0 * Q_ELECTRON,
        energy_mev: dt::E_HE4_MEV,
    },
];

/// Bosch-Hale fit coefficients.
#[derive(Debug, Clone, Copy)]
struct BoschHale {
    bg: f64,
    a: [f64; 5],
    b: [f64; 4],
}

const BOSCH_HALE_DD: BoschHale = BoschHale {
    bg: dd::BG,
    a: [dd::A1, dd::A2, dd::A3, dd::A4, dd::A5],
    b: [0.0; 4],
};

const BOSCH_HALE_DT: BoschHale = BoschHale {
    bg: dt::BG,
    a: [dt::A1, dt::A2, dt::A3, dt::A4, dt::A5],
    b: [dt::B1, dt::B2, dt::B3, dt::B4],
};

impl BoschHale {
    /// σ(E) in m², E in keV. Zero for E ≤ 0.
    fn cross_section_m2(&self, e_kev: f64) -> f64 {
        if !(e_kev > 0.0) || !e_kev.is_finite() {
            return 0.0;
        }
        let e = e_kev;
        let [a1, a2, a3, a4, a5] = self.a;
        let [b1, b2, b3, b4] = self.b;
        let numerator = a1 + e * (a2 + e * (a3 + e * (a4 + e * a5)));
        let denominator = 1.0 + e * (b1 + e * (b2 + e * (b3 + e * b4)));
        let s = numerator / denominator;
        let sigma_mb = s / (e * (self.bg / e.sqrt()).exp());
        (sigma_mb * MILLIBARN).max(0.0)
    }
}

/// Closed set of fusion reaction models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionModel {
    Dd,
    Dt,
}

impl From<ReactionKind> for ReactionModel {
    fn from(kind: ReactionKind) -> Self {
        match kind {
            ReactionKind::Dd => ReactionModel::Dd,
            ReactionKind::Dt => ReactionModel::Dt,
        }
    }
}

impl ReactionModel {
    pub fn name(&self) -> &'static str {
        match self {
            ReactionModel::Dd => "Deuterium-Deuterium",
            ReactionModel::Dt => "Deuterium-Tritium",
        }
    }

    /// Every branch of both models yields two products.
    pub fn products_per_reaction(&self) -> usize {
        2
    }

    /// Bosch-Hale cross section σ(E_cm) [m²], `e_kev` in keV.
    pub fn cross_section(&self, e_kev: f64) -> f64 {
        match self {
            ReactionModel::Dd => BOSCH_HALE_DD.cross_section_m2(e_kev),
            ReactionModel::Dt => BOSCH_HALE_DT.cross_section_m2(e_kev),
        }
    }

    /// Produce reaction products from the first two reactants.
    ///
    /// Fewer than two reactants yields no products. Charged products get the
    /// supplied field handles; neutral products get none.
    pub fn react<R: Rng + ?Sized>(
        &self,
        reactants: &[Particle],
        field: Option<&Arc<ElectricField>>,
        magnetic_field: Option<&Arc<MagneticField>>,
        rng: &mut R,
    ) -> Vec<Particle> {
        let [a, b] = match reactants {
            [a, b, ..] => [a, b],
            _ => return Vec::new(),
        };
        let midpoint = (a.position + b.position) * 0.5;
        let branch = match self {
            ReactionModel::Dd => {
                if rng.gen_bool(0.5) {
                    &DD_HELIUM3_BRANCH
                } else {
                    &DD_TRITON_BRANCH
                }
            }
            ReactionModel::Dt => &DT_BRANCH,
        };
        let direction = isotropic_direction(rng);
        emit_back_to_back(branch, midpoint, direction, field, magnetic_field)
    }
}

fn emit_back_to_back(
    branch: &[ProductSpec; 2],
    midpoint: Vec3,
    direction: Vec3,
    field: Option<&Arc<ElectricField>>,
    magnetic_field: Option<&Arc<MagneticField>>,
) -> Vec<Particle> {
    branch
        .iter()
        .zip([direction, -direction])
        .map(|(spec, dir)| {
            let product = Particle::new(spec.mass_kg, spec.charge_c, midpoint, dir * spec.speed());
            if spec.charge_c == 0.0 {
                product
            } else {
                product.with_fields(field.cloned(), magnetic_field.cloned())
            }
        })
        .collect()
}
