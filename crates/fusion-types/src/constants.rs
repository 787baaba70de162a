// ─────────────────────────────────────────────────────────────────────
// FusionSim — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Physical constants (CODATA 2018, SI units) and reaction tables.

/// Boltzmann constant (J/K)
pub const K_BOLTZMANN: f64 = 1.380649e-23;

/// Elementary charge (C)
pub const Q_ELECTRON: f64 = 1.602176634e-19;

/// Vacuum permittivity (F/m)
pub const EPSILON0: f64 = 8.8541878128e-12;

/// Stefan–Boltzmann constant (W/(m²·K⁴))
pub const STEFAN_BOLTZMANN: f64 = 5.670374419e-8;

/// Bohr radius (m)
pub const BOHR_RADIUS: f64 = 5.29177210903e-11;

/// Hydrogen ionisation energy (eV)
pub const RYDBERG_EV: f64 = 13.6;

/// Unified atomic mass unit (kg)
pub const M_AMU: f64 = 1.66053906660e-27;

/// Electron mass (kg)
pub const M_ELECTRON: f64 = 9.1093837015e-31;

/// Proton mass (kg)
pub const M_PROTON: f64 = 1.67262192369e-27;

/// Neutron mass (kg)
pub const M_NEUTRON: f64 = 1.67492749804e-27;

/// Deuterium mass (kg)
pub const M_DEUTERIUM: f64 = 2.014101778 * M_AMU;

/// Tritium mass (kg)
pub const M_TRITIUM: f64 = 3.01604928 * M_AMU;

/// Helium-3 mass (kg)
pub const M_HELIUM3: f64 = 3.0160293 * M_AMU;

/// Helium-4 (alpha) mass (kg)
pub const M_HELIUM4: f64 = 4.00260325413 * M_AMU;

/// eV to Joules
pub const EV_TO_J: f64 = Q_ELECTRON;

/// keV to Joules
pub const KEV_TO_J: f64 = Q_ELECTRON * 1.0e3;

/// MeV to Joules
pub const MEV_TO_J: f64 = Q_ELECTRON * 1.0e6;

/// One millibarn in m²
pub const MILLIBARN: f64 = 1.0e-31;

/// mbar to Pa
pub const MBAR_TO_PA: f64 = 100.0;

/// Bosch–Hale parameters and branch energies for D(d,n)³He / D(d,p)T.
pub mod dd {
    /// ³He kinetic energy (MeV)
    pub const E_HE3_MEV: f64 = 0.82;
    /// Neutron kinetic energy in the ³He branch (MeV)
    pub const E_NEUTRON_MEV: f64 = 2.45;
    /// Triton kinetic energy (MeV)
    pub const E_TRITON_MEV: f64 = 1.01;
    /// Proton kinetic energy (MeV)
    pub const E_PROTON_MEV: f64 = 3.02;

    /// Gamow constant √keV
    pub const BG: f64 = 31.3970;
    pub const A1: f64 = 5.3701e4;
    pub const A2: f64 = 3.3027e2;
    pub const A3: f64 = -1.2706e-1;
    pub const A4: f64 = 2.9327e-5;
    pub const A5: f64 = -2.5151e-9;
}

/// Bosch–Hale parameters and branch energies for T(d,n)⁴He.
pub mod dt {
    /// Alpha kinetic energy (MeV)
    pub const E_HE4_MEV: f64 = 3.52;
    /// Neutron kinetic energy (MeV)
    pub const E_NEUTRON_MEV: f64 = 14.07;

    /// Gamow constant √keV
    pub const BG: f64 = 34.3827;
    pub const A1: f64 = 6.927e4;
    pub const A2: f64 = 7.454e8;
    pub const A3: f64 = 2.050e6;
    pub const A4: f64 = 5.2002e4;
    pub const A5: f64 = 0.0;
    /// Denominator coefficients of the rational S-factor fit.
    pub const B1: f64 = 6.38e1;
    pub const B2: f64 = -9.95e-1;
    pub const B3: f64 = 6.981e-5;
    pub const B4: f64 = 1.728e-4;
}

/// Tungsten grid material properties.
pub mod tungsten {
    /// Specific heat (J/(kg·K))
    pub const SPECIFIC_HEAT: f64 = 132.0;
    /// Resistivity at 293.15 K (Ω·m)
    pub const RESISTIVITY: f64 = 5.6e-8;
    /// Temperature coefficient of resistance (1/K)
    pub const TEMP_COEFF_RESISTANCE: f64 = 0.001;
    /// Total hemispherical emissivity
    pub const EMISSIVITY: f64 = 0.3;
}

/// Stainless steel vacuum chamber specific heat (J/(kg·K))
pub const CHAMBER_SPECIFIC_HEAT: f64 = 500.0;
