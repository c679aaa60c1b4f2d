// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — NaCl Solution Chemistry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Temperature- and chloride-dependent NaCl electrolyte properties:
//! dissolved O₂ concentration (acentric-factor Henry correlation), O₂
//! diffusivity (Stokes viscosity model), conductivity (Wadsworth 2012),
//! and water activity.

use corrosion_types::constants::{C_H2O, M_CL, M_H2O, M_NACL, M_O2, O2_MOLE_FRACTION_AIR, V_O2};

/// Rational form used by the Stokes parameter fits: (b0 + b1·x)/(1 + b2·x).
fn linear_linear(b: [f64; 3], x: f64) -> f64 {
    (b[0] + b[1] * x) / (1.0 + b[2] * x)
}

/// NaCl solution properties at fixed (Cl⁻, T). Constructed per call and
/// dropped on return; all fields are derived in the constructor.
#[derive(Debug, Clone)]
pub struct NaClSolution {
    pub chloride_m: f64,
    pub temperature_c: f64,
    /// Dissolved O₂ at air equilibrium (g/cm³)
    pub c_o2_g_cm3: f64,
    /// O₂ diffusivity (cm²/s)
    pub d_o2_cm2_s: f64,
    /// Solution conductivity (S/m)
    pub conductivity_s_m: f64,
    /// Solution resistivity (Ω·m)
    pub resistivity_ohm_m: f64,
    /// Water activity (mol/L)
    pub a_water_mol_l: f64,
}

impl NaClSolution {
    pub fn new(chloride_m: f64, temperature_c: f64) -> Self {
        let c_o2 = conc_o2(temperature_c, chloride_m);
        let d_o2 = diff_o2(temperature_c, chloride_m);
        let conductivity = conductivity(temperature_c, chloride_m);
        NaClSolution {
            chloride_m,
            temperature_c,
            c_o2_g_cm3: c_o2,
            d_o2_cm2_s: d_o2,
            conductivity_s_m: conductivity,
            resistivity_ohm_m: 1.0 / conductivity,
            a_water_mol_l: water_activity(chloride_m),
        }
    }
}

/// Dissolved O₂ concentration (g/cm³) from the acentric-factor Henry
/// correlation with salinity correction.
fn conc_o2(temperature_c: f64, chloride_m: f64) -> f64 {
    let t_k = temperature_c + 273.15;
    let cl_mg = (M_CL / 1000.0) * chloride_m * 1.0e6;

    const A1: f64 = 31_820.0;
    const B1: f64 = -229.9;
    const C1: f64 = -19.12;
    const D1: f64 = 0.3081;
    const A2: f64 = -1409.0;
    const B2: f64 = 10.4;
    const C2: f64 = 0.8628;
    const D2: f64 = -0.000_523_5;
    const D3: f64 = 0.074_64;
    const ACENTRIC_O2: f64 = 0.022;

    let num1 = A1 * ACENTRIC_O2 + A2;
    let num2 = B1 * ACENTRIC_O2 + B2;
    let den1 = C1 * ACENTRIC_O2 + C2;
    let ln_h0 = (num1 + num2 * t_k) / (1.0 + den1 * t_k);

    let num3 = D1 + D2 * t_k;
    let den3 = 1.0 + D3 * t_k;
    let ln_h = ln_h0 + (num3 / den3) * 0.001 * cl_mg;

    let x1 = O2_MOLE_FRACTION_AIR / ln_h.exp(); // mol/L
    x1 * M_O2 / 1000.0 // g/L → g/cm³
}

/// O₂ diffusivity (cm²/s) from the Stokes viscosity model; the six
/// parameters are temperature-dependent rational fits.
fn diff_o2(temperature_c: f64, chloride_m: f64) -> f64 {
    let t_k = temperature_c + 273.15;
    const PARAMS: [[f64; 3]; 6] = [
        [0.193_015_581, -0.000_936_823, -3738.145_703],
        [0.586_220_598, -0.001_982_362, -0.003_767_555],
        [-2_058_331_786.0, 7_380_780.538, -725_742.0949],
        [-12_341_118.0, 7397.380_585, -1_024_619.196],
        [-0.082_481_761, 8.056_05e-6, -0.005_230_993],
        [-13_685.505_52, 11.979_900_9, -0.058_228_83],
    ];
    let b: Vec<f64> = PARAMS.iter().map(|&p| linear_linear(p, t_k)).collect();

    const PHI: f64 = 2.6;
    let eta0 = b[4] * (b[5] / t_k).exp();
    let big_b = b[2] + b[3] * (t_k - 273.15);
    let eta = eta0 * (1.0 + b[1] * chloride_m.sqrt() + big_b * chloride_m);
    b[0] * ((PHI * M_H2O).sqrt() * t_k) / (V_O2 * eta).powf(0.6)
}

/// Solution conductivity (S/m) from the Wadsworth (2012) polynomial.
fn conductivity(temperature_c: f64, chloride_m: f64) -> f64 {
    let t = temperature_c;
    let c = chloride_m;

    let lambda0 = 66_591.0 + 2172.2 * t + 9.1584 * t * t;
    let s = 37_515.0 - 3471.9 * t + 69.11 * t * t - 1.0777 * t.powi(3);
    let e = -23.47 * t * t;
    let j1 = 46_091.0 + 8760.0 * t - 352.06 * t * t + 3.8403 * t.powi(3);
    let j2 = -77_300.0 - 10_646.0 * t + 481.02 * t * t - 4.9759 * t.powi(3);
    let j3 = 98_097.0 + 5539.6 * t - 242.12 * t * t + 2.6452 * t.powi(3);
    let j4 = -68_419.0 - 1014.3 * t + 43.97 * t * t - 0.4871 * t.powi(3);
    let j5 = 22_654.0;
    let j6 = -2799.6;

    // Wadsworth polynomial evaluates in µS/cm; c^2·ln(c) vanishes as c → 0.
    let log_term = if c > 0.0 { c * c * c.ln() } else { 0.0 };
    let k1 = -0.014 + lambda0 * c - s * c.powf(1.5) + e * log_term + j1 * c * c
        + j2 * c.powf(2.5)
        + j3 * c.powi(3)
        + j4 * c.powf(3.5)
        + j5 * c.powi(4)
        + j6 * c.powf(4.5);

    k1 * 1.0e-4 // µS/cm → S/m
}

/// Water activity (mol/L) from the empirical activity-coefficient model
/// with the NaCl density correction.
fn water_activity(chloride_m: f64) -> f64 {
    let m_nacl = M_NACL / 1000.0; // kg/mol
    let m_h2o = M_H2O / 1000.0;

    let mass_nacl = m_nacl * chloride_m; // kg/L
    let mass_h2o = m_h2o * C_H2O;
    let mass_pct = mass_nacl / (mass_nacl + mass_h2o) * 100.0;

    const D1: f64 = 1.0001;
    const D2: f64 = -0.006_460_3;
    let density = D1 / (1.0 + D2 * mass_pct); // kg/L

    let mass_solvent = density - mass_nacl; // per litre of solution
    let molality = chloride_m / mass_solvent;

    const C1: f64 = 1.0001;
    const C2: f64 = -0.065_634;
    const C3: f64 = -0.033_533;
    let gamma = (C1 + C2 * molality) / (1.0 + C3 * molality);

    C_H2O * gamma
}
