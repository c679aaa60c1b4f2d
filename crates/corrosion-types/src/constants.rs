// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────

/// Faraday constant (C/mol)
pub const F: f64 = 96_485.0;

/// Ideal gas constant (J/(mol·K))
pub const R: f64 = 8.314;

/// Boltzmann constant (J/K)
pub const K_BOLTZMANN: f64 = 1.380_649e-23;

/// Planck constant (J·s)
pub const H_PLANCK: f64 = 6.626_070_15e-34;

/// Celsius to Kelvin offset
pub const CELSIUS_TO_KELVIN: f64 = 273.15;

/// Saturated calomel electrode vs SHE (V), per ASTM G3
pub const E_SCE_VS_SHE: f64 = 0.241;

/// Ag/AgCl (saturated KCl) vs SHE (V)
pub const E_AGAGCL_VS_SHE: f64 = 0.197;

/// Seconds per year (365 days)
pub const SECONDS_PER_YEAR: f64 = 3.1536e7;

/// mils per year per mm/yr
pub const MPY_PER_MM_YR: f64 = 39.3701;

// Molar masses (g/mol)
pub const M_H2: f64 = 2.016;
pub const M_OH: f64 = 17.008;
pub const M_O2: f64 = 32.0;
pub const M_H2O: f64 = 18.015_28;
pub const M_CL: f64 = 35.453;
pub const M_NACL: f64 = 58.44;
pub const M_CR: f64 = 51.9961;
pub const M_FE: f64 = 55.845;
pub const M_NI: f64 = 58.6934;
pub const M_CU: f64 = 63.546;
pub const M_TI: f64 = 47.867;

/// Concentration of water (mol/L)
pub const C_H2O: f64 = 55.55;

/// Mole fraction of O₂ in air
pub const O2_MOLE_FRACTION_AIR: f64 = 0.209_476;

/// Molar volume of O₂ (L/mol)
pub const V_O2: f64 = 22.414;

/// Molar volume parameter for NaCl (L/mol)
pub const V_NACL: f64 = 16.6;

/// Diffusivity of water (cm²/s), used as the HER transport coefficient
pub const D_H2O: f64 = 2.299e-5;

// Standard electrode potentials (V vs SHE)
pub const E0_ORR_ACID: f64 = 1.229;
pub const E0_ORR_ALK: f64 = 0.401;
pub const E0_HER_ALK: f64 = -0.83;
pub const E0_FE_OX: f64 = -0.501;
pub const E0_CR_OX: f64 = -0.74;
pub const E0_NI_OX: f64 = -0.23;
pub const E0_CU_OX: f64 = 0.52;

// Electrons transferred
pub const Z_ORR: u32 = 4;
pub const Z_HER: u32 = 2;

/// Default dissolved-metal-ion activity at the surface (mol/L), used in the
/// anodic Nernst term when no speciation is supplied.
pub const C_ION_DEFAULT_M: f64 = 1.0e-6;

/// Numerical floor on current magnitudes (A/cm²) to keep mixed-potential
/// arithmetic out of log-space underflow.
pub const CURRENT_FLOOR_A_CM2: f64 = 1.0e-50;

/// Chloride content of standard 35 PSU seawater (mg/L)
pub const SEAWATER_CL_MG_L: f64 = 19_354.0;

/// Salinity of standard seawater (PSU)
pub const SEAWATER_SALINITY_PSU: f64 = 35.0;

/// H⁺ and OH⁻ concentrations (mol/L) from pH at the water ion product of 14.
pub fn c_h_and_c_oh(ph: f64) -> (f64, f64) {
    (10.0_f64.powf(-ph), 10.0_f64.powf(-(14.0 - ph)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_ph() {
        let (ch, coh) = c_h_and_c_oh(7.0);
        assert!((ch - 1.0e-7).abs() < 1e-12);
        assert!((coh - 1.0e-7).abs() < 1e-12);
    }

    #[test]
    fn test_reference_offsets_ordering() {
        // SCE sits above Ag/AgCl on the SHE scale.
        assert!(E_SCE_VS_SHE > E_AGAGCL_VS_SHE);
    }
}
