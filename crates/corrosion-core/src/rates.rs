// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Rate Conversion
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Faraday's-law conversion from anodic current density to penetration
//! rate. Each material carries its own electrons-per-dissolution count;
//! the equivalent weight is M/n.

use corrosion_types::constants::{F, MPY_PER_MM_YR, SECONDS_PER_YEAR};

/// CR (mm/yr) from current density (A/cm²), molar mass (g/mol), electrons
/// per dissolution, and density (g/cm³):
/// CR = i·(M/n)·s_per_yr·10 / (F·ρ), the final 10 converting cm to mm.
pub fn corrosion_rate_mm_yr(
    current_a_cm2: f64,
    molar_mass_g_mol: f64,
    n_electrons: u32,
    density_g_cm3: f64,
) -> f64 {
    let equivalent_weight = molar_mass_g_mol / n_electrons as f64;
    current_a_cm2 * equivalent_weight * SECONDS_PER_YEAR * 10.0 / (F * density_g_cm3)
}

/// mm/yr → mils per year.
pub fn mm_yr_to_mpy(rate_mm_yr: f64) -> f64 {
    rate_mm_yr * MPY_PER_MM_YR
}
