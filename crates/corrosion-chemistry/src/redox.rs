// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Redox State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Conversions between dissolved oxygen, thermodynamic Eh, and measured ORP.
//!
//! Eh comes from the Nernst equation on the oxygen reduction couple; the
//! Henry constant is derived from the Garcia-Benson saturation model so the
//! two stay mutually consistent. All Eh values are volts vs SHE; ORP
//! readings carry their reference electrode explicitly.

use corrosion_types::constants::{E0_ORR_ACID, F, M_O2, R};
use corrosion_types::units::ReferenceElectrode;
use serde::{Deserialize, Serialize};

use crate::oxygen::{do_saturation_garcia_benson, salinity_from_chloride};

/// Partial pressure of O₂ in air (atm)
const P_O2_AIR_ATM: f64 = 0.2095;
/// Detection limit treated as anaerobic (mg/L)
pub const DO_DETECTION_LIMIT_MG_L: f64 = 0.01;
/// Floor on p_O2 to keep the Nernst logarithm finite (atm)
const P_O2_FLOOR_ATM: f64 = 1.0e-10;

/// Unified redox state snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedoxState {
    pub eh_v_she: f64,
    pub ph: f64,
    pub temperature_c: f64,
    pub dissolved_oxygen_mg_l: Option<f64>,
    pub orp_mv: Option<f64>,
    pub reference_electrode: ReferenceElectrode,
}

/// Henry constant for O₂ (mol/(L·atm)), derived from the freshwater
/// Garcia-Benson saturation at the given temperature.
pub fn henry_constant_o2(temperature_c: f64) -> f64 {
    let sat_mg_l = do_saturation_garcia_benson(temperature_c, 0.0, None, 0.0);
    sat_mg_l / (P_O2_AIR_ATM * M_O2 * 1000.0)
}

/// Air-equilibrium DO saturation (mg/L) at the given temperature and
/// chloride level.
pub fn do_saturation_mg_l(temperature_c: f64, chloride_mg_l: f64) -> f64 {
    do_saturation_garcia_benson(temperature_c, salinity_from_chloride(chloride_mg_l), None, 0.0)
}

/// DO → Eh (V vs SHE) via the ORR Nernst equation:
/// Eh = E° − (2.303·R·T/F)·pH + (R·T/4F)·ln(p_O2).
pub fn do_to_eh(dissolved_oxygen_mg_l: f64, ph: f64, temperature_c: f64) -> (f64, Vec<String>) {
    let mut warnings = Vec::new();

    let k_h = henry_constant_o2(temperature_c);
    let c_o2_mol_l = dissolved_oxygen_mg_l / (M_O2 * 1000.0);
    let mut p_o2 = c_o2_mol_l / k_h;

    if dissolved_oxygen_mg_l < DO_DETECTION_LIMIT_MG_L {
        warnings.push(format!(
            "DO < {DO_DETECTION_LIMIT_MG_L} mg/L (anaerobic conditions); ORR equilibrium may \
             not control the redox potential there"
        ));
        p_o2 = p_o2.max(P_O2_FLOOR_ATM);
    }

    let sat = do_saturation_garcia_benson(temperature_c, 0.0, None, 0.0);
    if dissolved_oxygen_mg_l > 1.1 * sat {
        warnings.push(format!(
            "DO ({dissolved_oxygen_mg_l:.1} mg/L) exceeds saturation ({sat:.1} mg/L) by >10%; \
             possible supersaturation or measurement error"
        ));
    }

    let t_k = temperature_c + 273.15;
    let eh = E0_ORR_ACID - (2.303 * R * t_k / F) * ph + (R * t_k / (4.0 * F)) * p_o2.ln();
    (eh, warnings)
}

/// Eh (V vs SHE) → DO (mg/L); the inverse of [`do_to_eh`].
pub fn eh_to_do(eh_v_she: f64, ph: f64, temperature_c: f64) -> (f64, Vec<String>) {
    let mut warnings = Vec::new();
    let t_k = temperature_c + 273.15;

    let ph_term = (2.303 * R * t_k / F) * ph;
    let ln_p_o2 = (eh_v_she - E0_ORR_ACID + ph_term) / (R * t_k / (4.0 * F));
    let mut p_o2 = ln_p_o2.exp();

    if p_o2 > 1.0 {
        warnings.push(format!(
            "computed p_O2 = {p_o2:.2} atm exceeds atmospheric pressure; Eh {eh_v_she:.3} V is \
             too oxidizing for ORR equilibrium, capping at 1 atm"
        ));
        p_o2 = 1.0;
    }
    if p_o2 < P_O2_FLOOR_ATM {
        warnings.push(format!(
            "computed p_O2 = {p_o2:.2e} atm is negligible; Eh {eh_v_she:.3} V indicates \
             anaerobic/reducing conditions"
        ));
    }

    let k_h = henry_constant_o2(temperature_c);
    ((k_h * p_o2) * M_O2 * 1000.0, warnings)
}

/// ORP reading (mV vs reference) → Eh (V vs SHE).
pub fn orp_to_eh(orp_mv: f64, reference: ReferenceElectrode) -> f64 {
    orp_mv / 1000.0 + reference.offset_vs_she()
}

/// Eh (V vs SHE) → ORP reading (mV vs reference).
pub fn eh_to_orp(eh_v_she: f64, reference: ReferenceElectrode) -> f64 {
    (eh_v_she - reference.offset_vs_she()) * 1000.0
}

/// Build a [`RedoxState`] from a DO measurement.
pub fn redox_state_from_do(
    dissolved_oxygen_mg_l: f64,
    ph: f64,
    temperature_c: f64,
) -> RedoxState {
    let (eh, _) = do_to_eh(dissolved_oxygen_mg_l, ph, temperature_c);
    RedoxState {
        eh_v_she: eh,
        ph,
        temperature_c,
        dissolved_oxygen_mg_l: Some(dissolved_oxygen_mg_l),
        orp_mv: None,
        reference_electrode: ReferenceElectrode::She,
    }
}

/// Build a [`RedoxState`] from an ORP reading.
pub fn redox_state_from_orp(
    orp_mv: f64,
    ph: f64,
    temperature_c: f64,
    reference: ReferenceElectrode,
) -> RedoxState {
    let eh = orp_to_eh(orp_mv, reference);
    let (do_mg_l, _) = eh_to_do(eh, ph, temperature_c);
    RedoxState {
        eh_v_she: eh,
        ph,
        temperature_c,
        dissolved_oxygen_mg_l: Some(do_mg_l),
        orp_mv: Some(orp_mv),
        reference_electrode: reference,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_do_eh_round_trip() {
        for do_mg_l in [0.1, 1.0, 4.0, 8.0, 15.0] {
            for ph in [5.0, 7.0, 9.0] {
                for t in [5.0, 25.0, 80.0] {
                    let (eh, _) = do_to_eh(do_mg_l, ph, t);
                    let (back, _) = eh_to_do(eh, ph, t);
                    assert!(
                        (back - do_mg_l).abs() / do_mg_l < 1e-6,
                        "round trip at DO={do_mg_l}, pH={ph}, T={t}: {back}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_eh_decreases_with_ph() {
        let (acid, _) = do_to_eh(8.0, 5.0, 25.0);
        let (alkaline, _) = do_to_eh(8.0, 9.0, 25.0);
        assert!(acid > alkaline);
    }

    #[test]
    fn test_anaerobic_warns_and_stays_finite() {
        let (eh, warnings) = do_to_eh(0.0, 7.2, 35.0);
        assert!(eh.is_finite());
        assert!(!warnings.is_empty(), "anaerobic DO must carry a warning");
    }

    #[test]
    fn test_supersaturation_warns() {
        let (_, warnings) = do_to_eh(20.0, 7.0, 25.0);
        assert!(warnings.iter().any(|w| w.contains("saturation")));
    }

    #[test]
    fn test_orp_conversions() {
        let eh = orp_to_eh(150.0, ReferenceElectrode::Sce);
        assert!((eh - 0.391).abs() < 1e-9);
        let orp = eh_to_orp(eh, ReferenceElectrode::Sce);
        assert!((orp - 150.0).abs() < 1e-9);
        // Cross-reference: the same Eh reads higher on Ag/AgCl.
        let orp_ag = eh_to_orp(eh, ReferenceElectrode::AgAgCl);
        assert!(orp_ag > orp);
    }

    #[test]
    fn test_aerated_seawater_eh_band() {
        let (eh, _) = do_to_eh(8.0, 8.1, 25.0);
        assert!(
            (0.5..0.9).contains(&eh),
            "aerated seawater Eh should land in the oxidizing band, got {eh}"
        );
    }
}
