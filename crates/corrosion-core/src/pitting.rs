// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Localized Corrosion Assessor
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Dual-tier pitting assessment plus the crevice block.
//!
//! Tier 1 (empirical: PREN, tabulated CPT, chloride threshold) always
//! returns. Tier 2 (mechanistic: E_pit from pitting kinetics vs E_mix from
//! the free polarization solve) degrades to a self-describing explanation
//! instead of failing the call. When the tiers disagree by more than one
//! risk step a disagreement record is attached and the overall risk stays
//! the worse of the two.

use corrosion_data::{CatalogSet, GradeFamily};
use corrosion_kinetics::material::{nrl_material, Conditions, ElectrodeKinetics};
use corrosion_kinetics::polarization::corrosion_potential;
use corrosion_kinetics::reaction::AnodicKind;
use corrosion_types::constants::{F, R};
use corrosion_types::units::{Celsius, Potential, ReferenceElectrode};
use corrosion_types::{CorrosionError, CorrosionResult};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default pitting-initiation current threshold (A/cm²).
pub const PIT_THRESHOLD_A_CM2: f64 = 1.0e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    pub fn step(self) -> i32 {
        match self {
            RiskLevel::Low => 0,
            RiskLevel::Moderate => 1,
            RiskLevel::High => 2,
            RiskLevel::Critical => 3,
        }
    }
}

/// Where the CPT value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CptBasis {
    Tabulated,
    PrenEstimate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizedInput {
    pub material: String,
    pub temperature_c: f64,
    pub chloride_mg_l: f64,
    pub ph: f64,
    pub dissolved_oxygen_mg_l: Option<f64>,
    #[serde(default = "default_crevice_gap")]
    pub crevice_gap_mm: f64,
}

fn default_crevice_gap() -> f64 {
    0.1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tier1Pitting {
    pub cpt_c: f64,
    pub cpt_basis: CptBasis,
    pub pren: f64,
    pub cl_threshold_mg_l: f64,
    pub susceptibility: RiskLevel,
    pub margin_c: f64,
    pub interpretation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreviceAssessment {
    pub cct_c: f64,
    pub ir_drop_v: f64,
    pub acidification_factor: f64,
    pub susceptibility: RiskLevel,
    pub margin_c: f64,
    pub interpretation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Tier2Pitting {
    Available {
        e_pit: Potential,
        e_mix: Potential,
        delta_e_v: f64,
        risk: RiskLevel,
        i0_pitting_a_cm2: f64,
        threshold_a_cm2: f64,
    },
    Unavailable {
        reason: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Disagreement {
    pub detected: bool,
    pub tier1: RiskLevel,
    pub tier2: Option<RiskLevel>,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizedOutcome {
    pub material: String,
    pub temperature_c: f64,
    pub chloride_mg_l: f64,
    pub ph: f64,
    pub pitting: Tier1Pitting,
    pub crevice: CreviceAssessment,
    pub tier2: Tier2Pitting,
    pub disagreement: Disagreement,
    pub overall_risk: RiskLevel,
    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
}

fn validate(input: &LocalizedInput) -> CorrosionResult<()> {
    if !(0.0..=150.0).contains(&input.temperature_c) {
        return Err(CorrosionError::InputValidation(format!(
            "temperature {} °C out of range (0–150 °C)",
            input.temperature_c
        )));
    }
    if input.chloride_mg_l < 0.0 {
        return Err(CorrosionError::InputValidation(
            "chloride concentration cannot be negative".into(),
        ));
    }
    if !(0.0..=14.0).contains(&input.ph) {
        return Err(CorrosionError::InputValidation(format!(
            "pH {} out of range (0–14)",
            input.ph
        )));
    }
    if input.crevice_gap_mm <= 0.0 || input.crevice_gap_mm > 10.0 {
        return Err(CorrosionError::InputValidation(format!(
            "crevice gap {} mm out of range (0–10 mm)",
            input.crevice_gap_mm
        )));
    }
    Ok(())
}

/// CPT estimate from PREN when no tabulation exists, by grade family.
fn cpt_from_pren(pren: f64, family: GradeFamily) -> f64 {
    let intercept = match family {
        GradeFamily::Duplex => -15.0,
        GradeFamily::SuperAustenitic => -5.0,
        _ => -10.0,
    };
    pren + intercept
}

/// Chloride threshold at temperature with the catalog decay constant and
/// the pH correction factor.
fn chloride_threshold(
    catalogs: &CatalogSet,
    material: &str,
    family: GradeFamily,
    pren: f64,
    temperature_c: f64,
    ph: f64,
    warnings: &mut Vec<String>,
) -> f64 {
    let base = match catalogs.threshold_entry(material) {
        Some(entry) => entry.threshold_25c_mg_l,
        None => {
            let estimate = 10.0_f64.powf((pren - 10.0) / 10.0).max(10.0);
            warnings.push(format!(
                "no tabulated chloride threshold for '{material}'; PREN-based estimate \
                 {estimate:.0} mg/L carries ±1 decade uncertainty"
            ));
            estimate
        }
    };
    let k = catalogs.temp_coefficient(family).unwrap_or_else(|| {
        warnings.push(format!(
            "no threshold decay constant for family {}; using 0.05 1/°C",
            family.as_str()
        ));
        0.05
    });
    let decayed = base * (-k * (temperature_c - 25.0)).exp();
    let ph_factor = ((ph - 4.0) / 6.0 + 0.5).clamp(0.5, 1.5);
    decayed * ph_factor
}

fn tier1(
    catalogs: &CatalogSet,
    input: &LocalizedInput,
    pren: f64,
    family: GradeFamily,
    warnings: &mut Vec<String>,
) -> Tier1Pitting {
    let (cpt, basis) = match catalogs.cpt_entry(&input.material) {
        Some(entry) => (entry.cpt_c, CptBasis::Tabulated),
        None => {
            let estimate = cpt_from_pren(pren, family);
            warn!(material = %input.material, cpt = estimate, "CPT falling back to PREN estimate");
            warnings.push(format!(
                "material '{}' has no ASTM G48 tabulation; CPT from PREN correlation \
                 ({estimate:.0} °C, ±20 °C)",
                input.material
            ));
            (estimate, CptBasis::PrenEstimate)
        }
    };
    let margin = cpt - input.temperature_c;
    let threshold = chloride_threshold(
        catalogs,
        &input.material,
        family,
        pren,
        input.temperature_c,
        input.ph,
        warnings,
    );

    let cl = input.chloride_mg_l;
    let susceptibility = if margin > 20.0 && cl < 0.5 * threshold {
        RiskLevel::Low
    } else if margin > 10.0 && cl < threshold {
        RiskLevel::Moderate
    } else if margin > 0.0 || cl < 1.5 * threshold {
        RiskLevel::High
    } else {
        RiskLevel::Critical
    };

    let interpretation = match susceptibility {
        RiskLevel::Critical => format!(
            "T = {:.1} °C exceeds CPT = {cpt:.1} °C by {:.1} °C and Cl⁻ = {cl:.0} mg/L is far \
             above the {threshold:.0} mg/L threshold",
            input.temperature_c, -margin
        ),
        RiskLevel::High => format!(
            "T = {:.1} °C is within {margin:.1} °C of CPT = {cpt:.1} °C; Cl⁻ = {cl:.0} mg/L \
             near the {threshold:.0} mg/L threshold",
            input.temperature_c
        ),
        RiskLevel::Moderate => format!(
            "T = {:.1} °C sits {margin:.1} °C below CPT = {cpt:.1} °C; Cl⁻ = {cl:.0} mg/L is \
             acceptable",
            input.temperature_c
        ),
        RiskLevel::Low => format!(
            "T = {:.1} °C is well below CPT = {cpt:.1} °C (margin {margin:.1} °C) and \
             Cl⁻ = {cl:.0} mg/L < {threshold:.0} mg/L",
            input.temperature_c
        ),
    };

    Tier1Pitting {
        cpt_c: cpt,
        cpt_basis: basis,
        pren,
        cl_threshold_mg_l: threshold,
        susceptibility,
        margin_c: margin,
        interpretation,
    }
}

fn crevice(
    catalogs: &CatalogSet,
    input: &LocalizedInput,
    pren: f64,
    family: GradeFamily,
    warnings: &mut Vec<String>,
) -> CreviceAssessment {
    let cct = match catalogs.cpt_entry(&input.material) {
        Some(entry) => entry.cct_c,
        None => {
            let cpt = cpt_from_pren(pren, family);
            warnings.push(format!(
                "material '{}' has no tabulated CCT; using CPT − 15 °C",
                input.material
            ));
            cpt - 15.0
        }
    };

    // Oldfield-Sutton IR drop with resistivity scaled from seawater.
    const I_CREVICE_A_M2: f64 = 1.0e-4;
    const R_SEAWATER_OHM_M: f64 = 0.2;
    const CL_SEAWATER_MG_L: f64 = 19_000.0;
    let r_solution = R_SEAWATER_OHM_M * (CL_SEAWATER_MG_L / input.chloride_mg_l.max(100.0));
    let depth_m = (input.crevice_gap_mm / 1000.0) * 10.0;
    let ir_drop = I_CREVICE_A_M2 * r_solution * depth_m;

    let delta_ph = (2.0 + (ir_drop / 0.1) * 2.0).min((input.ph - 2.0).max(0.0));
    let acidification = 10.0_f64.powf(delta_ph);
    let margin = cct - input.temperature_c;

    let susceptibility = if margin > 15.0 && acidification < 10.0 {
        RiskLevel::Low
    } else if margin > 5.0 && acidification < 100.0 {
        RiskLevel::Moderate
    } else if margin > -5.0 {
        RiskLevel::High
    } else {
        RiskLevel::Critical
    };

    let interpretation = match susceptibility {
        RiskLevel::Critical => format!(
            "T = {:.1} °C is far above CCT = {cct:.1} °C; crevice pH drops to \
             {:.1} (IR drop {:.1} mV)",
            input.temperature_c,
            input.ph - delta_ph,
            ir_drop * 1000.0
        ),
        RiskLevel::High => format!(
            "T = {:.1} °C near CCT = {cct:.1} °C; crevice acidification factor {acidification:.0}",
            input.temperature_c
        ),
        RiskLevel::Moderate => format!(
            "T = {:.1} °C below CCT = {cct:.1} °C (margin {margin:.1} °C); monitor crevices",
            input.temperature_c
        ),
        RiskLevel::Low => format!(
            "T = {:.1} °C well below CCT = {cct:.1} °C (margin {margin:.1} °C)",
            input.temperature_c
        ),
    };

    CreviceAssessment {
        cct_c: cct,
        ir_drop_v: ir_drop,
        acidification_factor: acidification,
        susceptibility,
        margin_c: margin,
        interpretation,
    }
}

fn tier2(catalogs: &CatalogSet, input: &LocalizedInput) -> Tier2Pitting {
    let Some(do_mg_l) = input.dissolved_oxygen_mg_l else {
        return Tier2Pitting::Unavailable {
            reason: "dissolved oxygen not supplied; the mechanistic tier needs DO to place the \
                     mixed potential"
                .into(),
        };
    };
    if do_mg_l <= 0.0 {
        return Tier2Pitting::Unavailable {
            reason: format!(
                "dissolved oxygen {do_mg_l} mg/L is not positive; the mechanistic tier needs an \
                 aerated solution"
            ),
        };
    }
    let Some(material) = nrl_material(&input.material) else {
        return Tier2Pitting::Unavailable {
            reason: format!(
                "material '{}' has no NRL Butler-Volmer coefficients (set: HY80, HY100, SS316, \
                 Ti, I625, CuNi)",
                input.material
            ),
        };
    };
    if !material.supports(AnodicKind::Pitting) {
        return Tier2Pitting::Unavailable {
            reason: format!(
                "material '{}' carries no pitting kinetics in the NRL set; it does not pit \
                 under these conditions",
                material.id
            ),
        };
    }

    let cond = Conditions::from_bulk(
        input.chloride_mg_l / 35_453.0,
        Celsius(input.temperature_c),
        input.ph,
        0.0,
        Some(do_mg_l),
    );
    let kinetics = match ElectrodeKinetics::build(material, catalogs, &cond) {
        Ok(k) => k,
        Err(e) => {
            return Tier2Pitting::Unavailable {
                reason: format!("Butler-Volmer construction failed: {e}"),
            }
        }
    };
    let e_mix_she = match corrosion_potential(&kinetics) {
        Ok(e) => e,
        Err(e) => {
            return Tier2Pitting::Unavailable {
                reason: format!("free corrosion potential solve failed: {e}"),
            }
        }
    };

    // E_pit: where the pitting branch reaches the threshold current.
    let Some(pit) = kinetics.pitting_reaction() else {
        return Tier2Pitting::Unavailable {
            reason: format!("no pitting branch built for '{}'", material.id),
        };
    };
    let t_k = Celsius(input.temperature_c).kelvin().0;
    let eta_pit =
        (R * t_k / (pit.beta * pit.z as f64 * F)) * (PIT_THRESHOLD_A_CM2 / pit.i0_a_cm2).ln();
    let e_pit_she = pit.e_nernst_she + eta_pit;

    let delta_e = e_mix_she - e_pit_she;
    let risk = if delta_e > 0.05 {
        RiskLevel::Critical
    } else if delta_e > 0.0 {
        RiskLevel::High
    } else if delta_e > -0.1 {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    };

    Tier2Pitting::Available {
        e_pit: Potential::vs_she(e_pit_she).to(ReferenceElectrode::Sce),
        e_mix: Potential::vs_she(e_mix_she).to(ReferenceElectrode::Sce),
        delta_e_v: delta_e,
        risk,
        i0_pitting_a_cm2: pit.i0_a_cm2,
        threshold_a_cm2: PIT_THRESHOLD_A_CM2,
    }
}

/// Full localized-corrosion assessment.
pub fn assess_localized(
    catalogs: &CatalogSet,
    input: &LocalizedInput,
) -> CorrosionResult<LocalizedOutcome> {
    validate(input)?;
    let mut warnings = Vec::new();

    let composition = catalogs.material(&input.material).ok_or_else(|| {
        CorrosionError::InputValidation(format!(
            "unknown material '{}' after alias resolution; not in the composition catalog",
            input.material
        ))
    })?;
    let pren = composition.pren();
    let family = composition.grade_type;

    let pitting = tier1(catalogs, input, pren, family, &mut warnings);
    let crevice = crevice(catalogs, input, pren, family, &mut warnings);
    let tier2 = tier2(catalogs, input);

    if pitting.margin_c.abs() < 5.0 {
        warnings.push(format!(
            "operating temperature within 5 °C of CPT ({:.1} °C)",
            pitting.cpt_c
        ));
    }

    let tier2_risk = match &tier2 {
        Tier2Pitting::Available { risk, .. } => Some(*risk),
        Tier2Pitting::Unavailable { .. } => None,
    };
    let detected = tier2_risk
        .map(|t2| (t2.step() - pitting.susceptibility.step()).abs() > 1)
        .unwrap_or(false);
    let disagreement = Disagreement {
        detected,
        tier1: pitting.susceptibility,
        tier2: tier2_risk,
        recommendation: if detected {
            "Tier 2 is mechanistic; prefer it when available".into()
        } else {
            String::new()
        },
    };

    // Conservative: downstream consumers that ignore the disagreement
    // record must still see the worst classification.
    let mut overall = pitting.susceptibility.max(crevice.susceptibility);
    if let Some(t2) = tier2_risk {
        overall = overall.max(t2);
    }

    let mut recommendations = Vec::new();
    match overall {
        RiskLevel::Critical => {
            recommendations.push(
                "immediate localized-corrosion risk: change material or modify the process".into(),
            );
            recommendations
                .push("consider a higher-PREN alloy (316→2205, 2205→254SMO)".into());
        }
        RiskLevel::High => {
            recommendations
                .push("localized corrosion likely: reduce temperature or chlorides, or upgrade".into());
        }
        RiskLevel::Moderate => {
            recommendations.push("monitor for pit initiation; quarterly inspection".into());
        }
        RiskLevel::Low => {
            recommendations.push("material selection appropriate for these conditions".into());
        }
    }
    if detected {
        recommendations.push(
            "empirical and mechanistic tiers disagree; prefer Tier 2 where available and \
             verify exposure data"
                .into(),
        );
    }
    if input.ph < 6.0 {
        recommendations.push(format!(
            "low pH ({:.1}) raises localized corrosion risk; consider pH control above 6.5",
            input.ph
        ));
    }
    if crevice.susceptibility >= RiskLevel::High {
        recommendations.push("eliminate or seal crevices; prefer welded over gasketed joints".into());
    }

    Ok(LocalizedOutcome {
        material: input.material.clone(),
        temperature_c: input.temperature_c,
        chloride_mg_l: input.chloride_mg_l,
        ph: input.ph,
        pitting,
        crevice,
        tier2,
        disagreement,
        overall_risk: overall,
        recommendations,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn catalogs() -> CatalogSet {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("data");
        CatalogSet::load(&dir).unwrap()
    }

    fn seawater_316(do_mg_l: Option<f64>) -> LocalizedInput {
        LocalizedInput {
            material: "316L".into(),
            temperature_c: 25.0,
            chloride_mg_l: 19_000.0,
            ph: 8.0,
            dissolved_oxygen_mg_l: do_mg_l,
            crevice_gap_mm: 0.1,
        }
    }

    #[test]
    fn test_ss316_seawater_dual_tier() {
        let cats = catalogs();
        let out = assess_localized(&cats, &seawater_316(Some(8.0))).unwrap();

        // Tier 1: 25 °C is far above the tabulated CPT of 10 °C.
        assert_eq!(out.pitting.cpt_basis, CptBasis::Tabulated);
        assert!((out.pitting.cpt_c - 10.0).abs() < 1e-9);
        assert_eq!(out.pitting.susceptibility, RiskLevel::Critical);

        // Tier 2: large margin below E_pit.
        match &out.tier2 {
            Tier2Pitting::Available { e_pit, e_mix, delta_e_v, risk, .. } => {
                assert!(
                    (1.0..1.15).contains(&e_pit.sce_volts()),
                    "E_pit = {:.3} V SCE",
                    e_pit.sce_volts()
                );
                assert!(
                    (0.40..0.65).contains(&e_mix.sce_volts()),
                    "E_mix = {:.3} V SCE",
                    e_mix.sce_volts()
                );
                assert!(*delta_e_v < -0.4, "ΔE = {delta_e_v:.3} V");
                assert_eq!(*risk, RiskLevel::Low);
            }
            Tier2Pitting::Unavailable { reason } => panic!("tier 2 should run: {reason}"),
        }

        // Tiers differ by three steps → disagreement, conservative overall.
        assert!(out.disagreement.detected);
        assert!(out.disagreement.recommendation.contains("prefer it"));
        assert_eq!(out.overall_risk, RiskLevel::Critical);
        assert!(out
            .recommendations
            .iter()
            .any(|r| r.contains("prefer Tier 2")));
    }

    #[test]
    fn test_tier2_monotone_in_delta_e() {
        // Invariant: hotter, saltier water cannot lower the Tier-2 risk.
        let cats = catalogs();
        let mild = assess_localized(
            &cats,
            &LocalizedInput {
                material: "SS316".into(),
                temperature_c: 15.0,
                chloride_mg_l: 1000.0,
                ph: 8.0,
                dissolved_oxygen_mg_l: Some(8.0),
                crevice_gap_mm: 0.1,
            },
        )
        .unwrap();
        let harsh = assess_localized(&cats, &seawater_316(Some(8.0))).unwrap();
        let (de_mild, risk_mild) = match &mild.tier2 {
            Tier2Pitting::Available { delta_e_v, risk, .. } => (*delta_e_v, *risk),
            _ => panic!("tier 2 must run"),
        };
        let (de_harsh, risk_harsh) = match &harsh.tier2 {
            Tier2Pitting::Available { delta_e_v, risk, .. } => (*delta_e_v, *risk),
            _ => panic!("tier 2 must run"),
        };
        if de_harsh >= de_mild {
            assert!(risk_harsh >= risk_mild, "risk must be monotone in ΔE");
        } else {
            assert!(risk_mild >= risk_harsh, "risk must be monotone in ΔE");
        }
    }

    #[test]
    fn test_tier1_survives_missing_do() {
        let cats = catalogs();
        let out = assess_localized(&cats, &seawater_316(None)).unwrap();
        assert_eq!(out.pitting.susceptibility, RiskLevel::Critical);
        match &out.tier2 {
            Tier2Pitting::Unavailable { reason } => {
                assert!(reason.contains("dissolved oxygen"), "{reason}");
            }
            _ => panic!("tier 2 must be unavailable without DO"),
        }
        assert_eq!(out.overall_risk, RiskLevel::Critical);
    }

    #[test]
    fn test_non_nrl_material_gets_tier1_only() {
        let cats = catalogs();
        let input = LocalizedInput {
            material: "2205".into(),
            temperature_c: 20.0,
            chloride_mg_l: 500.0,
            ph: 7.0,
            dissolved_oxygen_mg_l: Some(6.0),
            crevice_gap_mm: 0.1,
        };
        let out = assess_localized(&cats, &input).unwrap();
        assert!((out.pitting.pren - 35.0).abs() < 0.5, "PREN = {}", out.pitting.pren);
        match &out.tier2 {
            Tier2Pitting::Unavailable { reason } => {
                assert!(reason.contains("NRL"), "{reason}");
            }
            _ => panic!("2205 has no NRL kinetics"),
        }
        // Cool duplex in modest chloride: not critical.
        assert!(out.pitting.susceptibility <= RiskLevel::Moderate);
    }

    #[test]
    fn test_unknown_material_is_input_error() {
        let cats = catalogs();
        let mut input = seawater_316(Some(8.0));
        input.material = "unobtainium".into();
        assert!(matches!(
            assess_localized(&cats, &input),
            Err(CorrosionError::InputValidation(_))
        ));
    }

    #[test]
    fn test_threshold_decays_with_temperature() {
        let cats = catalogs();
        let cool = assess_localized(
            &cats,
            &LocalizedInput {
                material: "SS316".into(),
                temperature_c: 25.0,
                chloride_mg_l: 100.0,
                ph: 7.0,
                dissolved_oxygen_mg_l: None,
                crevice_gap_mm: 0.1,
            },
        )
        .unwrap();
        let hot = assess_localized(
            &cats,
            &LocalizedInput {
                material: "SS316".into(),
                temperature_c: 60.0,
                chloride_mg_l: 100.0,
                ph: 7.0,
                dissolved_oxygen_mg_l: None,
                crevice_gap_mm: 0.1,
            },
        )
        .unwrap();
        assert!(hot.pitting.cl_threshold_mg_l < cool.pitting.cl_threshold_mg_l);
    }

    #[test]
    fn test_crevice_is_harsher_than_pitting() {
        let cats = catalogs();
        let out = assess_localized(&cats, &seawater_316(Some(8.0))).unwrap();
        assert!(out.crevice.cct_c <= out.pitting.cpt_c);
        assert!(out.crevice.acidification_factor >= 1.0);
    }
}
