// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — PREN Tool
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! PREN = %Cr + 3.3·%Mo + 16·%N, from a catalog material or an explicit
//! composition, with the family-specific interpretation band.

use corrosion_data::{CatalogSet, GradeFamily};
use corrosion_types::{CorrosionError, CorrosionResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplicitComposition {
    pub cr_wt_pct: f64,
    pub mo_wt_pct: f64,
    pub n_wt_pct: f64,
    #[serde(default)]
    pub grade_type: Option<GradeFamily>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrenInput {
    /// Catalog material id (alias-resolved); or
    pub material: Option<String>,
    /// an explicit composition.
    pub composition: Option<ExplicitComposition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrenOutcome {
    pub pren: f64,
    pub material: Option<String>,
    pub grade_type: Option<GradeFamily>,
    pub interpretation: String,
}

fn band(pren: f64, family: Option<GradeFamily>) -> String {
    let base = if pren < 20.0 {
        "low pitting resistance; fresh or low-chloride water only"
    } else if pren < 30.0 {
        "moderate pitting resistance; brackish service with monitoring"
    } else if pren < 40.0 {
        "high pitting resistance; seawater service with temperature control"
    } else {
        "very high pitting resistance; suited to seawater and high chloride"
    };
    match family {
        Some(GradeFamily::Duplex) => {
            format!("{base} (duplex grades can deviate ±5 °C from the CPT correlation)")
        }
        Some(GradeFamily::CarbonSteel) | Some(GradeFamily::Nonferrous) => format!(
            "{base} (PREN is calibrated for stainless grades; treat as qualitative here)"
        ),
        _ => base.to_string(),
    }
}

pub fn calculate_pren(catalogs: &CatalogSet, input: &PrenInput) -> CorrosionResult<PrenOutcome> {
    match (&input.material, &input.composition) {
        (Some(name), _) => {
            let mat = catalogs.material(name).ok_or_else(|| {
                CorrosionError::InputValidation(format!(
                    "unknown material '{name}' after alias resolution"
                ))
            })?;
            let pren = mat.pren();
            Ok(PrenOutcome {
                pren,
                material: Some(mat.common_name.clone()),
                grade_type: Some(mat.grade_type),
                interpretation: band(pren, Some(mat.grade_type)),
            })
        }
        (None, Some(comp)) => {
            for (label, value, max) in [
                ("Cr", comp.cr_wt_pct, 35.0),
                ("Mo", comp.mo_wt_pct, 10.0),
                ("N", comp.n_wt_pct, 1.0),
            ] {
                if !(0.0..=max).contains(&value) {
                    return Err(CorrosionError::InputValidation(format!(
                        "{label} content {value} wt% out of range (0–{max})"
                    )));
                }
            }
            let pren = comp.cr_wt_pct + 3.3 * comp.mo_wt_pct + 16.0 * comp.n_wt_pct;
            Ok(PrenOutcome {
                pren,
                material: None,
                grade_type: comp.grade_type,
                interpretation: band(pren, comp.grade_type),
            })
        }
        (None, None) => Err(CorrosionError::InputValidation(
            "either a material id or an explicit composition is required".into(),
        )),
    }
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

    #[test]
    fn test_pren_2205_from_catalog() {
        let out = calculate_pren(
            &catalogs(),
            &PrenInput { material: Some("2205".into()), composition: None },
        )
        .unwrap();
        assert!((out.pren - 35.0).abs() < 0.5, "PREN = {}", out.pren);
        assert_eq!(out.grade_type, Some(GradeFamily::Duplex));
        assert!(out.interpretation.contains("duplex"));
    }

    #[test]
    fn test_pren_explicit_composition() {
        let out = calculate_pren(
            &catalogs(),
            &PrenInput {
                material: None,
                composition: Some(ExplicitComposition {
                    cr_wt_pct: 22.0,
                    mo_wt_pct: 3.1,
                    n_wt_pct: 0.17,
                    grade_type: None,
                }),
            },
        )
        .unwrap();
        assert!((out.pren - 34.95).abs() < 0.01);
    }

    #[test]
    fn test_composition_bounds() {
        let err = calculate_pren(
            &catalogs(),
            &PrenInput {
                material: None,
                composition: Some(ExplicitComposition {
                    cr_wt_pct: 55.0,
                    mo_wt_pct: 0.0,
                    n_wt_pct: 0.0,
                    grade_type: None,
                }),
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("Cr"));
    }

    #[test]
    fn test_missing_input() {
        assert!(calculate_pren(&catalogs(), &PrenInput { material: None, composition: None })
            .is_err());
    }
}
