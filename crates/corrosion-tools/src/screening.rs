// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Material Screening
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Catalog-backed compatibility screening: each candidate is judged
//! against the chloride threshold and CPT tables for the environment's
//! inferred chloride level, with the galvanic-series position attached as
//! context. Handbook semantic search sits outside this crate.

use corrosion_data::CatalogSet;
use corrosion_types::{CorrosionError, CorrosionResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenInput {
    pub environment: String,
    pub candidates: Vec<String>,
    #[serde(default)]
    pub application: String,
    /// Explicit chloride level; otherwise inferred from the environment text.
    pub chloride_mg_l: Option<f64>,
    #[serde(default = "default_temperature")]
    pub temperature_c: f64,
}

fn default_temperature() -> f64 {
    25.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compatibility {
    Acceptable,
    Marginal,
    NotRecommended,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateAssessment {
    pub material: String,
    pub compatibility: Compatibility,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenOutcome {
    pub environment: String,
    pub chloride_mg_l: f64,
    pub candidates: Vec<CandidateAssessment>,
}

/// Chloride level inferred from environment keywords.
fn infer_chloride_mg_l(environment: &str) -> f64 {
    let env = environment.to_ascii_lowercase();
    if env.contains("seawater") || env.contains("marine") || env.contains("offshore") {
        19_000.0
    } else if env.contains("brackish") || env.contains("estuar") {
        5000.0
    } else if env.contains("brine") {
        50_000.0
    } else if env.contains("potable") || env.contains("fresh") {
        100.0
    } else {
        1000.0
    }
}

pub fn screen_materials(
    catalogs: &CatalogSet,
    input: &ScreenInput,
) -> CorrosionResult<ScreenOutcome> {
    if input.candidates.is_empty() {
        return Err(CorrosionError::InputValidation(
            "candidate list must not be empty".into(),
        ));
    }
    let chloride = input
        .chloride_mg_l
        .unwrap_or_else(|| infer_chloride_mg_l(&input.environment));

    let mut candidates = Vec::with_capacity(input.candidates.len());
    for name in &input.candidates {
        let mut notes = Vec::new();

        let Some(composition) = catalogs.material(name) else {
            candidates.push(CandidateAssessment {
                material: name.clone(),
                compatibility: Compatibility::NotRecommended,
                notes: vec![format!(
                    "'{name}' not in the composition catalog; cannot be screened"
                )],
            });
            continue;
        };

        let compatibility = match catalogs.threshold_entry(name) {
            Some(threshold) => {
                let margin = catalogs
                    .cpt_entry(name)
                    .map(|cpt| cpt.cpt_c - input.temperature_c);
                if let Some(m) = margin {
                    notes.push(format!("CPT margin {m:.0} °C at {} °C", input.temperature_c));
                }
                let base = threshold.threshold_25c_mg_l;
                let mut verdict = if chloride < 0.5 * base {
                    notes.push(format!(
                        "chloride {chloride:.0} mg/L well below the {base:.0} mg/L threshold"
                    ));
                    Compatibility::Acceptable
                } else if chloride < 1.5 * base {
                    notes.push(format!(
                        "chloride {chloride:.0} mg/L near the {base:.0} mg/L threshold; \
                         monitor temperature and crevices"
                    ));
                    Compatibility::Marginal
                } else {
                    notes.push(format!(
                        "chloride {chloride:.0} mg/L far above the {base:.0} mg/L threshold"
                    ));
                    Compatibility::NotRecommended
                };
                // A wide CPT margin offsets a chloride exceedance: the
                // threshold table is a 25 °C reference and high-CPT grades
                // keep their film well past it.
                if verdict == Compatibility::NotRecommended
                    && margin.is_some_and(|m| m > 20.0)
                {
                    notes.push(
                        "large CPT margin offsets the chloride exceedance".to_string(),
                    );
                    verdict = Compatibility::Marginal;
                }
                verdict
            }
            None => {
                notes.push(format!(
                    "no chloride threshold tabulated for '{name}' (PREN {:.1}); judgment from \
                     grade family only",
                    composition.pren()
                ));
                Compatibility::Marginal
            }
        };

        if let Some(entry) = catalogs.galvanic_entry(name) {
            notes.push(format!(
                "galvanic series: {:.2} V vs SCE ({})",
                entry.e_sce_v, entry.activity_category
            ));
        }
        if !input.application.is_empty() {
            notes.push(format!("screened for: {}", input.application));
        }

        candidates.push(CandidateAssessment {
            material: composition.common_name.clone(),
            compatibility,
            notes,
        });
    }

    Ok(ScreenOutcome {
        environment: input.environment.clone(),
        chloride_mg_l: chloride,
        candidates,
    })
}
