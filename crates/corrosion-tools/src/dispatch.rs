// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Tool Dispatch
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Name-keyed tool dispatch. Each tool deserializes its typed record,
//! calls the core, and wraps the outcome with provenance; typed core
//! errors are translated into the response envelope, naming the kind and
//! the originating component.

use corrosion_chemistry::redox;
use corrosion_core::aerated::{predict_aerated_chloride, AeratedInput};
use corrosion_core::galvanic::{assess_galvanic, GalvanicInput};
use corrosion_core::norsok::{predict_co2_h2s, NorsokInput};
use corrosion_core::pitting::{assess_localized, LocalizedInput, Tier2Pitting};
use corrosion_core::pourbaix::{generate_pourbaix, PourbaixInput};
use corrosion_data::CatalogSet;
use corrosion_types::provenance::{Confidence, Provenance};
use corrosion_types::units::ReferenceElectrode;
use corrosion_types::{CorrosionError, CorrosionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::pren::{calculate_pren, PrenInput};
use crate::screening::{screen_materials, ScreenInput};

pub const TOOL_NAMES: &[&str] = &[
    "screen_materials",
    "assess_galvanic",
    "assess_localized",
    "calculate_pren",
    "generate_pourbaix",
    "predict_co2_h2s",
    "predict_aerated_chloride",
    "get_material_properties",
    "do_to_eh",
    "eh_to_do",
    "orp_to_eh",
    "eh_to_orp",
    "server_info",
];

#[derive(Debug, Clone, Deserialize)]
pub struct ToolRequest {
    pub tool: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEnvelope>,
}

fn error_kind(err: &CorrosionError) -> &'static str {
    match err {
        CorrosionError::InputValidation(_) => "input_validation",
        CorrosionError::OutOfValidatedRegion { .. } => "out_of_validated_region",
        CorrosionError::SolverNonConvergence { .. } => "solver_non_convergence",
        CorrosionError::Tier2Unavailable(_) => "tier2_unavailable",
        CorrosionError::CatalogLoad { .. } => "catalog_load",
        CorrosionError::Io(_) => "io",
        CorrosionError::Json(_) => "json",
    }
}

fn parse<T: for<'de> Deserialize<'de>>(params: Value) -> CorrosionResult<T> {
    serde_json::from_value(params)
        .map_err(|e| CorrosionError::InputValidation(format!("malformed parameters: {e}")))
}

fn envelope<T: Serialize>(outcome: &T, provenance: Provenance) -> CorrosionResult<Value> {
    let mut value = serde_json::to_value(outcome)?;
    if let Value::Object(map) = &mut value {
        map.insert("provenance".into(), serde_json::to_value(&provenance)?);
    }
    Ok(value)
}

#[derive(Debug, Deserialize)]
struct MaterialQuery {
    material: String,
}

#[derive(Debug, Deserialize)]
struct DoToEhInput {
    dissolved_oxygen_mg_l: f64,
    ph: f64,
    #[serde(default = "default_temperature")]
    temperature_c: f64,
}

#[derive(Debug, Deserialize)]
struct EhToDoInput {
    eh_v_she: f64,
    ph: f64,
    #[serde(default = "default_temperature")]
    temperature_c: f64,
}

#[derive(Debug, Deserialize)]
struct OrpInput {
    #[serde(default)]
    orp_mv: f64,
    #[serde(default)]
    eh_v_she: f64,
    reference_electrode: ReferenceElectrode,
}

fn default_temperature() -> f64 {
    25.0
}

fn run(catalogs: &CatalogSet, request: ToolRequest) -> CorrosionResult<Value> {
    match request.tool.as_str() {
        "screen_materials" => {
            let input: ScreenInput = parse(request.params)?;
            let outcome = screen_materials(catalogs, &input)?;
            let provenance = Provenance::new("catalog_screening", Confidence::Medium)
                .with_source("ISO 18070:2007")
                .with_source("ASTM G48-11")
                .with_assumption("compatibility from tabulated thresholds at 25 °C reference");
            envelope(&outcome, provenance)
        }
        "assess_galvanic" => {
            let input: GalvanicInput = parse(request.params)?;
            let outcome = assess_galvanic(catalogs, &input)?;
            let mut provenance = Provenance::new("nrl_mixed_potential", Confidence::Medium)
                .with_source("NRL polarization dataset")
                .with_source("ASTM G82-98")
                .with_assumption("uniform solution composition, no IR drop")
                .with_assumption("area-weighted cathodic current, 1-D couple");
            for w in &outcome.warnings {
                provenance.push_warning(w.clone());
            }
            envelope(&outcome, provenance)
        }
        "assess_localized" => {
            let input: LocalizedInput = parse(request.params)?;
            let outcome = assess_localized(catalogs, &input)?;
            let mut provenance = Provenance::new("dual_tier_pitting", Confidence::Medium)
                .with_source("ASTM G48-11")
                .with_source("ISO 18070:2007")
                .with_assumption("Tier 1 empirical, Tier 2 Butler-Volmer mechanistic");
            if let Tier2Pitting::Unavailable { reason } = &outcome.tier2 {
                provenance.push_warning(format!("tier 2 unavailable: {reason}"));
            }
            for w in &outcome.warnings {
                provenance.push_warning(w.clone());
            }
            envelope(&outcome, provenance)
        }
        "calculate_pren" => {
            let input: PrenInput = parse(request.params)?;
            let outcome = calculate_pren(catalogs, &input)?;
            let provenance = Provenance::new("pren", Confidence::High)
                .with_source("ASTM G48")
                .with_assumption("PREN = %Cr + 3.3·%Mo + 16·%N");
            envelope(&outcome, provenance)
        }
        "generate_pourbaix" => {
            let input: PourbaixInput = parse(request.params)?;
            let outcome = generate_pourbaix(&input)?;
            let provenance = Provenance::new("pourbaix_simplified", Confidence::Low)
                .with_source("Pourbaix (1974) Atlas of Electrochemical Equilibria")
                .with_assumption("unit activity coefficients, no complex species");
            envelope(&outcome, provenance)
        }
        "predict_co2_h2s" => {
            let input: NorsokInput = parse(request.params)?;
            let outcome = predict_co2_h2s(&input)?;
            let mut provenance = Provenance::new("norsok_m506", Confidence::Medium)
                .with_source("NORSOK M-506")
                .with_assumption("carbon steel, CO₂-dominated attack");
            for w in &outcome.warnings {
                provenance.push_warning(w.clone());
            }
            envelope(&outcome, provenance)
        }
        "predict_aerated_chloride" => {
            let input: AeratedInput = parse(request.params)?;
            let outcome = predict_aerated_chloride(catalogs, &input)?;
            let mut provenance = Provenance::new("orr_diffusion_limit", Confidence::Medium)
                .with_source("ASTM G102-89")
                .with_source("Garcia & Gordon (1992)")
                .with_assumption("oxygen-transport-controlled uniform attack");
            for w in &outcome.warnings {
                provenance.push_warning(w.clone());
            }
            envelope(&outcome, provenance)
        }
        "get_material_properties" => {
            let query: MaterialQuery = parse(request.params)?;
            let material = catalogs.material(&query.material).ok_or_else(|| {
                CorrosionError::InputValidation(format!(
                    "unknown material '{}' after alias resolution",
                    query.material
                ))
            })?;
            let mut value = serde_json::to_value(material)?;
            if let Value::Object(map) = &mut value {
                map.insert("pren".into(), json!(material.pren()));
                if let Some(fe) = material.fe_wt_pct() {
                    map.insert("fe_wt_pct".into(), json!(fe));
                }
                if let Some(cpt) = catalogs.cpt_entry(&query.material) {
                    map.insert("cpt".into(), serde_json::to_value(cpt)?);
                }
                if let Some(threshold) = catalogs.threshold_entry(&query.material) {
                    map.insert("chloride_threshold".into(), serde_json::to_value(threshold)?);
                }
                if let Some(galvanic) = catalogs.galvanic_entry(&query.material) {
                    map.insert("galvanic_series".into(), serde_json::to_value(galvanic)?);
                }
                map.insert(
                    "provenance".into(),
                    serde_json::to_value(
                        &Provenance::new("material_catalog", Confidence::High)
                            .with_source(material.source.clone()),
                    )?,
                );
            }
            Ok(value)
        }
        "do_to_eh" => {
            let input: DoToEhInput = parse(request.params)?;
            let (eh, warnings) =
                redox::do_to_eh(input.dissolved_oxygen_mg_l, input.ph, input.temperature_c);
            let mut provenance = Provenance::new("orr_nernst", Confidence::High)
                .with_source("Garcia & Gordon (1992)")
                .with_assumption("ORR equilibrium controls the redox potential");
            for w in &warnings {
                provenance.push_warning(w.clone());
            }
            envelope(
                &json!({ "eh_v_she": eh, "eh_v_sce": eh - 0.241, "warnings": warnings }),
                provenance,
            )
        }
        "eh_to_do" => {
            let input: EhToDoInput = parse(request.params)?;
            let (do_mg_l, warnings) = redox::eh_to_do(input.eh_v_she, input.ph, input.temperature_c);
            let mut provenance = Provenance::new("orr_nernst", Confidence::High)
                .with_source("Garcia & Gordon (1992)");
            for w in &warnings {
                provenance.push_warning(w.clone());
            }
            envelope(
                &json!({ "dissolved_oxygen_mg_l": do_mg_l, "warnings": warnings }),
                provenance,
            )
        }
        "orp_to_eh" => {
            let input: OrpInput = parse(request.params)?;
            let eh = redox::orp_to_eh(input.orp_mv, input.reference_electrode);
            envelope(
                &json!({ "eh_v_she": eh }),
                Provenance::new("reference_offset", Confidence::High)
                    .with_source("ASTM G3"),
            )
        }
        "eh_to_orp" => {
            let input: OrpInput = parse(request.params)?;
            let orp = redox::eh_to_orp(input.eh_v_she, input.reference_electrode);
            envelope(
                &json!({ "orp_mv": orp }),
                Provenance::new("reference_offset", Confidence::High)
                    .with_source("ASTM G3"),
            )
        }
        "server_info" => Ok(json!({
            "name": "scpn-corrosion-core",
            "version": env!("CARGO_PKG_VERSION"),
            "tools": TOOL_NAMES,
            "data_dir": catalogs.data_dir().display().to_string(),
            "materials": catalogs.materials.len(),
        })),
        other => Err(CorrosionError::InputValidation(format!(
            "unknown tool '{other}'; available: {TOOL_NAMES:?}"
        ))),
    }
}

/// Dispatch one request, translating typed errors into the envelope.
pub fn dispatch(catalogs: &CatalogSet, request: ToolRequest) -> ToolResponse {
    let tool = request.tool.clone();
    match run(catalogs, request) {
        Ok(result) => {
            info!(tool, "tool call succeeded");
            ToolResponse { ok: true, result: Some(result), error: None }
        }
        Err(err) => {
            info!(tool, error = %err, "tool call failed");
            ToolResponse {
                ok: false,
                result: None,
                error: Some(ErrorEnvelope {
                    kind: error_kind(&err).to_string(),
                    message: err.to_string(),
                }),
            }
        }
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

    fn call(tool: &str, params: Value) -> ToolResponse {
        dispatch(&catalogs(), ToolRequest { tool: tool.into(), params })
    }

    #[test]
    fn test_assess_galvanic_envelope() {
        let response = call(
            "assess_galvanic",
            json!({
                "anode": "HY80",
                "cathode": "SS316",
                "temperature_c": 25.0,
                "ph": 8.0,
                "chloride_mg_l": 19000.0,
                "area_ratio": 1.0,
                "dissolved_oxygen_mg_l": 8.0
            }),
        );
        assert!(response.ok, "{:?}", response.error);
        let result = response.result.unwrap();
        assert!(result["galvanic_current_density_a_cm2"].as_f64().unwrap() > 0.0);
        assert_eq!(result["provenance"]["model"], "nrl_mixed_potential");
        assert!(result["provenance"]["sources"].as_array().unwrap().len() >= 2);
    }

    #[test]
    fn test_error_envelope_names_kind_and_component() {
        let response = call(
            "assess_galvanic",
            json!({
                "anode": "HY80",
                "cathode": "SS316",
                "temperature_c": 95.0,
                "ph": 8.0,
                "chloride_mg_l": 19000.0,
                "area_ratio": 1.0
            }),
        );
        assert!(!response.ok);
        let error = response.error.unwrap();
        assert_eq!(error.kind, "out_of_validated_region");
        assert!(error.message.contains("galvanic"), "{}", error.message);
    }

    #[test]
    fn test_localized_keeps_tier1_on_tier2_failure() {
        let response = call(
            "assess_localized",
            json!({
                "material": "2205",
                "temperature_c": 30.0,
                "chloride_mg_l": 1000.0,
                "ph": 7.5
            }),
        );
        assert!(response.ok, "{:?}", response.error);
        let result = response.result.unwrap();
        assert_eq!(result["tier2"]["status"], "unavailable");
        assert!(result["pitting"]["susceptibility"].is_string());
    }

    #[test]
    fn test_material_properties_record() {
        let response = call("get_material_properties", json!({ "material": "316L" }));
        assert!(response.ok);
        let result = response.result.unwrap();
        assert_eq!(result["common_name"], "SS316");
        assert_eq!(result["uns"], "S31600");
        assert!(result["pren"].as_f64().unwrap() > 20.0);
        assert!(result["cpt"]["cpt_c"].as_f64().is_some());
    }

    #[test]
    fn test_redox_round_trip_through_tools() {
        let forward = call(
            "do_to_eh",
            json!({ "dissolved_oxygen_mg_l": 8.0, "ph": 8.1, "temperature_c": 25.0 }),
        );
        assert!(forward.ok);
        let eh = forward.result.unwrap()["eh_v_she"].as_f64().unwrap();
        let back = call("eh_to_do", json!({ "eh_v_she": eh, "ph": 8.1, "temperature_c": 25.0 }));
        let do_mg_l = back.result.unwrap()["dissolved_oxygen_mg_l"].as_f64().unwrap();
        assert!((do_mg_l - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_unknown_tool() {
        let response = call("divine_the_future", json!({}));
        assert!(!response.ok);
        assert_eq!(response.error.unwrap().kind, "input_validation");
    }

    #[test]
    fn test_server_info_lists_all_tools() {
        let response = call("server_info", json!({}));
        let result = response.result.unwrap();
        assert_eq!(result["tools"].as_array().unwrap().len(), TOOL_NAMES.len());
    }
}
