// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — End-to-End Scenarios
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Full-stack scenarios through the tool dispatcher: seawater galvanic
//! couples, dual-tier pitting, anaerobic service, PREN, Pourbaix, and the
//! NORSOK model, each exercised end to end against the shipped catalogs.

use corrosion_data::CatalogSet;
use corrosion_tools::dispatch::{dispatch, ToolRequest, ToolResponse};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::OnceLock;

fn catalogs() -> &'static CatalogSet {
    static CATALOGS: OnceLock<CatalogSet> = OnceLock::new();
    CATALOGS.get_or_init(|| {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("data");
        CatalogSet::load(&dir).unwrap()
    })
}

fn call(tool: &str, params: Value) -> ToolResponse {
    dispatch(catalogs(), ToolRequest { tool: tool.into(), params })
}

fn ok(tool: &str, params: Value) -> Value {
    let response = call(tool, params);
    assert!(response.ok, "{tool} failed: {:?}", response.error);
    response.result.unwrap()
}

fn galvanic_params(area_ratio: f64, do_mg_l: f64) -> Value {
    json!({
        "anode": "HY80",
        "cathode": "SS316",
        "temperature_c": 25.0,
        "ph": 8.0,
        "chloride_mg_l": 19000.0,
        "area_ratio": area_ratio,
        "dissolved_oxygen_mg_l": do_mg_l
    })
}

#[test]
fn scenario_hy80_ss316_galvanic_couple() {
    let result = ok("assess_galvanic", galvanic_params(1.0, 8.0));

    let ratio = result["current_ratio"].as_f64().unwrap();
    assert!(ratio > 1.0, "dissimilar couple must amplify: {ratio}");
    assert_eq!(result["severity"], "minor");

    let rate = result["anode_corrosion_rate_mm_yr"].as_f64().unwrap();
    assert!((1.0..10.0).contains(&rate), "CR = {rate} mm/yr");

    // Severity escalates with area ratio.
    let r10 = ok("assess_galvanic", galvanic_params(10.0, 8.0));
    assert_eq!(r10["severity"], "moderate", "ratio {}", r10["current_ratio"]);
    let r50 = ok("assess_galvanic", galvanic_params(50.0, 8.0));
    assert_eq!(r50["severity"], "severe", "ratio {}", r50["current_ratio"]);
}

#[test]
fn scenario_ss316_pitting_dual_tier() {
    let result = ok(
        "assess_localized",
        json!({
            "material": "316L",
            "temperature_c": 25.0,
            "chloride_mg_l": 19000.0,
            "ph": 8.0,
            "dissolved_oxygen_mg_l": 8.0
        }),
    );

    assert_eq!(result["pitting"]["susceptibility"], "critical");
    assert_eq!(result["tier2"]["status"], "available");
    assert_eq!(result["tier2"]["risk"], "low");
    let delta_e = result["tier2"]["delta_e_v"].as_f64().unwrap();
    assert!(delta_e < -0.4, "ΔE = {delta_e} V");
    assert_eq!(result["disagreement"]["detected"], true);
    assert_eq!(result["overall_risk"], "critical");
    let recs = result["recommendations"].as_array().unwrap();
    assert!(recs.iter().any(|r| r.as_str().unwrap().contains("prefer Tier 2")));
}

#[test]
fn scenario_anaerobic_seawater_suppresses_corrosion() {
    let mut aerated = galvanic_params(1.0, 8.0);
    aerated["cathode"] = json!("HY80");
    let mut anaerobic = galvanic_params(1.0, 0.0);
    anaerobic["cathode"] = json!("HY80");

    let with_oxygen = ok("assess_galvanic", aerated);
    let without = ok("assess_galvanic", anaerobic);

    let reduction = with_oxygen["anode_corrosion_rate_mm_yr"].as_f64().unwrap()
        / without["anode_corrosion_rate_mm_yr"].as_f64().unwrap();
    assert!(
        (300.0..1500.0).contains(&reduction),
        "expected roughly 800× reduction, got {reduction:.0}×"
    );
    let warnings = without["warnings"].as_array().unwrap();
    assert!(warnings.iter().any(|w| w.as_str().unwrap().contains("anaerobic")));
}

#[test]
fn scenario_pren_2205() {
    let result = ok("calculate_pren", json!({ "material": "2205" }));
    let pren = result["pren"].as_f64().unwrap();
    assert!((pren - 35.0).abs() < 0.5, "PREN = {pren}");
}

#[test]
fn scenario_pourbaix_fe_active_point() {
    let result = ok(
        "generate_pourbaix",
        json!({
            "element": "Fe",
            "temperature_c": 25.0,
            "point": [7.0, -0.3]
        }),
    );
    assert_eq!(result["point"]["region"], "corrosion");
}

#[test]
fn scenario_norsok_ph_monotonicity() {
    let base = json!({
        "co2_fraction": 0.05,
        "pressure_bar": 10.0,
        "temperature_c": 40.0,
        "v_sg": 1.0,
        "v_sl": 0.5,
        "mass_g": 100.0,
        "mass_l": 500.0,
        "vol_g": 80.0,
        "vol_l": 0.5,
        "holdup": 50.0,
        "vis_g": 0.02,
        "vis_l": 1.0,
        "roughness_m": 4.5e-5,
        "diameter_m": 0.2,
        "ph_in": 5.5,
        "bicarbonate_mg_l": 0.0,
        "ionic_strength_mg_l": 5000.0,
        "calc_iterations": 2
    });
    let mut higher_ph = base.clone();
    higher_ph["ph_in"] = json!(6.0);

    let low = ok("predict_co2_h2s", base);
    let high = ok("predict_co2_h2s", higher_ph);
    let cr_low = low["corrosion_rate_mm_yr"].as_f64().unwrap();
    let cr_high = high["corrosion_rate_mm_yr"].as_f64().unwrap();
    assert!(cr_low > 0.0 && cr_low.is_finite());
    assert!(cr_high < cr_low, "pH 6.0 must yield a strictly smaller rate");
}

#[test]
fn scenario_aerated_seawater_carbon_steel() {
    let result = ok(
        "predict_aerated_chloride",
        json!({
            "temperature_c": 25.0,
            "chloride_mg_l": 19000.0,
            "ph": 8.1
        }),
    );
    let rate = result["corrosion_rate_mm_yr"].as_f64().unwrap();
    assert!(rate > 0.0 && rate.is_finite());
    assert_eq!(result["water_type"], "seawater");
}

#[test]
fn scenario_screening_ranks_by_resistance() {
    let result = ok(
        "screen_materials",
        json!({
            "environment": "seawater cooling loop",
            "candidates": ["304", "254SMO"],
            "application": "piping"
        }),
    );
    let candidates = result["candidates"].as_array().unwrap();
    let find = |name: &str| {
        candidates
            .iter()
            .find(|c| c["material"] == name)
            .unwrap_or_else(|| panic!("{name} missing"))
    };
    assert_eq!(find("304")["compatibility"], "not_recommended");
    assert_eq!(find("254SMO")["compatibility"], "marginal");
}

#[test]
fn scenario_every_result_carries_provenance() {
    for (tool, params) in [
        ("assess_galvanic", galvanic_params(1.0, 8.0)),
        (
            "assess_localized",
            json!({
                "material": "SS316",
                "temperature_c": 25.0,
                "chloride_mg_l": 19000.0,
                "ph": 8.0,
                "dissolved_oxygen_mg_l": 8.0
            }),
        ),
        ("calculate_pren", json!({ "material": "2205" })),
        ("generate_pourbaix", json!({ "element": "Fe" })),
        (
            "predict_aerated_chloride",
            json!({ "temperature_c": 25.0, "chloride_mg_l": 500.0 }),
        ),
        ("get_material_properties", json!({ "material": "HY80" })),
    ] {
        let result = ok(tool, params);
        let provenance = &result["provenance"];
        assert!(provenance["model"].is_string(), "{tool} lacks provenance.model");
        assert!(provenance["confidence"].is_string(), "{tool} lacks confidence");
    }
}
