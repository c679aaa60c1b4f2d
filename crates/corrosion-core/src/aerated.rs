// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Aerated Chloride Corrosion
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Oxygen-diffusion-limited uniform corrosion of carbon steel in aerated
//! chloride water. The limiting current comes from the tabulated catalog
//! (scaled by the DO saturation ratio off the table's temperature points)
//! or from the Sherwood pipeline when flow is supplied; Faraday's law
//! converts it to a penetration rate. No "% per °C" heuristics.

use corrosion_chemistry::oxygen::{
    do_saturation_garcia_benson, salinity_from_chloride,
};
use corrosion_data::CatalogSet;
use corrosion_transport::{limiting_current_from_flow, FlowParameters};
use corrosion_types::constants::M_FE;
use corrosion_types::{CorrosionError, CorrosionResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rates::{corrosion_rate_mm_yr, mm_yr_to_mpy};

const CARBON_STEEL_DENSITY_G_CM3: f64 = 7.85;
const N_ELECTRONS_FE: u32 = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AeratedInput {
    pub temperature_c: f64,
    pub chloride_mg_l: f64,
    #[serde(default = "default_ph")]
    pub ph: f64,
    pub dissolved_oxygen_mg_l: Option<f64>,
    /// Optional flow description; when present the limiting current comes
    /// from the Sherwood correlations instead of the catalog.
    pub flow: Option<FlowParameters>,
    #[serde(default = "default_material")]
    pub material: String,
}

fn default_ph() -> f64 {
    7.0
}
fn default_material() -> String {
    "carbon_steel".into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AeratedOutcome {
    pub corrosion_rate_mm_yr: f64,
    pub corrosion_rate_mpy: f64,
    pub limiting_current_a_m2: f64,
    pub dissolved_oxygen_mg_l: f64,
    pub water_type: String,
    pub mechanism: String,
    pub severity: String,
    pub warnings: Vec<String>,
}

fn water_type(chloride_mg_l: f64) -> &'static str {
    if chloride_mg_l > 10_000.0 {
        "seawater"
    } else if chloride_mg_l > 1000.0 {
        "brackish water"
    } else {
        "freshwater"
    }
}

pub fn predict_aerated_chloride(
    catalogs: &CatalogSet,
    input: &AeratedInput,
) -> CorrosionResult<AeratedOutcome> {
    let mut warnings = Vec::new();

    if !(0.0..=80.0).contains(&input.temperature_c) {
        return Err(CorrosionError::out_of_region(
            "aerated_chloride",
            format!("temperature {} °C outside the model range (0–80 °C)", input.temperature_c),
        ));
    }
    if input.chloride_mg_l < 0.0 {
        return Err(CorrosionError::InputValidation(
            "chloride concentration cannot be negative".into(),
        ));
    }
    if !(6.0..=9.0).contains(&input.ph) {
        warnings.push(format!(
            "pH {:.1} outside the validated range (6–9) for the ORR-limited model",
            input.ph
        ));
    }
    let material_key = input.material.to_ascii_lowercase().replace([' ', '-'], "_");
    if material_key.contains("stainless") || material_key.contains("316") {
        return Err(CorrosionError::InputValidation(format!(
            "material '{}' is outside the aerated-chloride model; stainless grades go through \
             the localized-corrosion assessment",
            input.material
        )));
    }
    if material_key != "carbon_steel" && material_key != "low_alloy" {
        warnings.push(format!(
            "material '{}' not recognized; treating as carbon steel",
            input.material
        ));
    }

    let salinity = salinity_from_chloride(input.chloride_mg_l);
    let dissolved_oxygen = match input.dissolved_oxygen_mg_l {
        Some(do_mg_l) => do_mg_l,
        None => {
            let sat = do_saturation_garcia_benson(input.temperature_c, salinity, None, 0.0);
            debug!(do_sat = sat, "air-saturated DO assumed");
            sat
        }
    };

    let electrolyte = if input.chloride_mg_l > 1000.0 { "seawater" } else { "freshwater" };
    let i_lim_a_m2 = match &input.flow {
        Some(flow) => {
            let out = limiting_current_from_flow(flow)?;
            out.i_lim_a_m2
        }
        None => {
            let entry = catalogs.orr_limit(electrolyte, input.temperature_c).ok_or_else(|| {
                CorrosionError::catalog(
                    "orr_diffusion_limits.csv",
                    format!("no tabulated ORR limit for electrolyte '{electrolyte}'"),
                )
            })?;
            // Bird-Stewart-Lightfoot: i_lim ∝ C_O2, so a reference point is
            // carried to other temperatures by the saturation ratio.
            let do_ref =
                do_saturation_garcia_benson(entry.temperature_c, salinity, None, 0.0);
            if (entry.temperature_c - input.temperature_c).abs() > 5.0 {
                warnings.push(format!(
                    "limiting current extrapolated from the {} table point by the DO ratio",
                    entry.condition
                ));
            }
            entry.i_lim_a_m2 * (dissolved_oxygen / do_ref)
        }
    };

    let i_lim_a_cm2 = i_lim_a_m2 * 1.0e-4;
    let rate = corrosion_rate_mm_yr(i_lim_a_cm2, M_FE, N_ELECTRONS_FE, CARBON_STEEL_DENSITY_G_CM3);

    let severity = if rate < 0.05 {
        "very low (<0.05 mm/yr): long-term service acceptable"
    } else if rate < 0.15 {
        "low (0.05–0.15 mm/yr): typical aerated water"
    } else if rate < 0.5 {
        "moderate (0.15–0.5 mm/yr): corrosion allowance recommended"
    } else {
        "high (>0.5 mm/yr): consider coatings or cathodic protection"
    };

    Ok(AeratedOutcome {
        corrosion_rate_mm_yr: rate,
        corrosion_rate_mpy: mm_yr_to_mpy(rate),
        limiting_current_a_m2: i_lim_a_m2,
        dissolved_oxygen_mg_l: dissolved_oxygen,
        water_type: water_type(input.chloride_mg_l).to_string(),
        mechanism: format!(
            "oxygen reduction diffusion-limited corrosion in {}",
            water_type(input.chloride_mg_l)
        ),
        severity: severity.to_string(),
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

    fn seawater() -> AeratedInput {
        AeratedInput {
            temperature_c: 25.0,
            chloride_mg_l: 19_000.0,
            ph: 8.1,
            dissolved_oxygen_mg_l: None,
            flow: None,
            material: "carbon_steel".into(),
        }
    }

    #[test]
    fn test_seawater_rate_band() {
        let cats = catalogs();
        let out = predict_aerated_chloride(&cats, &seawater()).unwrap();
        assert!(
            (0.3..3.0).contains(&out.corrosion_rate_mm_yr),
            "CR = {} mm/yr",
            out.corrosion_rate_mm_yr
        );
        assert_eq!(out.water_type, "seawater");
        assert!(out.dissolved_oxygen_mg_l > 5.0);
    }

    #[test]
    fn test_do_scaling_is_linear() {
        let cats = catalogs();
        let mut low = seawater();
        low.dissolved_oxygen_mg_l = Some(2.0);
        let mut high = seawater();
        high.dissolved_oxygen_mg_l = Some(8.0);
        let r_low = predict_aerated_chloride(&cats, &low).unwrap();
        let r_high = predict_aerated_chloride(&cats, &high).unwrap();
        let ratio = r_high.corrosion_rate_mm_yr / r_low.corrosion_rate_mm_yr;
        assert!((ratio - 4.0).abs() < 1e-6, "i_lim ∝ C_O2, got ratio {ratio}");
    }

    #[test]
    fn test_temperature_extrapolation_warns() {
        let cats = catalogs();
        let mut input = seawater();
        input.temperature_c = 50.0;
        let out = predict_aerated_chloride(&cats, &input).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("extrapolated")));
    }

    #[test]
    fn test_stainless_is_redirected() {
        let cats = catalogs();
        let mut input = seawater();
        input.material = "316L".into();
        let err = predict_aerated_chloride(&cats, &input).unwrap_err();
        assert!(err.to_string().contains("localized"));
    }

    #[test]
    fn test_out_of_range_temperature() {
        let cats = catalogs();
        let mut input = seawater();
        input.temperature_c = 95.0;
        assert!(matches!(
            predict_aerated_chloride(&cats, &input),
            Err(CorrosionError::OutOfValidatedRegion { .. })
        ));
    }
}
