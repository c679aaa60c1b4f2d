// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Catalog Records
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

/// Alloy grade family, controlling threshold decay constants and rate
/// conversion defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeFamily {
    Austenitic,
    Duplex,
    SuperAustenitic,
    Nickel,
    Ferritic,
    CarbonSteel,
    Nonferrous,
}

impl GradeFamily {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "austenitic" => Some(GradeFamily::Austenitic),
            "duplex" | "super_duplex" => Some(GradeFamily::Duplex),
            "super_austenitic" | "superaustenitic" => Some(GradeFamily::SuperAustenitic),
            "nickel" | "nickel_alloy" => Some(GradeFamily::Nickel),
            "ferritic" => Some(GradeFamily::Ferritic),
            "carbon_steel" | "carbon steel" => Some(GradeFamily::CarbonSteel),
            "nonferrous" | "non_ferrous" => Some(GradeFamily::Nonferrous),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GradeFamily::Austenitic => "austenitic",
            GradeFamily::Duplex => "duplex",
            GradeFamily::SuperAustenitic => "super_austenitic",
            GradeFamily::Nickel => "nickel",
            GradeFamily::Ferritic => "ferritic",
            GradeFamily::CarbonSteel => "carbon_steel",
            GradeFamily::Nonferrous => "nonferrous",
        }
    }
}

/// One row of `materials_compositions.csv`. The single composition record
/// type in the codebase; every consumer references this definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialComposition {
    pub common_name: String,
    pub uns: String,
    pub cr_wt_pct: f64,
    pub ni_wt_pct: f64,
    pub mo_wt_pct: f64,
    pub n_wt_pct: f64,
    pub fe_bal: bool,
    pub density_kg_m3: f64,
    pub grade_type: GradeFamily,
    pub n_electrons: u32,
    pub source: String,
}

impl MaterialComposition {
    /// Pitting Resistance Equivalent Number, PREN = %Cr + 3.3·%Mo + 16·%N.
    pub fn pren(&self) -> f64 {
        self.cr_wt_pct + 3.3 * self.mo_wt_pct + 16.0 * self.n_wt_pct
    }

    /// Iron balance (wt%) when `fe_bal` is set.
    pub fn fe_wt_pct(&self) -> Option<f64> {
        self.fe_bal
            .then(|| 100.0 - self.cr_wt_pct - self.ni_wt_pct - self.mo_wt_pct - self.n_wt_pct)
    }

    pub fn density_g_cm3(&self) -> f64 {
        self.density_kg_m3 / 1000.0
    }
}

/// One row of `astm_g48_cpt_data.csv`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CptEntry {
    pub material: String,
    pub uns: String,
    pub cpt_c: f64,
    pub cct_c: f64,
    pub test_solution: String,
    pub source: String,
    pub notes: String,
}

/// One row of `astm_g82_galvanic_series.csv`. Potentials are stored vs SCE
/// as measured; the SHE column is the fixed +0.241 V offset and is checked
/// against it at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalvanicEntry {
    pub material: String,
    pub e_sce_v: f64,
    pub e_she_v: f64,
    pub activity_category: String,
    pub source: String,
    pub notes: String,
}

/// One row of `orr_diffusion_limits.csv`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrrLimitEntry {
    pub condition: String,
    pub temperature_c: f64,
    pub electrolyte: String,
    pub i_lim_a_m2: f64,
    pub i_lim_ma_cm2: f64,
    pub source: String,
    pub notes: String,
}

/// One row of `iso18070_chloride_thresholds.csv`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdEntry {
    pub material: String,
    pub uns: String,
    pub threshold_25c_mg_l: f64,
    pub ph: f64,
    pub temperature_c: f64,
    pub source: String,
    pub notes: String,
    pub resistance_category: String,
}

/// One row of `iso18070_temperature_coefficients.csv`:
/// Cl_thr(T) = Cl_thr(25) · exp(−k·(T−25)).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TempCoefficientEntry {
    pub grade_type: GradeFamily,
    pub k_per_c: f64,
    pub source: String,
    pub notes: String,
    pub formula: String,
}

/// Six fitted coefficients of a ΔG response surface, in file order
/// p00, p10, p01, p20, p11, p02. The temperature argument of the fit is
/// kelvin; evaluation lives in the kinetics crate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResponseSurfaceCoeffs {
    pub p00: f64,
    pub p10: f64,
    pub p01: f64,
    pub p20: f64,
    pub p11: f64,
    pub p02: f64,
}
