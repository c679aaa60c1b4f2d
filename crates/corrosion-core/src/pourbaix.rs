// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Pourbaix Evaluator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Simplified E-pH stability diagrams for Fe, Cr, Ni, Cu, Ti, Al.
//!
//! Nernst lines between tabulated metal/ion/oxide couples, the water
//! stability window, and grid classification into immunity, passivation,
//! and corrosion. Ideal activities, no complex species, no speciation:
//! an engineering estimate, never PHREEQC-grade geochemistry.

use corrosion_math::interp::interp1;
use corrosion_types::constants::{F, R};
use corrosion_types::{CorrosionError, CorrosionResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub const ESTIMATE_NOTE: &str = "simplified thermodynamic estimate (unit activities, no complex \
     species); not a substitute for full speciation modeling";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Immunity,
    Passivation,
    Corrosion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoundaryKind {
    /// Metal ⇌ dissolved ion; below it the metal is immune.
    MetalIon,
    /// Dissolved ion ⇌ oxide; above it the oxide (passive film) holds.
    IonOxide,
}

/// One equilibrium line of an element's diagram.
struct ReactionLine {
    kind: BoundaryKind,
    equation: &'static str,
    /// Standard potential (V vs SHE); None for pure chemical equilibria
    /// handled by the oxide estimate.
    e0_v_she: Option<f64>,
    electrons: u32,
    protons: u32,
}

fn element_reactions(element: &str) -> Option<&'static [ReactionLine]> {
    match element {
        "Fe" => Some(&[
            ReactionLine {
                kind: BoundaryKind::MetalIon,
                equation: "Fe = Fe2+ + 2e-",
                e0_v_she: Some(-0.447),
                electrons: 2,
                protons: 0,
            },
            ReactionLine {
                kind: BoundaryKind::IonOxide,
                equation: "3Fe2+ + 4H2O = Fe3O4 + 8H+ + 2e-",
                e0_v_she: Some(0.98),
                electrons: 2,
                protons: 8,
            },
        ]),
        "Cr" => Some(&[
            ReactionLine {
                kind: BoundaryKind::MetalIon,
                equation: "Cr = Cr3+ + 3e-",
                e0_v_she: Some(-0.744),
                electrons: 3,
                protons: 0,
            },
            ReactionLine {
                kind: BoundaryKind::IonOxide,
                equation: "2Cr3+ + 3H2O = Cr2O3 + 6H+",
                e0_v_she: None,
                electrons: 1,
                protons: 6,
            },
        ]),
        "Ni" => Some(&[
            ReactionLine {
                kind: BoundaryKind::MetalIon,
                equation: "Ni = Ni2+ + 2e-",
                e0_v_she: Some(-0.257),
                electrons: 2,
                protons: 0,
            },
            ReactionLine {
                kind: BoundaryKind::IonOxide,
                equation: "Ni2+ + 2H2O = Ni(OH)2 + 2H+",
                e0_v_she: None,
                electrons: 1,
                protons: 2,
            },
        ]),
        "Cu" => Some(&[
            ReactionLine {
                kind: BoundaryKind::MetalIon,
                equation: "Cu = Cu2+ + 2e-",
                e0_v_she: Some(0.340),
                electrons: 2,
                protons: 0,
            },
            ReactionLine {
                kind: BoundaryKind::IonOxide,
                equation: "2Cu2+ + H2O = Cu2O + 2H+",
                e0_v_she: Some(0.203),
                electrons: 2,
                protons: 2,
            },
        ]),
        "Ti" => Some(&[
            ReactionLine {
                kind: BoundaryKind::MetalIon,
                equation: "Ti = Ti3+ + 3e-",
                e0_v_she: Some(-1.630),
                electrons: 3,
                protons: 0,
            },
            ReactionLine {
                kind: BoundaryKind::IonOxide,
                equation: "Ti3+ + 2H2O = TiO2 + 4H+ + e-",
                e0_v_she: None,
                electrons: 1,
                protons: 4,
            },
        ]),
        "Al" => Some(&[
            ReactionLine {
                kind: BoundaryKind::MetalIon,
                equation: "Al = Al3+ + 3e-",
                e0_v_she: Some(-1.662),
                electrons: 3,
                protons: 0,
            },
            ReactionLine {
                kind: BoundaryKind::IonOxide,
                equation: "2Al3+ + 3H2O = Al2O3 + 6H+",
                e0_v_she: None,
                electrons: 1,
                protons: 6,
            },
        ]),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PourbaixInput {
    pub element: String,
    #[serde(default = "default_temperature")]
    pub temperature_c: f64,
    #[serde(default = "default_concentration")]
    pub soluble_concentration_m: f64,
    #[serde(default = "default_ph_range")]
    pub ph_range: (f64, f64),
    #[serde(default = "default_e_range")]
    pub e_range_v_she: (f64, f64),
    #[serde(default = "default_grid_points")]
    pub grid_points: usize,
    /// Optional (pH, E vs SHE) point to classify.
    pub point: Option<(f64, f64)>,
}

fn default_temperature() -> f64 {
    25.0
}
fn default_concentration() -> f64 {
    1.0e-6
}
fn default_ph_range() -> (f64, f64) {
    (0.0, 14.0)
}
fn default_e_range() -> (f64, f64) {
    (-2.0, 2.0)
}
fn default_grid_points() -> usize {
    50
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryLine {
    pub kind: String,
    pub equation: String,
    /// (pH, E vs SHE) polyline
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterLines {
    pub h2_evolution: Vec<(f64, f64)>,
    pub o2_evolution: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointClassification {
    pub ph: f64,
    pub e_v_she: f64,
    pub region: Region,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PourbaixOutcome {
    pub element: String,
    pub temperature_c: f64,
    pub soluble_concentration_m: f64,
    pub ph_grid: Vec<f64>,
    pub e_grid_v_she: Vec<f64>,
    /// Region per (E row, pH column)
    pub region_grid: Vec<Vec<Region>>,
    pub boundaries: Vec<BoundaryLine>,
    pub water_lines: WaterLines,
    pub point: Option<PointClassification>,
    pub note: String,
}

struct Boundaries {
    ph: Vec<f64>,
    metal_ion_e: Vec<f64>,
    ion_oxide_e: Vec<f64>,
}

impl Boundaries {
    fn classify(&self, ph: f64, e: f64) -> Region {
        let immunity_e = interp1(&self.ph, &self.metal_ion_e, ph);
        if e < immunity_e {
            return Region::Immunity;
        }
        let oxide_e = interp1(&self.ph, &self.ion_oxide_e, ph);
        if e >= immunity_e && e < oxide_e {
            return Region::Passivation;
        }
        Region::Corrosion
    }
}

fn boundary_potential(
    line: &ReactionLine,
    ph: f64,
    t_k: f64,
    soluble_conc_m: f64,
) -> f64 {
    let nernst = R * t_k / F;
    match line.kind {
        BoundaryKind::MetalIon => {
            // E = E° + (RT/nF)·ln[Mⁿ⁺], horizontal in pH.
            line.e0_v_she.unwrap_or(0.0) + nernst / line.electrons as f64 * soluble_conc_m.ln()
        }
        BoundaryKind::IonOxide => match line.e0_v_she {
            Some(e0) => {
                e0 - nernst * (line.protons as f64 / line.electrons as f64) * 2.303 * ph
            }
            // Oxide stability estimate for pure chemical equilibria.
            None => -0.059 * ph + 0.5,
        },
    }
}

/// Evaluate the diagram.
pub fn generate_pourbaix(input: &PourbaixInput) -> CorrosionResult<PourbaixOutcome> {
    let reactions = element_reactions(&input.element).ok_or_else(|| {
        CorrosionError::InputValidation(format!(
            "element '{}' not supported (Fe, Cr, Ni, Cu, Ti, Al)",
            input.element
        ))
    })?;
    if !(0.0..=100.0).contains(&input.temperature_c) {
        return Err(CorrosionError::InputValidation(format!(
            "temperature {} °C out of range (0–100 °C)",
            input.temperature_c
        )));
    }
    if input.soluble_concentration_m <= 0.0 {
        return Err(CorrosionError::InputValidation(
            "soluble concentration must be positive".into(),
        ));
    }
    let (ph_lo, ph_hi) = input.ph_range;
    let (e_lo, e_hi) = input.e_range_v_she;
    if !(0.0..=14.0).contains(&ph_lo) || !(0.0..=14.0).contains(&ph_hi) || ph_lo >= ph_hi {
        return Err(CorrosionError::InputValidation(format!(
            "invalid pH range ({ph_lo}, {ph_hi})"
        )));
    }
    if e_lo >= e_hi || e_lo < -3.0 || e_hi > 3.0 {
        return Err(CorrosionError::InputValidation(format!(
            "invalid potential range ({e_lo}, {e_hi}) V"
        )));
    }
    let n = input.grid_points.clamp(10, 200);
    let t_k = input.temperature_c + 273.15;

    let ph_grid: Vec<f64> = (0..n)
        .map(|i| ph_lo + (ph_hi - ph_lo) * i as f64 / (n - 1) as f64)
        .collect();
    let e_grid: Vec<f64> = (0..n)
        .map(|i| e_lo + (e_hi - e_lo) * i as f64 / (n - 1) as f64)
        .collect();

    // Boundary polylines.
    let mut boundaries = Vec::new();
    let mut metal_ion_e = Vec::new();
    let mut ion_oxide_e = Vec::new();
    for line in reactions {
        let points: Vec<(f64, f64)> = ph_grid
            .iter()
            .map(|&ph| (ph, boundary_potential(line, ph, t_k, input.soluble_concentration_m)))
            .collect();
        match line.kind {
            BoundaryKind::MetalIon => metal_ion_e = points.iter().map(|p| p.1).collect(),
            BoundaryKind::IonOxide => ion_oxide_e = points.iter().map(|p| p.1).collect(),
        }
        boundaries.push(BoundaryLine {
            kind: match line.kind {
                BoundaryKind::MetalIon => "immunity_corrosion".into(),
                BoundaryKind::IonOxide => "corrosion_passivation".into(),
            },
            equation: line.equation.to_string(),
            points,
        });
    }
    let bounds = Boundaries { ph: ph_grid.clone(), metal_ion_e, ion_oxide_e };

    // Region grid, rows classified in parallel.
    let rows: Vec<Vec<Region>> = e_grid
        .par_iter()
        .map(|&e| ph_grid.iter().map(|&ph| bounds.classify(ph, e)).collect())
        .collect();

    // Water stability window.
    let nernst_ph = 2.303 * R * t_k / F;
    let water_lines = WaterLines {
        h2_evolution: ph_grid.iter().map(|&ph| (ph, -nernst_ph * ph)).collect(),
        o2_evolution: ph_grid.iter().map(|&ph| (ph, 1.229 - nernst_ph * ph)).collect(),
    };

    let point = input.point.map(|(ph, e)| PointClassification {
        ph,
        e_v_she: e,
        region: bounds.classify(ph, e),
    });

    Ok(PourbaixOutcome {
        element: input.element.clone(),
        temperature_c: input.temperature_c,
        soluble_concentration_m: input.soluble_concentration_m,
        ph_grid,
        e_grid_v_she: e_grid,
        region_grid: rows,
        boundaries,
        water_lines,
        point,
        note: ESTIMATE_NOTE.to_string(),
    })
}
