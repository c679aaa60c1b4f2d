// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Dimensionless Groups
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Re, Sc, and Sherwood correlations. The transitional pipe regime
//! (2300 ≤ Re < 10⁴) deliberately reuses the laminar value: the Colburn
//! correlation is not validated there and extrapolating it is forbidden.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Laminar/turbulent transition bounds for pipe flow.
pub const PIPE_RE_LAMINAR_MAX: f64 = 2300.0;
pub const PIPE_RE_TURBULENT_MIN: f64 = 1.0e4;
/// Laminar/turbulent transition for a flat plate.
pub const PLATE_RE_TRANSITION: f64 = 5.0e5;
/// Fully developed laminar Sherwood number (constant wall concentration).
pub const SH_FULLY_DEVELOPED: f64 = 3.66;
/// Graetz correlation validity ceiling.
pub const GRAETZ_MAX: f64 = 2000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowGeometry {
    Pipe,
    Plate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowRegime {
    Laminar,
    Transitional,
    Turbulent,
}

/// Re = ρ·v·L/μ.
pub fn reynolds(velocity_m_s: f64, length_m: f64, density_kg_m3: f64, viscosity_pa_s: f64) -> f64 {
    density_kg_m3 * velocity_m_s * length_m / viscosity_pa_s
}

/// Sc = μ/(ρ·D).
pub fn schmidt(viscosity_pa_s: f64, density_kg_m3: f64, diffusivity_m2_s: f64) -> f64 {
    viscosity_pa_s / (density_kg_m3 * diffusivity_m2_s)
}

/// Flow regime classification for a geometry.
pub fn regime(geometry: FlowGeometry, re: f64) -> FlowRegime {
    match geometry {
        FlowGeometry::Pipe => {
            if re < PIPE_RE_LAMINAR_MAX {
                FlowRegime::Laminar
            } else if re < PIPE_RE_TURBULENT_MIN {
                FlowRegime::Transitional
            } else {
                FlowRegime::Turbulent
            }
        }
        FlowGeometry::Plate => {
            if re < PLATE_RE_TRANSITION {
                FlowRegime::Laminar
            } else {
                FlowRegime::Turbulent
            }
        }
    }
}

/// Laminar pipe Sherwood number with Graetz entrance effects.
fn sherwood_laminar_pipe(re: f64, sc: f64, diameter_m: f64, length_m: f64) -> f64 {
    let gz = (diameter_m / length_m) * re * sc;
    if gz > GRAETZ_MAX {
        warn!(gz, "Graetz number above correlation ceiling; using fully developed value");
        return SH_FULLY_DEVELOPED;
    }
    if gz > 10.0 {
        let developing = 1.86 * gz.powf(1.0 / 3.0);
        return developing.max(SH_FULLY_DEVELOPED);
    }
    SH_FULLY_DEVELOPED
}

/// Sherwood number for the given geometry and regime.
///
/// Pipe: Sh = 3.66 / 1.86·Gz^(1/3) laminar, 0.023·Re^0.8·Sc^(1/3) for
/// Re ≥ 10⁴ (Chilton-Colburn); the transitional band keeps the laminar
/// value. Plate: 0.664·Re^0.5·Sc^(1/3) laminar, 0.037·Re^0.8·Sc^(1/3)
/// turbulent.
pub fn sherwood(
    geometry: FlowGeometry,
    re: f64,
    sc: f64,
    diameter_m: Option<f64>,
    length_m: Option<f64>,
) -> (f64, FlowRegime) {
    let regime = regime(geometry, re);
    let sh = match (geometry, regime) {
        (FlowGeometry::Pipe, FlowRegime::Laminar) | (FlowGeometry::Pipe, FlowRegime::Transitional) => {
            if regime == FlowRegime::Transitional {
                warn!(re, "transitional pipe flow; applying laminar correlation");
            }
            match (diameter_m, length_m) {
                (Some(d), Some(l)) => sherwood_laminar_pipe(re, sc, d, l),
                _ => SH_FULLY_DEVELOPED,
            }
        }
        (FlowGeometry::Pipe, FlowRegime::Turbulent) => 0.023 * re.powf(0.8) * sc.powf(1.0 / 3.0),
        (FlowGeometry::Plate, FlowRegime::Laminar) => 0.664 * re.sqrt() * sc.powf(1.0 / 3.0),
        (FlowGeometry::Plate, FlowRegime::Turbulent) => 0.037 * re.powf(0.8) * sc.powf(1.0 / 3.0),
        (FlowGeometry::Plate, FlowRegime::Transitional) => {
            unreachable!("regime() never returns Transitional for FlowGeometry::Plate")
        }
    };
    (sh, regime)
}
