// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Limiting Current
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Flow conditions → mass transfer coefficient → ORR limiting current.

use corrosion_types::constants::{F, Z_ORR};
use corrosion_types::{CorrosionError, CorrosionResult};
use serde::{Deserialize, Serialize};

use crate::dimensionless::{reynolds, schmidt, sherwood, FlowGeometry, FlowRegime};

/// Bulk flow description for the limiting-current pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowParameters {
    pub geometry: FlowGeometry,
    pub velocity_m_s: f64,
    /// Pipe diameter (m); required for pipes.
    pub diameter_m: Option<f64>,
    /// Pipe/plate length (m).
    pub length_m: Option<f64>,
    pub density_kg_m3: f64,
    pub viscosity_pa_s: f64,
    /// O₂ diffusivity (m²/s)
    pub diffusivity_m2_s: f64,
    /// Dissolved O₂ (mol/m³)
    pub oxygen_mol_m3: f64,
}

/// Result of the integrated flow → i_lim computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitingCurrent {
    pub reynolds: f64,
    pub schmidt: f64,
    pub sherwood: f64,
    pub regime: FlowRegime,
    /// Mass transfer coefficient (m/s)
    pub k_l_m_s: f64,
    /// Limiting current density (A/m²)
    pub i_lim_a_m2: f64,
}

impl LimitingCurrent {
    pub fn i_lim_a_cm2(&self) -> f64 {
        self.i_lim_a_m2 * 1.0e-4
    }
}

/// i_lim = n·F·k_L·C with k_L = Sh·D/L.
pub fn limiting_current(k_l_m_s: f64, oxygen_mol_m3: f64, n_electrons: u32) -> f64 {
    n_electrons as f64 * F * k_l_m_s * oxygen_mol_m3
}

/// End-to-end: Re and Sc, a geometry/regime-matched Sherwood number, then
/// k_L and the ORR limiting current.
pub fn limiting_current_from_flow(flow: &FlowParameters) -> CorrosionResult<LimitingCurrent> {
    let char_length = match flow.geometry {
        FlowGeometry::Pipe => flow.diameter_m.ok_or_else(|| {
            CorrosionError::InputValidation(
                "pipe geometry requires diameter_m as the characteristic length".into(),
            )
        })?,
        FlowGeometry::Plate => flow.length_m.ok_or_else(|| {
            CorrosionError::InputValidation(
                "plate geometry requires length_m as the characteristic length".into(),
            )
        })?,
    };
    if flow.velocity_m_s <= 0.0 {
        return Err(CorrosionError::InputValidation(format!(
            "velocity must be positive, got {} m/s",
            flow.velocity_m_s
        )));
    }

    let re = reynolds(flow.velocity_m_s, char_length, flow.density_kg_m3, flow.viscosity_pa_s);
    let sc = schmidt(flow.viscosity_pa_s, flow.density_kg_m3, flow.diffusivity_m2_s);
    let (sh, regime) = sherwood(flow.geometry, re, sc, flow.diameter_m, flow.length_m);
    let k_l = sh * flow.diffusivity_m2_s / char_length;
    let i_lim = limiting_current(k_l, flow.oxygen_mol_m3, Z_ORR);

    Ok(LimitingCurrent {
        reynolds: re,
        schmidt: sc,
        sherwood: sh,
        regime,
        k_l_m_s: k_l,
        i_lim_a_m2: i_lim,
    })
}

/// Temperature extrapolation for a tabulated limit: scale by the DO
/// saturation ratio (i_lim ∝ C_O2 at weakly temperature-dependent k_L).
pub fn scale_limit_by_oxygen(i_lim_ref_a_m2: f64, c_o2_ref: f64, c_o2: f64) -> f64 {
    if c_o2_ref <= 0.0 {
        return i_lim_ref_a_m2;
    }
    i_lim_ref_a_m2 * (c_o2 / c_o2_ref)
}
