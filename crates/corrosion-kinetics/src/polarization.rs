// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Polarization Curves
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Sampled polarization curves and free corrosion potentials.

use corrosion_math::brent::{brent, RootError};
use corrosion_math::interp::linspace;
use corrosion_types::{CorrosionError, CorrosionResult};
use ndarray::Array1;

use crate::material::ElectrodeKinetics;

/// Widest physically sensible scan window (V vs SHE).
pub const SCAN_MIN_SHE: f64 = -2.0;
pub const SCAN_MAX_SHE: f64 = 1.5;

/// Sampled polarization curve on a SHE-scale potential grid.
#[derive(Debug, Clone)]
pub struct PolarizationCurve {
    pub potential_she: Array1<f64>,
    pub anodic_a_cm2: Array1<f64>,
    pub cathodic_a_cm2: Array1<f64>,
    pub net_a_cm2: Array1<f64>,
}

impl PolarizationCurve {
    pub fn len(&self) -> usize {
        self.potential_she.len()
    }

    pub fn is_empty(&self) -> bool {
        self.potential_she.is_empty()
    }
}

/// Sample all branches of an electrode over `grid`.
pub fn polarization_curve(
    kinetics: &ElectrodeKinetics,
    grid: &Array1<f64>,
) -> CorrosionResult<PolarizationCurve> {
    let n = grid.len();
    let mut anodic = Array1::zeros(n);
    let mut cathodic = Array1::zeros(n);
    let mut net = Array1::zeros(n);
    for (i, &e) in grid.iter().enumerate() {
        let ia = kinetics.anodic_current(e)?;
        let ic = kinetics.cathodic_current(e);
        anodic[i] = ia;
        cathodic[i] = ic;
        net[i] = ia + ic;
    }
    Ok(PolarizationCurve {
        potential_she: grid.clone(),
        anodic_a_cm2: anodic,
        cathodic_a_cm2: cathodic,
        net_a_cm2: net,
    })
}

/// Evenly spaced grid of `points` samples centred on `e_corr_she`.
pub fn centered_grid(e_corr_she: f64, span_v: f64, points: usize) -> Array1<f64> {
    linspace(e_corr_she - span_v, e_corr_she + span_v, points.max(3))
}

/// Free corrosion potential: the root of the net current over the full
/// scan window (V vs SHE).
pub fn corrosion_potential(kinetics: &ElectrodeKinetics) -> CorrosionResult<f64> {
    let f = |e: f64| kinetics.net_current(e).unwrap_or(f64::NAN);
    match brent(f, SCAN_MIN_SHE, SCAN_MAX_SHE, 1.0e-6, 100) {
        Ok(root) if root.f_x.is_finite() => Ok(root.x),
        Ok(root) => Err(CorrosionError::SolverNonConvergence {
            component: "corrosion_potential".into(),
            message: format!(
                "film correction failed during the scan for {}",
                kinetics.material.id
            ),
            lo: root.x,
            hi: root.x,
            residual: f64::NAN,
        }),
        Err(RootError::NoBracket { lo, hi, f_lo, f_hi }) => {
            Err(CorrosionError::SolverNonConvergence {
                component: "corrosion_potential".into(),
                message: format!(
                    "net current does not change sign for {}: f(lo)={f_lo:.3e}, f(hi)={f_hi:.3e}",
                    kinetics.material.id
                ),
                lo,
                hi,
                residual: f_lo.abs().min(f_hi.abs()),
            })
        }
        Err(RootError::MaxIterations { best_x, residual, .. }) => {
            Err(CorrosionError::SolverNonConvergence {
                component: "corrosion_potential".into(),
                message: format!("bisection stalled for {}", kinetics.material.id),
                lo: best_x,
                hi: best_x,
                residual,
            })
        }
    }
}
