// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Error
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorrosionError {
    #[error("invalid input: {0}")]
    InputValidation(String),

    #[error("out of validated region at {component}: {message}")]
    OutOfValidatedRegion { component: String, message: String },

    #[error("solver failed to converge at {component}: {message} (bracket [{lo:.4}, {hi:.4}] V, residual {residual:.3e})")]
    SolverNonConvergence {
        component: String,
        message: String,
        lo: f64,
        hi: f64,
        residual: f64,
    },

    /// Internal signal only. Tool calls never fail with this kind; the
    /// pitting assessor converts it into a self-describing Tier-2
    /// explanation while Tier 1 returns normally.
    #[error("tier 2 unavailable: {0}")]
    Tier2Unavailable(String),

    #[error("catalog load failed for {path}: {message}")]
    CatalogLoad { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CorrosionError {
    pub fn out_of_region(component: impl Into<String>, message: impl Into<String>) -> Self {
        CorrosionError::OutOfValidatedRegion {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn catalog(path: impl Into<String>, message: impl Into<String>) -> Self {
        CorrosionError::CatalogLoad {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type CorrosionResult<T> = Result<T, CorrosionError>;
