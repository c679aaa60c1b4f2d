// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Provenance
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

/// Confidence band of a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Validated against benchmarks, error within ±30%
    High,
    /// Limited validation, error within a factor of two
    Medium,
    /// Extrapolated beyond the validation range
    Low,
    Unknown,
}

/// Provenance carried by every tool result: which model produced it, from
/// which sources, under which assumptions, with which warnings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provenance {
    pub model: String,
    pub version: String,
    pub confidence: Confidence,
    pub sources: Vec<String>,
    pub assumptions: Vec<String>,
    pub warnings: Vec<String>,
}

impl Provenance {
    pub fn new(model: impl Into<String>, confidence: Confidence) -> Self {
        Provenance {
            model: model.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            confidence,
            sources: Vec::new(),
            assumptions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.sources.push(source.into());
        self
    }

    pub fn with_assumption(mut self, assumption: impl Into<String>) -> Self {
        self.assumptions.push(assumption.into());
        self
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provenance_round_trip() {
        let p = Provenance::new("nrl_butler_volmer", Confidence::Medium)
            .with_source("ASTM G82-98")
            .with_assumption("uniform solution composition");
        let json = serde_json::to_string(&p).unwrap();
        let back: Provenance = serde_json::from_str(&json).unwrap();
        assert_eq!(back.model, "nrl_butler_volmer");
        assert_eq!(back.sources.len(), 1);
        assert_eq!(back.confidence, Confidence::Medium);
    }
}
