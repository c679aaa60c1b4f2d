// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Engine
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! The prediction engine proper: mixed-potential galvanic solver,
//! dual-tier localized-corrosion assessor, Pourbaix evaluator, the NORSOK
//! M-506 CO₂/H₂S model, and the aerated-chloride rate model.

pub mod aerated;
pub mod galvanic;
pub mod norsok;
pub mod pitting;
pub mod pourbaix;
pub mod rates;

pub use galvanic::{assess_galvanic, GalvanicInput, GalvanicOutcome, Severity};
pub use pitting::{assess_localized, LocalizedInput, LocalizedOutcome, RiskLevel};
pub use pourbaix::{generate_pourbaix, PourbaixInput, PourbaixOutcome, Region};
