// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Mass Transfer
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Sherwood-correlation mass transfer: dimensionless groups, geometry- and
//! regime-specific correlations, and diffusion-limited current densities
//! for flowing systems.

pub mod dimensionless;
pub mod limiting;

pub use dimensionless::{reynolds, schmidt, sherwood, FlowGeometry, FlowRegime};
pub use limiting::{limiting_current_from_flow, FlowParameters, LimitingCurrent};
