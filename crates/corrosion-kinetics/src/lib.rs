// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Reaction Kinetics
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Electrochemical kinetics: the ΔG response-surface evaluator,
//! Butler-Volmer reaction branches with diffusion limits, the NRL material
//! catalog, and polarization curve assembly.

pub mod material;
pub mod polarization;
pub mod reaction;
pub mod response_surface;

pub use material::{Conditions, ElectrodeKinetics, NrlMaterial};
pub use polarization::PolarizationCurve;
pub use reaction::{AnodicKind, AnodicReaction, CathodicKind, CathodicReaction};
