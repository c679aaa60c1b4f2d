// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Shared types for the corrosion prediction engine: physical constants,
//! reference-electrode-tagged potentials, the error enum, provenance
//! metadata, and engine configuration.

pub mod config;
pub mod constants;
pub mod error;
pub mod provenance;
pub mod units;

pub use error::{CorrosionError, CorrosionResult};
pub use units::{Celsius, Kelvin, Potential, ReferenceElectrode};
