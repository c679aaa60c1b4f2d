// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Tool Surface
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! The engineering tool surface: typed request records, input validation,
//! dispatch into the core, and provenance-carrying result envelopes. The
//! wire framing above this layer is external; this crate speaks plain
//! JSON records.

pub mod dispatch;
pub mod pren;
pub mod screening;

pub use dispatch::{dispatch, ToolRequest, ToolResponse};
