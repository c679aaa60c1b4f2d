// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Solution Chemistry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Aqueous solution chemistry: oxygen solubility, NaCl electrolyte
//! properties, and redox-state conversions.

pub mod nacl;
pub mod oxygen;
pub mod redox;

pub use nacl::NaClSolution;
pub use redox::RedoxState;
