// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Units
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Unit-carrying wrappers. Every potential is tagged with its reference
//! electrode and every temperature with its scale; the only place a number
//! changes frame is an explicit conversion call.

use serde::{Deserialize, Serialize};

use crate::constants::{CELSIUS_TO_KELVIN, E_AGAGCL_VS_SHE, E_SCE_VS_SHE};

/// Standard reference electrodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceElectrode {
    /// Standard hydrogen electrode (0 V by definition)
    She,
    /// Saturated calomel electrode (+0.241 V vs SHE)
    Sce,
    /// Ag/AgCl, saturated KCl (+0.197 V vs SHE)
    AgAgCl,
}

impl ReferenceElectrode {
    /// Offset of this electrode's zero on the SHE scale (V).
    pub fn offset_vs_she(self) -> f64 {
        match self {
            ReferenceElectrode::She => 0.0,
            ReferenceElectrode::Sce => E_SCE_VS_SHE,
            ReferenceElectrode::AgAgCl => E_AGAGCL_VS_SHE,
        }
    }
}

/// Electrode potential tagged with its reference frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Potential {
    volts: f64,
    reference: ReferenceElectrode,
}

impl Potential {
    pub fn new(volts: f64, reference: ReferenceElectrode) -> Self {
        Potential { volts, reference }
    }

    pub fn vs_she(volts: f64) -> Self {
        Potential::new(volts, ReferenceElectrode::She)
    }

    pub fn vs_sce(volts: f64) -> Self {
        Potential::new(volts, ReferenceElectrode::Sce)
    }

    pub fn volts(&self) -> f64 {
        self.volts
    }

    pub fn reference(&self) -> ReferenceElectrode {
        self.reference
    }

    /// Convert to another reference frame (linear offset).
    pub fn to(&self, reference: ReferenceElectrode) -> Potential {
        let she = self.volts + self.reference.offset_vs_she();
        Potential::new(she - reference.offset_vs_she(), reference)
    }

    /// Numeric value on the SHE scale (V).
    pub fn she_volts(&self) -> f64 {
        self.volts + self.reference.offset_vs_she()
    }

    /// Numeric value on the SCE scale (V).
    pub fn sce_volts(&self) -> f64 {
        self.she_volts() - E_SCE_VS_SHE
    }
}

/// Temperature in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Celsius(pub f64);

impl Celsius {
    pub fn kelvin(self) -> Kelvin {
        Kelvin(self.0 + CELSIUS_TO_KELVIN)
    }
}

/// Temperature in kelvin.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Kelvin(pub f64);

impl Kelvin {
    pub fn celsius(self) -> Celsius {
        Celsius(self.0 - CELSIUS_TO_KELVIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_she_sce_round_trip() {
        let e = Potential::vs_she(0.5);
        let back = e.to(ReferenceElectrode::Sce).to(ReferenceElectrode::She);
        assert!(
            (back.volts() - 0.5).abs() < 1e-6,
            "SHE→SCE→SHE must be identity to 1 µV, got {}",
            back.volts()
        );
    }

    #[test]
    fn test_sce_offset() {
        let e = Potential::vs_sce(-0.61);
        assert!((e.she_volts() - (-0.369)).abs() < 1e-9);
    }

    #[test]
    fn test_agagcl_offset() {
        let e = Potential::new(0.0, ReferenceElectrode::AgAgCl);
        assert!((e.she_volts() - 0.197).abs() < 1e-12);
    }

    #[test]
    fn test_kelvin_conversion() {
        assert!((Celsius(25.0).kelvin().0 - 298.15).abs() < 1e-12);
        assert!((Kelvin(298.15).celsius().0 - 25.0).abs() < 1e-12);
    }
}
