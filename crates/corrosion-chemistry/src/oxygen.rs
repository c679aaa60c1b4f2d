// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Oxygen Solubility
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Dissolved-oxygen saturation from temperature, salinity, and pressure.
//!
//! Garcia & Gordon (1992) is the default model; Weiss (1970) is kept for
//! cross-checks. Pressure correction follows the USGS memo form with the
//! Antoine vapor-pressure equation.

use corrosion_types::constants::{SEAWATER_CL_MG_L, SEAWATER_SALINITY_PSU};

/// mg/L per mL/L of O₂ at STP (USGS memo 2011.03)
const MGL_PER_MLL: f64 = 1.429_05;
const MMHG_PER_MB: f64 = 0.750_061_683;
const STANDARD_PRESSURE_MMHG: f64 = 760.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaturationModel {
    GarciaBenson,
    Weiss,
}

/// DO saturation (mg/L) with the selected model.
pub fn do_saturation(
    model: SaturationModel,
    temperature_c: f64,
    salinity_psu: f64,
    pressure_mbar: Option<f64>,
    altitude_m: f64,
) -> f64 {
    match model {
        SaturationModel::GarciaBenson => {
            do_saturation_garcia_benson(temperature_c, salinity_psu, pressure_mbar, altitude_m)
        }
        SaturationModel::Weiss => {
            do_saturation_weiss(temperature_c, salinity_psu, pressure_mbar, altitude_m)
        }
    }
}

/// Garcia & Gordon (1992) combined fit, mg/L.
pub fn do_saturation_garcia_benson(
    temperature_c: f64,
    salinity_psu: f64,
    pressure_mbar: Option<f64>,
    altitude_m: f64,
) -> f64 {
    // Scaled temperature per Garcia & Gordon (1992)
    let ts = ((298.15 - temperature_c) / (273.15 + temperature_c)).ln();

    const A0: f64 = 2.00907;
    const A1: f64 = 3.22014;
    const A2: f64 = 4.05010;
    const A3: f64 = 4.94457;
    const A4: f64 = -0.256847;
    const A5: f64 = 3.88767;
    const B0: f64 = -6.24523e-3;
    const B1: f64 = -7.37614e-3;
    const B2: f64 = -1.03410e-2;
    const B3: f64 = -8.17083e-3;
    const C0: f64 = -4.88682e-7;

    let ln_c = A0
        + A1 * ts
        + A2 * ts.powi(2)
        + A3 * ts.powi(3)
        + A4 * ts.powi(4)
        + A5 * ts.powi(5)
        + salinity_psu * (B0 + B1 * ts + B2 * ts.powi(2) + B3 * ts.powi(3))
        + C0 * salinity_psu.powi(2);

    ln_c.exp() * MGL_PER_MLL * pressure_correction(temperature_c, pressure_mbar, altitude_m)
}

/// Weiss (1970) fit, mg/L.
pub fn do_saturation_weiss(
    temperature_c: f64,
    salinity_psu: f64,
    pressure_mbar: Option<f64>,
    altitude_m: f64,
) -> f64 {
    let t_k = temperature_c + 273.15;
    let t_scaled = t_k / 100.0;

    const A1: f64 = -173.4292;
    const A2: f64 = 249.6339;
    const A3: f64 = 143.3483;
    const A4: f64 = -21.8492;
    const B1: f64 = -0.033096;
    const B2: f64 = 0.014259;
    const B3: f64 = -0.0017000;

    let ln_c = A1
        + A2 * (100.0 / t_k)
        + A3 * t_scaled.ln()
        + A4 * t_scaled
        + salinity_psu * (B1 + B2 * t_scaled + B3 * t_scaled.powi(2));

    ln_c.exp() * MGL_PER_MLL * pressure_correction(temperature_c, pressure_mbar, altitude_m)
}

/// Pressure correction factor per USGS memos 81.11/81.15. If no barometric
/// pressure is given it is estimated from altitude with the barometric
/// formula.
fn pressure_correction(temperature_c: f64, pressure_mbar: Option<f64>, altitude_m: f64) -> f64 {
    let pressure_mmhg = match pressure_mbar {
        Some(p) => p * MMHG_PER_MB,
        None => {
            const MMHG_PER_INHG: f64 = 25.397_088_6;
            const STANDARD_PRESSURE_INHG: f64 = 29.921_26;
            const STANDARD_TEMP_K: f64 = 288.15;
            const GRAV_ACCEL: f64 = 9.806_65;
            const AIR_MOLAR_MASS: f64 = 0.028_964_4;
            const GAS_CONSTANT: f64 = 8.314_47;

            MMHG_PER_INHG
                * STANDARD_PRESSURE_INHG
                * ((-GRAV_ACCEL * AIR_MOLAR_MASS * altitude_m)
                    / (GAS_CONSTANT * STANDARD_TEMP_K))
                    .exp()
        }
    };

    // Antoine equation for water vapor pressure (mm Hg)
    let u_mmhg = 10.0_f64.powf(8.10765 - 1750.286 / (235.0 + temperature_c));

    (pressure_mmhg - u_mmhg) / (STANDARD_PRESSURE_MMHG - u_mmhg)
}

/// Salinity (PSU) estimated from chloride by the constant-composition ratio
/// of standard seawater.
pub fn salinity_from_chloride(chloride_mg_l: f64) -> f64 {
    (chloride_mg_l / SEAWATER_CL_MG_L) * SEAWATER_SALINITY_PSU
}

/// Salinity (PSU) estimated from total dissolved solids.
pub fn salinity_from_tds(tds_mg_l: f64) -> f64 {
    tds_mg_l / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garcia_benson_freshwater_25c() {
        let sat = do_saturation_garcia_benson(25.0, 0.0, None, 0.0);
        assert!((sat - 8.26).abs() < 0.1, "expected ~8.26 mg/L, got {sat}");
    }

    #[test]
    fn test_garcia_benson_seawater_25c() {
        let sat = do_saturation_garcia_benson(25.0, 35.0, None, 0.0);
        assert!((sat - 6.7).abs() < 0.3, "expected ~6.7 mg/L, got {sat}");
    }

    #[test]
    fn test_weiss_close_to_garcia_benson() {
        for t in [5.0, 15.0, 25.0, 35.0] {
            let gb = do_saturation_garcia_benson(t, 0.0, None, 0.0);
            let w = do_saturation_weiss(t, 0.0, None, 0.0);
            assert!(
                (gb - w).abs() / gb < 0.02,
                "models disagree by >2% at {t} °C: {gb} vs {w}"
            );
        }
    }

    #[test]
    fn test_solubility_decreases_with_temperature() {
        let cold = do_saturation_garcia_benson(5.0, 0.0, None, 0.0);
        let warm = do_saturation_garcia_benson(35.0, 0.0, None, 0.0);
        assert!(cold > warm);
    }

    #[test]
    fn test_altitude_lowers_saturation() {
        let sea = do_saturation_garcia_benson(25.0, 0.0, None, 0.0);
        let alpine = do_saturation_garcia_benson(25.0, 0.0, None, 2500.0);
        assert!(alpine < sea);
    }

    #[test]
    fn test_salinity_from_seawater_chloride() {
        assert!((salinity_from_chloride(19_354.0) - 35.0).abs() < 1e-9);
        assert!(salinity_from_chloride(100.0) < 0.2);
    }
}
