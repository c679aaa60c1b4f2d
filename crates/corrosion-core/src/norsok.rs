// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — NORSOK M-506
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! CO₂/H₂S corrosion of carbon steel per NORSOK M-506:
//! CR = Kt·fCO₂^0.62·(τ/19)^(0.146 + 0.0324·log₁₀ fCO₂)·fpH.
//!
//! Two pH paths: a supplied pH (> 0) bypasses the chemistry and feeds the
//! equation directly; pH_in ≤ 0 runs the carbonate pH calculator, where
//! `calc_iterations` is an integer loop count (1 = unsaturated water,
//! 2 = FeCO₃-saturated). The pH correction table accepts pH ∈ [3.5, 6.5]
//! and T ∈ [5, 150 °C]; values outside are clamped with a warning.

use corrosion_math::interp::interp1;
use corrosion_types::{CorrosionError, CorrosionResult};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Temperature grid of the Kt table and the fpH fixed-temperature forms (°C).
const T_GRID: [f64; 9] = [5.0, 15.0, 20.0, 40.0, 60.0, 80.0, 90.0, 120.0, 150.0];

/// Temperature constant Kt per NORSOK M-506.
const KT_TABLE: [f64; 9] = [0.42, 1.59, 4.762, 8.927, 10.695, 9.949, 6.250, 7.770, 5.203];

pub const PH_MIN: f64 = 3.5;
pub const PH_MAX: f64 = 6.5;

/// The full 18-parameter NORSOK invocation record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NorsokInput {
    pub co2_fraction: f64,
    pub pressure_bar: f64,
    pub temperature_c: f64,
    /// Superficial gas velocity (m/s)
    pub v_sg: f64,
    /// Superficial liquid velocity (m/s)
    pub v_sl: f64,
    /// Gas mass flow (kg/hr)
    pub mass_g: f64,
    /// Liquid mass flow (kg/hr)
    pub mass_l: f64,
    /// Gas volumetric flow (m³/hr)
    pub vol_g: f64,
    /// Liquid volumetric flow (m³/hr)
    pub vol_l: f64,
    /// Liquid holdup (%)
    pub holdup: f64,
    /// Gas viscosity (cP)
    pub vis_g: f64,
    /// Liquid viscosity (cP)
    pub vis_l: f64,
    /// Pipe roughness (m)
    pub roughness_m: f64,
    /// Pipe internal diameter (m)
    pub diameter_m: f64,
    /// Supplied pH; ≤ 0 requests the pH calculator
    pub ph_in: f64,
    pub bicarbonate_mg_l: f64,
    pub ionic_strength_mg_l: f64,
    /// pH calculator loop count: 1 = unsaturated, 2 = FeCO₃-saturated
    pub calc_iterations: u32,
    #[serde(default)]
    pub h2s_fraction: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NorsokOutcome {
    pub corrosion_rate_mm_yr: f64,
    pub corrosion_rate_mpy: f64,
    pub ph_used: f64,
    pub co2_fugacity_bar: f64,
    pub shear_stress_pa: f64,
    pub kt: f64,
    pub fph: f64,
    pub mechanism: String,
    pub severity: String,
    pub warnings: Vec<String>,
}

/// Temperature constant Kt, linearly interpolated on the table.
pub fn kt(temperature_c: f64) -> f64 {
    interp1(&T_GRID, &KT_TABLE, temperature_c)
}

/// fpH at one of the table's fixed temperatures (Table A.1 forms).
fn fph_fixed(t_index: usize, ph: f64) -> f64 {
    match t_index {
        // 5 °C
        0 => {
            if ph < 4.6 {
                2.0676 - 0.2309 * ph
            } else {
                4.342 - 1.051 * ph + 0.0708 * ph * ph
            }
        }
        // 15 °C
        1 => {
            if ph < 4.6 {
                2.0676 - 0.2309 * ph
            } else {
                4.986 - 1.191 * ph + 0.0708 * ph * ph
            }
        }
        // 20 and 40 °C share the form
        2 | 3 => {
            if ph < 4.6 {
                2.0676 - 0.2309 * ph
            } else {
                5.1885 - 1.2353 * ph + 0.0708 * ph * ph
            }
        }
        // 60 °C
        4 => {
            if ph < 4.6 {
                1.836 - 0.1818 * ph
            } else {
                15.444 - 6.1291 * ph + 0.8204 * ph * ph - 0.0371 * ph * ph * ph
            }
        }
        // 80 °C
        5 => {
            if ph < 4.6 {
                2.6727 - 0.3636 * ph
            } else {
                331.68 * (-1.2618 * ph).exp()
            }
        }
        // 90 °C
        6 => {
            if ph < 4.57 {
                3.1355 - 0.4673 * ph
            } else if ph < 5.62 {
                21_254.0 * (-2.1811 * ph).exp()
            } else {
                0.4014 - 0.0538 * ph
            }
        }
        // 120 °C
        7 => {
            if ph < 4.3 {
                1.5375 - 0.125 * ph
            } else if ph < 5.0 {
                5.9757 - 1.157 * ph
            } else {
                0.546125 - 0.071225 * ph
            }
        }
        // 150 °C
        _ => {
            if ph < 3.8 {
                1.0
            } else if ph < 5.0 {
                17.634 - 7.0945 * ph + 0.715 * ph * ph
            } else {
                0.037
            }
        }
    }
}

/// pH correction factor with temperature interpolation between the fixed
/// forms. pH outside [3.5, 6.5] is clamped with a warning; temperature
/// outside [5, 150 °C] is an error.
pub fn fph(temperature_c: f64, ph: f64, warnings: &mut Vec<String>) -> CorrosionResult<f64> {
    if !(5.0..=150.0).contains(&temperature_c) {
        return Err(CorrosionError::out_of_region(
            "norsok",
            format!("temperature {temperature_c} °C outside NORSOK M-506 range (5–150 °C)"),
        ));
    }
    let ph = if ph < PH_MIN {
        warn!(ph, "pH below NORSOK table, clamping to 3.5");
        warnings.push(format!("pH {ph:.2} below the NORSOK table minimum; clamped to 3.5"));
        PH_MIN
    } else if ph > PH_MAX {
        warn!(ph, "pH above NORSOK table, clamping to 6.5");
        warnings.push(format!("pH {ph:.2} above the NORSOK table maximum; clamped to 6.5"));
        PH_MAX
    } else {
        ph
    };

    let hi = T_GRID.partition_point(|&t| t <= temperature_c).min(T_GRID.len() - 1);
    let lo = hi.saturating_sub(1);
    if lo == hi || (T_GRID[lo] - temperature_c).abs() < 1e-12 {
        return Ok(fph_fixed(lo, ph));
    }
    let f_lo = fph_fixed(lo, ph);
    let f_hi = fph_fixed(hi, ph);
    let t = (temperature_c - T_GRID[lo]) / (T_GRID[hi] - T_GRID[lo]);
    Ok(f_lo + t * (f_hi - f_lo))
}

/// CO₂ fugacity (bar): fCO₂ = y·P·a with a = 10^(P·(0.0031 − 1.4/T_K)).
pub fn co2_fugacity(co2_fraction: f64, pressure_bar: f64, temperature_c: f64) -> f64 {
    let t_k = temperature_c + 273.15;
    let a = 10.0_f64.powf(pressure_bar * (0.0031 - 1.4 / t_k));
    co2_fraction * pressure_bar * a
}

/// Wall shear stress (Pa) of the gas/liquid mixture.
pub fn shear_stress(input: &NorsokInput) -> CorrosionResult<f64> {
    if input.vol_g <= 0.0 || input.vol_l <= 0.0 {
        return Err(CorrosionError::InputValidation(
            "gas and liquid volumetric flows must be positive".into(),
        ));
    }
    let rho_g = input.mass_g / input.vol_g; // kg/m³
    let rho_l = input.mass_l / input.vol_l;
    let lambda = (input.holdup / 100.0).clamp(0.0, 1.0);
    let rho_m = rho_l * lambda + rho_g * (1.0 - lambda);
    let mu_m = (input.vis_l * lambda + input.vis_g * (1.0 - lambda)) * 1.0e-3; // cP → Pa·s
    let u_m = input.v_sg + input.v_sl;
    if u_m <= 0.0 || rho_m <= 0.0 {
        return Err(CorrosionError::InputValidation(
            "mixture velocity and density must be positive".into(),
        ));
    }

    let friction = 0.001375
        * (1.0
            + (20_000.0 * input.roughness_m / input.diameter_m
                + 1.0e6 * mu_m / (rho_m * u_m * input.diameter_m))
                .powf(0.33));
    Ok(0.5 * rho_m * friction * u_m * u_m)
}

/// In-situ pH from the carbonate system. Iteration 1 treats the water as
/// unsaturated; further iterations move to the FeCO₃-saturated curve.
pub fn ph_calculator(
    temperature_c: f64,
    co2_fugacity_bar: f64,
    bicarbonate_mg_l: f64,
    ionic_strength_mg_l: f64,
    calc_iterations: u32,
) -> f64 {
    let t_k = temperature_c + 273.15;
    // Henry constant for CO₂, van 't Hoff-scaled from 25 °C.
    let k_h = 0.034 * (2400.0 * (1.0 / t_k - 1.0 / 298.15)).exp(); // mol/(L·bar)
    let k1 = 10.0_f64.powf(-(6.35 - 0.002 * (temperature_c - 25.0)));
    // Ionic-strength activity correction raises the effective K1.
    let i_molar = (ionic_strength_mg_l / 58_440.0).max(0.0);
    let k1 = k1 * (1.0 + 0.5 * i_molar.sqrt());
    let c_co2 = (k_h * co2_fugacity_bar).max(1.0e-12);

    // Charge balance with fixed alkalinity: [H⁺]² + Alk·[H⁺] − K1·cCO₂ = 0.
    let alk = bicarbonate_mg_l / 61_017.0; // mg/L HCO₃⁻ → mol/L
    let h = (-alk + (alk * alk + 4.0 * k1 * c_co2).sqrt()) / 2.0;
    let mut ph = -h.log10();

    for _ in 1..calc_iterations.max(1) {
        // FeCO₃ saturation raises the pH toward the saturated-water curve.
        let ph_saturated = 5.4 - 0.66 * co2_fugacity_bar.log10();
        ph = ph.max(ph_saturated);
    }
    ph
}

fn validate(input: &NorsokInput) -> CorrosionResult<()> {
    if !(5.0..=150.0).contains(&input.temperature_c) {
        return Err(CorrosionError::out_of_region(
            "norsok",
            format!(
                "temperature {} °C outside NORSOK M-506 range (5–150 °C)",
                input.temperature_c
            ),
        ));
    }
    if !(0.0..=1.0).contains(&input.co2_fraction) {
        return Err(CorrosionError::InputValidation(format!(
            "CO₂ fraction {} must be within [0, 1]",
            input.co2_fraction
        )));
    }
    if !(0.0..=1.0).contains(&input.h2s_fraction) {
        return Err(CorrosionError::InputValidation(format!(
            "H₂S fraction {} must be within [0, 1]",
            input.h2s_fraction
        )));
    }
    if input.pressure_bar <= 0.0 {
        return Err(CorrosionError::InputValidation(
            "total pressure must be positive".into(),
        ));
    }
    if input.diameter_m <= 0.0 {
        return Err(CorrosionError::InputValidation(
            "pipe diameter must be positive".into(),
        ));
    }
    Ok(())
}

/// Full NORSOK M-506 corrosion rate.
pub fn predict_co2_h2s(input: &NorsokInput) -> CorrosionResult<NorsokOutcome> {
    validate(input)?;
    let mut warnings = Vec::new();

    if input.co2_fraction == 0.0 {
        return Ok(NorsokOutcome {
            corrosion_rate_mm_yr: 0.0,
            corrosion_rate_mpy: 0.0,
            ph_used: if input.ph_in > 0.0 { input.ph_in } else { 7.0 },
            co2_fugacity_bar: 0.0,
            shear_stress_pa: 0.0,
            kt: kt(input.temperature_c),
            fph: 0.0,
            mechanism: "none (zero CO₂ fraction)".into(),
            severity: "negligible".into(),
            warnings,
        });
    }

    let fugacity = co2_fugacity(input.co2_fraction, input.pressure_bar, input.temperature_c);
    let tau = shear_stress(input)?;

    let ph_used = if input.ph_in > 0.0 {
        input.ph_in
    } else {
        let ph = ph_calculator(
            input.temperature_c,
            fugacity,
            input.bicarbonate_mg_l,
            input.ionic_strength_mg_l,
            input.calc_iterations,
        );
        warnings.push(format!(
            "pH calculated from carbonate chemistry: {ph:.2} ({} iteration{})",
            input.calc_iterations,
            if input.calc_iterations == 1 { "" } else { "s" }
        ));
        ph
    };

    let kt_val = kt(input.temperature_c);
    let fph_val = fph(input.temperature_c, ph_used, &mut warnings)?;

    let rate = kt_val
        * fugacity.powf(0.62)
        * (tau / 19.0).powf(0.146 + 0.0324 * fugacity.log10())
        * fph_val;
    let rate = rate.max(0.0);

    let mechanism = if input.h2s_fraction > 0.001 {
        if input.co2_fraction > 10.0 * input.h2s_fraction {
            "mixed CO₂/H₂S corrosion (CO₂ dominant)".to_string()
        } else {
            "H₂S sour corrosion (sulfide stress cracking risk)".to_string()
        }
    } else {
        "CO₂ sweet corrosion".to_string()
    };

    let severity = if rate < 0.1 {
        "low (<0.1 mm/yr): carbon steel acceptable"
    } else if rate < 0.5 {
        "moderate (0.1–0.5 mm/yr): corrosion allowance required"
    } else if rate < 2.0 {
        "high (0.5–2.0 mm/yr): consider inhibitors"
    } else {
        "severe (>2.0 mm/yr): upgrade to CRA or inhibit"
    };

    Ok(NorsokOutcome {
        corrosion_rate_mm_yr: rate,
        corrosion_rate_mpy: rate * 39.3701,
        ph_used,
        co2_fugacity_bar: fugacity,
        shear_stress_pa: tau,
        kt: kt_val,
        fph: fph_val,
        mechanism,
        severity: severity.to_string(),
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn representative(ph_in: f64) -> NorsokInput {
        NorsokInput {
            co2_fraction: 0.05,
            pressure_bar: 10.0,
            temperature_c: 40.0,
            v_sg: 1.0,
            v_sl: 0.5,
            mass_g: 100.0,
            mass_l: 500.0,
            vol_g: 80.0,
            vol_l: 0.5,
            holdup: 50.0,
            vis_g: 0.02,
            vis_l: 1.0,
            roughness_m: 4.5e-5,
            diameter_m: 0.2,
            ph_in,
            bicarbonate_mg_l: 0.0,
            ionic_strength_mg_l: 5000.0,
            calc_iterations: 2,
            h2s_fraction: 0.0,
        }
    }

    #[test]
    fn test_supplied_ph_path() {
        let out = predict_co2_h2s(&representative(5.5)).unwrap();
        assert!(out.corrosion_rate_mm_yr > 0.0);
        assert!(out.corrosion_rate_mm_yr.is_finite());
        assert_eq!(out.ph_used, 5.5);
    }

    #[test]
    fn test_ph_correction_is_monotone() {
        let lower = predict_co2_h2s(&representative(5.5)).unwrap();
        let higher = predict_co2_h2s(&representative(6.0)).unwrap();
        assert!(
            higher.corrosion_rate_mm_yr < lower.corrosion_rate_mm_yr,
            "pH 6.0 must corrode strictly slower than pH 5.5: {} vs {}",
            higher.corrosion_rate_mm_yr,
            lower.corrosion_rate_mm_yr
        );
    }

    #[test]
    fn test_zero_co2_short_circuit() {
        let mut input = representative(5.5);
        input.co2_fraction = 0.0;
        let out = predict_co2_h2s(&input).unwrap();
        assert_eq!(out.corrosion_rate_mm_yr, 0.0);
        assert!(out.mechanism.contains("zero CO₂"));
    }

    #[test]
    fn test_calculated_ph_path_uses_iterations() {
        let mut unsat = representative(0.0);
        unsat.calc_iterations = 1;
        let mut sat = representative(0.0);
        sat.calc_iterations = 2;
        let out_unsat = predict_co2_h2s(&unsat).unwrap();
        let out_sat = predict_co2_h2s(&sat).unwrap();
        // FeCO₃ saturation cannot lower the pH.
        assert!(out_sat.ph_used >= out_unsat.ph_used);
        // Higher pH, lower rate.
        assert!(out_sat.corrosion_rate_mm_yr <= out_unsat.corrosion_rate_mm_yr);
    }

    #[test]
    fn test_ph_clamp_warns() {
        let out = predict_co2_h2s(&representative(7.2)).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("clamped")));
        assert!(out.corrosion_rate_mm_yr.is_finite());
    }

    #[test]
    fn test_out_of_range_temperature_fails() {
        let mut input = representative(5.5);
        input.temperature_c = 170.0;
        assert!(matches!(
            predict_co2_h2s(&input),
            Err(CorrosionError::OutOfValidatedRegion { .. })
        ));
    }

    #[test]
    fn test_kt_interpolation() {
        assert!((kt(20.0) - 4.762).abs() < 1e-9);
        let mid = kt(30.0);
        assert!(mid > 4.762 && mid < 8.927);
    }

    #[test]
    fn test_fph_decreases_over_table_range() {
        let mut w = Vec::new();
        let f_acid = fph(40.0, 4.0, &mut w).unwrap();
        let f_mid = fph(40.0, 5.5, &mut w).unwrap();
        let f_high = fph(40.0, 6.5, &mut w).unwrap();
        assert!(f_acid > f_mid && f_mid > f_high);
        assert!(f_high > 0.0);
    }

    #[test]
    fn test_shear_stress_positive_and_velocity_sensitive() {
        let base = representative(5.5);
        let tau1 = shear_stress(&base).unwrap();
        let mut faster = representative(5.5);
        faster.v_sg = 5.0;
        faster.v_sl = 2.0;
        let tau2 = shear_stress(&faster).unwrap();
        assert!(tau1 > 0.0);
        assert!(tau2 > tau1);
    }

    #[test]
    fn test_sour_mechanism_label() {
        let mut input = representative(5.5);
        input.h2s_fraction = 0.02;
        let out = predict_co2_h2s(&input).unwrap();
        assert!(out.mechanism.contains("H₂S"));
    }
}
