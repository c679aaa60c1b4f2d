// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Response Surface
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Activation energies from the six-coefficient quadratic response surface.
//!
//! The fit takes chloride in mol/L and temperature in KELVIN. The kelvin
//! conversion happens here and nowhere else; feeding Celsius into the
//! polynomial corrupts ΔG for every material.

use corrosion_data::ResponseSurfaceCoeffs;
use corrosion_types::constants::{F, H_PLANCK, K_BOLTZMANN, R};
use corrosion_types::units::Celsius;
use corrosion_types::{CorrosionError, CorrosionResult};

/// Validity range of the pH interpolation for a reaction.
#[derive(Debug, Clone, Copy)]
pub struct PhRange {
    pub min: f64,
    pub max: f64,
}

/// All NRL reactions are fitted over pH 1–13.
pub const NRL_PH_RANGE: PhRange = PhRange { min: 1.0, max: 13.0 };

/// ΔG (J/mol) before pH correction.
pub fn delta_g_no_ph(
    coeffs: &ResponseSurfaceCoeffs,
    chloride_m: f64,
    temperature: Celsius,
) -> f64 {
    let t_k = temperature.kelvin().0;
    coeffs.p00
        + coeffs.p10 * chloride_m
        + coeffs.p01 * t_k
        + coeffs.p20 * chloride_m * chloride_m
        + coeffs.p11 * chloride_m * t_k
        + coeffs.p02 * t_k * t_k
}

/// ΔG (J/mol) with the linear pH interpolation between 0.9·ΔG and 1.1·ΔG
/// over the reaction's pH range.
pub fn delta_g(
    coeffs: &ResponseSurfaceCoeffs,
    chloride_m: f64,
    temperature: Celsius,
    ph: f64,
    range: PhRange,
) -> f64 {
    let base = delta_g_no_ph(coeffs, chloride_m, temperature);
    let dg_max = 1.1 * base;
    let dg_min = 0.9 * base;
    let slope = (dg_max - dg_min) / (range.max - range.min);
    slope * (ph - range.min) + dg_min
}

/// ΔG for a Butler-Volmer reaction, failing with the operating point when
/// the polynomial leaves its validated region (ΔG ≤ 0).
pub fn validated_delta_g(
    coeffs: &ResponseSurfaceCoeffs,
    material: &str,
    reaction: &str,
    chloride_m: f64,
    temperature: Celsius,
    ph: f64,
    range: PhRange,
) -> CorrosionResult<f64> {
    let dg = delta_g(coeffs, chloride_m, temperature, ph, range);
    if dg <= 0.0 {
        return Err(CorrosionError::out_of_region(
            "response_surface",
            format!(
                "coefficients out of validated region for {material}/{reaction} at \
                 Cl={chloride_m:.3} M, T={:.1} °C, pH={ph:.1}: ΔG = {dg:.3e} J/mol",
                temperature.0
            ),
        ));
    }
    Ok(dg)
}

/// Exchange current density i₀ = z·F·λ·exp(−ΔG/(R·T)) with the Eyring
/// attempt frequency λ = k_B·T/h, in A/cm².
pub fn exchange_current_density(delta_g_j_mol: f64, z: u32, temperature: Celsius) -> f64 {
    let t_k = temperature.kelvin().0;
    let lambda = K_BOLTZMANN * t_k / H_PLANCK;
    (z as f64) * F * lambda * (-delta_g_j_mol / (R * t_k)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(p00: f64) -> ResponseSurfaceCoeffs {
        ResponseSurfaceCoeffs {
            p00,
            p10: 0.0,
            p01: 0.0,
            p20: 0.0,
            p11: 0.0,
            p02: 0.0,
        }
    }

    #[test]
    fn test_kelvin_argument() {
        // ΔG = p01·T must see kelvin, not Celsius.
        let coeffs = ResponseSurfaceCoeffs {
            p00: 0.0,
            p10: 0.0,
            p01: 1.0,
            p20: 0.0,
            p11: 0.0,
            p02: 0.0,
        };
        let dg = delta_g_no_ph(&coeffs, 0.0, Celsius(25.0));
        assert!((dg - 298.15).abs() < 1e-9, "expected 298.15, got {dg}");
    }

    #[test]
    fn test_ph_interpolation_endpoints() {
        let coeffs = flat(100_000.0);
        let low = delta_g(&coeffs, 0.5, Celsius(25.0), 1.0, NRL_PH_RANGE);
        let high = delta_g(&coeffs, 0.5, Celsius(25.0), 13.0, NRL_PH_RANGE);
        assert!((low - 90_000.0).abs() < 1e-6);
        assert!((high - 110_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_ph_interpolation_midpoint() {
        let coeffs = flat(100_000.0);
        let mid = delta_g(&coeffs, 0.5, Celsius(25.0), 7.0, NRL_PH_RANGE);
        assert!((mid - 100_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_negative_delta_g_is_error() {
        let coeffs = flat(-5_000.0);
        let err = validated_delta_g(&coeffs, "HY80", "ORR", 0.54, Celsius(25.0), 8.0, NRL_PH_RANGE)
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("HY80/ORR"), "message must name material and reaction: {msg}");
        assert!(msg.contains("Cl=0.540"), "message must carry the operating point: {msg}");
    }

    #[test]
    fn test_exchange_current_magnitude() {
        // ΔG = 145 kJ/mol, z = 4 at 25 °C lands near 1e-7 A/cm².
        let i0 = exchange_current_density(145.0e3, 4, Celsius(25.0));
        assert!(
            (1.0e-8..1.0e-6).contains(&i0),
            "i0 = {i0:.3e} A/cm² out of expected decade"
        );
    }

    #[test]
    fn test_exchange_current_decreases_with_barrier() {
        let lo = exchange_current_density(120.0e3, 2, Celsius(25.0));
        let hi = exchange_current_density(180.0e3, 2, Celsius(25.0));
        assert!(lo > hi);
    }
}
