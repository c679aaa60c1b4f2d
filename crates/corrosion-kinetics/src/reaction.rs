// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Butler-Volmer Reactions
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Butler-Volmer branches. Cathodic reactions carry only a cathodic branch
//! bounded by a diffusion limit through Koutecky-Levich; anodic reactions
//! carry only an anodic branch, with a film-resistance correction for
//! passivation solved by a short Newton iteration.

use corrosion_math::newton::newton;
use corrosion_types::constants::{CURRENT_FLOOR_A_CM2, F, R};
use corrosion_types::{CorrosionError, CorrosionResult};

/// Exponent clamp keeping e^x finite in f64.
const EXP_ARG_LIMIT: f64 = 600.0;

/// Iteration bound of the film-resistance Newton loop.
const FILM_NEWTON_MAX_ITER: usize = 20;
const FILM_NEWTON_TOL: f64 = 1.0e-6;

fn clamped_exp(x: f64) -> f64 {
    x.clamp(-EXP_ARG_LIMIT, EXP_ARG_LIMIT).exp()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CathodicKind {
    /// O₂ + 2H₂O + 4e⁻ → 4OH⁻
    Orr,
    /// 2H₂O + 2e⁻ → H₂ + 2OH⁻
    Her,
}

impl CathodicKind {
    pub fn label(self) -> &'static str {
        match self {
            CathodicKind::Orr => "ORR",
            CathodicKind::Her => "HER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnodicKind {
    /// Active dissolution, M → M^z+ + z e⁻
    Oxidation,
    /// Passive film growth with ohmic self-limitation
    Passivation,
    /// Localized film breakdown
    Pitting,
}

impl AnodicKind {
    pub fn label(self) -> &'static str {
        match self {
            AnodicKind::Oxidation => "Oxidation",
            AnodicKind::Passivation => "Passivation",
            AnodicKind::Pitting => "Pitting",
        }
    }
}

/// A cathodic (reduction) reaction evaluated against SHE-scale potentials.
#[derive(Debug, Clone)]
pub struct CathodicReaction {
    pub kind: CathodicKind,
    pub e_nernst_she: f64,
    pub i0_a_cm2: f64,
    pub alpha: f64,
    pub z: u32,
    /// Diffusion limit magnitude (A/cm²)
    pub i_lim_a_cm2: f64,
    pub t_k: f64,
}

impl CathodicReaction {
    /// Current density at `e_she` (A/cm², ≤ 0).
    ///
    /// i_act = −i₀·exp(−α·z·F·η/(R·T)), then Koutecky-Levich with the
    /// diffusion limit: i = i_act·i_lim/(i_act + i_lim).
    pub fn current(&self, e_she: f64) -> f64 {
        let eta = e_she - self.e_nernst_she;
        let i_act =
            -(self.i0_a_cm2 * clamped_exp(-(self.alpha * self.z as f64 * F * eta) / (R * self.t_k)));
        let i_lim = -self.i_lim_a_cm2;
        let i = (i_act * i_lim) / (i_act + i_lim);
        -i.abs().max(CURRENT_FLOOR_A_CM2)
    }
}

/// An anodic (oxidation) reaction evaluated against SHE-scale potentials.
#[derive(Debug, Clone)]
pub struct AnodicReaction {
    pub kind: AnodicKind,
    pub e_nernst_she: f64,
    pub i0_a_cm2: f64,
    pub beta: f64,
    pub z: u32,
    /// Passive film areal resistance (Ω·cm²); present for passivation.
    pub film_resistance_ohm_cm2: Option<f64>,
    pub t_k: f64,
}

impl AnodicReaction {
    /// Current density at `e_she` (A/cm², ≥ 0).
    ///
    /// i_act = i₀·exp(β·z·F·η/(R·T)). Passivation solves the implicit
    /// i = i₀·exp(C1·(η − i·R_film)) by Newton iteration.
    pub fn current(&self, e_she: f64) -> CorrosionResult<f64> {
        let eta = e_she - self.e_nernst_she;
        let c1 = self.beta * self.z as f64 * F / (R * self.t_k);
        let mut i = self.i0_a_cm2 * clamped_exp(c1 * eta);

        if let Some(r_film) = self.film_resistance_ohm_cm2 {
            if r_film > 0.0 {
                let c2 = self.i0_a_cm2 * clamped_exp(c1 * eta);
                i = newton(
                    |x| {
                        let damp = clamped_exp(-c1 * r_film * x);
                        (x - c2 * damp, 1.0 + c2 * c1 * r_film * damp)
                    },
                    i,
                    FILM_NEWTON_TOL,
                    FILM_NEWTON_MAX_ITER,
                )
                .map_err(|e| CorrosionError::SolverNonConvergence {
                    component: "film_resistance".into(),
                    message: format!("{} at η = {eta:.3} V: {e}", self.kind.label()),
                    lo: eta,
                    hi: eta,
                    residual: match e {
                        corrosion_math::newton::NewtonError::MaxIterations { residual, .. } => {
                            residual
                        }
                        _ => f64::NAN,
                    },
                })?;
            }
        }
        Ok(i.max(CURRENT_FLOOR_A_CM2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orr() -> CathodicReaction {
        CathodicReaction {
            kind: CathodicKind::Orr,
            e_nernst_she: 0.785,
            i0_a_cm2: 9.5e-8,
            alpha: 0.89,
            z: 4,
            i_lim_a_cm2: 1.0e-4,
            t_k: 298.15,
        }
    }

    #[test]
    fn test_cathodic_sign_and_limit() {
        let r = orr();
        // Far below E_N the branch saturates at the diffusion limit.
        let deep = r.current(-0.6);
        assert!(deep < 0.0);
        assert!((deep.abs() - 1.0e-4).abs() / 1.0e-4 < 1e-3, "i = {deep:.3e}");
        // Above E_N it collapses toward the floor but keeps its sign.
        let shallow = r.current(1.5);
        assert!(shallow < 0.0);
        assert!(shallow.abs() < 1e-20);
    }

    #[test]
    fn test_cathodic_monotone() {
        let r = orr();
        let hi = r.current(0.70).abs();
        let lo = r.current(0.60).abs();
        assert!(lo >= hi, "cathodic magnitude must grow as E drops");
    }

    #[test]
    fn test_koutecky_levich_halfway() {
        // Where activation equals the limit, the combined magnitude is half.
        let mut r = orr();
        r.i_lim_a_cm2 = r.i0_a_cm2;
        let i = r.current(r.e_nernst_she);
        assert!((i.abs() - r.i0_a_cm2 / 2.0).abs() / r.i0_a_cm2 < 1e-9);
    }

    #[test]
    fn test_anodic_sign_and_growth() {
        let r = AnodicReaction {
            kind: AnodicKind::Oxidation,
            e_nernst_she: -0.68,
            i0_a_cm2: 6.0e-8,
            beta: 0.3,
            z: 2,
            film_resistance_ohm_cm2: None,
            t_k: 298.15,
        };
        let at_en = r.current(-0.68).unwrap();
        assert!((at_en - 6.0e-8).abs() / 6.0e-8 < 1e-9);
        assert!(r.current(-0.4).unwrap() > at_en);
        assert!(r.current(-0.9).unwrap() < at_en);
        assert!(r.current(-0.9).unwrap() > 0.0);
    }

    #[test]
    fn test_film_resistance_caps_current() {
        let r_film = 1.25e6; // Ω·cm²
        let r = AnodicReaction {
            kind: AnodicKind::Passivation,
            e_nernst_she: -0.86,
            i0_a_cm2: 3.0e-12,
            beta: 0.6,
            z: 3,
            film_resistance_ohm_cm2: Some(r_film),
            t_k: 298.15,
        };
        // Without the film the exponential would be astronomically large;
        // the corrected current sits near the ohmic bound η/R.
        let e = 0.76;
        let i = r.current(e).unwrap();
        let eta = e - r.e_nernst_she;
        assert!(i > 0.0);
        assert!(i < eta / r_film, "i = {i:.3e} must stay below η/R = {:.3e}", eta / r_film);
        assert!(i > 0.1 * eta / r_film, "i = {i:.3e} unexpectedly small");
        // Self-consistency of the implicit relation.
        let c1 = r.beta * 3.0 * F / (R * r.t_k);
        let reconstructed = r.i0_a_cm2 * (c1 * (eta - i * r_film)).exp();
        assert!((reconstructed - i).abs() / i < 1e-3);
    }

    #[test]
    fn test_floor_applies() {
        let r = orr();
        let i = r.current(3.0);
        assert!(i <= -CURRENT_FLOOR_A_CM2);
        assert!(i >= -1e-20);
    }
}
