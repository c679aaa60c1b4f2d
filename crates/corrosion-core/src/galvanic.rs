// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Galvanic Solver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Mixed-potential galvanic couple solver.
//!
//! The couple potential is the root of
//! net(E) = i_net(anode, E) + (A_c/A_a)·i_net(cathode, E), bracketed between
//! the isolated corrosion potentials. The reported galvanic current is the
//! anode's ANODIC branch at E_mix; the net current at E_mix is exposed
//! separately for diagnostics. Reporting the net current makes every couple
//! look protective and is exactly the failure the branch split prevents.

use corrosion_data::CatalogSet;
use corrosion_kinetics::material::{nrl_material, Conditions, ElectrodeKinetics};
use corrosion_kinetics::polarization::{corrosion_potential, polarization_curve};
use corrosion_math::brent::{brent, RootError};
use corrosion_math::interp::linspace;
use corrosion_types::constants::{E_SCE_VS_SHE, M_O2};
use corrosion_types::units::{Celsius, Potential};
use corrosion_types::{CorrosionError, CorrosionResult};
use corrosion_transport::{limiting_current_from_flow, FlowGeometry, FlowParameters};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rates::{corrosion_rate_mm_yr, mm_yr_to_mpy};

/// DO below this is clamped to it to keep the ORR Nernst term finite (mg/L).
pub const DO_EPSILON_MG_L: f64 = 0.01;

/// Severity classification from the galvanic amplification ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Negligible,
    Minor,
    Moderate,
    Severe,
}

impl Severity {
    pub fn from_current_ratio(ratio: f64) -> Self {
        if ratio <= 1.0 {
            Severity::Negligible
        } else if ratio <= 3.0 {
            Severity::Minor
        } else if ratio <= 10.0 {
            Severity::Moderate
        } else {
            Severity::Severe
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalvanicInput {
    pub anode: String,
    pub cathode: String,
    pub temperature_c: f64,
    pub ph: f64,
    pub chloride_mg_l: f64,
    /// Cathode area / anode area
    pub area_ratio: f64,
    pub dissolved_oxygen_mg_l: Option<f64>,
    #[serde(default)]
    pub velocity_m_s: f64,
    pub pipe_diameter_m: Option<f64>,
    pub pipe_length_m: Option<f64>,
    /// Attach sampled polarization curves to the outcome.
    #[serde(default)]
    pub include_curves: bool,
    /// Sample count for the common potential grid (default 501, cap 5001).
    pub grid_points: Option<usize>,
}

/// One electrode's sampled branches on the common grid (SCE at the I/O
/// boundary).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveSamples {
    pub potential_v_sce: Vec<f64>,
    pub anodic_a_cm2: Vec<f64>,
    pub cathodic_a_cm2: Vec<f64>,
    pub net_a_cm2: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalvanicCurves {
    pub anode: CurveSamples,
    pub cathode: CurveSamples,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalvanicOutcome {
    pub anode: String,
    pub cathode: String,
    /// Couple potential (SCE at the I/O boundary per ASTM G82)
    pub mixed_potential: Potential,
    /// Anodic-branch current density on the anode at E_mix (A/cm²)
    pub galvanic_current_density_a_cm2: f64,
    /// Net couple current at E_mix (A/cm²), diagnostics only
    pub net_current_density_a_cm2: f64,
    pub anode_corrosion_rate_mm_yr: f64,
    pub anode_corrosion_rate_mpy: f64,
    pub cathode_corrosion_rate_mm_yr: f64,
    /// i_galvanic / i_isolated_anode
    pub current_ratio: f64,
    pub e_corr_isolated_anode: Potential,
    pub e_corr_isolated_cathode: Potential,
    pub severity: Severity,
    pub area_ratio: f64,
    pub dissolved_oxygen_mg_l: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curves: Option<GalvanicCurves>,
    pub warnings: Vec<String>,
}

/// Grid cap mirroring `GridSettings::max_points`.
const GRID_DEFAULT_POINTS: usize = 501;
const GRID_MAX_POINTS: usize = 5001;

fn sample_curves(
    anode: &ElectrodeKinetics,
    cathode: &ElectrodeKinetics,
    e_lo_she: f64,
    e_hi_she: f64,
    points: usize,
) -> CorrosionResult<GalvanicCurves> {
    let grid = linspace(e_lo_she, e_hi_she, points.clamp(3, GRID_MAX_POINTS));
    let to_samples = |kin: &ElectrodeKinetics| -> CorrosionResult<CurveSamples> {
        let curve = polarization_curve(kin, &grid)?;
        Ok(CurveSamples {
            potential_v_sce: curve.potential_she.iter().map(|e| e - E_SCE_VS_SHE).collect(),
            anodic_a_cm2: curve.anodic_a_cm2.to_vec(),
            cathodic_a_cm2: curve.cathodic_a_cm2.to_vec(),
            net_a_cm2: curve.net_a_cm2.to_vec(),
        })
    };
    Ok(GalvanicCurves {
        anode: to_samples(anode)?,
        cathode: to_samples(cathode)?,
    })
}

fn validate(input: &GalvanicInput, warnings: &mut Vec<String>) -> CorrosionResult<()> {
    if !(5.0..=80.0).contains(&input.temperature_c) {
        return Err(CorrosionError::out_of_region(
            "galvanic",
            format!(
                "temperature {} °C outside the fitted window (5–80 °C)",
                input.temperature_c
            ),
        ));
    }
    if !(1.0..=13.0).contains(&input.ph) {
        return Err(CorrosionError::InputValidation(format!(
            "pH {} out of range (1–13)",
            input.ph
        )));
    }
    if input.chloride_mg_l < 0.0 {
        return Err(CorrosionError::InputValidation(
            "chloride concentration cannot be negative".into(),
        ));
    }
    if !(0.01..=1000.0).contains(&input.area_ratio) {
        return Err(CorrosionError::InputValidation(format!(
            "area ratio {} out of range (0.01–1000)",
            input.area_ratio
        )));
    }
    let chloride_m = input.chloride_mg_l / 35_453.0;
    if !(0.02..=0.6).contains(&chloride_m) {
        warnings.push(format!(
            "chloride {chloride_m:.3} M outside the validated range (0.02–0.6 M); accuracy degrades"
        ));
    }
    if input.area_ratio > 100.0 {
        warnings.push(format!(
            "very large area ratio ({:.0}:1); localized attack likely at anode edges",
            input.area_ratio
        ));
    }
    Ok(())
}

/// Solve the galvanic couple per mixed-potential theory.
pub fn assess_galvanic(
    catalogs: &CatalogSet,
    input: &GalvanicInput,
) -> CorrosionResult<GalvanicOutcome> {
    let mut warnings = Vec::new();
    validate(input, &mut warnings)?;

    let anode_mat = nrl_material(&input.anode).ok_or_else(|| {
        CorrosionError::InputValidation(format!(
            "anode '{}' is not in the NRL kinetic set (HY80, HY100, SS316, Ti, I625, CuNi); \
             galvanic assessment needs full Butler-Volmer kinetics",
            input.anode
        ))
    })?;
    let cathode_mat = nrl_material(&input.cathode).ok_or_else(|| {
        CorrosionError::InputValidation(format!(
            "cathode '{}' is not in the NRL kinetic set (HY80, HY100, SS316, Ti, I625, CuNi); \
             galvanic assessment needs full Butler-Volmer kinetics",
            input.cathode
        ))
    })?;

    // DO clamp: log(0) in the ORR Nernst term is the alternative.
    let dissolved_oxygen = match input.dissolved_oxygen_mg_l {
        Some(do_mg_l) if do_mg_l < DO_EPSILON_MG_L => {
            warnings.push(format!(
                "dissolved oxygen below {DO_EPSILON_MG_L} mg/L; clamped for anaerobic \
                 conditions, corrosion is driven by hydrogen evolution"
            ));
            Some(DO_EPSILON_MG_L)
        }
        other => other,
    };

    let chloride_m = input.chloride_mg_l / 35_453.0;
    let cond = Conditions::from_bulk(
        chloride_m,
        Celsius(input.temperature_c),
        input.ph,
        input.velocity_m_s,
        dissolved_oxygen,
    );

    let mut anode = ElectrodeKinetics::build(anode_mat, catalogs, &cond)?;
    let mut cathode = ElectrodeKinetics::build(cathode_mat, catalogs, &cond)?;

    // Flow-coupled ORR limit when a pipe geometry is supplied.
    if input.velocity_m_s > 0.0 && input.pipe_diameter_m.is_some() {
        let flow = FlowParameters {
            geometry: FlowGeometry::Pipe,
            velocity_m_s: input.velocity_m_s,
            diameter_m: input.pipe_diameter_m,
            length_m: input.pipe_length_m,
            density_kg_m3: 1000.0 + 41.0 * chloride_m,
            viscosity_pa_s: 1.0e-3,
            diffusivity_m2_s: cond.d_o2_cm2_s * 1.0e-4,
            oxygen_mol_m3: cond.c_o2_g_cm3 * 1.0e6 / M_O2,
        };
        let mt = limiting_current_from_flow(&flow)?;
        debug!(i_lim_a_m2 = mt.i_lim_a_m2, regime = ?mt.regime, "flow-derived ORR limit");
        anode.set_orr_limit(mt.i_lim_a_cm2());
        cathode.set_orr_limit(mt.i_lim_a_cm2());
    }

    let e_corr_anode = corrosion_potential(&anode)?;

    // Identical materials short-circuit to the isolated solve.
    if anode_mat.id == cathode_mat.id {
        warnings.push(format!(
            "identical materials ({}); no galvanic coupling, reporting isolated corrosion",
            anode_mat.id
        ));
        let i_anodic = anode.anodic_current(e_corr_anode)?;
        let rate = corrosion_rate_mm_yr(
            i_anodic,
            anode_mat.molar_mass_g_mol,
            anode_mat.n_electrons,
            anode_mat.density_g_cm3,
        );
        let curves = input
            .include_curves
            .then(|| {
                sample_curves(
                    &anode,
                    &cathode,
                    e_corr_anode - 0.5,
                    e_corr_anode + 0.5,
                    input.grid_points.unwrap_or(GRID_DEFAULT_POINTS),
                )
            })
            .transpose()?;
        return Ok(GalvanicOutcome {
            anode: anode_mat.id.to_string(),
            cathode: cathode_mat.id.to_string(),
            mixed_potential: Potential::vs_she(e_corr_anode).to(corrosion_types::ReferenceElectrode::Sce),
            galvanic_current_density_a_cm2: i_anodic,
            net_current_density_a_cm2: anode.net_current(e_corr_anode)?,
            anode_corrosion_rate_mm_yr: rate,
            anode_corrosion_rate_mpy: mm_yr_to_mpy(rate),
            cathode_corrosion_rate_mm_yr: 0.0,
            current_ratio: 1.0,
            e_corr_isolated_anode: Potential::vs_she(e_corr_anode)
                .to(corrosion_types::ReferenceElectrode::Sce),
            e_corr_isolated_cathode: Potential::vs_she(e_corr_anode)
                .to(corrosion_types::ReferenceElectrode::Sce),
            severity: Severity::Negligible,
            area_ratio: input.area_ratio,
            dissolved_oxygen_mg_l: cond.dissolved_oxygen_mg_l(),
            curves,
            warnings,
        });
    }

    let e_corr_cathode = corrosion_potential(&cathode)?;

    // Charge balance across the couple, cathode weighted by area.
    let ratio = input.area_ratio;
    let net = |e: f64| -> f64 {
        let a = anode.net_current(e).unwrap_or(f64::NAN);
        let c = cathode.net_current(e).unwrap_or(f64::NAN);
        a + ratio * c
    };
    let lo = e_corr_anode.min(e_corr_cathode) - 0.1;
    let hi = e_corr_anode.max(e_corr_cathode) + 0.1;
    let root = brent(net, lo, hi, 1.0e-6, 100).map_err(|e| match e {
        RootError::NoBracket { lo, hi, f_lo, f_hi } => CorrosionError::SolverNonConvergence {
            component: "galvanic".into(),
            message: format!(
                "mixed-potential bracket failed for {}/{}: f(lo)={f_lo:.3e}, f(hi)={f_hi:.3e}",
                anode_mat.id, cathode_mat.id
            ),
            lo,
            hi,
            residual: f_lo.abs().min(f_hi.abs()),
        },
        RootError::MaxIterations { best_x, residual, iterations } => {
            CorrosionError::SolverNonConvergence {
                component: "galvanic".into(),
                message: format!("no convergence after {iterations} iterations"),
                lo: best_x,
                hi: best_x,
                residual,
            }
        }
    })?;
    if !root.f_x.is_finite() {
        return Err(CorrosionError::SolverNonConvergence {
            component: "galvanic".into(),
            message: "film correction failed inside the mixed-potential bracket".into(),
            lo,
            hi,
            residual: f64::NAN,
        });
    }
    let e_mix = root.x;

    // The galvanic current is the anode's anodic branch, never the net.
    let i_galvanic = anode.anodic_current(e_mix)?;
    let i_net = net(e_mix);

    let i_isolated = anode.anodic_current(e_corr_anode)?;
    let current_ratio = if i_isolated < 1.0e-8 {
        warnings.push(format!(
            "isolated anodic current is below 1e-8 A/cm² ({i_isolated:.2e}); treating the couple \
             as uncoupled (ratio 1.0), typical of passive or nearly identical materials"
        ));
        1.0
    } else {
        i_galvanic / i_isolated
    };

    let severity = Severity::from_current_ratio(current_ratio);
    if current_ratio > 10.0 {
        warnings.push(format!(
            "severe galvanic attack (current ratio {current_ratio:.1}); consider cathodic \
             protection or electrical isolation"
        ));
    }

    let rate = corrosion_rate_mm_yr(
        i_galvanic,
        anode_mat.molar_mass_g_mol,
        anode_mat.n_electrons,
        anode_mat.density_g_cm3,
    );

    let curves = input
        .include_curves
        .then(|| {
            sample_curves(
                &anode,
                &cathode,
                e_corr_anode.min(e_corr_cathode) - 0.5,
                e_corr_anode.max(e_corr_cathode) + 0.5,
                input.grid_points.unwrap_or(GRID_DEFAULT_POINTS),
            )
        })
        .transpose()?;

    Ok(GalvanicOutcome {
        anode: anode_mat.id.to_string(),
        cathode: cathode_mat.id.to_string(),
        mixed_potential: Potential::vs_she(e_mix).to(corrosion_types::ReferenceElectrode::Sce),
        galvanic_current_density_a_cm2: i_galvanic,
        net_current_density_a_cm2: i_net,
        anode_corrosion_rate_mm_yr: rate,
        anode_corrosion_rate_mpy: mm_yr_to_mpy(rate),
        cathode_corrosion_rate_mm_yr: 0.0,
        current_ratio,
        e_corr_isolated_anode: Potential::vs_she(e_corr_anode)
            .to(corrosion_types::ReferenceElectrode::Sce),
        e_corr_isolated_cathode: Potential::vs_she(e_corr_cathode)
            .to(corrosion_types::ReferenceElectrode::Sce),
        severity,
        area_ratio: input.area_ratio,
        dissolved_oxygen_mg_l: cond.dissolved_oxygen_mg_l(),
        curves,
        warnings,
    })
}
