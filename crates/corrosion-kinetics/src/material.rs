// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — NRL Material Catalog
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! The six NRL alloys with their per-reaction kinetic parameters, and the
//! construction of a full electrode (all supported reactions at given
//! solution conditions). Coefficient CSVs are touched only here.

use corrosion_chemistry::NaClSolution;
use corrosion_data::aliases::{alias_target, normalize};
use corrosion_data::CatalogSet;
use corrosion_types::constants::{
    c_h_and_c_oh, C_ION_DEFAULT_M, D_H2O, E0_CR_OX, E0_CU_OX, E0_FE_OX, E0_HER_ALK, E0_ORR_ALK, F,
    M_CR, M_CU, M_FE, M_H2, M_H2O, M_O2, M_OH, R, Z_HER, Z_ORR,
};
use corrosion_types::units::Celsius;
use corrosion_types::{CorrosionError, CorrosionResult};

use crate::reaction::{AnodicKind, AnodicReaction, CathodicKind, CathodicReaction};
use crate::response_surface::{
    exchange_current_density, validated_delta_g, NRL_PH_RANGE,
};

/// Activity floor keeping Nernst logarithms finite at extreme pH.
const ACTIVITY_FLOOR: f64 = 1.0e-300;

#[derive(Debug, Clone, Copy)]
pub struct CathodicParams {
    pub alpha: f64,
    /// Diffusion layer thickness (cm)
    pub delta_cm: f64,
    /// Response-surface file stem, e.g. "HY80ORR"
    pub coeff_stem: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct AnodicParams {
    pub kind: AnodicKind,
    pub beta: f64,
    pub coeff_stem: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct FilmParams {
    /// Oxide resistivity (Ω·cm)
    pub resistivity_ohm_cm: f64,
    /// Film thickness (cm)
    pub thickness_cm: f64,
}

impl FilmParams {
    pub fn areal_resistance_ohm_cm2(&self) -> f64 {
        self.resistivity_ohm_cm * self.thickness_cm
    }
}

/// Static description of one NRL alloy.
#[derive(Debug, Clone, Copy)]
pub struct NrlMaterial {
    pub id: &'static str,
    /// Molar mass of the dissolving element (g/mol)
    pub molar_mass_g_mol: f64,
    /// Electrons per dissolution event
    pub n_electrons: u32,
    pub density_g_cm3: f64,
    /// Standard potential of the anodic couple (V vs SHE)
    pub e0_oxidation_she: f64,
    pub orr: CathodicParams,
    pub her: CathodicParams,
    pub anodic: &'static [AnodicParams],
    pub film: Option<FilmParams>,
    /// Reference velocity thinning the ORR boundary layer (m/s)
    pub orr_reference_velocity_m_s: Option<f64>,
}

impl NrlMaterial {
    /// ORR diffusion layer thickness at a bulk flow velocity.
    pub fn orr_delta_cm(&self, velocity_m_s: f64) -> f64 {
        match self.orr_reference_velocity_m_s {
            Some(v0) => {
                let factor = (1.0 - velocity_m_s / v0).max(0.1);
                self.orr.delta_cm * factor
            }
            None => self.orr.delta_cm,
        }
    }

    pub fn supports(&self, kind: AnodicKind) -> bool {
        self.anodic.iter().any(|a| a.kind == kind)
    }
}

const CR2O3_FILM: FilmParams = FilmParams {
    resistivity_ohm_cm: 5000.0e9,
    thickness_cm: 2.5e-7,
};

const REFRACTORY_FILM: FilmParams = FilmParams {
    resistivity_ohm_cm: 50_000.0e9,
    thickness_cm: 2.5e-7,
};

pub const NRL_MATERIALS: [NrlMaterial; 6] = [
    NrlMaterial {
        id: "HY80",
        molar_mass_g_mol: M_FE,
        n_electrons: 2,
        density_g_cm3: 7.85,
        e0_oxidation_she: E0_FE_OX,
        orr: CathodicParams { alpha: 0.89, delta_cm: 0.02, coeff_stem: "HY80ORR" },
        her: CathodicParams { alpha: 0.70, delta_cm: 0.15, coeff_stem: "HY80HER" },
        anodic: &[
            AnodicParams { kind: AnodicKind::Oxidation, beta: 0.3, coeff_stem: "HY80FeOx" },
            AnodicParams { kind: AnodicKind::Pitting, beta: 0.9999, coeff_stem: "HY80Pit" },
        ],
        film: None,
        orr_reference_velocity_m_s: None,
    },
    NrlMaterial {
        id: "HY100",
        molar_mass_g_mol: M_FE,
        n_electrons: 2,
        density_g_cm3: 7.85,
        e0_oxidation_she: E0_FE_OX,
        orr: CathodicParams { alpha: 0.89, delta_cm: 0.02, coeff_stem: "HY100ORR" },
        her: CathodicParams { alpha: 0.72, delta_cm: 0.15, coeff_stem: "HY100HER" },
        anodic: &[
            AnodicParams { kind: AnodicKind::Oxidation, beta: 0.3, coeff_stem: "HY100FeOx" },
            AnodicParams { kind: AnodicKind::Pitting, beta: 0.9999, coeff_stem: "HY100Pit" },
        ],
        film: None,
        orr_reference_velocity_m_s: None,
    },
    NrlMaterial {
        id: "SS316",
        molar_mass_g_mol: M_CR,
        n_electrons: 3,
        density_g_cm3: 8.00,
        e0_oxidation_she: E0_CR_OX,
        orr: CathodicParams { alpha: 0.89, delta_cm: 0.024, coeff_stem: "SS316ORR" },
        her: CathodicParams { alpha: 0.80, delta_cm: 0.15, coeff_stem: "SS316HER" },
        anodic: &[
            AnodicParams { kind: AnodicKind::Passivation, beta: 0.6, coeff_stem: "SS316Pass" },
            AnodicParams { kind: AnodicKind::Pitting, beta: 0.9999, coeff_stem: "SS316Pit" },
        ],
        film: Some(CR2O3_FILM),
        orr_reference_velocity_m_s: None,
    },
    NrlMaterial {
        id: "Ti",
        molar_mass_g_mol: 47.867,
        n_electrons: 3,
        density_g_cm3: 4.51,
        e0_oxidation_she: E0_CR_OX,
        orr: CathodicParams { alpha: 0.65, delta_cm: 0.024, coeff_stem: "TiORR" },
        her: CathodicParams { alpha: 0.75, delta_cm: 0.15, coeff_stem: "TiHER" },
        anodic: &[AnodicParams { kind: AnodicKind::Passivation, beta: 0.3, coeff_stem: "TiPass" }],
        film: Some(REFRACTORY_FILM),
        orr_reference_velocity_m_s: None,
    },
    NrlMaterial {
        id: "I625",
        molar_mass_g_mol: 58.6934,
        n_electrons: 3,
        density_g_cm3: 8.44,
        e0_oxidation_she: E0_CR_OX,
        orr: CathodicParams { alpha: 0.89, delta_cm: 0.02, coeff_stem: "I625ORR" },
        her: CathodicParams { alpha: 0.70, delta_cm: 0.15, coeff_stem: "I625HER" },
        anodic: &[AnodicParams { kind: AnodicKind::Passivation, beta: 0.21, coeff_stem: "I625Pass" }],
        film: Some(REFRACTORY_FILM),
        orr_reference_velocity_m_s: Some(50.0),
    },
    NrlMaterial {
        id: "CuNi",
        molar_mass_g_mol: M_CU,
        n_electrons: 1,
        density_g_cm3: 8.94,
        e0_oxidation_she: E0_CU_OX,
        orr: CathodicParams { alpha: 0.72, delta_cm: 0.02, coeff_stem: "cuniORR" },
        her: CathodicParams { alpha: 0.60, delta_cm: 0.15, coeff_stem: "cuniHER" },
        anodic: &[AnodicParams { kind: AnodicKind::Oxidation, beta: 0.7, coeff_stem: "cuniCuOx" }],
        film: None,
        orr_reference_velocity_m_s: Some(7.5),
    },
];

/// Look up an NRL alloy by name or documented alias.
pub fn nrl_material(name: &str) -> Option<&'static NrlMaterial> {
    let norm = normalize(name);
    let canonical = alias_target(&norm).map(str::to_string).unwrap_or(norm);
    NRL_MATERIALS
        .iter()
        .find(|m| normalize(m.id) == normalize(&canonical))
}

/// Solution conditions for building an electrode. Derived fields default
/// from the NaCl chemistry when not supplied.
#[derive(Debug, Clone)]
pub struct Conditions {
    pub chloride_m: f64,
    pub temperature: Celsius,
    pub ph: f64,
    pub velocity_m_s: f64,
    /// Dissolved O₂ (g/cm³)
    pub c_o2_g_cm3: f64,
    /// O₂ diffusivity (cm²/s)
    pub d_o2_cm2_s: f64,
    /// Water activity (mol/L)
    pub a_water_mol_l: f64,
}

impl Conditions {
    /// Build from bulk inputs; DO defaults to air equilibrium from the
    /// NaCl solution model when not measured.
    pub fn from_bulk(
        chloride_m: f64,
        temperature: Celsius,
        ph: f64,
        velocity_m_s: f64,
        dissolved_oxygen_mg_l: Option<f64>,
    ) -> Self {
        let soln = NaClSolution::new(chloride_m, temperature.0);
        let c_o2 = match dissolved_oxygen_mg_l {
            Some(mg_l) => mg_l * 1.0e-6, // mg/L → g/cm³
            None => soln.c_o2_g_cm3,
        };
        Conditions {
            chloride_m,
            temperature,
            ph,
            velocity_m_s,
            c_o2_g_cm3: c_o2,
            d_o2_cm2_s: soln.d_o2_cm2_s,
            a_water_mol_l: soln.a_water_mol_l,
        }
    }

    pub fn dissolved_oxygen_mg_l(&self) -> f64 {
        self.c_o2_g_cm3 * 1.0e6
    }
}

/// A material's full reaction set at fixed conditions.
#[derive(Debug, Clone)]
pub struct ElectrodeKinetics {
    pub material: &'static NrlMaterial,
    pub cathodic: Vec<CathodicReaction>,
    pub anodic: Vec<AnodicReaction>,
}

impl ElectrodeKinetics {
    /// Construct every supported reaction from the coefficient catalog.
    /// Fails with `OutOfValidatedRegion` if any required ΔG is non-positive.
    pub fn build(
        material: &'static NrlMaterial,
        catalogs: &CatalogSet,
        cond: &Conditions,
    ) -> CorrosionResult<Self> {
        let t_k = cond.temperature.kelvin().0;
        let (_c_h, c_oh) = c_h_and_c_oh(cond.ph);
        let water_g_cm3 = (cond.a_water_mol_l / 1000.0 * M_H2O).powi(2);

        let coeffs = |stem: &str| {
            catalogs.response_surface(stem).ok_or_else(|| {
                CorrosionError::catalog(
                    format!("{stem}Coeffs.csv"),
                    "response-surface coefficients not loaded",
                )
            })
        };

        let mut cathodic = Vec::with_capacity(2);

        // ORR: O₂ + 2H₂O + 4e⁻ → 4OH⁻
        {
            let dg = validated_delta_g(
                coeffs(material.orr.coeff_stem)?,
                material.id,
                CathodicKind::Orr.label(),
                cond.chloride_m,
                cond.temperature,
                cond.ph,
                NRL_PH_RANGE,
            )?;
            let a_ox = (cond.c_o2_g_cm3 * water_g_cm3).max(ACTIVITY_FLOOR);
            let a_red = (c_oh / 1000.0 * M_OH).powi(4).max(ACTIVITY_FLOOR);
            let e_nernst = E0_ORR_ALK + (R * t_k / (Z_ORR as f64 * F)) * (a_ox / a_red).ln();
            let delta = material.orr_delta_cm(cond.velocity_m_s);
            let i_lim =
                Z_ORR as f64 * F * cond.d_o2_cm2_s * (cond.c_o2_g_cm3 / M_O2) / delta;
            cathodic.push(CathodicReaction {
                kind: CathodicKind::Orr,
                e_nernst_she: e_nernst,
                i0_a_cm2: exchange_current_density(dg, Z_ORR, cond.temperature),
                alpha: material.orr.alpha,
                z: Z_ORR,
                i_lim_a_cm2: i_lim,
                t_k,
            });
        }

        // HER: 2H₂O + 2e⁻ → H₂ + 2OH⁻
        {
            let dg = validated_delta_g(
                coeffs(material.her.coeff_stem)?,
                material.id,
                CathodicKind::Her.label(),
                cond.chloride_m,
                cond.temperature,
                cond.ph,
                NRL_PH_RANGE,
            )?;
            let a_ox = water_g_cm3.max(ACTIVITY_FLOOR);
            let a_red = (c_oh / 1000.0 * M_OH).powi(2).max(ACTIVITY_FLOOR);
            let e_nernst = E0_HER_ALK + (R * t_k / (Z_HER as f64 * F)) * (a_ox / a_red).ln();
            let i_lim = Z_HER as f64 * F * D_H2O * (water_g_cm3 / M_H2) / material.her.delta_cm;
            cathodic.push(CathodicReaction {
                kind: CathodicKind::Her,
                e_nernst_she: e_nernst,
                i0_a_cm2: exchange_current_density(dg, Z_HER, cond.temperature),
                alpha: material.her.alpha,
                z: Z_HER,
                i_lim_a_cm2: i_lim,
                t_k,
            });
        }

        let mut anodic = Vec::with_capacity(material.anodic.len());
        for params in material.anodic {
            let dg = validated_delta_g(
                coeffs(params.coeff_stem)?,
                material.id,
                params.kind.label(),
                cond.chloride_m,
                cond.temperature,
                cond.ph,
                NRL_PH_RANGE,
            )?;
            let z = material.n_electrons;
            let e_nernst =
                material.e0_oxidation_she + (R * t_k / (z as f64 * F)) * C_ION_DEFAULT_M.ln();
            let film = (params.kind == AnodicKind::Passivation)
                .then(|| material.film.map(|f| f.areal_resistance_ohm_cm2()))
                .flatten();
            anodic.push(AnodicReaction {
                kind: params.kind,
                e_nernst_she: e_nernst,
                i0_a_cm2: exchange_current_density(dg, z, cond.temperature),
                beta: params.beta,
                z,
                film_resistance_ohm_cm2: film,
                t_k,
            });
        }

        Ok(ElectrodeKinetics { material, cathodic, anodic })
    }

    /// Replace the ORR diffusion limit, e.g. with a Sherwood-derived value.
    pub fn set_orr_limit(&mut self, i_lim_a_cm2: f64) {
        for r in &mut self.cathodic {
            if r.kind == CathodicKind::Orr {
                r.i_lim_a_cm2 = i_lim_a_cm2;
            }
        }
    }

    /// Summed anodic branch current (A/cm², ≥ 0).
    pub fn anodic_current(&self, e_she: f64) -> CorrosionResult<f64> {
        let mut total = 0.0;
        for r in &self.anodic {
            total += r.current(e_she)?;
        }
        Ok(total)
    }

    /// Summed cathodic branch current (A/cm², ≤ 0).
    pub fn cathodic_current(&self, e_she: f64) -> f64 {
        self.cathodic.iter().map(|r| r.current(e_she)).sum()
    }

    /// Net current (A/cm²).
    pub fn net_current(&self, e_she: f64) -> CorrosionResult<f64> {
        Ok(self.anodic_current(e_she)? + self.cathodic_current(e_she))
    }

    pub fn pitting_reaction(&self) -> Option<&AnodicReaction> {
        self.anodic.iter().find(|r| r.kind == AnodicKind::Pitting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn catalogs() -> CatalogSet {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("data");
        CatalogSet::load(&dir).unwrap()
    }

    fn seawater() -> Conditions {
        Conditions::from_bulk(19_000.0 / 35_453.0, Celsius(25.0), 8.0, 0.0, Some(8.0))
    }

    #[test]
    fn test_material_aliases() {
        assert_eq!(nrl_material("316L").unwrap().id, "SS316");
        assert_eq!(nrl_material("UNS S31600").unwrap().id, "SS316");
        assert_eq!(nrl_material("HY-80").unwrap().id, "HY80");
        assert_eq!(nrl_material("hy100").unwrap().id, "HY100");
        assert_eq!(nrl_material("Inconel 625").unwrap().id, "I625");
        assert!(nrl_material("2205").is_none(), "2205 has no NRL kinetics");
    }

    #[test]
    fn test_electrons_per_dissolution_differ() {
        // n is a material property; a single shared value is wrong.
        assert_eq!(nrl_material("HY80").unwrap().n_electrons, 2);
        assert_eq!(nrl_material("SS316").unwrap().n_electrons, 3);
        assert_eq!(nrl_material("CuNi").unwrap().n_electrons, 1);
    }

    #[test]
    fn test_build_all_materials_in_seawater() {
        let cats = catalogs();
        let cond = seawater();
        for m in &NRL_MATERIALS {
            let kin = ElectrodeKinetics::build(m, &cats, &cond)
                .unwrap_or_else(|e| panic!("{}: {e}", m.id));
            assert_eq!(kin.cathodic.len(), 2);
            assert!(!kin.anodic.is_empty());
            for r in &kin.cathodic {
                assert!(r.i0_a_cm2 > 0.0, "{} {:?} i0", m.id, r.kind);
                assert!(r.i_lim_a_cm2 > 0.0);
            }
        }
    }

    #[test]
    fn test_branch_signs_across_grid() {
        let cats = catalogs();
        let kin = ElectrodeKinetics::build(nrl_material("HY80").unwrap(), &cats, &seawater())
            .unwrap();
        let mut e = -1.5;
        while e <= 1.0 {
            assert!(kin.anodic_current(e).unwrap() >= 0.0);
            assert!(kin.cathodic_current(e) <= 0.0);
            e += 0.05;
        }
    }

    #[test]
    fn test_orr_limit_scales_with_oxygen() {
        let cats = catalogs();
        let m = nrl_material("HY80").unwrap();
        let aerated = ElectrodeKinetics::build(
            m,
            &cats,
            &Conditions::from_bulk(0.54, Celsius(25.0), 8.0, 0.0, Some(8.0)),
        )
        .unwrap();
        let anaerobic = ElectrodeKinetics::build(
            m,
            &cats,
            &Conditions::from_bulk(0.54, Celsius(25.0), 8.0, 0.0, Some(0.01)),
        )
        .unwrap();
        let i_aer = aerated.cathodic[0].i_lim_a_cm2;
        let i_ana = anaerobic.cathodic[0].i_lim_a_cm2;
        let ratio = i_aer / i_ana;
        assert!(
            (700.0..900.0).contains(&ratio),
            "i_lim must scale linearly with DO: ratio = {ratio}"
        );
    }

    #[test]
    fn test_reference_point_reproduction() {
        // Stored fit anchors: ΔG at (0.54 M, 25 °C, pH 8) reproduces the
        // reference values to within 1 J/mol.
        let cats = catalogs();
        for (stem, reference) in [
            ("SS316ORR", 145.0e3),
            ("HY80ORR", 145.0e3),
            ("HY80FeOx", 144.5e3),
            ("SS316Pit", 769.0e3),
            ("cuniCuOx", 112.5e3),
        ] {
            let coeffs = cats.response_surface(stem).unwrap();
            let dg = crate::response_surface::delta_g(
                coeffs,
                0.54,
                Celsius(25.0),
                8.0,
                NRL_PH_RANGE,
            );
            assert!(
                (dg - reference).abs() <= 1.0,
                "{stem}: ΔG = {dg:.3} J/mol vs reference {reference}"
            );
        }
    }

    #[test]
    fn test_velocity_thins_boundary_layer() {
        let m = nrl_material("CuNi").unwrap();
        assert!(m.orr_delta_cm(3.0) < m.orr_delta_cm(0.0));
        // Past the reference velocity the factor saturates instead of
        // going negative.
        assert!(m.orr_delta_cm(100.0) > 0.0);
    }
}
