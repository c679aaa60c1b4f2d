// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Catalog Set
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! The process-wide catalog set: every tabulated table loaded once from a
//! data directory, immutable afterwards.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use corrosion_types::{CorrosionError, CorrosionResult};
use tracing::info;

use crate::aliases::{alias_target, normalize};
use crate::loader;
use crate::records::{
    CptEntry, GalvanicEntry, GradeFamily, MaterialComposition, OrrLimitEntry,
    ResponseSurfaceCoeffs, TempCoefficientEntry, ThresholdEntry,
};

#[derive(Debug)]
pub struct CatalogSet {
    pub materials: BTreeMap<String, MaterialComposition>,
    pub cpt: BTreeMap<String, CptEntry>,
    pub galvanic: BTreeMap<String, GalvanicEntry>,
    pub orr_limits: Vec<OrrLimitEntry>,
    pub thresholds: BTreeMap<String, ThresholdEntry>,
    pub temp_coefficients: BTreeMap<GradeFamily, TempCoefficientEntry>,
    /// Response-surface coefficients keyed by file stem, e.g. "HY80ORR".
    pub response_surfaces: BTreeMap<String, ResponseSurfaceCoeffs>,
    data_dir: PathBuf,
}

impl CatalogSet {
    /// Load every table from `dir`. Any structural failure aborts the load;
    /// there is no partially constructed catalog.
    pub fn load(dir: &Path) -> CorrosionResult<Self> {
        let materials = loader::load_materials(&dir.join("materials_compositions.csv"))?;
        let cpt = loader::load_cpt(&dir.join("astm_g48_cpt_data.csv"))?;
        let galvanic = loader::load_galvanic_series(&dir.join("astm_g82_galvanic_series.csv"))?;
        let orr_limits = loader::load_orr_limits(&dir.join("orr_diffusion_limits.csv"))?;
        let thresholds = loader::load_thresholds(&dir.join("iso18070_chloride_thresholds.csv"))?;
        let temp_coefficients =
            loader::load_temp_coefficients(&dir.join("iso18070_temperature_coefficients.csv"))?;

        let mut response_surfaces = BTreeMap::new();
        for entry in std::fs::read_dir(dir).map_err(|e| {
            CorrosionError::catalog(dir.display().to_string(), e.to_string())
        })? {
            let entry = entry
                .map_err(|e| CorrosionError::catalog(dir.display().to_string(), e.to_string()))?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if let Some(stem) = name.strip_suffix("Coeffs.csv") {
                let coeffs = loader::load_coeffs(&path)?;
                response_surfaces.insert(stem.to_string(), coeffs);
            }
        }

        info!(
            materials = materials.len(),
            cpt = cpt.len(),
            galvanic = galvanic.len(),
            orr_limits = orr_limits.len(),
            thresholds = thresholds.len(),
            response_surfaces = response_surfaces.len(),
            "catalogs loaded from {}",
            dir.display()
        );

        Ok(CatalogSet {
            materials,
            cpt,
            galvanic,
            orr_limits,
            thresholds,
            temp_coefficients,
            response_surfaces,
            data_dir: dir.to_path_buf(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Resolve a user-supplied designation to a canonical catalog key via
    /// normalization, the alias map, then UNS codes.
    pub fn resolve(&self, name: &str) -> Option<String> {
        let norm = normalize(name);
        if let Some(target) = alias_target(&norm) {
            return Some(target.to_string());
        }
        for key in self.materials.keys() {
            if normalize(key) == norm {
                return Some(key.clone());
            }
        }
        for (key, mat) in &self.materials {
            if normalize(&mat.uns) == norm {
                return Some(key.clone());
            }
        }
        None
    }

    pub fn material(&self, name: &str) -> Option<&MaterialComposition> {
        let key = self.resolve(name)?;
        self.materials.get(&key)
    }

    pub fn cpt_entry(&self, name: &str) -> Option<&CptEntry> {
        let key = self.resolve(name)?;
        self.cpt.get(&key)
    }

    pub fn threshold_entry(&self, name: &str) -> Option<&ThresholdEntry> {
        let key = self.resolve(name)?;
        self.thresholds.get(&key)
    }

    pub fn galvanic_entry(&self, name: &str) -> Option<&GalvanicEntry> {
        // The series lists pure metals and states that are not composition
        // rows, so fall back to the raw name when resolution fails.
        let key = self.resolve(name).unwrap_or_else(|| name.to_string());
        if let Some(e) = self.galvanic.get(&key) {
            return Some(e);
        }
        // Passive state is the default for alloys listed in both states.
        if let Some(e) = self.galvanic.get(&format!("{key}_passive")) {
            return Some(e);
        }
        let norm = normalize(&key);
        self.galvanic.values().find(|e| normalize(&e.material) == norm)
    }

    pub fn temp_coefficient(&self, family: GradeFamily) -> Option<f64> {
        self.temp_coefficients.get(&family).map(|e| e.k_per_c)
    }

    /// Tabulated ORR diffusion limit closest in temperature for the given
    /// electrolyte.
    pub fn orr_limit(&self, electrolyte: &str, temperature_c: f64) -> Option<&OrrLimitEntry> {
        self.orr_limits
            .iter()
            .filter(|e| e.electrolyte.eq_ignore_ascii_case(electrolyte))
            .min_by(|a, b| {
                let da = (a.temperature_c - temperature_c).abs();
                let db = (b.temperature_c - temperature_c).abs();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Response-surface coefficients by file stem (e.g. "SS316ORR").
    pub fn response_surface(&self, stem: &str) -> Option<&ResponseSurfaceCoeffs> {
        self.response_surfaces.get(stem)
    }
}

static CATALOGS: OnceLock<CatalogSet> = OnceLock::new();

/// Install the process-wide catalog set, loading it on first call. All
/// callers observe the same fully constructed set; a failed load leaves
/// nothing installed.
pub fn global(dir: &Path) -> CorrosionResult<&'static CatalogSet> {
    if let Some(set) = CATALOGS.get() {
        return Ok(set);
    }
    let loaded = CatalogSet::load(dir)?;
    Ok(CATALOGS.get_or_init(|| loaded))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("data")
    }

    #[test]
    fn test_load_all_catalogs() {
        let set = CatalogSet::load(&data_dir()).unwrap();
        assert!(set.materials.len() >= 10, "material catalog too small");
        assert!(set.cpt.len() >= 5);
        assert!(set.galvanic.len() >= 10);
        assert!(set.response_surfaces.len() >= 21);
    }

    #[test]
    fn test_load_is_deterministic() {
        let a = CatalogSet::load(&data_dir()).unwrap();
        let b = CatalogSet::load(&data_dir()).unwrap();
        assert_eq!(a.materials.len(), b.materials.len());
        let ma = a.material("SS316").unwrap();
        let mb = b.material("SS316").unwrap();
        assert_eq!(ma.cr_wt_pct.to_bits(), mb.cr_wt_pct.to_bits());
        let ca = a.response_surface("SS316ORR").unwrap();
        let cb = b.response_surface("SS316ORR").unwrap();
        assert_eq!(ca.p00.to_bits(), cb.p00.to_bits());
    }

    #[test]
    fn test_alias_resolution() {
        let set = CatalogSet::load(&data_dir()).unwrap();
        for alias in ["316", "316L", "UNS S31600", "UNS S31603", "ss316"] {
            assert_eq!(set.resolve(alias).as_deref(), Some("SS316"), "alias {alias}");
        }
        assert_eq!(set.resolve("HY-80").as_deref(), Some("HY80"));
        assert_eq!(set.resolve("HY-100").as_deref(), Some("HY100"));
        assert_eq!(set.resolve("Carbon Steel").as_deref(), Some("carbon_steel"));
        assert_eq!(set.resolve("S32205").as_deref(), Some("2205"));
        assert!(set.resolve("unobtainium").is_none());
    }

    #[test]
    fn test_every_row_carries_citation() {
        let set = CatalogSet::load(&data_dir()).unwrap();
        assert!(set.materials.values().all(|m| !m.source.is_empty()));
        assert!(set.cpt.values().all(|e| !e.source.is_empty()));
        assert!(set.galvanic.values().all(|e| !e.source.is_empty()));
        assert!(set.thresholds.values().all(|e| !e.source.is_empty()));
        assert!(set.orr_limits.iter().all(|e| !e.source.is_empty()));
    }

    #[test]
    fn test_galvanic_she_offset() {
        let set = CatalogSet::load(&data_dir()).unwrap();
        for e in set.galvanic.values() {
            assert!(
                (e.e_she_v - (e.e_sce_v + 0.241)).abs() < 1e-3,
                "{}: SHE column must be SCE + 0.241 V",
                e.material
            );
        }
    }

    #[test]
    fn test_orr_limit_nearest_temperature() {
        let set = CatalogSet::load(&data_dir()).unwrap();
        let e = set.orr_limit("seawater", 30.0).unwrap();
        assert_eq!(e.condition, "seawater_25C");
        let e = set.orr_limit("seawater", 55.0).unwrap();
        assert_eq!(e.condition, "seawater_60C");
    }

    #[test]
    fn test_tabulated_cpt_for_ss316() {
        let set = CatalogSet::load(&data_dir()).unwrap();
        let e = set.cpt_entry("316L").unwrap();
        assert!((e.cpt_c - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_galvanic_passive_default() {
        let set = CatalogSet::load(&data_dir()).unwrap();
        let e = set.galvanic_entry("SS316").unwrap();
        assert_eq!(e.material, "SS316_passive");
    }
}
