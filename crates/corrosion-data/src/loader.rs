// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — CSV Loaders
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! CSV loading. Unit declarations live in `#` comment lines before the
//! header and are skipped by the reader. A missing required column or an
//! unreadable file is structural and fails the load; a malformed row is
//! logged and skipped.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use corrosion_types::{CorrosionError, CorrosionResult};
use csv::StringRecord;
use tracing::warn;

use crate::records::{
    CptEntry, GalvanicEntry, GradeFamily, MaterialComposition, OrrLimitEntry,
    ResponseSurfaceCoeffs, TempCoefficientEntry, ThresholdEntry,
};

fn open(path: &Path) -> CorrosionResult<csv::Reader<File>> {
    csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| CorrosionError::catalog(path.display().to_string(), e.to_string()))
}

/// Header name → column index, with required-column lookup.
struct Columns {
    names: Vec<String>,
}

impl Columns {
    fn from_reader(reader: &mut csv::Reader<File>, path: &Path) -> CorrosionResult<Self> {
        let headers = reader
            .headers()
            .map_err(|e| CorrosionError::catalog(path.display().to_string(), e.to_string()))?;
        Ok(Columns {
            names: headers.iter().map(str::to_string).collect(),
        })
    }

    fn require(&self, name: &str, path: &Path) -> CorrosionResult<usize> {
        self.names.iter().position(|h| h == name).ok_or_else(|| {
            CorrosionError::catalog(
                path.display().to_string(),
                format!("missing required column '{name}'"),
            )
        })
    }
}

struct Row<'a> {
    record: &'a StringRecord,
}

impl<'a> Row<'a> {
    fn text(&self, idx: usize) -> Result<String, String> {
        self.record
            .get(idx)
            .map(str::to_string)
            .ok_or_else(|| format!("short row, no field {idx}"))
    }

    fn number(&self, idx: usize, name: &str) -> Result<f64, String> {
        let raw = self.text(idx)?;
        let v: f64 = raw
            .parse()
            .map_err(|_| format!("field '{name}' not numeric: '{raw}'"))?;
        if !v.is_finite() {
            return Err(format!("field '{name}' not finite: '{raw}'"));
        }
        Ok(v)
    }

    fn boolean(&self, idx: usize, name: &str) -> Result<bool, String> {
        match self.text(idx)?.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            other => Err(format!("field '{name}' not boolean: '{other}'")),
        }
    }
}

fn for_each_row<T>(
    path: &Path,
    mut parse: impl FnMut(&Row) -> Result<T, String>,
    mut accept: impl FnMut(T),
) -> CorrosionResult<()> {
    let mut reader = open(path)?;
    for (line, record) in reader.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                warn!(file = %path.display(), line, error = %e, "skipping unreadable row");
                continue;
            }
        };
        match parse(&Row { record: &record }) {
            Ok(v) => accept(v),
            Err(e) => warn!(file = %path.display(), line, error = %e, "skipping malformed row"),
        }
    }
    Ok(())
}

pub fn load_materials(path: &Path) -> CorrosionResult<BTreeMap<String, MaterialComposition>> {
    let mut reader = open(path)?;
    let cols = Columns::from_reader(&mut reader, path)?;
    let name = cols.require("common_name", path)?;
    let uns = cols.require("UNS", path)?;
    let cr = cols.require("Cr", path)?;
    let ni = cols.require("Ni", path)?;
    let mo = cols.require("Mo", path)?;
    let n = cols.require("N", path)?;
    let fe_bal = cols.require("Fe_bal", path)?;
    let density = cols.require("density_kg_m3", path)?;
    let grade = cols.require("grade_type", path)?;
    let electrons = cols.require("n_electrons", path)?;
    let source = cols.require("source", path)?;
    drop(reader);

    let mut out = BTreeMap::new();
    for_each_row(
        path,
        |row| {
            let grade_raw = row.text(grade)?;
            let family = GradeFamily::parse(&grade_raw)
                .ok_or_else(|| format!("unknown grade_type '{grade_raw}'"))?;
            let mat = MaterialComposition {
                common_name: row.text(name)?,
                uns: row.text(uns)?,
                cr_wt_pct: row.number(cr, "Cr")?,
                ni_wt_pct: row.number(ni, "Ni")?,
                mo_wt_pct: row.number(mo, "Mo")?,
                n_wt_pct: row.number(n, "N")?,
                fe_bal: row.boolean(fe_bal, "Fe_bal")?,
                density_kg_m3: row.number(density, "density_kg_m3")?,
                grade_type: family,
                n_electrons: row.number(electrons, "n_electrons")? as u32,
                source: row.text(source)?,
            };
            if mat.source.is_empty() {
                return Err("empty source citation".into());
            }
            if mat.fe_bal && mat.fe_wt_pct().unwrap_or(-1.0) < 0.0 {
                return Err(format!(
                    "Fe-balanced composition for '{}' exceeds 100 wt%",
                    mat.common_name
                ));
            }
            Ok(mat)
        },
        |mat| {
            out.insert(mat.common_name.clone(), mat);
        },
    )?;
    if out.is_empty() {
        return Err(CorrosionError::catalog(
            path.display().to_string(),
            "no valid material rows",
        ));
    }
    Ok(out)
}

pub fn load_cpt(path: &Path) -> CorrosionResult<BTreeMap<String, CptEntry>> {
    let mut out = BTreeMap::new();
    let mut reader = open(path)?;
    let cols = Columns::from_reader(&mut reader, path)?;
    let material = cols.require("material", path)?;
    let uns = cols.require("UNS", path)?;
    let cpt = cols.require("CPT_C", path)?;
    let cct = cols.require("CCT_C", path)?;
    let solution = cols.require("test_solution", path)?;
    let source = cols.require("source", path)?;
    let notes = cols.require("notes", path)?;
    drop(reader);

    for_each_row(
        path,
        |row| {
            let entry = CptEntry {
                material: row.text(material)?,
                uns: row.text(uns)?,
                cpt_c: row.number(cpt, "CPT_C")?,
                cct_c: row.number(cct, "CCT_C")?,
                test_solution: row.text(solution)?,
                source: row.text(source)?,
                notes: row.text(notes)?,
            };
            if entry.source.is_empty() {
                return Err("empty source citation".into());
            }
            Ok(entry)
        },
        |e| {
            out.insert(e.material.clone(), e);
        },
    )?;
    Ok(out)
}

pub fn load_galvanic_series(path: &Path) -> CorrosionResult<BTreeMap<String, GalvanicEntry>> {
    let mut out = BTreeMap::new();
    let mut reader = open(path)?;
    let cols = Columns::from_reader(&mut reader, path)?;
    let material = cols.require("material", path)?;
    let e_sce = cols.require("E_SCE_V", path)?;
    let e_she = cols.require("E_SHE_V", path)?;
    let category = cols.require("activity_category", path)?;
    let source = cols.require("source", path)?;
    let notes = cols.require("notes", path)?;
    drop(reader);

    for_each_row(
        path,
        |row| {
            let entry = GalvanicEntry {
                material: row.text(material)?,
                e_sce_v: row.number(e_sce, "E_SCE_V")?,
                e_she_v: row.number(e_she, "E_SHE_V")?,
                activity_category: row.text(category)?,
                source: row.text(source)?,
                notes: row.text(notes)?,
            };
            if entry.source.is_empty() {
                return Err("empty source citation".into());
            }
            // The SHE column must be the fixed-offset image of the SCE value.
            let expected_she = entry.e_sce_v + corrosion_types::constants::E_SCE_VS_SHE;
            if (entry.e_she_v - expected_she).abs() > 1.0e-3 {
                return Err(format!(
                    "E_SHE_V {:.3} inconsistent with E_SCE_V {:.3} (+0.241 V)",
                    entry.e_she_v, entry.e_sce_v
                ));
            }
            Ok(entry)
        },
        |e| {
            out.insert(e.material.clone(), e);
        },
    )?;
    Ok(out)
}

pub fn load_orr_limits(path: &Path) -> CorrosionResult<Vec<OrrLimitEntry>> {
    let mut out = Vec::new();
    let mut reader = open(path)?;
    let cols = Columns::from_reader(&mut reader, path)?;
    let condition = cols.require("condition", path)?;
    let temperature = cols.require("temperature_C", path)?;
    let electrolyte = cols.require("electrolyte", path)?;
    let a_m2 = cols.require("i_lim_A_m2", path)?;
    let ma_cm2 = cols.require("i_lim_mA_cm2", path)?;
    let source = cols.require("source", path)?;
    let notes = cols.require("notes", path)?;
    drop(reader);

    for_each_row(
        path,
        |row| {
            let entry = OrrLimitEntry {
                condition: row.text(condition)?,
                temperature_c: row.number(temperature, "temperature_C")?,
                electrolyte: row.text(electrolyte)?,
                i_lim_a_m2: row.number(a_m2, "i_lim_A_m2")?,
                i_lim_ma_cm2: row.number(ma_cm2, "i_lim_mA_cm2")?,
                source: row.text(source)?,
                notes: row.text(notes)?,
            };
            if entry.source.is_empty() {
                return Err("empty source citation".into());
            }
            Ok(entry)
        },
        |e| out.push(e),
    )?;
    Ok(out)
}

pub fn load_thresholds(path: &Path) -> CorrosionResult<BTreeMap<String, ThresholdEntry>> {
    let mut out = BTreeMap::new();
    let mut reader = open(path)?;
    let cols = Columns::from_reader(&mut reader, path)?;
    let material = cols.require("material", path)?;
    let uns = cols.require("UNS", path)?;
    let threshold = cols.require("threshold_25C_mg_L", path)?;
    let ph = cols.require("pH", path)?;
    let temperature = cols.require("temperature_C", path)?;
    let source = cols.require("source", path)?;
    let notes = cols.require("notes", path)?;
    let category = cols.require("resistance_category", path)?;
    drop(reader);

    for_each_row(
        path,
        |row| {
            let entry = ThresholdEntry {
                material: row.text(material)?,
                uns: row.text(uns)?,
                threshold_25c_mg_l: row.number(threshold, "threshold_25C_mg_L")?,
                ph: row.number(ph, "pH")?,
                temperature_c: row.number(temperature, "temperature_C")?,
                source: row.text(source)?,
                notes: row.text(notes)?,
                resistance_category: row.text(category)?,
            };
            if entry.source.is_empty() {
                return Err("empty source citation".into());
            }
            Ok(entry)
        },
        |e| {
            out.insert(e.material.clone(), e);
        },
    )?;
    Ok(out)
}

pub fn load_temp_coefficients(
    path: &Path,
) -> CorrosionResult<BTreeMap<GradeFamily, TempCoefficientEntry>> {
    let mut out = BTreeMap::new();
    let mut reader = open(path)?;
    let cols = Columns::from_reader(&mut reader, path)?;
    let grade = cols.require("grade_type", path)?;
    let k = cols.require("temp_coefficient_per_C", path)?;
    let source = cols.require("source", path)?;
    let notes = cols.require("notes", path)?;
    let formula = cols.require("formula", path)?;
    drop(reader);

    for_each_row(
        path,
        |row| {
            let raw = row.text(grade)?;
            let family =
                GradeFamily::parse(&raw).ok_or_else(|| format!("unknown grade_type '{raw}'"))?;
            let entry = TempCoefficientEntry {
                grade_type: family,
                k_per_c: row.number(k, "temp_coefficient_per_C")?,
                source: row.text(source)?,
                notes: row.text(notes)?,
                formula: row.text(formula)?,
            };
            if entry.source.is_empty() {
                return Err("empty source citation".into());
            }
            Ok(entry)
        },
        |e| {
            out.insert(e.grade_type, e);
        },
    )?;
    Ok(out)
}

/// Load a single-row six-coefficient response-surface file. Any defect here
/// is structural: there is exactly one row and it must parse.
pub fn load_coeffs(path: &Path) -> CorrosionResult<ResponseSurfaceCoeffs> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| CorrosionError::catalog(path.display().to_string(), e.to_string()))?;

    let record = reader
        .records()
        .next()
        .ok_or_else(|| CorrosionError::catalog(path.display().to_string(), "empty file"))?
        .map_err(|e| CorrosionError::catalog(path.display().to_string(), e.to_string()))?;

    if record.len() != 6 {
        return Err(CorrosionError::catalog(
            path.display().to_string(),
            format!("expected 6 coefficients, got {}", record.len()),
        ));
    }
    let mut values = [0.0_f64; 6];
    for (i, field) in record.iter().enumerate() {
        values[i] = field.parse().map_err(|_| {
            CorrosionError::catalog(
                path.display().to_string(),
                format!("coefficient {i} not numeric: '{field}'"),
            )
        })?;
        if !values[i].is_finite() {
            return Err(CorrosionError::catalog(
                path.display().to_string(),
                format!("coefficient {i} not finite"),
            ));
        }
    }
    Ok(ResponseSurfaceCoeffs {
        p00: values[0],
        p10: values[1],
        p01: values[2],
        p20: values[3],
        p11: values[4],
        p02: values[5],
    })
}
