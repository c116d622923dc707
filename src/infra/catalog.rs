//! CSV ingestion for BTU requirement tables and vendor system catalogs.
//!
//! Both readers accept the snake_case headers used by exported catalogs and
//! the camelCase headers of the vendor spreadsheets (`boxSize`, `btu448A`,
//! `referSysTotalCost`, ...).

use std::{
    collections::HashMap,
    fs::{self, File},
    io::Read,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{BoxType, CapacityEntry, CapacityTable, EquipmentOffering, VendorCatalog};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: {message}")]
    Row { line: u64, message: String },
    #[error("{}: {source}", .path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<CatalogError>,
    },
    #[error("no vendor catalogs (*.csv) found in {}", .0.display())]
    EmptyDirectory(PathBuf),
    #[error("no usable capacity rows")]
    NoRows,
    #[error("{} and {} both name vendor `{vendor}`", .first.display(), .second.display())]
    DuplicateVendor {
        vendor: String,
        first: PathBuf,
        second: PathBuf,
    },
}

impl CatalogError {
    fn in_file(self, path: &Path) -> Self {
        CatalogError::InFile {
            path: path.to_path_buf(),
            source: Box::new(self),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CapacityRow {
    #[serde(alias = "boxType")]
    box_type: String,
    #[serde(default, alias = "boxSize")]
    box_size: Option<String>,
    #[serde(default)]
    width: Option<String>,
    #[serde(default)]
    depth: Option<String>,
    #[serde(alias = "requiredBTU")]
    required_btu: String,
}

impl CapacityRow {
    fn into_entry(self) -> Result<CapacityEntry, String> {
        let box_type: BoxType = self.box_type.parse().map_err(|err| format!("{err}"))?;
        let (width, depth) = match (self.box_size, self.width, self.depth) {
            (Some(size), _, _) => parse_size(&size)?,
            (None, Some(width), Some(depth)) => {
                (parse_count("width", &width)?, parse_count("depth", &depth)?)
            }
            _ => return Err("row has neither boxSize nor width/depth".to_string()),
        };
        Ok(CapacityEntry {
            box_type,
            width,
            depth,
            required_btu: parse_count("requiredBTU", &self.required_btu)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OfferingRow {
    #[serde(alias = "boxType")]
    box_type: String,
    #[serde(alias = "referModelNumber")]
    condensing_unit_model: String,
    #[serde(alias = "horsePower")]
    horsepower: String,
    #[serde(alias = "evapCoil")]
    evaporator_model: String,
    #[serde(alias = "qtyEvapCoil", alias = "evaporator_quantity")]
    evaporator_qty: String,
    #[serde(alias = "btu448A", alias = "rated_btu")]
    btu_rating_448a: String,
    #[serde(alias = "referSysTotalCost", alias = "vendor_cost")]
    total_system_cost: String,
}

impl OfferingRow {
    fn into_offering(self) -> Result<EquipmentOffering, String> {
        let box_type: BoxType = self.box_type.parse().map_err(|err| format!("{err}"))?;
        let horsepower = parse_amount("horsepower", &self.horsepower)?;
        if horsepower <= 0.0 {
            return Err(format!("horsepower: `{}` must be positive", self.horsepower));
        }
        let vendor_cost = parse_amount("total_system_cost", &self.total_system_cost)?;
        if vendor_cost < 0.0 {
            return Err(format!(
                "total_system_cost: `{}` must not be negative",
                self.total_system_cost
            ));
        }
        if self.condensing_unit_model.is_empty() || self.evaporator_model.is_empty() {
            return Err("model identifiers must not be empty".to_string());
        }

        Ok(EquipmentOffering {
            box_type,
            condensing_unit_model: self.condensing_unit_model,
            horsepower,
            evaporator_model: self.evaporator_model,
            evaporator_quantity: parse_count("evaporator_qty", &self.evaporator_qty)?,
            rated_btu: parse_count("btu_rating_448a", &self.btu_rating_448a)?,
            vendor_cost,
        })
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn record_line(record: &csv::StringRecord) -> u64 {
    record.position().map(|pos| pos.line()).unwrap_or(0)
}

/// Parses a money or quantity cell; tolerates `$` and thousands separators.
fn parse_amount(field: &str, raw: &str) -> Result<f64, String> {
    let cleaned: String = raw
        .chars()
        .filter(|ch| !matches!(ch, '$' | ',' | ' '))
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| format!("{field}: `{raw}` is not a number"))
}

fn parse_count(field: &str, raw: &str) -> Result<u32, String> {
    let value = parse_amount(field, raw)?;
    if value <= 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(format!("{field}: `{raw}` is not a positive whole number"));
    }
    Ok(value as u32)
}

/// Parses a `WxD` size key such as `8x10`.
fn parse_size(raw: &str) -> Result<(u32, u32), String> {
    let (width, depth) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("boxSize: `{raw}` is not in WxD form"))?;
    Ok((
        parse_count("boxSize", width.trim())?,
        parse_count("boxSize", depth.trim())?,
    ))
}

/// Reads a capacity table. Rows that cannot be read are skipped with a warning.
pub fn parse_capacity_table<R: Read>(reader: R) -> Result<CapacityTable, CatalogError> {
    let mut rdr = csv_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut entries = Vec::new();

    for record in rdr.records() {
        let record = record?;
        let line = record_line(&record);
        let parsed = record
            .deserialize::<CapacityRow>(Some(&headers))
            .map_err(|err| err.to_string())
            .and_then(CapacityRow::into_entry);
        match parsed {
            Ok(entry) => entries.push(entry),
            Err(message) => warn!(line, %message, "skipping capacity row"),
        }
    }

    if entries.is_empty() {
        return Err(CatalogError::NoRows);
    }
    Ok(CapacityTable::from_entries(entries))
}

/// Reads one vendor's catalog. Any malformed row fails the whole catalog.
pub fn parse_vendor_catalog<R: Read>(
    vendor: &str,
    reader: R,
) -> Result<VendorCatalog, CatalogError> {
    let mut rdr = csv_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut offerings = Vec::new();

    for record in rdr.records() {
        let record = record?;
        let line = record_line(&record);
        let offering = record
            .deserialize::<OfferingRow>(Some(&headers))
            .map_err(|err| err.to_string())
            .and_then(OfferingRow::into_offering)
            .map_err(|message| CatalogError::Row { line, message })?;
        offerings.push(offering);
    }

    Ok(VendorCatalog::new(vendor, offerings))
}

pub fn load_capacity_table(path: &Path) -> Result<CapacityTable, CatalogError> {
    let file = open(path)?;
    let table = parse_capacity_table(file).map_err(|err| err.in_file(path))?;
    info!(path = %path.display(), rows = table.len(), "loaded capacity table");
    Ok(table)
}

pub fn load_vendor_catalog(path: &Path) -> Result<VendorCatalog, CatalogError> {
    let file = open(path)?;
    let vendor = vendor_name_from_path(path);
    let catalog = parse_vendor_catalog(&vendor, file).map_err(|err| err.in_file(path))?;
    info!(vendor = %catalog.vendor, systems = catalog.len(), "loaded vendor catalog");
    Ok(catalog)
}

/// Loads every `*.csv` in `dir` as a vendor catalog, ordered by vendor name.
///
/// Two files that map to the same vendor name are rejected.
pub fn load_catalog_dir(dir: &Path) -> Result<Vec<VendorCatalog>, CatalogError> {
    let entries = fs::read_dir(dir).map_err(|source| CatalogError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
        })
        .collect();

    if paths.is_empty() {
        return Err(CatalogError::EmptyDirectory(dir.to_path_buf()));
    }
    paths.sort();

    let mut seen: HashMap<String, &Path> = HashMap::new();
    let mut catalogs = Vec::with_capacity(paths.len());
    for path in &paths {
        let catalog = load_vendor_catalog(path)?;
        if let Some(first) = seen.insert(catalog.vendor.clone(), path.as_path()) {
            return Err(CatalogError::DuplicateVendor {
                vendor: catalog.vendor,
                first: first.to_path_buf(),
                second: path.clone(),
            });
        }
        catalogs.push(catalog);
    }
    catalogs.sort_by(|a, b| a.vendor.cmp(&b.vendor));
    Ok(catalogs)
}

/// `Turbo_Air.csv` becomes vendor `Turbo Air`.
pub fn vendor_name_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().replace('_', " ").trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "Vendor".to_string())
}

fn open(path: &Path) -> Result<File, CatalogError> {
    File::open(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}
