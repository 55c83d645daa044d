//! Downloadable chart file.
//!
//! # Responsibility
//! - Encode a grid as the JSON document users download and re-import.
//! - Resolve symbol records back to catalog symbols on import.
//!
//! # Invariants
//! - `data` keys have the form `"<row>-<column>"`.
//! - `created` is ISO-8601 UTC with millisecond precision and `Z` suffix.
//! - Records that cannot be resolved, and malformed keys, are dropped on import.

use crate::catalog::SymbolCatalog;
use crate::chart::grid::{CellPos, ChartGrid};
use crate::config::ChartLimits;
use crate::model::symbol::{Symbol, SymbolId};
use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

static CELL_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)-(\d+)\s*$").expect("valid cell key regex"));

/// Symbol as embedded in a chart file cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRecord {
    /// Absent in files written before symbols had stable ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SymbolId>,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub abbr: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ascii: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl From<&Symbol> for SymbolRecord {
    fn from(symbol: &Symbol) -> Self {
        Self {
            id: Some(symbol.id),
            symbol: symbol.glyph.clone(),
            name: symbol.name.clone(),
            abbr: symbol.abbreviation.clone(),
            description: symbol.description.clone(),
            ascii: symbol.ascii_fallback.clone(),
            category: Some(symbol.category.as_str().to_string()),
        }
    }
}

impl SymbolRecord {
    /// Looks the record up in `catalog`.
    ///
    /// A record carrying an id resolves by that id only. Records without an
    /// id predate stable ids and fall back to glyph, then name.
    pub fn resolve(&self, catalog: &SymbolCatalog) -> Option<Arc<Symbol>> {
        match self.id {
            Some(id) => catalog.get(id),
            None => catalog
                .find_by_glyph(&self.symbol)
                .or_else(|| catalog.find_by_name(&self.name)),
        }
    }
}

/// Chart download document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartFile {
    pub name: String,
    pub rows: u32,
    pub columns: u32,
    pub data: BTreeMap<String, SymbolRecord>,
    pub created: String,
}

impl ChartFile {
    pub fn from_grid(name: impl Into<String>, grid: &ChartGrid, created: DateTime<Utc>) -> Self {
        let data = grid
            .cells()
            .map(|(pos, symbol)| (cell_key(pos), SymbolRecord::from(&**symbol)))
            .collect();

        Self {
            name: name.into(),
            rows: grid.rows(),
            columns: grid.columns(),
            data,
            created: created.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Same as [`ChartFile::from_grid`], stamped with the current time.
    pub fn from_grid_now(name: impl Into<String>, grid: &ChartGrid) -> Self {
        Self::from_grid(name, grid, Utc::now())
    }

    pub fn from_json(json: &str) -> Result<Self, ChartFileError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ChartFileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parsed `created` timestamp, if well formed.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created)
            .ok()
            .map(|value| value.with_timezone(&Utc))
    }

    /// Rebuilds the grid under the default limits, dropping cells that
    /// cannot be resolved.
    pub fn to_grid(&self, catalog: &SymbolCatalog) -> ChartGrid {
        self.to_grid_with_limits(catalog, &ChartLimits::default())
    }

    pub fn to_grid_with_limits(&self, catalog: &SymbolCatalog, limits: &ChartLimits) -> ChartGrid {
        let mut grid = ChartGrid::with_limits(self.rows, self.columns, limits);
        for (key, record) in &self.data {
            let Some(pos) = parse_cell_key(key) else {
                debug!(
                    "event=chart_file_import module=chart status=skip reason=bad_key key={}",
                    key
                );
                continue;
            };
            match record.resolve(catalog) {
                Some(symbol) => grid.place(pos, symbol),
                None => debug!(
                    "event=chart_file_import module=chart status=skip reason=unknown_symbol key={} name={}",
                    key, record.name
                ),
            }
        }
        grid
    }
}

/// Formats a `data` key.
pub fn cell_key(pos: CellPos) -> String {
    format!("{}-{}", pos.row, pos.col)
}

/// Parses a `data` key; `None` for anything but `<row>-<column>`.
pub fn parse_cell_key(key: &str) -> Option<CellPos> {
    let captures = CELL_KEY_RE.captures(key)?;
    let row = captures.get(1)?.as_str().parse().ok()?;
    let col = captures.get(2)?.as_str().parse().ok()?;
    Some(CellPos::new(row, col))
}

#[derive(Debug)]
pub enum ChartFileError {
    Json(serde_json::Error),
}

impl Display for ChartFileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid chart file: {err}"),
        }
    }
}

impl Error for ChartFileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ChartFileError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
