//! Backend chart resource shapes and client seam.
//!
//! # Responsibility
//! - Serialize grids into the save request accepted by the chart endpoint.
//! - Rebuild grids from the load response.
//! - Validate user input at the save boundary.
//!
//! # Invariants
//! - `chartData` is ordered by row, then column.
//! - Validation happens here, never inside `ChartGrid`.
//! - Unknown `symbol_id` values are dropped on load.

use crate::catalog::SymbolCatalog;
use crate::chart::grid::{CellPos, ChartGrid};
use crate::config::ChartLimits;
use crate::model::symbol::SymbolId;
use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One placed stitch in a save request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDataRecord {
    pub row: u32,
    pub col: u32,
    /// Glyph drawn in the cell.
    pub symbol: String,
    pub name: String,
    pub abbr: String,
    /// Stable id, so the backend can answer loads with `symbol_id`.
    pub symbol_id: SymbolId,
}

/// Body of the create/update chart request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveChartRequest {
    pub title: String,
    #[serde(default)]
    pub notes: String,
    pub rows: u32,
    pub cols: u32,
    #[serde(rename = "chartData")]
    pub chart_data: Vec<ChartDataRecord>,
}

impl SaveChartRequest {
    pub fn from_grid(title: impl Into<String>, notes: impl Into<String>, grid: &ChartGrid) -> Self {
        let chart_data = grid
            .cells()
            .map(|(pos, symbol)| ChartDataRecord {
                row: pos.row,
                col: pos.col,
                symbol: symbol.glyph.clone(),
                name: symbol.name.clone(),
                abbr: symbol.abbreviation.clone(),
                symbol_id: symbol.id,
            })
            .collect();

        Self {
            title: title.into(),
            notes: notes.into(),
            rows: grid.rows(),
            cols: grid.columns(),
            chart_data,
        }
    }

    /// Boundary checks applied before the request leaves the editor.
    pub fn validate(&self, limits: &ChartLimits) -> Result<(), ChartValidationError> {
        if self.title.trim().is_empty() {
            return Err(ChartValidationError::EmptyTitle);
        }
        if !limits.contains(self.rows) {
            return Err(ChartValidationError::DimensionOutOfRange {
                field: "rows",
                value: self.rows,
            });
        }
        if !limits.contains(self.cols) {
            return Err(ChartValidationError::DimensionOutOfRange {
                field: "cols",
                value: self.cols,
            });
        }
        Ok(())
    }
}

/// Identifier returned after a successful save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveChartResponse {
    pub id: String,
}

/// One cell in a load response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedCell {
    pub row: u32,
    pub col: u32,
    pub symbol_id: SymbolId,
}

/// Chart resource as returned by the load endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedChart {
    #[serde(default)]
    pub title: Option<String>,
    pub rows: u32,
    pub cols: u32,
    #[serde(default)]
    pub cells: Vec<LoadedCell>,
}

impl LoadedChart {
    pub fn to_grid(&self, catalog: &SymbolCatalog) -> ChartGrid {
        self.to_grid_with_limits(catalog, &ChartLimits::default())
    }

    pub fn to_grid_with_limits(&self, catalog: &SymbolCatalog, limits: &ChartLimits) -> ChartGrid {
        let mut grid = ChartGrid::with_limits(self.rows, self.cols, limits);
        for cell in &self.cells {
            match catalog.get(cell.symbol_id) {
                Some(symbol) => grid.place(CellPos::new(cell.row, cell.col), symbol),
                None => debug!(
                    "event=chart_load module=chart status=skip row={} col={} symbol_id={}",
                    cell.row, cell.col, cell.symbol_id
                ),
            }
        }
        grid
    }
}

/// Input rejected before contacting the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartValidationError {
    EmptyTitle,
    DimensionOutOfRange { field: &'static str, value: u32 },
}

impl Display for ChartValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "pattern name must not be empty"),
            Self::DimensionOutOfRange { field, value } => {
                write!(f, "chart {field} out of range: {value}")
            }
        }
    }
}

impl Error for ChartValidationError {}

/// Failure reported by a backend client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Request never got an answer.
    Transport(String),
    /// Backend answered with a rejection.
    Rejected { status: u16, message: String },
    NotFound(String),
    /// Response body could not be decoded.
    InvalidResponse(String),
}

impl Display for BackendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "chart backend unreachable: {message}"),
            Self::Rejected { status, message } => {
                write!(f, "chart backend rejected request ({status}): {message}")
            }
            Self::NotFound(id) => write!(f, "chart not found: {id}"),
            Self::InvalidResponse(message) => {
                write!(f, "invalid chart backend response: {message}")
            }
        }
    }
}

impl Error for BackendError {}

impl From<serde_json::Error> for BackendError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidResponse(value.to_string())
    }
}

/// Client for the chart REST resource. Implemented outside this crate.
pub trait ChartBackend {
    fn save_chart(&self, request: &SaveChartRequest) -> Result<SaveChartResponse, BackendError>;
    fn load_chart(&self, chart_id: &str) -> Result<LoadedChart, BackendError>;
}
