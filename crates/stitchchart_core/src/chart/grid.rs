//! Sparse chart grid.
//!
//! # Responsibility
//! - Own the mapping from cell positions to placed symbols.
//! - Derive stitch statistics and export snapshots.
//!
//! # Invariants
//! - `rows` and `columns` always lie inside the limits used at creation.
//! - An absent cell means the background placeholder.
//! - Placement does not bounds-check; cells outside the grid are kept as
//!   orphans until explicitly pruned.

use crate::catalog::{empty_symbol, SymbolCatalog};
use crate::config::ChartLimits;
use crate::model::symbol::{Symbol, SymbolId};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Cell address. Ordered by row, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub row: u32,
    pub col: u32,
}

impl CellPos {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl From<(u32, u32)> for CellPos {
    fn from((row, col): (u32, u32)) -> Self {
        Self { row, col }
    }
}

/// One exported cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedCell {
    pub row: u32,
    pub col: u32,
    pub symbol: SymbolId,
}

/// Persistence snapshot of a grid, cells ordered by row then column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartExport {
    pub name: String,
    pub rows: u32,
    pub columns: u32,
    pub cells: Vec<ExportedCell>,
}

/// In-memory stitch chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGrid {
    rows: u32,
    columns: u32,
    limits: ChartLimits,
    cells: BTreeMap<CellPos, Arc<Symbol>>,
}

impl ChartGrid {
    /// Creates an empty grid with dimensions clamped to `[1, 100]`.
    pub fn new(rows: u32, columns: u32) -> Self {
        Self::with_limits(rows, columns, &ChartLimits::default())
    }

    /// Creates an empty grid with dimensions clamped to `limits`.
    pub fn with_limits(rows: u32, columns: u32, limits: &ChartLimits) -> Self {
        Self {
            rows: limits.clamp(rows),
            columns: limits.clamp(columns),
            limits: *limits,
            cells: BTreeMap::new(),
        }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Bounds applied by [`ChartGrid::resize`].
    pub fn limits(&self) -> &ChartLimits {
        &self.limits
    }

    pub fn in_bounds(&self, pos: CellPos) -> bool {
        pos.row < self.rows && pos.col < self.columns
    }

    /// Inserts or overwrites the symbol at `pos`.
    pub fn place(&mut self, pos: CellPos, symbol: Arc<Symbol>) {
        self.cells.insert(pos, symbol);
    }

    /// Reverts `pos` to the background. Returns the removed symbol.
    pub fn clear(&mut self, pos: CellPos) -> Option<Arc<Symbol>> {
        self.cells.remove(&pos)
    }

    /// Removes every cell, orphans included.
    pub fn clear_all(&mut self) {
        self.cells.clear();
    }

    pub fn get(&self, pos: CellPos) -> Option<&Arc<Symbol>> {
        self.cells.get(&pos)
    }

    /// Symbol at `pos`, or the background placeholder when unset.
    pub fn symbol_at(&self, pos: CellPos) -> Arc<Symbol> {
        self.cells.get(&pos).cloned().unwrap_or_else(empty_symbol)
    }

    /// Stored cells in row-then-column order, orphans included.
    pub fn cells(&self) -> impl Iterator<Item = (CellPos, &Arc<Symbol>)> {
        self.cells.iter().map(|(pos, symbol)| (*pos, symbol))
    }

    /// Stored cells of one row in column order.
    pub fn row_cells(&self, row: u32) -> impl Iterator<Item = (CellPos, &Arc<Symbol>)> {
        self.cells
            .range(CellPos::new(row, 0)..=CellPos::new(row, u32::MAX))
            .map(|(pos, symbol)| (*pos, symbol))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Changes dimensions, clamped like [`ChartGrid::with_limits`].
    ///
    /// Cells that fall outside the new shape are kept; growing the grid
    /// again brings them back. Use [`ChartGrid::prune_orphans`] to drop them.
    pub fn resize(&mut self, rows: u32, columns: u32) {
        self.rows = self.limits.clamp(rows);
        self.columns = self.limits.clamp(columns);
    }

    /// Stored positions outside the current shape.
    pub fn orphaned_positions(&self) -> Vec<CellPos> {
        self.cells
            .keys()
            .copied()
            .filter(|pos| !self.in_bounds(*pos))
            .collect()
    }

    /// Drops orphaned cells and returns how many were removed.
    pub fn prune_orphans(&mut self) -> usize {
        let (rows, columns) = (self.rows, self.columns);
        let before = self.cells.len();
        self.cells.retain(|pos, _| pos.row < rows && pos.col < columns);
        before - self.cells.len()
    }

    /// Number of stored cells holding a non-placeholder symbol.
    pub fn stitch_count(&self) -> usize {
        self.cells
            .values()
            .filter(|symbol| !symbol.is_empty_placeholder())
            .count()
    }

    /// Non-placeholder stitches in one row.
    pub fn row_stitch_count(&self, row: u32) -> usize {
        self.row_cells(row)
            .filter(|(_, symbol)| !symbol.is_empty_placeholder())
            .count()
    }

    /// Occurrences per non-placeholder symbol.
    pub fn symbol_usage(&self) -> BTreeMap<SymbolId, usize> {
        let mut usage = BTreeMap::new();
        for symbol in self.cells.values() {
            if symbol.is_empty_placeholder() {
                continue;
            }
            *usage.entry(symbol.id).or_insert(0) += 1;
        }
        usage
    }

    pub fn to_export_payload(&self, name: impl Into<String>) -> ChartExport {
        ChartExport {
            name: name.into(),
            rows: self.rows,
            columns: self.columns,
            cells: self
                .cells
                .iter()
                .map(|(pos, symbol)| ExportedCell {
                    row: pos.row,
                    col: pos.col,
                    symbol: symbol.id,
                })
                .collect(),
        }
    }

    /// Rebuilds a grid from an export snapshot under the default limits.
    ///
    /// Cells referencing symbols absent from `catalog` are dropped.
    pub fn from_import_payload(payload: &ChartExport, catalog: &SymbolCatalog) -> Self {
        Self::from_import_payload_with_limits(payload, catalog, &ChartLimits::default())
    }

    /// Same as [`ChartGrid::from_import_payload`], clamped to `limits`.
    pub fn from_import_payload_with_limits(
        payload: &ChartExport,
        catalog: &SymbolCatalog,
        limits: &ChartLimits,
    ) -> Self {
        let mut grid = Self::with_limits(payload.rows, payload.columns, limits);
        for cell in &payload.cells {
            match catalog.get(cell.symbol) {
                Some(symbol) => grid.place(CellPos::new(cell.row, cell.col), symbol),
                None => debug!(
                    "event=chart_import module=chart status=skip row={} col={} symbol_id={}",
                    cell.row, cell.col, cell.symbol
                ),
            }
        }
        grid
    }
}

impl Default for ChartGrid {
    fn default() -> Self {
        let limits = ChartLimits::default();
        Self::with_limits(limits.default_rows, limits.default_columns, &limits)
    }
}

#[cfg(test)]
mod tests {
    use super::{CellPos, ChartGrid};
    use crate::catalog::builtin::{KNIT, PURL, YARN_OVER};
    use crate::catalog::SymbolCatalog;
    use crate::config::ChartLimits;
    use crate::model::symbol::SymbolId;

    #[test]
    fn dimensions_are_clamped() {
        let grid = ChartGrid::new(0, 500);
        assert_eq!(grid.rows(), 1);
        assert_eq!(grid.columns(), 100);

        let limits = ChartLimits {
            max_dimension: 20,
            ..ChartLimits::default()
        };
        let grid = ChartGrid::with_limits(30, 5, &limits);
        assert_eq!((grid.rows(), grid.columns()), (20, 5));
    }

    #[test]
    fn inverted_limits_clamp_instead_of_panicking() {
        let limits = ChartLimits {
            min_dimension: 20,
            max_dimension: 5,
            ..ChartLimits::default()
        };
        let mut grid = ChartGrid::with_limits(10, 10, &limits);
        assert_eq!((grid.rows(), grid.columns()), (20, 20));

        grid.resize(1, 300);
        assert_eq!((grid.rows(), grid.columns()), (20, 20));
    }

    #[test]
    fn resize_keeps_orphans_until_pruned() {
        let catalog = SymbolCatalog::builtin();
        let knit = catalog.get(KNIT).expect("knit");
        let mut grid = ChartGrid::new(5, 5);
        grid.place(CellPos::new(4, 4), knit.clone());
        grid.place(CellPos::new(0, 0), knit);

        grid.resize(3, 3);
        assert_eq!(grid.orphaned_positions(), vec![CellPos::new(4, 4)]);
        assert_eq!(grid.stitch_count(), 2);

        grid.resize(5, 5);
        assert!(grid.orphaned_positions().is_empty());

        grid.resize(3, 3);
        assert_eq!(grid.prune_orphans(), 1);
        grid.resize(5, 5);
        assert!(grid.get(CellPos::new(4, 4)).is_none());
    }

    #[test]
    fn usage_and_row_counts_skip_placeholder() {
        let catalog = SymbolCatalog::builtin();
        let mut grid = ChartGrid::new(2, 4);
        grid.place((0, 0).into(), catalog.get(KNIT).expect("knit"));
        grid.place((0, 1).into(), catalog.get(KNIT).expect("knit"));
        grid.place((0, 2).into(), catalog.empty_symbol());
        grid.place((1, 3).into(), catalog.get(PURL).expect("purl"));

        assert_eq!(grid.row_stitch_count(0), 2);
        assert_eq!(grid.row_stitch_count(1), 1);
        let usage = grid.symbol_usage();
        assert_eq!(usage.get(&KNIT), Some(&2));
        assert_eq!(usage.get(&PURL), Some(&1));
        assert!(!usage.contains_key(&SymbolId::EMPTY));
    }

    #[test]
    fn import_drops_unknown_symbols() {
        let catalog = SymbolCatalog::builtin();
        let mut grid = ChartGrid::new(2, 2);
        grid.place((0, 0).into(), catalog.get(YARN_OVER).expect("yo"));
        let mut payload = grid.to_export_payload("lace");
        payload.cells.push(super::ExportedCell {
            row: 1,
            col: 1,
            symbol: SymbolId(9_999),
        });

        let imported = ChartGrid::from_import_payload(&payload, &catalog);
        assert_eq!(imported.stitch_count(), 1);
        assert!(imported.get(CellPos::new(1, 1)).is_none());
    }

    #[test]
    fn import_keeps_configured_limits() {
        let catalog = SymbolCatalog::builtin();
        let limits = ChartLimits {
            min_dimension: 4,
            max_dimension: 40,
            default_rows: 8,
            default_columns: 8,
        };
        let mut grid = ChartGrid::with_limits(12, 6, &limits);
        grid.place((3, 5).into(), catalog.get(PURL).expect("purl"));

        let payload = grid.to_export_payload("rib");
        let imported = ChartGrid::from_import_payload_with_limits(&payload, &catalog, &limits);
        assert_eq!(imported, grid);
        assert_eq!(imported.limits(), &limits);

        let defaulted = ChartGrid::from_import_payload(&payload, &catalog);
        assert_eq!(defaulted.limits(), &ChartLimits::default());
    }
}
