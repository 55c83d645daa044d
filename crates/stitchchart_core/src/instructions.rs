//! Row-by-row written instructions for a chart.
//!
//! # Invariants
//! - Output depends only on grid contents and style; it never fails.
//! - Only rows `0..rows` and columns `0..columns` are read, so orphaned
//!   cells never appear in instructions.

use crate::chart::grid::ChartGrid;
use serde::Deserialize;

pub const DEFAULT_SEPARATOR: &str = ", ";
pub const DEFAULT_EMPTY_ROW: &str = "Empty row";
pub const DEFAULT_LINE_BREAK: &str = "\n";

/// Text conventions for generated instructions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InstructionStyle {
    /// Placed between abbreviations within a row.
    pub separator: String,
    /// Rendered for rows without any abbreviated stitch.
    pub empty_row: String,
    /// Placed between rows.
    pub line_break: String,
    /// Optional prefix template; `{n}` is replaced by the 1-based row number.
    pub row_label: Option<String>,
}

impl Default for InstructionStyle {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            empty_row: DEFAULT_EMPTY_ROW.to_string(),
            line_break: DEFAULT_LINE_BREAK.to_string(),
            row_label: None,
        }
    }
}

/// Generates instructions with the default style.
pub fn generate(grid: &ChartGrid) -> String {
    generate_with(grid, &InstructionStyle::default())
}

pub fn generate_with(grid: &ChartGrid, style: &InstructionStyle) -> String {
    generate_rows_with(grid, style).join(&style.line_break)
}

/// One instruction line per row, default style.
pub fn generate_rows(grid: &ChartGrid) -> Vec<String> {
    generate_rows_with(grid, &InstructionStyle::default())
}

pub fn generate_rows_with(grid: &ChartGrid, style: &InstructionStyle) -> Vec<String> {
    (0..grid.rows())
        .map(|row| {
            let stitches = grid
                .row_cells(row)
                .filter(|(pos, _)| pos.col < grid.columns())
                .map(|(_, symbol)| symbol.abbreviation.as_str())
                .filter(|abbreviation| !abbreviation.is_empty())
                .collect::<Vec<_>>();

            let body = if stitches.is_empty() {
                style.empty_row.clone()
            } else {
                stitches.join(&style.separator)
            };

            match &style.row_label {
                Some(template) => {
                    format!("{}{body}", template.replace("{n}", &(row + 1).to_string()))
                }
                None => body,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{generate, generate_rows, generate_with, InstructionStyle};
    use crate::catalog::builtin::{K2TOG, KNIT, PURL, YARN_OVER};
    use crate::catalog::SymbolCatalog;
    use crate::chart::grid::{CellPos, ChartGrid};

    #[test]
    fn empty_grid_yields_placeholder_per_row() {
        let grid = ChartGrid::new(3, 4);
        assert_eq!(generate(&grid), "Empty row\nEmpty row\nEmpty row");
    }

    #[test]
    fn rows_follow_column_order_and_skip_gaps() {
        let catalog = SymbolCatalog::builtin();
        let mut grid = ChartGrid::new(2, 3);
        grid.place(CellPos::new(0, 0), catalog.get(KNIT).expect("knit"));
        grid.place(CellPos::new(0, 1), catalog.get(PURL).expect("purl"));
        grid.place(CellPos::new(1, 2), catalog.get(YARN_OVER).expect("yo"));

        assert_eq!(generate_rows(&grid), vec!["K, P", "YO"]);
        assert_eq!(grid.stitch_count(), 3);
    }

    #[test]
    fn placeholder_abbreviation_counts_as_empty() {
        let catalog = SymbolCatalog::builtin();
        let mut grid = ChartGrid::new(1, 1);
        grid.place(CellPos::new(0, 0), catalog.empty_symbol());
        assert_eq!(generate(&grid), "Empty row");
    }

    #[test]
    fn orphaned_cells_are_not_read() {
        let catalog = SymbolCatalog::builtin();
        let mut grid = ChartGrid::new(1, 2);
        grid.place(CellPos::new(0, 5), catalog.get(KNIT).expect("knit"));
        grid.place(CellPos::new(3, 0), catalog.get(KNIT).expect("knit"));
        assert_eq!(generate(&grid), "Empty row");
    }

    #[test]
    fn custom_style_applies_label_and_separator() {
        let catalog = SymbolCatalog::builtin();
        let mut grid = ChartGrid::new(2, 2);
        grid.place(CellPos::new(0, 0), catalog.get(K2TOG).expect("k2tog"));
        grid.place(CellPos::new(0, 1), catalog.get(YARN_OVER).expect("yo"));

        let style = InstructionStyle {
            separator: " ".to_string(),
            empty_row: "-".to_string(),
            line_break: " | ".to_string(),
            row_label: Some("Row {n}: ".to_string()),
        };
        assert_eq!(generate_with(&grid, &style), "Row 1: K2tog YO | Row 2: -");
    }
}
