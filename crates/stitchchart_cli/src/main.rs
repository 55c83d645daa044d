//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `stitchchart_core` linkage with a tiny deterministic chart.

use stitchchart_core::catalog::builtin::{K2TOG, KNIT, PURL, YARN_OVER};
use stitchchart_core::{generate, CellPos, ChartGrid, SymbolCatalog};

fn main() {
    let catalog = SymbolCatalog::builtin();
    let mut grid = ChartGrid::new(2, 4);
    for (pos, id) in [
        ((0, 0), KNIT),
        ((0, 1), YARN_OVER),
        ((0, 2), K2TOG),
        ((0, 3), KNIT),
        ((1, 0), PURL),
        ((1, 3), PURL),
    ] {
        if let Some(symbol) = catalog.get(id) {
            grid.place(CellPos::from(pos), symbol);
        }
    }

    println!("stitchchart_core version={}", stitchchart_core::core_version());
    println!("catalog symbols={}", catalog.len());
    println!("sample stitches={}", grid.stitch_count());
    println!("{}", generate(&grid));
}
