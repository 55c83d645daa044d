use stitchchart_core::catalog::builtin::{BOBBLE, C4B, K2TOG, KNIT, PURL, SSK, YARN_OVER};
use stitchchart_core::{
    generate, generate_rows, CellPos, ChartGrid, SymbolCatalog, SymbolCategory, SymbolId,
};
use std::collections::HashSet;
use std::sync::Arc;

#[test]
fn place_then_read_returns_same_symbol_everywhere() {
    let catalog = SymbolCatalog::builtin();
    let symbols = catalog
        .iter()
        .filter(|symbol| !symbol.is_empty_placeholder())
        .cloned()
        .collect::<Vec<_>>();
    let mut grid = ChartGrid::new(6, 7);

    for row in 0..grid.rows() {
        for col in 0..grid.columns() {
            let symbol = &symbols[((row * 7 + col) as usize) % symbols.len()];
            let pos = CellPos::new(row, col);
            grid.place(pos, Arc::clone(symbol));
            assert!(Arc::ptr_eq(grid.get(pos).unwrap(), symbol));
            assert_eq!(grid.symbol_at(pos).id, symbol.id);
        }
    }
    assert_eq!(grid.stitch_count(), 42);
}

#[test]
fn cleared_cell_reads_as_empty_symbol() {
    let catalog = SymbolCatalog::builtin();
    let mut grid = ChartGrid::new(3, 3);
    let pos = CellPos::new(1, 2);
    grid.place(pos, catalog.get(BOBBLE).unwrap());

    let removed = grid.clear(pos).unwrap();
    assert_eq!(removed.id, BOBBLE);
    assert!(grid.get(pos).is_none());
    assert_eq!(grid.symbol_at(pos).id, SymbolId::EMPTY);
    assert!(grid.clear(pos).is_none());
}

#[test]
fn stitch_count_tracks_distinct_non_empty_positions() {
    let catalog = SymbolCatalog::builtin();
    let knit = catalog.get(KNIT).unwrap();
    let purl = catalog.get(PURL).unwrap();
    let empty = catalog.empty_symbol();
    let mut grid = ChartGrid::new(10, 10);
    let mut expected = HashSet::new();

    let steps: &[(u32, u32, Option<&Arc<_>>)] = &[
        (0, 0, Some(&knit)),
        (0, 0, Some(&purl)),
        (1, 1, Some(&knit)),
        (2, 2, Some(&empty)),
        (1, 1, None),
        (3, 4, Some(&purl)),
        (2, 2, Some(&knit)),
        (0, 0, Some(&empty)),
    ];

    for (row, col, symbol) in steps {
        let pos = CellPos::new(*row, *col);
        match symbol {
            Some(symbol) => {
                grid.place(pos, Arc::clone(*symbol));
                if symbol.is_empty_placeholder() {
                    expected.remove(&pos);
                } else {
                    expected.insert(pos);
                }
            }
            None => {
                grid.clear(pos);
                expected.remove(&pos);
            }
        }
        assert_eq!(grid.stitch_count(), expected.len());
    }
}

#[test]
fn export_then_import_roundtrips_cells() {
    let catalog = SymbolCatalog::builtin();
    let mut grid = ChartGrid::new(4, 6);
    grid.place(CellPos::new(3, 5), catalog.get(C4B).unwrap());
    grid.place(CellPos::new(0, 2), catalog.get(SSK).unwrap());
    grid.place(CellPos::new(0, 1), catalog.get(K2TOG).unwrap());
    grid.place(CellPos::new(2, 0), catalog.empty_symbol());

    let payload = grid.to_export_payload("Lace panel");
    assert_eq!(payload.name, "Lace panel");
    assert_eq!((payload.rows, payload.columns), (4, 6));
    let order = payload
        .cells
        .iter()
        .map(|cell| (cell.row, cell.col))
        .collect::<Vec<_>>();
    assert_eq!(order, vec![(0, 1), (0, 2), (2, 0), (3, 5)]);

    let imported = ChartGrid::from_import_payload(&payload, &catalog);
    assert_eq!(imported, grid);
    assert_eq!(imported.to_export_payload("Lace panel"), payload);
}

#[test]
fn two_by_three_scenario() {
    let catalog = SymbolCatalog::builtin();
    let mut grid = ChartGrid::new(2, 3);
    grid.place(CellPos::new(0, 0), catalog.get(KNIT).unwrap());
    grid.place(CellPos::new(0, 1), catalog.get(PURL).unwrap());
    grid.place(CellPos::new(1, 2), catalog.get(YARN_OVER).unwrap());

    assert_eq!(grid.stitch_count(), 3);
    assert_eq!(generate_rows(&grid), vec!["K, P", "YO"]);
    assert_eq!(generate(&grid), "K, P\nYO");
}

#[test]
fn empty_grid_generates_placeholder_lines() {
    for rows in [1u32, 4, 100] {
        let grid = ChartGrid::new(rows, 5);
        let text = generate(&grid);
        let lines = text.split('\n').collect::<Vec<_>>();
        assert_eq!(lines.len(), rows as usize);
        assert!(lines.iter().all(|line| *line == "Empty row"));
    }
}

#[test]
fn single_cell_holding_empty_symbol_is_empty_row() {
    let catalog = SymbolCatalog::builtin();
    let mut grid = ChartGrid::new(1, 1);
    grid.place(CellPos::new(0, 0), catalog.empty_symbol());
    assert_eq!(generate(&grid), "Empty row");
    assert_eq!(grid.stitch_count(), 0);
}

#[test]
fn clear_all_and_out_of_range_writes() {
    let catalog = SymbolCatalog::builtin();
    let mut grid = ChartGrid::new(2, 2);
    grid.place(CellPos::new(0, 0), catalog.get(KNIT).unwrap());
    grid.place(CellPos::new(9, 9), catalog.get(KNIT).unwrap());

    assert_eq!(grid.stitch_count(), 2);
    assert_eq!(grid.orphaned_positions(), vec![CellPos::new(9, 9)]);
    assert_eq!(generate(&grid), "K\nEmpty row");

    grid.clear_all();
    assert!(grid.is_empty());
    assert_eq!(grid.stitch_count(), 0);
}

#[test]
fn shared_symbols_are_not_copied_per_cell() {
    let catalog = SymbolCatalog::builtin();
    let mut grid = ChartGrid::new(1, 3);
    for col in 0..3 {
        grid.place(CellPos::new(0, col), catalog.get(KNIT).unwrap());
    }
    let first = grid.get(CellPos::new(0, 0)).unwrap();
    let last = grid.get(CellPos::new(0, 2)).unwrap();
    assert!(Arc::ptr_eq(first, last));
    assert_eq!(first.category, SymbolCategory::Basic);
}
