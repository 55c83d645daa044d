//! Stitch symbol catalog.
//!
//! # Responsibility
//! - Hold the fixed vocabulary of placeable symbols for one editor session.
//! - Provide category listing, id lookup and palette text search.
//!
//! # Invariants
//! - A catalog is immutable after construction and passed in explicitly;
//!   there is no process-wide symbol table.
//! - Every catalog resolves `SymbolId::EMPTY` to the shared placeholder.
//! - Symbol order within a category follows the source table order.

pub mod builtin;
pub mod remote;

use crate::model::symbol::{Symbol, SymbolCategory, SymbolId};
use std::collections::HashMap;
use std::sync::Arc;

pub use builtin::empty_symbol;

/// Immutable, injectable symbol table.
#[derive(Debug, Clone)]
pub struct SymbolCatalog {
    symbols: Vec<Arc<Symbol>>,
    by_id: HashMap<SymbolId, usize>,
}

impl SymbolCatalog {
    /// Default catalog shipped with the editor.
    pub fn builtin() -> Self {
        Self::from_shared(builtin::builtin_symbols())
    }

    /// Builds a catalog from an already loaded table.
    ///
    /// A repeated id replaces the earlier entry in place.
    pub fn from_symbols(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        Self::from_shared(symbols.into_iter().map(Arc::new))
    }

    pub(crate) fn from_shared(symbols: impl IntoIterator<Item = Arc<Symbol>>) -> Self {
        let mut catalog = Self {
            symbols: Vec::new(),
            by_id: HashMap::new(),
        };
        catalog.upsert(empty_symbol());
        for symbol in symbols {
            if symbol.is_empty_placeholder() {
                continue;
            }
            catalog.upsert(symbol);
        }
        catalog
    }

    /// Inserts a new symbol at the end, or replaces the entry with the same id.
    fn upsert(&mut self, symbol: Arc<Symbol>) {
        match self.by_id.get(&symbol.id) {
            Some(&index) => self.symbols[index] = symbol,
            None => {
                self.by_id.insert(symbol.id, self.symbols.len());
                self.symbols.push(symbol);
            }
        }
    }

    /// Returns palette categories in stable order.
    pub fn list_categories(&self) -> &'static [SymbolCategory] {
        SymbolCategory::all()
    }

    /// Returns symbols of one category in catalog order.
    pub fn symbols_in(&self, category: SymbolCategory) -> Vec<Arc<Symbol>> {
        self.symbols
            .iter()
            .filter(|symbol| symbol.category == category)
            .cloned()
            .collect()
    }

    /// Filters one category by case-insensitive substring match against
    /// name, abbreviation, description or glyph.
    ///
    /// A blank query returns the whole category.
    pub fn search(&self, query: &str, category: SymbolCategory) -> Vec<Arc<Symbol>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.symbols_in(category);
        }

        self.symbols
            .iter()
            .filter(|symbol| symbol.category == category && symbol.matches_lowercase(&needle))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: SymbolId) -> Option<Arc<Symbol>> {
        self.by_id
            .get(&id)
            .map(|&index| Arc::clone(&self.symbols[index]))
    }

    /// First symbol drawn with exactly this glyph.
    pub fn find_by_glyph(&self, glyph: &str) -> Option<Arc<Symbol>> {
        self.symbols
            .iter()
            .find(|symbol| symbol.glyph == glyph)
            .cloned()
    }

    /// First symbol whose name matches, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<Arc<Symbol>> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.symbols
            .iter()
            .find(|symbol| symbol.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    /// The catalog's background placeholder.
    pub fn empty_symbol(&self) -> Arc<Symbol> {
        self.get(SymbolId::EMPTY).unwrap_or_else(empty_symbol)
    }

    /// All symbols in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Symbol>> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for SymbolCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::builtin::{C4F, K2TOG, KNIT};
    use super::SymbolCatalog;
    use crate::model::symbol::{Symbol, SymbolCategory, SymbolId};

    #[test]
    fn search_k2tog_in_decreases_returns_single_entry() {
        let catalog = SymbolCatalog::builtin();
        let hits = catalog.search("k2tog", SymbolCategory::Decreases);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, K2TOG);

        let upper = catalog.search("K2TOG", SymbolCategory::Decreases);
        assert_eq!(upper.len(), 1);
    }

    #[test]
    fn blank_query_returns_full_category() {
        let catalog = SymbolCatalog::builtin();
        let all = catalog.symbols_in(SymbolCategory::Cables);
        let hits = catalog.search("   ", SymbolCategory::Cables);
        assert_eq!(hits, all);
        assert_eq!(hits[0].id, C4F);
    }

    #[test]
    fn search_only_looks_inside_requested_category() {
        let catalog = SymbolCatalog::builtin();
        assert!(catalog.search("k2tog", SymbolCategory::Basic).is_empty());
        assert!(catalog.search("k2tog", SymbolCategory::Custom).is_empty());
    }

    #[test]
    fn from_symbols_always_includes_empty_placeholder() {
        let catalog = SymbolCatalog::from_symbols(vec![Symbol::new(
            KNIT,
            SymbolCategory::Basic,
            "|",
            "Knit",
            "K",
            "",
        )]);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get(SymbolId::EMPTY).is_some());
        assert!(catalog.empty_symbol().is_empty_placeholder());
    }

    #[test]
    fn later_duplicate_replaces_earlier_entry_in_place() {
        let catalog = SymbolCatalog::from_symbols(vec![
            Symbol::new(SymbolId(5), SymbolCategory::Basic, "a", "First", "A", ""),
            Symbol::new(SymbolId(6), SymbolCategory::Basic, "b", "Second", "B", ""),
            Symbol::new(SymbolId(5), SymbolCategory::Basic, "c", "Replaced", "C", ""),
        ]);
        let basic = catalog.symbols_in(SymbolCategory::Basic);
        let names = basic.iter().map(|s| s.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["Empty", "Replaced", "Second"]);
    }

    #[test]
    fn legacy_lookups_by_glyph_and_name() {
        let catalog = SymbolCatalog::builtin();
        assert_eq!(catalog.find_by_glyph("│").map(|s| s.id), Some(KNIT));
        assert_eq!(catalog.find_by_name(" knit ").map(|s| s.id), Some(KNIT));
        assert!(catalog.find_by_name("").is_none());
    }
}
