//! Stitch symbol domain model.
//!
//! # Responsibility
//! - Define the immutable record placed into chart cells.
//! - Provide stable identity independent of glyph or display name.
//!
//! # Invariants
//! - `SymbolId::EMPTY` is reserved for the background placeholder.
//! - Symbols are never mutated after catalog construction; cells share them
//!   through `Arc<Symbol>`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Stable identifier for a stitch symbol.
///
/// Built-in symbols use fixed codes; remote symbols carry the code issued by
/// the backend. Saved charts reference symbols by this id, so renaming a
/// symbol or changing its glyph does not break them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub u32);

impl SymbolId {
    /// Background placeholder. Cells holding it do not count as stitches.
    pub const EMPTY: SymbolId = SymbolId(0);

    pub fn is_empty_placeholder(self) -> bool {
        self == Self::EMPTY
    }
}

impl Display for SymbolId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Palette grouping for stitch symbols.
///
/// Variant order is the order the palette lists categories in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolCategory {
    Basic,
    Decreases,
    Increases,
    Cables,
    Special,
    /// Remote symbols without a recognized category.
    Custom,
}

const ALL_CATEGORIES: &[SymbolCategory] = &[
    SymbolCategory::Basic,
    SymbolCategory::Decreases,
    SymbolCategory::Increases,
    SymbolCategory::Cables,
    SymbolCategory::Special,
    SymbolCategory::Custom,
];

impl SymbolCategory {
    /// Returns every category in stable palette order.
    pub fn all() -> &'static [SymbolCategory] {
        ALL_CATEGORIES
    }

    /// Stable wire name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Decreases => "decreases",
            Self::Increases => "increases",
            Self::Cables => "cables",
            Self::Special => "special",
            Self::Custom => "custom",
        }
    }

    /// Parses a wire name, ignoring surrounding whitespace and case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "basic" => Some(Self::Basic),
            "decreases" => Some(Self::Decreases),
            "increases" => Some(Self::Increases),
            "cables" => Some(Self::Cables),
            "special" => Some(Self::Special),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

/// One placeable stitch operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub id: SymbolId,
    /// Single character or short string drawn in the chart cell.
    pub glyph: String,
    pub name: String,
    /// Instruction text, e.g. `K2tog`. Empty for the background placeholder.
    pub abbreviation: String,
    pub description: String,
    /// Plain-ASCII rendering for exports that cannot carry the glyph.
    pub ascii_fallback: Option<String>,
    pub category: SymbolCategory,
}

impl Symbol {
    pub fn new(
        id: SymbolId,
        category: SymbolCategory,
        glyph: impl Into<String>,
        name: impl Into<String>,
        abbreviation: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            glyph: glyph.into(),
            name: name.into(),
            abbreviation: abbreviation.into(),
            description: description.into(),
            ascii_fallback: None,
            category,
        }
    }

    /// Sets the ASCII fallback rendering.
    pub fn with_ascii(mut self, ascii: impl Into<String>) -> Self {
        self.ascii_fallback = Some(ascii.into());
        self
    }

    /// Returns whether this symbol is the background placeholder.
    pub fn is_empty_placeholder(&self) -> bool {
        self.id.is_empty_placeholder()
    }

    /// Case-insensitive substring match over name, abbreviation, description
    /// and glyph. `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.abbreviation.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.glyph.to_lowercase().contains(needle)
    }
}
