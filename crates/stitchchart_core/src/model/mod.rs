//! Chart domain model.
//!
//! # Responsibility
//! - Define the symbol vocabulary types shared by catalog, grid and exports.
//!
//! # Invariants
//! - Every symbol is identified by a stable `SymbolId`, never by glyph alone.

pub mod symbol;
