//! Remote symbol sets merged over the default catalog.
//!
//! # Responsibility
//! - Define the seam through which callers fetch extra symbols.
//! - Merge fetched symbols over a base catalog, falling back to the base
//!   catalog when the fetch fails.
//!
//! # Invariants
//! - A fetch failure never surfaces to the caller; it only logs a warning.
//! - Invalid remote records are skipped one by one, never the whole set.

use super::SymbolCatalog;
use crate::model::symbol::{Symbol, SymbolCategory, SymbolId};
use log::{debug, info, warn};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Symbol record as served by the backend symbol endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteSymbol {
    pub id: u32,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub abbr: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ascii: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl RemoteSymbol {
    /// Validates and converts into a catalog symbol.
    ///
    /// Unknown or missing categories map to `SymbolCategory::Custom`.
    pub fn into_symbol(self) -> Result<Symbol, RemoteSymbolError> {
        let id = SymbolId(self.id);
        if id.is_empty_placeholder() {
            return Err(RemoteSymbolError::ReservedId);
        }
        let glyph = self.symbol.trim();
        if glyph.is_empty() {
            return Err(RemoteSymbolError::EmptyGlyph(id));
        }
        let name = self.name.trim();
        if name.is_empty() {
            return Err(RemoteSymbolError::EmptyName(id));
        }

        let category = self
            .category
            .as_deref()
            .and_then(SymbolCategory::parse)
            .unwrap_or(SymbolCategory::Custom);

        let mut symbol = Symbol::new(
            id,
            category,
            glyph,
            name,
            self.abbr.unwrap_or_default().trim(),
            self.description.unwrap_or_default(),
        );
        symbol.ascii_fallback = self.ascii.filter(|ascii| !ascii.is_empty());
        Ok(symbol)
    }
}

/// Rejection reason for one remote record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteSymbolError {
    ReservedId,
    EmptyGlyph(SymbolId),
    EmptyName(SymbolId),
}

impl Display for RemoteSymbolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReservedId => write!(f, "remote symbol uses reserved empty id"),
            Self::EmptyGlyph(id) => write!(f, "remote symbol {id} has empty glyph"),
            Self::EmptyName(id) => write!(f, "remote symbol {id} has empty name"),
        }
    }
}

impl Error for RemoteSymbolError {}

/// Failure to obtain a remote symbol set.
#[derive(Debug)]
pub enum SymbolSourceError {
    /// Endpoint could not be reached or answered with an error.
    Unavailable(String),
    /// Response body did not decode as a symbol list.
    InvalidPayload(serde_json::Error),
}

impl Display for SymbolSourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "symbol source unavailable: {message}"),
            Self::InvalidPayload(err) => write!(f, "invalid symbol payload: {err}"),
        }
    }
}

impl Error for SymbolSourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable(_) => None,
            Self::InvalidPayload(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SymbolSourceError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidPayload(value)
    }
}

/// Provider of additional symbols, typically backed by an HTTP endpoint.
pub trait SymbolSource {
    fn fetch_symbols(&self) -> Result<Vec<RemoteSymbol>, SymbolSourceError>;
}

/// Decodes a JSON array of remote symbol records.
pub fn parse_remote_symbols(json: &str) -> Result<Vec<RemoteSymbol>, SymbolSourceError> {
    Ok(serde_json::from_str(json)?)
}

impl SymbolCatalog {
    /// Lays remote symbols over `defaults`.
    ///
    /// Remote symbols replace defaults with the same id and are appended
    /// otherwise. When the source fails, `defaults` is returned unchanged.
    pub fn merge_remote(defaults: &SymbolCatalog, source: &dyn SymbolSource) -> SymbolCatalog {
        let remote = match source.fetch_symbols() {
            Ok(remote) => remote,
            Err(err) => {
                warn!(
                    "event=catalog_merge module=catalog status=fallback reason=fetch_failed error={}",
                    err
                );
                return defaults.clone();
            }
        };

        let fetched = remote.len();
        let mut merged = defaults.clone();
        let mut skipped = 0usize;
        for record in remote {
            match record.into_symbol() {
                Ok(symbol) => merged.upsert(Arc::new(symbol)),
                Err(err) => {
                    skipped += 1;
                    debug!(
                        "event=catalog_merge module=catalog status=skip error={}",
                        err
                    );
                }
            }
        }

        if skipped > 0 {
            warn!(
                "event=catalog_merge module=catalog status=partial fetched={} skipped={}",
                fetched, skipped
            );
        } else {
            info!(
                "event=catalog_merge module=catalog status=ok fetched={} total={}",
                fetched,
                merged.len()
            );
        }
        merged
    }
}
