//! Core model for knitting pattern charts.
//! UI-independent: symbol catalog, sparse chart grid, written instructions,
//! chart interchange formats and local backups of failed saves.

pub mod catalog;
pub mod chart;
pub mod config;
pub mod db;
pub mod instructions;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use catalog::remote::{RemoteSymbol, SymbolSource, SymbolSourceError};
pub use catalog::{empty_symbol, SymbolCatalog};
pub use chart::backend::{
    BackendError, ChartBackend, ChartValidationError, LoadedChart, SaveChartRequest,
    SaveChartResponse,
};
pub use chart::file::{ChartFile, ChartFileError, SymbolRecord};
pub use chart::grid::{CellPos, ChartExport, ChartGrid, ExportedCell};
pub use config::{ChartConfig, ChartLimits, ConfigError};
pub use instructions::{generate, generate_rows, generate_with, InstructionStyle};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::symbol::{Symbol, SymbolCategory, SymbolId};
pub use repo::backup_repo::{
    BackupId, ChartBackup, ChartBackupRepository, RepoError, RepoResult,
    SqliteChartBackupRepository,
};
pub use service::chart_service::{ChartService, ChartServiceError, SaveChart};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
