//! Chart save/load use-cases.
//!
//! # Responsibility
//! - Validate save input, call the backend, and fall back to a local backup
//!   when the backend save fails.
//! - Load charts from the backend into grids.
//!
//! # Invariants
//! - The grid passed to `save` is only read, so a failed save leaves the
//!   caller's state exactly as it was.
//! - No retry, timeout or cancellation; one backend call per operation.
//! - A failed backup write never masks the backend error.

use crate::catalog::SymbolCatalog;
use crate::chart::backend::{
    BackendError, ChartBackend, ChartValidationError, SaveChartRequest, SaveChartResponse,
};
use crate::chart::file::ChartFile;
use crate::chart::grid::ChartGrid;
use crate::config::ChartLimits;
use crate::repo::backup_repo::{BackupId, ChartBackupRepository};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ChartServiceError {
    Validation(ChartValidationError),
    /// Backend call failed. `backup` holds the local copy id when one was written.
    Backend {
        source: BackendError,
        backup: Option<BackupId>,
    },
}

impl Display for ChartServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Backend {
                source,
                backup: Some(id),
            } => write!(f, "{source} (local backup {id})"),
            Self::Backend {
                source,
                backup: None,
            } => write!(f, "{source}"),
        }
    }
}

impl Error for ChartServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Backend { source, .. } => Some(source),
        }
    }
}

impl From<ChartValidationError> for ChartServiceError {
    fn from(value: ChartValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Save request metadata supplied by the editor.
#[derive(Debug, Clone, Copy)]
pub struct SaveChart<'a> {
    pub title: &'a str,
    pub notes: &'a str,
    pub grid: &'a ChartGrid,
}

pub struct ChartService<B: ChartBackend, R: ChartBackupRepository> {
    backend: B,
    backups: R,
    limits: ChartLimits,
}

impl<B: ChartBackend, R: ChartBackupRepository> ChartService<B, R> {
    pub fn new(backend: B, backups: R) -> Self {
        Self::with_limits(backend, backups, ChartLimits::default())
    }

    pub fn with_limits(backend: B, backups: R, limits: ChartLimits) -> Self {
        Self {
            backend,
            backups,
            limits,
        }
    }

    pub fn backups(&self) -> &R {
        &self.backups
    }

    /// Persists a chart through the backend.
    ///
    /// # Errors
    /// - `Validation` for a blank title or out-of-range dimensions; the
    ///   backend is not contacted.
    /// - `Backend` when the save call fails, after attempting a local backup.
    pub fn save(&self, input: SaveChart<'_>) -> Result<SaveChartResponse, ChartServiceError> {
        let request = SaveChartRequest::from_grid(input.title, input.notes, input.grid);
        request.validate(&self.limits)?;

        match self.backend.save_chart(&request) {
            Ok(response) => {
                info!(
                    "event=chart_save module=service status=ok chart_id={} cells={}",
                    response.id,
                    request.chart_data.len()
                );
                Ok(response)
            }
            Err(source) => {
                let backup = self.write_backup(input.title, input.grid);
                warn!(
                    "event=chart_save module=service status=error backup={} error={}",
                    backup.is_some(),
                    source
                );
                Err(ChartServiceError::Backend { source, backup })
            }
        }
    }

    /// Loads a chart by backend id under the service limits, dropping cells
    /// with unknown symbols.
    pub fn load(
        &self,
        chart_id: &str,
        catalog: &SymbolCatalog,
    ) -> Result<ChartGrid, ChartServiceError> {
        let loaded = self.backend.load_chart(chart_id).map_err(|source| {
            warn!(
                "event=chart_load module=service status=error chart_id={} error={}",
                chart_id, source
            );
            ChartServiceError::Backend {
                source,
                backup: None,
            }
        })?;

        let grid = loaded.to_grid_with_limits(catalog, &self.limits);
        info!(
            "event=chart_load module=service status=ok chart_id={} stitches={}",
            chart_id,
            grid.stitch_count()
        );
        Ok(grid)
    }

    fn write_backup(&self, title: &str, grid: &ChartGrid) -> Option<BackupId> {
        let file = ChartFile::from_grid_now(title, grid);
        match self.backups.save_backup(&file) {
            Ok(id) => Some(id),
            Err(err) => {
                error!(
                    "event=chart_backup module=service status=error error={}",
                    err
                );
                None
            }
        }
    }
}
