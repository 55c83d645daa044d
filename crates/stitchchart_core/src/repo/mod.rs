//! Local persistence for chart backups.
//!
//! # Responsibility
//! - Define the backup storage contract used by the chart service.
//! - Keep SQL details out of service orchestration.

pub mod backup_repo;
