//! Pattern chart grid and its wire formats.
//!
//! # Responsibility
//! - `grid`: the in-memory sparse chart and export snapshots.
//! - `file`: the downloadable JSON document.
//! - `backend`: request/response shapes for the chart REST resource.

pub mod backend;
pub mod file;
pub mod grid;
