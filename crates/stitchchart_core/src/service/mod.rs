//! Chart use-case services.
//!
//! # Responsibility
//! - Orchestrate backend calls and local backups into editor-level APIs.
//! - Keep UI layers decoupled from transport and storage details.

pub mod chart_service;
