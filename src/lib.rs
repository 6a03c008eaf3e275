//! Library crate for user-registry.
//!
//! This crate exposes the building blocks of the TUI:
//! - HTTP transport, users repository and demo data source (`api`)
//! - Configuration from flags and environment (`config`)
//! - Error types and the message normalization used by the UI (`error`)
//! - Draft, record and validation-result types (`model`)
//! - Field validation rules (`validation`)
//! - Service facade over the repository (`service`)
//! - Application state, controllers and update loop (`app`)
//! - UI rendering (`ui`)
//!
//! It is used by the `user-registry-tui` binary and by tests.
#![deny(rustdoc::broken_intra_doc_links)]

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod model;
pub mod service;
pub mod ui;
pub mod validation;

/// Convenient error and result types shared across the crate.
pub use error::{ApiError, ApiResult, Result};
