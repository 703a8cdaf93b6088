//! # Materialize
//!
//! This crate recreates a classification tree as nested directories.
//!
//! ## Features
//!
//! - **Both child encodings**: children as a mapping or as a list of
//!   single-key mappings
//! - **Bounded names**: labels are truncated instead of failing
//! - **Depth ceiling**: descent stops quietly at a configured level
//! - **Idempotent**: existing directories are reused
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Materialize                                  │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  MaterializeConfig ──► DirectoryMaterializer ──► directories    │
//! │                              │                                  │
//! │                              ▼                                  │
//! │                      MaterializeReport                          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod materializer;

pub use config::MaterializeConfig;
pub use error::{MaterializeError, Result};
pub use materializer::{DirectoryMaterializer, MaterializeReport, directory_name};
