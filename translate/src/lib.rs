//! # Translate
//!
//! This crate translates the text content of classification trees.
//!
//! ## Features
//!
//! - **Providers**: pluggable translation backends (Google's web endpoint)
//! - **Chunking**: long strings are cut on line boundaries before sending
//! - **Tree Translation**: structure-preserving rewrite of every string value
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Translate                                    │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  Tree ──► TreeTranslator ──► split_into_chunks                  │
//! │                │                      │                         │
//! │                ▼                      ▼                         │
//! │         translated Tree ◄── TranslationProvider (one at a time) │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod chunker;
pub mod error;
pub mod provider;
pub mod translator;

pub use chunker::{DEFAULT_MAX_CHUNK_CHARS, split_into_chunks};
pub use error::{Result, TranslateError};
pub use provider::{GoogleTranslateProvider, TranslationProvider, TranslationRequest};
pub use translator::{TranslatorConfig, TreeTranslator};
