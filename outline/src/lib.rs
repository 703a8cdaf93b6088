//! # Classification Outline
//!
//! This crate turns the textual Library of Congress Classification outline
//! into a typed tree and moves that tree in and out of YAML.
//!
//! - **Outline Parser**: line-oriented, best-effort reading of scraped text
//! - **Classification Scheme**: ordered classes and subclasses
//! - **Tree**: the generic document model shared with translation and
//!   materialization
//! - **Hierarchy Codec**: order-preserving YAML encoding that accepts both
//!   child encodings on read
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Classification Outline                       │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  raw text ──► trim_outline ──► parse_outline ──► Scheme         │
//! │                                                    │            │
//! │                                                    ▼            │
//! │  YAML document ◄── codec::serialize ◄────────── Tree           │
//! │       │                                            ▲            │
//! │       └──────────► codec::deserialize ─────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod codec;
pub mod error;
pub mod parser;
pub mod scheme;
pub mod tree;

pub use error::{OutlineError, Result};
pub use parser::{
    OutlineBoundaries, ParseOutcome, ParseWarning, parse_document, parse_outline, trim_outline,
};
pub use scheme::{ClassificationNode, ClassificationScheme};
pub use tree::{Children, Tree};
