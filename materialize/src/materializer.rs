//! Directory materialization of classification trees.

use std::fs;
use std::path::Path;

use lcc_outline::Tree;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::MaterializeConfig;
use crate::error::{MaterializeError, Result};

/// Summary of a materialization run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterializeReport {
    /// Directories created by this run.
    pub created: usize,

    /// Directories that already existed.
    pub existing: usize,

    /// Entries not materialized because they sit below the depth ceiling.
    pub skipped_by_depth: usize,

    /// Entries skipped for having no value or no usable name.
    pub skipped_empty: usize,
}

impl MaterializeReport {
    /// Total directories present for the tree after the run.
    pub fn directories(&self) -> usize {
        self.created + self.existing
    }
}

/// Creates one directory per tree node under a base path.
///
/// Each entry `key: value` becomes a directory named `key - label`, where
/// the label is a scalar value itself or the first label key found in a
/// mapping value. Children are read from `children_key` in either child
/// encoding, or from nested mappings when that key is absent. Creation is
/// create-if-absent, so running twice over the same base is harmless.
pub struct DirectoryMaterializer {
    config: MaterializeConfig,
}

impl DirectoryMaterializer {
    /// Create a materializer with the given configuration.
    pub fn new(config: MaterializeConfig) -> Self {
        Self { config }
    }

    /// Materialize `tree` under `base`.
    pub fn materialize(&self, base: &Path, tree: &Tree) -> Result<MaterializeReport> {
        let entries = tree
            .child_entries()
            .ok_or_else(|| MaterializeError::InvalidRoot(describe(tree).to_string()))?;

        info!(
            "Materializing {} top-level entries under {} (max {} levels)",
            entries.len(),
            base.display(),
            self.config.max_levels
        );

        let mut report = MaterializeReport::default();
        self.materialize_entries(base, &entries, 0, &mut report)?;

        info!(
            "Materialized {} directories ({} created, {} existing, {} below depth ceiling)",
            report.directories(),
            report.created,
            report.existing,
            report.skipped_by_depth
        );

        Ok(report)
    }

    fn materialize_entries(
        &self,
        parent: &Path,
        entries: &[(&str, &Tree)],
        level: usize,
        report: &mut MaterializeReport,
    ) -> Result<()> {
        if level >= self.config.max_levels {
            if !entries.is_empty() {
                debug!(
                    "Depth ceiling reached under {}, skipping {} entries",
                    parent.display(),
                    entries.len()
                );
            }
            report.skipped_by_depth += entries.len();
            return Ok(());
        }

        for &(key, value) in entries {
            self.materialize_entry(parent, key, value, level, report)?;
        }

        Ok(())
    }

    fn materialize_entry(
        &self,
        parent: &Path,
        key: &str,
        value: &Tree,
        level: usize,
        report: &mut MaterializeReport,
    ) -> Result<()> {
        let (label, children) = match value {
            Tree::Null => {
                debug!("Skipping {key}: no value");
                report.skipped_empty += 1;
                return Ok(());
            }
            Tree::String(s) if s.trim().is_empty() => {
                debug!("Skipping {key}: empty value");
                report.skipped_empty += 1;
                return Ok(());
            }
            Tree::Bool(_) | Tree::Number(_) | Tree::String(_) => (value.scalar_text(), Vec::new()),
            Tree::Mapping(_) => (self.label_of(value), self.children_of(key, value)),
            Tree::Sequence(_) => (None, self.sequence_children(key, value)),
        };

        let Some(name) = directory_name(key, label.as_deref(), self.config.max_name_chars) else {
            warn!("Skipping entry {key:?}: no usable directory name");
            report.skipped_empty += 1;
            return Ok(());
        };

        let dir = parent.join(&name);
        create_dir(&dir, report)?;

        self.materialize_entries(&dir, &children, level + 1, report)
    }

    /// First non-empty label key of a mapping node.
    fn label_of(&self, node: &Tree) -> Option<String> {
        self.config
            .label_keys
            .iter()
            .filter_map(|key| node.get(key))
            .filter_map(Tree::scalar_text)
            .find(|text| !text.trim().is_empty())
    }

    fn children_of<'a>(&self, key: &str, node: &'a Tree) -> Vec<(&'a str, &'a Tree)> {
        match node.get(&self.config.children_key) {
            Some(Tree::Null) => Vec::new(),
            Some(children @ (Tree::Mapping(_) | Tree::Sequence(_))) => {
                self.sequence_children(key, children)
            }
            Some(other) => {
                warn!(
                    "Ignoring {}.{}: expected children, got {}",
                    key,
                    self.config.children_key,
                    describe(other)
                );
                Vec::new()
            }
            None => node
                .child_entries()
                .unwrap_or_default()
                .into_iter()
                .filter(|(k, v)| {
                    !self.config.is_label_key(k)
                        && matches!(v, Tree::Mapping(_) | Tree::Sequence(_))
                })
                .collect(),
        }
    }

    fn sequence_children<'a>(&self, key: &str, node: &'a Tree) -> Vec<(&'a str, &'a Tree)> {
        node.child_entries().unwrap_or_else(|| {
            warn!("Ignoring children of {key}: list items must be single-key mappings");
            Vec::new()
        })
    }
}

impl Default for DirectoryMaterializer {
    fn default() -> Self {
        Self::new(MaterializeConfig::default())
    }
}

/// Build a directory name from a key and an optional label.
///
/// Surrounding whitespace is trimmed from the key and the label before the
/// label is cut to `max_label_chars` characters; the kept characters are
/// never trimmed afterwards, so a long label keeps exactly `max_label_chars`
/// characters. Path separators are replaced so a name always stays a single
/// path component. Returns `None` when nothing usable is left.
pub fn directory_name(key: &str, label: Option<&str>, max_label_chars: usize) -> Option<String> {
    let key = key.trim();
    let label: String = label
        .map(str::trim)
        .unwrap_or_default()
        .chars()
        .take(max_label_chars)
        .collect();

    let name = if label.is_empty() {
        key.to_string()
    } else {
        format!("{key} - {label}")
    };

    let name: String = name
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '-' } else { c })
        .collect();

    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name)
    }
}

fn create_dir(dir: &Path, report: &mut MaterializeReport) -> Result<()> {
    if dir.is_dir() {
        debug!("Directory exists: {}", dir.display());
        report.existing += 1;
        return Ok(());
    }

    fs::create_dir_all(dir).map_err(|source| MaterializeError::Filesystem {
        path: dir.to_path_buf(),
        source,
    })?;

    info!("Created directory: {}", dir.display());
    report.created += 1;
    Ok(())
}

fn describe(tree: &Tree) -> &'static str {
    match tree {
        Tree::Null => "null",
        Tree::Bool(_) => "a boolean",
        Tree::Number(_) => "a number",
        Tree::String(_) => "a string",
        Tree::Mapping(_) => "a mapping",
        Tree::Sequence(_) => "a sequence",
    }
}
