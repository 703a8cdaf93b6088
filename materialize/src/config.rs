//! Configuration types for directory materialization.

use lcc_outline::scheme::{DESCRIPTION_KEY, SUBCLASSES_KEY};
use serde::{Deserialize, Serialize};

/// Configuration for turning a tree into directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterializeConfig {
    /// Number of nested directory levels to create. Entries deeper than
    /// this are skipped.
    pub max_levels: usize,

    /// Maximum characters of a label kept in a directory name.
    pub max_name_chars: usize,

    /// Keys whose value labels a node, checked in order.
    pub label_keys: Vec<String>,

    /// Key holding a node's children.
    pub children_key: String,
}

impl MaterializeConfig {
    /// Create a config with the given depth ceiling and default naming.
    pub fn new(max_levels: usize) -> Self {
        Self {
            max_levels,
            max_name_chars: 150,
            label_keys: vec![DESCRIPTION_KEY.to_string(), "name".to_string()],
            children_key: SUBCLASSES_KEY.to_string(),
        }
    }

    /// Set the depth ceiling.
    pub fn with_max_levels(mut self, max_levels: usize) -> Self {
        self.max_levels = max_levels;
        self
    }

    /// Set the maximum label length.
    pub fn with_max_name_chars(mut self, max_name_chars: usize) -> Self {
        self.max_name_chars = max_name_chars;
        self
    }

    /// Add a label key, checked after the existing ones.
    pub fn label_key(mut self, key: impl Into<String>) -> Self {
        self.label_keys.push(key.into());
        self
    }

    /// Set the children key.
    pub fn with_children_key(mut self, key: impl Into<String>) -> Self {
        self.children_key = key.into();
        self
    }

    /// Whether `key` holds a label.
    pub fn is_label_key(&self, key: &str) -> bool {
        self.label_keys.iter().any(|k| k == key)
    }
}

impl Default for MaterializeConfig {
    fn default() -> Self {
        Self::new(10)
    }
}
