//! Generic hierarchical tree.
//!
//! A `Tree` is what the codec reads and writes, what the translator rewrites
//! and what the materializer walks. Children of a node come in two encodings:
//! an ordered mapping, or a sequence of single-entry mappings as emitted by
//! some external tools. [`Tree::child_entries`] reads both.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_yaml::Number;

/// Ordered mapping from key to subtree.
pub type Children = IndexMap<String, Tree>;

/// A node of a hierarchical document.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Tree {
    /// Explicit null or missing value.
    #[default]
    Null,

    /// Boolean scalar.
    Bool(bool),

    /// Numeric scalar.
    Number(Number),

    /// Text scalar.
    String(String),

    /// Ordered mapping of children.
    Mapping(Children),

    /// Sequence of subtrees.
    Sequence(Vec<Tree>),
}

impl Tree {
    /// Create an empty mapping.
    pub fn mapping() -> Self {
        Self::Mapping(Children::new())
    }

    /// Build a mapping from ordered `(key, value)` pairs.
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Tree)>,
    {
        Self::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Whether this node carries nothing: null, an empty string, an empty
    /// mapping or an empty sequence.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.is_empty(),
            Self::Mapping(map) => map.is_empty(),
            Self::Sequence(items) => items.is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    /// Borrow the text of a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the children of a mapping.
    pub fn as_mapping(&self) -> Option<&Children> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key in a mapping node.
    pub fn get(&self, key: &str) -> Option<&Tree> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Render a scalar as display text. Returns `None` for null and
    /// container nodes.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(n) => Some(n.to_string()),
            Self::Null | Self::Mapping(_) | Self::Sequence(_) => None,
        }
    }

    /// Iterate the children of a node in order, accepting both child
    /// encodings.
    ///
    /// A mapping yields its entries. A sequence yields the entries of each
    /// mapping item, so a list of single-key mappings reads the same as the
    /// equivalent mapping. Returns `None` for scalars and for sequences that
    /// contain non-mapping items.
    pub fn child_entries(&self) -> Option<Vec<(&str, &Tree)>> {
        match self {
            Self::Mapping(map) => Some(map.iter().map(|(k, v)| (k.as_str(), v)).collect()),
            Self::Sequence(items) => {
                let mut entries = Vec::new();
                for item in items {
                    let map = item.as_mapping()?;
                    entries.extend(map.iter().map(|(k, v)| (k.as_str(), v)));
                }
                Some(entries)
            }
            Self::Null | Self::Bool(_) | Self::Number(_) | Self::String(_) => None,
        }
    }

    /// Number of nested container levels below and including this node.
    /// Scalars have depth zero.
    pub fn depth(&self) -> usize {
        match self {
            Self::Mapping(map) => 1 + map.values().map(Tree::depth).max().unwrap_or(0),
            Self::Sequence(items) => 1 + items.iter().map(Tree::depth).max().unwrap_or(0),
            Self::Null | Self::Bool(_) | Self::Number(_) | Self::String(_) => 0,
        }
    }
}

impl From<&str> for Tree {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Tree {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Children> for Tree {
    fn from(value: Children) -> Self {
        Self::Mapping(value)
    }
}

impl Serialize for Tree {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Mapping(map) => {
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    state.serialize_entry(key, value)?;
                }
                state.end()
            }
            Self::Sequence(items) => serializer.collect_seq(items),
        }
    }
}

/// Join a parent document path and a key into a dotted path.
pub fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

/// Render a dotted document path, using `<root>` for the document itself.
pub fn display_path(path: &str) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.to_string()
    }
}

/// Join a parent document path and a sequence index.
pub fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}
