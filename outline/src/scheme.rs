//! Typed classification scheme.
//!
//! The outline parser produces a `ClassificationScheme`: an ordered set of
//! classes, each owning an ordered set of subclass descriptions.

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::tree::Tree;

/// Key holding a class description in the tree encoding.
pub const DESCRIPTION_KEY: &str = "description";

/// Key holding a class's subclasses in the tree encoding.
pub const SUBCLASSES_KEY: &str = "subclasses";

/// A single class of the scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationNode {
    /// Short alphabetic class code, e.g. `Q`.
    pub code: String,

    /// Free-text description.
    pub description: String,

    /// Subclass code to description, in source order.
    pub subclasses: IndexMap<String, String>,
}

impl ClassificationNode {
    /// Create a class with no subclasses.
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            subclasses: IndexMap::new(),
        }
    }

    /// Add a subclass. Returns the description it replaced, if any.
    pub fn insert_subclass(
        &mut self,
        code: impl Into<String>,
        description: impl Into<String>,
    ) -> Option<String> {
        self.subclasses.insert(code.into(), description.into())
    }

    /// Convert to the canonical `{description, subclasses}` tree shape.
    pub fn to_tree(&self) -> Tree {
        let subclasses = self
            .subclasses
            .iter()
            .map(|(code, desc)| (code.clone(), Tree::from(desc.as_str())))
            .collect();

        Tree::from_entries([
            (DESCRIPTION_KEY, Tree::from(self.description.as_str())),
            (SUBCLASSES_KEY, Tree::Mapping(subclasses)),
        ])
    }
}

/// All classes parsed from an outline, keyed by class code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationScheme {
    classes: IndexMap<String, ClassificationNode>,
}

impl ClassificationScheme {
    /// Create an empty scheme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a class, replacing any class with the same code.
    ///
    /// A replaced class keeps its original position.
    pub fn insert(&mut self, node: ClassificationNode) -> Option<ClassificationNode> {
        match self.classes.entry(node.code.clone()) {
            Entry::Occupied(mut slot) => Some(slot.insert(node)),
            Entry::Vacant(slot) => {
                slot.insert(node);
                None
            }
        }
    }

    /// Get a class by code.
    pub fn get(&self, code: &str) -> Option<&ClassificationNode> {
        self.classes.get(code)
    }

    /// Get a mutable class by code.
    pub fn get_mut(&mut self, code: &str) -> Option<&mut ClassificationNode> {
        self.classes.get_mut(code)
    }

    /// Class codes in source order.
    pub fn class_codes(&self) -> Vec<&str> {
        self.classes.keys().map(String::as_str).collect()
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the scheme has no classes.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Total number of subclasses across all classes.
    pub fn subclass_count(&self) -> usize {
        self.classes.values().map(|c| c.subclasses.len()).sum()
    }

    /// Convert to a tree keyed by class code.
    pub fn to_tree(&self) -> Tree {
        Tree::Mapping(
            self.classes
                .iter()
                .map(|(code, node)| (code.clone(), node.to_tree()))
                .collect(),
        )
    }
}
