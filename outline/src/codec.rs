//! YAML encoding of classification trees.
//!
//! Writing always produces the canonical shape: nested mappings in the
//! tree's own key order. Reading also accepts children written as a list of
//! single-key mappings and folds them into a mapping on the way in.

use std::fs;
use std::path::Path;

use serde_yaml::Value;
use tracing::{debug, info};

use crate::error::{OutlineError, Result};
use crate::tree::{Children, Tree, child_path, display_path, index_path};

/// Encode a tree as a YAML document.
pub fn serialize(tree: &Tree) -> Result<String> {
    Ok(serde_yaml::to_string(tree)?)
}

/// Decode a YAML document into a tree.
///
/// Fails with [`OutlineError::UnsupportedNodeShape`] if any node is not a
/// scalar, a mapping, or a sequence of single-key mappings. Nothing is
/// returned for a document with a bad node anywhere in it.
pub fn deserialize(document: &str) -> Result<Tree> {
    let value: Value = serde_yaml::from_str(document)?;
    from_value(value, "")
}

/// Serialize a tree and write it to `path`, creating parent directories.
pub fn save(tree: &Tree, path: &Path) -> Result<()> {
    let yaml = serialize(tree)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| OutlineError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, yaml).map_err(|source| OutlineError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Saved YAML document to {}", path.display());
    Ok(())
}

/// Read and deserialize the YAML document at `path`.
pub fn load(path: &Path) -> Result<Tree> {
    let document = fs::read_to_string(path).map_err(|source| OutlineError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let tree = deserialize(&document)?;
    info!("Loaded YAML document from {}", path.display());
    Ok(tree)
}

fn from_value(value: Value, path: &str) -> Result<Tree> {
    match value {
        Value::Null => Ok(Tree::Null),
        Value::Bool(b) => Ok(Tree::Bool(b)),
        Value::Number(n) => Ok(Tree::Number(n)),
        Value::String(s) => Ok(Tree::String(s)),
        Value::Mapping(mapping) => {
            let mut children = Children::with_capacity(mapping.len());
            for (key, value) in mapping {
                let key = key_text(key, path)?;
                let key_path = child_path(path, &key);
                if children.contains_key(&key) {
                    return Err(OutlineError::unsupported(
                        &key_path,
                        format!("duplicate key {key:?} in mapping"),
                    ));
                }
                let child = from_value(value, &key_path)?;
                children.insert(key, child);
            }
            Ok(Tree::Mapping(children))
        }
        Value::Sequence(items) => fold_sequence(items, path),
        Value::Tagged(tagged) => {
            debug!("Ignoring tag {} at {path}", tagged.tag);
            from_value(tagged.value, path)
        }
    }
}

/// Fold a list of single-key mappings into one mapping.
fn fold_sequence(items: Vec<Value>, path: &str) -> Result<Tree> {
    let mut children = Children::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        let item_path = index_path(path, index);
        let mapping = match item {
            Value::Mapping(mapping) if mapping.len() == 1 => mapping,
            Value::Mapping(mapping) => {
                return Err(OutlineError::unsupported(
                    &item_path,
                    format!("sequence item has {} keys, expected exactly one", mapping.len()),
                ));
            }
            other => {
                return Err(OutlineError::unsupported(
                    &item_path,
                    format!("sequence item is {}, expected a single-key mapping", kind(&other)),
                ));
            }
        };

        for (key, value) in mapping {
            let key = key_text(key, &item_path)?;
            if children.contains_key(&key) {
                return Err(OutlineError::unsupported(
                    &item_path,
                    format!("duplicate key {key:?} in sequence"),
                ));
            }
            let child = from_value(value, &child_path(path, &key))?;
            children.insert(key, child);
        }
    }

    debug!(
        "Normalized list of {} single-key mappings at {}",
        children.len(),
        display_path(path)
    );
    Ok(Tree::Mapping(children))
}

/// Mapping keys must be scalars; they are stored as text.
fn key_text(key: Value, path: &str) -> Result<String> {
    match key {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Tagged(tagged) => key_text(tagged.value, path),
        other => Err(OutlineError::unsupported(
            path,
            format!("mapping key is {}", kind(&other)),
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_serialize_preserves_key_order() {
        let tree = Tree::from_entries([
            ("Z", Tree::from("Bibliography")),
            ("A", Tree::from("General works")),
            ("M", Tree::from("Music")),
        ]);

        let yaml = serialize(&tree).unwrap();

        assert_eq!(yaml, "Z: Bibliography\nA: General works\nM: Music\n");
    }

    #[test]
    fn test_serialize_keeps_unicode_unescaped() {
        let tree = Tree::from_entries([("D", Tree::from("Histoire générale – Europe"))]);

        let yaml = serialize(&tree).unwrap();

        assert!(yaml.contains("Histoire générale – Europe"));
    }

    #[test]
    fn test_ambiguous_strings_survive_round_trip() {
        let tree = Tree::from_entries([
            ("yes", Tree::from("no")),
            ("n", Tree::from("123")),
            ("e", Tree::from("")),
            ("c", Tree::from("key: value")),
        ]);

        let back = deserialize(&serialize(&tree).unwrap()).unwrap();

        assert_eq!(back, tree);
    }

    #[test]
    fn test_list_of_single_key_maps_is_folded() {
        let yaml = "Q:\n  name: Science\n  subclasses:\n    - QA: Mathematics\n    - QB: Astronomy\n";

        let tree = deserialize(yaml).unwrap();

        let subclasses = tree.get("Q").and_then(|q| q.get("subclasses")).unwrap();
        assert_eq!(
            subclasses,
            &Tree::from_entries([
                ("QA", Tree::from("Mathematics")),
                ("QB", Tree::from("Astronomy")),
            ])
        );
    }

    #[test]
    fn test_empty_sequence_is_empty_mapping() {
        let tree = deserialize("Q:\n  subclasses: []\n").unwrap();
        assert_eq!(
            tree.get("Q").and_then(|q| q.get("subclasses")),
            Some(&Tree::mapping())
        );
    }

    #[test]
    fn test_scalar_sequence_is_unsupported() {
        let err = deserialize("Q:\n  subclasses:\n    - QA\n    - QB\n").unwrap_err();

        match err {
            OutlineError::UnsupportedNodeShape { path, reason } => {
                assert_eq!(path, "Q.subclasses[0]");
                assert!(reason.contains("a string"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_multi_key_sequence_item_is_unsupported() {
        let err = deserialize("- QA: Mathematics\n  QB: Astronomy\n").unwrap_err();
        assert!(matches!(
            err,
            OutlineError::UnsupportedNodeShape { ref path, .. } if path == "[0]"
        ));
    }

    #[test]
    fn test_duplicate_key_across_sequence_is_unsupported() {
        let err = deserialize("- QA: Mathematics\n- QA: Algebra\n").unwrap_err();
        assert!(matches!(err, OutlineError::UnsupportedNodeShape { .. }));
    }

    #[test]
    fn test_keys_equal_as_text_are_unsupported() {
        let err = deserialize("1: first\n'1': second\n").unwrap_err();
        assert!(matches!(
            err,
            OutlineError::UnsupportedNodeShape { ref path, .. } if path == "1"
        ));

        let err = deserialize("Q:\n  ~: nothing\n  '': empty\n").unwrap_err();
        assert!(matches!(
            err,
            OutlineError::UnsupportedNodeShape { ref path, .. } if path == "Q."
        ));
    }

    #[test]
    fn test_non_string_scalars_are_kept() {
        let tree = deserialize("count: 3\nactive: true\nnothing: ~\n").unwrap();

        assert!(matches!(tree.get("count"), Some(Tree::Number(_))));
        assert_eq!(tree.get("active"), Some(&Tree::Bool(true)));
        assert_eq!(tree.get("nothing"), Some(&Tree::Null));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(matches!(deserialize("Q: [unclosed"), Err(OutlineError::Yaml(_))));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("lcc").join("classification.yaml");
        let tree = Tree::from_entries([("Q", Tree::from("Science"))]);

        save(&tree, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, tree);
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = load(Path::new("/nonexistent/classification.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/classification.yaml"));
    }
}
