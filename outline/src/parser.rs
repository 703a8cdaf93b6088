//! Line-oriented outline parser.
//!
//! The outline is a block of prose where the interesting lines look like
//!
//! ```text
//! Class Q – Science
//! Subclass QA – Mathematics
//! Subclasses QB – Astronomy
//! ```
//!
//! Everything else is ignored. Lines that look like class or subclass
//! entries but cannot be read are reported as [`ParseWarning`]s and skipped,
//! since the source text is scraped and noisy.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::error::{OutlineError, Result};
use crate::scheme::{ClassificationNode, ClassificationScheme};

/// Separator between a code and its description (en dash with spaces).
pub const CODE_SEPARATOR: &str = " – ";

const CLASS_PREFIX: &str = "Class ";
const SUBCLASS_PREFIXES: [&str; 2] = ["Subclasses ", "Subclass "];

/// Markers delimiting the outline inside a larger document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineBoundaries {
    /// Text that opens the outline.
    pub start_marker: String,

    /// Text that closes the outline. The marker itself is kept.
    pub end_marker: String,
}

impl OutlineBoundaries {
    /// Create boundaries from explicit markers.
    pub fn new(start_marker: impl Into<String>, end_marker: impl Into<String>) -> Self {
        Self {
            start_marker: start_marker.into(),
            end_marker: end_marker.into(),
        }
    }
}

impl Default for OutlineBoundaries {
    fn default() -> Self {
        Self::new(
            "Full classification outline",
            "Subclass ZA – Information resources/materials",
        )
    }
}

/// A recoverable problem found while parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A `Class` line without a readable code and description.
    #[error("line {line_number}: malformed class line: {line:?}")]
    MalformedClassLine { line_number: usize, line: String },

    /// A `Subclass` line that could not be attached to a class.
    #[error("line {line_number}: malformed subclass line ({reason}): {line:?}")]
    MalformedSubclassLine {
        line_number: usize,
        line: String,
        reason: String,
    },

    /// A class or subclass code seen twice; the later entry wins.
    #[error("line {line_number}: duplicate code {code}, replacing earlier entry")]
    DuplicateCode { line_number: usize, code: String },
}

impl ParseWarning {
    /// Line the warning refers to (1-based).
    pub fn line_number(&self) -> usize {
        match self {
            Self::MalformedClassLine { line_number, .. }
            | Self::MalformedSubclassLine { line_number, .. }
            | Self::DuplicateCode { line_number, .. } => *line_number,
        }
    }
}

/// Result of parsing an outline.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    /// The parsed scheme.
    pub scheme: ClassificationScheme,

    /// Recoverable problems, in line order.
    pub warnings: Vec<ParseWarning>,
}

/// Cut the outline out of a larger document.
///
/// Returns the text from the start marker through the end of the end marker.
pub fn trim_outline<'a>(text: &'a str, boundaries: &OutlineBoundaries) -> Result<&'a str> {
    let start = text
        .find(&boundaries.start_marker)
        .ok_or_else(|| OutlineError::BoundaryNotFound {
            marker: boundaries.start_marker.clone(),
        })?;

    let end = text[start..]
        .find(&boundaries.end_marker)
        .map(|offset| start + offset + boundaries.end_marker.len())
        .ok_or_else(|| OutlineError::BoundaryNotFound {
            marker: boundaries.end_marker.clone(),
        })?;

    debug!("Trimmed outline to bytes {start}..{end} of {}", text.len());
    Ok(&text[start..end])
}

/// Trim a document to its outline and parse it.
pub fn parse_document(text: &str, boundaries: &OutlineBoundaries) -> Result<ParseOutcome> {
    let outline = trim_outline(text, boundaries)?;
    Ok(parse_outline(outline))
}

/// Parse outline text into a classification scheme.
pub fn parse_outline(text: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();
    let mut current_class: Option<String> = None;

    for (index, raw) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw.trim();

        if line.is_empty() {
            continue;
        }

        match classify(line) {
            LineKind::Class(rest) => match split_entry(rest) {
                Some((code, description)) => {
                    let replaced = outcome
                        .scheme
                        .insert(ClassificationNode::new(code, description));
                    if replaced.is_some() {
                        outcome.warn(ParseWarning::DuplicateCode {
                            line_number,
                            code: code.to_string(),
                        });
                    }
                    debug!("Opened class {code}");
                    current_class = Some(code.to_string());
                }
                None => outcome.warn(ParseWarning::MalformedClassLine {
                    line_number,
                    line: line.to_string(),
                }),
            },
            LineKind::Subclass(rest) => {
                let attached =
                    attach_subclass(&mut outcome, current_class.as_deref(), rest, line_number);
                if let Err(reason) = attached {
                    outcome.warn(ParseWarning::MalformedSubclassLine {
                        line_number,
                        line: line.to_string(),
                        reason,
                    });
                }
            }
            LineKind::Other => trace!("Ignoring line {line_number}"),
        }
    }

    info!(
        "Parsed {} classes and {} subclasses ({} warnings)",
        outcome.scheme.len(),
        outcome.scheme.subclass_count(),
        outcome.warnings.len()
    );

    outcome
}

impl ParseOutcome {
    fn warn(&mut self, warning: ParseWarning) {
        warn!("{warning}");
        self.warnings.push(warning);
    }
}

/// Add a subclass entry to the open class, or explain why it cannot be.
fn attach_subclass(
    outcome: &mut ParseOutcome,
    current_class: Option<&str>,
    rest: &str,
    line_number: usize,
) -> std::result::Result<(), String> {
    let class_code = current_class.ok_or_else(|| "no class is open".to_string())?;
    let (code, description) =
        split_entry(rest).ok_or_else(|| format!("missing {CODE_SEPARATOR:?} separator"))?;

    if !belongs_to(code, class_code) {
        return Err(format!("{code} does not belong to class {class_code}"));
    }

    let class = outcome
        .scheme
        .get_mut(class_code)
        .ok_or_else(|| format!("class {class_code} is missing"))?;

    if class.insert_subclass(code, description).is_some() {
        outcome.warn(ParseWarning::DuplicateCode {
            line_number,
            code: code.to_string(),
        });
    }

    trace!("Added subclass {code} to class {class_code}");
    Ok(())
}

enum LineKind<'a> {
    Class(&'a str),
    Subclass(&'a str),
    Other,
}

fn classify(line: &str) -> LineKind<'_> {
    if let Some(rest) = line.strip_prefix(CLASS_PREFIX) {
        return LineKind::Class(rest);
    }

    SUBCLASS_PREFIXES
        .iter()
        .find_map(|prefix| line.strip_prefix(prefix))
        .map_or(LineKind::Other, LineKind::Subclass)
}

/// Split `CODE – description` into its parts. Both must be non-empty.
fn split_entry(rest: &str) -> Option<(&str, &str)> {
    let (code, description) = rest.split_once(CODE_SEPARATOR)?;
    let code = code.trim();
    let description = description.trim();

    if code.is_empty() || description.is_empty() {
        None
    } else {
        Some((code, description))
    }
}

/// Subclass codes extend the letter of their class (`QA` under `Q`).
fn belongs_to(subclass_code: &str, class_code: &str) -> bool {
    match (subclass_code.chars().next(), class_code.chars().next()) {
        (Some(sub), Some(class)) => sub.eq_ignore_ascii_case(&class),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_entry() {
        assert_eq!(split_entry("Q – Science"), Some(("Q", "Science")));
        assert_eq!(
            split_entry("QA – Mathematics – pure and applied"),
            Some(("QA", "Mathematics – pure and applied"))
        );
        assert_eq!(split_entry("X Science"), None);
        assert_eq!(split_entry("Q – "), None);
    }

    #[test]
    fn test_classify_prefixes() {
        assert!(matches!(classify("Class Q – Science"), LineKind::Class("Q – Science")));
        assert!(matches!(
            classify("Subclass QA – Mathematics"),
            LineKind::Subclass("QA – Mathematics")
        ));
        assert!(matches!(
            classify("Subclasses QB – Astronomy"),
            LineKind::Subclass("QB – Astronomy")
        ));
        assert!(matches!(classify("Classification of works"), LineKind::Other));
    }

    #[test]
    fn test_subclass_before_class_is_rejected() {
        let outcome = parse_outline("Subclass QA – Mathematics\nClass Q – Science\n");

        assert!(outcome.scheme.get("Q").unwrap().subclasses.is_empty());
        assert!(matches!(
            outcome.warnings.as_slice(),
            [ParseWarning::MalformedSubclassLine { line_number: 1, .. }]
        ));
    }

    #[test]
    fn test_subclass_without_separator_is_rejected() {
        let outcome = parse_outline("Class Q – Science\nSubclass QA Mathematics\n");

        assert!(outcome.scheme.get("Q").unwrap().subclasses.is_empty());
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].line_number(), 2);
    }

    #[test]
    fn test_duplicate_codes_replace_and_warn() {
        let text = "Class Q – Science\nSubclass QA – Math\nSubclass QA – Mathematics\n";
        let outcome = parse_outline(text);

        let q = outcome.scheme.get("Q").unwrap();
        assert_eq!(q.subclasses.get("QA").map(String::as_str), Some("Mathematics"));
        assert_eq!(
            outcome.warnings,
            vec![ParseWarning::DuplicateCode {
                line_number: 3,
                code: "QA".to_string()
            }]
        );
    }

    #[test]
    fn test_trim_outline_keeps_end_marker() {
        let boundaries = OutlineBoundaries::default();
        let text = "Intro\nFull classification outline\nClass Z – Bibliography\nSubclass ZA – Information resources/materials\nSee also\n";

        let trimmed = trim_outline(text, &boundaries).unwrap();

        assert!(trimmed.starts_with("Full classification outline"));
        assert!(trimmed.ends_with("Subclass ZA – Information resources/materials"));
        assert!(!trimmed.contains("See also"));
    }

    #[test]
    fn test_trim_outline_missing_markers() {
        let boundaries = OutlineBoundaries::default();

        let err = trim_outline("Class Q – Science", &boundaries).unwrap_err();
        assert!(matches!(
            err,
            OutlineError::BoundaryNotFound { ref marker } if marker == "Full classification outline"
        ));

        let err = trim_outline("Full classification outline\nClass Q – Science", &boundaries)
            .unwrap_err();
        assert!(matches!(
            err,
            OutlineError::BoundaryNotFound { ref marker } if marker.starts_with("Subclass ZA")
        ));
    }

    #[test]
    fn test_end_marker_before_start_is_not_found() {
        let boundaries = OutlineBoundaries::new("START", "END");
        assert!(trim_outline("END then START", &boundaries).is_err());
    }
}
