//! Line-preserving text chunking.
//!
//! Long strings are cut into request-sized chunks before they are sent to a
//! translation provider. Cuts only ever happen after a line terminator, so
//! every line reaches the provider whole.

/// Default maximum chunk size in characters.
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 5000;

/// Split `text` into chunks of at most `max_chunk_chars` characters.
///
/// Lines keep their terminators and are never split. A single line longer
/// than the limit becomes a chunk of its own. Concatenating the result
/// gives back `text` exactly. Empty input yields no chunks.
pub fn split_into_chunks(text: &str, max_chunk_chars: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut chunk_start = 0;
    let mut chunk_chars = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let line_chars = line.chars().count();

        if chunk_chars > 0 && chunk_chars + line_chars > max_chunk_chars {
            chunks.push(&text[chunk_start..offset]);
            chunk_start = offset;
            chunk_chars = 0;
        }

        chunk_chars += line_chars;
        offset += line.len();
    }

    if offset > chunk_start {
        chunks.push(&text[chunk_start..offset]);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(split_into_chunks("Science\n", 5000), vec!["Science\n"]);
        assert_eq!(split_into_chunks("no newline", 5000), vec!["no newline"]);
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        assert!(split_into_chunks("", 10).is_empty());
    }

    #[test]
    fn test_splits_on_line_boundaries() {
        let text = "aaaa\nbbbb\ncccc\n";

        assert_eq!(split_into_chunks(text, 10), vec!["aaaa\nbbbb\n", "cccc\n"]);
        assert_eq!(split_into_chunks(text, 9), vec!["aaaa\n", "bbbb\n", "cccc\n"]);
    }

    #[test]
    fn test_overlong_line_stands_alone() {
        let text = "short\nthis line is far too long\nend";

        let chunks = split_into_chunks(text, 8);

        assert_eq!(chunks, vec!["short\n", "this line is far too long\n", "end"]);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let text = "ééé\nééé\n";

        assert_eq!(split_into_chunks(text, 8), vec![text]);
    }

    #[test]
    fn test_chunks_preserve_lines() {
        let text: String = (0..500)
            .map(|i| format!("Subclass Q{i} – Line number {i}\r\n"))
            .collect();

        let chunks = split_into_chunks(&text, 1000);

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= 1000));
        assert!(chunks.iter().all(|c| c.ends_with('\n')));
        assert_eq!(chunks.concat(), text);
        let line_count: usize = chunks.iter().map(|c| c.lines().count()).sum();
        assert_eq!(line_count, text.lines().count());
    }
}
