use std::collections::BTreeSet;
use std::ops::Range;

use crate::app::services::text_ops::floor_char_boundary;

/// Characters typed before completions are offered.
pub const COMPLETION_THRESHOLD: usize = 5;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Byte range of the word being typed at `pos`: from the start of the word
/// up to `pos`.
pub fn word_prefix_range(text: &str, pos: usize) -> Range<usize> {
    let pos = floor_char_boundary(text, pos);
    let start = text[..pos]
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_word_char(*c))
        .last()
        .map_or(pos, |(i, _)| i);
    start..pos
}

/// Document words that complete the word typed at `pos`.
///
/// Nothing is offered until the typed prefix reaches
/// [`COMPLETION_THRESHOLD`] characters. Matching ignores case. The word under
/// the caret is not its own completion, and words no longer than the prefix
/// are skipped. Results are distinct and sorted ignoring case.
pub fn completion_candidates(text: &str, pos: usize) -> Vec<String> {
    let prefix_range = word_prefix_range(text, pos);
    let prefix = &text[prefix_range.clone()];
    let prefix_chars = prefix.chars().count();
    if prefix_chars < COMPLETION_THRESHOLD {
        return Vec::new();
    }
    let prefix_lower = prefix.to_lowercase();

    let mut found = BTreeSet::new();
    for (start, word) in words(text) {
        if start == prefix_range.start {
            continue;
        }
        if word.chars().count() <= prefix_chars {
            continue;
        }
        let lower = word.to_lowercase();
        if lower.starts_with(&prefix_lower) {
            found.insert((lower, word.to_string()));
        }
    }
    found.into_iter().map(|(_, word)| word).collect()
}

/// Every word in `text` with its byte offset.
fn words(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut rest = text.char_indices().peekable();
    std::iter::from_fn(move || {
        while let Some(&(_, c)) = rest.peek() {
            if is_word_char(c) {
                break;
            }
            rest.next();
        }
        let (start, _) = *rest.peek()?;
        let mut end = start;
        while let Some(&(i, c)) = rest.peek() {
            if !is_word_char(c) {
                break;
            }
            end = i + c.len_utf8();
            rest.next();
        }
        Some((start, &text[start..end]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROGRAM: &str = "var counter : int\nvar countdown : int\nput Counter\ncount";

    #[test]
    fn test_prefix_range() {
        assert_eq!(word_prefix_range("put total", 9), 4..9);
        assert_eq!(word_prefix_range("put total", 6), 4..6);
        assert_eq!(word_prefix_range("put ", 4), 4..4);
        assert_eq!(word_prefix_range("", 0), 0..0);
    }

    #[test]
    fn test_below_threshold_offers_nothing() {
        let text = "counter\ncoun";
        assert!(completion_candidates(text, text.len()).is_empty());
    }

    #[test]
    fn test_candidates_ignore_case_and_dedupe() {
        let text = format!("{PROGRAM}\ncounter");
        let candidates = completion_candidates(&text, PROGRAM.len());
        assert_eq!(candidates, vec!["countdown", "Counter", "counter"]);
    }

    #[test]
    fn test_word_under_caret_is_not_offered() {
        let text = "value valu\nvalue";
        assert!(completion_candidates(text, 5).is_empty());
        assert_eq!(completion_candidates("values value", 12), vec!["values"]);
    }

    #[test]
    fn test_caret_mid_word_uses_prefix() {
        let text = "counter countdown";
        // Caret after "count" inside "countdown"
        assert_eq!(completion_candidates(text, 13), vec!["counter"]);
    }

    #[test]
    fn test_non_ascii_words() {
        let text = "größer größe";
        assert_eq!(completion_candidates(text, text.len()), vec!["größer"]);
    }

    #[test]
    fn test_words() {
        let found: Vec<_> = words("  a_b, c1\n").collect();
        assert_eq!(found, vec![(2, "a_b"), (7, "c1")]);
    }
}
