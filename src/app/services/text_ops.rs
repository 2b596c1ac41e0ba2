use std::ops::Range;

use regex_lite::Regex;

use crate::app::infrastructure::error::Result;

/// Number of lines in `text`. An empty document has one line.
pub fn line_count(text: &str) -> usize {
    text.bytes().filter(|b| *b == b'\n').count() + 1
}

/// Byte position where 0-based `line` starts, or None past the last line.
pub fn line_start(text: &str, line: usize) -> Option<usize> {
    if line == 0 {
        return Some(0);
    }
    text.match_indices('\n').nth(line - 1).map(|(i, _)| i + 1)
}

/// Byte position where the line containing `pos` ends (its newline, or the end of text).
pub fn line_end_from(text: &str, pos: usize) -> usize {
    text[pos..].find('\n').map_or(text.len(), |i| pos + i)
}

/// 0-based line containing byte position `pos`.
pub fn line_of_position(text: &str, pos: usize) -> usize {
    let pos = pos.min(text.len());
    text.as_bytes()[..pos].iter().filter(|b| **b == b'\n').count()
}

/// Byte position of the character `offset` characters past the start of `line`.
///
/// Offsets beyond the end of the line keep counting into the following lines;
/// everything is clamped to the end of the document. A `line` past the last
/// line resolves to the end of the document.
pub fn position_from_line_offset(text: &str, line: usize, offset: usize) -> usize {
    let Some(start) = line_start(text, line) else {
        return text.len();
    };
    text[start..]
        .char_indices()
        .nth(offset)
        .map_or(text.len(), |(i, _)| start + i)
}

/// Largest char boundary at or below `pos`.
pub fn floor_char_boundary(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// Char boundary right after the character starting at `pos`.
pub fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len(), |c| pos + c.len_utf8())
}

/// Leading whitespace of the line containing `pos`, used for auto-indent.
pub fn leading_indent(text: &str, pos: usize) -> &str {
    let pos = floor_char_boundary(text, pos);
    let start = text[..pos].rfind('\n').map_or(0, |i| i + 1);
    let line = &text[start..pos];
    let indent_len = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..indent_len]
}

/// Ranges of every non-overlapping, case-sensitive occurrence of `needle`.
///
/// The last occurrence is located first and used as the terminator of a
/// forward scan. An empty needle has no occurrences.
pub fn find_all_ranges(text: &str, needle: &str) -> Vec<Range<usize>> {
    if needle.is_empty() {
        return Vec::new();
    }
    let Some(last) = text.rfind(needle) else {
        return Vec::new();
    };

    let mut ranges = Vec::new();
    let mut from = 0;
    while let Some(found) = text[from..].find(needle).map(|i| from + i) {
        ranges.push(found..found + needle.len());
        if found == last {
            break;
        }
        from = found + needle.len();
    }
    ranges
}

/// Replace every literal occurrence of `search` with `replace`.
///
/// Returns (new_text, count_of_replacements). An empty `search` replaces nothing.
pub fn replace_all_literal(text: &str, search: &str, replace: &str) -> (String, usize) {
    if search.is_empty() {
        return (text.to_string(), 0);
    }
    let count = text.matches(search).count();
    if count == 0 {
        return (text.to_string(), 0);
    }
    (text.replace(search, replace), count)
}

/// Replace every match of `pattern`.
///
/// Quantifiers are minimal unless `greedy` is set. `\1`..`\9` in `replace`
/// refer to capture groups; every other character is literal.
pub fn replace_all_regex(text: &str, pattern: &str, replace: &str, greedy: bool) -> Result<(String, usize)> {
    let pattern = if greedy {
        pattern.to_string()
    } else {
        format!("(?U){pattern}")
    };
    let re = Regex::new(&pattern)?;

    let count = re.find_iter(text).count();
    if count == 0 {
        return Ok((text.to_string(), 0));
    }
    let template = expand_backreferences(replace);
    Ok((re.replace_all(text, template.as_str()).into_owned(), count))
}

/// Translate a `\N` style replacement into the `${N}` syntax of regex-lite,
/// escaping any literal `$`.
fn expand_backreferences(replace: &str) -> String {
    let mut out = String::with_capacity(replace.len());
    let mut chars = replace.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '$' => out.push_str("$$"),
            '\\' => match chars.peek() {
                Some(d) if d.is_ascii_digit() => {
                    out.push_str("${");
                    out.push(*d);
                    out.push('}');
                    chars.next();
                }
                _ => out.push('\\'),
            },
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // Line arithmetic

    #[test]
    fn test_line_count() {
        assert_eq!(line_count(""), 1);
        assert_eq!(line_count("one"), 1);
        assert_eq!(line_count("one\ntwo\n"), 3);
    }

    #[test]
    fn test_line_start() {
        let text = "first\nsecond\nthird";
        assert_eq!(line_start(text, 0), Some(0));
        assert_eq!(line_start(text, 1), Some(6));
        assert_eq!(line_start(text, 2), Some(13));
        assert_eq!(line_start(text, 3), None);
    }

    #[test]
    fn test_line_of_position() {
        let text = "ab\ncd\nef";
        assert_eq!(line_of_position(text, 0), 0);
        assert_eq!(line_of_position(text, 2), 0);
        assert_eq!(line_of_position(text, 3), 1);
        assert_eq!(line_of_position(text, 100), 2);
    }

    #[test]
    fn test_line_end_from() {
        let text = "ab\ncd";
        assert_eq!(line_end_from(text, 0), 2);
        assert_eq!(line_end_from(text, 3), 5);
    }

    #[test]
    fn test_position_within_line() {
        let text = "var x : int\nput x";
        assert_eq!(position_from_line_offset(text, 1, 0), 12);
        assert_eq!(position_from_line_offset(text, 1, 4), 16);
    }

    #[test]
    fn test_position_wraps_past_line_end() {
        let text = "abc\ndefg";
        // offset 5 on line 0: a b c \n d -> 'e'
        assert_eq!(position_from_line_offset(text, 0, 5), 5);
    }

    #[test]
    fn test_position_clamped_to_document_end() {
        let text = "abc\nde";
        assert_eq!(position_from_line_offset(text, 1, 50), text.len());
        assert_eq!(position_from_line_offset(text, 9, 0), text.len());
    }

    #[test]
    fn test_position_counts_characters() {
        let text = "é1é2";
        assert_eq!(position_from_line_offset(text, 0, 2), 3);
    }

    #[test]
    fn test_char_boundaries() {
        let text = "aé";
        assert_eq!(floor_char_boundary(text, 2), 1);
        assert_eq!(next_char_boundary(text, 1), 3);
        assert_eq!(next_char_boundary(text, 3), 3);
    }

    #[test]
    fn test_leading_indent() {
        let text = "loop\n    put 1\n\tend";
        assert_eq!(leading_indent(text, 4), "");
        assert_eq!(leading_indent(text, text.find("put").unwrap() + 3), "    ");
        assert_eq!(leading_indent(text, text.len()), "\t");
    }

    // Find all

    #[test]
    fn test_find_all_two_hits() {
        assert_eq!(find_all_ranges("cat sat cat", "cat"), vec![0..3, 8..11]);
    }

    #[test]
    fn test_find_all_empty_needle() {
        assert!(find_all_ranges("cat sat cat", "").is_empty());
    }

    #[test]
    fn test_find_all_absent() {
        assert!(find_all_ranges("cat sat cat", "dog").is_empty());
    }

    #[test]
    fn test_find_all_single_hit() {
        assert_eq!(find_all_ranges("a dog", "dog"), vec![2..5]);
    }

    #[test]
    fn test_find_all_case_sensitive() {
        assert_eq!(find_all_ranges("Cat cat", "cat"), vec![4..7]);
    }

    #[test]
    fn test_find_all_non_overlapping() {
        // The last occurrence (1) starts inside the first hit; the scan must
        // still stop once no further non-overlapping hit exists.
        assert_eq!(find_all_ranges("aaa", "aa"), vec![0..2]);
        assert_eq!(find_all_ranges("aaaa", "aa"), vec![0..2, 2..4]);
    }

    // Replace all

    #[test]
    fn test_replace_literal() {
        assert_eq!(replace_all_literal("banana", "a", "b"), ("bbnbnb".to_string(), 3));
    }

    #[test]
    fn test_replace_literal_empty_search() {
        assert_eq!(replace_all_literal("hello", "", "X"), ("hello".to_string(), 0));
    }

    #[test]
    fn test_replace_literal_no_match() {
        assert_eq!(replace_all_literal("hello", "z", "X"), ("hello".to_string(), 0));
    }

    #[test]
    fn test_replace_literal_unicode() {
        assert_eq!(replace_all_literal("Hello 世界", "世界", "World"), ("Hello World".to_string(), 1));
    }

    #[test]
    fn test_regex_single_run() {
        assert_eq!(replace_all_regex("aaa", "a+", "X", true).unwrap().0, "X");
        // Minimal matching turns `a+` into single characters.
        assert_eq!(replace_all_regex("aaa", "a+", "X", false).unwrap(), ("XXX".to_string(), 3));
    }

    #[test]
    fn test_regex_greedy_vs_minimal() {
        let text = "aaa bbb aaa";
        let (greedy, n) = replace_all_regex(text, "a.*a", "X", true).unwrap();
        assert_eq!((greedy.as_str(), n), ("X", 1));

        let (minimal, n) = replace_all_regex(text, "a.*a", "X", false).unwrap();
        assert!(n > 1);
        assert_eq!(minimal, "XXX");
    }

    #[test]
    fn test_regex_backreferences() {
        let (out, n) = replace_all_regex("a1 b2", r"([a-z])(\d)", r"\2\1", true).unwrap();
        assert_eq!(out, "1a 2b");
        assert_eq!(n, 2);
    }

    #[test]
    fn test_regex_dollar_is_literal() {
        let (out, _) = replace_all_regex("cost", "cost", "$5", true).unwrap();
        assert_eq!(out, "$5");
    }

    #[test]
    fn test_regex_invalid_pattern() {
        assert!(replace_all_regex("abc", "(a", "x", true).is_err());
    }

    #[test]
    fn test_regex_no_match_keeps_text() {
        assert_eq!(replace_all_regex("abc", "z+", "x", false).unwrap(), ("abc".to_string(), 0));
    }

    #[test]
    fn test_expand_backreferences() {
        assert_eq!(expand_backreferences(r"\1-\2"), "${1}-${2}");
        assert_eq!(expand_backreferences(r"a\b"), r"a\b");
        assert_eq!(expand_backreferences("$x"), "$$x");
    }
}
