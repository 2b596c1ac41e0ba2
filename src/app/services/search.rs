use std::ops::Range;

use regex_lite::Regex;

use super::text_ops::{floor_char_boundary, next_char_boundary};
use crate::app::domain::FindOptions;
use crate::app::infrastructure::error::{AppError, Result};

/// Incremental search state owned by an editor widget: the compiled query and
/// where the next search starts.
#[derive(Debug, Clone)]
pub struct SearchCursor {
    regex: Regex,
    next_start: usize,
}

impl SearchCursor {
    pub fn new(pattern: &str, options: FindOptions) -> Result<Self> {
        if pattern.is_empty() {
            return Err(AppError::EmptyPattern);
        }
        Ok(Self {
            regex: Regex::new(&build_pattern(pattern, options))?,
            next_start: 0,
        })
    }

    /// First match from the top of `text`.
    pub fn first(&mut self, text: &str) -> Option<Range<usize>> {
        self.next_start = 0;
        self.search_from(text, 0)
    }

    /// Match after the previous one, wrapping to the top when none remain.
    pub fn next(&mut self, text: &str) -> Option<Range<usize>> {
        if self.next_start <= text.len() {
            let start = floor_char_boundary(text, self.next_start);
            if let Some(found) = self.search_from(text, start) {
                return Some(found);
            }
            if start == 0 {
                return None;
            }
        }
        self.search_from(text, 0)
    }

    /// Continue the next search from `pos`, e.g. after the selection was replaced.
    pub fn resume_at(&mut self, pos: usize) {
        self.next_start = pos;
    }

    fn search_from(&mut self, text: &str, start: usize) -> Option<Range<usize>> {
        let m = self.regex.find_at(text, start)?;
        // An empty match must not be found again at the same spot.
        self.next_start = if m.start() < m.end() {
            m.end()
        } else if m.end() < text.len() {
            next_char_boundary(text, m.end())
        } else {
            text.len() + 1
        };
        Some(m.start()..m.end())
    }
}

fn build_pattern(pattern: &str, options: FindOptions) -> String {
    let body = if options.regex {
        pattern.to_string()
    } else {
        regex_lite::escape(pattern)
    };
    let body = if options.whole_word {
        format!(r"\b(?:{body})\b")
    } else {
        body
    };
    if options.case_sensitive {
        body
    } else {
        format!("(?i){body}")
    }
}
