use super::theme::AnnotationStyle;

/// Margin marker kind, identified by a small integer like the widget's marker
/// numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(pub u8);

/// Indicator channel: an independent layer of character-range highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndicatorId(pub u8);

/// Arrow in the margin of every line carrying an error.
pub const ERROR_MARKER: MarkerId = MarkerId(1);
/// Wavy underline below the offending characters of an error.
pub const SQUIGGLE_INDICATOR: IndicatorId = IndicatorId(2);
/// Box drawn around every hit of "find all".
pub const SEARCH_INDICATOR: IndicatorId = IndicatorId(3);

/// An error reported against the document, as handed to the overlay manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorAnnotation {
    /// 0-based line number.
    pub line: usize,
    pub message: String,
    /// Half-open character range `[from, to)` counted from the start of `line`.
    pub underline: Option<(usize, usize)>,
}

impl ErrorAnnotation {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
            underline: None,
        }
    }

    pub fn with_underline(mut self, from: usize, to: usize) -> Self {
        self.underline = Some((from, to));
        self
    }

    /// Text shown in the annotation box under the line.
    pub fn display_text(&self) -> String {
        format!("^ {}", self.message)
    }
}

/// Inline text attached below a line. Not part of the document content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub text: String,
    pub style: AnnotationStyle,
}
