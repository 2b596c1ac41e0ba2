//! The text-editing widget as seen by the overlay manager.
//!
//! `EditorWidget` lists what the manager needs from a widget: text access,
//! the modification flag, annotations, markers, indicator channels, a search
//! cursor and caret/selection colours. `MemoryEditor` implements it over a
//! plain `String`; the FLTK window implements it over a `TextEditor`.

use std::ops::Range;

use crate::app::decorations::{Decorations, TextEdit};
use crate::app::domain::{AnnotationStyle, FindOptions, IndicatorId, MarkerId, Rgb, Rgba};
use crate::app::services::search::SearchCursor;
use crate::app::services::text_ops;

pub trait EditorWidget {
    // --- Text ---

    fn text(&self) -> String;

    /// Replace the whole document in one operation.
    fn set_text(&mut self, text: &str);

    /// Document length in bytes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn line_count(&self) -> usize {
        text_ops::line_count(&self.text())
    }

    /// Byte position `offset` characters after the start of `line`, wrapping
    /// past the end of the line and clamped to the end of the document.
    fn position_from_line_offset(&self, line: usize, offset: usize) -> usize {
        text_ops::position_from_line_offset(&self.text(), line, offset)
    }

    // --- Modification flag ---

    fn is_modified(&self) -> bool;
    fn set_modified(&mut self, modified: bool);

    // --- Decorations ---

    fn annotate(&mut self, line: usize, text: &str, style: AnnotationStyle);
    fn clear_annotations(&mut self);
    fn marker_add(&mut self, line: usize, marker: MarkerId);
    /// Remove `marker` from every line, or every marker when `None`.
    fn marker_delete_all(&mut self, marker: Option<MarkerId>);
    fn fill_indicator_range(&mut self, range: Range<usize>, indicator: IndicatorId);
    /// Fill many ranges on `indicator` in one update.
    fn fill_indicator_ranges(&mut self, ranges: Vec<Range<usize>>, indicator: IndicatorId);
    /// Clear `range` on `indicator`, or on every channel when `None`.
    fn clear_indicator_range(&mut self, range: Range<usize>, indicator: Option<IndicatorId>);
    /// Snapshot of the current decorations.
    fn decorations(&self) -> Decorations;

    // --- Selection and search ---

    fn selection(&self) -> Option<Range<usize>>;

    fn has_selection(&self) -> bool {
        self.selection().is_some()
    }

    /// Replace the selected text. Returns false when nothing is selected.
    fn replace_selection(&mut self, text: &str) -> bool;
    /// Select the first match from the top of the document.
    fn find_first(&mut self, pattern: &str, options: FindOptions) -> bool;
    /// Select the next match of the last `find_first` query.
    fn find_next(&mut self) -> bool;

    // --- Chrome ---

    fn set_caret_color(&mut self, color: Rgb);
    /// `None` restores the platform highlight colour.
    fn set_selection_color(&mut self, color: Option<Rgba>);
}

/// Headless editor widget backed by a `String`.
#[derive(Debug, Clone, Default)]
pub struct MemoryEditor {
    text: String,
    modified: bool,
    selection: Option<Range<usize>>,
    search: Option<SearchCursor>,
    decorations: Decorations,
    caret_color: Option<Rgb>,
    selection_color: Option<Rgba>,
}

impl MemoryEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    /// Select `range`, as a user dragging the mouse would. Ranges that are
    /// empty, out of bounds or split a character select nothing.
    pub fn select(&mut self, range: Range<usize>) {
        let valid = !range.is_empty()
            && range.end <= self.text.len()
            && self.text.is_char_boundary(range.start)
            && self.text.is_char_boundary(range.end);
        self.selection = valid.then_some(range);
    }

    /// Type `inserted` over `range`, keeping decorations in step.
    pub fn edit(&mut self, range: Range<usize>, inserted: &str) {
        let line = text_ops::line_of_position(&self.text, range.start);
        let edit = TextEdit::new(range.start, line, &self.text[range.clone()], inserted);
        self.text.replace_range(range, inserted);
        self.decorations.apply_edit(&edit);
        self.selection = None;
        self.modified = true;
    }

    pub fn caret_color(&self) -> Option<Rgb> {
        self.caret_color
    }

    pub fn selection_color(&self) -> Option<Rgba> {
        self.selection_color
    }
}

impl EditorWidget for MemoryEditor {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.selection = None;
        self.modified = true;
        self.decorations.reset_for_text(text_ops::line_count(text));
    }

    fn len(&self) -> usize {
        self.text.len()
    }

    fn line_count(&self) -> usize {
        text_ops::line_count(&self.text)
    }

    fn position_from_line_offset(&self, line: usize, offset: usize) -> usize {
        text_ops::position_from_line_offset(&self.text, line, offset)
    }

    fn is_modified(&self) -> bool {
        self.modified
    }

    fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    fn annotate(&mut self, line: usize, text: &str, style: AnnotationStyle) {
        self.decorations.annotate(line, text, style);
    }

    fn clear_annotations(&mut self) {
        self.decorations.clear_annotations();
    }

    fn marker_add(&mut self, line: usize, marker: MarkerId) {
        self.decorations.marker_add(line, marker);
    }

    fn marker_delete_all(&mut self, marker: Option<MarkerId>) {
        self.decorations.marker_delete_all(marker);
    }

    fn fill_indicator_range(&mut self, range: Range<usize>, indicator: IndicatorId) {
        self.decorations.fill_indicator(range, indicator);
    }

    fn fill_indicator_ranges(&mut self, ranges: Vec<Range<usize>>, indicator: IndicatorId) {
        self.decorations.fill_indicator_ranges(ranges, indicator);
    }

    fn clear_indicator_range(&mut self, range: Range<usize>, indicator: Option<IndicatorId>) {
        self.decorations.clear_indicator(range, indicator);
    }

    fn decorations(&self) -> Decorations {
        self.decorations.clone()
    }

    fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    fn replace_selection(&mut self, text: &str) -> bool {
        let Some(range) = self.selection.clone() else {
            return false;
        };
        let start = range.start;
        self.edit(range, text);
        if let Some(search) = self.search.as_mut() {
            search.resume_at(start + text.len());
        }
        true
    }

    fn find_first(&mut self, pattern: &str, options: FindOptions) -> bool {
        self.search = match SearchCursor::new(pattern, options) {
            Ok(cursor) => Some(cursor),
            Err(e) => {
                tracing::warn!("Find failed: {}", e);
                None
            }
        };
        let found = self.search.as_mut().and_then(|s| s.first(&self.text));
        self.selection = found.clone();
        found.is_some()
    }

    fn find_next(&mut self) -> bool {
        match self.search.as_mut().and_then(|s| s.next(&self.text)) {
            Some(found) => {
                self.selection = Some(found);
                true
            }
            None => false,
        }
    }

    fn set_caret_color(&mut self, color: Rgb) {
        self.caret_color = Some(color);
    }

    fn set_selection_color(&mut self, color: Option<Rgba>) {
        self.selection_color = color;
    }
}
