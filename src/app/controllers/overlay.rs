//! Error annotations and search highlights drawn over the document.
//!
//! Three decoration channels are managed here and never clear each other:
//! the error line marker, the error squiggle indicator and the search box
//! indicator. Only [`OverlayManager::clear_everything`] wipes them all.

use crate::app::domain::{
    style_for, ErrorAnnotation, FindOptions, FindRequest, Theme, ERROR_MARKER, SEARCH_INDICATOR,
    SQUIGGLE_INDICATOR,
};
use crate::app::infrastructure::error::Result;
use crate::app::services::text_ops::{find_all_ranges, replace_all_literal, replace_all_regex};
use crate::app::widget::EditorWidget;

pub struct OverlayManager<W: EditorWidget> {
    widget: W,
    theme: Theme,
}

impl<W: EditorWidget> OverlayManager<W> {
    /// Wrap `widget` and paint the caret and selection colours of `theme`.
    pub fn new(widget: W, theme: Theme) -> Self {
        let mut manager = Self { widget, theme };
        manager.apply_chrome();
        manager
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    // --- Errors ---

    /// Mark `line`, annotate it with `"^ " + message` in the current theme's
    /// style, and underline the characters `[from, to)` of the line if given.
    ///
    /// `to` past the end of the line carries on into the following lines.
    pub fn show_error(&mut self, line: usize, message: &str, underline: Option<(usize, usize)>) {
        self.report(&ErrorAnnotation {
            line,
            message: message.to_string(),
            underline,
        });
    }

    pub fn report(&mut self, error: &ErrorAnnotation) {
        self.widget.marker_add(error.line, ERROR_MARKER);
        self.widget
            .annotate(error.line, &error.display_text(), style_for(self.theme));

        if let Some((from, to)) = error.underline {
            if from < to {
                let start = self.widget.position_from_line_offset(error.line, from);
                let end = self.widget.position_from_line_offset(error.line, to);
                self.widget.fill_indicator_range(start..end, SQUIGGLE_INDICATOR);
            }
        }
    }

    /// Remove annotations, squiggles and error markers. Search boxes stay.
    pub fn clear_errors(&mut self) {
        self.widget.clear_annotations();
        let len = self.widget.len();
        self.widget.clear_indicator_range(0..len, Some(SQUIGGLE_INDICATOR));
        self.widget.marker_delete_all(Some(ERROR_MARKER));
    }

    /// Remove every annotation, indicator and marker.
    pub fn clear_everything(&mut self) {
        self.widget.clear_annotations();
        let len = self.widget.len();
        self.widget.clear_indicator_range(0..len, None);
        self.widget.marker_delete_all(None);
    }

    // --- Find / replace ---

    /// Box every occurrence of `text`, replacing the previous search boxes.
    /// Returns the number of occurrences found. Occurrences that touch (e.g.
    /// `"ab"` in `"abab"`) render as a single box.
    pub fn find_all(&mut self, text: &str) -> usize {
        let len = self.widget.len();
        self.widget.clear_indicator_range(0..len, Some(SEARCH_INDICATOR));

        let ranges = find_all_ranges(&self.widget.text(), text);
        let count = ranges.len();
        self.widget.fill_indicator_ranges(ranges, SEARCH_INDICATOR);
        count
    }

    pub fn find(&mut self, text: &str, options: FindOptions) -> bool {
        self.widget.find_first(text, options)
    }

    pub fn find_next(&mut self) -> bool {
        self.widget.find_next()
    }

    pub fn replace(&mut self, text: &str) -> bool {
        self.widget.replace_selection(text)
    }

    /// Substitute every match in the document and rewrite it in one call.
    ///
    /// Returns the number of replacements. Nothing is rewritten when there
    /// were none.
    pub fn replace_all(&mut self, find: &str, replacement: &str, regex: bool, greedy: bool) -> Result<usize> {
        let text = self.widget.text();
        let (new_text, count) = if regex {
            replace_all_regex(&text, find, replacement, greedy)?
        } else {
            replace_all_literal(&text, find, replacement)
        };
        if count > 0 {
            self.widget.set_text(&new_text);
        }
        Ok(count)
    }

    /// Handle a request from the find/replace dialog.
    pub fn dispatch(&mut self, request: FindRequest) -> Result<()> {
        match request {
            FindRequest::FindAll(text) => {
                self.find_all(&text);
            }
            FindRequest::Find { text, options } => {
                self.find(&text, options);
            }
            FindRequest::FindNext => {
                self.find_next();
            }
            FindRequest::Replace(text) => {
                self.replace(&text);
            }
            FindRequest::ReplaceAll {
                find,
                replacement,
                regex,
                greedy,
            } => {
                self.replace_all(&find, &replacement, regex, greedy)?;
            }
        }
        Ok(())
    }

    // --- Themes ---

    /// Switch theme. Error annotations drawn in the old style are dropped;
    /// search boxes are kept.
    pub fn set_theme(&mut self, theme: Theme) {
        tracing::debug!("Switching to {} theme", theme.lexer_name());
        self.theme = theme;
        self.apply_chrome();
        self.clear_errors();
    }

    pub fn light_theme(&mut self) {
        self.set_theme(Theme::Light);
    }

    pub fn dark_theme(&mut self) {
        self.set_theme(Theme::Dark);
    }

    fn apply_chrome(&mut self) {
        self.widget.set_caret_color(self.theme.caret_color());
        self.widget.set_selection_color(self.theme.selection_color());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::{Rgb, SEARCH_INDICATOR};
    use crate::app::widget::MemoryEditor;

    fn manager(text: &str) -> OverlayManager<MemoryEditor> {
        OverlayManager::new(MemoryEditor::with_text(text), Theme::Light)
    }

    #[test]
    fn test_new_applies_theme_chrome() {
        let m = OverlayManager::new(MemoryEditor::new(), Theme::Dark);
        assert_eq!(m.widget().caret_color(), Some(Rgb::new(167, 167, 167)));
        assert!(m.widget().selection_color().is_some());
    }

    #[test]
    fn test_show_error_decorates_line() {
        let mut m = manager("var x : int\nx := \"a\"\nput x");
        m.show_error(1, "Assigned value is the wrong type", Some((5, 8)));
        let d = m.widget().decorations();
        assert_eq!(d.marker_lines(ERROR_MARKER), vec![1]);
        let annotation = d.annotation(1).unwrap();
        assert_eq!(annotation.text, "^ Assigned value is the wrong type");
        assert_eq!(annotation.style, style_for(Theme::Light));
        // line 1 starts at byte 12
        assert_eq!(d.indicator_ranges(SQUIGGLE_INDICATOR), &[17..20]);
    }

    #[test]
    fn test_show_error_without_range() {
        let mut m = manager("a\nb");
        m.show_error(0, "oops", None);
        let d = m.widget().decorations();
        assert_eq!(d.annotation_count(), 1);
        assert!(d.indicator_ranges(SQUIGGLE_INDICATOR).is_empty());
    }

    #[test]
    fn test_show_error_inverted_range_paints_nothing() {
        let mut m = manager("abcdef");
        m.show_error(0, "oops", Some((4, 2)));
        assert!(m.widget().decorations().indicator_ranges(SQUIGGLE_INDICATOR).is_empty());
    }

    #[test]
    fn test_show_error_range_wraps_to_next_line() {
        let mut m = manager("ab\ncdef");
        m.show_error(0, "runs over", Some((1, 5)));
        // b \n c d
        assert_eq!(m.widget().decorations().indicator_ranges(SQUIGGLE_INDICATOR), &[1..5]);
    }

    #[test]
    fn test_style_resolved_at_call_time() {
        let mut m = manager("a\nb");
        m.dark_theme();
        m.show_error(0, "dark", None);
        assert_eq!(m.widget().decorations().annotation(0).unwrap().style, style_for(Theme::Dark));
    }

    #[test]
    fn test_clear_errors_keeps_search_boxes() {
        let mut m = manager("cat sat cat\nmore");
        m.find_all("cat");
        m.show_error(0, "one", Some((0, 2)));
        m.show_error(1, "two", None);
        m.clear_errors();
        let d = m.widget().decorations();
        assert_eq!(d.annotation_count(), 0);
        assert!(d.marker_lines(ERROR_MARKER).is_empty());
        assert!(d.indicator_ranges(SQUIGGLE_INDICATOR).is_empty());
        assert_eq!(d.indicator_ranges(SEARCH_INDICATOR), &[0..3, 8..11]);
    }

    #[test]
    fn test_clear_errors_idempotent() {
        let mut m = manager("abc");
        m.clear_errors();
        m.clear_errors();
        assert!(m.widget().decorations().is_empty());
    }

    #[test]
    fn test_clear_everything() {
        let mut m = manager("cat sat cat");
        m.find_all("cat");
        m.show_error(0, "bad", Some((4, 7)));
        m.clear_everything();
        assert!(m.widget().decorations().is_empty());
    }

    #[test]
    fn test_find_all_replaces_previous_hits() {
        let mut m = manager("cat sat cat");
        assert_eq!(m.find_all("cat"), 2);
        assert_eq!(m.find_all("sat"), 1);
        assert_eq!(m.widget().decorations().indicator_ranges(SEARCH_INDICATOR), &[4..7]);
    }

    #[test]
    fn test_find_all_empty_needle_clears_hits() {
        let mut m = manager("cat sat cat");
        m.find_all("cat");
        assert_eq!(m.find_all(""), 0);
        assert!(m.widget().decorations().indicator_ranges(SEARCH_INDICATOR).is_empty());
    }

    #[test]
    fn test_find_all_adjacent_hits_share_a_box() {
        let mut m = manager("abab ab");
        assert_eq!(m.find_all("ab"), 3);
        assert_eq!(m.widget().decorations().indicator_ranges(SEARCH_INDICATOR), &[0..4, 5..7]);
    }

    #[test]
    fn test_find_all_many_hits() {
        let n = 80_000;
        let mut m = manager(&"x ".repeat(n));
        assert_eq!(m.find_all("x"), n);
        let d = m.widget().decorations();
        let boxes = d.indicator_ranges(SEARCH_INDICATOR);
        assert_eq!(boxes.len(), n);
        assert_eq!(boxes.last(), Some(&(2 * n - 2..2 * n - 1)));
    }

    #[test]
    fn test_find_all_leaves_errors() {
        let mut m = manager("cat sat cat");
        m.show_error(0, "bad", Some((0, 1)));
        m.find_all("sat");
        let d = m.widget().decorations();
        assert_eq!(d.indicator_ranges(SQUIGGLE_INDICATOR), &[0..1]);
        assert_eq!(d.marker_lines(ERROR_MARKER), vec![0]);
    }

    #[test]
    fn test_find_and_replace() {
        let mut m = manager("put a\nput b");
        assert!(m.find("put", FindOptions::default()));
        assert!(m.replace("print"));
        assert_eq!(m.widget().text(), "print a\nput b");
        assert!(m.find_next());
        assert_eq!(m.widget().selection(), Some(8..11));
    }

    #[test]
    fn test_replace_all_literal() {
        let mut m = manager("banana");
        assert_eq!(m.replace_all("a", "b", false, false).unwrap(), 3);
        assert_eq!(m.widget().text(), "bbnbnb");
    }

    #[test]
    fn test_replace_all_without_match_keeps_document_clean() {
        let mut m = manager("banana");
        assert_eq!(m.replace_all("z", "b", false, false).unwrap(), 0);
        assert!(!m.widget().is_modified());
    }

    #[test]
    fn test_replace_all_invalid_regex_is_error() {
        let mut m = manager("banana");
        assert!(m.replace_all("(", "b", true, false).is_err());
        assert_eq!(m.widget().text(), "banana");
    }

    #[test]
    fn test_theme_switch_clears_errors_only() {
        let mut m = manager("cat sat cat");
        m.find_all("cat");
        m.show_error(0, "bad", Some((4, 7)));
        m.dark_theme();
        let d = m.widget().decorations();
        assert_eq!(d.annotation_count(), 0);
        assert!(d.marker_lines(ERROR_MARKER).is_empty());
        assert_eq!(d.indicator_ranges(SEARCH_INDICATOR).len(), 2);
        assert_eq!(m.theme(), Theme::Dark);
        assert_eq!(m.widget().caret_color(), Some(Theme::Dark.caret_color()));
    }

    #[test]
    fn test_light_theme_restores_platform_selection() {
        let mut m = manager("x");
        m.dark_theme();
        m.light_theme();
        assert_eq!(m.widget().selection_color(), None);
        assert_eq!(m.widget().caret_color(), Some(Rgb::new(0, 0, 0)));
    }

    #[test]
    fn test_dispatch_routes_requests() {
        let mut m = manager("cat sat cat");
        m.dispatch(FindRequest::FindAll("cat".into())).unwrap();
        assert_eq!(m.widget().decorations().indicator_ranges(SEARCH_INDICATOR).len(), 2);

        m.dispatch(FindRequest::Find {
            text: "sat".into(),
            options: FindOptions::default(),
        })
        .unwrap();
        assert_eq!(m.widget().selection(), Some(4..7));

        m.dispatch(FindRequest::Replace("mat".into())).unwrap();
        assert_eq!(m.widget().text(), "cat mat cat");

        m.dispatch(FindRequest::ReplaceAll {
            find: "c(a)t".into(),
            replacement: r"b\1t".into(),
            regex: true,
            greedy: false,
        })
        .unwrap();
        assert_eq!(m.widget().text(), "bat mat bat");
    }

    #[test]
    fn test_dispatch_surfaces_bad_pattern() {
        let mut m = manager("abc");
        let result = m.dispatch(FindRequest::ReplaceAll {
            find: "[".into(),
            replacement: String::new(),
            regex: true,
            greedy: true,
        });
        assert!(result.is_err());
    }
}
