//! `EditorWidget` over an FLTK `TextEditor`.
//!
//! Decorations are kept in a [`Decorations`] model and rendered two ways:
//! markers and indicators through a style buffer (one style char per byte,
//! `'A' + mask`), annotations in a strip under the editor.

use std::cell::{Cell, RefCell};
use std::ops::Range;
use std::rc::Rc;

use fltk::{
    app::Sender,
    enums::{Align, Color, Event, Font, FrameType, Key},
    frame::Frame,
    group::Flex,
    menu::MenuButton,
    prelude::*,
    text::{StyleTableEntryExt, TextAttr, TextBuffer, TextEditor},
};

use super::buffer::buffer_text;
use super::theme::{to_color, Palette};
use crate::app::decorations::{Decorations, TextEdit, MASK_MARKER, MASK_SEARCH, MASK_SQUIGGLE};
use crate::app::domain::{AnnotationStyle, FindOptions, IndicatorId, MarkerId, Message, Rgb, Rgba, Theme};
use crate::app::services::completion::{completion_candidates, word_prefix_range};
use crate::app::services::search::SearchCursor;
use crate::app::services::text_ops::leading_indent;
use crate::app::widget::EditorWidget;

pub const TAB_WIDTH: i32 = 4;
const FONT_SIZE: i32 = 14;
const STRIP_LINE_HEIGHT: i32 = 18;

pub struct FltkEditor {
    editor: TextEditor,
    buffer: TextBuffer,
    style_buffer: TextBuffer,
    strip: Frame,
    flex: Flex,
    decorations: Rc<RefCell<Decorations>>,
    modified: Rc<Cell<bool>>,
    /// Off while the whole text is swapped, so the edit is not replayed
    /// against the decorations.
    tracking: Rc<Cell<bool>>,
    search: Option<SearchCursor>,
    palette: Palette,
}

impl FltkEditor {
    /// Attach to `editor`, with `strip` as the annotation area inside `flex`.
    pub fn new(mut editor: TextEditor, mut strip: Frame, flex: Flex, sender: Sender<Message>) -> Self {
        let mut buffer = TextBuffer::default();
        buffer.set_tab_distance(TAB_WIDTH);
        let style_buffer = TextBuffer::default();
        editor.set_buffer(buffer.clone());
        editor.set_text_font(Font::Courier);
        editor.set_text_size(FONT_SIZE);

        strip.set_frame(FrameType::FlatBox);
        strip.set_align(Align::Left | Align::Inside | Align::Top);
        strip.set_label_font(Font::Courier);
        strip.set_label_size(FONT_SIZE - 2);

        let decorations = Rc::new(RefCell::new(Decorations::new()));
        let modified = Rc::new(Cell::new(false));
        let tracking = Rc::new(Cell::new(true));

        {
            let decorations = decorations.clone();
            let modified = modified.clone();
            let tracking = tracking.clone();
            let mut style_buf = style_buffer.clone();
            let buf = buffer.clone();
            buffer.add_modify_callback(move |pos, inserted, deleted, _restyled, deleted_text| {
                // Selection updates arrive as modifications with no text change
                if inserted == 0 && deleted == 0 {
                    sender.send(Message::SelectionChanged);
                    return;
                }
                // Keep the style buffer byte-aligned with the text.
                if deleted > 0 {
                    style_buf.remove(pos, pos + deleted);
                }
                if inserted > 0 {
                    let filler: String = std::iter::repeat('A').take(inserted as usize).collect();
                    style_buf.insert(pos, &filler);
                }
                if tracking.get() {
                    let line = buf.count_lines(0, pos) as usize;
                    let inserted_text = buf.text_range(pos, pos + inserted).unwrap_or_default();
                    let edit = TextEdit::new(pos as usize, line, deleted_text, &inserted_text);
                    decorations.borrow_mut().apply_edit(&edit);
                }
                modified.set(true);
                sender.send(Message::BufferModified);
            });
        }

        // Auto-indent: a new line starts with the indent of the previous one.
        // Typing a word char offers completions once the word is long enough.
        {
            let mut buf = buffer.clone();
            editor.handle(move |ed, event| match event {
                Event::KeyDown if fltk::app::event_key() == Key::Enter => {
                    let pos = ed.insert_position();
                    let text = buffer_text(&buf);
                    let indent = leading_indent(&text, pos as usize).to_string();
                    ed.insert(&format!("\n{indent}"));
                    ed.show_insert_position();
                    true
                }
                Event::KeyUp if typed_word_char() => {
                    show_completions(ed, &mut buf);
                    false
                }
                _ => false,
            });
        }

        let palette = Palette::for_theme(Theme::default());
        let mut widget = Self {
            editor,
            buffer,
            style_buffer,
            strip,
            flex,
            decorations,
            modified,
            tracking,
            search: None,
            palette,
        };
        widget.install_style_table();
        widget.refresh();
        widget
    }

    pub fn editor_mut(&mut self) -> &mut TextEditor {
        &mut self.editor
    }

    pub fn cut(&mut self) {
        self.editor.cut();
    }

    pub fn copy(&self) {
        self.editor.copy();
    }

    pub fn paste(&mut self) {
        self.editor.paste();
    }

    /// Recolour decoration backgrounds for `theme`.
    pub fn set_palette(&mut self, theme: Theme) {
        self.palette = Palette::for_theme(theme);
        self.strip.set_color(to_color(self.palette.paper));
        self.install_style_table();
        self.refresh();
    }

    fn install_style_table(&mut self) {
        let entries: Vec<StyleTableEntryExt> = (0u8..8).map(|mask| self.style_entry(mask)).collect();
        self.editor.set_highlight_data_ext(self.style_buffer.clone(), entries);
    }

    fn style_entry(&self, mask: u8) -> StyleTableEntryExt {
        let mut attr = TextAttr::None;
        let mut bgcolor = to_color(self.palette.paper);
        if mask & MASK_MARKER != 0 {
            attr = TextAttr::BgColorExt;
            bgcolor = to_color(self.palette.error_line);
        }
        if mask & MASK_SEARCH != 0 {
            attr = TextAttr::BgColor;
            bgcolor = to_color(self.palette.search_box);
        }
        if mask & MASK_SQUIGGLE != 0 {
            attr |= TextAttr::Spelling;
        }
        StyleTableEntryExt {
            color: to_color(self.palette.ink),
            font: Font::Courier,
            size: FONT_SIZE,
            attr,
            bgcolor,
        }
    }

    /// Redraw the style buffer and the annotation strip from the model.
    fn refresh(&mut self) {
        let text = buffer_text(&self.buffer);
        let styles: String = self
            .decorations
            .borrow()
            .style_mask(&text)
            .into_iter()
            .map(|mask| (b'A' + mask) as char)
            .collect();
        self.style_buffer.set_text(&styles);
        self.refresh_strip();
        self.editor.redraw();
    }

    fn refresh_strip(&mut self) {
        let decorations = self.decorations.borrow();
        let lines: Vec<String> = decorations
            .annotations()
            .map(|(line, annotation)| format!("  {}: {}", line + 1, annotation.text))
            .collect();
        // Annotations all share the style of the theme they were added under.
        if let Some((_, first)) = decorations.annotations().next() {
            self.strip.set_color(to_color(first.style.background));
            self.strip.set_label_color(to_color(first.style.foreground));
        }
        drop(decorations);

        let height = lines.len() as i32 * STRIP_LINE_HEIGHT;
        self.strip.set_label(&lines.join("\n"));
        if lines.is_empty() {
            self.strip.hide();
        } else {
            self.strip.show();
        }
        self.flex.fixed(&self.strip, height);
        self.flex.layout();
        self.strip.redraw();
    }
}

impl EditorWidget for FltkEditor {
    fn text(&self) -> String {
        buffer_text(&self.buffer)
    }

    fn set_text(&mut self, text: &str) {
        self.tracking.set(false);
        self.buffer.set_text(text);
        self.tracking.set(true);
        let lines = self.buffer.count_lines(0, self.buffer.length()) as usize + 1;
        self.decorations.borrow_mut().reset_for_text(lines);
        self.modified.set(true);
        self.refresh();
    }

    fn len(&self) -> usize {
        self.buffer.length() as usize
    }

    fn is_modified(&self) -> bool {
        self.modified.get()
    }

    fn set_modified(&mut self, modified: bool) {
        self.modified.set(modified);
    }

    fn annotate(&mut self, line: usize, text: &str, style: AnnotationStyle) {
        self.decorations.borrow_mut().annotate(line, text, style);
        self.refresh_strip();
    }

    fn clear_annotations(&mut self) {
        self.decorations.borrow_mut().clear_annotations();
        self.refresh_strip();
    }

    fn marker_add(&mut self, line: usize, marker: MarkerId) {
        self.decorations.borrow_mut().marker_add(line, marker);
        self.refresh();
    }

    fn marker_delete_all(&mut self, marker: Option<MarkerId>) {
        self.decorations.borrow_mut().marker_delete_all(marker);
        self.refresh();
    }

    fn fill_indicator_range(&mut self, range: Range<usize>, indicator: IndicatorId) {
        self.decorations.borrow_mut().fill_indicator(range, indicator);
        self.refresh();
    }

    fn fill_indicator_ranges(&mut self, ranges: Vec<Range<usize>>, indicator: IndicatorId) {
        self.decorations.borrow_mut().fill_indicator_ranges(ranges, indicator);
        self.refresh();
    }

    fn clear_indicator_range(&mut self, range: Range<usize>, indicator: Option<IndicatorId>) {
        self.decorations.borrow_mut().clear_indicator(range, indicator);
        self.refresh();
    }

    fn decorations(&self) -> Decorations {
        self.decorations.borrow().clone()
    }

    fn selection(&self) -> Option<Range<usize>> {
        self.buffer
            .selection_position()
            .filter(|(start, end)| start < end)
            .map(|(start, end)| start as usize..end as usize)
    }

    fn replace_selection(&mut self, text: &str) -> bool {
        let Some(range) = self.selection() else {
            return false;
        };
        self.buffer.replace_selection(text);
        let end = range.start + text.len();
        self.editor.set_insert_position(end as i32);
        if let Some(search) = self.search.as_mut() {
            search.resume_at(end);
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
        let text = self.text();
        let found = self.search.as_mut().and_then(|s| s.first(&text));
        self.select_found(found)
    }

    fn find_next(&mut self) -> bool {
        let text = self.text();
        let found = self.search.as_mut().and_then(|s| s.next(&text));
        if found.is_none() {
            return false;
        }
        self.select_found(found)
    }

    fn set_caret_color(&mut self, color: Rgb) {
        self.editor.set_cursor_color(to_color(color));
        self.editor.redraw();
    }

    fn set_selection_color(&mut self, color: Option<Rgba>) {
        let color = match color {
            Some(rgba) => to_color(rgba.over(self.palette.paper)),
            None => Color::Selection,
        };
        self.editor.set_selection_color(color);
        self.editor.redraw();
    }
}

impl FltkEditor {
    fn select_found(&mut self, found: Option<Range<usize>>) -> bool {
        match found {
            Some(range) => {
                self.buffer.select(range.start as i32, range.end as i32);
                self.editor.set_insert_position(range.end as i32);
                self.editor.show_insert_position();
                true
            }
            None => {
                self.buffer.unselect();
                false
            }
        }
    }
}

fn typed_word_char() -> bool {
    if fltk::app::is_event_ctrl() || fltk::app::is_event_alt() {
        return false;
    }
    fltk::app::event_key()
        .to_char()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
}

/// Pop up the document words completing the word at the caret and insert
/// the one picked.
fn show_completions(ed: &mut TextEditor, buf: &mut TextBuffer) {
    let text = buffer_text(buf);
    let pos = ed.insert_position() as usize;
    let candidates = completion_candidates(&text, pos);
    if candidates.is_empty() {
        return;
    }

    let (x, y) = ed.position_to_xy(pos as i32);
    let mut menu = MenuButton::new(x, y + FONT_SIZE, 1, 1, None);
    for word in &candidates {
        menu.add_choice(word);
    }
    let picked = menu.popup().and_then(|item| item.label());
    MenuButton::delete(menu);

    if let Some(word) = picked {
        let prefix = word_prefix_range(&text, pos);
        buf.replace(prefix.start as i32, prefix.end as i32, &word);
        ed.set_insert_position((prefix.start + word.len()) as i32);
        ed.show_insert_position();
    }
}
