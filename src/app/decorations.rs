//! Bookkeeping for everything drawn over the document without being part of
//! it: inline annotations, margin markers and indicator ranges.
//!
//! Widgets own one `Decorations` value and render it however they can. Ranges
//! are byte positions into the document text; lines are 0-based.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

use crate::app::domain::{Annotation, AnnotationStyle, IndicatorId, MarkerId, SEARCH_INDICATOR, SQUIGGLE_INDICATOR};
use crate::app::services::text_ops::{line_end_from, line_start};

/// Style mask bits produced by [`Decorations::style_mask`].
pub const MASK_SQUIGGLE: u8 = 0b001;
pub const MASK_SEARCH: u8 = 0b010;
pub const MASK_MARKER: u8 = 0b100;

/// One edit of the document text, as reported by a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEdit {
    /// Byte position of the edit.
    pub pos: usize,
    /// Line containing `pos` before the edit.
    pub line: usize,
    pub deleted_len: usize,
    pub deleted_lines: usize,
    pub inserted_len: usize,
    pub inserted_lines: usize,
}

impl TextEdit {
    pub fn new(pos: usize, line: usize, deleted: &str, inserted: &str) -> Self {
        Self {
            pos,
            line,
            deleted_len: deleted.len(),
            deleted_lines: deleted.matches('\n').count(),
            inserted_len: inserted.len(),
            inserted_lines: inserted.matches('\n').count(),
        }
    }

    fn map_line(&self, line: usize) -> usize {
        let collapsed = if line <= self.line {
            line
        } else if line <= self.line + self.deleted_lines {
            self.line
        } else {
            line - self.deleted_lines
        };
        if collapsed > self.line {
            collapsed + self.inserted_lines
        } else {
            collapsed
        }
    }

    fn is_collapsed(&self, line: usize) -> bool {
        line > self.line && line <= self.line + self.deleted_lines
    }

    fn map_range(&self, range: &Range<usize>) -> Range<usize> {
        let deleted_end = self.pos + self.deleted_len;
        let after_delete = |x: usize| {
            if x <= self.pos {
                x
            } else if x >= deleted_end {
                x - self.deleted_len
            } else {
                self.pos
            }
        };
        let start = after_delete(range.start);
        let end = after_delete(range.end);
        // Text typed at the start of a range stays outside it, text typed
        // strictly inside extends it.
        let start = if start >= self.pos { start + self.inserted_len } else { start };
        let end = if end > self.pos { end + self.inserted_len } else { end };
        start..end
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decorations {
    annotations: BTreeMap<usize, Annotation>,
    markers: BTreeMap<MarkerId, BTreeSet<usize>>,
    indicators: BTreeMap<IndicatorId, Vec<Range<usize>>>,
}

impl Decorations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
            && self.markers.values().all(BTreeSet::is_empty)
            && self.indicators.values().all(Vec::is_empty)
    }

    // --- Annotations ---

    /// Set the annotation of `line`, replacing any previous one.
    pub fn annotate(&mut self, line: usize, text: impl Into<String>, style: AnnotationStyle) {
        self.annotations.insert(line, Annotation { text: text.into(), style });
    }

    pub fn clear_annotations(&mut self) {
        self.annotations.clear();
    }

    pub fn annotation(&self, line: usize) -> Option<&Annotation> {
        self.annotations.get(&line)
    }

    pub fn annotations(&self) -> impl Iterator<Item = (usize, &Annotation)> {
        self.annotations.iter().map(|(line, a)| (*line, a))
    }

    pub fn annotation_count(&self) -> usize {
        self.annotations.len()
    }

    // --- Markers ---

    pub fn marker_add(&mut self, line: usize, marker: MarkerId) {
        self.markers.entry(marker).or_default().insert(line);
    }

    /// Remove `marker` from every line, or every marker when `None`.
    pub fn marker_delete_all(&mut self, marker: Option<MarkerId>) {
        match marker {
            Some(id) => {
                self.markers.remove(&id);
            }
            None => self.markers.clear(),
        }
    }

    pub fn marker_lines(&self, marker: MarkerId) -> Vec<usize> {
        self.markers
            .get(&marker)
            .map(|lines| lines.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Lines carrying at least one marker of any kind.
    pub fn marked_lines(&self) -> BTreeSet<usize> {
        self.markers.values().flatten().copied().collect()
    }

    // --- Indicators ---

    /// Paint `range` on `indicator`. Overlapping or touching ranges merge.
    pub fn fill_indicator(&mut self, range: Range<usize>, indicator: IndicatorId) {
        if range.is_empty() {
            return;
        }
        let ranges = self.indicators.entry(indicator).or_default();
        ranges.push(range);
        normalize(ranges);
    }

    /// Paint every range in `ranges` on `indicator`, merging once.
    pub fn fill_indicator_ranges(&mut self, ranges: Vec<Range<usize>>, indicator: IndicatorId) {
        let channel = self.indicators.entry(indicator).or_default();
        channel.extend(ranges.into_iter().filter(|r| !r.is_empty()));
        normalize(channel);
        if channel.is_empty() {
            self.indicators.remove(&indicator);
        }
    }

    /// Erase `range` from `indicator`, or from every channel when `None`.
    pub fn clear_indicator(&mut self, range: Range<usize>, indicator: Option<IndicatorId>) {
        match indicator {
            Some(id) => {
                if let Some(ranges) = self.indicators.get_mut(&id) {
                    subtract(ranges, &range);
                }
            }
            None => {
                for ranges in self.indicators.values_mut() {
                    subtract(ranges, &range);
                }
            }
        }
        self.indicators.retain(|_, ranges| !ranges.is_empty());
    }

    pub fn indicator_ranges(&self, indicator: IndicatorId) -> &[Range<usize>] {
        self.indicators.get(&indicator).map(Vec::as_slice).unwrap_or(&[])
    }

    // --- Document changes ---

    /// Move decorations along with an incremental edit.
    ///
    /// Indicator ranges shift and shrink with the text. Markers on deleted
    /// lines fold onto the line of the edit; annotations on deleted lines go.
    pub fn apply_edit(&mut self, edit: &TextEdit) {
        for ranges in self.indicators.values_mut() {
            for range in ranges.iter_mut() {
                *range = edit.map_range(range);
            }
            normalize(ranges);
        }
        self.indicators.retain(|_, ranges| !ranges.is_empty());

        if edit.deleted_lines == 0 && edit.inserted_lines == 0 {
            return;
        }
        for lines in self.markers.values_mut() {
            *lines = lines.iter().map(|line| edit.map_line(*line)).collect();
        }
        let annotations = std::mem::take(&mut self.annotations);
        self.annotations = annotations
            .into_iter()
            .filter(|(line, _)| !edit.is_collapsed(*line))
            .map(|(line, annotation)| (edit.map_line(line), annotation))
            .collect();
    }

    /// The whole text was replaced: indicator ranges no longer mean anything,
    /// line decorations survive where their line still exists.
    pub fn reset_for_text(&mut self, line_count: usize) {
        self.indicators.clear();
        for lines in self.markers.values_mut() {
            lines.retain(|line| *line < line_count);
        }
        self.annotations.retain(|line, _| *line < line_count);
    }

    /// Per-byte mask of the decorations covering `text`, for widgets that
    /// render decorations through a style buffer.
    pub fn style_mask(&self, text: &str) -> Vec<u8> {
        let mut mask = vec![0u8; text.len()];

        for line in self.marked_lines() {
            if let Some(start) = line_start(text, line) {
                let end = line_end_from(text, start);
                mask[start..end].iter_mut().for_each(|m| *m |= MASK_MARKER);
            }
        }
        for (indicator, bit) in [(SQUIGGLE_INDICATOR, MASK_SQUIGGLE), (SEARCH_INDICATOR, MASK_SEARCH)] {
            for range in self.indicator_ranges(indicator) {
                let end = range.end.min(text.len());
                let start = range.start.min(end);
                mask[start..end].iter_mut().for_each(|m| *m |= bit);
            }
        }
        mask
    }
}

fn normalize(ranges: &mut Vec<Range<usize>>) {
    ranges.retain(|r| !r.is_empty());
    ranges.sort_by_key(|r| r.start);
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges.drain(..) {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    *ranges = merged;
}

fn subtract(ranges: &mut Vec<Range<usize>>, cut: &Range<usize>) {
    let mut kept = Vec::with_capacity(ranges.len() + 1);
    for range in ranges.drain(..) {
        if range.end <= cut.start || range.start >= cut.end {
            kept.push(range);
            continue;
        }
        if range.start < cut.start {
            kept.push(range.start..cut.start);
        }
        if cut.end < range.end {
            kept.push(cut.end..range.end);
        }
    }
    *ranges = kept;
}
