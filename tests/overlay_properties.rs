use turing_editor::app::domain::{ErrorAnnotation, FindOptions, Theme, ERROR_MARKER, SEARCH_INDICATOR, SQUIGGLE_INDICATOR};
use turing_editor::app::{EditorWidget, MemoryEditor, OverlayManager};

const PROGRAM: &str = "var count : int := 0\n\
                       loop\n\
                       \x20   exit when count = 10\n\
                       \x20   count += 1\n\
                       \x20   put count\n\
                       end loop\n";

fn overlay(text: &str) -> OverlayManager<MemoryEditor> {
    OverlayManager::new(MemoryEditor::with_text(text), Theme::Light)
}

fn error_batches() -> Vec<Vec<ErrorAnnotation>> {
    vec![
        vec![],
        vec![ErrorAnnotation::new(0, "Syntax error")],
        vec![
            ErrorAnnotation::new(2, "'count' has not been declared").with_underline(14, 19),
            ErrorAnnotation::new(2, "replaced on the same line").with_underline(4, 8),
            ErrorAnnotation::new(4, "Put of an int").with_underline(4, 7),
        ],
        vec![
            // Runs off the end of the line and wraps into the next one
            ErrorAnnotation::new(1, "Missing 'end loop'").with_underline(0, 40),
            // Past the last line
            ErrorAnnotation::new(99, "Unexpected end of file").with_underline(0, 3),
            // Empty range
            ErrorAnnotation::new(3, "empty").with_underline(5, 5),
        ],
    ]
}

#[test]
fn clear_errors_removes_errors_and_keeps_search_boxes() {
    for batch in error_batches() {
        let mut m = overlay(PROGRAM);
        m.find_all("count");
        let boxes_before = m.widget().decorations().indicator_ranges(SEARCH_INDICATOR).to_vec();
        assert_eq!(boxes_before.len(), 4);

        for error in &batch {
            m.report(error);
        }
        m.clear_errors();

        let d = m.widget().decorations();
        assert_eq!(d.annotation_count(), 0);
        assert!(d.marked_lines().is_empty());
        assert!(d.indicator_ranges(SQUIGGLE_INDICATOR).is_empty());
        assert_eq!(d.indicator_ranges(SEARCH_INDICATOR), boxes_before.as_slice());
    }
}

#[test]
fn clear_everything_empties_every_channel() {
    for batch in error_batches() {
        let mut m = overlay(PROGRAM);
        m.find_all("loop");
        for error in &batch {
            m.report(error);
        }
        m.clear_everything();
        assert!(m.widget().decorations().is_empty());
    }
}

#[test]
fn find_all_empty_needle_highlights_nothing() {
    let mut m = overlay("cat sat cat");
    assert_eq!(m.find_all(""), 0);
    assert!(m.widget().decorations().indicator_ranges(SEARCH_INDICATOR).is_empty());
}

#[test]
fn find_all_boxes_each_occurrence() {
    let mut m = overlay("cat sat cat");
    assert_eq!(m.find_all("cat"), 2);
    assert_eq!(m.widget().decorations().indicator_ranges(SEARCH_INDICATOR), &[0..3, 8..11]);
}

#[test]
fn replace_all_literal() {
    let mut m = overlay("banana");
    assert_eq!(m.replace_all("a", "b", false, false).unwrap(), 3);
    assert_eq!(m.widget().text(), "bbnbnb");
}

#[test]
fn replace_all_regex_single_run() {
    let mut greedy = overlay("aaa");
    greedy.replace_all("a+", "X", true, true).unwrap();
    assert_eq!(greedy.widget().text(), "X");

    // Minimal matching: each match is a single 'a'
    let mut minimal = overlay("aaa");
    assert_eq!(minimal.replace_all("a+", "X", true, false).unwrap(), 3);
    assert_eq!(minimal.widget().text(), "XXX");
}

#[test]
fn replace_all_regex_greedy_vs_minimal() {
    let mut greedy = overlay("aaa bbb aaa");
    assert_eq!(greedy.replace_all("a.*a", "X", true, true).unwrap(), 1);
    assert_eq!(greedy.widget().text(), "X");

    let mut minimal = overlay("aaa bbb aaa");
    let count = minimal.replace_all("a.*a", "X", true, false).unwrap();
    assert!(count > 1);
    assert_eq!(minimal.widget().text(), "XXX");
}

#[test]
fn theme_switch_leaves_no_error_decorations() {
    for theme in [Theme::Dark, Theme::Light, Theme::Dark] {
        for batch in error_batches() {
            let mut m = overlay(PROGRAM);
            for error in &batch {
                m.report(error);
            }
            m.set_theme(theme);
            let d = m.widget().decorations();
            assert_eq!(d.annotation_count(), 0);
            assert!(d.marker_lines(ERROR_MARKER).is_empty());
        }
    }
}

#[test]
fn cleared_range_does_not_come_back() {
    let mut m = overlay(PROGRAM);
    m.show_error(2, "first", Some((2, 5)));
    m.clear_errors();
    m.show_error(2, "second", None);
    let d = m.widget().decorations();
    assert!(d.indicator_ranges(SQUIGGLE_INDICATOR).is_empty());
    assert_eq!(d.annotation(2).unwrap().text, "^ second");
}

#[test]
fn error_decorations_follow_edits() {
    let mut m = overlay(PROGRAM);
    m.show_error(4, "Put of an int", Some((4, 7)));
    let before = m.widget().decorations().indicator_ranges(SQUIGGLE_INDICATOR).to_vec();

    // Insert a line above the error
    m.widget_mut().edit(0..0, "% counter\n");

    let d = m.widget().decorations();
    assert_eq!(d.marker_lines(ERROR_MARKER), vec![5]);
    assert!(d.annotation(5).is_some());
    let shifted: Vec<_> = before.iter().map(|r| r.start + 10..r.end + 10).collect();
    assert_eq!(d.indicator_ranges(SQUIGGLE_INDICATOR), shifted.as_slice());
}

#[test]
fn find_then_replace_walks_the_document() {
    let mut m = overlay(PROGRAM);
    let options = FindOptions { case_sensitive: true, whole_word: true, ..Default::default() };
    assert!(m.find("count", options));
    let mut replaced = 0;
    while m.replace("total") {
        replaced += 1;
        if !m.find_next() {
            break;
        }
    }
    assert_eq!(replaced, 4);
    assert!(!m.widget().text().contains("count"));
}
