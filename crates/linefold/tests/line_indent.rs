use linefold::{Document, IndentSettings, LineBuffer, LineEditor, SelectionRange};
use pretty_assertions::assert_eq;

#[test]
fn test_indent_increase_shifts_selection() {
    // Line 1 starts at offset 5 with no indentation.
    let mut doc = Document::new("abcd\nxxxxxxxxxxxxxxxxxxxxxxxx");
    doc.set_selections(vec![SelectionRange::new(10, 20)]);
    assert_eq!(doc.line_indent_position(1), 5);

    LineEditor::new(&mut doc).set_line_indent(1, 3);

    assert_eq!(doc.line_indent_position(1), 8);
    assert_eq!(doc.selections(), vec![SelectionRange::new(13, 23)]);
    assert_eq!(doc.line_text(1), "   xxxxxxxxxxxxxxxxxxxxxxxx");
}

#[test]
fn test_indent_keeps_caret_at_selection_start() {
    let mut doc = Document::new("abcd\nxxxxxxxxxxxxxxxxxxxxxxxx");
    doc.select(20, 10);
    assert_eq!(doc.caret(), 10);

    LineEditor::new(&mut doc).set_line_indent(1, 3);

    assert_eq!(doc.selections(), vec![SelectionRange::new(13, 23)]);
    assert_eq!(doc.caret(), 13);
}

#[test]
fn test_indent_decrease_clamps_selection_inside_removed_whitespace() {
    let mut doc = Document::new("        code();\nnext");
    doc.set_selections(vec![SelectionRange::new(6, 10)]);
    assert_eq!(doc.line_indent_position(0), 8);

    LineEditor::new(&mut doc).set_line_indent(0, 4);

    assert_eq!(doc.line_indent_position(0), 4);
    assert_eq!(doc.selections(), vec![SelectionRange::new(4, 6)]);
    assert_eq!(doc.text(), "    code();\nnext");
}

#[test]
fn test_indent_before_selection_line_leaves_offsets() {
    let mut doc = Document::new("a\n  b");
    doc.set_selections(vec![SelectionRange::new(0, 1)]);

    LineEditor::new(&mut doc).set_line_indent(1, 6);

    assert_eq!(doc.text(), "a\n      b");
    assert_eq!(doc.selections(), vec![SelectionRange::new(0, 1)]);
}

#[test]
fn test_unchanged_indent_is_idempotent() {
    let mut doc = Document::new("    body");
    doc.set_selections(vec![SelectionRange::new(2, 6)]);

    let mut editor = LineEditor::new(&mut doc);
    editor.set_line_indent(0, 4);
    editor.set_line_indent(0, 4);

    assert_eq!(doc.text(), "    body");
    assert_eq!(doc.selections(), vec![SelectionRange::new(2, 6)]);
    assert_eq!(doc.undo_actions(), 0);
}

#[test]
fn test_indent_with_tabs() {
    let mut doc = Document::with_indent_settings(
        "x\ny",
        IndentSettings {
            tab_width: 4,
            use_tabs: true,
        },
    );
    doc.set_selections(vec![SelectionRange::new(2, 3)]);

    LineEditor::new(&mut doc).set_line_indent(1, 8);

    assert_eq!(doc.text(), "x\n\t\ty");
    assert_eq!(doc.selections(), vec![SelectionRange::new(4, 5)]);
}

#[test]
fn test_multi_selection_indent_is_one_undo_action() {
    let mut doc = Document::new("a\nb\nc");
    doc.set_selections(vec![SelectionRange::new(2, 3), SelectionRange::new(4, 5)]);

    LineEditor::new(&mut doc).set_line_indent(0, 2);

    assert_eq!(doc.text(), "a\n  b\n  c");
    // Each range still covers its letter.
    assert_eq!(
        doc.selections(),
        vec![SelectionRange::new(4, 5), SelectionRange::new(8, 9)]
    );
    assert_eq!(doc.undo_actions(), 1);
    assert_eq!(doc.undo_depth(), 0);
}

#[test]
fn test_multi_selection_outdent_clamps_each_range() {
    let mut doc = Document::new("    a\n    b");
    // Carets inside the leading whitespace of both lines.
    doc.set_selections(vec![SelectionRange::caret(1), SelectionRange::caret(8)]);

    LineEditor::new(&mut doc).set_line_indent(0, 0);

    assert_eq!(doc.text(), "a\nb");
    assert_eq!(
        doc.selections(),
        vec![SelectionRange::caret(0), SelectionRange::caret(2)]
    );
}

#[test]
fn test_lines_up_and_down() {
    let mut doc = Document::new("one\ntwo\nthree\nfour");
    doc.select_lines(1, 2);

    LineEditor::new(&mut doc).current_lines_up();
    assert_eq!(doc.text(), "two\nthree\none\nfour");
    assert_eq!(doc.selections(), vec![SelectionRange::new(0, 9)]);
    assert_eq!(doc.last_scroll(), None);

    let mut editor = LineEditor::new(&mut doc);
    editor.current_lines_down();
    editor.current_lines_down();
    assert_eq!(doc.text(), "one\nfour\ntwo\nthree");
    assert_eq!(doc.selections(), vec![SelectionRange::new(9, 18)]);
    assert_eq!(doc.last_scroll(), Some((18, 9)));
}

#[test]
fn test_lines_up_at_top_is_noop() {
    let mut doc = Document::new("one\ntwo");
    doc.set_caret(1);
    LineEditor::new(&mut doc).current_lines_up();
    assert_eq!(doc.text(), "one\ntwo");
    assert_eq!(doc.caret(), 1);
}
