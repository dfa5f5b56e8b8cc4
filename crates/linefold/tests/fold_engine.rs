use linefold::{
    Document, FoldAction, FoldEngine, FoldLevel, FoldStrategy, HiddenLines, LineBuffer,
};
use pretty_assertions::assert_eq;

fn numbered_text(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("line {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn document_with_levels(levels: &[FoldLevel]) -> Document {
    let mut doc = Document::new(&numbered_text(levels.len()));
    doc.set_fold_levels(levels.iter().copied());
    doc
}

/// `[0 H, 1 H, 2, 1 H, 0]`
fn nested_document() -> Document {
    document_with_levels(&[
        FoldLevel::header(0),
        FoldLevel::header(1),
        FoldLevel::new(2),
        FoldLevel::header(1),
        FoldLevel::new(0),
    ])
}

#[test]
fn test_fold_is_idempotent() {
    let mut doc = nested_document();
    let mut engine = FoldEngine::new(&mut doc, FoldStrategy::LevelNumber);

    assert!(engine.fold(2, FoldAction::Collapse, true));
    assert!(!engine.fold(2, FoldAction::Collapse, true));

    assert_eq!(doc.hidden_lines(), vec![2]);
    assert!(!doc.is_expanded(1));
    // Only the first call toggled anything.
    assert_eq!(doc.fold_changes(), &[(1, false)]);
}

#[test]
fn test_fold_without_enclosing_header_is_noop() {
    let mut doc = document_with_levels(&[FoldLevel::new(0), FoldLevel::new(0), FoldLevel::new(0)]);
    let mut engine = FoldEngine::new(&mut doc, FoldStrategy::LevelNumber);

    assert!(!engine.fold(1, FoldAction::Collapse, false));
    assert!(!engine.fold(99, FoldAction::Collapse, false));
    assert!(doc.hidden_lines().is_empty());
}

#[test]
fn test_fold_level_collapses_only_requested_level_indentation_based() {
    let mut doc = nested_document();
    FoldEngine::new(&mut doc, FoldStrategy::IndentationBased).fold_level(1, FoldAction::Collapse);

    assert_eq!(doc.hidden_lines(), vec![2]);
    assert!(doc.is_expanded(0));
    assert!(!doc.is_expanded(1));
}

#[test]
fn test_fold_level_collapses_only_requested_level_level_number() {
    let mut doc = nested_document();
    FoldEngine::new(&mut doc, FoldStrategy::LevelNumber).fold_level(1, FoldAction::Collapse);

    assert_eq!(doc.hidden_lines(), vec![2]);
    assert!(doc.is_expanded(0));
}

#[test]
fn test_fold_level_normalizes_sparse_indentation_levels() {
    // def a():
    //     if x:
    //         y
    //     if z:
    //         w
    // def b():
    //     pass
    let levels = [
        FoldLevel::header(0),
        FoldLevel::header(4),
        FoldLevel::new(8),
        FoldLevel::header(4),
        FoldLevel::new(8),
        FoldLevel::header(0),
        FoldLevel::new(4),
    ];

    let mut doc = document_with_levels(&levels);
    FoldEngine::new(&mut doc, FoldStrategy::IndentationBased).fold_level(1, FoldAction::Collapse);
    assert_eq!(doc.hidden_lines(), vec![2, 4]);
    assert!(doc.is_expanded(0));
    assert!(doc.is_expanded(5));

    // Raw level numbers never equal 1 here, so the level-number scan finds nothing.
    let mut doc = document_with_levels(&levels);
    FoldEngine::new(&mut doc, FoldStrategy::LevelNumber).fold_level(1, FoldAction::Collapse);
    assert!(doc.hidden_lines().is_empty());
}

#[test]
fn test_fold_level_expand_restores_marker_hidden_lines() {
    let mut doc = document_with_levels(&[
        FoldLevel::header(0),
        FoldLevel::new(1),
        FoldLevel::new(1),
        FoldLevel::new(1),
        FoldLevel::new(1),
        FoldLevel::new(1),
        FoldLevel::new(0),
    ]);
    doc.select_lines(2, 3);
    assert!(HiddenLines::new(&mut doc).hide_lines());
    assert_eq!(doc.hidden_lines(), vec![2, 3]);

    let mut engine = FoldEngine::new(&mut doc, FoldStrategy::LevelNumber);
    engine.fold_level(0, FoldAction::Collapse);
    assert_eq!(doc.hidden_lines(), vec![1, 2, 3, 4, 5]);

    FoldEngine::new(&mut doc, FoldStrategy::LevelNumber).fold_level(0, FoldAction::Expand);
    assert_eq!(doc.hidden_lines(), vec![2, 3]);
}

#[test]
fn test_fold_all_round_trip_keeps_hidden_regions() {
    let mut doc = document_with_levels(&[
        FoldLevel::header(0),
        FoldLevel::new(1),
        FoldLevel::new(1),
        FoldLevel::new(1),
        FoldLevel::new(1),
        FoldLevel::new(1),
        FoldLevel::new(1),
        FoldLevel::new(0),
    ]);
    doc.select_lines(3, 4);
    HiddenLines::new(&mut doc).hide_lines();

    let mut engine = FoldEngine::new(&mut doc, FoldStrategy::LevelNumber);
    engine.fold_all(FoldAction::Collapse);
    assert_eq!(doc.hidden_lines(), vec![1, 2, 3, 4, 5, 6]);
    assert!(!doc.is_expanded(0));

    FoldEngine::new(&mut doc, FoldStrategy::LevelNumber).fold_all(FoldAction::Expand);
    assert!(doc.is_expanded(0));
    assert_eq!(doc.hidden_lines(), vec![3, 4]);
    assert!(doc.last_scroll().is_some());
}

#[test]
fn test_unfold_keeps_marker_hidden_lines_hidden() {
    let mut doc = document_with_levels(&[
        FoldLevel::header(0),
        FoldLevel::new(1),
        FoldLevel::new(1),
        FoldLevel::new(1),
        FoldLevel::new(1),
        FoldLevel::new(1),
        FoldLevel::new(0),
    ]);
    doc.select_lines(2, 3);
    HiddenLines::new(&mut doc).hide_lines();

    let mut engine = FoldEngine::new(&mut doc, FoldStrategy::LevelNumber);
    engine.fold(0, FoldAction::Collapse, false);
    engine.fold(0, FoldAction::Expand, false);
    assert_eq!(doc.hidden_lines(), vec![2, 3]);

    let mut engine = FoldEngine::new(&mut doc, FoldStrategy::LevelNumber);
    engine.fold_all(FoldAction::Collapse);
    assert!(engine.expand_levels(0, 1));
    assert_eq!(doc.hidden_lines(), vec![2, 3]);
}

#[test]
fn test_unfold_inside_hidden_region_stays_hidden() {
    let mut doc = document_with_levels(&[
        FoldLevel::new(0),
        FoldLevel::header(0),
        FoldLevel::new(1),
        FoldLevel::new(1),
        FoldLevel::new(0),
        FoldLevel::new(0),
        FoldLevel::new(0),
    ]);
    doc.select_lines(1, 3);
    HiddenLines::new(&mut doc).hide_lines();
    assert_eq!(doc.hidden_lines(), vec![1, 2, 3]);

    let mut engine = FoldEngine::new(&mut doc, FoldStrategy::LevelNumber);
    assert!(engine.fold(1, FoldAction::Collapse, false));
    assert!(engine.fold(1, FoldAction::Expand, false));
    assert_eq!(doc.hidden_lines(), vec![1, 2, 3]);
}

#[test]
fn test_unfold_keeps_collapsed_child_collapsed() {
    let mut doc = nested_document();
    let mut engine = FoldEngine::new(&mut doc, FoldStrategy::LevelNumber);

    engine.fold(1, FoldAction::Collapse, false);
    engine.fold(0, FoldAction::Collapse, false);
    assert_eq!(doc.hidden_lines(), vec![1, 2, 3]);

    FoldEngine::new(&mut doc, FoldStrategy::LevelNumber).fold(0, FoldAction::Expand, false);
    assert_eq!(doc.hidden_lines(), vec![2]);
    assert!(doc.is_expanded(0));
    assert!(!doc.is_expanded(1));
}

#[test]
fn test_expand_levels_sets_flags_to_target_depth() {
    let mut doc = document_with_levels(&[
        FoldLevel::header(0),
        FoldLevel::header(1),
        FoldLevel::header(2),
        FoldLevel::new(3),
        FoldLevel::new(0),
    ]);
    let mut engine = FoldEngine::new(&mut doc, FoldStrategy::LevelNumber);
    engine.fold_all(FoldAction::Collapse);
    assert!(engine.expand_levels(0, 2));

    assert_eq!(doc.hidden_lines(), vec![3]);
    assert!(doc.is_expanded(0));
    assert!(doc.is_expanded(1));
    assert!(!doc.is_expanded(2));
}

#[test]
fn test_fold_current_pos_and_query() {
    let mut doc = nested_document();
    // Caret on line 2, inside the block headed by line 1.
    let caret = doc.line_start(2) + 2;
    doc.set_caret(caret);

    let mut engine = FoldEngine::new(&mut doc, FoldStrategy::LevelNumber);
    assert!(!engine.is_current_line_folded());
    assert!(engine.fold_current_pos(FoldAction::Collapse));
    assert!(engine.is_current_line_folded());
    assert!(engine.fold_current_pos(FoldAction::Expand));
    assert!(!engine.is_current_line_folded());
    assert!(doc.hidden_lines().is_empty());
}

#[test]
fn test_header_of() {
    let mut doc = nested_document();
    let engine = FoldEngine::new(&mut doc, FoldStrategy::LevelNumber);
    assert_eq!(engine.header_of(0), Some(0));
    assert_eq!(engine.header_of(2), Some(1));
    assert_eq!(engine.header_of(4), None);
    assert_eq!(engine.header_of(5), None);
}
