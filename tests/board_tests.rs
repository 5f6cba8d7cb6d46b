//! Board tests - locking, clearing and compaction

use blockfall::core::Board;
use blockfall::types::PieceKind;

#[test]
fn test_board_new_empty() {
    let board = Board::new(8, 4);
    assert_eq!(board.width(), 8);
    assert_eq!(board.height(), 4);

    for y in 0..4 {
        for x in 0..8 {
            assert_eq!(board.get(x, y), Some(None), "({}, {})", x, y);
        }
    }
    assert_eq!(board.occupied_count(), 0);
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new(10, 20);
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(10, 0), None);
    assert_eq!(board.get(0, 20), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new(10, 20);
    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));
    assert!(board.is_occupied(5, 10));
    assert!(!board.set(10, 10, Some(PieceKind::T)));
}

#[test]
fn test_single_full_row_is_removed_and_rows_shift() {
    let mut board = Board::from_pattern(&[
        "........",
        "..t.....",
        "##.#....",
        "zzzzzzzz",
    ]);
    let before = board.occupied_count();

    assert_eq!(board.clear_full_rows(), 1);
    assert_eq!(board.occupied_count(), before - 8);
    assert!(board.is_row_empty(0));
    assert!(board.is_row_empty(1));
    assert_eq!(board.get(2, 2), Some(Some(PieceKind::T)));
    assert_eq!(board.get(0, 3), Some(Some(PieceKind::I)));
    assert_eq!(board.get(2, 3), Some(None));
}

#[test]
fn test_non_adjacent_full_rows_keep_order() {
    let mut board = Board::from_pattern(&[
        "....",
        "jjjj",
        "o...",
        "llll",
        ".s..",
    ]);

    assert_eq!(board.clear_full_rows(), 2);
    assert!(board.is_row_empty(0));
    assert!(board.is_row_empty(1));
    assert!(board.is_row_empty(2));
    assert_eq!(board.get(0, 3), Some(Some(PieceKind::O)));
    assert_eq!(board.get(1, 4), Some(Some(PieceKind::S)));
    assert_eq!(board.occupied_count(), 2);
}

#[test]
fn test_lock_and_clear_counts_only_this_lock() {
    let mut board = Board::from_pattern(&["......", "###.##", "###.##"]);
    let cleared = board.lock_and_clear([(3, 0), (3, 1), (3, 2)], PieceKind::I);
    assert_eq!(cleared, 2);
    assert_eq!(board.get(3, 2), Some(Some(PieceKind::I)));
    assert_eq!(board.occupied_count(), 1);
}

#[test]
fn test_clear_four_rows() {
    let mut board = Board::new(10, 20);
    for y in 16..20 {
        for x in 0..10 {
            board.set(x, y, Some(PieceKind::I));
        }
    }
    assert_eq!(board.clear_full_rows(), 4);
    assert_eq!(board.occupied_count(), 0);
}
