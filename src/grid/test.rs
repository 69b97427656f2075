use super::*;

fn cell(text: &str, row: usize, col: usize) -> SelectedCell {
    SelectedCell::new(text, row, col)
}

fn make_grid(data: Vec<Vec<&str>>) -> LogicalGrid {
    LogicalGrid::new(
        data.into_iter()
            .map(|row| row.into_iter().map(|s| s.to_string()).collect())
            .collect(),
    )
}

#[test]
fn reconstruct_empty_is_none() {
    assert!(reconstruct(&[]).is_none());
}

#[test]
fn reconstruct_orders_rows_and_columns() {
    let cells = vec![
        cell("a", 0, 0),
        cell("b", 0, 1),
        cell("c", 1, 0),
        cell("d", 1, 1),
    ];
    let grid = reconstruct(&cells).unwrap();
    assert_eq!(grid, make_grid(vec![vec!["a", "b"], vec!["c", "d"]]));
}

#[test]
fn reconstruct_ignores_input_order() {
    let cells = vec![
        cell("a", 2, 0),
        cell("b", 10, 1),
        cell("c", 10, 0),
        cell("d", 2, 1),
    ];
    let mut reversed = cells.clone();
    reversed.reverse();

    let grid = reconstruct(&cells).unwrap();
    assert_eq!(grid, reconstruct(&reversed).unwrap());

    // numeric order: row 2 before row 10
    assert_eq!(grid, make_grid(vec![vec!["a", "d"], vec!["c", "b"]]));
}

#[test]
fn reconstruct_compresses_column_gaps() {
    let cells = vec![
        cell("a", 0, 0),
        cell("b", 0, 3),
        cell("c", 1, 3),
    ];
    let grid = reconstruct(&cells).unwrap();

    // columns align by position within the row, not by column index
    assert_eq!(grid, make_grid(vec![vec!["a", "b"], vec!["c"]]));
    assert_eq!(grid.max_cols(), 2);
    assert!(!grid.is_rectangular());
}

#[test]
fn reconstruct_duplicate_last_wins() {
    let cells = vec![
        cell("first", 0, 0),
        cell("x", 0, 1),
        cell("second", 0, 0),
    ];
    let grid = reconstruct(&cells).unwrap();
    assert_eq!(grid, make_grid(vec![vec!["second", "x"]]));
}

#[test]
fn transpose_rectangular() {
    let grid = make_grid(vec![
        vec!["a", "b", "c"],
        vec!["d", "e", "f"],
    ]);
    let flipped = grid.transpose();

    assert_eq!(flipped, make_grid(vec![vec!["a", "d"], vec!["b", "e"], vec!["c", "f"]]));
    assert_eq!(flipped.transpose(), grid);
}

#[test]
fn transpose_irregular_backfills() {
    let grid = make_grid(vec![
        vec!["a", "b", "c"],
        vec!["d", "e"],
    ]);
    let flipped = grid.transpose();

    assert_eq!(flipped, make_grid(vec![vec!["a", "d"], vec!["b", "e"], vec!["c", ""]]));
    assert!(flipped.is_rectangular());

    // the backfilled cell survives a second transpose
    let back = flipped.transpose();
    assert_ne!(back, grid);
    assert_eq!(back.get(1, 2), Some(""));
}

#[test]
fn transpose_empty() {
    let grid = LogicalGrid::default();
    assert!(grid.transpose().is_empty());
}
