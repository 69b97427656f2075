use std::cmp;

/// Read-only view of a table the user can select cells from.
///
/// Rows may have different lengths; `col` is the physical position of a cell
/// within its row, not a colspan-adjusted position.
pub trait TableSource {
    fn row_count(&self) -> usize;
    fn cell_count(&self, row: usize) -> usize;
    fn cell_text(&self, row: usize, col: usize) -> Option<&str>;
}

/// A single selected cell with its normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedCell {
    pub text: String,
    pub row_index: usize,
    pub col_index: usize,
}

impl SelectedCell {
    pub fn new(text: &str, row_index: usize, col_index: usize) -> Self {
        Self {
            text: normalize_text(text),
            row_index,
            col_index,
        }
    }
}

/// Collapse whitespace runs to a single space and trim the ends.
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Every existing cell in the rectangle spanned by `start` and `end`, row-major.
///
/// Positions past the end of a short row are skipped.
pub fn cells_in_rectangle<T: TableSource + ?Sized>(
    table: &T,
    start: CellPosition,
    end: CellPosition,
) -> Vec<SelectedCell> {
    let min_row = cmp::min(start.row, end.row);
    let max_row = cmp::max(start.row, end.row);
    let min_col = cmp::min(start.col, end.col);
    let max_col = cmp::max(start.col, end.col);

    let mut cells = Vec::new();
    for row in min_row..=max_row {
        if row >= table.row_count() {
            break;
        }
        for col in min_col..=max_col.min(table.cell_count(row).saturating_sub(1)) {
            if let Some(text) = table.cell_text(row, col) {
                cells.push(SelectedCell::new(text, row, col));
            }
        }
    }

    cells
}

/// Selection owned by the input layer.
///
/// Drag handling feeds `begin_drag`/`drag_to`/`end_drag`; the copy pipeline
/// only ever sees the plain cells returned by `cells`.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    cells: Vec<SelectedCell>,
    anchor: Option<CellPosition>,
    dragging: bool,
    selection_mode: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_drag<T: TableSource + ?Sized>(&mut self, table: &T, at: CellPosition) {
        if self.dragging {
            return;
        }
        self.clear();
        self.anchor = Some(at);
        self.dragging = true;
        self.selection_mode = true;
        self.cells = cells_in_rectangle(table, at, at);
    }

    /// Replace the selection with the rectangle from the anchor to `to`.
    pub fn drag_to<T: TableSource + ?Sized>(&mut self, table: &T, to: CellPosition) {
        if !self.dragging {
            return;
        }
        if let Some(anchor) = self.anchor {
            self.cells = cells_in_rectangle(table, anchor, to);
        }
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
        self.anchor = None;
    }

    /// Select a rectangle in one step, as a keyboard-driven selection would.
    pub fn select_rectangle<T: TableSource + ?Sized>(
        &mut self,
        table: &T,
        start: CellPosition,
        end: CellPosition,
    ) {
        self.clear();
        self.cells = cells_in_rectangle(table, start, end);
        self.selection_mode = !self.cells.is_empty();
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.selection_mode = false;
    }

    pub fn cells(&self) -> &[SelectedCell] {
        &self.cells
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn in_selection_mode(&self) -> bool {
        self.selection_mode
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
