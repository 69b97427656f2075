use std::collections::BTreeMap;

use tracing::debug;

use crate::selection::SelectedCell;

#[cfg(test)]
mod test;

/// Rows of cell text reconstructed from a selection.
///
/// Rows may differ in length. Columns line up by position within each
/// row, so a selection of columns 0 and 3 yields two adjacent columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogicalGrid {
    rows: Vec<Vec<String>>,
}

impl LogicalGrid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row
    pub fn max_cols(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_rectangular(&self) -> bool {
        let width = self.max_cols();
        self.rows.iter().all(|r| r.len() == width)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(|s| s.as_str())
    }

    /// Swap rows and columns, backfilling missing cells with "".
    ///
    /// The result always has `max_cols` rows of equal length.
    pub fn transpose(&self) -> LogicalGrid {
        let rows = (0..self.max_cols())
            .map(|c| {
                self.rows
                    .iter()
                    .map(|row| row.get(c).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();

        LogicalGrid { rows }
    }
}

/// Group selected cells into ordered rows.
///
/// Returns `None` for an empty selection so callers can stop before
/// serializing anything. When two cells share a coordinate the one that
/// appears later in `cells` wins.
pub fn reconstruct(cells: &[SelectedCell]) -> Option<LogicalGrid> {
    if cells.is_empty() {
        return None;
    }

    let mut buckets: BTreeMap<usize, BTreeMap<usize, &str>> = BTreeMap::new();
    for cell in cells {
        buckets
            .entry(cell.row_index)
            .or_default()
            .insert(cell.col_index, cell.text.as_str());
    }

    let rows: Vec<Vec<String>> = buckets
        .into_values()
        .map(|row| row.into_values().map(str::to_string).collect())
        .collect();

    let grid = LogicalGrid { rows };
    debug!(
        cells = cells.len(),
        rows = grid.row_count(),
        cols = grid.max_cols(),
        "reconstructed selection grid"
    );

    Some(grid)
}
