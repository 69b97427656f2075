use crate::selection::TableSource;

/// In-memory table of cell text. Rows keep their own length.
#[derive(Debug, Clone, Default)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Option<&String> {
        self.rows.get(row)?.get(col)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row
    pub fn col_count(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    pub fn is_irregular(&self) -> bool {
        let widest = self.col_count();
        self.rows.iter().any(|r| r.len() != widest)
    }
}

impl TableSource for Table {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn cell_count(&self, row: usize) -> usize {
        self.rows.get(row).map(|r| r.len()).unwrap_or(0)
    }

    fn cell_text(&self, row: usize, col: usize) -> Option<&str> {
        self.get_cell(row, col).map(|s| s.as_str())
    }
}
