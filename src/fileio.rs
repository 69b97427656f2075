use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::table::Table;

/// Detected file format
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileFormat {
    Csv,
    Tsv,
}

impl FileFormat {
    /// Detect format from file extension
    fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" => Some(FileFormat::Csv),
            "tsv" | "tab" => Some(FileFormat::Tsv),
            _ => None,
        }
    }

    fn delimiter(&self) -> u8 {
        match self {
            FileFormat::Csv => b',',
            FileFormat::Tsv => b'\t',
        }
    }
}

/// Result of loading a file, including any warnings
pub struct LoadResult {
    pub table: Table,
    pub warnings: Vec<String>,
}

/// Reads the table a selection is taken from.
pub struct FileIO {
    pub file_path: PathBuf,
    format: FileFormat,
}

impl FileIO {
    /// Unknown extensions are read as CSV.
    pub fn new(file_path: PathBuf) -> Self {
        let format = FileFormat::from_extension(&file_path).unwrap_or(FileFormat::Csv);
        Self { file_path, format }
    }

    /// Load the table. Short rows are kept as they are.
    pub fn load_table(&self) -> Result<LoadResult> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::with_capacity(1 << 20, file); // 1 MB

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.format.delimiter())
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::Fields)
            .from_reader(reader);

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            rows.push(record.iter().map(|s| s.to_string()).collect::<Vec<String>>());
        }

        let table = Table::new(rows);
        let mut warnings = Vec::new();
        if table.is_irregular() {
            warnings.push(format!(
                "Rows have unequal lengths (max width: {} columns)",
                table.col_count()
            ));
        }

        info!(
            path = %self.file_path.display(),
            rows = table.row_count(),
            cols = table.col_count(),
            "table loaded"
        );

        Ok(LoadResult { table, warnings })
    }
}
