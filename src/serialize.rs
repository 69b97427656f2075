use std::sync::LazyLock;

use regex::Regex;

use crate::grid::LogicalGrid;

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?$").unwrap());
static ISO_DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());
static US_DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Delimiter::Comma => "comma",
            Delimiter::Tab => "tab",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteChar {
    Double,
    Single,
}

impl QuoteChar {
    pub fn as_char(&self) -> char {
        match self {
            QuoteChar::Double => '"',
            QuoteChar::Single => '\'',
        }
    }
}

/// Output format for one copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatConfig {
    pub delimiter: Delimiter,
    pub quote_strings: bool,
    pub quote_char: QuoteChar,
    /// Double embedded quote characters inside quoted fields
    pub escape_quotes: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Tab,
            quote_strings: false,
            quote_char: QuoteChar::Double,
            escape_quotes: false,
        }
    }
}

/// Which way round the grid is copied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyMode {
    #[default]
    Normal,
    Transposed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Numeric,
    Date,
    Text,
}

impl ColumnType {
    pub fn classify(value: &str) -> ColumnType {
        let value = value.trim();
        if value.is_empty() {
            ColumnType::Text
        } else if NUMBER_RE.is_match(value) {
            ColumnType::Numeric
        } else if ISO_DATE_RE.is_match(value) || US_DATE_RE.is_match(value) {
            ColumnType::Date
        } else {
            ColumnType::Text
        }
    }
}

/// True when a value should be quoted: anything that is not a number or a date.
pub fn is_string_value(value: &str) -> bool {
    ColumnType::classify(value) == ColumnType::Text
}

/// Classify `width` columns from the first row. Columns the row does not
/// reach count as text.
fn column_types(first_row: &[String], width: usize) -> Vec<ColumnType> {
    (0..width)
        .map(|c| {
            first_row
                .get(c)
                .map(|v| ColumnType::classify(v))
                .unwrap_or(ColumnType::Text)
        })
        .collect()
}

fn quote(value: &str, config: &FormatConfig) -> String {
    let q = config.quote_char.as_char();
    let body = if config.escape_quotes {
        value.replace(q, &format!("{q}{q}"))
    } else {
        value.to_string()
    };
    format!("{q}{body}{q}")
}

/// Render a grid as delimited text.
///
/// Rows are joined by `\n` with no trailing newline. With quoting enabled,
/// column types come from the first emitted row only.
pub fn serialize(grid: &LogicalGrid, config: &FormatConfig, mode: CopyMode) -> String {
    let transposed;
    let grid = match mode {
        CopyMode::Normal => grid,
        CopyMode::Transposed => {
            transposed = grid.transpose();
            &transposed
        }
    };

    let Some(first_row) = grid.rows().first() else {
        return String::new();
    };

    let types = if config.quote_strings {
        Some(column_types(first_row, grid.max_cols()))
    } else {
        None
    };

    let delimiter = config.delimiter.as_char().to_string();

    grid.rows()
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(c, value)| match &types {
                    Some(types) if types[c] == ColumnType::Text => quote(value, config),
                    _ => value.clone(),
                })
                .collect::<Vec<_>>()
                .join(&delimiter)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_grid(data: Vec<Vec<&str>>) -> LogicalGrid {
        LogicalGrid::new(
            data.into_iter()
                .map(|row| row.into_iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    fn csv() -> FormatConfig {
        FormatConfig { delimiter: Delimiter::Comma, ..Default::default() }
    }

    fn quoted_csv() -> FormatConfig {
        FormatConfig { quote_strings: true, ..csv() }
    }

    #[test]
    fn test_is_string_value() {
        assert!(is_string_value(""));
        assert!(is_string_value("   "));
        assert!(!is_string_value("42"));
        assert!(!is_string_value("-3.14e10"));
        assert!(!is_string_value(" 7 "));
        assert!(!is_string_value("2024-01-05"));
        assert!(!is_string_value("1/5/2024"));
        assert!(!is_string_value("12/31/1999"));
        assert!(is_string_value("N/A"));
        assert!(is_string_value("42abc"));
        assert!(is_string_value("+5"));
        assert!(is_string_value(".5"));
        assert!(is_string_value("2024/01/05"));
        // only ASCII digits count as numbers or dates
        assert!(is_string_value("\u{664}\u{662}"));
        assert!(is_string_value("２０２４-０１-０５"));
        assert!(is_string_value("١/٥/٢٠٢٤"));
    }

    #[test]
    fn test_classify() {
        assert_eq!(ColumnType::classify("1e5"), ColumnType::Numeric);
        assert_eq!(ColumnType::classify("2024-01-05"), ColumnType::Date);
        assert_eq!(ColumnType::classify("Bob"), ColumnType::Text);
    }

    #[test]
    fn test_delimiters() {
        let grid = make_grid(vec![vec!["a", "1"], vec!["b", "2"]]);

        assert_eq!(serialize(&grid, &csv(), CopyMode::Normal), "a,1\nb,2");
        assert_eq!(serialize(&grid, &FormatConfig::default(), CopyMode::Normal), "a\t1\nb\t2");
    }

    #[test]
    fn test_quote_by_first_row() {
        let grid = make_grid(vec![vec!["Name", "42"], vec!["Bob", "7"]]);
        assert_eq!(serialize(&grid, &quoted_csv(), CopyMode::Normal), "\"Name\",42\n\"Bob\",7");
    }

    #[test]
    fn test_column_type_fixed_by_first_row() {
        // "x" in a numeric column stays bare; "5" in a text column is quoted
        let grid = make_grid(vec![vec!["1", "a"], vec!["x", "5"]]);
        assert_eq!(serialize(&grid, &quoted_csv(), CopyMode::Normal), "1,\"a\"\nx,\"5\"");
    }

    #[test]
    fn test_single_quote_char() {
        let grid = make_grid(vec![vec!["a", "2024-01-05"]]);
        let config = FormatConfig { quote_char: QuoteChar::Single, ..quoted_csv() };
        assert_eq!(serialize(&grid, &config, CopyMode::Normal), "'a',2024-01-05");
    }

    #[test]
    fn test_embedded_quotes() {
        let grid = make_grid(vec![vec!["say \"hi\""]]);

        assert_eq!(serialize(&grid, &quoted_csv(), CopyMode::Normal), "\"say \"hi\"\"");

        let config = FormatConfig { escape_quotes: true, ..quoted_csv() };
        assert_eq!(serialize(&grid, &config, CopyMode::Normal), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_columns_beyond_first_row_are_text() {
        let grid = make_grid(vec![vec!["1"], vec!["2", "3"]]);
        assert_eq!(serialize(&grid, &quoted_csv(), CopyMode::Normal), "1\n2,\"3\"");
    }

    #[test]
    fn test_transposed() {
        let grid = make_grid(vec![vec!["a", "b", "c"], vec!["d", "e"]]);
        assert_eq!(serialize(&grid, &csv(), CopyMode::Transposed), "a,d\nb,e\nc,");
    }

    #[test]
    fn test_transposed_classifies_after_flip() {
        let grid = make_grid(vec![vec!["Name", "Bob"], vec!["42", "7"]]);
        assert_eq!(
            serialize(&grid, &quoted_csv(), CopyMode::Transposed),
            "\"Name\",42\n\"Bob\",7"
        );
    }

    #[test]
    fn test_empty_backfill_quoted_in_text_column() {
        let grid = make_grid(vec![vec!["a", "b"], vec!["c"]]);
        assert_eq!(
            serialize(&grid, &quoted_csv(), CopyMode::Transposed),
            "\"a\",\"c\"\n\"b\",\"\""
        );
    }

    #[test]
    fn test_no_trailing_newline() {
        let grid = make_grid(vec![vec!["a"], vec!["b"]]);
        assert!(!serialize(&grid, &csv(), CopyMode::Normal).ends_with('\n'));
    }

    #[test]
    fn test_empty_grid() {
        let grid = LogicalGrid::default();
        assert_eq!(serialize(&grid, &quoted_csv(), CopyMode::Normal), "");
        assert_eq!(serialize(&grid, &quoted_csv(), CopyMode::Transposed), "");
    }

    #[test]
    fn test_idempotent() {
        let grid = make_grid(vec![vec!["Name", "1"], vec!["x", "2"]]);
        let config = quoted_csv();
        for mode in [CopyMode::Normal, CopyMode::Transposed] {
            assert_eq!(serialize(&grid, &config, mode), serialize(&grid, &config, mode));
        }
    }
}
