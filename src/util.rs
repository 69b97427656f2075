use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CopyError, Result};
use crate::selection::CellPosition;

static CELL_REF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([A-Z]+)([0-9]+)$").unwrap());

/// Parse column letters to 0-indexed column number (A=0, B=1, ..., Z=25, AA=26, etc.)
///
/// Returns `None` for an empty string, a non `A-Z` letter, or a column too
/// wide for `usize`.
pub fn col_from_letters(letters: &str) -> Option<usize> {
    let mut result = 0usize;
    for c in letters.chars() {
        if !c.is_ascii_uppercase() {
            return None;
        }
        let digit = c as usize - 'A' as usize + 1;
        result = result.checked_mul(26)?.checked_add(digit)?;
    }
    result.checked_sub(1)
}

/// Parse a cell reference like "A1" or "AA123"
pub fn parse_cell_ref(s: &str) -> Option<CellPosition> {
    let s = s.trim().to_uppercase();
    let caps = CELL_REF_RE.captures(&s)?;

    let col_str = caps.get(1)?.as_str();
    let row_str = caps.get(2)?.as_str();

    let row: usize = row_str.parse().ok()?;
    if row == 0 {
        return None; // Rows are 1-indexed in user notation
    }

    let col = col_from_letters(col_str)?;
    Some(CellPosition::new(row - 1, col))
}

/// Parse "A1:C3" (or a single "B2") into the two corners of a rectangle.
pub fn parse_range(s: &str) -> Result<(CellPosition, CellPosition)> {
    let parts: Vec<&str> = s.split(':').collect();
    let (start, end) = match parts.as_slice() {
        [single] => (*single, *single),
        [start, end] => (*start, *end),
        _ => return Err(CopyError::InvalidRange(s.to_string())),
    };

    let start = parse_cell_ref(start).ok_or_else(|| CopyError::InvalidRange(s.to_string()))?;
    let end = parse_cell_ref(end).ok_or_else(|| CopyError::InvalidRange(s.to_string()))?;

    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_col_from_letters() {
        assert_eq!(col_from_letters("A"), Some(0));
        assert_eq!(col_from_letters("Z"), Some(25));
        assert_eq!(col_from_letters("AA"), Some(26));
        assert_eq!(col_from_letters("BA"), Some(52));
        assert_eq!(col_from_letters(""), None);
        assert_eq!(col_from_letters("a1"), None);
    }

    #[test]
    fn test_col_from_letters_too_wide() {
        assert_eq!(col_from_letters("AAAAAAAAAAAAAAAA"), None);
        assert_eq!(parse_cell_ref("ZZZZZZZZZZZZZZZZZZZZ1"), None);
        assert!(matches!(
            parse_range("AAAAAAAAAAAAAAAA1:B2"),
            Err(CopyError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_parse_cell_ref() {
        assert_eq!(parse_cell_ref("A1"), Some(CellPosition::new(0, 0)));
        assert_eq!(parse_cell_ref("b2"), Some(CellPosition::new(1, 1)));
        assert_eq!(parse_cell_ref("AA10"), Some(CellPosition::new(9, 26)));
        assert_eq!(parse_cell_ref("A0"), None);
        assert_eq!(parse_cell_ref("1A"), None);
    }

    #[test]
    fn test_parse_range() {
        let (start, end) = parse_range("A1:C3").unwrap();
        assert_eq!(start, CellPosition::new(0, 0));
        assert_eq!(end, CellPosition::new(2, 2));

        let (start, end) = parse_range("B2").unwrap();
        assert_eq!(start, end);

        assert!(parse_range("A1:B2:C3").is_err());
        assert!(parse_range("A1:").is_err());
    }
}
