use serde::{Deserialize, Serialize};

use crate::error::{BindError, BindResult};

/// Number of addressable columns (A through ZZZ)
pub const MAX_COLUMNS: u32 = 18_278;

/// Cell coordinate (0-indexed internally)
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    pub const fn new(row: u32, col: u32) -> Self {
        CellCoord { row, col }
    }

    /// Create from A1 notation (e.g., "A1" -> (0, 0), "B2" -> (1, 1))
    pub fn from_a1(notation: &str) -> Option<Self> {
        let notation = notation.trim();
        let mut col_str = String::new();
        let mut row_str = String::new();

        for c in notation.chars() {
            if c.is_ascii_alphabetic() {
                if !row_str.is_empty() {
                    return None; // Letters after numbers
                }
                col_str.push(c);
            } else if c.is_ascii_digit() {
                row_str.push(c);
            } else {
                return None;
            }
        }

        if col_str.is_empty() || row_str.is_empty() {
            return None;
        }

        let col = col_from_label(&col_str).ok()?;
        let row: u32 = row_str.parse().ok()?;

        if row == 0 {
            return None; // Rows are 1-indexed in A1 notation
        }

        Some(CellCoord { row: row - 1, col })
    }

    /// Convert to A1 notation (e.g., (0, 0) -> "A1")
    pub fn to_a1(&self) -> BindResult<String> {
        Ok(format!("{}{}", col_to_label(self.col)?, row_number(self.row)?))
    }
}

/// Convert column index (0-indexed) to label (A, B, ..., Z, AA, AB, ...)
///
/// Labels use bijective base-26, so there is no zero digit: 25 is `Z`,
/// 26 is `AA`. Indices at or past [`MAX_COLUMNS`] are rejected.
pub fn col_to_label(col: u32) -> BindResult<String> {
    if col >= MAX_COLUMNS {
        return Err(BindError::ColumnOutOfRange {
            index: col,
            max: MAX_COLUMNS - 1,
        });
    }

    let mut label = String::new();
    let mut n = col + 1; // 1-indexed for calculation

    while n > 0 {
        n -= 1;
        label.insert(0, char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }

    Ok(label)
}

/// Convert column label (A, B, ..., Z, AA, AB, ...) to index (0-indexed)
pub fn col_from_label(label: &str) -> BindResult<u32> {
    let invalid = || BindError::InvalidColumnLabel(label.to_string());

    // Three letters already reach ZZZ, the last addressable column
    if label.is_empty() || label.len() > 3 {
        return Err(invalid());
    }

    let mut col: u32 = 0;
    for c in label.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(invalid());
        }
        col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }

    Ok(col - 1)
}

/// Cell address for a zero-based column and row (e.g., (1, 0) -> "B1")
pub fn cell_address(col: u32, row: u32) -> BindResult<String> {
    CellCoord::new(row, col).to_a1()
}

/// Range covering an entire worksheet: the title on its own
pub fn whole_sheet_range(title: &str) -> BindResult<String> {
    quote_sheet_title(title)
}

/// Range covering one row, e.g. `Sheet1!2:2` for row index 1
pub fn single_row_range(title: &str, row: u32) -> BindResult<String> {
    let number = row_number(row)?;
    Ok(format!("{}!{}:{}", quote_sheet_title(title)?, number, number))
}

/// Range covering one column, e.g. `Sheet1!C:C` for column index 2
pub fn single_column_range(title: &str, col: u32) -> BindResult<String> {
    let label = col_to_label(col)?;
    Ok(format!("{}!{}:{}", quote_sheet_title(title)?, label, label))
}

/// Render a worksheet title for use in a range address.
///
/// Plain identifiers are left bare. Anything else is wrapped in single
/// quotes, with embedded quotes doubled.
pub fn quote_sheet_title(title: &str) -> BindResult<String> {
    if title.is_empty() {
        return Err(BindError::EmptySheetTitle);
    }

    if is_plain_title(title) {
        Ok(title.to_string())
    } else {
        Ok(format!("'{}'", title.replace('\'', "''")))
    }
}

fn is_plain_title(title: &str) -> bool {
    let starts_with_digit = title.chars().next().is_some_and(|c| c.is_ascii_digit());

    !starts_with_digit
        && title.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        // "AB12" would be read as a cell reference
        && CellCoord::from_a1(title).is_none()
}

fn row_number(row: u32) -> BindResult<u32> {
    row.checked_add(1).ok_or(BindError::RowOutOfRange(row))
}

/// A range of cells (e.g., A1:B10)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRange {
    pub start: CellCoord,
    pub end: CellCoord,
}

impl CellRange {
    pub fn new(start: CellCoord, end: CellCoord) -> Self {
        // Normalize so start is top-left and end is bottom-right
        CellRange {
            start: CellCoord::new(start.row.min(end.row), start.col.min(end.col)),
            end: CellCoord::new(start.row.max(end.row), start.col.max(end.col)),
        }
    }

    /// Create from A1:B1 notation
    pub fn from_a1(notation: &str) -> Option<Self> {
        let parts: Vec<&str> = notation.split(':').collect();
        match parts.len() {
            1 => {
                let coord = CellCoord::from_a1(parts[0])?;
                Some(CellRange::new(coord, coord))
            }
            2 => {
                let start = CellCoord::from_a1(parts[0])?;
                let end = CellCoord::from_a1(parts[1])?;
                Some(CellRange::new(start, end))
            }
            _ => None,
        }
    }

    /// Convert to A1:B1 notation
    pub fn to_a1(&self) -> BindResult<String> {
        if self.is_single_cell() {
            self.start.to_a1()
        } else {
            Ok(format!("{}:{}", self.start.to_a1()?, self.end.to_a1()?))
        }
    }

    /// Get the number of rows in the range
    pub fn row_count(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    /// Get the number of columns in the range
    pub fn col_count(&self) -> u32 {
        self.end.col - self.start.col + 1
    }

    /// Check if this range is a single cell
    pub fn is_single_cell(&self) -> bool {
        self.start == self.end
    }
}

/// A parsed range address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeAddress {
    /// `Sheet1`
    WholeSheet { sheet: String },
    /// `Sheet1!3:3`
    Row { sheet: String, row: u32 },
    /// `Sheet1!C:C`
    Column { sheet: String, col: u32 },
    /// `Sheet1!A1:C10`
    Cells { sheet: String, range: CellRange },
}

impl RangeAddress {
    /// Parse a range address such as the one the service echoes back
    /// (e.g. `'Class Data'!A1:Z988`)
    pub fn parse(address: &str) -> BindResult<Self> {
        let invalid = || BindError::InvalidRange(address.to_string());
        let (sheet, cells) = split_sheet(address).ok_or_else(invalid)?;

        if sheet.is_empty() {
            return Err(BindError::EmptySheetTitle);
        }

        let Some(cells) = cells else {
            return Ok(RangeAddress::WholeSheet { sheet });
        };

        if let Some((start, end)) = cells.split_once(':') {
            if !start.is_empty() && start.chars().all(|c| c.is_ascii_digit()) {
                if start != end {
                    return Err(invalid());
                }
                let number: u32 = start.parse().map_err(|_| invalid())?;
                let row = number.checked_sub(1).ok_or_else(invalid)?;
                return Ok(RangeAddress::Row { sheet, row });
            }

            if !start.is_empty() && start.chars().all(|c| c.is_ascii_alphabetic()) {
                if !start.eq_ignore_ascii_case(end) {
                    return Err(invalid());
                }
                let col = col_from_label(start).map_err(|_| invalid())?;
                return Ok(RangeAddress::Column { sheet, col });
            }
        }

        let range = CellRange::from_a1(cells).ok_or_else(invalid)?;
        Ok(RangeAddress::Cells { sheet, range })
    }

    /// Worksheet title this range lives on
    pub fn sheet(&self) -> &str {
        match self {
            RangeAddress::WholeSheet { sheet }
            | RangeAddress::Row { sheet, .. }
            | RangeAddress::Column { sheet, .. }
            | RangeAddress::Cells { sheet, .. } => sheet,
        }
    }

    /// Render back to range-address notation
    pub fn to_a1(&self) -> BindResult<String> {
        match self {
            RangeAddress::WholeSheet { sheet } => whole_sheet_range(sheet),
            RangeAddress::Row { sheet, row } => single_row_range(sheet, *row),
            RangeAddress::Column { sheet, col } => single_column_range(sheet, *col),
            RangeAddress::Cells { sheet, range } => {
                Ok(format!("{}!{}", quote_sheet_title(sheet)?, range.to_a1()?))
            }
        }
    }
}

/// Split `'My Sheet'!A1:B2` into the unquoted title and the cell part
fn split_sheet(address: &str) -> Option<(String, Option<&str>)> {
    let Some(quoted) = address.strip_prefix('\'') else {
        return Some(match address.split_once('!') {
            Some((title, cells)) => (title.to_string(), Some(cells)),
            None => (address.to_string(), None),
        });
    };

    let mut title = String::new();
    let mut chars = quoted.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != '\'' {
            title.push(c);
            continue;
        }

        // '' is an escaped quote inside the title
        if matches!(chars.peek(), Some((_, '\''))) {
            chars.next();
            title.push('\'');
            continue;
        }

        let rest = &quoted[i + 1..];
        if rest.is_empty() {
            return Some((title, None));
        }
        return rest.strip_prefix('!').map(|cells| (title, Some(cells)));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_col_to_label() {
        assert_eq!(col_to_label(0).unwrap(), "A");
        assert_eq!(col_to_label(25).unwrap(), "Z");
        assert_eq!(col_to_label(26).unwrap(), "AA");
        assert_eq!(col_to_label(27).unwrap(), "AB");
        assert_eq!(col_to_label(701).unwrap(), "ZZ");
        assert_eq!(col_to_label(702).unwrap(), "AAA");
        assert_eq!(col_to_label(MAX_COLUMNS - 1).unwrap(), "ZZZ");
    }

    #[test]
    fn test_col_to_label_out_of_range() {
        assert_eq!(
            col_to_label(MAX_COLUMNS),
            Err(BindError::ColumnOutOfRange {
                index: MAX_COLUMNS,
                max: MAX_COLUMNS - 1
            })
        );
    }

    #[test]
    fn test_col_from_label() {
        assert_eq!(col_from_label("A"), Ok(0));
        assert_eq!(col_from_label("z"), Ok(25));
        assert_eq!(col_from_label("AA"), Ok(26));
        assert_eq!(col_from_label("AB"), Ok(27));
        assert_eq!(col_from_label("ZZ"), Ok(701));
        assert_eq!(col_from_label("ZZZ"), Ok(MAX_COLUMNS - 1));

        assert!(col_from_label("").is_err());
        assert!(col_from_label("A1").is_err());
        assert!(col_from_label("AAAA").is_err());
    }

    #[test]
    fn test_label_round_trip() {
        for n in (0..26).chain([26, 51, 52, 701, 702, 5000, MAX_COLUMNS - 1]) {
            assert_eq!(col_from_label(&col_to_label(n).unwrap()), Ok(n));
        }
    }

    #[test]
    fn test_cell_address() {
        assert_eq!(cell_address(0, 0).unwrap(), "A1");
        assert_eq!(cell_address(1, 4).unwrap(), "B5");
        assert_eq!(cell_address(26, 99).unwrap(), "AA100");
        assert!(cell_address(0, u32::MAX).is_err());
    }

    #[test]
    fn test_sheet_ranges() {
        assert_eq!(whole_sheet_range("Sheet1").unwrap(), "Sheet1");
        assert_eq!(single_row_range("Sheet1", 0).unwrap(), "Sheet1!1:1");
        assert_eq!(single_row_range("Sheet3", 1).unwrap(), "Sheet3!2:2");
        assert_eq!(single_column_range("Sheet1", 2).unwrap(), "Sheet1!C:C");
        assert_eq!(single_column_range("Sheet1", 27).unwrap(), "Sheet1!AB:AB");
    }

    #[test]
    fn test_range_errors() {
        assert_eq!(whole_sheet_range(""), Err(BindError::EmptySheetTitle));
        assert_eq!(
            single_row_range("Sheet1", u32::MAX),
            Err(BindError::RowOutOfRange(u32::MAX))
        );
        assert!(matches!(
            single_column_range("Sheet1", MAX_COLUMNS),
            Err(BindError::ColumnOutOfRange { .. })
        ));
    }

    #[test]
    fn test_quoted_titles() {
        assert_eq!(quote_sheet_title("Sheet_1").unwrap(), "Sheet_1");
        assert_eq!(quote_sheet_title("Class Data").unwrap(), "'Class Data'");
        assert_eq!(quote_sheet_title("Bob's").unwrap(), "'Bob''s'");
        assert_eq!(quote_sheet_title("2024").unwrap(), "'2024'");
        assert_eq!(quote_sheet_title("AB12").unwrap(), "'AB12'");
        assert_eq!(
            single_row_range("Class Data", 4).unwrap(),
            "'Class Data'!5:5"
        );
    }

    #[test]
    fn test_parse_range_address() {
        assert_eq!(
            RangeAddress::parse("Sheet1").unwrap(),
            RangeAddress::WholeSheet {
                sheet: "Sheet1".to_string()
            }
        );
        assert_eq!(
            RangeAddress::parse("Sheet1!2:2").unwrap(),
            RangeAddress::Row {
                sheet: "Sheet1".to_string(),
                row: 1
            }
        );
        assert_eq!(
            RangeAddress::parse("Sheet1!c:C").unwrap(),
            RangeAddress::Column {
                sheet: "Sheet1".to_string(),
                col: 2
            }
        );

        let parsed = RangeAddress::parse("'Class Data'!A1:Z988").unwrap();
        assert_eq!(parsed.sheet(), "Class Data");
        match parsed {
            RangeAddress::Cells { range, .. } => {
                assert_eq!(range.row_count(), 988);
                assert_eq!(range.col_count(), 26);
            }
            other => panic!("expected cell range, got {:?}", other),
        }

        let escaped = RangeAddress::parse("'Bob''s'!B2").unwrap();
        assert_eq!(escaped.sheet(), "Bob's");
        assert_eq!(escaped.to_a1().unwrap(), "'Bob''s'!B2");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(RangeAddress::parse("Sheet1!2:3").is_err());
        assert!(RangeAddress::parse("Sheet1!A:C").is_err());
        assert!(RangeAddress::parse("Sheet1!0:0").is_err());
        assert!(RangeAddress::parse("'Unclosed!A1").is_err());
        assert!(RangeAddress::parse("'Sheet'A1").is_err());
        assert_eq!(
            RangeAddress::parse("!A1"),
            Err(BindError::EmptySheetTitle)
        );
    }

    #[test]
    fn test_range_address_round_trip() {
        for address in ["Sheet1", "Sheet1!7:7", "'Class Data'!D:D", "Sheet1!A1:C3"] {
            assert_eq!(RangeAddress::parse(address).unwrap().to_a1().unwrap(), address);
        }
    }
}
