//! Value grids as exchanged with the service, and decoding them into bindings

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::column::Column;
use crate::header::HeaderMap;
use crate::model::WorksheetRef;
use crate::row::Row;

/// Row-major or column-major grid
pub type Grid = Vec<Vec<String>>;

/// Orientation of a value grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MajorDimension {
    #[default]
    Rows,
    Columns,
}

impl MajorDimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            MajorDimension::Rows => "ROWS",
            MajorDimension::Columns => "COLUMNS",
        }
    }
}

/// How the service interprets written values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueInputOption {
    /// Values are parsed as if typed by a user (`=A1` becomes a formula)
    #[default]
    UserEntered,
    /// Values are stored verbatim
    Raw,
}

impl ValueInputOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueInputOption::UserEntered => "USER_ENTERED",
            ValueInputOption::Raw => "RAW",
        }
    }

    /// Parse a user-supplied name (`raw`, `user_entered`, `USER-ENTERED`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "USER_ENTERED" => Some(ValueInputOption::UserEntered),
            "RAW" => Some(ValueInputOption::Raw),
            _ => None,
        }
    }
}

/// A range and its values, as read from or written to the service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<MajorDimension>,
    /// Absent or null on the wire means an empty grid
    #[serde(default, deserialize_with = "deserialize_grid")]
    pub values: Grid,
}

/// A single-range write, ready for the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    pub range: String,
    pub input_option: ValueInputOption,
    pub body: ValueRange,
}

impl UpdateRequest {
    pub fn new(
        range: String,
        major_dimension: MajorDimension,
        values: Grid,
        input_option: ValueInputOption,
    ) -> Self {
        Self {
            body: ValueRange {
                range: Some(range.clone()),
                major_dimension: Some(major_dimension),
                values,
            },
            range,
            input_option,
        }
    }

    pub fn major_dimension(&self) -> MajorDimension {
        self.body.major_dimension.unwrap_or_default()
    }
}

fn deserialize_grid<'de, D>(deserializer: D) -> Result<Grid, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<Vec<Value>>>> = Option::deserialize(deserializer)?;

    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|line| line.unwrap_or_default().iter().map(cell_to_string).collect())
        .collect())
}

fn cell_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        other => other.to_string(),
    }
}

/// Build one `Row` per grid line, using the first line as the header.
///
/// The header line itself comes back as row 0, so row indices line up with
/// the sheet's own rows when the whole sheet was fetched.
pub fn rows_from_grid(sheet: &WorksheetRef, grid: Grid) -> Vec<Row> {
    let header = Arc::new(HeaderMap::new(grid.first().cloned().unwrap_or_default()));

    (0u32..)
        .zip(grid)
        .map(|(index, values)| Row::with_header(sheet.clone(), index, values, Arc::clone(&header)))
        .collect()
}

/// Build a `Column` from the first slice of a column-major grid
pub fn column_from_grid(sheet: &WorksheetRef, index: u32, grid: Grid) -> Column {
    let slice = grid.into_iter().next().unwrap_or_default();
    Column::new(sheet.clone(), index, slice)
}
