use serde::{Deserialize, Serialize};
use sheetbind_core::{Spreadsheet, Worksheet};

/// Spreadsheet metadata response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spreadsheet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spreadsheet_url: Option<String>,
    #[serde(default)]
    pub properties: SpreadsheetProperties,
    #[serde(default)]
    pub sheets: Vec<SheetEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpreadsheetProperties {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetEntry {
    #[serde(default)]
    pub properties: SheetProperties,
}

/// Zero-valued fields are omitted by the service, hence the defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_id: Option<i64>,
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub grid_properties: GridProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridProperties {
    #[serde(default)]
    pub row_count: u32,
    #[serde(default)]
    pub column_count: u32,
}

impl SpreadsheetMetadata {
    /// Convert to the domain model; `requested_id` fills in a missing id
    pub fn into_spreadsheet(self, requested_id: &str) -> Spreadsheet {
        Spreadsheet {
            id: self
                .spreadsheet_id
                .unwrap_or_else(|| requested_id.to_string()),
            url: self.spreadsheet_url,
            title: self.properties.title,
            worksheets: self
                .sheets
                .into_iter()
                .map(|entry| {
                    let p = entry.properties;
                    Worksheet {
                        sheet_id: p.sheet_id,
                        index: p.index,
                        title: p.title,
                        row_count: p.grid_properties.row_count,
                        col_count: p.grid_properties.column_count,
                    }
                })
                .collect(),
        }
    }
}

/// Acknowledgement of a values update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spreadsheet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_range: Option<String>,
    #[serde(default)]
    pub updated_rows: u32,
    #[serde(default)]
    pub updated_columns: u32,
    #[serde(default)]
    pub updated_cells: u32,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_into_spreadsheet() {
        let json = r#"{
            "spreadsheetId": "1pU6",
            "spreadsheetUrl": "https://docs.google.com/spreadsheets/d/1pU6/edit",
            "properties": { "title": "Inventory" },
            "sheets": [
                { "properties": { "sheetId": 0, "title": "Sheet1",
                  "gridProperties": { "rowCount": 1000, "columnCount": 26 } } },
                { "properties": { "sheetId": 9, "index": 1, "title": "Class Data",
                  "gridProperties": { "rowCount": 988, "columnCount": 6 } } }
            ]
        }"#;

        let metadata: SpreadsheetMetadata = serde_json::from_str(json).unwrap();
        let ss = metadata.into_spreadsheet("ignored");

        assert_eq!(ss.id, "1pU6");
        assert_eq!(ss.title, "Inventory");
        assert_eq!(ss.worksheets.len(), 2);
        assert_eq!(ss.worksheets[0].index, 0);
        assert_eq!(ss.worksheets[1].title, "Class Data");
        assert_eq!(ss.worksheets[1].row_count, 988);
        assert_eq!(ss.worksheets[1].col_count, 6);
    }

    #[test]
    fn test_metadata_without_sheets() {
        let metadata: SpreadsheetMetadata =
            serde_json::from_str(r#"{"properties":{"title":"Empty"}}"#).unwrap();
        let ss = metadata.into_spreadsheet("doc");
        assert_eq!(ss.id, "doc");
        assert!(ss.worksheets.is_empty());
    }

    #[test]
    fn test_update_response() {
        let resp: UpdateResponse = serde_json::from_str(
            r#"{"spreadsheetId":"doc","updatedRange":"Sheet1!A2:B2","updatedRows":1,"updatedColumns":2,"updatedCells":2}"#,
        )
        .unwrap();
        assert_eq!(resp.updated_range.as_deref(), Some("Sheet1!A2:B2"));
        assert_eq!(resp.updated_cells, 2);
    }
}
