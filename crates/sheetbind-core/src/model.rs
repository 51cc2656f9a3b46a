use serde::{Deserialize, Serialize};

/// Address a binding carries so it can write itself back
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorksheetRef {
    pub spreadsheet_id: String,
    pub title: String,
}

impl WorksheetRef {
    pub fn new(spreadsheet_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            title: title.into(),
        }
    }
}

/// A worksheet as reported by the service's metadata endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worksheet {
    /// Service-assigned numeric id, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_id: Option<i64>,
    /// Position of the worksheet in the spreadsheet
    pub index: u32,
    /// Title, also the namespace used in range addresses
    pub title: String,
    /// Grid bounds reported by the service; may exceed the populated data
    pub row_count: u32,
    pub col_count: u32,
}

/// Snapshot of a spreadsheet's metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spreadsheet {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub title: String,
    pub worksheets: Vec<Worksheet>,
}

impl Spreadsheet {
    /// Get a worksheet by its service-assigned index
    pub fn get_worksheet(&self, index: u32) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.index == index)
    }

    /// Get a worksheet by title
    pub fn get_worksheet_by_title(&self, title: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.title == title)
    }

    /// Address of one of this spreadsheet's worksheets
    pub fn worksheet_ref(&self, worksheet: &Worksheet) -> WorksheetRef {
        WorksheetRef::new(self.id.clone(), worksheet.title.clone())
    }

    pub fn worksheet_count(&self) -> usize {
        self.worksheets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Spreadsheet {
        Spreadsheet {
            id: "abc".to_string(),
            url: None,
            title: "Budget".to_string(),
            worksheets: vec![
                Worksheet {
                    sheet_id: Some(0),
                    index: 0,
                    title: "Sheet1".to_string(),
                    row_count: 1000,
                    col_count: 26,
                },
                Worksheet {
                    sheet_id: Some(77),
                    index: 1,
                    title: "Class Data".to_string(),
                    row_count: 988,
                    col_count: 6,
                },
            ],
        }
    }

    #[test]
    fn test_worksheet_lookup() {
        let ss = sample();
        assert_eq!(ss.worksheet_count(), 2);
        assert_eq!(ss.get_worksheet(1).unwrap().title, "Class Data");
        assert_eq!(ss.get_worksheet_by_title("Sheet1").unwrap().index, 0);
        assert!(ss.get_worksheet(5).is_none());
        assert!(ss.get_worksheet_by_title("sheet1").is_none());
    }

    #[test]
    fn test_worksheet_ref() {
        let ss = sample();
        let ws = ss.get_worksheet(1).unwrap();
        assert_eq!(ss.worksheet_ref(ws), WorksheetRef::new("abc", "Class Data"));
    }
}
