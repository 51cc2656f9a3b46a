use std::sync::Arc;

use crate::cell::CellContent;
use crate::error::{BindError, BindResult};
use crate::grid::{MajorDimension, UpdateRequest, ValueInputOption};
use crate::header::{HeaderMap, LookupPolicy};
use crate::model::WorksheetRef;
use crate::range::single_row_range;

/// One fetched row with header-keyed access to its values.
///
/// `index` is the position within the fetched grid, not a stable id: it is
/// only meaningful until the sheet is fetched again. Values are always at
/// least as long as the header.
#[derive(Debug, Clone)]
pub struct Row {
    sheet: WorksheetRef,
    index: u32,
    values: Vec<String>,
    header: Arc<HeaderMap>,
    lookup_policy: LookupPolicy,
}

impl Row {
    pub fn new<S: Into<String>>(
        sheet: WorksheetRef,
        index: u32,
        values: Vec<String>,
        header: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::with_header(sheet, index, values, Arc::new(HeaderMap::new(header)))
    }

    /// Build a row that shares an already computed header
    pub fn with_header(
        sheet: WorksheetRef,
        index: u32,
        mut values: Vec<String>,
        header: Arc<HeaderMap>,
    ) -> Self {
        if values.len() < header.len() {
            values.resize(header.len(), String::new());
        }

        Self {
            sheet,
            index,
            values,
            header,
            lookup_policy: LookupPolicy::default(),
        }
    }

    pub fn with_lookup_policy(mut self, policy: LookupPolicy) -> Self {
        self.lookup_policy = policy;
        self
    }

    pub fn set_lookup_policy(&mut self, policy: LookupPolicy) {
        self.lookup_policy = policy;
    }

    pub fn lookup_policy(&self) -> LookupPolicy {
        self.lookup_policy
    }

    pub fn sheet(&self) -> &WorksheetRef {
        &self.sheet
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Positional access; the row's length cannot change
    pub fn values_mut(&mut self) -> &mut [String] {
        &mut self.values
    }

    /// Original header labels
    pub fn header(&self) -> &[String] {
        self.header.labels()
    }

    /// Sanitized header keys
    pub fn keys(&self) -> &[String] {
        self.header.keys()
    }

    /// Value under the first header whose key matches
    pub fn get_value(&self, key: &str) -> Option<&str> {
        self.header
            .position(key)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
    }

    /// Like `get_value`, but a miss is an error
    pub fn require_value(&self, key: &str) -> BindResult<&str> {
        self.get_value(key)
            .ok_or_else(|| BindError::LookupMiss(key.to_string()))
    }

    /// Write under the first header whose key matches.
    ///
    /// A key matching no header is a no-op under `LookupPolicy::Lenient`
    /// and `BindError::LookupMiss` under `LookupPolicy::Strict`.
    pub fn set_value(&mut self, key: &str, value: impl Into<String>) -> BindResult<()> {
        match self.header.position(key) {
            Some(i) => {
                self.values[i] = value.into();
                Ok(())
            }
            None => match self.lookup_policy {
                LookupPolicy::Lenient => Ok(()),
                LookupPolicy::Strict => Err(BindError::LookupMiss(key.to_string())),
            },
        }
    }

    /// Typed view of the value under `key`
    pub fn cell(&self, key: &str) -> Option<CellContent> {
        self.get_value(key).map(CellContent::from_raw)
    }

    pub fn set_cell(&mut self, key: &str, content: CellContent) -> BindResult<()> {
        self.set_value(key, content.to_raw())
    }

    /// Write request covering this row.
    ///
    /// The payload is exactly the row's values: cells past the header's
    /// width that were never fetched are left alone on the sheet.
    pub fn update_request(&self, input_option: ValueInputOption) -> BindResult<UpdateRequest> {
        let range = single_row_range(&self.sheet.title, self.index)?;
        Ok(UpdateRequest::new(
            range,
            MajorDimension::Rows,
            vec![self.values.clone()],
            input_option,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sheet() -> WorksheetRef {
        WorksheetRef::new("doc", "Sheet1")
    }

    #[test]
    fn test_pads_to_header_length() {
        let row = Row::new(sheet(), 1, strings(&["Alice"]), ["Name", "Age"]);
        assert_eq!(row.values(), ["Alice", ""]);
        assert_eq!(row.get_value("age"), Some(""));
        assert_eq!(row.keys(), ["name", "age"]);
        assert_eq!(row.header(), ["Name", "Age"]);
    }

    #[test]
    fn test_longer_than_header_is_kept() {
        let row = Row::new(sheet(), 1, strings(&["a", "b", "extra"]), ["X", "Y"]);
        assert_eq!(row.values().len(), 3);
    }

    #[test]
    fn test_get_and_set() {
        let mut row = Row::new(sheet(), 1, strings(&["1", "2"]), ["Test 111!", "Other"]);

        assert_eq!(row.get_value("test111"), Some("1"));
        row.set_value("test111", "1Z").unwrap();
        assert_eq!(row.get_value("test111"), Some("1Z"));
        assert_eq!(row.get_value("Test 111!"), None);
        assert_eq!(row.get_value("missing"), None);
    }

    #[test]
    fn test_set_unknown_key_is_noop_when_lenient() {
        let mut row = Row::new(sheet(), 1, strings(&["1", "2"]), ["A", "B"]);
        let before = row.values().to_vec();

        assert_eq!(row.set_value("c", "x"), Ok(()));
        assert_eq!(row.values(), before.as_slice());
    }

    #[test]
    fn test_set_unknown_key_fails_when_strict() {
        let mut row = Row::new(sheet(), 1, strings(&["1", "2"]), ["A", "B"])
            .with_lookup_policy(LookupPolicy::Strict);

        assert_eq!(
            row.set_value("c", "x"),
            Err(BindError::LookupMiss("c".to_string()))
        );
        assert_eq!(row.values(), ["1", "2"]);
        assert!(row.require_value("c").is_err());
        assert_eq!(row.require_value("a"), Ok("1"));
    }

    #[test]
    fn test_colliding_headers_resolve_to_first() {
        let mut row = Row::new(sheet(), 2, strings(&["first", "second"]), ["A B", "ab"]);

        assert_eq!(row.get_value("ab"), Some("first"));
        row.set_value("ab", "changed").unwrap();
        assert_eq!(row.values(), ["changed", "second"]);

        // The shadowed column is still reachable by position
        row.values_mut()[1] = "also changed".to_string();
        assert_eq!(row.get_value("ab"), Some("changed"));
    }

    #[test]
    fn test_cell_content() {
        let mut row = Row::new(sheet(), 1, strings(&["3", "=A2*2"]), ["Qty", "Total"]);

        assert_eq!(row.cell("qty"), Some(CellContent::Numeric(3.0)));
        assert!(row.cell("total").unwrap().is_formula());

        row.set_cell("qty", CellContent::Numeric(4.0)).unwrap();
        assert_eq!(row.get_value("qty"), Some("4"));
    }

    #[test]
    fn test_cell_rewrite_keeps_original_text() {
        let mut row = Row::new(sheet(), 1, strings(&["007", "1.50", "02134"]), ["Id", "Price", "Zip"]);

        for key in ["id", "price", "zip"] {
            let content = row.cell(key).unwrap();
            row.set_cell(key, content).unwrap();
        }
        assert_eq!(row.values(), ["007", "1.50", "02134"]);
    }

    #[test]
    fn test_update_request() {
        let mut row = Row::new(sheet(), 1, strings(&["Alice"]), ["Name", "Age"]);
        row.set_value("age", "30").unwrap();

        let req = row.update_request(ValueInputOption::UserEntered).unwrap();
        assert_eq!(req.range, single_row_range("Sheet1", 1).unwrap());
        assert_eq!(req.range, "Sheet1!2:2");
        assert_eq!(req.major_dimension(), MajorDimension::Rows);
        assert_eq!(req.body.values, vec![strings(&["Alice", "30"])]);
        assert_eq!(req.input_option, ValueInputOption::UserEntered);
    }

    #[test]
    fn test_update_request_stops_at_header_width() {
        // The sheet may be 26 columns wide, but only the fetched width is written
        let row = Row::new(sheet(), 4, strings(&["x"]), ["A", "B", "C"]);
        let req = row.update_request(ValueInputOption::Raw).unwrap();
        assert_eq!(req.body.values[0].len(), 3);
    }

    #[test]
    fn test_update_request_rejects_empty_title() {
        let row = Row::new(WorksheetRef::new("doc", ""), 0, Vec::new(), Vec::<String>::new());
        assert_eq!(
            row.update_request(ValueInputOption::Raw),
            Err(BindError::EmptySheetTitle)
        );
    }
}
