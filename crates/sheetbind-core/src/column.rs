use crate::error::BindResult;
use crate::grid::{MajorDimension, UpdateRequest, ValueInputOption};
use crate::header::sanitize;
use crate::model::WorksheetRef;
use crate::range::single_column_range;

/// One fetched column: its header label plus the values below it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    sheet: WorksheetRef,
    index: u32,
    header: String,
    key: String,
    values: Vec<String>,
}

impl Column {
    /// Split a column slice into header (first entry, or empty) and values
    pub fn new(sheet: WorksheetRef, index: u32, slice: Vec<String>) -> Self {
        let mut entries = slice.into_iter();
        let header = entries.next().unwrap_or_default();
        let key = sanitize(&header);

        Self {
            sheet,
            index,
            header,
            key,
            values: entries.collect(),
        }
    }

    pub fn sheet(&self) -> &WorksheetRef {
        &self.sheet
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// Original header label
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Sanitized header key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Values below the header
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut Vec<String> {
        &mut self.values
    }

    pub fn get(&self, i: usize) -> Option<&str> {
        self.values.get(i).map(String::as_str)
    }

    /// Write request covering this column, header label first
    pub fn update_request(&self, input_option: ValueInputOption) -> BindResult<UpdateRequest> {
        let range = single_column_range(&self.sheet.title, self.index)?;

        let mut slice = Vec::with_capacity(self.values.len() + 1);
        slice.push(self.header.clone());
        slice.extend(self.values.iter().cloned());

        Ok(UpdateRequest::new(
            range,
            MajorDimension::Columns,
            vec![slice],
            input_option,
        ))
    }
}
