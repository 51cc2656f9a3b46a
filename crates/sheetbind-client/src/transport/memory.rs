use std::collections::HashMap;

use async_trait::async_trait;
use sheetbind_core::{
    CellCoord, Grid, MajorDimension, RangeAddress, UpdateRequest, ValueRange,
};
use tokio::sync::RwLock;

use super::models::{
    GridProperties, SheetEntry, SheetProperties, SpreadsheetMetadata, SpreadsheetProperties,
    UpdateResponse,
};
use super::SheetsTransport;
use crate::error::{ClientError, ClientResult};

/// Minimum grid bounds reported for a worksheet, matching a new blank sheet
const MIN_ROWS: u32 = 1000;
const MIN_COLS: u32 = 26;

#[derive(Debug, Clone, Default)]
struct MemorySheet {
    title: String,
    cells: Grid,
}

#[derive(Debug, Clone, Default)]
struct MemorySpreadsheet {
    title: String,
    sheets: Vec<MemorySheet>,
}

/// `SheetsTransport` backed by in-process grids.
///
/// Reads behave like the service: trailing empty cells and rows are left
/// out of responses. Every update is recorded in arrival order.
#[derive(Debug, Default)]
pub struct InMemoryTransport {
    spreadsheets: RwLock<HashMap<String, MemorySpreadsheet>>,
    updates: RwLock<Vec<(String, UpdateRequest)>>,
    update_failure: RwLock<Option<String>>,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or retitle a spreadsheet
    pub async fn add_spreadsheet(&self, spreadsheet_id: &str, title: &str) {
        let mut docs = self.spreadsheets.write().await;
        docs.entry(spreadsheet_id.to_string()).or_default().title = title.to_string();
    }

    /// Add a worksheet (row-major cells), creating the spreadsheet if needed
    pub async fn add_worksheet(&self, spreadsheet_id: &str, title: &str, cells: Grid) {
        let mut docs = self.spreadsheets.write().await;
        let doc = docs.entry(spreadsheet_id.to_string()).or_default();

        match doc.sheets.iter_mut().find(|s| s.title == title) {
            Some(sheet) => sheet.cells = cells,
            None => doc.sheets.push(MemorySheet {
                title: title.to_string(),
                cells,
            }),
        }
    }

    /// Current cells of a worksheet, row-major
    pub async fn worksheet_cells(&self, spreadsheet_id: &str, title: &str) -> Option<Grid> {
        let docs = self.spreadsheets.read().await;
        docs.get(spreadsheet_id)?
            .sheets
            .iter()
            .find(|s| s.title == title)
            .map(|s| s.cells.clone())
    }

    /// Every update received so far, with its spreadsheet id
    pub async fn updates(&self) -> Vec<(String, UpdateRequest)> {
        self.updates.read().await.clone()
    }

    /// Make every following update fail with a 503 carrying `message`
    pub async fn fail_updates(&self, message: Option<String>) {
        *self.update_failure.write().await = message;
    }
}

fn not_found() -> ClientError {
    ClientError::Api {
        status: 404,
        message: "Requested entity was not found.".to_string(),
    }
}

fn bad_range(range: &str) -> ClientError {
    ClientError::Api {
        status: 400,
        message: format!("Unable to parse range: {}", range),
    }
}

fn find_sheet<'a>(doc: &'a MemorySpreadsheet, title: &str) -> Option<&'a MemorySheet> {
    doc.sheets.iter().find(|s| s.title == title)
}

/// Cells of `cells` inside rows `rows` and columns `cols`, trimmed the
/// way the service trims responses
fn extract(cells: &Grid, rows: (u32, u32), cols: (u32, u32)) -> Grid {
    let mut out: Grid = (rows.0..=rows.1)
        .map(|r| {
            let line = cells.get(r as usize).map(Vec::as_slice).unwrap_or_default();
            let mut picked: Vec<String> = (cols.0..=cols.1)
                .map(|c| line.get(c as usize).cloned().unwrap_or_default())
                .collect();
            while picked.last().is_some_and(String::is_empty) {
                picked.pop();
            }
            picked
        })
        .collect();

    while out.last().is_some_and(Vec::is_empty) {
        out.pop();
    }
    out
}

fn transpose(grid: &Grid) -> Grid {
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    let mut out: Grid = (0..width)
        .map(|c| {
            grid.iter()
                .map(|line| line.get(c).cloned().unwrap_or_default())
                .collect()
        })
        .collect();

    for line in &mut out {
        while line.last().is_some_and(String::is_empty) {
            line.pop();
        }
    }
    out
}

fn set_cell(cells: &mut Grid, at: CellCoord, value: String) {
    let (row, col) = (at.row as usize, at.col as usize);
    if cells.len() <= row {
        cells.resize(row + 1, Vec::new());
    }
    let line = &mut cells[row];
    if line.len() <= col {
        line.resize(col + 1, String::new());
    }
    line[col] = value;
}

#[async_trait]
impl SheetsTransport for InMemoryTransport {
    async fn get_metadata(&self, spreadsheet_id: &str) -> ClientResult<SpreadsheetMetadata> {
        let docs = self.spreadsheets.read().await;
        let doc = docs.get(spreadsheet_id).ok_or_else(not_found)?;

        let sheets = (0u32..)
            .zip(&doc.sheets)
            .map(|(index, sheet)| {
                let width = sheet.cells.iter().map(Vec::len).max().unwrap_or(0) as u32;
                SheetEntry {
                    properties: SheetProperties {
                        sheet_id: Some(i64::from(index)),
                        index,
                        title: sheet.title.clone(),
                        grid_properties: GridProperties {
                            row_count: (sheet.cells.len() as u32).max(MIN_ROWS),
                            column_count: width.max(MIN_COLS),
                        },
                    },
                }
            })
            .collect();

        Ok(SpreadsheetMetadata {
            spreadsheet_id: Some(spreadsheet_id.to_string()),
            spreadsheet_url: None,
            properties: SpreadsheetProperties {
                title: doc.title.clone(),
            },
            sheets,
        })
    }

    async fn get_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        major_dimension: MajorDimension,
    ) -> ClientResult<ValueRange> {
        let docs = self.spreadsheets.read().await;
        let doc = docs.get(spreadsheet_id).ok_or_else(not_found)?;

        let address = RangeAddress::parse(range).map_err(|_| bad_range(range))?;
        let sheet = find_sheet(doc, address.sheet()).ok_or_else(|| bad_range(range))?;

        let last_row = (sheet.cells.len() as u32).saturating_sub(1);
        let last_col = (sheet.cells.iter().map(Vec::len).max().unwrap_or(0) as u32).saturating_sub(1);

        let rows = match &address {
            RangeAddress::WholeSheet { .. } => extract(&sheet.cells, (0, last_row), (0, last_col)),
            RangeAddress::Row { row, .. } => extract(&sheet.cells, (*row, *row), (0, last_col)),
            RangeAddress::Column { col, .. } => {
                extract(&sheet.cells, (0, last_row), (*col, *col))
            }
            RangeAddress::Cells { range: cells, .. } => extract(
                &sheet.cells,
                (cells.start.row, cells.end.row),
                (cells.start.col, cells.end.col),
            ),
        };

        let values = match major_dimension {
            MajorDimension::Rows => rows,
            MajorDimension::Columns => transpose(&rows),
        };

        Ok(ValueRange {
            range: Some(range.to_string()),
            major_dimension: Some(major_dimension),
            values,
        })
    }

    async fn update_values(
        &self,
        spreadsheet_id: &str,
        request: &UpdateRequest,
    ) -> ClientResult<UpdateResponse> {
        if let Some(message) = self.update_failure.read().await.clone() {
            return Err(ClientError::Api {
                status: 503,
                message,
            });
        }

        let mut docs = self.spreadsheets.write().await;
        let doc = docs.get_mut(spreadsheet_id).ok_or_else(not_found)?;

        let address = RangeAddress::parse(&request.range).map_err(|_| bad_range(&request.range))?;
        let sheet = doc
            .sheets
            .iter_mut()
            .find(|s| s.title == address.sheet())
            .ok_or_else(|| bad_range(&request.range))?;

        let origin = match &address {
            RangeAddress::WholeSheet { .. } => CellCoord::new(0, 0),
            RangeAddress::Row { row, .. } => CellCoord::new(*row, 0),
            RangeAddress::Column { col, .. } => CellCoord::new(0, *col),
            RangeAddress::Cells { range, .. } => range.start,
        };

        let by_rows = request.major_dimension() == MajorDimension::Rows;
        let (mut rows, mut cols, mut count) = (0u32, 0u32, 0u32);

        for (outer, line) in (0u32..).zip(&request.body.values) {
            for (inner, value) in (0u32..).zip(line) {
                let (dr, dc) = if by_rows { (outer, inner) } else { (inner, outer) };
                set_cell(
                    &mut sheet.cells,
                    CellCoord::new(origin.row + dr, origin.col + dc),
                    value.clone(),
                );
                rows = rows.max(dr + 1);
                cols = cols.max(dc + 1);
                count += 1;
            }
        }

        self.updates
            .write()
            .await
            .push((spreadsheet_id.to_string(), request.clone()));

        Ok(UpdateResponse {
            spreadsheet_id: Some(spreadsheet_id.to_string()),
            updated_range: Some(request.range.clone()),
            updated_rows: rows,
            updated_columns: cols,
            updated_cells: count,
        })
    }
}
