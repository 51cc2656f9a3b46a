pub mod cell;
pub mod column;
pub mod error;
pub mod grid;
pub mod header;
pub mod model;
pub mod range;
pub mod row;

pub use cell::CellContent;
pub use column::Column;
pub use error::{BindError, BindResult};
pub use grid::{
    column_from_grid, rows_from_grid, Grid, MajorDimension, UpdateRequest, ValueInputOption,
    ValueRange,
};
pub use header::{sanitize, HeaderMap, LookupPolicy};
pub use model::{Spreadsheet, Worksheet, WorksheetRef};
pub use range::{
    cell_address, col_from_label, col_to_label, quote_sheet_title, single_column_range,
    single_row_range, whole_sheet_range, CellCoord, CellRange, RangeAddress, MAX_COLUMNS,
};
pub use row::Row;
