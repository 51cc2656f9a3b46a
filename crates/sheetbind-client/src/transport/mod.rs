//! The three calls the binding layer makes against the service

mod http;
mod memory;
pub mod models;

use async_trait::async_trait;
use sheetbind_core::{MajorDimension, UpdateRequest, ValueRange};

use crate::error::ClientResult;

pub use http::HttpTransport;
pub use memory::InMemoryTransport;
pub use models::{SpreadsheetMetadata, UpdateResponse};

/// Request/response access to the spreadsheet service.
///
/// Every method is exactly one round trip. Implementations must not retry;
/// errors go back to the caller as they are.
#[async_trait]
pub trait SheetsTransport: Send + Sync {
    /// Title and worksheet list of a spreadsheet
    async fn get_metadata(&self, spreadsheet_id: &str) -> ClientResult<SpreadsheetMetadata>;

    /// Values of one range in the given orientation
    async fn get_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        major_dimension: MajorDimension,
    ) -> ClientResult<ValueRange>;

    /// Overwrite one range with the request's values
    async fn update_values(
        &self,
        spreadsheet_id: &str,
        request: &UpdateRequest,
    ) -> ClientResult<UpdateResponse>;
}
