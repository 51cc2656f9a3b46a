use async_trait::async_trait;
use sheetbind_core::{Column, Row};

use crate::client::SpreadsheetClient;
use crate::error::ClientResult;
use crate::transport::UpdateResponse;

/// Write a binding's current state back to its range.
///
/// One request per call, never retried. On failure the binding is left as
/// it was so the caller can decide what to do.
#[async_trait]
pub trait Save {
    async fn save(&self, client: &SpreadsheetClient) -> ClientResult<UpdateResponse>;
}

#[async_trait]
impl Save for Row {
    async fn save(&self, client: &SpreadsheetClient) -> ClientResult<UpdateResponse> {
        client.save_row(self).await
    }
}

#[async_trait]
impl Save for Column {
    async fn save(&self, client: &SpreadsheetClient) -> ClientResult<UpdateResponse> {
        client.save_column(self).await
    }
}
