//! Fetching rows and columns from a spreadsheet and writing them back

use std::sync::Arc;

use sheetbind_core::{
    column_from_grid, rows_from_grid, single_column_range, whole_sheet_range, Column,
    LookupPolicy, MajorDimension, RangeAddress, Row, Spreadsheet, UpdateRequest,
    ValueInputOption, Worksheet, WorksheetRef,
};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::transport::{HttpTransport, SheetsTransport, UpdateResponse};

/// Handle on one remote spreadsheet.
///
/// Cloning is cheap and clones share the transport, so fetches can be
/// issued concurrently. Nothing is cached: every call is one round trip.
///
/// # Example
///
/// ```ignore
/// use sheetbind_client::{ClientConfig, Save, SpreadsheetClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = SpreadsheetClient::new(ClientConfig::from_env()?)?;
///
///     let mut rows = client.get_rows("Sheet3").await?;
///     let row = &mut rows[1];
///     let value = format!("{}Z", row.get_value("test111").unwrap_or_default());
///     row.set_value("test111", value)?;
///     row.save(&client).await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct SpreadsheetClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    spreadsheet_id: String,
    transport: Arc<dyn SheetsTransport>,
    value_input_option: ValueInputOption,
    lookup_policy: LookupPolicy,
}

impl SpreadsheetClient {
    /// Create a client that talks HTTP to the configured endpoint
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client over any transport
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn SheetsTransport>,
    ) -> ClientResult<Self> {
        let spreadsheet_id = config.spreadsheet_id.trim().to_string();
        if spreadsheet_id.is_empty() {
            return Err(ClientError::Configuration(
                "spreadsheet key not provided".to_string(),
            ));
        }

        Ok(Self {
            inner: Arc::new(ClientInner {
                spreadsheet_id,
                transport,
                value_input_option: config.value_input_option,
                lookup_policy: config.lookup_policy,
            }),
        })
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.inner.spreadsheet_id
    }

    pub fn value_input_option(&self) -> ValueInputOption {
        self.inner.value_input_option
    }

    /// Address of a worksheet in this spreadsheet
    pub fn sheet_ref(&self, title: &str) -> WorksheetRef {
        WorksheetRef::new(self.inner.spreadsheet_id.clone(), title)
    }

    /// Fetch the spreadsheet title and its worksheets
    pub async fn get_info(&self) -> ClientResult<Spreadsheet> {
        let id = self.spreadsheet_id();
        tracing::debug!(spreadsheet = id, "fetching spreadsheet metadata");

        let metadata = self
            .inner
            .transport
            .get_metadata(id)
            .await
            .inspect_err(|e| tracing::error!(spreadsheet = id, "get_info failed: {}", e))?;

        let spreadsheet = metadata.into_spreadsheet(id);
        tracing::debug!(
            spreadsheet = id,
            title = %spreadsheet.title,
            worksheets = spreadsheet.worksheets.len(),
            "loaded spreadsheet"
        );
        Ok(spreadsheet)
    }

    /// Fetch every row of a worksheet.
    ///
    /// The first grid line is the header and is also returned as row 0.
    /// Short rows are padded to the header's width.
    pub async fn get_rows(&self, title: &str) -> ClientResult<Vec<Row>> {
        let range = whole_sheet_range(title)?;
        let grid = self.fetch(&range, MajorDimension::Rows).await?;

        let sheet = self.sheet_ref(title);
        let rows: Vec<Row> = rows_from_grid(&sheet, grid)
            .into_iter()
            .map(|row| row.with_lookup_policy(self.inner.lookup_policy))
            .collect();

        tracing::debug!(range = %range, rows = rows.len(), "read rows");
        Ok(rows)
    }

    /// Fetch one column of a worksheet; its first entry becomes the header
    pub async fn get_column(&self, title: &str, col: u32) -> ClientResult<Column> {
        let range = single_column_range(title, col)?;
        let grid = self.fetch(&range, MajorDimension::Columns).await?;

        let column = column_from_grid(&self.sheet_ref(title), col, grid);
        tracing::debug!(range = %range, values = column.values().len(), "read column");
        Ok(column)
    }

    pub async fn get_worksheet_rows(&self, worksheet: &Worksheet) -> ClientResult<Vec<Row>> {
        self.get_rows(&worksheet.title).await
    }

    pub async fn get_worksheet_column(
        &self,
        worksheet: &Worksheet,
        col: u32,
    ) -> ClientResult<Column> {
        self.get_column(&worksheet.title, col).await
    }

    /// Overwrite the row's range with its current values
    pub async fn save_row(&self, row: &Row) -> ClientResult<UpdateResponse> {
        let request = row.update_request(self.inner.value_input_option)?;
        self.submit(&row.sheet().spreadsheet_id, request).await
    }

    /// Overwrite the column's range with its header and current values
    pub async fn save_column(&self, column: &Column) -> ClientResult<UpdateResponse> {
        let request = column.update_request(self.inner.value_input_option)?;
        self.submit(&column.sheet().spreadsheet_id, request).await
    }

    async fn fetch(
        &self,
        range: &str,
        major_dimension: MajorDimension,
    ) -> ClientResult<sheetbind_core::Grid> {
        let id = self.spreadsheet_id();
        tracing::debug!(
            spreadsheet = id,
            range = %range,
            dimension = major_dimension.as_str(),
            "fetching values"
        );

        let response = self
            .inner
            .transport
            .get_values(id, range, major_dimension)
            .await
            .inspect_err(|e| tracing::error!(range = %range, "get_values failed: {}", e))?;

        if let Some(Ok(RangeAddress::Cells { range: echoed, .. })) =
            response.range.as_deref().map(RangeAddress::parse)
        {
            tracing::trace!(
                rows = echoed.row_count(),
                cols = echoed.col_count(),
                "service returned bounded range"
            );
        }

        Ok(response.values)
    }

    async fn submit(
        &self,
        spreadsheet_id: &str,
        request: UpdateRequest,
    ) -> ClientResult<UpdateResponse> {
        let response = self
            .inner
            .transport
            .update_values(spreadsheet_id, &request)
            .await
            .inspect_err(|e| {
                tracing::error!(range = %request.range, "update_values failed: {}", e)
            })?;

        tracing::info!(
            range = %request.range,
            input = request.input_option.as_str(),
            cells = response.updated_cells,
            "saved"
        );
        Ok(response)
    }
}

impl std::fmt::Debug for SpreadsheetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpreadsheetClient")
            .field("spreadsheet_id", &self.inner.spreadsheet_id)
            .field("value_input_option", &self.inner.value_input_option)
            .field("lookup_policy", &self.inner.lookup_policy)
            .finish()
    }
}
