use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use sheetbind_core::{MajorDimension, UpdateRequest, ValueRange};
use url::Url;

use super::models::{ApiErrorBody, SpreadsheetMetadata, UpdateResponse};
use super::SheetsTransport;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

const METADATA_FIELDS: &str = "spreadsheetId,spreadsheetUrl,properties.title,sheets.properties";

/// `SheetsTransport` over the service's REST endpoints
#[derive(Clone)]
pub struct HttpTransport {
    inner: Arc<HttpTransportInner>,
}

struct HttpTransportInner {
    client: reqwest::Client,
    base_url: Url,
    access_token: Option<String>,
}

impl HttpTransport {
    /// Create a transport from the client configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ClientError::Configuration(format!("invalid base URL {:?}: {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Configuration(format!(
                "base URL {:?} cannot carry a path",
                config.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ClientError::Configuration(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            inner: Arc::new(HttpTransportInner {
                client,
                base_url,
                access_token: config.access_token.clone(),
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    /// Base URL plus path segments; each segment is percent-encoded whole,
    /// so a range like `'My Sheet'!A:A` stays one segment
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Configuration("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> ClientResult<T> {
        let request = match &self.inner.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn api_error(status: StatusCode, body: &str) -> ClientError {
    let message = match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if !parsed.error.status.is_empty() => {
            format!("{} ({})", parsed.error.message, parsed.error.status)
        }
        Ok(parsed) => parsed.error.message,
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };

    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl SheetsTransport for HttpTransport {
    async fn get_metadata(&self, spreadsheet_id: &str) -> ClientResult<SpreadsheetMetadata> {
        let url = self.endpoint(&["spreadsheets", spreadsheet_id])?;
        let request = self
            .inner
            .client
            .get(url)
            .query(&[("fields", METADATA_FIELDS)]);
        self.send(request).await
    }

    async fn get_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        major_dimension: MajorDimension,
    ) -> ClientResult<ValueRange> {
        let url = self.endpoint(&["spreadsheets", spreadsheet_id, "values", range])?;
        let request = self
            .inner
            .client
            .get(url)
            .query(&[("majorDimension", major_dimension.as_str())]);
        self.send(request).await
    }

    async fn update_values(
        &self,
        spreadsheet_id: &str,
        request: &UpdateRequest,
    ) -> ClientResult<UpdateResponse> {
        let url = self.endpoint(&["spreadsheets", spreadsheet_id, "values", &request.range])?;
        let builder = self
            .inner
            .client
            .put(url)
            .query(&[("valueInputOption", request.input_option.as_str())])
            .json(&request.body);
        self.send(builder).await
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.inner.base_url.as_str())
            .field("authenticated", &self.inner.access_token.is_some())
            .finish()
    }
}
