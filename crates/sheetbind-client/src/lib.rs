pub mod client;
pub mod config;
pub mod error;
pub mod save;
pub mod transport;

pub use client::SpreadsheetClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ClientError, ClientResult, ErrorCategory};
pub use save::Save;
pub use transport::{
    HttpTransport, InMemoryTransport, SheetsTransport, SpreadsheetMetadata, UpdateResponse,
};
