use thiserror::Error;

/// Errors raised by the binding layer before any request reaches the service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// Column index outside the addressable range (A..ZZZ)
    #[error("column index {index} is out of range (max {max})")]
    ColumnOutOfRange { index: u32, max: u32 },

    /// Column label that is not a valid letter sequence
    #[error("invalid column label: {0:?}")]
    InvalidColumnLabel(String),

    /// Row index that cannot be rendered as a 1-based row number
    #[error("row index {0} is out of range")]
    RowOutOfRange(u32),

    /// Worksheet title is empty, so no range can be built
    #[error("worksheet title is empty")]
    EmptySheetTitle,

    /// Range address that could not be parsed
    #[error("invalid range address: {0:?}")]
    InvalidRange(String),

    /// Key that matched no header (strict lookup policy only)
    #[error("no header matches key {0:?}")]
    LookupMiss(String),
}

/// Result type for binding operations
pub type BindResult<T> = Result<T, BindError>;
