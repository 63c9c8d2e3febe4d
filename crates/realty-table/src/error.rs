// Error types for table operations

use realty_client::ApiError;

use crate::row::RowId;

/// Errors that can occur during table operations
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Reordering is not enabled for this table")]
    ReorderDisabled,

    #[error("Row index {index} out of range for {len} rows")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Row {0} has no sort key")]
    MissingSortKey(RowId),

    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}
