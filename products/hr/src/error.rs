use std::path::PathBuf;

use thiserror::Error;

use crate::employee::EmployeeField;

pub type HrResult<T> = Result<T, HrError>;

#[derive(Debug, Error)]
pub enum HrError {
    #[error("no employee is being edited")]
    NotEditing,
    #[error("invalid sort direction {0:?}, expected \"asc\" or \"desc\"")]
    InvalidSortDirection(String),
    #[error("unknown employee field {0:?}")]
    UnknownField(String),
    #[error("invalid entries limit {0:?}")]
    InvalidEntriesLimit(String),
    #[error("invalid employee form: {}", field_list(.0))]
    InvalidForm(Vec<EmployeeField>),
    #[error("failed to load reference data from {path}")]
    ReferenceData {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("failed to encode snapshot")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] platform_storage::StorageError),
}

fn field_list(fields: &[EmployeeField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl HrError {
    /// Machine-readable code, mirroring the suite's API error codes.
    pub fn code(&self) -> &'static str {
        match self {
            HrError::NotEditing => "NOT_EDITING",
            HrError::InvalidSortDirection(_) => "INVALID_SORT_DIRECTION",
            HrError::UnknownField(_) => "UNKNOWN_FIELD",
            HrError::InvalidEntriesLimit(_) => "INVALID_ENTRIES_LIMIT",
            HrError::InvalidForm(_) => "INVALID_INPUT",
            HrError::ReferenceData { .. } => "REFERENCE_DATA",
            HrError::Encode(_) | HrError::Storage(_) => "STORAGE",
        }
    }
}
