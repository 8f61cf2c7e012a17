use thiserror::Error;

/// Failures surfaced to the API and CLI layers. Bad individual fields never
/// end up here; they are clamped or replaced by defaults instead.
#[derive(Error, Debug)]
pub enum AscendError {
    #[error("Player {0} not found")]
    PlayerNotFound(i64),

    #[error("No import data provided")]
    EmptyImport,

    #[error("Storage failure: {0:#}")]
    Storage(#[from] anyhow::Error),
}

pub type AscendResult<T> = Result<T, AscendError>;
