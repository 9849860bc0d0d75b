//! # CLI Error Type

use cashdesk_core::CoreError;
use cashdesk_tender::TenderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("missing amount due")]
    MissingAmount,

    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    #[error("{0} expects a value")]
    MissingValue(String),

    #[error("view did not receive an event handle")]
    ViewNotRegistered,

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Tender(#[from] TenderError),

    #[error("failed to write outcome record: {0}")]
    Output(#[from] std::io::Error),

    #[error("failed to encode outcome record: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;
