//! # Tender Error Types
//!
//! Only configuration loading can fail in this crate. The payment controller
//! itself never returns an error: malformed tendered text is shown as the
//! error marker and nothing more.

use cashdesk_core::CoreError;
use thiserror::Error;

/// Result type alias for tender operations.
pub type TenderResult<T> = Result<T, TenderError>;

#[derive(Debug, Error)]
pub enum TenderError {
    /// Configuration values are inconsistent.
    #[error("Invalid tender configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be read or parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Config file could not be written.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// Domain error from cashdesk-core.
    #[error(transparent)]
    Core(#[from] CoreError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for TenderError {
    fn from(err: std::io::Error) -> Self {
        TenderError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for TenderError {
    fn from(err: toml::de::Error) -> Self {
        TenderError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for TenderError {
    fn from(err: toml::ser::Error) -> Self {
        TenderError::ConfigSaveFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashdesk_core::Money;

    #[test]
    fn test_core_error_is_transparent() {
        let err: TenderError = CoreError::InvalidAmountDue {
            amount: Money::zero(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Invalid amount due: 0.00 (must be greater than zero)"
        );
    }

    #[test]
    fn test_io_error_maps_to_load_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: TenderError = io.into();
        assert!(matches!(err, TenderError::ConfigLoadFailed(_)));
    }

    #[test]
    fn test_toml_errors_map_to_load_and_save_failures() {
        let parse = toml::from_str::<toml::Table>("[display").unwrap_err();
        let err: TenderError = parse.into();
        assert!(matches!(err, TenderError::ConfigLoadFailed(_)));

        // A bare integer is not a TOML document
        let write = toml::to_string(&42).unwrap_err();
        let err: TenderError = write.into();
        assert!(matches!(err, TenderError::ConfigSaveFailed(_)));
        assert!(err.to_string().starts_with("Failed to save config: "));
    }
}
