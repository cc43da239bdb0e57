//! Domain error types.

/// A trade instruction failed one of the record invariants.
///
/// `field` names the first offending field in validation order.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid {field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// A date string could not be turned into a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateFormatError {
    #[error("date '{input}' is not in '<day> <Mon> <year>' form")]
    MissingSeparator { input: String },

    #[error("date '{input}' does not name a calendar day ({year}-{month}-{day})")]
    InvalidDate {
        input: String,
        year: i32,
        month: u32,
        day: u32,
    },
}

/// Top-level error type for settlr.
#[derive(Debug, thiserror::Error)]
pub enum SettlementError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    DateFormat(#[from] DateFormatError),

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("trade source error: {reason}")]
    TradeSource { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&SettlementError> for std::process::ExitCode {
    fn from(err: &SettlementError) -> Self {
        let code: u8 = match err {
            SettlementError::Io(_) => 1,
            SettlementError::ConfigParse { .. } | SettlementError::ConfigInvalid { .. } => 2,
            SettlementError::TradeSource { .. } => 3,
            SettlementError::Validation(_) => 4,
            SettlementError::DateFormat(_) => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display_names_field() {
        let err = ValidationError::new("units", "units must be positive");
        assert_eq!(err.to_string(), "invalid units: units must be positive");
    }

    #[test]
    fn date_format_error_display() {
        let err = DateFormatError::MissingSeparator {
            input: "3Mar2017".into(),
        };
        assert_eq!(
            err.to_string(),
            "date '3Mar2017' is not in '<day> <Mon> <year>' form"
        );
    }

    #[test]
    fn settlement_error_wraps_validation_transparently() {
        let err: SettlementError = ValidationError::new("currency", "bad").into();
        assert_eq!(err.to_string(), "invalid currency: bad");
    }
}
