use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("API request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("API returned {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Unexpected API payload: {message}")]
    UnexpectedPayload { message: String },

    #[error("Malformed record at index {index}: field '{field}' {reason}")]
    MalformedRecord {
        index: usize,
        field: String,
        reason: String,
    },

    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    DataFetch,
    MalformedRecord,
    Usage,
    Configuration,
    Output,
}

impl CatalogError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CatalogError::Fetch(_)
            | CatalogError::HttpStatus { .. }
            | CatalogError::UnexpectedPayload { .. } => ErrorCategory::DataFetch,
            CatalogError::MalformedRecord { .. } => ErrorCategory::MalformedRecord,
            CatalogError::InvalidState { .. } => ErrorCategory::Usage,
            CatalogError::ConfigError { .. }
            | CatalogError::InvalidConfigValueError { .. }
            | CatalogError::UrlError(_)
            | CatalogError::TomlError(_) => ErrorCategory::Configuration,
            CatalogError::IoError(_)
            | CatalogError::SerializationError(_)
            | CatalogError::CsvError(_) => ErrorCategory::Output,
        }
    }

    /// Network failures, non-2xx responses and non-array bodies.
    pub fn is_fetch_error(&self) -> bool {
        self.category() == ErrorCategory::DataFetch
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::DataFetch => "Loading failed, no results".to_string(),
            ErrorCategory::MalformedRecord => {
                format!("The search service returned an unexpected record: {}", self)
            }
            ErrorCategory::Usage => self.to_string(),
            ErrorCategory::Configuration => format!("Check your configuration: {}", self),
            ErrorCategory::Output => format!("Could not write results: {}", self),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::DataFetch => 2,
            ErrorCategory::MalformedRecord => 3,
            ErrorCategory::Usage | ErrorCategory::Configuration => 1,
            ErrorCategory::Output => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_errors_are_classified() {
        let err = CatalogError::HttpStatus {
            status: 502,
            url: "http://localhost/costco/search".to_string(),
        };
        assert!(err.is_fetch_error());
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.user_friendly_message(), "Loading failed, no results");
    }

    #[test]
    fn test_malformed_record_is_not_a_fetch_error() {
        let err = CatalogError::MalformedRecord {
            index: 4,
            field: "image".to_string(),
            reason: "is missing".to_string(),
        };
        assert!(!err.is_fetch_error());
        assert_eq!(err.category(), ErrorCategory::MalformedRecord);
        assert_eq!(
            err.to_string(),
            "Malformed record at index 4: field 'image' is missing"
        );
    }
}
