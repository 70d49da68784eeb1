use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("File is empty")]
    EmptyFile,

    #[error("Please upload a CSV file")]
    UnsupportedFileType { file_name: String },

    #[error("{message}")]
    InvalidEmail { message: String },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("{sink} rejected submission: {message}")]
    SinkError { sink: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Storage,
    Configuration,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::EmptyFile
            | EtlError::UnsupportedFileType { .. }
            | EtlError::InvalidEmail { .. }
            | EtlError::CsvError(_)
            | EtlError::ValidationError { .. } => ErrorCategory::Input,
            EtlError::ApiError(_) | EtlError::SinkError { .. } => ErrorCategory::Network,
            EtlError::IoError(_) | EtlError::ZipError(_) => ErrorCategory::Storage,
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            EtlError::SerializationError(_) | EtlError::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Storage | ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// 給最終使用者看的訊息（不含內部細節）
    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::EmptyFile
            | EtlError::UnsupportedFileType { .. }
            | EtlError::InvalidEmail { .. } => self.to_string(),
            EtlError::CsvError(_) => "The uploaded file could not be read as CSV".to_string(),
            EtlError::ApiError(_) | EtlError::SinkError { .. } => {
                "Failed to submit form".to_string()
            }
            EtlError::IoError(e) => format!("File access failed: {}", e),
            EtlError::ZipError(_) => "Could not build the output archive".to_string(),
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => format!("Invalid configuration: {}", self),
            EtlError::SerializationError(_) | EtlError::ProcessingError { .. } => {
                "Error processing file".to_string()
            }
            EtlError::ValidationError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::EmptyFile => "Upload a CSV file whose first line is the header row",
            EtlError::UnsupportedFileType { .. } => "Export the prospect list as .csv and retry",
            EtlError::InvalidEmail { .. } => "Enter an address like name@example.com",
            EtlError::CsvError(_) => "Check the file for unbalanced quotes or retry without --strict",
            EtlError::ApiError(_) | EtlError::SinkError { .. } => {
                "Check network access and the sink credentials, then resubmit"
            }
            EtlError::IoError(_) => "Check that the path exists and is writable",
            EtlError::ZipError(_) => "Check free disk space in the output directory",
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => {
                "Fix the configuration file or command-line flags"
            }
            EtlError::SerializationError(_) | EtlError::ProcessingError { .. } => {
                "Re-run with --verbose and inspect the logs"
            }
            EtlError::ValidationError { .. } => "Correct the highlighted input and retry",
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
