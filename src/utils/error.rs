use crate::core::dialect::Dialect;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FitError {
    #[error("Malformed {dialect} header: {reason} (line: {line:?})")]
    MalformedHeaderError {
        dialect: Dialect,
        line: String,
        reason: String,
    },

    #[error("Malformed quantity {quantity:?} in line: {line:?}")]
    MalformedQuantityError { line: String, quantity: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[cfg(feature = "sqlite")]
    #[error("Catalog error: {0}")]
    CatalogError(#[from] rusqlite::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value:?} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Serialization,
    Catalog,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl FitError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FitError::MalformedHeaderError { .. }
            | FitError::MalformedQuantityError { .. }
            | FitError::ValidationError { .. } => ErrorCategory::Input,
            FitError::JsonError(_) | FitError::YamlError(_) => ErrorCategory::Serialization,
            #[cfg(feature = "sqlite")]
            FitError::CatalogError(_) => ErrorCategory::Catalog,
            FitError::ConfigError { .. }
            | FitError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            FitError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Serialization => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Catalog | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FitError::MalformedHeaderError { dialect, reason, .. } => {
                format!("The input is not a valid {} fit: {}", dialect, reason)
            }
            FitError::MalformedQuantityError { line, quantity } => {
                format!("Could not read the quantity {:?} on line {:?}", quantity, line)
            }
            FitError::JsonError(e) => format!("The JSON fit could not be read or written: {}", e),
            FitError::YamlError(e) => format!("The YAML fit could not be read or written: {}", e),
            #[cfg(feature = "sqlite")]
            FitError::CatalogError(e) => format!("The item catalog could not be opened: {}", e),
            FitError::IoError(e) => format!("File access failed: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FitError::MalformedHeaderError { dialect: Dialect::Eft, .. } => {
                "EFT fits must start with a header like [Ship, Fit Name]"
            }
            FitError::MalformedHeaderError { dialect: Dialect::Eft2, .. } => {
                "EFT2 fits must start with a header like # Ship, Fit Name"
            }
            FitError::MalformedQuantityError { .. } => {
                "Quantities must be whole numbers of at least 1 (x0 is rejected), e.g. 'Hobgoblin II x5'"
            }
            FitError::JsonError(_) | FitError::YamlError(_) => {
                "Check that the document has 'ship' and 'name' keys and valid item entries"
            }
            #[cfg(feature = "sqlite")]
            FitError::CatalogError(_) => "Check the catalog path and that it has a typeInfo table",
            FitError::IoError(_) => "Check that the file exists and is readable/writable",
            FitError::ConfigError { .. } | FitError::InvalidConfigValueError { .. } => {
                "Review the command line flags and config file"
            }
            FitError::ValidationError { .. } => "Fix the reported value and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, FitError>;
