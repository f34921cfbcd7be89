use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContactBookError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("File \"{path}\" was not found")]
    FileNotFound { path: String },

    #[error("Input stream closed while waiting for: {prompt}")]
    InputClosed { prompt: String },

    #[error("Contact #{id} no longer exists in the store")]
    ContactNotFound { id: u64 },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Input,
    Store,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ContactBookError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) | Self::FileNotFound { .. } => ErrorCategory::Io,
            Self::InputClosed { .. } => ErrorCategory::Input,
            Self::ContactNotFound { .. } => ErrorCategory::Store,
            Self::TomlError(_)
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 使用者關閉輸入視為正常結束
            Self::InputClosed { .. } => ErrorSeverity::Low,
            Self::FileNotFound { .. } | Self::ContactNotFound { .. } => ErrorSeverity::Medium,
            Self::TomlError(_)
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) => format!("A file operation failed: {}", e),
            Self::TomlError(_) => "The configuration file is not valid TOML".to_string(),
            Self::FileNotFound { path } => format!("File \"{}\" was not found!", path),
            Self::InputClosed { .. } => "Input was closed, leaving Contact Book".to_string(),
            Self::ContactNotFound { id } => format!("Contact #{} is no longer available", id),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting {}: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "Check that the file exists and that you have permission to access it",
            ErrorCategory::Input => "Run the program from an interactive terminal",
            ErrorCategory::Store => "Reload the contact list and try again",
            ErrorCategory::Configuration => "Review the command line flags and the TOML config file",
        }
    }
}

pub type Result<T> = std::result::Result<T, ContactBookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        let closed = ContactBookError::InputClosed {
            prompt: "Select an option: ".to_string(),
        };
        let io = ContactBookError::IoError(std::io::Error::other("disk gone"));

        assert_eq!(closed.severity(), ErrorSeverity::Low);
        assert_eq!(io.severity(), ErrorSeverity::Critical);
        assert!(closed.severity() < io.severity());
    }

    #[test]
    fn test_file_not_found_message() {
        let err = ContactBookError::FileNotFound {
            path: "contacts.txt".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Io);
        assert_eq!(err.user_friendly_message(), "File \"contacts.txt\" was not found!");
    }
}
