//! Error types for sobriety

use thiserror::Error;

/// Main error type for sobriety application
#[derive(Debug, Error)]
pub enum SobrietyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Sobriety data format error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Share error: {0}")]
    Share(String),

    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),
}

impl SobrietyError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SobrietyError::Config(_) => 2,
            SobrietyError::InvalidDate(_) => 3,
            SobrietyError::ConfirmationRequired(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            SobrietyError::InvalidDate(input) => {
                format!(
                    "Invalid date: '{}'\n\n\
                    Valid dates:\n\
                    • today, yesterday\n\
                    • 3 days ago, 2 weeks ago\n\
                    • Specific dates: YYYY-MM-DD or DD-MM-YYYY\n\
                    • The start date cannot be in the future\n\n\
                    Examples:\n\
                    sobriety start-date yesterday\n\
                    sobriety start-date 2025-03-04",
                    input
                )
            }
            SobrietyError::ConfirmationRequired(action) => {
                format!(
                    "Refusing to {} without confirmation.\n\n\
                    Re-run the command with --yes to confirm.",
                    action
                )
            }
            SobrietyError::Share(msg) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check that the share command is installed and in PATH\n\
                    • Configure it: sobriety config share_command 'xdg-open'\n\
                    • The exported file is still available at the printed path",
                    msg
                )
            }
            SobrietyError::Config(msg) => {
                if msg.contains("Unknown config key") {
                    format!(
                        "{}\n\n\
                        Example: sobriety config export_dir /tmp",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using SobrietyError
pub type Result<T> = std::result::Result<T, SobrietyError>;
