//! Logging initialization

use tracing_subscriber::{fmt, EnvFilter};

/// Logging settings resolved from config and command-line flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    pub fn new(level: impl Into<String>, format: impl Into<String>) -> Self {
        LoggingConfig {
            level: level.into(),
            format: format.into(),
        }
    }

    /// Raise the level to debug when verbose output was requested
    pub fn verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.level = "debug".to_string();
        }
        self
    }

    /// Install the global subscriber; RUST_LOG overrides the configured level.
    ///
    /// Output goes to stderr so command output on stdout stays clean.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        let result = match self.format.as_str() {
            "json" => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            _ => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
        };

        if let Err(e) = result {
            eprintln!("Failed to initialize logging: {}", e);
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig::new("warn", "pretty")
    }
}
