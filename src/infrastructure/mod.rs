//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod logging;
pub mod share;
pub mod storage;

pub use config::Config;
pub use logging::LoggingConfig;
pub use share::ShareSession;
pub use storage::{JsonFileStorage, RecordStorage};
