//! Application layer - Use cases and orchestration

pub mod export;
pub mod store;

pub use export::{ExportState, EXPORT_FILE};
pub use store::{Clock, RecordStore, SystemClock};
