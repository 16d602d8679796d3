//! Domain layer - Records, statistics and date rules

pub mod date_input;
pub mod record;
pub mod summary;

pub use date_input::{start_of_day, DateInput};
pub use record::SobrietyRecord;
pub use summary::StreakSummary;
