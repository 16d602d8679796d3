//! sobriety - Terminal sobriety tracker
//!
//! Records a sobriety start date and every relapse, derives current, longest
//! and total streak statistics, and exports a plain-text summary for sharing.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::SobrietyError;
