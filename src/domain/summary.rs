//! Streak summary captured at a single instant

use crate::domain::SobrietyRecord;
use chrono::{DateTime, TimeZone};

/// The derived statistics shown to the user and written to the export report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakSummary {
    pub current_streak: i64,
    pub longest_streak: i64,
    pub total_days: i64,
    pub relapse_count: usize,
}

impl StreakSummary {
    /// Compute every statistic against the same `now`
    pub fn at<Tz: TimeZone>(record: &SobrietyRecord, now: &DateTime<Tz>) -> Self {
        StreakSummary {
            current_streak: record.current_streak_days(now),
            longest_streak: record.longest_streak(now),
            total_days: record.total_days_since_start(now),
            relapse_count: record.relapse_count(),
        }
    }

    /// Render the plain-text export report
    pub fn render_report(&self) -> String {
        format!(
            "Sobriety Data:\n\
            ---------------------\n\
            Current Streak: {} days\n\
            Longest Streak: {} days\n\
            Total Days: {} days\n\
            Relapses: {}",
            self.current_streak, self.longest_streak, self.total_days, self.relapse_count
        )
    }
}
