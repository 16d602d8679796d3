//! Output formatting utilities

use crate::domain::StreakSummary;
use chrono::NaiveDate;

/// Format the status screen
pub fn format_status(start_date: NaiveDate, summary: &StreakSummary) -> String {
    format!(
        "Start Date:     {}\n\
        Current Streak: {}\n\
        Longest Streak: {}\n\
        Total Days:     {}\n\
        Relapses:       {}\n",
        start_date.format("%b %-d, %Y"),
        days(summary.current_streak),
        days(summary.longest_streak),
        days(summary.total_days),
        summary.relapse_count
    )
}

/// Format config entries as `key = value` lines
pub fn format_config_list(entries: &[(&str, String)]) -> String {
    let mut output = String::new();
    for (key, value) in entries {
        output.push_str(&format!("{} = {}\n", key, value));
    }
    output
}

fn days(n: i64) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", n)
    }
}
