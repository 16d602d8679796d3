//! Parsing of user-entered start dates

use crate::error::{Result, SobrietyError};
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};

/// A date typed by the user, resolved relative to today
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// Current day
    Today,
    /// Previous day
    Yesterday,
    /// A number of days before today
    DaysAgo(u32),
    /// A number of weeks before today
    WeeksAgo(u32),
    /// Previous occurrence of a weekday (strictly before today)
    LastWeekday(Weekday),
    /// Specific date
    SpecificDate(NaiveDate),
}

impl DateInput {
    /// Parse a date string
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase();

        match normalized.as_str() {
            "today" | "now" => Ok(DateInput::Today),
            "yesterday" => Ok(DateInput::Yesterday),
            _ if normalized.starts_with("last ") => parse_weekday(&normalized[5..])
                .map(DateInput::LastWeekday)
                .ok_or_else(|| SobrietyError::InvalidDate(input.to_string())),
            _ if normalized.ends_with(" ago") => Self::parse_ago(&normalized, input),
            _ => NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
                .or_else(|_| NaiveDate::parse_from_str(&normalized, "%d-%m-%Y"))
                .map(DateInput::SpecificDate)
                .map_err(|_| SobrietyError::InvalidDate(input.to_string())),
        }
    }

    /// Parse "N days ago" / "N weeks ago"
    fn parse_ago(normalized: &str, input: &str) -> Result<Self> {
        let parts: Vec<&str> = normalized.split_whitespace().collect();
        let invalid = || SobrietyError::InvalidDate(input.to_string());

        let [count, unit, "ago"] = parts.as_slice() else {
            return Err(invalid());
        };
        let count: u32 = count.parse().map_err(|_| invalid())?;

        match *unit {
            "day" | "days" => Ok(DateInput::DaysAgo(count)),
            "week" | "weeks" => Ok(DateInput::WeeksAgo(count)),
            _ => Err(invalid()),
        }
    }

    /// Resolve to a calendar date, rejecting anything after `today`
    pub fn resolve(&self, today: NaiveDate) -> Result<NaiveDate> {
        let date = match self {
            DateInput::Today => Some(today),
            DateInput::Yesterday => today.checked_sub_signed(Duration::days(1)),
            DateInput::DaysAgo(n) => today.checked_sub_signed(Duration::days(*n as i64)),
            DateInput::WeeksAgo(n) => today.checked_sub_signed(Duration::weeks(*n as i64)),
            DateInput::LastWeekday(target) => {
                let days = (today.weekday().num_days_from_monday() + 7
                    - target.num_days_from_monday())
                    % 7;
                let days_back = if days == 0 { 7 } else { days };
                today.checked_sub_signed(Duration::days(days_back as i64))
            }
            DateInput::SpecificDate(date) => Some(*date),
        };

        let date = date
            .ok_or_else(|| SobrietyError::InvalidDate(format!("{:?} is out of range", self)))?;

        if date > today {
            return Err(SobrietyError::InvalidDate(format!(
                "{} is after today",
                date.format("%Y-%m-%d")
            )));
        }

        Ok(date)
    }
}

/// The instant a calendar day begins in `tz`, as UTC
pub fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = date.and_time(chrono::NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        // Midnight skipped by a DST transition; fall back to UTC midnight
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

fn parse_weekday(day_str: &str) -> Option<Weekday> {
    match day_str {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}
