//! Sobriety record and streak statistics

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// The single tracked record: when the current attempt began and every relapse since.
///
/// Relapses are kept in insertion order; anything that depends on ordering sorts first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SobrietyRecord {
    pub start_date: DateTime<Utc>,
    pub relapses: Vec<DateTime<Utc>>,
}

impl SobrietyRecord {
    /// Create an empty record starting at `start_date`
    pub fn new(start_date: DateTime<Utc>) -> Self {
        SobrietyRecord {
            start_date,
            relapses: Vec::new(),
        }
    }

    pub fn with_relapses(start_date: DateTime<Utc>, relapses: Vec<DateTime<Utc>>) -> Self {
        SobrietyRecord {
            start_date,
            relapses,
        }
    }

    pub fn relapse_count(&self) -> usize {
        self.relapses.len()
    }

    /// Relapses in chronological order
    pub fn sorted_relapses(&self) -> Vec<DateTime<Utc>> {
        let mut sorted = self.relapses.clone();
        sorted.sort();
        sorted
    }

    /// Most recent boundary event: the latest relapse, or the start date when there are none
    pub fn last_event(&self) -> DateTime<Utc> {
        self.relapses.iter().max().copied().unwrap_or(self.start_date)
    }

    /// Whole days from the last boundary event to `now`
    pub fn current_streak_days<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> i64 {
        days_until(&self.last_event(), now)
    }

    /// Whole days from the start date to `now`
    pub fn total_days_since_start<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> i64 {
        days_until(&self.start_date, now)
    }

    /// Longest gap between consecutive boundary events, or the open streak if longer.
    ///
    /// Gaps are measured over `[start_date] + sorted(relapses)`; the open-ended
    /// streak since the last relapse is measured against `now` separately.
    pub fn longest_streak<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> i64 {
        let current = self.current_streak_days(now);
        if self.relapses.is_empty() {
            return current;
        }

        let tz = now.timezone();
        let mut boundaries = Vec::with_capacity(self.relapses.len() + 1);
        boundaries.push(self.start_date);
        boundaries.extend(self.sorted_relapses());

        let longest_gap = boundaries
            .windows(2)
            .map(|pair| days_between(&pair[0], &pair[1], &tz))
            .max()
            .unwrap_or(0);

        longest_gap.max(current)
    }
}

/// Whole days from `from` to `now`, measured on the wall clock of `now`'s zone.
///
/// Events after `now` count as zero days.
pub fn days_until<Tz: TimeZone>(from: &DateTime<Utc>, now: &DateTime<Tz>) -> i64 {
    let now_utc = now.with_timezone(&Utc);
    days_between(from, &now_utc, &now.timezone())
}

/// Whole days between two instants in `tz`, truncated and clamped at zero
fn days_between<Tz: TimeZone>(from: &DateTime<Utc>, to: &DateTime<Utc>, tz: &Tz) -> i64 {
    let from_local = from.with_timezone(tz).naive_local();
    let to_local = to.with_timezone(tz).naive_local();
    (to_local - from_local).num_days().max(0)
}
