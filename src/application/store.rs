//! Record store: owns the in-memory record and keeps it persisted

use crate::application::export::{self, ExportState};
use crate::domain::{SobrietyRecord, StreakSummary};
use crate::error::{Result, SobrietyError};
use crate::infrastructure::RecordStorage;
use chrono::{DateTime, Local, TimeZone, Utc};
use std::path::{Path, PathBuf};

/// Source of "now" for mutations and statistics
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

type Subscriber = Box<dyn FnMut(&SobrietyRecord)>;

/// Owns the single record, applies mutations and persists after each one.
///
/// The in-memory record is authoritative: a failed save is logged and the
/// store stays dirty until a later save succeeds.
pub struct RecordStore<S: RecordStorage, C: Clock = SystemClock> {
    storage: S,
    clock: C,
    record: SobrietyRecord,
    dirty: bool,
    quarantined: Option<PathBuf>,
    export: ExportState,
    subscribers: Vec<Subscriber>,
}

impl<S: RecordStorage, C: Clock> RecordStore<S, C> {
    /// Load the persisted record, starting fresh when it is missing or unreadable
    pub fn open(storage: S, clock: C) -> Self {
        let mut quarantined = None;

        let record = match storage.load() {
            Ok(Some(record)) => {
                tracing::debug!(relapses = record.relapse_count(), "loaded sobriety record");
                record
            }
            Ok(None) => {
                tracing::debug!("no saved sobriety record, starting fresh");
                SobrietyRecord::new(clock.now())
            }
            Err(SobrietyError::Decode(e)) => {
                tracing::error!(error = %e, "saved sobriety record is unreadable, starting fresh");
                match storage.quarantine(clock.now()) {
                    Ok(moved) => {
                        if let Some(path) = &moved {
                            tracing::warn!(path = %path.display(), "kept unreadable record for recovery");
                        }
                        quarantined = moved;
                    }
                    Err(e) => tracing::error!(error = %e, "failed to keep unreadable record"),
                }
                SobrietyRecord::new(clock.now())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load sobriety record, starting fresh");
                SobrietyRecord::new(clock.now())
            }
        };

        RecordStore {
            storage,
            clock,
            record,
            dirty: false,
            quarantined,
            export: ExportState::default(),
            subscribers: Vec::new(),
        }
    }

    pub fn record(&self) -> &SobrietyRecord {
        &self.record
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// True when the latest change has not reached durable storage
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Where an unreadable record was moved during `open`, if anywhere
    pub fn quarantined(&self) -> Option<&Path> {
        self.quarantined.as_deref()
    }

    /// Register a callback invoked with the new record after every mutation
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&SobrietyRecord) + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Record a relapse happening now
    pub fn log_relapse(&mut self) -> &SobrietyRecord {
        let now = self.clock.now();
        self.record.relapses.push(now);
        tracing::info!(at = %now, "logged relapse");
        self.commit()
    }

    /// Discard all history and start a new attempt now
    pub fn reset(&mut self) -> &SobrietyRecord {
        self.record = SobrietyRecord::new(self.clock.now());
        tracing::info!("reset sobriety record");
        self.commit()
    }

    /// Replace the start date of the current attempt
    pub fn update_start_date(&mut self, start_date: DateTime<Utc>) -> &SobrietyRecord {
        self.record.start_date = start_date;
        tracing::info!(start_date = %start_date, "updated start date");
        self.commit()
    }

    /// Persist the current record, clearing the dirty flag on success
    pub fn save(&mut self) -> Result<()> {
        match self.storage.save(&self.record) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                self.dirty = true;
                Err(e)
            }
        }
    }

    fn commit(&mut self) -> &SobrietyRecord {
        if let Err(e) = self.save() {
            tracing::error!(error = %e, "failed to save sobriety record");
        }

        for subscriber in &mut self.subscribers {
            subscriber(&self.record);
        }

        &self.record
    }

    /// Statistics as of the clock's now, on the local calendar
    pub fn summary(&self) -> StreakSummary {
        self.summary_at(&self.clock.now().with_timezone(&Local))
    }

    pub fn summary_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> StreakSummary {
        StreakSummary::at(&self.record, now)
    }

    /// Write the text report into `dir` and flag it as ready to share
    pub fn export_summary(&mut self, dir: &Path) -> Result<PathBuf> {
        match export::write_report(&self.summary(), dir) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "exported sobriety report");
                self.export = ExportState {
                    path: Some(path.clone()),
                    share_ready: true,
                };
                Ok(path)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to export sobriety report");
                Err(e)
            }
        }
    }

    pub fn export_state(&self) -> &ExportState {
        &self.export
    }

    /// Mark the pending export as handed off
    pub fn acknowledge_share(&mut self) {
        self.export.share_ready = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::JsonFileStorage;
    use chrono::Duration;
    use std::cell::{Cell, RefCell};
    use std::fs;
    use std::rc::Rc;
    use tempfile::TempDir;

    #[derive(Clone)]
    struct FixedClock(Rc<Cell<DateTime<Utc>>>);

    impl FixedClock {
        fn at(now: DateTime<Utc>) -> Self {
            FixedClock(Rc::new(Cell::new(now)))
        }

        fn advance(&self, by: Duration) {
            self.0.set(self.0.get() + by);
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0.get()
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 4, 12, 0, 0).unwrap()
    }

    fn open_in(temp: &TempDir, clock: FixedClock) -> RecordStore<JsonFileStorage, FixedClock> {
        let storage = JsonFileStorage::new(temp.path().join("sobriety_data.json"));
        RecordStore::open(storage, clock)
    }

    #[test]
    fn test_open_missing_file_starts_fresh() {
        let temp = TempDir::new().unwrap();
        let store = open_in(&temp, FixedClock::at(t0()));

        assert_eq!(store.record(), &SobrietyRecord::new(t0()));
        assert!(!store.is_dirty());
        assert!(store.quarantined().is_none());
        // Nothing is written until the first mutation
        assert!(!store.storage().path().exists());
    }

    #[test]
    fn test_mutations_persist() {
        let temp = TempDir::new().unwrap();
        let clock = FixedClock::at(t0());
        let mut store = open_in(&temp, clock.clone());

        clock.advance(Duration::days(3));
        store.log_relapse();
        clock.advance(Duration::days(2));
        store.update_start_date(t0() - Duration::days(10));

        let reopened = open_in(&temp, clock.clone());
        assert_eq!(reopened.record().start_date, t0() - Duration::days(10));
        assert_eq!(reopened.record().relapses, vec![t0() + Duration::days(3)]);
    }

    #[test]
    fn test_log_relapse_resets_current_streak() {
        let temp = TempDir::new().unwrap();
        let clock = FixedClock::at(t0());
        let mut store = open_in(&temp, clock.clone());

        clock.advance(Duration::days(12));
        assert_eq!(store.summary_at(&clock.now()).current_streak, 12);

        let record = store.log_relapse();
        assert_eq!(record.relapse_count(), 1);

        let summary = store.summary_at(&clock.now());
        assert_eq!(summary.current_streak, 0);
        assert_eq!(summary.longest_streak, 12);
        assert_eq!(summary.total_days, 12);
    }

    #[test]
    fn test_reset_starts_new_attempt_now() {
        let temp = TempDir::new().unwrap();
        let clock = FixedClock::at(t0());
        let mut store = open_in(&temp, clock.clone());
        store.log_relapse();

        clock.advance(Duration::days(30));
        let record = store.reset().clone();

        assert_eq!(record.relapse_count(), 0);
        assert_eq!(record.start_date, clock.now());
        assert_eq!(store.summary_at(&clock.now()).longest_streak, 0);
    }

    #[test]
    fn test_subscribers_see_each_change() {
        let temp = TempDir::new().unwrap();
        let mut store = open_in(&temp, FixedClock::at(t0()));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        store.subscribe(move |record| sink.borrow_mut().push(record.relapse_count()));

        store.log_relapse();
        store.log_relapse();
        store.reset();

        assert_eq!(*seen.borrow(), vec![1, 2, 0]);
    }

    #[test]
    fn test_corrupt_file_is_quarantined() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sobriety_data.json");
        fs::write(&path, "not json").unwrap();

        let store = open_in(&temp, FixedClock::at(t0()));

        assert_eq!(store.record(), &SobrietyRecord::new(t0()));
        let moved = store.quarantined().unwrap();
        assert_eq!(fs::read_to_string(moved).unwrap(), "not json");
        assert!(!path.exists());
    }

    #[test]
    fn test_non_utf8_file_is_quarantined_before_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sobriety_data.json");
        let garbage = [0xff, 0xfe, b'{'];
        fs::write(&path, garbage).unwrap();

        let mut store = open_in(&temp, FixedClock::at(t0()));
        let moved = store.quarantined().unwrap().to_path_buf();
        store.log_relapse();

        assert_eq!(fs::read(&moved).unwrap(), garbage);
        assert_eq!(store.record().relapse_count(), 1);
        assert!(path.is_file());
    }

    #[test]
    fn test_failed_save_keeps_memory_state() {
        let temp = TempDir::new().unwrap();
        // A directory where the data file should be makes every write fail
        let path = temp.path().join("sobriety_data.json");
        fs::create_dir(&path).unwrap();
        let storage = JsonFileStorage::new(path.clone());
        let mut store = RecordStore::open(storage, FixedClock::at(t0()));

        store.log_relapse();

        assert!(store.is_dirty());
        assert_eq!(store.record().relapse_count(), 1);

        fs::remove_dir(&path).unwrap();
        store.save().unwrap();
        assert!(!store.is_dirty());
        assert!(path.is_file());
    }

    #[test]
    fn test_export_sets_share_flag() {
        let temp = TempDir::new().unwrap();
        let mut store = open_in(&temp, FixedClock::at(t0()));
        assert_eq!(store.export_state(), &ExportState::default());

        let path = store.export_summary(&temp.path().join("out")).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Sobriety Data:\n---------------------\nCurrent Streak: 0 days\n\
            Longest Streak: 0 days\nTotal Days: 0 days\nRelapses: 0"
        );
        assert_eq!(store.export_state().path.as_deref(), Some(path.as_path()));
        assert!(store.export_state().share_ready);

        store.acknowledge_share();
        assert!(!store.export_state().share_ready);
        // Export never touches the record file
        assert!(!store.storage().path().exists());
    }

    #[test]
    fn test_failed_export_leaves_flag_unset() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();
        let mut store = open_in(&temp, FixedClock::at(t0()));

        assert!(store.export_summary(&blocker).is_err());
        assert_eq!(store.export_state(), &ExportState::default());
    }
}
