//! Session log: the append-only history of finished sessions.
//!
//! The whole history lives in one JSON file, `{"sessions": [...]}`, and is
//! rewritten on every append. An unreadable file is moved aside to a `.bak`
//! path and the log starts empty.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::LogError;
use crate::session::SessionKind;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionRecord {
    #[serde(alias = "date", deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Local>,
    #[serde(alias = "type")]
    pub kind: SessionKind,
    #[serde(rename = "durationMinutes", alias = "duration")]
    pub duration_minutes: f64,
    #[serde(default)]
    pub partial: bool,
}

impl SessionRecord {
    pub fn new(timestamp: DateTime<Local>, kind: SessionKind, minutes: f64) -> Self {
        let duration_minutes = (minutes * 100.0).round() / 100.0;
        Self {
            timestamp,
            kind,
            duration_minutes,
            partial: duration_minutes.fract() != 0.0,
        }
    }
}

// Older logs carry naive local timestamps without an offset.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Local>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(dt.with_timezone(&Local));
    }

    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

#[derive(Serialize, Deserialize, Default)]
struct LogFile {
    #[serde(default)]
    sessions: Vec<SessionRecord>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub work: u32,
    pub short_break: u32,
    pub long_break: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    Today,
    Week,
    Month,
    AllTime,
}

impl Period {
    pub const ALL: [Period; 4] = [Period::Today, Period::Week, Period::Month, Period::AllTime];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Week => "This Week",
            Self::Month => "This Month",
            Self::AllTime => "All Time",
        }
    }

    /// Local midnight at the start of the period containing `now`.
    pub fn start(&self, now: DateTime<Local>) -> Option<DateTime<Local>> {
        let today = now.date_naive();
        let first_day = match self {
            Self::Today => today,
            Self::Week => today - chrono::Duration::days(i64::from(today.weekday().num_days_from_monday())),
            Self::Month => today.with_day(1)?,
            Self::AllTime => return None,
        };

        first_valid(&Local, first_day.and_hms_opt(0, 0, 0)?)
    }
}

/// The first instant at or after `naive` that exists in `tz`. Some zones
/// skip midnight when daylight saving starts.
fn first_valid<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    (0..=4 * 24).find_map(|quarter| {
        tz.from_local_datetime(&(naive + chrono::Duration::minutes(15 * quarter)))
            .earliest()
    })
}

pub struct SessionLog {
    path: PathBuf,
    records: Vec<SessionRecord>,
    quarantined: Option<PathBuf>,
}

impl SessionLog {
    /// Loads the log at `path`. A missing file is an empty history; an
    /// unreadable one is renamed aside and replaced by an empty history.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LogError> {
        let path = path.into();
        let mut log = Self {
            path,
            records: Vec::new(),
            quarantined: None,
        };

        if !log.path.exists() {
            return Ok(log);
        }

        let parsed = fs::read_to_string(&log.path)
            .map_err(|e| e.to_string())
            .and_then(|s| serde_json::from_str::<LogFile>(&s).map_err(|e| e.to_string()));

        match parsed {
            Ok(file) => {
                tracing::debug!(path = %log.path.display(), records = file.sessions.len(), "session log loaded");
                log.records = file.sessions;
            }
            Err(reason) => {
                let backup = backup_path(&log.path);
                fs::rename(&log.path, &backup).map_err(|source| LogError::Quarantine {
                    path: log.path.clone(),
                    source,
                })?;
                tracing::warn!(
                    path = %log.path.display(),
                    backup = %backup.display(),
                    %reason,
                    "corrupted session log moved aside"
                );
                log.quarantined = Some(backup);
            }
        }

        Ok(log)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unreadable log was moved to during `open`, if that happened.
    pub fn quarantined(&self) -> Option<&Path> {
        self.quarantined.as_deref()
    }

    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    /// Appends a record stamped now and persists the full history before
    /// returning.
    pub fn record(&mut self, kind: SessionKind, minutes: f64) -> Result<&SessionRecord, LogError> {
        self.append(SessionRecord::new(Local::now(), kind, minutes))
    }

    fn append(&mut self, record: SessionRecord) -> Result<&SessionRecord, LogError> {
        self.records.push(record);

        if let Err(e) = self.save() {
            self.records.pop();
            return Err(e);
        }

        let last = self.records.len() - 1;
        let record = &self.records[last];
        tracing::info!(
            kind = record.kind.as_str(),
            minutes = record.duration_minutes,
            partial = record.partial,
            "session recorded"
        );
        Ok(record)
    }

    fn save(&self) -> Result<(), LogError> {
        let write_err = |source| LogError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(write_err)?;
        }

        let file = LogFile {
            sessions: self.records.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)
    }

    fn since(&self, start: Option<DateTime<Local>>) -> impl Iterator<Item = &SessionRecord> {
        self.records
            .iter()
            .filter(move |r| start.is_none_or(|s| r.timestamp >= s))
    }

    pub fn totals(&self, start: Option<DateTime<Local>>) -> Totals {
        self.since(start).fold(Totals::default(), |mut t, r| {
            match r.kind {
                SessionKind::Work => t.work += 1,
                SessionKind::ShortBreak => t.short_break += 1,
                SessionKind::LongBreak => t.long_break += 1,
            }
            t.total += 1;
            t
        })
    }

    pub fn work_minutes(&self, start: Option<DateTime<Local>>) -> f64 {
        let sum = self
            .since(start)
            .filter(|r| r.kind == SessionKind::Work)
            .map(|r| r.duration_minutes)
            .sum::<f64>();
        (sum * 100.0).round() / 100.0
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sessions.json".into());

    let plain = path.with_file_name(format!("{name}.bak"));
    if !plain.exists() {
        return plain;
    }
    path.with_file_name(format!("{name}.{}.bak", Local::now().format("%Y%m%d%H%M%S")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, LocalResult, NaiveDate, Timelike};
    use tempfile::TempDir;

    fn temp_log(dir: &TempDir) -> SessionLog {
        SessionLog::open(dir.path().join("sessions.json")).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn missing_file_is_empty_history() {
        let dir = TempDir::new().unwrap();
        let log = temp_log(&dir);
        assert!(log.records().is_empty());
        assert!(log.quarantined().is_none());
        assert_eq!(log.totals(None), Totals::default());
    }

    #[test]
    fn partial_flag_follows_fraction() {
        let now = Local::now();
        assert!(!SessionRecord::new(now, SessionKind::Work, 25.0).partial);
        assert!(!SessionRecord::new(now, SessionKind::Work, 2.0).partial);

        let partial = SessionRecord::new(now, SessionKind::Work, 1.5);
        assert!(partial.partial);
        assert_eq!(partial.duration_minutes, 1.5);

        let rounded = SessionRecord::new(now, SessionKind::ShortBreak, 7.0 / 3.0);
        assert_eq!(rounded.duration_minutes, 2.33);
    }

    #[test]
    fn round_trip_preserves_order() {
        let dir = TempDir::new().unwrap();
        let mut log = temp_log(&dir);
        log.record(SessionKind::Work, 25.0).unwrap();
        log.record(SessionKind::ShortBreak, 5.0).unwrap();
        log.record(SessionKind::Work, 12.5).unwrap();
        log.record(SessionKind::LongBreak, 15.0).unwrap();

        let reloaded = temp_log(&dir);
        assert_eq!(reloaded.records(), log.records());
        let kinds: Vec<_> = reloaded.records().iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            [SessionKind::Work, SessionKind::ShortBreak, SessionKind::Work, SessionKind::LongBreak]
        );
    }

    #[test]
    fn corrupted_file_is_quarantined() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sessions.json");
        fs::write(&path, "{ not json").unwrap();

        let mut log = SessionLog::open(&path).unwrap();
        assert!(log.records().is_empty());

        let backup = log.quarantined().unwrap().to_path_buf();
        assert_eq!(backup, dir.path().join("sessions.json.bak"));
        assert_eq!(fs::read_to_string(&backup).unwrap(), "{ not json");

        log.record(SessionKind::Work, 25.0).unwrap();
        assert_eq!(fs::read_to_string(&backup).unwrap(), "{ not json");
        assert_eq!(temp_log(&dir).records().len(), 1);
    }

    #[test]
    fn second_quarantine_keeps_first_backup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sessions.json");
        fs::write(dir.path().join("sessions.json.bak"), "first").unwrap();
        fs::write(&path, "second").unwrap();

        let log = SessionLog::open(&path).unwrap();
        let backup = log.quarantined().unwrap();
        assert_ne!(backup, dir.path().join("sessions.json.bak"));
        assert_eq!(fs::read_to_string(backup).unwrap(), "second");
        assert_eq!(fs::read_to_string(dir.path().join("sessions.json.bak")).unwrap(), "first");
    }

    #[test]
    fn reads_legacy_and_extra_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sessions.json");
        fs::write(
            &path,
            r#"{"sessions": [
                {"date": "2026-03-01T09:15:00.123456", "type": "work", "duration": 25, "partial": false},
                {"date": "2026-03-01T09:40:00", "type": "short_break", "duration": 1.5, "partial": true, "mood": "ok"},
                {"timestamp": "2026-03-01T10:00:00+00:00", "kind": "long_break", "durationMinutes": 15}
            ]}"#,
        )
        .unwrap();

        let log = SessionLog::open(&path).unwrap();
        assert!(log.quarantined().is_none());
        assert_eq!(log.records().len(), 3);
        assert_eq!(log.records()[1].duration_minutes, 1.5);
        assert!(log.records()[1].partial);
        assert!(!log.records()[2].partial);
        assert_eq!(log.work_minutes(None), 25.0);
    }

    #[test]
    fn write_failure_is_loud_and_not_kept() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        let mut log = SessionLog::open(blocker.join("sessions.json")).unwrap();
        let err = log.record(SessionKind::Work, 25.0).unwrap_err();
        assert!(matches!(err, LogError::Write { .. }));
        assert!(log.records().is_empty());
    }

    /// UTC, except that local 00:00-00:59 on 2026-03-29 never happens.
    #[derive(Debug, Clone, Copy)]
    struct MidnightGap;

    impl TimeZone for MidnightGap {
        type Offset = FixedOffset;

        fn from_offset(_: &FixedOffset) -> Self {
            MidnightGap
        }

        fn offset_from_local_date(&self, _: &NaiveDate) -> LocalResult<FixedOffset> {
            LocalResult::Single(utc())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let gap_day = NaiveDate::from_ymd_opt(2026, 3, 29).unwrap();
            if local.date() == gap_day && local.hour() == 0 {
                LocalResult::None
            } else {
                LocalResult::Single(utc())
            }
        }

        fn offset_from_utc_date(&self, _: &NaiveDate) -> FixedOffset {
            utc()
        }

        fn offset_from_utc_datetime(&self, _: &NaiveDateTime) -> FixedOffset {
            utc()
        }
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn day_without_midnight_starts_at_first_valid_time() {
        let midnight = NaiveDate::from_ymd_opt(2026, 3, 29).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let start = first_valid(&MidnightGap, midnight).unwrap();
        assert_eq!(start.naive_local(), midnight + Duration::hours(1));

        let normal = NaiveDate::from_ymd_opt(2026, 3, 30).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(first_valid(&MidnightGap, normal).unwrap().naive_local(), normal);
    }

    #[test]
    fn period_starts() {
        // Thursday
        let now = at(2026, 10, 15, 12, 0);
        assert_eq!(Period::Today.start(now), Some(at(2026, 10, 15, 0, 0)));
        assert_eq!(Period::Week.start(now), Some(at(2026, 10, 12, 0, 0)));
        assert_eq!(Period::Month.start(now), Some(at(2026, 10, 1, 0, 0)));
        assert_eq!(Period::AllTime.start(now), None);
    }

    #[test]
    fn totals_by_period() {
        let dir = TempDir::new().unwrap();
        let mut log = temp_log(&dir);
        let now = at(2026, 10, 15, 12, 0);

        for (when, kind) in [
            (at(2026, 9, 20, 9, 0), SessionKind::Work),
            (now - Duration::days(10), SessionKind::LongBreak),
            (now - Duration::days(2), SessionKind::Work),
            (now - Duration::hours(2), SessionKind::ShortBreak),
            (now - Duration::minutes(2), SessionKind::Work),
        ] {
            log.append(SessionRecord::new(when, kind, 25.0)).unwrap();
        }

        let totals = |p: Period| log.totals(p.start(now));

        assert_eq!(
            totals(Period::Today),
            Totals { work: 1, short_break: 1, long_break: 0, total: 2 }
        );
        assert_eq!(
            totals(Period::Week),
            Totals { work: 2, short_break: 1, long_break: 0, total: 3 }
        );
        assert_eq!(
            totals(Period::Month),
            Totals { work: 2, short_break: 1, long_break: 1, total: 4 }
        );
        assert_eq!(
            totals(Period::AllTime),
            Totals { work: 3, short_break: 1, long_break: 1, total: 5 }
        );
        assert_eq!(log.work_minutes(Period::Week.start(now)), 50.0);
    }
}
