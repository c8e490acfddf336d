//! Durable representation of [`ProgressState`] and the reminder timestamp.
//!
//! Both live in a [`KeyValueStore`] under fixed keys:
//!
//! - `pythonAIProgress` holds a JSON object
//!   `{"currentDay": 3, "completedDays": [1, 2], "startDate": "2026-01-05T09:30:00.000Z"}`.
//! - `lastReminder` holds epoch milliseconds as a decimal string.
//!
//! A record that exists but does not decode is logged and treated as absent,
//! so the session starts over from defaults instead of failing.

use crate::catalog::is_valid_day;
use crate::errors::{Result, TrackerError};
use crate::models::{ProgressRecord, ProgressState};
use crate::storage::KeyValueStore;
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::BTreeSet;
use tracing::warn;

pub const PROGRESS_KEY: &str = "pythonAIProgress";
pub const REMINDER_KEY: &str = "lastReminder";

pub struct ProgressStore<S> {
    kv: S,
}

impl<S: KeyValueStore> ProgressStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Reads the stored progress. `now` stands in for a missing start date.
    ///
    /// Returns `Ok(None)` when nothing is stored or the record is malformed;
    /// only storage failures are errors.
    pub fn load(&self, now: DateTime<Utc>) -> Result<Option<ProgressState>> {
        let Some(raw) = self.kv.get(PROGRESS_KEY)? else {
            return Ok(None);
        };
        match decode_progress(&raw, now) {
            Ok(state) => Ok(Some(state)),
            Err(err) => {
                warn!("ignoring stored progress: {err}");
                Ok(None)
            }
        }
    }

    pub fn save(&mut self, state: &ProgressState) -> Result<()> {
        let payload = encode_progress(state)?;
        self.kv.set(PROGRESS_KEY, &payload)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.kv.delete(PROGRESS_KEY)
    }

    /// When the daily reminder was last shown. Unparsable values count as never.
    pub fn last_reminder(&self) -> Result<Option<DateTime<Utc>>> {
        let Some(raw) = self.kv.get(REMINDER_KEY)? else {
            return Ok(None);
        };
        let parsed = raw
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis);
        if parsed.is_none() {
            warn!(value = %raw, "ignoring unparsable reminder timestamp");
        }
        Ok(parsed)
    }

    pub fn record_reminder(&mut self, at: DateTime<Utc>) -> Result<()> {
        self.kv.set(REMINDER_KEY, &at.timestamp_millis().to_string())
    }
}

pub fn encode_progress(state: &ProgressState) -> Result<String> {
    let record = ProgressRecord {
        current_day: Some(i64::from(state.current_day)),
        completed_days: Some(state.completed_days.iter().map(|day| i64::from(*day)).collect()),
        start_date: Some(state.start_date.to_rfc3339_opts(SecondsFormat::Millis, true)),
    };
    serde_json::to_string(&record).map_err(|err| TrackerError::malformed(PROGRESS_KEY, err))
}

/// Decodes a stored record, defaulting missing fields the way a first visit would.
pub fn decode_progress(raw: &str, now: DateTime<Utc>) -> Result<ProgressState> {
    let record: ProgressRecord =
        serde_json::from_str(raw).map_err(|err| TrackerError::malformed(PROGRESS_KEY, err))?;

    let current_day = match record.current_day {
        None => 1,
        Some(day) => checked_day(day)?,
    };

    let mut completed_days = BTreeSet::new();
    for day in record.completed_days.unwrap_or_default() {
        completed_days.insert(checked_day(day)?);
    }

    let start_date = match record.start_date {
        None => now,
        Some(text) => DateTime::parse_from_rfc3339(&text)
            .map_err(|err| TrackerError::malformed(PROGRESS_KEY, format!("startDate {text:?}: {err}")))?
            .with_timezone(&Utc),
    };

    Ok(ProgressState {
        current_day,
        completed_days,
        start_date,
    })
}

fn checked_day(day: i64) -> Result<u32> {
    u32::try_from(day)
        .ok()
        .filter(|day| is_valid_day(*day))
        .ok_or_else(|| TrackerError::malformed(PROGRESS_KEY, format!("day {day} out of range")))
}
