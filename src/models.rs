use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The learner's progress through the plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressState {
    pub current_day: u32,
    pub completed_days: BTreeSet<u32>,
    pub start_date: DateTime<Utc>,
}

impl ProgressState {
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            current_day: 1,
            completed_days: BTreeSet::new(),
            start_date: now,
        }
    }

    pub fn is_completed(&self, day: u32) -> bool {
        self.completed_days.contains(&day)
    }

    pub fn is_current(&self, day: u32) -> bool {
        self.current_day == day
    }
}

/// Stored layout of the progress record. Fields are optional on read so that
/// partially written records fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_day: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_days: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicVariant {
    Plain,
    Completed,
    Current,
}

impl TopicVariant {
    /// Completed wins over current when both apply.
    pub fn for_day(state: &ProgressState, day: u32) -> Self {
        if state.is_completed(day) {
            TopicVariant::Completed
        } else if state.is_current(day) {
            TopicVariant::Current
        } else {
            TopicVariant::Plain
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            TopicVariant::Plain => "topic",
            TopicVariant::Completed => "topic completed",
            TopicVariant::Current => "topic current",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicView {
    pub day: u32,
    pub title: String,
    pub completed: bool,
    pub current: bool,
    pub variant: TopicVariant,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatsResponse {
    pub days_completed: u32,
    pub total_days: u32,
    pub days_elapsed: i64,
    pub progress_percentage: f64,
    pub progress_rounded: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub current_day: u32,
    pub completed_days: Vec<u32>,
    pub start_date: String,
    pub stats: StatsResponse,
    pub quote: String,
    pub reminder_due: bool,
    pub persistence_degraded: bool,
    pub topics: Vec<TopicView>,
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub confirm: bool,
}
