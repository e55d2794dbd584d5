//! Schedule types: placed events, task specs, teaching blocks and pins.
//!
//! Everything here is plain data. The static tables (teaching blocks, task
//! catalog, pins, content library) come from configuration and are never
//! mutated while a week is being planned.

pub mod catalog;
pub mod clock;

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use catalog::{default_content_library, default_pins, default_task_catalog};

/// Kind of a placed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Fixed teaching commitment, seeded before placement
    Teaching,
    /// Auto-placed task occurrence
    Task,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Teaching => "teaching",
            Self::Task => "task",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled, time-bounded occupant of the calendar.
///
/// Timestamps are wall-clock local time without a timezone. `start < end`
/// always holds for events produced by the planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub color: String,
    pub kind: EventKind,
}

impl Event {
    pub fn new(
        name: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        color: impl Into<String>,
        kind: EventKind,
    ) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            color: color.into(),
            kind,
        }
    }

    /// Duration in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Half-open interval overlap test against `[start, end)`.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        crate::scheduler::overlaps(start, end, self.start, self.end)
    }
}

/// Extra per-task placement rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRules {
    /// The occurrence must end on its start's calendar day, no later than this clock time.
    #[serde(default, with = "clock::hhmm_opt", skip_serializing_if = "Option::is_none")]
    pub end_by: Option<NaiveTime>,
    /// The occurrence must start at or after this clock time, on its assigned day.
    #[serde(default, with = "clock::hhmm_opt", skip_serializing_if = "Option::is_none")]
    pub start_not_before: Option<NaiveTime>,
    /// Minimum weekday distance between any two days used by this task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_day_gap: Option<u32>,
    /// Tasks that may never share a weekday with this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusive_with: Vec<String>,
}

impl TaskRules {
    pub fn is_empty(&self) -> bool {
        self.end_by.is_none()
            && self.start_not_before.is_none()
            && self.min_day_gap.is_none()
            && self.exclusive_with.is_empty()
    }
}

/// Catalog entry describing a recurring task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub name: String,
    /// Fractional hours
    pub duration_hours: f64,
    /// Instances required this week
    pub occurrences: u32,
    pub color: String,
    #[serde(default, skip_serializing_if = "TaskRules::is_empty")]
    pub rules: TaskRules,
}

impl TaskSpec {
    pub fn new(name: impl Into<String>, duration_hours: f64, occurrences: u32, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration_hours,
            occurrences,
            color: color.into(),
            rules: TaskRules::default(),
        }
    }

    pub fn with_rules(mut self, rules: TaskRules) -> Self {
        self.rules = rules;
        self
    }

    /// Duration in whole minutes (truncated).
    pub fn duration_minutes(&self) -> i64 {
        (self.duration_hours * 60.0) as i64
    }
}

/// A fixed teaching commitment on one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeachingBlock {
    pub name: String,
    #[serde(with = "clock::hhmm")]
    pub start: NaiveTime,
    #[serde(with = "clock::hhmm")]
    pub end: NaiveTime,
    pub color: String,
}

impl TeachingBlock {
    pub fn new(name: impl Into<String>, start: NaiveTime, end: NaiveTime, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            color: color.into(),
        }
    }
}

/// Teaching blocks keyed by weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeachingTable {
    #[serde(default)]
    pub monday: Vec<TeachingBlock>,
    #[serde(default)]
    pub tuesday: Vec<TeachingBlock>,
    #[serde(default)]
    pub wednesday: Vec<TeachingBlock>,
    #[serde(default)]
    pub thursday: Vec<TeachingBlock>,
    #[serde(default)]
    pub friday: Vec<TeachingBlock>,
    #[serde(default)]
    pub saturday: Vec<TeachingBlock>,
    #[serde(default)]
    pub sunday: Vec<TeachingBlock>,
}

impl TeachingTable {
    /// A table with no teaching at all.
    pub fn empty() -> Self {
        Self {
            monday: Vec::new(),
            tuesday: Vec::new(),
            wednesday: Vec::new(),
            thursday: Vec::new(),
            friday: Vec::new(),
            saturday: Vec::new(),
            sunday: Vec::new(),
        }
    }

    /// Blocks for a weekday (0 = Monday ... 6 = Sunday).
    pub fn blocks(&self, weekday: u32) -> &[TeachingBlock] {
        match weekday {
            0 => &self.monday,
            1 => &self.tuesday,
            2 => &self.wednesday,
            3 => &self.thursday,
            4 => &self.friday,
            5 => &self.saturday,
            6 => &self.sunday,
            _ => &[],
        }
    }

    /// All `(weekday, block)` pairs in weekday order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &TeachingBlock)> {
        (0..7u32).flat_map(move |wd| self.blocks(wd).iter().map(move |b| (wd, b)))
    }
}

impl Default for TeachingTable {
    fn default() -> Self {
        catalog::default_teaching_table()
    }
}

/// A post-generation relocation of one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualPin {
    /// Name of the task event to move
    pub task: String,
    /// 0 = Monday ... 6 = Sunday
    pub weekday: u32,
    #[serde(with = "clock::hhmm")]
    pub start: NaiveTime,
    #[serde(with = "clock::hhmm")]
    pub end: NaiveTime,
}

/// One category of the static content library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentCategory {
    pub name: String,
    #[serde(default)]
    pub items: Vec<String>,
}
