//! Per-run scheduling state.

use std::collections::{BTreeSet, HashMap};

use chrono::{Duration, NaiveDate};

use super::PassMode;
use crate::schedule::clock::at;
use crate::schedule::{Event, EventKind, TaskSpec, TeachingTable};

/// Working event list plus the bookkeeping the day-level checks consult.
///
/// Created fresh for every planned week and passed by `&mut` into the
/// placement routines; nothing outlives one run.
#[derive(Debug, Clone)]
pub struct SchedulingContext {
    pub week_start: NaiveDate,
    /// Teaching blocks and accepted placements, in insertion order
    pub events: Vec<Event>,
    /// Weekdays already used, per task name
    pub used_days: HashMap<String, BTreeSet<u32>>,
    /// Task placements counted against each weekday's quota
    pub tasks_per_day: [u32; 7],
    /// Days used by tasks with a minimum day gap, in placement order
    pub spaced_days: HashMap<String, Vec<u32>>,
    /// Symmetric "never on the same weekday" pairs
    exclusions: HashMap<String, BTreeSet<String>>,
}

impl SchedulingContext {
    pub fn new(week_start: NaiveDate, tasks: &[TaskSpec]) -> Self {
        let mut exclusions: HashMap<String, BTreeSet<String>> = HashMap::new();
        for spec in tasks {
            for other in &spec.rules.exclusive_with {
                exclusions.entry(spec.name.clone()).or_default().insert(other.clone());
                exclusions.entry(other.clone()).or_default().insert(spec.name.clone());
            }
        }

        Self {
            week_start,
            events: Vec::new(),
            used_days: HashMap::new(),
            tasks_per_day: [0; 7],
            spaced_days: HashMap::new(),
            exclusions,
        }
    }

    /// Calendar date of a weekday in the planned week.
    pub fn date_of(&self, weekday: u32) -> NaiveDate {
        self.week_start + Duration::days(i64::from(weekday))
    }

    /// Materialize the teaching table as fixed events.
    pub fn seed_teaching(&mut self, teaching: &TeachingTable) {
        for (weekday, block) in teaching.iter() {
            let date = self.date_of(weekday);
            self.events.push(Event::new(
                block.name.clone(),
                at(date, block.start),
                at(date, block.end),
                block.color.clone(),
                EventKind::Teaching,
            ));
        }
    }

    pub fn has_used(&self, task: &str, weekday: u32) -> bool {
        self.used_days
            .get(task)
            .is_some_and(|days| days.contains(&weekday))
    }

    /// Whether a task excluded from sharing days with `task` already sits on `weekday`.
    pub fn excluded_by_partner(&self, task: &str, weekday: u32) -> bool {
        self.exclusions
            .get(task)
            .is_some_and(|partners| partners.iter().any(|p| self.has_used(p, weekday)))
    }

    /// Whether `weekday` is closer than `min_gap` to a day this task already used.
    pub fn too_close(&self, task: &str, weekday: u32, min_gap: u32) -> bool {
        self.spaced_days
            .get(task)
            .is_some_and(|days| days.iter().any(|&d| d.abs_diff(weekday) < min_gap))
    }

    /// Day-level checks, before any time-of-day search.
    pub fn day_is_eligible(&self, spec: &TaskSpec, weekday: u32, quota: u32, mode: PassMode) -> bool {
        if self.has_used(&spec.name, weekday) {
            return false;
        }
        if self.excluded_by_partner(&spec.name, weekday) {
            return false;
        }
        if mode.enforces_quota() && self.tasks_per_day[weekday as usize] >= quota {
            return false;
        }
        if let Some(gap) = spec.rules.min_day_gap {
            if self.too_close(&spec.name, weekday, gap) {
                return false;
            }
        }
        true
    }

    /// Book-keep an accepted placement. Only the strict pass counts against
    /// the day's quota.
    pub fn record_placement(&mut self, spec: &TaskSpec, weekday: u32, mode: PassMode) {
        self.used_days.entry(spec.name.clone()).or_default().insert(weekday);
        if mode.enforces_quota() {
            self.tasks_per_day[weekday as usize] += 1;
        }
        if spec.rules.min_day_gap.is_some() {
            self.spaced_days.entry(spec.name.clone()).or_default().push(weekday);
        }
    }

    /// Consume the context, returning events sorted by start time.
    pub fn into_sorted_events(self) -> Vec<Event> {
        let mut events = self.events;
        events.sort_by_key(|e| e.start);
        events
    }
}
