//! Weekly task placement engine.
//!
//! Places a fixed catalog of recurring tasks around fixed teaching blocks:
//! - Teaching blocks are seeded first and never move
//! - Tasks are placed in catalog order, one occurrence at a time
//! - Each occurrence takes the first feasible weekday in preference order,
//!   and the first feasible start time on that day (greedy first-fit)
//! - A relaxed pass without per-day quotas follows a failed strict pass
//! - Occurrences that still do not fit are dropped and reported as shortfalls

mod context;
mod pins;
mod placement;
mod window;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, ValidationError};
use crate::schedule::clock::{self, hm};
use crate::schedule::{Event, TaskSpec, TeachingTable};
use crate::storage::PlannerConfig;

pub use context::SchedulingContext;
pub use pins::apply_pins;
pub use placement::{passes_task_rules, place_occurrence, place_task, try_place_task_on_day};
pub use window::{can_place, candidate_starts, overlaps, DayWindow};

/// Scalar placement constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRules {
    /// Minimum separation around a candidate (minutes)
    #[serde(default = "default_buffer_minutes")]
    pub buffer_minutes: u32,
    /// Start-time grid (minutes)
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,
    /// Clock time the day window opens
    #[serde(default = "default_window_start", with = "clock::hhmm")]
    pub window_start: NaiveTime,
    /// Clock time the window closes on the following calendar day
    #[serde(default = "default_window_end", with = "clock::hhmm")]
    pub window_end: NaiveTime,
    /// Max strict-pass task placements Monday through Friday
    #[serde(default = "default_weekday_quota")]
    pub weekday_quota: u32,
    /// Max strict-pass task placements Saturday and Sunday
    #[serde(default = "default_weekend_quota")]
    pub weekend_quota: u32,
    /// Weekday search order (0 = Monday ... 6 = Sunday)
    #[serde(default = "default_preferred_days")]
    pub preferred_days: Vec<u32>,
    /// Start times tried before the full window scan
    #[serde(default = "default_preferred_start_times", with = "clock::hhmm_list")]
    pub preferred_start_times: Vec<NaiveTime>,
}

fn default_buffer_minutes() -> u32 {
    15
}
fn default_slot_minutes() -> u32 {
    15
}
fn default_window_start() -> NaiveTime {
    hm(13, 0)
}
fn default_window_end() -> NaiveTime {
    hm(2, 0)
}
fn default_weekday_quota() -> u32 {
    3
}
fn default_weekend_quota() -> u32 {
    4
}
fn default_preferred_days() -> Vec<u32> {
    vec![0, 3, 2, 4, 5, 6, 1]
}
fn default_preferred_start_times() -> Vec<NaiveTime> {
    // Late evening first, then progressively earlier.
    [22, 23, 21, 20, 13, 14, 15, 16, 17, 18, 19]
        .into_iter()
        .flat_map(|h| [0, 15, 30, 45].into_iter().map(move |m| hm(h, m)))
        .collect()
}

impl Default for PlacementRules {
    fn default() -> Self {
        Self {
            buffer_minutes: default_buffer_minutes(),
            slot_minutes: default_slot_minutes(),
            window_start: default_window_start(),
            window_end: default_window_end(),
            weekday_quota: default_weekday_quota(),
            weekend_quota: default_weekend_quota(),
            preferred_days: default_preferred_days(),
            preferred_start_times: default_preferred_start_times(),
        }
    }
}

impl PlacementRules {
    /// Task quota for a weekday: weekend days get the larger allowance.
    pub fn quota_for(&self, weekday: u32) -> u32 {
        if weekday >= 5 {
            self.weekend_quota
        } else {
            self.weekday_quota
        }
    }
}

/// Which placement pass is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassMode {
    /// Per-day quotas enforced
    Strict,
    /// Quotas dropped so required counts can still be met
    Relaxed,
}

impl PassMode {
    pub fn enforces_quota(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// A task that landed fewer occurrences than requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    pub task: String,
    pub requested: u32,
    pub placed: u32,
}

/// One generated week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPlan {
    pub week_start: NaiveDate,
    /// Sorted ascending by start
    pub events: Vec<Event>,
    #[serde(default)]
    pub shortfalls: Vec<Shortfall>,
}

impl WeekPlan {
    /// Events whose start falls on the given weekday (0 = Monday).
    pub fn events_on(&self, weekday: u32) -> impl Iterator<Item = &Event> {
        let date = self.week_start + chrono::Duration::days(i64::from(weekday));
        self.events.iter().filter(move |e| e.start.date() == date)
    }
}

/// Seed teaching, place every task, and return the sorted events together
/// with any shortfalls. Pins are not applied.
pub fn plan_week(
    week_start: NaiveDate,
    teaching: &TeachingTable,
    tasks: &[TaskSpec],
    rules: &PlacementRules,
) -> (Vec<Event>, Vec<Shortfall>) {
    let mut ctx = SchedulingContext::new(week_start, tasks);
    ctx.seed_teaching(teaching);

    let mut shortfalls = Vec::new();
    for spec in tasks {
        let placed = place_task(&mut ctx, spec, rules);
        if placed < spec.occurrences {
            shortfalls.push(Shortfall {
                task: spec.name.clone(),
                requested: spec.occurrences,
                placed,
            });
        }
    }

    (ctx.into_sorted_events(), shortfalls)
}

/// Sorted events for the week, without pins.
pub fn build_events(
    week_start: NaiveDate,
    teaching: &TeachingTable,
    tasks: &[TaskSpec],
    rules: &PlacementRules,
) -> Vec<Event> {
    plan_week(week_start, teaching, tasks, rules).0
}

/// Validated planner over one configuration.
#[derive(Debug, Clone)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    /// Create a planner, rejecting malformed configuration up front.
    pub fn new(config: PlannerConfig) -> Result<Self> {
        validate(&config)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Generate the week starting at `week_start` and apply manual pins.
    pub fn generate(&self, week_start: NaiveDate) -> Result<WeekPlan> {
        let mut plan = self.generate_unpinned(week_start)?;
        apply_pins(&mut plan.events, week_start, &self.config.pins);
        Ok(plan)
    }

    /// Generate the week without applying manual pins.
    pub fn generate_unpinned(&self, week_start: NaiveDate) -> Result<WeekPlan> {
        if week_start.weekday() != Weekday::Mon {
            return Err(ValidationError::NotMonday(week_start).into());
        }

        let (events, shortfalls) = plan_week(
            week_start,
            &self.config.teaching,
            &self.config.tasks,
            &self.config.rules,
        );
        info!(
            %week_start,
            events = events.len(),
            shortfalls = shortfalls.len(),
            "generated week"
        );

        Ok(WeekPlan {
            week_start,
            events,
            shortfalls,
        })
    }
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        message: message.into(),
    }
}

/// Check a configuration before any scheduling happens.
pub fn validate(config: &PlannerConfig) -> Result<(), ValidationError> {
    let rules = &config.rules;
    if rules.slot_minutes == 0 {
        return Err(invalid("rules.slot_minutes", "must be positive"));
    }
    if let Some(&wd) = rules.preferred_days.iter().find(|&&wd| wd > 6) {
        return Err(ValidationError::WeekdayOutOfRange(wd));
    }

    for (_, block) in config.teaching.iter() {
        if block.start >= block.end {
            return Err(ValidationError::InvalidTimeRange {
                name: block.name.clone(),
                start: block.start,
                end: block.end,
            });
        }
    }

    // The window always closes on the calendar day after it opens.
    let window_minutes = (chrono::Duration::days(1) + (rules.window_end - rules.window_start)).num_minutes();

    for spec in &config.tasks {
        let field = format!("tasks.{}", spec.name);
        if !spec.duration_hours.is_finite() || spec.duration_minutes() <= 0 {
            return Err(invalid(field, "duration must be positive"));
        }
        if spec.duration_minutes() > window_minutes {
            return Err(invalid(
                field,
                format!("duration of {} minutes exceeds the {window_minutes}-minute day window", spec.duration_minutes()),
            ));
        }
        if spec.duration_minutes() % i64::from(rules.slot_minutes) != 0 {
            return Err(invalid(
                field,
                format!("duration of {} minutes is not on the {}-minute grid", spec.duration_minutes(), rules.slot_minutes),
            ));
        }
        if spec.occurrences == 0 {
            return Err(invalid(field, "occurrences must be at least 1"));
        }
    }

    for pin in &config.pins {
        if pin.weekday > 6 {
            return Err(ValidationError::WeekdayOutOfRange(pin.weekday));
        }
        if pin.start >= pin.end {
            return Err(ValidationError::InvalidTimeRange {
                name: pin.task.clone(),
                start: pin.start,
                end: pin.end,
            });
        }
    }

    Ok(())
}
