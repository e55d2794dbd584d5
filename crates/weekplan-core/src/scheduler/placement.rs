//! Greedy first-fit placement of task occurrences.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::debug;

use super::context::SchedulingContext;
use super::window::{can_place, candidate_starts};
use super::{PassMode, PlacementRules};
use crate::schedule::{Event, EventKind, TaskSpec};

/// Task-specific rules, checked before the buffer/overlap check.
pub fn passes_task_rules(spec: &TaskSpec, start: NaiveDateTime, end: NaiveDateTime, assigned: NaiveDate) -> bool {
    if let Some(cutoff) = spec.rules.end_by {
        if start.date() != end.date() || end.time() > cutoff {
            return false;
        }
    }
    if let Some(earliest) = spec.rules.start_not_before {
        if start.time() < earliest || start.date() != assigned {
            return false;
        }
    }
    true
}

/// Try to place one occurrence of `spec` on `weekday`.
///
/// Walks the candidate starts in order and accepts the first one that passes
/// the task rules and the buffered overlap check. Returns `false` without
/// touching the context when nothing fits.
pub fn try_place_task_on_day(
    ctx: &mut SchedulingContext,
    spec: &TaskSpec,
    weekday: u32,
    rules: &PlacementRules,
) -> bool {
    let date = ctx.date_of(weekday);
    let duration = Duration::minutes(spec.duration_minutes());

    for start in candidate_starts(date, duration, rules) {
        let end = start + duration;
        if !passes_task_rules(spec, start, end, date) {
            continue;
        }
        if can_place(&ctx.events, start, end, rules.buffer_minutes) {
            ctx.events
                .push(Event::new(spec.name.clone(), start, end, spec.color.clone(), EventKind::Task));
            return true;
        }
    }
    false
}

/// One pass over the preferred weekday order. Returns the weekday used.
pub fn place_occurrence(
    ctx: &mut SchedulingContext,
    spec: &TaskSpec,
    rules: &PlacementRules,
    mode: PassMode,
) -> Option<u32> {
    for &weekday in &rules.preferred_days {
        if !ctx.day_is_eligible(spec, weekday, rules.quota_for(weekday), mode) {
            continue;
        }
        if try_place_task_on_day(ctx, spec, weekday, rules) {
            ctx.record_placement(spec, weekday, mode);
            debug!(task = %spec.name, weekday, ?mode, "placed occurrence");
            return Some(weekday);
        }
    }
    None
}

/// Place every occurrence of `spec`, strict pass first, then relaxed.
/// Returns how many occurrences landed.
pub fn place_task(ctx: &mut SchedulingContext, spec: &TaskSpec, rules: &PlacementRules) -> u32 {
    let mut placed = 0;
    for occurrence in 0..spec.occurrences {
        let landed = place_occurrence(ctx, spec, rules, PassMode::Strict)
            .or_else(|| place_occurrence(ctx, spec, rules, PassMode::Relaxed));
        match landed {
            Some(_) => placed += 1,
            None => debug!(task = %spec.name, occurrence, "no feasible slot, occurrence dropped"),
        }
    }
    placed
}
