//! Plain-text weekly agenda.
//!
//! Renders a generated week day by day, followed by the content library.
//! Consumers that need another format should work from [`WeekPlan::events`]
//! directly; the list is already sorted.

use chrono::{Datelike, Duration, NaiveDate};
use std::fmt::Write;

use crate::schedule::clock::fmt_ampm;
use crate::schedule::{ContentCategory, Event};
use crate::scheduler::WeekPlan;

const MAX_LINE_CHARS: usize = 95;
const INDENT: &str = "  ";

/// Monday of the week containing `date`.
pub fn start_of_week_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Greedy word wrap at `max_chars`. Words longer than the limit get a line of their own.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut cur = String::new();
    for word in text.split_whitespace() {
        let extra = if cur.is_empty() { 0 } else { 1 };
        if cur.chars().count() + word.chars().count() + extra <= max_chars {
            if !cur.is_empty() {
                cur.push(' ');
            }
            cur.push_str(word);
        } else {
            if !cur.is_empty() {
                lines.push(std::mem::take(&mut cur));
            }
            cur.push_str(word);
        }
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    lines
}

/// One agenda bullet: `• 10:00 PM – 11:00 PM  |  My System [task]`.
pub fn format_event_line(event: &Event) -> String {
    format!(
        "• {} – {}  |  {} [{}]",
        fmt_ampm(event.start.time()),
        fmt_ampm(event.end.time()),
        event.name,
        event.kind
    )
}

fn push_wrapped(out: &mut String, text: &str) {
    // Short lines keep their spacing; wrapping collapses runs of whitespace.
    if text.chars().count() <= MAX_LINE_CHARS {
        let _ = writeln!(out, "{INDENT}{text}");
        return;
    }
    for line in wrap_text(text, MAX_LINE_CHARS) {
        let _ = writeln!(out, "{INDENT}{line}");
    }
}

/// Render the week's schedule section.
pub fn render_schedule(plan: &WeekPlan) -> String {
    let mut out = String::new();
    let week_end = plan.week_start + Duration::days(6);
    let _ = writeln!(
        out,
        "Weekly Schedule: {} (Mon) → {} (Sun)",
        plan.week_start.format("%b %d, %Y"),
        week_end.format("%b %d, %Y")
    );
    out.push('\n');
    out.push_str("Schedule\n");

    for weekday in 0..7u32 {
        let date = plan.week_start + Duration::days(i64::from(weekday));
        let _ = writeln!(out, "{} ({})", date.format("%A"), date.format("%b %d"));

        let mut day_events: Vec<&Event> = plan.events_on(weekday).collect();
        day_events.sort_by_key(|e| e.start);
        if day_events.is_empty() {
            push_wrapped(&mut out, "• (no events)");
        } else {
            for event in day_events {
                push_wrapped(&mut out, &format_event_line(event));
            }
        }
        out.push('\n');
    }
    out
}

/// Render the content library section.
pub fn render_content(library: &[ContentCategory]) -> String {
    let mut out = String::from("Content Library\n");
    for category in library {
        let _ = writeln!(out, "{}", category.name);
        if category.items.is_empty() {
            push_wrapped(&mut out, "• (empty)");
        } else {
            for item in &category.items {
                push_wrapped(&mut out, &format!("• {item}"));
            }
        }
        out.push('\n');
    }
    out
}

/// Full agenda: schedule followed by the content library.
pub fn render_week(plan: &WeekPlan, library: &[ContentCategory]) -> String {
    let mut out = render_schedule(plan);
    out.push_str(&render_content(library));
    out
}
