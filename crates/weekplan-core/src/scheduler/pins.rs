//! Manual pins applied after generation.

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::schedule::clock::at;
use crate::schedule::{Event, ManualPin};

/// Relocate the first event matching each pin, then re-sort.
///
/// A pin matches an event with the pinned task name whose start falls on the
/// pinned weekday's date. The new slot is not checked against other events.
/// Pins without a match are no-ops.
pub fn apply_pins(events: &mut Vec<Event>, week_start: NaiveDate, pins: &[ManualPin]) {
    for pin in pins {
        let date = week_start + Duration::days(i64::from(pin.weekday));
        match events
            .iter_mut()
            .find(|ev| ev.name == pin.task && ev.start.date() == date)
        {
            Some(ev) => {
                debug!(task = %pin.task, from = %ev.start, "pinning event");
                ev.start = at(date, pin.start);
                ev.end = at(date, pin.end);
            }
            None => debug!(task = %pin.task, %date, "pin has no matching event"),
        }
    }
    events.sort_by_key(|e| e.start);
}
