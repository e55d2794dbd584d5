//! Day windows, buffered overlap checks and start-time candidates.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use super::PlacementRules;
use crate::schedule::clock::{at, snap_to_grid};
use crate::schedule::Event;

/// Placeable span for one weekday. Always ends on the following calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DayWindow {
    pub fn for_date(date: NaiveDate, rules: &PlacementRules) -> Self {
        Self {
            start: at(date, rules.window_start),
            end: at(date + Duration::days(1), rules.window_end),
        }
    }

    /// Whether `[start, start + duration)` lies inside the window.
    pub fn fits(&self, start: NaiveDateTime, duration: Duration) -> bool {
        self.start <= start && start + duration <= self.end
    }
}

/// Two half-open intervals overlap unless one entirely precedes the other.
pub fn overlaps(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> bool {
    !(a_end <= b_start || a_start >= b_end)
}

/// Check `[start, end)` against every placed event after widening the
/// candidate by `buffer_minutes` on both sides. Existing events are not widened.
pub fn can_place(events: &[Event], start: NaiveDateTime, end: NaiveDateTime, buffer_minutes: u32) -> bool {
    let buffer = Duration::minutes(i64::from(buffer_minutes));
    let s = start - buffer;
    let e = end + buffer;
    !events.iter().any(|ev| ev.overlaps(s, e))
}

/// Candidate start times for a task of `duration` on `date`, in trial order.
///
/// Preferred clock times come first; a clock time earlier than the window
/// start belongs to the next calendar day. A full grid scan of the window
/// follows. Duplicates keep their first position.
pub fn candidate_starts(date: NaiveDate, duration: Duration, rules: &PlacementRules) -> Vec<NaiveDateTime> {
    let window = DayWindow::for_date(date, rules);
    let grid = rules.slot_minutes;
    let mut candidates = Vec::new();

    for &t in &rules.preferred_start_times {
        let base_date = if t >= rules.window_start {
            date
        } else {
            date + Duration::days(1)
        };
        let start = snap_to_grid(at(base_date, t), grid);
        if window.fits(start, duration) {
            candidates.push(start);
        }
    }

    let step = Duration::minutes(i64::from(grid.max(1)));
    let mut cur = snap_to_grid(window.start, grid);
    while cur + duration <= window.end {
        candidates.push(cur);
        cur += step;
    }

    let mut seen = std::collections::HashSet::new();
    candidates.retain(|c| seen.insert(*c));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::clock::hm;
    use crate::schedule::EventKind;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 12).unwrap()
    }

    #[test]
    fn window_crosses_midnight() {
        let w = DayWindow::for_date(monday(), &PlacementRules::default());
        assert_eq!(w.start, monday().and_hms_opt(13, 0, 0).unwrap());
        assert_eq!(w.end, NaiveDate::from_ymd_opt(2026, 10, 13).unwrap().and_hms_opt(2, 0, 0).unwrap());
    }

    #[test]
    fn buffer_widens_candidate_only() {
        let d = monday();
        let events = vec![Event::new(
            "Beginner Class",
            d.and_hms_opt(17, 0, 0).unwrap(),
            d.and_hms_opt(18, 0, 0).unwrap(),
            "#a855f7",
            EventKind::Teaching,
        )];
        // Ends exactly 15 minutes before the class: buffer touches but does not overlap.
        assert!(can_place(&events, d.and_hms_opt(15, 45, 0).unwrap(), d.and_hms_opt(16, 45, 0).unwrap(), 15));
        // Ten minutes of clearance is not enough.
        assert!(!can_place(&events, d.and_hms_opt(15, 50, 0).unwrap(), d.and_hms_opt(16, 50, 0).unwrap(), 15));
        // Starting 15 minutes after the class ends is fine.
        assert!(can_place(&events, d.and_hms_opt(18, 15, 0).unwrap(), d.and_hms_opt(19, 0, 0).unwrap(), 15));
        assert!(!can_place(&events, d.and_hms_opt(18, 0, 0).unwrap(), d.and_hms_opt(19, 0, 0).unwrap(), 15));
    }

    #[test]
    fn preferred_times_lead_and_duplicates_are_removed() {
        let rules = PlacementRules::default();
        let candidates = candidate_starts(monday(), Duration::minutes(60), &rules);

        assert_eq!(candidates[0], monday().and_hms_opt(22, 0, 0).unwrap());
        assert_eq!(candidates[8], monday().and_hms_opt(21, 0, 0).unwrap());

        let unique: std::collections::HashSet<_> = candidates.iter().collect();
        assert_eq!(unique.len(), candidates.len());

        // 13:00 .. 01:00 next day inclusive, in quarter hours.
        assert_eq!(candidates.len(), 49);
        assert_eq!(*candidates.iter().max().unwrap(), monday().succ_opt().unwrap().and_hms_opt(1, 0, 0).unwrap());
    }

    #[test]
    fn early_preferred_times_roll_to_next_day() {
        let rules = PlacementRules {
            preferred_start_times: vec![hm(0, 30)],
            ..PlacementRules::default()
        };
        let candidates = candidate_starts(monday(), Duration::minutes(60), &rules);
        assert_eq!(candidates[0], monday().succ_opt().unwrap().and_hms_opt(0, 30, 0).unwrap());
        // Fallback scan follows from the window start.
        assert_eq!(candidates[1], monday().and_hms_opt(13, 0, 0).unwrap());
    }

    #[test]
    fn long_tasks_drop_late_preferred_times() {
        let rules = PlacementRules::default();
        let candidates = candidate_starts(monday(), Duration::minutes(180), &rules);
        // 23:15 + 3h = 02:15 next day, past the window end.
        assert!(!candidates.contains(&monday().and_hms_opt(23, 15, 0).unwrap()));
        assert!(candidates.contains(&monday().and_hms_opt(23, 0, 0).unwrap()));
    }
}
