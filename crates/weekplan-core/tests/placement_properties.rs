//! Property tests for the placement engine.

use std::collections::{BTreeSet, HashMap};

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use proptest::prelude::*;
use weekplan_core::scheduler::{overlaps, plan_week};
use weekplan_core::{EventKind, PlacementRules, TaskRules, TaskSpec, TeachingTable};

fn nine_pm() -> NaiveTime {
    NaiveTime::from_hms_opt(21, 0, 0).unwrap()
}

fn arb_monday() -> impl Strategy<Value = NaiveDate> {
    let base = NaiveDate::from_ymd_opt(2000, 1, 3).unwrap();
    (0i64..2000).prop_map(move |w| base + Duration::weeks(w))
}

fn arb_task(index: usize) -> impl Strategy<Value = TaskSpec> {
    (1u32..=12, 1u32..=6, 0u8..3).prop_map(move |(quarters, occurrences, flavor)| {
        let rules = match flavor {
            1 => TaskRules {
                end_by: Some(nine_pm()),
                min_day_gap: Some(2),
                ..TaskRules::default()
            },
            2 => TaskRules {
                start_not_before: Some(nine_pm()),
                ..TaskRules::default()
            },
            _ => TaskRules::default(),
        };
        TaskSpec::new(format!("Task {index}"), f64::from(quarters) / 4.0, occurrences, "#000").with_rules(rules)
    })
}

fn arb_catalog() -> impl Strategy<Value = Vec<TaskSpec>> {
    (0usize..7, 1u32..=5, 1u32..=5).prop_flat_map(|(n, opening, endgame)| {
        let tasks: Vec<_> = (0..n).map(arb_task).collect();
        tasks.prop_map(move |mut tasks| {
            tasks.push(TaskSpec::new("Opening", 1.0, opening, "#6366f1").with_rules(TaskRules {
                exclusive_with: vec!["Endgame".into()],
                ..TaskRules::default()
            }));
            tasks.push(TaskSpec::new("Endgame", 1.0, endgame, "#22c55e"));
            tasks
        })
    })
}

fn assigned_weekday(start: chrono::NaiveDateTime, week_start: NaiveDate, window_start: NaiveTime) -> i64 {
    let day = (start.date() - week_start).num_days();
    if start.time() < window_start {
        day - 1
    } else {
        day
    }
}

proptest! {
    #[test]
    fn placed_weeks_satisfy_every_rule(week_start in arb_monday(), tasks in arb_catalog()) {
        prop_assume!(week_start.weekday() == Weekday::Mon);
        let rules = PlacementRules::default();
        let (events, shortfalls) = plan_week(week_start, &TeachingTable::default(), &tasks, &rules);
        let buffer = Duration::minutes(i64::from(rules.buffer_minutes));

        prop_assert!(events.windows(2).all(|w| w[0].start <= w[1].start));

        for (i, a) in events.iter().enumerate() {
            prop_assert!(a.start < a.end);
            for b in events.iter().skip(i + 1) {
                if a.kind == EventKind::Teaching && b.kind == EventKind::Teaching {
                    continue;
                }
                prop_assert!(!overlaps(a.start - buffer, a.end + buffer, b.start, b.end));
            }
        }

        let specs: HashMap<&str, &TaskSpec> = tasks.iter().map(|t| (t.name.as_str(), t)).collect();
        let mut days: HashMap<&str, Vec<i64>> = HashMap::new();
        for e in events.iter().filter(|e| e.kind == EventKind::Task) {
            let spec = specs[e.name.as_str()];
            let weekday = assigned_weekday(e.start, week_start, rules.window_start);
            prop_assert!((0..7).contains(&weekday));
            days.entry(e.name.as_str()).or_default().push(weekday);

            if let Some(cutoff) = spec.rules.end_by {
                prop_assert_eq!(e.start.date(), e.end.date());
                prop_assert!(e.end.time() <= cutoff);
            }
            if let Some(earliest) = spec.rules.start_not_before {
                prop_assert!(e.start.time() >= earliest);
                prop_assert_eq!((e.start.date() - week_start).num_days(), weekday);
            }
        }

        for (name, list) in &days {
            let unique: BTreeSet<_> = list.iter().collect();
            prop_assert_eq!(unique.len(), list.len());
            if let Some(gap) = specs[name].rules.min_day_gap {
                for (i, a) in list.iter().enumerate() {
                    for b in list.iter().skip(i + 1) {
                        prop_assert!((a - b).unsigned_abs() >= u64::from(gap));
                    }
                }
            }
        }

        let opening: BTreeSet<_> = days.get("Opening").cloned().unwrap_or_default().into_iter().collect();
        let endgame: BTreeSet<_> = days.get("Endgame").cloned().unwrap_or_default().into_iter().collect();
        prop_assert!(opening.is_disjoint(&endgame));

        // Placed counts and shortfalls agree with the catalog.
        for spec in &tasks {
            let placed = days.get(spec.name.as_str()).map_or(0, |d| d.len()) as u32;
            prop_assert!(placed <= spec.occurrences);
            let short = shortfalls.iter().find(|s| s.task == spec.name);
            match short {
                Some(s) => {
                    prop_assert_eq!(s.placed, placed);
                    prop_assert!(placed < spec.occurrences);
                }
                None => prop_assert_eq!(placed, spec.occurrences),
            }
        }
    }

    #[test]
    fn generation_is_deterministic(week_start in arb_monday(), tasks in arb_catalog()) {
        let rules = PlacementRules::default();
        let first = plan_week(week_start, &TeachingTable::default(), &tasks, &rules);
        let second = plan_week(week_start, &TeachingTable::default(), &tasks, &rules);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn layout_does_not_depend_on_the_week(a in arb_monday(), b in arb_monday(), tasks in arb_catalog()) {
        let rules = PlacementRules::default();
        let (first, _) = plan_week(a, &TeachingTable::default(), &tasks, &rules);
        let (second, _) = plan_week(b, &TeachingTable::default(), &tasks, &rules);
        let shift = b - a;
        prop_assert_eq!(first.len(), second.len());
        for (x, y) in first.iter().zip(&second) {
            prop_assert_eq!(&x.name, &y.name);
            prop_assert_eq!(x.start + shift, y.start);
            prop_assert_eq!(x.end + shift, y.end);
        }
    }
}
