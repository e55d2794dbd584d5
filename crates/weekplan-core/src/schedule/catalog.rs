//! Built-in teaching table, task catalog, pins and content library.
//!
//! These are the defaults an empty configuration file resolves to.

use super::clock::hm;
use super::{ContentCategory, ManualPin, TaskRules, TaskSpec, TeachingBlock, TeachingTable};

pub const MY_SYSTEM: &str = "My System";
pub const OPENING_STUDY: &str = "Opening Study";
pub const ENDGAME_STUDY: &str = "Endgame Study";
pub const CHESSABLE: &str = "chessable/website tasks";
pub const GYM: &str = "Gym";

pub fn default_teaching_table() -> TeachingTable {
    TeachingTable {
        monday: vec![
            TeachingBlock::new("Beginner Class", hm(17, 0), hm(18, 0), "#a855f7"),
            TeachingBlock::new("Leo Mootoo", hm(18, 15), hm(19, 15), "#ef4444"),
        ],
        tuesday: vec![
            TeachingBlock::new("Pranava Classes", hm(13, 30), hm(17, 30), "#14b8a6"),
            TeachingBlock::new("Advanced Class", hm(18, 30), hm(19, 30), "#3b82f6"),
        ],
        wednesday: vec![TeachingBlock::new("Jaydon", hm(18, 30), hm(19, 30), "#f97316")],
        thursday: vec![TeachingBlock::new("Beginner Class", hm(17, 0), hm(18, 0), "#a855f7")],
        friday: vec![TeachingBlock::new("Leo Mootoo", hm(17, 0), hm(18, 0), "#ef4444")],
        saturday: Vec::new(),
        sunday: vec![TeachingBlock::new("Amrit", hm(19, 0), hm(20, 0), "#84cc16")],
    }
}

/// The default task catalog, in placement order.
pub fn default_task_catalog() -> Vec<TaskSpec> {
    vec![
        TaskSpec::new(MY_SYSTEM, 1.0, 2, "#8b5cf6"),
        TaskSpec::new("Calculation", 1.0, 4, "#f472b6"),
        TaskSpec::new(OPENING_STUDY, 1.0, 5, "#6366f1").with_rules(TaskRules {
            exclusive_with: vec![ENDGAME_STUDY.to_string()],
            ..TaskRules::default()
        }),
        TaskSpec::new("Middlegame Study", 1.5, 2, "#ec4899"),
        TaskSpec::new(ENDGAME_STUDY, 1.0, 2, "#22c55e").with_rules(TaskRules {
            exclusive_with: vec![OPENING_STUDY.to_string()],
            ..TaskRules::default()
        }),
        TaskSpec::new(CHESSABLE, 2.0, 2, "#0ea5e9").with_rules(TaskRules {
            start_not_before: Some(hm(21, 0)),
            ..TaskRules::default()
        }),
        TaskSpec::new("League Study", 2.0, 2, "#f59e0b"),
        TaskSpec::new(GYM, 0.75, 2, "#10b981").with_rules(TaskRules {
            end_by: Some(hm(21, 0)),
            min_day_gap: Some(2),
            ..TaskRules::default()
        }),
    ]
}

/// Monday's "My System" always sits at 1:00-2:00 PM.
pub fn default_pins() -> Vec<ManualPin> {
    vec![ManualPin {
        task: MY_SYSTEM.to_string(),
        weekday: 0,
        start: hm(13, 0),
        end: hm(14, 0),
    }]
}

pub fn default_content_library() -> Vec<ContentCategory> {
    let category = |name: &str, items: &[&str]| ContentCategory {
        name: name.to_string(),
        items: items.iter().map(|s| s.to_string()).collect(),
    };

    vec![
        category("Openings", &["Add opening resources here"]),
        category("Middlegames", &["Add middlegame resources here"]),
        category("Endgames", &["Add endgame resources here"]),
        category("Calculation", &["Add calculation resources here (Shanky, sheets, books)"]),
        category("Special topics", &["Add special topics here (prophylaxis, rook + knight)"]),
        category("Student material", &["Jaydon lesson notes"]),
        category("Workout content", &["Routine A (upper)", "Routine B (lower)"]),
        category("League content", &["Wave control notes", "VOD review checklist"]),
    ]
}
