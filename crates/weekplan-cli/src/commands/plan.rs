//! Weekly plan commands for CLI.

use std::path::Path;

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use tracing::debug;
use weekplan_core::agenda::{render_week, start_of_week_monday};
use weekplan_core::{Planner, PlannerConfig, WeekPlan};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Generate the week and print the agenda
    Show {
        /// Any date in the target week (YYYY-MM-DD); defaults to this week
        #[arg(long)]
        week: Option<String>,
        /// Print events as JSON instead of the agenda
        #[arg(long)]
        json: bool,
        /// Skip manual pins and show the raw placement
        #[arg(long)]
        no_pins: bool,
    },
    /// Report tasks that could not reach their occurrence count
    Check {
        /// Any date in the target week (YYYY-MM-DD); defaults to this week
        #[arg(long)]
        week: Option<String>,
    },
}

fn parse_week(week: Option<&str>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    let date = match week {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| format!("invalid --week '{s}' (expected YYYY-MM-DD): {e}"))?,
        None => Local::now().date_naive(),
    };
    Ok(start_of_week_monday(date))
}

fn generate(
    config_path: Option<&Path>,
    week: Option<&str>,
    pins: bool,
) -> Result<(PlannerConfig, WeekPlan), Box<dyn std::error::Error>> {
    let path = PlannerConfig::path(config_path)?;
    let config = PlannerConfig::load_from(&path)?;
    let week_start = parse_week(week)?;
    debug!(path = %path.display(), %week_start, "generating plan");
    let planner = Planner::new(config)?;
    let plan = if pins {
        planner.generate(week_start)?
    } else {
        planner.generate_unpinned(week_start)?
    };
    Ok((planner.config().clone(), plan))
}

pub fn run(action: PlanAction, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PlanAction::Show { week, json, no_pins } => {
            let (config, plan) = generate(config_path, week.as_deref(), !no_pins)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print!("{}", render_week(&plan, &config.content));
            }
            for short in &plan.shortfalls {
                eprintln!(
                    "warning: placed {} of {} '{}'",
                    short.placed, short.requested, short.task
                );
            }
        }
        PlanAction::Check { week } => {
            let (_, plan) = generate(config_path, week.as_deref(), true)?;
            if plan.shortfalls.is_empty() {
                println!("all tasks placed for week of {}", plan.week_start);
            } else {
                for short in &plan.shortfalls {
                    println!("{}: {}/{} placed", short.task, short.placed, short.requested);
                }
                return Err(format!(
                    "{} task(s) short of their occurrence count for week of {}",
                    plan.shortfalls.len(),
                    plan.week_start
                )
                .into());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_is_normalized_to_monday() {
        let monday = NaiveDate::from_ymd_opt(2026, 10, 12).unwrap();
        assert_eq!(parse_week(Some("2026-10-15")).unwrap(), monday);
        assert_eq!(parse_week(Some("2026-10-12")).unwrap(), monday);
    }

    #[test]
    fn bad_week_is_rejected() {
        assert!(parse_week(Some("next week")).is_err());
    }
}
