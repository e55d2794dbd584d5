//! # Weekplan Core Library
//!
//! This library provides the core logic for Weekplan, a personal weekly
//! planner that fits recurring study and gym tasks around fixed teaching
//! commitments. All operations are available via the standalone CLI binary,
//! which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Scheduler**: Greedy placement engine. Seeds teaching blocks, then places
//!   each task occurrence on the first feasible weekday and start time
//! - **Schedule**: Plain data types (events, task specs, teaching table, pins)
//!   and the built-in catalog
//! - **Storage**: TOML-based configuration
//! - **Agenda**: Plain-text rendering of a generated week
//!
//! ## Key Components
//!
//! - [`Planner`]: Validated entry point producing a [`WeekPlan`]
//! - [`PlannerConfig`]: Engine inputs, loaded from TOML
//! - [`Event`]: A placed calendar occupant

pub mod agenda;
pub mod error;
pub mod schedule;
pub mod scheduler;
pub mod storage;

pub use error::{ConfigError, CoreError, ValidationError};
pub use schedule::{ContentCategory, Event, EventKind, ManualPin, TaskRules, TaskSpec, TeachingBlock, TeachingTable};
pub use scheduler::{build_events, PassMode, PlacementRules, Planner, Shortfall, WeekPlan};
pub use storage::PlannerConfig;
