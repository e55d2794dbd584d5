use std::path::Path;

use clap::Subcommand;
use weekplan_core::{Planner, PlannerConfig};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "rules.buffer_minutes", "tasks.0.occurrences")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
    /// Print the config file location
    Path,
}

pub fn run(action: ConfigAction, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let path = PlannerConfig::path(config_path)?;

    match action {
        ConfigAction::Get { key } => {
            let config = PlannerConfig::load_from(&path)?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => {
                    eprintln!("unknown key: {key}");
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = PlannerConfig::load_from(&path)?;
            config.set(&key, &value)?;
            // Refuse to persist a config the planner would reject.
            let config = Planner::new(config)?.config().clone();
            config.save_to(&path)?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = PlannerConfig::load_from(&path)?;
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Reset => {
            PlannerConfig::default().save_to(&path)?;
            println!("config reset to defaults");
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
    }
    Ok(())
}
