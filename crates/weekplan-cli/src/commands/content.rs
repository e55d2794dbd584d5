use std::path::Path;

use clap::Subcommand;
use weekplan_core::agenda::render_content;
use weekplan_core::PlannerConfig;

#[derive(Subcommand)]
pub enum ContentAction {
    /// List the content library
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ContentAction, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = PlannerConfig::load_from(&PlannerConfig::path(config_path)?)?;

    match action {
        ContentAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&config.content)?);
            } else {
                print!("{}", render_content(&config.content));
            }
        }
    }
    Ok(())
}
