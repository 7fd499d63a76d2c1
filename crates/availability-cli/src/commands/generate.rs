use std::path::PathBuf;

use availability_core::{resolve_anchor, GridGenerator, Schedule};
use chrono::NaiveDate;
use clap::Args;

use super::{load_config, parse_date, parse_now, CmdResult};

#[derive(Args)]
pub struct GenerateArgs {
    /// First day (YYYY-MM-DD), defaults to the resolved anchor Monday
    #[arg(long)]
    pub start: Option<String>,
    /// Seed for the placeholder level pick
    #[arg(long)]
    pub seed: Option<u64>,
}

impl GenerateArgs {
    pub fn start_date(&self) -> Result<NaiveDate, Box<dyn std::error::Error>> {
        match self.start.as_deref() {
            Some(text) => parse_date(text),
            None => Ok(resolve_anchor(parse_now(None)?)),
        }
    }
}

pub fn build_schedule(
    config: &availability_core::Config,
    args: &GenerateArgs,
) -> Result<Schedule, Box<dyn std::error::Error>> {
    let start = args.start_date()?;
    let schedule = GridGenerator::from_config(config, args.seed).generate(start)?;
    Ok(schedule)
}

pub fn run(config_path: Option<PathBuf>, args: GenerateArgs) -> CmdResult {
    let (_, config) = load_config(config_path)?;
    let schedule = build_schedule(&config, &args)?;
    println!("{}", serde_json::to_string_pretty(&schedule)?);
    Ok(())
}

pub fn anchor(now: Option<String>) -> CmdResult {
    let now = parse_now(now.as_deref())?;
    let anchor = resolve_anchor(now);
    println!("{}", anchor.format("%Y-%m-%d (%a)"));
    Ok(())
}
