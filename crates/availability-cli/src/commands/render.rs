use std::path::PathBuf;

use availability_core::render::render_page;
use availability_core::{Config, StyleSheet, StyleSynchronizer};
use clap::Args;

use super::generate::{build_schedule, GenerateArgs};
use super::{load_config, CmdResult};

#[derive(Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub generate: GenerateArgs,
    /// Write the page here instead of stdout
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

fn stylesheet(config: &Config) -> StyleSheet {
    let mut sheet = StyleSheet::new();
    StyleSynchronizer::new(&config.schedule.cell_class_prefix).apply(&config.catalog(), &mut sheet);
    sheet
}

pub fn run(config_path: Option<PathBuf>, args: RenderArgs) -> CmdResult {
    let (_, config) = load_config(config_path)?;
    let schedule = build_schedule(&config, &args.generate)?;
    let page = render_page(&schedule, &config.schedule, &config.catalog(), &stylesheet(&config));

    match args.out {
        Some(path) => {
            std::fs::write(&path, page)?;
            println!("wrote {}", path.display());
        }
        None => print!("{page}"),
    }
    Ok(())
}

pub fn styles(config_path: Option<PathBuf>) -> CmdResult {
    let (_, config) = load_config(config_path)?;
    print!("{}", stylesheet(&config).to_css());
    Ok(())
}
