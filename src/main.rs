//! Arcane Armory - local item forge

use anyhow::Result;
use clap::Parser;

use arcane_armory::cli::{run_on_terminal, Args, Forge};
use arcane_armory::{Config, TableSet};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    log::info!("Starting Arcane Armory v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = Config::from_env();
    let tables = TableSet::load(config.tables_path.as_deref())?;

    run_on_terminal(&args, &config, &tables, Forge::Local)?;

    Ok(())
}
