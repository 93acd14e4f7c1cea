//! Arcane Armory - AI-enhanced item forge
//!
//! Same forge as the local binary, plus lore, art, and inline display when
//! `OPENAI_API_KEY` is set.

use anyhow::Result;
use clap::Parser;

use arcane_armory::ai::{ImageModel, OpenAiClient, TextModel};
use arcane_armory::cli::{run_on_terminal, Args, Forge};
use arcane_armory::display::SystemRunner;
use arcane_armory::pipeline::Services;
use arcane_armory::{Config, TableSet};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    log::info!("Starting Arcane Armory (AI) v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = Config::from_env();
    let tables = TableSet::load(config.tables_path.as_deref())?;

    let client = if config.has_credentials() {
        match OpenAiClient::from_config(&config) {
            Ok(client) => Some(client),
            Err(e) => {
                log::warn!("AI stages disabled: {}", e);
                None
            }
        }
    } else {
        log::info!("OPENAI_API_KEY not set; AI stages will be skipped");
        None
    };
    let services = Services {
        text: client.as_ref().map(|c| c as &dyn TextModel),
        image: client.as_ref().map(|c| c as &dyn ImageModel),
        runner: &SystemRunner,
    };

    run_on_terminal(&args, &config, &tables, Forge::Enhanced(services))?;

    Ok(())
}
