pub mod commands;
pub mod utils;

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::database::{RestStore, RowStore};

#[derive(Parser)]
#[command(name = "itemctl")]
#[command(about = "Inspect and create items and users directly in the table store")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Item records")]
    Items {
        #[command(subcommand)]
        cmd: commands::items::ItemCommands,
    },

    #[command(about = "User records")]
    Users {
        #[command(subcommand)]
        cmd: commands::users::UserCommands,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    let config = AppConfig::from_env().context("failed to load configuration")?;
    let store: Arc<dyn RowStore> =
        Arc::new(RestStore::new(&config.store).context("failed to create store client")?);

    match cli.command {
        Commands::Items { cmd } => commands::items::handle(cmd, store, output_format).await,
        Commands::Users { cmd } => commands::users::handle(cmd, store, output_format).await,
    }
}
