//! affbox 命令行入口

use std::path::PathBuf;

use affbox_lib::commands::{self, RunArgs};
use affbox_lib::{logger, AppConfig};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

/// affbox - affiliate marketing in a box
#[derive(Parser, Debug)]
#[command(name = "affbox")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the complete workflow for a product
    Run {
        /// Product name (defaults to the configured product)
        product: Option<String>,

        /// Override the research category
        #[arg(long)]
        niche: Option<String>,

        /// Override the competitor name
        #[arg(long)]
        competitor: Option<String>,

        /// Output directory for generated artifacts
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Exercise the mock store lifecycle and print its notifications
    StoreDemo {
        /// Force every simulated call to fail
        #[arg(long)]
        fail: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())
        .context("加载配置失败")?
        .normalized();
    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    logger::init(level);

    match cli.command {
        Commands::Run {
            product,
            niche,
            competitor,
            data_dir,
        } => {
            let args = RunArgs {
                product,
                niche,
                competitor,
                data_dir,
            };
            let summary = commands::run_workflow(&config, args).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::StoreDemo { fail } => {
            let notifications = commands::store_demo(&config.store, fail).await?;
            println!("{}", serde_json::to_string_pretty(&notifications)?);
        }
    }

    Ok(())
}
