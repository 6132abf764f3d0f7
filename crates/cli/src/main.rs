//! Locura y Realidad CLI - database migrations and catalog seeding.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! locura-cli migrate
//!
//! # Replace tours, products and photos with the contents of a YAML file
//! locura-cli seed catalog crates/cli/seeds/catalog.yaml
//!
//! # Check a seed file without touching the database
//! locura-cli seed catalog crates/cli/seeds/catalog.yaml --dry-run
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed catalog` - Load catalog data from YAML

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "locura-cli")]
#[command(author, version, about = "Locura y Realidad CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run storefront database migrations
    Migrate,
    /// Seed the database
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Replace tours, products and photos with the contents of a YAML file
    Catalog {
        /// Path to the catalog YAML file
        file: String,

        /// Validate the file and exit without writing
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::storefront().await?,
        Commands::Seed { target } => match target {
            SeedTarget::Catalog { file, dry_run } => {
                commands::seed::catalog(&file, dry_run).await?;
            }
        },
    }
    Ok(())
}
