mod config;
mod pages;
mod server;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;

use crate::config::Config;
use makan_core::catalog::NutritionCatalog;
use makan_core::db::Database;

#[derive(Parser)]
#[command(
    name = "makan",
    version,
    about = "A small personal food-intake tracker with a local web UI"
)]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// Database file (default: platform data directory)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Nutrition catalog CSV with FoodName and Calories columns
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Directory for uploaded photos (default: platform data directory)
    #[arg(long)]
    uploads: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    let db_path = cli.db.unwrap_or(config.db_path);
    let catalog_path = cli.catalog.unwrap_or(config.catalog_path);
    let upload_dir = cli.uploads.unwrap_or(config.upload_dir);

    let db = Database::open(&db_path)?;

    // A missing or malformed catalog is logged and replaced with an
    // empty one; lookups then fall back to the default calorie value.
    let catalog = NutritionCatalog::from_csv_path(&catalog_path);
    eprintln!("Loaded {} catalog entries", catalog.len());

    std::fs::create_dir_all(&upload_dir)?;

    server::start_server(db, catalog, upload_dir, cli.port, &cli.bind).await
}
