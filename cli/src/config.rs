use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

pub struct Config {
    pub db_path: PathBuf,
    pub catalog_path: PathBuf,
    pub upload_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from("", "", "makan").context("Could not determine home directory")?;

        let data_dir = proj_dirs.data_dir().to_path_buf();
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let db_path = data_dir.join("makan.db");
        let catalog_path = data_dir.join("food_calories.csv");
        let upload_dir = data_dir.join("uploads");

        Ok(Config {
            db_path,
            catalog_path,
            upload_dir,
        })
    }
}
