use std::path::PathBuf;

use anyhow::Context;

const DEFAULT_CSV_DIRS: [&str; 3] = ["Filer til opgaven", "csv filer", "."];
const DEFAULT_BCRYPT_COST: u32 = 10;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    /// Directories searched, in order, for each seed file.
    pub csv_roots: Vec<PathBuf>,
    pub seed_password: String,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://wallywood.db?mode=rwc".to_string());

        let base_dir = match std::env::var_os("SEED_BASE_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir().context("current directory")?,
        };

        let csv_roots = match std::env::var_os("SEED_CSV_DIRS") {
            Some(dirs) => std::env::split_paths(&dirs).map(|d| base_dir.join(d)).collect(),
            None => DEFAULT_CSV_DIRS.iter().map(|d| base_dir.join(d)).collect(),
        };

        let seed_password =
            std::env::var("SEED_PASSWORD").unwrap_or_else(|_| "password123".to_string());

        let bcrypt_cost: u32 = match std::env::var("BCRYPT_COST") {
            Ok(cost) => cost.parse().context("BCRYPT_COST")?,
            Err(_) => DEFAULT_BCRYPT_COST,
        };

        Ok(Self { database_url, csv_roots, seed_password, bcrypt_cost })
    }
}
