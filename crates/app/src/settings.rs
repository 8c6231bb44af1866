//! Handles settings for the application.
//!
//! Values are read, in increasing priority, from the TOML file given with
//! `--config` (default `settings.toml`, optional) and from `LEDGER__*`
//! environment variables, e.g. `LEDGER__SERVER__PORT=8080`.
use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings.toml";

#[derive(Debug, Parser)]
#[command(name = "ledger", version)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long, env = "LEDGER_CONFIG")]
    config: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
    /// Day of the month credit card purchases are billed on.
    pub default_due_day: u32,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            default_due_day: engine::DEFAULT_DUE_DAY,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

/// Periodic materialization of recurring movements.
#[derive(Debug, Deserialize)]
pub struct Scheduler {
    pub interval_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Option<Server>,
    pub scheduler: Option<Scheduler>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();
        let path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("LEDGER").separator("__"))
            .build()?
            .try_deserialize()
    }
}
