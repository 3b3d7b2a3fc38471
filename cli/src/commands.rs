pub mod config;
pub mod read;

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use palmist_common::config::Config;
use palmist_common::user::UserData;
use tracing::debug;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "palmist.json";

#[derive(Parser)]
#[command(name = "palmist")]
#[command(about = "An AI palm reader for the terminal.")]
#[command(version)]
pub struct CommandLine {
    /// JSON configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read a palm from an image file
    #[command(alias = "r")]
    Read(ReadArgs),
    /// Show the resolved configuration and active providers
    #[command(alias = "c")]
    Config,
}

#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Photo of an open palm (jpeg, png, gif, webp or bmp)
    pub image: PathBuf,
    #[arg(long)]
    pub name: Option<String>,
    /// Birth date as YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    pub birth_date: Option<NaiveDate>,
    #[arg(long)]
    pub birth_time: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    /// Seed the generator for a reproducible reading
    #[arg(long)]
    pub seed: Option<u64>,
    /// Print the analysis as JSON
    #[arg(long)]
    pub json: bool,
}

impl ReadArgs {
    pub fn user_data(&self) -> UserData {
        UserData {
            name: self.name.clone(),
            birth_date: self.birth_date,
            birth_time: self.birth_time.clone(),
            location: self.location.clone(),
        }
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// An explicit file must load; the default file is optional. Environment
/// keys are applied last.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Config::load(Path::new(DEFAULT_CONFIG_FILE))
            .with_context(|| format!("could not use {DEFAULT_CONFIG_FILE}"))?,
        None => {
            debug!("No configuration file, using defaults");
            Config::default()
        }
    };
    Ok(config.with_env_overrides())
}
