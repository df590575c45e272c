pub mod model;
pub mod io;
pub mod parser;
pub mod task;

pub mod cli;
pub mod formatter;
pub mod logging;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use strum::{Display, EnumString};
use tracing::info;

pub const CONFIG_PATH: &str = "config.json";

/// How zone files are written by the emitter.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EmitMode {
    /// Append to existing zone files; re-running duplicates every line.
    Append,
    /// Truncate each zone file touched by this run before writing.
    Overwrite,
}

/// Which of the pre-computed PTR lines goes into a zone file.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ZoneLine {
    /// `98  IN PTR ...`, owner relative to the /24 zone.
    Relative,
    /// `98.36.168.192.in-addr.arpa.  IN PTR ...`
    Full,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub default_domain: String,
    pub no_comment_text: String,
    pub generate_full_record: bool,

    pub output_path: String,

    pub zone_directory: String,
    pub emit_mode: EmitMode,
    pub zone_line: ZoneLine,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            default_domain: "ip.nl.tmo".to_string(),
            no_comment_text: " - no comment - ".to_string(),
            generate_full_record: true,

            output_path: "hostfile-converted-ptr-data.json".to_string(),

            zone_directory: ".".to_string(),
            emit_mode: EmitMode::Overwrite,
            zone_line: ZoneLine::Relative,
        }
    }
}

impl AppConfig {
    /// Loads the configuration named by `CONFIG_PATH`, or `config.json` when unset.
    /// A missing file yields the defaults.
    pub fn load() -> anyhow::Result<AppConfig> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| CONFIG_PATH.to_string());

        AppConfig::load_from(Path::new(config_path.as_str()))
    }

    pub fn load_from(config_path: &Path) -> anyhow::Result<AppConfig> {
        if !config_path.exists() {
            info!("Configuration file {:?} does not exist. Using default configuration.", config_path);

            return Ok(AppConfig::default());
        }

        let file = std::fs::File::open(config_path)
            .with_context(|| format!("Failed to open configuration {:?}", config_path))?;

        let app_config = serde_json::from_reader(std::io::BufReader::new(file))
            .with_context(|| format!("Failed to load configuration from {:?}", config_path))?;

        info!("Loaded configuration from {:?}", config_path);

        Ok(app_config)
    }
}
