use crate::{AppConfig, EmitMode, ZoneLine};
use clap::error::ErrorKind;
use clap::{Parser, ValueHint};
use std::path::PathBuf;
use std::process;

/// Convert a hosts file into reverse DNS (PTR) records
#[derive(Parser, Debug)]
#[command(name = "host2ptr", version, about)]
pub struct ConvertArgs {
    /// Host table to convert
    #[arg(value_hint = ValueHint::FilePath)]
    pub host_table: PathBuf,

    /// Where to write the JSON record file
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Domain appended to names with fewer than three labels
    #[arg(short = 'D', long)]
    pub domain: Option<String>,

    /// Print the records of one network, e.g. 10.0.240
    #[arg(short, long)]
    pub network: Option<String>,

    /// Do not add the fully qualified full_record line
    #[arg(long)]
    pub no_full_record: bool,

    /// log level, v for debug, vv for trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ConvertArgs {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(output) = &self.output {
            config.output_path = output.to_string_lossy().to_string();
        }
        if let Some(domain) = &self.domain {
            config.default_domain = domain.clone();
        }
        if self.no_full_record {
            config.generate_full_record = false;
        }
    }
}

/// Write PTR lines from a host2ptr record file into per-zone .db files
#[derive(Parser, Debug)]
#[command(name = "gen-zone", version, about)]
pub struct EmitArgs {
    /// JSON record file produced by host2ptr
    #[arg(value_hint = ValueHint::FilePath)]
    pub record_file: PathBuf,

    /// append to existing zone files or regenerate them
    #[arg(short, long, value_enum)]
    pub mode: Option<EmitMode>,

    /// Directory receiving the zone files
    #[arg(short = 'd', long, value_hint = ValueHint::DirPath)]
    pub zone_dir: Option<PathBuf>,

    /// Which PTR line to write
    #[arg(short, long, value_enum)]
    pub line: Option<ZoneLine>,

    /// log level, v for debug, vv for trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl EmitArgs {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(mode) = self.mode {
            config.emit_mode = mode;
        }
        if let Some(zone_dir) = &self.zone_dir {
            config.zone_directory = zone_dir.to_string_lossy().to_string();
        }
        if let Some(line) = self.line {
            config.zone_line = line;
        }
    }
}

/// Parses the command line; on a usage error prints the message with usage and exits with 1.
pub fn parse_or_usage<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                eprint!("{}", e);
                process::exit(1);
            }
        },
    }
}
