use crate::AppConfig;
use crate::formatter::listing::format_network_listing;
use crate::io::{read_host_table, write_record_set};
use crate::parser::hosts::{HostTableParser, ParsedHostTable};
use crate::task::Task;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Host table in, intermediate record file out.
pub struct ConvertHostTableTask {
    config: AppConfig,
    host_table_path: PathBuf,
    network_listing: Option<String>,
}

impl ConvertHostTableTask {
    pub fn new(config: AppConfig, host_table_path: PathBuf) -> Self {
        Self {
            config,
            host_table_path,
            network_listing: None,
        }
    }

    /// Also print the records of this network (e.g. `10.0.240`) to stdout.
    pub fn with_network_listing(mut self, network_name: Option<String>) -> Self {
        self.network_listing = network_name;
        self
    }

    pub fn convert(&self) -> anyhow::Result<ParsedHostTable> {
        let content = read_host_table(&self.host_table_path)?;

        let parser = HostTableParser::from_config(&self.config);
        let parsed = parser.parse_str(&content);

        for (reason, count) in parsed.skip_counts() {
            debug!("Skipped {} lines: {}", count, reason);
        }

        write_record_set(Path::new(&self.config.output_path), &parsed.records)?;

        info!("{} networks in {:?}", parsed.records.group_by_network().len(), self.host_table_path);

        Ok(parsed)
    }
}

impl Task for ConvertHostTableTask {
    fn name(&self) -> &str {
        "Convert host table"
    }

    fn run(&self) -> anyhow::Result<()> {
        let parsed = self.convert()?;

        if let Some(network_name) = &self.network_listing {
            print!("{}", format_network_listing(&parsed.records, network_name)?);
        }

        Ok(())
    }
}
