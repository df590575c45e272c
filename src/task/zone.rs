use crate::AppConfig;
use crate::formatter::zone_file::group_zone_lines;
use crate::io::{read_record_entries, write_zone_files};
use crate::task::Task;
use std::path::{Path, PathBuf};

/// Intermediate record file in, `<zone>.db` files out.
pub struct GenerateZoneFilesTask {
    config: AppConfig,
    record_file_path: PathBuf,
}

impl GenerateZoneFilesTask {
    pub fn new(config: AppConfig, record_file_path: PathBuf) -> Self {
        Self { config, record_file_path }
    }
}

impl Task for GenerateZoneFilesTask {
    fn name(&self) -> &str {
        "Generate zone files"
    }

    fn run(&self) -> anyhow::Result<()> {
        let entries = read_record_entries(&self.record_file_path)?;

        let zones = group_zone_lines(entries.iter().map(|(_, record)| record), self.config.zone_line)?;

        write_zone_files(Path::new(&self.config.zone_directory), &zones, self.config.emit_mode)?;

        Ok(())
    }
}
