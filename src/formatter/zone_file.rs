use crate::ZoneLine;
use crate::model::host::{HostRecord, IN_ADDR_ARPA};
use anyhow::{Context, bail};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::Path;
use tracing::warn;

pub const ZONE_FILE_EXTENSION: &str = "db";

/// Lines destined for one zone file, in the order the records were given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneFileContent {
    pub zone_name: String,
    pub lines: Vec<String>,
}

impl ZoneFileContent {
    pub fn file_name(&self) -> String {
        zone_file_name(&self.zone_name)
    }

    /// Every line newline-terminated.
    pub fn render(&self) -> String {
        let mut buffer = String::new();

        for line in &self.lines {
            buffer.push_str(line);
            buffer.push('\n');
        }

        buffer
    }
}

/// `36.168.192.in-addr.arpa` -> `36.168.192.in-addr.arpa.db`
pub fn zone_file_name(zone_name: &str) -> String {
    format!("{}.{}", zone_name, ZONE_FILE_EXTENSION)
}

/// A zone name must be a single plain path component under `in-addr.arpa`.
pub fn check_zone_name(zone_name: &str) -> anyhow::Result<()> {
    let suffix = format!(".{}", IN_ADDR_ARPA);

    if !zone_name.ends_with(&suffix) || zone_name.len() == suffix.len() {
        bail!("Zone name {:?} is not a reverse zone under {}", zone_name, IN_ADDR_ARPA);
    }

    let file_name = zone_file_name(zone_name);

    if zone_name.contains(['/', '\\']) || Path::new(&file_name).file_name() != Some(OsStr::new(&file_name)) {
        bail!("Zone name {:?} is not a plain file name", zone_name);
    }

    Ok(())
}

fn select_line(record: &HostRecord, zone_line: ZoneLine) -> &str {
    match zone_line {
        ZoneLine::Relative => record.ptr_line(),
        ZoneLine::Full => match record.reverse_ptr_line() {
            Some(line) => line,
            None => {
                warn!("Record {} has no full_record, writing ptr_record instead", record.ip_address());
                record.ptr_line()
            }
        },
    }
}

/// Groups record lines by target zone. Zones appear in order of first use.
///
/// Fails on the first record whose zone name cannot be used as a file name.
pub fn group_zone_lines<'a>(records: impl IntoIterator<Item = &'a HostRecord>, zone_line: ZoneLine) -> anyhow::Result<Vec<ZoneFileContent>> {
    let mut zones: Vec<ZoneFileContent> = Vec::new();
    let mut zone_to_index: HashMap<String, usize> = HashMap::new();

    for record in records {
        check_zone_name(record.zone_name())
            .with_context(|| format!("Invalid zonename in record {}", record.ip_address()))?;

        let index = *zone_to_index
            .entry(record.zone_name().to_string())
            .or_insert_with(|| {
                zones.push(ZoneFileContent {
                    zone_name: record.zone_name().to_string(),
                    lines: Vec::new(),
                });
                zones.len() - 1
            });

        zones[index].lines.push(select_line(record, zone_line).to_string());
    }

    Ok(zones)
}
