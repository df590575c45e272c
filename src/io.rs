use crate::EmitMode;
use crate::formatter::zone_file::{ZoneFileContent, check_zone_name};
use crate::model::output::{HostRecordSet, RecordEntry};
use anyhow::Context;
use std::fs;
use std::fs::OpenOptions;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

pub fn read_host_table(file_path: &Path) -> anyhow::Result<String> {
    let content = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read host table {:?}", file_path))?;

    debug!("Read {} bytes from {:?}", content.len(), file_path);

    Ok(content)
}

pub fn write_record_set(file_path: &Path, records: &HostRecordSet) -> anyhow::Result<()> {
    let file = fs::File::create(file_path)
        .with_context(|| format!("Failed to create record file {:?}", file_path))?;

    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, records)
        .with_context(|| format!("Failed to serialize records to {:?}", file_path))?;

    writer.flush()
        .with_context(|| format!("Failed to write record file {:?}", file_path))?;

    info!("Wrote {} records to {:?}", records.len(), file_path);

    Ok(())
}

/// Reads the intermediate file keeping the entries in file order.
pub fn read_record_entries(file_path: &Path) -> anyhow::Result<Vec<RecordEntry>> {
    let file = fs::File::open(file_path)
        .with_context(|| format!("Failed to open record file {:?}", file_path))?;

    let entries: Vec<RecordEntry> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse record file {:?}", file_path))?;

    info!("Loaded {} records from {:?}", entries.len(), file_path);

    Ok(entries)
}

pub fn read_record_set(file_path: &Path) -> anyhow::Result<HostRecordSet> {
    let entries = read_record_entries(file_path)?;

    HostRecordSet::from_entries(entries)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("Invalid record file {:?}", file_path))
}

/// Writes every zone into `<zone_directory>/<zone>.db` and returns the number of lines written.
///
/// Nothing is written when any zone name would leave `zone_directory`.
pub fn write_zone_files(zone_directory: &Path, zones: &[ZoneFileContent], mode: EmitMode) -> anyhow::Result<usize> {
    for zone in zones {
        check_zone_name(&zone.zone_name)
            .with_context(|| format!("Refusing to write zone file into {:?}", zone_directory))?;
    }

    let mut line_count = 0;

    for zone in zones {
        let file_path = zone_directory.join(zone.file_name());

        let mut options = OpenOptions::new();
        options.create(true);

        match mode {
            EmitMode::Append => options.append(true),
            EmitMode::Overwrite => options.write(true).truncate(true),
        };

        let mut file = options
            .open(&file_path)
            .with_context(|| format!("Failed to open zone file {:?}", file_path))?;

        file.write_all(zone.render().as_bytes())
            .with_context(|| format!("Failed to write zone file {:?}", file_path))?;

        debug!("[{}] {} lines to {:?}", mode, zone.lines.len(), file_path);

        line_count += zone.lines.len();
    }

    info!("Wrote {} PTR lines into {} zone files ({} mode).", line_count, zones.len(), mode);

    Ok(line_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ZoneLine;
    use crate::formatter::zone_file::group_zone_lines;
    use crate::model::host::HostRecord;
    use std::net::Ipv4Addr;

    fn sample_set() -> HostRecordSet {
        let mut set = HostRecordSet::new();

        for (ip, name) in [
            (Ipv4Addr::new(192, 168, 36, 98), "host001"),
            (Ipv4Addr::new(10, 0, 240, 7), "sw7"),
            (Ipv4Addr::new(10, 0, 240, 10), "sw10"),
        ] {
            set.insert(ip, HostRecord::new(ip, vec![name.to_string()], "ip.nl.tmo", " rack", true).unwrap());
        }

        set
    }

    #[test]
    fn test_record_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");

        let set = sample_set();
        write_record_set(&path, &set).unwrap();

        assert_eq!(read_record_set(&path).unwrap(), set);

        let entries = read_record_entries(&path).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].0, "10.0.240.7");
        assert_eq!(entries[1].0, "10.0.240.10");
    }

    #[test]
    fn test_record_file_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");

        write_record_set(&path, &sample_set()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("[\n  [\n    \"10.0.240.7\",\n    {\n      \"ipaddr\": \"10.0.240.7\""));
    }

    #[test]
    fn test_entries_keep_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");

        // Lexicographically sorted, as older tools wrote it
        let set = sample_set();
        let mut entries = set.to_entries();
        entries.sort_by(|x, y| x.0.cmp(&y.0));
        fs::write(&path, serde_json::to_string_pretty(&entries).unwrap()).unwrap();

        let keys: Vec<String> = read_record_entries(&path).unwrap().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["10.0.240.10", "10.0.240.7", "192.168.36.98"]);
    }

    #[test]
    fn test_missing_inputs_are_errors() {
        let dir = tempfile::tempdir().unwrap();

        assert!(read_host_table(&dir.path().join("hosts")).is_err());
        assert!(read_record_entries(&dir.path().join("records.json")).is_err());
    }

    #[test]
    fn test_append_mode_duplicates_lines() {
        let dir = tempfile::tempdir().unwrap();
        let set = sample_set();
        let zones = group_zone_lines(set.records(), ZoneLine::Relative).unwrap();

        assert_eq!(write_zone_files(dir.path(), &zones, EmitMode::Append).unwrap(), 3);
        assert_eq!(write_zone_files(dir.path(), &zones, EmitMode::Append).unwrap(), 3);

        let content = fs::read_to_string(dir.path().join("240.0.10.in-addr.arpa.db")).unwrap();
        assert_eq!(content, "\
7  IN PTR  sw7.ip.nl.tmo.    ; rack
10  IN PTR  sw10.ip.nl.tmo.    ; rack
7  IN PTR  sw7.ip.nl.tmo.    ; rack
10  IN PTR  sw10.ip.nl.tmo.    ; rack
");
    }

    #[test]
    fn test_overwrite_mode_regenerates() {
        let dir = tempfile::tempdir().unwrap();
        let set = sample_set();
        let zones = group_zone_lines(set.records(), ZoneLine::Relative).unwrap();

        fs::write(dir.path().join("36.168.192.in-addr.arpa.db"), "stale line\n").unwrap();

        write_zone_files(dir.path(), &zones, EmitMode::Overwrite).unwrap();
        write_zone_files(dir.path(), &zones, EmitMode::Overwrite).unwrap();

        let content = fs::read_to_string(dir.path().join("36.168.192.in-addr.arpa.db")).unwrap();
        assert_eq!(content, "98  IN PTR  host001.ip.nl.tmo.    ; rack\n");
    }

    #[test]
    fn test_zone_name_cannot_escape_zone_directory() {
        let dir = tempfile::tempdir().unwrap();
        let zone_directory = dir.path().join("zones");
        fs::create_dir(&zone_directory).unwrap();

        let victim = dir.path().join("victim.db");
        fs::write(&victim, "precious\n").unwrap();

        for zone_name in [
            dir.path().join("victim").to_string_lossy().to_string(),
            "../victim".to_string(),
            "../0.0.10.in-addr.arpa".to_string(),
        ] {
            let zones = vec![ZoneFileContent {
                zone_name,
                lines: vec!["1  IN PTR  a.x.y.    ;c".to_string()],
            }];

            assert!(write_zone_files(&zone_directory, &zones, EmitMode::Overwrite).is_err());
            assert!(write_zone_files(&zone_directory, &zones, EmitMode::Append).is_err());
        }

        assert_eq!(fs::read_to_string(&victim).unwrap(), "precious\n");
        assert_eq!(fs::read_dir(&zone_directory).unwrap().count(), 0);
    }

    #[test]
    fn test_zone_name_from_record_file_is_checked() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");

        let victim = dir.path().join("victim");
        fs::write(dir.path().join("victim.db"), "precious\n").unwrap();

        let json = serde_json::json!([["10.0.0.1", {
            "ipaddr": "10.0.0.1", "netname": "10.0.0", "zonename": victim.to_string_lossy(),
            "lastoctet": "1", "names": ["a"], "hosts": ["a.x.y"], "fqdn": "a.x.y",
            "comment": "# c", "ptr_record": "1  IN PTR  a.x.y.    ;c"
        }]]);
        fs::write(&path, json.to_string()).unwrap();

        let entries = read_record_entries(&path).unwrap();
        let e = group_zone_lines(entries.iter().map(|(_, record)| record), ZoneLine::Relative).unwrap_err();

        assert!(format!("{:#}", e).contains("10.0.0.1"));
        assert_eq!(fs::read_to_string(dir.path().join("victim.db")).unwrap(), "precious\n");
    }

    #[test]
    fn test_unwritable_zone_directory() {
        let dir = tempfile::tempdir().unwrap();
        let set = sample_set();
        let zones = group_zone_lines(set.records(), ZoneLine::Relative).unwrap();

        assert!(write_zone_files(&dir.path().join("missing"), &zones, EmitMode::Append).is_err());
    }
}
