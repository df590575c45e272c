use crate::model::output::HostRecordSet;

/// Diagnostic listing of every record in one network, as pretty JSON objects.
pub fn format_network_listing(records: &HostRecordSet, network_name: &str) -> anyhow::Result<String> {
    let network_records = records.records_by_network(network_name);

    if network_records.is_empty() {
        return Ok(format!("No records found with netname '{}'.\n", network_name));
    }

    let mut buffer = format!("Records with netname '{}':\n", network_name);

    for record in network_records {
        buffer.push_str(&serde_json::to_string_pretty(record)?);
        buffer.push('\n');
    }

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::host::HostRecord;
    use std::net::Ipv4Addr;

    #[test]
    fn test_listing_for_known_network() {
        let mut set = HostRecordSet::new();
        let ip = Ipv4Addr::new(10, 0, 240, 7);
        set.insert(ip, HostRecord::new(ip, vec!["sw7".to_string()], "ip.nl.tmo", "x", false).unwrap());

        let listing = format_network_listing(&set, "10.0.240").unwrap();

        assert!(listing.starts_with("Records with netname '10.0.240':\n{\n  \"ipaddr\": \"10.0.240.7\","));
        assert!(listing.contains("\"ptr_record\": \"7  IN PTR  sw7.ip.nl.tmo.    ;x\""));
    }

    #[test]
    fn test_listing_for_unknown_network() {
        let listing = format_network_listing(&HostRecordSet::new(), "10.0.240").unwrap();

        assert_eq!(listing, "No records found with netname '10.0.240'.\n");
    }
}
