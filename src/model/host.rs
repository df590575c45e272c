use crate::formatter::ptr_record::format_ptr_record;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

pub const IN_ADDR_ARPA: &str = "in-addr.arpa";

/// Marker stored in front of the comment text of every record.
pub const COMMENT_MARKER: &str = "# ";

/// `192.168.36.98` -> `192.168.36`
pub fn network_name(ip: Ipv4Addr) -> String {
    let octets = ip.octets();

    format!("{}.{}.{}", octets[0], octets[1], octets[2])
}

/// `192.168.36` -> `36.168.192.in-addr.arpa`
pub fn zone_name(network_name: &str) -> String {
    let reversed_labels: Vec<&str> = network_name.split('.').rev().collect();

    format!("{}.{}", reversed_labels.join("."), IN_ADDR_ARPA)
}

/// `192.168.36.98` -> `98.36.168.192.in-addr.arpa`
pub fn reverse_pointer_name(ip: Ipv4Addr) -> String {
    let reversed_labels: Vec<String> = ip.octets()
        .iter()
        .rev()
        .map(|o| o.to_string())
        .collect();

    format!("{}.{}", reversed_labels.join("."), IN_ADDR_ARPA)
}

/// Names with fewer than three labels are treated as short names and get the default domain.
pub fn qualify_name(name: &str, default_domain: &str) -> String {
    if name.split('.').count() > 2 {
        name.to_string()
    } else {
        format!("{}.{}", name, default_domain)
    }
}

/// One reverse-lookup entry derived from a host table line.
///
/// The serialized key names are those of the intermediate JSON file consumed
/// by the zone emitter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HostRecord {
    #[serde(rename = "ipaddr")]
    ip_address: String,
    #[serde(rename = "netname")]
    network_name: String,
    #[serde(rename = "zonename")]
    zone_name: String,
    #[serde(rename = "lastoctet")]
    last_octet: String,
    #[serde(rename = "names")]
    raw_names: Vec<String>,
    #[serde(rename = "hosts")]
    normalized_hosts: Vec<String>,
    fqdn: String,
    comment: String,
    #[serde(rename = "ptr_record")]
    ptr_line: String,
    #[serde(rename = "full_record", default, skip_serializing_if = "Option::is_none")]
    reverse_ptr_line: Option<String>,
}

impl HostRecord {
    /// Builds a record from the parts of a host table line.
    ///
    /// Returns `None` when there is no name to point at.
    pub fn new(ip: Ipv4Addr, raw_names: Vec<String>, default_domain: &str, comment_text: &str, full_record: bool) -> Option<Self> {
        let normalized_hosts: Vec<String> = raw_names
            .iter()
            .map(|name| qualify_name(name, default_domain))
            .collect();

        // The first listed name is the canonical one.
        let fqdn = normalized_hosts.first()?.clone();

        let network_name = network_name(ip);
        let zone_name = zone_name(&network_name);
        let last_octet = ip.octets()[3].to_string();

        let ptr_line = format_ptr_record(&last_octet, &fqdn, comment_text);

        let reverse_ptr_line = if full_record {
            Some(format_ptr_record(&format!("{}.", reverse_pointer_name(ip)), &fqdn, comment_text))
        } else {
            None
        };

        Some(HostRecord {
            ip_address: ip.to_string(),
            network_name,
            zone_name,
            last_octet,
            raw_names,
            normalized_hosts,
            fqdn,
            comment: format!("{}{}", COMMENT_MARKER, comment_text),
            ptr_line,
            reverse_ptr_line,
        })
    }

    pub fn ip_address(&self) -> &str {
        &self.ip_address
    }

    pub fn network_name(&self) -> &str {
        &self.network_name
    }

    pub fn zone_name(&self) -> &str {
        &self.zone_name
    }

    pub fn last_octet(&self) -> &str {
        &self.last_octet
    }

    pub fn raw_names(&self) -> &[String] {
        &self.raw_names
    }

    pub fn normalized_hosts(&self) -> &[String] {
        &self.normalized_hosts
    }

    pub fn fqdn(&self) -> &str {
        &self.fqdn
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn ptr_line(&self) -> &str {
        &self.ptr_line
    }

    pub fn reverse_ptr_line(&self) -> Option<&str> {
        self.reverse_ptr_line.as_deref()
    }
}
