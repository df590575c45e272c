use crate::model::host::HostRecord;
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::net::Ipv4Addr;
use std::str::FromStr;
use tracing::warn;

/// One element of the intermediate file: `[ "192.168.36.98", { ... } ]`.
pub type RecordEntry = (String, HostRecord);

/// All records of one conversion run, keyed and ordered by numeric address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostRecordSet {
    records: BTreeMap<Ipv4Addr, HostRecord>,
}

impl HostRecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record unless the address is already present. The first record wins.
    pub fn insert(&mut self, ip: Ipv4Addr, record: HostRecord) -> bool {
        if self.records.contains_key(&ip) {
            return false;
        }

        self.records.insert(ip, record);

        true
    }

    pub fn get(&self, ip: &Ipv4Addr) -> Option<&HostRecord> {
        self.records.get(ip)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &HostRecord> {
        self.records.values()
    }

    /// All records of one `/24`, e.g. `"10.0.240"`, in address order.
    pub fn records_by_network(&self, network_name: &str) -> Vec<&HostRecord> {
        self.records
            .values()
            .filter(|record| record.network_name() == network_name)
            .collect()
    }

    pub fn group_by_network(&self) -> BTreeMap<&str, Vec<&HostRecord>> {
        let mut network_to_records: BTreeMap<&str, Vec<&HostRecord>> = BTreeMap::new();

        for record in self.records.values() {
            network_to_records.entry(record.network_name()).or_default().push(record);
        }

        network_to_records
    }

    pub fn to_entries(&self) -> Vec<RecordEntry> {
        self.records
            .iter()
            .map(|(ip, record)| (ip.to_string(), record.clone()))
            .collect()
    }

    /// Rebuilds a set from intermediate file entries. Later duplicates of an address are dropped.
    pub fn from_entries(entries: Vec<RecordEntry>) -> Result<Self, String> {
        let mut set = HostRecordSet::new();

        for (key, record) in entries {
            let ip = Ipv4Addr::from_str(&key)
                .map_err(|e| format!("Invalid address key {:?}: {}", key, e))?;

            if key != record.ip_address() {
                return Err(format!("Address key {:?} does not match record ipaddr {:?}", key, record.ip_address()));
            }

            if !set.insert(ip, record) {
                warn!("Duplicate entry for {} in record file, keeping the first one", key);
            }
        }

        Ok(set)
    }
}

impl Serialize for HostRecordSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.records.iter().map(|(ip, record)| (ip.to_string(), record)))
    }
}

impl<'de> Deserialize<'de> for HostRecordSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<RecordEntry>::deserialize(deserializer)?;

        HostRecordSet::from_entries(entries).map_err(D::Error::custom)
    }
}
