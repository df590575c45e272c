use crate::AppConfig;
use crate::model::host::HostRecord;
use crate::model::output::HostRecordSet;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Display;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use strum::IntoStaticStr;
use tracing::{info, warn};

const COMMENT_CHAR: char = '#';

/// Why a host table line did not produce a record.
#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
pub enum SkipReason {
    BlankLine,
    CommentLine,
    NoFields,
    InvalidAddress(String),
    UnsupportedIpv6(Ipv6Addr),
    MissingHostNames(Ipv4Addr),
    DuplicateAddress(Ipv4Addr),
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::BlankLine => write!(f, "Blank line"),
            SkipReason::CommentLine => write!(f, "Comment line"),
            SkipReason::NoFields => write!(f, "No fields before the comment"),
            SkipReason::InvalidAddress(token) => write!(f, "'{}' is not an IPv4 address", token),
            SkipReason::UnsupportedIpv6(ip) => write!(f, "IPv6 address {} is not supported", ip),
            SkipReason::MissingHostNames(ip) => write!(f, "Address {} has no host names", ip),
            SkipReason::DuplicateAddress(ip) => write!(f, "Address {} was already defined earlier", ip),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Accepted { ip: Ipv4Addr, record: HostRecord },
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based
    pub line_number: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Default)]
pub struct ParsedHostTable {
    pub records: HostRecordSet,
    pub skipped: Vec<SkippedLine>,
}

impl ParsedHostTable {
    /// Number of skipped lines per reason, keyed by variant name.
    pub fn skip_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut reason_to_count = BTreeMap::new();

        for skipped in &self.skipped {
            let reason: &'static str = (&skipped.reason).into();
            *reason_to_count.entry(reason).or_insert(0) += 1;
        }

        reason_to_count
    }
}

/// Turns host table text into PTR records.
///
/// Each data line looks like `<ipv4> [name ...] [# comment]`. Lines that are
/// not of that shape are skipped without complaint, except for an address
/// without any name, which is reported.
#[derive(Debug, Clone)]
pub struct HostTableParser {
    default_domain: String,
    no_comment_text: String,
    full_record: bool,
}

impl HostTableParser {
    pub fn new(default_domain: impl Into<String>) -> Self {
        let defaults = AppConfig::default();

        HostTableParser {
            default_domain: default_domain.into(),
            no_comment_text: defaults.no_comment_text,
            full_record: defaults.generate_full_record,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        HostTableParser {
            no_comment_text: config.no_comment_text.clone(),
            ..HostTableParser::new(config.default_domain.clone())
        }
        .with_full_record(config.generate_full_record)
    }

    pub fn with_full_record(mut self, full_record: bool) -> Self {
        self.full_record = full_record;
        self
    }

    pub fn parse_line(&self, line: &str) -> LineOutcome {
        let line = line.trim();

        if line.is_empty() {
            return LineOutcome::Skipped(SkipReason::BlankLine);
        }

        if line.starts_with(COMMENT_CHAR) {
            return LineOutcome::Skipped(SkipReason::CommentLine);
        }

        // Tabs and runs of spaces become a single space, also inside the comment
        let collapsed = line.split_whitespace().collect::<Vec<&str>>().join(" ");

        let (fields, comment) = match collapsed.split_once(COMMENT_CHAR) {
            Some((fields, comment)) => (fields, comment),
            None => (collapsed.as_str(), self.no_comment_text.as_str()),
        };

        let mut tokens = fields.split_whitespace();

        let first = match tokens.next() {
            Some(token) => token,
            None => return LineOutcome::Skipped(SkipReason::NoFields),
        };

        let ip = match Ipv4Addr::from_str(first) {
            Ok(ip) => ip,
            Err(_) => {
                return match Ipv6Addr::from_str(first) {
                    Ok(ipv6) => LineOutcome::Skipped(SkipReason::UnsupportedIpv6(ipv6)),
                    Err(_) => LineOutcome::Skipped(SkipReason::InvalidAddress(first.to_string())),
                };
            }
        };

        let raw_names: Vec<String> = tokens.map(|t| t.to_string()).collect();

        match HostRecord::new(ip, raw_names, &self.default_domain, comment, self.full_record) {
            Some(record) => LineOutcome::Accepted { ip, record },
            None => LineOutcome::Skipped(SkipReason::MissingHostNames(ip)),
        }
    }

    pub fn parse_str(&self, content: &str) -> ParsedHostTable {
        let mut parsed = ParsedHostTable::default();

        for (index, line) in content.lines().enumerate() {
            let line_number = index + 1;

            let reason = match self.parse_line(line) {
                LineOutcome::Accepted { ip, record } => {
                    if parsed.records.insert(ip, record) {
                        continue;
                    }

                    SkipReason::DuplicateAddress(ip)
                }
                LineOutcome::Skipped(reason) => {
                    if let SkipReason::MissingHostNames(_) = reason {
                        warn!("Line {}: {}, skipped", line_number, reason);
                    }
                    reason
                }
            };

            parsed.skipped.push(SkippedLine { line_number, reason });
        }

        info!("Parsed {} host records, {} lines skipped.", parsed.records.len(), parsed.skipped.len());

        parsed
    }
}
