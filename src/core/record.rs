use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::Error;

/// Lowest TTL, in seconds, that is ever sent to the provider.
pub const MIN_TTL_SECS: u64 = 600;

/// Priority and weight sent with every created or updated record.
pub const DEFAULT_PRIORITY: u32 = 1;
pub const DEFAULT_WEIGHT: u32 = 1;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    NS,
    CNAME,
    MX,
    TXT,
    AAAA,
    SRV,
    CAA,
}

impl RecordType {
    pub const ALL: [RecordType; 8] = [
        RecordType::A,
        RecordType::NS,
        RecordType::CNAME,
        RecordType::MX,
        RecordType::TXT,
        RecordType::AAAA,
        RecordType::SRV,
        RecordType::CAA,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::NS => "NS",
            RecordType::CNAME => "CNAME",
            RecordType::MX => "MX",
            RecordType::TXT => "TXT",
            RecordType::AAAA => "AAAA",
            RecordType::SRV => "SRV",
            RecordType::CAA => "CAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidInput(format!("unsupported record type: {s}")))
    }
}

/// A DNS record as seen by callers.
///
/// `name` is relative to the zone (`@` for the apex). `id` is the
/// provider-assigned identifier; `None` or an empty string means the caller
/// does not know it yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    pub id: Option<String>,
    pub name: String,
    pub record_type: RecordType,
    pub value: String,
    pub ttl: Duration,
    pub priority: u32,
    pub weight: u32,
}

impl Record {
    pub fn new(name: impl Into<String>, record_type: RecordType, value: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            record_type,
            value: value.into(),
            ttl: Duration::from_secs(MIN_TTL_SECS),
            priority: DEFAULT_PRIORITY,
            weight: DEFAULT_WEIGHT,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Returns the identifier if it is known and non-empty.
    pub fn known_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Strips the trailing dot from a zone name.
pub fn zone_domain(zone: &str) -> &str {
    zone.trim_end_matches('.')
}

/// Expresses `name` relative to `zone`.
///
/// Fully-qualified names inside the zone lose the zone suffix, the zone
/// itself becomes `@`, and names that are already relative pass through.
pub fn relative_name(name: &str, zone: &str) -> String {
    let zone = zone_domain(zone);
    let name = name.trim_end_matches('.');

    if name.is_empty() || name.eq_ignore_ascii_case(zone) {
        return String::from("@");
    }

    let split = name.len().saturating_sub(zone.len() + 1);
    if !zone.is_empty()
        && name.len() > zone.len()
        && name.as_bytes()[split] == b'.'
        && name[split + 1..].eq_ignore_ascii_case(zone)
    {
        return name[..split].to_string();
    }

    name.to_string()
}

/// TTL in seconds as sent to the provider, never below [`MIN_TTL_SECS`].
pub fn effective_ttl(ttl: Duration) -> u32 {
    let secs = ttl.as_secs().max(MIN_TTL_SECS);
    u32::try_from(secs).unwrap_or(u32::MAX)
}
