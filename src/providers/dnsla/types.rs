use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

use crate::core::record::{
    DEFAULT_PRIORITY, DEFAULT_WEIGHT, Record, RecordType, effective_ttl, relative_name,
    zone_domain,
};

/// Application-level code the API embeds in every successful response.
pub const API_SUCCESS_CODE: i64 = 200;

/// Envelope wrapping every API response body.
#[derive(Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    pub data: Option<T>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct DomainInfo {
    pub id: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub display_domain: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct RecordPage {
    pub total: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<DnslaRecord>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DnslaRecord {
    pub id: String,
    #[serde(default)]
    pub domain_id: String,
    pub host: String,
    #[serde(rename = "type")]
    pub record_type: u16,
    pub data: String,
    #[serde(default)]
    pub ttl: u64,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub preference: u32,
}

/// Filters and paging for the record listing endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordQuery {
    pub domain_id: String,
    pub record_type: Option<u16>,
    pub host: Option<String>,
    pub page_index: u64,
    pub page_size: u64,
}

impl RecordQuery {
    pub fn new(domain_id: impl Into<String>, page_size: u64) -> Self {
        Self {
            domain_id: domain_id.into(),
            record_type: None,
            host: None,
            page_index: 1,
            page_size,
        }
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("pageIndex", self.page_index.to_string()),
            ("pageSize", self.page_size.to_string()),
            ("domainId", self.domain_id.clone()),
        ];
        if let Some(t) = self.record_type {
            params.push(("type", t.to_string()));
        }
        if let Some(host) = &self.host {
            params.push(("host", host.clone()));
        }
        params
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordRequest {
    pub domain_id: String,
    #[serde(rename = "type")]
    pub record_type: u16,
    pub host: String,
    pub data: String,
    pub ttl: u32,
    pub group_id: String,
    pub line_id: String,
    pub preference: u32,
    pub weight: u32,
    pub dominant: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecordRequest {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: u16,
    pub host: String,
    pub data: String,
    pub ttl: u32,
    pub group_id: String,
    pub line_id: String,
    pub preference: u32,
    pub weight: u32,
    pub dominant: bool,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct CreatedRecord {
    #[serde(default)]
    pub id: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Record type codes as used by the API:
// A 1, NS 2, CNAME 5, MX 15, TXT 16, AAAA 28, SRV 33, CAA 257
pub fn to_dnsla_type(t: RecordType) -> u16 {
    match t {
        RecordType::A => 1,
        RecordType::NS => 2,
        RecordType::CNAME => 5,
        RecordType::MX => 15,
        RecordType::TXT => 16,
        RecordType::AAAA => 28,
        RecordType::SRV => 33,
        RecordType::CAA => 257,
    }
}

pub fn from_dnsla_type(code: u16) -> Option<RecordType> {
    match code {
        1 => Some(RecordType::A),
        2 => Some(RecordType::NS),
        5 => Some(RecordType::CNAME),
        15 => Some(RecordType::MX),
        16 => Some(RecordType::TXT),
        28 => Some(RecordType::AAAA),
        33 => Some(RecordType::SRV),
        257 => Some(RecordType::CAA),
        _ => None,
    }
}

/// Converts a listed record. Returns `None` for record kinds the codec does
/// not know.
pub fn to_record(remote: &DnslaRecord, zone: &str) -> Option<Record> {
    Some(Record {
        id: Some(remote.id.clone()),
        name: relative_name(&remote.host, zone_domain(zone)),
        record_type: from_dnsla_type(remote.record_type)?,
        value: remote.data.clone(),
        ttl: Duration::from_secs(remote.ttl),
        priority: remote.preference,
        weight: remote.weight,
    })
}

pub fn to_create_request(rec: &Record, domain_id: &str, zone: &str) -> CreateRecordRequest {
    CreateRecordRequest {
        domain_id: domain_id.to_string(),
        record_type: to_dnsla_type(rec.record_type),
        host: relative_name(&rec.name, zone),
        data: rec.value.clone(),
        ttl: effective_ttl(rec.ttl),
        group_id: String::new(),
        line_id: String::new(),
        preference: DEFAULT_PRIORITY,
        weight: DEFAULT_WEIGHT,
        dominant: false,
    }
}

pub fn to_update_request(rec: &Record, id: &str, zone: &str) -> UpdateRecordRequest {
    UpdateRecordRequest {
        id: id.to_string(),
        record_type: to_dnsla_type(rec.record_type),
        host: relative_name(&rec.name, zone),
        data: rec.value.clone(),
        ttl: effective_ttl(rec.ttl),
        group_id: String::new(),
        line_id: String::new(),
        preference: DEFAULT_PRIORITY,
        weight: DEFAULT_WEIGHT,
        dominant: false,
    }
}

/// The record as the provider stores it after a create or update.
pub fn normalized(rec: &Record, id: Option<String>, zone: &str) -> Record {
    Record {
        id,
        name: relative_name(&rec.name, zone),
        record_type: rec.record_type,
        value: rec.value.clone(),
        ttl: Duration::from_secs(u64::from(effective_ttl(rec.ttl))),
        priority: DEFAULT_PRIORITY,
        weight: DEFAULT_WEIGHT,
    }
}
