use tracing::{debug, info, warn};

use crate::core::record::{Record, relative_name, zone_domain};
use crate::error::{BatchError, Error};
use crate::providers::dnsla::client::{DnslaApi, DnslaClient, DnslaConfig};
use crate::providers::dnsla::types::*;

/// Page size of the first listing request.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Reconciles caller records against a dns.la zone.
///
/// Every call resolves the zone's domain id afresh and holds no record state
/// between calls. Records are processed strictly one after another.
pub struct DnslaProvider<A = DnslaClient> {
    api: A,
}

impl DnslaProvider<DnslaClient> {
    pub fn new(config: DnslaConfig) -> Result<Self, Error> {
        Ok(Self::with_api(DnslaClient::new(config)?))
    }
}

impl<A: DnslaApi> DnslaProvider<A> {
    pub fn with_api(api: A) -> Self {
        Self { api }
    }

    async fn domain_id(&self, zone: &str) -> Result<String, Error> {
        let info = self.api.get_domain(zone_domain(zone)).await?;
        Ok(info.id)
    }

    /// Fetches every row matching `query`.
    ///
    /// The first page is requested with [`DEFAULT_PAGE_SIZE`]; when the
    /// reported total is larger, a single follow-up request asks for a page
    /// of exactly `total` rows so the whole set arrives at once.
    async fn fetch_all(&self, mut query: RecordQuery) -> Result<Vec<DnslaRecord>, Error> {
        query.page_index = 1;
        query.page_size = DEFAULT_PAGE_SIZE;
        let mut page = self.api.list_records(&query).await?;

        if page.total > DEFAULT_PAGE_SIZE {
            query.page_size = page.total;
            page = self.api.list_records(&query).await?;
        }

        if (page.results.len() as u64) < page.total {
            warn!(
                total = page.total,
                received = page.results.len(),
                "record listing shorter than reported total"
            );
        }
        Ok(page.results)
    }

    fn to_records(remote: &[DnslaRecord], zone: &str) -> Vec<Record> {
        remote
            .iter()
            .filter_map(|r| {
                let record = to_record(r, zone);
                if record.is_none() {
                    warn!(id = %r.id, code = r.record_type, "skipping record of unsupported type");
                }
                record
            })
            .collect()
    }

    /// Lists every record of the zone behind `domain_id`.
    pub async fn list_zone_records(
        &self,
        domain_id: &str,
        zone: &str,
    ) -> Result<Vec<Record>, Error> {
        let remote = self
            .fetch_all(RecordQuery::new(domain_id, DEFAULT_PAGE_SIZE))
            .await?;
        let records = Self::to_records(&remote, zone);
        debug!(zone, count = records.len(), "listed zone records");
        Ok(records)
    }

    /// Finds the remote records sharing `record`'s relative host and type.
    pub async fn find_matching(
        &self,
        record: &Record,
        domain_id: &str,
        zone: &str,
    ) -> Result<Vec<Record>, Error> {
        let host = relative_name(&record.name, zone);
        let mut query = RecordQuery::new(domain_id, DEFAULT_PAGE_SIZE);
        query.record_type = Some(to_dnsla_type(record.record_type));
        query.host = Some(host.clone());

        let remote = self.fetch_all(query).await?;
        Ok(Self::to_records(&remote, zone)
            .into_iter()
            .filter(|r| r.record_type == record.record_type && r.name.eq_ignore_ascii_case(&host))
            .collect())
    }

    pub async fn list(&self, zone: &str) -> Result<Vec<Record>, Error> {
        let domain_id = self.domain_id(zone).await?;
        self.list_zone_records(&domain_id, zone).await
    }

    pub async fn append(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>, BatchError> {
        let domain_id = self.domain_id(zone).await?;

        let mut applied = Vec::with_capacity(records.len());
        if let Err(e) = self.create_all(&domain_id, zone, records, &mut applied).await {
            return Err(BatchError::new(applied, e));
        }
        Ok(applied)
    }

    /// Creates or updates `records`.
    ///
    /// Records without an id are looked up by host and type first: no match
    /// means create, one match lends its id to an update, and several matches
    /// abort the whole call before anything is sent. The result lists created
    /// records before updated ones.
    pub async fn set(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>, BatchError> {
        let domain_id = self.domain_id(zone).await?;

        let mut creates = Vec::new();
        let mut updates = Vec::new();
        for record in records {
            if record.known_id().is_some() {
                updates.push(record.clone());
                continue;
            }

            let matches = self.find_matching(record, &domain_id, zone).await?;
            match matches.as_slice() {
                [] => creates.push(record.clone()),
                [existing] => {
                    let id = existing.known_id().unwrap_or_default();
                    updates.push(record.clone().with_id(id));
                }
                _ => return Err(ambiguous(record, matches.len(), zone).into()),
            }
        }
        debug!(zone, creates = creates.len(), updates = updates.len(), "classified records");

        let mut applied = Vec::with_capacity(records.len());
        if let Err(e) = self.create_all(&domain_id, zone, &creates, &mut applied).await {
            return Err(BatchError::new(applied, e));
        }
        if let Err(e) = self.update_all(zone, &updates, &mut applied).await {
            return Err(BatchError::new(applied, e));
        }
        Ok(applied)
    }

    pub async fn delete(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>, BatchError> {
        let domain_id = self.domain_id(zone).await?;

        let mut deleted = Vec::new();
        for record in records {
            let targets = match self.delete_targets(record, &domain_id, zone).await {
                Ok(targets) => targets,
                Err(e) => return Err(BatchError::new(deleted, e)),
            };

            for target in targets {
                let Some(id) = target.known_id() else {
                    continue;
                };
                if let Err(e) = self.api.delete_record(id).await {
                    return Err(BatchError::new(deleted, e));
                }
                info!(zone, id, host = %target.name, record_type = %target.record_type, "deleted record");
                deleted.push(target);
            }
        }
        Ok(deleted)
    }

    /// Resolves a delete request to concrete remote records.
    ///
    /// An id is authoritative. Without one, an empty value deletes every
    /// record sharing host and type. A value must single out exactly one of
    /// several matches; a lone match is only deleted when its value agrees.
    async fn delete_targets(
        &self,
        record: &Record,
        domain_id: &str,
        zone: &str,
    ) -> Result<Vec<Record>, Error> {
        if record.known_id().is_some() {
            return Ok(vec![Record {
                name: relative_name(&record.name, zone),
                ..record.clone()
            }]);
        }

        let matches = self.find_matching(record, domain_id, zone).await?;
        if record.value.is_empty() {
            return Ok(matches);
        }

        let candidates = matches.len();
        let targets: Vec<Record> = matches
            .into_iter()
            .filter(|m| m.value == record.value)
            .collect();
        if candidates > 1 && targets.len() != 1 {
            return Err(ambiguous(record, candidates, zone));
        }
        Ok(targets)
    }

    async fn create_all(
        &self,
        domain_id: &str,
        zone: &str,
        records: &[Record],
        applied: &mut Vec<Record>,
    ) -> Result<(), Error> {
        for record in records {
            let created = self.create(domain_id, zone, record).await?;
            applied.push(created);
        }
        Ok(())
    }

    async fn update_all(
        &self,
        zone: &str,
        records: &[Record],
        applied: &mut Vec<Record>,
    ) -> Result<(), Error> {
        for record in records {
            let updated = self.update(zone, record).await?;
            applied.push(updated);
        }
        Ok(())
    }

    async fn create(&self, domain_id: &str, zone: &str, record: &Record) -> Result<Record, Error> {
        let req = to_create_request(record, domain_id, zone);
        let created = self.api.create_record(&req).await?;
        info!(zone, host = %req.host, record_type = %record.record_type, ttl = req.ttl, "created record");

        let id = if created.id.is_empty() {
            self.recover_id(record, domain_id, zone).await
        } else {
            Some(created.id)
        };
        Ok(normalized(record, id, zone))
    }

    /// Best-effort lookup of a freshly created record's id. Failures are
    /// logged and yield `None`.
    async fn recover_id(&self, record: &Record, domain_id: &str, zone: &str) -> Option<String> {
        let matches = match self.find_matching(record, domain_id, zone).await {
            Ok(matches) => matches,
            Err(e) => {
                warn!(zone, host = %record.name, error = %e, "could not recover id of created record");
                return None;
            }
        };

        let mut candidates: Vec<&Record> = matches.iter().collect();
        if candidates.len() > 1 {
            candidates.retain(|m| m.value == record.value);
        }
        match candidates.as_slice() {
            [only] => only.id.clone(),
            _ => {
                warn!(
                    zone,
                    host = %record.name,
                    matches = candidates.len(),
                    "created record id is ambiguous, returning it without one"
                );
                None
            }
        }
    }

    async fn update(&self, zone: &str, record: &Record) -> Result<Record, Error> {
        let id = record
            .known_id()
            .ok_or_else(|| Error::InvalidInput(format!("record {} has no id", record.name)))?;
        let req = to_update_request(record, id, zone);
        self.api.update_record(&req).await?;
        info!(zone, id, host = %req.host, record_type = %record.record_type, ttl = req.ttl, "updated record");
        Ok(normalized(record, Some(id.to_string()), zone))
    }
}

fn ambiguous(record: &Record, count: usize, zone: &str) -> Error {
    Error::AmbiguousMatch(format!(
        "{} record {:?} in {} matches {} existing records; supply an explicit id",
        record.record_type,
        relative_name(&record.name, zone),
        zone_domain(zone),
        count
    ))
}
