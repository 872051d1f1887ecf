//! dns.la provider implementation

pub mod client;
pub mod error;
pub mod provider;
pub mod types;

#[cfg(test)]
mod tests;

pub use client::{DnslaApi, DnslaClient, DnslaConfig};
pub use error::DnslaError;
pub use provider::DnslaProvider;
// --- capability trait implementations for DnslaProvider ---
use crate::core::provider::{RecordAppender, RecordDeleter, RecordGetter, RecordSetter};
use crate::core::record::Record;
use crate::error::{BatchError, Error};
use async_trait::async_trait;

#[async_trait]
impl<A: DnslaApi> RecordGetter for DnslaProvider<A> {
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>, Error> {
        self.list(zone).await
    }
}

#[async_trait]
impl<A: DnslaApi> RecordAppender for DnslaProvider<A> {
    async fn append_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, BatchError> {
        self.append(zone, records).await
    }
}

#[async_trait]
impl<A: DnslaApi> RecordSetter for DnslaProvider<A> {
    async fn set_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>, BatchError> {
        self.set(zone, records).await
    }
}

#[async_trait]
impl<A: DnslaApi> RecordDeleter for DnslaProvider<A> {
    async fn delete_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, BatchError> {
        self.delete(zone, records).await
    }
}
