//! Capability traits a DNS provider can implement.
//!
//! Each trait carries a single operation so consumers can depend on exactly
//! the subset they need (an ACME DNS-01 solver only needs append + delete).
//! All batch operations process records sequentially in input order and stop
//! at the first failure; see [`BatchError`].

use crate::core::record::Record;
use crate::error::{BatchError, Error};
use async_trait::async_trait;

#[async_trait]
pub trait RecordGetter: Send + Sync {
    /// Lists every record currently stored in `zone`.
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>, Error>;
}

#[async_trait]
pub trait RecordAppender: Send + Sync {
    /// Creates `records` in `zone` and returns them as created.
    async fn append_records(&self, zone: &str, records: &[Record])
    -> Result<Vec<Record>, BatchError>;
}

#[async_trait]
pub trait RecordSetter: Send + Sync {
    /// Creates or updates `records` so the zone holds them.
    ///
    /// Created records come first in the result, followed by updated ones.
    async fn set_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>, BatchError>;
}

#[async_trait]
pub trait RecordDeleter: Send + Sync {
    /// Deletes `records` from `zone` and returns what was removed.
    async fn delete_records(&self, zone: &str, records: &[Record])
    -> Result<Vec<Record>, BatchError>;
}
