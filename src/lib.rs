//! Record reconciliation client for the dns.la hosting API.
//!
//! Callers describe the records a zone should hold; the provider works out
//! which of them already exist remotely (by id, or by host and type when no
//! id is known) and issues the matching create, update and delete calls.
//!
//! ```no_run
//! use dnsla_provider::{DnslaConfig, DnslaProvider, Record, RecordSetter, RecordType};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = DnslaProvider::new(DnslaConfig::new("api-id", "api-secret"))?;
//! let record = Record::new("_acme-challenge", RecordType::TXT, "token");
//! let changed = provider.set_records("example.com.", &[record]).await?;
//! println!("{} record(s) changed", changed.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod core;
pub mod error;
pub mod providers;

pub use auth::credentials::Credentials;
pub use crate::core::provider::{RecordAppender, RecordDeleter, RecordGetter, RecordSetter};
pub use crate::core::record::{Record, RecordType};
pub use error::{BatchError, Error};
pub use providers::dnsla::{DnslaConfig, DnslaProvider};
