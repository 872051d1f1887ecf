use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::auth::credentials::Credentials;
use crate::error::Error;
use crate::providers::dnsla::error::DnslaError;
use crate::providers::dnsla::types::*;

pub const DEFAULT_API_URL: &str = "https://api.dns.la";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct DnslaConfig {
    #[serde(flatten)]
    pub credentials: Credentials,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl DnslaConfig {
    pub fn new(api_id: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(api_id, api_secret),
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

/// The provider's REST endpoints, one method per call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DnslaApi: Send + Sync {
    async fn get_domain(&self, domain: &str) -> Result<DomainInfo, DnslaError>;
    async fn list_records(&self, query: &RecordQuery) -> Result<RecordPage, DnslaError>;
    async fn create_record(&self, req: &CreateRecordRequest) -> Result<CreatedRecord, DnslaError>;
    async fn update_record(&self, req: &UpdateRecordRequest) -> Result<(), DnslaError>;
    async fn delete_record(&self, id: &str) -> Result<(), DnslaError>;
}

/// HTTP implementation of [`DnslaApi`] with the authorization header
/// computed once at construction.
pub struct DnslaClient {
    config: DnslaConfig,
    client: Client,
    authorization: String,
}

impl fmt::Debug for DnslaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DnslaClient")
            .field("config", &self.config)
            .field("authorization", &"<REDACTED>")
            .finish()
    }
}

impl DnslaClient {
    pub fn new(config: DnslaConfig) -> Result<Self, Error> {
        config.credentials.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;
        let authorization = config.credentials.authorization();

        Ok(Self {
            config,
            client,
            authorization,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(method = method.as_str(), path, "dns.la request");
        let url = format!("{}{}", self.config.api_url.trim_end_matches('/'), path);
        self.client
            .request(method, url)
            .header(AUTHORIZATION, &self.authorization)
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
    }

    /// Sends `req` and decodes the response envelope into `T`.
    ///
    /// Both a non-2xx HTTP status and an embedded code other than 200 are
    /// failures.
    async fn envelope<T>(&self, req: RequestBuilder) -> Result<ApiResponse<T>, DnslaError>
    where
        T: DeserializeOwned,
    {
        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(DnslaError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let envelope: ApiResponse<T> = serde_json::from_slice(&bytes)?;
        if envelope.code != API_SUCCESS_CODE {
            return Err(DnslaError::Api {
                code: envelope.code,
                message: envelope.msg,
            });
        }
        Ok(envelope)
    }

    async fn send<T>(&self, req: RequestBuilder, what: &'static str) -> Result<T, DnslaError>
    where
        T: DeserializeOwned,
    {
        self.envelope(req)
            .await?
            .data
            .ok_or(DnslaError::MissingData(what))
    }

    async fn execute(&self, req: RequestBuilder) -> Result<(), DnslaError> {
        self.envelope::<IgnoredAny>(req).await.map(|_| ())
    }
}

#[async_trait]
impl DnslaApi for DnslaClient {
    async fn get_domain(&self, domain: &str) -> Result<DomainInfo, DnslaError> {
        let req = self
            .request(Method::GET, "/api/domain")
            .query(&[("domain", domain)]);
        let info: DomainInfo = self.send(req, "domain").await?;
        if info.id.is_empty() {
            return Err(DnslaError::DomainNotFound(domain.to_string()));
        }
        Ok(info)
    }

    async fn list_records(&self, query: &RecordQuery) -> Result<RecordPage, DnslaError> {
        let req = self
            .request(Method::GET, "/api/recordList")
            .query(&query.params());
        self.send(req, "record list").await
    }

    async fn create_record(&self, req: &CreateRecordRequest) -> Result<CreatedRecord, DnslaError> {
        let req = self.request(Method::POST, "/api/record").json(req);
        // an empty data object still counts as success; the id is recovered later
        Ok(self.envelope(req).await?.data.unwrap_or_default())
    }

    async fn update_record(&self, req: &UpdateRecordRequest) -> Result<(), DnslaError> {
        let req = self.request(Method::PUT, "/api/record").json(req);
        self.execute(req).await
    }

    async fn delete_record(&self, id: &str) -> Result<(), DnslaError> {
        let req = self
            .request(Method::DELETE, "/api/record")
            .query(&[("id", id)]);
        self.execute(req).await
    }
}
