use thiserror::Error;

#[derive(Error, Debug)]
pub enum DnslaError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response code {code}: {message}")]
    Api { code: i64, message: String },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Response carried no data for {0}")]
    MissingData(&'static str),

    #[error("Domain not found: {0}")]
    DomainNotFound(String),
}

use crate::error::Error;

impl From<DnslaError> for Error {
    fn from(e: DnslaError) -> Self {
        use DnslaError::*;
        match e {
            Http(err) if err.is_decode() => Error::Decode(err.to_string()),
            Http(err) => Error::Transport(err.to_string()),
            Status { status, body } => Error::Status {
                status,
                message: body,
            },
            Api { code, message } => Error::Api { code, message },
            Decode(err) => Error::Decode(err.to_string()),
            MissingData(what) => Error::Decode(format!("response carried no data for {what}")),
            DomainNotFound(domain) => Error::NotFound(domain),
        }
    }
}
