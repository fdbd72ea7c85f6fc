//! Objects related to reporting errors from this library

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid sample payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
