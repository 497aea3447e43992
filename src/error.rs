use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthdevError {
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        source: reqwest::Error,
    },

    #[error("{path} returned {status}: {body}")]
    Status {
        path: String,
        status: StatusCode,
        body: String,
    },

    #[error("malformed payload from {path}: {source}")]
    Decode {
        path: String,
        source: serde_json::Error,
    },

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AuthdevError>;
