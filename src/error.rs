use std::path::PathBuf;

use thiserror::Error;

use crate::model::{MAX_YEAR, MIN_YEAR};

/// Rejected user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("year {0} is outside the supported range {}-{}", MIN_YEAR, MAX_YEAR)]
    YearOutOfRange(i32),
    #[error("year '{0}' is not a whole number")]
    InvalidYear(String),
    #[error("unknown data category '{0}'")]
    UnknownCategory(String),
}

/// Failure talking to one of the external data services.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("response could not be decoded: {0}")]
    Decode(String),
    #[error("response contained no usable values")]
    EmptySeries,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("config validation error: {0}")]
    Validation(String),
}
