use std::{error, fmt};

pub mod client;
pub mod database;
pub mod memory;
pub mod provider;

/// Failures of resolving a pincode and date into weather data.
#[derive(Debug)]
pub enum RequestError {
    /// The provider could not be reached or answered with a non-success status.
    UpstreamUnavailable(String),
    /// The provider answered, but does not know the requested item.
    NotFoundUpstream(String),
    /// The provider answered with a payload lacking required fields.
    MalformedUpstreamResponse(String),
    /// A concurrent request inserted the same natural key first.
    StorageConstraintViolation(String),
    Storage(database::DatabaseError),
}

impl error::Error for RequestError {}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UpstreamUnavailable(why) => {
                write!(f, "Weather provider unavailable: {}", why)
            }
            Self::NotFoundUpstream(why) => {
                write!(f, "Weather provider has no data: {}", why)
            }
            Self::MalformedUpstreamResponse(why) => {
                write!(f, "Malformed weather provider response: {}", why)
            }
            Self::StorageConstraintViolation(why) => {
                write!(f, "Storage constraint violated: {}", why)
            }
            Self::Storage(why) => write!(f, "Storage error: {}", why),
        }
    }
}

impl From<database::DatabaseError> for RequestError {
    fn from(value: database::DatabaseError) -> Self {
        match value {
            database::DatabaseError::Conflict(why) => {
                Self::StorageConstraintViolation(why)
            }
            other => Self::Storage(other),
        }
    }
}

impl From<provider::ProviderError> for RequestError {
    fn from(value: provider::ProviderError) -> Self {
        match value {
            provider::ProviderError::Unavailable(why) => {
                Self::UpstreamUnavailable(why)
            }
            provider::ProviderError::Malformed(why) => {
                Self::MalformedUpstreamResponse(why)
            }
        }
    }
}

pub type RequestResult<O> = Result<O, RequestError>;
