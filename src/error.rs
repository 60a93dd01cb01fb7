use thiserror::Error;

use crate::models::MIN_HISTORY_LEN;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is empty")]
    Empty,
    #[error("first catalog entry has no `disease` field")]
    MissingDisease,
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
}

/// Local precondition failures. None of these ever reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("not enough history for {disease} ({location}): minimum {required}, available {available}")]
    InsufficientHistory {
        disease: String,
        location: String,
        required: usize,
        available: usize,
    },
    #[error("unknown disease: {0}")]
    UnknownDisease(String),
    #[error("no location {location} registered for {disease}")]
    UnknownLocation { disease: String, location: String },
}

impl ValidationError {
    pub fn insufficient(disease: &str, location: &str, available: usize) -> Self {
        ValidationError::InsufficientHistory {
            disease: disease.to_string(),
            location: location.to_string(),
            required: MIN_HISTORY_LEN,
            available,
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("API error ({status}): {body}")]
    Status { status: String, body: String },
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TransportError::Malformed(err.to_string())
        } else {
            TransportError::Network(err)
        }
    }
}

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl PredictionError {
    /// Message shown next to the disease buttons.
    pub fn user_message(&self) -> String {
        match self {
            PredictionError::Validation(e) => format!("Error: {}", e),
            PredictionError::Transport(e) => format!("Prediction failed: {}", e),
        }
    }
}
