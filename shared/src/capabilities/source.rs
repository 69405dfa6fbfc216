use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use super::location_data::FetchRequest;
use crate::MAX_OPTION_LABEL_LENGTH;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FetchError {
    #[error("network error: {reason}")]
    Network { reason: String },

    #[error("unexpected status {code}")]
    Status { code: u16 },

    #[error("failed to decode response: {reason}")]
    Decode { reason: String },

    #[error("not found: {what}")]
    NotFound { what: String },
}

impl FetchError {
    pub fn network(reason: impl Into<String>) -> Self {
        Self::Network {
            reason: reason.into(),
        }
    }

    /// Whether a later attempt could succeed. The selector never retries on
    /// its own; shells may use this to decide whether to offer a retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Status { code } => *code == 429 || *code >= 500,
            Self::Decode { .. } | Self::NotFound { .. } => false,
        }
    }
}

/// Option lists for each level, already normalized to plain labels.
#[async_trait::async_trait]
pub trait LocationDataSource: Send + Sync {
    async fn list_countries(&self) -> Result<Vec<String>, FetchError>;

    async fn list_states(&self, country: &str) -> Result<Vec<String>, FetchError>;

    async fn list_districts(&self, country: &str, state: &str) -> Result<Vec<String>, FetchError>;

    async fn list_cities(
        &self,
        country: &str,
        state: &str,
        district: &str,
    ) -> Result<Vec<String>, FetchError>;
}

#[async_trait::async_trait]
impl<T: LocationDataSource + ?Sized> LocationDataSource for Arc<T> {
    async fn list_countries(&self) -> Result<Vec<String>, FetchError> {
        (**self).list_countries().await
    }

    async fn list_states(&self, country: &str) -> Result<Vec<String>, FetchError> {
        (**self).list_states(country).await
    }

    async fn list_districts(&self, country: &str, state: &str) -> Result<Vec<String>, FetchError> {
        (**self).list_districts(country, state).await
    }

    async fn list_cities(
        &self,
        country: &str,
        state: &str,
        district: &str,
    ) -> Result<Vec<String>, FetchError> {
        (**self).list_cities(country, state, district).await
    }
}

/// Runs the data-source call a `FetchRequest` describes.
pub async fn fetch_options<S>(source: &S, request: &FetchRequest) -> Result<Vec<String>, FetchError>
where
    S: LocationDataSource + ?Sized,
{
    match request {
        FetchRequest::Countries => source.list_countries().await,
        FetchRequest::States { country } => source.list_states(country).await,
        FetchRequest::Districts { country, state } => source.list_districts(country, state).await,
        FetchRequest::Cities {
            country,
            state,
            district,
        } => source.list_cities(country, state, district).await,
    }
}

// --- Raw transport shapes ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatesPayload {
    pub states: Vec<StateRecord>,
}

/// Decodes a `{"data": ...}` response body.
pub fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<T, FetchError> {
    serde_json::from_slice::<ApiEnvelope<T>>(body)
        .map(|envelope| envelope.data)
        .map_err(|e| FetchError::Decode {
            reason: e.to_string(),
        })
}

/// The location API as the transport sees it: countries and states arrive as
/// `{name}` records, districts and cities as bare strings.
#[async_trait::async_trait]
pub trait LocationApi: Send + Sync {
    async fn countries(&self) -> Result<Vec<CountryRecord>, FetchError>;

    async fn states(&self, country: &str) -> Result<StatesPayload, FetchError>;

    async fn districts(&self, country: &str, state: &str) -> Result<Vec<String>, FetchError>;

    async fn cities(
        &self,
        country: &str,
        state: &str,
        district: &str,
    ) -> Result<Vec<String>, FetchError>;
}

/// Drops blank, over-long and repeated labels. Order is preserved.
pub fn normalize_labels(labels: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    labels
        .into_iter()
        .filter(|label| {
            if label.trim().is_empty() || label.len() > MAX_OPTION_LABEL_LENGTH {
                debug!(len = label.len(), "dropping unusable option label");
                return false;
            }
            seen.insert(label.clone())
        })
        .collect()
}

/// Adapts a raw `LocationApi` into a `LocationDataSource`.
pub struct NormalizingSource<A> {
    api: A,
}

impl<A: LocationApi> NormalizingSource<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}

#[async_trait::async_trait]
impl<A: LocationApi> LocationDataSource for NormalizingSource<A> {
    async fn list_countries(&self) -> Result<Vec<String>, FetchError> {
        let records = self.api.countries().await?;
        Ok(normalize_labels(records.into_iter().map(|r| r.name)))
    }

    async fn list_states(&self, country: &str) -> Result<Vec<String>, FetchError> {
        let payload = self.api.states(country).await?;
        Ok(normalize_labels(payload.states.into_iter().map(|r| r.name)))
    }

    async fn list_districts(&self, country: &str, state: &str) -> Result<Vec<String>, FetchError> {
        Ok(normalize_labels(self.api.districts(country, state).await?))
    }

    async fn list_cities(
        &self,
        country: &str,
        state: &str,
        district: &str,
    ) -> Result<Vec<String>, FetchError> {
        Ok(normalize_labels(
            self.api.cities(country, state, district).await?,
        ))
    }
}
