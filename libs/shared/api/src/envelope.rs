use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use shared_models::BookingError;

/// Canonical shape of every HIMS API response. The upstream service is
/// inconsistent about nesting: list payloads usually arrive under `data`
/// but some endpoints return them flat, and failure responses may carry
/// `data` alongside `message`. Everything is normalised here so the cells
/// only ever see one shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope {
    #[serde(default)]
    pub is_success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiEnvelope {
    /// Wrap a raw response body. A body that is not an envelope at all
    /// (a bare array or object) is treated as a successful flat payload.
    pub fn from_value(value: Value) -> Self {
        match serde_json::from_value::<ApiEnvelope>(value.clone()) {
            Ok(envelope) if envelope.data.is_some() || envelope.message.is_some() => envelope,
            _ => {
                debug!("Response body is not an envelope, treating as flat payload");
                ApiEnvelope {
                    is_success: true,
                    data: Some(value),
                    message: None,
                }
            }
        }
    }

    /// Decode the payload, failing with `Remote` when the service
    /// reported an error or the payload does not match `T`.
    pub fn into_payload<T: DeserializeOwned>(self) -> Result<T, BookingError> {
        if !self.is_success && self.data.is_none() {
            return Err(BookingError::Remote(
                self.message
                    .unwrap_or_else(|| "Request failed".to_string()),
            ));
        }

        let data = self
            .data
            .ok_or_else(|| BookingError::Remote("Response carried no data".to_string()))?;

        serde_json::from_value(data)
            .map_err(|e| BookingError::Remote(format!("Failed to parse response payload: {}", e)))
    }
}
