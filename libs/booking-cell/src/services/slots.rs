// libs/booking-cell/src/services/slots.rs
use reqwest::Method;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tracing::debug;

use scheduling_cell::models::TimeSlot;
use shared_api::{ApiEnvelope, HimsClient};
use shared_models::BookingError;

use crate::models::RequestKey;

pub const TIME_SLOTS_PATH: &str = "/api/timeslots";

/// Adapter over the slot service endpoint, keyed by doctor and date.
pub struct SlotService {
    client: Arc<HimsClient>,
}

impl SlotService {
    pub fn new(client: Arc<HimsClient>) -> Self {
        Self { client }
    }

    pub async fn get_slots(&self, key: &RequestKey) -> Result<Vec<TimeSlot>, BookingError> {
        debug!("Fetching slots for {}", key);

        let path = format!(
            "{}?doctorId={}&date={}",
            TIME_SLOTS_PATH, key.doctor_id, key.date
        );
        let raw: Value = self
            .client
            .request(Method::GET, &path, None, None)
            .await
            .map_err(|e| BookingError::Remote(e.to_string()))?;

        let slots: Vec<TimeSlot> = ApiEnvelope::from_value(raw).into_payload()?;
        debug!("Fetched {} slots for {}", slots.len(), key);
        Ok(slots)
    }
}

/// Guard against stale async results. The active key is replaced whenever
/// the user changes doctor or date; a response is accepted only while its
/// key still matches, otherwise it is discarded as `StaleResponse`.
#[derive(Default)]
pub struct ActiveRequest {
    key: Mutex<Option<RequestKey>>,
}

impl ActiveRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as the selection in flight, superseding any earlier one.
    pub fn begin(&self, key: RequestKey) {
        let mut active = self.key.lock().unwrap_or_else(|e| e.into_inner());
        *active = Some(key);
    }

    /// Forget the active key, e.g. on screen teardown.
    pub fn clear(&self) {
        let mut active = self.key.lock().unwrap_or_else(|e| e.into_inner());
        *active = None;
    }

    pub fn current(&self) -> Option<RequestKey> {
        self.key
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Pass `value` through if `key` is still the active selection.
    pub fn accept<T>(&self, key: &RequestKey, value: T) -> Result<T, BookingError> {
        let active = self.key.lock().unwrap_or_else(|e| e.into_inner());
        match active.as_ref() {
            Some(current) if current == key => Ok(value),
            _ => {
                debug!("Discarding stale response for {}", key);
                Err(BookingError::StaleResponse(key.to_string()))
            }
        }
    }
}
