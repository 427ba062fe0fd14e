// libs/booking-cell/src/services/submission.rs
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use shared_api::{ApiEnvelope, HimsClient};
use shared_models::BookingError;

use crate::models::{BookingConfirmation, BookingPayload};

pub const APPOINTMENTS_PATH: &str = "/api/appointments";

/// Message the API returns when the same booking is posted twice. Treated
/// as idempotent success, not a failure.
pub const ALREADY_SUBMITTED_MESSAGE: &str = "Appointment already submitted";

/// Adapter over the booking service endpoint.
pub struct BookingService {
    client: Arc<HimsClient>,
}

impl BookingService {
    pub fn new(client: Arc<HimsClient>) -> Self {
        Self { client }
    }

    /// Submit a booking. A response reporting the appointment was already
    /// submitted resolves to success with the existing appointment id.
    pub async fn submit(&self, payload: &BookingPayload) -> Result<BookingConfirmation, BookingError> {
        info!(
            "Submitting booking for doctor {} on {}",
            payload.doctor_id, payload.date
        );

        let body = serde_json::to_value(payload)
            .map_err(|e| BookingError::Remote(format!("Failed to encode payload: {}", e)))?;

        let raw: Value = self
            .client
            .request(Method::POST, APPOINTMENTS_PATH, None, Some(body))
            .await
            .map_err(|e| BookingError::Remote(e.to_string()))?;

        let envelope = ApiEnvelope::from_value(raw);
        let appointment_id = envelope
            .data
            .as_ref()
            .and_then(|data| data.get("_id"))
            .and_then(|id| id.as_str())
            .map(str::to_string);

        if envelope.is_success {
            let appointment_id = appointment_id.ok_or_else(|| {
                BookingError::Remote("Booking succeeded but no appointment id returned".to_string())
            })?;
            info!("Booking confirmed, appointment {}", appointment_id);
            return Ok(BookingConfirmation {
                appointment_id,
                already_submitted: false,
            });
        }

        if envelope.message.as_deref() == Some(ALREADY_SUBMITTED_MESSAGE) {
            let appointment_id = appointment_id.unwrap_or_default();
            info!(
                "Booking already submitted, existing appointment '{}'",
                appointment_id
            );
            return Ok(BookingConfirmation {
                appointment_id,
                already_submitted: true,
            });
        }

        let message = envelope
            .message
            .unwrap_or_else(|| "Failed to book appointment".to_string());
        warn!("Booking rejected: {}", message);
        Err(BookingError::Remote(message))
    }
}
