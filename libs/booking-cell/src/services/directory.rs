// libs/booking-cell/src/services/directory.rs
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use scheduling_cell::models::{Doctor, Specialization};
use shared_api::{ApiEnvelope, HimsClient};
use shared_models::BookingError;

pub const DOCTORS_PATH: &str = "/api/doctors";
pub const SPECIALIZATIONS_PATH: &str = "/api/specializations";

/// Read-only adapter over the doctor and specialization directory
/// endpoints. Responses are normalised through `ApiEnvelope` before they
/// reach the wizard.
pub struct DirectoryService {
    client: Arc<HimsClient>,
}

impl DirectoryService {
    pub fn new(client: Arc<HimsClient>) -> Self {
        Self { client }
    }

    pub async fn get_doctors(&self) -> Result<Vec<Doctor>, BookingError> {
        debug!("Fetching doctor directory");

        let raw: Value = self
            .client
            .request(Method::GET, DOCTORS_PATH, None, None)
            .await
            .map_err(|e| BookingError::Remote(e.to_string()))?;

        let doctors: Vec<Doctor> = ApiEnvelope::from_value(raw).into_payload()?;
        debug!("Fetched {} doctors", doctors.len());
        Ok(doctors)
    }

    pub async fn get_specializations(&self) -> Result<Vec<Specialization>, BookingError> {
        debug!("Fetching specialization directory");

        let raw: Value = self
            .client
            .request(Method::GET, SPECIALIZATIONS_PATH, None, None)
            .await
            .map_err(|e| BookingError::Remote(e.to_string()))?;

        let specializations: Vec<Specialization> = ApiEnvelope::from_value(raw).into_payload()?;
        debug!("Fetched {} specializations", specializations.len());
        Ok(specializations)
    }
}
