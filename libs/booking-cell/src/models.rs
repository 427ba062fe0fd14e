// libs/booking-cell/src/models.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ==============================================================================
// BOOKING MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeStatus {
    Paid,
    Unpaid,
}

impl Default for FeeStatus {
    fn default() -> Self {
        FeeStatus::Unpaid
    }
}

impl fmt::Display for FeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeeStatus::Paid => write!(f, "paid"),
            FeeStatus::Unpaid => write!(f, "unpaid"),
        }
    }
}

/// Request body the booking service accepts. Field names mirror the HIMS
/// API contract; this struct is assembled locally and transmitted as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    pub doctor_id: String,
    pub patient_id: String,
    pub date: NaiveDate,
    pub slot_id: String,
    pub services: Vec<String>,
    pub fee_status: FeeStatus,
    pub appointment_date: NaiveDate,
    pub fee: i64,
    #[serde(default)]
    pub extra: Value,
    pub discount: i64,
    pub discount_in_percentage: i64,
}

/// Outcome of a booking submission. `already_submitted` marks the
/// idempotent path where the API reports the appointment exists and hands
/// back its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfirmation {
    pub appointment_id: String,
    pub already_submitted: bool,
}

// ==============================================================================
// ASYNC REQUEST MODELS
// ==============================================================================

/// Identity of an in-flight slot fetch. A response is applied only while
/// its key still matches the active selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestKey {
    pub doctor_id: String,
    pub date: NaiveDate,
}

impl RequestKey {
    pub fn new(doctor_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            doctor_id: doctor_id.into(),
            date,
        }
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doctor {} on {}", self.doctor_id, self.date)
    }
}
