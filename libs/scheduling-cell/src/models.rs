// libs/scheduling-cell/src/models.rs
use serde::{Deserialize, Serialize};
use std::fmt;

// ==============================================================================
// DOCTOR DIRECTORY MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    #[serde(rename = "_id")]
    pub id: String,
    pub full_name: String,
    pub specialization: String,
    #[serde(default)]
    pub designation_detail: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    /// Display strings from the directory service ("Monday", ...).
    #[serde(default)]
    pub available_days: Vec<String>,
    #[serde(default)]
    pub weekly_schedule: Vec<DaySchedule>,
    #[serde(default)]
    pub services: Vec<Service>,
}

impl Doctor {
    /// The doctor's default consultation service, by convention the first
    /// entry in the service list.
    pub fn default_service(&self) -> Option<&Service> {
        self.services.first()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day: String,
    /// Wire field name is the upstream API's spelling.
    #[serde(rename = "timingScheedules", default)]
    pub time_ranges: Vec<TimeRange>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub time_from: String,
    pub time_to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(rename = "_id")]
    pub id: String,
    pub service_name: String,
    #[serde(default)]
    pub fee: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Specialization {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "specializations")]
    pub name: String,
    #[serde(rename = "details", default)]
    pub description: String,
}

// ==============================================================================
// TIME SLOT MODELS
// ==============================================================================

/// Persisted slot state as reported by the slot service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub enum SlotStatus {
    Available,
    Booked,
    Expired,
}

impl TryFrom<u8> for SlotStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SlotStatus::Available),
            1 => Ok(SlotStatus::Booked),
            2 => Ok(SlotStatus::Expired),
            other => Err(format!("Unknown slot status: {}", other)),
        }
    }
}

impl From<SlotStatus> for u8 {
    fn from(status: SlotStatus) -> u8 {
        match status {
            SlotStatus::Available => 0,
            SlotStatus::Booked => 1,
            SlotStatus::Expired => 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub slot_id: String,
    /// Interval label, e.g. "09:00 - 09:30".
    #[serde(rename = "slot")]
    pub label: String,
    pub status: SlotStatus,
}

/// Presentation state of a slot after classification. `Selected` wins over
/// everything, including `Booked`; the upstream product behaves this way
/// and it is preserved as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Available,
    Booked,
    Expired,
    Selected,
}

impl fmt::Display for SlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotState::Available => write!(f, "available"),
            SlotState::Booked => write!(f, "booked"),
            SlotState::Expired => write!(f, "expired"),
            SlotState::Selected => write!(f, "selected"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotClassification {
    pub state: SlotState,
    pub interactable: bool,
}
