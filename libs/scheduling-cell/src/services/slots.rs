use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use crate::models::{SlotClassification, SlotState, SlotStatus, TimeSlot};

/// Parsed 24-hour clock time from a slot label fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTime {
    pub hours: u32,
    pub minutes: u32,
}

impl ParsedTime {
    pub fn to_naive_time(self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hours, self.minutes, 0)
    }
}

fn time_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(\d+):(\d+)(?:\s*(AM|PM))?").expect("valid time regex"))
}

/// Tolerant clock-time parser for slot labels. Accepts "09:00",
/// "9:00 AM", "12:30pm"; `12 AM` maps to 0 and PM hours below 12 get +12.
/// Anything unparseable yields `None` so that time-based expiry fails
/// open rather than blocking a slot.
pub fn parse_clock_time(value: &str) -> Option<ParsedTime> {
    let captures = time_regex().captures(value)?;

    let mut hours: u32 = captures.get(1)?.as_str().parse().ok()?;
    let minutes: u32 = captures.get(2)?.as_str().parse().ok()?;

    if let Some(period) = captures.get(3) {
        match period.as_str().to_uppercase().as_str() {
            "PM" if hours < 12 => hours += 12,
            "AM" if hours == 12 => hours = 0,
            _ => {}
        }
    }

    Some(ParsedTime { hours, minutes })
}

/// Split a "HH:MM - HH:MM" label into its from/to halves.
pub fn split_label(label: &str) -> Option<(&str, &str)> {
    label.split_once(" - ")
}

/// Classifies raw slot records against the current selection and an
/// injected "now". Pure; identical inputs always classify identically.
pub struct SlotClassifier;

impl SlotClassifier {
    /// A slot is past the cutoff only when the selected date is today and
    /// its start time is strictly before now's time-of-day.
    pub fn is_past_cutoff(slot: &TimeSlot, selected_date: NaiveDate, now: NaiveDateTime) -> bool {
        if selected_date != now.date() {
            return false;
        }

        let start = split_label(&slot.label)
            .map(|(from, _)| from)
            .unwrap_or(slot.label.as_str());

        let Some(parsed) = parse_clock_time(start) else {
            debug!("Unparseable slot start '{}', treating as not past", start);
            return false;
        };
        let Some(slot_time) = parsed.to_naive_time() else {
            return false;
        };

        slot_time < now.time()
    }

    /// Resolve a slot's presentation state. Precedence, highest first:
    /// Selected, Expired (persisted or past cutoff), Booked, Available.
    pub fn classify(
        slot: &TimeSlot,
        selected_slot_id: Option<&str>,
        selected_date: NaiveDate,
        now: NaiveDateTime,
    ) -> SlotClassification {
        let past_cutoff = Self::is_past_cutoff(slot, selected_date, now);

        let state = if selected_slot_id == Some(slot.slot_id.as_str()) {
            SlotState::Selected
        } else if slot.status == SlotStatus::Expired || past_cutoff {
            SlotState::Expired
        } else if slot.status == SlotStatus::Booked {
            SlotState::Booked
        } else {
            SlotState::Available
        };

        SlotClassification {
            state,
            interactable: state == SlotState::Available,
        }
    }

    /// Whether a user tapping this slot should be allowed to select it.
    /// Booked, expired and past-cutoff slots are rejected silently.
    pub fn is_selectable(slot: &TimeSlot, selected_date: NaiveDate, now: NaiveDateTime) -> bool {
        slot.status == SlotStatus::Available && !Self::is_past_cutoff(slot, selected_date, now)
    }
}
