use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Weekday};
use std::collections::HashMap;
use tracing::debug;

use shared_config::AppConfig;

use crate::models::{DaySchedule, Doctor};

/// Locale-independent long weekday name, lower-cased to match the keys
/// doctors use in their weekly schedules.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "sunday",
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
    }
}

/// Short display form used when listing a doctor's available days.
/// "Thur" is the abbreviation the hospital uses, not a typo.
pub fn short_day_name(day: &str) -> &str {
    match day.to_lowercase().as_str() {
        "sunday" => "Sun",
        "monday" => "Mon",
        "tuesday" => "Tue",
        "wednesday" => "Wed",
        "thursday" => "Thur",
        "friday" => "Fri",
        "saturday" => "Sat",
        _ => day,
    }
}

/// Computes which calendar dates a doctor can be booked on, from their
/// weekly schedule and a lookahead window.
pub struct AvailabilityCalculator {
    horizon_days: u32,
}

impl AvailabilityCalculator {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            horizon_days: config.availability_horizon_days,
        }
    }

    pub fn with_horizon(horizon_days: u32) -> Self {
        Self { horizon_days }
    }

    /// List the bookable dates for `doctor` in `[today, today + horizon)`,
    /// in chronological order. A doctor with no non-empty schedule entries
    /// yields an empty list; malformed schedules are not an error.
    pub fn compute_available_dates(&self, doctor: &Doctor, now: NaiveDateTime) -> Vec<NaiveDate> {
        let schedule_by_day = Self::schedule_by_day(&doctor.weekly_schedule);
        if schedule_by_day.is_empty() {
            debug!("Doctor {} has no bookable schedule entries", doctor.id);
            return Vec::new();
        }

        let today = now.date();
        let mut available = Vec::new();

        for i in 0..self.horizon_days {
            let Some(candidate) = today.checked_add_days(Days::new(i as u64)) else {
                break;
            };
            // Today is always considered, even once its slots have begun
            // to lapse; only later offsets guard the day boundary.
            if i > 0 && candidate < today {
                continue;
            }
            if schedule_by_day.contains_key(weekday_name(candidate.weekday())) {
                available.push(candidate);
            }
        }

        debug!(
            "Doctor {} has {} available dates over a {}-day horizon",
            doctor.id,
            available.len(),
            self.horizon_days
        );
        available
    }

    /// True when the doctor's schedule has a non-empty range list for the
    /// weekday of `date`. Window bounds are checked separately by callers.
    pub fn is_date_available(&self, doctor: &Doctor, date: NaiveDate) -> bool {
        Self::schedule_by_day(&doctor.weekly_schedule)
            .contains_key(weekday_name(date.weekday()))
    }

    /// True when `date` falls within the bookable window starting at `today`.
    pub fn is_within_horizon(&self, date: NaiveDate, today: NaiveDate) -> bool {
        if date < today {
            return false;
        }
        match today.checked_add_days(Days::new(self.horizon_days as u64)) {
            Some(limit) => date < limit,
            None => false,
        }
    }

    fn schedule_by_day(schedule: &[DaySchedule]) -> HashMap<String, &[crate::models::TimeRange]> {
        let mut map = HashMap::new();
        for entry in schedule {
            if !entry.time_ranges.is_empty() {
                map.insert(entry.day.to_lowercase(), entry.time_ranges.as_slice());
            }
        }
        map
    }
}

/// True when `date` is strictly before `today` at local midnight.
pub fn is_past_date(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

pub fn is_today(date: NaiveDate, today: NaiveDate) -> bool {
    date == today
}
