// libs/booking-cell/tests/wizard_test.rs
use assert_matches::assert_matches;
use chrono::{NaiveDate, NaiveDateTime};

use booking_cell::services::wizard::{BookingWizard, WizardStage};
use scheduling_cell::models::{
    DaySchedule, Doctor, Service, SlotStatus, Specialization, TimeRange, TimeSlot,
};
use scheduling_cell::services::availability::AvailabilityCalculator;
use shared_models::{BookingError, PatientIdentity};

// Monday, 2025-06-16, mid-morning.
fn monday_morning() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 16)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap()
}

fn schedule(day: &str) -> DaySchedule {
    DaySchedule {
        day: day.to_string(),
        time_ranges: vec![TimeRange {
            time_from: "09:00".to_string(),
            time_to: "12:00".to_string(),
        }],
    }
}

fn doctor(id: &str, specialization: &str, days: &[&str]) -> Doctor {
    Doctor {
        id: id.to_string(),
        full_name: format!("Dr. {}", id),
        specialization: specialization.to_string(),
        designation_detail: None,
        photo_url: None,
        available_days: days.iter().map(|d| d.to_string()).collect(),
        weekly_schedule: days.iter().map(|d| schedule(d)).collect(),
        services: vec![Service {
            id: format!("svc-{}", id),
            service_name: "Consultation".to_string(),
            fee: 500,
        }],
    }
}

fn slot(id: &str, label: &str, status: SlotStatus) -> TimeSlot {
    TimeSlot {
        slot_id: id.to_string(),
        label: label.to_string(),
        status,
    }
}

fn patient() -> PatientIdentity {
    PatientIdentity {
        patient_id: "pat-1".to_string(),
        patient_name: "Hira Baig".to_string(),
        mrn: Some("MRN-0042".to_string()),
    }
}

fn wizard_with(doctors: Vec<Doctor>, specializations: Vec<Specialization>) -> BookingWizard {
    BookingWizard::new(
        AvailabilityCalculator::with_horizon(30),
        doctors,
        specializations,
        Some(patient()),
    )
}

fn wizard() -> BookingWizard {
    wizard_with(
        vec![
            doctor("cardio", "Cardiology", &["monday", "wednesday"]),
            doctor("derma", "Dermatology", &["friday"]),
        ],
        vec![
            Specialization {
                id: "spec-1".to_string(),
                name: "Cardiology".to_string(),
                description: "Heart and vessels".to_string(),
            },
            Specialization {
                id: "spec-2".to_string(),
                name: "Dermatology".to_string(),
                description: String::new(),
            },
        ],
    )
}

// A wizard advanced to the confirmation step.
fn confirmed_wizard() -> BookingWizard {
    let mut wizard = wizard();
    wizard.select_doctor("cardio", monday_morning()).unwrap();
    wizard
        .select_slot(&slot("s1", "11:00 - 11:30", SlotStatus::Available), monday_morning())
        .unwrap();
    wizard.request_confirm().unwrap();
    wizard
}

#[test]
fn selecting_a_doctor_auto_selects_the_first_available_date() {
    let mut wizard = wizard();
    wizard.select_doctor("cardio", monday_morning()).unwrap();

    // The reference Monday itself is the first available date.
    assert_eq!(
        wizard.selected_date(),
        Some(NaiveDate::from_ymd_opt(2025, 6, 16).unwrap())
    );
    assert_matches!(wizard.stage(), WizardStage::DateChosen { .. });
    assert_eq!(wizard.available_dates().len(), 9);
}

#[test]
fn doctor_without_schedule_has_no_date_selected() {
    let mut wizard = wizard_with(vec![doctor("empty", "Cardiology", &[])], vec![]);
    wizard.select_doctor("empty", monday_morning()).unwrap();

    assert_matches!(wizard.stage(), WizardStage::DoctorChosen { .. });
    assert_eq!(wizard.selected_date(), None);
    assert!(wizard.available_dates().is_empty());
}

#[test]
fn unknown_doctor_is_rejected() {
    let mut wizard = wizard();
    let err = wizard.select_doctor("nobody", monday_morning()).unwrap_err();
    assert_matches!(err, BookingError::Validation(_));
    assert_matches!(wizard.stage(), WizardStage::Init);
}

#[test]
fn specialization_filter_limits_the_doctor_list() {
    let mut wizard = wizard();
    wizard.select_specialization(Some("Dermatology"));

    let visible: Vec<&str> = wizard
        .filtered_doctors()
        .iter()
        .map(|d| d.id.as_str())
        .collect();
    assert_eq!(visible, vec!["derma"]);

    // A doctor outside the filtered list cannot be picked.
    let err = wizard.select_doctor("cardio", monday_morning()).unwrap_err();
    assert_matches!(err, BookingError::Validation(_));
}

#[test]
fn changing_specialization_resets_the_whole_selection() {
    let mut wizard = wizard();
    wizard.select_doctor("cardio", monday_morning()).unwrap();
    wizard
        .select_slot(&slot("s1", "11:00 - 11:30", SlotStatus::Available), monday_morning())
        .unwrap();

    wizard.select_specialization(Some("Dermatology"));
    assert_matches!(wizard.stage(), WizardStage::Init);
    assert!(wizard.doctor().is_none());
    assert_eq!(wizard.selected_date(), None);
    assert!(wizard.selected_slot().is_none());
}

#[test]
fn clearing_the_filter_restores_the_full_list() {
    let mut wizard = wizard();
    wizard.select_specialization(Some("Dermatology"));
    wizard.select_specialization(None);
    assert_eq!(wizard.filtered_doctors().len(), 2);
    assert_eq!(wizard.specialization_filter(), None);
}

#[test]
fn specialization_names_merge_directory_and_doctor_tags() {
    let wizard = wizard_with(
        vec![
            doctor("a", "Cardiology", &[]),
            doctor("b", "Neurology", &[]),
        ],
        vec![Specialization {
            id: "spec-1".to_string(),
            name: "Cardiology".to_string(),
            description: String::new(),
        }],
    );

    // Directory names first, then tags only doctors carry, no duplicates.
    assert_eq!(wizard.specialization_names(), vec!["Cardiology", "Neurology"]);
}

#[test]
fn specialization_description_comes_from_the_directory() {
    let mut wizard = wizard();
    wizard.select_specialization(Some("Cardiology"));
    assert_eq!(wizard.specialization_description(), Some("Heart and vessels"));

    wizard.select_specialization(Some("Dermatology"));
    assert_eq!(wizard.specialization_description(), Some(""));
}

#[test]
fn past_dates_are_rejected_and_state_is_unchanged() {
    let mut wizard = wizard();
    wizard.select_doctor("cardio", monday_morning()).unwrap();
    let before = wizard.selected_date();

    let yesterday = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
    let err = wizard.select_date(yesterday, monday_morning()).unwrap_err();
    assert_matches!(err, BookingError::Validation(_));
    assert_eq!(wizard.selected_date(), before);
}

#[test]
fn dates_outside_the_doctors_availability_are_rejected() {
    let mut wizard = wizard();
    wizard.select_doctor("cardio", monday_morning()).unwrap();

    // A Tuesday; the doctor only works Mondays and Wednesdays.
    let tuesday = NaiveDate::from_ymd_opt(2025, 6, 17).unwrap();
    let err = wizard.select_date(tuesday, monday_morning()).unwrap_err();
    assert_matches!(err, BookingError::Validation(_));
}

#[test]
fn changing_the_date_clears_the_chosen_slot() {
    let mut wizard = wizard();
    wizard.select_doctor("cardio", monday_morning()).unwrap();
    wizard
        .select_slot(&slot("s1", "11:00 - 11:30", SlotStatus::Available), monday_morning())
        .unwrap();
    assert!(wizard.selected_slot().is_some());

    let wednesday = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
    wizard.select_date(wednesday, monday_morning()).unwrap();
    assert!(wizard.selected_slot().is_none());
    assert_eq!(wizard.selected_date(), Some(wednesday));
}

#[test]
fn selecting_a_slot_requires_a_date() {
    let mut wizard = wizard();
    let err = wizard
        .select_slot(&slot("s1", "11:00 - 11:30", SlotStatus::Available), monday_morning())
        .unwrap_err();
    assert_matches!(err, BookingError::Validation(_));
}

#[test]
fn booked_and_lapsed_slots_are_ignored_silently() {
    let mut wizard = wizard();
    wizard.select_doctor("cardio", monday_morning()).unwrap();

    let applied = wizard
        .select_slot(&slot("s1", "11:00 - 11:30", SlotStatus::Booked), monday_morning())
        .unwrap();
    assert!(!applied);

    // 09:00 is before the reference 10:30 on the same day.
    let applied = wizard
        .select_slot(&slot("s2", "09:00 - 09:30", SlotStatus::Available), monday_morning())
        .unwrap();
    assert!(!applied);

    assert!(wizard.selected_slot().is_none());
    assert_matches!(wizard.stage(), WizardStage::DateChosen { .. });
}

#[test]
fn an_available_slot_is_applied() {
    let mut wizard = wizard();
    wizard.select_doctor("cardio", monday_morning()).unwrap();

    let applied = wizard
        .select_slot(&slot("s1", "02:00 PM - 02:30 PM", SlotStatus::Available), monday_morning())
        .unwrap();
    assert!(applied);
    assert_eq!(wizard.selected_slot().map(|s| s.slot_id.as_str()), Some("s1"));
}

#[test]
fn confirm_requires_every_field() {
    let mut wizard = BookingWizard::new(
        AvailabilityCalculator::with_horizon(30),
        vec![doctor("cardio", "Cardiology", &["monday"])],
        vec![],
        None,
    );

    let err = wizard.request_confirm().unwrap_err();
    assert_matches!(
        err,
        BookingError::IncompleteSelection { missing }
            if missing == vec!["doctor", "date", "slot", "patient"]
    );

    wizard.select_doctor("cardio", monday_morning()).unwrap();
    let err = wizard.request_confirm().unwrap_err();
    assert_matches!(
        err,
        BookingError::IncompleteSelection { missing } if missing == vec!["slot", "patient"]
    );
}

#[test]
fn confirm_is_idempotent_while_pending() {
    let mut wizard = confirmed_wizard();
    assert_matches!(wizard.stage(), WizardStage::ConfirmPending { .. });
    wizard.request_confirm().unwrap();
    assert_matches!(wizard.stage(), WizardStage::ConfirmPending { .. });
}

#[test]
fn pending_confirmation_blocks_selection_changes() {
    let mut wizard = confirmed_wizard();

    assert_matches!(
        wizard.select_doctor("derma", monday_morning()),
        Err(BookingError::Validation(_))
    );
    assert_matches!(
        wizard.select_date(NaiveDate::from_ymd_opt(2025, 6, 18).unwrap(), monday_morning()),
        Err(BookingError::Validation(_))
    );
    assert_matches!(
        wizard.select_slot(&slot("s9", "03:00 - 03:30 PM", SlotStatus::Available), monday_morning()),
        Err(BookingError::Validation(_))
    );
}

#[test]
fn cancelling_confirmation_returns_to_the_chosen_slot() {
    let mut wizard = confirmed_wizard();
    wizard.cancel_confirm().unwrap();

    assert_matches!(wizard.stage(), WizardStage::SlotChosen { .. });
    assert_eq!(wizard.selected_slot().map(|s| s.slot_id.as_str()), Some("s1"));

    // And selections can change again.
    wizard
        .select_date(NaiveDate::from_ymd_opt(2025, 6, 18).unwrap(), monday_morning())
        .unwrap();
}

#[test]
fn cancel_without_pending_confirmation_fails() {
    let mut wizard = wizard();
    assert_matches!(wizard.cancel_confirm(), Err(BookingError::Validation(_)));
    assert_matches!(wizard.stage(), WizardStage::Init);
}

#[test]
fn submission_is_terminal() {
    let mut wizard = confirmed_wizard();
    wizard.mark_submitted("apt-77".to_string()).unwrap();

    assert_matches!(
        wizard.stage(),
        WizardStage::Submitted { appointment_id } if appointment_id == "apt-77"
    );
    assert_matches!(
        wizard.select_doctor("derma", monday_morning()),
        Err(BookingError::Validation(_))
    );
    assert_matches!(wizard.request_confirm(), Err(BookingError::Validation(_)));
}

#[test]
fn mark_submitted_requires_a_pending_confirmation() {
    let mut wizard = wizard();
    assert_matches!(
        wizard.mark_submitted("apt-1".to_string()),
        Err(BookingError::Validation(_))
    );
}
