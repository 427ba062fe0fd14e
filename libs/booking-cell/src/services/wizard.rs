// libs/booking-cell/src/services/wizard.rs
use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};
use uuid::Uuid;

use scheduling_cell::models::{Doctor, Specialization, TimeSlot};
use scheduling_cell::services::availability::{is_past_date, AvailabilityCalculator};
use scheduling_cell::services::slots::SlotClassifier;
use shared_models::{BookingError, PatientIdentity};

use crate::models::FeeStatus;

/// Stage of the booking flow. One variant per step, carrying only the
/// fields that are valid at that step, so a slot can never outlive the
/// doctor or date it belongs to.
#[derive(Debug, Clone)]
pub enum WizardStage {
    Init,
    DoctorChosen {
        doctor: Doctor,
        available_dates: Vec<NaiveDate>,
    },
    DateChosen {
        doctor: Doctor,
        available_dates: Vec<NaiveDate>,
        date: NaiveDate,
    },
    SlotChosen {
        doctor: Doctor,
        available_dates: Vec<NaiveDate>,
        date: NaiveDate,
        slot: TimeSlot,
    },
    ConfirmPending {
        doctor: Doctor,
        available_dates: Vec<NaiveDate>,
        date: NaiveDate,
        slot: TimeSlot,
    },
    Submitted {
        appointment_id: String,
    },
}

impl WizardStage {
    pub fn name(&self) -> &'static str {
        match self {
            WizardStage::Init => "init",
            WizardStage::DoctorChosen { .. } => "doctor_chosen",
            WizardStage::DateChosen { .. } => "date_chosen",
            WizardStage::SlotChosen { .. } => "slot_chosen",
            WizardStage::ConfirmPending { .. } => "confirm_pending",
            WizardStage::Submitted { .. } => "submitted",
        }
    }
}

/// The booking wizard state machine. Transitions are synchronous, apply
/// fully or not at all, and downstream selections reset whenever an
/// upstream one changes. All time-dependent checks take the caller's
/// "now" rather than reading a clock.
pub struct BookingWizard {
    session_id: Uuid,
    calculator: AvailabilityCalculator,
    doctors: Vec<Doctor>,
    specializations: Vec<Specialization>,
    specialization_filter: Option<String>,
    patient: Option<PatientIdentity>,
    fee_status: FeeStatus,
    stage: WizardStage,
}

impl BookingWizard {
    pub fn new(
        calculator: AvailabilityCalculator,
        doctors: Vec<Doctor>,
        specializations: Vec<Specialization>,
        patient: Option<PatientIdentity>,
    ) -> Self {
        let session_id = Uuid::new_v4();
        debug!("Starting booking wizard session {}", session_id);
        Self {
            session_id,
            calculator,
            doctors,
            specializations,
            specialization_filter: None,
            patient,
            fee_status: FeeStatus::Unpaid,
            stage: WizardStage::Init,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn stage(&self) -> &WizardStage {
        &self.stage
    }

    pub fn fee_status(&self) -> FeeStatus {
        self.fee_status
    }

    pub fn set_fee_status(&mut self, status: FeeStatus) {
        self.fee_status = status;
    }

    pub fn patient(&self) -> Option<&PatientIdentity> {
        self.patient.as_ref()
    }

    pub fn set_patient(&mut self, patient: PatientIdentity) {
        self.patient = Some(patient);
    }

    // ==========================================================================
    // SELECTION ACCESSORS
    // ==========================================================================

    pub fn doctor(&self) -> Option<&Doctor> {
        match &self.stage {
            WizardStage::DoctorChosen { doctor, .. }
            | WizardStage::DateChosen { doctor, .. }
            | WizardStage::SlotChosen { doctor, .. }
            | WizardStage::ConfirmPending { doctor, .. } => Some(doctor),
            _ => None,
        }
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        match &self.stage {
            WizardStage::DateChosen { date, .. }
            | WizardStage::SlotChosen { date, .. }
            | WizardStage::ConfirmPending { date, .. } => Some(*date),
            _ => None,
        }
    }

    pub fn selected_slot(&self) -> Option<&TimeSlot> {
        match &self.stage {
            WizardStage::SlotChosen { slot, .. }
            | WizardStage::ConfirmPending { slot, .. } => Some(slot),
            _ => None,
        }
    }

    pub fn available_dates(&self) -> &[NaiveDate] {
        match &self.stage {
            WizardStage::DoctorChosen {
                available_dates, ..
            }
            | WizardStage::DateChosen {
                available_dates, ..
            }
            | WizardStage::SlotChosen {
                available_dates, ..
            }
            | WizardStage::ConfirmPending {
                available_dates, ..
            } => available_dates,
            _ => &[],
        }
    }

    // ==========================================================================
    // SPECIALIZATION FILTER
    // ==========================================================================

    /// Doctors matching the current specialization filter; the full
    /// directory when no filter is applied.
    pub fn filtered_doctors(&self) -> Vec<&Doctor> {
        match &self.specialization_filter {
            Some(filter) => self
                .doctors
                .iter()
                .filter(|doc| doc.specialization == *filter)
                .collect(),
            None => self.doctors.iter().collect(),
        }
    }

    /// Names offered by the specialization picker: the directory list
    /// merged with tags that only appear on doctors, deduplicated.
    pub fn specialization_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for spec in &self.specializations {
            if !names.contains(&spec.name) {
                names.push(spec.name.clone());
            }
        }
        for doctor in &self.doctors {
            if !names.contains(&doctor.specialization) {
                names.push(doctor.specialization.clone());
            }
        }
        names
    }

    pub fn specialization_filter(&self) -> Option<&str> {
        self.specialization_filter.as_deref()
    }

    /// Directory record backing the current filter, when the directory
    /// knows it. Doctors may carry tags the directory does not list.
    pub fn specialization_record(&self) -> Option<&Specialization> {
        let filter = self.specialization_filter.as_deref()?;
        self.specializations.iter().find(|s| s.name == filter)
    }

    pub fn specialization_description(&self) -> Option<&str> {
        self.specialization_record().map(|s| s.description.as_str())
    }

    // ==========================================================================
    // TRANSITIONS
    // ==========================================================================

    /// Set or clear the specialization filter. Allowed in any state;
    /// always clears doctor, date and slot.
    pub fn select_specialization(&mut self, name: Option<&str>) {
        let name = name.filter(|n| !n.is_empty());
        debug!(
            "Session {}: specialization filter set to {:?}",
            self.session_id, name
        );
        self.specialization_filter = name.map(|n| n.to_string());
        self.stage = WizardStage::Init;
    }

    /// Choose a doctor from the current filtered list and compute their
    /// bookable dates. The first available date, when there is one, is
    /// selected automatically.
    pub fn select_doctor(&mut self, doctor_id: &str, now: NaiveDateTime) -> Result<(), BookingError> {
        match self.stage {
            WizardStage::ConfirmPending { .. } => {
                return Err(BookingError::validation(
                    "Cannot change doctor while confirmation is pending",
                ));
            }
            WizardStage::Submitted { .. } => {
                return Err(BookingError::validation("Booking already submitted"));
            }
            _ => {}
        }

        let doctor = self
            .filtered_doctors()
            .into_iter()
            .find(|doc| doc.id == doctor_id)
            .cloned()
            .ok_or_else(|| {
                warn!(
                    "Session {}: doctor {} not in current list",
                    self.session_id, doctor_id
                );
                BookingError::validation("Doctor is not in the current list")
            })?;

        let available_dates = self.calculator.compute_available_dates(&doctor, now);
        info!(
            "Session {}: doctor {} selected, {} available dates",
            self.session_id,
            doctor.id,
            available_dates.len()
        );

        self.stage = match available_dates.first().copied() {
            Some(first) => WizardStage::DateChosen {
                doctor,
                available_dates,
                date: first,
            },
            None => WizardStage::DoctorChosen {
                doctor,
                available_dates,
            },
        };
        Ok(())
    }

    /// Choose a date from the doctor's computed availability. Clears any
    /// previously chosen slot.
    pub fn select_date(&mut self, date: NaiveDate, now: NaiveDateTime) -> Result<(), BookingError> {
        let (doctor, available_dates) = match &self.stage {
            WizardStage::DoctorChosen {
                doctor,
                available_dates,
            }
            | WizardStage::DateChosen {
                doctor,
                available_dates,
                ..
            }
            | WizardStage::SlotChosen {
                doctor,
                available_dates,
                ..
            } => (doctor, available_dates),
            WizardStage::ConfirmPending { .. } => {
                return Err(BookingError::validation(
                    "Cannot change date while confirmation is pending",
                ));
            }
            _ => {
                return Err(BookingError::validation("Select a doctor first"));
            }
        };

        if is_past_date(date, now.date()) {
            return Err(BookingError::validation(
                "Please select a current or future date",
            ));
        }
        if !available_dates.contains(&date) {
            return Err(BookingError::validation(
                "This doctor is not available on the selected date",
            ));
        }

        debug!("Session {}: date {} selected", self.session_id, date);
        self.stage = WizardStage::DateChosen {
            doctor: doctor.clone(),
            available_dates: available_dates.clone(),
            date,
        };
        Ok(())
    }

    /// Choose a time slot for the selected date. Booked, expired and
    /// past-cutoff slots are ignored silently; the return value reports
    /// whether the selection was applied.
    pub fn select_slot(&mut self, slot: &TimeSlot, now: NaiveDateTime) -> Result<bool, BookingError> {
        let (doctor, available_dates, date) = match &self.stage {
            WizardStage::DateChosen {
                doctor,
                available_dates,
                date,
            }
            | WizardStage::SlotChosen {
                doctor,
                available_dates,
                date,
                ..
            } => (doctor, available_dates, *date),
            WizardStage::ConfirmPending { .. } => {
                return Err(BookingError::validation(
                    "Cannot change slot while confirmation is pending",
                ));
            }
            _ => {
                return Err(BookingError::validation("Select a date first"));
            }
        };

        if !SlotClassifier::is_selectable(slot, date, now) {
            debug!(
                "Session {}: slot {} not selectable, ignoring",
                self.session_id, slot.slot_id
            );
            return Ok(false);
        }

        debug!(
            "Session {}: slot {} selected",
            self.session_id, slot.slot_id
        );
        self.stage = WizardStage::SlotChosen {
            doctor: doctor.clone(),
            available_dates: available_dates.clone(),
            date,
            slot: slot.clone(),
        };
        Ok(true)
    }

    /// Move to the confirmation step. Requires doctor, date, slot and the
    /// externally supplied patient identity; nothing is sent yet.
    pub fn request_confirm(&mut self) -> Result<(), BookingError> {
        if let WizardStage::ConfirmPending { .. } = self.stage {
            return Ok(());
        }
        if let WizardStage::Submitted { .. } = self.stage {
            return Err(BookingError::validation("Booking already submitted"));
        }

        let missing = self.missing_fields();
        if !missing.is_empty() {
            warn!(
                "Session {}: confirm requested with missing fields: {:?}",
                self.session_id, missing
            );
            return Err(BookingError::IncompleteSelection { missing });
        }

        if let WizardStage::SlotChosen {
            doctor,
            available_dates,
            date,
            slot,
        } = std::mem::replace(&mut self.stage, WizardStage::Init)
        {
            self.stage = WizardStage::ConfirmPending {
                doctor,
                available_dates,
                date,
                slot,
            };
        }
        Ok(())
    }

    /// Abandon the confirmation step and return to the chosen slot.
    pub fn cancel_confirm(&mut self) -> Result<(), BookingError> {
        match std::mem::replace(&mut self.stage, WizardStage::Init) {
            WizardStage::ConfirmPending {
                doctor,
                available_dates,
                date,
                slot,
            } => {
                debug!("Session {}: confirmation cancelled", self.session_id);
                self.stage = WizardStage::SlotChosen {
                    doctor,
                    available_dates,
                    date,
                    slot,
                };
                Ok(())
            }
            other => {
                self.stage = other;
                Err(BookingError::validation("No confirmation is pending"))
            }
        }
    }

    /// Record a successful submission. Terminal; only valid from the
    /// confirmation step.
    pub fn mark_submitted(&mut self, appointment_id: String) -> Result<(), BookingError> {
        match self.stage {
            WizardStage::ConfirmPending { .. } => {
                info!(
                    "Session {}: appointment {} submitted",
                    self.session_id, appointment_id
                );
                self.stage = WizardStage::Submitted { appointment_id };
                Ok(())
            }
            _ => Err(BookingError::validation("No confirmation is pending")),
        }
    }

    /// Fields still required before the booking can be confirmed.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.doctor().is_none() {
            missing.push("doctor");
        }
        if self.selected_date().is_none() {
            missing.push("date");
        }
        if self.selected_slot().is_none() {
            missing.push("slot");
        }
        if self.patient.is_none() {
            missing.push("patient");
        }
        missing
    }
}
