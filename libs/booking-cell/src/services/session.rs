// libs/booking-cell/src/services/session.rs
use chrono::NaiveDate;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

use scheduling_cell::models::{Doctor, SlotClassification, Specialization, TimeSlot};
use scheduling_cell::services::availability::AvailabilityCalculator;
use scheduling_cell::services::clock::Clock;
use scheduling_cell::services::slots::SlotClassifier;
use shared_api::HimsClient;
use shared_config::AppConfig;
use shared_models::{BookingError, PatientIdentity};

use crate::models::{BookingConfirmation, FeeStatus, RequestKey};
use crate::services::directory::DirectoryService;
use crate::services::payload::PayloadBuilder;
use crate::services::slots::{ActiveRequest, SlotService};
use crate::services::submission::BookingService;
use crate::services::wizard::{BookingWizard, WizardStage};

/// One booking flow for one patient. Wizard transitions run behind a
/// mutex so they apply atomically; the only async work is fetching slots
/// and submitting, and both check the active request key before their
/// results are applied.
pub struct BookingSession {
    wizard: Mutex<BookingWizard>,
    clock: Arc<dyn Clock>,
    slot_service: SlotService,
    booking_service: BookingService,
    payload_builder: PayloadBuilder,
    active_request: ActiveRequest,
}

impl BookingSession {
    pub fn new(
        config: &AppConfig,
        client: Arc<HimsClient>,
        clock: Arc<dyn Clock>,
        doctors: Vec<Doctor>,
        specializations: Vec<Specialization>,
        patient: Option<PatientIdentity>,
    ) -> Self {
        let wizard = BookingWizard::new(
            AvailabilityCalculator::new(config),
            doctors,
            specializations,
            patient,
        );

        Self {
            wizard: Mutex::new(wizard),
            clock,
            slot_service: SlotService::new(Arc::clone(&client)),
            booking_service: BookingService::new(Arc::clone(&client)),
            payload_builder: PayloadBuilder::new(config),
            active_request: ActiveRequest::new(),
        }
    }

    /// Fetch both directories and start a session from them.
    pub async fn start(
        config: &AppConfig,
        client: Arc<HimsClient>,
        clock: Arc<dyn Clock>,
        patient: Option<PatientIdentity>,
    ) -> Result<Self, BookingError> {
        let directory = DirectoryService::new(Arc::clone(&client));
        let doctors = directory.get_doctors().await?;
        let specializations = directory.get_specializations().await?;
        info!(
            "Booking session started with {} doctors, {} specializations",
            doctors.len(),
            specializations.len()
        );
        Ok(Self::new(
            config,
            client,
            clock,
            doctors,
            specializations,
            patient,
        ))
    }

    fn lock(&self) -> MutexGuard<'_, BookingWizard> {
        self.wizard.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Read-only access to wizard state under the session lock.
    pub fn with_wizard<R>(&self, f: impl FnOnce(&BookingWizard) -> R) -> R {
        f(&self.lock())
    }

    // ==========================================================================
    // SYNCHRONOUS TRANSITIONS
    // ==========================================================================

    pub fn select_specialization(&self, name: Option<&str>) {
        self.lock().select_specialization(name);
        // Any slots in flight belong to a cleared selection.
        self.active_request.clear();
    }

    /// Select a doctor. When a date is auto-selected the matching request
    /// key is returned so the caller can fetch its slots.
    pub fn select_doctor(&self, doctor_id: &str) -> Result<Option<RequestKey>, BookingError> {
        let now = self.clock.now();
        let mut wizard = self.lock();
        wizard.select_doctor(doctor_id, now)?;

        let key = wizard
            .selected_date()
            .map(|date| RequestKey::new(doctor_id, date));
        drop(wizard);

        match &key {
            Some(key) => self.active_request.begin(key.clone()),
            None => self.active_request.clear(),
        }
        Ok(key)
    }

    pub fn select_date(&self, date: NaiveDate) -> Result<RequestKey, BookingError> {
        let now = self.clock.now();
        let mut wizard = self.lock();
        wizard.select_date(date, now)?;

        let doctor_id = wizard
            .doctor()
            .map(|doc| doc.id.clone())
            .unwrap_or_default();
        drop(wizard);

        let key = RequestKey::new(doctor_id, date);
        self.active_request.begin(key.clone());
        Ok(key)
    }

    pub fn select_slot(&self, slot: &TimeSlot) -> Result<bool, BookingError> {
        let now = self.clock.now();
        self.lock().select_slot(slot, now)
    }

    pub fn request_confirm(&self) -> Result<(), BookingError> {
        self.lock().request_confirm()
    }

    pub fn cancel_confirm(&self) -> Result<(), BookingError> {
        self.lock().cancel_confirm()
    }

    pub fn set_fee_status(&self, status: FeeStatus) {
        self.lock().set_fee_status(status);
    }

    pub fn set_patient(&self, patient: PatientIdentity) {
        self.lock().set_patient(patient);
    }

    // ==========================================================================
    // ASYNC OPERATIONS
    // ==========================================================================

    /// Fetch slots for the current doctor/date selection. A result that
    /// arrives after the selection has moved on is discarded as stale.
    pub async fn fetch_selected_slots(&self) -> Result<Vec<TimeSlot>, BookingError> {
        let key = self
            .active_request
            .current()
            .ok_or_else(|| BookingError::validation("Select a doctor and date first"))?;

        let slots = self.slot_service.get_slots(&key).await?;
        self.active_request.accept(&key, slots)
    }

    /// Build the payload and submit the booking. The wizard stays in the
    /// confirmation step on failure so the user can retry.
    pub async fn confirm(&self) -> Result<BookingConfirmation, BookingError> {
        let payload = {
            let wizard = self.lock();
            if !matches!(wizard.stage(), WizardStage::ConfirmPending { .. }) {
                return Err(BookingError::validation("No confirmation is pending"));
            }
            self.payload_builder.build(&wizard)?
        };

        let confirmation = self.booking_service.submit(&payload).await?;

        self.lock()
            .mark_submitted(confirmation.appointment_id.clone())?;
        Ok(confirmation)
    }

    // ==========================================================================
    // CLASSIFICATION
    // ==========================================================================

    /// Classify fetched slots against the current selection and clock.
    /// Slot and classification come back paired for rendering.
    pub fn classify_slots(&self, slots: &[TimeSlot]) -> Vec<(TimeSlot, SlotClassification)> {
        let now = self.clock.now();
        let wizard = self.lock();
        let selected_id = wizard.selected_slot().map(|s| s.slot_id.clone());
        let Some(date) = wizard.selected_date() else {
            return Vec::new();
        };
        drop(wizard);

        slots
            .iter()
            .map(|slot| {
                let classification =
                    SlotClassifier::classify(slot, selected_id.as_deref(), date, now);
                (slot.clone(), classification)
            })
            .collect()
    }

    /// Drop any in-flight request, e.g. on screen teardown.
    pub fn teardown(&self) {
        debug!("Tearing down booking session");
        self.active_request.clear();
    }
}
