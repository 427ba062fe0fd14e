// libs/booking-cell/src/services/payload.rs
use serde_json::json;
use tracing::debug;

use shared_config::AppConfig;
use shared_models::BookingError;

use crate::models::BookingPayload;
use crate::services::wizard::BookingWizard;

/// Assembles the booking request body from resolved wizard state. Pure;
/// the caller transmits the result.
pub struct PayloadBuilder {
    surcharge: i64,
}

impl PayloadBuilder {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            surcharge: config.online_booking_surcharge,
        }
    }

    /// Deployments that do not charge extra for online booking pass 0.
    pub fn with_surcharge(surcharge: i64) -> Self {
        Self { surcharge }
    }

    pub fn surcharge(&self) -> i64 {
        self.surcharge
    }

    /// Build the payload, failing with `IncompleteSelection` when any of
    /// doctor, date, slot or patient identity is absent. Service ids fall
    /// back from the doctor's default service to the specialization id to
    /// an empty list; discounts are always zero at creation.
    pub fn build(&self, wizard: &BookingWizard) -> Result<BookingPayload, BookingError> {
        let (Some(doctor), Some(date), Some(slot), Some(patient)) = (
            wizard.doctor(),
            wizard.selected_date(),
            wizard.selected_slot(),
            wizard.patient(),
        ) else {
            return Err(BookingError::IncompleteSelection {
                missing: wizard.missing_fields(),
            });
        };

        let service = doctor.default_service();
        let services = match service {
            Some(service) => vec![service.id.clone()],
            None => match wizard.specialization_record() {
                Some(spec) => vec![spec.id.clone()],
                None => Vec::new(),
            },
        };
        let fee = service.map(|s| s.fee).unwrap_or(0) + self.surcharge;

        debug!(
            "Built booking payload for doctor {} on {} (fee {})",
            doctor.id, date, fee
        );

        Ok(BookingPayload {
            doctor_id: doctor.id.clone(),
            patient_id: patient.patient_id.clone(),
            date,
            slot_id: slot.slot_id.clone(),
            services,
            fee_status: wizard.fee_status(),
            appointment_date: date,
            fee,
            extra: json!({}),
            discount: 0,
            discount_in_percentage: 0,
        })
    }
}
