pub mod error;
pub mod patient;

pub use error::BookingError;
pub use patient::PatientIdentity;
