pub mod envelope;
pub mod hims;

pub use envelope::ApiEnvelope;
pub use hims::HimsClient;
