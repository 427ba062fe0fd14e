pub mod availability;
pub mod clock;
pub mod slots;

pub use availability::AvailabilityCalculator;
pub use clock::{Clock, FixedClock, SystemClock};
pub use slots::SlotClassifier;
