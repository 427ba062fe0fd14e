pub mod directory;
pub mod payload;
pub mod refresh;
pub mod session;
pub mod slots;
pub mod submission;
pub mod wizard;

pub use directory::DirectoryService;
pub use payload::PayloadBuilder;
pub use refresh::CutoffRefresher;
pub use session::BookingSession;
pub use slots::{ActiveRequest, SlotService};
pub use submission::BookingService;
pub use wizard::{BookingWizard, WizardStage};
