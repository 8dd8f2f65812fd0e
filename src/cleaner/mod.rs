pub mod engine;
pub mod maintenance;
pub mod removal;

pub use engine::{
    clean, clean_category, empty_location, CancelToken, CategoryOutcome, CleanEvent, CleanStream,
    Cleaner, DoneSummary, RemovalAttempt, Tally,
};
pub use maintenance::{CommandAction, MaintenanceAction};
pub use removal::{force_remove, try_force_remove};
