//! SQLite storage implementation for scheduled deductions.

mod model;
mod repository;

pub use model::{DeductionChangesetDB, NewScheduledDeductionDB, ScheduledDeductionDB};
pub use repository::DeductionRepository;
