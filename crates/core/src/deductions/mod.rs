//! Scheduled deductions - recurring contributions attached to a wallet and
//! the aggregate the wallet view reports about them.

mod deductions_model;
mod deductions_service;
mod deductions_traits;


pub use deductions_model::{
    DeductionDraft, DeductionFrequency, DeductionPatch, DeductionSummary, NewScheduledDeduction,
    ScheduledDeduction,
};
pub use deductions_service::DeductionService;
pub use deductions_traits::{DeductionRepositoryTrait, DeductionServiceTrait};
