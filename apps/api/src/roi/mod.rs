// Education path ROI scoring.
// The calculator is pure; handlers validate input and keep the latest result per session.

pub mod calculator;
pub mod handlers;
pub mod housing;
pub mod store;
pub mod summary;

pub use calculator::{calculate_roi, RoiResult};
pub use housing::{HousingBenefitLookup, StaticHousingTable};
