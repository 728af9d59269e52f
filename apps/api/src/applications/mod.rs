pub mod eligibility;
pub mod handlers;
pub mod status;
