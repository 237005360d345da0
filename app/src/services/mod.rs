//! Application services
//!
//! Services wrap the pure computation core with state ownership,
//! persistence and advice generation.

pub mod advice;
pub mod dashboard;
pub mod session;

pub use advice::{
    advisor_from_config, AdviceProducer, AdviceRequest, OllamaAdvisor, RuleBasedAdvisor,
};
pub use dashboard::{DailyDashboard, DashboardService};
pub use session::Session;
