//! NutriTrack Shared Library
//!
//! The nutrition computation core: energy model, goal derivation, nutrient
//! aggregation, retention pruning, weekly trends and food recommendations.
//! Every function here is pure; the caller supplies "now" and all state.

pub mod aggregate;
pub mod catalog;
pub mod energy;
pub mod errors;
pub mod goals;
pub mod models;
pub mod recommend;
pub mod retention;
pub mod trend;
pub mod validation;

// Re-export commonly used items
pub use aggregate::*;
pub use catalog::*;
pub use energy::*;
pub use errors::*;
pub use goals::*;
pub use models::*;
pub use recommend::*;
pub use retention::*;
pub use trend::*;
