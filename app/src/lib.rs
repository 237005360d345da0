//! NutriTrack application library
//!
//! This library exposes the application modules for use in the binary and tests.

pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod store;
