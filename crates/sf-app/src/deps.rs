//! # Application Dependencies
//!
//! Dependency grouping for [`crate::SignupApp`] construction. This is plain
//! parameter packing: no build steps, no defaults, no hidden logic.

use std::sync::Arc;

use sf_core::ports::*;

/// All ports the signup flow needs. Every field is required.
pub struct SignupDeps {
    // Storage dependencies
    pub storage: Arc<dyn KeyValueStoragePort>,

    // Backend dependencies
    pub signup_api: Arc<dyn SignupApiPort>,

    // System dependencies
    pub clock: Arc<dyn ClockPort>,
    pub timer: Arc<dyn TimerPort>,
}
