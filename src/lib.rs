//! Signup form CLI: bootstrap (config, tracing, wiring) and command handlers.

pub mod bootstrap;
pub mod commands;

/// Directory name under the platform data dir.
pub const APP_DIR_NAME: &str = "signup-form";
