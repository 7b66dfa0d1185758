//! CLI command handlers. Each prints its result to stdout.

mod reset;
mod signup;
mod status;
mod success;

pub use reset::run_reset;
pub use signup::run_signup;
pub use status::run_status;
pub use success::run_success;

use chrono::{TimeZone, Utc};

fn format_epoch_secs(secs: i64) -> String {
    Utc.timestamp_opt(secs, 0)
        .single()
        .map(|time| time.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| secs.to_string())
}
