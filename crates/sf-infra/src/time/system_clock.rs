use std::time::{SystemTime, UNIX_EPOCH};

use sf_core::ports::ClockPort;

pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now_ms(&self) -> i64 {
        // A clock set before the epoch reads as the epoch.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as i64)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_after_2020() {
        let clock = SystemClock;

        assert!(clock.now_ms() > 1_577_836_800_000);
        assert!(clock.now_secs() > 1_577_836_800);
    }
}
