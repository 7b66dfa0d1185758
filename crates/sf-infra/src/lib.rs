pub mod api;
pub mod storage;
pub mod time;

pub use time::SystemClock;
