mod system_clock;
mod timer;

pub use system_clock::SystemClock;
pub use timer::TokioTimer;
