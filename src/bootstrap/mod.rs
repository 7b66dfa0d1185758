pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, resolve_config, resolve_data_dir};
pub use self::tracing::init_tracing_subscriber;
pub use wiring::{start_app, wire_dependencies};
