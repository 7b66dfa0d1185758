//! Session domain module.
//!
//! The durable record of a completed signup and the simulated credential.

mod state;
mod token;
mod user;

pub use state::{SessionSnapshot, SessionState};
pub use token::{SessionToken, TokenClaims, TokenError, TOKEN_TTL_SECS};
pub use user::SessionUser;
