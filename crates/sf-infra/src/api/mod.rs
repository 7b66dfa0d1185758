mod simulated_signup_api;

pub use simulated_signup_api::SimulatedSignupApi;
