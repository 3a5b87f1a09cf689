pub mod expiry;

pub use expiry::{evaluate_expiry, format_remaining, remaining_minutes, ExpiryState};
