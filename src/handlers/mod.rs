pub mod assistant;
pub mod contact;
pub mod health;

use chrono::Utc;

/// Milliseconds since the Unix epoch, as reported in response bodies.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
