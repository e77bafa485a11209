use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub poll_interval_ms: u64,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self {
            base_url: env::var("BOOKING_API_URL")
                .unwrap_or_else(|_| "http://localhost:5000/api/bookings".to_string()),
            request_timeout_secs: env::var("BOOKING_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            poll_interval_ms: env::var("BOOKING_POLL_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
