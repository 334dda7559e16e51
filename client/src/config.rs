use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 3;
pub const USER_AGENT: &str = "orrery-map/0.1";

pub fn api_url() -> String {
    std::env::var("ORRERY_API_URL")
        .ok()
        .map(|value| value.trim().trim_end_matches('/').to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

pub fn field_size() -> f64 {
    std::env::var("ORRERY_FIELD_SIZE")
        .ok()
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| *value > 0.0)
        .unwrap_or(orrery_shared::DEFAULT_FIELD_SIZE)
}

pub fn http_timeout() -> Duration {
    std::env::var("ORRERY_HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
}

pub fn connect_timeout() -> Duration {
    std::env::var("ORRERY_CONNECT_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
}
