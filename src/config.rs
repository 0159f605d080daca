use leptos::logging::{log, warn};

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const API_URL_VAR: &str = "STAYBOOK_API_URL";

/// Location of the booking REST API. Built once at startup and handed to the
/// API client; components read it from Leptos context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Reads `STAYBOOK_API_URL` (at runtime on the server, at compile time in
    /// the wasm bundle), falling back to the local development API.
    pub fn load() -> Self {
        match configured_url() {
            Some(url) if !url.trim().is_empty() => {
                log!("[CONFIG] Using API at {}", url);
                Self::new(url)
            }
            Some(_) => {
                warn!("[CONFIG] {} is empty, using default: {}", API_URL_VAR, DEFAULT_API_URL);
                Self::default()
            }
            None => {
                log!("[CONFIG] {} not set, using default: {}", API_URL_VAR, DEFAULT_API_URL);
                Self::default()
            }
        }
    }

    /// Absolute URL for an API path such as `/bookings`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn configured_url() -> Option<String> {
    std::env::var(API_URL_VAR).ok()
}

#[cfg(target_arch = "wasm32")]
fn configured_url() -> Option<String> {
    option_env!("STAYBOOK_API_URL").map(str::to_string)
}
