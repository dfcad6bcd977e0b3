use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://frontend-assignment-api.misc.simplismart.ai";
pub const API_BASE_ENV: &str = "MODEL_SPACES_API_BASE";
pub const TIMEOUT_ENV: &str = "MODEL_SPACES_TIMEOUT_S";

const DEFAULT_TIMEOUT_S: f64 = 120.0;
const MIN_TIMEOUT_S: f64 = 1.0;
const MAX_TIMEOUT_S: f64 = 600.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub api_base: String,
    pub timeout_s: f64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_s: DEFAULT_TIMEOUT_S,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();
        Self {
            api_base: non_empty(API_BASE_ENV)
                .map(|value| normalize_api_base(&value))
                .unwrap_or(defaults.api_base),
            timeout_s: non_empty(TIMEOUT_ENV)
                .and_then(|value| value.parse::<f64>().ok())
                .filter(|value| value.is_finite())
                .map(clamp_timeout)
                .unwrap_or(defaults.timeout_s),
        }
    }

    pub fn with_api_base(mut self, api_base: Option<&str>) -> Self {
        if let Some(value) = api_base.map(str::trim).filter(|value| !value.is_empty()) {
            self.api_base = normalize_api_base(value);
        }
        self
    }

    pub fn with_timeout(mut self, timeout_s: Option<f64>) -> Self {
        if let Some(value) = timeout_s.filter(|value| value.is_finite()) {
            self.timeout_s = clamp_timeout(value);
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        let seconds = if self.timeout_s.is_finite() {
            clamp_timeout(self.timeout_s)
        } else {
            DEFAULT_TIMEOUT_S
        };
        Duration::from_secs_f64(seconds)
    }
}

fn normalize_api_base(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn clamp_timeout(value: f64) -> f64 {
    value.clamp(MIN_TIMEOUT_S, MAX_TIMEOUT_S)
}
