//! Runtime settings read from the environment (and `.env`, if present).

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;
use validator::Validate;

use crate::error::AppError;
use crate::locale::Locale;
use crate::telemetry::LogFormat;

pub const TYPING_DELAY_VAR: &str = "MINDCARE_TYPING_DELAY_MS";
pub const BOOKING_CONFIRM_VAR: &str = "MINDCARE_BOOKING_CONFIRM_MS";
pub const DEFAULT_LOCALE_VAR: &str = "MINDCARE_DEFAULT_LOCALE";
pub const STORAGE_URL_VAR: &str = "MINDCARE_STORAGE_URL";
pub const LOG_FORMAT_VAR: &str = "MINDCARE_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct AppConfig {
    /// How long the chatbot "types" before its reply is posted.
    #[validate(range(max = 60000))]
    pub typing_delay_ms: u64,
    /// How long a new appointment stays pending before it is confirmed.
    #[validate(range(max = 60000))]
    pub booking_confirm_ms: u64,
    pub default_locale: Locale,
    #[validate(length(min = 1))]
    pub storage_url: String,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            typing_delay_ms: 1500,
            booking_confirm_ms: 1000,
            default_locale: Locale::English,
            storage_url: "sqlite::memory:".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Loads `.env` if present, then reads and validates the `MINDCARE_*` variables.
    pub fn from_env() -> Result<Self, AppError> {
        if let Ok(path) = dotenv::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }

        let defaults = Self::default();
        let config = Self {
            typing_delay_ms: read_var(TYPING_DELAY_VAR, defaults.typing_delay_ms)?,
            booking_confirm_ms: read_var(BOOKING_CONFIRM_VAR, defaults.booking_confirm_ms)?,
            default_locale: read_var(DEFAULT_LOCALE_VAR, defaults.default_locale)?,
            storage_url: read_var(STORAGE_URL_VAR, defaults.storage_url)?,
            log_format: read_var(LOG_FORMAT_VAR, defaults.log_format)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }

    pub fn booking_confirm_delay(&self) -> Duration {
        Duration::from_millis(self.booking_confirm_ms)
    }
}

fn read_var<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{} is invalid: {}", key, e))),
        Err(_) => Ok(default),
    }
}
