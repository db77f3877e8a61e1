use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_SLOT_INTERVAL: u32 = 30;
pub const DEFAULT_BOOKING_WINDOW: u32 = 60;
pub const DEFAULT_MIN_NOTICE: u32 = 24;
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Structural validation switches applied to every booking request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationConfig {
    pub require_email: bool,
    pub require_phone: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            require_email: true,
            require_phone: false,
        }
    }
}

/// Resolved scheduling configuration.
///
/// Passed explicitly into the availability engine and the booking services;
/// nothing in the workspace reads configuration from process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchedulingConfig {
    /// Slot granularity in minutes.
    pub slot_interval: u32,
    /// How many days ahead a booking may be placed.
    pub booking_window: u32,
    /// Minimum notice in hours. Advisory, see `availability_cell::apply_min_notice`.
    pub min_notice: u32,
    /// Single-zone label; all arithmetic is on naive wall-clock values.
    pub timezone: String,
    pub validation: ValidationConfig,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            slot_interval: DEFAULT_SLOT_INTERVAL,
            booking_window: DEFAULT_BOOKING_WINDOW,
            min_notice: DEFAULT_MIN_NOTICE,
            timezone: DEFAULT_TIMEZONE.to_string(),
            validation: ValidationConfig::default(),
        }
    }
}

impl SchedulingConfig {
    pub fn from_env() -> Self {
        let config = Self {
            slot_interval: env_or("QS_SLOT_INTERVAL", DEFAULT_SLOT_INTERVAL),
            booking_window: env_or("QS_BOOKING_WINDOW", DEFAULT_BOOKING_WINDOW),
            min_notice: env_or("QS_MIN_NOTICE", DEFAULT_MIN_NOTICE),
            timezone: env::var("QS_TIMEZONE").unwrap_or_else(|_| {
                warn!("QS_TIMEZONE not set, using {}", DEFAULT_TIMEZONE);
                DEFAULT_TIMEZONE.to_string()
            }),
            validation: ValidationConfig {
                require_email: env_or("QS_REQUIRE_EMAIL", true),
                require_phone: env_or("QS_REQUIRE_PHONE", false),
            },
        };

        if !config.is_valid() {
            warn!("Scheduling not fully configured - slot interval must be positive");
        }

        config
    }

    pub fn with_slot_interval(mut self, minutes: u32) -> Self {
        self.slot_interval = minutes;
        self
    }

    pub fn with_validation(mut self, validation: ValidationConfig) -> Self {
        self.validation = validation;
        self
    }

    pub fn is_valid(&self) -> bool {
        self.slot_interval > 0
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value {:?}, using default {}", key, raw, default);
            default
        }),
        Err(_) => {
            warn!("{} not set, using default {}", key, default);
            default
        }
    }
}
