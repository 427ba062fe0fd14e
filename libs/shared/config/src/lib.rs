use std::env;
use tracing::warn;

/// Default extra charge applied when an appointment is booked online,
/// in whole currency units. Some deployments run without the surcharge,
/// so it is configuration rather than a hard-coded constant.
pub const DEFAULT_ONLINE_BOOKING_SURCHARGE: i64 = 100;

/// Default number of days the availability calculator looks ahead.
pub const DEFAULT_AVAILABILITY_HORIZON_DAYS: u32 = 30;

/// Default period, in seconds, at which "current time" is refreshed so
/// same-day slots can be re-evaluated against the booking cutoff.
pub const DEFAULT_CUTOFF_REFRESH_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub hims_api_url: String,
    pub hims_api_key: String,
    pub online_booking_surcharge: i64,
    pub availability_horizon_days: u32,
    pub cutoff_refresh_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            hims_api_url: env::var("HIMS_API_URL")
                .unwrap_or_else(|_| {
                    warn!("HIMS_API_URL not set, using empty value");
                    String::new()
                }),
            hims_api_key: env::var("HIMS_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("HIMS_API_KEY not set, using empty value");
                    String::new()
                }),
            online_booking_surcharge: env::var("HIMS_ONLINE_BOOKING_SURCHARGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_ONLINE_BOOKING_SURCHARGE),
            availability_horizon_days: env::var("HIMS_AVAILABILITY_HORIZON_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_AVAILABILITY_HORIZON_DAYS),
            cutoff_refresh_secs: env::var("HIMS_CUTOFF_REFRESH_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CUTOFF_REFRESH_SECS),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.hims_api_url.is_empty()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            hims_api_url: String::new(),
            hims_api_key: String::new(),
            online_booking_surcharge: DEFAULT_ONLINE_BOOKING_SURCHARGE,
            availability_horizon_days: DEFAULT_AVAILABILITY_HORIZON_DAYS,
            cutoff_refresh_secs: DEFAULT_CUTOFF_REFRESH_SECS,
        }
    }
}
