//! Server configuration read from environment variables.

use chrono::NaiveDate;
use shoreline_debris::date_range::parse_report_date;

/// Location reported on when a request names none.
pub const DEFAULT_LOCATION_NAME: &str = "Union Beach";

/// First date of recorded data; the start of every default report window.
pub const DEFAULT_START_DATE: &str = "2016-01-01";

/// Runtime configuration for the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind (`BIND_ADDR`).
    pub bind_addr: String,
    /// Port to bind (`PORT`).
    pub port: u16,
    /// Default `locationName` (`DEFAULT_LOCATION_NAME`).
    pub default_location_name: String,
    /// Default `startDate` (`DEFAULT_START_DATE`).
    pub default_start_date: NaiveDate,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
            default_location_name: DEFAULT_LOCATION_NAME.to_string(),
            default_start_date: NaiveDate::from_ymd_opt(2016, 1, 1).unwrap_or_default(),
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to the
    /// defaults for missing or unparseable values.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let default_start_date = match lookup("DEFAULT_START_DATE") {
            Some(raw) => parse_report_date(&raw).unwrap_or_else(|e| {
                log::warn!("Ignoring DEFAULT_START_DATE: {e}");
                defaults.default_start_date
            }),
            None => defaults.default_start_date,
        };

        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port,
            default_location_name: lookup("DEFAULT_LOCATION_NAME")
                .unwrap_or(defaults.default_location_name),
            default_start_date,
        }
    }
}
