//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the clinic slots
//! API server. It retrieves configuration values from environment variables and
//! provides defaults where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `CLINIC_OPENS_AT`: Default start of working hours (default: "08:00")
//! - `CLINIC_CLOSES_AT`: Default end of working hours (default: "18:00")
//! - `CLINIC_SLOT_MINUTES`: Default slot duration in minutes (default: 30)

use std::env;

use clinicslots_core::models::{time_of_day::TimeOfDay, working_hours::WorkingHours};
use eyre::{Result, WrapErr};
use tracing::Level;

/// Working-hours window and slot length used when a request leaves them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClinicDefaults {
    pub working_hours: WorkingHours,
    pub slot_duration_minutes: u32,
}

/// Configuration for the clinic slots API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use clinicslots_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Clinic schedule used when a request omits it
    pub clinic: ClinicDefaults,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The API_PORT value cannot be parsed as a u16
    /// - CLINIC_OPENS_AT or CLINIC_CLOSES_AT is not an `HH:MM` time
    /// - CLINIC_SLOT_MINUTES is not a positive integer
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = var("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = var("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Logging settings
        let log_level = match var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = var("API_CORS_ORIGINS").map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Clinic schedule
        let opens_at: TimeOfDay = var("CLINIC_OPENS_AT")
            .unwrap_or_else(|| "08:00".to_string())
            .parse()
            .wrap_err("Invalid CLINIC_OPENS_AT value")?;
        let closes_at: TimeOfDay = var("CLINIC_CLOSES_AT")
            .unwrap_or_else(|| "18:00".to_string())
            .parse()
            .wrap_err("Invalid CLINIC_CLOSES_AT value")?;
        let slot_duration_minutes: u32 = var("CLINIC_SLOT_MINUTES")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .wrap_err("Invalid CLINIC_SLOT_MINUTES value")?;
        if slot_duration_minutes == 0 {
            eyre::bail!("CLINIC_SLOT_MINUTES must be greater than zero");
        }

        Ok(Self {
            host,
            port,
            log_level,
            cors_origins,
            request_timeout,
            clinic: ClinicDefaults {
                working_hours: WorkingHours::new(opens_at, closes_at),
                slot_duration_minutes,
            },
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
