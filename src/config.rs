use std::env;

use crate::error::FleetError;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub notice_buffer_size: usize,
    pub snapshot_buffer_size: usize,
    pub tracking_buffer_size: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, FleetError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            notice_buffer_size: parse_or_default("NOTICE_BUFFER_SIZE", 64)?,
            snapshot_buffer_size: parse_or_default("SNAPSHOT_BUFFER_SIZE", 256)?,
            tracking_buffer_size: parse_or_default("TRACKING_BUFFER_SIZE", 256)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            notice_buffer_size: 64,
            snapshot_buffer_size: 256,
            tracking_buffer_size: 256,
        }
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, FleetError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| FleetError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}
