use std::env;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub tick_interval_ms: u64,
    pub command_queue_size: usize,
    pub event_buffer_size: usize,
    /// Calendar day being replayed.
    pub replay_date: NaiveDate,
    /// Seconds after midnight where the replay starts (the data has no
    /// activity before the first rentals of the morning).
    pub replay_start_offset_secs: f64,
    /// How many simulated seconds the replay covers.
    pub replay_window_secs: f64,
    /// Simulated seconds replayed per wall-clock second.
    pub replay_speedup: f64,
    /// Optional directory with routes.json / rentals.json seed files.
    pub data_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            tick_interval_ms: parse_or_default("TICK_INTERVAL_MS", 100)?,
            command_queue_size: parse_or_default("COMMAND_QUEUE_SIZE", 64)?,
            event_buffer_size: parse_or_default("EVENT_BUFFER_SIZE", 1024)?,
            replay_date: parse_or_default("REPLAY_DATE", default_replay_date())?,
            replay_start_offset_secs: parse_or_default(
                "REPLAY_START_OFFSET_SECS",
                ((4 * 60) + 30) as f64 * 60.0,
            )?,
            replay_window_secs: parse_or_default("REPLAY_WINDOW_SECS", 24.0 * 60.0 * 60.0)?,
            replay_speedup: parse_or_default("REPLAY_SPEEDUP", 720.0)?,
            data_dir: env::var("DATA_DIR").ok().map(PathBuf::from),
        })
    }
}

fn default_replay_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2011, 5, 18).expect("valid default replay date")
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| AppError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_or_default;

    #[test]
    fn missing_variable_falls_back_to_the_default() {
        let value: u16 = parse_or_default("RENTAL_REPLAY_TEST_UNSET", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn unparsable_value_is_an_error() {
        unsafe { std::env::set_var("RENTAL_REPLAY_TEST_BAD_PORT", "not-a-port") };
        assert!(parse_or_default::<u16>("RENTAL_REPLAY_TEST_BAD_PORT", 1).is_err());
    }
}
