use crate::error::{Error, Result};
use crate::models::attendance::WorkWindow;
use crate::utils::time::TimeOfDay;
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    /// Institution work window used as the tardy / early-leave reference.
    pub work_start_time: TimeOfDay,
    pub work_end_time: TimeOfDay,
    /// Maximum length of a per-day note, in characters.
    pub note_max_chars: usize,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            work_start_time: get_env_time("WORK_START_TIME", "09:00")?,
            work_end_time: get_env_time("WORK_END_TIME", "18:00")?,
            note_max_chars: get_env_parse("NOTE_MAX_CHARS", "100")?,
        })
    }

    pub fn work_window(&self) -> WorkWindow {
        WorkWindow {
            start: self.work_start_time,
            end: self.work_end_time,
        }
    }
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_time(name: &str, default: &str) -> Result<TimeOfDay> {
    TimeOfDay::parse(&get_env_or(name, default))
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

fn get_env_parse<T>(name: &str, default: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or(name, default)
        .parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
