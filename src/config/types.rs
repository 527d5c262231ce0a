// Configuration type definitions

use serde::Deserialize;

use crate::session::{OptionsIn, SessionSettings};

/// Log verbosity selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Auto-query configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct AutoQueryConfig {
    #[serde(default = "default_retrieve_partial_results")]
    pub retrieve_partial_results: bool,
    /// 0 means unlimited
    #[serde(default)]
    pub max_round_trips: u32,
    /// Default OptionsIn string for new sessions
    #[serde(default)]
    pub options_in: String,
}

fn default_retrieve_partial_results() -> bool {
    true
}

impl Default for AutoQueryConfig {
    fn default() -> Self {
        AutoQueryConfig {
            retrieve_partial_results: true,
            max_round_trips: 0,
            options_in: String::new(),
        }
    }
}

impl AutoQueryConfig {
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            retrieve_partial_results: self.retrieve_partial_results,
            max_round_trips: self.max_round_trips,
        }
    }

    pub fn default_options(&self) -> OptionsIn {
        OptionsIn::parse(&self.options_in)
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub auto_query: AutoQueryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}
