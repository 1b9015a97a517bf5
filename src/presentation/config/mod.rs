mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    LoggingSettings, PollingSettings, ServerSettings, Settings, SettingsError, StatsSettings,
    UpstreamSettings,
};
