//! # FacadeKit Settings
//!
//! Explicit configuration for every FacadeKit pass, persisted as TOML or
//! JSON. Nothing is read from the environment; callers load a [`Config`]
//! and hand each pass the options it needs.

pub mod config;
pub mod error;

pub use config::{
    Config, ConnectionSettings, LayerSettings, RepairSettings, ReportSettings, ViewportSettings,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
