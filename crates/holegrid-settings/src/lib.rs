//! Holegrid Settings Crate
//!
//! Handles run configuration: defaults, validation, and settings files.

pub mod config;
pub mod error;

pub use config::{
    Config, LayoutSettings, MachineParameters, OutputFormat, OutputSettings, PeckPolicy, Template,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
