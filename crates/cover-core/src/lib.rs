// ABOUTME: Shared settings and page capabilities for cover.
// ABOUTME: Defines the template registry, site settings and the refresh behavior.

pub mod config;
pub mod refresh;

pub use config::{CoverSettings, SettingsError, TemplateRegistry};
pub use refresh::RefreshSettings;
