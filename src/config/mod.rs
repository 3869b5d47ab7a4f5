//! Configuration module for appbuild
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (APPBUILD_*)
//! 3. Project config (appbuild.toml)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    load_project, load_with_warnings, resolve, BuildOverrides, ConfigWarning, EnvOverrides,
    PROJECT_CONFIG_FILE,
};
pub use types::{
    AssetsConfig, BackendSettings, BuildConfiguration, BuildDefaults, ProjectConfig, DEFAULT_APP,
    DEFAULT_ASSETS_DIR, DEFAULT_ENVIRONMENT, DEFAULT_OUTPUT_DIR, DEFAULT_SCRATCH_DIR,
    DEFAULT_SOURCE_DIR,
};
