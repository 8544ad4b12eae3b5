//! Configuration file loading for docquiz
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./docquiz.toml` or `./.docquiz.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/docquiz/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    DEFAULT_API_KEY_ENV, DEFAULT_QUESTION_COUNT, FileConfig, FileExtractionConfig,
    FileGeminiConfig, FileGenerationConfig, FileOutputConfig,
};
pub use loader::{ConfigLoader, ConfigSource};
