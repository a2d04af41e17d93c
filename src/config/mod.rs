//! Configuration loading
//!
//! Handles loading from config files and environment variables with
//! precedence CLI > Env > File > Defaults. CLI flags are applied by the
//! command handlers on top of the loaded [`Config`](crate::domain::Config).

pub mod loader;

pub use loader::load_config;
