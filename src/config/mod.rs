//! Configuration loading for the client.
//!
//! Settings live in a TOML file under the platform config directory.
//! Every section is optional; a missing file means defaults.

mod loader;
mod types;

pub use loader::{ConfigError, BASE_URL_ENV};
pub use types::{ApiConfig, Config, StorageConfig};
