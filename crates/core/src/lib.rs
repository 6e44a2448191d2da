pub mod config;
pub mod config_loader;

pub use config::{AppConfig, CalculatorConfig, PathsConfig, ProviderConfig, RuntimeConfig};
pub use config_loader::ConfigLoader;
