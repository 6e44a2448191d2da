use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads application configuration by merging defaults, a TOML file, and
    /// `STOCK_HARVEST_`-prefixed environment variables.
    ///
    /// A missing config file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be parsed or a value
    /// has the wrong shape.
    pub fn load(path: impl AsRef<Path>) -> Result<AppConfig> {
        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("STOCK_HARVEST_").split("__"))
            .extract()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = ConfigLoader::load("does/not/exist.toml").unwrap();
        assert_eq!(config.runtime.exchange, "nasdaq");
    }

    #[test]
    fn test_load_toml_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[runtime]\nexchange = \"nyse\"\nmax_concurrent_symbols = 8"
        )
        .unwrap();

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.runtime.exchange, "nyse");
        assert_eq!(config.runtime.max_concurrent_symbols, 8);
        // Untouched sections keep their defaults
        assert_eq!(config.provider.quote_base_url, "https://finance.yahoo.com");
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Config.toml");
        std::fs::write(&path, "[runtime\nexchange = ").unwrap();

        assert!(ConfigLoader::load(&path).is_err());
    }
}
