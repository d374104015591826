//! Configuration file loading

use super::schema::ShoppingConfig;
use crate::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};

/// Environment variable overriding `catalog.path`
pub const ENV_CATALOG_PATH: &str = "FOODSHARE_CATALOG_PATH";

/// Environment variable overriding `matching.threshold`
pub const ENV_MATCH_THRESHOLD: &str = "FOODSHARE_MATCH_THRESHOLD";

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed, overridden and validated settings
    pub schema: ShoppingConfig,
    /// File the settings came from, `None` when running on defaults
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    ///
    /// Environment overrides are applied on top of the file and the result
    /// is validated.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !Path::new(p).exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_string()),
            None => find_config_file(),
        };

        let mut schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ShoppingConfig::default()
        };

        apply_env_overrides(&mut schema, |key| std::env::var(key).ok())?;
        let origin = config_path.as_deref().unwrap_or("default configuration");
        schema.validate().context(format!("Validating {}", origin))?;

        Ok(Self {
            schema,
            path: config_path,
        })
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = [
        ".foodshare-shopping.toml",
        "foodshare-shopping.toml",
        ".config/foodshare-shopping.toml",
    ];

    for candidate in candidates {
        if Path::new(candidate).exists() {
            return Some(candidate.to_string());
        }
    }

    user_config_file()
        .filter(|p| p.exists())
        .map(|p| p.display().to_string())
}

/// `<user config dir>/foodshare/shopping.toml`
fn user_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("foodshare").join("shopping.toml"))
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ShoppingConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read config file {}: {}", path, e)).with_source(e)
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::from(e).with_context(format!("Parsing config file {}", path))
    })
}

/// Apply `FOODSHARE_*` overrides, reading variables through `lookup`
fn apply_env_overrides<F>(schema: &mut ShoppingConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = lookup(ENV_CATALOG_PATH).filter(|p| !p.trim().is_empty()) {
        schema.catalog.path = path;
    }

    if let Some(raw) = lookup(ENV_MATCH_THRESHOLD) {
        schema.matching.threshold = raw.trim().parse().map_err(|_| {
            Error::invalid_config_value(ENV_MATCH_THRESHOLD, format!("{:?} is not a number", raw))
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.matching.threshold, 60.0);
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let toml = r#"
[catalog]
path = "fixtures/catalog.json"

[output]
not_found_marker = "not found"
"#;
        write!(file, "{}", toml).unwrap();

        let path = file.path().to_str().unwrap();
        let config = Config::load(Some(path)).unwrap();
        assert_eq!(config.path.as_deref(), Some(path));
        assert_eq!(config.schema.output.not_found_marker, "not found");
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some("/definitely/not/here.toml")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[matching\nthreshold = ").unwrap();

        let err = Config::load(Some(file.path().to_str().unwrap())).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
    }

    #[test]
    fn test_load_rejects_out_of_range_threshold() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[matching]\nthreshold = -5.0").unwrap();

        let err = Config::load(Some(file.path().to_str().unwrap())).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfigValue);
        assert!(err.context.is_some());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_CATALOG_PATH, "/srv/productos.json"),
            (ENV_MATCH_THRESHOLD, " 72.5 "),
        ]
        .into_iter()
        .collect();

        let mut schema = ShoppingConfig::default();
        apply_env_overrides(&mut schema, |k| env.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(schema.catalog.path, "/srv/productos.json");
        assert_eq!(schema.matching.threshold, 72.5);
    }

    #[test]
    fn test_env_override_bad_threshold() {
        let mut schema = ShoppingConfig::default();
        let err = apply_env_overrides(&mut schema, |k| {
            (k == ENV_MATCH_THRESHOLD).then(|| "sixty".to_string())
        })
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfigValue);
    }
}
