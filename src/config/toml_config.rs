use crate::core::format::FitFormat;
use crate::utils::error::{FitError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

const CATALOG_EXTENSIONS: &[&str] = &["sqlite", "sqlite3", "db"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    pub conversion: Option<ConversionConfig>,
}

/// Where item categories come from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// SDE-lite SQLite catalog with a `typeInfo` table.
    pub sqlite_path: Option<String>,
    /// Memoize lookups by name. On unless set to false.
    pub cache: Option<bool>,
    /// Inline `"Item Name" = category_id` table, used when no SQLite path is set.
    pub categories: Option<HashMap<String, u32>>,
}

impl CatalogConfig {
    pub fn cache_enabled(&self) -> bool {
        self.cache.unwrap_or(true)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionConfig {
    pub from: Option<FitFormat>,
    pub to: Option<FitFormat>,
    /// Directory converted fits are written to when no output path is given.
    pub output_dir: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FitError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left
    /// as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FitError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(path) = &self.catalog.sqlite_path {
            validation::validate_path("catalog.sqlite_path", path)?;
            validation::validate_file_extension("catalog.sqlite_path", path, CATALOG_EXTENSIONS)?;
        }

        for name in self.catalog.categories.iter().flat_map(|table| table.keys()) {
            validation::validate_non_empty_string("catalog.categories", name)?;
        }

        if let Some(dir) = self.conversion.as_ref().and_then(|c| c.output_dir.as_ref()) {
            validation::validate_path("conversion.output_dir", dir)?;
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[catalog]
sqlite_path = "data/sde_lite.sqlite"
cache = false

[catalog.categories]
"Astrahus" = 65
"Hobgoblin II" = 18

[conversion]
from = "eft"
to = "yaml"
output_dir = "./converted"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.catalog.sqlite_path.as_deref(), Some("data/sde_lite.sqlite"));
        assert!(!config.catalog.cache_enabled());
        assert_eq!(config.catalog.categories.as_ref().unwrap()["Astrahus"], 65);

        let conversion = config.conversion.unwrap();
        assert_eq!(conversion.from, Some(FitFormat::Eft));
        assert_eq!(conversion.to, Some(FitFormat::Yaml));
        assert_eq!(conversion.output_dir.as_deref(), Some("./converted"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.catalog.sqlite_path.is_none());
        assert!(config.catalog.cache_enabled());
        assert!(config.conversion.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FITCONV_TEST_SDE_DIR", "/opt/sde");

        let toml_content = r#"
[catalog]
sqlite_path = "${FITCONV_TEST_SDE_DIR}/sde_lite.sqlite"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.catalog.sqlite_path.as_deref(), Some("/opt/sde/sde_lite.sqlite"));

        std::env::remove_var("FITCONV_TEST_SDE_DIR");
    }

    #[test]
    fn test_unset_env_var_is_left_alone() {
        let config = TomlConfig::from_toml_str(
            "[conversion]\noutput_dir = \"${FITCONV_TEST_UNSET_VARIABLE}\"\n",
        )
        .unwrap();
        assert_eq!(
            config.conversion.unwrap().output_dir.as_deref(),
            Some("${FITCONV_TEST_UNSET_VARIABLE}")
        );
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[catalog]\nsqlite_path = \"data/sde.csv\"\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[catalog.categories]\n\" \" = 8\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_format_is_a_config_error() {
        let err = TomlConfig::from_toml_str("[conversion]\nto = \"csv\"\n").unwrap_err();
        assert!(matches!(err, FitError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[conversion]\nto = \"eft2\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.conversion.unwrap().to, Some(FitFormat::Eft2));
    }
}
