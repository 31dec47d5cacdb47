use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tanit_proof::{EngineConfig, DEFAULT_ISSUER};

use crate::error::{RootError, RootResult};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Issuer side of the demo: who signs and for how long credentials last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerConfig {
    /// Written into the `iss` claim.
    #[serde(default = "default_issuer_url")]
    pub url: String,

    /// Credential lifetime in days.
    #[serde(default = "default_validity_days")]
    pub validity_days: u32,
}

fn default_issuer_url() -> String {
    DEFAULT_ISSUER.to_string()
}

fn default_validity_days() -> u32 {
    365
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            url: default_issuer_url(),
            validity_days: default_validity_days(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Tolerance applied to `exp` and `nbf`.
    #[serde(default = "default_clock_skew")]
    pub clock_skew_seconds: u32,
}

fn default_clock_skew() -> u32 {
    60
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            clock_skew_seconds: default_clock_skew(),
        }
    }
}

/// Top-level wallet configuration.
///
/// Loaded from a TOML file (typically `~/.tanit/config.toml`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootConfig {
    #[serde(default)]
    pub issuer: IssuerConfig,

    #[serde(default)]
    pub verifier: VerifierConfig,
}

/// Returns `$HOME/<suffix>` if HOME is available, otherwise `./<suffix>`.
fn dirs_or_default(suffix: &str) -> PathBuf {
    std::env::var("HOME")
        .map(|h| PathBuf::from(h).join(suffix))
        .unwrap_or_else(|_| PathBuf::from(suffix))
}

impl RootConfig {
    /// Load configuration from a TOML file. If the file does not exist,
    /// returns a default configuration.
    pub fn load(path: &Path) -> RootResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(RootError::Io)?;
        let config: RootConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> RootResult<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| RootError::Config(format!("TOML serialize error: {}", e)))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(RootError::Io)?;
        }
        std::fs::write(path, contents).map_err(RootError::Io)?;
        Ok(())
    }

    pub fn validate(&self) -> RootResult<()> {
        if self.issuer.url.trim().is_empty() {
            return Err(RootError::Config("issuer.url must not be empty".into()));
        }
        if self.issuer.validity_days == 0 {
            return Err(RootError::Config("validity_days must be > 0".into()));
        }
        Ok(())
    }

    /// Return the path to the default config file location.
    pub fn default_config_path() -> PathBuf {
        dirs_or_default(".tanit/config.toml")
    }

    /// Engine settings derived from this configuration.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            issuer: self.issuer.url.clone(),
            validity_seconds: i64::from(self.issuer.validity_days) * SECONDS_PER_DAY,
            clock_skew_seconds: i64::from(self.verifier.clock_skew_seconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RootConfig::default();
        assert_eq!(config.issuer.url, "https://demo.zktanit.id/issuer");
        assert_eq!(config.issuer.validity_days, 365);
        assert_eq!(config.verifier.clock_skew_seconds, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_path() {
        let path = RootConfig::default_config_path();
        assert!(path.to_str().unwrap().ends_with(".tanit/config.toml"));
    }

    #[test]
    fn test_engine_config_matches_defaults() {
        assert_eq!(RootConfig::default().engine_config(), EngineConfig::default());
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
[issuer]
url = "https://issuer.example"
validity_days = 30

[verifier]
clock_skew_seconds = 5
"#;
        let config: RootConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.issuer.url, "https://issuer.example");
        let engine = config.engine_config();
        assert_eq!(engine.validity_seconds, 30 * 24 * 60 * 60);
        assert_eq!(engine.clock_skew_seconds, 5);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: RootConfig = toml::from_str("[issuer]\nvalidity_days = 7\n").unwrap();
        assert_eq!(config.issuer.url, "https://demo.zktanit.id/issuer");
        assert_eq!(config.issuer.validity_days, 7);
        assert_eq!(config.verifier.clock_skew_seconds, 60);
    }

    #[test]
    fn test_config_validate_zero_validity() {
        let mut config = RootConfig::default();
        config.issuer.validity_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_empty_issuer() {
        let mut config = RootConfig::default();
        config.issuer.url = " ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = RootConfig::load(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config, RootConfig::default());
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = std::env::temp_dir().join(format!("tanit-test-config-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("config.toml");

        let config = RootConfig {
            issuer: IssuerConfig {
                url: "https://issuer.example".into(),
                validity_days: 90,
            },
            verifier: VerifierConfig {
                clock_skew_seconds: 10,
            },
        };

        config.save(&path).unwrap();
        let loaded = RootConfig::load(&path).unwrap();
        assert_eq!(loaded, config);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = std::env::temp_dir().join(format!("tanit-test-invalid-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[issuer]\nvalidity_days = 0\n").unwrap();

        assert!(matches!(RootConfig::load(&path), Err(RootError::Config(_))));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
