// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::prompts;
use crate::infra::errors::ChicLensError;
use crate::infra::paths;

/// Environment variables checked for the API key, in order.
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "GOOGLE_API_KEY", "API_KEY"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub models: ModelsConfig,

    #[serde(default)]
    pub synthesis: SynthesisConfig,

    #[serde(default)]
    pub brands: BrandsConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    /// Used only when none of the API key environment variables is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
            api_key: None,
            timeout_seconds: 120,
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    pub analysis: String,
    pub image: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            analysis: "gemini-3-flash-preview".into(),
            image: "gemini-2.5-flash-image".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    pub aspect_ratio: String,
    /// Replaces the built-in flat-lay template. Must reference `{{ elements }}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: "3:4".into(),
            template: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandsConfig {
    /// Appended after the built-in catalog.
    #[serde(default)]
    pub extra: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ChicLensError> {
        if let Some(ref template) = self.synthesis.template {
            let referenced = prompts::references_elements(template).map_err(|e| {
                ChicLensError::Config(format!("synthesis.template does not parse: {}", e))
            })?;
            if !referenced {
                return Err(ChicLensError::Config(
                    "synthesis.template must reference {{ elements }}".into(),
                ));
            }
        }
        if self.provider.timeout_seconds == 0 {
            return Err(ChicLensError::Config(
                "provider.timeout_seconds must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Resolve the single API key shared by both remote clients.
    pub fn api_key(&self) -> Result<String, ChicLensError> {
        self.api_key_with(|name| std::env::var(name).ok())
    }

    fn api_key_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<String, ChicLensError> {
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| lookup(*name))
            .chain(self.provider.api_key.clone())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
            .ok_or(ChicLensError::NoCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_reasonable() {
        let c = Config::default();
        assert_eq!(c.models.analysis, "gemini-3-flash-preview");
        assert_eq!(c.models.image, "gemini-2.5-flash-image");
        assert_eq!(c.synthesis.aspect_ratio, "3:4");
        assert!(c.synthesis.template.is_none());
        assert_eq!(c.provider.timeout(), Duration::from_secs(120));
        assert!(c.brands.extra.is_empty());
        assert!(c.output.dir.is_none());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.synthesis.aspect_ratio, "3:4");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[provider]
base_url = "http://localhost:8080/v1beta"
api_key = "from-file"
timeout_seconds = 30

[models]
analysis = "gemini-2.5-flash"
image = "imagen-lite"

[synthesis]
aspect_ratio = "1:1"
template = "Flat lay: {{ elements }}"

[brands]
extra = ["Carhartt", "Arc'teryx"]

[output]
dir = "/tmp/lookbooks"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.provider.base_url, "http://localhost:8080/v1beta");
        assert_eq!(config.provider.timeout_seconds, 30);
        assert_eq!(config.models.analysis, "gemini-2.5-flash");
        assert_eq!(config.synthesis.aspect_ratio, "1:1");
        assert_eq!(
            config.synthesis.template.as_deref(),
            Some("Flat lay: {{ elements }}")
        );
        assert_eq!(config.brands.extra, vec!["Carhartt", "Arc'teryx"]);
        assert_eq!(config.output.dir, Some(PathBuf::from("/tmp/lookbooks")));
    }

    #[test]
    fn test_template_without_placeholder_rejected() {
        let mut config = Config::default();
        config.synthesis.template = Some("a static prompt".into());
        assert!(matches!(config.validate(), Err(ChicLensError::Config(_))));
    }

    #[test]
    fn test_template_mentioning_elements_only_as_text_rejected() {
        let mut config = Config::default();
        config.synthesis.template = Some("elements: {{ foo }}".into());
        assert!(matches!(config.validate(), Err(ChicLensError::Config(_))));
    }

    #[test]
    fn test_unparsable_template_rejected() {
        let mut config = Config::default();
        config.synthesis.template = Some("Flat lay: {{ elements".into());
        assert!(matches!(config.validate(), Err(ChicLensError::Config(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.provider.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_env_order() {
        let config = Config::default();
        let key = config
            .api_key_with(|name| match name {
                "GOOGLE_API_KEY" => Some("google".into()),
                "API_KEY" => Some("generic".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(key, "google");
    }

    #[test]
    fn test_api_key_falls_back_to_config() {
        let mut config = Config::default();
        config.provider.api_key = Some("  from-file  ".into());
        let key = config.api_key_with(|_| None).unwrap();
        assert_eq!(key, "from-file");
    }

    #[test]
    fn test_api_key_blank_env_skipped() {
        let mut config = Config::default();
        config.provider.api_key = Some("from-file".into());
        let key = config
            .api_key_with(|name| (name == "GEMINI_API_KEY").then(|| "   ".to_string()))
            .unwrap();
        assert_eq!(key, "from-file");
    }

    #[test]
    fn test_api_key_missing() {
        let config = Config::default();
        assert!(matches!(
            config.api_key_with(|_| None),
            Err(ChicLensError::NoCredentials)
        ));
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.models.image, config.models.image);
        assert_eq!(
            deserialized.provider.timeout_seconds,
            config.provider.timeout_seconds
        );
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }
}
