//! On-disk configuration: `$XDG_CONFIG_HOME/terradio/config.toml`.
//!
//! Every field has a serde default so a partial (or absent) file still yields
//! a complete config. A missing file is written back with the defaults on
//! first load.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub globe: GlobeConfig,
    #[serde(default)]
    pub load: LoadConfig,
}

/// Station directory (radio-browser) endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default = "default_directory_base_url")]
    pub base_url: String,
}

/// Inference service endpoint and generation defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    #[serde(default = "default_inference_base_url")]
    pub base_url: String,
    #[serde(default = "default_inference_model")]
    pub model: String,
    /// Name of the environment variable holding the API key. The key itself
    /// never lives in the config file.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

/// Globe rendering constants consumed by the frame loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobeConfig {
    #[serde(default = "default_sphere_radius")]
    pub sphere_radius: f64,
    /// Radians the globe turns per frame tick.
    #[serde(default = "default_rotation_per_frame")]
    pub rotation_per_frame: f64,
    /// Radians the cloud shell turns per frame tick (slightly faster than
    /// the surface, so the atmosphere visibly slides over it).
    #[serde(default = "default_cloud_rotation_per_frame")]
    pub cloud_rotation_per_frame: f64,
}

/// Initial-load query plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    /// Countries whose stations are queried first and float to the front of
    /// the reconciled catalog.
    #[serde(default = "default_featured_countries")]
    pub featured_countries: Vec<String>,
    #[serde(default = "default_featured_limit")]
    pub featured_limit: u32,
    #[serde(default = "default_global_limit")]
    pub global_limit: u32,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: default_directory_base_url(),
        }
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: default_inference_base_url(),
            model: default_inference_model(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            sphere_radius: default_sphere_radius(),
            rotation_per_frame: default_rotation_per_frame(),
            cloud_rotation_per_frame: default_cloud_rotation_per_frame(),
        }
    }
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            featured_countries: default_featured_countries(),
            featured_limit: default_featured_limit(),
            global_limit: default_global_limit(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: DirectoryConfig::default(),
            inference: InferenceConfig::default(),
            globe: GlobeConfig::default(),
            load: LoadConfig::default(),
        }
    }
}

fn default_directory_base_url() -> String {
    "https://de1.api.radio-browser.info".to_string()
}

fn default_inference_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_inference_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_key_env() -> String {
    "TERRADIO_INFERENCE_KEY".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_output_tokens() -> u32 {
    256
}

fn default_sphere_radius() -> f64 {
    1.0
}

fn default_rotation_per_frame() -> f64 {
    0.0008
}

fn default_cloud_rotation_per_frame() -> f64 {
    0.0011
}

fn default_featured_countries() -> Vec<String> {
    vec!["Japan".to_string(), "Brazil".to_string()]
}

fn default_featured_limit() -> u32 {
    60
}

fn default_global_limit() -> u32 {
    150
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("terradio")
            .join("config.toml")
    }
}
