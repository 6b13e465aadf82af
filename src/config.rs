use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub source_directory: PathBuf,
    pub file_extension: String,
    pub max_file_size: usize,
    pub categories: CategoryConfig,
}

/// Membership lists for the stereotype classifier. Names are matched after
/// normalization, so casing and punctuation in these lists are free-form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub dynamic: Vec<String>,
    #[serde(rename = "static")]
    pub static_: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_directory: PathBuf::from("./UML"),
            file_extension: "puml".to_string(),
            max_file_size: 1024 * 1024, // 1MB
            categories: CategoryConfig {
                dynamic: vec![
                    "EventRegistration".to_string(),
                    "KeySituations".to_string(),
                    "AssistantActions".to_string(),
                    "Metrics".to_string(),
                    "UserModel".to_string(),
                ],
                static_: vec![
                    "Plan_and_Tasks".to_string(),
                    "UserTraits".to_string(),
                    "MotivationalMechanics".to_string(),
                    "Usertrait_Mechanic:mapping".to_string(),
                ],
            },
        }
    }
}

impl Config {
    /// Get the default config file path (~/.puml-rollup.toml)
    pub fn default_config_path() -> crate::Result<PathBuf> {
        let home_dir = env::var("HOME")
            .or_else(|_| env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;
        Ok(PathBuf::from(home_dir).join(".puml-rollup.toml"))
    }

    /// Load config from file, falling back to defaults if file doesn't exist
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::default_config_path()?;

        if config_path.exists() {
            println!("📝 Loading configuration from: {}", config_path.display());
            Self::from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific file path
    pub fn from_file(path: &PathBuf) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to a file
    pub fn to_file(&self, path: &PathBuf) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Create a config file with all available options documented
    pub fn create_documented_config() -> String {
        r#"# puml-rollup Configuration File
# This file configures how puml-rollup merges your per-module diagrams

# Directory containing the per-module .puml files
source_directory = "./UML"

# Extension of the diagram files to pick up
file_extension = "puml"

# Maximum file size to read (in bytes, default 1MB)
max_file_size = 1048576

[categories]
# Modules rendered with the <<dynamic>> stereotype.
# Matching is case-insensitive and ignores punctuation.
dynamic = [
    "EventRegistration",
    "KeySituations",
    "AssistantActions",
    "Metrics",
    "UserModel",
]

# Modules rendered with the <<static>> stereotype.
# A module must not appear in both lists.
static = [
    "Plan_and_Tasks",
    "UserTraits",
    "MotivationalMechanics",
    "Usertrait_Mechanic:mapping",
]
"#
        .to_string()
    }
}
