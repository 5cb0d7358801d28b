use crate::domain::{
    config::LinkConfig,
    error::{LinkError, LinkResult},
};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "linetalk";
const PROJECT_DIR: &str = ".linetalk";
const CONFIG_FILE: &str = "config.toml";

/// Configuration manager
pub struct ConfigManager {
    global_config_path: PathBuf,
    project_config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Create new configuration manager
    pub fn new() -> LinkResult<Self> {
        let global_config_path = Self::get_global_config_path()?;
        let project_config_path = Self::find_project_config_path();

        Ok(Self {
            global_config_path,
            project_config_path,
        })
    }

    /// Manager with explicit locations, no discovery
    pub fn with_paths(global_config_path: PathBuf, project_config_path: Option<PathBuf>) -> Self {
        Self {
            global_config_path,
            project_config_path,
        }
    }

    /// Load configuration from files. The project file overrides the global
    /// one; sections missing from both fall back to defaults.
    pub fn load_config(&self) -> LinkResult<LinkConfig> {
        let mut config = LinkConfig::default();

        if self.global_config_path.exists() {
            config = self.load_config_from_path(&self.global_config_path)?;
        }

        if let Some(project_path) = &self.project_config_path {
            if project_path.exists() {
                let content = Self::read(project_path)?;
                let table: toml::Table = Self::parse(project_path, &content)?;
                let project_config: LinkConfig = Self::parse(project_path, &content)?;

                // Only sections actually written in the project file win
                if table.contains_key("global") {
                    config.global = project_config.global;
                }
                if table.contains_key("server") {
                    config.server = project_config.server;
                }
                if table.contains_key("client") {
                    config.client = project_config.client;
                }
            }
        }

        Ok(config)
    }

    /// Get global configuration path
    fn get_global_config_path() -> LinkResult<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| LinkError::Config {
            message: "Could not determine home directory".to_string(),
        })?;

        Ok(home.join(".config").join(APP_DIR).join(CONFIG_FILE))
    }

    /// Find project configuration path by walking up directory tree
    fn find_project_config_path() -> Option<PathBuf> {
        let current_dir = std::env::current_dir().ok()?;
        let mut path = current_dir.as_path();

        loop {
            let config_path = path.join(PROJECT_DIR).join(CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }

            path = path.parent()?;
        }
    }

    /// Load configuration from specific path
    pub fn load_config_from_path(&self, path: &Path) -> LinkResult<LinkConfig> {
        let content = Self::read(path)?;
        Self::parse(path, &content)
    }

    fn read(path: &Path) -> LinkResult<String> {
        fs::read_to_string(path).map_err(|e| LinkError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })
    }

    fn parse<T: serde::de::DeserializeOwned>(path: &Path, content: &str) -> LinkResult<T> {
        toml::from_str(content).map_err(|e| LinkError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })
    }

    /// Save configuration to specific path, creating parent directories
    pub fn save_config_to_path(&self, path: &Path, config: &LinkConfig) -> LinkResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| LinkError::Config {
                message: format!("Failed to create config directory: {}", e),
            })?;
        }

        let content = toml::to_string_pretty(config).map_err(|e| LinkError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(path, content).map_err(|e| LinkError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })
    }

    /// Write a default configuration into `<path>/.linetalk/config.toml`
    pub fn init_project_config(&self, path: &Path) -> LinkResult<PathBuf> {
        let config_file = path.join(PROJECT_DIR).join(CONFIG_FILE);
        self.init_config_at(&config_file)?;
        Ok(config_file)
    }

    /// Write a default global configuration
    pub fn init_global_config(&self) -> LinkResult<PathBuf> {
        self.init_config_at(&self.global_config_path)?;
        Ok(self.global_config_path.clone())
    }

    fn init_config_at(&self, config_file: &Path) -> LinkResult<()> {
        if config_file.exists() {
            return Err(LinkError::Config {
                message: format!("Configuration already exists at {}", config_file.display()),
            });
        }

        self.save_config_to_path(config_file, &LinkConfig::default())
    }

    /// Get the current project config path (if any)
    pub fn get_project_config_path(&self) -> Option<&PathBuf> {
        self.project_config_path.as_ref()
    }

    /// Get the global config path
    pub fn get_global_config_path_ref(&self) -> &PathBuf {
        &self.global_config_path
    }
}
