//! Configuration management for schema assembly
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (assembly.toml)
//! - Environment variables (ASSEMBLY__*)
//!
//! ## Example config file (assembly.toml):
//! ```toml
//! [schema]
//! builtin_source = "builtins"
//! mutation = "mutation"
//! subscription = "subscription"
//!
//! [rules]
//! field_imports_exist = true
//! no_circular_field_imports = true
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::builtins;
use crate::error::Result;

/// Main configuration for the assembler
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssemblyConfig {
    /// Schema conventions
    #[serde(default)]
    pub schema: SchemaConfig,

    /// Rule check switches
    #[serde(default)]
    pub rules: RulesConfig,
}

/// Schema conventions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Name of the source whose imports are not exported by default
    #[serde(default = "default_builtin_source")]
    pub builtin_source: String,

    /// Identifier of the root mutation type
    #[serde(default = "default_mutation")]
    pub mutation: String,

    /// Identifier of the root subscription type
    #[serde(default = "default_subscription")]
    pub subscription: String,
}

/// Which rule checks run before registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default = "default_true")]
    pub field_imports_exist: bool,

    #[serde(default = "default_true")]
    pub no_circular_field_imports: bool,
}

// Default value functions
fn default_builtin_source() -> String {
    builtins::SOURCE_NAME.to_string()
}

fn default_mutation() -> String {
    "mutation".to_string()
}

fn default_subscription() -> String {
    "subscription".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            builtin_source: default_builtin_source(),
            mutation: default_mutation(),
            subscription: default_subscription(),
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            field_imports_exist: true,
            no_circular_field_imports: true,
        }
    }
}

impl AssemblyConfig {
    /// Load configuration from default locations
    pub fn load() -> std::result::Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, with `config_path` taking precedence over default locations
    pub fn load_from(config_path: Option<&str>) -> std::result::Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["assembly.toml", ".assembly.toml", "config/assembly.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "familiar", "assembly") {
            let xdg_config = config_dir.config_dir().join("assembly.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // ASSEMBLY__SCHEMA__MUTATION=root_mutation
        builder = builder.add_source(
            Environment::with_prefix("ASSEMBLY")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
