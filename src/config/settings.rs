use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::crypto::keys::KeyEncoding;
use crate::crypto::password::Argon2Params;
use crate::errors::{FieldCryptError, Result};

/// Deployment configuration, loaded from `.fieldcrypt.toml`.
///
/// Every field has a default so the library works without any config file;
/// only the master key itself must come from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Name of the environment variable holding the master key.
    #[serde(default = "default_key_env")]
    pub key_env: String,

    /// How the master key string is encoded (`auto`, `hex` or `raw`).
    #[serde(default)]
    pub key_encoding: KeyEncoding,

    /// Fall back to the built-in development key when the variable is unset.
    /// Never enable this in production.
    #[serde(default)]
    pub allow_dev_fallback: bool,

    /// Argon2 memory cost in KiB (default: 19 MiB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 2).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 1).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_key_env() -> String {
    "FIELD_ENCRYPTION_KEY".to_string()
}

fn default_argon2_memory_kib() -> u32 {
    Argon2Params::default().memory_kib
}

fn default_argon2_iterations() -> u32 {
    Argon2Params::default().iterations
}

fn default_argon2_parallelism() -> u32 {
    Argon2Params::default().parallelism
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_env: default_key_env(),
            key_encoding: KeyEncoding::default(),
            allow_dev_fallback: false,
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the config directory.
    pub const FILE_NAME: &'static str = ".fieldcrypt.toml";

    /// Load settings from `<config_dir>/.fieldcrypt.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, a configuration error is returned.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            FieldCryptError::Configuration(format!(
                "cannot read {}: {e}",
                config_path.display()
            ))
        })?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            FieldCryptError::Configuration(format!(
                "failed to parse {}: {e}",
                config_path.display()
            ))
        })?;

        Ok(settings)
    }

    /// Convert the Argon2 settings into hasher params.
    pub fn argon2_params(&self) -> Argon2Params {
        Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
