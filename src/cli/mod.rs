//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::Path;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::crypto::CredentialHasher;
use crate::errors::{FieldCryptError, Result};
use crate::service::FieldCrypt;

/// fieldcrypt CLI: protect and inspect stored field values.
#[derive(Parser)]
#[command(
    name = "fieldcrypt",
    about = "Field-level encryption and password hashing",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory containing .fieldcrypt.toml (default: current directory)
    #[arg(long, default_value = ".", global = true)]
    pub config_dir: String,

    /// Environment variable holding the master key (overrides the config file)
    #[arg(long, global = true)]
    pub key_env: Option<String>,

    /// Log level when FIELDCRYPT_LOG is unset
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Hash a password (omit for interactive prompt)
    Hash {
        /// Password to hash
        password: Option<String>,
    },

    /// Check a password against a stored hash
    Verify {
        /// Stored Argon2 PHC hash
        hash: String,
        /// Password to check (omit for interactive prompt)
        password: Option<String>,
    },

    /// Encrypt a field value
    Encrypt {
        /// Plaintext value (omit for interactive prompt or stdin)
        value: Option<String>,
        /// Use deterministic (searchable) encryption
        #[arg(short, long)]
        deterministic: bool,
    },

    /// Decrypt a stored field value
    Decrypt {
        /// Stored payload
        payload: String,
        /// The payload was produced with --deterministic
        #[arg(short, long)]
        deterministic: bool,
    },

    /// Check whether a stored deterministic payload encrypts a value
    Matches {
        /// Stored deterministic payload
        stored: String,
        /// Plaintext to compare (omit for interactive prompt)
        value: Option<String>,
    },

    /// Describe a stored payload without decrypting it
    Inspect {
        /// Stored payload
        payload: String,
    },

    /// Generate a new random master key (hex)
    Keygen,

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load settings from `--config-dir`, applying `--key-env` on top.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::load(Path::new(&cli.config_dir))?;
    if let Some(var) = &cli.key_env {
        settings.key_env = var.clone();
    }
    Ok(settings)
}

/// Build the field protector from the CLI's settings.
pub fn build_service(cli: &Cli) -> Result<FieldCrypt> {
    let settings = load_settings(cli)?;
    FieldCrypt::from_settings(&settings)
}

/// Build a password hasher from the CLI's settings. No master key is needed.
pub fn build_hasher(cli: &Cli) -> Result<CredentialHasher> {
    CredentialHasher::new(load_settings(cli)?.argon2_params())
}

/// Get a secret value, trying in order:
/// 1. The inline argument (warns about shell history)
/// 2. Piped stdin
/// 3. Interactive hidden prompt
///
/// Returns `Zeroizing<String>` so the value is wiped from memory on drop.
pub fn read_secret(inline: Option<&str>, prompt: &str) -> Result<Zeroizing<String>> {
    if let Some(v) = inline {
        output::warning("Value provided on command line; it may appear in shell history.");
        return Ok(Zeroizing::new(v.to_string()));
    }

    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed = buf.trim_end_matches(['\r', '\n']).to_string();
        return Ok(Zeroizing::new(trimmed));
    }

    let value = dialoguer::Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(|e| match e {
            dialoguer::Error::IO(io) if io.kind() == io::ErrorKind::Interrupted => {
                FieldCryptError::UserCancelled
            }
            other => FieldCryptError::CommandFailed(format!("input prompt: {other}")),
        })?;
    Ok(Zeroizing::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_deterministic_flag() {
        let cli = Cli::try_parse_from(["fieldcrypt", "encrypt", "-d", "x"]).unwrap();
        match cli.command {
            Commands::Encrypt {
                value,
                deterministic,
            } => {
                assert_eq!(value.as_deref(), Some("x"));
                assert!(deterministic);
            }
            _ => panic!("expected encrypt"),
        }
    }

    #[test]
    fn completions_shell_is_a_value_enum() {
        let cli = Cli::try_parse_from(["fieldcrypt", "completions", "zsh"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Completions {
                shell: clap_complete::Shell::Zsh
            }
        ));
        assert!(Cli::try_parse_from(["fieldcrypt", "completions", "csh"]).is_err());
    }

    #[test]
    fn key_env_flag_overrides_settings() {
        let tmp = TempDir::new().unwrap();
        let cli = Cli::try_parse_from([
            "fieldcrypt",
            "--config-dir",
            tmp.path().to_str().unwrap(),
            "--key-env",
            "OTHER_KEY",
            "keygen",
        ])
        .unwrap();
        assert_eq!(load_settings(&cli).unwrap().key_env, "OTHER_KEY");
    }

    #[test]
    fn inline_secret_is_used_verbatim() {
        let v = read_secret(Some("  spaced  "), "unused").unwrap();
        assert_eq!(v.as_str(), "  spaced  ");
    }
}
