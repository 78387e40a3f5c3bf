//! Deployment settings loaded from `.fieldcrypt.toml`.

pub mod settings;

pub use settings::Settings;
