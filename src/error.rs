use crate::validate::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InstallerError {
    #[error("Unknown plugin: \"{name}\". Available plugins: {available}")]
    UnknownPlugin { name: String, available: String },

    #[error("Unknown preset: \"{name}\". Available presets: {available}")]
    UnknownPreset { name: String, available: String },

    #[error("Unknown agent role in configuration: \"{0}\"")]
    UnknownRole(String),

    #[error("Validation failed:\n{}", format_violations(.0))]
    Validation(Vec<ValidationError>),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Template variable \"{{{{{name}}}}}\" has no value in {template}")]
    MissingVariable { name: String, template: String },

    #[error("Cannot resolve home directory for a global install (HOME and XDG_CONFIG_HOME are unset)")]
    HomeNotFound,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSONC parse error: {0}")]
    Jsonc(#[from] json5::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Update error: {0}")]
    UpdateError(String),
}

impl From<self_update::errors::Error> for InstallerError {
    fn from(err: self_update::errors::Error) -> Self {
        InstallerError::UpdateError(err.to_string())
    }
}

fn format_violations(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("  {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

pub type Result<T> = std::result::Result<T, InstallerError>;
