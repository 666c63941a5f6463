//! Command-line argument parsing and definitions
//!
//! Single-purpose interface: read one JSON document, normalize it, print
//! the result. Everything that cannot be expressed as data (transformers,
//! custom validators) stays in the library API; the CLI binds only the
//! declarative subset plus the built-in validator factories.

use crate::error::{Error, Result};
use clap::{Parser, ValueEnum};
use normcast_core::ValidationMode;
use std::path::PathBuf;

/// Normcast - normalize string-heavy JSON into typed structures
#[derive(Parser, Debug)]
#[command(name = "normcast", version, author, about, long_about = None)]
pub struct Cli {
    /// Input JSON document; `-` or absent reads stdin
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Options file (JSON or YAML) with the declarative configuration subset
    #[arg(short, long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// JSON Schema file for the whole-result validation pass
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Validation mode (overrides the options file)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Restrict processing to these keys (repeatable)
    #[arg(long = "allow", value_name = "KEY")]
    pub allow: Vec<String>,

    /// Remove these keys from processing (repeatable)
    #[arg(long = "deny", value_name = "KEY")]
    pub deny: Vec<String>,

    /// Bind a built-in validator factory to a field, e.g. `email=email`
    /// (repeatable; factories: email, password, username, phone)
    #[arg(long = "validator", value_name = "KEY=FACTORY")]
    pub validators: Vec<String>,

    /// Message table file (JSON) for error messages
    #[arg(long, value_name = "FILE")]
    pub messages: Option<PathBuf>,

    /// Active message language tag
    #[arg(short, long)]
    pub language: Option<String>,

    /// Pretty-print the normalized output
    #[arg(long)]
    pub pretty: bool,

    /// Log level filter (overridden by RUST_LOG)
    #[arg(long, default_value = "warn", env = "NORMCAST_LOG")]
    pub log_level: String,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Validation mode as a CLI value
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    None,
    Collect,
    Strict,
}

impl From<ModeArg> for ValidationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::None => ValidationMode::None,
            ModeArg::Collect => ValidationMode::Collect,
            ModeArg::Strict => ValidationMode::Strict,
        }
    }
}

/// The built-in validator factories the CLI can bind by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactoryName {
    Email,
    Password,
    Username,
    Phone,
}

/// Parse a `KEY=FACTORY` validator binding
pub fn parse_validator_binding(binding: &str) -> Result<(String, FactoryName)> {
    let (key, factory) = binding.split_once('=').ok_or_else(|| Error::InvalidArgument {
        message: format!("validator binding '{binding}' is not of the form KEY=FACTORY"),
    })?;

    let factory = match factory {
        "email" => FactoryName::Email,
        "password" => FactoryName::Password,
        "username" => FactoryName::Username,
        "phone" => FactoryName::Phone,
        other => {
            return Err(Error::InvalidArgument {
                message: format!(
                    "unknown validator factory '{other}' (expected email, password, username, or phone)"
                ),
            })
        }
    };

    Ok((key.to_string(), factory))
}
