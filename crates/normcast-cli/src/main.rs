//! Normcast CLI - normalize JSON documents from the shell
//!
//! Reads one JSON document, applies a declarative options file plus any
//! flag-level overrides, and prints the normalized result to stdout.
//! Collect-mode failures go to stderr with exit code 1; a strict-mode
//! abort exits 2.

mod cli;
mod config;
mod error;
mod logging;

use cli::{parse_validator_binding, Cli, FactoryName};
use config::OptionsFile;
use error::{Error, Result};
use normcast_core::{
    create_email_validator, create_password_validator, create_phone_validator,
    create_username_validator, InputNormalizer, LoggerPlugin, MessageSource, NormalizerOptions,
    PasswordRules, PhoneRules, PluginRegistry, SchemaBackend, UsernameRules,
};
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use std::process;
use std::sync::Arc;

fn main() {
    let cli = Cli::parse_args();
    logging::init(&cli.log_level);

    match run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(e.exit_code());
        }
    }
}

fn run(cli: &Cli) -> Result<i32> {
    let document = read_document(cli.input.as_deref())?;
    let options = build_options(cli)?;

    let mut registry = PluginRegistry::new();
    registry.register(Arc::new(LoggerPlugin));

    let engine = InputNormalizer::new(options).with_registry(&registry);
    tracing::debug!(input = ?cli.input, "normalizing document");
    let outcome = engine.normalize(&document)?;

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&outcome.result)
    } else {
        serde_json::to_string(&outcome.result)
    }
    .map_err(|e| Error::Parse {
        path: "<output>".to_string(),
        message: e.to_string(),
    })?;
    println!("{rendered}");

    if let Some(errors) = &outcome.errors {
        for (field, message) in errors {
            eprintln!("{field}: {message}");
        }
        return Ok(1);
    }
    Ok(0)
}

/// Read the input document from a file, or stdin for `-`/absent
fn read_document(input: Option<&Path>) -> Result<Value> {
    let (content, path) = match input {
        Some(path) if path.as_os_str() != "-" => (
            std::fs::read_to_string(path).map_err(|source| Error::Io {
                path: path.display().to_string(),
                source,
            })?,
            path.display().to_string(),
        ),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|source| Error::Io {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            (buffer, "<stdin>".to_string())
        }
    };

    serde_json::from_str(&content).map_err(|e| Error::Parse {
        path,
        message: e.to_string(),
    })
}

fn read_json_file(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|e| Error::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Assemble the engine options: file first, then flag-level overrides
fn build_options(cli: &Cli) -> Result<NormalizerOptions> {
    let mut options = match &cli.options {
        Some(path) => OptionsFile::load(path)?.into_options(),
        None => NormalizerOptions::default(),
    };

    if let Some(mode) = cli.mode {
        options.validation_mode = mode.into();
    }
    if !cli.allow.is_empty() {
        options.whitelist = Some(cli.allow.clone());
    }
    if !cli.deny.is_empty() {
        options.blacklist = Some(cli.deny.clone());
    }
    if let Some(language) = &cli.language {
        options.language = language.clone();
    }

    if let Some(path) = &cli.schema {
        let schema = read_json_file(path)?;
        options = options.with_schema(SchemaBackend::json_schema(&schema)?);
    }

    if let Some(path) = &cli.messages {
        let table = read_json_file(path)?;
        options = options.with_messages(MessageSource::table(table));
    }

    for binding in &cli.validators {
        let (key, factory) = parse_validator_binding(binding)?;
        options = match factory {
            FactoryName::Email => options.with_validator(key, create_email_validator()),
            FactoryName::Password => {
                options.with_validator(key, create_password_validator(PasswordRules::default()))
            }
            FactoryName::Username => {
                options.with_validator(key, create_username_validator(UsernameRules::default()))
            }
            FactoryName::Phone => {
                options.with_validator(key, create_phone_validator(PhoneRules::default()))
            }
        };
    }

    Ok(options)
}
