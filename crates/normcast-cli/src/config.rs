//! Declarative options file
//!
//! The file carries the subset of the configuration bundle that is plain
//! data. Anything requiring code (transformers, custom validators, parser
//! overrides) is library-only.

use crate::error::{Error, Result};
use normcast_core::{EmptyStringPolicy, NormalizerOptions, ValidationMode};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsFile {
    pub treat_empty_string_as: Option<EmptyStringPolicy>,
    pub remove_undefined_fields: Option<bool>,
    pub enable_date_parsing: Option<bool>,
    pub enable_json_parsing: Option<bool>,
    pub convert_numbers: Option<bool>,
    pub convert_booleans: Option<bool>,
    pub convert_nulls: Option<bool>,
    pub whitelist: Option<Vec<String>>,
    pub blacklist: Option<Vec<String>>,
    pub default_values: Option<HashMap<String, Value>>,
    pub validation_mode: Option<ValidationMode>,
    pub language: Option<String>,
}

impl OptionsFile {
    /// Load from a JSON or YAML file, selected by extension
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| matches!(ext, "yml" | "yaml"));

        let parsed = if is_yaml {
            serde_yaml::from_str(&content).map_err(|e| Error::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?
        } else {
            serde_json::from_str(&content).map_err(|e| Error::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?
        };

        Ok(parsed)
    }

    /// Overlay the file's settings onto the library defaults
    pub fn into_options(self) -> NormalizerOptions {
        let mut options = NormalizerOptions::default();

        if let Some(policy) = self.treat_empty_string_as {
            options.treat_empty_string_as = policy;
        }
        if let Some(flag) = self.remove_undefined_fields {
            options.remove_undefined_fields = flag;
        }
        if let Some(flag) = self.enable_date_parsing {
            options.enable_date_parsing = flag;
        }
        if let Some(flag) = self.enable_json_parsing {
            options.enable_json_parsing = flag;
        }
        if let Some(flag) = self.convert_numbers {
            options.convert_numbers = flag;
        }
        if let Some(flag) = self.convert_booleans {
            options.convert_booleans = flag;
        }
        if let Some(flag) = self.convert_nulls {
            options.convert_nulls = flag;
        }
        if let Some(keys) = self.whitelist {
            options.whitelist = Some(keys);
        }
        if let Some(keys) = self.blacklist {
            options.blacklist = Some(keys);
        }
        if let Some(defaults) = self.default_values {
            options.default_values = defaults;
        }
        if let Some(mode) = self.validation_mode {
            options.validation_mode = mode;
        }
        if let Some(language) = self.language {
            options.language = language;
        }

        options
    }
}
