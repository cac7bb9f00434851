// file: src/config/loader.rs
// version: 2.0.0
// guid: 0e94d7a3-6b1c-4f25-8d07-a3c5b9e1f268

//! Environment file loading and variable substitution

use super::{ProvisionConfig, CONFIG_HINT};
use crate::error::{Result, TemplateError};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Default configuration file looked up in the working directory
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Loader for `KEY=VALUE` configuration files with `${VAR}` substitution
pub struct ConfigLoader {
    env_vars: HashMap<String, String>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self {
            env_vars: std::env::vars().collect(),
        }
    }

    /// Create a loader that ignores the process environment
    pub fn isolated() -> Self {
        Self {
            env_vars: HashMap::new(),
        }
    }

    /// Load provisioning configuration from an environment file
    pub fn load_env_file<P: AsRef<Path>>(&self, path: P) -> Result<ProvisionConfig> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(TemplateError::config(format!(
                "Configuration file {} not found. {}",
                path.display(),
                CONFIG_HINT
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            TemplateError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let values = self.parse_env_content(&content)?;
        debug!("Loaded {} configuration keys from {}", values.len(), path.display());

        ProvisionConfig::from_map(&values)
    }

    /// Parse `KEY=VALUE` lines into a map, expanding `${VAR}` references
    pub fn parse_env_content(&self, content: &str) -> Result<HashMap<String, String>> {
        let line_re = Regex::new(r"^\s*(?:export\s+)?([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(.*?)\s*$")
            .map_err(|e| TemplateError::config(format!("Invalid regex pattern: {}", e)))?;

        let mut values = HashMap::new();

        for (index, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let cap = line_re.captures(line).ok_or_else(|| {
                TemplateError::config(format!(
                    "Line {} is not a KEY=VALUE entry: {}",
                    index + 1,
                    trimmed
                ))
            })?;

            let key = cap[1].to_string();
            let raw = &cap[2];

            let value = if let Some(literal) = strip_quotes(raw, '\'') {
                literal.to_string()
            } else {
                let unquoted = strip_quotes(raw, '"').unwrap_or(raw);
                self.expand_env_vars(unquoted, &values)?
            };

            values.insert(key, value);
        }

        Ok(values)
    }

    /// Expand `${VAR}` using earlier file entries first, then the environment
    fn expand_env_vars(&self, content: &str, file_vars: &HashMap<String, String>) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| TemplateError::config(format!("Invalid regex pattern: {}", e)))?;

        let mut result = content.to_string();
        let mut missing_vars = Vec::new();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];

            match file_vars.get(var_name).or_else(|| self.env_vars.get(var_name)) {
                Some(value) => result = result.replace(placeholder, value),
                None => missing_vars.push(var_name.to_string()),
            }
        }

        if !missing_vars.is_empty() {
            return Err(TemplateError::config(format!(
                "Missing environment variables: {}",
                missing_vars.join(", ")
            )));
        }

        Ok(result)
    }

    /// Set environment variable for substitution
    pub fn set_env_var(&mut self, key: String, value: String) {
        self.env_vars.insert(key, value);
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn strip_quotes(value: &str, quote: char) -> Option<&str> {
    if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
        Some(&value[1..value.len() - 1])
    } else {
        None
    }
}
