//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::PorticoConfig;
use crate::domain::errors::PorticoError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into PorticoConfig
/// 4. Applies environment variable overrides (PORTICO_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, TOML parsing fails, a
/// referenced environment variable is unset, or validation fails.
pub fn load_config(path: impl AsRef<Path>) -> Result<PorticoConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PorticoError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PorticoError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: PorticoConfig = toml::from_str(&contents)
        .map_err(|e| PorticoError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        PorticoError::Validation(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. Referencing an unset variable is an
/// error listing every missing name at once.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        // Skip comment lines - don't process env vars in comments
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(PorticoError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the PORTICO_* prefix
///
/// Environment variables follow the pattern: PORTICO_<SECTION>_<KEY>
/// For example: PORTICO_EXPORT_PATH, PORTICO_SOURCE_ROOT
fn apply_env_overrides(config: &mut PorticoConfig) {
    if let Ok(val) = std::env::var("PORTICO_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("PORTICO_EXPORT_PATH") {
        config.export.path = Some(val);
    }
    if let Ok(val) = std::env::var("PORTICO_EXPORT_SOURCE_LABEL") {
        config.export.source_label = Some(val);
    }
    if let Ok(val) = std::env::var("PORTICO_EXPORT_COMPRESS") {
        config.export.compress = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("PORTICO_EXPORT_STREAMING") {
        config.export.streaming = val.parse().unwrap_or(false);
    }

    if let Ok(val) = std::env::var("PORTICO_SOURCE_ROOT") {
        config.source.root = val;
    }
    if let Ok(val) = std::env::var("PORTICO_SOURCE_PREFIX") {
        config.source.prefix = val;
    }
}
