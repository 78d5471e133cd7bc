use std::env;
use std::fs;
use std::path::Path;

use pricebook_core::config::{resolve_config_path, AppConfig, LoadOptions};
use toml::Value;

pub fn run(options: &LoadOptions) -> String {
    let config = match AppConfig::load(options.clone()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = resolve_config_path(options.config_path.as_deref());
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str]| {
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let lines = [
        "effective config (source precedence: env > file > default):".to_string(),
        render_line(
            "pricing.currency",
            &config.pricing.currency,
            source("pricing.currency", &["PRICEBOOK_PRICING_CURRENCY"]),
        ),
        render_line(
            "pricing.minor_unit_digits",
            &config.pricing.minor_unit_digits.to_string(),
            source("pricing.minor_unit_digits", &["PRICEBOOK_PRICING_MINOR_UNIT_DIGITS"]),
        ),
        render_line(
            "logging.level",
            &config.logging.level,
            source("logging.level", &["PRICEBOOK_LOGGING_LEVEL", "PRICEBOOK_LOG_LEVEL"]),
        ),
        render_line(
            "logging.format",
            config.logging.format.as_str(),
            source("logging.format", &["PRICEBOOK_LOGGING_FORMAT", "PRICEBOOK_LOG_FORMAT"]),
        ),
    ];

    lines.join("\n")
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    let env_key = env_keys
        .iter()
        .find(|key| env::var(key).is_ok_and(|value| !value.trim().is_empty()));
    if let Some(env_key) = env_key {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
