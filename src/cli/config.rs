//! `emem config` command
//!
//! Get or set configuration values.
//!
//! # Usage
//! ```bash
//! emem config                          # Show config file
//! emem config search.default_limit     # Get specific value
//! emem config content.charset ascii    # Set value
//! emem config --path                   # Show config locations
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use super::utils::Workspace;
use super::GlobalArgs;
use crate::config::{Config, CONFIG_FILE_NAME};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Config key (e.g., search.default_limit, content.charset)
    pub key: Option<String>,

    /// Value to set
    pub value: Option<String>,

    /// List all config values
    #[arg(long)]
    pub list: bool,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Use global config (~/.easy-memory/config.toml) instead of local
    #[arg(short, long)]
    pub global: bool,
}

fn get_config_path(global: bool, ws: &Workspace) -> Result<PathBuf> {
    if global {
        Config::global_config_path().context("Could not determine home directory")
    } else {
        Ok(ws.store_dir.join(CONFIG_FILE_NAME))
    }
}

pub fn run(args: ConfigArgs, global_args: &GlobalArgs) -> Result<()> {
    let ws = Workspace::load(global_args)?;
    let config_path = match &global_args.config {
        Some(explicit) if !args.global => explicit.clone(),
        _ => get_config_path(args.global, &ws)?,
    };

    if args.path {
        if let Some(global) = Config::global_config_path() {
            println!("Global: {}", global.display());
        }
        println!("Local:  {}", ws.store_dir.join(CONFIG_FILE_NAME).display());
        println!();
        if config_path.exists() {
            println!("✓ Active: {}", config_path.display());
        } else {
            println!("⚠ No config file found at {}", config_path.display());
        }
        return Ok(());
    }

    if args.list || (args.key.is_none() && args.value.is_none()) {
        if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            println!("📋 Configuration ({}):\n", config_path.display());
            println!("{}", content);
        } else {
            println!("📋 No config file at {}", config_path.display());
            println!();
            println!("Defaults:");
            println!("{}", toml::to_string_pretty(&Config::default())?);
        }
        return Ok(());
    }

    if let Some(key) = &args.key {
        if let Some(value) = &args.value {
            set_config_value(&config_path, key, value)?;
            println!("✅ Set {} = {} (in {})", key, value, config_path.display());
        } else {
            match get_config_value(&config_path, key)? {
                Some(v) => println!("{}", v),
                None => println!("(not set)"),
            }
        }
    }

    Ok(())
}

/// Set a nested config value using dot notation (e.g., "search.default_limit")
///
/// The edited document must still load as a [`Config`]; otherwise nothing is written.
fn set_config_value(path: &Path, key: &str, val: &str) -> Result<()> {
    use toml_edit::{value, DocumentMut};

    let content = if path.exists() {
        fs::read_to_string(path)?
    } else {
        String::new()
    };

    let mut doc: DocumentMut = content.parse().context("Failed to parse config.toml")?;

    let parts: Vec<&str> = key.split('.').collect();
    match parts.as_slice() {
        [top] => doc[*top] = value(parse_toml_value(val)),
        [section, field] => {
            if doc.get(*section).is_none() {
                doc[*section] = toml_edit::table();
            }
            doc[*section][*field] = value(parse_toml_value(val));
        }
        _ => bail!("Key too deep: {}. Max depth is section.key", key),
    }

    let rendered = doc.to_string();
    toml::from_str::<Config>(&rendered)
        .with_context(|| format!("Invalid value for {}: {}", key, val))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, rendered)?;
    Ok(())
}

/// Get a config value by dot notation key
fn get_config_value(path: &Path, key: &str) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let doc: toml::Table = toml::from_str(&content).context("Failed to parse config.toml")?;

    let parts: Vec<&str> = key.split('.').collect();
    let val = match parts.as_slice() {
        [top] => doc.get(*top),
        [section, field] => doc.get(*section).and_then(|t| t.get(*field)),
        _ => None,
    };

    Ok(val.map(|v| match v {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }))
}

/// Parse string value to appropriate TOML type
fn parse_toml_value(s: &str) -> toml_edit::Value {
    if let Ok(b) = s.parse::<bool>() {
        return b.into();
    }
    if let Ok(i) = s.parse::<i64>() {
        return i.into();
    }
    if let Ok(f) = s.parse::<f64>() {
        return f.into();
    }
    s.into()
}
