use std::{fs, path::Path};

use serde::Deserialize;
use tracing::warn;
use xdotool_integration::DEFAULT_TYPE_DELAY_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: String,
    pub xdotool_path: String,
    pub type_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5005".into(),
            xdotool_path: "xdotool".into(),
            type_delay_ms: DEFAULT_TYPE_DELAY_MS,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    xdotool_path: Option<String>,
    type_delay_ms: Option<u64>,
}

/// Defaults, then the TOML file at `path` if present, then the environment.
pub fn load_settings(path: &Path) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        if let Err(error) = apply_file(&mut settings, &raw) {
            warn!(path = %path.display(), %error, "ignoring unparsable config file");
        }
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());

    settings
}

fn apply_file(settings: &mut Settings, raw: &str) -> Result<(), toml::de::Error> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.bind_addr {
        settings.bind_addr = v;
    }
    if let Some(v) = file_cfg.xdotool_path {
        settings.xdotool_path = v;
    }
    if let Some(v) = file_cfg.type_delay_ms {
        settings.type_delay_ms = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("CAPTOR_BIND") {
        settings.bind_addr = v;
    }
    if let Some(v) = var("APP__BIND_ADDR") {
        settings.bind_addr = v;
    }

    if let Some(v) = var("CAPTOR_XDOTOOL") {
        settings.xdotool_path = v;
    }

    if let Some(v) = var("CAPTOR_TYPE_DELAY_MS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.type_delay_ms = parsed,
            Err(_) => warn!(value = %v, "ignoring invalid CAPTOR_TYPE_DELAY_MS"),
        }
    }
}

impl Settings {
    pub fn apply_cli(&mut self, bind_addr: Option<String>, xdotool_path: Option<String>) {
        if let Some(v) = bind_addr {
            self.bind_addr = v;
        }
        if let Some(v) = xdotool_path {
            self.xdotool_path = v;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
