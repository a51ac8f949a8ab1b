use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use client_core::DEFAULT_AVATAR_BASE;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "friends-split.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub avatar_base_url: String,
    pub seed_friends: bool,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            avatar_base_url: DEFAULT_AVATAR_BASE.into(),
            seed_friends: true,
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    avatar_base_url: Option<String>,
    seed_friends: Option<bool>,
    log_filter: Option<String>,
}

/// Defaults, then the TOML file, then `APP__*` environment overrides.
///
/// An explicitly requested file must exist; the default file is optional.
pub fn load_settings(explicit_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = explicit_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    match fs::read_to_string(&path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?,
        Err(err) if explicit_path.is_some() => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()));
        }
        Err(_) => {}
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.avatar_base_url {
        settings.avatar_base_url = v;
    }
    if let Some(v) = file_cfg.seed_friends {
        settings.seed_friends = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("APP__AVATAR_BASE_URL") {
        settings.avatar_base_url = v;
    }

    if let Some(v) = var("APP__SEED_FRIENDS") {
        match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => settings.seed_friends = true,
            "0" | "false" | "no" => settings.seed_friends = false,
            other => tracing::warn!(value = other, "ignoring unrecognised APP__SEED_FRIENDS"),
        }
    }

    if let Some(v) = var("RUST_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = var("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
