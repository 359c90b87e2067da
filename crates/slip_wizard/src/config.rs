use std::{fs, io::ErrorKind, path::Path};

use serde::Deserialize;

use crate::error::SettingsError;

const ENV_PREFIX: &str = "SLIP_WIZARD__";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardSettings {
    /// Skip the subcategory step when the chosen category has exactly one.
    pub collapse_single_subcategory: bool,
    /// Ask before closing even when the draft holds nothing.
    pub confirm_empty_cancel: bool,
    /// Reject selections the attached catalog does not offer.
    pub enforce_catalog: bool,
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            collapse_single_subcategory: false,
            confirm_empty_cancel: false,
            enforce_catalog: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    collapse_single_subcategory: Option<bool>,
    confirm_empty_cancel: Option<bool>,
    enforce_catalog: Option<bool>,
}

/// Defaults, then the TOML file at `path` if it exists, then `SLIP_WIZARD__*`
/// environment variables.
pub fn load_settings(path: impl AsRef<Path>) -> Result<WizardSettings, SettingsError> {
    let mut settings = WizardSettings::default();

    if let Some(file_cfg) = read_settings_file(path.as_ref())? {
        apply_file(&mut settings, file_cfg);
    }
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    Ok(settings)
}

fn read_settings_file(path: &Path) -> Result<Option<SettingsFile>, SettingsError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.display().to_string(),
                source,
            })
        }
    };

    toml::from_str::<SettingsFile>(&raw)
        .map(Some)
        .map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })
}

fn apply_file(settings: &mut WizardSettings, file_cfg: SettingsFile) {
    if let Some(v) = file_cfg.collapse_single_subcategory {
        settings.collapse_single_subcategory = v;
    }
    if let Some(v) = file_cfg.confirm_empty_cancel {
        settings.confirm_empty_cancel = v;
    }
    if let Some(v) = file_cfg.enforce_catalog {
        settings.enforce_catalog = v;
    }
}

pub(crate) fn apply_env_overrides(
    settings: &mut WizardSettings,
    lookup: impl Fn(&str) -> Option<String>,
) {
    let flag = |name: &str| {
        lookup(&format!("{ENV_PREFIX}{name}"))
            .as_deref()
            .and_then(parse_flag)
    };

    if let Some(v) = flag("COLLAPSE_SINGLE_SUBCATEGORY") {
        settings.collapse_single_subcategory = v;
    }
    if let Some(v) = flag("CONFIRM_EMPTY_CANCEL") {
        settings.confirm_empty_cancel = v;
    }
    if let Some(v) = flag("ENFORCE_CATALOG") {
        settings.enforce_catalog = v;
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
