use std::{fs, path::PathBuf, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

pub const CONFIG_FILE_NAME: &str = "finder.toml";
pub const CONFIG_DIR_NAME: &str = "food-finder";
const ENV_PREFIX: &str = "FINDER__";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub overpass_url: String,
    /// Sent to Overpass as the `[timeout:N]` directive.
    pub overpass_timeout_secs: u32,
    pub geolocation_url: String,
    pub geolocation_timeout_ms: u64,
    pub default_radius_m: u32,
    pub spin_duration_ms: u64,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            overpass_url: "https://overpass-api.de/api/interpreter".into(),
            overpass_timeout_secs: 25,
            geolocation_url: "https://ipapi.co/json/".into(),
            geolocation_timeout_ms: 15_000,
            default_radius_m: 100,
            spin_duration_ms: 5_000,
            user_agent: concat!("food-finder/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

impl Settings {
    pub fn geolocation_timeout(&self) -> Duration {
        Duration::from_millis(self.geolocation_timeout_ms)
    }

    pub fn spin_duration(&self) -> Duration {
        Duration::from_millis(self.spin_duration_ms)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    overpass_url: Option<String>,
    overpass_timeout_secs: Option<u32>,
    geolocation_url: Option<String>,
    geolocation_timeout_ms: Option<u64>,
    default_radius_m: Option<u32>,
    spin_duration_ms: Option<u64>,
    user_agent: Option<String>,
}

/// Defaults, then the first config file found, then `FINDER__*` variables.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Some(path) = config_file_candidates().into_iter().find(|p| p.is_file()) {
        match fs::read_to_string(&path) {
            Ok(raw) => {
                if let Err(err) = apply_file(&mut settings, &raw) {
                    warn!("ignoring malformed config file '{}': {err}", path.display());
                } else {
                    info!("loaded settings from '{}'", path.display());
                }
            }
            Err(err) => warn!("failed to read config file '{}': {err}", path.display()),
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

pub fn config_file_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
    }
    candidates
}

pub fn apply_file(settings: &mut Settings, raw: &str) -> Result<(), toml::de::Error> {
    let file: FileSettings = toml::from_str(raw)?;

    if let Some(v) = file.overpass_url {
        set_url(&mut settings.overpass_url, "overpass_url", v);
    }
    if let Some(v) = file.overpass_timeout_secs {
        settings.overpass_timeout_secs = v;
    }
    if let Some(v) = file.geolocation_url {
        set_url(&mut settings.geolocation_url, "geolocation_url", v);
    }
    if let Some(v) = file.geolocation_timeout_ms {
        settings.geolocation_timeout_ms = v;
    }
    if let Some(v) = file.default_radius_m.filter(|r| *r > 0) {
        settings.default_radius_m = v;
    }
    if let Some(v) = file.spin_duration_ms {
        settings.spin_duration_ms = v;
    }
    if let Some(v) = file.user_agent {
        settings.user_agent = v;
    }
    Ok(())
}

/// `lookup` resolves environment variable names; injected for tests.
pub fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

    if let Some(v) = var("OVERPASS_URL") {
        set_url(&mut settings.overpass_url, "FINDER__OVERPASS_URL", v);
    }
    if let Some(v) = var("GEOLOCATION_URL") {
        set_url(&mut settings.geolocation_url, "FINDER__GEOLOCATION_URL", v);
    }
    for (name, target) in [
        ("GEOLOCATION_TIMEOUT_MS", &mut settings.geolocation_timeout_ms),
        ("SPIN_DURATION_MS", &mut settings.spin_duration_ms),
    ] {
        set_parsed(target, name, var(name));
    }
    set_parsed(
        &mut settings.overpass_timeout_secs,
        "OVERPASS_TIMEOUT_SECS",
        var("OVERPASS_TIMEOUT_SECS"),
    );

    let mut radius = settings.default_radius_m;
    set_parsed(&mut radius, "DEFAULT_RADIUS_M", var("DEFAULT_RADIUS_M"));
    if radius > 0 {
        settings.default_radius_m = radius;
    }
}

fn set_parsed<T: FromStr>(target: &mut T, name: &str, raw: Option<String>) {
    let Some(raw) = raw else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(parsed) => *target = parsed,
        Err(_) => warn!("ignoring {ENV_PREFIX}{name}={raw:?}: not a valid number"),
    }
}

fn set_url(target: &mut String, name: &str, candidate: String) {
    match Url::parse(candidate.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => *target = url.to_string(),
        _ => warn!("ignoring {name}={candidate:?}: not an http(s) url"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
