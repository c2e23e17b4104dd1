use anyhow::Result;
use config::{Config, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Directory the persisted history file lives in.
    #[serde(default = "default_state_dir")]
    pub state_dir: String,
    /// Variant switch: require Tn > 0 instead of Tn ≥ 0.
    #[serde(default)]
    pub strict_positive_tn: bool,
    /// Variant switch: store RFC 3339 timestamps and format at render
    /// time, instead of storing the display string directly.
    #[serde(default = "default_store_raw_timestamp")]
    pub store_raw_timestamp: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            strict_positive_tn: false,
            store_raw_timestamp: default_store_raw_timestamp(),
        }
    }
}

fn default_state_dir() -> String {
    "state".to_string()
}

fn default_store_raw_timestamp() -> bool {
    true
}

pub fn load_settings() -> Result<Settings> {
    let settings = Config::builder()
        .add_source(File::with_name("config/default.toml").required(false))
        .add_source(config::Environment::with_prefix("KGCALC").separator("__"))
        .build()?;
    Ok(settings.try_deserialize()?)
}
