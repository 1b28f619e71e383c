//! Settings Record
//!
//! Flat user preferences. Every known field is validated on its own and
//! falls back to its default when the stored or submitted value is out of
//! domain. Keys the shell does not know are carried through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_AUTO_SAVE: bool = true;
pub const DEFAULT_BACKEND_PORT: u16 = 8000;
pub const DEFAULT_MAX_RECENT_FILES: u32 = 10;

const KEY_THEME: &str = "theme";
const KEY_AUTO_SAVE: &str = "autoSave";
const KEY_BACKEND_PORT: &str = "backendPort";
const KEY_MAX_RECENT_FILES: &str = "maxRecentFiles";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Auto,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Auto => "auto",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "auto" => Some(Theme::Auto),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub theme: Theme,
    pub auto_save: bool,
    pub backend_port: u16,
    pub max_recent_files: u32,
    /// Keys not interpreted by the shell
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            auto_save: DEFAULT_AUTO_SAVE,
            backend_port: DEFAULT_BACKEND_PORT,
            max_recent_files: DEFAULT_MAX_RECENT_FILES,
            extra: Map::new(),
        }
    }
}

impl Settings {
    /// Build a record from an arbitrary JSON object, replacing each
    /// out-of-domain field with its default
    pub fn sanitize(mut raw: Map<String, Value>) -> Self {
        let theme = raw
            .remove(KEY_THEME)
            .and_then(|v| v.as_str().and_then(Theme::parse))
            .unwrap_or_default();
        let auto_save = raw
            .remove(KEY_AUTO_SAVE)
            .and_then(|v| v.as_bool())
            .unwrap_or(DEFAULT_AUTO_SAVE);
        let backend_port = raw
            .remove(KEY_BACKEND_PORT)
            .and_then(|v| whole_number(&v))
            .and_then(|n| u16::try_from(n).ok())
            .filter(|port| *port != 0)
            .unwrap_or(DEFAULT_BACKEND_PORT);
        let max_recent_files = raw
            .remove(KEY_MAX_RECENT_FILES)
            .and_then(|v| whole_number(&v))
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(DEFAULT_MAX_RECENT_FILES);

        Self {
            theme,
            auto_save,
            backend_port,
            max_recent_files,
            extra: raw,
        }
    }

    pub fn into_map(self) -> Map<String, Value> {
        let mut map = self.extra;
        map.insert(KEY_THEME.into(), Value::from(self.theme.as_str()));
        map.insert(KEY_AUTO_SAVE.into(), Value::from(self.auto_save));
        map.insert(KEY_BACKEND_PORT.into(), Value::from(self.backend_port));
        map.insert(KEY_MAX_RECENT_FILES.into(), Value::from(self.max_recent_files));
        map
    }
}

/// Non-negative integers, including floats with no fractional part
fn whole_number(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
        .map(|f| f as u64)
}

/// Settings as returned by `settings:get`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSnapshot {
    pub settings: Settings,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_default: bool,
}
