//! Sheet configuration loaded from the environment.
use std::env;
use std::path::PathBuf;

use rpg_core::RulesConfig;

/// Output format for printed sheets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SheetFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug)]
pub struct SheetConfig {
    pub data_dir: PathBuf,
    pub format: SheetFormat,
    pub party_level: u32,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(Self::DEFAULT_DATA_DIR),
            format: SheetFormat::Text,
            party_level: RulesConfig::MIN_LEVEL,
        }
    }
}

impl SheetConfig {
    pub const DEFAULT_DATA_DIR: &'static str = "data";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `RPG_DATA_DIR` - Directory holding content files (default: `data`)
    /// - `RPG_SHEET_FORMAT` - `text` or `json` (default: text)
    /// - `RPG_PARTY_LEVEL` - Level for every recruit, clamped to 1..=99 (default: 1)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("RPG_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Ok(raw) = env::var("RPG_SHEET_FORMAT") {
            match raw.parse() {
                Ok(format) => config.format = format,
                Err(_) => tracing::warn!("unknown RPG_SHEET_FORMAT {raw:?}, using text"),
            }
        }

        if let Some(level) = read_env::<u32>("RPG_PARTY_LEVEL") {
            config.party_level = RulesConfig::clamp_level(level);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
