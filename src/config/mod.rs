use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use crate::utils::time::parse_timezone;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// `local`, `Z` or a fixed offset such as `+02:00`.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Days shown by `report schedule` when `--days` is omitted.
    #[serde(default = "default_report_days")]
    pub report_days: u32,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_timezone() -> String {
    "local".to_string()
}
fn default_report_days() -> u32 {
    8
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            timezone: default_timezone(),
            report_days: default_report_days(),
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// `~/.shopload`, or `./.shopload` when no home directory is known.
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".shopload")
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("shopload.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("shopload.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    ///
    /// Values are not validated here; command line overrides are applied
    /// first (see `apply_overrides`).
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| AppError::Config(format!("failed to parse configuration: {e}")))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| AppError::Config(format!("failed to serialize configuration: {e}")))
    }

    /// Apply `--db` / `--tz`, then validate what will actually be used.
    pub fn apply_overrides(&mut self, db: Option<&str>, tz: Option<&str>) -> AppResult<()> {
        if let Some(db) = db {
            self.database = db.to_string();
        }
        self.database = expand_tilde(&self.database).to_string_lossy().to_string();
        if let Some(tz) = tz {
            self.timezone = tz.to_string();
        }
        self.validate()
    }

    pub fn validate(&self) -> AppResult<()> {
        self.tz()?;
        if self.report_days == 0 {
            return Err(AppError::Config("report_days must be at least 1".into()));
        }
        Ok(())
    }

    /// The fixed offset every report is computed in.
    pub fn tz(&self) -> AppResult<FixedOffset> {
        parse_timezone(&self.timezone)
    }

    /// Initialize configuration and database files.
    ///
    /// A relative `custom_db` is placed inside the config directory.
    /// In test mode the configuration file is left untouched.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) if Path::new(name).is_absolute() => PathBuf::from(name),
            Some(name) => dir.join(name),
            None => Self::database_file(),
        };

        if !is_test {
            fs::create_dir_all(&dir)?;

            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };

            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(config.to_yaml()?.as_bytes())?;
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(db_path)
    }
}
