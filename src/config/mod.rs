use crate::backend::local::AuthSettings;
use crate::core::table::DEFAULT_ROWS_PER_PAGE;
use crate::errors::{AppError, AppResult};
use crate::routes::BASENAME;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_basename")]
    pub basename: String,
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: usize,
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
    #[serde(default = "default_max_failed_sign_ins")]
    pub max_failed_sign_ins: u32,
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
}

fn default_basename() -> String {
    BASENAME.to_string()
}
fn default_rows_per_page() -> usize {
    DEFAULT_ROWS_PER_PAGE
}
fn default_min_password_length() -> usize {
    AuthSettings::default().min_password_length
}
fn default_max_failed_sign_ins() -> u32 {
    AuthSettings::default().max_failed_sign_ins
}
fn default_export_dir() -> String {
    ".".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            basename: default_basename(),
            rows_per_page: default_rows_per_page(),
            min_password_length: default_min_password_length(),
            max_failed_sign_ins: default_max_failed_sign_ins(),
            export_dir: default_export_dir(),
        }
    }

    /// `~/.podguard` (`%APPDATA%\podguard` on Windows).
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("podguard")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".podguard")
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("podguard.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("podguard.sqlite")
    }

    /// Load the configuration file, or the defaults when there is none.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))?;
        let mut file = fs::File::create(path).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())
            .map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Create the config directory, the config file (unless `is_test`) and
    /// an empty database file. Returns the database path.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // relative names land in the config directory
        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        if !is_test {
            let config = Self::with_database(db_path.clone());
            config.save_to(&Self::config_file())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(db_path)
    }

    pub fn auth_settings(&self) -> AuthSettings {
        AuthSettings {
            min_password_length: self.min_password_length,
            max_failed_sign_ins: self.max_failed_sign_ins,
        }
    }
}
