use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_ms: u64,
    #[serde(default = "default_history_limit")]
    pub history_default_limit: i64,
    #[serde(default = "default_page_limit")]
    pub screenshot_page_default_limit: i64,
    #[serde(default = "default_list_limit")]
    pub screenshot_list_default_limit: i64,
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "default_from_email")]
    pub from_email: String,
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
}

fn default_busy_timeout() -> u64 {
    5000
}
fn default_history_limit() -> i64 {
    100
}
fn default_page_limit() -> i64 {
    10_000
}
fn default_list_limit() -> i64 {
    50
}
fn default_app_name() -> String {
    "Shiftlog Time Tracking".to_string()
}
fn default_from_email() -> String {
    "noreply@shiftlog.local".to_string()
}
fn default_frontend_url() -> String {
    "http://localhost:3000".to_string()
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
            busy_timeout_ms: default_busy_timeout(),
            history_default_limit: default_history_limit(),
            screenshot_page_default_limit: default_page_limit(),
            screenshot_list_default_limit: default_list_limit(),
            app_name: default_app_name(),
            from_email: default_from_email(),
            frontend_url: default_frontend_url(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("shiftlog")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".shiftlog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("shiftlog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("shiftlog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
            Ok(serde_yaml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => {
                let p = crate::utils::path::expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let config = Self::with_database(db_path.clone());

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            success(format!("Config file: {:?}", Self::config_file()));
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        success(format!("Database:    {:?}", db_path));

        Ok(config)
    }
}
