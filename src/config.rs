use serde::{Deserialize, Serialize};
use sqlx::postgres::PgConnectOptions;
use std::fs;
use std::str::FromStr;

use crate::error::BenchError;

/// Environment variable holding a full connection URL; wins over the YAML fields.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Environment variable holding the database password.
pub const PASSWORD_ENV: &str = "BENCH_DB_PASSWORD";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub insert: InsertConfig,
    #[serde(default)]
    pub suite: SuiteConfig,
    /// Fixed PRNG seed. `None` draws one from the OS at startup.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "employee_bench.log".to_string(),
            use_json: false,
            rotation: "never".to_string(),
            database: DatabaseConfig::default(),
            insert: InsertConfig::default(),
            suite: SuiteConfig::default(),
            seed: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    #[serde(default)]
    pub password: String,
    /// Full `postgres://` URL. When set, the discrete fields are ignored.
    #[serde(default)]
    pub url: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            name: "ExCompany".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
            url: None,
        }
    }
}

impl DatabaseConfig {
    /// Build sqlx connect options from either the URL or the discrete fields.
    pub fn connect_options(&self) -> Result<PgConnectOptions, BenchError> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url)
                .map_err(|e| BenchError::Config(format!("invalid database url: {}", e)));
        }

        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user);
        if !self.password.is_empty() {
            options = options.password(&self.password);
        }
        Ok(options)
    }

    /// `user@host:port/name`, never the password.
    pub fn display_target(&self) -> String {
        match &self.url {
            Some(_) => "<DATABASE_URL>".to_string(),
            None => format!("{}@{}:{}/{}", self.user, self.host, self.port, self.name),
        }
    }
}

/// Parameters of the single-record insert benchmark.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct InsertConfig {
    pub repetitions: usize,
    pub inserts_per_repetition: usize,
    pub batch_size: usize,
}

impl Default for InsertConfig {
    fn default() -> Self {
        Self {
            repetitions: 1000,
            inserts_per_repetition: 3000,
            batch_size: 10000,
        }
    }
}

/// Parameters of the column-set CRUD suite.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    pub repetitions: usize,
    pub sample_size: usize,
    pub pool_size: usize,
    pub output_csv: String,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            repetitions: 500,
            sample_size: 500,
            pool_size: 5000,
            output_csv: "output/suite_timings.csv".to_string(),
        }
    }
}

impl AppConfig {
    /// Load `config/<env>.yaml`, then apply environment overrides.
    pub fn load(env: &str) -> Result<Self, BenchError> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path).map_err(|e| {
            BenchError::Config(format!("failed to read config file {}: {}", config_path, e))
        })?;
        let mut config = Self::from_yaml(&content)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, BenchError> {
        serde_yaml::from_str(content)
            .map_err(|e| BenchError::Config(format!("failed to parse config yaml: {}", e)))
    }

    /// `lookup` is injected so tests don't have to touch the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(DATABASE_URL_ENV).filter(|v| !v.is_empty()) {
            self.database.url = Some(url);
        }
        if let Some(password) = lookup(PASSWORD_ENV) {
            self.database.password = password;
        }
    }
}
