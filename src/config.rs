/// Конфигурация сервера и клиента
///
/// Значения по умолчанию можно переопределить JSON-файлом и переменными окружения:
/// `PORT`, `DEBUG`, `INVENTORY_FILE`, `TOTAL_WORKERS`, `PREDICTOR_URL`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Подробное логирование (уровень debug)
    #[serde(default)]
    pub debug: bool,

    #[serde(default = "default_inventory_file")]
    pub inventory_file: PathBuf,

    #[serde(default = "default_total_workers")]
    pub total_workers: u32,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_inventory_file() -> PathBuf {
    PathBuf::from("inventory.json")
}

fn default_total_workers() -> u32 {
    8
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug: false,
            inventory_file: default_inventory_file(),
            total_workers: default_total_workers(),
        }
    }
}

impl ServerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Применяет переменные окружения поверх текущих значений
    pub fn with_env(self) -> Result<Self> {
        self.with_vars(|key| std::env::var(key).ok())
    }

    fn with_vars<F>(mut self, var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = var("PORT") {
            self.port = port
                .parse()
                .map_err(|_| Error::Config(format!("invalid PORT: {}", port)))?;
        }
        if let Some(debug) = var("DEBUG") {
            self.debug = debug.eq_ignore_ascii_case("true");
        }
        if let Some(path) = var("INVENTORY_FILE") {
            self.inventory_file = PathBuf::from(path);
        }
        if let Some(workers) = var("TOTAL_WORKERS") {
            self.total_workers = workers
                .parse()
                .map_err(|_| Error::Config(format!("invalid TOTAL_WORKERS: {}", workers)))?;
        }
        if self.total_workers == 0 {
            return Err(Error::Config("total_workers must be positive".to_string()));
        }
        Ok(self)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Фильтр логов по умолчанию, если `RUST_LOG` не задан
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "service_predictor=debug,tower_http=debug"
        } else {
            "service_predictor=info,tower_http=info"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        match std::env::var("PREDICTOR_URL") {
            Ok(url) if !url.trim().is_empty() => Self { base_url: url },
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
        assert_eq!(config.total_workers, 8);
        assert!(!config.debug);
    }

    #[test]
    fn env_overrides() {
        let config = ServerConfig::default()
            .with_vars(vars(&[("PORT", "8080"), ("DEBUG", "True"), ("TOTAL_WORKERS", "4")]))
            .unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.debug);
        assert_eq!(config.total_workers, 4);
        assert_eq!(config.log_filter(), "service_predictor=debug,tower_http=debug");
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = ServerConfig::default()
            .with_vars(vars(&[("PORT", "eighty")]))
            .unwrap_err();
        assert!(err.to_string().contains("invalid PORT"));
    }

    #[test]
    fn zero_workers_is_rejected() {
        assert!(ServerConfig::default()
            .with_vars(vars(&[("TOTAL_WORKERS", "0")]))
            .is_err());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server.json");
        std::fs::write(&path, r#"{ "port": 9000 }"#).unwrap();

        let config = ServerConfig::load(&path).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.inventory_file, PathBuf::from("inventory.json"));
    }
}
