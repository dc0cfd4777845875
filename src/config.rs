//! Application configuration module / 应用配置模块
//!
//! Manages application configuration loaded from config.json
//! Creates default config file on first run / 首次运行时创建默认配置文件
//! Environment variables PORT and CORPUS_PATH override the file / 环境变量优先

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::search::SearchSettings;

/// Application configuration / 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration / 服务器配置
    pub server: ServerConfig,
    /// Corpus configuration / 语料配置
    pub corpus: CorpusConfig,
    /// Search configuration / 搜索配置
    pub search: SearchConfig,
}

/// Server configuration / 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address / 服务器监听地址
    pub host: String,
    /// Server port / 服务器端口
    pub port: u16,
}

/// Corpus configuration / 语料配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Text file indexed at startup / 启动时索引的文本文件
    pub path: String,
    /// Directory served at `/` / 静态文件目录
    pub static_dir: String,
}

/// Search configuration / 搜索配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Context bytes on each side of a hit / 命中两侧上下文字节数
    pub context_bytes: usize,
    /// Minimum query length in bytes / 最小查询长度
    pub min_query_len: usize,
    /// Worker threads for index construction, 0 = all cores / 构建索引的线程数
    pub build_threads: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: "completeworks.txt".to_string(),
            static_dir: "static".to_string(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        let settings = SearchSettings::default();
        Self {
            context_bytes: settings.context_bytes,
            min_query_len: settings.min_query_len,
            build_threads: 2,
        }
    }
}

impl AppConfig {
    /// Get the server bind address / 获取服务器绑定地址
    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn get_corpus_path(&self) -> PathBuf {
        PathBuf::from(&self.corpus.path)
    }

    pub fn get_static_dir(&self) -> PathBuf {
        PathBuf::from(&self.corpus.static_dir)
    }

    /// Settings handed to the searcher / 搜索器设置
    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            context_bytes: self.search.context_bytes,
            min_query_len: self.search.min_query_len,
        }
    }

    /// Apply PORT / CORPUS_PATH from the process environment / 应用环境变量覆盖
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(port) = get("PORT").filter(|p| !p.is_empty()) {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PORT value: {}", port),
            }
        }
        if let Some(path) = get("CORPUS_PATH").filter(|p| !p.is_empty()) {
            self.corpus.path = path;
        }
    }
}

/// Get the config file path / 获取配置文件路径
fn get_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.json")
}

/// Load configuration from ./config.json, or create default if not exists / 加载配置文件，不存在则创建默认配置
pub fn load_config() -> Result<AppConfig, String> {
    load_config_from(&get_config_path())
}

/// Load configuration from an explicit path / 从指定路径加载配置
pub fn load_config_from(config_path: &Path) -> Result<AppConfig, String> {
    if config_path.exists() {
        let content = std::fs::read_to_string(config_path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config file: {}", e))?;

        tracing::info!("Loaded configuration from {:?}", config_path);
        Ok(config)
    } else {
        let config = AppConfig::default();
        save_config_to(&config, config_path)?;
        tracing::info!("Created default configuration at {:?}", config_path);
        Ok(config)
    }
}

/// Save configuration to file / 保存配置到文件
pub fn save_config_to(config: &AppConfig, config_path: &Path) -> Result<(), String> {
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;

    std::fs::write(config_path, content)
        .map_err(|e| format!("Failed to write config file: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.get_bind_address(), "0.0.0.0:3001");
        assert_eq!(config.get_corpus_path(), PathBuf::from("completeworks.txt"));
        assert_eq!(config.search_settings(), SearchSettings::default());
        assert_eq!(config.search.build_threads, 2);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = load_config_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.server.port, 3001);

        // second load reads the file just written
        let reloaded = load_config_from(&path).unwrap();
        assert_eq!(reloaded.corpus.path, config.corpus.path);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"search": {"context_bytes": 80}}"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.search.context_bytes, 80);
        assert_eq!(config.search.min_query_len, 2);
        assert_eq!(config.server.port, 3001);
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> =
            HashMap::from([("PORT", "8080"), ("CORPUS_PATH", "/data/works.txt")]);
        let mut config = AppConfig::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.corpus.path, "/data/works.txt");
    }

    #[test]
    fn test_invalid_port_override_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(|k| (k == "PORT").then(|| "not-a-port".to_string()));
        assert_eq!(config.server.port, 3001);

        config.apply_overrides(|_| Some(String::new()));
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.corpus.path, "completeworks.txt");
    }
}
