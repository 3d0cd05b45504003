// ==========================================
// 批次发货缺口分析 - 配置管理器
// ==========================================
// 职责: 配置加载、校验、快照
// 存储: JSON 配置文件（可选），缺省取默认值
// ==========================================

use crate::config::pipeline_config::PipelineConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    FileReadError { path: String, message: String },

    #[error("配置文件解析失败 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值非法 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: PipelineConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 加载配置
    ///
    /// # 参数
    /// - path: 配置文件路径（None 时使用默认配置）
    ///
    /// # 返回
    /// - Ok(ConfigManager): 已校验的配置
    /// - Err(ConfigError): 读取/解析/校验失败
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            tracing::debug!("未指定配置文件，使用默认配置");
            return Self::from_config(PipelineConfig::default());
        };

        let raw = fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: PipelineConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        tracing::info!(config_path = %path.display(), "配置文件加载完成");

        let mut manager = Self::from_config(config)?;
        manager.source = Some(path.to_path_buf());
        Ok(manager)
    }

    /// 从已有配置创建（会执行校验）
    pub fn from_config(config: PipelineConfig) -> Result<Self, ConfigError> {
        validate(&config)?;
        Ok(Self {
            config,
            source: None,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn into_config(self) -> PipelineConfig {
        self.config
    }

    /// 配置来源文件（默认配置时为 None）
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 获取配置快照（JSON格式）
    ///
    /// # 用途
    /// - 命令行加载配置后写入日志，便于复现某次报表
    pub fn get_config_snapshot(&self) -> Result<String, ConfigError> {
        serde_json::to_string(&self.config).map_err(|e| ConfigError::InvalidValue {
            key: "*".to_string(),
            message: e.to_string(),
        })
    }
}

fn validate(config: &PipelineConfig) -> Result<(), ConfigError> {
    if config.delivery_types.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "delivery_types".to_string(),
            message: "至少需要一个交货类型".to_string(),
        });
    }

    if let Some(bad) = config
        .delivery_types
        .iter()
        .find(|t| t.trim().is_empty() || t.trim() != t.as_str())
    {
        return Err(ConfigError::InvalidValue {
            key: "delivery_types".to_string(),
            message: format!("交货类型不能为空或含首尾空白: {:?}", bad),
        });
    }

    let delimiter = config.input.delimiter;
    if !delimiter.is_ascii() || delimiter == '"' || delimiter == '\n' || delimiter == '\r' {
        return Err(ConfigError::InvalidValue {
            key: "input.delimiter".to_string(),
            message: format!("不支持的分隔符: {:?}", delimiter),
        });
    }

    Ok(())
}
