// ==========================================
// 批次发货缺口分析 - 配置层
// ==========================================
// 职责: 数据目录布局、输入格式、交货类型、剔除规则
// 存储: JSON 配置文件（可选）
// ==========================================

pub mod config_manager;
pub mod pipeline_config;

// 重导出核心配置管理器
pub use config_manager::{ConfigError, ConfigManager};
pub use pipeline_config::{
    BinExclusion, DataPaths, DespatchSign, InputFormat, MailSettings, PipelineConfig,
};
