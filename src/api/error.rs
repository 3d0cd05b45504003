// ==========================================
// 批次发货缺口分析 - API层错误类型
// ==========================================
// 职责: 汇总各层错误，作为阶段编排的统一出口
// ==========================================

use crate::config::ConfigError;
use crate::engine::EngineError;
use crate::export::ExportError;
use crate::importer::ImportError;
use crate::repository::RepositoryError;
use thiserror::Error;

/// API层错误类型
/// 错误信息须包含显式原因（文件路径 / 物料 / 下一步提示）
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 各层错误透传
    // ==========================================
    #[error("输入导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("计算失败: {0}")]
    Engine(#[from] EngineError),

    #[error("交接物读写失败: {0}")]
    Repository(#[from] RepositoryError),

    #[error("导出失败: {0}")]
    Export(#[from] ExportError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    // ==========================================
    // 参数错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),
}

impl ApiError {
    /// 是否为上游产物缺失（需先运行前置阶段）
    pub fn is_missing_artifact(&self) -> bool {
        matches!(
            self,
            ApiError::Repository(RepositoryError::MissingArtifact { .. })
                | ApiError::Export(ExportError::MissingAttachment { .. })
        )
    }
}

/// API层Result类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_artifact_detection() {
        let err: ApiError = RepositoryError::MissingArtifact {
            path: "Output/failures_zlfs_by_material.csv".to_string(),
            hint: "请先运行 reconcile 阶段生成缺口汇总".to_string(),
        }
        .into();

        assert!(err.is_missing_artifact());
        assert!(err.to_string().contains("reconcile"));
        assert!(!ApiError::InvalidInput("x".to_string()).is_missing_artifact());
    }
}
