// ==========================================
// 批次发货缺口分析 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 交接物错误 =====
    #[error("未找到上游产物: {path}（{hint}）")]
    MissingArtifact { path: String, hint: String },

    #[error("产物格式错误 ({path}): {message}")]
    MalformedArtifact { path: String, message: String },

    // ===== 读写错误 =====
    #[error("文件读写失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 读写失败: {0}")]
    Csv(#[from] csv::Error),
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
