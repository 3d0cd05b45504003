// ==========================================
// 批次发货缺口分析 - 导出层错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("附件不存在: {path}（请先运行 allocate/report 阶段）")]
    MissingAttachment { path: String },

    #[error("文件写入失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 序列化失败: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;
