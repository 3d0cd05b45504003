// ==========================================
// 批次发货缺口分析 - 引擎层错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// 分配算术出现负数或分配合计与缺口不符
    #[error("分配不变量违反 (material={material}): {message}")]
    InvariantViolation { material: String, message: String },
}

pub type EngineResult<T> = Result<T, EngineError>;
