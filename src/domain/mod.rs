// ==========================================
// 批次发货缺口分析 - 领域模型层
// ==========================================
// 职责: 定义需求/发货/库存/分配记录与领域类型
// 红线: 不含文件访问逻辑,不含引擎逻辑
// ==========================================

pub mod allocation;
pub mod delivery;
pub mod stock;
pub mod types;

// 重导出核心类型
pub use allocation::{AllocationRecord, AllocationTable};
pub use delivery::{
    DemandRecord, DespatchRecord, FailureRecord, FailureSummary, FailureSummaryRow,
};
pub use stock::{StockRecord, StockSummary, StockSummaryRow};
pub use types::{MatchState, StorageArea};
