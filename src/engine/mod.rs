// ==========================================
// 批次发货缺口分析 - 引擎层
// ==========================================
// 职责: 纯表计算（对账 / 库存汇总 / 库区分配 / 报表汇总）
// 红线: 引擎不读写文件
// ==========================================

pub mod allocator;
pub mod error;
pub mod reconciler;
pub mod reporter;
pub mod stock_summary;

// 重导出核心引擎
pub use allocator::StockAllocator;
pub use error::{EngineError, EngineResult};
pub use reconciler::{ReconcileOutcome, ReconcileStats, Reconciler};
pub use reporter::{ChartSeries, ChartSlice, Reporter};
pub use stock_summary::{StockSummariser, StockSummaryStats};
