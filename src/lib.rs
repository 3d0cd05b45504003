// ==========================================
// 批次发货缺口分析 - 核心库
// ==========================================
// 流程: 需求/发货对账 → 库区优先级分配 → 库区汇总报表 → 邮件
// 运行方式: 单线程、同步、一次性批处理
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 交接物仓储层 - 阶段间文件
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 目录布局与规则
pub mod config;

// 导出层 - 图表与邮件
pub mod export;

// 日志系统
pub mod logging;

// API 层 - 阶段编排
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    AllocationRecord, AllocationTable, FailureSummary, MatchState, StockSummary, StorageArea,
};

// 引擎
pub use engine::{Reconciler, Reporter, StockAllocator, StockSummariser};

// API
pub use api::{AllocationApi, ApiError, MailApi, PipelineApi, ReconcileApi, ReportApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "批次发货缺口分析";
