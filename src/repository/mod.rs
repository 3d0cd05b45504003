// ==========================================
// 批次发货缺口分析 - 交接物仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 读写阶段间交接文件（缺口汇总、分配表）
// 约束: 整文件覆盖写入，同输入重复运行结果逐字节一致
// ==========================================

pub mod allocation_table_repo;
pub mod error;
pub mod failure_summary_repo;

pub use allocation_table_repo::AllocationTableRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use failure_summary_repo::FailureSummaryRepository;
