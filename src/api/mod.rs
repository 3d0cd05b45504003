// ==========================================
// 批次发货缺口分析 - API层
// ==========================================
// 职责: 阶段编排（导入 → 引擎 → 交接物 → 导出）
// 红线: 业务计算全部在引擎层，API层只做串联
// ==========================================

pub mod allocation_api;
pub mod error;
pub mod mail_api;
pub mod pipeline_api;
pub mod reconcile_api;
pub mod report_api;

pub use allocation_api::{AllocationApi, AllocationArtifact, AllocationResponse};
pub use error::{ApiError, ApiResult};
pub use mail_api::{MailApi, MailOutcome};
pub use pipeline_api::{PipelineApi, PipelineResponse};
pub use reconcile_api::{ReconcileApi, ReconcileResponse, SummaryArtifact};
pub use report_api::{ReportApi, ReportArtifact};
