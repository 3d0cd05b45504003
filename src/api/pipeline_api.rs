// ==========================================
// 批次发货缺口分析 - 全流程API
// ==========================================
// 顺序: reconcile → allocate → report → mail
// 任一阶段失败即中止，后续阶段不执行
// ==========================================

use crate::api::allocation_api::{AllocationApi, AllocationResponse};
use crate::api::error::ApiResult;
use crate::api::mail_api::{MailApi, MailOutcome};
use crate::api::reconcile_api::{ReconcileApi, ReconcileResponse};
use crate::api::report_api::{ReportApi, ReportArtifact};
use crate::config::PipelineConfig;
use serde::Serialize;
use tracing::{info, instrument};

#[derive(Debug, Clone, Serialize)]
pub struct PipelineResponse {
    pub reconcile: ReconcileResponse,
    pub allocation: AllocationResponse,
    pub reports: Vec<ReportArtifact>,
    pub mail: MailOutcome,
}

pub struct PipelineApi {
    config: PipelineConfig,
}

impl PipelineApi {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    #[instrument(skip_all, fields(report_date = %report_date))]
    pub fn run_all(&self, report_date: &str) -> ApiResult<PipelineResponse> {
        let reconcile = ReconcileApi::new(self.config.clone()).run()?;
        let allocation = AllocationApi::new(self.config.clone()).run(&[])?;
        let reports = ReportApi::new(self.config.clone()).run(&[])?;
        let mail = MailApi::new(self.config.clone()).run(report_date)?;

        info!(
            delivery_types = self.config.delivery_types.len(),
            "全流程完成"
        );

        Ok(PipelineResponse {
            reconcile,
            allocation,
            reports,
            mail,
        })
    }
}
