// ==========================================
// 批次发货缺口分析 - 对账阶段API
// ==========================================
// 流程: 排除门店 → 需求表 → 发货表 → 对账 → 按交货类型写缺口汇总
// 产物: Output/failures_<type>_by_material.csv（每个配置类型一份）
// ==========================================

use crate::api::error::ApiResult;
use crate::config::PipelineConfig;
use crate::engine::{ReconcileStats, Reconciler};
use crate::importer::{load_exclusions, InputLoader};
use crate::repository::FailureSummaryRepository;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, instrument};

/// 单交货类型写出结果
#[derive(Debug, Clone, Serialize)]
pub struct SummaryArtifact {
    pub delivery_type: String,
    pub materials: usize,
    pub total_diff: i64,
    pub path: PathBuf,
}

/// 对账阶段响应
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileResponse {
    pub demand_file: PathBuf,
    pub despatch_file: PathBuf,
    pub excluded_ship_to: usize,
    pub excluded_rows: usize,
    pub dropped_rows: usize,
    pub stats: ReconcileStats,
    pub artifacts: Vec<SummaryArtifact>,
}

pub struct ReconcileApi {
    config: PipelineConfig,
}

impl ReconcileApi {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    #[instrument(skip_all)]
    pub fn run(&self) -> ApiResult<ReconcileResponse> {
        let paths = &self.config.paths;
        let loader = InputLoader::new(self.config.input.clone(), self.config.despatch_sign);

        let exclusions = load_exclusions(&paths.exclusions_file())?;
        let demand = loader.load_demand(&paths.demand_dir(), &exclusions)?;
        let despatch = loader.load_despatch(&paths.despatch_dir())?;

        let outcome = Reconciler::new().reconcile(&demand.records, &despatch.records);

        let repo = FailureSummaryRepository::new(paths.output_dir());
        let mut artifacts = Vec::with_capacity(self.config.delivery_types.len());
        for delivery_type in &self.config.delivery_types {
            let summary = outcome.summary_for(delivery_type);
            let path = repo.save(&summary)?;
            artifacts.push(SummaryArtifact {
                delivery_type: delivery_type.clone(),
                materials: summary.len(),
                total_diff: summary.total_diff(),
                path,
            });
        }

        // 未配置的交货类型不落盘
        for delivery_type in outcome.summaries.keys() {
            if !self.config.delivery_types.contains(delivery_type) {
                info!(delivery_type = %delivery_type, "交货类型未配置，跳过写出");
            }
        }

        info!(
            failures = outcome.stats.failure_rows,
            artifacts = artifacts.len(),
            "对账阶段完成"
        );

        Ok(ReconcileResponse {
            demand_file: demand.source,
            despatch_file: despatch.source,
            excluded_ship_to: exclusions.len(),
            excluded_rows: demand.excluded_rows,
            dropped_rows: demand.dropped_rows + despatch.dropped_rows,
            stats: outcome.stats,
            artifacts,
        })
    }
}
