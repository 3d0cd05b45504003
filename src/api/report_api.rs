// ==========================================
// 批次发货缺口分析 - 报表阶段API
// ==========================================
// 流程: 读分配表 → 按库区汇总 → 交给图表渲染器
// ==========================================

use crate::api::allocation_api::resolve_types;
use crate::api::error::ApiResult;
use crate::config::PipelineConfig;
use crate::engine::{ChartSeries, Reporter};
use crate::export::{ChartRenderer, JsonChartRenderer};
use crate::repository::AllocationTableRepository;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, instrument};

#[derive(Debug, Clone, Serialize)]
pub struct ReportArtifact {
    pub series: ChartSeries,
    pub path: PathBuf,
}

pub struct ReportApi {
    config: PipelineConfig,
    renderer: Box<dyn ChartRenderer>,
}

impl ReportApi {
    /// 默认渲染器: JSON 序列写入输出目录
    pub fn new(config: PipelineConfig) -> Self {
        let renderer = Box::new(JsonChartRenderer::new(config.paths.output_dir()));
        Self::with_renderer(config, renderer)
    }

    pub fn with_renderer(config: PipelineConfig, renderer: Box<dyn ChartRenderer>) -> Self {
        Self { config, renderer }
    }

    #[instrument(skip_all, fields(requested = delivery_types.len()))]
    pub fn run(&self, delivery_types: &[String]) -> ApiResult<Vec<ReportArtifact>> {
        let repo = AllocationTableRepository::new(self.config.paths.output_dir());
        let reporter = Reporter::new();

        let mut artifacts = Vec::new();
        for delivery_type in resolve_types(&self.config, delivery_types) {
            let table = repo.load(&delivery_type)?;
            let series = reporter.summarise(&delivery_type, &table.records);
            let path = self.renderer.render(&series)?;
            artifacts.push(ReportArtifact { series, path });
        }

        info!(charts = artifacts.len(), "报表阶段完成");
        Ok(artifacts)
    }
}
