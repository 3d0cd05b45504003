// ==========================================
// 批次发货缺口分析 - 分配阶段API
// ==========================================
// 流程: 读缺口汇总 → 读库存表 → 按类型库存汇总 → 库区分配 → 写分配表
// 前置: reconcile 阶段产物（缺失即中止）
// ==========================================

use crate::api::error::ApiResult;
use crate::config::PipelineConfig;
use crate::domain::{FailureSummary, StorageArea};
use crate::engine::{StockAllocator, StockSummariser, StockSummaryStats};
use crate::importer::InputLoader;
use crate::repository::{AllocationTableRepository, FailureSummaryRepository};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, instrument};

/// 单交货类型分配结果
#[derive(Debug, Clone, Serialize)]
pub struct AllocationArtifact {
    pub delivery_type: String,
    pub rows: usize,
    pub allocated_total: i64,
    pub no_stock_total: i64,
    pub stock_stats: StockSummaryStats,
    pub path: PathBuf,
}

/// 分配阶段响应
#[derive(Debug, Clone, Serialize)]
pub struct AllocationResponse {
    pub stock_file: PathBuf,
    pub artifacts: Vec<AllocationArtifact>,
}

pub struct AllocationApi {
    config: PipelineConfig,
}

impl AllocationApi {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// 执行分配
    ///
    /// # 参数
    /// - delivery_types: 为空时取配置的全部交货类型
    #[instrument(skip_all, fields(requested = delivery_types.len()))]
    pub fn run(&self, delivery_types: &[String]) -> ApiResult<AllocationResponse> {
        let paths = &self.config.paths;
        let types = resolve_types(&self.config, delivery_types);

        // 先确认所有上游汇总存在，再读库存
        let summary_repo = FailureSummaryRepository::new(paths.output_dir());
        let summaries: Vec<FailureSummary> = types
            .iter()
            .map(|t| summary_repo.load(t))
            .collect::<Result<_, _>>()?;

        let loader = InputLoader::new(self.config.input.clone(), self.config.despatch_sign);
        let stock = loader.load_stock(&paths.stock_dir())?;

        let allocator = StockAllocator::new();
        let table_repo = AllocationTableRepository::new(paths.output_dir());
        let mut artifacts = Vec::with_capacity(summaries.len());

        for summary in &summaries {
            let summariser = StockSummariser::new(
                &self.config.removed_storage_types,
                self.config.bin_exclusion_for(&summary.delivery_type),
            );
            let (stock_summary, stock_stats) = summariser.summarise(&stock.records);

            let table = allocator.allocate(summary, &stock_summary)?;
            let path = table_repo.save(&table)?;

            artifacts.push(AllocationArtifact {
                delivery_type: summary.delivery_type.clone(),
                rows: table.records.len(),
                allocated_total: table.records.iter().map(|r| r.allocated).sum(),
                no_stock_total: table.allocated_in(StorageArea::NoStock),
                stock_stats,
                path,
            });
        }

        info!(artifacts = artifacts.len(), "分配阶段完成");

        Ok(AllocationResponse {
            stock_file: stock.source,
            artifacts,
        })
    }
}

/// 请求的交货类型（为空时取配置）
pub(crate) fn resolve_types(config: &PipelineConfig, requested: &[String]) -> Vec<String> {
    if requested.is_empty() {
        config.delivery_types.clone()
    } else {
        requested.iter().map(|t| t.trim().to_uppercase()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_types_defaults_to_config() {
        let config = PipelineConfig::default();
        assert_eq!(resolve_types(&config, &[]), vec!["ZLFA", "ZLFS"]);
        assert_eq!(resolve_types(&config, &[" zlfs".to_string()]), vec!["ZLFS"]);
    }
}
