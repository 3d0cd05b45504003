// ==========================================
// 批次发货缺口分析 - 库存汇总引擎
// ==========================================
// 职责: 剔除无关库位类型与库位 → 映射库区 → 按 (物料, 库区) 汇总
// 红线: 未映射的库位类型整行丢弃,不得进入汇总
// ==========================================

use crate::config::BinExclusion;
use crate::domain::{StockRecord, StockSummary};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// 汇总统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StockSummaryStats {
    pub input_rows: usize,
    pub removed_type_rows: usize,
    pub excluded_bin_rows: usize,
    pub unmapped_rows: usize,
    pub summarised_rows: usize,
}

// ==========================================
// StockSummariser - 库存汇总引擎
// ==========================================
pub struct StockSummariser {
    removed_types: BTreeSet<String>, // 已大写
    bin_exclusion: BinExclusion,
}

impl StockSummariser {
    /// # 参数
    /// - removed_types: 剔除的库位类型（如 TIN/TCR/TIO/MPB）
    /// - bin_exclusion: 当前交货类型的库位剔除规则
    pub fn new(removed_types: &[String], bin_exclusion: BinExclusion) -> Self {
        Self {
            removed_types: removed_types
                .iter()
                .map(|t| t.trim().to_uppercase())
                .collect(),
            bin_exclusion,
        }
    }

    pub fn summarise(&self, records: &[StockRecord]) -> (StockSummary, StockSummaryStats) {
        let mut summary = StockSummary::new();
        let mut stats = StockSummaryStats {
            input_rows: records.len(),
            ..StockSummaryStats::default()
        };

        for record in records {
            if self
                .removed_types
                .contains(&record.storage_type.trim().to_uppercase())
            {
                stats.removed_type_rows += 1;
                continue;
            }

            if self.bin_exclusion.excludes(&record.storage_bin) {
                stats.excluded_bin_rows += 1;
                continue;
            }

            let Some(area) = record.storage_area() else {
                debug!(
                    material = %record.material,
                    storage_type = %record.storage_type,
                    "未映射的库位类型，丢弃"
                );
                stats.unmapped_rows += 1;
                continue;
            };

            summary.add(&record.material, area, record.available_qty);
            stats.summarised_rows += 1;
        }

        info!(
            input = stats.input_rows,
            removed_types = stats.removed_type_rows,
            excluded_bins = stats.excluded_bin_rows,
            unmapped = stats.unmapped_rows,
            materials = summary.material_count(),
            "库存汇总完成"
        );

        (summary, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::domain::StorageArea;

    fn stock(material: &str, storage_type: &str, bin: &str, qty: i64) -> StockRecord {
        StockRecord {
            material: material.to_string(),
            storage_type: storage_type.to_string(),
            storage_bin: bin.to_string(),
            available_qty: qty,
        }
    }

    fn zlfs_summariser() -> StockSummariser {
        let config = PipelineConfig::default();
        StockSummariser::new(
            &config.removed_storage_types,
            config.bin_exclusion_for("ZLFS"),
        )
    }

    #[test]
    fn test_groups_codes_into_areas() {
        let (summary, stats) = zlfs_summariser().summarise(&[
            stock("M1", "MS", "A-01", 2),
            stock("M1", "MSX", "A-02", 3),
            stock("M1", "201", "T-01", 4),
            stock("M1", "228", "T-02", 1),
        ]);

        let areas = summary.areas_for("M1").unwrap();
        assert_eq!(areas.get(&StorageArea::Mezz), Some(&5));
        assert_eq!(areas.get(&StorageArea::OpenTote), Some(&5));
        assert_eq!(stats.summarised_rows, 4);
    }

    #[test]
    fn test_unmapped_code_never_in_summary() {
        let (summary, stats) = zlfs_summariser().summarise(&[
            stock("M1", "ZZZ", "Z-01", 9),
            stock("M2", "FM", "F-01", 1),
        ]);

        assert!(summary.areas_for("M1").is_none());
        assert!(summary.rows().iter().all(|r| r.material != "M1"));
        assert_eq!(stats.unmapped_rows, 1);
    }

    #[test]
    fn test_removed_types_and_bins() {
        let (summary, stats) = zlfs_summariser().summarise(&[
            stock("M1", "TIN", "A-01", 5),
            stock("M1", "mpb", "A-02", 5),
            stock("M1", "600", "INBOUND", 5),
            stock("M1", "FM", "50", 5),
            stock("M1", "FP", "51", 5),
        ]);

        assert_eq!(stats.removed_type_rows, 2);
        assert_eq!(stats.excluded_bin_rows, 2);
        let areas = summary.areas_for("M1").unwrap();
        assert_eq!(areas.len(), 1);
        assert_eq!(areas.get(&StorageArea::Fp), Some(&5));
    }

    #[test]
    fn test_zlfa_cell_bins_excluded() {
        let config = PipelineConfig::default();
        let summariser = StockSummariser::new(
            &config.removed_storage_types,
            config.bin_exclusion_for("ZLFA"),
        );

        let (summary, stats) = summariser.summarise(&[
            stock("M1", "201", "CELL 201", 5),
            stock("M1", "1", "12", 5),
            stock("M1", "1", "C-12", 3),
        ]);

        assert_eq!(stats.excluded_bin_rows, 2);
        assert_eq!(
            summary.areas_for("M1").unwrap().get(&StorageArea::ChuteEnd),
            Some(&3)
        );
    }
}
