// ==========================================
// 批次发货缺口分析 - 报表汇总引擎
// ==========================================
// 职责: 按库区汇总分配量,生成图表数据序列
// 输出: (标签, 数值) 有序序列，交给外部图表渲染器
// ==========================================

use crate::domain::{AllocationRecord, StorageArea};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 图例标题
pub const LEGEND_TITLE: &str = "Failures by Area & Qty";

/// 单个扇区
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSlice {
    pub area: StorageArea,
    pub value: i64,
    /// 图例标签: "<库区> : <数量>"
    pub label: String,
    /// 占比（百分数，保留一位小数）
    pub percent: f64,
}

/// 图表数据序列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub delivery_type: String,
    pub title: String,
    pub legend_title: String,
    pub slices: Vec<ChartSlice>,
}

impl ChartSeries {
    /// (标签, 数值) 对
    pub fn labelled_values(&self) -> Vec<(String, i64)> {
        self.slices
            .iter()
            .map(|s| (s.label.clone(), s.value))
            .collect()
    }

    pub fn total(&self) -> i64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

// ==========================================
// Reporter - 报表汇总引擎
// ==========================================
pub struct Reporter {
    // 无状态引擎
}

impl Reporter {
    pub fn new() -> Self {
        Self {}
    }

    /// 按库区汇总分配量（剔除非正值，按库区优先级排序）
    pub fn summarise(&self, delivery_type: &str, records: &[AllocationRecord]) -> ChartSeries {
        let mut by_area: BTreeMap<StorageArea, i64> = BTreeMap::new();
        for record in records {
            *by_area.entry(record.storage_area).or_insert(0) += record.allocated;
        }

        let positive: Vec<(StorageArea, i64)> =
            by_area.into_iter().filter(|(_, qty)| *qty > 0).collect();
        let total: i64 = positive.iter().map(|(_, qty)| qty).sum();

        let slices = positive
            .into_iter()
            .map(|(area, value)| ChartSlice {
                area,
                value,
                label: format!("{} : {}", area.label(), value),
                percent: percent_of(value, total),
            })
            .collect();

        ChartSeries {
            delivery_type: delivery_type.to_string(),
            title: format!("Failures for {} by Area", delivery_type),
            legend_title: LEGEND_TITLE.to_string(),
            slices,
        }
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

fn percent_of(value: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    (value as f64 * 1000.0 / total as f64).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MatchState;

    fn record(material: &str, area: StorageArea, allocated: i64) -> AllocationRecord {
        AllocationRecord {
            material: material.to_string(),
            remaining_need: allocated,
            storage_area: area,
            available_qty: Some(allocated),
            match_state: MatchState::Both,
            allocated,
        }
    }

    #[test]
    fn test_groups_and_sorts_by_priority() {
        let series = Reporter::new().summarise(
            "ZLFS",
            &[
                AllocationRecord::no_stock("M1", 2),
                record("M1", StorageArea::Mezz, 5),
                record("M2", StorageArea::Area916, 1),
                record("M3", StorageArea::Mezz, 3),
            ],
        );

        assert_eq!(
            series.labelled_values(),
            vec![
                ("916 : 1".to_string(), 1),
                ("Mezz : 8".to_string(), 8),
                ("NoStock : 2".to_string(), 2),
            ]
        );
        assert_eq!(series.total(), 11);
        assert_eq!(series.title, "Failures for ZLFS by Area");
    }

    #[test]
    fn test_non_positive_areas_dropped() {
        let series = Reporter::new().summarise(
            "ZLFA",
            &[record("M1", StorageArea::Fm, 0), record("M2", StorageArea::Fp, 4)],
        );

        assert_eq!(series.slices.len(), 1);
        assert_eq!(series.slices[0].area, StorageArea::Fp);
        assert_eq!(series.slices[0].percent, 100.0);
    }

    #[test]
    fn test_empty_input() {
        let series = Reporter::new().summarise("ZLFA", &[]);
        assert!(series.is_empty());
        assert_eq!(series.total(), 0);
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(percent_of(1, 3), 33.3);
        assert_eq!(percent_of(2, 3), 66.7);
        assert_eq!(percent_of(1, 0), 0.0);
    }
}
