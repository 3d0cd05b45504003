// ==========================================
// 批次发货缺口分析 - 库存领域模型
// ==========================================
// 职责: 库存行（已映射库区）与 (物料, 库区) 汇总
// ==========================================

use crate::domain::types::StorageArea;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// StockRecord - 库存行
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub material: String,
    pub storage_type: String, // 原始库位类型代码（Typ）
    pub storage_bin: String,  // 库位（StorageBin）
    pub available_qty: i64,   // 可用库存（非 0）
}

impl StockRecord {
    /// 映射后的库区（未映射返回 None）
    pub fn storage_area(&self) -> Option<StorageArea> {
        StorageArea::from_storage_type(&self.storage_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSummaryRow {
    pub material: String,
    pub storage_area: StorageArea,
    pub available_qty: i64,
}

// ==========================================
// StockSummary - 按 (物料, 库区) 汇总的可用库存
// ==========================================
// 内部按物料、库区优先级有序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockSummary {
    entries: BTreeMap<String, BTreeMap<StorageArea, i64>>,
}

impl StockSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加一条库存
    pub fn add(&mut self, material: &str, area: StorageArea, qty: i64) {
        *self
            .entries
            .entry(material.to_string())
            .or_default()
            .entry(area)
            .or_insert(0) += qty;
    }

    /// 某物料的库区库存（按优先级升序）
    pub fn areas_for(&self, material: &str) -> Option<&BTreeMap<StorageArea, i64>> {
        self.entries.get(material)
    }

    pub fn material_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 展平为行
    pub fn rows(&self) -> Vec<StockSummaryRow> {
        self.entries
            .iter()
            .flat_map(|(material, areas)| {
                areas.iter().map(move |(area, qty)| StockSummaryRow {
                    material: material.clone(),
                    storage_area: *area,
                    available_qty: *qty,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_accumulates_per_area() {
        let mut summary = StockSummary::new();
        summary.add("M1", StorageArea::Mezz, 3);
        summary.add("M1", StorageArea::Mezz, 4);
        summary.add("M1", StorageArea::Area916, 1);

        let areas = summary.areas_for("M1").unwrap();
        assert_eq!(areas.get(&StorageArea::Mezz), Some(&7));
        // 迭代顺序即优先级
        let order: Vec<_> = areas.keys().copied().collect();
        assert_eq!(order, vec![StorageArea::Area916, StorageArea::Mezz]);
    }

    #[test]
    fn test_rows_are_sorted_by_material() {
        let mut summary = StockSummary::new();
        summary.add("B", StorageArea::Fm, 1);
        summary.add("A", StorageArea::Fp, 2);

        let rows = summary.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].material, "A");
        assert_eq!(rows[1].material, "B");
    }
}
