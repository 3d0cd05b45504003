// ==========================================
// 批次发货缺口分析 - 库区分配引擎
// ==========================================
// 职责: 按固定库区优先级逐区扣减缺口,剩余缺口记入 NoStock
// 输入: 单交货类型缺口汇总 + 库存汇总
// 输出: 分配表（按合并状态、物料、库区优先级排序）
// 红线: 分配量与剩余缺口均不得为负；单物料分配合计 == 缺口
// ==========================================

use crate::domain::{
    AllocationRecord, AllocationTable, FailureSummary, MatchState, StorageArea, StockSummary,
};
use crate::engine::error::{EngineError, EngineResult};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

// ==========================================
// StockAllocator - 库区分配引擎
// ==========================================
pub struct StockAllocator {
    // 无状态引擎
}

impl StockAllocator {
    pub fn new() -> Self {
        Self {}
    }

    /// 对整份缺口汇总执行分配
    #[instrument(skip_all, fields(delivery_type = %summary.delivery_type, materials = summary.len()))]
    pub fn allocate(
        &self,
        summary: &FailureSummary,
        stock: &StockSummary,
    ) -> EngineResult<AllocationTable> {
        // 同一物料多行时先合并缺口，每个物料只扣减一次库存
        let mut shortfalls: BTreeMap<&str, i64> = BTreeMap::new();
        for row in &summary.rows {
            *shortfalls.entry(row.material.as_str()).or_insert(0) += row.diff;
        }

        let mut groups: Vec<(MatchState, &str, Vec<AllocationRecord>)> = Vec::new();
        for (material, shortfall) in shortfalls {
            let areas = stock.areas_for(material).filter(|a| !a.is_empty());
            let state = if areas.is_some() {
                MatchState::Both
            } else {
                MatchState::LeftOnly
            };
            let records = self.allocate_material(material, shortfall, areas)?;
            if !records.is_empty() {
                groups.push((state, material, records));
            }
        }

        groups.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

        let records: Vec<AllocationRecord> =
            groups.into_iter().flat_map(|(_, _, records)| records).collect();

        let table = AllocationTable {
            delivery_type: summary.delivery_type.clone(),
            records,
        };

        info!(
            rows = table.records.len(),
            no_stock_qty = table.allocated_in(StorageArea::NoStock),
            "库区分配完成"
        );

        Ok(table)
    }

    /// 单物料分配
    ///
    /// # 参数
    /// - shortfall: 该物料缺口
    /// - areas: 该物料各库区可用库存（BTreeMap 迭代顺序即库区优先级）
    ///
    /// # 规则
    /// 1. 缺口 <= 0（超发）不分配，返回空
    /// 2. 无库存行 → 单条 NoStock 记录承担全部缺口
    /// 3. 逐区 allocated = min(剩余缺口, 可用库存)，剩余缺口归 0 即停止
    /// 4. 遍历结束仍有剩余 → 追加 NoStock 记录
    pub fn allocate_material(
        &self,
        material: &str,
        shortfall: i64,
        areas: Option<&BTreeMap<StorageArea, i64>>,
    ) -> EngineResult<Vec<AllocationRecord>> {
        if shortfall <= 0 {
            debug!(material, shortfall, "缺口非正，无需分配");
            return Ok(Vec::new());
        }

        let Some(areas) = areas.filter(|a| !a.is_empty()) else {
            return Ok(vec![AllocationRecord::no_stock(material, shortfall)]);
        };

        let mut records = Vec::new();
        let mut remaining_need = shortfall;

        for (&storage_area, &available_qty) in areas {
            if remaining_need == 0 {
                break;
            }

            // 负库存按 0 参与
            let allocated = remaining_need.min(available_qty.max(0));
            let next_need = remaining_need - allocated;
            if allocated < 0 || next_need < 0 {
                return Err(EngineError::InvariantViolation {
                    material: material.to_string(),
                    message: format!(
                        "库区 {} 分配出现负数: allocated={}, remaining={}",
                        storage_area, allocated, next_need
                    ),
                });
            }

            if allocated > 0 {
                records.push(AllocationRecord {
                    material: material.to_string(),
                    remaining_need,
                    storage_area,
                    available_qty: Some(available_qty),
                    match_state: MatchState::Both,
                    allocated,
                });
            }

            remaining_need = next_need;
        }

        if remaining_need > 0 {
            records.push(AllocationRecord::no_stock(material, remaining_need));
        }

        let total: i64 = records.iter().map(|r| r.allocated).sum();
        if total != shortfall {
            return Err(EngineError::InvariantViolation {
                material: material.to_string(),
                message: format!("分配合计 {} 与缺口 {} 不一致", total, shortfall),
            });
        }

        Ok(records)
    }
}

impl Default for StockAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FailureSummaryRow;

    fn areas(pairs: &[(StorageArea, i64)]) -> BTreeMap<StorageArea, i64> {
        pairs.iter().copied().collect()
    }

    fn summary(rows: &[(&str, i64)]) -> FailureSummary {
        FailureSummary {
            delivery_type: "ZLFS".to_string(),
            rows: rows
                .iter()
                .map(|(m, d)| FailureSummaryRow {
                    delivery_type: "ZLFS".to_string(),
                    material: m.to_string(),
                    diff: *d,
                })
                .collect(),
        }
    }

    #[test]
    fn test_priority_order_carry_forward() {
        let allocator = StockAllocator::new();
        let stock = areas(&[(StorageArea::Fm, 9), (StorageArea::Mezz, 4)]);

        let records = allocator.allocate_material("M1", 10, Some(&stock)).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].storage_area, StorageArea::Mezz);
        assert_eq!(records[0].allocated, 4);
        assert_eq!(records[0].remaining_need, 10);
        assert_eq!(records[1].storage_area, StorageArea::Fm);
        assert_eq!(records[1].allocated, 6);
        assert_eq!(records[1].remaining_need, 6);
    }

    #[test]
    fn test_no_stock_rows_single_record() {
        let allocator = StockAllocator::new();
        let records = allocator.allocate_material("M1", 5, None).unwrap();

        assert_eq!(records, vec![AllocationRecord::no_stock("M1", 5)]);
        assert_eq!(records[0].available_qty, None);
        assert_eq!(records[0].match_state, MatchState::LeftOnly);
    }

    #[test]
    fn test_remainder_goes_to_no_stock() {
        let allocator = StockAllocator::new();
        let stock = areas(&[(StorageArea::Mezz, 5)]);

        let records = allocator.allocate_material("M1", 7, Some(&stock)).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].allocated, 5);
        assert_eq!(records[1].storage_area, StorageArea::NoStock);
        assert_eq!(records[1].allocated, 2);
        assert_eq!(records[1].remaining_need, 2);
    }

    #[test]
    fn test_stops_when_need_exhausted() {
        let allocator = StockAllocator::new();
        let stock = areas(&[
            (StorageArea::Area916, 3),
            (StorageArea::Mezz, 8),
            (StorageArea::Fp, 8),
        ]);

        let records = allocator.allocate_material("M1", 3, Some(&stock)).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].storage_area, StorageArea::Area916);
        assert_eq!(records[0].allocated, 3);
    }

    #[test]
    fn test_negative_stock_never_allocated() {
        let allocator = StockAllocator::new();
        let stock = areas(&[(StorageArea::Opd, -4), (StorageArea::Mezz, 2)]);

        let records = allocator.allocate_material("M1", 5, Some(&stock)).unwrap();

        assert!(records.iter().all(|r| r.allocated > 0));
        assert_eq!(records[0].storage_area, StorageArea::Mezz);
        assert_eq!(records[1].storage_area, StorageArea::NoStock);
        assert_eq!(records[1].allocated, 3);
    }

    #[test]
    fn test_non_positive_shortfall_skipped() {
        let allocator = StockAllocator::new();
        let stock = areas(&[(StorageArea::Mezz, 2)]);

        assert!(allocator.allocate_material("M1", 0, Some(&stock)).unwrap().is_empty());
        assert!(allocator.allocate_material("M1", -2, Some(&stock)).unwrap().is_empty());
    }

    #[test]
    fn test_table_order_left_only_first() {
        let allocator = StockAllocator::new();
        let mut stock = StockSummary::new();
        stock.add("A", StorageArea::Mezz, 1);
        stock.add("C", StorageArea::Fm, 10);

        let table = allocator
            .allocate(&summary(&[("A", 2), ("B", 4), ("C", 3)]), &stock)
            .unwrap();

        let order: Vec<(&str, StorageArea)> = table
            .records
            .iter()
            .map(|r| (r.material.as_str(), r.storage_area))
            .collect();
        assert_eq!(
            order,
            vec![
                ("B", StorageArea::NoStock),
                ("A", StorageArea::Mezz),
                ("A", StorageArea::NoStock),
                ("C", StorageArea::Fm),
            ]
        );
    }

    #[test]
    fn test_repeated_material_allocated_once() {
        let allocator = StockAllocator::new();
        let mut stock = StockSummary::new();
        stock.add("A", StorageArea::Mezz, 5);

        let table = allocator
            .allocate(&summary(&[("A", 5), ("A", 5)]), &stock)
            .unwrap();

        assert_eq!(table.allocated_in(StorageArea::Mezz), 5);
        assert_eq!(table.allocated_in(StorageArea::NoStock), 5);
        assert_eq!(table.allocated_for("A"), 10);
        assert_eq!(table.records.len(), 2);
    }

    #[test]
    fn test_unsorted_rows_ordered_by_material() {
        let allocator = StockAllocator::new();
        let mut stock = StockSummary::new();
        stock.add("A", StorageArea::Fm, 1);
        stock.add("C", StorageArea::Fm, 1);

        let table = allocator
            .allocate(&summary(&[("C", 1), ("Z", 2), ("A", 1), ("B", 3)]), &stock)
            .unwrap();

        let order: Vec<&str> = table.records.iter().map(|r| r.material.as_str()).collect();
        assert_eq!(order, vec!["B", "Z", "A", "C"]);
    }

    #[test]
    fn test_allocated_sum_equals_shortfall() {
        let allocator = StockAllocator::new();
        let mut stock = StockSummary::new();
        stock.add("A", StorageArea::Mezz, 4);
        stock.add("A", StorageArea::Fm, 9);
        stock.add("B", StorageArea::Opd, 100);

        let failures = summary(&[("A", 20), ("B", 7), ("C", 5)]);
        let table = allocator.allocate(&failures, &stock).unwrap();

        for row in &failures.rows {
            assert_eq!(table.allocated_for(&row.material), row.diff);
        }
        assert_eq!(table.allocated_in(StorageArea::NoStock), 7 + 5);
    }
}
