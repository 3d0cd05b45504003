// ==========================================
// 批次发货缺口分析 - 分配记录
// ==========================================

use crate::domain::types::{MatchState, StorageArea};
use serde::{Deserialize, Serialize};

// ==========================================
// AllocationRecord - 单物料单库区的分配结果
// ==========================================
// 红线: allocated = min(remaining_need, available_qty)，不得为负
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub material: String,
    pub remaining_need: i64,         // 进入本库区前的剩余缺口
    pub storage_area: StorageArea,
    pub available_qty: Option<i64>,  // 合成 NoStock 行为空
    pub match_state: MatchState,
    pub allocated: i64,
}

impl AllocationRecord {
    /// 合成 NoStock 行
    pub fn no_stock(material: &str, remaining_need: i64) -> Self {
        Self {
            material: material.to_string(),
            remaining_need,
            storage_area: StorageArea::NoStock,
            available_qty: None,
            match_state: MatchState::LeftOnly,
            allocated: remaining_need,
        }
    }
}

// ==========================================
// AllocationTable - 单交货类型的完整分配表
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationTable {
    pub delivery_type: String,
    pub records: Vec<AllocationRecord>,
}

impl AllocationTable {
    /// 某物料分配合计
    pub fn allocated_for(&self, material: &str) -> i64 {
        self.records
            .iter()
            .filter(|r| r.material == material)
            .map(|r| r.allocated)
            .sum()
    }

    /// 某库区分配合计
    pub fn allocated_in(&self, area: StorageArea) -> i64 {
        self.records
            .iter()
            .filter(|r| r.storage_area == area)
            .map(|r| r.allocated)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
