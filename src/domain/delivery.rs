// ==========================================
// 批次发货缺口分析 - 需求/发货领域模型
// ==========================================
// 职责: 需求行、发货行、缺口行及按物料汇总
// ==========================================

use crate::domain::types::MatchState;
use serde::{Deserialize, Serialize};

// ==========================================
// DemandRecord - 需求行（未完成交货行）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandRecord {
    pub delivery_id: i64,      // 交货单号
    pub delivery_type: String, // 交货类型（ZLFA / ZLFS ...）
    pub ship_to: i64,          // 收货方（门店）
    pub material: String,      // 物料号（ISBN，不保证为数字）
    pub ordered_qty: i64,      // 交货数量
}

// ==========================================
// DespatchRecord - 发货行
// ==========================================
// 约定: despatched_qty 已按符号调整，ordered_qty + despatched_qty 即剩余缺口
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DespatchRecord {
    pub reference_id: i64, // 参考单号（对应 delivery_id）
    pub material: String,
    pub despatched_qty: i64,
}

impl DespatchRecord {
    /// 连接键 (reference_id, material)
    pub fn key(&self) -> (i64, &str) {
        (self.reference_id, self.material.as_str())
    }
}

// ==========================================
// FailureRecord - 缺口行（需求左连接发货）
// ==========================================
// 红线: diff 永不为 0（0 缺口行在生成时丢弃）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub delivery_id: i64,
    pub delivery_type: String,
    pub ship_to: i64,
    pub material: String,
    pub ordered_qty: i64,
    pub despatched_qty: Option<i64>, // left_only 时为空
    pub diff: i64,
    pub match_state: MatchState,
}

// ==========================================
// FailureSummary - 按物料汇总的缺口（对账 → 分配的交接物）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureSummaryRow {
    #[serde(rename = "DlvTy")]
    pub delivery_type: String,
    #[serde(rename = "Material")]
    pub material: String,
    #[serde(rename = "Diff")]
    pub diff: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureSummary {
    pub delivery_type: String,
    pub rows: Vec<FailureSummaryRow>, // 按物料升序
}

impl FailureSummary {
    pub fn empty(delivery_type: &str) -> Self {
        Self {
            delivery_type: delivery_type.to_string(),
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 缺口合计
    pub fn total_diff(&self) -> i64 {
        self.rows.iter().map(|r| r.diff).sum()
    }

    pub fn diff_for(&self, material: &str) -> Option<i64> {
        self.rows
            .iter()
            .find(|r| r.material == material)
            .map(|r| r.diff)
    }
}
