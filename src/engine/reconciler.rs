// ==========================================
// 批次发货缺口分析 - 对账引擎
// ==========================================
// 职责: 需求左连接发货,计算未发货缺口,按交货类型 + 物料汇总
// 输入: 需求行 + 发货行
// 输出: 缺口行 + 每个交货类型一份缺口汇总
// 红线: diff == 0 的行在汇总前丢弃
// ==========================================

use crate::domain::{
    DemandRecord, DespatchRecord, FailureRecord, FailureSummary, FailureSummaryRow, MatchState,
};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{info, instrument};

/// 对账统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileStats {
    pub demand_rows: usize,
    pub despatch_rows: usize,
    pub duplicate_despatch_rows: usize, // 去重丢弃
    pub matched_rows: usize,
    pub unmatched_rows: usize,
    pub zero_diff_rows: usize, // 已全部发货
    pub failure_rows: usize,
}

/// 对账结果
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    pub failures: Vec<FailureRecord>,
    /// 交货类型 → 缺口汇总（仅包含出现过的类型）
    pub summaries: BTreeMap<String, FailureSummary>,
    pub stats: ReconcileStats,
}

impl ReconcileOutcome {
    /// 指定交货类型的汇总（不存在时返回空汇总）
    pub fn summary_for(&self, delivery_type: &str) -> FailureSummary {
        self.summaries
            .get(delivery_type)
            .cloned()
            .unwrap_or_else(|| FailureSummary::empty(delivery_type))
    }
}

// ==========================================
// Reconciler - 对账引擎
// ==========================================
pub struct Reconciler {
    // 无状态引擎
}

impl Reconciler {
    pub fn new() -> Self {
        Self {}
    }

    /// 完整对账: 去重 → 左连接 → 丢弃 0 缺口 → 汇总
    #[instrument(skip_all, fields(demand = demand.len(), despatch = despatch.len()))]
    pub fn reconcile(&self, demand: &[DemandRecord], despatch: &[DespatchRecord]) -> ReconcileOutcome {
        let (failures, stats) = self.join(demand, despatch);
        let summaries = self.summarise(&failures);

        info!(
            matched = stats.matched_rows,
            unmatched = stats.unmatched_rows,
            zero_diff = stats.zero_diff_rows,
            failures = stats.failure_rows,
            delivery_types = summaries.len(),
            "对账完成"
        );

        ReconcileOutcome {
            failures,
            summaries,
            stats,
        }
    }

    /// 左连接需求与发货（连接键: delivery_id = reference_id AND material）
    ///
    /// 发货按 (reference_id, material) 去重，保留首次出现的行
    pub fn join(
        &self,
        demand: &[DemandRecord],
        despatch: &[DespatchRecord],
    ) -> (Vec<FailureRecord>, ReconcileStats) {
        let mut stats = ReconcileStats {
            demand_rows: demand.len(),
            despatch_rows: despatch.len(),
            ..ReconcileStats::default()
        };

        let mut despatched: HashMap<(i64, &str), i64> = HashMap::with_capacity(despatch.len());
        for record in despatch {
            if despatched.contains_key(&record.key()) {
                stats.duplicate_despatch_rows += 1;
            } else {
                despatched.insert(record.key(), record.despatched_qty);
            }
        }

        let mut failures = Vec::new();
        for record in demand {
            let matched = despatched
                .get(&(record.delivery_id, record.material.as_str()))
                .copied();

            let (diff, match_state) = match matched {
                Some(qty) => {
                    stats.matched_rows += 1;
                    (record.ordered_qty + qty, MatchState::Both)
                }
                None => {
                    stats.unmatched_rows += 1;
                    (record.ordered_qty, MatchState::LeftOnly)
                }
            };

            if diff == 0 {
                stats.zero_diff_rows += 1;
                continue;
            }

            failures.push(FailureRecord {
                delivery_id: record.delivery_id,
                delivery_type: record.delivery_type.clone(),
                ship_to: record.ship_to,
                material: record.material.clone(),
                ordered_qty: record.ordered_qty,
                despatched_qty: matched,
                diff,
                match_state,
            });
        }

        stats.failure_rows = failures.len();
        (failures, stats)
    }

    /// 按 (交货类型, 物料) 汇总 diff
    pub fn summarise(&self, failures: &[FailureRecord]) -> BTreeMap<String, FailureSummary> {
        let mut grouped: BTreeMap<&str, BTreeMap<&str, i64>> = BTreeMap::new();
        for failure in failures {
            *grouped
                .entry(failure.delivery_type.as_str())
                .or_default()
                .entry(failure.material.as_str())
                .or_insert(0) += failure.diff;
        }

        grouped
            .into_iter()
            .map(|(delivery_type, materials)| {
                let rows = materials
                    .into_iter()
                    .map(|(material, diff)| FailureSummaryRow {
                        delivery_type: delivery_type.to_string(),
                        material: material.to_string(),
                        diff,
                    })
                    .collect();
                (
                    delivery_type.to_string(),
                    FailureSummary {
                        delivery_type: delivery_type.to_string(),
                        rows,
                    },
                )
            })
            .collect()
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}
