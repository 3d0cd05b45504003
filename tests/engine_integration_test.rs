// ==========================================
// 批次发货缺口分析 - 引擎集成测试
// ==========================================
// 覆盖: 对账 → 库存汇总 → 库区分配 → 报表汇总（纯内存）
// ==========================================

use despatch_shortfall::config::PipelineConfig;
use despatch_shortfall::domain::{
    DemandRecord, DespatchRecord, MatchState, StockRecord, StorageArea,
};
use despatch_shortfall::engine::{Reconciler, Reporter, StockAllocator, StockSummariser};

fn demand(delivery_id: i64, delivery_type: &str, material: &str, qty: i64) -> DemandRecord {
    DemandRecord {
        delivery_id,
        delivery_type: delivery_type.to_string(),
        ship_to: 500,
        material: material.to_string(),
        ordered_qty: qty,
    }
}

fn despatch(reference_id: i64, material: &str, qty: i64) -> DespatchRecord {
    DespatchRecord {
        reference_id,
        material: material.to_string(),
        despatched_qty: qty,
    }
}

fn stock(material: &str, storage_type: &str, bin: &str, qty: i64) -> StockRecord {
    StockRecord {
        material: material.to_string(),
        storage_type: storage_type.to_string(),
        storage_bin: bin.to_string(),
        available_qty: qty,
    }
}

fn summariser_for(delivery_type: &str) -> StockSummariser {
    let config = PipelineConfig::default();
    StockSummariser::new(
        &config.removed_storage_types,
        config.bin_exclusion_for(delivery_type),
    )
}

#[test]
fn test_failures_never_zero_and_first_despatch_wins() {
    let outcome = Reconciler::new().reconcile(
        &[
            demand(1, "ZLFS", "A", 5),
            demand(2, "ZLFS", "B", 5),
            demand(3, "ZLFS", "C", 2),
        ],
        &[
            despatch(1, "A", -5),
            despatch(2, "B", -1),
            despatch(2, "B", -5), // 重复键，丢弃
            despatch(3, "C", -2),
        ],
    );

    assert!(outcome.failures.iter().all(|f| f.diff != 0));
    assert_eq!(outcome.stats.duplicate_despatch_rows, 1);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].material, "B");
    assert_eq!(outcome.failures[0].diff, 4);
    assert_eq!(outcome.failures[0].match_state, MatchState::Both);
}

#[test]
fn test_unmapped_and_removed_types_never_summarised() {
    let (summary, stats) = summariser_for("ZLFS").summarise(&[
        stock("A", "ZZZ", "X1", 4),
        stock("A", "TIN", "X2", 4),
        stock("A", "MS", "X3", 4),
        stock("A", "MS", "50", 9),
    ]);

    let areas = summary.areas_for("A").unwrap();
    assert_eq!(areas.len(), 1);
    assert_eq!(areas.get(&StorageArea::Mezz), Some(&4));
    assert_eq!(stats.unmapped_rows, 1);
    assert_eq!(stats.removed_type_rows, 1);
    assert_eq!(stats.excluded_bin_rows, 1);
}

#[test]
fn test_full_engine_chain() {
    let outcome = Reconciler::new().reconcile(
        &[
            demand(1, "ZLFA", "A", 10),
            demand(2, "ZLFA", "B", 5),
            demand(3, "ZLFA", "C", 1),
        ],
        &[despatch(3, "C", -3)],
    );
    let failures = outcome.summary_for("ZLFA");
    assert_eq!(failures.diff_for("C"), Some(-2));

    let (stock_summary, _) = summariser_for("ZLFA").summarise(&[
        stock("A", "MS", "M-01", 4),
        stock("A", "FM", "F-01", 9),
        stock("C", "FP", "P-01", 3),
    ]);

    let table = StockAllocator::new()
        .allocate(&failures, &stock_summary)
        .unwrap();

    // A: Mezz 4 + FM 6；B: 无库存 5；C: 超发不分配
    assert_eq!(table.allocated_for("A"), 10);
    assert_eq!(table.allocated_for("B"), 5);
    assert_eq!(table.allocated_for("C"), 0);
    assert_eq!(table.records[0].material, "B");
    assert_eq!(table.records[0].storage_area, StorageArea::NoStock);
    assert_eq!(table.records[0].available_qty, None);

    let series = Reporter::new().summarise("ZLFA", &table.records);
    assert_eq!(
        series.labelled_values(),
        vec![
            ("Mezz : 4".to_string(), 4),
            ("FM : 6".to_string(), 6),
            ("NoStock : 5".to_string(), 5),
        ]
    );
}
