// ==========================================
// 批次发货缺口分析 - 导入层 Trait
// ==========================================
// 职责: 定义文件解析、字段映射、数据清洗接口（不包含实现）
// ==========================================

use crate::domain::{DemandRecord, DespatchRecord, StockRecord};
use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

/// 原始行（标准化列名 → 原始值）
pub type RawRow = HashMap<String, String>;

/// 解析后的原始表
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>, // 已标准化
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口
// 实现者: CsvParser, ExcelParser
pub trait FileParser {
    /// 解析文件为原始表
    ///
    /// # 返回
    /// - Ok(RawTable): 表头已标准化，完全空白的行已跳过
    /// - Err: 文件读取错误、格式错误
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

/// 需求表必需列（标准化后）
pub const DEMAND_COLUMNS: [&str; 5] = ["Delivery", "DlvTy", "Ship_to", "Material", "Dlv_qty"];

/// 发货表必需列
pub const DESPATCH_COLUMNS: [&str; 3] = ["Reference", "Material", "Quantity"];

/// 库存表必需列（SLoc 可选）
pub const STOCK_COLUMNS: [&str; 4] = ["Material", "Typ", "StorageBin", "Avail_st"];

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 原始行 → 领域记录
// 实现者: FieldMapperImpl
pub trait FieldMapper {
    fn map_demand(&self, row: &RawRow, row_number: usize) -> ImportResult<DemandRecord>;

    /// despatched_qty 按原值返回，符号约定由调用方处理
    fn map_despatch(&self, row: &RawRow, row_number: usize) -> ImportResult<DespatchRecord>;

    fn map_stock(&self, row: &RawRow, row_number: usize) -> ImportResult<StockRecord>;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 数据清洗接口
// 实现者: DataCleanerImpl
pub trait DataCleaner {
    /// 表头标准化（TRIM，'.' 与 '-' → '_'）
    fn normalize_header(&self, header: &str) -> String;

    /// 标准化 NULL 值（空白/NaN → None）
    fn clean_text(&self, value: &str) -> Option<String>;

    /// 解析整数（数量/单号），无法解析返回 None
    fn parse_integer(&self, value: &str) -> Option<i64>;
}
