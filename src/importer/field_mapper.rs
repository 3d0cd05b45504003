// ==========================================
// 批次发货缺口分析 - 字段映射器实现
// ==========================================
// 职责: 标准化列名 → 领域记录 + 类型转换
// ==========================================

use crate::domain::{DemandRecord, DespatchRecord, StockRecord};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::traits::{DataCleaner as _, FieldMapper as FieldMapperTrait, RawRow};

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn map_demand(&self, row: &RawRow, row_number: usize) -> ImportResult<DemandRecord> {
        Ok(DemandRecord {
            delivery_id: self.require_integer(row, "Delivery", row_number)?,
            delivery_type: self.require_text(row, "DlvTy", row_number)?,
            ship_to: self.require_integer(row, "Ship_to", row_number)?,
            material: self.require_text(row, "Material", row_number)?,
            ordered_qty: self.require_integer(row, "Dlv_qty", row_number)?,
        })
    }

    fn map_despatch(&self, row: &RawRow, row_number: usize) -> ImportResult<DespatchRecord> {
        Ok(DespatchRecord {
            reference_id: self.require_integer(row, "Reference", row_number)?,
            material: self.require_text(row, "Material", row_number)?,
            despatched_qty: self.require_integer(row, "Quantity", row_number)?,
        })
    }

    fn map_stock(&self, row: &RawRow, row_number: usize) -> ImportResult<StockRecord> {
        Ok(StockRecord {
            material: self.require_text(row, "Material", row_number)?,
            storage_type: self.require_text(row, "Typ", row_number)?,
            storage_bin: self.require_text(row, "StorageBin", row_number)?,
            available_qty: self.require_integer(row, "Avail_st", row_number)?,
        })
    }
}

impl FieldMapper {
    /// 提取非空文本字段
    fn require_text(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<String> {
        row.get(key)
            .and_then(|v| DataCleaner.clean_text(v))
            .ok_or_else(|| ImportError::FieldMissing {
                row: row_number,
                field: key.to_string(),
            })
    }

    /// 解析整数字段
    fn require_integer(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<i64> {
        let value = self.require_text(row, key, row_number)?;
        DataCleaner
            .parse_integer(&value)
            .ok_or_else(|| ImportError::TypeConversionError {
                row: row_number,
                field: key.to_string(),
                message: format!("无法解析为整数: {}", value),
            })
    }
}
