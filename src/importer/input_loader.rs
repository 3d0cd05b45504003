// ==========================================
// 批次发货缺口分析 - 输入表加载器
// ==========================================
// 流程: 定位唯一文件 → 解析 → 必需列检查 → 字段映射 → 逐行清洗
// 红线: 行级脏数据静默丢弃（只汇总计数），文件级错误立即中断
// ==========================================

use crate::config::{DespatchSign, InputFormat};
use crate::domain::{DemandRecord, DespatchRecord, StockRecord};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::input_locator::locate_single_file;
use crate::importer::traits::{
    FieldMapper as _, RawTable, DEMAND_COLUMNS, DESPATCH_COLUMNS, STOCK_COLUMNS,
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// 加载结果
#[derive(Debug, Clone)]
pub struct LoadedTable<T> {
    pub source: PathBuf,
    pub records: Vec<T>,
    /// 解析出的非空行数
    pub total_rows: usize,
    /// 清洗阶段丢弃的行数（字段缺失/无法解析）
    pub dropped_rows: usize,
    /// 按业务规则剔除的行数（排除门店 / 0 库存）
    pub excluded_rows: usize,
}

// ==========================================
// InputLoader - 输入表加载器
// ==========================================
pub struct InputLoader {
    parser: UniversalFileParser,
    mapper: FieldMapper,
    despatch_sign: DespatchSign,
}

impl InputLoader {
    pub fn new(format: InputFormat, despatch_sign: DespatchSign) -> Self {
        Self {
            parser: UniversalFileParser::new(format),
            mapper: FieldMapper,
            despatch_sign,
        }
    }

    /// 加载需求表并剔除排除门店
    #[instrument(skip_all, fields(dir = %dir.display()))]
    pub fn load_demand(
        &self,
        dir: &Path,
        excluded_ship_to: &BTreeSet<i64>,
    ) -> ImportResult<LoadedTable<DemandRecord>> {
        let (source, table) = self.read_table(dir, "Demand", &DEMAND_COLUMNS)?;

        let total_rows = table.rows.len();
        let mut dropped_rows = 0;
        let mut excluded_rows = 0;
        let mut records = Vec::with_capacity(total_rows);

        for (idx, row) in table.rows.iter().enumerate() {
            match self.mapper.map_demand(row, idx + 1) {
                Ok(record) if excluded_ship_to.contains(&record.ship_to) => excluded_rows += 1,
                Ok(record) => records.push(record),
                Err(e) => {
                    debug!(error = %e, "丢弃需求行");
                    dropped_rows += 1;
                }
            }
        }

        info!(
            file = %source.display(),
            total_rows,
            kept = records.len(),
            dropped_rows,
            excluded_rows,
            "需求表加载完成"
        );

        Ok(LoadedTable {
            source,
            records,
            total_rows,
            dropped_rows,
            excluded_rows,
        })
    }

    /// 加载发货表（按符号约定调整数量）
    #[instrument(skip_all, fields(dir = %dir.display()))]
    pub fn load_despatch(&self, dir: &Path) -> ImportResult<LoadedTable<DespatchRecord>> {
        let (source, table) = self.read_table(dir, "Despatch", &DESPATCH_COLUMNS)?;

        let total_rows = table.rows.len();
        let mut dropped_rows = 0;
        let mut records = Vec::with_capacity(total_rows);

        for (idx, row) in table.rows.iter().enumerate() {
            match self.mapper.map_despatch(row, idx + 1) {
                Ok(mut record) => {
                    record.despatched_qty = self.despatch_sign.apply(record.despatched_qty);
                    records.push(record);
                }
                Err(e) => {
                    debug!(error = %e, "丢弃发货行");
                    dropped_rows += 1;
                }
            }
        }

        info!(
            file = %source.display(),
            total_rows,
            kept = records.len(),
            dropped_rows,
            "发货表加载完成"
        );

        Ok(LoadedTable {
            source,
            records,
            total_rows,
            dropped_rows,
            excluded_rows: 0,
        })
    }

    /// 加载库存表（剔除 0 可用库存行）
    #[instrument(skip_all, fields(dir = %dir.display()))]
    pub fn load_stock(&self, dir: &Path) -> ImportResult<LoadedTable<StockRecord>> {
        let (source, table) = self.read_table(dir, "Stock", &STOCK_COLUMNS)?;

        let total_rows = table.rows.len();
        let mut dropped_rows = 0;
        let mut excluded_rows = 0;
        let mut records = Vec::with_capacity(total_rows);

        for (idx, row) in table.rows.iter().enumerate() {
            match self.mapper.map_stock(row, idx + 1) {
                Ok(record) if record.available_qty == 0 => excluded_rows += 1,
                Ok(record) => records.push(record),
                Err(e) => {
                    debug!(error = %e, "丢弃库存行");
                    dropped_rows += 1;
                }
            }
        }

        info!(
            file = %source.display(),
            total_rows,
            kept = records.len(),
            dropped_rows,
            zero_qty_rows = excluded_rows,
            "库存表加载完成"
        );

        Ok(LoadedTable {
            source,
            records,
            total_rows,
            dropped_rows,
            excluded_rows,
        })
    }

    fn read_table(
        &self,
        dir: &Path,
        label: &str,
        required: &[&str],
    ) -> ImportResult<(PathBuf, RawTable)> {
        let source = locate_single_file(dir, label)?;
        let table = self.parser.parse(&source)?;

        if let Some(missing) = required.iter().find(|c| !table.has_column(c)) {
            return Err(ImportError::MissingColumn {
                file: source.display().to_string(),
                column: missing.to_string(),
            });
        }

        Ok((source, table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_single(dir: &Path, name: &str, content: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_load_demand_drops_malformed_and_excluded() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("Demand");
        write_single(
            &dir,
            "demand.csv",
            "Delivery,DlvTy,Ship-to,Material,Dlv.qty\n\
             80001,ZLFA,1001,M1,10\n\
             80002,ZLFA,1002,M2,4\n\
             80003,ZLFS,,M3,2\n\
             Total,,,,16\n",
        );

        let loader = InputLoader::new(InputFormat::default(), DespatchSign::AsRecorded);
        let excludes: BTreeSet<i64> = [1002].into_iter().collect();
        let loaded = loader.load_demand(&dir, &excludes).unwrap();

        assert_eq!(loaded.total_rows, 4);
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].material, "M1");
        assert_eq!(loaded.excluded_rows, 1);
        assert_eq!(loaded.dropped_rows, 2);
    }

    #[test]
    fn test_load_despatch_negates_when_configured() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("Despatch");
        write_single(&dir, "despatch.csv", "Reference,Material,Quantity\n80001,M1,3\n");

        let loader = InputLoader::new(InputFormat::default(), DespatchSign::Negate);
        let loaded = loader.load_despatch(&dir).unwrap();
        assert_eq!(loaded.records[0].despatched_qty, -3);
    }

    #[test]
    fn test_load_stock_drops_zero_availability() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("Stock");
        write_single(
            &dir,
            "lx03.csv",
            "Material,SLoc,Typ,StorageBin,Avail.st\n\
             M1,0001,MS,A-01,5\n\
             M1,0001,FM,B-01,0\n",
        );

        let loader = InputLoader::new(InputFormat::default(), DespatchSign::AsRecorded);
        let loaded = loader.load_stock(&dir).unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.excluded_rows, 1);
    }

    #[test]
    fn test_missing_required_column() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("Despatch");
        write_single(&dir, "despatch.csv", "Reference,Material\n80001,M1\n");

        let loader = InputLoader::new(InputFormat::default(), DespatchSign::AsRecorded);
        let result = loader.load_despatch(&dir);
        assert!(matches!(result, Err(ImportError::MissingColumn { .. })));
    }
}
