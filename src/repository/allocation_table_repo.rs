// ==========================================
// 批次发货缺口分析 - 分配表仓储
// ==========================================
// 职责: 分配阶段 → 报表阶段的交接文件读写
// 文件: full_analysis_output_<交货类型小写>.csv
// 列: Material,Diff,Str_Area,Avail_st,_merge,Net
// ==========================================

use crate::domain::{AllocationRecord, AllocationTable, MatchState, StorageArea};
use crate::repository::error::{RepositoryError, RepositoryResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const HEADER: [&str; 6] = ["Material", "Diff", "Str_Area", "Avail_st", "_merge", "Net"];

/// 落盘行结构（列名与下游报表约定一致）
#[derive(Debug, Serialize, Deserialize)]
struct AllocationRow {
    #[serde(rename = "Material")]
    material: String,
    #[serde(rename = "Diff")]
    remaining_need: i64,
    #[serde(rename = "Str_Area")]
    storage_area: StorageArea,
    #[serde(rename = "Avail_st")]
    available_qty: Option<i64>,
    #[serde(rename = "_merge")]
    match_state: MatchState,
    #[serde(rename = "Net")]
    allocated: i64,
}

impl From<&AllocationRecord> for AllocationRow {
    fn from(r: &AllocationRecord) -> Self {
        Self {
            material: r.material.clone(),
            remaining_need: r.remaining_need,
            storage_area: r.storage_area,
            available_qty: r.available_qty,
            match_state: r.match_state,
            allocated: r.allocated,
        }
    }
}

impl From<AllocationRow> for AllocationRecord {
    fn from(r: AllocationRow) -> Self {
        Self {
            material: r.material,
            remaining_need: r.remaining_need,
            storage_area: r.storage_area,
            available_qty: r.available_qty,
            match_state: r.match_state,
            allocated: r.allocated,
        }
    }
}

pub struct AllocationTableRepository {
    output_dir: PathBuf,
}

impl AllocationTableRepository {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, delivery_type: &str) -> PathBuf {
        self.output_dir.join(format!(
            "full_analysis_output_{}.csv",
            delivery_type.to_lowercase()
        ))
    }

    pub fn save(&self, table: &AllocationTable) -> RepositoryResult<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.path_for(&table.delivery_type);

        let mut writer = csv::Writer::from_path(&path)?;
        if table.is_empty() {
            writer.write_record(HEADER)?;
        }
        for record in &table.records {
            writer.serialize(AllocationRow::from(record))?;
        }
        writer.flush()?;

        info!(
            delivery_type = %table.delivery_type,
            rows = table.records.len(),
            file = %path.display(),
            "分配表已写出"
        );
        Ok(path)
    }

    pub fn load(&self, delivery_type: &str) -> RepositoryResult<AllocationTable> {
        let path = self.path_for(delivery_type);
        if !path.is_file() {
            return Err(RepositoryError::MissingArtifact {
                path: path.display().to_string(),
                hint: "请先运行 allocate 阶段生成分配表".to_string(),
            });
        }

        let mut reader = csv::Reader::from_path(&path)?;
        let mut records = Vec::new();
        for (idx, result) in reader.deserialize::<AllocationRow>().enumerate() {
            let row = result.map_err(|e| RepositoryError::MalformedArtifact {
                path: path.display().to_string(),
                message: format!("第 {} 行: {}", idx + 1, e),
            })?;
            records.push(AllocationRecord::from(row));
        }

        Ok(AllocationTable {
            delivery_type: delivery_type.to_string(),
            records,
        })
    }
}
