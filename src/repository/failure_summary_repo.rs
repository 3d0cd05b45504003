// ==========================================
// 批次发货缺口分析 - 缺口汇总仓储
// ==========================================
// 职责: 对账阶段 → 分配阶段的交接文件读写
// 文件: failures_<交货类型小写>_by_material.csv（DlvTy,Material,Diff）
// ==========================================

use crate::domain::{FailureSummary, FailureSummaryRow};
use crate::repository::error::{RepositoryError, RepositoryResult};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct FailureSummaryRepository {
    output_dir: PathBuf,
}

impl FailureSummaryRepository {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, delivery_type: &str) -> PathBuf {
        self.output_dir.join(format!(
            "failures_{}_by_material.csv",
            delivery_type.to_lowercase()
        ))
    }

    /// 整文件覆盖写入（空汇总只写表头）
    pub fn save(&self, summary: &FailureSummary) -> RepositoryResult<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.path_for(&summary.delivery_type);

        let mut writer = csv::Writer::from_path(&path)?;
        if summary.is_empty() {
            writer.write_record(["DlvTy", "Material", "Diff"])?;
        }
        for row in &summary.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        info!(
            delivery_type = %summary.delivery_type,
            rows = summary.len(),
            file = %path.display(),
            "缺口汇总已写出"
        );
        Ok(path)
    }

    /// 读取缺口汇总；文件不存在时提示先运行对账阶段
    pub fn load(&self, delivery_type: &str) -> RepositoryResult<FailureSummary> {
        let path = self.path_for(delivery_type);
        if !path.is_file() {
            return Err(RepositoryError::MissingArtifact {
                path: path.display().to_string(),
                hint: "请先运行 reconcile 阶段生成缺口汇总".to_string(),
            });
        }

        let mut reader = csv::Reader::from_path(&path)?;
        let mut rows: Vec<FailureSummaryRow> = Vec::new();
        let mut seen = BTreeSet::new();
        for (idx, result) in reader.deserialize::<FailureSummaryRow>().enumerate() {
            let row = result.map_err(|e| RepositoryError::MalformedArtifact {
                path: path.display().to_string(),
                message: format!("第 {} 行: {}", idx + 1, e),
            })?;
            if !seen.insert(row.material.clone()) {
                return Err(RepositoryError::MalformedArtifact {
                    path: path.display().to_string(),
                    message: format!("第 {} 行: 物料 {} 重复", idx + 1, row.material),
                });
            }
            rows.push(row);
        }
        // 按物料升序，与写出口径一致
        rows.sort_by(|a, b| a.material.cmp(&b.material));

        info!(
            delivery_type,
            rows = rows.len(),
            file = %path.display(),
            "缺口汇总读取完成"
        );

        Ok(FailureSummary {
            delivery_type: delivery_type.to_string(),
            rows,
        })
    }
}
