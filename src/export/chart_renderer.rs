// ==========================================
// 批次发货缺口分析 - 图表渲染接口
// ==========================================
// 职责: 接收报表序列,产出图表文件
// 默认实现: 序列写为 JSON,交外部绘图工具出图
// ==========================================

use crate::engine::ChartSeries;
use crate::export::error::ExportResult;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// 图表渲染器
pub trait ChartRenderer {
    /// 渲染单个交货类型的序列，返回输出文件路径
    fn render(&self, series: &ChartSeries) -> ExportResult<PathBuf>;
}

pub struct JsonChartRenderer {
    output_dir: PathBuf,
}

impl JsonChartRenderer {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, delivery_type: &str) -> PathBuf {
        self.output_dir
            .join(format!("chart_{}.json", delivery_type.to_lowercase()))
    }
}

impl ChartRenderer for JsonChartRenderer {
    fn render(&self, series: &ChartSeries) -> ExportResult<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.path_for(&series.delivery_type);

        let json = serde_json::to_string_pretty(series)?;
        fs::write(&path, json)?;

        info!(
            delivery_type = %series.delivery_type,
            slices = series.slices.len(),
            total = series.total(),
            file = %path.display(),
            "图表序列已写出"
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AllocationRecord;
    use crate::engine::Reporter;

    #[test]
    fn test_render_writes_series_json() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = JsonChartRenderer::new(dir.path());
        let series = Reporter::new().summarise("ZLFS", &[AllocationRecord::no_stock("M1", 3)]);

        let path = renderer.render(&series).unwrap();
        assert!(path.ends_with("chart_zlfs.json"));

        let back: ChartSeries =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, series);
        assert_eq!(back.slices[0].label, "NoStock : 3");
    }
}
