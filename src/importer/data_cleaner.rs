// ==========================================
// 批次发货缺口分析 - 数据清洗器实现
// ==========================================
// 职责: 表头标准化 / TRIM / NULL 标准化 / 数量与单号解析
// 红线: 清洗失败只返回 None，由调用方整行丢弃
// ==========================================

use crate::importer::traits::DataCleaner as DataCleanerTrait;

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn normalize_header(&self, header: &str) -> String {
        header
            .trim_start_matches('\u{feff}')
            .trim()
            .replace(|c: char| c == '.' || c == '-', "_")
    }

    fn clean_text(&self, value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn parse_integer(&self, value: &str) -> Option<i64> {
        let text = self.clean_text(value)?;
        // 千分位逗号
        let compact: String = text.chars().filter(|c| *c != ',').collect();

        if let Ok(n) = compact.parse::<i64>() {
            return Some(n);
        }

        // 兼容 Excel / 浮点导出的整数值（如 "10.0"）
        let f = compact.parse::<f64>().ok()?;
        if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
            Some(f as i64)
        } else {
            None
        }
    }
}
