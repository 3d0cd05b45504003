// ==========================================
// 批次发货缺口分析 - 可选参考清单
// ==========================================
// 包括: 排除门店清单、邮件收件人清单
// 规则: 文件缺失时降级为空集合并输出警告，不中断流程
// ==========================================

use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::ImportResult;
use crate::importer::traits::DataCleaner as _;
use csv::ReaderBuilder;
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;
use tracing::{info, warn};

/// 读取排除门店清单（第一列为 ship-to 编号）
///
/// 无法解析为整数的单元格（如表头）跳过
pub fn load_exclusions(path: &Path) -> ImportResult<BTreeSet<i64>> {
    let Some(values) = read_first_column(path)? else {
        warn!(
            path = %path.display(),
            "未找到排除门店清单，不排除任何门店"
        );
        return Ok(BTreeSet::new());
    };

    let cleaner = DataCleaner;
    let excludes: BTreeSet<i64> = values
        .iter()
        .filter_map(|v| cleaner.parse_integer(v))
        .collect();

    info!(count = excludes.len(), "排除门店清单处理完成");
    Ok(excludes)
}

/// 读取邮件收件人清单（第一列为邮箱地址）
///
/// 保持文件顺序，去重，跳过不含 '@' 的单元格
pub fn load_recipients(path: &Path) -> ImportResult<Vec<String>> {
    let Some(values) = read_first_column(path)? else {
        warn!(
            path = %path.display(),
            "未找到收件人清单，没有可发送的收件人"
        );
        return Ok(Vec::new());
    };

    let mut recipients: Vec<String> = Vec::new();
    for value in values {
        let address = value.trim();
        if address.contains('@') && !recipients.iter().any(|r| r == address) {
            recipients.push(address.to_string());
        }
    }

    info!(count = recipients.len(), "收件人清单处理完成");
    Ok(recipients)
}

/// 读取无表头 CSV 的第一列；文件不存在返回 None
fn read_first_column(path: &Path) -> ImportResult<Option<Vec<String>>> {
    if !path.is_file() {
        return Ok(None);
    }

    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut values = Vec::new();
    for result in reader.records() {
        let record = result?;
        if let Some(first) = record.get(0) {
            let first = first.trim();
            if !first.is_empty() {
                values.push(first.to_string());
            }
        }
    }

    Ok(Some(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_exclusions() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "SAP ID,Store name").unwrap();
        writeln!(temp_file, "1001,Leeds").unwrap();
        writeln!(temp_file, "1002").unwrap();

        let excludes = load_exclusions(temp_file.path()).unwrap();
        assert_eq!(excludes.len(), 2);
        assert!(excludes.contains(&1001));
        assert!(excludes.contains(&1002));
    }

    #[test]
    fn test_missing_exclusions_is_empty() {
        let excludes = load_exclusions(Path::new("no_such_exclusions.csv")).unwrap();
        assert!(excludes.is_empty());
    }

    #[test]
    fn test_load_recipients_dedup_in_order() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "b@example.com").unwrap();
        writeln!(temp_file, "a@example.com,Team A").unwrap();
        writeln!(temp_file, "b@example.com").unwrap();
        writeln!(temp_file, "not-an-address").unwrap();

        let recipients = load_recipients(temp_file.path()).unwrap();
        assert_eq!(recipients, vec!["b@example.com", "a@example.com"]);
    }

    #[test]
    fn test_missing_recipients_is_empty() {
        let recipients = load_recipients(Path::new("no_such_list.csv")).unwrap();
        assert!(recipients.is_empty());
    }
}
