// ==========================================
// 批次发货缺口分析 - 文件解析器实现
// ==========================================
// 支持: 分隔文本 (.csv/.tsv/.txt) / Excel (.xlsx/.xls)
// ==========================================

use crate::config::InputFormat;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::traits::{DataCleaner as _, FileParser, RawRow, RawTable};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::fs;
use std::path::Path;

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser {
    format: InputFormat,
}

impl CsvParser {
    pub fn new(format: InputFormat) -> Self {
        Self { format }
    }
}

impl FileParser for CsvParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // .tsv 始终按制表符解析
        let ext = extension_of(path);
        let delimiter = if ext == "tsv" {
            b'\t'
        } else {
            self.format.delimiter as u8
        };

        let content = fs::read_to_string(path)?;
        let body = skip_lines(&content, self.format.preamble_lines);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .flexible(true) // 允许行长度不一致
            .from_reader(body.as_bytes());

        // 读取表头
        let cleaner = DataCleaner;
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| cleaner.normalize_header(h))
            .collect();

        // 读取所有行
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row_map = RawRow::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(row_map);
        }

        Ok(RawTable { headers, rows })
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser {
    format: InputFormat,
}

impl ExcelParser {
    pub fn new(format: InputFormat) -> Self {
        Self { format }
    }
}

impl FileParser for ExcelParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 打开 Excel 文件（xlsx / xls 自动识别）
        let mut workbook = open_workbook_auto(path)?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // 跳过前导行后提取表头
        let mut rows = range.rows().skip(self.format.preamble_lines);
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let cleaner = DataCleaner;
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cleaner.normalize_header(&cell.to_string()))
            .collect();

        // 读取数据行
        let mut records = Vec::new();
        for data_row in rows {
            let mut row_map = RawRow::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), cell.to_string().trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(row_map);
        }

        Ok(RawTable {
            headers,
            rows: records,
        })
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser {
    format: InputFormat,
}

impl UniversalFileParser {
    pub fn new(format: InputFormat) -> Self {
        Self { format }
    }

    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawTable> {
        let path = file_path.as_ref();

        match extension_of(path).as_str() {
            "csv" | "tsv" | "txt" => CsvParser::new(self.format.clone()).parse_to_raw_table(path),
            "xlsx" | "xls" => ExcelParser::new(self.format.clone()).parse_to_raw_table(path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// 跳过前 n 行
fn skip_lines(content: &str, n: usize) -> &str {
    let mut rest = content;
    for _ in 0..n {
        match rest.find('\n') {
            Some(idx) => rest = &rest[idx + 1..],
            None => return "",
        }
    }
    rest
}
