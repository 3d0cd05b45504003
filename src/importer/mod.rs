// ==========================================
// 批次发货缺口分析 - 导入层
// ==========================================
// 职责: 外部表格读取,生成领域记录
// 支持: CSV / TSV / Excel
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod input_loader;
pub mod input_locator;
pub mod reference_lists;
pub mod traits;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use input_loader::{InputLoader, LoadedTable};
pub use input_locator::locate_single_file;
pub use reference_lists::{load_exclusions, load_recipients};

// 重导出 Trait 接口
pub use traits::{DataCleaner, FieldMapper, FileParser, RawRow, RawTable};
