// ==========================================
// 商品目录迁移工具 - 导入层
// ==========================================
// 职责: 读取供应商表格,生成内存数据源
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod error;
pub mod file_parser;
pub mod source_loader;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvSheetReader, ExcelSheetReader, SheetReader, SheetRow, UniversalSheetReader};
pub use source_loader::{LoadedSheet, SourceSet};
