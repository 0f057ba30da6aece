// ==========================================
// 商品目录迁移工具 - 输出层
// ==========================================
// 职责: 单元格地址解析、内存工作表、输出文件写出
// 支持: Excel (.xlsx), CSV
// ==========================================

pub mod cell_address;
pub mod error;
pub mod file_writer;
pub mod output_sheet;

// 重导出核心类型
pub use cell_address::{column_index, column_letters, CellAddress};
pub use error::{ExportError, ExportResult};
pub use file_writer::{CsvSheetWriter, SheetFileWriter, UniversalSheetWriter, XlsxSheetWriter};
pub use output_sheet::{CellSink, CellValue, OutputSheet};
