// ==========================================
// 商品目录迁移工具 - 输出模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 输出模块错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("单元格地址无效: {0}")]
    InvalidCellAddress(String),

    #[error("列号无效: {0}")]
    InvalidColumn(String),

    #[error("输出格式不支持: {0}（仅支持 .xlsx/.csv）")]
    UnsupportedFormat(String),

    #[error("Excel 写出失败 ({path}): {message}")]
    WorkbookWriteError { path: String, message: String },

    #[error("CSV 写出失败 ({path}): {message}")]
    CsvWriteError { path: String, message: String },

    #[error("文件写入失败 ({path}): {message}")]
    FileWriteError { path: String, message: String },
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
