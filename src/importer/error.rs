// ==========================================
// 商品目录迁移工具 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 策略: 遇到第一个错误即终止整次运行,不重试
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xlsm/.xls/.xlsb/.ods/.csv）")]
    UnsupportedFormat(String),

    #[error("无法打开数据源 ({path}): {message}")]
    FileOpenError { path: String, message: String },

    #[error("工作表不存在 ({path}): {sheet}")]
    SheetNotFound { path: String, sheet: String },

    // ===== 行读取错误 =====
    #[error("工作表读取失败 ({path}, 工作表 {sheet}): {message}")]
    SheetReadError {
        path: String,
        sheet: String,
        message: String,
    },

    #[error("行读取失败 ({path}, 行 {row}): {message}")]
    RowReadError {
        path: String,
        row: usize,
        message: String,
    },

    // ===== 数据结构错误 =====
    #[error("行列数不足 ({path}, 行 {row}): 至少需要 {required} 列，实际 {actual} 列")]
    RowTooShort {
        path: String,
        row: usize,
        required: usize,
        actual: usize,
    },
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
