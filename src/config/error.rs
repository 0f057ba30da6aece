// ==========================================
// 商品目录迁移工具 - 配置错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件解析失败 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("列布局无效 (字段 {field}): {message}")]
    InvalidLayout { field: String, message: String },
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
