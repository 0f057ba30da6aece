// ==========================================
// 商品目录迁移工具 - 配置层
// ==========================================
// 职责: 列布局、输入文件清单、配置文件加载
// 存储: JSON 配置文件（可选）
// ==========================================

pub mod config_manager;
pub mod error;
pub mod layout;

// 重导出核心配置类型
pub use config_manager::{ConfigManager, MigrationConfig, SourceFiles};
pub use error::{ConfigError, ConfigResult};
pub use layout::{
    BasicInfoLayout, ColumnLayout, ExclusionLayout, LiteralCell, MediaLayout, OutputLayout,
    PriceLayout, SalesLayout,
};
