// ==========================================
// 商品目录迁移工具 - 核心库
// ==========================================
// 用途: 将供应商导出的销售/媒体/基础信息/价格/排除清单表格
//       合并为平台批量上架用的单一工作表
// 流程: 加载 → 查找表 → 合并 → 按颜色款式展开 → 写出
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 列布局与输入清单
pub mod config;

// 导入层 - 表格读取
pub mod importer;

// 引擎层 - 合并规则
pub mod engine;

// 输出层 - 表格写出
pub mod exporter;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{LookupTables, OutputRow, ProductId, RunReport, SheetSelector, SourceKind, VariantColor};

// 配置
pub use config::{ColumnLayout, ConfigManager, MigrationConfig, SourceFiles};

// 读取 / 写出
pub use exporter::{OutputSheet, SheetFileWriter, UniversalSheetWriter};
pub use importer::{SheetReader, SourceSet, UniversalSheetReader};

// 引擎
pub use engine::{Pipeline, PipelineError, PipelineOutput, PipelineResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "商品目录迁移工具";
