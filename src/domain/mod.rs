// ==========================================
// 商品目录迁移工具 - 领域模型层
// ==========================================
// 职责: 定义商品实体、查找表、运行报告
// 红线: 不含文件读写逻辑,不含合并逻辑
// ==========================================

pub mod lookup;
pub mod product;
pub mod report;
pub mod types;

// 重导出核心类型
pub use lookup::{
    DescriptionMap, ExclusionSet, ImageUrlMap, LookupSizes, LookupTables, MediaLookup, PriceMap,
    VariantColorMap,
};
pub use product::{OutputRow, ProductId, VariantColor};
pub use report::{EmitStats, MergeStats, RunReport};
pub use types::{SheetSelector, SourceKind};
