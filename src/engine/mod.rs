// ==========================================
// 商品目录迁移工具 - 引擎层
// ==========================================
// 职责: 查找表提取、商品合并、颜色款式展开
// 红线: 引擎不读写文件,只处理内存数据源与单元格写入
// ==========================================

pub mod emitter;
pub mod extractors;
pub mod merger;
pub mod pipeline;

// 重导出核心引擎
pub use emitter::RowEmitter;
pub use extractors::{
    build_lookup_tables, BasicInfoExtractor, ExclusionExtractor, LookupExtractor, MediaExtractor,
    PriceExtractor,
};
pub use merger::{MergeOutcome, ProductMerger};
pub use pipeline::{Pipeline, PipelineError, PipelineOutput, PipelineResult};
