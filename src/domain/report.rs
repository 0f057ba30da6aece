// ==========================================
// 商品目录迁移工具 - 运行报告
// ==========================================
// 职责: 汇总单次运行的统计数据（日志输出 + 可选 JSON 落盘）
// ==========================================

use crate::domain::lookup::LookupSizes;
use crate::domain::product::ProductId;
use crate::domain::types::SourceKind;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// 合并阶段统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    pub sales_rows_scanned: usize,     // 跳过表头后扫描的销售行
    pub empty_rows_skipped: usize,     // 空行
    pub duplicate_rows_skipped: usize, // 重复商品编号（首次出现优先）
    pub excluded_rows_skipped: usize,  // 命中排除清单
    pub products_created: usize,
}

/// 写出阶段统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmitStats {
    pub sheet_rows_emitted: usize,
    pub groups_assigned: usize,
    pub products_without_variants: Vec<ProductId>,
}

// ==========================================
// RunReport - 单次运行报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub source_files: BTreeMap<SourceKind, usize>,
    pub lookups: LookupSizes,
    pub merge: MergeStats,
    pub emit: EmitStats,
}

impl RunReport {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// 运行耗时（毫秒）
    pub fn elapsed_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}
