// ==========================================
// 商品目录迁移工具 - 领域类型定义
// ==========================================
// 职责: 数据源类型、工作表选择等基础枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 数据源类型 (Source Kind)
// ==========================================
// 加载顺序: 排除清单 → 销售 → 媒体 → 基础信息 → 价格
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceKind {
    Exclusion, // 排除清单
    Sales,     // 销售信息
    Media,     // 媒体信息（图片/颜色款式）
    BasicInfo, // 基础信息（描述）
    Price,     // 价格信息
}

impl SourceKind {
    /// 全部数据源类型（按加载顺序）
    pub const ALL: [SourceKind; 5] = [
        SourceKind::Exclusion,
        SourceKind::Sales,
        SourceKind::Media,
        SourceKind::BasicInfo,
        SourceKind::Price,
    ];
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Exclusion => write!(f, "EXCLUSION"),
            SourceKind::Sales => write!(f, "SALES"),
            SourceKind::Media => write!(f, "MEDIA"),
            SourceKind::BasicInfo => write!(f, "BASIC_INFO"),
            SourceKind::Price => write!(f, "PRICE"),
        }
    }
}

// ==========================================
// 工作表选择 (Sheet Selector)
// ==========================================
// JSON 形式: "first" 或 {"named": "Sheet1"}
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetSelector {
    First,         // 工作簿中的第一个工作表
    Named(String), // 按名称指定
}

impl SheetSelector {
    pub fn named(name: impl Into<String>) -> Self {
        SheetSelector::Named(name.into())
    }
}

impl fmt::Display for SheetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetSelector::First => write!(f, "<first>"),
            SheetSelector::Named(name) => write!(f, "{}", name),
        }
    }
}
