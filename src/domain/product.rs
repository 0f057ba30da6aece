// ==========================================
// 商品目录迁移工具 - 商品实体
// ==========================================
// 职责: 颜色款式 / 合并后的输出商品行
// ==========================================

use serde::{Deserialize, Serialize};

/// 商品编号（所有数据源之间的关联键）
pub type ProductId = String;

// ==========================================
// VariantColor - 颜色款式
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantColor {
    pub color_id: String,  // 颜色标识
    pub image_url: String, // 该颜色对应的款式图片
}

impl VariantColor {
    pub fn new(color_id: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            color_id: color_id.into(),
            image_url: image_url.into(),
        }
    }
}

// ==========================================
// OutputRow - 合并后的商品记录
// ==========================================
// 每个商品只在销售数据源中首次出现时构建一次,
// 写出时按颜色款式展开为多行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub image_urls: Vec<String>,
    pub price: String,
    pub quantity: String,
    pub colors: Vec<VariantColor>,
}

impl OutputRow {
    /// 展开后应写出的表格行数
    pub fn variant_count(&self) -> usize {
        self.colors.len()
    }

    pub fn has_variants(&self) -> bool {
        !self.colors.is_empty()
    }
}
