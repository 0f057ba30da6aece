// ==========================================
// 商品目录迁移工具 - 查找表
// ==========================================
// 职责: 由各数据源派生的 ProductId 索引表
// 红线: 构建完成后只读,合并阶段不得修改
// ==========================================

use crate::domain::product::{ProductId, VariantColor};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

pub type ImageUrlMap = HashMap<ProductId, Vec<String>>;
pub type VariantColorMap = HashMap<ProductId, Vec<VariantColor>>;
pub type DescriptionMap = HashMap<ProductId, String>;
pub type PriceMap = HashMap<ProductId, String>;
pub type ExclusionSet = HashSet<ProductId>;

/// 媒体数据源的提取结果（图片 + 颜色款式）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaLookup {
    pub image_urls: ImageUrlMap,
    pub colors: VariantColorMap,
}

// ==========================================
// LookupTables - 合并阶段使用的全部查找表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupTables {
    pub image_urls: ImageUrlMap,
    pub colors: VariantColorMap,
    pub descriptions: DescriptionMap,
    pub prices: PriceMap,
    pub excluded: ExclusionSet,
}

impl LookupTables {
    pub fn new(
        media: MediaLookup,
        descriptions: DescriptionMap,
        prices: PriceMap,
        excluded: ExclusionSet,
    ) -> Self {
        Self {
            image_urls: media.image_urls,
            colors: media.colors,
            descriptions,
            prices,
            excluded,
        }
    }

    pub fn is_excluded(&self, id: &str) -> bool {
        self.excluded.contains(id)
    }

    // 以下查询缺失时均返回空值,不视为错误

    pub fn image_urls_for(&self, id: &str) -> Vec<String> {
        self.image_urls.get(id).cloned().unwrap_or_default()
    }

    pub fn colors_for(&self, id: &str) -> Vec<VariantColor> {
        self.colors.get(id).cloned().unwrap_or_default()
    }

    pub fn description_for(&self, id: &str) -> String {
        self.descriptions.get(id).cloned().unwrap_or_default()
    }

    pub fn price_for(&self, id: &str) -> String {
        self.prices.get(id).cloned().unwrap_or_default()
    }

    /// 各查找表规模（用于运行报告）
    pub fn sizes(&self) -> LookupSizes {
        LookupSizes {
            image_products: self.image_urls.len(),
            color_products: self.colors.len(),
            descriptions: self.descriptions.len(),
            prices: self.prices.len(),
            excluded: self.excluded.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LookupSizes {
    pub image_products: usize,
    pub color_products: usize,
    pub descriptions: usize,
    pub prices: usize,
    pub excluded: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_lookups_are_empty() {
        let tables = LookupTables::default();
        assert!(tables.image_urls_for("P1").is_empty());
        assert!(tables.colors_for("P1").is_empty());
        assert_eq!(tables.description_for("P1"), "");
        assert_eq!(tables.price_for("P1"), "");
        assert!(!tables.is_excluded("P1"));
    }

    #[test]
    fn test_sizes() {
        let mut media = MediaLookup::default();
        media
            .image_urls
            .insert("P1".to_string(), vec!["img".to_string()]);
        media
            .colors
            .insert("P1".to_string(), vec![VariantColor::new("red", "red.jpg")]);

        let mut excluded = ExclusionSet::new();
        excluded.insert("P9".to_string());

        let tables = LookupTables::new(media, DescriptionMap::new(), PriceMap::new(), excluded);
        let sizes = tables.sizes();

        assert_eq!(sizes.image_products, 1);
        assert_eq!(sizes.color_products, 1);
        assert_eq!(sizes.excluded, 1);
        assert!(tables.is_excluded("P9"));
    }
}
