// ==========================================
// 商品目录迁移工具 - 查找表提取器
// ==========================================
// 职责: 扫描各数据源,生成 ProductId 索引的查找表
// 说明: 各提取器相互独立,须全部完成后才进入合并阶段
// 红线: 只按列布局取值,行长度不足的列一律视为缺失,不越界读取
// ==========================================

use crate::config::{BasicInfoLayout, ColumnLayout, ExclusionLayout, MediaLayout, PriceLayout};
use crate::domain::lookup::{DescriptionMap, ExclusionSet, LookupTables, MediaLookup, PriceMap};
use crate::domain::product::VariantColor;
use crate::importer::source_loader::{LoadedSheet, SourceSet};
use tracing::{debug, info, instrument};

// ==========================================
// LookupExtractor Trait
// ==========================================
// 用途: 从同类型的全部数据源构建一张查找表
// 实现者: MediaExtractor, BasicInfoExtractor, PriceExtractor, ExclusionExtractor
//
// 行读取错误在 SourceSet::load 阶段已经暴露,提取阶段不再失败
pub trait LookupExtractor {
    type Output;

    fn extract(&self, sheets: &[LoadedSheet]) -> Self::Output;
}

// ==========================================
// MediaExtractor - 图片与颜色款式
// ==========================================
pub struct MediaExtractor<'a> {
    layout: &'a MediaLayout,
}

impl<'a> MediaExtractor<'a> {
    pub fn new(layout: &'a MediaLayout) -> Self {
        Self { layout }
    }

    /// 提取图片区（只取行内存在的列）
    pub fn image_urls(&self, row: &[String]) -> Vec<String> {
        self.layout
            .image_columns
            .iter()
            .filter_map(|&idx| row.get(idx).cloned())
            .collect()
    }

    /// 提取颜色区
    ///
    /// # 规则
    /// - 颜色标识为空或超出行长度时终止
    /// - 款式图片列缺失时为空字符串
    pub fn variant_colors(&self, row: &[String]) -> Vec<VariantColor> {
        let mut colors = Vec::new();
        let mut column = self.layout.variant_first_column;

        while column < self.layout.variant_end_column {
            let Some(color_id) = row.get(column) else {
                break;
            };
            if color_id.is_empty() {
                break;
            }

            let image_url = row.get(column + 1).cloned().unwrap_or_default();
            colors.push(VariantColor::new(color_id.as_str(), image_url));
            column += self.layout.variant_stride;
        }
        colors
    }
}

impl LookupExtractor for MediaExtractor<'_> {
    type Output = MediaLookup;

    fn extract(&self, sheets: &[LoadedSheet]) -> MediaLookup {
        let mut lookup = MediaLookup::default();

        for sheet in sheets {
            let mut scanned = 0usize;
            for (_row_number, row) in sheet.data_rows(self.layout.header_rows) {
                let Some(id) = row.get(self.layout.id_column) else {
                    continue;
                };
                scanned += 1;

                // 同一商品多行: 图片以后出现的行为准,颜色款式累加
                lookup.image_urls.insert(id.clone(), self.image_urls(row));

                let colors = self.variant_colors(row);
                if !colors.is_empty() {
                    lookup.colors.entry(id.clone()).or_default().extend(colors);
                }
            }
            debug!(path = %sheet.source_name(), rows = scanned, "媒体数据源已扫描");
        }

        lookup
    }
}

// ==========================================
// BasicInfoExtractor - 商品描述
// ==========================================
pub struct BasicInfoExtractor<'a> {
    layout: &'a BasicInfoLayout,
}

impl<'a> BasicInfoExtractor<'a> {
    pub fn new(layout: &'a BasicInfoLayout) -> Self {
        Self { layout }
    }
}

impl LookupExtractor for BasicInfoExtractor<'_> {
    type Output = DescriptionMap;

    fn extract(&self, sheets: &[LoadedSheet]) -> DescriptionMap {
        let mut descriptions = DescriptionMap::new();

        for sheet in sheets {
            for (_row_number, row) in sheet.data_rows(self.layout.header_rows) {
                // 列数不足的行静默跳过
                let (Some(id), Some(description)) = (
                    row.get(self.layout.id_column),
                    row.get(self.layout.description_column),
                ) else {
                    continue;
                };
                descriptions.insert(id.clone(), description.clone());
            }
        }

        descriptions
    }
}

// ==========================================
// PriceExtractor - 商品价格
// ==========================================
// 多个价格文件按加载顺序覆盖,最后一个文件中的价格生效
pub struct PriceExtractor<'a> {
    layout: &'a PriceLayout,
}

impl<'a> PriceExtractor<'a> {
    pub fn new(layout: &'a PriceLayout) -> Self {
        Self { layout }
    }
}

impl LookupExtractor for PriceExtractor<'_> {
    type Output = PriceMap;

    fn extract(&self, sheets: &[LoadedSheet]) -> PriceMap {
        let mut prices = PriceMap::new();

        for sheet in sheets {
            for (_row_number, row) in sheet.data_rows(self.layout.header_rows) {
                let (Some(id), Some(price)) = (
                    row.get(self.layout.id_column),
                    row.get(self.layout.price_column),
                ) else {
                    continue;
                };
                prices.insert(id.clone(), price.clone());
            }
        }

        prices
    }
}

// ==========================================
// ExclusionExtractor - 排除清单
// ==========================================
pub struct ExclusionExtractor<'a> {
    layout: &'a ExclusionLayout,
}

impl<'a> ExclusionExtractor<'a> {
    pub fn new(layout: &'a ExclusionLayout) -> Self {
        Self { layout }
    }
}

impl LookupExtractor for ExclusionExtractor<'_> {
    type Output = ExclusionSet;

    fn extract(&self, sheets: &[LoadedSheet]) -> ExclusionSet {
        sheets
            .iter()
            .flat_map(|sheet| sheet.data_rows(self.layout.header_rows))
            .filter_map(|(_row_number, row)| row.get(self.layout.id_column).cloned())
            .collect()
    }
}

// ==========================================
// 构建全部查找表
// ==========================================
#[instrument(skip_all)]
pub fn build_lookup_tables(sources: &SourceSet, layout: &ColumnLayout) -> LookupTables {
    let media = MediaExtractor::new(&layout.media).extract(&sources.media);
    let descriptions = BasicInfoExtractor::new(&layout.basic_info).extract(&sources.basic_info);
    let prices = PriceExtractor::new(&layout.price).extract(&sources.price);
    let excluded = ExclusionExtractor::new(&layout.exclusion).extract(&sources.exclusion);

    let tables = LookupTables::new(media, descriptions, prices, excluded);
    let sizes = tables.sizes();
    info!(
        image_products = sizes.image_products,
        color_products = sizes.color_products,
        descriptions = sizes.descriptions,
        prices = sizes.prices,
        excluded = sizes.excluded,
        "查找表构建完成"
    );
    tables
}
