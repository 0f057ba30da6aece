// ==========================================
// 商品目录迁移工具 - 商品合并
// ==========================================
// 职责: 遍历销售数据源,结合查找表构建输出商品记录
// 规则:
// - 每个销售文件独立跳过表头
// - 商品编号首次出现时构建记录,后续重复行不做任何修改（跨文件同样适用）
// - 命中排除清单的商品不构建记录
// - 输出顺序 = 销售数据源中的首次出现顺序
// ==========================================

use crate::config::SalesLayout;
use crate::domain::lookup::LookupTables;
use crate::domain::product::{OutputRow, ProductId};
use crate::domain::report::MergeStats;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::SheetRow;
use crate::importer::source_loader::LoadedSheet;
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// 合并结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub products: Vec<OutputRow>,
    pub stats: MergeStats,
}

// ==========================================
// ProductMerger
// ==========================================
pub struct ProductMerger<'a> {
    layout: &'a SalesLayout,
    lookups: &'a LookupTables,
}

impl<'a> ProductMerger<'a> {
    pub fn new(layout: &'a SalesLayout, lookups: &'a LookupTables) -> Self {
        Self { layout, lookups }
    }

    /// 执行合并
    ///
    /// # 返回
    /// - Ok(MergeOutcome): 按首次出现顺序排列的商品记录 + 统计
    /// - Err(RowTooShort): 需要构建记录的销售行列数不足
    #[instrument(skip_all, fields(sources = sales.len()))]
    pub fn merge(&self, sales: &[LoadedSheet]) -> ImportResult<MergeOutcome> {
        let mut outcome = MergeOutcome::default();
        let mut seen: HashSet<ProductId> = HashSet::new();

        for sheet in sales {
            for (row_number, row) in sheet.data_rows(self.layout.header_rows) {
                outcome.stats.sales_rows_scanned += 1;

                if row.is_empty() {
                    outcome.stats.empty_rows_skipped += 1;
                    continue;
                }

                let id = self.product_id(sheet, row_number, row)?;

                if seen.contains(id) {
                    outcome.stats.duplicate_rows_skipped += 1;
                    continue;
                }

                if self.lookups.is_excluded(id) {
                    debug!(product_id = %id, row = row_number, "商品在排除清单中，跳过");
                    outcome.stats.excluded_rows_skipped += 1;
                    continue;
                }

                let product = self.build_row(sheet, row_number, row)?;
                seen.insert(product.id.clone());
                outcome.products.push(product);
            }
        }

        outcome.stats.products_created = outcome.products.len();
        info!(
            scanned = outcome.stats.sales_rows_scanned,
            created = outcome.stats.products_created,
            duplicates = outcome.stats.duplicate_rows_skipped,
            excluded = outcome.stats.excluded_rows_skipped,
            "商品合并完成"
        );
        Ok(outcome)
    }

    fn product_id<'r>(
        &self,
        sheet: &LoadedSheet,
        row_number: usize,
        row: &'r SheetRow,
    ) -> ImportResult<&'r String> {
        row.get(self.layout.id_column)
            .ok_or_else(|| ImportError::RowTooShort {
                path: sheet.source_name(),
                row: row_number,
                required: self.layout.id_column + 1,
                actual: row.len(),
            })
    }

    /// 构建商品记录（名称/数量取自销售行,其余取自查找表）
    fn build_row(
        &self,
        sheet: &LoadedSheet,
        row_number: usize,
        row: &SheetRow,
    ) -> ImportResult<OutputRow> {
        let required = self.layout.required_width();
        if row.len() < required {
            return Err(ImportError::RowTooShort {
                path: sheet.source_name(),
                row: row_number,
                required,
                actual: row.len(),
            });
        }

        let id = row[self.layout.id_column].clone();
        let name = self
            .layout
            .name_columns
            .iter()
            .map(|&idx| row[idx].as_str())
            .collect::<Vec<_>>()
            .join(&self.layout.name_separator);

        Ok(OutputRow {
            name,
            description: self.lookups.description_for(&id),
            image_urls: self.lookups.image_urls_for(&id),
            price: self.lookups.price_for(&id),
            quantity: row[self.layout.quantity_column].clone(),
            colors: self.lookups.colors_for(&id),
            id,
        })
    }
}
