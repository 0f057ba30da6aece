// ==========================================
// 商品目录迁移工具 - 输出行展开
// ==========================================
// 职责: 将商品记录按颜色款式展开,写入输出工作表的固定列
// 规则:
// - 每个颜色款式一行,同一商品的各行共享分组序号与非颜色字段
// - 分组序号每个商品递增一次（无颜色款式的商品同样占用序号）
// - 无颜色款式的商品不产生任何行（记录告警）
// ==========================================

use crate::config::OutputLayout;
use crate::domain::product::{OutputRow, VariantColor};
use crate::domain::report::EmitStats;
use crate::exporter::cell_address::{column_index, CellAddress};
use crate::exporter::error::ExportResult;
use crate::exporter::output_sheet::{CellSink, CellValue};
use tracing::{info, instrument, warn};

// ==========================================
// 已解析的输出列（0 起始列号）
// ==========================================
struct OutputColumns {
    group: u16,
    name: u16,
    images: Vec<u16>,
    description: u16,
    quantity: u16,
    price: u16,
    color_id: u16,
    color_image: u16,
    literals: Vec<(u16, String)>,
}

impl OutputColumns {
    fn resolve(layout: &OutputLayout) -> ExportResult<Self> {
        Ok(Self {
            group: column_index(&layout.group_column)?,
            name: column_index(&layout.name_column)?,
            images: layout
                .image_columns
                .iter()
                .map(|c| column_index(c))
                .collect::<ExportResult<Vec<_>>>()?,
            description: column_index(&layout.description_column)?,
            quantity: column_index(&layout.quantity_column)?,
            price: column_index(&layout.price_column)?,
            color_id: column_index(&layout.color_id_column)?,
            color_image: column_index(&layout.color_image_column)?,
            literals: layout
                .literals
                .iter()
                .map(|l| column_index(&l.column).map(|column| (column, l.value.clone())))
                .collect::<ExportResult<Vec<_>>>()?,
        })
    }
}

// ==========================================
// RowEmitter
// ==========================================
pub struct RowEmitter<'a> {
    layout: &'a OutputLayout,
}

impl<'a> RowEmitter<'a> {
    pub fn new(layout: &'a OutputLayout) -> Self {
        Self { layout }
    }

    /// 展开并写入全部商品
    ///
    /// # 参数
    /// - products: 商品记录（按输出顺序）
    /// - sink: 单元格写入目标
    #[instrument(skip_all, fields(products = products.len()))]
    pub fn emit<S: CellSink>(&self, products: &[OutputRow], sink: &mut S) -> ExportResult<EmitStats> {
        let columns = OutputColumns::resolve(self.layout)?;
        let mut stats = EmitStats::default();
        let mut row = self.layout.first_row;
        let mut group = self.layout.first_group;

        for product in products {
            if !product.has_variants() {
                warn!(product_id = %product.id, "商品无颜色款式，不产生输出行");
                stats.products_without_variants.push(product.id.clone());
            }

            for color in &product.colors {
                self.write_row(sink, &columns, row, group, product, color)?;
                row += 1;
            }
            stats.sheet_rows_emitted += product.variant_count();

            group += 1;
            stats.groups_assigned += 1;
        }

        info!(
            rows = stats.sheet_rows_emitted,
            groups = stats.groups_assigned,
            without_variants = stats.products_without_variants.len(),
            "输出行写入完成"
        );
        Ok(stats)
    }

    fn write_row<S: CellSink>(
        &self,
        sink: &mut S,
        columns: &OutputColumns,
        row: u32,
        group: i64,
        product: &OutputRow,
        color: &VariantColor,
    ) -> ExportResult<()> {
        let mut put = |column: u16, value: CellValue| -> ExportResult<()> {
            sink.set_cell(CellAddress::new(row, column)?, value)
        };

        put(columns.group, CellValue::Integer(group))?;
        put(columns.name, product.name.as_str().into())?;

        // 图片数超过输出列时截断
        for (column, url) in columns.images.iter().zip(&product.image_urls) {
            put(*column, url.as_str().into())?;
        }

        put(columns.description, product.description.as_str().into())?;
        for (column, value) in &columns.literals {
            put(*column, value.as_str().into())?;
        }
        put(columns.quantity, product.quantity.as_str().into())?;
        put(columns.price, product.price.as_str().into())?;
        put(columns.color_id, color.color_id.as_str().into())?;
        put(columns.color_image, color.image_url.as_str().into())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exporter::output_sheet::OutputSheet;

    fn product(id: &str, colors: Vec<VariantColor>) -> OutputRow {
        OutputRow {
            id: id.to_string(),
            name: format!("{} name", id),
            description: format!("{} desc", id),
            image_urls: (0..9).map(|i| format!("{}-img{}", id, i)).collect(),
            price: "99".to_string(),
            quantity: "3".to_string(),
            colors,
        }
    }

    #[test]
    fn test_emit_one_row_per_variant_with_shared_group() {
        let layout = OutputLayout::default();
        let mut sheet = OutputSheet::new("Sheet1");
        let products = vec![
            product(
                "P1",
                vec![VariantColor::new("red", "red.jpg"), VariantColor::new("blue", "blue.jpg")],
            ),
            product("P2", vec![VariantColor::new("black", "black.jpg")]),
        ];

        let stats = RowEmitter::new(&layout).emit(&products, &mut sheet).unwrap();

        assert_eq!(stats.sheet_rows_emitted, 3);
        assert_eq!(stats.groups_assigned, 2);
        assert_eq!(sheet.max_row(), 3);

        // P1 两行: 分组相同,颜色不同
        for row in [1, 2] {
            assert_eq!(sheet.text_at(&format!("A{}", row)), Some("0".to_string()));
            assert_eq!(sheet.text_at(&format!("C{}", row)), Some("P1 name".to_string()));
            assert_eq!(sheet.text_at(&format!("X{}", row)), Some("P1 desc".to_string()));
        }
        assert_eq!(sheet.text_at("AI1"), Some("red".to_string()));
        assert_eq!(sheet.text_at("AN1"), Some("red.jpg".to_string()));
        assert_eq!(sheet.text_at("AI2"), Some("blue".to_string()));
        assert_eq!(sheet.text_at("AN2"), Some("blue.jpg".to_string()));

        assert_eq!(sheet.text_at("A3"), Some("1".to_string()));
        assert_eq!(sheet.text_at("AI3"), Some("black".to_string()));
    }

    #[test]
    fn test_emit_fixed_column_map() {
        let layout = OutputLayout::default();
        let mut sheet = OutputSheet::new("Sheet1");
        let products = vec![product("P1", vec![VariantColor::new("red", "red.jpg")])];

        RowEmitter::new(&layout).emit(&products, &mut sheet).unwrap();

        assert_eq!(sheet.text_at("D1"), Some("P1-img0".to_string()));
        assert_eq!(sheet.text_at("L1"), Some("P1-img8".to_string()));
        assert_eq!(sheet.text_at("M1"), None);
        assert_eq!(sheet.text_at("Q1"), Some("No brand/DD good".to_string()));
        assert_eq!(sheet.text_at("AD1"), Some("0.5".to_string()));
        assert_eq!(sheet.text_at("AE1"), Some("20".to_string()));
        assert_eq!(sheet.text_at("AF1"), Some("25".to_string()));
        assert_eq!(sheet.text_at("AG1"), Some("2".to_string()));
        assert_eq!(sheet.text_at("AW1"), Some("3".to_string()));
        assert_eq!(sheet.text_at("BA1"), Some("99".to_string()));
        assert_eq!(
            sheet.cell(&"A1".parse().unwrap()),
            Some(&CellValue::Integer(0))
        );
        // 9 图片 + 7 个字段 + 5 个常量
        assert_eq!(sheet.len(), 21);
    }

    #[test]
    fn test_product_without_variants_emits_nothing_but_takes_group() {
        let layout = OutputLayout::default();
        let mut sheet = OutputSheet::new("Sheet1");
        let products = vec![
            product("P1", vec![]),
            product("P2", vec![VariantColor::new("red", "red.jpg")]),
        ];

        let stats = RowEmitter::new(&layout).emit(&products, &mut sheet).unwrap();

        assert_eq!(stats.sheet_rows_emitted, 1);
        assert_eq!(stats.products_without_variants, vec!["P1".to_string()]);
        assert_eq!(sheet.text_at("C1"), Some("P2 name".to_string()));
        assert_eq!(sheet.text_at("A1"), Some("1".to_string()));
    }

    #[test]
    fn test_rows_emitted_equals_total_variant_count() {
        let layout = OutputLayout::default();
        let mut sheet = OutputSheet::new("Sheet1");
        let products = vec![
            product(
                "P1",
                vec![
                    VariantColor::new("red", "red.jpg"),
                    VariantColor::new("blue", "blue.jpg"),
                    VariantColor::new("black", "black.jpg"),
                ],
            ),
            product("P2", vec![]),
            product("P3", vec![VariantColor::new("white", "white.jpg")]),
        ];
        let expected: usize = products.iter().map(|p| p.variant_count()).sum();

        let stats = RowEmitter::new(&layout).emit(&products, &mut sheet).unwrap();

        assert_eq!(expected, 4);
        assert_eq!(stats.sheet_rows_emitted, expected);
        assert_eq!(sheet.max_row(), 4);
        assert_eq!(sheet.text_at("A4"), Some("2".to_string()));
    }

    #[test]
    fn test_short_image_list_leaves_slots_empty() {
        let layout = OutputLayout::default();
        let mut sheet = OutputSheet::new("Sheet1");
        let mut p = product("P1", vec![VariantColor::new("red", "red.jpg")]);
        p.image_urls.truncate(2);

        RowEmitter::new(&layout).emit(&[p], &mut sheet).unwrap();

        assert_eq!(sheet.text_at("E1"), Some("P1-img1".to_string()));
        assert_eq!(sheet.text_at("F1"), None);
    }

    #[test]
    fn test_custom_first_row_and_group() {
        let layout = OutputLayout {
            first_row: 3,
            first_group: 1,
            ..OutputLayout::default()
        };
        let mut sheet = OutputSheet::new("Sheet1");
        let products = vec![product("P1", vec![VariantColor::new("red", "red.jpg")])];

        RowEmitter::new(&layout).emit(&products, &mut sheet).unwrap();

        assert_eq!(sheet.text_at("A3"), Some("1".to_string()));
        assert_eq!(sheet.text_at("A1"), None);
    }
}
