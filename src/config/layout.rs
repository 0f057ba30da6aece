// ==========================================
// 商品目录迁移工具 - 列布局配置
// ==========================================
// 职责: 以声明式结构描述各数据源的固定列位置与输出列映射
// 默认值: 供应商导出表与平台批量上架模板的现行格式
// 说明: 源表格式变化时只需调整此处（或配置文件中的 layout 节）
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::types::{SheetSelector, SourceKind};
use crate::exporter::cell_address::column_index;
use serde::{Deserialize, Serialize};

// ==========================================
// 排除清单布局
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionLayout {
    pub sheet: SheetSelector,
    pub header_rows: usize,
    pub id_column: usize,
}

impl Default for ExclusionLayout {
    fn default() -> Self {
        Self {
            sheet: SheetSelector::First,
            header_rows: 0,
            id_column: 0,
        }
    }
}

// ==========================================
// 销售信息布局
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesLayout {
    pub sheet: SheetSelector,
    pub header_rows: usize,
    pub id_column: usize,
    pub name_columns: Vec<usize>, // 按顺序拼接为商品名称
    pub name_separator: String,
    pub quantity_column: usize,
}

impl SalesLayout {
    /// 构建商品记录所需的最小列数
    pub fn required_width(&self) -> usize {
        self.name_columns
            .iter()
            .copied()
            .chain([self.id_column, self.quantity_column])
            .max()
            .map(|max| max + 1)
            .unwrap_or(0)
    }
}

impl Default for SalesLayout {
    fn default() -> Self {
        Self {
            sheet: SheetSelector::named("Sheet1"),
            header_rows: 4,
            id_column: 0,
            name_columns: vec![1, 3],
            name_separator: " ".to_string(),
            quantity_column: 7,
        }
    }
}

// ==========================================
// 媒体信息布局
// ==========================================
// 图片区: 固定列（D..M）
// 颜色区: 从 variant_first_column 起每 variant_stride 列一组,
//         组内第 1 列为颜色标识、第 2 列为款式图片,遇空颜色标识终止
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaLayout {
    pub sheet: SheetSelector,
    pub header_rows: usize,
    pub id_column: usize,
    pub image_columns: Vec<usize>,
    pub variant_first_column: usize,
    pub variant_end_column: usize, // 不含
    pub variant_stride: usize,
}

impl Default for MediaLayout {
    fn default() -> Self {
        Self {
            sheet: SheetSelector::named("Sheet1"),
            header_rows: 5,
            id_column: 0,
            image_columns: (4..=12).collect(),
            variant_first_column: 15,
            variant_end_column: 60,
            variant_stride: 2,
        }
    }
}

// ==========================================
// 基础信息布局
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicInfoLayout {
    pub sheet: SheetSelector,
    pub header_rows: usize,
    pub id_column: usize,
    pub description_column: usize,
}

impl Default for BasicInfoLayout {
    fn default() -> Self {
        Self {
            sheet: SheetSelector::named("Sheet1"),
            header_rows: 0,
            id_column: 0,
            description_column: 3,
        }
    }
}

// ==========================================
// 价格信息布局
// ==========================================
// 注意: 价格表的工作表名为 "Sheet" 而非 "Sheet1"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceLayout {
    pub sheet: SheetSelector,
    pub header_rows: usize,
    pub id_column: usize,
    pub price_column: usize,
}

impl Default for PriceLayout {
    fn default() -> Self {
        Self {
            sheet: SheetSelector::named("Sheet"),
            header_rows: 0,
            id_column: 0,
            price_column: 7,
        }
    }
}

// ==========================================
// 输出布局（平台批量上架模板）
// ==========================================

/// 每行固定写入的常量单元格
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralCell {
    pub column: String,
    pub value: String,
}

impl LiteralCell {
    pub fn new(column: &str, value: &str) -> Self {
        Self {
            column: column.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputLayout {
    pub sheet_name: String,
    pub first_row: u32,   // 1 起始
    pub first_group: i64, // 分组序号起始值
    pub group_column: String,
    pub name_column: String,
    pub image_columns: Vec<String>,
    pub description_column: String,
    pub quantity_column: String,
    pub price_column: String,
    pub color_id_column: String,
    pub color_image_column: String,
    pub literals: Vec<LiteralCell>,
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
            first_row: 1,
            first_group: 0,
            group_column: "A".to_string(),
            name_column: "C".to_string(),
            image_columns: ["D", "E", "F", "G", "H", "I", "J", "K", "L"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            description_column: "X".to_string(),
            quantity_column: "AW".to_string(),
            price_column: "BA".to_string(),
            color_id_column: "AI".to_string(),
            color_image_column: "AN".to_string(),
            literals: vec![
                LiteralCell::new("Q", "No brand/DD good"),
                LiteralCell::new("AD", "0.5"),
                LiteralCell::new("AE", "20"),
                LiteralCell::new("AF", "25"),
                LiteralCell::new("AG", "2"),
            ],
        }
    }
}

impl OutputLayout {
    /// 全部输出列（字段名, 列字母）
    fn named_columns(&self) -> Vec<(String, &str)> {
        let mut columns = vec![
            ("output.group_column".to_string(), self.group_column.as_str()),
            ("output.name_column".to_string(), self.name_column.as_str()),
            (
                "output.description_column".to_string(),
                self.description_column.as_str(),
            ),
            (
                "output.quantity_column".to_string(),
                self.quantity_column.as_str(),
            ),
            ("output.price_column".to_string(), self.price_column.as_str()),
            (
                "output.color_id_column".to_string(),
                self.color_id_column.as_str(),
            ),
            (
                "output.color_image_column".to_string(),
                self.color_image_column.as_str(),
            ),
        ];
        for (idx, column) in self.image_columns.iter().enumerate() {
            columns.push((format!("output.image_columns[{}]", idx), column.as_str()));
        }
        for (idx, literal) in self.literals.iter().enumerate() {
            columns.push((format!("output.literals[{}]", idx), literal.column.as_str()));
        }
        columns
    }
}

// ==========================================
// ColumnLayout - 全部布局
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub exclusion: ExclusionLayout,
    pub sales: SalesLayout,
    pub media: MediaLayout,
    pub basic_info: BasicInfoLayout,
    pub price: PriceLayout,
    pub output: OutputLayout,
}

impl ColumnLayout {
    /// 各数据源类型对应的工作表
    pub fn sheet_for(&self, kind: SourceKind) -> &SheetSelector {
        match kind {
            SourceKind::Exclusion => &self.exclusion.sheet,
            SourceKind::Sales => &self.sales.sheet,
            SourceKind::Media => &self.media.sheet,
            SourceKind::BasicInfo => &self.basic_info.sheet,
            SourceKind::Price => &self.price.sheet,
        }
    }

    /// 校验布局
    ///
    /// # 规则
    /// - 输出列字母均可解析
    /// - 输出起始行 >= 1
    /// - 商品名称列、图片列非空
    /// - 媒体图片列数不超过输出图片列数（否则图片会被截断）
    /// - 颜色区步长 >= 2（颜色标识与款式图片不得重叠）
    pub fn validate(&self) -> ConfigResult<()> {
        for (field, column) in self.output.named_columns() {
            column_index(column).map_err(|e| ConfigError::InvalidLayout {
                field,
                message: e.to_string(),
            })?;
        }

        if self.output.first_row == 0 {
            return Err(invalid("output.first_row", "行号从 1 开始"));
        }
        if self.sales.name_columns.is_empty() {
            return Err(invalid("sales.name_columns", "至少需要一列"));
        }
        if self.media.image_columns.is_empty() {
            return Err(invalid("media.image_columns", "至少需要一列"));
        }
        if self.media.image_columns.len() > self.output.image_columns.len() {
            return Err(invalid(
                "output.image_columns",
                &format!(
                    "输出图片列 {} 个，少于媒体图片列 {} 个",
                    self.output.image_columns.len(),
                    self.media.image_columns.len()
                ),
            ));
        }
        if self.media.variant_stride < 2 {
            return Err(invalid("media.variant_stride", "步长至少为 2"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::InvalidLayout {
        field: field.to_string(),
        message: message.to_string(),
    }
}
