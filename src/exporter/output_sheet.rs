// ==========================================
// 商品目录迁移工具 - 输出工作表（内存）
// ==========================================
// 职责: 接收 "单元格地址 → 值" 写入,按行列有序保存
// ==========================================

use crate::exporter::cell_address::CellAddress;
use crate::exporter::error::ExportResult;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

// ==========================================
// CellValue - 单元格值
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CellValue {
    Text(String),
    Integer(i64), // 分组序号按数值写出
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(text) => write!(f, "{}", text),
            CellValue::Integer(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

// ==========================================
// CellSink Trait
// ==========================================
// 用途: 表格写入接口（按单元格地址写值）
// 实现者: OutputSheet
pub trait CellSink {
    /// 写入单元格,同一地址重复写入以最后一次为准
    fn set_cell(&mut self, address: CellAddress, value: CellValue) -> ExportResult<()>;
}

// ==========================================
// OutputSheet - 稀疏工作表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputSheet {
    name: String,
    cells: BTreeMap<CellAddress, CellValue>,
}

impl OutputSheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, address: &CellAddress) -> Option<&CellValue> {
        self.cells.get(address)
    }

    /// 按 A1 地址读取单元格文本（地址无效或为空时返回 None）
    pub fn text_at(&self, address: &str) -> Option<String> {
        let address: CellAddress = address.parse().ok()?;
        self.cells.get(&address).map(|v| v.to_string())
    }

    /// 全部单元格（先行后列）
    pub fn cells(&self) -> impl Iterator<Item = (&CellAddress, &CellValue)> {
        self.cells.iter()
    }

    /// 指定行的单元格（按列有序）
    pub fn row_cells(&self, row: u32) -> impl Iterator<Item = (&CellAddress, &CellValue)> {
        let start = CellAddress { row, column: 0 };
        let end = CellAddress {
            row,
            column: u16::MAX,
        };
        self.cells.range(start..=end)
    }

    /// 最大已用行号（1 起始,空表为 0）
    pub fn max_row(&self) -> u32 {
        self.cells.keys().next_back().map(|a| a.row).unwrap_or(0)
    }

    /// 最大已用列号（0 起始）
    pub fn max_column(&self) -> Option<u16> {
        self.cells.keys().map(|a| a.column).max()
    }
}

impl CellSink for OutputSheet {
    fn set_cell(&mut self, address: CellAddress, value: CellValue) -> ExportResult<()> {
        self.cells.insert(address, value);
        Ok(())
    }
}
