// ==========================================
// 商品目录迁移工具 - 单元格地址
// ==========================================
// 格式: A1 记法（列字母 + 1 起始行号）, 如 "AW12"
// 范围: 列 A..XFD, 行 1..=1048576
// ==========================================

use crate::exporter::error::{ExportError, ExportResult};
use std::fmt;
use std::str::FromStr;

const MAX_COLUMN_INDEX: u32 = 16_383; // XFD
const MAX_ROW: u32 = 1_048_576;

/// 列字母 → 0 起始列号（"A" → 0, "AA" → 26）
///
/// 不用 rust_xlsxwriter::utility::column_name_to_number: 它不校验字符与 XFD 上限
pub fn column_index(letters: &str) -> ExportResult<u16> {
    let trimmed = letters.trim();
    if trimmed.is_empty() || trimmed.len() > 3 {
        return Err(ExportError::InvalidColumn(letters.to_string()));
    }

    let mut acc: u32 = 0;
    for ch in trimmed.chars() {
        let upper = ch.to_ascii_uppercase();
        if !upper.is_ascii_uppercase() {
            return Err(ExportError::InvalidColumn(letters.to_string()));
        }
        acc = acc * 26 + (upper as u32 - 'A' as u32 + 1);
    }

    let index = acc - 1;
    if index > MAX_COLUMN_INDEX {
        return Err(ExportError::InvalidColumn(letters.to_string()));
    }
    Ok(index as u16)
}

/// 0 起始列号 → 列字母
pub fn column_letters(index: u16) -> String {
    let mut n = index as u32 + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push((b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    letters.iter().rev().collect()
}

// ==========================================
// CellAddress
// ==========================================
// 字段顺序决定排序: 先行后列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    pub row: u32,    // 1 起始
    pub column: u16, // 0 起始
}

impl CellAddress {
    pub fn new(row: u32, column: u16) -> ExportResult<Self> {
        if row == 0 || row > MAX_ROW || column as u32 > MAX_COLUMN_INDEX {
            return Err(ExportError::InvalidCellAddress(format!(
                "{}{}",
                column_letters(column),
                row
            )));
        }
        Ok(Self { row, column })
    }

    /// 0 起始行号（写出 xlsx 时使用）
    pub fn row_index(&self) -> u32 {
        self.row - 1
    }
}

impl FromStr for CellAddress {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| ExportError::InvalidCellAddress(s.to_string()))?;
        let (letters, digits) = trimmed.split_at(split);

        let column =
            column_index(letters).map_err(|_| ExportError::InvalidCellAddress(s.to_string()))?;
        let row = digits
            .parse::<u32>()
            .map_err(|_| ExportError::InvalidCellAddress(s.to_string()))?;

        Self::new(row, column).map_err(|_| ExportError::InvalidCellAddress(s.to_string()))
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.column), self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A").unwrap(), 0);
        assert_eq!(column_index("Z").unwrap(), 25);
        assert_eq!(column_index("AA").unwrap(), 26);
        assert_eq!(column_index("AW").unwrap(), 48);
        assert_eq!(column_index("BA").unwrap(), 52);
        assert_eq!(column_index("ad").unwrap(), 29);
        assert_eq!(column_index("XFD").unwrap(), 16_383);
    }

    #[test]
    fn test_column_index_invalid() {
        assert!(column_index("").is_err());
        assert!(column_index("A1").is_err());
        assert!(column_index("XFE").is_err());
        assert!(column_index("ABCD").is_err());
    }

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(25), "Z");
        assert_eq!(column_letters(26), "AA");
        assert_eq!(column_letters(39), "AN");
        assert_eq!(column_letters(16_383), "XFD");
    }

    #[test]
    fn test_parse_address() {
        let address: CellAddress = "AW12".parse().unwrap();
        assert_eq!(address.row, 12);
        assert_eq!(address.column, 48);
        assert_eq!(address.row_index(), 11);
        assert_eq!(address.to_string(), "AW12");
    }

    #[test]
    fn test_row_zero_is_rejected() {
        assert!("C0".parse::<CellAddress>().is_err());
        assert!(CellAddress::new(0, 2).is_err());
        assert!("12".parse::<CellAddress>().is_err());
        assert!("AW".parse::<CellAddress>().is_err());
    }

    #[test]
    fn test_ordering_is_row_major() {
        let a1: CellAddress = "B1".parse().unwrap();
        let z1: CellAddress = "Z1".parse().unwrap();
        let a2: CellAddress = "A2".parse().unwrap();
        assert!(a1 < z1);
        assert!(z1 < a2);
    }
}
