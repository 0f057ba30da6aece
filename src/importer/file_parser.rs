// ==========================================
// 商品目录迁移工具 - 表格读取器实现
// ==========================================
// 支持: Excel (.xlsx/.xlsm/.xls/.xlsb/.ods) / CSV (.csv)
// 输出: 按工作表绝对行位置排列的字符串行
// 说明: 列解析依赖固定列位置,行/列位置不得偏移
// ==========================================

use crate::domain::types::SheetSelector;
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Data, Range, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

/// 一行单元格文本（末尾空单元格已去除）
pub type SheetRow = Vec<String>;

// ==========================================
// SheetReader Trait
// ==========================================
// 用途: 表格读取接口
// 实现者: ExcelSheetReader, CsvSheetReader, UniversalSheetReader
pub trait SheetReader: Send + Sync {
    /// 读取指定工作表的全部行
    ///
    /// # 参数
    /// - path: 文件路径
    /// - sheet: 工作表选择（CSV 只有一个工作表,忽略此参数）
    ///
    /// # 返回
    /// - Ok(Vec<SheetRow>): 第 i 个元素对应工作表第 i+1 行
    /// - Err: 文件打开失败、工作表不存在、行读取失败
    fn read_sheet(&self, path: &Path, sheet: &SheetSelector) -> ImportResult<Vec<SheetRow>>;
}

/// 去除行尾空单元格,使行长度等于最后一个非空单元格的位置
fn trim_trailing_empty(row: &mut SheetRow) {
    while row.last().is_some_and(|cell| cell.is_empty()) {
        row.pop();
    }
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

// ==========================================
// CSV Reader 实现
// ==========================================
pub struct CsvSheetReader;

impl SheetReader for CsvSheetReader {
    fn read_sheet(&self, path: &Path, _sheet: &SheetSelector) -> ImportResult<Vec<SheetRow>> {
        ensure_exists(path)?;

        let file = File::open(path).map_err(|e| ImportError::FileOpenError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        // 无表头,允许行长度不一致
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let record = result.map_err(|e| ImportError::RowReadError {
                path: path.display().to_string(),
                row: row_idx + 1,
                message: e.to_string(),
            })?;

            let mut row: SheetRow = record.iter().map(str::to_string).collect();
            trim_trailing_empty(&mut row);
            rows.push(row);
        }

        Ok(rows)
    }
}

// ==========================================
// Excel Reader 实现
// ==========================================
pub struct ExcelSheetReader;

impl ExcelSheetReader {
    /// 将已用区域还原到工作表绝对位置
    ///
    /// calamine 的 Range 从第一个非空单元格开始,
    /// 这里补齐前导空行/空列,保证列号与表格列字母一致
    fn range_to_rows(range: &Range<Data>) -> Vec<SheetRow> {
        let Some((start_row, start_col)) = range.start() else {
            return Vec::new();
        };

        let mut rows: Vec<SheetRow> = vec![Vec::new(); start_row as usize];
        for cells in range.rows() {
            let mut row: SheetRow = vec![String::new(); start_col as usize];
            row.extend(cells.iter().map(|cell| cell.to_string()));
            trim_trailing_empty(&mut row);
            rows.push(row);
        }
        rows
    }
}

impl SheetReader for ExcelSheetReader {
    fn read_sheet(&self, path: &Path, sheet: &SheetSelector) -> ImportResult<Vec<SheetRow>> {
        ensure_exists(path)?;

        let mut workbook = open_workbook_auto(path).map_err(|e| ImportError::FileOpenError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let sheet_names = workbook.sheet_names();
        let sheet_name = match sheet {
            SheetSelector::First => sheet_names.first().cloned(),
            SheetSelector::Named(name) => sheet_names.iter().find(|n| *n == name).cloned(),
        }
        .ok_or_else(|| ImportError::SheetNotFound {
            path: path.display().to_string(),
            sheet: sheet.to_string(),
        })?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::SheetReadError {
                path: path.display().to_string(),
                sheet: sheet_name.clone(),
                message: e.to_string(),
            })?;

        Ok(Self::range_to_rows(&range))
    }
}

// ==========================================
// 通用表格读取器（根据扩展名自动选择）
// ==========================================
pub struct UniversalSheetReader;

impl SheetReader for UniversalSheetReader {
    fn read_sheet(&self, path: &Path, sheet: &SheetSelector) -> ImportResult<Vec<SheetRow>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvSheetReader.read_sheet(path, sheet),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => ExcelSheetReader.read_sheet(path, sheet),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(lines: &[&str]) -> NamedTempFile {
        let mut temp_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_csv_reader_keeps_positions_and_trims_tail() {
        let temp_file = csv_file(&["P1,a,,b,,", ",,", "P2"]);

        let rows = CsvSheetReader
            .read_sheet(temp_file.path(), &SheetSelector::First)
            .unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["P1", "a", "", "b"]);
        assert!(rows[1].is_empty());
        assert_eq!(rows[2], vec!["P2"]);
    }

    #[test]
    fn test_csv_reader_file_not_found() {
        let result = CsvSheetReader.read_sheet(Path::new("non_existent.csv"), &SheetSelector::First);
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_universal_reader_unsupported_format() {
        let temp_file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        let result = UniversalSheetReader.read_sheet(temp_file.path(), &SheetSelector::First);
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "txt"));
    }

    #[test]
    fn test_excel_reader_pads_leading_rows_and_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("price.xlsx");

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Sheet").unwrap();
        worksheet.write_string(2, 1, "P1").unwrap();
        worksheet.write_number(2, 3, 5).unwrap();
        worksheet.write_string(3, 2, "x").unwrap();
        workbook.save(&path).unwrap();

        let rows = UniversalSheetReader
            .read_sheet(&path, &SheetSelector::named("Sheet"))
            .unwrap();

        assert_eq!(rows.len(), 4);
        assert!(rows[0].is_empty());
        assert!(rows[1].is_empty());
        assert_eq!(rows[2], vec!["", "P1", "", "5"]);
        assert_eq!(rows[3], vec!["", "", "x"]);
    }

    #[test]
    fn test_excel_reader_sheet_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.xlsx");

        let mut workbook = Workbook::new();
        workbook.add_worksheet().set_name("Other").unwrap();
        workbook.save(&path).unwrap();

        let result = ExcelSheetReader.read_sheet(&path, &SheetSelector::named("Sheet1"));
        assert!(matches!(
            result,
            Err(ImportError::SheetNotFound { sheet, .. }) if sheet == "Sheet1"
        ));

        // 未指定名称时取第一个工作表
        let rows = ExcelSheetReader
            .read_sheet(&path, &SheetSelector::First)
            .unwrap();
        assert!(rows.is_empty());
    }
}
