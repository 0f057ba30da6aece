// ==========================================
// 商品目录迁移工具 - 输出文件写出器
// ==========================================
// 支持: Excel (.xlsx) / CSV (.csv)
// 说明: 先写入同目录临时文件,成功后再替换目标文件
// ==========================================

use crate::exporter::error::{ExportError, ExportResult};
use crate::exporter::output_sheet::{CellValue, OutputSheet};
use csv::WriterBuilder;
use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// ==========================================
// SheetFileWriter Trait
// ==========================================
// 用途: 将内存工作表写出为文件
// 实现者: XlsxSheetWriter, CsvSheetWriter, UniversalSheetWriter
pub trait SheetFileWriter: Send + Sync {
    fn write(&self, sheet: &OutputSheet, path: &Path) -> ExportResult<()>;
}

// ==========================================
// Excel Writer 实现
// ==========================================
pub struct XlsxSheetWriter;

impl SheetFileWriter for XlsxSheetWriter {
    fn write(&self, sheet: &OutputSheet, path: &Path) -> ExportResult<()> {
        let to_error = |e: rust_xlsxwriter::XlsxError| ExportError::WorkbookWriteError {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name()).map_err(to_error)?;

        for (address, value) in sheet.cells() {
            match value {
                CellValue::Text(text) => {
                    worksheet
                        .write_string(address.row_index(), address.column, text.as_str())
                        .map_err(to_error)?;
                }
                CellValue::Integer(n) => {
                    worksheet
                        .write_number(address.row_index(), address.column, *n as f64)
                        .map_err(to_error)?;
                }
            }
        }

        workbook.save(path).map_err(to_error)?;
        Ok(())
    }
}

// ==========================================
// CSV Writer 实现
// ==========================================
// 按已用区域写出稠密网格,空单元格为空字符串
pub struct CsvSheetWriter;

impl SheetFileWriter for CsvSheetWriter {
    fn write(&self, sheet: &OutputSheet, path: &Path) -> ExportResult<()> {
        let to_error = |e: csv::Error| ExportError::CsvWriteError {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        let mut writer = WriterBuilder::new().from_path(path).map_err(to_error)?;

        if let Some(max_column) = sheet.max_column() {
            let width = max_column as usize + 1;
            for row in 1..=sheet.max_row() {
                let mut record = vec![String::new(); width];
                for (address, value) in sheet.row_cells(row) {
                    record[address.column as usize] = value.to_string();
                }
                writer.write_record(&record).map_err(to_error)?;
            }
        }

        writer.flush().map_err(|e| ExportError::CsvWriteError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

// ==========================================
// 通用写出器（根据扩展名自动选择）
// ==========================================
pub struct UniversalSheetWriter;

impl UniversalSheetWriter {
    /// 临时文件路径: 与目标同目录, ".<文件名>.partial"
    fn partial_path(path: &Path) -> PathBuf {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "output".to_string());
        path.with_file_name(format!(".{}.partial", file_name))
    }
}

impl SheetFileWriter for UniversalSheetWriter {
    fn write(&self, sheet: &OutputSheet, path: &Path) -> ExportResult<()> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let writer: Box<dyn SheetFileWriter> = match ext.as_str() {
            "xlsx" => Box::new(XlsxSheetWriter),
            "csv" => Box::new(CsvSheetWriter),
            _ => return Err(ExportError::UnsupportedFormat(ext)),
        };

        let partial = Self::partial_path(path);
        debug!(partial = %partial.display(), "写入临时文件");

        if let Err(e) = writer.write(sheet, &partial) {
            let _ = fs::remove_file(&partial);
            return Err(e);
        }

        fs::rename(&partial, path).map_err(|e| ExportError::FileWriteError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        info!(
            path = %path.display(),
            cells = sheet.len(),
            rows = sheet.max_row(),
            "输出文件已写出"
        );
        Ok(())
    }
}
