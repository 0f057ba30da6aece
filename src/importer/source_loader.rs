// ==========================================
// 商品目录迁移工具 - 数据源加载
// ==========================================
// 职责: 按类型打开全部输入文件,读取为内存行
// 顺序: 排除清单 → 销售 → 媒体 → 基础信息 → 价格
// 红线: 任一文件失败立即终止,不做部分加载
// ==========================================

use crate::config::{ColumnLayout, SourceFiles};
use crate::domain::types::SourceKind;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::{SheetReader, SheetRow};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// ==========================================
// LoadedSheet - 已读取的单个数据源
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSheet {
    pub kind: SourceKind,
    pub path: PathBuf,
    pub rows: Vec<SheetRow>,
}

impl LoadedSheet {
    pub fn new(kind: SourceKind, path: impl Into<PathBuf>, rows: Vec<SheetRow>) -> Self {
        Self {
            kind,
            path: path.into(),
            rows,
        }
    }

    /// 数据源名称（用于错误信息）
    pub fn source_name(&self) -> String {
        self.path.display().to_string()
    }

    /// 跳过表头后的数据行,附带 1 起始的工作表行号
    ///
    /// 表头行数按单个数据源计算,每个文件独立跳过
    pub fn data_rows(&self, header_rows: usize) -> impl Iterator<Item = (usize, &SheetRow)> {
        self.rows
            .iter()
            .enumerate()
            .skip(header_rows)
            .map(|(idx, row)| (idx + 1, row))
    }
}

// ==========================================
// SourceSet - 全部已加载数据源
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSet {
    pub exclusion: Vec<LoadedSheet>,
    pub sales: Vec<LoadedSheet>,
    pub media: Vec<LoadedSheet>,
    pub basic_info: Vec<LoadedSheet>,
    pub price: Vec<LoadedSheet>,
}

impl SourceSet {
    /// 通过读取器加载全部输入文件
    ///
    /// # 参数
    /// - reader: 表格读取器
    /// - files: 各类型输入文件列表（保持给定顺序）
    /// - layout: 列布局（提供各类型的工作表选择）
    pub fn load(
        reader: &dyn SheetReader,
        files: &SourceFiles,
        layout: &ColumnLayout,
    ) -> ImportResult<Self> {
        let mut set = SourceSet::default();

        for kind in SourceKind::ALL {
            let sheet = layout.sheet_for(kind);
            for path in files.files(kind) {
                let rows = reader.read_sheet(path, sheet)?;
                debug!(kind = %kind, path = %path.display(), rows = rows.len(), "数据源已读取");
                set.push(LoadedSheet::new(kind, path.as_path(), rows));
            }
        }

        info!(
            exclusion = set.exclusion.len(),
            sales = set.sales.len(),
            media = set.media.len(),
            basic_info = set.basic_info.len(),
            price = set.price.len(),
            "数据源加载完成"
        );
        Ok(set)
    }

    /// 追加一个数据源（按其类型归类）
    pub fn push(&mut self, sheet: LoadedSheet) {
        match sheet.kind {
            SourceKind::Exclusion => self.exclusion.push(sheet),
            SourceKind::Sales => self.sales.push(sheet),
            SourceKind::Media => self.media.push(sheet),
            SourceKind::BasicInfo => self.basic_info.push(sheet),
            SourceKind::Price => self.price.push(sheet),
        }
    }

    /// 由内存行直接构造数据源（无需文件）
    pub fn with_rows(mut self, kind: SourceKind, name: impl AsRef<Path>, rows: Vec<SheetRow>) -> Self {
        self.push(LoadedSheet::new(kind, name.as_ref(), rows));
        self
    }

    pub fn sheets(&self, kind: SourceKind) -> &[LoadedSheet] {
        match kind {
            SourceKind::Exclusion => &self.exclusion,
            SourceKind::Sales => &self.sales,
            SourceKind::Media => &self.media,
            SourceKind::BasicInfo => &self.basic_info,
            SourceKind::Price => &self.price,
        }
    }

    /// 各类型文件数量
    pub fn file_counts(&self) -> BTreeMap<SourceKind, usize> {
        SourceKind::ALL
            .iter()
            .map(|kind| (*kind, self.sheets(*kind).len()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::SheetSelector;
    use crate::importer::error::ImportError;
    use std::sync::Mutex;

    /// 记录读取请求的内存读取器
    struct RecordingReader {
        calls: Mutex<Vec<(PathBuf, SheetSelector)>>,
    }

    impl SheetReader for RecordingReader {
        fn read_sheet(&self, path: &Path, sheet: &SheetSelector) -> ImportResult<Vec<SheetRow>> {
            if path.ends_with("missing.xlsx") {
                return Err(ImportError::FileNotFound(path.display().to_string()));
            }
            self.calls
                .lock()
                .unwrap()
                .push((path.to_path_buf(), sheet.clone()));
            Ok(vec![vec![path.display().to_string()]])
        }
    }

    fn row(cells: &[&str]) -> SheetRow {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_load_order_and_sheet_selection() {
        let reader = RecordingReader {
            calls: Mutex::new(Vec::new()),
        };
        let files = SourceFiles {
            exclude: vec!["ex.xlsx".into()],
            sales: vec!["s1.xlsx".into(), "s2.xlsx".into()],
            media: vec!["m.xlsx".into()],
            basic_info: vec!["b.xlsx".into()],
            price: vec!["p1.xlsx".into(), "p2.xlsx".into()],
        };

        let set = SourceSet::load(&reader, &files, &ColumnLayout::default()).unwrap();

        let calls = reader.calls.lock().unwrap();
        let paths: Vec<String> = calls.iter().map(|(p, _)| p.display().to_string()).collect();
        assert_eq!(
            paths,
            vec!["ex.xlsx", "s1.xlsx", "s2.xlsx", "m.xlsx", "b.xlsx", "p1.xlsx", "p2.xlsx"]
        );
        assert_eq!(calls[0].1, SheetSelector::First);
        assert_eq!(calls[1].1, SheetSelector::named("Sheet1"));
        assert_eq!(calls[6].1, SheetSelector::named("Sheet"));

        assert_eq!(set.sales.len(), 2);
        assert_eq!(set.price[1].source_name(), "p2.xlsx");
        assert_eq!(set.file_counts()[&SourceKind::Price], 2);
        assert_eq!(set.file_counts()[&SourceKind::Media], 1);
    }

    #[test]
    fn test_load_fails_fast() {
        let reader = RecordingReader {
            calls: Mutex::new(Vec::new()),
        };
        let files = SourceFiles {
            sales: vec!["missing.xlsx".into(), "s2.xlsx".into()],
            ..SourceFiles::default()
        };

        let result = SourceSet::load(&reader, &files, &ColumnLayout::default());
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
        assert!(reader.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_data_rows_skip_header_with_sheet_row_numbers() {
        let sheet = LoadedSheet::new(
            SourceKind::Sales,
            "sales.xlsx",
            vec![row(&["h1"]), row(&["h2"]), row(&["P1"]), row(&["P2"])],
        );

        let rows: Vec<(usize, String)> = sheet
            .data_rows(2)
            .map(|(n, r)| (n, r[0].clone()))
            .collect();
        assert_eq!(rows, vec![(3, "P1".to_string()), (4, "P2".to_string())]);
    }
}
