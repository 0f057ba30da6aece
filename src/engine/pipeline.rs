// ==========================================
// 商品目录迁移工具 - 合并管道
// ==========================================
// 流程: 加载数据源 → 构建查找表 → 合并商品 → 展开写入工作表
// 红线:
// - 管道单次使用: run() 消耗自身,不得跨运行复用
// - 任一阶段失败立即终止,不产生输出
// ==========================================

use crate::config::{ColumnLayout, ConfigError, SourceFiles};
use crate::domain::product::OutputRow;
use crate::domain::report::RunReport;
use crate::engine::emitter::RowEmitter;
use crate::engine::extractors::build_lookup_tables;
use crate::engine::merger::ProductMerger;
use crate::exporter::error::ExportError;
use crate::exporter::output_sheet::OutputSheet;
use crate::importer::error::ImportError;
use crate::importer::file_parser::SheetReader;
use crate::importer::source_loader::SourceSet;
use chrono::Utc;
use thiserror::Error;
use tracing::{info, instrument};
use uuid::Uuid;

/// 管道错误（各层错误的汇总）
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// 单次运行的产出
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub sheet: OutputSheet,
    pub products: Vec<OutputRow>,
    pub report: RunReport,
}

// ==========================================
// Pipeline
// ==========================================
pub struct Pipeline {
    layout: ColumnLayout,
    sources: SourceSet,
}

impl Pipeline {
    /// 校验布局并加载全部输入文件
    pub fn load(
        reader: &dyn SheetReader,
        files: &SourceFiles,
        layout: ColumnLayout,
    ) -> PipelineResult<Self> {
        layout.validate()?;
        let sources = SourceSet::load(reader, files, &layout)?;
        Ok(Self { layout, sources })
    }

    /// 由已加载的数据源构造
    pub fn from_sources(layout: ColumnLayout, sources: SourceSet) -> PipelineResult<Self> {
        layout.validate()?;
        Ok(Self { layout, sources })
    }

    /// 执行合并并生成输出工作表
    #[instrument(skip(self), fields(run_id))]
    pub fn run(self) -> PipelineResult<PipelineOutput> {
        let run_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("run_id", run_id.as_str());
        let started_at = Utc::now();
        info!("开始合并");

        let lookups = build_lookup_tables(&self.sources, &self.layout);

        let merged = ProductMerger::new(&self.layout.sales, &lookups).merge(&self.sources.sales)?;

        let mut sheet = OutputSheet::new(self.layout.output.sheet_name.as_str());
        let emit = RowEmitter::new(&self.layout.output).emit(&merged.products, &mut sheet)?;

        let report = RunReport {
            run_id,
            started_at,
            finished_at: Utc::now(),
            source_files: self.sources.file_counts(),
            lookups: lookups.sizes(),
            merge: merged.stats,
            emit,
        };

        info!(
            products = report.merge.products_created,
            rows = report.emit.sheet_rows_emitted,
            elapsed_ms = report.elapsed_ms(),
            "合并完成"
        );

        Ok(PipelineOutput {
            sheet,
            products: merged.products,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::SourceKind;
    use crate::importer::file_parser::SheetRow;

    fn row(cells: &[&str]) -> SheetRow {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn padded(cells: &[&str], width: usize) -> SheetRow {
        let mut r = row(cells);
        r.resize(width, String::new());
        r
    }

    fn sources() -> SourceSet {
        let mut sales: Vec<SheetRow> = (0..4).map(|_| row(&["header"])).collect();
        sales.push(row(&["P1", "Acme", "", "Tee", "", "", "", "10"]));
        sales.push(row(&["P2", "Acme", "", "Cap", "", "", "", "4"]));
        sales.push(row(&["P3", "Acme", "", "Sock", "", "", "", "8"]));

        let mut media: Vec<SheetRow> = (0..5).map(|_| row(&["header"])).collect();
        let mut p1 = padded(&["P1", "", "", "", "p1-0.jpg", "p1-1.jpg"], 15);
        p1.extend(row(&["red", "red.jpg", "blue", "blue.jpg"]));
        media.push(p1);
        let mut p3 = padded(&["P3"], 15);
        p3.extend(row(&["grey", "grey.jpg"]));
        media.push(p3);

        SourceSet::default()
            .with_rows(SourceKind::Exclusion, "exclude.xlsx", vec![row(&["P3"])])
            .with_rows(SourceKind::Sales, "sales.xlsx", sales)
            .with_rows(SourceKind::Media, "media.xlsx", media)
            .with_rows(
                SourceKind::BasicInfo,
                "basic.xlsx",
                vec![row(&["P1", "", "", "soft tee"])],
            )
            .with_rows(
                SourceKind::Price,
                "price.xlsx",
                vec![row(&["P1", "", "", "", "", "", "", "250"])],
            )
    }

    #[test]
    fn test_run_end_to_end_in_memory() {
        let pipeline = Pipeline::from_sources(ColumnLayout::default(), sources()).unwrap();
        let output = pipeline.run().unwrap();

        // P3 被排除, P2 无颜色款式
        let ids: Vec<&str> = output.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["P1", "P2"]);

        let sheet = &output.sheet;
        assert_eq!(sheet.max_row(), 2);
        assert_eq!(sheet.text_at("C1"), Some("Acme Tee".to_string()));
        assert_eq!(sheet.text_at("D1"), Some("p1-0.jpg".to_string()));
        assert_eq!(sheet.text_at("E1"), Some("p1-1.jpg".to_string()));
        assert_eq!(sheet.text_at("X1"), Some("soft tee".to_string()));
        assert_eq!(sheet.text_at("AW1"), Some("10".to_string()));
        assert_eq!(sheet.text_at("BA1"), Some("250".to_string()));
        assert_eq!(sheet.text_at("AI2"), Some("blue".to_string()));
        assert_eq!(sheet.text_at("A2"), Some("0".to_string()));

        let report = &output.report;
        assert_eq!(report.merge.products_created, 2);
        assert_eq!(report.merge.excluded_rows_skipped, 1);
        assert_eq!(report.emit.sheet_rows_emitted, 2);
        assert_eq!(report.emit.products_without_variants, vec!["P2".to_string()]);
        assert_eq!(report.source_files[&SourceKind::Sales], 1);
        assert_eq!(report.lookups.excluded, 1);
        assert!(!report.run_id.is_empty());
    }

    #[test]
    fn test_invalid_layout_rejected_before_run() {
        let mut layout = ColumnLayout::default();
        layout.output.group_column = "1".to_string();

        let result = Pipeline::from_sources(layout, SourceSet::default());
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_short_sales_row_aborts_run() {
        let sources = SourceSet::default().with_rows(
            SourceKind::Sales,
            "sales.xlsx",
            vec![
                row(&["h"]),
                row(&["h"]),
                row(&["h"]),
                row(&["h"]),
                row(&["P1", "Acme"]),
            ],
        );

        let result = Pipeline::from_sources(ColumnLayout::default(), sources)
            .unwrap()
            .run();
        assert!(matches!(
            result,
            Err(PipelineError::Import(ImportError::RowTooShort { row: 5, .. }))
        ));
    }
}
