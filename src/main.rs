// ==========================================
// 商品目录迁移工具 - 命令行入口
// ==========================================
// 用法:
//   shopee-migration                         # 使用 datasource/ 下的固定输入文件
//   shopee-migration -c migration.json       # 使用配置文件
//   shopee-migration --sales a.xlsx --media b.xlsx ... -o out.xlsx
// ==========================================

use anyhow::Context;
use clap::Parser;
use shopee_migration::config::{ConfigManager, MigrationConfig};
use shopee_migration::domain::SourceKind;
use shopee_migration::exporter::{SheetFileWriter, UniversalSheetWriter};
use shopee_migration::importer::UniversalSheetReader;
use shopee_migration::{logging, Pipeline};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "shopee-migration")]
#[command(about = "合并供应商表格，生成平台批量上架表", version)]
struct Cli {
    /// JSON 配置文件路径
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 排除清单文件（可重复）
    #[arg(long)]
    exclude: Vec<PathBuf>,

    /// 销售信息文件（可重复）
    #[arg(long)]
    sales: Vec<PathBuf>,

    /// 媒体信息文件（可重复）
    #[arg(long)]
    media: Vec<PathBuf>,

    /// 基础信息文件（可重复）
    #[arg(long = "basic-info")]
    basic_info: Vec<PathBuf>,

    /// 价格信息文件（可重复,后者覆盖前者）
    #[arg(long)]
    price: Vec<PathBuf>,

    /// 输出文件（.xlsx / .csv）
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// 运行报告输出路径（JSON）
    #[arg(long)]
    report: Option<PathBuf>,

    /// 打印生效的列布局后退出
    #[arg(long)]
    print_layout: bool,

    /// 以 JSON 格式输出日志
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    fn source_flags(&self) -> [(SourceKind, &Vec<PathBuf>); 5] {
        [
            (SourceKind::Exclusion, &self.exclude),
            (SourceKind::Sales, &self.sales),
            (SourceKind::Media, &self.media),
            (SourceKind::BasicInfo, &self.basic_info),
            (SourceKind::Price, &self.price),
        ]
    }

    fn has_source_flags(&self) -> bool {
        self.source_flags().iter().any(|(_, files)| !files.is_empty())
    }

    /// 生效配置: 配置文件 > 固定输入文件集,命令行参数覆盖同类项
    fn resolve_config(&self, cwd: &Path) -> anyhow::Result<MigrationConfig> {
        let mut config = match &self.config {
            Some(path) => ConfigManager::load(path)
                .with_context(|| format!("加载配置文件失败: {}", path.display()))?,
            None if self.has_source_flags() => MigrationConfig::default(),
            None => ConfigManager::default_config(cwd),
        };

        for (kind, files) in self.source_flags() {
            if !files.is_empty() {
                *config.sources.files_mut(kind) = files.clone();
            }
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(report) = &self.report {
            config.report = Some(report.clone());
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.log_json {
        logging::init_json();
    } else {
        logging::init();
    }

    let cwd = std::env::current_dir().context("无法获取当前工作目录")?;
    let config = cli.resolve_config(&cwd)?;

    if cli.print_layout {
        println!("{}", serde_json::to_string_pretty(&config.layout)?);
        return Ok(());
    }

    info!("==================================================");
    info!("{} v{}", shopee_migration::APP_NAME, shopee_migration::VERSION);
    info!("==================================================");
    for (kind, count) in config.sources.counts() {
        info!(kind = %kind, files = count, "输入文件");
    }

    let pipeline = Pipeline::load(&UniversalSheetReader, &config.sources, config.layout.clone())
        .context("加载数据源失败")?;
    let output = pipeline.run().context("合并失败")?;

    UniversalSheetWriter
        .write(&output.sheet, &config.output)
        .with_context(|| format!("写出结果失败: {}", config.output.display()))?;

    if let Some(report_path) = &config.report {
        fs::write(report_path, output.report.to_json_pretty()?)
            .with_context(|| format!("写出运行报告失败: {}", report_path.display()))?;
        info!(path = %report_path.display(), "运行报告已写出");
    }

    info!(
        output = %config.output.display(),
        rows = output.report.emit.sheet_rows_emitted,
        "完成"
    );
    Ok(())
}
