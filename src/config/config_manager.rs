// ==========================================
// 商品目录迁移工具 - 配置管理器
// ==========================================
// 职责: 配置加载（JSON 文件）、默认配置、输入文件清单
// 说明: 配置文件各节均可省略,缺省值即现行固定格式
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::layout::ColumnLayout;
use crate::domain::types::SourceKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

// ==========================================
// SourceFiles - 输入文件清单
// ==========================================
// 同类型多个文件按列出顺序读取（价格表后读覆盖先读）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceFiles {
    pub exclude: Vec<PathBuf>,
    pub sales: Vec<PathBuf>,
    pub media: Vec<PathBuf>,
    pub basic_info: Vec<PathBuf>,
    pub price: Vec<PathBuf>,
}

impl SourceFiles {
    /// 历史固定输入文件集（位于工作目录 datasource/ 下）
    pub fn legacy_defaults(dir: &Path) -> Self {
        let source = |name: &str| dir.join("datasource").join(name);
        Self {
            exclude: vec![source("archive-2021-07/basic-info-001-bk.xlsx")],
            sales: vec![source("sales-info-001.xlsx")],
            media: vec![source("media-info-001.xlsx")],
            basic_info: vec![source("basic-info-001.xlsx")],
            price: vec![
                source("discount_nominate_1000-1.xlsx"),
                source("discount_nominate_3000-1.xlsx"),
                source("discount_nominate_3000-2.xlsx"),
                source("discount_nominate_3000-3.xlsx"),
                source("discount_nominate_5000-2.xlsx"),
            ],
        }
    }

    pub fn files(&self, kind: SourceKind) -> &[PathBuf] {
        match kind {
            SourceKind::Exclusion => &self.exclude,
            SourceKind::Sales => &self.sales,
            SourceKind::Media => &self.media,
            SourceKind::BasicInfo => &self.basic_info,
            SourceKind::Price => &self.price,
        }
    }

    pub fn files_mut(&mut self, kind: SourceKind) -> &mut Vec<PathBuf> {
        match kind {
            SourceKind::Exclusion => &mut self.exclude,
            SourceKind::Sales => &mut self.sales,
            SourceKind::Media => &mut self.media,
            SourceKind::BasicInfo => &mut self.basic_info,
            SourceKind::Price => &mut self.price,
        }
    }

    pub fn counts(&self) -> BTreeMap<SourceKind, usize> {
        SourceKind::ALL
            .iter()
            .map(|kind| (*kind, self.files(*kind).len()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        SourceKind::ALL.iter().all(|kind| self.files(*kind).is_empty())
    }
}

// ==========================================
// MigrationConfig - 单次运行配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    pub sources: SourceFiles,
    pub output: PathBuf,         // 扩展名决定格式（.xlsx / .csv）
    pub report: Option<PathBuf>, // 运行报告 JSON（可选）
    pub layout: ColumnLayout,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            sources: SourceFiles::default(),
            output: PathBuf::from("output.xlsx"),
            report: None,
            layout: ColumnLayout::default(),
        }
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager;

impl ConfigManager {
    /// 从 JSON 文件加载配置并校验布局
    ///
    /// # 参数
    /// - path: 配置文件路径
    ///
    /// # 返回
    /// - Ok(MigrationConfig): 合并默认值后的配置
    /// - Err: 读取失败、JSON 解析失败、布局无效
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<MigrationConfig> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config = Self::parse(&content).map_err(|e| match e {
            ConfigError::ParseError { message, .. } => ConfigError::ParseError {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })?;

        info!(path = %path.display(), "配置文件已加载");
        Ok(config)
    }

    /// 解析 JSON 配置文本
    pub fn parse(content: &str) -> ConfigResult<MigrationConfig> {
        let config: MigrationConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        config.layout.validate()?;
        Ok(config)
    }

    /// 无配置文件时的默认配置: 历史固定输入文件集 + dir/output.xlsx
    pub fn default_config(dir: &Path) -> MigrationConfig {
        MigrationConfig {
            sources: SourceFiles::legacy_defaults(dir),
            output: dir.join("output.xlsx"),
            report: None,
            layout: ColumnLayout::default(),
        }
    }
}
