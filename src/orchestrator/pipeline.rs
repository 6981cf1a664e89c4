//! 题目树构建流水线 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责把三个阶段按顺序串起来：
//!
//! 1. **加载分类**：读取 domains.json / subdomains.json（失败即终止）
//! 2. **扫描题库**：读取所有场次目录下的题目文件（单个文件失败只记警告）
//! 3. **组装题目树**：交给 `tree_builder`，纯内存计算
//! 4. **输出结果**：写出 JSON 并打印覆盖率统计
//!
//! 每次运行都从源文件完整重建，不做增量更新，也不缓存结果。

use crate::config::Config;
use crate::error::AppError;
use crate::models::loaders::{load_taxonomy, scan_corpus, CorpusScan};
use crate::models::taxonomy::Taxonomy;
use crate::models::tree::TreeNode;
use crate::orchestrator::tree_builder::{build_exercise_tree, TreeBuild};
use crate::services::CoverageReport;
use crate::utils::logging;
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{error, info, warn};

/// 写入输出文件的内容
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeOutput<'a> {
    pub generated_at: String,
    pub subjects: &'a [TreeNode],
    pub coverage: &'a CoverageReport,
}

/// 一次完整运行的结果
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub tree: TreeBuild,
    pub coverage: CoverageReport,
    /// 扫描阶段和组装阶段的所有警告
    pub warnings: Vec<String>,
}

/// 加载分类、扫描题库并构建题目树，不写任何文件
pub async fn load_exercise_tree(config: &Config) -> Result<RunOutcome> {
    let taxonomy = load_taxonomy(&config.curriculum_dir())
        .await
        .context("无法加载课程分类")?;
    let scan = scan_corpus(&config.questions_dir())
        .await
        .context("无法扫描题库")?;
    Ok(assemble(&taxonomy, &scan))
}

/// 错误链中是否包含致命的分类数据错误
pub fn is_fatal_error(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<AppError>())
        .any(AppError::is_fatal)
}

/// 对已加载的数据执行组装阶段
pub fn assemble(taxonomy: &Taxonomy, scan: &CorpusScan) -> RunOutcome {
    let tree = build_exercise_tree(scan, taxonomy);
    let coverage = CoverageReport::from_scan(scan).with_placement(tree.stats.iter());

    let warnings = scan
        .warnings
        .iter()
        .map(|w| format!("{}: {}", w.path.display(), w.reason))
        .chain(tree.warnings.iter().cloned())
        .collect();

    RunOutcome {
        tree,
        coverage,
        warnings,
    }
}

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        logging::init_log_file(&config.output_log_file)?;

        logging::log_startup(&config.data_path.display().to_string());

        Ok(Self { config })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunOutcome> {
        info!("\n📁 正在加载课程分类与题库...");
        let outcome = match load_exercise_tree(&self.config).await {
            Ok(outcome) => outcome,
            Err(e) => {
                if is_fatal_error(&e) {
                    error!("❌ 课程分类数据不可用，无法构建题目树: {:#}", e);
                }
                return Err(e);
            }
        };

        if outcome.coverage.total == 0 {
            warn!("⚠️ 没有找到任何题目文件");
        }

        self.write_output(&outcome).await?;
        self.record_warnings(&outcome.warnings)?;

        outcome.coverage.log();
        logging::print_final_stats(
            outcome.tree.subjects.len(),
            outcome.tree.placed(),
            outcome.warnings.len(),
            &self.config.output_file.display().to_string(),
        );

        Ok(outcome)
    }

    /// 写出题目树 JSON
    async fn write_output(&self, outcome: &RunOutcome) -> Result<()> {
        let output = TreeOutput {
            generated_at: chrono::Local::now().to_rfc3339(),
            subjects: &outcome.tree.subjects,
            coverage: &outcome.coverage,
        };
        let json = serde_json::to_string_pretty(&output)?;

        tokio::fs::write(&self.config.output_file, json)
            .await
            .with_context(|| format!("无法写入输出文件: {}", self.config.output_file.display()))?;
        Ok(())
    }

    /// 把警告写进运行日志文件，终端只显示前几条
    fn record_warnings(&self, warnings: &[String]) -> Result<()> {
        const PREVIEW: usize = 5;

        for message in warnings.iter().take(PREVIEW) {
            warn!("⚠️ {}", logging::truncate_text(message, 120));
        }
        if warnings.len() > PREVIEW {
            warn!(
                "⚠️ 另有 {} 条警告，详见 {}",
                warnings.len() - PREVIEW,
                self.config.output_log_file
            );
        }

        logging::append_log_lines(&self.config.output_log_file, warnings)
    }
}
