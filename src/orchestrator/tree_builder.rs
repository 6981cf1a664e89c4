//! 题目树构建器 - 编排层
//!
//! ## 职责
//!
//! 遍历所有科目分组，逐个交给 `workflow::assemble_subject`，再对科目节点排序。
//!
//! ## 排序规则
//!
//! 1. 学段优先级：vwo → havo → vmbo_gl → vmbo_tl → vmbo_kb → vmbo_bb，未知学段排最后
//! 2. 同一学段内按荷兰语习惯比较标签
//! 3. 标签相同时按科目键，保证结果确定
//!
//! 纯函数，不做 I/O；相同输入得到结构完全相同的树。

use crate::models::loaders::{CorpusScan, SubjectGroup};
use crate::models::taxonomy::Taxonomy;
use crate::models::tree::TreeNode;
use crate::services::collation::compare_labels;
use crate::workflow::{assemble_subject, SubjectOutcome, SubjectStats};
use tracing::{debug, info};

/// 构建结果
#[derive(Debug, Clone, Default)]
pub struct TreeBuild {
    /// 排好序的科目节点
    pub subjects: Vec<TreeNode>,
    /// 各科目的放置统计（与 subjects 顺序无关）
    pub stats: Vec<SubjectStats>,
    /// 组装阶段的数据一致性警告
    pub warnings: Vec<String>,
}

impl TreeBuild {
    /// 放进树里的题目总数
    pub fn placed(&self) -> usize {
        self.stats.iter().map(SubjectStats::placed).sum()
    }
}

/// 为一组科目分组构建题目树
pub fn build_tree_from_groups(groups: &[SubjectGroup], taxonomy: &Taxonomy) -> TreeBuild {
    let mut outcomes: Vec<SubjectOutcome> = groups
        .iter()
        .map(|group| {
            let outcome = assemble_subject(group, taxonomy);
            debug!(
                "{} 组装完成: {} 道题, subdomain {}, 其他 {}, 未分类 {}",
                outcome.ctx,
                group.questions.len(),
                outcome.stats.in_subdomains,
                outcome.stats.in_domain_other,
                outcome.stats.unclassified + outcome.stats.unmatched
            );
            outcome
        })
        .collect();

    outcomes.sort_by(|a, b| {
        a.ctx
            .level_rank()
            .cmp(&b.ctx.level_rank())
            .then_with(|| compare_labels(&a.ctx.label, &b.ctx.label))
            .then_with(|| a.ctx.key.cmp(&b.ctx.key))
    });

    let mut build = TreeBuild::default();
    for outcome in outcomes {
        build.stats.push(outcome.stats);
        build.warnings.extend(outcome.warnings);
        if let Some(node) = outcome.node {
            build.subjects.push(node);
        }
    }

    info!(
        "✓ 题目树构建完成: {} 个科目, {} 道题",
        build.subjects.len(),
        build.placed()
    );

    build
}

/// 基于扫描结果构建题目树
pub fn build_exercise_tree(scan: &CorpusScan, taxonomy: &Taxonomy) -> TreeBuild {
    build_tree_from_groups(scan.groups(), taxonomy)
}
