//! 科目组装流程 - 流程层
//!
//! 核心职责：把同一科目的一组题目按课程分类放进树里
//!
//! 桶的认领顺序（先认领者得）：
//! 1. 各 domain 的 subdomain（分类顺序）
//! 2. 该 domain 的"Overige vragen"（只引用 domain、没有任何 subdomain 的题目）
//! 3. 科目级"Niet-geclassificeerd"（剩余的所有题目）

use tracing::{debug, warn};

use crate::models::question::QuestionRecord;
use crate::models::taxonomy::{Domain, Subdomain, Taxonomy};
use crate::models::tree::TreeNode;
use crate::models::loaders::SubjectGroup;
use crate::services::exercise_builder::build_exercise;
use crate::workflow::placement::Placement;
use crate::workflow::subject_ctx::SubjectCtx;

/// domain 下"其他题目"桶的标签
pub const DOMAIN_OTHER_LABEL: &str = "Overige vragen";

/// 科目级未分类桶的标签
pub const UNCLASSIFIED_LABEL: &str = "Niet-geclassificeerd";

/// 单个科目的放置统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SubjectStats {
    /// 放进真实 subdomain 的题目
    pub in_subdomains: usize,
    /// 放进 domain "其他题目"桶的题目
    pub in_domain_other: usize,
    /// 完全没有分类、放进未分类桶的题目
    pub unclassified: usize,
    /// 有分类引用但无法匹配（引用悬空或不属于本科目），放进未分类桶的题目
    pub unmatched: usize,
}

impl SubjectStats {
    pub fn placed(&self) -> usize {
        self.in_subdomains + self.in_domain_other + self.unclassified + self.unmatched
    }
}

/// 单个科目的组装结果
#[derive(Debug, Clone)]
pub struct SubjectOutcome {
    pub ctx: SubjectCtx,
    /// 没有任何子节点时为 None
    pub node: Option<TreeNode>,
    pub stats: SubjectStats,
    pub warnings: Vec<String>,
}

fn leaves(questions: &[&QuestionRecord]) -> Vec<TreeNode> {
    questions
        .iter()
        .map(|q| TreeNode::leaf(build_exercise(q)))
        .collect()
}

/// 组装单个 domain；没有任何子节点时返回 None
fn assemble_domain(
    ctx: &SubjectCtx,
    domain: &Domain,
    subdomains: &[Subdomain],
    questions: &[QuestionRecord],
    placement: &mut Placement,
    stats: &mut SubjectStats,
) -> Option<TreeNode> {
    let mut children = Vec::new();

    for subdomain in subdomains {
        let claimed = placement.claim(questions, |q| q.references_subdomain(subdomain.id));
        if claimed.is_empty() {
            continue;
        }
        stats.in_subdomains += claimed.len();
        children.push(TreeNode::subdomein(
            ctx.subdomain_node_id(subdomain.id),
            subdomain.label(),
            leaves(&claimed),
        ));
    }

    let domain_only = placement.claim(questions, |q| {
        q.references_domain(domain.id) && !q.has_subdomains()
    });
    if !domain_only.is_empty() {
        stats.in_domain_other += domain_only.len();
        children.push(TreeNode::subdomein(
            ctx.domain_other_node_id(domain.id),
            DOMAIN_OTHER_LABEL,
            leaves(&domain_only),
        ));
    }

    if children.is_empty() {
        debug!("{} domain {} 没有题目，跳过", ctx, domain.id);
        return None;
    }

    Some(TreeNode::domein(
        ctx.domain_node_id(domain.id),
        domain.label(),
        children,
    ))
}

/// 组装一个科目节点
///
/// 每道题恰好出现在一个叶子位置；不完整的分类进入兜底桶，不会报错。
pub fn assemble_subject(group: &SubjectGroup, taxonomy: &Taxonomy) -> SubjectOutcome {
    let (ctx, mut warnings) = SubjectCtx::resolve(group);
    let mut placement = Placement::new();
    let mut stats = SubjectStats::default();
    let mut domain_nodes = Vec::new();

    if let Some(link_id) = ctx.link_id {
        for domain in taxonomy.domains_for_link(link_id) {
            if let Some(node) = assemble_domain(
                &ctx,
                domain,
                taxonomy.subdomains_of(domain.id),
                &group.questions,
                &mut placement,
                &mut stats,
            ) {
                domain_nodes.push(node);
            }
        }
    }

    if placement.is_empty() {
        debug!("{} 没有题目落入分类节点", ctx);
    } else {
        debug!("{} 分类节点已放置 {} 道题", ctx, placement.len());
    }

    let remaining = placement.claim(&group.questions, |_| true);
    for question in &remaining {
        if question.is_unclassified() {
            stats.unclassified += 1;
        } else {
            stats.unmatched += 1;
            warnings.push(format!(
                "题目 {} 的分类引用无法匹配本科目的分类，归入未分类",
                question.id
            ));
        }
    }
    if !remaining.is_empty() {
        domain_nodes.push(TreeNode::domein(
            ctx.unclassified_node_id(),
            UNCLASSIFIED_LABEL,
            leaves(&remaining),
        ));
    }

    for message in &warnings {
        warn!("{} {}", ctx, message);
    }

    let node = if domain_nodes.is_empty() {
        None
    } else {
        Some(TreeNode::vak(ctx.key.clone(), ctx.label.clone(), domain_nodes))
    };

    SubjectOutcome {
        ctx,
        node,
        stats,
        warnings,
    }
}
