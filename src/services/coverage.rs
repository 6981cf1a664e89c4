//! 分类覆盖率统计 - 业务能力层
//!
//! 统计题库中有多少题目带有 domain / subdomain 分类，以及最终有多少题落入兜底桶。

use crate::models::loaders::CorpusScan;
use crate::workflow::SubjectStats;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    /// 成功解析的题目数
    pub total: usize,
    /// 各场次 metadata.json 声明的题目总数
    pub declared_total: usize,
    /// 被跳过的题目文件数（解析失败、重复 id）
    pub skipped_files: usize,
    pub with_domains: usize,
    pub with_subdomains: usize,
    /// 有 subdomain 但没有显式 domain
    pub implicit_domains: usize,
    /// 有 domain 或 subdomain
    pub classified: usize,
    pub unclassified: usize,
    /// 组装后落入真实 subdomain 的题目
    pub placed_in_subdomains: usize,
    /// 组装后落入 domain "其他题目"桶的题目
    pub placed_in_domain_other: usize,
    /// 组装后落入科目级未分类桶的题目
    pub placed_in_unclassified: usize,
}

impl CoverageReport {
    /// 基于扫描结果统计分类元数据
    pub fn from_scan(scan: &CorpusScan) -> Self {
        let mut report = Self {
            declared_total: scan.declared_question_count,
            skipped_files: scan.skipped_files(),
            ..Default::default()
        };

        for record in scan.records() {
            report.total += 1;
            let has_d = record.has_domains();
            let has_s = record.has_subdomains();
            if has_d {
                report.with_domains += 1;
            }
            if has_s {
                report.with_subdomains += 1;
            }
            if has_s && !has_d {
                report.implicit_domains += 1;
            }
            if has_d || has_s {
                report.classified += 1;
            } else {
                report.unclassified += 1;
            }
        }

        report
    }

    /// 叠加组装阶段的放置统计
    pub fn with_placement<'a>(mut self, stats: impl IntoIterator<Item = &'a SubjectStats>) -> Self {
        for s in stats {
            self.placed_in_subdomains += s.in_subdomains;
            self.placed_in_domain_other += s.in_domain_other;
            self.placed_in_unclassified += s.unclassified + s.unmatched;
        }
        self
    }

    fn percent(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            part as f64 * 100.0 / total as f64
        }
    }

    pub fn domain_percent(&self) -> f64 {
        Self::percent(self.with_domains, self.total)
    }

    pub fn subdomain_percent(&self) -> f64 {
        Self::percent(self.with_subdomains, self.total)
    }

    pub fn classified_percent(&self) -> f64 {
        Self::percent(self.classified, self.total)
    }

    pub fn log(&self) {
        info!("\n{}", "=".repeat(60));
        info!("📊 分类覆盖率统计");
        info!("{}", "=".repeat(60));
        info!("题目总数: {} (metadata 声明: {})", self.total, self.declared_total);
        info!("跳过的文件: {}", self.skipped_files);
        info!("带 domain: {} ({:.1}%)", self.with_domains, self.domain_percent());
        info!("带 subdomain: {} ({:.1}%)", self.with_subdomains, self.subdomain_percent());
        info!("只有 subdomain 没有 domain: {}", self.implicit_domains);
        info!("已分类: {} ({:.1}%)", self.classified, self.classified_percent());
        info!("未分类: {}", self.unclassified);
        info!(
            "放置结果: subdomain {} / Overige vragen {} / Niet-geclassificeerd {}",
            self.placed_in_subdomains, self.placed_in_domain_other, self.placed_in_unclassified
        );
        info!("{}", "=".repeat(60));
    }
}
