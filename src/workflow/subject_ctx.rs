//! 科目处理上下文
//!
//! 封装"我正在组装哪个科目、它对应哪个学段 × 学科组合"这一信息

use crate::models::display::{level_rank, subject_label};
use crate::models::loaders::SubjectGroup;
use std::fmt::Display;

/// 科目处理上下文
#[derive(Debug, Clone)]
pub struct SubjectCtx {
    /// 科目键，如 `vwo_wiskunde_b`
    pub key: String,

    /// 学段（取自题目记录，而不是拆分科目键）
    pub education_level: String,

    /// 学科
    pub discipline: String,

    /// 对应的"学段 × 学科"组合 id，决定该科目有哪些 domain
    pub link_id: Option<i64>,

    /// 科目节点标签，如 `VWO Wiskunde B`
    pub label: String,
}

impl SubjectCtx {
    /// 从一组题目解析上下文，返回上下文和数据一致性警告
    ///
    /// 组合 id 取第一道题的值；第一道题缺失时取第一个有值的题目。
    /// 组内其他题目的 id 与之不同只记警告，不中断。
    pub fn resolve(group: &SubjectGroup) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();

        let (education_level, discipline) = group
            .questions
            .first()
            .map(|q| {
                (
                    q.metadata.exam.education_level.clone(),
                    q.metadata.exam.discipline.clone(),
                )
            })
            .unwrap_or_default();

        let first_link = group.questions.first().and_then(|q| q.link_id());
        let link_id = match first_link {
            Some(id) => Some(id),
            None => {
                let fallback = group.questions.iter().find_map(|q| q.link_id());
                if let Some(id) = fallback {
                    warnings.push(format!(
                        "科目 {} 的第一道题缺少 education_level_discipline_id，改用 {}",
                        group.key, id
                    ));
                }
                fallback
            }
        };

        if let Some(expected) = link_id {
            let mismatched: Vec<&str> = group
                .questions
                .iter()
                .filter(|q| q.link_id().is_some_and(|id| id != expected))
                .map(|q| q.id.as_str())
                .collect();
            if !mismatched.is_empty() {
                warnings.push(format!(
                    "科目 {} 中 {} 道题的 education_level_discipline_id 与 {} 不一致: {}",
                    group.key,
                    mismatched.len(),
                    expected,
                    mismatched.join(", ")
                ));
            }
        } else if !group.questions.is_empty() {
            warnings.push(format!(
                "科目 {} 没有任何题目带 education_level_discipline_id，所有题目归入未分类",
                group.key
            ));
        }

        let label = subject_label(&education_level, &discipline);
        let ctx = Self {
            key: group.key.clone(),
            education_level,
            discipline,
            link_id,
            label,
        };
        (ctx, warnings)
    }

    /// 学段排序位置
    pub fn level_rank(&self) -> usize {
        level_rank(&self.education_level)
    }

    pub fn domain_node_id(&self, domain_id: i64) -> String {
        format!("{}/domain-{}", self.key, domain_id)
    }

    pub fn subdomain_node_id(&self, subdomain_id: i64) -> String {
        format!("{}/subdomain-{}", self.key, subdomain_id)
    }

    pub fn domain_other_node_id(&self, domain_id: i64) -> String {
        format!("{}/domain-{}-other", self.key, domain_id)
    }

    pub fn unclassified_node_id(&self) -> String {
        format!("{}/unclassified", self.key)
    }
}

impl Display for SubjectCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.link_id {
            Some(id) => write!(f, "[科目 {} 组合#{}]", self.key, id),
            None => write!(f, "[科目 {} 组合#?]", self.key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::QuestionRecord;
    use serde_json::json;

    fn record(id: &str, link: Option<i64>) -> QuestionRecord {
        let mut curriculum = json!({});
        if let Some(link) = link {
            curriculum = json!({"education_level_discipline_id": link});
        }
        serde_json::from_value(json!({
            "id": id,
            "metadata": {
                "exam": {"education_level": "vmbo_gl", "discipline": "wiskunde", "year": 2024, "tijdvak": 1},
                "curriculum": curriculum
            },
            "question": {"text": "", "max_score": 1}
        }))
        .unwrap()
    }

    fn group(questions: Vec<QuestionRecord>) -> SubjectGroup {
        SubjectGroup {
            key: "vmbo_gl_wiskunde".to_string(),
            questions,
        }
    }

    #[test]
    fn test_resolve_consistent_group() {
        let (ctx, warnings) = SubjectCtx::resolve(&group(vec![record("q1", Some(4)), record("q2", Some(4))]));
        assert_eq!(ctx.link_id, Some(4));
        assert_eq!(ctx.education_level, "vmbo_gl");
        assert_eq!(ctx.label, "VMBO-GL Wiskunde");
        assert_eq!(ctx.level_rank(), 2);
        assert!(warnings.is_empty());
        assert_eq!(ctx.to_string(), "[科目 vmbo_gl_wiskunde 组合#4]");
    }

    #[test]
    fn test_resolve_mismatch_is_warning() {
        let (ctx, warnings) = SubjectCtx::resolve(&group(vec![record("q1", Some(4)), record("q2", Some(5))]));
        assert_eq!(ctx.link_id, Some(4));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("q2"));
    }

    #[test]
    fn test_resolve_missing_first_link_falls_back() {
        let (ctx, warnings) = SubjectCtx::resolve(&group(vec![record("q1", None), record("q2", Some(6))]));
        assert_eq!(ctx.link_id, Some(6));
        assert_eq!(warnings.len(), 1);

        let (ctx, warnings) = SubjectCtx::resolve(&group(vec![record("q1", None)]));
        assert_eq!(ctx.link_id, None);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_node_ids_are_scoped_by_subject() {
        let (ctx, _) = SubjectCtx::resolve(&group(vec![record("q1", Some(4))]));
        assert_eq!(ctx.domain_node_id(3), "vmbo_gl_wiskunde/domain-3");
        assert_eq!(ctx.subdomain_node_id(7), "vmbo_gl_wiskunde/subdomain-7");
        assert_eq!(ctx.domain_other_node_id(3), "vmbo_gl_wiskunde/domain-3-other");
        assert_eq!(ctx.unclassified_node_id(), "vmbo_gl_wiskunde/unclassified");
    }
}
