//! 练习题投影服务 - 业务能力层
//!
//! 只负责把一条 `QuestionRecord` 转成界面用的 `Exercise`，无状态、无缓存。

use crate::models::display::{discipline_name, sitting_label};
use crate::models::exercise::{Difficulty, Exercise};
use crate::models::question::QuestionRecord;
use regex::Regex;
use std::sync::OnceLock;

/// 找不到题号时使用的占位符
pub const UNKNOWN_QUESTION_NUMBER: &str = "?";

fn trailing_digits() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)$").expect("静态正则表达式无效"))
}

/// 从题目 id 末尾提取题号（从 1 开始），去掉前导零
///
/// `vwo_wiskunde_b_2023_1_q07` → `7`；没有末尾数字时返回 `?`
pub fn extract_question_number(question_id: &str) -> String {
    trailing_digits()
        .captures(question_id)
        .and_then(|caps| caps.get(1))
        .map(|m| {
            let trimmed = m.as_str().trim_start_matches('0');
            if trimmed.is_empty() {
                "0".to_string()
            } else {
                trimmed.to_string()
            }
        })
        .unwrap_or_else(|| UNKNOWN_QUESTION_NUMBER.to_string())
}

/// 练习题标题，如 `Wiskunde B 2023 1e tijdvak, vraag 4`
pub fn exercise_title(record: &QuestionRecord) -> String {
    let exam = &record.metadata.exam;
    format!(
        "{} {}, vraag {}",
        discipline_name(&exam.discipline),
        sitting_label(exam.year, exam.tijdvak),
        extract_question_number(&record.id)
    )
}

/// 构建练习题
pub fn build_exercise(record: &QuestionRecord) -> Exercise {
    let exam = &record.metadata.exam;
    let curriculum = &record.metadata.curriculum;

    let mut content_context = record.content_context.clone();
    content_context.sort_by_key(|item| item.order);

    Exercise {
        id: record.id.clone(),
        title: exercise_title(record),
        education_level: exam.education_level.clone(),
        discipline: exam.discipline.clone(),
        difficulty: Difficulty::from_max_score(record.question.max_score),
        content: record.question.text.clone(),
        content_context,
        max_score: record.question.max_score,
        is_self_scored: record.question.is_self_scored,
        exam_year: exam.year,
        tijdvak: exam.tijdvak,
        question_number: extract_question_number(&record.id),
        domains: curriculum.domains.clone(),
        subdomains: curriculum.subdomains.clone(),
        learning_objective_ids: curriculum.sub_learning_objective_ids.clone(),
        solution: record.solution.clone(),
        bijlages: record.bijlages.clone(),
    }
}
