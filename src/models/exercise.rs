use crate::models::question::{
    Bijlage, ContentContextItem, ContextKind, DomainRef, Solution, SubdomainRef,
};
use serde::{Deserialize, Serialize};

/// 难度等级，由题目满分推算
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// `<= 2` 为 easy，`<= 4` 为 medium，其余为 hard
    pub fn from_max_score(max_score: f64) -> Self {
        if max_score <= 2.0 {
            Difficulty::Easy
        } else if max_score <= 4.0 {
            Difficulty::Medium
        } else {
            Difficulty::Hard
        }
    }
}

/// 面向界面的练习题，由 `QuestionRecord` 投影而来，构造后不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub title: String,
    pub education_level: String,
    pub discipline: String,
    pub difficulty: Difficulty,
    pub content: String,
    /// 已按 order 排序
    pub content_context: Vec<ContentContextItem>,
    pub max_score: f64,
    pub is_self_scored: bool,
    pub exam_year: u32,
    pub tijdvak: u32,
    pub question_number: String,
    pub domains: Vec<DomainRef>,
    pub subdomains: Vec<SubdomainRef>,
    pub learning_objective_ids: Vec<i64>,
    pub solution: Solution,
    pub bijlages: Vec<Bijlage>,
}

impl Exercise {
    /// 上下文中所有图片的媒体路径（按 order）
    pub fn image_media_paths(&self) -> Vec<&str> {
        self.content_context
            .iter()
            .filter(|item| item.kind == ContextKind::Image)
            .filter_map(|item| item.media_path.as_deref())
            .collect()
    }
}
