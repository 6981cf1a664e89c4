use crate::models::taxonomy::PrefixCode;
use serde::{Deserialize, Serialize};

/// 单道考试题目（每个 q*.json 文件一条）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: String,
    pub metadata: QuestionMetadata,
    pub question: QuestionBody,
    #[serde(default)]
    pub solution: Solution,
    #[serde(default)]
    pub content_context: Vec<ContentContextItem>,
    #[serde(default)]
    pub bijlages: Vec<Bijlage>,
    /// 来源考试场次目录名，仅用于日志
    #[serde(skip_serializing, skip_deserializing)]
    pub source_sitting: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionMetadata {
    pub exam: ExamInfo,
    #[serde(default)]
    pub curriculum: Curriculum,
}

/// 考试信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamInfo {
    pub education_level: String,
    pub discipline: String,
    #[serde(deserialize_with = "deserialize_number_or_string")]
    pub year: u32,
    /// 考试场次（第几个 tijdvak）
    #[serde(deserialize_with = "deserialize_number_or_string")]
    pub tijdvak: u32,
}

/// 课程分类信息，缺失时视为未分类
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Curriculum {
    #[serde(default)]
    pub education_level_discipline_id: Option<i64>,
    #[serde(default)]
    pub domains: Vec<DomainRef>,
    #[serde(default)]
    pub subdomains: Vec<SubdomainRef>,
    #[serde(default)]
    pub sub_learning_objective_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainRef {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub prefix_code: PrefixCode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubdomainRef {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub prefix_code: PrefixCode,
}

/// 题干
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBody {
    pub text: String,
    pub max_score: f64,
    #[serde(default)]
    pub is_self_scored: bool,
}

/// 参考答案
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextKind {
    Text,
    Image,
    #[serde(other)]
    Unknown,
}

/// 题目上下文条目（文字与图片交替出现，按 order 排列）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentContextItem {
    pub order: i64,
    #[serde(rename = "type")]
    pub kind: ContextKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// 附件（bijlage）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bijlage {
    pub name: String,
    #[serde(default)]
    pub media_path: String,
    #[serde(default)]
    pub azure_url: String,
}

impl QuestionRecord {
    /// 科目键：`{education_level}_{discipline}`，如 `vwo_wiskunde_b`
    pub fn subject_key(&self) -> String {
        format!(
            "{}_{}",
            self.metadata.exam.education_level, self.metadata.exam.discipline
        )
    }

    pub fn link_id(&self) -> Option<i64> {
        self.metadata.curriculum.education_level_discipline_id
    }

    pub fn references_domain(&self, domain_id: i64) -> bool {
        self.metadata.curriculum.domains.iter().any(|d| d.id == domain_id)
    }

    pub fn references_subdomain(&self, subdomain_id: i64) -> bool {
        self.metadata
            .curriculum
            .subdomains
            .iter()
            .any(|s| s.id == subdomain_id)
    }

    pub fn has_domains(&self) -> bool {
        !self.metadata.curriculum.domains.is_empty()
    }

    pub fn has_subdomains(&self) -> bool {
        !self.metadata.curriculum.subdomains.is_empty()
    }

    /// 既没有 domain 也没有 subdomain
    pub fn is_unclassified(&self) -> bool {
        !self.has_domains() && !self.has_subdomains()
    }

    pub fn with_source_sitting(mut self, sitting: impl Into<String>) -> Self {
        self.source_sitting = Some(sitting.into());
        self
    }
}

// 年份和场次在源数据里既可能是整数也可能是字符串
fn deserialize_number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct NumberVisitor;

    impl<'de> Visitor<'de> for NumberVisitor {
        type Value = u32;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a non-negative integer or a numeric string")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            value
                .trim()
                .parse()
                .map_err(|_| E::invalid_value(serde::de::Unexpected::Str(value), &self))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            u32::try_from(value)
                .map_err(|_| E::invalid_value(serde::de::Unexpected::Signed(value), &self))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            u32::try_from(value)
                .map_err(|_| E::invalid_value(serde::de::Unexpected::Unsigned(value), &self))
        }
    }

    deserializer.deserialize_any(NumberVisitor)
}
