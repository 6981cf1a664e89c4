use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 分类前缀代码
///
/// 源数据中 subdomain 的 prefix_code 有时是数字（如 `3`、`1.5`），有时是字符串（如 `"B1"`），
/// 两种都要接受，比较时也不能假设只有一种类型。数字保留 JSON 原值，整数显示时不带小数点。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefixCode {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for PrefixCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixCode::Number(n) => write!(f, "{}", n),
            PrefixCode::Text(s) => write!(f, "{}", s),
        }
    }
}

impl Default for PrefixCode {
    fn default() -> Self {
        PrefixCode::Text(String::new())
    }
}

/// 领域（domain）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub id: i64,
    pub name: String,
    pub prefix_code: PrefixCode,
    /// 所属的"学段 × 学科"组合
    pub education_level_discipline: i64,
}

impl Domain {
    /// 树节点标签，如 `B: Algebra en tellen`
    pub fn label(&self) -> String {
        format!("{}: {}", self.prefix_code, self.name)
    }
}

/// 子领域（subdomain）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subdomain {
    pub id: i64,
    pub name: String,
    /// 所属 domain 的 id
    pub domain: i64,
    pub prefix_code: PrefixCode,
}

impl Subdomain {
    pub fn label(&self) -> String {
        format!("{}: {}", self.prefix_code, self.name)
    }
}

/// 课程分类索引
///
/// 只读参考数据，每次运行加载一次。domain 与 subdomain 都保持源文件中的顺序。
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    domains: Vec<Domain>,
    subdomains: Vec<Subdomain>,
    subdomains_by_domain: HashMap<i64, Vec<Subdomain>>,
}

impl Taxonomy {
    /// 由已解析的记录构建索引
    pub fn new(domains: Vec<Domain>, subdomains: Vec<Subdomain>) -> Self {
        let mut subdomains_by_domain: HashMap<i64, Vec<Subdomain>> = HashMap::new();
        for subdomain in &subdomains {
            subdomains_by_domain
                .entry(subdomain.domain)
                .or_default()
                .push(subdomain.clone());
        }

        Self {
            domains,
            subdomains,
            subdomains_by_domain,
        }
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn subdomains(&self) -> &[Subdomain] {
        &self.subdomains
    }

    /// 某个 domain 下的所有 subdomain（分类顺序）
    pub fn subdomains_of(&self, domain_id: i64) -> &[Subdomain] {
        self.subdomains_by_domain
            .get(&domain_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 属于某个"学段 × 学科"组合的 domain（分类顺序）
    pub fn domains_for_link(&self, link_id: i64) -> impl Iterator<Item = &Domain> {
        self.domains
            .iter()
            .filter(move |d| d.education_level_discipline == link_id)
    }

    /// 指向不存在 domain 的 subdomain 数量
    pub fn dangling_subdomain_count(&self) -> usize {
        self.subdomains
            .iter()
            .filter(|s| !self.domains.iter().any(|d| d.id == s.domain))
            .count()
    }
}
