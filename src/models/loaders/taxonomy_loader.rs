use crate::error::{AppError, AppResult, TaxonomyError};
use crate::models::taxonomy::{Domain, Subdomain, Taxonomy};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;
use tokio::fs;

pub const DOMAINS_FILE: &str = "domains.json";
pub const SUBDOMAINS_FILE: &str = "subdomains.json";

/// 把 `{ "<key>": {...}, ... }` 形式的分类表解析为记录列表，保持源文件顺序
///
/// `origin` 只用于错误信息。
pub fn parse_table<T: DeserializeOwned>(content: &str, origin: &str) -> Result<Vec<T>, TaxonomyError> {
    let value: Value = serde_json::from_str(content).map_err(|source| TaxonomyError::Malformed {
        path: origin.to_string(),
        source,
    })?;

    let entries: Vec<(String, Value)> = match value {
        Value::Object(map) => map.into_iter().collect(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| (idx.to_string(), item))
            .collect(),
        other => {
            return Err(TaxonomyError::Malformed {
                path: origin.to_string(),
                source: <serde_json::Error as serde::de::Error>::custom(format!(
                    "期望对象或数组，实际为 {}",
                    json_kind(&other)
                )),
            })
        }
    };

    entries
        .into_iter()
        .map(|(key, entry)| {
            serde_json::from_value(entry).map_err(|source| TaxonomyError::BadEntry {
                path: origin.to_string(),
                key,
                source,
            })
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// 由两个已读入内存的分类表构建索引
pub fn parse_taxonomy(domains_json: &str, subdomains_json: &str) -> Result<Taxonomy, TaxonomyError> {
    let domains: Vec<Domain> = parse_table(domains_json, DOMAINS_FILE)?;
    let subdomains: Vec<Subdomain> = parse_table(subdomains_json, SUBDOMAINS_FILE)?;
    Ok(Taxonomy::new(domains, subdomains))
}

async fn read_table(path: &Path) -> AppResult<String> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(TaxonomyError::NotFound {
            path: path.display().to_string(),
        }
        .into()),
        Err(e) => Err(AppError::file_read_failed(path.display().to_string(), e)),
    }
}

/// 从 curriculum 目录加载分类数据
///
/// 文件缺失或格式错误都是致命错误，没有分类就无法构建题目树。
pub async fn load_taxonomy(curriculum_dir: &Path) -> AppResult<Taxonomy> {
    let domains_path = curriculum_dir.join(DOMAINS_FILE);
    let subdomains_path = curriculum_dir.join(SUBDOMAINS_FILE);

    let domains_json = read_table(&domains_path).await?;
    let subdomains_json = read_table(&subdomains_path).await?;

    let domains: Vec<Domain> = parse_table(&domains_json, &domains_path.display().to_string())?;
    let subdomains: Vec<Subdomain> =
        parse_table(&subdomains_json, &subdomains_path.display().to_string())?;

    let taxonomy = Taxonomy::new(domains, subdomains);
    tracing::info!(
        "✓ 分类加载完成: {} 个 domain, {} 个 subdomain",
        taxonomy.domains().len(),
        taxonomy.subdomains().len()
    );

    let dangling = taxonomy.dangling_subdomain_count();
    if dangling > 0 {
        tracing::warn!("⚠️ {} 个 subdomain 指向不存在的 domain", dangling);
    }

    Ok(taxonomy)
}
