use crate::error::{AppError, AppResult, FileError};
use crate::models::question::QuestionRecord;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 考试场次目录中的元数据文件名
pub const SITTING_METADATA_FILE: &str = "metadata.json";

/// 扫描警告的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanWarningKind {
    /// 题目文件无法读取或解析
    QuestionFile,
    /// 题目 id 重复，后出现的文件被跳过
    DuplicateId,
    /// 场次 metadata.json 无法解析
    SittingMetadata,
    /// 场次目录无法读取
    SittingDir,
}

impl ScanWarningKind {
    /// 该警告是否意味着一个题目文件被跳过
    pub fn skips_question_file(self) -> bool {
        matches!(self, ScanWarningKind::QuestionFile | ScanWarningKind::DuplicateId)
    }
}

/// 扫描中记录下来的非致命问题
#[derive(Debug, Clone, PartialEq)]
pub struct ScanWarning {
    pub kind: ScanWarningKind,
    pub path: PathBuf,
    pub reason: String,
}

/// 同一科目（学段 + 学科）下的所有题目，保持读取顺序
#[derive(Debug, Clone)]
pub struct SubjectGroup {
    pub key: String,
    pub questions: Vec<QuestionRecord>,
}

/// 场次目录中的 metadata.json，只关心声明的题目数量
#[derive(Debug, Default, Deserialize)]
struct SittingMetadata {
    #[serde(default)]
    question_count: usize,
}

/// 题库扫描结果
#[derive(Debug, Clone, Default)]
pub struct CorpusScan {
    groups: Vec<SubjectGroup>,
    group_index: HashMap<String, usize>,
    seen_ids: HashSet<String>,
    pub warnings: Vec<ScanWarning>,
    /// 扫描到的场次目录数量
    pub sitting_count: usize,
    /// 各场次 metadata.json 中声明的题目总数
    pub declared_question_count: usize,
}

impl CorpusScan {
    /// 由内存中的记录构建分组（不做任何 I/O）
    pub fn from_records(records: impl IntoIterator<Item = QuestionRecord>) -> Self {
        let mut scan = Self::default();
        for record in records {
            let origin = PathBuf::from(&record.id);
            scan.insert(record, &origin);
        }
        scan
    }

    /// 加入一条记录；重复 id 只保留第一条，其余记为警告
    pub fn insert(&mut self, record: QuestionRecord, origin: &Path) -> bool {
        if !self.seen_ids.insert(record.id.clone()) {
            self.warn(
                ScanWarningKind::DuplicateId,
                origin,
                format!("重复的题目 id: {}，已跳过", record.id),
            );
            return false;
        }

        let key = record.subject_key();
        let idx = match self.group_index.get(&key) {
            Some(idx) => *idx,
            None => {
                self.groups.push(SubjectGroup {
                    key: key.clone(),
                    questions: Vec::new(),
                });
                self.group_index.insert(key, self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[idx].questions.push(record);
        true
    }

    fn warn(&mut self, kind: ScanWarningKind, path: &Path, reason: String) {
        tracing::warn!("加载文件失败 {}: {}", path.display(), reason);
        self.warnings.push(ScanWarning {
            kind,
            path: path.to_path_buf(),
            reason,
        });
    }

    pub fn groups(&self) -> &[SubjectGroup] {
        &self.groups
    }

    pub fn group(&self, key: &str) -> Option<&SubjectGroup> {
        self.group_index.get(key).map(|idx| &self.groups[*idx])
    }

    /// 被跳过的题目文件数（解析失败或重复 id），不含场次级别的警告
    pub fn skipped_files(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| w.kind.skips_question_file())
            .count()
    }

    /// 成功解析的题目总数
    pub fn question_count(&self) -> usize {
        self.groups.iter().map(|g| g.questions.len()).sum()
    }

    pub fn records(&self) -> impl Iterator<Item = &QuestionRecord> {
        self.groups.iter().flat_map(|g| g.questions.iter())
    }
}

/// 题目文件命名规则：`q*.json`
pub fn is_question_file(file_name: &str) -> bool {
    file_name.starts_with('q') && file_name.ends_with(".json")
}

/// 解析单个题目文件内容
pub fn parse_question(content: &str, path: &Path) -> Result<QuestionRecord> {
    serde_json::from_str(content).with_context(|| format!("无法解析题目文件: {}", path.display()))
}

/// 读取并解析单个题目文件
pub async fn load_question_file(path: &Path) -> Result<QuestionRecord> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取题目文件: {}", path.display()))?;
    parse_question(&content, path)
}

/// 按名称排序列出目录项，使扫描顺序与平台无关
async fn sorted_entries(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// 扫描题目根目录：每个子目录是一个考试场次，每个 `q*.json` 是一道题
///
/// 单个文件损坏不会中断扫描，只记录警告并跳过该文件。
pub async fn scan_corpus(questions_dir: &Path) -> AppResult<CorpusScan> {
    if !fs::try_exists(questions_dir).await.unwrap_or(false) {
        return Err(FileError::DirectoryNotFound {
            path: questions_dir.display().to_string(),
        }
        .into());
    }

    let sittings = sorted_entries(questions_dir)
        .await
        .map_err(|e| AppError::file_read_failed(questions_dir.display().to_string(), e))?;

    let mut scan = CorpusScan::default();

    for sitting_dir in sittings {
        if !fs::metadata(&sitting_dir).await.map(|m| m.is_dir()).unwrap_or(false) {
            continue;
        }
        scan.sitting_count += 1;
        let sitting = file_name(&sitting_dir);

        let files = match sorted_entries(&sitting_dir).await {
            Ok(files) => files,
            Err(e) => {
                scan.warn(ScanWarningKind::SittingDir, &sitting_dir, format!("无法读取目录: {}", e));
                continue;
            }
        };

        let mut loaded = 0;
        for path in files {
            let name = file_name(&path);
            if name == SITTING_METADATA_FILE {
                read_sitting_metadata(&mut scan, &path).await;
                continue;
            }
            if !is_question_file(&name) {
                continue;
            }

            match load_question_file(&path).await {
                Ok(record) => {
                    if scan.insert(record.with_source_sitting(sitting.clone()), &path) {
                        loaded += 1;
                    }
                }
                Err(e) => scan.warn(ScanWarningKind::QuestionFile, &path, format!("{:#}", e)),
            }
        }

        tracing::debug!("场次 {}: 成功加载 {} 个题目", sitting, loaded);
    }

    tracing::info!(
        "✓ 题库扫描完成: {} 个场次, {} 个题目, {} 个科目, {} 个警告",
        scan.sitting_count,
        scan.question_count(),
        scan.groups.len(),
        scan.warnings.len()
    );

    Ok(scan)
}

async fn read_sitting_metadata(scan: &mut CorpusScan, path: &Path) {
    let parsed = match fs::read_to_string(path).await {
        Ok(content) => serde_json::from_str::<SittingMetadata>(&content).map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    match parsed {
        Ok(meta) => scan.declared_question_count += meta.question_count,
        Err(reason) => scan.warn(
            ScanWarningKind::SittingMetadata,
            path,
            format!("无法解析场次元数据: {}", reason),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, level: &str, discipline: &str) -> QuestionRecord {
        serde_json::from_value(json!({
            "id": id,
            "metadata": {"exam": {"education_level": level, "discipline": discipline, "year": 2024, "tijdvak": 1}},
            "question": {"text": "", "max_score": 1}
        }))
        .unwrap()
    }

    #[test]
    fn test_is_question_file() {
        assert!(is_question_file("q1.json"));
        assert!(is_question_file("q_12.json"));
        assert!(!is_question_file("metadata.json"));
        assert!(!is_question_file("q1.json.bak"));
    }

    #[test]
    fn test_groups_by_subject_key_in_insertion_order() {
        let scan = CorpusScan::from_records(vec![
            record("a1", "vwo", "wiskunde_b"),
            record("b1", "havo", "biologie"),
            record("a2", "vwo", "wiskunde_b"),
        ]);

        let keys: Vec<&str> = scan.groups().iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["vwo_wiskunde_b", "havo_biologie"]);

        let ids: Vec<&str> = scan
            .group("vwo_wiskunde_b")
            .unwrap()
            .questions
            .iter()
            .map(|q| q.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a1", "a2"]);
        assert_eq!(scan.question_count(), 3);
        assert!(scan.warnings.is_empty());
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let scan = CorpusScan::from_records(vec![
            record("dup", "vwo", "economie"),
            record("dup", "havo", "economie"),
        ]);

        assert_eq!(scan.question_count(), 1);
        assert_eq!(scan.groups()[0].key, "vwo_economie");
        assert_eq!(scan.warnings.len(), 1);
        assert_eq!(scan.warnings[0].kind, ScanWarningKind::DuplicateId);
        assert_eq!(scan.skipped_files(), 1);
    }

    #[tokio::test]
    async fn test_bad_sitting_metadata_is_not_a_skipped_file() {
        let dir = tempfile::tempdir().unwrap();
        let sitting = dir.path().join("vwo_economie_2024_1");
        std::fs::create_dir_all(&sitting).unwrap();
        std::fs::write(sitting.join(SITTING_METADATA_FILE), "{ kapot").unwrap();
        std::fs::write(
            sitting.join("q1.json"),
            json!({
                "id": "vwo_economie_2024_1_q1",
                "metadata": {"exam": {"education_level": "vwo", "discipline": "economie", "year": 2024, "tijdvak": 1}},
                "question": {"text": "", "max_score": 1}
            })
            .to_string(),
        )
        .unwrap();
        std::fs::write(sitting.join("q2.json"), "{ \"id\": ").unwrap();

        let scan = scan_corpus(dir.path()).await.unwrap();

        assert_eq!(scan.question_count(), 1);
        assert_eq!(scan.warnings.len(), 2);
        assert_eq!(scan.warnings[0].kind, ScanWarningKind::SittingMetadata);
        assert_eq!(scan.warnings[1].kind, ScanWarningKind::QuestionFile);
        assert_eq!(scan.skipped_files(), 1);
    }

    #[test]
    fn test_parse_question_error_names_file() {
        let err = parse_question("{", Path::new("q9.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("q9.json"));
    }
}
