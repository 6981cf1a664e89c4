use exam_tree::models::loaders::{load_taxonomy, scan_corpus};
use exam_tree::orchestrator::{assemble, is_fatal_error, load_exercise_tree};
use exam_tree::{find_exercise, find_node, flatten_exercises, App, Config, Difficulty, NodeBody};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_json(path: &Path, value: &Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn question(id: &str, level: &str, discipline: &str, link: i64, domains: &[i64], subdomains: &[i64], max_score: u32) -> Value {
    let domains: Vec<_> = domains.iter().map(|id| json!({"id": id, "name": "", "prefix_code": ""})).collect();
    let subdomains: Vec<_> = subdomains.iter().map(|id| json!({"id": id, "name": "", "prefix_code": 1})).collect();
    json!({
        "id": id,
        "metadata": {
            "exam": {"education_level": level, "discipline": discipline, "year": 2023, "tijdvak": 1},
            "curriculum": {
                "education_level_discipline_id": link,
                "domains": domains,
                "subdomains": subdomains,
                "sub_learning_objective_ids": []
            }
        },
        "question": {"text": "Bereken.", "max_score": max_score, "is_self_scored": false},
        "solution": {"text": "Uitwerking", "image": null},
        "content_context": [],
        "bijlages": []
    })
}

fn config_for(dir: &TempDir) -> Config {
    Config {
        data_path: dir.path().to_path_buf(),
        ..Config::default()
    }
}

/// 构建测试数据目录
///
/// 场景 A：vwo_wiskunde_b 有两道题，一道属于 subdomain 7（domain 3），一道完全未分类。
/// 场景 B：同一场次里有一个损坏的 JSON 文件。
fn fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write_json(
        &root.join("curriculum/domains.json"),
        &json!({
            "3": {"id": 3, "name": "Algebra en tellen", "prefix_code": "B", "education_level_discipline": 12},
            "4": {"id": 4, "name": "Meetkunde", "prefix_code": "E", "education_level_discipline": 12},
            "20": {"id": 20, "name": "Cellen", "prefix_code": "A", "education_level_discipline": 30}
        }),
    );
    write_json(
        &root.join("curriculum/subdomains.json"),
        &json!({
            "7": {"id": 7, "name": "Algebraïsche vaardigheden", "domain": 3, "prefix_code": "B1"},
            "8": {"id": 8, "name": "Tellen", "domain": 3, "prefix_code": 2},
            "9": {"id": 9, "name": "Vlakke meetkunde", "domain": 4, "prefix_code": "E1"},
            "21": {"id": 21, "name": "Celdeling", "domain": 20, "prefix_code": "A1"}
        }),
    );

    let sitting = root.join("questions/vwo_wiskunde_b_2023_1");
    write_json(&sitting.join("metadata.json"), &json!({"question_count": 3}));
    write_json(&sitting.join("q1.json"), &question("vwo_wiskunde_b_2023_1_q1", "vwo", "wiskunde_b", 12, &[], &[7], 2));
    write_json(&sitting.join("q2.json"), &question("vwo_wiskunde_b_2023_1_q2", "vwo", "wiskunde_b", 12, &[], &[], 4));
    fs::write(sitting.join("q3.json"), "{ \"id\": \"vwo_wiskunde_b_2023_1_q3\", ").unwrap();
    fs::write(sitting.join("notes.txt"), "geen vraag").unwrap();

    let sitting = root.join("questions/havo_biologie_2022_2");
    write_json(&sitting.join("q1.json"), &question("havo_biologie_2022_2_q1", "havo", "biologie", 30, &[20], &[], 5));

    dir
}

#[tokio::test]
async fn test_scenario_a_tree_shape() {
    let dir = fixture();
    let outcome = load_exercise_tree(&config_for(&dir)).await.unwrap();
    let subjects = &outcome.tree.subjects;

    let ids: Vec<&str> = subjects.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["vwo_wiskunde_b", "havo_biologie"]);

    let vak = &subjects[0];
    assert_eq!(vak.label, "VWO Wiskunde B");
    let children: Vec<&str> = vak.children().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(
        children,
        vec!["vwo_wiskunde_b/domain-3", "vwo_wiskunde_b/unclassified"]
    );

    let domain = &vak.children()[0];
    assert_eq!(domain.label, "B: Algebra en tellen");
    assert_eq!(domain.children().len(), 1);
    let subdomain = &domain.children()[0];
    assert_eq!(subdomain.id, "vwo_wiskunde_b/subdomain-7");
    assert_eq!(subdomain.label, "B1: Algebraïsche vaardigheden");
    assert_eq!(subdomain.exercise_ids(), vec!["vwo_wiskunde_b_2023_1_q1"]);

    let unclassified = &vak.children()[1];
    assert!(matches!(unclassified.body, NodeBody::Domein { .. }));
    assert_eq!(unclassified.exercise_ids(), vec!["vwo_wiskunde_b_2023_1_q2"]);

    // domain 4 没有题目，不应出现
    assert!(find_node(subjects, "vwo_wiskunde_b/domain-4").is_none());

    // 只引用 domain 的题目进入"Overige vragen"
    let other = find_node(subjects, "havo_biologie/domain-20-other").unwrap();
    assert_eq!(other.label, "Overige vragen");
}

#[tokio::test]
async fn test_scenario_b_corrupted_file_is_skipped() {
    let dir = fixture();
    let scan = scan_corpus(&dir.path().join("questions")).await.unwrap();

    assert_eq!(scan.question_count(), 3);
    assert_eq!(scan.sitting_count, 2);
    assert_eq!(scan.declared_question_count, 3);
    assert_eq!(scan.warnings.len(), 1);
    assert!(scan.warnings[0].path.ends_with("q3.json"));

    let taxonomy = load_taxonomy(&dir.path().join("curriculum")).await.unwrap();
    let outcome = assemble(&taxonomy, &scan);
    assert!(find_exercise(&outcome.tree.subjects, "vwo_wiskunde_b_2023_1_q3").is_none());
    assert_eq!(outcome.coverage.skipped_files, 1);
    assert!(outcome.warnings.iter().any(|w| w.contains("q3.json")));
}

#[tokio::test]
async fn test_scenario_c_difficulty_tiers() {
    let dir = fixture();
    let outcome = load_exercise_tree(&config_for(&dir)).await.unwrap();
    let tree = &outcome.tree.subjects;

    assert_eq!(find_exercise(tree, "vwo_wiskunde_b_2023_1_q1").unwrap().difficulty, Difficulty::Easy);
    assert_eq!(find_exercise(tree, "vwo_wiskunde_b_2023_1_q2").unwrap().difficulty, Difficulty::Medium);
    assert_eq!(find_exercise(tree, "havo_biologie_2022_2_q1").unwrap().difficulty, Difficulty::Hard);
}

#[tokio::test]
async fn test_every_question_appears_exactly_once() {
    let dir = fixture();
    let scan = scan_corpus(&dir.path().join("questions")).await.unwrap();
    let taxonomy = load_taxonomy(&dir.path().join("curriculum")).await.unwrap();
    let outcome = assemble(&taxonomy, &scan);

    let leaves: Vec<&str> = flatten_exercises(&outcome.tree.subjects)
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    let unique: HashSet<&str> = leaves.iter().copied().collect();
    let expected: HashSet<&str> = scan.records().map(|r| r.id.as_str()).collect();

    assert_eq!(leaves.len(), unique.len());
    assert_eq!(unique, expected);
    assert_eq!(outcome.tree.placed(), scan.question_count());
}

#[test]
fn test_repeated_loads_are_identical() {
    let dir = fixture();
    let first = tokio_test::block_on(load_exercise_tree(&config_for(&dir))).unwrap();
    let second = tokio_test::block_on(load_exercise_tree(&config_for(&dir))).unwrap();

    assert_eq!(first.tree.subjects, second.tree.subjects);
    assert_eq!(first.coverage, second.coverage);
}

#[tokio::test]
async fn test_missing_taxonomy_is_fatal() {
    let dir = fixture();
    fs::remove_file(dir.path().join("curriculum/subdomains.json")).unwrap();

    let err = load_exercise_tree(&config_for(&dir)).await.unwrap_err();
    assert!(format!("{:#}", err).contains("subdomains.json"));
    assert!(is_fatal_error(&err));
}

#[tokio::test]
async fn test_missing_questions_dir_is_not_fatal_taxonomy_error() {
    let dir = fixture();
    fs::remove_dir_all(dir.path().join("questions")).unwrap();

    let err = load_exercise_tree(&config_for(&dir)).await.unwrap_err();
    assert!(format!("{:#}", err).contains("questions"));
    assert!(!is_fatal_error(&err));
}

#[tokio::test]
async fn test_app_writes_output_and_log() {
    let dir = fixture();
    let out = tempfile::tempdir().unwrap();
    let config = Config {
        output_file: out.path().join("tree.json"),
        output_log_file: out.path().join("run.txt").display().to_string(),
        ..config_for(&dir)
    };

    let outcome = App::initialize(config.clone()).await.unwrap().run().await.unwrap();
    assert_eq!(outcome.coverage.total, 3);

    let written: Value = serde_json::from_str(&fs::read_to_string(&config.output_file).unwrap()).unwrap();
    assert_eq!(written["subjects"][0]["id"], "vwo_wiskunde_b");
    assert_eq!(written["coverage"]["total"], 3);
    assert!(written["generatedAt"].is_string());

    let log = fs::read_to_string(&config.output_log_file).unwrap();
    assert!(log.contains("q3.json"));
}
