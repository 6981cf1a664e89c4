use crate::error::{AppResult, ConfigError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "exam_tree.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 考试数据根目录（包含 curriculum/ 与 questions/）
    pub data_path: PathBuf,
    /// 题目树 JSON 输出文件
    pub output_file: PathBuf,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("alfie_exam_data"),
            output_file: PathBuf::from("exercise_tree.json"),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    /// 读取 TOML 配置文件（可选）后再叠加环境变量
    ///
    /// 配置文件路径由 `EXAM_TREE_CONFIG` 指定，默认 `exam_tree.toml`；
    /// 文件不存在时直接使用默认值。
    pub fn load() -> AppResult<Self> {
        let path = std::env::var("EXAM_TREE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let base = if path.exists() {
            Self::from_toml_file(&path)?
        } else {
            Self::default()
        };

        Ok(base.with_env_overrides())
    }

    /// 从 TOML 文件解析配置
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::AppError::file_read_failed(path.display().to_string(), e))?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// 从 TOML 字符串解析配置，`origin` 只用于错误信息
    pub fn from_toml_str(content: &str, origin: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|source| {
            ConfigError::TomlParseFailed {
                path: origin.to_string(),
                source,
            }
            .into()
        })
    }

    fn with_env_overrides(self) -> Self {
        Self {
            data_path: std::env::var("EXAM_DATA_PATH").map(PathBuf::from).unwrap_or(self.data_path),
            output_file: std::env::var("OUTPUT_FILE").map(PathBuf::from).unwrap_or(self.output_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
        }
    }

    /// 分类目录
    pub fn curriculum_dir(&self) -> PathBuf {
        self.data_path.join("curriculum")
    }

    /// 题目目录（每个考试场次一个子目录）
    pub fn questions_dir(&self) -> PathBuf {
        self.data_path.join("questions")
    }
}
