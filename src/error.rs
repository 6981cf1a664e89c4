use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 课程分类（domain / subdomain）数据错误，属于致命错误
    #[error("课程分类错误: {0}")]
    Taxonomy(#[from] TaxonomyError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 课程分类数据错误
///
/// 没有分类数据就无法构建题目树，这些错误会直接终止本次运行。
#[derive(Debug, Error)]
pub enum TaxonomyError {
    /// 分类文件不存在
    #[error("分类文件不存在: {path}")]
    NotFound { path: String },
    /// 分类文件无法解析
    #[error("分类文件解析失败 ({path}): {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// 分类文件中某一条记录格式不正确
    #[error("分类记录格式错误 ({path}, key={key}): {source}")]
    BadEntry {
        path: String,
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML 配置文件解析失败
    #[error("配置文件解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 是否为致命的分类数据错误
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::Taxonomy(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
