/// 日志工具模块
///
/// 提供日志初始化、运行日志文件和统计输出的辅助函数
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 输出
///
/// 优先使用 `RUST_LOG`，否则 verbose 时为 debug，默认 info。重复调用不会报错。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化运行日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n题目树构建日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)
        .with_context(|| format!("无法写入日志文件: {}", log_file_path))?;
    Ok(())
}

/// 向运行日志文件追加若干行
pub fn append_log_lines<I, S>(log_file_path: &str, lines: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .with_context(|| format!("无法打开日志文件: {}", log_file_path))?;

    for line in lines {
        writeln!(file, "{}", line.as_ref())?;
    }

    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `data_path`: 考试数据根目录
pub fn log_startup(data_path: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 题目树构建");
    info!("📁 数据目录: {}", data_path);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `subjects`: 科目数量
/// - `placed`: 放入树中的题目数
/// - `warnings`: 警告数量
/// - `output_file`: 输出文件路径
pub fn print_final_stats(subjects: usize, placed: usize, warnings: usize, output_file: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 科目: {}", subjects);
    info!("✅ 题目: {}", placed);
    info!("⚠️ 警告: {}", warnings);
    info!("{}", "=".repeat(60));
    info!("\n题目树已保存至: {}", output_file);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("Algebraïsche vaardigheden", 5), "Algeb...");
        assert_eq!(truncate_text("kort", 10), "kort");
    }

    #[test]
    fn test_log_file_header_and_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.txt");
        let path = path.to_str().unwrap();

        init_log_file(path).unwrap();
        append_log_lines(path, ["eerste", "tweede"]).unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(content.starts_with(&"=".repeat(60)));
        assert!(content.contains("题目树构建日志"));
        assert!(content.ends_with("eerste\ntweede\n"));
    }
}
