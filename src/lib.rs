//! # Exam Tree
//!
//! 把零散的考试题目文件按课程分类组装成"科目 → 领域 → 子领域 → 练习题"树的 Rust 程序
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 题目、分类、练习题、树节点等数据结构
//! - `models/loaders` - 分类加载器（致命失败）与题库扫描器（逐文件容错）
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，都是无状态的纯函数
//! - `exercise_builder` - 题目 → 练习题投影（难度、标题、题号）
//! - `collation` - 荷兰语标签排序
//! - `coverage` - 分类覆盖率统计
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个科目"的完整组装流程
//! - `SubjectCtx` - 上下文封装（科目键 + 学段 × 学科组合 id）
//! - `Placement` - 已放置题目集合，显式传递
//! - `assemble_subject` - 按 subdomain → domain 其他 → 未分类的顺序认领题目
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/tree_builder` - 处理所有科目并排序
//! - `orchestrator/pipeline` - 加载 → 组装 → 输出的完整运行
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{
    find_exercise, find_node, flatten_exercises, CorpusScan, Difficulty, Exercise, NodeBody,
    QuestionRecord, Taxonomy, TreeNode,
};
pub use orchestrator::{build_exercise_tree, load_exercise_tree, App, RunOutcome, TreeBuild};
pub use workflow::{assemble_subject, SubjectOutcome};
