//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责把加载、组装和输出串成一次完整运行，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `pipeline` - 运行流水线
//! - 管理应用生命周期（初始化、运行）
//! - 加载分类数据与题库（致命错误与可恢复警告分开处理）
//! - 写出题目树 JSON 和运行日志
//! - 输出全局统计信息
//!
//! ### `tree_builder` - 题目树构建器
//! - 遍历所有科目分组（Vec<SubjectGroup>）
//! - 调用 workflow::assemble_subject 组装单个科目
//! - 对科目节点排序
//!
//! ## 层次关系
//!
//! ```text
//! pipeline (加载 → 组装 → 输出)
//!     ↓
//! tree_builder (处理 Vec<SubjectGroup>)
//!     ↓
//! workflow::assemble_subject (处理单个科目)
//!     ↓
//! services (能力层：练习题投影 / 排序 / 覆盖率)
//!     ↓
//! models (数据与加载器)
//! ```

pub mod pipeline;
pub mod tree_builder;

// 重新导出主要类型
pub use pipeline::{assemble, is_fatal_error, load_exercise_tree, App, RunOutcome, TreeOutput};
pub use tree_builder::{build_exercise_tree, build_tree_from_groups, TreeBuild};
