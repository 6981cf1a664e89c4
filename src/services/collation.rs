//! 荷兰语标签排序
//!
//! 近似 `localeCompare(.., 'nl')`：先去掉变音符号并忽略大小写比较，
//! 相同时再按原始字符串比较，保证结果确定。

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// 排序键：NFD 分解后去掉组合符号，再转小写
pub fn collation_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// 按荷兰语习惯比较两个标签
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}
