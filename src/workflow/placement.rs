//! 已放置题目集合
//!
//! 同一科目内每道题只能被一个桶认领一次：先按分类顺序认领的桶优先。
//! 集合由调用方显式持有并逐步传入，不使用全局状态。

use crate::models::question::QuestionRecord;
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct Placement {
    placed: HashSet<String>,
}

impl Placement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_placed(&self, question_id: &str) -> bool {
        self.placed.contains(question_id)
    }

    /// 认领所有尚未放置且满足条件的题目，按原顺序返回并标记为已放置
    pub fn claim<'a, F>(&mut self, questions: &'a [QuestionRecord], mut matches: F) -> Vec<&'a QuestionRecord>
    where
        F: FnMut(&QuestionRecord) -> bool,
    {
        let mut claimed = Vec::new();
        for question in questions {
            if self.is_placed(&question.id) || !matches(question) {
                continue;
            }
            self.placed.insert(question.id.clone());
            claimed.push(question);
        }
        claimed
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }
}
