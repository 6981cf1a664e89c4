use crate::models::exercise::Exercise;
use serde::Serialize;

/// 题目树节点
///
/// 序列化为 `{id, label, type, children}`，叶子节点为 `{id, label, type: "exercise", exercise}`。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub id: String,
    pub label: String,
    #[serde(flatten)]
    pub body: NodeBody,
}

/// 节点角色：科目 / 领域 / 子领域 / 练习题
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeBody {
    Vak { children: Vec<TreeNode> },
    Domein { children: Vec<TreeNode> },
    Subdomein { children: Vec<TreeNode> },
    Exercise { exercise: Box<Exercise> },
}

impl TreeNode {
    pub fn vak(id: impl Into<String>, label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            body: NodeBody::Vak { children },
        }
    }

    pub fn domein(id: impl Into<String>, label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            body: NodeBody::Domein { children },
        }
    }

    pub fn subdomein(
        id: impl Into<String>,
        label: impl Into<String>,
        children: Vec<TreeNode>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            body: NodeBody::Subdomein { children },
        }
    }

    /// 叶子节点：id 与标签都取自练习题
    pub fn leaf(exercise: Exercise) -> Self {
        Self {
            id: exercise.id.clone(),
            label: exercise.title.clone(),
            body: NodeBody::Exercise {
                exercise: Box::new(exercise),
            },
        }
    }

    pub fn children(&self) -> &[TreeNode] {
        match &self.body {
            NodeBody::Vak { children }
            | NodeBody::Domein { children }
            | NodeBody::Subdomein { children } => children.as_slice(),
            NodeBody::Exercise { .. } => &[],
        }
    }

    pub fn exercise(&self) -> Option<&Exercise> {
        match &self.body {
            NodeBody::Exercise { exercise } => Some(&**exercise),
            _ => None,
        }
    }

    /// 节点下所有练习题（深度优先，树的顺序）
    pub fn exercises(&self) -> Vec<&Exercise> {
        let mut out = Vec::new();
        collect_exercises(std::slice::from_ref(self), &mut out);
        out
    }

    /// 节点下所有练习题的 id，选中一个领域就等于选中这些题目
    pub fn exercise_ids(&self) -> Vec<&str> {
        self.exercises().into_iter().map(|e| e.id.as_str()).collect()
    }
}

fn collect_exercises<'a>(nodes: &'a [TreeNode], out: &mut Vec<&'a Exercise>) {
    for node in nodes {
        match &node.body {
            NodeBody::Exercise { exercise } => out.push(&**exercise),
            _ => collect_exercises(node.children(), out),
        }
    }
}

/// 把整棵树展开成练习题列表（树的顺序）
pub fn flatten_exercises(tree: &[TreeNode]) -> Vec<&Exercise> {
    let mut out = Vec::new();
    collect_exercises(tree, &mut out);
    out
}

/// 按 id 查找节点
pub fn find_node<'a>(tree: &'a [TreeNode], id: &str) -> Option<&'a TreeNode> {
    for node in tree {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_node(node.children(), id) {
            return Some(found);
        }
    }
    None
}

/// 按题目 id 查找练习题
pub fn find_exercise<'a>(tree: &'a [TreeNode], id: &str) -> Option<&'a Exercise> {
    find_node(tree, id).and_then(TreeNode::exercise)
}
