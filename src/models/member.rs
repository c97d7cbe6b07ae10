//! 成员类型与保序的集合运算

use std::collections::HashSet;

/// 成员类型
///
/// 由是否属于叶子集合决定，不是成员引用本身的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// 叶子成员（文件集）
    Leaf,
    /// 复合成员（子作品）
    Composite,
}

impl MemberKind {
    /// 根据叶子集合判断成员类型
    pub fn classify(id: &str, leaf_ids: &HashSet<String>) -> Self {
        if leaf_ids.contains(id) {
            MemberKind::Leaf
        } else {
            MemberKind::Composite
        }
    }
}

/// 有序列表与集合求交，保持原有顺序
pub fn ordered_intersection(ordered: &[String], set: &HashSet<String>) -> Vec<String> {
    ordered.iter().filter(|id| set.contains(*id)).cloned().collect()
}

/// 有序列表与集合求差，保持原有顺序
pub fn ordered_difference(ordered: &[String], set: &HashSet<String>) -> Vec<String> {
    ordered.iter().filter(|id| !set.contains(*id)).cloned().collect()
}
