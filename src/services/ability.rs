//! 权限判断 - 业务能力层
//!
//! 只回答"能不能"，拒绝以 false 表示，从不返回错误

use crate::models::SolrDocument;
use std::collections::HashSet;

/// 操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Read,
    Edit,
    Create,
}

/// 权限判断的对象
#[derive(Debug, Clone, Copy)]
pub enum AbilityTarget<'a> {
    /// 只知道 ID 的对象
    Id(&'a str),
    /// 已加载的文档
    Document(&'a SolrDocument),
    /// 推荐作品
    FeaturedWork,
}

/// 当前用户的权限上下文
pub trait Ability: Send + Sync {
    fn can(&self, action: Action, target: AbilityTarget<'_>) -> bool;
}

/// 基于 ID 集合的权限
///
/// - 可编辑的对象同时可读
/// - 公开文档对任何人可读
#[derive(Debug, Clone, Default)]
pub struct PermissionSet {
    readable: HashSet<String>,
    editable: HashSet<String>,
    can_feature: bool,
}

impl PermissionSet {
    /// 匿名用户：只能读公开文档
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_read(mut self, id: impl Into<String>) -> Self {
        self.readable.insert(id.into());
        self
    }

    pub fn with_edit(mut self, id: impl Into<String>) -> Self {
        self.editable.insert(id.into());
        self
    }

    /// 允许管理推荐作品
    pub fn with_featuring(mut self) -> Self {
        self.can_feature = true;
        self
    }

    fn can_read_id(&self, id: &str) -> bool {
        self.readable.contains(id) || self.editable.contains(id)
    }
}

impl Ability for PermissionSet {
    fn can(&self, action: Action, target: AbilityTarget<'_>) -> bool {
        match (action, target) {
            (Action::Read, AbilityTarget::Id(id)) => self.can_read_id(id),
            (Action::Read, AbilityTarget::Document(doc)) => doc.is_public() || self.can_read_id(&doc.id),
            (Action::Edit, AbilityTarget::Id(id)) => self.editable.contains(id),
            (Action::Edit, AbilityTarget::Document(doc)) => self.editable.contains(&doc.id),
            (Action::Create, AbilityTarget::FeaturedWork) => self.can_feature,
            _ => false,
        }
    }
}
