//! 复合展示器选择
//!
//! 调用方不按类型分支，只向选择器要"合适的展示器"：
//! 叶子成员得到文件集展示器，其余得到作品展示器

use crate::models::{MemberKind, SolrDocument};
use crate::presenters::context::PresenterContext;
use crate::presenters::factory::PresenterKind;
use crate::presenters::file_set::FileSetPresenter;
use crate::presenters::work_show::WorkShowPresenter;
use std::collections::HashSet;
use std::fmt;

/// 成员展示器
#[derive(Debug, Clone)]
pub enum MemberPresenter {
    FileSet(FileSetPresenter),
    Work(WorkShowPresenter),
}

impl MemberPresenter {
    pub fn id(&self) -> &str {
        match self {
            MemberPresenter::FileSet(p) => p.id(),
            MemberPresenter::Work(p) => p.id(),
        }
    }

    pub fn kind(&self) -> MemberKind {
        match self {
            MemberPresenter::FileSet(_) => MemberKind::Leaf,
            MemberPresenter::Work(_) => MemberKind::Composite,
        }
    }

    pub fn document(&self) -> &SolrDocument {
        match self {
            MemberPresenter::FileSet(p) => p.document(),
            MemberPresenter::Work(p) => p.document(),
        }
    }

    pub fn link_name(&self) -> String {
        match self {
            MemberPresenter::FileSet(p) => p.link_name(),
            MemberPresenter::Work(p) => p.link_name(),
        }
    }

    pub fn as_file_set(&self) -> Option<&FileSetPresenter> {
        match self {
            MemberPresenter::FileSet(p) => Some(p),
            MemberPresenter::Work(_) => None,
        }
    }

    pub fn as_work(&self) -> Option<&WorkShowPresenter> {
        match self {
            MemberPresenter::Work(p) => Some(p),
            MemberPresenter::FileSet(_) => None,
        }
    }
}

impl fmt::Display for MemberPresenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.document(), f)
    }
}

/// 复合展示器类型
///
/// 持有叶子成员集合，按 ID 选择文件集或作品展示器
#[derive(Debug, Clone, Default)]
pub struct CompositePresenterKind {
    leaf_ids: HashSet<String>,
}

impl CompositePresenterKind {
    pub fn new(leaf_ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            leaf_ids: leaf_ids.into_iter().collect(),
        }
    }

    pub fn kind_for(&self, id: &str) -> MemberKind {
        MemberKind::classify(id, &self.leaf_ids)
    }
}

impl PresenterKind for CompositePresenterKind {
    type Output = MemberPresenter;

    fn build(&self, document: SolrDocument, ctx: &PresenterContext) -> MemberPresenter {
        match self.kind_for(&document.id) {
            MemberKind::Leaf => MemberPresenter::FileSet(FileSetPresenter::new(document, ctx.clone())),
            MemberKind::Composite => MemberPresenter::Work(WorkShowPresenter::new(document, ctx.clone())),
        }
    }
}
