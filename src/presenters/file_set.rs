use crate::models::SolrDocument;
use crate::presenters::context::PresenterContext;
use crate::services::{AbilityTarget, Action};
use std::fmt;
use std::sync::Arc;

/// 文件集展示器
#[derive(Clone)]
pub struct FileSetPresenter {
    document: Arc<SolrDocument>,
    ctx: PresenterContext,
}

impl FileSetPresenter {
    pub fn new(document: SolrDocument, ctx: PresenterContext) -> Self {
        Self {
            document: Arc::new(document),
            ctx,
        }
    }

    pub fn id(&self) -> &str {
        &self.document.id
    }

    pub fn document(&self) -> &SolrDocument {
        &self.document
    }

    pub fn title(&self) -> &[String] {
        &self.document.title
    }

    pub fn page_title(&self) -> Option<&str> {
        self.document.title.first().map(String::as_str)
    }

    /// 没有读权限时显示 "File"
    pub fn link_name(&self) -> String {
        if self.ctx.ability().can(Action::Read, AbilityTarget::Id(self.id())) {
            self.document.to_string()
        } else {
            "File".to_string()
        }
    }

    pub fn is_editor(&self) -> bool {
        self.ctx.ability().can(Action::Edit, AbilityTarget::Document(&self.document))
    }
}

impl fmt::Display for FileSetPresenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.document.as_ref(), f)
    }
}

impl fmt::Debug for FileSetPresenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSetPresenter").field("id", &self.id()).finish()
    }
}
