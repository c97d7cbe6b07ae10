use crate::models::fields::COLLECTION_MODEL;
use crate::models::SolrDocument;
use crate::presenters::context::PresenterContext;
use crate::services::{AbilityTarget, Action};
use std::fmt;
use std::sync::Arc;

/// 集合展示器
#[derive(Clone)]
pub struct CollectionPresenter {
    document: Arc<SolrDocument>,
    ctx: PresenterContext,
}

impl CollectionPresenter {
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

    pub fn description(&self) -> &[String] {
        &self.document.description
    }

    /// 模型名，索引中缺失时按集合处理
    pub fn model_name(&self) -> &str {
        self.document.model_name().unwrap_or(COLLECTION_MODEL)
    }

    pub fn is_editor(&self) -> bool {
        self.ctx.ability().can(Action::Edit, AbilityTarget::Document(&self.document))
    }
}

impl fmt::Display for CollectionPresenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.document.as_ref(), f)
    }
}

impl fmt::Debug for CollectionPresenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionPresenter")
            .field("id", &self.id())
            .field("model_name", &self.model_name())
            .finish()
    }
}
