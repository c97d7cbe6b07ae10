//! 作品展示器
//!
//! 组合索引查询结果、后备文档字段和嵌套展示器，构造作品详情页的视图模型。
//! 所有成员查询结果在展示器生命周期内缓存（一次请求）

use crate::error::AppResult;
use crate::models::fields::COLLECTION_MODEL;
use crate::models::{ordered_difference, ordered_intersection, SolrDocument};
use crate::presenters::collection::CollectionPresenter;
use crate::presenters::composite::{CompositePresenterKind, MemberPresenter};
use crate::presenters::context::{PresenterContext, RequestContext};
use crate::presenters::factory::{build_presenters, CollectionKind, FileSetKind, PresenterKind, WorkKind};
use crate::presenters::file_set::FileSetPresenter;
use crate::services::{Ability, AbilityTarget, Action, MemberClassifier, MembershipResolver};
use crate::utils::underscore;
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// 作品展示器
///
/// 克隆开销很小，克隆体共享同一份缓存
#[derive(Clone)]
pub struct WorkShowPresenter {
    inner: Arc<WorkState>,
}

struct WorkState {
    document: SolrDocument,
    ctx: PresenterContext,
    ordered_ids: OnceCell<Vec<String>>,
    file_set_ids: OnceCell<HashSet<String>>,
    file_set_presenters: OnceCell<Vec<FileSetPresenter>>,
    work_presenters: OnceCell<Vec<WorkShowPresenter>>,
    representative: OnceCell<Option<MemberPresenter>>,
    featured: OnceCell<bool>,
}

impl WorkShowPresenter {
    pub fn new(document: SolrDocument, ctx: PresenterContext) -> Self {
        Self {
            inner: Arc::new(WorkState {
                document,
                ctx,
                ordered_ids: OnceCell::new(),
                file_set_ids: OnceCell::new(),
                file_set_presenters: OnceCell::new(),
                work_presenters: OnceCell::new(),
                representative: OnceCell::new(),
                featured: OnceCell::new(),
            }),
        }
    }

    /// 按 ID 加载文档并构造展示器，文档不存在时返回 None
    pub async fn load(id: &str, ctx: PresenterContext) -> AppResult<Option<Self>> {
        let ids = [id.to_string()];
        Ok(build_presenters(&ids, &WorkKind, &ctx).await?.into_iter().next())
    }

    pub fn id(&self) -> &str {
        &self.inner.document.id
    }

    pub fn document(&self) -> &SolrDocument {
        &self.inner.document
    }

    pub fn context(&self) -> &PresenterContext {
        &self.inner.ctx
    }

    pub fn ability(&self) -> &dyn Ability {
        self.inner.ctx.ability()
    }

    pub fn request(&self) -> Option<&RequestContext> {
        self.inner.ctx.request()
    }

    // ========== 元数据 ==========

    pub fn page_title(&self) -> Option<&str> {
        self.document().title.first().map(String::as_str)
    }

    pub fn title(&self) -> &[String] {
        &self.document().title
    }

    pub fn date_created(&self) -> &[String] {
        &self.document().date_created
    }

    pub fn date_modified(&self) -> Option<DateTime<Utc>> {
        self.document().date_modified
    }

    pub fn date_uploaded(&self) -> Option<DateTime<Utc>> {
        self.document().date_uploaded
    }

    pub fn description(&self) -> &[String] {
        &self.document().description
    }

    pub fn creator(&self) -> &[String] {
        &self.document().creator
    }

    pub fn contributor(&self) -> &[String] {
        &self.document().contributor
    }

    pub fn subject(&self) -> &[String] {
        &self.document().subject
    }

    pub fn publisher(&self) -> &[String] {
        &self.document().publisher
    }

    pub fn language(&self) -> &[String] {
        &self.document().language
    }

    pub fn embargo_release_date(&self) -> Option<DateTime<Utc>> {
        self.document().embargo_release_date
    }

    pub fn lease_expiration_date(&self) -> Option<DateTime<Utc>> {
        self.document().lease_expiration_date
    }

    pub fn rights(&self) -> &[String] {
        &self.document().rights
    }

    pub fn source(&self) -> &[String] {
        &self.document().source
    }

    pub fn thumbnail_id(&self) -> Option<&str> {
        self.document().thumbnail_id.as_deref()
    }

    pub fn representative_id(&self) -> Option<&str> {
        self.document().representative_id()
    }

    pub fn member_of_collection_ids(&self) -> &[String] {
        &self.document().member_of_collection_ids
    }

    pub fn based_near(&self) -> &[String] {
        &self.document().based_near
    }

    pub fn related_url(&self) -> &[String] {
        &self.document().related_url
    }

    pub fn depositor(&self) -> Option<&str> {
        self.document().depositor.as_deref()
    }

    pub fn identifier(&self) -> &[String] {
        &self.document().identifier
    }

    pub fn resource_type(&self) -> &[String] {
        &self.document().resource_type
    }

    pub fn keyword(&self) -> &[String] {
        &self.document().keyword
    }

    pub fn itemtype(&self) -> &'static str {
        self.document().itemtype()
    }

    pub fn admin_set(&self) -> &[String] {
        &self.document().admin_set
    }

    pub fn human_readable_type(&self) -> Option<&str> {
        self.document().human_readable_type.as_deref()
    }

    pub fn is_collection(&self) -> bool {
        self.document().is_collection()
    }

    // ========== 成员 ==========

    /// 有序成员 ID
    pub async fn ordered_ids(&self) -> AppResult<&[String]> {
        let ids = self
            .inner
            .ordered_ids
            .get_or_try_init(|| async {
                let ctx = &self.inner.ctx;
                MembershipResolver::new(ctx.index(), ctx.settings().row_limit)
                    .resolve_ordered_members(self.id())
                    .await
            })
            .await?;
        Ok(ids.as_slice())
    }

    /// 属于本作品的文件集 ID（无序）
    pub async fn file_set_ids(&self) -> AppResult<&HashSet<String>> {
        self.inner
            .file_set_ids
            .get_or_try_init(|| async {
                let ctx = &self.inner.ctx;
                MemberClassifier::new(ctx.index(), ctx.settings().row_limit)
                    .classify_leaf_members(self.id())
                    .await
            })
            .await
    }

    /// 有序成员中的文件集 ID，保持成员顺序
    async fn ordered_file_set_ids(&self) -> AppResult<Vec<String>> {
        let ordered = self.ordered_ids().await?;
        let file_sets = self.file_set_ids().await?;
        Ok(ordered_intersection(ordered, file_sets))
    }

    /// 文件集成员的展示器
    pub async fn file_set_presenters(&self) -> AppResult<&[FileSetPresenter]> {
        let presenters = self
            .inner
            .file_set_presenters
            .get_or_try_init(|| async {
                let ids = self.ordered_file_set_ids().await?;
                self.member_presenters(&ids, &FileSetKind).await
            })
            .await?;
        Ok(presenters.as_slice())
    }

    /// 非文件集成员（子作品）的展示器
    pub async fn work_presenters(&self) -> AppResult<&[WorkShowPresenter]> {
        let presenters = self
            .inner
            .work_presenters
            .get_or_try_init(|| async {
                let ordered = self.ordered_ids().await?;
                let file_sets = self.file_set_ids().await?;
                let ids = ordered_difference(ordered, file_sets);
                self.member_presenters(&ids, &WorkKind).await
            })
            .await?;
        Ok(presenters.as_slice())
    }

    /// 为指定 ID 构造指定类型的展示器
    pub async fn member_presenters<K>(&self, ids: &[String], kind: &K) -> AppResult<Vec<K::Output>>
    where
        K: PresenterKind + Sync,
    {
        build_presenters(ids, kind, &self.inner.ctx).await
    }

    /// 全部有序成员的展示器，按成员类型选择
    pub async fn ordered_member_presenters(&self) -> AppResult<Vec<MemberPresenter>> {
        let kind = self.composite_presenter_kind().await?;
        let ids = self.ordered_ids().await?;
        self.member_presenters(ids, &kind).await
    }

    /// 以有序文件集为叶子集合的复合展示器类型
    pub async fn composite_presenter_kind(&self) -> AppResult<CompositePresenterKind> {
        Ok(CompositePresenterKind::new(self.ordered_file_set_ids().await?))
    }

    /// 代表成员的展示器
    ///
    /// 代表成员是作品时，继续取它的代表成员；它没有代表成员时返回该作品本身。
    /// 链上出现重复 ID 或超过最大深度时停止下钻
    pub async fn representative_presenter(&self) -> AppResult<Option<MemberPresenter>> {
        let representative = self
            .inner
            .representative
            .get_or_try_init(|| async {
                let mut visited = HashSet::new();
                self.resolve_representative(&mut visited, 0).await
            })
            .await?;
        Ok(representative.clone())
    }

    fn resolve_representative<'a>(
        &'a self,
        visited: &'a mut HashSet<String>,
        depth: usize,
    ) -> BoxFuture<'a, AppResult<Option<MemberPresenter>>> {
        Box::pin(async move {
            visited.insert(self.id().to_string());

            let Some(representative_id) = self.representative_id() else {
                return Ok(None);
            };

            if visited.contains(representative_id) {
                warn!("作品 {} 的代表成员 {} 形成循环，停止解析", self.id(), representative_id);
                return Ok(None);
            }

            let max_depth = self.inner.ctx.settings().max_representative_depth;
            if depth > max_depth {
                warn!("作品 {} 的代表成员解析超过最大深度 {}", self.id(), max_depth);
                return Ok(None);
            }

            let kind = self.composite_presenter_kind().await?;
            let ids = [representative_id.to_string()];
            let Some(result) = self.member_presenters(&ids, &kind).await?.into_iter().next() else {
                debug!("作品 {} 的代表成员 {} 没有后备文档", self.id(), representative_id);
                return Ok(None);
            };

            if let MemberPresenter::Work(work) = &result {
                if let Some(deeper) = work.resolve_representative(visited, depth + 1).await? {
                    return Ok(Some(deeper));
                }
            }

            Ok(Some(result))
        })
    }

    /// 本作品所属集合的展示器
    pub async fn member_of_collection_presenters(&self) -> AppResult<Vec<CollectionPresenter>> {
        self.member_presenters(self.member_of_collection_ids(), &CollectionKind)
            .await
    }

    /// 按模型名分组的集合展示器
    ///
    /// # 参数
    /// - `filtered_by`: 只保留该分组（不区分大小写）
    /// - `except`: 排除的分组
    pub async fn grouped_presenters(
        &self,
        filtered_by: Option<&str>,
        except: &[&str],
    ) -> AppResult<BTreeMap<String, Vec<CollectionPresenter>>> {
        let mut grouped: BTreeMap<String, Vec<CollectionPresenter>> = BTreeMap::new();
        for presenter in self.member_of_collection_presenters().await? {
            grouped
                .entry(underscore(presenter.model_name()))
                .or_default()
                .push(presenter);
        }

        if let Some(filter) = filtered_by {
            grouped.retain(|key, _| key.to_lowercase() == filter);
        }
        grouped.retain(|key, _| !except.iter().any(|e| *e == key.as_str()));

        Ok(grouped)
    }

    // ========== 权限相关 ==========

    /// 没有读权限时显示 "File"
    pub fn link_name(&self) -> String {
        if self.ability().can(Action::Read, AbilityTarget::Id(self.id())) {
            self.to_string()
        } else {
            "File".to_string()
        }
    }

    pub fn is_editor(&self) -> bool {
        self.ability().can(Action::Edit, AbilityTarget::Document(self.document()))
    }

    /// 提交者的 twitter 账号，没有时使用产品账号
    pub async fn tweeter(&self) -> AppResult<String> {
        if let Some(depositor) = self.depositor() {
            let handle = self.inner.ctx.users().twitter_handle(depositor).await?;
            if let Some(handle) = handle.filter(|h| !h.trim().is_empty()) {
                return Ok(format!("@{}", handle));
            }
        }
        Ok(self.inner.ctx.settings().product_twitter_handle.clone())
    }

    /// 已注册的作品类型（下划线命名）加上 "collection"
    pub fn presenter_types(&self) -> Vec<String> {
        self.inner
            .ctx
            .settings()
            .registered_work_types
            .iter()
            .map(|t| underscore(t))
            .chain(std::iter::once(underscore(COLLECTION_MODEL)))
            .collect()
    }

    /// 当前用户可以推荐作品，且作品公开
    pub fn work_featurable(&self) -> bool {
        self.ability().can(Action::Create, AbilityTarget::FeaturedWork) && self.document().is_public()
    }

    pub async fn display_feature_link(&self) -> AppResult<bool> {
        if !self.work_featurable() {
            return Ok(false);
        }
        Ok(self.inner.ctx.featured_works().can_create_another().await? && !self.is_featured().await?)
    }

    pub async fn display_unfeature_link(&self) -> AppResult<bool> {
        Ok(self.work_featurable() && self.is_featured().await?)
    }

    async fn is_featured(&self) -> AppResult<bool> {
        let featured = self
            .inner
            .featured
            .get_or_try_init(|| self.inner.ctx.featured_works().is_featured(self.id()))
            .await?;
        Ok(*featured)
    }
}

impl fmt::Display for WorkShowPresenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.document(), f)
    }
}

impl fmt::Debug for WorkShowPresenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkShowPresenter").field("id", &self.id()).finish()
    }
}
