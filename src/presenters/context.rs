//! 展示器上下文
//!
//! 封装一次请求内构造展示器所需的全部依赖：权限、请求信息、索引、
//! 文档存储以及展示器设置。所有展示器共享同一个上下文的克隆

use crate::config::Config;
use crate::infrastructure::{DocumentStore, SearchIndex};
use crate::services::{Ability, FeaturedWorkStore, InMemoryFeaturedWorks, InMemoryUsers, UserDirectory};
use std::fmt;
use std::sync::Arc;

/// 请求信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// 站点根地址
    pub base_url: String,
    /// 请求路径
    pub path: String,
}

/// 展示器设置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenterSettings {
    /// 成员查询的行数上限
    pub row_limit: usize,
    /// 代表成员解析的最大深度
    pub max_representative_depth: usize,
    /// 默认的 twitter 账号
    pub product_twitter_handle: String,
    /// 已注册的作品类型
    pub registered_work_types: Vec<String>,
}

impl Default for PresenterSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PresenterSettings {
    fn from(config: &Config) -> Self {
        Self {
            row_limit: config.row_limit,
            max_representative_depth: config.max_representative_depth,
            product_twitter_handle: config.product_twitter_handle.clone(),
            registered_work_types: config.registered_work_types.clone(),
        }
    }
}

/// 展示器上下文
#[derive(Clone)]
pub struct PresenterContext {
    ability: Arc<dyn Ability>,
    request: Option<RequestContext>,
    index: Arc<dyn SearchIndex>,
    store: Arc<dyn DocumentStore>,
    featured_works: Arc<dyn FeaturedWorkStore>,
    users: Arc<dyn UserDirectory>,
    settings: Arc<PresenterSettings>,
}

impl PresenterContext {
    /// 创建上下文，推荐作品和用户目录使用空的内存实现
    pub fn new(index: Arc<dyn SearchIndex>, store: Arc<dyn DocumentStore>, ability: Arc<dyn Ability>) -> Self {
        Self {
            ability,
            request: None,
            index,
            store,
            featured_works: Arc::new(InMemoryFeaturedWorks::new(Config::default().featured_work_limit)),
            users: Arc::new(InMemoryUsers::default()),
            settings: Arc::new(PresenterSettings::default()),
        }
    }

    /// 索引和文档存储由同一个后端提供时使用
    pub fn from_backend<B>(backend: Arc<B>, ability: Arc<dyn Ability>) -> Self
    where
        B: SearchIndex + DocumentStore + 'static,
    {
        Self::new(backend.clone(), backend, ability)
    }

    pub fn with_request(mut self, request: RequestContext) -> Self {
        self.request = Some(request);
        self
    }

    pub fn with_featured_works(mut self, featured_works: Arc<dyn FeaturedWorkStore>) -> Self {
        self.featured_works = featured_works;
        self
    }

    pub fn with_users(mut self, users: Arc<dyn UserDirectory>) -> Self {
        self.users = users;
        self
    }

    pub fn with_settings(mut self, settings: PresenterSettings) -> Self {
        self.settings = Arc::new(settings);
        self
    }

    pub fn ability(&self) -> &dyn Ability {
        self.ability.as_ref()
    }

    pub fn request(&self) -> Option<&RequestContext> {
        self.request.as_ref()
    }

    pub fn index(&self) -> &dyn SearchIndex {
        self.index.as_ref()
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    pub fn featured_works(&self) -> &dyn FeaturedWorkStore {
        self.featured_works.as_ref()
    }

    pub fn users(&self) -> &dyn UserDirectory {
        self.users.as_ref()
    }

    pub fn settings(&self) -> &PresenterSettings {
        &self.settings
    }
}

impl fmt::Debug for PresenterContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresenterContext")
            .field("request", &self.request)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
