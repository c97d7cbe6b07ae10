//! 作品展示 - 编排层
//!
//! 持有索引客户端，按作品 ID 构造展示器并输出成员组成，
//! 不做具体的成员判断

use crate::clients::SolrClient;
use crate::config::Config;
use crate::presenters::{MemberPresenter, PresenterContext, PresenterSettings, WorkShowPresenter};
use crate::services::{InMemoryFeaturedWorks, PermissionSet};
use crate::utils::logging;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    ctx: PresenterContext,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(&config);

        let client = Arc::new(SolrClient::new(&config).context("无法创建 Solr 客户端")?);
        let ctx = PresenterContext::from_backend(client, Arc::new(PermissionSet::anonymous()))
            .with_featured_works(Arc::new(InMemoryFeaturedWorks::new(config.featured_work_limit)))
            .with_settings(PresenterSettings::from(&config));

        Ok(Self { ctx })
    }

    /// 使用已有的上下文创建（测试和嵌入使用）
    pub fn with_context(ctx: PresenterContext) -> Self {
        Self { ctx }
    }

    /// 展示一个作品，作品不存在时返回 false
    pub async fn run(&self, work_id: &str) -> Result<bool> {
        let Some(work) = WorkShowPresenter::load(work_id, self.ctx.clone())
            .await
            .with_context(|| format!("无法加载作品: {}", work_id))?
        else {
            warn!("⚠️ 作品 {} 不存在", work_id);
            return Ok(false);
        };

        info!("📄 {} ({})", work.page_title().unwrap_or(work.id()), work.itemtype());

        let ordered = work.ordered_member_presenters().await?;
        logging::log_members("有序成员", &entries(ordered.iter().map(|p| (p.id(), p.link_name()))));

        let file_sets = work.file_set_presenters().await?;
        logging::log_members("文件集", &entries(file_sets.iter().map(|p| (p.id(), p.link_name()))));

        let works = work.work_presenters().await?;
        logging::log_members("子作品", &entries(works.iter().map(|p| (p.id(), p.link_name()))));

        match work.representative_presenter().await? {
            Some(MemberPresenter::FileSet(p)) => info!("🖼 代表文件集: {}", p.id()),
            Some(MemberPresenter::Work(p)) => info!("🖼 代表作品: {}", p.id()),
            None => info!("🖼 没有代表成员"),
        }

        let collections = work.member_of_collection_presenters().await?;
        logging::log_members(
            "所属集合",
            &entries(collections.iter().map(|p| (p.id(), p.to_string()))),
        );

        logging::log_summary_end(work.id());
        Ok(true)
    }
}

fn entries<'a>(items: impl Iterator<Item = (&'a str, String)>) -> Vec<(String, String)> {
    items.map(|(id, name)| (id.to_string(), name)).collect()
}
