//! # Work Presenters
//!
//! 数字仓库作品详情页的视图模型：解析作品的有序成员，区分文件集与子作品，
//! 并为每个成员构造展示器
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 索引查询与文档存储抽象，`MemoryIndex` 内存实现
//! - `clients/` - `SolrClient`，基于 HTTP 的 Solr 实现
//!
//! ### ② 业务能力层（Services）
//! - `MembershipResolver` - 有序成员解析
//! - `MemberClassifier` - 叶子成员（文件集）识别
//! - `Ability` / `FeaturedWorkStore` / `UserDirectory` - 外部协作者
//!
//! ### ③ 展示器层（Presenters）
//! - `build_presenters` - 按 `PresenterKind` 批量构造，过滤缺失文档
//! - `CompositePresenterKind` - 按成员类型选择展示器
//! - `WorkShowPresenter` - 作品展示器
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/show_work` - 命令行展示一个作品

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod presenters;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use clients::SolrClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{DocumentStore, MemoryIndex, SearchIndex};
pub use models::{Filter, SolrDocument, SolrQuery};
pub use orchestrator::App;
pub use presenters::{
    build_presenters, CompositePresenterKind, MemberPresenter, PresenterContext, WorkShowPresenter,
};
