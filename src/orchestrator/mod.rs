//! 编排层（Orchestration Layer）
//!
//! ```text
//! show_work::App (持有 SolrClient)
//!     ↓
//! presenters::WorkShowPresenter (单个作品)
//!     ↓
//! services (能力层：resolver / classifier / ability)
//!     ↓
//! infrastructure (基础设施：SearchIndex / DocumentStore)
//! ```

pub mod show_work;

pub use show_work::App;
