//! 展示器层
//!
//! ```text
//! WorkShowPresenter
//!     ├─ MembershipResolver   (有序成员)
//!     ├─ MemberClassifier     (叶子成员)
//!     └─ build_presenters     (按 PresenterKind 构造成员展示器)
//!            └─ CompositePresenterKind → FileSetPresenter | WorkShowPresenter
//! ```

pub mod collection;
pub mod composite;
pub mod context;
pub mod factory;
pub mod file_set;
pub mod work_show;

pub use collection::CollectionPresenter;
pub use composite::{CompositePresenterKind, MemberPresenter};
pub use context::{PresenterContext, PresenterSettings, RequestContext};
pub use factory::{build_presenters, CollectionKind, FileSetKind, PresenterKind, WorkKind};
pub use file_set::FileSetPresenter;
pub use work_show::WorkShowPresenter;
