//! 展示器工厂
//!
//! 按输入顺序为每个有后备文档的 ID 构造一个展示器，
//! 找不到文档的 ID 直接跳过，不视为错误

use crate::error::AppResult;
use crate::models::SolrDocument;
use crate::presenters::collection::CollectionPresenter;
use crate::presenters::context::PresenterContext;
use crate::presenters::file_set::FileSetPresenter;
use crate::presenters::work_show::WorkShowPresenter;
use std::collections::HashMap;
use tracing::debug;

/// 展示器类型
///
/// 由调用方作为参数传入，决定为每个文档构造哪种展示器
pub trait PresenterKind {
    type Output;

    fn build(&self, document: SolrDocument, ctx: &PresenterContext) -> Self::Output;
}

/// 文件集展示器
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSetKind;

/// 作品展示器
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkKind;

/// 集合展示器
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionKind;

impl PresenterKind for FileSetKind {
    type Output = FileSetPresenter;

    fn build(&self, document: SolrDocument, ctx: &PresenterContext) -> FileSetPresenter {
        FileSetPresenter::new(document, ctx.clone())
    }
}

impl PresenterKind for WorkKind {
    type Output = WorkShowPresenter;

    fn build(&self, document: SolrDocument, ctx: &PresenterContext) -> WorkShowPresenter {
        WorkShowPresenter::new(document, ctx.clone())
    }
}

impl PresenterKind for CollectionKind {
    type Output = CollectionPresenter;

    fn build(&self, document: SolrDocument, ctx: &PresenterContext) -> CollectionPresenter {
        CollectionPresenter::new(document, ctx.clone())
    }
}

/// 批量构造展示器
///
/// # 参数
/// - `ids`: 要构造展示器的 ID 列表
/// - `kind`: 展示器类型
/// - `ctx`: 展示器上下文（权限、请求信息等）
///
/// # 返回
/// 返回与 `ids` 顺序一致的展示器列表，缺失文档的 ID 被过滤
pub async fn build_presenters<K>(ids: &[String], kind: &K, ctx: &PresenterContext) -> AppResult<Vec<K::Output>>
where
    K: PresenterKind + Sync,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let documents: HashMap<String, SolrDocument> = ctx
        .store()
        .fetch_many(ids)
        .await?
        .into_iter()
        .map(|document| (document.id.clone(), document))
        .collect();

    let mut presenters = Vec::with_capacity(ids.len());
    for id in ids {
        match documents.get(id) {
            Some(document) => presenters.push(kind.build(document.clone(), ctx)),
            None => debug!("成员 {} 没有后备文档，已跳过", id),
        }
    }

    Ok(presenters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryIndex;
    use crate::services::PermissionSet;
    use serde_json::json;
    use std::sync::Arc;

    fn ctx() -> PresenterContext {
        let index = Arc::new(MemoryIndex::from_json(vec![
            json!({"id": "a", "title_tesim": ["A"]}),
            json!({"id": "b", "title_tesim": ["B"]}),
        ]));
        PresenterContext::from_backend(index, Arc::new(PermissionSet::anonymous()))
    }

    #[tokio::test]
    async fn test_output_follows_input_order() {
        let ids: Vec<String> = ["b", "x", "a", "b"].iter().map(|s| s.to_string()).collect();
        let presenters = build_presenters(&ids, &CollectionKind, &ctx()).await.unwrap();

        let built: Vec<&str> = presenters.iter().map(|p| p.id()).collect();
        assert_eq!(built, vec!["b", "a", "b"]);
    }
}
