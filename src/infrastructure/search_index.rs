//! 索引与文档存储的抽象 - 基础设施层
//!
//! 只暴露"查询"和"取文档"能力，不认识作品 / 文件集

use crate::config::MAX_ROWS;
use crate::error::AppResult;
use crate::models::{fields, is_queryable_value, is_terms_value, Filter, IndexRow, SolrDocument, SolrQuery};
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::debug;

/// 搜索索引客户端
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// 执行查询，返回命中记录（按索引返回顺序）
    async fn query(&self, query: &SolrQuery) -> AppResult<Vec<IndexRow>>;
}

/// 后备文档存储
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// 按 ID 获取文档，不存在时返回 None
    async fn fetch(&self, id: &str) -> AppResult<Option<SolrDocument>>;

    /// 批量获取文档
    ///
    /// 返回顺序不保证与 `ids` 一致，不存在的 ID 不出现在结果中
    async fn fetch_many(&self, ids: &[String]) -> AppResult<Vec<SolrDocument>> {
        let mut documents = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(document) = self.fetch(id).await? {
                documents.push(document);
            }
        }
        Ok(documents)
    }
}

/// 按 ID 获取单个文档
///
/// 使用带引号的 term 查询，ID 中的逗号等字符原样保留；
/// 空 ID 或含控制字符的 ID 不可能命中，直接返回 None
pub async fn fetch_document_by_id<I>(index: &I, id: &str) -> AppResult<Option<SolrDocument>>
where
    I: SearchIndex + ?Sized,
{
    if !is_queryable_value(id) {
        debug!("跳过无法查询的 ID: {:?}", id);
        return Ok(None);
    }
    let query = SolrQuery::new(Filter::term(fields::ID, id)).rows(1);
    match index.query(&query).await?.first() {
        Some(row) => Ok(Some(SolrDocument::from_row(row)?)),
        None => Ok(None),
    }
}

/// 通过 `{!terms f=id}` 查询批量获取文档
///
/// # 参数
/// - `ids`: 待获取的 ID，可含重复
///
/// # 返回
/// 找到的文档，顺序不保证。ID 先去重，超过单次行数上限时分批查询；
/// 含逗号的 ID 无法放进 terms 列表，逐个用 term 查询；
/// 无法查询的 ID 视为不存在
pub async fn fetch_documents_by_id<I>(index: &I, ids: &[String]) -> AppResult<Vec<SolrDocument>>
where
    I: SearchIndex + ?Sized,
{
    let mut seen = HashSet::new();
    let mut batched = Vec::new();
    let mut singles = Vec::new();
    for id in ids.iter().filter(|id| seen.insert(id.as_str())) {
        if is_terms_value(id) {
            batched.push(id.clone());
        } else if is_queryable_value(id) {
            singles.push(id.as_str());
        } else {
            debug!("跳过无法查询的 ID: {:?}", id);
        }
    }

    let mut documents = Vec::with_capacity(batched.len() + singles.len());
    for chunk in batched.chunks(MAX_ROWS) {
        let query = SolrQuery::new(Filter::terms(fields::ID, chunk.iter().cloned())).rows(chunk.len());
        for row in index.query(&query).await? {
            documents.push(SolrDocument::from_row(&row)?);
        }
    }
    for id in singles {
        if let Some(document) = fetch_document_by_id(index, id).await? {
            documents.push(document);
        }
    }
    Ok(documents)
}
