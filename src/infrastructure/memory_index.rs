//! 内存索引
//!
//! 在内存记录上求值类型化查询，用作测试夹具和本地演示

use crate::error::AppResult;
use crate::infrastructure::search_index::{fetch_document_by_id, fetch_documents_by_id, DocumentStore, SearchIndex};
use crate::models::{Filter, IndexRow, SolrDocument, SolrQuery};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// 内存索引
///
/// 记录按插入顺序返回，支持 term / field / terms / join 四种过滤
#[derive(Debug, Default)]
pub struct MemoryIndex {
    rows: Vec<IndexRow>,
    query_count: AtomicUsize,
}

impl MemoryIndex {
    pub fn new(rows: Vec<IndexRow>) -> Self {
        Self {
            rows,
            query_count: AtomicUsize::new(0),
        }
    }

    /// 从 JSON 对象列表创建，非对象的元素被忽略
    pub fn from_json(values: impl IntoIterator<Item = JsonValue>) -> Self {
        Self::new(values.into_iter().filter_map(IndexRow::from_json).collect())
    }

    /// 已执行的查询次数
    pub fn query_count(&self) -> usize {
        self.query_count.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 计算过滤条件命中的记录掩码
    fn select(&self, filter: &Filter) -> Vec<bool> {
        match filter {
            Filter::Term { field, value } | Filter::Field { field, value } => self
                .rows
                .iter()
                .map(|row| row.values(field).iter().any(|v| v == value))
                .collect(),
            Filter::Terms { field, values } => self
                .rows
                .iter()
                .map(|row| row.values(field).iter().any(|v| values.contains(v)))
                .collect(),
            Filter::Join { from, to, inner } => {
                let targets: HashSet<String> = self
                    .rows
                    .iter()
                    .zip(self.select(inner))
                    .filter(|(_, hit)| *hit)
                    .flat_map(|(row, _)| row.values(from))
                    .collect();
                self.rows
                    .iter()
                    .map(|row| row.values(to).iter().any(|v| targets.contains(v)))
                    .collect()
            }
        }
    }
}

#[async_trait]
impl SearchIndex for MemoryIndex {
    async fn query(&self, query: &SolrQuery) -> AppResult<Vec<IndexRow>> {
        query.validate()?;
        self.query_count.fetch_add(1, Ordering::SeqCst);
        debug!("内存索引查询: {:?}", query.to_params());

        let mut mask = self.select(query.q());
        for fq in query.filters() {
            for (hit, keep) in mask.iter_mut().zip(self.select(fq)) {
                *hit = *hit && keep;
            }
        }

        Ok(self
            .rows
            .iter()
            .zip(mask)
            .filter(|(_, hit)| *hit)
            .take(query.row_limit())
            .map(|(row, _)| row.project(query.field_list()))
            .collect())
    }
}

#[async_trait]
impl DocumentStore for MemoryIndex {
    async fn fetch(&self, id: &str) -> AppResult<Option<SolrDocument>> {
        fetch_document_by_id(self, id).await
    }

    async fn fetch_many(&self, ids: &[String]) -> AppResult<Vec<SolrDocument>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        fetch_documents_by_id(self, ids).await
    }
}
