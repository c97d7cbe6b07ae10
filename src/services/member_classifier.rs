//! 成员分类 - 业务能力层
//!
//! 只负责找出父对象有序列表中的叶子成员（文件集），不关心顺序

use crate::error::AppResult;
use crate::infrastructure::SearchIndex;
use crate::models::{fields, Filter, SolrQuery};
use std::collections::HashSet;
use tracing::debug;

/// 成员分类器
pub struct MemberClassifier<'a> {
    index: &'a dyn SearchIndex,
    row_limit: usize,
}

impl<'a> MemberClassifier<'a> {
    pub fn new(index: &'a dyn SearchIndex, row_limit: usize) -> Self {
        Self { index, row_limit }
    }

    /// 查询叶子模型的记录，并用 join 限定在父对象的有序列表内
    pub fn query_for(&self, parent_id: &str) -> SolrQuery {
        SolrQuery::new(Filter::field(fields::HAS_MODEL, fields::LEAF_MODEL))
            .filter(Filter::join(
                fields::ORDERED_TARGETS,
                fields::ID,
                Filter::term(fields::ID, fields::list_source_id(parent_id)),
            ))
            .rows(self.row_limit)
            .field(fields::ID)
    }

    /// 返回叶子成员 ID 集合，只用于成员判断
    pub async fn classify_leaf_members(&self, parent_id: &str) -> AppResult<HashSet<String>> {
        let rows = self.index.query(&self.query_for(parent_id)).await?;

        let leaf_ids: HashSet<String> = rows.iter().flat_map(|row| row.values(fields::ID)).collect();

        debug!("作品 {} 叶子成员 {} 个", parent_id, leaf_ids.len());
        Ok(leaf_ids)
    }
}
