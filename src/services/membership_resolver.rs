//! 有序成员解析 - 业务能力层
//!
//! 只负责"父对象 → 有序成员 ID 列表"，不关心成员类型

use crate::error::AppResult;
use crate::infrastructure::SearchIndex;
use crate::models::{fields, Filter, SolrQuery};
use tracing::{debug, warn};

/// 有序成员解析器
pub struct MembershipResolver<'a> {
    index: &'a dyn SearchIndex,
    row_limit: usize,
}

impl<'a> MembershipResolver<'a> {
    pub fn new(index: &'a dyn SearchIndex, row_limit: usize) -> Self {
        Self { index, row_limit }
    }

    /// 查询父对象的代理记录，只取有序目标字段
    pub fn query_for(&self, parent_id: &str) -> SolrQuery {
        SolrQuery::new(Filter::term(fields::PROXY_IN, parent_id))
            .rows(self.row_limit)
            .field(fields::ORDERED_TARGETS)
    }

    /// 解析有序成员
    ///
    /// 按记录顺序拼接每条记录的（多值）有序目标字段。
    /// 超过行数上限时静默截断
    pub async fn resolve_ordered_members(&self, parent_id: &str) -> AppResult<Vec<String>> {
        let rows = self.index.query(&self.query_for(parent_id)).await?;

        if rows.len() >= self.row_limit {
            warn!("作品 {} 的代理记录达到上限 {}，成员列表可能被截断", parent_id, self.row_limit);
        }

        let ordered: Vec<String> = rows
            .iter()
            .flat_map(|row| row.values(fields::ORDERED_TARGETS))
            .collect();

        debug!("作品 {} 有序成员 {} 个", parent_id, ordered.len());
        Ok(ordered)
    }
}
