//! 推荐作品存储 - 业务能力层

use crate::error::AppResult;
use async_trait::async_trait;
use std::collections::HashSet;

/// 推荐作品存储
#[async_trait]
pub trait FeaturedWorkStore: Send + Sync {
    /// 作品是否已被推荐
    async fn is_featured(&self, work_id: &str) -> AppResult<bool>;

    /// 是否还能再推荐一个作品
    async fn can_create_another(&self) -> AppResult<bool>;
}

/// 内存中的推荐作品列表
#[derive(Debug, Clone)]
pub struct InMemoryFeaturedWorks {
    work_ids: HashSet<String>,
    limit: usize,
}

impl InMemoryFeaturedWorks {
    pub fn new(limit: usize) -> Self {
        Self {
            work_ids: HashSet::new(),
            limit,
        }
    }

    pub fn with_featured(mut self, work_id: impl Into<String>) -> Self {
        self.work_ids.insert(work_id.into());
        self
    }
}

#[async_trait]
impl FeaturedWorkStore for InMemoryFeaturedWorks {
    async fn is_featured(&self, work_id: &str) -> AppResult<bool> {
        Ok(self.work_ids.contains(work_id))
    }

    async fn can_create_another(&self) -> AppResult<bool> {
        Ok(self.work_ids.len() < self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_limit() {
        let store = InMemoryFeaturedWorks::new(2).with_featured("w1");
        assert!(store.is_featured("w1").await.unwrap());
        assert!(!store.is_featured("w2").await.unwrap());
        assert!(store.can_create_another().await.unwrap());

        let store = store.with_featured("w2");
        assert!(!store.can_create_another().await.unwrap());
    }
}
