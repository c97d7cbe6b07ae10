//! 用户信息查询 - 业务能力层

use crate::error::AppResult;
use async_trait::async_trait;
use std::collections::HashMap;

/// 用户目录
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// 按用户标识查询 twitter 账号（不带 @）
    async fn twitter_handle(&self, user_key: &str) -> AppResult<Option<String>>;
}

/// 内存中的用户目录
#[derive(Debug, Clone, Default)]
pub struct InMemoryUsers {
    handles: HashMap<String, String>,
}

impl InMemoryUsers {
    pub fn with_user(mut self, user_key: impl Into<String>, twitter_handle: impl Into<String>) -> Self {
        self.handles.insert(user_key.into(), twitter_handle.into());
        self
    }
}

#[async_trait]
impl UserDirectory for InMemoryUsers {
    async fn twitter_handle(&self, user_key: &str) -> AppResult<Option<String>> {
        Ok(self.handles.get(user_key).cloned())
    }
}
