/// Solr HTTP 客户端
///
/// 封装所有与 Solr select 接口相关的调用逻辑
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::{fetch_document_by_id, fetch_documents_by_id, DocumentStore, SearchIndex};
use crate::models::{IndexRow, SolrDocument, SolrQuery};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::debug;

/// Solr 客户端
pub struct SolrClient {
    http: reqwest::Client,
    base_url: String,
}

impl SolrClient {
    /// 创建新的 Solr 客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::index_request_failed(&config.solr_url, e))?;

        Ok(Self {
            http,
            base_url: config.solr_url.trim_end_matches('/').to_string(),
        })
    }

    /// select 接口地址
    pub fn select_url(&self) -> String {
        format!("{}/select", self.base_url)
    }

    /// 提取响应中的文档列表
    ///
    /// # 参数
    /// - `body`: Solr 返回的完整 JSON
    ///
    /// # 返回
    /// 返回 `response.docs` 中的记录，结构不符时返回错误
    pub fn extract_docs(endpoint: &str, body: JsonValue) -> AppResult<Vec<IndexRow>> {
        let docs = match body {
            JsonValue::Object(mut map) => map
                .remove("response")
                .and_then(|mut response| response.get_mut("docs").map(JsonValue::take)),
            _ => None,
        };

        match docs {
            Some(JsonValue::Array(items)) => Ok(items.into_iter().filter_map(IndexRow::from_json).collect()),
            _ => Err(AppError::index_bad_response(
                endpoint,
                200,
                Some("响应缺少 response.docs".to_string()),
            )),
        }
    }
}

#[async_trait]
impl SearchIndex for SolrClient {
    async fn query(&self, query: &SolrQuery) -> AppResult<Vec<IndexRow>> {
        query.validate()?;

        let endpoint = self.select_url();
        let params = query.to_params();
        debug!("Solr 查询 Payload: {:?}", params);

        let response = self
            .http
            .get(&endpoint)
            .query(&params)
            .send()
            .await
            .map_err(|e| AppError::index_request_failed(&endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.ok().filter(|t| !t.is_empty());
            return Err(AppError::index_bad_response(&endpoint, status.as_u16(), message));
        }

        let body: JsonValue = response
            .json()
            .await
            .map_err(|e| AppError::index_request_failed(&endpoint, e))?;

        let rows = Self::extract_docs(&endpoint, body)?;
        debug!("Solr 返回 {} 条记录", rows.len());
        Ok(rows)
    }
}

#[async_trait]
impl DocumentStore for SolrClient {
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
