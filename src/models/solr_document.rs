//! 展示器的后备文档
//!
//! 只暴露展示器实际用到的字段，每个字段都有确定的类型

use crate::error::AppResult;
use crate::models::fields::COLLECTION_MODEL;
use crate::models::index_row::{json_strings, IndexRow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

/// 公开可见性
const VISIBILITY_OPEN: &str = "open";

/// 默认的 schema.org 类型
const DEFAULT_ITEMTYPE: &str = "http://schema.org/CreativeWork";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SolrDocument {
    #[serde(deserialize_with = "required_string")]
    pub id: String,

    #[serde(rename = "title_tesim", default, deserialize_with = "one_or_many")]
    pub title: Vec<String>,
    #[serde(rename = "date_created_tesim", default, deserialize_with = "one_or_many")]
    pub date_created: Vec<String>,
    #[serde(rename = "date_modified_dtsi", default, deserialize_with = "first_timestamp")]
    pub date_modified: Option<DateTime<Utc>>,
    #[serde(rename = "date_uploaded_dtsi", default, deserialize_with = "first_timestamp")]
    pub date_uploaded: Option<DateTime<Utc>>,
    #[serde(rename = "description_tesim", default, deserialize_with = "one_or_many")]
    pub description: Vec<String>,
    #[serde(rename = "creator_tesim", default, deserialize_with = "one_or_many")]
    pub creator: Vec<String>,
    #[serde(rename = "contributor_tesim", default, deserialize_with = "one_or_many")]
    pub contributor: Vec<String>,
    #[serde(rename = "subject_tesim", default, deserialize_with = "one_or_many")]
    pub subject: Vec<String>,
    #[serde(rename = "publisher_tesim", default, deserialize_with = "one_or_many")]
    pub publisher: Vec<String>,
    #[serde(rename = "language_tesim", default, deserialize_with = "one_or_many")]
    pub language: Vec<String>,
    #[serde(rename = "embargo_release_date_dtsi", default, deserialize_with = "first_timestamp")]
    pub embargo_release_date: Option<DateTime<Utc>>,
    #[serde(rename = "lease_expiration_date_dtsi", default, deserialize_with = "first_timestamp")]
    pub lease_expiration_date: Option<DateTime<Utc>>,
    #[serde(rename = "rights_tesim", default, deserialize_with = "one_or_many")]
    pub rights: Vec<String>,
    #[serde(rename = "source_tesim", default, deserialize_with = "one_or_many")]
    pub source: Vec<String>,
    #[serde(rename = "thumbnail_id_ssi", default, deserialize_with = "first_string")]
    pub thumbnail_id: Option<String>,
    #[serde(rename = "hasRelatedMediaFragment_ssim", default, deserialize_with = "first_string")]
    pub representative_id: Option<String>,
    #[serde(rename = "member_of_collection_ids_ssim", default, deserialize_with = "one_or_many")]
    pub member_of_collection_ids: Vec<String>,

    #[serde(rename = "based_near_tesim", default, deserialize_with = "one_or_many")]
    pub based_near: Vec<String>,
    #[serde(rename = "related_url_tesim", default, deserialize_with = "one_or_many")]
    pub related_url: Vec<String>,
    #[serde(rename = "depositor_tesim", default, deserialize_with = "first_string")]
    pub depositor: Option<String>,
    #[serde(rename = "identifier_tesim", default, deserialize_with = "one_or_many")]
    pub identifier: Vec<String>,
    #[serde(rename = "resource_type_tesim", default, deserialize_with = "one_or_many")]
    pub resource_type: Vec<String>,
    #[serde(rename = "keyword_tesim", default, deserialize_with = "one_or_many")]
    pub keyword: Vec<String>,
    #[serde(rename = "admin_set_tesim", default, deserialize_with = "one_or_many")]
    pub admin_set: Vec<String>,

    #[serde(rename = "has_model_ssim", default, deserialize_with = "one_or_many")]
    pub has_model: Vec<String>,
    #[serde(rename = "human_readable_type_tesim", default, deserialize_with = "first_string")]
    pub human_readable_type: Option<String>,
    #[serde(rename = "visibility_ssi", default, deserialize_with = "first_string")]
    pub visibility: Option<String>,
}

impl SolrDocument {
    /// 从索引记录解析文档
    pub fn from_row(row: &IndexRow) -> AppResult<Self> {
        Ok(serde_json::from_value(row.as_json())?)
    }

    /// 模型名（has_model 的第一个值）
    pub fn model_name(&self) -> Option<&str> {
        self.has_model.first().map(String::as_str)
    }

    pub fn is_collection(&self) -> bool {
        self.model_name() == Some(COLLECTION_MODEL)
    }

    pub fn is_public(&self) -> bool {
        self.visibility.as_deref() == Some(VISIBILITY_OPEN)
    }

    /// 有效的代表成员 ID（空字符串视为没有）
    pub fn representative_id(&self) -> Option<&str> {
        self.representative_id.as_deref().filter(|id| !id.trim().is_empty())
    }

    /// schema.org 微数据类型
    pub fn itemtype(&self) -> &'static str {
        match self.resource_type.first().map(String::as_str) {
            Some("Article") => "http://schema.org/Article",
            Some("Audio") => "http://schema.org/AudioObject",
            Some("Book") => "http://schema.org/Book",
            Some("Conference Proceeding") => "http://schema.org/ScholarlyArticle",
            Some("Dataset") => "http://schema.org/Dataset",
            Some("Image") => "http://schema.org/ImageObject",
            Some("Map or Cartographic Material") => "http://schema.org/Map",
            Some("Video") => "http://schema.org/VideoObject",
            _ => DEFAULT_ITEMTYPE,
        }
    }
}

impl std::fmt::Display for SolrDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.title.is_empty() {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{}", self.title.join(", "))
        }
    }
}

// ========== 字段解析 ==========

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(json_strings(&JsonValue::deserialize(deserializer)?))
}

fn first_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(json_strings(&JsonValue::deserialize(deserializer)?).into_iter().next())
}

fn required_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    first_string(deserializer)?.ok_or_else(|| serde::de::Error::custom("文档缺少 id"))
}

/// 无法解析的时间戳按缺失处理
fn first_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(first_string(deserializer)?
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn doc(value: JsonValue) -> SolrDocument {
        SolrDocument::from_row(&IndexRow::from_json(value).unwrap()).unwrap()
    }

    #[test]
    fn test_parse_work_document() {
        let document = doc(json!({
            "id": "w1",
            "title_tesim": ["A Title", "Another"],
            "creator_tesim": "Jane",
            "date_uploaded_dtsi": "2017-01-31T14:26:07Z",
            "date_modified_dtsi": "not a date",
            "hasRelatedMediaFragment_ssim": ["fs1"],
            "has_model_ssim": ["GenericWork"],
            "visibility_ssi": "open",
            "resource_type_tesim": ["Image"]
        }));

        assert_eq!(document.id, "w1");
        assert_eq!(document.title, vec!["A Title", "Another"]);
        assert_eq!(document.creator, vec!["Jane"]);
        assert_eq!(
            document.date_uploaded,
            Some(Utc.with_ymd_and_hms(2017, 1, 31, 14, 26, 7).unwrap())
        );
        assert_eq!(document.date_modified, None);
        assert_eq!(document.representative_id(), Some("fs1"));
        assert_eq!(document.model_name(), Some("GenericWork"));
        assert!(document.is_public());
        assert!(!document.is_collection());
        assert_eq!(document.itemtype(), "http://schema.org/ImageObject");
        assert_eq!(document.to_string(), "A Title, Another");
    }

    #[test]
    fn test_blank_representative_is_absent() {
        let document = doc(json!({"id": "w1", "hasRelatedMediaFragment_ssim": [""]}));
        assert_eq!(document.representative_id(), None);
        assert_eq!(document.to_string(), "w1");
        assert_eq!(document.itemtype(), DEFAULT_ITEMTYPE);
    }

    #[test]
    fn test_missing_id_is_error() {
        let row = IndexRow::from_json(json!({"title_tesim": ["x"]})).unwrap();
        assert!(SolrDocument::from_row(&row).is_err());
    }
}
