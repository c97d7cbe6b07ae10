//! 类型化的 Solr 查询构造
//!
//! 查询由 (字段, 操作, 值) 组成，提交前统一校验，
//! 不再通过字符串拼接构造过滤条件

use crate::config::MAX_ROWS;
use crate::error::QueryError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static FIELD_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("字段名正则无效"));

/// Solr 未指定 rows 时的默认行数
const SOLR_DEFAULT_ROWS: usize = 10;

/// 查询过滤条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `field:"value"`
    Term { field: String, value: String },
    /// `{!field f=field}value`
    Field { field: String, value: String },
    /// `{!terms f=field}a,b,c`
    Terms { field: String, values: Vec<String> },
    /// `{!join from=a to=b}inner`
    Join {
        from: String,
        to: String,
        inner: Box<Filter>,
    },
}

impl Filter {
    pub fn term(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn field(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Field {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn terms<I, S>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter::Terms {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn join(from: impl Into<String>, to: impl Into<String>, inner: Filter) -> Self {
        Filter::Join {
            from: from.into(),
            to: to.into(),
            inner: Box::new(inner),
        }
    }

    /// 校验字段名和值
    pub fn validate(&self) -> Result<(), QueryError> {
        match self {
            Filter::Term { field, value } | Filter::Field { field, value } => {
                validate_field(field)?;
                validate_value(field, value)
            }
            Filter::Terms { field, values } => {
                validate_field(field)?;
                if values.is_empty() {
                    return Err(QueryError::EmptyValue { field: field.clone() });
                }
                for value in values {
                    validate_value(field, value)?;
                    if value.contains(',') {
                        return Err(QueryError::InvalidValue {
                            field: field.clone(),
                            value: value.clone(),
                        });
                    }
                }
                Ok(())
            }
            Filter::Join { from, to, inner } => {
                validate_field(from)?;
                validate_field(to)?;
                inner.validate()
            }
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Term { field, value } => write!(f, "{}:\"{}\"", field, escape_phrase(value)),
            Filter::Field { field, value } => write!(f, "{{!field f={}}}{}", field, value),
            Filter::Terms { field, values } => write!(f, "{{!terms f={}}}{}", field, values.join(",")),
            Filter::Join { from, to, inner } => write!(f, "{{!join from={} to={}}}{}", from, to, inner),
        }
    }
}

fn validate_field(field: &str) -> Result<(), QueryError> {
    if FIELD_NAME.is_match(field) {
        Ok(())
    } else {
        Err(QueryError::InvalidField {
            field: field.to_string(),
        })
    }
}

fn validate_value(field: &str, value: &str) -> Result<(), QueryError> {
    if value.is_empty() {
        return Err(QueryError::EmptyValue {
            field: field.to_string(),
        });
    }
    if !is_queryable_value(value) {
        return Err(QueryError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

/// 值能否出现在查询中（非空且不含控制字符）
pub fn is_queryable_value(value: &str) -> bool {
    !value.is_empty() && !value.chars().any(char::is_control)
}

/// 值能否放进 `{!terms}` 的逗号分隔列表
pub fn is_terms_value(value: &str) -> bool {
    is_queryable_value(value) && !value.contains(',')
}

fn escape_phrase(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// 一次 Solr 查询
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolrQuery {
    q: Filter,
    fq: Vec<Filter>,
    rows: usize,
    fl: Vec<String>,
}

impl SolrQuery {
    /// 以主查询条件创建，行数为 Solr 默认值
    pub fn new(q: Filter) -> Self {
        Self {
            q,
            fq: Vec::new(),
            rows: SOLR_DEFAULT_ROWS,
            fl: Vec::new(),
        }
    }

    /// 追加过滤条件（fq）
    pub fn filter(mut self, fq: Filter) -> Self {
        self.fq.push(fq);
        self
    }

    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// 追加返回字段（fl）
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.fl.push(name.into());
        self
    }

    pub fn q(&self) -> &Filter {
        &self.q
    }

    pub fn filters(&self) -> &[Filter] {
        &self.fq
    }

    pub fn row_limit(&self) -> usize {
        self.rows
    }

    pub fn field_list(&self) -> &[String] {
        &self.fl
    }

    /// 提交前校验
    pub fn validate(&self) -> Result<(), QueryError> {
        self.q.validate()?;
        for fq in &self.fq {
            fq.validate()?;
        }
        for name in &self.fl {
            validate_field(name)?;
        }
        if self.rows == 0 || self.rows > MAX_ROWS {
            return Err(QueryError::RowsOutOfRange {
                rows: self.rows,
                max: MAX_ROWS,
            });
        }
        Ok(())
    }

    /// 转换为 HTTP 查询参数
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("q", self.q.to_string())];
        params.extend(self.fq.iter().map(|fq| ("fq", fq.to_string())));
        params.push(("rows", self.rows.to_string()));
        if !self.fl.is_empty() {
            params.push(("fl", self.fl.join(",")));
        }
        params.push(("wt", "json".to_string()));
        params
    }
}
