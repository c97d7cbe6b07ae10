use crate::error::{AppResult, ConfigError};
use serde::Deserialize;
use std::path::Path;

/// Solr 单次查询的最大行数（超过时静默截断）
pub const MAX_ROWS: usize = 10_000;

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Solr core 地址
    pub solr_url: String,
    /// 请求超时（秒）
    pub request_timeout_secs: u64,
    /// 成员查询的行数上限
    pub row_limit: usize,
    /// 代表成员解析的最大深度
    pub max_representative_depth: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 用户没有 twitter 账号时使用的产品账号
    pub product_twitter_handle: String,
    /// 已注册的作品类型
    pub registered_work_types: Vec<String>,
    /// 推荐作品数量上限
    pub featured_work_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            solr_url: "http://127.0.0.1:8983/solr/hydra-development".to_string(),
            request_timeout_secs: 30,
            row_limit: MAX_ROWS,
            max_representative_depth: 8,
            verbose_logging: false,
            product_twitter_handle: "@HydraSphere".to_string(),
            registered_work_types: vec!["GenericWork".to_string()],
            featured_work_limit: 5,
        }
    }
}

impl Config {
    /// 从环境变量加载配置，未设置的项使用默认值
    pub fn from_env() -> AppResult<Self> {
        Self::default().merge_env()
    }

    /// 从 TOML 文件加载配置，再用环境变量覆盖
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;

        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })?;

        config.merge_env()
    }

    fn merge_env(self) -> AppResult<Self> {
        Ok(Self {
            solr_url: std::env::var("SOLR_URL").unwrap_or(self.solr_url),
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", "u64")?.unwrap_or(self.request_timeout_secs),
            row_limit: parse_env("ROW_LIMIT", "usize")?.unwrap_or(self.row_limit).min(MAX_ROWS),
            max_representative_depth: parse_env("MAX_REPRESENTATIVE_DEPTH", "usize")?
                .unwrap_or(self.max_representative_depth),
            verbose_logging: parse_env("VERBOSE_LOGGING", "bool")?.unwrap_or(self.verbose_logging),
            product_twitter_handle: std::env::var("PRODUCT_TWITTER_HANDLE").unwrap_or(self.product_twitter_handle),
            registered_work_types: std::env::var("REGISTERED_WORK_TYPES")
                .ok()
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or(self.registered_work_types),
            featured_work_limit: parse_env("FEATURED_WORK_LIMIT", "usize")?.unwrap_or(self.featured_work_limit),
        })
    }
}

/// 读取并解析环境变量；未设置时返回 None
fn parse_env<T: std::str::FromStr>(var_name: &str, expected_type: &str) -> AppResult<Option<T>> {
    match std::env::var(var_name) {
        Ok(value) => value.trim().parse().map(Some).map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_row_limit_is_cap() {
        let config = Config::default();
        assert_eq!(config.row_limit, MAX_ROWS);
        assert_eq!(config.featured_work_limit, 5);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            solr_url = "http://solr:8983/solr/repo"
            registered_work_types = ["GenericWork", "Image"]
            "#,
        )
        .unwrap();

        assert_eq!(config.solr_url, "http://solr:8983/solr/repo");
        assert_eq!(config.registered_work_types, vec!["GenericWork", "Image"]);
        assert_eq!(config.max_representative_depth, 8);
        assert_eq!(config.product_twitter_handle, "@HydraSphere");
    }

    #[test]
    fn test_parse_env_reports_bad_value() {
        std::env::set_var("WORK_PRESENTERS_TEST_BAD_USIZE", "many");
        let result = parse_env::<usize>("WORK_PRESENTERS_TEST_BAD_USIZE", "usize");
        std::env::remove_var("WORK_PRESENTERS_TEST_BAD_USIZE");

        assert!(matches!(
            result,
            Err(crate::error::AppError::Config(ConfigError::EnvVarParseFailed { .. }))
        ));
    }
}
