use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 索引服务错误（依赖不可用）
    #[error("索引服务错误: {0}")]
    Index(#[from] IndexError),
    /// 查询构造错误
    #[error("查询错误: {0}")]
    Query(#[from] QueryError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 索引服务错误
///
/// 索引或文档存储不可达、返回错误时产生，原样向调用方传播，不做重试
#[derive(Debug, Error)]
pub enum IndexError {
    /// 网络请求失败
    #[error("索引请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 索引返回错误响应
    #[error("索引返回错误响应 ({endpoint}): status={status}, message={message:?}")]
    BadResponse {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
    /// JSON 解析失败
    #[error("JSON解析失败: {source}")]
    JsonParseFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 服务不可用
    #[error("索引服务不可用: {message}")]
    Unavailable { message: String },
}

/// 查询构造错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// 字段名不合法
    #[error("字段名不合法: {field:?}")]
    InvalidField { field: String },
    /// 字段值为空
    #[error("字段 {field} 的值为空")]
    EmptyValue { field: String },
    /// 字段值包含非法字符
    #[error("字段 {field} 的值包含非法字符: {value:?}")]
    InvalidValue { field: String, value: String },
    /// 行数超出范围
    #[error("行数 {rows} 超出范围 [1, {max}]")]
    RowsOutOfRange { rows: usize, max: usize },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 从常见错误类型转换 ==========

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Index(IndexError::JsonParseFailed {
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建索引请求失败错误
    pub fn index_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Index(IndexError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建索引错误响应
    pub fn index_bad_response(endpoint: impl Into<String>, status: u16, message: Option<String>) -> Self {
        AppError::Index(IndexError::BadResponse {
            endpoint: endpoint.into(),
            status,
            message,
        })
    }

    /// 创建服务不可用错误
    pub fn unavailable(message: impl Into<String>) -> Self {
        AppError::Index(IndexError::Unavailable {
            message: message.into(),
        })
    }

    /// 是否为依赖不可用类错误
    pub fn is_dependency_unavailable(&self) -> bool {
        matches!(self, AppError::Index(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
