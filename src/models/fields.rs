//! Solr 索引字段名
//!
//! 与仓库索引 schema 对应的字段常量，查询构造和文档解析统一使用

/// 文档 ID
pub const ID: &str = "id";
/// 代理记录所属的父对象
pub const PROXY_IN: &str = "proxy_in_ssi";
/// 有序成员目标（多值）
pub const ORDERED_TARGETS: &str = "ordered_targets_ssim";
/// 模型类型
pub const HAS_MODEL: &str = "has_model_ssim";

/// 叶子成员（文件集）的模型名
pub const LEAF_MODEL: &str = "FileSet";
/// 集合的模型名
pub const COLLECTION_MODEL: &str = "Collection";

/// 有序列表来源的伪 ID
pub fn list_source_id(parent_id: &str) -> String {
    format!("{}/list_source", parent_id)
}
