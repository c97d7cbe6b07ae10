use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// 一条索引命中记录
///
/// 字段值既可能是标量也可能是数组，`values()` 统一展开为字符串列表
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexRow {
    fields: Map<String, JsonValue>,
}

impl IndexRow {
    pub fn new(fields: Map<String, JsonValue>) -> Self {
        Self { fields }
    }

    /// 从 JSON 对象创建，非对象返回 None
    pub fn from_json(value: JsonValue) -> Option<Self> {
        match value {
            JsonValue::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// 获取字段的全部值
    ///
    /// 字段不存在时返回空列表
    pub fn values(&self, field: &str) -> Vec<String> {
        self.fields.get(field).map(json_strings).unwrap_or_default()
    }

    /// 获取字段的第一个值
    pub fn first(&self, field: &str) -> Option<String> {
        self.values(field).into_iter().next()
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// 只保留指定字段，列表为空时保留全部
    pub fn project(&self, field_list: &[String]) -> Self {
        if field_list.is_empty() {
            return self.clone();
        }
        let fields = self
            .fields
            .iter()
            .filter(|(name, _)| field_list.iter().any(|f| f == *name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Self { fields }
    }

    pub fn as_json(&self) -> JsonValue {
        JsonValue::Object(self.fields.clone())
    }
}

/// 把标量或数组形式的字段值展开为字符串列表
pub(crate) fn json_strings(value: &JsonValue) -> Vec<String> {
    match value {
        JsonValue::Array(items) => items.iter().filter_map(scalar_to_string).collect(),
        other => scalar_to_string(other).into_iter().collect(),
    }
}

fn scalar_to_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
