//! 命名参数存储
//!
//! 字符串键到值的容器，由导航层提供，绑定器从中读取或写入。
//! 只承载字符串、基本类型和嵌套对象。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::router::ParameterMap;

/// 命名参数存储
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterStore {
    values: Map<String, Value>,
}

impl ParameterStore {
    /// 创建空存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取原始值
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// 读取字符串
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// 读取整数
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.values.get(key).and_then(Value::as_i64)
    }

    /// 读取浮点数
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.values.get(key).and_then(Value::as_f64)
    }

    /// 读取布尔值
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    /// 读取嵌套存储
    pub fn get_store(&self, key: &str) -> Option<ParameterStore> {
        match self.values.get(key) {
            Some(Value::Object(map)) => Some(Self { values: map.clone() }),
            _ => None,
        }
    }

    /// 写入字符串
    pub fn put_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), Value::String(value.into()));
    }

    /// 写入整数
    pub fn put_i64(&mut self, key: impl Into<String>, value: i64) {
        self.values.insert(key.into(), Value::from(value));
    }

    /// 写入浮点数（NaN 与无穷大无法表示，会被忽略）
    pub fn put_f64(&mut self, key: impl Into<String>, value: f64) {
        if let Some(number) = serde_json::Number::from_f64(value) {
            self.values.insert(key.into(), Value::Number(number));
        }
    }

    /// 写入布尔值
    pub fn put_bool(&mut self, key: impl Into<String>, value: bool) {
        self.values.insert(key.into(), Value::Bool(value));
    }

    /// 写入嵌套存储
    pub fn put_store(&mut self, key: impl Into<String>, value: ParameterStore) {
        self.values.insert(key.into(), Value::Object(value.values));
    }

    /// 写入原始值
    pub fn put(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// 移除键
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// 是否包含键
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 遍历所有键
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl From<&ParameterMap> for ParameterStore {
    fn from(params: &ParameterMap) -> Self {
        let values = params
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        Self { values }
    }
}

impl From<Map<String, Value>> for ParameterStore {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_accessors() {
        let mut store = ParameterStore::new();
        store.put_string("name", "alice");
        store.put_i64("age", 30);
        store.put_f64("score", 9.5);
        store.put_bool("admin", true);

        assert_eq!(store.get_str("name"), Some("alice"));
        assert_eq!(store.get_i64("age"), Some(30));
        assert_eq!(store.get_f64("score"), Some(9.5));
        assert_eq!(store.get_bool("admin"), Some(true));
        assert_eq!(store.get_str("age"), None);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_nested_store() {
        let mut inner = ParameterStore::new();
        inner.put_string("city", "Hangzhou");

        let mut store = ParameterStore::new();
        store.put_store("address", inner.clone());

        assert_eq!(store.get_store("address"), Some(inner));
        assert!(store.get_store("missing").is_none());
    }

    #[test]
    fn test_non_finite_float_is_dropped() {
        let mut store = ParameterStore::new();
        store.put_f64("x", f64::NAN);
        assert!(!store.contains_key("x"));
    }

    #[test]
    fn test_from_parameter_map() {
        let mut params = ParameterMap::new();
        params.insert("id".to_string(), "42".to_string());

        let store = ParameterStore::from(&params);
        assert_eq!(store.get("id"), Some(&json!("42")));
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let mut store = ParameterStore::new();
        store.put_i64("id", 1);
        assert_eq!(serde_json::to_value(&store).unwrap(), json!({ "id": 1 }));
    }
}
