//! 导航请求
//!
//! 将路由描述的默认参数与路径参数合并成最终参数表，
//! 并封装成交给外部启动器的导航请求。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::matcher::ResolvedMatch;
use super::pattern::ParameterMap;
use crate::binding::ParameterStore;
use crate::utils::generate_uuid;

/// 导航参数构建器
///
/// 先放入默认参数，再覆盖路径参数；同名键以路径参数为准。
pub struct NavigationRequestBuilder;

impl NavigationRequestBuilder {
    /// 合并参数
    pub fn build(resolved: &ResolvedMatch) -> ParameterMap {
        let mut params = resolved
            .descriptor()
            .default_params()
            .cloned()
            .unwrap_or_default();
        params.extend(
            resolved
                .params()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        params
    }

    /// 构建交给外部启动器的导航请求
    pub fn request(url: &str, resolved: &ResolvedMatch, new_task: bool) -> NavigationRequest {
        NavigationRequest {
            request_id: generate_uuid(),
            url: url.to_string(),
            target: resolved.descriptor().target().to_string(),
            params: Self::build(resolved),
            new_task,
            created_at: Utc::now(),
        }
    }
}

/// 导航请求
///
/// 描述"打开哪个目标、携带哪些参数"，由外部启动器负责真正的页面切换。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationRequest {
    /// 请求唯一标识（UUID v4）
    pub request_id: String,

    /// 被打开的原始 url
    pub url: String,

    /// 目标类型标识
    pub target: String,

    /// 合并后的参数
    #[serde(default)]
    pub params: ParameterMap,

    /// 是否需要在新任务中启动（通过路由器自身的上下文打开时为 true）
    #[serde(default)]
    pub new_task: bool,

    /// 创建时间
    pub created_at: DateTime<Utc>,
}

impl NavigationRequest {
    /// 读取参数
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// 将参数转换为参数存储，供目标页面注入使用
    pub fn to_store(&self) -> ParameterStore {
        ParameterStore::from(&self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::matcher::RouteMatcher;
    use crate::router::route_table::{RouteDescriptor, RouteOptions, RouteTable};
    use std::sync::Arc;

    fn resolve(pattern: &str, options: RouteOptions, path: &str) -> Arc<ResolvedMatch> {
        let table = Arc::new(RouteTable::new());
        table.register(RouteDescriptor::new(pattern, "Target", options).unwrap());
        RouteMatcher::new(table).resolve(path).unwrap()
    }

    #[test]
    fn test_build_without_defaults() {
        let resolved = resolve("users/:id", RouteOptions::new(), "users/42");
        let params = NavigationRequestBuilder::build(&resolved);
        assert_eq!(params.len(), 1);
        assert_eq!(params["id"], "42");
    }

    #[test]
    fn test_path_params_override_defaults() {
        let options = RouteOptions::new()
            .with_default_param("id", "0")
            .with_default_param("tab", "posts");
        let resolved = resolve("users/:id", options, "users/42");

        let params = NavigationRequestBuilder::build(&resolved);
        assert_eq!(params.len(), 2);
        assert_eq!(params["id"], "42");
        assert_eq!(params["tab"], "posts");
        // 原始匹配结果不受影响
        assert_eq!(resolved.params().len(), 1);
    }

    #[test]
    fn test_request_fields() {
        let resolved = resolve("users/:id", RouteOptions::new(), "users/7");
        let request = NavigationRequestBuilder::request("users/7", &resolved, true);

        assert_eq!(request.url, "users/7");
        assert_eq!(request.target, "Target");
        assert_eq!(request.param("id"), Some("7"));
        assert!(request.new_task);
        assert!(crate::utils::is_valid_uuid(&request.request_id));
    }

    #[test]
    fn test_request_serialization() {
        let resolved = resolve("users/:id", RouteOptions::new(), "users/7");
        let request = NavigationRequestBuilder::request("users/7", &resolved, false);

        let json = serde_json::to_string(&request).unwrap();
        let parsed: NavigationRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.request_id, request.request_id);
        assert_eq!(parsed.params, request.params);
        assert!(!parsed.new_task);
    }

    #[test]
    fn test_to_store() {
        let resolved = resolve("users/:id", RouteOptions::new(), "users/7");
        let request = NavigationRequestBuilder::request("users/7", &resolved, false);
        let store = request.to_store();
        assert_eq!(store.get_str("id"), Some("7"));
    }
}
