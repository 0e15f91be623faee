//! 路由与绑定错误类型定义
//!
//! 本模块定义了导航路由和参数绑定中使用的所有错误类型。

use thiserror::Error;

/// 路由核心错误类型
#[derive(Error, Debug)]
pub enum RouterError {
    // ==================== 路由系统错误 ====================

    /// 没有任何已注册的模式匹配该路径
    #[error("路由未找到: url '{0}'")]
    RouteNotFound(String),

    /// 打开路由时没有可用的导航上下文
    #[error("缺少导航上下文: 打开 '{0}' 前需要提供上下文")]
    MissingContext(String),

    /// 路由模式格式无效
    #[error("路由模式无效: '{pattern}' - {reason}")]
    InvalidPattern {
        /// 注册时传入的原始模式
        pattern: String,
        /// 无效原因
        reason: String,
    },

    // ==================== 绑定错误 ====================

    /// 绑定器执行失败，保留原始错误
    #[error("绑定器执行失败: 目标类型 '{type_name}'")]
    BindingInvocation {
        /// 目标对象的运行时类型名
        type_name: String,
        /// 绑定器返回的原始错误
        #[source]
        source: anyhow::Error,
    },

    // ==================== 配置错误 ====================

    /// 配置加载失败
    #[error("配置加载失败: {0}")]
    ConfigLoadFailed(String),

    /// 初始化失败
    #[error("初始化失败: {0}")]
    InitFailed(String),

    // ==================== IO 和序列化错误 ====================

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 序列化/反序列化错误
    #[error("JSON 错误: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML 序列化/反序列化错误
    #[error("YAML 错误: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// 其他错误
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// 路由操作结果类型别名
pub type Result<T> = std::result::Result<T, RouterError>;

/// 错误码常量
pub mod error_code {
    // 路由错误 (ROUTE-xxx)
    /// 路由未找到
    pub const ROUTE_NOT_FOUND: &str = "ROUTE-001";
    /// 缺少导航上下文
    pub const ROUTE_MISSING_CONTEXT: &str = "ROUTE-002";
    /// 路由模式无效
    pub const ROUTE_INVALID_PATTERN: &str = "ROUTE-003";

    // 绑定错误 (BINDING-xxx)
    /// 绑定器执行失败
    pub const BINDING_INVOCATION_FAILED: &str = "BINDING-001";

    // 配置错误 (CONFIG-xxx)
    /// 配置加载失败（含 IO 与序列化错误）
    pub const CONFIG_LOAD_FAILED: &str = "CONFIG-001";

    // 核心错误 (CORE-xxx)
    /// 初始化失败
    pub const CORE_INIT_FAILED: &str = "CORE-001";
    /// 其他内部错误
    pub const CORE_INTERNAL: &str = "CORE-002";
}

impl RouterError {
    /// 获取错误码
    pub fn error_code(&self) -> &'static str {
        match self {
            RouterError::RouteNotFound(_) => error_code::ROUTE_NOT_FOUND,
            RouterError::MissingContext(_) => error_code::ROUTE_MISSING_CONTEXT,
            RouterError::InvalidPattern { .. } => error_code::ROUTE_INVALID_PATTERN,
            RouterError::BindingInvocation { .. } => error_code::BINDING_INVOCATION_FAILED,
            RouterError::ConfigLoadFailed(_)
            | RouterError::Io(_)
            | RouterError::Json(_)
            | RouterError::Yaml(_) => error_code::CONFIG_LOAD_FAILED,
            RouterError::InitFailed(_) => error_code::CORE_INIT_FAILED,
            RouterError::Other(_) => error_code::CORE_INTERNAL,
        }
    }

    /// 创建模式无效错误
    pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        RouterError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = RouterError::RouteNotFound("users/42/extra".to_string());
        assert!(err.to_string().contains("users/42/extra"));
    }

    #[test]
    fn test_error_code() {
        let err = RouterError::RouteNotFound("x".to_string());
        assert_eq!(err.error_code(), error_code::ROUTE_NOT_FOUND);

        let err = RouterError::MissingContext("x".to_string());
        assert_eq!(err.error_code(), error_code::ROUTE_MISSING_CONTEXT);
    }

    #[test]
    fn test_binding_invocation_keeps_source() {
        let err = RouterError::BindingInvocation {
            type_name: "app::UserScreen".to_string(),
            source: anyhow::anyhow!("字段类型不匹配"),
        };
        assert!(err.to_string().contains("app::UserScreen"));
        let source = err.source().expect("应保留原始错误");
        assert_eq!(source.to_string(), "字段类型不匹配");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RouterError = io_err.into();
        assert!(matches!(err, RouterError::Io(_)));
        assert_eq!(err.error_code(), error_code::CONFIG_LOAD_FAILED);
    }
}
