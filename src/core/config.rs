//! 路由配置
//!
//! 定义路由器的配置结构和加载逻辑。配置文件可以是 YAML 或 JSON，
//! 除绑定与日志设置外还可以声明启动时注册的路由表。

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::router::ParameterMap;
use crate::utils::{Result, RouterError};

/// 绑定配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingConfig {
    /// 框架边界前缀，类型名以其中之一开头时不再向上查找绑定器
    #[serde(default = "default_framework_prefixes")]
    pub framework_prefixes: Vec<String>,

    /// 生成绑定器的伴生名后缀
    #[serde(default = "default_binder_suffix")]
    pub binder_suffix: String,
}

fn default_framework_prefixes() -> Vec<String> {
    vec!["std::".to_string(), "core::".to_string(), "alloc::".to_string()]
}

fn default_binder_suffix() -> String {
    "$$Binder".to_string()
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            framework_prefixes: default_framework_prefixes(),
            binder_suffix: default_binder_suffix(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否输出到文件
    #[serde(default)]
    pub file_output: bool,

    /// 日志文件目录
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// 是否输出 JSON 格式
    #[serde(default)]
    pub json_format: bool,

    /// 日志轮转策略（never / hourly / daily）
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: false,
            log_dir: None,
            json_format: false,
            rotation: default_rotation(),
        }
    }
}

/// 声明式路由
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSpec {
    /// 路由模式，例如 `users/:id`
    pub pattern: String,

    /// 目标类型名
    pub target: String,

    /// 默认参数，路径参数同名时覆盖
    #[serde(default)]
    pub defaults: ParameterMap,
}

impl RouteSpec {
    /// 创建路由声明
    pub fn new(pattern: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            target: target.into(),
            defaults: ParameterMap::new(),
        }
    }

    /// 添加默认参数
    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }
}

/// 路由器配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteConfig {
    /// 配置文件路径
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// 绑定配置
    #[serde(default)]
    pub binding: BindingConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LogConfig,

    /// 启动时注册的路由
    #[serde(default)]
    pub routes: Vec<RouteSpec>,
}

impl RouteConfig {
    /// 创建配置构建器
    pub fn builder() -> RouteConfigBuilder {
        RouteConfigBuilder::new()
    }

    /// 从文件加载配置
    ///
    /// 扩展名为 `.json` 时按 JSON 解析，否则按 YAML 解析。
    pub async fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            RouterError::ConfigLoadFailed(format!("无法读取 '{}': {}", path.display(), e))
        })?;

        let mut config: RouteConfig = if path.extension().map(|e| e == "json").unwrap_or(false) {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        config.config_path = Some(path);
        Ok(config)
    }

    /// 合并另一个配置，路由追加在后面
    pub fn merge(&mut self, other: RouteConfig) {
        if other.binding != BindingConfig::default() {
            self.binding = other.binding;
        }
        if other.logging.level != default_log_level() {
            self.logging.level = other.logging.level;
        }
        if other.logging.rotation != default_rotation() {
            self.logging.rotation = other.logging.rotation;
        }
        if other.logging.file_output {
            self.logging.file_output = true;
            self.logging.log_dir = other.logging.log_dir;
        }
        if other.logging.json_format {
            self.logging.json_format = true;
        }
        self.routes.extend(other.routes);
    }
}

/// 配置构建器
#[derive(Debug, Default)]
pub struct RouteConfigBuilder {
    config: RouteConfig,
}

impl RouteConfigBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置配置文件路径
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.config_path = Some(path.into());
        self
    }

    /// 设置绑定器后缀
    pub fn binder_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.binding.binder_suffix = suffix.into();
        self
    }

    /// 追加框架边界前缀
    pub fn framework_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.binding.framework_prefixes.push(prefix.into());
        self
    }

    /// 设置日志级别
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    /// 启用文件日志
    pub fn file_logging(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.config.logging.file_output = true;
        self.config.logging.log_dir = Some(log_dir.into());
        self
    }

    /// 启用 JSON 格式日志
    pub fn json_logging(mut self) -> Self {
        self.config.logging.json_format = true;
        self
    }

    /// 添加路由声明
    pub fn route(mut self, spec: RouteSpec) -> Self {
        self.config.routes.push(spec);
        self
    }

    /// 构建配置
    pub fn build(self) -> RouteConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RouteConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.rotation, "daily");
        assert_eq!(config.binding.binder_suffix, "$$Binder");
        assert_eq!(config.binding.framework_prefixes, vec!["std::", "core::", "alloc::"]);
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_config_builder() {
        let config = RouteConfig::builder()
            .log_level("debug")
            .binder_suffix("$$Router")
            .framework_prefix("platform::")
            .route(RouteSpec::new("users/:id", "app::UserScreen").with_default("tab", "posts"))
            .build();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.binding.binder_suffix, "$$Router");
        assert!(config.binding.framework_prefixes.contains(&"platform::".to_string()));
        assert_eq!(config.routes.len(), 1);
        assert_eq!(config.routes[0].defaults.get("tab").map(String::as_str), Some("posts"));
    }

    #[test]
    fn test_config_merge() {
        let mut base = RouteConfig::builder()
            .route(RouteSpec::new("home", "app::Home"))
            .build();
        let override_config = RouteConfig::builder()
            .log_level("debug")
            .route(RouteSpec::new("users/:id", "app::User"))
            .build();

        base.merge(override_config);

        assert_eq!(base.logging.level, "debug");
        assert_eq!(base.routes.len(), 2);
        assert_eq!(base.routes[0].pattern, "home");
    }

    #[test]
    fn test_config_merge_rotation() {
        let mut base = RouteConfig::default();
        base.logging.rotation = "never".to_string();

        // 默认值不覆盖已有设置
        base.merge(RouteConfig::default());
        assert_eq!(base.logging.rotation, "never");

        let mut other = RouteConfig::default();
        other.logging.rotation = "hourly".to_string();
        base.merge(other);
        assert_eq!(base.logging.rotation, "hourly");
    }

    #[test]
    fn test_config_serialization() {
        let config = RouteConfig::builder()
            .log_level("warn")
            .route(RouteSpec::new("groups/:id", "app::Group"))
            .build();

        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: RouteConfig = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(parsed.logging.level, "warn");
        assert_eq!(parsed.routes, config.routes);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "routes:\n  - pattern: users/:id\n    target: app::User\n";
        let parsed: RouteConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(parsed.binding, BindingConfig::default());
        assert!(parsed.routes[0].defaults.is_empty());
    }
}
