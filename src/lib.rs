//! # Chips Route - 薯片路径路由
//!
//! 声明式的路径模式路由器，以及按类型解析的参数绑定器：
//!
//! - **路由表**: 以 `users/:id` 形式的模式注册目标，按注册顺序匹配
//! - **匹配缓存**: 同一路径只解析一次，之后返回同一个结果
//! - **导航请求**: 合并默认参数与路径参数，交给外部导航上下文
//! - **参数绑定**: 生成的绑定器在对象字段与参数存储之间复制值，沿类型表向上查找
//! - **配置管理**: YAML/JSON 配置与声明式路由表
//! - **日志系统**: 结构化日志记录
//!
//! ## 快速开始
//!
//! ```rust
//! use chips_route::{Router, RouteOptions};
//!
//! let router = Router::new();
//! router.map("users/:id", "app::UserScreen").unwrap();
//! router
//!     .map_with(
//!         "groups/:id/topics/:topic_id",
//!         "app::TopicScreen",
//!         RouteOptions::new().with_default_param("sort", "new"),
//!     )
//!     .unwrap();
//!
//! let params = router.params_for("groups/5/topics/20").unwrap();
//! assert_eq!(params["topic_id"], "20");
//! assert_eq!(params["sort"], "new");
//! ```
//!
//! ## 模块结构
//!
//! - `router` - 路由模式、路由表、匹配器与路由器
//! - `binding` - 参数存储、绑定器与绑定器注册表
//! - `core` - 配置
//! - `utils` - 错误类型、日志与标识生成

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod binding;
pub mod core;
pub mod router;
pub mod utils;

// 重导出常用类型，方便使用
pub use router::{
    MatchCacheStats, NavigationContext, NavigationRequest, ParameterMap, Routable,
    RouteDescriptor, RouteOptions, RoutePattern, RouteTable, Router,
};

pub use binding::{
    Bindable, Binder, BindingCacheStats, BindingDispatcher, BindingRegistry, GeneratedBinder,
    GeneratedBinders, ParameterStore, PropertyBinding, PropertyKind, TypeTable,
};

pub use utils::{error_code, generate_uuid, Result, RouterError};
pub use utils::logger::{LogGuard, Logger, LoggerConfig, LoggerConfigBuilder, RotationStrategy};

pub use core::config::{BindingConfig, LogConfig, RouteConfig, RouteConfigBuilder, RouteSpec};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
