//! 路由模块
//!
//! 包含路径路由的核心组件：
//! - 路由模式解析
//! - 路由表（按注册顺序）
//! - 带缓存的路由匹配器
//! - 导航请求
//! - 路由器主结构体

pub mod matcher;
pub mod pattern;
pub mod request;
pub mod route_table;
pub mod router;

// 重导出常用类型
pub use matcher::{MatchCache, MatchCacheStats, ResolvedMatch, RouteMatcher};
pub use pattern::{split_path, ParameterMap, RoutePattern, Segment};
pub use request::{NavigationRequest, NavigationRequestBuilder};
pub use route_table::{
    ExportedRoute, RouteCallback, RouteDescriptor, RouteOptions, RouteTable, RouteTableExport,
};
pub use router::{NavigationContext, Routable, Router};
