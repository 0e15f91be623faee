//! 核心模块
//!
//! 包含路由器配置。

pub mod config;

pub use config::{BindingConfig, LogConfig, RouteConfig, RouteConfigBuilder, RouteSpec};
