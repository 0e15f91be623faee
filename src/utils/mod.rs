//! 工具模块
//!
//! 包含错误类型、ID 生成与日志系统。

pub mod error;
pub mod id;
pub mod logger;

// 重导出常用类型
pub use error::{error_code, Result, RouterError};
pub use id::{generate_uuid, is_valid_uuid};
pub use logger::{LogGuard, Logger, LoggerConfig, LoggerConfigBuilder, RotationStrategy};
