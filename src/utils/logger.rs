//! 日志系统模块
//!
//! 基于 tracing 生态初始化日志输出：
//!
//! - 多级别日志与 EnvFilter 过滤（优先读取 `RUST_LOG`）
//! - 结构化日志（JSON 格式输出）
//! - 文件日志输出（异步非阻塞，按时间轮转）
//!
//! 路由匹配与绑定器解析过程中的命中/未命中信息都在 `debug` 级别输出，
//! 生产环境默认 `info` 级别下不会产生额外开销。
//!
//! # 示例
//!
//! ```rust,no_run
//! use chips_route::utils::logger::{Logger, LoggerConfig, RotationStrategy};
//!
//! let config = LoggerConfig::builder()
//!     .level("debug")
//!     .json_format(true)
//!     .file_output("./logs")
//!     .rotation(RotationStrategy::Hourly)
//!     .build();
//!
//! let _guard = Logger::init(config).expect("日志初始化失败");
//! tracing::info!(path = "users/42", "打开路由");
//! ```

use std::io;
use std::path::PathBuf;
use std::sync::OnceLock;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::utils::{Result, RouterError};

/// 装箱后的格式化层
type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

// ============================================================================
// 日志轮转策略
// ============================================================================

/// 日志轮转策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationStrategy {
    /// 不轮转（单个日志文件）
    Never,
    /// 每小时轮转
    Hourly,
    /// 每天轮转（默认）
    #[default]
    Daily,
}

impl RotationStrategy {
    fn to_rotation(self) -> Rotation {
        match self {
            RotationStrategy::Never => Rotation::NEVER,
            RotationStrategy::Hourly => Rotation::HOURLY,
            RotationStrategy::Daily => Rotation::DAILY,
        }
    }

    /// 从配置字符串解析轮转策略，无法识别时回退到每天轮转
    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "never" | "none" => RotationStrategy::Never,
            "hourly" | "hour" => RotationStrategy::Hourly,
            _ => RotationStrategy::Daily,
        }
    }
}

impl std::fmt::Display for RotationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RotationStrategy::Never => write!(f, "never"),
            RotationStrategy::Hourly => write!(f, "hourly"),
            RotationStrategy::Daily => write!(f, "daily"),
        }
    }
}

// ============================================================================
// 日志配置
// ============================================================================

/// 日志系统配置
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// 默认日志级别（"trace", "debug", "info", "warn", "error"）
    pub level: String,
    /// 是否使用 JSON 格式输出
    pub json_format: bool,
    /// 是否输出到控制台
    pub console_output: bool,
    /// 文件输出目录（None 表示不输出到文件）
    pub file_output: Option<PathBuf>,
    /// 日志文件名前缀
    pub file_prefix: String,
    /// 日志轮转策略
    pub rotation: RotationStrategy,
    /// 是否显示目标模块
    pub show_target: bool,
    /// 是否启用 ANSI 颜色（仅控制台）
    pub ansi_colors: bool,
    /// 附加过滤指令（EnvFilter 格式），例如 "chips_route::binding=trace"
    pub filter_directives: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            console_output: true,
            file_output: None,
            file_prefix: "chips-route".to_string(),
            rotation: RotationStrategy::Daily,
            show_target: true,
            ansi_colors: true,
            filter_directives: None,
        }
    }
}

impl LoggerConfig {
    /// 创建配置构建器
    pub fn builder() -> LoggerConfigBuilder {
        LoggerConfigBuilder::default()
    }

    /// 从 [`LogConfig`](crate::core::config::LogConfig) 创建
    pub fn from_log_config(log_config: &crate::core::config::LogConfig) -> Self {
        Self {
            level: log_config.level.clone(),
            json_format: log_config.json_format,
            file_output: if log_config.file_output {
                log_config.log_dir.clone()
            } else {
                None
            },
            rotation: RotationStrategy::from_name(&log_config.rotation),
            ..Default::default()
        }
    }

    fn parse_level(&self) -> Level {
        match self.level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" | "warning" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

/// 日志配置构建器
#[derive(Debug, Default)]
pub struct LoggerConfigBuilder {
    config: LoggerConfig,
}

impl LoggerConfigBuilder {
    /// 设置日志级别
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.config.level = level.into();
        self
    }

    /// 启用 JSON 格式输出
    pub fn json_format(mut self, enable: bool) -> Self {
        self.config.json_format = enable;
        self
    }

    /// 设置控制台输出
    pub fn console_output(mut self, enable: bool) -> Self {
        self.config.console_output = enable;
        self
    }

    /// 设置文件输出目录
    pub fn file_output(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.file_output = Some(dir.into());
        self
    }

    /// 设置日志文件前缀
    pub fn file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.file_prefix = prefix.into();
        self
    }

    /// 设置轮转策略
    pub fn rotation(mut self, strategy: RotationStrategy) -> Self {
        self.config.rotation = strategy;
        self
    }

    /// 显示目标模块
    pub fn show_target(mut self, enable: bool) -> Self {
        self.config.show_target = enable;
        self
    }

    /// 启用 ANSI 颜色
    pub fn ansi_colors(mut self, enable: bool) -> Self {
        self.config.ansi_colors = enable;
        self
    }

    /// 设置过滤指令
    pub fn filter_directives(mut self, directives: impl Into<String>) -> Self {
        self.config.filter_directives = Some(directives.into());
        self
    }

    /// 构建配置
    pub fn build(self) -> LoggerConfig {
        self.config
    }
}

// ============================================================================
// 日志守卫
// ============================================================================

/// 日志系统守卫
///
/// 持有非阻塞写入器的 WorkerGuard，丢弃时会刷新所有挂起的日志。
#[must_use = "丢弃守卫会立即停止非阻塞日志写入"]
pub struct LogGuard {
    guards: Vec<WorkerGuard>,
}

impl LogGuard {
    fn empty() -> Self {
        Self { guards: Vec::new() }
    }

    /// 当前持有的写入器数量
    pub fn writer_count(&self) -> usize {
        self.guards.len()
    }
}

// ============================================================================
// 日志系统
// ============================================================================

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// 日志系统
pub struct Logger;

impl Logger {
    /// 初始化全局日志订阅者
    ///
    /// 返回的 [`LogGuard`] 必须保持存活直到程序退出。
    ///
    /// # Errors
    ///
    /// 日志系统已初始化或全局订阅者已被其他组件设置时返回 [`RouterError::InitFailed`]。
    pub fn init(config: LoggerConfig) -> Result<LogGuard> {
        if LOGGER_INITIALIZED.get().is_some() {
            return Err(RouterError::InitFailed(
                "日志系统已初始化，不能重复初始化".to_string(),
            ));
        }

        let env_filter = Self::create_env_filter(&config);
        let mut guard = LogGuard::empty();
        let mut layers: Vec<BoxedLayer> = Vec::new();

        if config.console_output {
            let (writer, console_guard) = tracing_appender::non_blocking(io::stdout());
            guard.guards.push(console_guard);
            layers.push(Self::format_layer(&config, writer, config.ansi_colors));
        }

        if let Some(ref log_dir) = config.file_output {
            let appender = RollingFileAppender::new(
                config.rotation.to_rotation(),
                log_dir,
                format!("{}.log", config.file_prefix),
            );
            let (writer, file_guard) = tracing_appender::non_blocking(appender);
            guard.guards.push(file_guard);
            // 文件不使用 ANSI
            layers.push(Self::format_layer(&config, writer, false));
        }

        tracing_subscriber::registry()
            .with(layers)
            .with(env_filter)
            .try_init()
            .map_err(|e| RouterError::InitFailed(format!("日志系统初始化失败: {}", e)))?;

        let _ = LOGGER_INITIALIZED.set(());
        Ok(guard)
    }

    /// 尝试初始化日志系统，已初始化时返回空守卫
    pub fn try_init(config: LoggerConfig) -> LogGuard {
        Self::init(config).unwrap_or_else(|_| LogGuard::empty())
    }

    fn format_layer<W>(config: &LoggerConfig, writer: W, ansi: bool) -> BoxedLayer
    where
        W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
    {
        if config.json_format {
            fmt::layer()
                .json()
                .with_writer(writer)
                .with_target(config.show_target)
                .with_ansi(false)
                .boxed()
        } else {
            fmt::layer()
                .with_writer(writer)
                .with_target(config.show_target)
                .with_ansi(ansi)
                .boxed()
        }
    }

    fn create_env_filter(config: &LoggerConfig) -> EnvFilter {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.parse_level().as_str().to_lowercase()));

        match config.filter_directives {
            Some(ref directives) => directives
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .filter_map(|d| d.parse().ok())
                .fold(filter, |f, directive| f.add_directive(directive)),
            None => filter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_strategy_from_name() {
        assert_eq!(RotationStrategy::from_name("daily"), RotationStrategy::Daily);
        assert_eq!(RotationStrategy::from_name("HOURLY"), RotationStrategy::Hourly);
        assert_eq!(RotationStrategy::from_name("none"), RotationStrategy::Never);
        assert_eq!(RotationStrategy::from_name("weekly"), RotationStrategy::Daily);
    }

    #[test]
    fn test_rotation_strategy_display() {
        assert_eq!(RotationStrategy::Never.to_string(), "never");
        assert_eq!(RotationStrategy::Hourly.to_string(), "hourly");
        assert_eq!(RotationStrategy::Daily.to_string(), "daily");
    }

    #[test]
    fn test_logger_config_builder() {
        let config = LoggerConfig::builder()
            .level("debug")
            .json_format(true)
            .file_output("/var/log/chips")
            .file_prefix("nav")
            .rotation(RotationStrategy::Hourly)
            .show_target(false)
            .ansi_colors(false)
            .filter_directives("chips_route::binding=trace")
            .build();

        assert_eq!(config.level, "debug");
        assert!(config.json_format);
        assert_eq!(config.file_output, Some(PathBuf::from("/var/log/chips")));
        assert_eq!(config.file_prefix, "nav");
        assert_eq!(config.rotation, RotationStrategy::Hourly);
        assert!(!config.show_target);
        assert!(!config.ansi_colors);
        assert_eq!(
            config.filter_directives.as_deref(),
            Some("chips_route::binding=trace")
        );
    }

    #[test]
    fn test_parse_level() {
        for (name, expected) in [
            ("trace", Level::TRACE),
            ("DEBUG", Level::DEBUG),
            ("warning", Level::WARN),
            ("error", Level::ERROR),
            ("bogus", Level::INFO),
        ] {
            let config = LoggerConfig::builder().level(name).build();
            assert_eq!(config.parse_level(), expected, "level: {}", name);
        }
    }

    #[test]
    fn test_from_log_config_without_file_output() {
        use crate::core::config::LogConfig;

        let log_config = LogConfig {
            level: "warn".to_string(),
            file_output: false,
            log_dir: Some(PathBuf::from("/var/log")),
            json_format: true,
            rotation: "hourly".to_string(),
        };

        let config = LoggerConfig::from_log_config(&log_config);
        assert_eq!(config.level, "warn");
        assert!(config.json_format);
        assert!(config.file_output.is_none());
        assert_eq!(config.rotation, RotationStrategy::Hourly);
    }

    #[test]
    fn test_env_filter_ignores_bad_directives() {
        let config = LoggerConfig::builder()
            .filter_directives("chips_route=debug, ,[[bad")
            .build();
        let _filter = Logger::create_env_filter(&config);
    }

    #[test]
    fn test_logger_try_init_never_fails() {
        let _guard = Logger::try_init(LoggerConfig::default());
        let second = Logger::try_init(LoggerConfig::default());
        assert_eq!(second.writer_count(), 0);
    }
}
