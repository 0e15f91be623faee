//! 路由表数据结构
//!
//! 管理模式字符串到路由描述的映射。路由表在启动阶段填充，之后只读。
//! 遍历顺序为首次注册顺序；重复注册同一模式会原位替换描述。

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

use super::pattern::{ParameterMap, RoutePattern};
use crate::utils::Result;

/// 路由回调，命中时代替打开页面
pub type RouteCallback = Arc<dyn Fn(&ParameterMap) + Send + Sync>;

/// 注册路由时的可选项
#[derive(Clone, Default)]
pub struct RouteOptions {
    /// 回调（设置后不再交给外部启动器）
    pub callback: Option<RouteCallback>,
    /// 默认参数，会被路径中提取的同名参数覆盖
    pub default_params: Option<ParameterMap>,
}

impl RouteOptions {
    /// 创建空选项
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置回调
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ParameterMap) + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// 添加单个默认参数
    pub fn with_default_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_params
            .get_or_insert_with(ParameterMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// 整体设置默认参数
    pub fn with_default_params(mut self, params: ParameterMap) -> Self {
        self.default_params = Some(params);
        self
    }
}

impl fmt::Debug for RouteOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteOptions")
            .field("callback", &self.callback.is_some())
            .field("default_params", &self.default_params)
            .finish()
    }
}

/// 路由描述
///
/// 将模式与目标类型标识、可选回调、可选默认参数关联在一起。
#[derive(Clone)]
pub struct RouteDescriptor {
    pattern: RoutePattern,
    target: String,
    options: RouteOptions,
}

impl RouteDescriptor {
    /// 解析模式并创建描述
    pub fn new(pattern: &str, target: impl Into<String>, options: RouteOptions) -> Result<Self> {
        Ok(Self {
            pattern: RoutePattern::parse(pattern)?,
            target: target.into(),
            options,
        })
    }

    /// 路由模式
    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    /// 目标类型标识
    pub fn target(&self) -> &str {
        &self.target
    }

    /// 回调
    pub fn callback(&self) -> Option<&RouteCallback> {
        self.options.callback.as_ref()
    }

    /// 是否为回调路由
    pub fn is_callback(&self) -> bool {
        self.options.callback.is_some()
    }

    /// 默认参数
    pub fn default_params(&self) -> Option<&ParameterMap> {
        self.options.default_params.as_ref()
    }
}

impl fmt::Debug for RouteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDescriptor")
            .field("pattern", &self.pattern.as_str())
            .field("target", &self.target)
            .field("options", &self.options)
            .finish()
    }
}

#[derive(Default)]
struct TableInner {
    /// 按首次注册顺序排列
    entries: Vec<Arc<RouteDescriptor>>,
    /// 模式字符串 -> entries 下标
    index: HashMap<String, usize>,
}

/// 路由表
#[derive(Default)]
pub struct RouteTable {
    inner: RwLock<TableInner>,
}

impl RouteTable {
    /// 创建空路由表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册路由描述
    ///
    /// 模式字符串已存在时替换原描述并保留其位置，返回被替换的描述。
    pub fn register(&self, descriptor: RouteDescriptor) -> Option<Arc<RouteDescriptor>> {
        let key = descriptor.pattern().as_str().to_string();
        let target = descriptor.target().to_string();
        let descriptor = Arc::new(descriptor);

        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let replaced = match inner.index.get(&key).copied() {
            Some(position) => Some(std::mem::replace(&mut inner.entries[position], descriptor)),
            None => {
                let position = inner.entries.len();
                inner.entries.push(descriptor);
                inner.index.insert(key.clone(), position);
                None
            }
        };
        drop(inner);

        if replaced.is_some() {
            debug!(pattern = %key, target_type = %target, "覆盖已注册的路由");
        } else {
            info!(pattern = %key, target_type = %target, "注册路由");
        }
        replaced
    }

    /// 按注册顺序扫描，返回第一个非 `None` 的结果
    ///
    /// 扫描期间持有读锁，看到的是一致的路由表视图。
    pub fn find_map<T, F>(&self, mut f: F) -> Option<T>
    where
        F: FnMut(&Arc<RouteDescriptor>) -> Option<T>,
    {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.entries.iter().find_map(|entry| f(entry))
    }

    /// 按注册顺序返回所有路由描述的快照
    pub fn all_patterns(&self) -> Vec<Arc<RouteDescriptor>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.entries.clone()
    }

    /// 按模式字符串查找
    pub fn get(&self, pattern: &str) -> Option<Arc<RouteDescriptor>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .index
            .get(pattern)
            .map(|&position| Arc::clone(&inner.entries[position]))
    }

    /// 已注册路由数量
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    /// 路由表是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 导出路由表（用于调试）
    pub fn export(&self) -> RouteTableExport {
        let routes = self
            .all_patterns()
            .iter()
            .map(|d| ExportedRoute {
                pattern: d.pattern().as_str().to_string(),
                target: d.target().to_string(),
                callback: d.is_callback(),
                default_params: d.default_params().cloned().unwrap_or_default(),
            })
            .collect();
        RouteTableExport { routes }
    }
}

/// 导出的单条路由
#[derive(Debug, Clone, Serialize)]
pub struct ExportedRoute {
    /// 路由模式
    pub pattern: String,
    /// 目标类型名
    pub target: String,
    /// 是否为回调路由
    pub callback: bool,
    /// 默认参数
    #[serde(skip_serializing_if = "ParameterMap::is_empty")]
    pub default_params: ParameterMap,
}

/// 路由表导出数据
#[derive(Debug, Clone, Serialize)]
pub struct RouteTableExport {
    /// 按注册顺序排列的路由
    pub routes: Vec<ExportedRoute>,
}
