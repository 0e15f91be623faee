//! 绑定器注册表
//!
//! 为运行时类型解析生成的注入器/保存器。解析策略：
//!
//! 1. 缓存中已有结果（命中或明确的"无绑定器"）直接返回
//! 2. 类型名落在框架边界前缀内，记为"无绑定器"，不再向上查找
//! 3. 查找按约定命名的伴生绑定器 `类型名 + 后缀`
//! 4. 未找到且类型表声明了父类型时沿父类型继续，结果同时缓存到沿途所有类型
//! 5. 到达顶层仍未找到，记为"无绑定器"
//!
//! 每个 (类型, 角色) 只解析一次，之后永远走缓存。

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

use super::binder::Binder;
use super::type_table::TypeTable;
use crate::core::config::BindingConfig;

/// 绑定器角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BinderRole {
    /// 注入（存储 -> 对象）
    Inject,
    /// 保存（对象 -> 存储）
    Save,
}

impl fmt::Display for BinderRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinderRole::Inject => write!(f, "inject"),
            BinderRole::Save => write!(f, "save"),
        }
    }
}

/// 缓存的解析结果
#[derive(Clone)]
pub enum BinderEntry {
    /// 找到绑定器
    Found(Arc<dyn Binder>),
    /// 明确不存在（负缓存）
    Absent,
}

impl BinderEntry {
    /// 取出绑定器
    pub fn binder(&self) -> Option<Arc<dyn Binder>> {
        match self {
            BinderEntry::Found(binder) => Some(Arc::clone(binder)),
            BinderEntry::Absent => None,
        }
    }

    /// 是否找到绑定器
    pub fn is_found(&self) -> bool {
        matches!(self, BinderEntry::Found(_))
    }
}

impl fmt::Debug for BinderEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinderEntry::Found(_) => f.write_str("Found"),
            BinderEntry::Absent => f.write_str("Absent"),
        }
    }
}

/// 生成的绑定器表（伴生名 -> 绑定器）
///
/// 由代码生成步骤在启动前一次性填充。
#[derive(Default, Clone)]
pub struct GeneratedBinders {
    binders: HashMap<String, Arc<dyn Binder>>,
}

impl GeneratedBinders {
    /// 创建空表
    pub fn new() -> Self {
        Self::default()
    }

    /// 以伴生名注册绑定器，例如 `"app::UserScreen$$Binder"`
    pub fn insert<B>(&mut self, companion: impl Into<String>, binder: B) -> &mut Self
    where
        B: Binder + 'static,
    {
        self.binders.insert(companion.into(), Arc::new(binder));
        self
    }

    /// 按伴生名查找
    pub fn get(&self, companion: &str) -> Option<Arc<dyn Binder>> {
        self.binders.get(companion).cloned()
    }

    /// 已注册数量
    pub fn len(&self) -> usize {
        self.binders.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.binders.is_empty()
    }
}

/// 绑定缓存统计
#[derive(Debug, Clone, Default, Serialize)]
pub struct BindingCacheStats {
    /// 注入器缓存条目数
    pub injectors: usize,
    /// 注入器缓存中命中绑定器的条目数
    pub injectors_found: usize,
    /// 保存器缓存条目数
    pub savers: usize,
    /// 保存器缓存中命中绑定器的条目数
    pub savers_found: usize,
}

type EntryCache = RwLock<HashMap<String, BinderEntry>>;

/// 绑定器注册表
pub struct BindingRegistry {
    config: BindingConfig,
    types: TypeTable,
    generated: GeneratedBinders,
    injectors: EntryCache,
    savers: EntryCache,
}

impl BindingRegistry {
    /// 创建注册表
    pub fn new(config: BindingConfig, types: TypeTable, generated: GeneratedBinders) -> Self {
        Self {
            config,
            types,
            generated,
            injectors: RwLock::new(HashMap::new()),
            savers: RwLock::new(HashMap::new()),
        }
    }

    /// 使用默认配置创建空注册表
    pub fn with_defaults() -> Self {
        Self::new(BindingConfig::default(), TypeTable::new(), GeneratedBinders::new())
    }

    /// 为类型注册绑定器（按配置的后缀计算伴生名）
    ///
    /// 必须在首次解析该类型之前调用，已缓存的结果不会被重新解析。
    pub fn register_binder<B>(&mut self, type_name: &str, binder: B) -> &mut Self
    where
        B: Binder + 'static,
    {
        let companion = self.companion_name(type_name);
        self.generated.insert(companion, binder);
        self
    }

    /// 声明类型的父类型
    pub fn declare_type(&mut self, type_name: &str, parent: &str) -> &mut Self {
        self.types.declare(type_name, parent);
        self
    }

    /// 伴生绑定器名称
    pub fn companion_name(&self, type_name: &str) -> String {
        format!("{}{}", type_name, self.config.binder_suffix)
    }

    /// 类型是否属于框架边界
    pub fn is_framework_type(&self, type_name: &str) -> bool {
        self.config
            .framework_prefixes
            .iter()
            .any(|prefix| type_name.starts_with(prefix.as_str()))
    }

    /// 解析注入器
    pub fn resolve_injector(&self, type_name: &str) -> Option<Arc<dyn Binder>> {
        self.resolve(type_name, BinderRole::Inject)
    }

    /// 解析保存器
    pub fn resolve_saver(&self, type_name: &str) -> Option<Arc<dyn Binder>> {
        self.resolve(type_name, BinderRole::Save)
    }

    /// 按角色解析绑定器
    pub fn resolve(&self, type_name: &str, role: BinderRole) -> Option<Arc<dyn Binder>> {
        let cache = self.cache_for(role);

        if let Some(entry) = Self::cached(cache, type_name) {
            debug!(type_name, %role, found = entry.is_found(), "HIT: 命中绑定器缓存");
            return entry.binder();
        }

        let mut visited = Vec::new();
        let candidates = std::iter::once(type_name).chain(self.types.ancestors(type_name));
        let mut found = None;
        for current in candidates {
            visited.push(current);
            if current != type_name {
                if let Some(entry) = Self::cached(cache, current) {
                    found = Some(entry);
                    break;
                }
            }

            if self.is_framework_type(current) {
                debug!(type_name = current, %role, "MISS: 到达框架类型，停止查找");
                found = Some(BinderEntry::Absent);
                break;
            }

            if let Some(binder) = self.generated.get(&self.companion_name(current)) {
                debug!(type_name = current, %role, "HIT: 找到生成的绑定器");
                found = Some(BinderEntry::Found(binder));
                break;
            }
        }

        let entry = found.unwrap_or_else(|| {
            let top = visited.last().copied().unwrap_or(type_name);
            match self.types.parent_of(top) {
                Some(parent) => warn!(type_name = top, parent, "类型表存在循环继承，停止查找"),
                None => debug!(type_name = top, %role, "MISS: 已到达顶层类型"),
            }
            BinderEntry::Absent
        });

        let mut entries = cache.write().unwrap_or_else(PoisonError::into_inner);
        for visited_type in &visited {
            entries
                .entry((*visited_type).to_string())
                .or_insert_with(|| entry.clone());
        }
        entries.get(type_name).and_then(BinderEntry::binder)
    }

    /// 查看缓存中的解析结果（不触发解析）
    pub fn cached_entry(&self, type_name: &str, role: BinderRole) -> Option<BinderEntry> {
        Self::cached(self.cache_for(role), type_name)
    }

    /// 获取缓存统计
    pub fn cache_stats(&self) -> BindingCacheStats {
        let count = |cache: &EntryCache| {
            let entries = cache.read().unwrap_or_else(PoisonError::into_inner);
            let found = entries.values().filter(|e| e.is_found()).count();
            (entries.len(), found)
        };
        let (injectors, injectors_found) = count(&self.injectors);
        let (savers, savers_found) = count(&self.savers);
        BindingCacheStats {
            injectors,
            injectors_found,
            savers,
            savers_found,
        }
    }

    /// 配置
    pub fn config(&self) -> &BindingConfig {
        &self.config
    }

    fn cache_for(&self, role: BinderRole) -> &EntryCache {
        match role {
            BinderRole::Inject => &self.injectors,
            BinderRole::Save => &self.savers,
        }
    }

    fn cached(cache: &EntryCache, type_name: &str) -> Option<BinderEntry> {
        cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(type_name)
            .cloned()
    }
}

impl Default for BindingRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
