//! 路由匹配器
//!
//! 将具体路径与路由表中的模式逐个比较，提取参数并按路径字符串缓存结果。
//!
//! 查找顺序：
//! 1. 匹配缓存（命中时返回同一个 `Arc`）
//! 2. 按注册顺序线性扫描，段数不同的模式直接跳过
//! 3. 逐段比较，第一个完全匹配的模式胜出
//!
//! 匹配缓存不会淘汰条目，不同路径的数量决定了缓存大小。
//! 未命中的路径不会进入缓存。

use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

use super::pattern::{split_path, ParameterMap};
use super::route_table::{RouteDescriptor, RouteTable};
use crate::utils::{Result, RouterError};

/// 匹配结果：命中的路由描述与提取出的参数
#[derive(Debug)]
pub struct ResolvedMatch {
    descriptor: Arc<RouteDescriptor>,
    params: ParameterMap,
}

impl ResolvedMatch {
    /// 命中的路由描述
    pub fn descriptor(&self) -> &Arc<RouteDescriptor> {
        &self.descriptor
    }

    /// 从路径中提取的参数（不含默认参数）
    pub fn params(&self) -> &ParameterMap {
        &self.params
    }
}

/// 匹配缓存统计信息
#[derive(Debug, Clone, Serialize)]
pub struct MatchCacheStats {
    /// 缓存命中次数
    pub hits: u64,
    /// 缓存未命中次数
    pub misses: u64,
    /// 缓存条目数量
    pub size: usize,
    /// 命中率（百分比）
    pub hit_rate: f64,
}

/// 匹配缓存（路径 -> 匹配结果），只追加
#[derive(Default)]
pub struct MatchCache {
    entries: RwLock<HashMap<String, Arc<ResolvedMatch>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MatchCache {
    /// 创建空缓存
    pub fn new() -> Self {
        Self::default()
    }

    /// 查询缓存
    pub fn get(&self, path: &str) -> Option<Arc<ResolvedMatch>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        match entries.get(path) {
            Some(found) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(Arc::clone(found))
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// 写入缓存，返回最终留在缓存中的结果
    ///
    /// 并发首次写入同一路径时先写入者保留，后来者拿到已缓存的 `Arc`。
    pub fn insert(&self, path: &str, resolved: Arc<ResolvedMatch>) -> Arc<ResolvedMatch> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(entries.entry(path.to_string()).or_insert(resolved))
    }

    /// 清空缓存（路由表变更后调用）
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// 缓存条目数量
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// 缓存是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 获取缓存统计信息
    pub fn stats(&self) -> MatchCacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;

        MatchCacheStats {
            hits,
            misses,
            size: self.len(),
            hit_rate: if total > 0 {
                (hits as f64 / total as f64) * 100.0
            } else {
                0.0
            },
        }
    }
}

/// 路由匹配器
pub struct RouteMatcher {
    table: Arc<RouteTable>,
    cache: MatchCache,
}

impl RouteMatcher {
    /// 基于路由表创建匹配器
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self {
            table,
            cache: MatchCache::new(),
        }
    }

    /// 解析路径
    ///
    /// # Errors
    ///
    /// 没有模式匹配时返回 [`RouterError::RouteNotFound`]，携带原始路径。
    pub fn resolve(&self, path: &str) -> Result<Arc<ResolvedMatch>> {
        if let Some(cached) = self.cache.get(path) {
            return Ok(cached);
        }

        let given = split_path(path);
        let resolved = self.table.find_map(|descriptor| {
            descriptor
                .pattern()
                .match_segments(&given)
                .map(|params| ResolvedMatch {
                    descriptor: Arc::clone(descriptor),
                    params,
                })
        });

        match resolved {
            Some(resolved) => {
                debug!(
                    path,
                    pattern = resolved.descriptor.pattern().as_str(),
                    "路由匹配成功"
                );
                Ok(self.cache.insert(path, Arc::new(resolved)))
            }
            None => {
                warn!(path, "未找到匹配的路由");
                Err(RouterError::RouteNotFound(path.to_string()))
            }
        }
    }

    /// 路由表引用
    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    /// 清空匹配缓存
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// 获取缓存统计信息
    pub fn cache_stats(&self) -> MatchCacheStats {
        self.cache.stats()
    }
}
