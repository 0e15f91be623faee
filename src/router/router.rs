//! 路由器主结构体
//!
//! 整合路由表、匹配器与绑定调度器，对外提供注册、打开 url 与参数绑定的入口。
//! 路由器本身不负责页面切换，匹配结果以 [`NavigationRequest`] 的形式交给
//! 外部的 [`NavigationContext`]。

use std::sync::Arc;
use tracing::{debug, info};

use super::matcher::{MatchCacheStats, ResolvedMatch, RouteMatcher};
use super::pattern::ParameterMap;
use super::request::{NavigationRequest, NavigationRequestBuilder};
use super::route_table::{RouteDescriptor, RouteOptions, RouteTable, RouteTableExport};
use crate::binding::{
    Bindable, BindingCacheStats, BindingDispatcher, BindingRegistry, GeneratedBinders,
    ParameterStore, TypeTable,
};
use crate::core::config::{RouteConfig, RouteSpec};
use crate::utils::{Result, RouterError};

/// 导航上下文
///
/// 由宿主平台实现，负责根据导航请求真正打开目标。
pub trait NavigationContext: Send + Sync {
    /// 启动导航
    fn start_navigation(&self, request: NavigationRequest) -> anyhow::Result<()>;
}

/// 声明了路由的目标类型
///
/// 通常由代码生成器根据类型上的路由注解实现。
pub trait Routable {
    /// 目标类型名
    const TARGET: &'static str;
    /// 该类型响应的路由模式
    const ROUTES: &'static [&'static str];
}

/// 路由器
///
/// - 注册路由模式
/// - 解析 url 并合并参数
/// - 打开 url（回调或导航请求）
/// - 在目标对象与参数存储之间绑定字段
pub struct Router {
    table: Arc<RouteTable>,
    matcher: RouteMatcher,
    dispatcher: BindingDispatcher,
    context: Option<Arc<dyn NavigationContext>>,
}

impl Router {
    /// 创建没有导航上下文的路由器
    pub fn new() -> Self {
        let table = Arc::new(RouteTable::new());
        Self {
            matcher: RouteMatcher::new(Arc::clone(&table)),
            table,
            dispatcher: BindingDispatcher::new(Arc::new(BindingRegistry::with_defaults())),
            context: None,
        }
    }

    /// 创建带默认导航上下文的路由器
    pub fn with_context(context: Arc<dyn NavigationContext>) -> Self {
        let mut router = Self::new();
        router.context = Some(context);
        router
    }

    /// 根据配置创建路由器，注册配置中声明的所有路由
    pub fn from_config(config: &RouteConfig) -> Result<Self> {
        Self::from_config_with(config, TypeTable::new(), GeneratedBinders::new())
    }

    /// 根据配置与生成的绑定器表创建路由器
    pub fn from_config_with(
        config: &RouteConfig,
        types: TypeTable,
        generated: GeneratedBinders,
    ) -> Result<Self> {
        let registry = BindingRegistry::new(config.binding.clone(), types, generated);
        let router = Self::new().with_binding(registry);
        router.register_specs(&config.routes)?;

        info!(
            routes = router.table.len(),
            binder_suffix = %config.binding.binder_suffix,
            "路由器已按配置初始化"
        );
        Ok(router)
    }

    /// 替换绑定器注册表
    pub fn with_binding(mut self, registry: BindingRegistry) -> Self {
        self.dispatcher = BindingDispatcher::new(Arc::new(registry));
        self
    }

    /// 设置默认导航上下文
    pub fn set_context(&mut self, context: Arc<dyn NavigationContext>) {
        self.context = Some(context);
    }

    /// 当前默认导航上下文
    pub fn context(&self) -> Option<&Arc<dyn NavigationContext>> {
        self.context.as_ref()
    }

    // ========================================================================
    // 注册
    // ========================================================================

    /// 注册路由
    pub fn map(&self, pattern: &str, target: impl Into<String>) -> Result<()> {
        self.map_with(pattern, target, RouteOptions::new())
    }

    /// 带选项注册路由
    ///
    /// 同一模式再次注册时替换原有描述。路由表变化后匹配缓存会被清空。
    pub fn map_with(
        &self,
        pattern: &str,
        target: impl Into<String>,
        options: RouteOptions,
    ) -> Result<()> {
        let descriptor = RouteDescriptor::new(pattern, target, options)?;
        self.table.register(descriptor);
        self.matcher.clear_cache();
        Ok(())
    }

    /// 注册类型声明的全部路由
    pub fn register_routes<T: Routable>(&self) -> Result<&Self> {
        debug!(target_type = T::TARGET, count = T::ROUTES.len(), "注册类型路由");
        for pattern in T::ROUTES {
            self.map(pattern, T::TARGET)?;
        }
        Ok(self)
    }

    /// 注册声明式路由
    pub fn register_specs(&self, specs: &[RouteSpec]) -> Result<()> {
        for spec in specs {
            let options = RouteOptions::new().with_default_params(spec.defaults.clone());
            self.map_with(&spec.pattern, spec.target.as_str(), options)?;
        }
        Ok(())
    }

    // ========================================================================
    // 解析与打开
    // ========================================================================

    /// 解析 url
    pub fn resolve(&self, url: &str) -> Result<Arc<ResolvedMatch>> {
        self.matcher.resolve(url)
    }

    /// 合并后的参数（默认参数 + 路径参数）
    pub fn params_for(&self, url: &str) -> Result<ParameterMap> {
        let resolved = self.resolve(url)?;
        Ok(NavigationRequestBuilder::build(&resolved))
    }

    /// 构建导航请求，回调路由返回 `None`
    pub fn request_for(&self, url: &str) -> Result<Option<NavigationRequest>> {
        let resolved = self.resolve(url)?;
        if resolved.descriptor().is_callback() {
            return Ok(None);
        }
        Ok(Some(NavigationRequestBuilder::request(url, &resolved, false)))
    }

    /// url 是否指向回调路由
    pub fn is_callback_url(&self, url: &str) -> Result<bool> {
        Ok(self.resolve(url)?.descriptor().is_callback())
    }

    /// 使用默认导航上下文打开 url
    ///
    /// # Errors
    ///
    /// - 没有设置上下文时返回 [`RouterError::MissingContext`]
    /// - 没有匹配的路由时返回 [`RouterError::RouteNotFound`]
    pub fn open(&self, url: &str) -> Result<()> {
        let context = self
            .context
            .clone()
            .ok_or_else(|| RouterError::MissingContext(url.to_string()))?;
        self.open_with(url, &context)
    }

    /// 使用指定的导航上下文打开 url
    ///
    /// 回调路由直接以合并后的参数调用回调；否则构建导航请求交给上下文。
    /// 上下文与路由器的默认上下文是同一个对象时，请求标记为在新任务中启动。
    pub fn open_with(&self, url: &str, context: &Arc<dyn NavigationContext>) -> Result<()> {
        let resolved = self.resolve(url)?;

        if let Some(callback) = resolved.descriptor().callback() {
            debug!(path = url, "执行路由回调");
            callback(&NavigationRequestBuilder::build(&resolved));
            return Ok(());
        }

        let new_task = self.is_own_context(context);
        let request = NavigationRequestBuilder::request(url, &resolved, new_task);
        debug!(
            path = url,
            target_type = %request.target,
            request_id = %request.request_id,
            new_task,
            "启动导航"
        );
        context.start_navigation(request)?;
        Ok(())
    }

    fn is_own_context(&self, context: &Arc<dyn NavigationContext>) -> bool {
        self.context
            .as_ref()
            .map(|own| std::ptr::addr_eq(Arc::as_ptr(own), Arc::as_ptr(context)))
            .unwrap_or(false)
    }

    // ========================================================================
    // 参数绑定
    // ========================================================================

    /// 将存储中的参数注入目标对象，返回是否找到了绑定器
    pub fn inject(&self, target: &mut dyn Bindable, store: &ParameterStore) -> Result<bool> {
        self.dispatcher.inject(target, store)
    }

    /// 将导航请求中的参数注入目标对象
    pub fn inject_request(
        &self,
        target: &mut dyn Bindable,
        request: &NavigationRequest,
    ) -> Result<bool> {
        self.dispatcher.inject(target, &request.to_store())
    }

    /// 保存多个目标对象
    pub fn save(
        &self,
        store: &mut ParameterStore,
        targets: &[&dyn Bindable],
        flatten: bool,
    ) -> Result<()> {
        self.dispatcher.save(store, targets, flatten)
    }

    /// 以展开方式保存多个目标对象
    pub fn save_flat(&self, store: &mut ParameterStore, targets: &[&dyn Bindable]) -> Result<()> {
        self.dispatcher.save_flat(store, targets)
    }

    /// 保存单个目标对象，返回是否找到了绑定器
    pub fn save_single(
        &self,
        store: &mut ParameterStore,
        target: &dyn Bindable,
        flatten: bool,
    ) -> Result<bool> {
        self.dispatcher.save_single(store, target, flatten)
    }

    // ========================================================================
    // 查询
    // ========================================================================

    /// 路由表引用
    pub fn route_table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    /// 导出路由表
    pub fn export(&self) -> RouteTableExport {
        self.table.export()
    }

    /// 匹配缓存统计
    pub fn cache_stats(&self) -> MatchCacheStats {
        self.matcher.cache_stats()
    }

    /// 绑定缓存统计
    pub fn binding_stats(&self) -> BindingCacheStats {
        self.dispatcher.registry().cache_stats()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
