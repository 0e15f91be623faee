//! 绑定调度器
//!
//! 根据目标对象的运行时类型解析绑定器并调用。没有绑定器的类型是合法的空操作；
//! 绑定器返回的任何错误都包装为 [`RouterError::BindingInvocation`]。

use std::sync::Arc;
use tracing::{debug, error};

use super::binder::Bindable;
use super::registry::{BinderRole, BindingRegistry};
use super::store::ParameterStore;
use crate::utils::{Result, RouterError};

/// 绑定调度器
#[derive(Clone)]
pub struct BindingDispatcher {
    registry: Arc<BindingRegistry>,
}

impl BindingDispatcher {
    /// 基于注册表创建调度器
    pub fn new(registry: Arc<BindingRegistry>) -> Self {
        Self { registry }
    }

    /// 注册表引用
    pub fn registry(&self) -> &Arc<BindingRegistry> {
        &self.registry
    }

    /// 将存储中的参数注入目标对象
    ///
    /// 返回是否实际执行了绑定器。
    pub fn inject(&self, target: &mut dyn Bindable, store: &ParameterStore) -> Result<bool> {
        let type_name = target.type_name().to_string();
        debug!(type_name = %type_name, role = %BinderRole::Inject, "查找注入器");

        let Some(binder) = self.registry.resolve_injector(&type_name) else {
            return Ok(false);
        };

        binder
            .inject(target, store)
            .map_err(|source| Self::invocation_error(type_name, BinderRole::Inject, source))?;
        Ok(true)
    }

    /// 保存多个目标对象，`flatten` 对每个目标都生效
    pub fn save(
        &self,
        store: &mut ParameterStore,
        targets: &[&dyn Bindable],
        flatten: bool,
    ) -> Result<()> {
        for target in targets {
            self.save_single(store, *target, flatten)?;
        }
        Ok(())
    }

    /// 以展开方式保存多个目标对象
    pub fn save_flat(&self, store: &mut ParameterStore, targets: &[&dyn Bindable]) -> Result<()> {
        self.save(store, targets, true)
    }

    /// 保存单个目标对象
    ///
    /// 返回是否实际执行了绑定器。
    pub fn save_single(
        &self,
        store: &mut ParameterStore,
        target: &dyn Bindable,
        flatten: bool,
    ) -> Result<bool> {
        let type_name = target.type_name();
        debug!(type_name, role = %BinderRole::Save, flatten, "查找保存器");

        let Some(binder) = self.registry.resolve_saver(type_name) else {
            return Ok(false);
        };

        binder.save(target, store, flatten).map_err(|source| {
            Self::invocation_error(type_name.to_string(), BinderRole::Save, source)
        })?;
        Ok(true)
    }

    fn invocation_error(type_name: String, role: BinderRole, source: anyhow::Error) -> RouterError {
        error!(
            type_name = %type_name,
            %role,
            error = %format!("{:#}", source),
            "绑定器执行失败"
        );
        RouterError::BindingInvocation { type_name, source }
    }
}
