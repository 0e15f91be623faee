//! 参数绑定模块
//!
//! 在目标对象与 [`ParameterStore`] 之间复制字段值。绑定器由代码生成步骤产出，
//! 运行时按类型名（沿显式类型表向上）解析并缓存。

pub mod binder;
pub mod dispatcher;
pub mod registry;
pub mod store;
pub mod type_table;

pub use binder::{Bindable, Binder, GeneratedBinder, PropertyBinding, PropertyKind};
pub use dispatcher::BindingDispatcher;
pub use registry::{BinderEntry, BinderRole, BindingCacheStats, BindingRegistry, GeneratedBinders};
pub use store::ParameterStore;
pub use type_table::TypeTable;
