//! 绑定器
//!
//! 绑定器由独立的代码生成步骤为每个应用类型产出，负责在目标对象字段与
//! [`ParameterStore`] 之间复制值。运行时不做类型反射：目标对象通过
//! [`Bindable`] 按字段名读写，生成的绑定器只携带字段描述。

use anyhow::{anyhow, bail, Context};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::store::ParameterStore;

/// 可绑定对象
///
/// 由应用类型实现（通常也由代码生成器产出），暴露运行时类型名与按名读写字段的能力。
pub trait Bindable {
    /// 运行时类型名，用于查找绑定器，例如 `"app::screens::UserScreen"`
    fn type_name(&self) -> &str;

    /// 读取字段当前值，字段不存在时返回 `None`
    fn read_property(&self, name: &str) -> Option<Value>;

    /// 写入字段
    fn write_property(&mut self, name: &str, value: Value) -> anyhow::Result<()>;
}

/// 绑定器
///
/// 对应生成的 `T$$Binder` 伴生类型，提供注入与保存两个入口。
pub trait Binder: Send + Sync {
    /// 从存储中读取值写入目标字段
    fn inject(&self, target: &mut dyn Bindable, store: &ParameterStore) -> anyhow::Result<()>;

    /// 将目标字段写入存储，`flatten` 为 true 时嵌套对象展开到顶层
    fn save(
        &self,
        target: &dyn Bindable,
        store: &mut ParameterStore,
        flatten: bool,
    ) -> anyhow::Result<()>;
}

/// 字段在存储中的值类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    /// 字符串
    String,
    /// 32 位整数
    Int,
    /// 64 位整数
    Long,
    /// 布尔值
    Bool,
    /// 浮点数
    Double,
    /// 嵌套对象
    Nested,
}

impl PropertyKind {
    /// 将存储中的值规整为该类型
    ///
    /// 路径参数总是字符串，因此数值与布尔类型也接受可解析的字符串。
    pub fn coerce(self, value: &Value) -> anyhow::Result<Value> {
        match (self, value) {
            (PropertyKind::String, Value::String(_)) => Ok(value.clone()),
            (PropertyKind::String, Value::Number(n)) => Ok(Value::String(n.to_string())),
            (PropertyKind::String, Value::Bool(b)) => Ok(Value::String(b.to_string())),

            (PropertyKind::Int, _) => {
                let n = Self::integer(value)?;
                let n = i32::try_from(n).map_err(|_| anyhow!("{} 超出 int 范围", n))?;
                Ok(Value::from(n))
            }
            (PropertyKind::Long, _) => Ok(Value::from(Self::integer(value)?)),

            (PropertyKind::Double, Value::Number(n)) if n.as_f64().is_some() => Ok(value.clone()),
            (PropertyKind::Double, Value::String(s)) => {
                let parsed: f64 = s
                    .trim()
                    .parse()
                    .with_context(|| format!("无法解析为 double: '{}'", s))?;
                serde_json::Number::from_f64(parsed)
                    .map(Value::Number)
                    .ok_or_else(|| anyhow!("double 值无效: '{}'", s))
            }

            (PropertyKind::Bool, Value::Bool(_)) => Ok(value.clone()),
            (PropertyKind::Bool, Value::String(s)) => match s.as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => bail!("无法解析为 bool: '{}'", s),
            },

            (PropertyKind::Nested, Value::Object(_)) => Ok(value.clone()),

            (kind, other) => bail!("值 {} 不能作为 {:?} 使用", other, kind),
        }
    }

    fn integer(value: &Value) -> anyhow::Result<i64> {
        match value {
            Value::Number(n) => n.as_i64().ok_or_else(|| anyhow!("{} 不是整数", n)),
            Value::String(s) => s
                .trim()
                .parse()
                .with_context(|| format!("无法解析为整数: '{}'", s)),
            other => bail!("值 {} 不是整数", other),
        }
    }
}

/// 单个字段的绑定描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyBinding {
    /// 字段名
    pub name: String,
    /// 值类型
    pub kind: PropertyKind,
    /// 存储中的键，为空时使用字段名
    #[serde(default)]
    pub key: String,
}

impl PropertyBinding {
    /// 创建以字段名为键的绑定
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            key: String::new(),
        }
    }

    /// 指定存储键
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// 实际使用的存储键
    pub fn store_key(&self) -> &str {
        if self.key.is_empty() {
            &self.name
        } else {
            &self.key
        }
    }
}

/// 数据驱动的生成绑定器
///
/// 代码生成器为每个带绑定注解的类型输出一个 `GeneratedBinder`，
/// 只声明该类型自身的字段。
#[derive(Debug, Clone, Default)]
pub struct GeneratedBinder {
    bindings: Vec<PropertyBinding>,
}

impl GeneratedBinder {
    /// 创建空绑定器
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加字段绑定
    pub fn bind(mut self, binding: PropertyBinding) -> Self {
        self.bindings.push(binding);
        self
    }

    /// 所有字段绑定
    pub fn bindings(&self) -> &[PropertyBinding] {
        &self.bindings
    }
}

impl Binder for GeneratedBinder {
    fn inject(&self, target: &mut dyn Bindable, store: &ParameterStore) -> anyhow::Result<()> {
        for binding in &self.bindings {
            let key = binding.store_key();
            let value = match store.get(key) {
                Some(Value::Null) | None => continue,
                Some(value) => value,
            };

            let value = binding
                .kind
                .coerce(value)
                .with_context(|| format!("字段 '{}' 注入失败（键 '{}'）", binding.name, key))?;
            target
                .write_property(&binding.name, value)
                .with_context(|| format!("字段 '{}' 写入失败", binding.name))?;
        }
        Ok(())
    }

    fn save(
        &self,
        target: &dyn Bindable,
        store: &mut ParameterStore,
        flatten: bool,
    ) -> anyhow::Result<()> {
        for binding in &self.bindings {
            let value = match target.read_property(&binding.name) {
                Some(Value::Null) | None => continue,
                Some(value) => value,
            };

            let value = binding
                .kind
                .coerce(&value)
                .with_context(|| format!("字段 '{}' 保存失败", binding.name))?;

            match value {
                Value::Object(entries) if flatten => {
                    for (key, nested) in entries {
                        store.put(key, nested);
                    }
                }
                value => store.put(binding.store_key(), value),
            }
        }
        Ok(())
    }
}
