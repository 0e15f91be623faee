//! 类型描述表
//!
//! 显式记录每个应用类型的父类型，绑定器解析沿此表向上查找，
//! 不依赖语言自身的对象模型。

use std::collections::HashMap;

/// 类型名 -> 父类型名
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    parents: HashMap<String, String>,
}

impl TypeTable {
    /// 创建空表
    pub fn new() -> Self {
        Self::default()
    }

    /// 声明类型的父类型，重复声明时覆盖
    pub fn declare(
        &mut self,
        type_name: impl Into<String>,
        parent: impl Into<String>,
    ) -> &mut Self {
        self.parents.insert(type_name.into(), parent.into());
        self
    }

    /// 查询父类型
    pub fn parent_of(&self, type_name: &str) -> Option<&str> {
        self.parents.get(type_name).map(String::as_str)
    }

    /// 由近及远返回祖先链（不含自身），遇到环时停止
    pub fn ancestors<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let mut seen = vec![type_name];
        let mut current = type_name;
        std::iter::from_fn(move || {
            let parent = self.parent_of(current)?;
            if seen.contains(&parent) {
                return None;
            }
            seen.push(parent);
            current = parent;
            Some(parent)
        })
    }

    /// 已声明的类型数量
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_and_ancestors() {
        let mut table = TypeTable::new();
        table
            .declare("app::AdminScreen", "app::UserScreen")
            .declare("app::UserScreen", "app::BaseScreen")
            .declare("app::BaseScreen", "std::Activity");

        assert_eq!(table.parent_of("app::AdminScreen"), Some("app::UserScreen"));
        assert_eq!(table.parent_of("std::Activity"), None);
        assert_eq!(
            table.ancestors("app::AdminScreen").collect::<Vec<_>>(),
            vec!["app::UserScreen", "app::BaseScreen", "std::Activity"]
        );
    }

    #[test]
    fn test_ancestors_stop_on_cycle() {
        let mut table = TypeTable::new();
        table.declare("a", "b").declare("b", "a");
        assert_eq!(table.ancestors("a").collect::<Vec<_>>(), vec!["b"]);
    }
}
