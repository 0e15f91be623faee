//! 路由模式
//!
//! 模式是以 `/` 分隔的段序列，以 `:` 开头的段是参数段，其余为字面量段。
//! 例如 `"groups/:id/topics/:topic_id"` 含两个字面量段和两个参数段。

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::utils::{Result, RouterError};

/// 路径分隔符
pub const SEPARATOR: char = '/';

/// 参数段前缀
pub const PARAM_MARKER: char = ':';

/// 参数表（参数名 -> 值）
pub type ParameterMap = HashMap<String, String>;

/// 模式中的一段
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Segment {
    /// 字面量段，必须逐字节相等
    Literal(String),
    /// 参数段，匹配任意值并以参数名绑定
    Param(String),
}

impl Segment {
    /// 是否为参数段
    pub fn is_param(&self) -> bool {
        matches!(self, Segment::Param(_))
    }
}

/// 已解析的路由模式，注册后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// 解析模式字符串
    ///
    /// # Errors
    ///
    /// 以下情况返回 [`RouterError::InvalidPattern`]：
    /// - 模式为空
    /// - 含有空段（结尾的空段会被忽略，与路径切分保持一致）
    /// - 参数名为空或在同一模式中重复
    ///
    /// `:` 之后的全部字符都是参数名，例如 `:post-id`、`:name.ext`。
    pub fn parse(raw: &str) -> Result<Self> {
        let parts = split_path(raw);
        if parts.is_empty() {
            return Err(RouterError::invalid_pattern(raw, "模式不能为空"));
        }

        let mut segments = Vec::with_capacity(parts.len());
        for part in parts {
            if part.is_empty() {
                return Err(RouterError::invalid_pattern(raw, "模式中不能有空段"));
            }

            match part.strip_prefix(PARAM_MARKER) {
                Some(name) => {
                    if name.is_empty() {
                        return Err(RouterError::invalid_pattern(raw, "参数名不能为空"));
                    }
                    if segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(existing) if existing == name))
                    {
                        return Err(RouterError::invalid_pattern(
                            raw,
                            format!("参数名 '{}' 重复", name),
                        ));
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Literal(part.to_string())),
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// 原始模式字符串
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// 所有段
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// 段数量
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// 模式是否没有段（解析成功的模式永远返回 false）
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// 按出现顺序返回参数名
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// 参数段数量
    pub fn param_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_param()).count()
    }

    /// 将已切分的路径与模式逐段比较
    ///
    /// 段数不同或任一字面量段不相等时返回 `None`；
    /// 匹配成功时，每个参数段恰好产生一个条目。
    pub fn match_segments(&self, given: &[&str]) -> Option<ParameterMap> {
        if given.len() != self.segments.len() {
            return None;
        }

        let mut params = ParameterMap::with_capacity(self.param_count());
        for (segment, value) in self.segments.iter().zip(given) {
            match segment {
                Segment::Param(name) => {
                    params.insert(name.clone(), (*value).to_string());
                }
                Segment::Literal(literal) => {
                    if literal.as_str() != *value {
                        return None;
                    }
                }
            }
        }
        Some(params)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// 按 `/` 切分路径，忽略结尾的空段
///
/// `"users/42/"` 与 `"users/42"` 切分结果相同；中间的空段会保留。
pub fn split_path(path: &str) -> Vec<&str> {
    let mut parts: Vec<&str> = path.split(SEPARATOR).collect();
    while parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal_and_params() {
        let pattern = RoutePattern::parse("groups/:id/topics/:topic_id").unwrap();
        assert_eq!(pattern.len(), 4);
        assert_eq!(pattern.param_count(), 2);
        assert_eq!(
            pattern.segments()[0],
            Segment::Literal("groups".to_string())
        );
        assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["id", "topic_id"]);
        assert_eq!(pattern.to_string(), "groups/:id/topics/:topic_id");
    }

    #[test]
    fn test_parse_rejects_invalid_patterns() {
        for raw in ["", "/", "users//:id", "/users", "users/:", "a/:id/b/:id"] {
            let err = RoutePattern::parse(raw).unwrap_err();
            assert!(
                matches!(err, RouterError::InvalidPattern { .. }),
                "pattern {:?} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_param_name_takes_remaining_characters() {
        let pattern = RoutePattern::parse("files/:name.ext/:post-id/:1d").unwrap();
        assert_eq!(
            pattern.param_names().collect::<Vec<_>>(),
            vec!["name.ext", "post-id", "1d"]
        );

        let params = pattern.match_segments(&["files", "a.txt", "7", "x"]).unwrap();
        assert_eq!(params.get("post-id").map(String::as_str), Some("7"));
        assert_eq!(params.get("name.ext").map(String::as_str), Some("a.txt"));
    }

    #[test]
    fn test_parse_ignores_trailing_separator() {
        let pattern = RoutePattern::parse("users/:id/").unwrap();
        assert_eq!(pattern.len(), 2);
        assert_eq!(pattern.as_str(), "users/:id/");
    }

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("users/42"), vec!["users", "42"]);
        assert_eq!(split_path("users/42//"), vec!["users", "42"]);
        assert_eq!(split_path("users//42"), vec!["users", "", "42"]);
        assert!(split_path("").is_empty());
    }

    #[test]
    fn test_match_segments() {
        let pattern = RoutePattern::parse("users/:id").unwrap();

        let params = pattern.match_segments(&["users", "42"]).unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("id").map(String::as_str), Some("42"));

        assert!(pattern.match_segments(&["user", "42"]).is_none());
        assert!(pattern.match_segments(&["users", "42", "extra"]).is_none());
        assert!(pattern.match_segments(&["users"]).is_none());
    }

    #[test]
    fn test_literal_match_is_case_sensitive() {
        let pattern = RoutePattern::parse("Users/:id").unwrap();
        assert!(pattern.match_segments(&["users", "1"]).is_none());
        assert!(pattern.match_segments(&["Users", "1"]).is_some());
    }

    #[test]
    fn test_param_binds_empty_interior_segment() {
        let pattern = RoutePattern::parse("a/:x/b").unwrap();
        let params = pattern.match_segments(&split_path("a//b")).unwrap();
        assert_eq!(params.get("x").map(String::as_str), Some(""));
    }
}
