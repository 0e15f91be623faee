//! 请求 ID 生成
//!
//! 每个导航请求都带有一个全局唯一的 UUID v4 标识，便于日志关联。

/// 生成 UUID v4 格式的 ID
///
/// # Example
///
/// ```
/// use chips_route::utils::id::generate_uuid;
///
/// let id = generate_uuid();
/// assert_eq!(id.len(), 36);
/// ```
pub fn generate_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 检查字符串是否为合法的 UUID
pub fn is_valid_uuid(id: &str) -> bool {
    uuid::Uuid::parse_str(id).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_uuid() {
        let uuid = generate_uuid();
        assert_eq!(uuid.len(), 36);
        assert!(is_valid_uuid(&uuid));
    }

    #[test]
    fn test_generate_uuid_uniqueness() {
        let ids: HashSet<String> = (0..500).map(|_| generate_uuid()).collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_is_valid_uuid() {
        assert!(!is_valid_uuid("users/42"));
        assert!(!is_valid_uuid(""));
    }
}
