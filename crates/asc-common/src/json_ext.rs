//! Extension trait for walking JSON:API documents.

use serde_json::Value;

pub trait ValueExt {
    /// Follow a path of object keys, e.g. `["links", "next"]`.
    fn at_path(&self, path: &[&str]) -> Option<&Value>;

    /// String at a key path, ignoring empty strings.
    fn non_empty_str_at(&self, path: &[&str]) -> Option<&str>;
}

impl ValueExt for Value {
    fn at_path(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(self, |current, key| current.get(*key))
    }

    fn non_empty_str_at(&self, path: &[&str]) -> Option<&str> {
        self.at_path(path)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_at_path_walks_objects() {
        let value = json!({ "meta": { "paging": { "total": 42 } } });
        assert_eq!(
            value.at_path(&["meta", "paging", "total"]),
            Some(&json!(42))
        );
        assert!(value.at_path(&["meta", "missing"]).is_none());
    }

    #[test]
    fn test_non_empty_str_at_skips_blank() {
        let value = json!({ "links": { "self": "https://x", "next": "  " } });
        assert_eq!(value.non_empty_str_at(&["links", "self"]), Some("https://x"));
        assert_eq!(value.non_empty_str_at(&["links", "next"]), None);
    }
}
