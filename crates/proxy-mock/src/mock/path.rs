//! Request path normalization.
//!
//! Every path that enters the registry, dispatch or introspection goes through
//! [`normalize_path`] first, so `/a/b/`, `a/b` and `//a//b` all address the
//! same entry.

/// Normalize a request path: leading slash, no trailing slash, no empty
/// segments. The root normalizes to `/`.
pub fn normalize_path(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len() + 1);
    for segment in segments(path) {
        normalized.push('/');
        normalized.push_str(segment);
    }
    if normalized.is_empty() {
        normalized.push('/');
    }
    normalized
}

/// Iterate over the non-empty segments of a path.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/api/users"), "/api/users");
        assert_eq!(normalize_path("api/users"), "/api/users");
        assert_eq!(normalize_path("/api/users/"), "/api/users");
        assert_eq!(normalize_path("//api///users"), "/api/users");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
    }

    #[test]
    fn test_segments() {
        let parts: Vec<&str> = segments("/a//b/c/").collect();
        assert_eq!(parts, vec!["a", "b", "c"]);
        assert_eq!(segments("/").count(), 0);
    }
}
