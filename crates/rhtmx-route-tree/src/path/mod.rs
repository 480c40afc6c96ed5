/// Path utilities for locations and relative ids
///
/// All functions are **pure**: given same input, always produce same output with no side effects.

use std::borrow::Cow;

pub mod location;
pub mod resolve;

pub use location::{decode_component, get_normalized_state_path, NormalizedPath, UrlLocation};
pub use resolve::resolve_parent_id;

/// Strips a base path from the front of a pathname
///
/// Comparison is by whole segments, so `/app` is not a prefix of `/apple`.
/// Returns `Cow::Borrowed` when nothing is stripped.
///
/// # Examples
///
/// ```
/// use rhtmx_route_tree::path::strip_base_path;
/// use std::borrow::Cow;
///
/// assert_eq!(strip_base_path("/one/two/foo", Some("/one/two")), "/foo");
/// assert_eq!(strip_base_path("/one/two", Some("/one/two/")), "/");
/// assert!(matches!(strip_base_path("/apple", Some("/app")), Cow::Borrowed("/apple")));
/// assert!(matches!(strip_base_path("/foo", None), Cow::Borrowed("/foo")));
/// ```
pub fn strip_base_path<'a>(path: &'a str, base_path: Option<&str>) -> Cow<'a, str> {
    let base: Vec<&str> = base_path
        .unwrap_or_default()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    if base.is_empty() {
        return Cow::Borrowed(path);
    }

    let mut rest = path.trim_start_matches('/');
    for expected in base {
        let (head, tail) = rest.split_once('/').unwrap_or((rest, ""));
        if head != expected {
            return Cow::Borrowed(path);
        }
        rest = tail.trim_start_matches('/');
    }

    Cow::Owned(format!("/{}", rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_base_path_segments() {
        assert_eq!(strip_base_path("/one/two/foo/bar", Some("/one/two")), "/foo/bar");
        assert_eq!(strip_base_path("/one//two/foo", Some("one/two")), "/foo");
    }

    #[test]
    fn test_strip_base_path_not_a_prefix() {
        assert_eq!(strip_base_path("/one/three/foo", Some("/one/two")), "/one/three/foo");
        assert_eq!(strip_base_path("/one", Some("/one/two")), "/one");
    }

    #[test]
    fn test_strip_base_path_empty_base() {
        assert!(matches!(strip_base_path("/foo", Some("/")), Cow::Borrowed("/foo")));
        assert!(matches!(strip_base_path("/foo", Some("")), Cow::Borrowed("/foo")));
    }
}
