/// Relative id resolution
use crate::error::{Result, RouteError};
use crate::route::pattern::remove_supported_extensions;

/// Resolves `reference` against `current_id`
///
/// - `None` → `None`
/// - absolute (`/a/b`) → normalized on its own
/// - relative (`./a`, `../a`) → applied to the segments of `current_id`
///
/// `.` is a no-op and `..` pops one segment; popping past the root fails.
/// A trailing `.js`, `.jsx`, `.ts` or `.tsx` is removed from the result.
///
/// # Examples
///
/// ```
/// use rhtmx_route_tree::resolve_parent_id;
///
/// assert_eq!(resolve_parent_id("/foo/bar", Some("../../bat.tsx")).unwrap().as_deref(), Some("/bat"));
/// assert_eq!(resolve_parent_id("/foo", Some("/a/./b/../c.js")).unwrap().as_deref(), Some("/a/c"));
/// assert_eq!(resolve_parent_id("/foo", None).unwrap(), None);
/// assert!(resolve_parent_id("/", Some("../..")).is_err());
/// ```
pub fn resolve_parent_id(current_id: &str, reference: Option<&str>) -> Result<Option<String>> {
    let Some(reference) = reference else {
        return Ok(None);
    };

    let mut stack: Vec<&str> = if reference.starts_with('/') {
        Vec::new()
    } else {
        current_id.split('/').filter(|s| !s.is_empty()).collect()
    };

    for part in reference.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if stack.pop().is_none() {
                    return Err(RouteError::CannotResolve {
                        current: current_id.to_string(),
                        reference: reference.to_string(),
                    });
                }
            }
            segment => stack.push(segment),
        }
    }

    let resolved = format!("/{}", stack.join("/"));
    Ok(Some(remove_supported_extensions(&resolved).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_child() {
        assert_eq!(
            resolve_parent_id("/foo", Some("./bar.tsx")).unwrap().as_deref(),
            Some("/foo/bar")
        );
    }

    #[test]
    fn test_absolute_ignores_current() {
        assert_eq!(
            resolve_parent_id("/deep/nested/id", Some("/top")).unwrap().as_deref(),
            Some("/top")
        );
    }

    #[test]
    fn test_ascend_to_root() {
        assert_eq!(
            resolve_parent_id("/foo", Some("..")).unwrap().as_deref(),
            Some("/")
        );
    }

    #[test]
    fn test_ascend_past_root() {
        let err = resolve_parent_id("/", Some("../..")).unwrap_err();
        assert!(err.to_string().starts_with("Cannot resolve"));
    }
}
