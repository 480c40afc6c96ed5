/// Array group expansion: `(a,b)/page` is mounted once per listed group
use crate::error::{Result, RouteError};

/// Expands every array group in a route path
///
/// Multiple arrays multiply. Group names are trimmed; order follows the
/// declaration, outer arrays first.
///
/// ```
/// use rhtmx_route_tree::tree::groups::extrapolate_groups;
///
/// let routes = extrapolate_groups("(a,b)/(c,d)/e").unwrap();
/// assert_eq!(routes, vec!["(a)/(c)/e", "(a)/(d)/e", "(b)/(c)/e", "(b)/(d)/e"]);
/// assert_eq!(extrapolate_groups("(single)/page").unwrap(), vec!["(single)/page"]);
/// ```
pub fn extrapolate_groups(key: &str) -> Result<Vec<String>> {
    let mut routes = Vec::new();
    expand(key, &mut routes)?;
    Ok(routes)
}

fn expand(key: &str, routes: &mut Vec<String>) -> Result<()> {
    let Some((index, groups)) = find_array_group(key) else {
        if !routes.iter().any(|route| route == key) {
            routes.push(key.to_string());
        }
        return Ok(());
    };

    let duplicated = groups
        .iter()
        .enumerate()
        .any(|(i, group)| groups[..i].contains(group));
    if duplicated {
        return Err(RouteError::DuplicateArrayGroup {
            key: key.to_string(),
            groups: groups.join(","),
        });
    }

    let segments: Vec<&str> = key.split('/').collect();
    for group in groups {
        let expanded: Vec<String> = segments
            .iter()
            .enumerate()
            .map(|(i, segment)| {
                if i == index {
                    format!("({})", group)
                } else {
                    segment.to_string()
                }
            })
            .collect();
        expand(&expanded.join("/"), routes)?;
    }
    Ok(())
}

/// Finds the first `(x,y)` segment and returns its index plus trimmed names.
/// Commas nested inside inner parentheses do not split.
fn find_array_group(key: &str) -> Option<(usize, Vec<&str>)> {
    key.split('/').enumerate().find_map(|(index, segment)| {
        let inner = segment.strip_prefix('(')?.strip_suffix(')')?;
        let groups = split_top_level(inner);
        (groups.len() > 1).then_some((index, groups))
    })
}

fn split_top_level(inner: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in inner.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(inner[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(inner[start..].trim());
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_array_group() {
        assert_eq!(extrapolate_groups("a/b").unwrap(), vec!["a/b"]);
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(
            extrapolate_groups("( a , b )/page").unwrap(),
            vec!["(a)/page", "(b)/page"]
        );
    }

    #[test]
    fn test_nested_brackets() {
        assert_eq!(
            extrapolate_groups("(a,b)/((c),d,(e))/x").unwrap(),
            vec![
                "(a)/((c))/x",
                "(a)/(d)/x",
                "(a)/((e))/x",
                "(b)/((c))/x",
                "(b)/(d)/x",
                "(b)/((e))/x",
            ]
        );
    }

    #[test]
    fn test_duplicate_group_is_error() {
        let err = extrapolate_groups("(a,a)/page").unwrap_err();
        assert!(matches!(err, RouteError::DuplicateArrayGroup { .. }));
    }
}
