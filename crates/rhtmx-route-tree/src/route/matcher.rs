/// Regex matcher compilation for route paths
///
/// Turns a slash-joined route chain such as `c/[d]/e/[...f]` into an anchored
/// pattern with named captures, and flattens a route tree into a matchable
/// manifest.
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use tracing::trace;

use super::pattern::{classify_segment, SegmentKind, NOT_FOUND_ROUTE};
use super::sort::{compare_route_paths, stable_sort_by};
use super::{NodeType, RouteNode, SegmentDescriptor};
use crate::error::{Result, RouteError};
use crate::params::{ParamValue, ParamsMap};
use crate::path::location::decode_component;

/// Capture group metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupInfo {
    /// 1-based index of the capture group within the whole pattern
    pub pos: usize,
    /// Catch-all capture, split on `/` when read back
    pub repeat: bool,
    pub optional: bool,
}

/// A compiled route matcher
#[derive(Debug, Clone)]
pub struct MatcherEntry {
    /// Full route path, e.g. `/c/[d]/e/[...f]`
    pub page: String,
    pub context_key: String,
    pub re: Regex,
    pub named_regex: String,
    /// Capture key → group metadata
    pub groups: HashMap<String, GroupInfo>,
    /// Capture key → declared parameter name
    pub route_keys: HashMap<String, String>,
}

impl MatcherEntry {
    /// Extracts decoded parameters when `path` matches this entry
    pub fn params_for(&self, path: &str) -> Option<ParamsMap> {
        let captures = self.re.captures(path)?;

        Some(
            self.groups
                .iter()
                .filter_map(|(key, info)| {
                    let raw = captures.name(key)?.as_str();
                    let name = self.route_keys.get(key).cloned().unwrap_or_else(|| key.clone());
                    let value = if info.repeat {
                        ParamValue::Multiple(raw.split('/').map(decode_component).collect())
                    } else {
                        ParamValue::Single(decode_component(raw))
                    };
                    Some((name, value))
                })
                .collect(),
        )
    }
}

/// Compiles a slash-joined route chain into a [`MatcherEntry`]
///
/// # Compilation Rules
///
/// - literal → escaped text
/// - `(group)` → `(?:/\(group\))?`
/// - `[name]` → `(?<name>[^/]+?)`
/// - `[...name]` → `(?<name>.+?)`, `[...name?]` → `(?:/(?<name>.+?))?`
/// - trailing `index` is dropped; an empty chain matches only `/`
///
/// # Examples
///
/// ```
/// use rhtmx_route_tree::compile_route;
///
/// let entry = compile_route("c/[d]/e/[...f]", "./c/[d]/e/[...f].js").unwrap();
/// assert_eq!(entry.named_regex, "^/c/(?<d>[^/]+?)/e/(?<f>.+?)(?:/)?$");
/// assert_eq!(entry.groups["f"].pos, 2);
/// assert!(entry.re.is_match("/c/1/e/2/3"));
///
/// assert_eq!(compile_route("index", "./index.js").unwrap().named_regex, "^/(?:/)?$");
/// ```
pub fn compile_route(path: &str, context_key: &str) -> Result<MatcherEntry> {
    let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.last() == Some(&"index") {
        segments.pop();
    }

    let mut pattern = String::new();
    let mut groups = HashMap::new();
    let mut route_keys: HashMap<String, String> = HashMap::new();

    for segment in &segments {
        let kind = if *segment == NOT_FOUND_ROUTE {
            SegmentKind::Dynamic(SegmentDescriptor::not_found())
        } else {
            classify_segment(segment)
        };

        match kind {
            SegmentKind::Group(_) => {
                pattern.push_str(&format!("(?:/{})?", regex::escape(segment)));
            }
            SegmentKind::Dynamic(descriptor) => {
                if route_keys.values().any(|name| *name == descriptor.name) {
                    return Err(RouteError::DuplicateParam {
                        route: path.to_string(),
                        name: descriptor.name,
                    });
                }

                let key = safe_route_key(&descriptor.name, &route_keys);
                let capture = if descriptor.deep {
                    format!("(?<{}>.+?)", key)
                } else {
                    format!("(?<{}>[^/]+?)", key)
                };

                if descriptor.deep && descriptor.optional {
                    pattern.push_str(&format!("(?:/{})?", capture));
                } else {
                    pattern.push('/');
                    pattern.push_str(&capture);
                }

                groups.insert(
                    key.clone(),
                    GroupInfo {
                        pos: groups.len() + 1,
                        repeat: descriptor.deep,
                        optional: descriptor.optional,
                    },
                );
                route_keys.insert(key, descriptor.name);
            }
            SegmentKind::Index | SegmentKind::Static(_) => {
                pattern.push('/');
                pattern.push_str(&regex::escape(segment));
            }
        }
    }

    if pattern.is_empty() {
        pattern.push('/');
    }

    let named_regex = format!("^{}(?:/)?$", pattern);
    let re = Regex::new(&named_regex).map_err(|source| RouteError::InvalidPattern {
        pattern: named_regex.clone(),
        source,
    })?;

    trace!(page = path, regex = %named_regex, "compiled route matcher");

    Ok(MatcherEntry {
        page: format!("/{}", path.trim_start_matches('/')),
        context_key: context_key.to_string(),
        re,
        named_regex,
        groups,
        route_keys,
    })
}

/// Capture names must be ASCII word characters not starting with a digit.
/// Anything else is replaced and `route_keys` maps the key back.
fn safe_route_key(name: &str, taken: &HashMap<String, String>) -> String {
    let mut key: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if key.starts_with(|c: char| c.is_ascii_digit()) {
        key.insert(0, '_');
    }

    let base = key.clone();
    let mut suffix = 1;
    while taken.contains_key(&key) {
        suffix += 1;
        key = format!("{}{}", base, suffix);
    }
    key
}

/// A manifest of compiled matchers for every route in a tree
///
/// Entries are listed from the broadest matcher to the most specific, the
/// reverse of [`compare_route_paths`] order. [`MatchableManifest::match_path`] walks
/// from the specific end so the most specific route wins.
#[derive(Debug, Clone, Default)]
pub struct MatchableManifest {
    entries: Vec<MatcherEntry>,
}

/// A successful manifest lookup
#[derive(Debug, Clone)]
pub struct PathMatch<'a> {
    pub entry: &'a MatcherEntry,
    pub params: ParamsMap,
}

impl MatchableManifest {
    pub fn entries(&self) -> &[MatcherEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves a path (query and fragment ignored) to the most specific entry
    pub fn match_path(&self, path: &str) -> Option<PathMatch<'_>> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = if path.is_empty() { "/" } else { path };

        self.entries.iter().rev().find_map(|entry| {
            entry
                .params_for(path)
                .map(|params| PathMatch { entry, params })
        })
    }
}

/// Flattens a route tree and compiles every `route` node
///
/// Layout names are joined into each route's full path and the paths are
/// ordered with [`compare_route_paths`], so a static segment beats a dynamic
/// one at the same position even when the routes live at different depths.
///
/// # Examples
///
/// ```
/// use rhtmx_route_tree::{get_matchable_manifest, RouteNode};
///
/// let tree = RouteNode::layout("", "./_layout.tsx").with_children(vec![
///     RouteNode::route("[a]", "./[a].tsx"),
///     RouteNode::route("about", "./about.tsx"),
/// ]);
/// let manifest = get_matchable_manifest(&tree).unwrap();
///
/// let hit = manifest.match_path("/about").unwrap();
/// assert_eq!(hit.entry.page, "/about");
/// let hit = manifest.match_path("/bacon").unwrap();
/// assert_eq!(hit.entry.page, "/[a]");
/// ```
pub fn get_matchable_manifest(tree: &RouteNode) -> Result<MatchableManifest> {
    let mut flat: Vec<(String, &str)> = Vec::new();
    collect_routes(tree, "", &mut flat);

    stable_sort_by(&mut flat, |a, b| compare_route_paths(&a.0, &b.0));
    flat.reverse();

    let entries = flat
        .iter()
        .map(|(path, context_key)| compile_route(path, context_key))
        .collect::<Result<Vec<_>>>()?;

    Ok(MatchableManifest { entries })
}

/// Collects `(full path, context key)` for every route node
fn collect_routes<'a>(node: &'a RouteNode, prefix: &str, out: &mut Vec<(String, &'a str)>) {
    let full = join_route(prefix, &node.route);
    match node.node_type {
        NodeType::Route => out.push((full, node.context_key.as_str())),
        NodeType::Layout => {
            for child in &node.children {
                collect_routes(child, &full, out);
            }
        }
    }
}

pub(crate) fn join_route(prefix: &str, route: &str) -> String {
    match (prefix.is_empty(), route.is_empty()) {
        (true, _) => route.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{}/{}", prefix, route),
    }
}
