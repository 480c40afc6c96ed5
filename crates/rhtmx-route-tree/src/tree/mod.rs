/// Route tree builder
///
/// Resolves a flat [`Manifest`] into a nested [`RouteNode`] tree in three
/// passes:
///
/// 1. **Directory tree**: every key is split into directories, given a
///    platform specificity slot and expanded for array groups.
/// 2. **Flattening**: routes hoist to the nearest `_layout` and are named
///    relative to it.
/// 3. **Finishing**: entry points and initial routes, the duplicate
///    parameter check, then a recursive sibling sort.
pub mod groups;
pub mod manifest;
pub mod platform;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::config::RoutingConfig;
use crate::error::{Result, RouteError};
use crate::route::matcher::join_route;
use crate::route::pattern::{
    generate_dynamic, match_group_name, remove_supported_extensions, NOT_FOUND_ROUTE,
};
use crate::route::{sort_route_nodes, LoaderRef, NodeType, RouteNode};
use groups::extrapolate_groups;
use manifest::{Manifest, ManifestEntry};
use platform::split_platform_suffix;

/// Context key of the layout generated when the manifest has no root `_layout`
pub const NAVIGATOR_CONTEXT_KEY: &str = "rhtmx-route-tree/views/navigator";
/// Context key of the generated sitemap route
pub const SITEMAP_CONTEXT_KEY: &str = "rhtmx-route-tree/views/sitemap";
/// Context key of the generated not-found route
pub const UNMATCHED_CONTEXT_KEY: &str = "rhtmx-route-tree/views/unmatched";
pub const SITEMAP_ROUTE: &str = "_sitemap";

static TOP_LEVEL_IGNORE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\./\+(html|native-intent)\.[tj]sx?$").unwrap()
});

static API_ROUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\+api(\.\w+)?\.[tj]sx?$").unwrap()
});

#[derive(Debug)]
struct FileMeta {
    route: String,
    specificity: usize,
    is_layout: bool,
}

/// Candidates for one route, indexed by platform specificity
type Slots = Vec<Option<RouteNode>>;

#[derive(Default)]
struct Directory {
    files: Vec<(String, Slots)>,
    subdirectories: Vec<(String, Directory)>,
    layout: Option<Slots>,
}

impl Directory {
    fn descend(&mut self, parts: &[&str]) -> &mut Directory {
        parts.iter().fold(self, |directory, part| directory.subdirectory(part))
    }

    fn subdirectory(&mut self, name: &str) -> &mut Directory {
        let index = match self.subdirectories.iter().position(|(n, _)| n == name) {
            Some(index) => index,
            None => {
                self.subdirectories
                    .push((name.to_string(), Directory::default()));
                self.subdirectories.len() - 1
            }
        };
        &mut self.subdirectories[index].1
    }

    fn file_slots(&mut self, route: &str) -> &mut Slots {
        let index = match self.files.iter().position(|(r, _)| r == route) {
            Some(index) => index,
            None => {
                self.files.push((route.to_string(), Vec::new()));
                self.files.len() - 1
            }
        };
        &mut self.files[index].1
    }

    fn add_generated(&mut self, route: &str, context_key: &str) {
        if self.files.iter().any(|(r, _)| r == route) {
            return;
        }
        debug!(route, "injecting generated route");
        self.files
            .push((route.to_string(), vec![Some(system_route(route, context_key))]));
    }
}

/// Resolves a manifest into a route tree
///
/// Returns `Ok(None)` when the manifest is empty or every key is ignored.
///
/// # Examples
///
/// ```
/// use rhtmx_route_tree::{get_routes, Manifest, RoutingConfig};
///
/// let manifest: Manifest = ["_layout.tsx", "index.tsx", "[id].tsx"].into_iter().collect();
/// let config = RoutingConfig::default().with_skip_generated(true);
/// let root = get_routes(&manifest, &config).unwrap().unwrap();
///
/// let routes: Vec<&str> = root.children.iter().map(|c| c.route.as_str()).collect();
/// assert_eq!(routes, vec!["index", "[id]"]);
/// assert_eq!(
///     root.children[1].entry_points.as_deref(),
///     Some(&["./_layout.tsx".to_string(), "./[id].tsx".to_string()][..])
/// );
/// ```
pub fn get_routes(manifest: &Manifest, config: &RoutingConfig) -> Result<Option<RouteNode>> {
    let Some(directory) = build_directory_tree(manifest, config)? else {
        debug!(keys = manifest.len(), "manifest holds no routes");
        return Ok(None);
    };

    let mut root = flatten_root(directory, config)?;

    if !config.ignore_entry_points {
        assign_entry_points(&mut root, manifest, Vec::new())?;
    }

    check_duplicate_params(&root, "")?;
    sort_route_nodes(std::slice::from_mut(&mut root));

    let mut routes = 0;
    let mut layouts = 0;
    root.walk(&mut |node| match node.node_type {
        NodeType::Route => routes += 1,
        NodeType::Layout => layouts += 1,
    });
    debug!(routes, layouts, platform = config.platform.as_str(), "resolved route tree");

    Ok(Some(root))
}

fn ignore_list(config: &RoutingConfig) -> Result<Vec<Regex>> {
    let mut ignore = vec![TOP_LEVEL_IGNORE.clone(), API_ROUTE.clone()];
    for pattern in &config.ignore {
        let regex = Regex::new(pattern).map_err(|source| RouteError::InvalidIgnorePattern {
            pattern: pattern.clone(),
            source,
        })?;
        ignore.push(regex);
    }
    Ok(ignore)
}

fn build_directory_tree(manifest: &Manifest, config: &RoutingConfig) -> Result<Option<Directory>> {
    let ignore = ignore_list(config)?;
    let mut root = Directory::default();
    let mut has_routes = false;
    let mut is_valid = false;

    for (key, entry) in manifest.iter() {
        if ignore.iter().any(|regex| regex.is_match(key)) {
            trace!(key, "ignored manifest key");
            continue;
        }
        is_valid = true;

        let Some(meta) = file_meta(key, config)? else {
            continue;
        };

        for route in extrapolate_groups(&meta.route)? {
            let parts: Vec<&str> = route.split('/').collect();
            let directory = root.descend(&parts[..parts.len() - 1]);
            let node = candidate(&route, key, entry, meta.is_layout);

            if meta.is_layout {
                let slots = directory.layout.get_or_insert_with(Vec::new);
                place(slots, meta.specificity, node).map_err(|first| {
                    RouteError::LayoutConflict {
                        route: route.clone(),
                        first,
                        second: key.to_string(),
                    }
                })?;
            } else {
                place(directory.file_slots(&route), meta.specificity, node).map_err(|first| {
                    RouteError::Conflict {
                        route: route.clone(),
                        first,
                        second: key.to_string(),
                    }
                })?;
                has_routes = true;
            }
        }
    }

    if !is_valid {
        return Ok(None);
    }

    // Generated even when generated routes are skipped
    if root.layout.is_none() {
        root.layout = Some(vec![Some(
            RouteNode::layout("", NAVIGATOR_CONTEXT_KEY)
                .with_loader(LoaderRef::new(NAVIGATOR_CONTEXT_KEY))
                .with_generated(true),
        )]);
    }

    if !config.skip_generated {
        if has_routes && config.sitemap {
            root.add_generated(SITEMAP_ROUTE, SITEMAP_CONTEXT_KEY);
        }
        if config.not_found {
            root.add_generated(NOT_FOUND_ROUTE, UNMATCHED_CONTEXT_KEY);
        }
    }

    Ok(Some(root))
}

/// Classifies a manifest key; `Ok(None)` skips it
fn file_meta(key: &str, config: &RoutingConfig) -> Result<Option<FileMeta>> {
    let relative = key.strip_prefix("./").unwrap_or(key);
    let (directory, filename) = match relative.rsplit_once('/') {
        Some((directory, filename)) => (Some(directory), filename),
        None => (None, relative),
    };
    let (name, suffix) = split_platform_suffix(remove_supported_extensions(filename));

    if name.starts_with('(') && name.ends_with(')') {
        return Err(RouteError::GroupTerminal {
            key: key.to_string(),
        });
    }

    if filename.starts_with('+') && name != NOT_FOUND_ROUTE {
        let renamed = &filename[1..];
        return Err(RouteError::ReservedPrefix {
            key: key.to_string(),
            suggestion: match directory {
                Some(directory) => format!("{}/{}", directory, renamed),
                None => renamed.to_string(),
            },
        });
    }

    let specificity = match suffix {
        Some(_) if !config.platform_routes => None,
        _ => config.platform.specificity(suffix),
    };
    let Some(specificity) = specificity else {
        debug!(key, platform = config.platform.as_str(), "skipping platform-specific file");
        return Ok(None);
    };

    let route = remove_supported_extensions(relative);
    let route = match suffix {
        Some(suffix) => route
            .strip_suffix(suffix)
            .and_then(|r| r.strip_suffix('.'))
            .unwrap_or(route),
        None => route,
    };

    Ok(Some(FileMeta {
        route: route.to_string(),
        specificity,
        is_layout: name == "_layout",
    }))
}

fn candidate(route: &str, key: &str, entry: &ManifestEntry, is_layout: bool) -> RouteNode {
    let node = if is_layout {
        RouteNode::layout(route, key)
    } else {
        RouteNode::route(route, key)
    };
    node.with_loader(entry.loader.clone())
}

fn system_route(route: &str, context_key: &str) -> RouteNode {
    let mut node = RouteNode::route(route, context_key)
        .with_loader(LoaderRef::new(context_key))
        .with_generated(true);
    node.internal = true;
    node
}

/// Stores `node` in its slot, or returns the context key already there
fn place(slots: &mut Slots, specificity: usize, node: RouteNode) -> std::result::Result<(), String> {
    if slots.len() <= specificity {
        slots.resize_with(specificity + 1, || None);
    }
    match &slots[specificity] {
        Some(existing) => Err(existing.context_key.clone()),
        None => {
            slots[specificity] = Some(node);
            Ok(())
        }
    }
}

/// Picks the highest filled slot; slot 0 must hold the un-suffixed fallback
fn most_specific(mut slots: Slots) -> Result<RouteNode> {
    let has_fallback = matches!(slots.first(), Some(Some(_)));
    let node = slots.pop().flatten().ok_or_else(|| RouteError::MissingFallback {
        context_key: String::new(),
    })?;

    if !has_fallback {
        return Err(RouteError::MissingFallback {
            context_key: node.context_key,
        });
    }
    Ok(node)
}

fn flatten_root(mut root: Directory, config: &RoutingConfig) -> Result<RouteNode> {
    let slots = root.layout.take().unwrap_or_default();
    let (mut layout, prefix) = prepare_layout(most_specific(slots)?, "", config);
    fill_layout(root, &mut layout, &prefix, config)?;
    Ok(layout)
}

/// Renames a layout relative to its parent; returns it with the prefix its
/// own descendants drop
fn prepare_layout(mut node: RouteNode, path_to_remove: &str, config: &RoutingConfig) -> (RouteNode, String) {
    let absolute = match node.route.strip_suffix("_layout") {
        Some(directory) => directory.trim_end_matches('/').to_string(),
        None => node.route.clone(),
    };
    let prefix = if absolute.is_empty() {
        String::new()
    } else {
        format!("{}/", absolute)
    };

    node.route = absolute.strip_prefix(path_to_remove).unwrap_or(&absolute).to_string();
    node.dynamic = generate_dynamic(&node.context_key);
    if config.strip_load_route {
        node.load_route = None;
    }
    (node, prefix)
}

/// Moves the directory's routes into `layout`, recursing into subdirectories.
/// A subdirectory with its own `_layout` becomes a nested layout node.
fn fill_layout(
    directory: Directory,
    layout: &mut RouteNode,
    path_to_remove: &str,
    config: &RoutingConfig,
) -> Result<()> {
    for (_, slots) in directory.files {
        let mut node = most_specific(slots)?;
        node.route = node
            .route
            .strip_prefix(path_to_remove)
            .unwrap_or(&node.route)
            .to_string();
        node.dynamic = generate_dynamic(&node.route);
        if config.strip_load_route {
            node.load_route = None;
        }
        layout.children.push(node);
    }

    for (_, mut subdirectory) in directory.subdirectories {
        match subdirectory.layout.take() {
            Some(slots) => {
                let (mut child, prefix) = prepare_layout(most_specific(slots)?, path_to_remove, config);
                fill_layout(subdirectory, &mut child, &prefix, config)?;
                layout.children.push(child);
            }
            None => fill_layout(subdirectory, layout, path_to_remove, config)?,
        }
    }

    Ok(())
}

fn assign_entry_points(node: &mut RouteNode, manifest: &Manifest, mut entry_points: Vec<String>) -> Result<()> {
    entry_points.push(node.context_key.clone());

    match node.node_type {
        NodeType::Route => {
            node.entry_points = Some(dedupe(entry_points));
        }
        NodeType::Layout => {
            if let Some(initial) = initial_route_name(node, manifest) {
                let Some(initial_route) = node.child(&initial) else {
                    return Err(invalid_initial_route(node, initial));
                };
                // Navigators may push the initial route into history
                entry_points.push(initial_route.context_key.clone());
                node.initial_route_name = Some(initial);
            }

            for child in &mut node.children {
                assign_entry_points(child, manifest, entry_points.clone())?;
            }
        }
    }
    Ok(())
}

/// Group-matching child, overridden by the layout's settings
fn initial_route_name(layout: &RouteNode, manifest: &Manifest) -> Option<String> {
    let group = match_group_name(&layout.route);

    let mut initial = group
        .and_then(|group| {
            layout
                .children
                .iter()
                .find(|child| child.route.strip_suffix("/index").unwrap_or(&child.route) == group)
        })
        .map(|child| child.route.clone());

    if let Some(settings) = manifest.settings(&layout.context_key) {
        if let Some(name) = &settings.initial_route_name {
            initial = Some(name.clone());
        }
        if let Some(name) = group.and_then(|group| settings.groups.get(group)) {
            initial = Some(name.clone());
        }
    }

    initial
}

fn invalid_initial_route(layout: &RouteNode, initial: String) -> RouteError {
    let valid = layout
        .children
        .iter()
        .filter(|child| !child.generated)
        .map(|child| format!("'{}'", child.route))
        .collect::<Vec<_>>()
        .join(", ");

    RouteError::InvalidInitialRoute {
        layout: layout.context_key.clone(),
        initial,
        group: match_group_name(&layout.route).map(str::to_string),
        valid,
    }
}

fn dedupe(items: Vec<String>) -> Vec<String> {
    items.into_iter().fold(Vec::new(), |mut unique, item| {
        if !unique.contains(&item) {
            unique.push(item);
        }
        unique
    })
}

/// One route path may not bind the same parameter twice
fn check_duplicate_params(node: &RouteNode, prefix: &str) -> Result<()> {
    let full = join_route(prefix, &node.route);

    match node.node_type {
        NodeType::Route => {
            let dynamic = generate_dynamic(&full).unwrap_or_default();
            for (i, descriptor) in dynamic.iter().enumerate() {
                if dynamic[..i].iter().any(|d| d.name == descriptor.name) {
                    return Err(RouteError::DuplicateParam {
                        route: full,
                        name: descriptor.name.clone(),
                    });
                }
            }
            Ok(())
        }
        NodeType::Layout => node
            .children
            .iter()
            .try_for_each(|child| check_duplicate_params(child, &full)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(key: &str, config: &RoutingConfig) -> Option<FileMeta> {
        file_meta(key, config).unwrap()
    }

    #[test]
    fn test_file_meta_strips_extension_and_platform() {
        let config = RoutingConfig::default().with_platform(platform::Platform::Ios);
        let m = meta("./a/page.ios.tsx", &config).unwrap();
        assert_eq!(m.route, "a/page");
        assert_eq!(m.specificity, 2);
        assert!(!m.is_layout);

        let m = meta("./a/_layout.native.js", &config).unwrap();
        assert_eq!(m.route, "a/_layout");
        assert_eq!(m.specificity, 1);
        assert!(m.is_layout);
    }

    #[test]
    fn test_file_meta_skips_platform_files_without_platform() {
        let config = RoutingConfig::default();
        assert!(meta("./page.ios.tsx", &config).is_none());
        assert!(meta("./page.tsx", &config).is_some());
    }

    #[test]
    fn test_file_meta_skips_when_platform_routes_disabled() {
        let config = RoutingConfig::default()
            .with_platform(platform::Platform::Web)
            .with_platform_routes(false);
        assert!(meta("./page.web.tsx", &config).is_none());
    }

    #[test]
    fn test_file_meta_reserved_prefix() {
        let err = file_meta("./folder/+html.js", &RoutingConfig::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid route ./folder/+html.js. Route nodes cannot start with the '+' character. \"Please rename to folder/html.js\""
        );
    }

    #[test]
    fn test_most_specific_requires_fallback() {
        let slots = vec![None, Some(RouteNode::route("a", "./a.ios.tsx"))];
        let err = most_specific(slots).unwrap_err();
        assert!(matches!(err, RouteError::MissingFallback { context_key } if context_key == "./a.ios.tsx"));
    }

    #[test]
    fn test_dedupe_keeps_first() {
        let items = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        assert_eq!(dedupe(items), vec!["a".to_string(), "b".to_string()]);
    }
}
