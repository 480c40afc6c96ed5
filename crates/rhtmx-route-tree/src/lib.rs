//! # RHTMX Route Tree
//!
//! Resolves a virtual manifest of file paths into a prioritized, matchable
//! route tree, plus the helpers that keep navigation state in step with URLs:
//! - Dynamic segments (`[id]`), catch-alls (`[...slug]`, `[...slug?]`)
//! - Groups (`(app)`) and array groups (`(a,b)`)
//! - Platform-specific files (`page.ios.tsx`, `page.native.tsx`)
//! - Nested layouts with hoisting, entry points and initial routes
//! - Generated `_sitemap` and `+not-found` routes
//!
//! ## Functional Approach
//!
//! Every operation is a pure function of its inputs:
//! - **No shared state**: resolution passes own their intermediate trees
//! - **Derived copies**: navigation helpers never mutate the state they read
//! - **Table-driven decisions** for platform precedence and sibling order
//! - **Zero-copy** base path stripping with `Cow<'_, str>`
//!
//! ## Example
//!
//! ```
//! use rhtmx_route_tree::{get_matchable_manifest, get_routes, Manifest, ParamValue, RoutingConfig};
//!
//! let manifest: Manifest = ["_layout.tsx", "index.tsx", "users/[id].tsx"].into_iter().collect();
//! let tree = get_routes(&manifest, &RoutingConfig::default()).unwrap().unwrap();
//!
//! let matchers = get_matchable_manifest(&tree).unwrap();
//! let hit = matchers.match_path("/users/42").unwrap();
//! assert_eq!(hit.entry.context_key, "./users/[id].tsx");
//! assert_eq!(hit.params["id"], ParamValue::from("42"));
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
pub mod error;
pub mod identity;
pub mod navigation;
pub mod params;
pub mod path;
pub mod route;
pub mod tree;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{NavigationConfig, RouterConfig, RoutingConfig};
pub use error::{Result, RouteError};
pub use identity::{create_get_id_for_route, get_unique_id, RouteIdentity};
pub use navigation::{
    convert_stack_state_to_non_modal_state, filter_singular, is_modal_presentation, StackRoute,
    StackState,
};
pub use params::{params_from, ParamValue, ParamsMap};
pub use path::{
    get_normalized_state_path, resolve_parent_id, strip_base_path, NormalizedPath, UrlLocation,
};
pub use route::{
    compare_route_paths, compile_route, get_matchable_manifest, parse_dynamic_segment,
    sort_route_nodes, sort_routes, LoaderRef, MatchableManifest, MatcherEntry, NodeType,
    RouteNode, RouteOrdering, SegmentDescriptor,
};
pub use tree::get_routes;
pub use tree::manifest::{LayoutSettings, Manifest, ManifestEntry};
pub use tree::platform::Platform;

// ============================================================================
// Convenience
// ============================================================================

/// Resolves a manifest with the routing section of a [`RouterConfig`]
pub fn resolve(manifest: &Manifest, config: &RouterConfig) -> Result<Option<RouteNode>> {
    get_routes(manifest, &config.routing)
}

/// Normalizes a location with the navigation section of a [`RouterConfig`]
pub fn normalize_location(location: &UrlLocation, config: &RouterConfig) -> NormalizedPath {
    get_normalized_state_path(location, config.navigation.base_path.as_deref())
}
