// File: src/identity.rs
// Purpose: Stable screen identity for dynamic routes

use crate::params::{ParamValue, ParamsMap};
use crate::route::pattern::{generate_dynamic, remove_supported_extensions};
use crate::route::{RouteNode, SegmentDescriptor};
use crate::tree::platform::split_platform_suffix;

/// Derives an identity string from a route's dynamic segments
///
/// Each segment resolves on its own: a catch-all takes its values joined
/// with `/`, a single segment takes its value, and anything missing or empty
/// stays as the bracketed placeholder. Params with no matching segment are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteIdentity {
    dynamic: Vec<SegmentDescriptor>,
}

impl RouteIdentity {
    /// Builds an identity over `dynamic`, keeping the first descriptor per name
    pub fn new(dynamic: Vec<SegmentDescriptor>) -> Self {
        let dynamic = dynamic.into_iter().fold(Vec::new(), |mut unique: Vec<SegmentDescriptor>, descriptor| {
            if !unique.iter().any(|d| d.name == descriptor.name) {
                unique.push(descriptor);
            }
            unique
        });
        Self { dynamic }
    }

    pub fn segments(&self) -> &[SegmentDescriptor] {
        &self.dynamic
    }

    /// Resolves the identity for one set of params
    ///
    /// ```
    /// use rhtmx_route_tree::{params_from, ParamValue, RouteIdentity, SegmentDescriptor};
    ///
    /// let identity = RouteIdentity::new(vec![
    ///     SegmentDescriptor::single("user"),
    ///     SegmentDescriptor::deep("rest"),
    /// ]);
    /// let params = params_from([("user", ParamValue::from("bacon"))]);
    /// assert_eq!(identity.id_for(Some(&params)), "bacon/[...rest]");
    /// assert_eq!(identity.id_for(None), "[user]/[...rest]");
    /// ```
    pub fn id_for(&self, params: Option<&ParamsMap>) -> String {
        self.dynamic
            .iter()
            .map(|descriptor| {
                params
                    .and_then(|params| params.get(&descriptor.name))
                    .and_then(resolve_value)
                    .unwrap_or_else(|| descriptor.placeholder())
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn resolve_value(value: &ParamValue) -> Option<String> {
    match value {
        ParamValue::Single(value) if !value.is_empty() => Some(value.clone()),
        ParamValue::Multiple(values) if !values.is_empty() => Some(values.join("/")),
        _ => None,
    }
}

/// Identity function for a route, `None` when the route is static
///
/// ```
/// use rhtmx_route_tree::{create_get_id_for_route, RouteNode};
///
/// assert!(create_get_id_for_route(&RouteNode::route("about", "./about.tsx")).is_none());
/// let identity = create_get_id_for_route(&RouteNode::route("[id]", "./[id].tsx")).unwrap();
/// assert_eq!(identity.id_for(None), "[id]");
/// ```
pub fn create_get_id_for_route(route: &RouteNode) -> Option<RouteIdentity> {
    route.dynamic.clone().map(RouteIdentity::new)
}

/// Identity for a route name or context key, derived on the fly
///
/// Context keys lose their `./` prefix, extension and platform suffix first.
/// Static names are already unique and are returned unchanged.
///
/// ```
/// use rhtmx_route_tree::{get_unique_id, params_from, ParamValue};
///
/// let params = params_from([("bacon", ParamValue::from(vec!["foo", "bar"]))]);
/// assert_eq!(get_unique_id("[...bacon]", Some(&params)), "foo/bar");
/// assert_eq!(get_unique_id("./[...bacon].tsx", Some(&params)), "foo/bar");
/// assert_eq!(get_unique_id("about", Some(&params)), "about");
/// ```
pub fn get_unique_id(name: &str, params: Option<&ParamsMap>) -> String {
    let route = name.strip_prefix("./").unwrap_or(name);
    let (route, _) = split_platform_suffix(remove_supported_extensions(route));

    match generate_dynamic(route) {
        Some(dynamic) => RouteIdentity::new(dynamic).id_for(params),
        None => name.to_string(),
    }
}
