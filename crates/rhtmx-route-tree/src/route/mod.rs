/// Route module for file-based routing
///
/// Contains the route node model plus pure functional components for
/// segment parsing, sibling ordering and matcher compilation.
pub mod matcher;
pub mod pattern;
pub mod sort;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use matcher::{compile_route, get_matchable_manifest, GroupInfo, MatchableManifest, MatcherEntry, PathMatch};
pub use pattern::{classify_segment, generate_dynamic, parse_dynamic_segment, SegmentKind};
pub use sort::{compare_route_paths, sort_route_nodes, sort_routes, stable_sort_by, RouteOrdering};

/// One dynamic segment of a route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentDescriptor {
    pub name: String,
    /// Catch-all: matches one or more remaining components
    pub deep: bool,
    /// Permits zero components; only meaningful when `deep`
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    /// Set on the descriptor generated for `+not-found`
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub not_found: bool,
}

impl SegmentDescriptor {
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            deep: false,
            optional: false,
            not_found: false,
        }
    }

    pub fn deep(name: impl Into<String>) -> Self {
        Self {
            deep: true,
            ..Self::single(name)
        }
    }

    pub fn not_found() -> Self {
        Self {
            not_found: true,
            ..Self::deep(pattern::NOT_FOUND_ROUTE)
        }
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional && self.deep;
        self
    }

    /// Placeholder text used when no value is known, e.g. `[id]` or `[...rest]`
    pub fn placeholder(&self) -> String {
        if self.deep {
            format!("[...{}]", self.name)
        } else {
            format!("[{}]", self.name)
        }
    }
}

/// Kind of node in the route tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Route,
    Layout,
}

/// Opaque reference to a module loader, never invoked by this crate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoaderRef(pub String);

impl LoaderRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }
}

/// A node of the resolved route tree
///
/// `route` is relative to the nearest ancestor layout, so hoisted routes may
/// contain `/`. Children are owned; there is no parent back-pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteNode {
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub route: String,
    pub dynamic: Option<Vec<SegmentDescriptor>>,
    pub children: Vec<RouteNode>,
    pub context_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_route: Option<LoaderRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_points: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_route_name: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub generated: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub internal: bool,
}

impl RouteNode {
    /// Creates a route node, deriving `dynamic` from the name
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_route_tree::RouteNode;
    ///
    /// let node = RouteNode::route("[id]", "./[id].tsx");
    /// assert_eq!(node.dynamic.as_ref().map(|d| d.len()), Some(1));
    /// assert!(RouteNode::route("about", "./about.tsx").dynamic.is_none());
    /// ```
    pub fn route(route: impl Into<String>, context_key: impl Into<String>) -> Self {
        Self::new(NodeType::Route, route, context_key)
    }

    /// Creates a layout node, deriving `dynamic` from the name
    pub fn layout(route: impl Into<String>, context_key: impl Into<String>) -> Self {
        Self::new(NodeType::Layout, route, context_key)
    }

    fn new(node_type: NodeType, route: impl Into<String>, context_key: impl Into<String>) -> Self {
        let route = route.into();
        let dynamic = generate_dynamic(&route);
        Self {
            node_type,
            route,
            dynamic,
            children: Vec::new(),
            context_key: context_key.into(),
            load_route: None,
            entry_points: None,
            initial_route_name: None,
            generated: false,
            internal: false,
        }
    }

    pub fn with_children(mut self, children: Vec<RouteNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_loader(mut self, loader: LoaderRef) -> Self {
        self.load_route = Some(loader);
        self
    }

    pub fn with_generated(mut self, generated: bool) -> Self {
        self.generated = generated;
        self
    }

    pub fn is_layout(&self) -> bool {
        self.node_type == NodeType::Layout
    }

    /// Depth-first walk over this node and every descendant
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a RouteNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Finds the first direct child with the given route name
    pub fn child(&self, route: &str) -> Option<&RouteNode> {
        self.children.iter().find(|child| child.route == route)
    }
}
