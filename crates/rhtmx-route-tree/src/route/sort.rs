/// Sibling ordering for route nodes
///
/// Ranks routes so the most specific one is tried first:
///
/// 1. **Index** (`index`)
/// 2. **Static** (`about`), with `(group)` routes ranked alongside
/// 3. **Dynamic** (`[id]`)
/// 4. **Catch-all** (`[...slug]`), optional catch-alls and `+not-found` last
///
/// The relation is not a total order: `index` against a group yields the
/// distinguished [`RouteOrdering::AmbiguousTie`] while the reverse pair is an
/// ordinary tie. Sorting therefore goes through [`stable_sort_by`] instead of
/// `slice::sort_by`, which requires a total order.
///
/// Full paths from different tree depths are ranked by [`compare_route_paths`],
/// which walks both paths segment by segment.
use std::cmp::Ordering;

use super::pattern::{classify_segment, match_group_name, SegmentKind, NOT_FOUND_ROUTE};
use super::{RouteNode, SegmentDescriptor};

/// Result of comparing two sibling routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum RouteOrdering {
    /// `a` is tried before `b`
    Precedes = -1,
    Tie = 0,
    /// `b` is tried before `a`
    Follows = 1,
    /// An index route and a group wrapping share a slot
    AmbiguousTie = 2,
}

impl RouteOrdering {
    /// Numeric form: -1, 0, 1 or 2
    pub fn value(self) -> i8 {
        self as i8
    }

    /// Both tie variants compare as equal
    pub fn is_tie(self) -> bool {
        matches!(self, RouteOrdering::Tie | RouteOrdering::AmbiguousTie)
    }
}

impl From<RouteOrdering> for Ordering {
    fn from(order: RouteOrdering) -> Self {
        match order {
            RouteOrdering::Precedes => Ordering::Less,
            RouteOrdering::Follows => Ordering::Greater,
            RouteOrdering::Tie | RouteOrdering::AmbiguousTie => Ordering::Equal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StaticClass {
    Index = 0,
    Group = 1,
    Static = 2,
}

use RouteOrdering::{AmbiguousTie, Follows, Precedes, Tie};

/// Row = left operand, column = right operand
const STATIC_TABLE: [[RouteOrdering; 3]; 3] = [
    //  Index     Group         Static
    [Tie, AmbiguousTie, Precedes], // Index
    [Tie, Tie, Tie],               // Group
    [Follows, Tie, Tie],           // Static
];

fn static_class(node: &RouteNode) -> StaticClass {
    if node.route == "index" {
        StaticClass::Index
    } else if node
        .route
        .split('/')
        .next()
        .and_then(|first| match_group_name(first))
        .is_some()
    {
        StaticClass::Group
    } else {
        StaticClass::Static
    }
}

/// Compares two sibling routes by specificity
///
/// # Examples
///
/// ```
/// use rhtmx_route_tree::{sort_routes, RouteNode, RouteOrdering};
///
/// let index = RouteNode::route("index", "./index.tsx");
/// let user = RouteNode::route("[user]", "./[user].tsx");
/// let group = RouteNode::layout("(app)", "./(app)/_layout.tsx");
///
/// assert_eq!(sort_routes(&index, &user), RouteOrdering::Precedes);
/// assert_eq!(sort_routes(&user, &index), RouteOrdering::Follows);
/// assert_eq!(sort_routes(&index, &group).value(), 2);
/// assert_eq!(sort_routes(&group, &index).value(), 0);
/// ```
pub fn sort_routes(a: &RouteNode, b: &RouteNode) -> RouteOrdering {
    match (&a.dynamic, &b.dynamic) {
        (Some(_), None) => Follows,
        (None, Some(_)) => Precedes,
        (Some(a_dynamic), Some(b_dynamic)) => compare_dynamic(a_dynamic, b_dynamic),
        (None, None) => STATIC_TABLE[static_class(a) as usize][static_class(b) as usize],
    }
}

fn compare_dynamic(a: &[SegmentDescriptor], b: &[SegmentDescriptor]) -> RouteOrdering {
    // More captured segments pin down more of the path
    match a.len().cmp(&b.len()) {
        Ordering::Greater => return Precedes,
        Ordering::Less => return Follows,
        Ordering::Equal => {}
    }

    a.iter()
        .zip(b)
        .map(|(a, b)| compare_descriptor(a, b))
        .find(|order| *order != Tie)
        .unwrap_or(Tie)
}

fn compare_descriptor(a: &SegmentDescriptor, b: &SegmentDescriptor) -> RouteOrdering {
    let rank = |d: &SegmentDescriptor| (d.not_found, d.deep, d.optional);
    match rank(a).cmp(&rank(b)) {
        Ordering::Less => Precedes,
        Ordering::Greater => Follows,
        Ordering::Equal => Tie,
    }
}

/// Per-segment rank of a full route path, lower is more specific
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SegmentRank {
    Static,
    Dynamic,
    Deep,
    OptionalDeep,
    NotFound,
}

/// Ranks of the segments that take part in matching.
/// Groups are transparent and a trailing `index` matches nothing.
fn segment_ranks(path: &str) -> Vec<SegmentRank> {
    let mut ranks: Vec<SegmentRank> = Vec::new();
    let mut trailing_index = false;

    for segment in path.split('/').filter(|s| !s.is_empty()) {
        trailing_index = false;
        let kind = if segment == NOT_FOUND_ROUTE {
            SegmentKind::Dynamic(SegmentDescriptor::not_found())
        } else {
            classify_segment(segment)
        };
        let rank = match kind {
            SegmentKind::Group(_) => continue,
            SegmentKind::Index => {
                trailing_index = true;
                SegmentRank::Static
            }
            SegmentKind::Static(_) => SegmentRank::Static,
            SegmentKind::Dynamic(d) if d.not_found => SegmentRank::NotFound,
            SegmentKind::Dynamic(d) if d.deep && d.optional => SegmentRank::OptionalDeep,
            SegmentKind::Dynamic(d) if d.deep => SegmentRank::Deep,
            SegmentKind::Dynamic(_) => SegmentRank::Dynamic,
        };
        ranks.push(rank);
    }

    if trailing_index {
        ranks.pop();
    }
    ranks
}

/// Compares two full route paths, possibly from different tree depths
///
/// Segments are compared left to right and the first differing rank decides:
/// static, then dynamic, then catch-all, then optional catch-all, then
/// `+not-found`. When one path is a prefix of the other, the longer path wins
/// unless everything it adds is an optional catch-all.
///
/// # Examples
///
/// ```
/// use rhtmx_route_tree::route::sort::compare_route_paths;
/// use rhtmx_route_tree::RouteOrdering;
///
/// assert_eq!(compare_route_paths("users/[id]", "[a]/[b]"), RouteOrdering::Precedes);
/// assert_eq!(compare_route_paths("[a]/[b]", "docs/[...slug]"), RouteOrdering::Follows);
/// assert_eq!(compare_route_paths("docs", "docs/[...slug?]"), RouteOrdering::Precedes);
/// assert_eq!(compare_route_paths("(app)/[id]", "[user]"), RouteOrdering::Tie);
/// ```
pub fn compare_route_paths(a: &str, b: &str) -> RouteOrdering {
    let a = segment_ranks(a);
    let b = segment_ranks(b);

    if let Some(order) = a.iter().zip(&b).find_map(|(a, b)| match a.cmp(b) {
        Ordering::Less => Some(Precedes),
        Ordering::Greater => Some(Follows),
        Ordering::Equal => None,
    }) {
        return order;
    }

    let only_optional = |tail: &[SegmentRank]| tail.iter().all(|r| *r == SegmentRank::OptionalDeep);
    match a.len().cmp(&b.len()) {
        Ordering::Equal => Tie,
        Ordering::Greater if only_optional(&a[b.len()..]) => Follows,
        Ordering::Greater => Precedes,
        Ordering::Less if only_optional(&b[a.len()..]) => Precedes,
        Ordering::Less => Follows,
    }
}

/// Stable insertion sort driven by a [`RouteOrdering`] comparator
///
/// An element only moves ahead of a neighbour that reports `Follows`, so ties
/// keep their input order and sorting an already sorted list is a no-op.
pub fn stable_sort_by<T>(items: &mut [T], mut compare: impl FnMut(&T, &T) -> RouteOrdering) {
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j - 1], &items[j]) == Follows {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Recursively sorts every `children` list with [`sort_routes`]
pub fn sort_route_nodes(nodes: &mut [RouteNode]) {
    for node in nodes.iter_mut() {
        sort_route_nodes(&mut node.children);
    }
    stable_sort_by(nodes, sort_routes);
}
