/// Segment grammar for file-based route names
///
/// Pure functions that classify a single `/`-free segment and derive the
/// dynamic descriptors of a whole path. Malformed bracket syntax is never an
/// error here: it falls back to a literal segment.
use once_cell::sync::Lazy;
use regex::Regex;

use super::SegmentDescriptor;

/// Name of the generated not-found route, treated as a deep catch-all.
pub const NOT_FOUND_ROUTE: &str = "+not-found";

static SUPPORTED_EXTENSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.[jt]sx?$").unwrap()
});

/// Kind of a single route segment
///
/// # Examples
///
/// ```
/// use rhtmx_route_tree::route::pattern::{classify_segment, SegmentKind};
///
/// assert!(matches!(classify_segment("about"), SegmentKind::Static(_)));
/// assert!(matches!(classify_segment("(app)"), SegmentKind::Group(_)));
/// assert!(matches!(classify_segment("index"), SegmentKind::Index));
/// assert!(matches!(classify_segment("[id]"), SegmentKind::Dynamic(_)));
/// assert!(matches!(classify_segment("[id"), SegmentKind::Static(_)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentKind {
    /// Literal text, including malformed bracket syntax
    Static(String),
    /// `(name)`, invisible to the matched path
    Group(String),
    /// The literal `index` segment
    Index,
    /// `[name]`, `[...name]`, `[...name?]` or `[[...name]]`
    Dynamic(SegmentDescriptor),
}

impl SegmentKind {
    pub fn is_group(&self) -> bool {
        matches!(self, SegmentKind::Group(_))
    }
}

/// Classifies one segment (pure function)
///
/// # Parsing Rules (evaluated in order)
///
/// 1. **Optional catch-all**: `[[...name]]`
/// 2. **Bracketed**: `[...name?]`, `[...name]`, `[name]` when the brackets
///    wrap the whole segment and are balanced
/// 3. **Group**: `(name)`
/// 4. **Index**: `index`
/// 5. **Static**: anything else
pub fn classify_segment(segment: &str) -> SegmentKind {
    if let Some(descriptor) = parse_descriptor(segment) {
        return SegmentKind::Dynamic(descriptor);
    }

    if let Some(name) = group_name(segment) {
        return SegmentKind::Group(name.to_string());
    }

    if segment == "index" {
        return SegmentKind::Index;
    }

    SegmentKind::Static(segment.to_string())
}

/// Parses one segment into its dynamic descriptors
///
/// Returns `None` for static, index and group segments. A dynamic segment
/// always yields exactly one descriptor.
///
/// # Examples
///
/// ```
/// use rhtmx_route_tree::route::pattern::parse_dynamic_segment;
///
/// let parsed = parse_dynamic_segment("[...slug?]").unwrap();
/// assert_eq!(parsed.len(), 1);
/// assert_eq!(parsed[0].name, "slug");
/// assert!(parsed[0].deep);
/// assert!(parsed[0].optional);
///
/// assert!(parse_dynamic_segment("about").is_none());
/// assert!(parse_dynamic_segment("(group)").is_none());
/// assert!(parse_dynamic_segment("[unbalanced").is_none());
/// ```
pub fn parse_dynamic_segment(segment: &str) -> Option<Vec<SegmentDescriptor>> {
    parse_descriptor(segment).map(|descriptor| vec![descriptor])
}

fn parse_descriptor(segment: &str) -> Option<SegmentDescriptor> {
    // [[...name]] is the bracketed spelling of an optional catch-all
    if let Some(name) = segment
        .strip_prefix("[[...")
        .and_then(|s| s.strip_suffix("]]"))
    {
        return valid_name(name).map(|n| SegmentDescriptor::deep(n).with_optional(true));
    }

    let inner = segment.strip_prefix('[')?.strip_suffix(']')?;

    // Nested or stray brackets make the whole segment literal
    if inner.contains('[') || inner.contains(']') {
        return None;
    }

    match inner.strip_prefix("...") {
        Some(rest) => {
            let (name, optional) = match rest.strip_suffix('?') {
                Some(name) => (name, true),
                None => (rest, false),
            };
            valid_name(name).map(|n| SegmentDescriptor::deep(n).with_optional(optional))
        }
        // `?` only carries meaning on catch-alls
        None => valid_name(inner.strip_suffix('?').unwrap_or(inner)).map(SegmentDescriptor::single),
    }
}

fn valid_name(name: &str) -> Option<&str> {
    if name.is_empty() || name.contains('/') {
        None
    } else {
        Some(name)
    }
}

/// Returns the inner name of a `(group)` segment
pub fn group_name(segment: &str) -> Option<&str> {
    segment
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .filter(|inner| !inner.is_empty() && !inner.contains('/'))
}

/// Returns the name of the first group segment in a path
///
/// ```
/// use rhtmx_route_tree::route::pattern::match_group_name;
///
/// assert_eq!(match_group_name("(app)/index"), Some("app"));
/// assert_eq!(match_group_name("a/b/(c)"), Some("c"));
/// assert_eq!(match_group_name("a/b"), None);
/// ```
pub fn match_group_name(path: &str) -> Option<&str> {
    path.split('/').find_map(group_name)
}

/// Derives the dynamic descriptors of every segment in a path
///
/// `+not-found` yields a deep descriptor flagged as not-found. Returns `None`
/// when no segment is dynamic.
///
/// ```
/// use rhtmx_route_tree::route::pattern::generate_dynamic;
///
/// let dynamic = generate_dynamic("c/[d]/e/[...f]").unwrap();
/// let names: Vec<&str> = dynamic.iter().map(|d| d.name.as_str()).collect();
/// assert_eq!(names, vec!["d", "f"]);
/// assert!(generate_dynamic("about/team").is_none());
/// ```
pub fn generate_dynamic(path: &str) -> Option<Vec<SegmentDescriptor>> {
    let dynamic: Vec<SegmentDescriptor> = path
        .split('/')
        .filter_map(|part| {
            if part == NOT_FOUND_ROUTE {
                Some(SegmentDescriptor::not_found())
            } else {
                parse_descriptor(part)
            }
        })
        .collect();

    if dynamic.is_empty() {
        None
    } else {
        Some(dynamic)
    }
}

/// Strips a trailing `.js`, `.jsx`, `.ts` or `.tsx` extension
pub fn remove_supported_extensions(name: &str) -> &str {
    match SUPPORTED_EXTENSION.find(name) {
        Some(m) => &name[..m.start()],
        None => name,
    }
}
