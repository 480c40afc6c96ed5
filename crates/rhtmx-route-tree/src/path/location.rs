/// Location normalization
///
/// Turns a raw location (path plus already-parsed params) into decoded path
/// segments and decoded params.
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::trace;

use super::strip_base_path;
use crate::params::ParamsMap;

/// A raw location as reported by the host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlLocation {
    /// Path, possibly still carrying `?query` and `#fragment`
    pub path: String,
    #[serde(default)]
    pub params: ParamsMap,
}

impl UrlLocation {
    pub fn new(path: impl Into<String>, params: ParamsMap) -> Self {
        Self {
            path: path.into(),
            params,
        }
    }
}

/// Decoded segments and params
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPath {
    pub segments: Vec<String>,
    pub params: ParamsMap,
}

/// Percent-decodes one component, keeping the raw text when it is not valid UTF-8
pub fn decode_component(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}

/// Normalizes a location against an optional base path
///
/// # Steps
///
/// 1. Drop the query and fragment from `path`
/// 2. Strip `base_path` by whole segments
/// 3. Split on `/`, discard empty segments, percent-decode each
/// 4. Percent-decode every param value, keeping lists as lists
///
/// # Examples
///
/// ```
/// use rhtmx_route_tree::{get_normalized_state_path, params_from, ParamValue, UrlLocation};
///
/// let location = UrlLocation::new(
///     "/one/two/foo/bar%20baz?alpha=beta",
///     params_from([("alpha", ParamValue::from("beta%20other"))]),
/// );
/// let normalized = get_normalized_state_path(&location, Some("/one/two"));
/// assert_eq!(normalized.segments, vec!["foo", "bar baz"]);
/// assert_eq!(normalized.params["alpha"], ParamValue::from("beta other"));
/// ```
pub fn get_normalized_state_path(location: &UrlLocation, base_path: Option<&str>) -> NormalizedPath {
    let pathname = location
        .path
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    let segments: Vec<String> = strip_base_path(pathname, base_path)
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(decode_component)
        .collect();

    let params: ParamsMap = location
        .params
        .iter()
        .map(|(name, value)| (name.clone(), value.map(decode_component)))
        .collect();

    trace!(path = %location.path, segments = segments.len(), "normalized location");

    NormalizedPath { segments, params }
}
