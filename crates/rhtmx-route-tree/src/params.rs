// File: src/params.rs
// Purpose: Route parameter values shared by matching, identity and normalization

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A parameter value: one decoded string, or an ordered list for catch-all
/// segments and repeated query keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Single(String),
    Multiple(Vec<String>),
}

/// Parameter name → value. Built fresh per call, never mutated in place.
pub type ParamsMap = HashMap<String, ParamValue>;

impl ParamValue {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            ParamValue::Single(value) => Some(value),
            ParamValue::Multiple(_) => None,
        }
    }

    /// Applies `f` to every string, preserving array-ness and order
    pub fn map(&self, mut f: impl FnMut(&str) -> String) -> ParamValue {
        match self {
            ParamValue::Single(value) => ParamValue::Single(f(value)),
            ParamValue::Multiple(values) => {
                ParamValue::Multiple(values.iter().map(|v| f(v)).collect())
            }
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Single(value)
    }
}

impl<S: Into<String>> From<Vec<S>> for ParamValue {
    fn from(values: Vec<S>) -> Self {
        ParamValue::Multiple(values.into_iter().map(Into::into).collect())
    }
}

/// Builds a [`ParamsMap`] from `(name, value)` pairs
///
/// ```
/// use rhtmx_route_tree::{params_from, ParamValue};
///
/// let params = params_from([("user", ParamValue::from("bacon"))]);
/// assert_eq!(params["user"].as_single(), Some("bacon"));
/// ```
pub fn params_from<I, K>(pairs: I) -> ParamsMap
where
    I: IntoIterator<Item = (K, ParamValue)>,
    K: Into<String>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}
