/// Navigation-state helpers for stack navigators
///
/// The state types mirror what a stack navigator reports. Helpers never
/// mutate their input; they return derived copies.
pub mod modal;
pub mod singular;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::params::ParamsMap;

pub use modal::{convert_stack_state_to_non_modal_state, is_modal_presentation};
pub use singular::filter_singular;

/// One entry of a stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackRoute {
    pub key: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<ParamsMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Fields this crate does not interpret, kept as-is
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StackRoute {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            params: None,
            path: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_params(mut self, params: ParamsMap) -> Self {
        self.params = Some(params);
        self
    }
}

/// A flat stack navigation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackState {
    /// Position of the active route in `routes`
    pub index: usize,
    pub routes: Vec<StackRoute>,
    #[serde(default)]
    pub route_names: Vec<String>,
}

impl StackState {
    pub fn new(routes: Vec<StackRoute>, index: usize) -> Self {
        let mut route_names = Vec::new();
        for route in &routes {
            if !route_names.contains(&route.name) {
                route_names.push(route.name.clone());
            }
        }
        Self {
            index,
            routes,
            route_names,
        }
    }

    /// Active index clamped into `routes`; `None` for an empty stack
    pub fn active_index(&self) -> Option<usize> {
        if self.routes.is_empty() {
            None
        } else {
            Some(self.index.min(self.routes.len() - 1))
        }
    }

    pub fn route_keys(&self) -> Vec<&str> {
        self.routes.iter().map(|route| route.key.as_str()).collect()
    }
}

/// How a screen is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Presentation {
    Card,
    Modal,
    TransparentModal,
    ContainedModal,
    ContainedTransparentModal,
    FullScreenModal,
    FormSheet,
    PageSheet,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation: Option<Presentation>,
}

/// Rendering metadata of one stack route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    #[serde(default)]
    pub options: ScreenOptions,
}

impl RouteDescriptor {
    pub fn presented_as(presentation: Presentation) -> Self {
        Self {
            options: ScreenOptions {
                presentation: Some(presentation),
            },
        }
    }
}

/// Route key → descriptor
pub type DescriptorMap = HashMap<String, RouteDescriptor>;
