/// Modal partitioning of a stack state
use tracing::debug;

use super::{DescriptorMap, Presentation, ScreenOptions, StackState};

/// Whether the options present the screen as a modal or sheet
pub fn is_modal_presentation(options: Option<&ScreenOptions>) -> bool {
    matches!(
        options.and_then(|options| options.presentation),
        Some(
            Presentation::Modal
                | Presentation::TransparentModal
                | Presentation::ContainedModal
                | Presentation::ContainedTransparentModal
                | Presentation::FullScreenModal
                | Presentation::FormSheet
                | Presentation::PageSheet
        )
    )
}

/// Removes modal routes from a stack state on web
///
/// Off web the state is returned unchanged. On web, routes whose descriptor
/// is modal are dropped in order. The new index points at the active route
/// when it survives, otherwise at the nearest surviving route before it, or
/// 0 when none does.
///
/// # Examples
///
/// ```
/// use rhtmx_route_tree::navigation::{
///     convert_stack_state_to_non_modal_state, DescriptorMap, Presentation, RouteDescriptor,
///     StackRoute, StackState,
/// };
///
/// let state = StackState::new(
///     ["index", "page1", "modal1", "page2"]
///         .iter()
///         .map(|name| StackRoute::new(format!("{name}-key"), *name))
///         .collect(),
///     3,
/// );
/// let mut descriptors = DescriptorMap::new();
/// descriptors.insert("modal1-key".into(), RouteDescriptor::presented_as(Presentation::Modal));
///
/// let filtered = convert_stack_state_to_non_modal_state(&state, &descriptors, true);
/// assert_eq!(filtered.route_keys(), vec!["index-key", "page1-key", "page2-key"]);
/// assert_eq!(filtered.index, 2);
/// ```
pub fn convert_stack_state_to_non_modal_state(
    state: &StackState,
    descriptors: &DescriptorMap,
    is_web_platform: bool,
) -> StackState {
    if !is_web_platform {
        return state.clone();
    }

    let active = state.active_index().unwrap_or_default();
    let mut index = 0;
    let mut routes = Vec::with_capacity(state.routes.len());

    for (position, route) in state.routes.iter().enumerate() {
        let options = descriptors.get(&route.key).map(|descriptor| &descriptor.options);
        if is_modal_presentation(options) {
            continue;
        }
        if position <= active {
            index = routes.len();
        }
        routes.push(route.clone());
    }

    debug!(
        removed = state.routes.len() - routes.len(),
        index, "filtered modal routes from stack"
    );

    StackState {
        index,
        routes,
        route_names: state.route_names.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::{RouteDescriptor, StackRoute};

    fn stack(names: &[&str], index: usize) -> StackState {
        StackState::new(
            names.iter().map(|name| StackRoute::new(*name, *name)).collect(),
            index,
        )
    }

    fn modal(keys: &[&str]) -> DescriptorMap {
        keys.iter()
            .map(|key| (key.to_string(), RouteDescriptor::presented_as(Presentation::Modal)))
            .collect()
    }

    #[test]
    fn test_passthrough_off_web() {
        let state = stack(&["index", "modal1"], 1);
        let result = convert_stack_state_to_non_modal_state(&state, &modal(&["modal1"]), false);
        assert_eq!(result, state);
    }

    #[test]
    fn test_active_modal_falls_back_to_previous() {
        let state = stack(&["index", "modal1"], 1);
        let result = convert_stack_state_to_non_modal_state(&state, &modal(&["modal1"]), true);
        assert_eq!(result.route_keys(), vec!["index"]);
        assert_eq!(result.index, 0);
    }

    #[test]
    fn test_no_surviving_route_before_active() {
        let state = stack(&["modal1", "page"], 0);
        let result = convert_stack_state_to_non_modal_state(&state, &modal(&["modal1"]), true);
        assert_eq!(result.route_keys(), vec!["page"]);
        assert_eq!(result.index, 0);
    }

    #[test]
    fn test_is_modal_presentation() {
        assert!(!is_modal_presentation(None));
        assert!(!is_modal_presentation(Some(&ScreenOptions::default())));
        for presentation in [Presentation::FormSheet, Presentation::ContainedTransparentModal] {
            let options = RouteDescriptor::presented_as(presentation).options;
            assert!(is_modal_presentation(Some(&options)));
        }
        let card = RouteDescriptor::presented_as(Presentation::Card).options;
        assert!(!is_modal_presentation(Some(&card)));
    }
}
