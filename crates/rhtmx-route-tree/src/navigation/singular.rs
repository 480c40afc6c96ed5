/// Singular screens: one stack entry per name and identity
use super::StackState;
use crate::params::ParamsMap;

/// Drops earlier duplicates of the active route
///
/// Routes sharing the active route's name and id are removed, the active
/// route itself is kept and becomes the last index. When the active route
/// has no id the state is returned unchanged. An index of 0 counts as unset
/// and selects the last route.
///
/// ```
/// use rhtmx_route_tree::navigation::{filter_singular, StackRoute, StackState};
/// use rhtmx_route_tree::{get_unique_id, params_from, ParamValue};
///
/// let user = |key: &str, id: &str| {
///     StackRoute::new(key, "[user]").with_params(params_from([("user", ParamValue::from(id))]))
/// };
/// let state = StackState::new(vec![user("a", "bacon"), user("b", "ham"), user("c", "bacon")], 2);
///
/// let filtered = filter_singular(&state, |params| Some(get_unique_id("[user]", params)));
/// assert_eq!(filtered.route_keys(), vec!["b", "c"]);
/// assert_eq!(filtered.index, 1);
/// ```
pub fn filter_singular<F>(state: &StackState, get_id: F) -> StackState
where
    F: Fn(Option<&ParamsMap>) -> Option<String>,
{
    let active = match state.active_index() {
        None => return state.clone(),
        Some(0) => state.routes.len() - 1,
        Some(index) => index,
    };
    let current = &state.routes[active];

    let Some(id) = get_id(current.params.as_ref()).filter(|id| !id.is_empty()) else {
        return state.clone();
    };

    let routes: Vec<_> = state
        .routes
        .iter()
        .enumerate()
        .filter(|(position, route)| {
            *position == active
                || route.name != current.name
                || get_id(route.params.as_ref()).as_deref() != Some(id.as_str())
        })
        .map(|(_, route)| route.clone())
        .collect();

    StackState {
        index: routes.len().saturating_sub(1),
        routes,
        route_names: state.route_names.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::StackRoute;

    #[test]
    fn test_no_id_is_noop() {
        let state = StackState::new(vec![StackRoute::new("a", "a"), StackRoute::new("b", "a")], 1);
        assert_eq!(filter_singular(&state, |_| None), state);
        assert_eq!(filter_singular(&state, |_| Some(String::new())), state);
    }

    #[test]
    fn test_other_names_survive() {
        let state = StackState::new(
            vec![
                StackRoute::new("a", "a"),
                StackRoute::new("b", "b"),
                StackRoute::new("c", "a"),
            ],
            2,
        );
        let filtered = filter_singular(&state, |_| Some("same".to_string()));
        assert_eq!(filtered.route_keys(), vec!["b", "c"]);
        assert_eq!(filtered.index, 1);
    }

    #[test]
    fn test_zero_index_selects_last_route() {
        let state = StackState::new(
            vec![
                StackRoute::new("a", "a"),
                StackRoute::new("b", "b"),
                StackRoute::new("c", "a"),
            ],
            0,
        );
        let filtered = filter_singular(&state, |_| Some("same".to_string()));
        assert_eq!(filtered.route_keys(), vec!["b", "c"]);
        assert_eq!(filtered.index, 1);
    }

    #[test]
    fn test_empty_stack() {
        let state = StackState::new(Vec::new(), 0);
        assert_eq!(filter_singular(&state, |_| Some("x".to_string())), state);
    }
}
