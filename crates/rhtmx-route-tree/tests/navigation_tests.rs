/// Integration tests for the navigation-state helpers
///
/// Location normalization, screen identity, relative id resolution and
/// stack filtering.

use pretty_assertions::assert_eq;
use rhtmx_route_tree::navigation::{
    DescriptorMap, Presentation, RouteDescriptor, ScreenOptions,
};
use rhtmx_route_tree::*;
use rstest::rstest;

fn stack(names: &[&str], index: usize) -> StackState {
    StackState::new(
        names
            .iter()
            .map(|name| StackRoute::new(format!("{name}-key"), *name))
            .collect(),
        index,
    )
}

fn modal_descriptors(names: &[&str]) -> DescriptorMap {
    names
        .iter()
        .map(|name| {
            (
                format!("{name}-key"),
                RouteDescriptor::presented_as(Presentation::Modal),
            )
        })
        .collect()
}

fn names(state: &StackState) -> Vec<&str> {
    state.routes.iter().map(|r| r.name.as_str()).collect()
}

// ============================================================================
// Location Normalization
// ============================================================================

fn sample_params() -> ParamsMap {
    params_from([
        ("alpha", ParamValue::from("beta other")),
        (
            "delta",
            ParamValue::from(vec!["evan", "foxtrot%20gamma", "hotel india"]),
        ),
    ])
}

#[test]
fn test_normalize_decodes_segments_and_params() {
    let location = UrlLocation::new("/foo/bar%20baz?alpha=beta", sample_params());
    let normalized = get_normalized_state_path(&location, None);

    assert_eq!(normalized.segments, vec!["foo", "bar baz"]);
    assert_eq!(
        normalized.params,
        params_from([
            ("alpha", ParamValue::from("beta other")),
            (
                "delta",
                ParamValue::from(vec!["evan", "foxtrot gamma", "hotel india"]),
            ),
        ])
    );
}

#[test]
fn test_normalize_strips_base_path() {
    let plain = get_normalized_state_path(
        &UrlLocation::new("/foo/bar%20baz?alpha=beta", sample_params()),
        None,
    );
    let based = get_normalized_state_path(
        &UrlLocation::new("/one/two/foo/bar%20baz?alpha=beta", sample_params()),
        Some("/one/two"),
    );
    assert_eq!(based, plain);
}

#[test]
fn test_normalize_via_config() {
    let config = RouterConfig::from_toml_str("[navigation]\nbase_path = \"/one/two\"").unwrap();
    let normalized = normalize_location(
        &UrlLocation::new("/one/two/foo", ParamsMap::new()),
        &config,
    );
    assert_eq!(normalized.segments, vec!["foo"]);
}

// ============================================================================
// Screen Identity
// ============================================================================

#[rstest]
#[case("[...bacon]", params_from([("bacon", ParamValue::from(vec!["foo", "bar"]))]), "foo/bar")]
#[case("[...bacon]", params_from([("bacon", ParamValue::Multiple(Vec::new()))]), "[...bacon]")]
#[case("[user]/[bar]", params_from([("user", ParamValue::from("bacon"))]), "bacon/[bar]")]
#[case("[user]", ParamsMap::new(), "[user]")]
#[case("settings", params_from([("user", ParamValue::from("bacon"))]), "settings")]
fn test_get_unique_id(#[case] name: &str, #[case] params: ParamsMap, #[case] expected: &str) {
    assert_eq!(get_unique_id(name, Some(&params)), expected);
}

#[test]
fn test_identity_from_resolved_tree() {
    let manifest: Manifest = ["_layout.tsx", "[user]/[post].tsx", "about.tsx"]
        .into_iter()
        .collect();
    let root = get_routes(&manifest, &RoutingConfig::default().with_skip_generated(true))
        .unwrap()
        .unwrap();

    let about = root.child("about").unwrap();
    assert!(create_get_id_for_route(about).is_none());

    let post = root.child("[user]/[post]").unwrap();
    let identity = create_get_id_for_route(post).unwrap();
    let params = params_from([
        ("user", ParamValue::from("bacon")),
        ("post", ParamValue::from("7")),
        ("ref", ParamValue::from("mail")),
    ]);
    assert_eq!(identity.id_for(Some(&params)), "bacon/7");
    assert_eq!(identity.id_for(None), "[user]/[post]");
}

// ============================================================================
// Relative Id Resolution
// ============================================================================

#[rstest]
#[case("/foo/bar", Some("../../bat.tsx"), Some("/bat"))]
#[case("/foo/bar", Some("../baz"), Some("/foo/baz"))]
#[case("/foo", Some("./child.js"), Some("/foo/child"))]
#[case("/foo", Some("/abs/./path/../leaf.ts"), Some("/abs/leaf"))]
#[case("/foo", None, None)]
fn test_resolve_parent_id(
    #[case] current: &str,
    #[case] reference: Option<&str>,
    #[case] expected: Option<&str>,
) {
    assert_eq!(
        resolve_parent_id(current, reference).unwrap().as_deref(),
        expected
    );
}

#[test]
fn test_resolve_parent_id_above_root() {
    let err = resolve_parent_id("/", Some("../..")).unwrap_err();
    assert!(err.to_string().starts_with("Cannot resolve"));
    assert!(matches!(err, RouteError::CannotResolve { .. }));
}

// ============================================================================
// Modal Partition
// ============================================================================

#[test]
fn test_modal_removed_on_web() {
    let state = stack(&["index", "page1", "modal1", "page2"], 3);
    let result =
        convert_stack_state_to_non_modal_state(&state, &modal_descriptors(&["modal1"]), true);
    assert_eq!(names(&result), vec!["index", "page1", "page2"]);
    assert_eq!(result.index, 2);
}

#[test]
fn test_active_modal_maps_to_previous_route() {
    let state = stack(&["index", "modal1"], 1);
    let result =
        convert_stack_state_to_non_modal_state(&state, &modal_descriptors(&["modal1"]), true);
    assert_eq!(names(&result), vec!["index"]);
    assert_eq!(result.index, 0);
}

#[test]
fn test_modal_kept_off_web() {
    let state = stack(&["index", "modal1"], 1);
    let result =
        convert_stack_state_to_non_modal_state(&state, &modal_descriptors(&["modal1"]), false);
    assert_eq!(result, state);
}

#[test]
fn test_input_state_untouched() {
    let state = stack(&["index", "modal1", "page"], 2);
    let before = state.clone();
    let _ = convert_stack_state_to_non_modal_state(&state, &modal_descriptors(&["modal1"]), true);
    assert_eq!(state, before);
}

#[test]
fn test_sheet_presentations_are_modal() {
    let mut descriptors = DescriptorMap::new();
    descriptors.insert(
        "sheet-key".to_string(),
        RouteDescriptor::presented_as(Presentation::FormSheet),
    );
    descriptors.insert(
        "card-key".to_string(),
        RouteDescriptor::presented_as(Presentation::Card),
    );
    let state = stack(&["card", "sheet"], 1);
    let result = convert_stack_state_to_non_modal_state(&state, &descriptors, true);
    assert_eq!(names(&result), vec!["card"]);
    assert!(!is_modal_presentation(Some(&ScreenOptions::default())));
}

// ============================================================================
// Singular Screens
// ============================================================================

#[test]
fn test_filter_singular_with_route_identity() {
    let identity = create_get_id_for_route(&RouteNode::route("[user]", "./[user].tsx")).unwrap();
    let route = |key: &str, user: &str| {
        StackRoute::new(key, "[user]").with_params(params_from([("user", ParamValue::from(user))]))
    };
    let state = StackState::new(
        vec![
            route("1", "bacon"),
            StackRoute::new("2", "about"),
            route("3", "ham"),
            route("4", "bacon"),
        ],
        3,
    );

    let filtered = filter_singular(&state, |params| Some(identity.id_for(params)));
    assert_eq!(filtered.route_keys(), vec!["2", "3", "4"]);
    assert_eq!(filtered.index, 2);
}
