// File: src/error.rs
// Purpose: Error type shared by route resolution and id resolution

use thiserror::Error;

/// Errors surfaced while resolving a manifest or a relative id.
///
/// Malformed bracket syntax is never an error: it degrades to a literal
/// segment. Everything here is a configuration problem the caller must fix.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("The route files \"{second}\" and \"{first}\" conflict on the route \"/{route}\". Please remove or rename one of these files.")]
    Conflict {
        route: String,
        first: String,
        second: String,
    },

    #[error("The layouts \"{second}\" and \"{first}\" conflict on the route \"/{route}\". Please remove or rename one of these files.")]
    LayoutConflict {
        route: String,
        first: String,
        second: String,
    },

    #[error("The file {context_key} does not have a fallback sibling file without a platform extension.")]
    MissingFallback { context_key: String },

    #[error("Invalid route {key}. Routes cannot end with '(group)' syntax")]
    GroupTerminal { key: String },

    #[error("Invalid route {key}. Route nodes cannot start with the '+' character. \"Please rename to {suggestion}\"")]
    ReservedPrefix { key: String, suggestion: String },

    #[error("Array syntax cannot contain duplicate group name \"{groups}\" in \"{key}\".")]
    DuplicateArrayGroup { key: String, groups: String },

    #[error("The route \"/{route}\" declares the dynamic segment \"{name}\" more than once")]
    DuplicateParam { route: String, name: String },

    #[error("Layout {layout} has invalid initialRouteName '{initial}'{}. Valid options are: {valid}", group_suffix(.group))]
    InvalidInitialRoute {
        layout: String,
        initial: String,
        group: Option<String>,
        valid: String,
    },

    #[error("Invalid ignore pattern \"{pattern}\": {source}")]
    InvalidIgnorePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid route pattern \"{pattern}\": {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Cannot resolve \"{reference}\" relative to \"{current}\": it ascends above the root")]
    CannotResolve { current: String, reference: String },
}

fn group_suffix(group: &Option<String>) -> String {
    group
        .as_ref()
        .map(|g| format!(" for group '({})'", g))
        .unwrap_or_default()
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, RouteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_message() {
        let err = RouteError::Conflict {
            route: "a".to_string(),
            first: "./a.js".to_string(),
            second: "./a.tsx".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "The route files \"./a.tsx\" and \"./a.js\" conflict on the route \"/a\". Please remove or rename one of these files."
        );
    }

    #[test]
    fn test_initial_route_message_with_group() {
        let err = RouteError::InvalidInitialRoute {
            layout: "./(a,b)/_layout.js".to_string(),
            initial: "d".to_string(),
            group: Some("b".to_string()),
            valid: "'c'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Layout ./(a,b)/_layout.js has invalid initialRouteName 'd' for group '(b)'. Valid options are: 'c'"
        );
    }

    #[test]
    fn test_cannot_resolve_prefix() {
        let err = RouteError::CannotResolve {
            current: "/".to_string(),
            reference: "../..".to_string(),
        };
        assert!(err.to_string().starts_with("Cannot resolve"));
    }
}
