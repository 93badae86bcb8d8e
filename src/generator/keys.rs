//! Key derivation: where an endpoint lands in the schema tree.

use crate::generator::paths::components;
use crate::manifest::Endpoint;

/// Actions a viewset provides without custom routing.
const STANDARD_ACTIONS: [&str; 6] = [
    "list",
    "retrieve",
    "create",
    "update",
    "partial_update",
    "destroy",
];

/// Action names shown under a friendlier key.
fn coerce_method_name(action: &str) -> &str {
    match action {
        "retrieve" => "read",
        "destroy" => "delete",
        other => other,
    }
}

pub fn is_custom_action(action: &str) -> bool {
    !STANDARD_ACTIONS.contains(&action)
}

/// A GET on a collection path (last component is not a `{var}`), unless the
/// endpoint names its action explicitly.
pub fn is_list_view(path: &str, endpoint: &Endpoint) -> bool {
    if let Some(action) = &endpoint.action {
        return action == "list";
    }
    if endpoint.method.lower() != "get" {
        return false;
    }
    !components(path).last().is_some_and(|c| c.contains('{'))
}

/// Key path for an endpoint whose path has already had the common prefix
/// stripped.
///
/// Named (non-variable) path components come first, followed by the action:
/// `/users/{id}/` with GET yields `["users", "read"]`. A custom action routed
/// for a single method replaces the last named component (`/users/login/`
/// yields `["users", "login"]`); one routed for several methods keeps all
/// components and appends the method's standard action instead.
pub fn get_keys(subpath: &str, endpoint: &Endpoint) -> Vec<String> {
    let action = match &endpoint.action {
        Some(action) => action.clone(),
        None if is_list_view(subpath, endpoint) => "list".to_string(),
        None => endpoint.method.default_action().to_string(),
    };

    let mut named: Vec<String> = components(subpath)
        .into_iter()
        .filter(|c| !c.contains('{'))
        .map(str::to_string)
        .collect();

    if is_custom_action(&action) {
        if endpoint.action_map.len() > 1 {
            let standard = endpoint.method.default_action();
            named.push(coerce_method_name(standard).to_string());
        } else {
            named.pop();
            named.push(action);
        }
        return named;
    }

    named.push(coerce_method_name(&action).to_string());
    named
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{HttpMethod, ViewSpec};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn endpoint(path: &str, method: HttpMethod) -> Endpoint {
        Endpoint::new(path, method, Arc::new(ViewSpec::default()))
    }

    #[test]
    fn standard_viewset_actions() {
        let cases = [
            ("/users/", HttpMethod::Get, "list", vec!["users", "list"]),
            ("/users/", HttpMethod::Post, "create", vec!["users", "create"]),
            ("/users/{id}/", HttpMethod::Get, "retrieve", vec!["users", "read"]),
            ("/users/{id}/", HttpMethod::Put, "update", vec!["users", "update"]),
            (
                "/users/{id}/",
                HttpMethod::Patch,
                "partial_update",
                vec!["users", "partial_update"],
            ),
            ("/users/{id}/", HttpMethod::Delete, "destroy", vec!["users", "delete"]),
        ];
        for (path, method, action, expected) in cases {
            let ep = endpoint(path, method).with_action(action);
            assert_eq!(get_keys(path, &ep), expected, "{} {}", method, path);
        }
    }

    #[test]
    fn single_method_custom_action_replaces_last_component() {
        let login = endpoint("/users/login/", HttpMethod::Post).with_action("login");
        assert_eq!(get_keys("/users/login/", &login), vec!["users", "login"]);

        let activate = endpoint("/users/{id}/activate/", HttpMethod::Post).with_action("set_active");
        assert_eq!(
            get_keys("/users/{id}/activate/", &activate),
            vec!["users", "set_active"]
        );
    }

    #[test]
    fn multi_method_custom_action_appends_standard_action() {
        let ep = endpoint("/users/{id}/avatar/", HttpMethod::Delete)
            .with_action("avatar")
            .with_action_map(&[("put", "avatar"), ("delete", "avatar")]);
        assert_eq!(
            get_keys("/users/{id}/avatar/", &ep),
            vec!["users", "avatar", "delete"]
        );
    }

    #[test]
    fn action_is_inferred_without_a_viewset() {
        let list = endpoint("/reports/", HttpMethod::Get);
        assert_eq!(get_keys("/reports/", &list), vec!["reports", "list"]);

        let detail = endpoint("/reports/{id}/", HttpMethod::Get);
        assert_eq!(get_keys("/reports/{id}/", &detail), vec!["reports", "read"]);

        let post = endpoint("/reports/", HttpMethod::Post);
        assert_eq!(get_keys("/reports/", &post), vec!["reports", "create"]);
    }

    #[test]
    fn list_view_detection() {
        assert!(is_list_view("/users/", &endpoint("/users/", HttpMethod::Get)));
        assert!(!is_list_view("/users/{id}/", &endpoint("/users/{id}/", HttpMethod::Get)));
        assert!(!is_list_view("/users/", &endpoint("/users/", HttpMethod::Post)));
        let named = endpoint("/users/", HttpMethod::Get).with_action("logout");
        assert!(!is_list_view("/users/", &named));
    }
}
