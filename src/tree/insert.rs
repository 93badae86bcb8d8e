use crate::link::Link;
use crate::tree::error::{SchemaCollisionError, TreeError};
use crate::tree::node::{Entry, LinkNode};

/// Nested insertion of `link` at `keys`.
///
/// Every key but the last names an interior node, created on demand; the last
/// key is appended to the final node's pending leaves. Inserting the same key
/// path twice keeps both links.
///
/// Descending through a key that is already held by a link (pending in the
/// current node, or settled among its children) is a collision. Nodes created
/// at shallower levels before the conflict is found stay in the tree, so the
/// caller must discard it.
pub fn insert(tree: &mut LinkNode, keys: &[String], link: Link) -> Result<(), TreeError> {
    let Some((last, branch)) = keys.split_last() else {
        return Err(TreeError::EmptyKeyPath { url: link.url });
    };

    let mut target = tree;
    for key in branch {
        if !target.children.contains_key(key) {
            if let Some((_, pending)) = target.links.iter().find(|(k, _)| k == key) {
                return Err(collision(&link, &pending.url, keys));
            }
        }

        let entry = target
            .children
            .entry(key.clone())
            .or_insert_with(|| Entry::Node(LinkNode::new()));

        target = match entry {
            Entry::Node(node) => node,
            Entry::Link(settled) => return Err(collision(&link, &settled.url, keys)),
        };
    }

    target.links.push((last.clone(), link));
    Ok(())
}

fn collision(value: &Link, target_url: &str, keys: &[String]) -> TreeError {
    SchemaCollisionError {
        value_url: value.url.clone(),
        target_url: target_url.to_string(),
        keys: keys.to_vec(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::HttpMethod;
    use pretty_assertions::assert_eq;

    fn keys(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    fn link(url: &str, method: HttpMethod) -> Link {
        Link::new(url, url, method)
    }

    fn pending_urls(node: &LinkNode) -> Vec<(&str, &str)> {
        node.pending_links()
            .iter()
            .map(|(k, l)| (k.as_str(), l.url.as_str()))
            .collect()
    }

    #[test]
    fn identical_key_paths_keep_both_links_in_order() {
        let mut root = LinkNode::new();
        insert(&mut root, &keys(&["users"]), link("/users/a", HttpMethod::Post)).unwrap();
        insert(&mut root, &keys(&["users"]), link("/users/b", HttpMethod::Get)).unwrap();

        assert!(root.children().is_empty());
        assert_eq!(
            pending_urls(&root),
            vec![("users", "/users/a"), ("users", "/users/b")]
        );
    }

    #[test]
    fn siblings_share_their_interior_node() {
        let mut root = LinkNode::new();
        insert(&mut root, &keys(&["users", "login"]), link("/users/login/", HttpMethod::Post)).unwrap();
        insert(&mut root, &keys(&["users", "logout"]), link("/users/logout/", HttpMethod::Get)).unwrap();

        assert_eq!(root.children().len(), 1);
        let users = root.child_node("users").unwrap();
        assert_eq!(
            pending_urls(users),
            vec![("login", "/users/login/"), ("logout", "/users/logout/")]
        );
    }

    #[test]
    fn shared_prefix_resolves_to_the_same_node() {
        let mut root = LinkNode::new();
        insert(&mut root, &keys(&["a", "b", "c"]), link("/a/b/c", HttpMethod::Get)).unwrap();
        insert(&mut root, &keys(&["a", "b", "d", "e"]), link("/a/b/d/e", HttpMethod::Get)).unwrap();
        insert(&mut root, &keys(&["a", "x"]), link("/a/x", HttpMethod::Get)).unwrap();

        let a = root.child_node("a").unwrap();
        let b = a.child_node("b").unwrap();
        assert_eq!(pending_urls(a), vec![("x", "/a/x")]);
        assert_eq!(pending_urls(b), vec![("c", "/a/b/c")]);
        assert_eq!(pending_urls(b.child_node("d").unwrap()), vec![("e", "/a/b/d/e")]);
    }

    #[test]
    fn descending_through_a_pending_leaf_collides() {
        let mut root = LinkNode::new();
        insert(&mut root, &keys(&["users"]), link("/users/", HttpMethod::Get)).unwrap();
        let err = insert(&mut root, &keys(&["users", "sub"]), link("/users/sub/", HttpMethod::Get)).unwrap_err();

        assert_eq!(
            err,
            TreeError::Collision(SchemaCollisionError {
                value_url: "/users/sub/".to_string(),
                target_url: "/users/".to_string(),
                keys: keys(&["users", "sub"]),
            })
        );
        let message = err.to_string();
        assert!(message.contains("Schema Naming Collision."));
        assert!(message.contains("/users/sub/"));
        assert!(message.contains("[\"users\", \"sub\"]"));
    }

    #[test]
    fn descending_through_a_settled_link_collides() {
        let mut root = LinkNode::new();
        insert(&mut root, &keys(&["users", "list"]), link("/users/", HttpMethod::Get)).unwrap();
        root.distribute_links();

        let err = insert(
            &mut root,
            &keys(&["users", "list", "extra"]),
            link("/users/list/extra/", HttpMethod::Get),
        )
        .unwrap_err();
        match err {
            TreeError::Collision(c) => assert_eq!(c.target_url, "/users/"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn branch_inserted_before_leaf_is_not_a_collision() {
        let mut root = LinkNode::new();
        insert(&mut root, &keys(&["users", "sub"]), link("/users/sub/", HttpMethod::Get)).unwrap();
        insert(&mut root, &keys(&["users"]), link("/users/", HttpMethod::Get)).unwrap();
        root.distribute_links();

        let settled: Vec<Vec<String>> = root.iter_links().into_iter().map(|(k, _)| k).collect();
        assert_eq!(settled, vec![keys(&["users", "sub"]), keys(&["users_0"])]);
    }

    #[test]
    fn failed_insert_leaves_earlier_levels_in_place() {
        let mut root = LinkNode::new();
        insert(&mut root, &keys(&["api", "users"]), link("/api/users/", HttpMethod::Get)).unwrap();
        let before = root.clone();
        assert!(insert(&mut root, &keys(&["api", "users", "x"]), link("/x", HttpMethod::Get)).is_err());
        assert_eq!(root, before);
    }

    #[test]
    fn empty_key_path_is_rejected() {
        let mut root = LinkNode::new();
        let err = insert(&mut root, &[], link("/", HttpMethod::Get)).unwrap_err();
        assert_eq!(err, TreeError::EmptyKeyPath { url: "/".to_string() });
        assert!(root.is_empty());
    }
}
