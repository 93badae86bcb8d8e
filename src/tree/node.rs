//! The schema tree node.
//!
//! A node is an ordered map of named children plus a list of pending leaves.
//! Leaves are `(key, Link)` pairs that have been inserted but not yet given
//! their final name; `distribute_links` settles them into `children`, picking
//! a free key with `get_available_key` when the preferred one is taken.

use crate::link::Link;
use indexmap::IndexMap;
use std::collections::HashMap;

/// A child position in the tree: either another node or a settled link.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Node(LinkNode),
    Link(Link),
}

impl Entry {
    pub fn as_node(&self) -> Option<&LinkNode> {
        match self {
            Entry::Node(node) => Some(node),
            Entry::Link(_) => None,
        }
    }

    pub fn as_link(&self) -> Option<&Link> {
        match self {
            Entry::Link(link) => Some(link),
            Entry::Node(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkNode {
    pub(crate) children: IndexMap<String, Entry>,
    pub(crate) links: Vec<(String, Link)>,
    pub(crate) key_counts: HashMap<String, usize>,
}

impl LinkNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn children(&self) -> &IndexMap<String, Entry> {
        &self.children
    }

    /// Leaves inserted at this node that have not been settled yet.
    pub fn pending_links(&self) -> &[(String, Link)] {
        &self.links
    }

    pub fn child_node(&self, key: &str) -> Option<&LinkNode> {
        self.children.get(key).and_then(Entry::as_node)
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.links.is_empty()
    }

    /// Return `preferred_key` if no child uses it, otherwise the next
    /// `{preferred_key}_{n}` that is free.
    ///
    /// The per-key counter advances on every attempt, including attempts
    /// whose candidate turns out to be taken, so the sequence of returned
    /// keys depends only on call order and never reuses a number.
    pub fn get_available_key(&mut self, preferred_key: &str) -> String {
        if !self.children.contains_key(preferred_key) {
            return preferred_key.to_string();
        }

        loop {
            let counter = self.key_counts.entry(preferred_key.to_string()).or_insert(0);
            let current = *counter;
            *counter += 1;

            let key = format!("{}_{}", preferred_key, current);
            if !self.children.contains_key(&key) {
                return key;
            }
        }
    }

    /// Settle every pending leaf into `children`, depth first.
    ///
    /// Interior children are settled before this node's own leaves, and
    /// leaves keep their insertion order.
    pub fn distribute_links(&mut self) {
        for entry in self.children.values_mut() {
            if let Entry::Node(child) = entry {
                child.distribute_links();
            }
        }

        for (preferred_key, link) in std::mem::take(&mut self.links) {
            let key = self.get_available_key(&preferred_key);
            self.children.insert(key, Entry::Link(link));
        }
    }

    /// Every settled link with its full key path, depth first in child order.
    pub fn iter_links(&self) -> Vec<(Vec<String>, &Link)> {
        fn walk<'a>(node: &'a LinkNode, prefix: &mut Vec<String>, out: &mut Vec<(Vec<String>, &'a Link)>) {
            for (key, entry) in &node.children {
                prefix.push(key.clone());
                match entry {
                    Entry::Link(link) => out.push((prefix.clone(), link)),
                    Entry::Node(child) => walk(child, prefix, out),
                }
                prefix.pop();
            }
        }

        let mut out = Vec::new();
        walk(self, &mut Vec::new(), &mut out);
        out
    }

    /// Render the settled tree as an indented outline, one key per line.
    pub fn outline(&self) -> String {
        fn walk(node: &LinkNode, depth: usize, out: &mut String) {
            for (key, entry) in &node.children {
                let indent = "  ".repeat(depth);
                match entry {
                    Entry::Node(child) => {
                        out.push_str(&format!("{}{}/\n", indent, key));
                        walk(child, depth + 1, out);
                    }
                    Entry::Link(link) => {
                        out.push_str(&format!("{}{}  {} {}\n", indent, key, link.action, link.url));
                    }
                }
            }
            for (key, link) in &node.links {
                let indent = "  ".repeat(depth);
                out.push_str(&format!("{}{}  {} {} (pending)\n", indent, key, link.action, link.url));
            }
        }

        let mut out = String::new();
        walk(self, 0, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::Link;
    use crate::manifest::HttpMethod;
    use pretty_assertions::assert_eq;

    fn link(url: &str) -> Link {
        Link::new(url, url, HttpMethod::Get)
    }

    fn node_with_children(keys: &[&str]) -> LinkNode {
        let mut node = LinkNode::new();
        for key in keys {
            node.children.insert(key.to_string(), Entry::Link(link(key)));
        }
        node
    }

    #[test]
    fn free_key_is_returned_unchanged() {
        let mut node = node_with_children(&["list"]);
        assert_eq!(node.get_available_key("create"), "create");
        assert_eq!(node.get_available_key("create"), "create");
        assert!(node.key_counts.is_empty());
    }

    #[test]
    fn taken_key_gets_numbered_suffixes_in_order() {
        let mut node = node_with_children(&["create"]);
        assert_eq!(node.get_available_key("create"), "create_0");
        assert_eq!(node.get_available_key("create"), "create_1");
        assert_eq!(node.get_available_key("create"), "create_2");
    }

    #[test]
    fn counter_skips_numbers_taken_by_other_children() {
        let mut node = node_with_children(&["create", "create_0", "create_2"]);
        assert_eq!(node.get_available_key("create"), "create_1");
        assert_eq!(node.get_available_key("create"), "create_3");
        assert_eq!(node.key_counts["create"], 4);
    }

    #[test]
    fn counters_are_tracked_per_preferred_key() {
        let mut node = node_with_children(&["read", "update"]);
        assert_eq!(node.get_available_key("read"), "read_0");
        assert_eq!(node.get_available_key("update"), "update_0");
        assert_eq!(node.get_available_key("read"), "read_1");
    }

    #[test]
    fn distribute_names_repeated_leaves_in_insertion_order() {
        let mut node = LinkNode::new();
        node.links.push(("users".to_string(), link("/a/")));
        node.links.push(("users".to_string(), link("/b/")));
        node.links.push(("users".to_string(), link("/c/")));
        node.distribute_links();

        let keys: Vec<&str> = node.children.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["users", "users_0", "users_1"]);
        assert_eq!(node.children["users_0"].as_link().map(|l| l.url.as_str()), Some("/b/"));
        assert!(node.links.is_empty());
    }

    #[test]
    fn distribute_settles_nested_nodes() {
        let mut inner = LinkNode::new();
        inner.links.push(("list".to_string(), link("/users/")));
        let mut root = LinkNode::new();
        root.children.insert("users".to_string(), Entry::Node(inner));
        root.distribute_links();

        let paths: Vec<Vec<String>> = root.iter_links().into_iter().map(|(k, _)| k).collect();
        assert_eq!(paths, vec![vec!["users".to_string(), "list".to_string()]]);
    }

    #[test]
    fn outline_marks_nodes_and_links() {
        let mut inner = LinkNode::new();
        inner.children.insert("list".to_string(), Entry::Link(link("/users/")));
        let mut root = LinkNode::new();
        root.children.insert("users".to_string(), Entry::Node(inner));

        assert_eq!(root.outline(), "users/\n  list  GET /users/\n");
    }
}
