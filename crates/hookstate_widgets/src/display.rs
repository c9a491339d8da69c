//! Addressable text targets
//!
//! The host side of the display-sink boundary. Elements are looked up by id
//! and may be missing at any time, so every lookup returns an `Option`.

use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex};

/// Shared display tree for handlers that write into it
pub type SharedDisplay = Arc<Mutex<DisplayTree>>;

/// A mounted text element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayNode {
    text: String,
}

impl DisplayNode {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text_content(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

/// Mounted text elements keyed by id
#[derive(Debug, Default)]
pub struct DisplayTree {
    nodes: FxHashMap<String, DisplayNode>,
}

impl DisplayTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedDisplay {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Mount an empty element; returns `false` if `id` was already mounted
    pub fn mount(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.nodes.insert(id, DisplayNode::default());
        true
    }

    /// Returns `false` if nothing was mounted at `id`
    pub fn unmount(&mut self, id: &str) -> bool {
        self.nodes.remove(id).is_some()
    }

    pub fn is_mounted(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn element(&self, id: &str) -> Option<&DisplayNode> {
        self.nodes.get(id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut DisplayNode> {
        self.nodes.get_mut(id)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.element(id).map(DisplayNode::text)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_and_write() {
        let mut tree = DisplayTree::new();
        assert!(tree.mount("countValue"));
        assert!(!tree.mount("countValue"));
        assert_eq!(tree.text("countValue"), Some(""));

        if let Some(node) = tree.element_mut("countValue") {
            node.set_text_content("3");
        }
        assert_eq!(tree.text("countValue"), Some("3"));
    }

    #[test]
    fn test_unmount_makes_element_absent() {
        let mut tree = DisplayTree::new();
        tree.mount("countValue");

        assert!(tree.unmount("countValue"));
        assert!(!tree.unmount("countValue"));
        assert!(tree.element_mut("countValue").is_none());
        assert!(tree.is_empty());
    }
}
