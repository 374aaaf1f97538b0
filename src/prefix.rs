//! Plain character prefix tree
//!
//! An unauthenticated companion to the digest-bearing structures: words
//! share per-character nodes, membership and prefix queries walk the
//! shared path, and removal prunes branches no remaining word uses.

use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct PrefixNode {
    children: BTreeMap<char, PrefixNode>,
    terminal: bool,
}

/// A set of words with shared-prefix storage
#[derive(Debug, Default)]
pub struct PrefixTree {
    root: PrefixNode,
}

impl PrefixTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a word; inserting a word already present is a no-op.
    pub fn insert(&mut self, word: &str) {
        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }
        node.terminal = true;
    }

    /// Whether `word` was inserted as a whole word
    ///
    /// A stored word's strict prefixes do not count as members.
    pub fn contains(&self, word: &str) -> bool {
        self.node(word).map_or(false, |node| node.terminal)
    }

    /// Whether any stored word starts with `prefix`
    ///
    /// A stored word counts as its own prefix.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.node(prefix).is_some()
    }

    /// Removes a word
    ///
    /// Nodes used only by the removed word are pruned; nodes shared with
    /// other words, or marking shorter stored words, stay.
    ///
    /// # Returns
    /// Whether the word was present
    pub fn remove(&mut self, word: &str) -> bool {
        let (removed, _) = remove_at(&mut self.root, word.chars());
        removed
    }

    fn node(&self, text: &str) -> Option<&PrefixNode> {
        let mut node = &self.root;
        for ch in text.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }
}

/// Clears the terminal mark at the end of `chars` and reports, per level,
/// whether the child link just walked should be pruned.
fn remove_at(node: &mut PrefixNode, mut chars: std::str::Chars<'_>) -> (bool, bool) {
    match chars.next() {
        None => {
            if !node.terminal {
                return (false, false);
            }
            node.terminal = false;
            (true, node.children.is_empty())
        }
        Some(ch) => match node.children.get_mut(&ch) {
            Some(child) => {
                let (removed, prune) = remove_at(child, chars);
                if prune {
                    node.children.remove(&ch);
                }
                (removed, removed && !node.terminal && node.children.is_empty())
            }
            None => (false, false),
        },
    }
}
