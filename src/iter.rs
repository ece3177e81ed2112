//! Lazy enumerations over a trie.
//!
//! Every iterator here borrows the trie it was created from, so the trie cannot be modified while
//! an enumeration is alive. Each call that creates an iterator starts a fresh traversal; the order
//! of siblings follows the edge hash map and is unspecified.

use std::collections::hash_map;
use std::hash::BuildHasher;

use crate::keys::{extend_key, KeySequence};
use crate::node::Node;

type TrieNode<K, T, S> = Node<<K as KeySequence>::Element, T, S>;
type Children<'a, K, T, S> = hash_map::Iter<'a, <K as KeySequence>::Element, TrieNode<K, T, S>>;

/// Pre-order, depth-first walk of the subtree under a start node.
///
/// Yields `base` extended with the path to each visited node. When `members_only` is set, only
/// terminal nodes are yielded and no key is built for the others.
pub(crate) struct Walk<'a, K, T, S>
where
    K: KeySequence,
{
    base: K,
    start: Option<&'a TrieNode<K, T, S>>,
    node_iter_stack: Vec<Children<'a, K, T, S>>,
    // Pushed and popped with elements as we descend and ascend.
    path: Vec<K::Element>,
    members_only: bool,
}

impl<'a, K, T, S> Walk<'a, K, T, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
    pub(crate) fn new(base: K, start: &'a TrieNode<K, T, S>, members_only: bool) -> Self {
        Self {
            base,
            start: Some(start),
            node_iter_stack: Vec::new(),
            path: Vec::new(),
            members_only,
        }
    }

    pub(crate) fn empty() -> Self {
        Self {
            base: K::empty(),
            start: None,
            node_iter_stack: Vec::new(),
            path: Vec::new(),
            members_only: true,
        }
    }

    fn wanted(&self, node: &TrieNode<K, T, S>) -> bool {
        !self.members_only || node.is_terminal()
    }
}

impl<'a, K, T, S> Iterator for Walk<'a, K, T, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
    type Item = (K, &'a TrieNode<K, T, S>);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(start) = self.start.take() {
            self.node_iter_stack.push(start.iter());
            if self.wanted(start) {
                return Some((self.base.clone(), start));
            }
        }

        // Take the child iterator on top of the stack. If it is exhausted, pop it along with the
        // element that led to it. Otherwise descend into the next child, and yield it if wanted.
        loop {
            let last_iter = self.node_iter_stack.last_mut()?;

            let Some((element, child)) = last_iter.next() else {
                self.node_iter_stack.pop();
                self.path.pop();
                continue;
            };

            self.path.push(element.clone());
            self.node_iter_stack.push(child.iter());
            if self.wanted(child) {
                return Some((extend_key(&self.base, &self.path), child));
            }
        }
    }
}

/// Stored keys and their payloads, in depth-first order.
pub struct Iter<'a, K, T, S>
where
    K: KeySequence,
{
    walk: Walk<'a, K, T, S>,
}

impl<'a, K, T, S> Iter<'a, K, T, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
    pub(crate) fn new(walk: Walk<'a, K, T, S>) -> Self {
        debug_assert!(walk.members_only);
        Self { walk }
    }
}

impl<'a, K, T, S> Iterator for Iter<'a, K, T, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
    type Item = (K, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (key, node) = self.walk.next()?;
            if let Some(value) = node.value() {
                return Some((key, value));
            }
        }
    }
}

/// Keys in depth-first order: stored keys, or every prefix of a stored key when the walk was
/// not restricted to members.
pub struct Keys<'a, K, T, S>
where
    K: KeySequence,
{
    walk: Walk<'a, K, T, S>,
}

impl<'a, K, T, S> Keys<'a, K, T, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
    pub(crate) fn new(walk: Walk<'a, K, T, S>) -> Self {
        Self { walk }
    }
}

impl<'a, K, T, S> Iterator for Keys<'a, K, T, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.walk.next().map(|(key, _)| key)
    }
}

/// Payloads of stored keys, without rebuilding the keys.
pub struct Values<'a, K, T, S>
where
    K: KeySequence,
{
    start: Option<&'a TrieNode<K, T, S>>,
    node_iter_stack: Vec<Children<'a, K, T, S>>,
}

impl<'a, K, T, S> Values<'a, K, T, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
    pub(crate) fn new(start: &'a TrieNode<K, T, S>) -> Self {
        Self {
            start: Some(start),
            node_iter_stack: Vec::new(),
        }
    }
}

impl<'a, K, T, S> Iterator for Values<'a, K, T, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(start) = self.start.take() {
            self.node_iter_stack.push(start.iter());
            if let Some(value) = start.value() {
                return Some(value);
            }
        }
        loop {
            let last_iter = self.node_iter_stack.last_mut()?;
            let Some((_, child)) = last_iter.next() else {
                self.node_iter_stack.pop();
                continue;
            };
            self.node_iter_stack.push(child.iter());
            if let Some(value) = child.value() {
                return Some(value);
            }
        }
    }
}

/// Stored keys that are prefixes of a given key, shortest first.
pub struct PrefixesOf<'a, 'k, K, T, S>
where
    K: KeySequence + 'k,
{
    node: Option<&'a TrieNode<K, T, S>>,
    elements: K::Elements<'k>,
    prefix: K,
}

impl<'a, 'k, K, T, S> PrefixesOf<'a, 'k, K, T, S>
where
    K: KeySequence + 'k,
    S: BuildHasher + Default,
{
    pub(crate) fn new(root: &'a TrieNode<K, T, S>, key: &'k K) -> Self {
        Self {
            node: Some(root),
            elements: key.elements(),
            prefix: K::empty(),
        }
    }
}

impl<'a, 'k, K, T, S> Iterator for PrefixesOf<'a, 'k, K, T, S>
where
    K: KeySequence + 'k,
    S: BuildHasher + Default,
{
    type Item = (K, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = self.node?;
            let found = node.value().map(|value| (self.prefix.clone(), value));

            match self.elements.next() {
                Some(element) => {
                    self.node = node.seek_child(&element);
                    self.prefix.push(element);
                }
                None => self.node = None,
            }

            if found.is_some() {
                return found;
            }
        }
    }
}

/// Just the keys of [`PrefixesOf`].
pub struct PrefixKeysOf<'a, 'k, K, T, S>
where
    K: KeySequence + 'k,
{
    inner: PrefixesOf<'a, 'k, K, T, S>,
}

impl<'a, 'k, K, T, S> PrefixKeysOf<'a, 'k, K, T, S>
where
    K: KeySequence + 'k,
    S: BuildHasher + Default,
{
    pub(crate) fn new(inner: PrefixesOf<'a, 'k, K, T, S>) -> Self {
        Self { inner }
    }
}

impl<'a, 'k, K, T, S> Iterator for PrefixKeysOf<'a, 'k, K, T, S>
where
    K: KeySequence + 'k,
    S: BuildHasher + Default,
{
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }
}

/// One-element extensions of a prefix that are themselves prefixes of stored keys.
pub struct Successors<'a, K, T, S>
where
    K: KeySequence,
{
    prefix: K,
    edges: hash_map::Keys<'a, K::Element, TrieNode<K, T, S>>,
}

impl<'a, K, T, S> Successors<'a, K, T, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
    pub(crate) fn new(prefix: K, node: &'a TrieNode<K, T, S>) -> Self {
        Self {
            prefix,
            edges: node.children.keys(),
        }
    }
}

impl<'a, K, T, S> Iterator for Successors<'a, K, T, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.edges.next()?;
        let mut key = self.prefix.clone();
        key.push(element.clone());
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.edges.size_hint()
    }
}
