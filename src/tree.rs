//! The trie engine.
//!
//! [`Trie`] owns the node store and implements every operation of the set and map containers.
//! It is generic over the terminal payload: sets store `()`, maps store the mapped value, so both
//! containers share exactly the same insertion, removal and query paths.

use std::fmt::{self, Debug};
use std::hash::BuildHasher;
use std::marker::PhantomData;

use fnv::FnvBuildHasher;
use log::{debug, trace};

use crate::error::{Result, TrieError};
use crate::iter::{Iter, Keys, PrefixesOf, Successors, Values, Walk};
use crate::keys::{validate, KeySequence};
use crate::node::Node;
use crate::stats::{update_trie_stats, TrieStats, TrieStatsTrait};

/// A trie from keys of type `K` to terminal payloads of type `T`.
///
/// Every node owns its children outright, so removing an edge drops the whole subtree below it.
/// Child edges live in a hash map built with `S`, which defaults to FNV.
///
/// ```rust
/// use seqtrie::tree::Trie;
///
/// let mut trie = Trie::<String, u32>::new();
/// trie.insert(&"car".to_string(), 1).unwrap();
/// trie.insert(&"cart".to_string(), 2).unwrap();
///
/// assert_eq!(trie.get(&"car".to_string()), Ok(&1));
/// assert_eq!(trie.keys_with_prefix(&"ca".to_string()).count(), 2);
/// ```
pub struct Trie<K, T, S = FnvBuildHasher>
where
    K: KeySequence,
{
    root: Node<K::Element, T, S>,
    len: usize,
    _phantom: PhantomData<K>,
}

impl<K, T, S> Default for Trie<K, T, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T, S> Clone for Trie<K, T, S>
where
    K: KeySequence,
    T: Clone,
    S: BuildHasher + Default,
{
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            len: self.len,
            _phantom: PhantomData,
        }
    }
}

impl<K, T, S> Drop for Trie<K, T, S>
where
    K: KeySequence,
{
    fn drop(&mut self) {
        self.root.drop_children();
    }
}

impl<K, T, S> Trie<K, T, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
    /// Create a new, empty trie.
    pub fn new() -> Self {
        Self {
            root: Node::new(),
            len: 0,
            _phantom: PhantomData,
        }
    }

    /// Number of stored keys. Maintained on insert and remove, so this is O(1).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.root.drop_children();
        self.root.take_value();
        self.len = 0;
    }

    /// Stores `value` under `key`, creating one node per element not yet on the path.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(old_value))` if the key was already stored
    /// - `Ok(None)` if this was a new key
    /// - `Err(TrieError::InvalidKey)` if the key's length disagrees with its elements; the trie is
    ///   left untouched
    pub fn insert(&mut self, key: &K, value: T) -> Result<Option<T>> {
        validate(key)?;
        Ok(self.insert_unchecked(key, value))
    }

    /// Insert for keys already known to be well formed, such as keys enumerated from a trie.
    pub(crate) fn insert_unchecked(&mut self, key: &K, value: T) -> Option<T> {
        let mut cur_node = &mut self.root;
        let mut created = 0;
        for element in key.elements() {
            let (child, is_new) = cur_node.child_or_insert(element);
            if is_new {
                created += 1;
            }
            cur_node = child;
        }
        let replaced = cur_node.set_value(value);

        if replaced.is_none() {
            self.len += 1;
        }
        trace!(
            "insert: {} new nodes, replaced existing: {}",
            created,
            replaced.is_some()
        );
        replaced
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some_and(|node| node.is_terminal())
    }

    pub fn get(&self, key: &K) -> Result<&T> {
        self.find(key)
            .and_then(|node| node.value())
            .ok_or(TrieError::KeyNotFound)
    }

    pub fn get_mut(&mut self, key: &K) -> Result<&mut T> {
        self.root
            .seek_path_mut(key.elements())
            .and_then(|node| node.value_mut())
            .ok_or(TrieError::KeyNotFound)
    }

    /// Removes `key` and returns its payload, pruning every node that existed only to reach it.
    pub fn remove(&mut self, key: &K) -> Result<T> {
        // First pass: check that the key is stored, and find where the branch that leads only to
        // it begins. That is the edge leaving the deepest node on the path that is the root, is
        // terminal itself, or has another child.
        let mut cur_node = &self.root;
        let mut cut_depth = 0;
        let mut depth = 0;
        for element in key.elements() {
            if cur_node.is_terminal() || cur_node.num_children() > 1 {
                cut_depth = depth;
            }
            cur_node = cur_node
                .seek_child(&element)
                .ok_or(TrieError::KeyNotFound)?;
            depth += 1;
        }
        if !cur_node.is_terminal() {
            return Err(TrieError::KeyNotFound);
        }

        // Other keys continue below the end node, so only its payload goes.
        if depth == 0 || !cur_node.is_leaf() {
            let value = self
                .root
                .seek_path_mut(key.elements())
                .and_then(|node| node.take_value())
                .ok_or(TrieError::KeyNotFound)?;
            self.len -= 1;
            trace!("remove: cleared terminal at depth {}", depth);
            return Ok(value);
        }

        // Second pass: detach the branch at the cut, then walk the detached chain down to the
        // payload. Dropping the chain frees every pruned node.
        let mut elements = key.elements();
        let parent = self
            .root
            .seek_path_mut(elements.by_ref().take(cut_depth))
            .ok_or(TrieError::KeyNotFound)?;
        let edge = elements.next().ok_or(TrieError::KeyNotFound)?;
        let mut branch = parent.delete_child(&edge).ok_or(TrieError::KeyNotFound)?;
        for element in elements {
            branch = branch
                .delete_child(&element)
                .ok_or(TrieError::KeyNotFound)?;
        }
        let value = branch.take_value().ok_or(TrieError::KeyNotFound)?;

        self.len -= 1;
        trace!(
            "remove: pruned {} nodes below depth {}",
            depth - cut_depth,
            cut_depth
        );
        Ok(value)
    }

    /// Iterate over every stored key and its payload.
    pub fn iter(&self) -> Iter<'_, K, T, S> {
        Iter::new(Walk::new(K::empty(), &self.root, true))
    }

    pub fn keys(&self) -> Keys<'_, K, T, S> {
        Keys::new(Walk::new(K::empty(), &self.root, true))
    }

    pub fn values(&self) -> Values<'_, K, T, S> {
        Values::new(&self.root)
    }

    /// Stored keys starting with `prefix`, including `prefix` itself if stored. Empty when no
    /// stored key starts with `prefix`.
    pub fn keys_with_prefix(&self, prefix: &K) -> Keys<'_, K, T, S> {
        match self.find(prefix) {
            Some(node) => Keys::new(Walk::new(prefix.clone(), node, true)),
            None => Keys::new(Walk::empty()),
        }
    }

    /// Like [`Trie::keys_with_prefix`], paired with payloads.
    pub fn iter_with_prefix(&self, prefix: &K) -> Iter<'_, K, T, S> {
        match self.find(prefix) {
            Some(node) => Iter::new(Walk::new(prefix.clone(), node, true)),
            None => Iter::new(Walk::empty()),
        }
    }

    /// Stored keys that are prefixes of `key` (including `key` itself), shortest first.
    pub fn all_prefixes_of<'a, 'k>(&'a self, key: &'k K) -> PrefixesOf<'a, 'k, K, T, S> {
        PrefixesOf::new(&self.root, key)
    }

    /// The longest stored key that is a prefix of `key`, or `TrieError::NoMatch`.
    pub fn longest_prefix_of(&self, key: &K) -> Result<(K, &T)> {
        self.all_prefixes_of(key).last().ok_or(TrieError::NoMatch)
    }

    /// True if `prefix` is a prefix of any stored key. The empty prefix always qualifies.
    pub fn has_extension_of(&self, prefix: &K) -> bool {
        self.find(prefix).is_some()
    }

    /// The one-element extensions of `prefix` that lead towards stored keys.
    pub fn successors(&self, prefix: &K) -> Result<Successors<'_, K, T, S>> {
        let node = self.find(prefix).ok_or(TrieError::KeyNotFound)?;
        Ok(Successors::new(prefix.clone(), node))
    }

    /// Suffixes `s` such that `prefix + s` is a stored key, or with `members_only` unset, a
    /// prefix of a stored key.
    pub fn suffixes(&self, prefix: &K, members_only: bool) -> Result<Keys<'_, K, T, S>> {
        let node = self.find(prefix).ok_or(TrieError::KeyNotFound)?;
        Ok(Keys::new(Walk::new(K::empty(), node, members_only)))
    }

    /// The keys `prefix + s` for every `s` produced by [`Trie::suffixes`].
    pub fn extensions(&self, prefix: &K, members_only: bool) -> Result<Keys<'_, K, T, S>> {
        let node = self.find(prefix).ok_or(TrieError::KeyNotFound)?;
        Ok(Keys::new(Walk::new(prefix.clone(), node, members_only)))
    }

    /// A longest suffix `s` such that `prefix + s` is stored; ties are broken arbitrarily. The
    /// empty suffix is returned when nothing is stored at or below `prefix`.
    pub fn maximal_suffix(&self, prefix: &K) -> Result<K> {
        let mut longest = (0, K::empty());
        for suffix in self.suffixes(prefix, true)? {
            let len = suffix.len();
            if len > longest.0 {
                longest = (len, suffix);
            }
        }
        Ok(longest.1)
    }

    pub fn maximal_extension(&self, prefix: &K) -> Result<K> {
        Ok(prefix.concat_key(&self.maximal_suffix(prefix)?))
    }

    fn find(&self, key: &K) -> Option<&Node<K::Element, T, S>> {
        self.root.seek_path(key.elements())
    }
}

impl<K, T, S> Trie<K, T, S>
where
    K: KeySequence,
    K::Element: Debug,
    S: BuildHasher + Default,
{
    /// Dumps the node structure to the `debug` log, one line per node.
    pub fn print_tree(&self) {
        let mut stack = vec![(0, None, &self.root)];
        while let Some((depth, element, node)) = stack.pop() {
            let indent = "  ".repeat(depth);
            debug!(
                "{}({:?}) terminal: {}, {} #children",
                indent,
                element,
                node.is_terminal(),
                node.num_children()
            );
            for (element, child) in node.iter() {
                stack.push((depth + 1, Some(element), child));
            }
        }
    }
}

impl<K, T, S> TrieStatsTrait for Trie<K, T, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
    fn get_trie_stats(&self) -> TrieStats {
        let mut stats = TrieStats::default();
        let mut stack = vec![(&self.root, 0)];
        while let Some((node, depth)) = stack.pop() {
            update_trie_stats(
                &mut stats,
                node.num_children(),
                node.is_terminal(),
                depth == 0,
                depth,
            );
            for (_, child) in node.iter() {
                stack.push((child, depth + 1));
            }
        }
        stats
    }
}

impl<K, T, S> Debug for Trie<K, T, S>
where
    K: KeySequence + Debug,
    T: Debug,
    S: BuildHasher + Default,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
