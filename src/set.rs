use std::fmt::{self, Debug};
use std::hash::BuildHasher;

use fnv::FnvBuildHasher;
use log::warn;

use crate::error::Result;
use crate::iter::{Keys, PrefixKeysOf, Successors};
use crate::keys::KeySequence;
use crate::stats::{TrieStats, TrieStatsTrait};
use crate::tree::Trie;

/// A set of sequence-valued keys with fast prefix and extension queries.
///
/// Keys have no ordering; enumeration order is unspecified.
///
/// ```rust
/// use seqtrie::TrieSet;
///
/// let mut set = TrieSet::<String>::empty();
/// for word in ["car", "cart", "carton", "dog"] {
///     set.add(word).unwrap();
/// }
/// assert_eq!(set.size(), 4);
/// assert!(!set.contains("ca"));
///
/// let mut found: Vec<String> = set.keys_with_prefix(&"car".to_string()).collect();
/// found.sort();
/// assert_eq!(found, vec!["car", "cart", "carton"]);
/// ```
pub struct TrieSet<K, S = FnvBuildHasher>
where
    K: KeySequence,
{
    trie: Trie<K, (), S>,
}

impl<K, S> Default for TrieSet<K, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::empty()
    }
}

impl<K, S> Clone for TrieSet<K, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
    fn clone(&self) -> Self {
        Self {
            trie: self.trie.clone(),
        }
    }
}

impl<K, S> TrieSet<K, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
    pub fn empty() -> Self {
        Self { trie: Trie::new() }
    }

    pub fn new() -> Self {
        Self::empty()
    }

    /// Add a key (generic version). Returns true if the key was not already present.
    #[inline]
    pub fn add<KV>(&mut self, key: KV) -> Result<bool>
    where
        KV: Into<K>,
    {
        self.add_k(&key.into())
    }

    /// Add a key by reference (direct version).
    #[inline]
    pub fn add_k(&mut self, key: &K) -> Result<bool> {
        Ok(self.trie.insert(key, ())?.is_none())
    }

    /// Remove a key; fails with `TrieError::KeyNotFound` if it is not present.
    #[inline]
    pub fn remove<KV>(&mut self, key: KV) -> Result<()>
    where
        KV: Into<K>,
    {
        self.remove_k(&key.into())
    }

    #[inline]
    pub fn remove_k(&mut self, key: &K) -> Result<()> {
        self.trie.remove(key)
    }

    #[inline]
    pub fn contains<KV>(&self, key: KV) -> bool
    where
        KV: Into<K>,
    {
        self.contains_k(&key.into())
    }

    #[inline]
    pub fn contains_k(&self, key: &K) -> bool {
        self.trie.contains(key)
    }

    pub fn len(&self) -> usize {
        self.trie.len()
    }

    pub fn size(&self) -> usize {
        self.trie.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    pub fn clear(&mut self) {
        self.trie.clear()
    }

    pub fn iter(&self) -> Keys<'_, K, (), S> {
        self.trie.keys()
    }

    /// Stored keys beginning with `prefix`; empty if there are none.
    pub fn keys_with_prefix(&self, prefix: &K) -> Keys<'_, K, (), S> {
        self.trie.keys_with_prefix(prefix)
    }

    /// The longest stored key that is a prefix of `key`.
    pub fn longest_prefix_of(&self, key: &K) -> Result<K> {
        self.trie.longest_prefix_of(key).map(|(prefix, _)| prefix)
    }

    /// Stored keys that are prefixes of `key`, shortest first.
    pub fn all_prefixes_of<'a, 'k>(&'a self, key: &'k K) -> PrefixKeysOf<'a, 'k, K, (), S> {
        PrefixKeysOf::new(self.trie.all_prefixes_of(key))
    }

    pub fn has_extension_of(&self, prefix: &K) -> bool {
        self.trie.has_extension_of(prefix)
    }

    pub fn successors(&self, prefix: &K) -> Result<Successors<'_, K, (), S>> {
        self.trie.successors(prefix)
    }

    pub fn suffixes(&self, prefix: &K, members_only: bool) -> Result<Keys<'_, K, (), S>> {
        self.trie.suffixes(prefix, members_only)
    }

    pub fn extensions(&self, prefix: &K, members_only: bool) -> Result<Keys<'_, K, (), S>> {
        self.trie.extensions(prefix, members_only)
    }

    pub fn maximal_suffix(&self, prefix: &K) -> Result<K> {
        self.trie.maximal_suffix(prefix)
    }

    pub fn maximal_extension(&self, prefix: &K) -> Result<K> {
        self.trie.maximal_extension(prefix)
    }

    pub fn union(&self, other: &Self) -> Self {
        let mut result = Self::empty();
        for key in self.iter().chain(other.iter()) {
            result.trie.insert_unchecked(&key, ());
        }
        result
    }

    pub fn intersection(&self, other: &Self) -> Self {
        let (smaller, larger) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut result = Self::empty();
        for key in smaller.iter().filter(|key| larger.contains_k(key)) {
            result.trie.insert_unchecked(&key, ());
        }
        result
    }

    pub fn difference(&self, other: &Self) -> Self {
        let mut result = Self::empty();
        for key in self.iter().filter(|key| !other.contains_k(key)) {
            result.trie.insert_unchecked(&key, ());
        }
        result
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.iter().all(|key| other.contains_k(&key))
    }

    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }
}

impl<K, S> PartialEq for TrieSet<K, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl<K, S> Eq for TrieSet<K, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
}

/// Keys that are not well formed are skipped with a warning; use [`TrieSet::add`] to observe the
/// error instead.
impl<K, S> Extend<K> for TrieSet<K, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            if let Err(e) = self.add_k(&key) {
                warn!("skipping key: {}", e);
            }
        }
    }
}

impl<K, S> FromIterator<K> for TrieSet<K, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::empty();
        set.extend(iter);
        set
    }
}

impl<'a, K, S> IntoIterator for &'a TrieSet<K, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
    type Item = K;
    type IntoIter = Keys<'a, K, (), S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, S> Debug for TrieSet<K, S>
where
    K: KeySequence + Debug,
    S: BuildHasher + Default,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K, S> TrieStatsTrait for TrieSet<K, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
    fn get_trie_stats(&self) -> TrieStats {
        self.trie.get_trie_stats()
    }
}
