use std::fmt::{self, Debug};
use std::hash::BuildHasher;

use fnv::FnvBuildHasher;
use log::warn;

use crate::error::Result;
use crate::iter::{Iter, Keys, PrefixesOf, Successors, Values};
use crate::keys::KeySequence;
use crate::stats::{TrieStats, TrieStatsTrait};
use crate::tree::Trie;

/// A map from sequence-valued keys to values of type `V`.
///
/// `set` on an existing key replaces the value and hands back the previous one.
pub struct TrieDict<K, V, S = FnvBuildHasher>
where
    K: KeySequence,
{
    trie: Trie<K, V, S>,
}

impl<K, V, S> Default for TrieDict<K, V, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::empty()
    }
}

impl<K, V, S> Clone for TrieDict<K, V, S>
where
    K: KeySequence,
    V: Clone,
    S: BuildHasher + Default,
{
    fn clone(&self) -> Self {
        Self {
            trie: self.trie.clone(),
        }
    }
}

impl<K, V, S> TrieDict<K, V, S>
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

    /// Store `value` under `key` (generic version).
    ///
    /// # Returns
    ///
    /// - `Ok(Some(previous))` if the key was already present
    /// - `Ok(None)` if the key is new
    /// - `Err(TrieError::InvalidKey)` if the key is malformed
    #[inline]
    pub fn set<KV>(&mut self, key: KV, value: V) -> Result<Option<V>>
    where
        KV: Into<K>,
    {
        self.set_k(&key.into(), value)
    }

    #[inline]
    pub fn set_k(&mut self, key: &K, value: V) -> Result<Option<V>> {
        self.trie.insert(key, value)
    }

    /// Same as [`TrieDict::set`].
    #[inline]
    pub fn insert<KV>(&mut self, key: KV, value: V) -> Result<Option<V>>
    where
        KV: Into<K>,
    {
        self.set(key, value)
    }

    #[inline]
    pub fn get<KV>(&self, key: KV) -> Result<&V>
    where
        KV: Into<K>,
    {
        self.get_k(&key.into())
    }

    #[inline]
    pub fn get_k(&self, key: &K) -> Result<&V> {
        self.trie.get(key)
    }

    #[inline]
    pub fn get_mut<KV>(&mut self, key: KV) -> Result<&mut V>
    where
        KV: Into<K>,
    {
        self.get_mut_k(&key.into())
    }

    #[inline]
    pub fn get_mut_k(&mut self, key: &K) -> Result<&mut V> {
        self.trie.get_mut(key)
    }

    /// Remove `key`, returning its value.
    #[inline]
    pub fn remove<KV>(&mut self, key: KV) -> Result<V>
    where
        KV: Into<K>,
    {
        self.remove_k(&key.into())
    }

    #[inline]
    pub fn remove_k(&mut self, key: &K) -> Result<V> {
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

    pub fn iter(&self) -> Iter<'_, K, V, S> {
        self.trie.iter()
    }

    pub fn keys(&self) -> Keys<'_, K, V, S> {
        self.trie.keys()
    }

    pub fn values(&self) -> Values<'_, K, V, S> {
        self.trie.values()
    }

    pub fn keys_with_prefix(&self, prefix: &K) -> Keys<'_, K, V, S> {
        self.trie.keys_with_prefix(prefix)
    }

    pub fn items_with_prefix(&self, prefix: &K) -> Iter<'_, K, V, S> {
        self.trie.iter_with_prefix(prefix)
    }

    pub fn longest_prefix_of(&self, key: &K) -> Result<(K, &V)> {
        self.trie.longest_prefix_of(key)
    }

    pub fn all_prefixes_of<'a, 'k>(&'a self, key: &'k K) -> PrefixesOf<'a, 'k, K, V, S> {
        self.trie.all_prefixes_of(key)
    }

    pub fn has_extension_of(&self, prefix: &K) -> bool {
        self.trie.has_extension_of(prefix)
    }

    pub fn successors(&self, prefix: &K) -> Result<Successors<'_, K, V, S>> {
        self.trie.successors(prefix)
    }

    pub fn suffixes(&self, prefix: &K, members_only: bool) -> Result<Keys<'_, K, V, S>> {
        self.trie.suffixes(prefix, members_only)
    }

    pub fn extensions(&self, prefix: &K, members_only: bool) -> Result<Keys<'_, K, V, S>> {
        self.trie.extensions(prefix, members_only)
    }

    pub fn maximal_suffix(&self, prefix: &K) -> Result<K> {
        self.trie.maximal_suffix(prefix)
    }

    pub fn maximal_extension(&self, prefix: &K) -> Result<K> {
        self.trie.maximal_extension(prefix)
    }
}

impl<K, V, S> PartialEq for TrieDict<K, V, S>
where
    K: KeySequence,
    V: PartialEq,
    S: BuildHasher + Default,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get_k(&key).is_ok_and(|v| v == value))
    }
}

impl<K, V, S> Eq for TrieDict<K, V, S>
where
    K: KeySequence,
    V: Eq,
    S: BuildHasher + Default,
{
}

/// Pairs whose key is malformed are skipped with a warning.
impl<K, V, S> Extend<(K, V)> for TrieDict<K, V, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            if let Err(e) = self.set_k(&key, value) {
                warn!("skipping key: {}", e);
            }
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for TrieDict<K, V, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Self::empty();
        dict.extend(iter);
        dict
    }
}

impl<'a, K, V, S> IntoIterator for &'a TrieDict<K, V, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
    type Item = (K, &'a V);
    type IntoIter = Iter<'a, K, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> Debug for TrieDict<K, V, S>
where
    K: KeySequence + Debug,
    V: Debug,
    S: BuildHasher + Default,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> TrieStatsTrait for TrieDict<K, V, S>
where
    K: KeySequence,
    S: BuildHasher + Default,
{
    fn get_trie_stats(&self) -> TrieStats {
        self.trie.get_trie_stats()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::{thread_rng, Rng};

    use crate::dict::TrieDict;
    use crate::error::TrieError;
    use crate::stats::TrieStatsTrait;

    fn s(v: &str) -> String {
        v.to_string()
    }

    #[test]
    fn test_set_get_remove() {
        let mut d = TrieDict::<String, i32>::empty();
        assert_eq!(d.set("apple", 1), Ok(None));
        assert_eq!(d.set("apricot", 2), Ok(None));
        assert_eq!(d.set("apple", 3), Ok(Some(1)));
        assert_eq!(d.get("apple"), Ok(&3));
        assert_eq!(d.get("ap"), Err(TrieError::KeyNotFound));
        assert_eq!(d.size(), 2);

        *d.get_mut("apricot").unwrap() += 10;
        assert_eq!(d.get("apricot"), Ok(&12));

        let mut found: Vec<(String, i32)> = d
            .items_with_prefix(&s("ap"))
            .map(|(k, v)| (k, *v))
            .collect();
        found.sort();
        assert_eq!(found, vec![(s("apple"), 3), (s("apricot"), 12)]);

        assert_eq!(d.remove("apple"), Ok(3));
        assert_eq!(d.remove("apple"), Err(TrieError::KeyNotFound));
        assert!(!d.contains("apple"));
        assert!(d.contains("apricot"));
        assert_eq!(d.len(), 1);
        assert_eq!(d.get_trie_stats().num_dead_leaves, 0);
    }

    #[test]
    fn test_prefix_lookups() {
        let d: TrieDict<Vec<u8>, &str> = [
            (b"/usr".to_vec(), "usr"),
            (b"/usr/local".to_vec(), "local"),
            (b"/usr/local/bin".to_vec(), "bin"),
        ]
        .into_iter()
        .collect();

        let path = b"/usr/local/share".to_vec();
        assert_eq!(d.longest_prefix_of(&path), Ok((b"/usr/local".to_vec(), &"local")));
        let all: Vec<&str> = d.all_prefixes_of(&path).map(|(_, v)| *v).collect();
        assert_eq!(all, vec!["usr", "local"]);
        assert_eq!(
            d.longest_prefix_of(&b"/opt".to_vec()),
            Err(TrieError::NoMatch)
        );
        assert!(d.has_extension_of(&b"/usr/lo".to_vec()));
        assert_eq!(
            d.successors(&b"/usr/local".to_vec()).unwrap().collect::<Vec<_>>(),
            vec![b"/usr/local/".to_vec()]
        );
        assert_eq!(d.keys_with_prefix(&b"/usr/local".to_vec()).count(), 2);
    }

    #[test]
    fn test_extension_queries() {
        let d: TrieDict<String, usize> = ["abc", "aac", "adc", "adce"]
            .into_iter()
            .enumerate()
            .map(|(i, k)| (s(k), i))
            .collect();

        let mut suffixes: Vec<String> = d.suffixes(&s("ad"), true).unwrap().collect();
        suffixes.sort();
        assert_eq!(suffixes, vec![s("c"), s("ce")]);

        let mut extensions: Vec<String> = d.extensions(&s("ad"), false).unwrap().collect();
        extensions.sort();
        assert_eq!(extensions, vec![s("ad"), s("adc"), s("adce")]);

        assert_eq!(d.maximal_suffix(&s("a")), Ok(s("dce")));
        assert_eq!(d.maximal_extension(&s("ab")), Ok(s("abc")));
        assert_eq!(d.maximal_extension(&s("adce")), Ok(s("adce")));
        assert!(d.suffixes(&s("x"), true).is_err());
        assert_eq!(d.maximal_suffix(&s("x")), Err(TrieError::KeyNotFound));
    }

    #[test]
    fn test_eq_debug_and_iteration() {
        let mut a = TrieDict::<String, u32>::new();
        let mut b = TrieDict::<String, u32>::new();
        a.set("x", 1).unwrap();
        a.set("xy", 2).unwrap();
        b.set("xy", 2).unwrap();
        b.set("x", 1).unwrap();
        assert_eq!(a, b);
        b.set("x", 5).unwrap();
        assert_ne!(a, b);

        assert_eq!(a.values().sum::<u32>(), 3);
        let mut keys: Vec<String> = a.keys().collect();
        keys.sort();
        assert_eq!(keys, vec![s("x"), s("xy")]);
        assert_eq!((&a).into_iter().count(), 2);

        let mut one = TrieDict::<String, u32>::new();
        one.set("k", 7).unwrap();
        assert_eq!(format!("{:?}", one), r#"{"k": 7}"#);

        a.clear();
        assert!(a.is_empty());
        assert_eq!(a.get_trie_stats().num_nodes, 1);
    }

    #[test]
    fn test_random_against_hashmap() {
        let mut d = TrieDict::<Vec<u8>, u32>::new();
        let mut oracle = HashMap::new();
        let mut rng = thread_rng();
        for i in 0..20_000 {
            let len = rng.gen_range(0..6);
            let key: Vec<u8> = (0..len).map(|_| rng.gen_range(0..4)).collect();
            match rng.gen_range(0..3) {
                0 | 1 => assert_eq!(d.set_k(&key, i), Ok(oracle.insert(key, i))),
                _ => assert_eq!(
                    d.remove_k(&key),
                    oracle.remove(&key).ok_or(TrieError::KeyNotFound)
                ),
            }
        }
        assert_eq!(d.len(), oracle.len());
        for (key, value) in &d {
            assert_eq!(oracle.get(&key), Some(value));
        }
        let stats = d.get_trie_stats();
        assert_eq!(stats.num_dead_leaves, 0);
        assert_eq!(stats.num_terminals, oracle.len());
    }
}
