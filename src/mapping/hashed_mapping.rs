use std::collections::hash_map::{self, HashMap};
use std::hash::{BuildHasher, Hash};

use crate::mapping::NodeMapping;

/// Unordered, hash-keyed child mapping. Lookup is O(1) on average for any hashable element type;
/// the mapping does not allocate until the first child is added.
pub struct HashedMapping<E, N, S> {
    children: HashMap<E, N, S>,
}

impl<E, N, S> HashedMapping<E, N, S>
where
    E: Eq + Hash,
    S: BuildHasher + Default,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            children: HashMap::with_hasher(S::default()),
        }
    }

    /// Returns the child for `key`, creating it with `make` if absent. The flag is true when the
    /// child was created.
    #[inline]
    pub fn child_or_insert_with<F>(&mut self, key: E, make: F) -> (&mut N, bool)
    where
        F: FnOnce() -> N,
    {
        match self.children.entry(key) {
            hash_map::Entry::Occupied(o) => (o.into_mut(), false),
            hash_map::Entry::Vacant(v) => (v.insert(make()), true),
        }
    }

    #[inline]
    pub fn iter(&self) -> hash_map::Iter<'_, E, N> {
        self.children.iter()
    }

    #[inline]
    pub fn keys(&self) -> hash_map::Keys<'_, E, N> {
        self.children.keys()
    }
}

impl<E, N, S> HashedMapping<E, N, S> {
    /// Removes every child, handing ownership of each to the caller.
    pub fn drain(&mut self) -> hash_map::Drain<'_, E, N> {
        self.children.drain()
    }
}

impl<E, N, S> Default for HashedMapping<E, N, S>
where
    E: Eq + Hash,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E, N, S> NodeMapping<E, N> for HashedMapping<E, N, S>
where
    E: Eq + Hash,
    S: BuildHasher,
{
    #[inline]
    fn add_child(&mut self, key: E, node: N) {
        let replaced = self.children.insert(key, node);
        debug_assert!(replaced.is_none(), "add_child: edge already present");
    }

    #[inline]
    fn seek_child(&self, key: &E) -> Option<&N> {
        self.children.get(key)
    }

    #[inline]
    fn seek_child_mut(&mut self, key: &E) -> Option<&mut N> {
        self.children.get_mut(key)
    }

    fn delete_child(&mut self, key: &E) -> Option<N> {
        self.children.remove(key)
    }

    #[inline]
    fn num_children(&self) -> usize {
        self.children.len()
    }
}
