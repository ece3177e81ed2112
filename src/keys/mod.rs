use std::hash::Hash;

use crate::error::{Result, TrieError};

pub mod string_key;
pub mod vector_key;

/// A finite, ordered sequence of hashable elements that can be used as a trie key.
///
/// The trie never looks at a key as a whole; it only walks its elements one at a time and
/// rebuilds keys by appending elements to a prefix. Implementations must uphold:
///
/// - `K::empty()` has `len() == 0` and yields no elements.
/// - `empty().concat_key(k) == k.concat_key(&empty()) == k` for every key `k`.
/// - `elements()` yields exactly `len()` elements, and building a key by pushing those elements onto
///   `empty()` reproduces the original key.
///
/// A key whose `len()` disagrees with its `elements()` is rejected with [`TrieError::InvalidKey`]
/// before the trie is modified.
pub trait KeySequence: Clone {
    /// The edge label type.
    type Element: Eq + Hash + Clone;

    type Elements<'a>: Iterator<Item = Self::Element>
    where
        Self: 'a;

    /// Returns the identity key, the sequence with no elements.
    fn empty() -> Self;

    /// Returns the number of elements in the key.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the elements of the key, in order.
    fn elements(&self) -> Self::Elements<'_>;

    /// Appends a single element to the end of the key.
    fn push(&mut self, element: Self::Element);

    /// Returns `self` followed by `other`.
    fn concat_key(&self, other: &Self) -> Self {
        let mut joined = self.clone();
        for element in other.elements() {
            joined.push(element);
        }
        joined
    }

    /// Splits the key into its first element and the remainder, or `None` for the empty key.
    fn split_key(&self) -> Option<(Self::Element, Self)> {
        let mut elements = self.elements();
        let head = elements.next()?;
        let mut tail = Self::empty();
        for element in elements {
            tail.push(element);
        }
        Some((head, tail))
    }
}

/// Splits a key that is required to be non-empty.
pub fn split_head<K: KeySequence>(key: &K) -> Result<(K::Element, K)> {
    key.split_key().ok_or(TrieError::InvalidKey {
        reported: key.len(),
        actual: 0,
    })
}

/// Checks that `len()` agrees with the elements the key actually yields.
pub(crate) fn validate<K: KeySequence>(key: &K) -> Result<()> {
    let reported = key.len();
    let actual = key.elements().count();
    if reported != actual || key.is_empty() != (actual == 0) {
        return Err(TrieError::InvalidKey { reported, actual });
    }
    Ok(())
}

/// Builds a key from a prefix followed by a path of elements.
pub(crate) fn extend_key<K: KeySequence>(prefix: &K, path: &[K::Element]) -> K {
    let mut key = prefix.clone();
    for element in path {
        key.push(element.clone());
    }
    key
}

#[cfg(test)]
mod tests {
    use crate::error::TrieError;
    use crate::keys::{split_head, validate, KeySequence};

    // Reports one more element than it yields.
    #[derive(Clone)]
    struct LyingKey(Vec<u8>);

    impl KeySequence for LyingKey {
        type Element = u8;
        type Elements<'a> = std::iter::Copied<std::slice::Iter<'a, u8>>;

        fn empty() -> Self {
            LyingKey(vec![])
        }

        fn len(&self) -> usize {
            self.0.len() + 1
        }

        fn elements(&self) -> Self::Elements<'_> {
            self.0.iter().copied()
        }

        fn push(&mut self, element: u8) {
            self.0.push(element)
        }
    }

    #[test]
    fn test_split_head_of_empty_is_invalid() {
        assert_eq!(
            split_head(&String::empty()),
            Err(TrieError::InvalidKey {
                reported: 0,
                actual: 0
            })
        );
        let (head, tail) = split_head(&"abc".to_string()).unwrap();
        assert_eq!(head, 'a');
        assert_eq!(tail, "bc");
    }

    #[test]
    fn test_validate_rejects_inconsistent_keys() {
        assert!(validate(&"hello".to_string()).is_ok());
        assert!(validate(&Vec::<u32>::empty()).is_ok());
        assert_eq!(
            validate(&LyingKey(vec![1, 2])),
            Err(TrieError::InvalidKey {
                reported: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_default_concat_and_split() {
        let k = LyingKey(vec![1, 2]).concat_key(&LyingKey(vec![3]));
        assert_eq!(k.0, vec![1, 2, 3]);
        let (head, tail) = k.split_key().unwrap();
        assert_eq!(head, 1);
        assert_eq!(tail.0, vec![2, 3]);
        assert!(LyingKey::empty().split_key().is_none());
    }
}
