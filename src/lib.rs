//! Tries over arbitrary element sequences.
//!
//! A key is any [`KeySequence`]: a `String` is a sequence of `char`s, a `Vec<T>` a sequence of
//! `T`s. [`TrieSet`] and [`TrieDict`] are thin containers over the shared [`Trie`] engine, which
//! answers the usual membership queries plus prefix ones: every stored key with a given prefix,
//! and every stored key that is a prefix of a given key.
//!
//! ```rust
//! use seqtrie::TrieDict;
//!
//! let mut routes = TrieDict::<Vec<&str>, u32>::new();
//! routes.set(vec!["api", "v1"], 1).unwrap();
//! routes.set(vec!["api", "v1", "users"], 2).unwrap();
//!
//! let (matched, id) = routes
//!     .longest_prefix_of(&vec!["api", "v1", "users", "42"])
//!     .unwrap();
//! assert_eq!(matched, vec!["api", "v1", "users"]);
//! assert_eq!(*id, 2);
//! ```

mod node;

pub mod dict;
pub mod error;
pub mod iter;
pub mod keys;
pub mod mapping;
pub mod set;
pub mod stats;
pub mod tree;

pub use crate::dict::TrieDict;
pub use crate::error::{Result, TrieError};
pub use crate::keys::KeySequence;
pub use crate::set::TrieSet;
pub use crate::stats::{TrieStats, TrieStatsTrait};
pub use crate::tree::Trie;
