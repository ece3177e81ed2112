use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrieError {
    #[error("key not found")]
    KeyNotFound,
    #[error("no stored key is a prefix of the given key")]
    NoMatch,
    #[error("invalid key: reports {reported} elements but yields {actual}")]
    InvalidKey { reported: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, TrieError>;
