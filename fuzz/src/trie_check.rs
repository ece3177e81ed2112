#![no_main]

use std::collections::HashMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use seqtrie::{TrieDict, TrieError, TrieSet, TrieStatsTrait};

#[derive(Arbitrary, Debug)]
enum MapMethod {
    Get { key: Vec<u8> },
    Set { key: Vec<u8>, val: u16 },
    Update { key: Vec<u8>, val: u16 },
    Delete { key: Vec<u8> },
    Prefix { prefix: Vec<u8> },
    LongestPrefix { key: Vec<u8> },
}

// Keys drawn from a tiny alphabet so paths actually share prefixes.
fn narrow(key: &[u8]) -> Vec<u8> {
    key.iter().take(8).map(|b| b % 4).collect()
}

fuzz_target!(|methods: Vec<MapMethod>| {
    let mut dict = TrieDict::<Vec<u8>, u16>::new();
    let mut set = TrieSet::<Vec<u8>>::new();
    let mut oracle = HashMap::<Vec<u8>, u16>::new();

    for m in methods {
        match m {
            MapMethod::Get { key } => {
                let key = narrow(&key);
                assert_eq!(dict.get_k(&key).ok(), oracle.get(&key));
                assert_eq!(set.contains_k(&key), oracle.contains_key(&key));
            }
            MapMethod::Set { key, val } => {
                let key = narrow(&key);
                let expected = oracle.insert(key.clone(), val);
                assert_eq!(dict.set_k(&key, val), Ok(expected));
                assert_eq!(set.add_k(&key), Ok(expected.is_none()));
            }
            MapMethod::Update { key, val } => {
                let key = narrow(&key);
                let old_oracle = oracle.get_mut(&key);
                let old_dict = dict.get_mut_k(&key).ok();
                assert_eq!(old_dict, old_oracle);
                if let (Some(d), Some(o)) = (old_dict, old_oracle) {
                    *d = val;
                    *o = val;
                }
                assert_eq!(dict.get_k(&key).ok(), oracle.get(&key));
            }
            MapMethod::Delete { key } => {
                let key = narrow(&key);
                let expected = oracle.remove(&key);
                assert_eq!(
                    dict.remove_k(&key),
                    expected.ok_or(TrieError::KeyNotFound)
                );
                assert_eq!(set.remove_k(&key).is_ok(), expected.is_some());
            }
            MapMethod::Prefix { prefix } => {
                let prefix = narrow(&prefix);
                let found = set.keys_with_prefix(&prefix).count();
                let expected = oracle.keys().filter(|k| k.starts_with(&prefix)).count();
                assert_eq!(found, expected);
            }
            MapMethod::LongestPrefix { key } => {
                let key = narrow(&key);
                let expected = (0..=key.len())
                    .rev()
                    .find(|&n| oracle.contains_key(&key[..n]))
                    .map(|n| key[..n].to_vec());
                assert_eq!(set.longest_prefix_of(&key).ok(), expected);
            }
        }
        assert_eq!(dict.len(), oracle.len());
        assert_eq!(set.len(), oracle.len());
    }

    for stats in [dict.get_trie_stats(), set.get_trie_stats()] {
        assert_eq!(stats.num_dead_leaves, 0, "dead nodes left behind: {:?}", stats);
        assert_eq!(stats.num_terminals, oracle.len());
    }
    for (k, v) in oracle.iter() {
        assert_eq!(dict.get_k(k), Ok(v));
    }
});
