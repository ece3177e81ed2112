use std::hash::Hash;

use crate::keys::KeySequence;

// Sequences of arbitrary hashable tokens: bytes, words of an n-gram, vertices of a path, or a
// user enum when the tokens are heterogeneous.
impl<T> KeySequence for Vec<T>
where
    T: Eq + Hash + Clone,
{
    type Element = T;
    type Elements<'a> = std::iter::Cloned<std::slice::Iter<'a, T>> where Self: 'a;

    fn empty() -> Self {
        Vec::new()
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn elements(&self) -> Self::Elements<'_> {
        self.as_slice().iter().cloned()
    }

    fn push(&mut self, element: T) {
        Vec::push(self, element)
    }

    fn concat_key(&self, other: &Self) -> Self {
        let mut joined = Vec::with_capacity(self.len() + other.len());
        joined.extend_from_slice(self);
        joined.extend_from_slice(other);
        joined
    }

    fn split_key(&self) -> Option<(T, Self)> {
        let (head, tail) = self.as_slice().split_first()?;
        Some((head.clone(), tail.to_vec()))
    }
}

#[cfg(test)]
mod test {
    use crate::keys::KeySequence;

    #[test]
    fn make_concat_split() {
        let k = vec!["hello", "to", "the"];
        let k2 = k.concat_key(&vec!["world"]);
        assert_eq!(k2, vec!["hello", "to", "the", "world"]);
        let (head, tail) = k2.split_key().unwrap();
        assert_eq!(head, "hello");
        assert_eq!(tail, vec!["to", "the", "world"]);
    }

    #[test]
    fn identity() {
        let k: Vec<u64> = vec![42, 7, 1];
        assert_eq!(Vec::empty().concat_key(&k), k);
        assert_eq!(k.concat_key(&Vec::empty()), k);
        assert!(Vec::<u64>::empty().split_key().is_none());
    }

    #[test]
    fn slice_methods_unaffected() {
        // With the trait in scope, the usual Vec and slice methods still resolve to std.
        let words = vec![String::from("a"), String::from("b")];
        let first: Option<&String> = words.iter().next();
        assert_eq!(first, Some(&String::from("a")));
        let (head, rest): (&String, &[String]) = words.split_first().unwrap();
        assert_eq!(head, "a");
        assert_eq!(rest.len(), 1);
        assert_eq!(words.concat(), "ab");
        assert_eq!(KeySequence::elements(&words).collect::<Vec<String>>(), words);
    }
}
