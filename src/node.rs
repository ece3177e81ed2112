use std::collections::hash_map;
use std::hash::{BuildHasher, Hash};

use crate::mapping::hashed_mapping::HashedMapping;
use crate::mapping::NodeMapping;

/// A trie node: the edges to its children plus the terminal payload.
///
/// `value` is `Some` exactly when a stored key ends at this node. Sets store `()` there, maps
/// store the mapped value. A node with no children and no value is dead and must not remain
/// reachable once an operation completes.
pub(crate) struct Node<E, T, S> {
    pub(crate) children: HashedMapping<E, Node<E, T, S>, S>,
    pub(crate) value: Option<T>,
}

impl<E, T, S> Node<E, T, S>
where
    E: Eq + Hash,
    S: BuildHasher + Default,
{
    #[inline]
    pub(crate) fn new() -> Self {
        Self::with_value(None)
    }

    #[inline]
    fn with_value(value: Option<T>) -> Self {
        Self {
            children: HashedMapping::new(),
            value,
        }
    }

    #[cfg(test)]
    pub(crate) fn new_terminal(value: T) -> Self {
        Self {
            children: HashedMapping::new(),
            value: Some(value),
        }
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn value_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    /// Marks the node terminal, returning the payload it replaced.
    pub fn set_value(&mut self, value: T) -> Option<T> {
        self.value.replace(value)
    }

    pub fn take_value(&mut self) -> Option<T> {
        self.value.take()
    }

    pub fn is_terminal(&self) -> bool {
        self.value.is_some()
    }

    pub fn num_children(&self) -> usize {
        self.children.num_children()
    }

    pub fn is_leaf(&self) -> bool {
        self.num_children() == 0
    }

    /// True for a childless, non-terminal node; such a node only exists transiently during
    /// removal, before it is pruned.
    #[cfg(test)]
    pub fn is_dead(&self) -> bool {
        self.is_leaf() && !self.is_terminal()
    }

    #[inline]
    pub(crate) fn seek_child(&self, key: &E) -> Option<&Self> {
        self.children.seek_child(key)
    }

    #[inline]
    pub(crate) fn seek_child_mut(&mut self, key: &E) -> Option<&mut Self> {
        self.children.seek_child_mut(key)
    }

    /// Follows the edge for `key`, creating an empty child if there is none.
    #[inline]
    pub(crate) fn child_or_insert(&mut self, key: E) -> (&mut Self, bool) {
        self.children.child_or_insert_with(key, Node::new)
    }

    #[cfg(test)]
    pub(crate) fn add_child(&mut self, key: E, node: Self) {
        self.children.add_child(key, node)
    }

    /// Removes the edge for `key` together with the subtree it owns.
    pub(crate) fn delete_child(&mut self, key: &E) -> Option<Self> {
        self.children.delete_child(key)
    }

    /// Follows a path of edges from this node.
    pub(crate) fn seek_path<I>(&self, path: I) -> Option<&Self>
    where
        I: IntoIterator<Item = E>,
    {
        let mut cur_node = self;
        for element in path {
            cur_node = cur_node.seek_child(&element)?;
        }
        Some(cur_node)
    }

    pub(crate) fn seek_path_mut<I>(&mut self, path: I) -> Option<&mut Self>
    where
        I: IntoIterator<Item = E>,
    {
        let mut cur_node = self;
        for element in path {
            cur_node = cur_node.seek_child_mut(&element)?;
        }
        Some(cur_node)
    }

    pub(crate) fn iter(&self) -> hash_map::Iter<'_, E, Self> {
        self.children.iter()
    }
}

impl<E, T, S> Clone for Node<E, T, S>
where
    E: Eq + Hash + Clone,
    T: Clone,
    S: BuildHasher + Default,
{
    /// Copies the subtree depth-first with an explicit stack. A child is attached to its parent's
    /// copy once all of its own children have been copied.
    fn clone(&self) -> Self {
        let mut root = Self::with_value(self.value.clone());
        let mut root_children = self.iter();
        let mut stack: Vec<(E, hash_map::Iter<'_, E, Self>, Self)> = Vec::new();
        loop {
            let next = match stack.last_mut() {
                Some((_, children, _)) => children.next(),
                None => root_children.next(),
            };
            if let Some((element, child)) = next {
                stack.push((
                    element.clone(),
                    child.iter(),
                    Self::with_value(child.value.clone()),
                ));
                continue;
            }
            let Some((element, _, copy)) = stack.pop() else {
                return root;
            };
            match stack.last_mut() {
                Some((_, _, parent)) => parent.children.add_child(element, copy),
                None => root.children.add_child(element, copy),
            }
        }
    }
}

impl<E, T, S> Node<E, T, S> {
    /// Drops the subtree below this node one node at a time, so deep paths cannot overflow the
    /// stack the way the recursive drop of nested maps would.
    pub(crate) fn drop_children(&mut self) {
        let mut stack: Vec<Self> = self.children.drain().map(|(_, child)| child).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.drain().map(|(_, child)| child));
        }
    }
}

#[cfg(test)]
mod tests {
    use fnv::FnvBuildHasher;

    use crate::node::Node;

    type CharNode = Node<char, i32, FnvBuildHasher>;

    #[test]
    fn test_children() {
        let mut n = CharNode::new();
        assert!(n.is_dead());
        n.add_child('d', CharNode::new_terminal(1));
        n.add_child('c', CharNode::new_terminal(2));
        n.add_child('b', CharNode::new_terminal(3));
        n.add_child('a', CharNode::new_terminal(4));
        assert!(!n.is_leaf());
        assert!(!n.is_terminal());
        assert_eq!(n.num_children(), 4);

        assert_eq!(*n.seek_child(&'d').unwrap().value().unwrap(), 1);
        assert_eq!(*n.seek_child(&'c').unwrap().value().unwrap(), 2);
        assert_eq!(*n.seek_child(&'b').unwrap().value().unwrap(), 3);
        assert_eq!(*n.seek_child(&'a').unwrap().value().unwrap(), 4);

        n.delete_child(&'d');
        assert!(n.seek_child(&'d').is_none());
        assert_eq!(*n.seek_child(&'c').unwrap().value().unwrap(), 2);
        assert_eq!(n.num_children(), 3);
    }

    #[test]
    fn test_child_or_insert() {
        let mut n = CharNode::new();
        let (child, created) = n.child_or_insert('x');
        assert!(created);
        assert!(child.is_dead());
        child.set_value(10);
        let (child, created) = n.child_or_insert('x');
        assert!(!created);
        assert_eq!(child.value(), Some(&10));
        assert_eq!(child.set_value(11), Some(10));
        *n.seek_child_mut(&'x').unwrap().value_mut().unwrap() += 1;
        assert_eq!(n.seek_child(&'x').unwrap().value(), Some(&12));
    }

    #[test]
    fn test_seek_path_and_subtree_removal() {
        let mut n = CharNode::new();
        let mut cur = &mut n;
        for c in "abc".chars() {
            cur = cur.child_or_insert(c).0;
        }
        cur.set_value(3);

        assert_eq!(n.seek_path("abc".chars()).unwrap().value(), Some(&3));
        assert!(n.seek_path("ab".chars()).unwrap().value().is_none());
        assert!(n.seek_path("abd".chars()).is_none());
        assert!(std::ptr::eq(n.seek_path("".chars()).unwrap(), &n));

        // Dropping the edge drops the whole subtree.
        let removed = n.delete_child(&'a').unwrap();
        assert_eq!(removed.seek_path("bc".chars()).unwrap().value(), Some(&3));
        assert!(n.is_dead());
    }

    #[test]
    fn test_drop_children() {
        let mut n = CharNode::new_terminal(0);
        for c in "xyz".chars() {
            n.child_or_insert(c).0.child_or_insert('!').0.set_value(1);
        }
        n.drop_children();
        assert!(n.is_leaf());
        assert_eq!(n.value(), Some(&0));
    }

    #[test]
    fn test_clone_is_deep() {
        let mut n = CharNode::new_terminal(0);
        for word in ["ab", "abc", "b"] {
            let mut cur = &mut n;
            for c in word.chars() {
                cur = cur.child_or_insert(c).0;
            }
            cur.set_value(word.len() as i32);
        }
        let mut copy = n.clone();
        assert_eq!(copy.value(), Some(&0));
        assert_eq!(copy.seek_path("abc".chars()).unwrap().value(), Some(&3));
        assert_eq!(copy.seek_path("ab".chars()).unwrap().value(), Some(&2));
        assert_eq!(copy.seek_path("b".chars()).unwrap().value(), Some(&1));
        assert!(copy.seek_path("a".chars()).unwrap().value().is_none());
        assert_eq!(copy.num_children(), 2);

        // The copy owns its own nodes.
        copy.seek_path_mut("abc".chars()).unwrap().set_value(30);
        copy.delete_child(&'b');
        assert_eq!(n.seek_path("abc".chars()).unwrap().value(), Some(&3));
        assert!(n.seek_child(&'b').is_some());
    }
}
