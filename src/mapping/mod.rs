pub mod hashed_mapping;

/// Child edge storage for a node: a mapping from an edge label to the child reached through it.
pub trait NodeMapping<E, N> {
    fn add_child(&mut self, key: E, node: N);
    fn seek_child(&self, key: &E) -> Option<&N>;
    fn seek_child_mut(&mut self, key: &E) -> Option<&mut N>;
    fn delete_child(&mut self, key: &E) -> Option<N>;
    fn num_children(&self) -> usize;
}
