//! Data source trait for recycled lists.
//!
//! The engine itself only needs the item count (carried in
//! [`LayoutPassState`](crate::LayoutPassState)); hosts use the rest of the
//! [`Adapter`] surface to create, type and bind views in their
//! [`Recycler`](crate::Recycler) implementation.

use crate::view::ViewType;

/// Provides what a host needs to know about the items it realizes.
pub trait Adapter {
    /// Total number of items (visible or not).
    fn item_count(&self) -> usize;

    /// View type of the item at `position`.
    ///
    /// Views are only reused for items of the same type. Defaults to a single
    /// type for every item.
    fn item_view_type(&self, _position: usize) -> ViewType {
        0
    }

    /// Stable id of the item at `position`. Defaults to the position itself.
    fn item_id(&self, position: usize) -> u64 {
        position as u64
    }

    /// Position of the item with the given stable id, if it is still present.
    fn position_of_id(&self, id: u64) -> Option<usize> {
        (0..self.item_count()).find(|&position| self.item_id(position) == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Letters(Vec<char>);

    impl Adapter for Letters {
        fn item_count(&self) -> usize {
            self.0.len()
        }

        fn item_view_type(&self, position: usize) -> ViewType {
            u32::from(self.0[position].is_uppercase())
        }

        fn item_id(&self, position: usize) -> u64 {
            u64::from(self.0[position])
        }
    }

    #[test]
    fn test_position_of_id_follows_moves() {
        let mut adapter = Letters(vec!['a', 'B', 'c']);
        assert_eq!(adapter.position_of_id(u64::from('c')), Some(2));

        adapter.0.remove(0);
        assert_eq!(adapter.position_of_id(u64::from('c')), Some(1));
        assert_eq!(adapter.position_of_id(u64::from('a')), None);
    }

    struct Plain(usize);

    impl Adapter for Plain {
        fn item_count(&self) -> usize {
            self.0
        }
    }

    #[test]
    fn test_defaults_use_position() {
        let adapter = Plain(3);
        assert_eq!(adapter.item_view_type(2), 0);
        assert_eq!(adapter.item_id(2), 2);
        assert_eq!(adapter.position_of_id(1), Some(1));
        assert_eq!(adapter.position_of_id(3), None);
    }

    #[test]
    fn test_view_types() {
        let adapter = Letters(vec!['a', 'B']);
        assert_eq!(adapter.item_view_type(0), 0);
        assert_eq!(adapter.item_view_type(1), 1);
    }
}
