use crate::list::{next_of, prev_of, List};
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// A violation of the link structure found by [`List::check_links`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BrokenLink {
    #[error("the head has a predecessor")]
    HeadHasPredecessor,
    #[error("live node {index} does not link back to its predecessor")]
    BackLink { index: usize },
    #[error("the cursor rests on a node that is not reachable from the head")]
    DanglingCursor,
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for elt in self {
            elt.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

impl<T> List<T> {
    /// Returns `true` if the `List` contains an element equal to the given value.
    ///
    /// The cursor is not moved.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_set::List;
    ///
    /// let mut list = List::new().unwrap();
    /// list.insert_after(0).unwrap();
    /// list.insert_after(1).unwrap();
    ///
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Walk the whole chain from the head and verify that every live node
    /// links back to its predecessor, and that the cursor rests on the head,
    /// on a reachable node, or past the end. Returns the number of live nodes.
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn check_links(&self) -> Result<usize, BrokenLink> {
        let head = self.head_node();
        let mut cursor_seen = self.current.map_or(true, |current| current == head);
        let mut prev = head;
        let mut len = 0_usize;
        // SAFETY: only nodes reachable from the head are visited, and they
        // are all owned by the list.
        unsafe {
            if prev_of(head).is_some() {
                return Err(BrokenLink::HeadHasPredecessor);
            }
            while let Some(node) = next_of(prev) {
                if prev_of(node) != Some(prev) {
                    return Err(BrokenLink::BackLink { index: len });
                }
                cursor_seen |= self.current == Some(node);
                prev = node;
                len += 1;
            }
        }
        if !cursor_seen {
            return Err(BrokenLink::DanglingCursor);
        }
        Ok(len)
    }
}
