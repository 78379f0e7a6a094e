use std::ptr::NonNull;

use tracing::trace;

use crate::error::ListError;
use crate::list::{element_of, next_of, prev_of, List, Node};

/// Where the cursor of a [`List`] rests.
///
/// ```text
///  Head     Node    Node    Node    PastEnd
///   #   ->   1   ->  2   ->  3   ->  (none)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// On the head sentinel. There is no payload here.
    Head,
    /// On a live node.
    Node,
    /// One past the last live node. There is no payload here.
    PastEnd,
}

// Cursor movements and edits.
//
// Every failing call returns `ListError::IllegalPosition` and leaves both
// the cursor and the links untouched.
impl<T> List<T> {
    fn live_current(&self) -> Option<NonNull<Node<T>>> {
        self.current.filter(|&node| !self.is_head(node))
    }

    /// Return the position of the cursor.
    pub fn position(&self) -> Position {
        match self.current {
            None => Position::PastEnd,
            Some(node) if self.is_head(node) => Position::Head,
            Some(_) => Position::Node,
        }
    }

    /// Return a reference to the payload under the cursor, or `None` if the
    /// cursor is on the head or past the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_set::List;
    ///
    /// let mut list = List::new().unwrap();
    /// assert_eq!(list.current(), None);
    ///
    /// list.insert_after(1).unwrap();
    /// list.move_next().unwrap();
    /// assert_eq!(list.current(), Some(&1));
    /// ```
    pub fn current(&self) -> Option<&T> {
        let node = self.live_current()?;
        // SAFETY: `node` is a live node of this list.
        Some(unsafe { element_of(node) })
    }

    /// Return a reference to the payload right after the cursor, or `None`
    /// if there is no such node (or the cursor is past the end).
    pub fn peek_next(&self) -> Option<&T> {
        let current = self.current?;
        // SAFETY: `current` is the head or a live node, and its successor,
        // if any, is a live node.
        unsafe { next_of(current).map(|next| element_of(next)) }
    }

    /// Move the cursor to the next node.
    ///
    /// Fails if there is no next node: the cursor is on the last live node,
    /// on the head of an empty list, or past the end.
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_set::{List, ListError};
    ///
    /// let mut list = List::new().unwrap();
    /// assert_eq!(list.move_next(), Err(ListError::IllegalPosition));
    ///
    /// list.insert_after(1).unwrap();
    /// assert!(list.move_next().is_ok());
    /// assert_eq!(list.current(), Some(&1));
    ///
    /// // Forbid to move after the last node
    /// assert_eq!(list.move_next(), Err(ListError::IllegalPosition));
    /// assert_eq!(list.current(), Some(&1));
    /// ```
    pub fn move_next(&mut self) -> Result<(), ListError> {
        let current = self.current.ok_or(ListError::IllegalPosition)?;
        // SAFETY: `current` is the head or a live node of this list.
        let next = unsafe { next_of(current) }.ok_or(ListError::IllegalPosition)?;
        self.current = Some(next);
        Ok(())
    }

    /// Move the cursor to the previous node.
    ///
    /// Fails if the cursor is on the head. From past the end, the cursor
    /// moves onto the last live node (or the head of an empty list).
    ///
    /// This operation should compute in *O*(*1*) time, except when moving
    /// from past the end, which takes *O*(*n*) time.
    pub fn move_previous(&mut self) -> Result<(), ListError> {
        match self.current {
            None => {
                self.current = Some(self.back_node());
                Ok(())
            }
            Some(node) if self.is_head(node) => Err(ListError::IllegalPosition),
            Some(node) => {
                // SAFETY: `node` is a live node, so its `prev` is the head or
                // another live node.
                let prev = unsafe { prev_of(node) }.ok_or(ListError::IllegalPosition)?;
                self.current = Some(prev);
                Ok(())
            }
        }
    }

    /// Set the cursor to the head.
    ///
    /// This operation should compute in *O*(*1*) time.
    #[inline]
    pub fn move_to_head(&mut self) {
        self.current = Some(self.head_node());
    }

    /// Move the cursor forward onto the last live node, or leave it on the
    /// head of an empty list. From past the end, the walk restarts from the
    /// head.
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_set::List;
    ///
    /// let mut list = List::new().unwrap();
    /// list.insert_after(3).unwrap();
    /// list.insert_after(2).unwrap();
    /// list.insert_after(1).unwrap();
    ///
    /// list.move_to_end();
    /// assert_eq!(list.current(), Some(&3));
    /// ```
    pub fn move_to_end(&mut self) {
        let mut node = self.current.unwrap_or_else(|| self.head_node());
        // SAFETY: every node reachable from the cursor is owned by the list.
        while let Some(next) = unsafe { next_of(node) } {
            node = next;
        }
        self.current = Some(node);
    }

    /// Set the cursor past the end of the list.
    #[inline]
    pub fn move_past_end(&mut self) {
        self.current = None;
    }

    /// Insert a new node right after the cursor. The cursor stays where it
    /// is, and the new node becomes its successor.
    ///
    /// Fails with [`ListError::IllegalPosition`] past the end, or with
    /// [`ListError::OutOfMemory`] if the node cannot be allocated.
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_set::List;
    ///
    /// let mut list = List::new().unwrap();
    /// list.insert_after(2).unwrap(); // [2]
    /// list.insert_after(1).unwrap(); // [1, 2], cursor still on the head
    /// assert_eq!(list.current(), None);
    /// assert_eq!(list.peek_next(), Some(&1));
    /// ```
    pub fn insert_after(&mut self, item: T) -> Result<(), ListError> {
        let current = self.current.ok_or(ListError::IllegalPosition)?;
        let node = Node::try_new_detached(item)?;
        // SAFETY: `current` belongs to this list and `node` is detached.
        unsafe { self.attach_after(current, node) };
        trace!(position = ?self.position(), "inserted node after cursor");
        Ok(())
    }

    /// Insert a new node right before the cursor. The cursor stays on the
    /// same node, and the new node becomes its predecessor.
    ///
    /// Fails with [`ListError::IllegalPosition`] on the head or past the end,
    /// or with [`ListError::OutOfMemory`] if the node cannot be allocated.
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_set::List;
    ///
    /// let mut list = List::new().unwrap();
    /// list.insert_after(3).unwrap();
    /// list.move_next().unwrap();
    /// list.insert_before(1).unwrap();
    /// list.insert_before(2).unwrap();
    ///
    /// assert_eq!(list.current(), Some(&3));
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// ```
    pub fn insert_before(&mut self, item: T) -> Result<(), ListError> {
        let current = self.live_current().ok_or(ListError::IllegalPosition)?;
        // SAFETY: `current` is a live node, so its `prev` is always set.
        let prev = unsafe { prev_of(current) }.ok_or(ListError::IllegalPosition)?;
        let node = Node::try_new_detached(item)?;
        // SAFETY: `prev` belongs to this list and `node` is detached.
        unsafe { self.attach_after(prev, node) };
        trace!(position = ?self.position(), "inserted node before cursor");
        Ok(())
    }

    /// Remove the node under the cursor and return its payload. The cursor
    /// moves onto the predecessor of the removed node (possibly the head).
    ///
    /// Fails with [`ListError::IllegalPosition`] on the head or past the end.
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_set::{List, ListError, Position};
    ///
    /// let mut list = List::new().unwrap();
    /// assert_eq!(list.delete_current(), Err(ListError::IllegalPosition));
    ///
    /// list.insert_after(2).unwrap();
    /// list.insert_after(1).unwrap();
    /// list.move_to_end();
    /// assert_eq!(list.delete_current(), Ok(2));
    /// assert_eq!(list.current(), Some(&1));
    /// assert_eq!(list.delete_current(), Ok(1));
    /// assert_eq!(list.position(), Position::Head);
    /// ```
    pub fn delete_current(&mut self) -> Result<T, ListError> {
        let current = self.live_current().ok_or(ListError::IllegalPosition)?;
        // SAFETY: `current` is a live node, so its `prev` is always set.
        let prev = unsafe { prev_of(current) }.ok_or(ListError::IllegalPosition)?;
        self.current = Some(prev);
        // SAFETY: `current` is a live node of this list.
        let node = unsafe { self.detach_node(current) };
        trace!(position = ?self.position(), "deleted node at cursor");
        Ok(Node::into_element(node))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ListError;
    use crate::list::{List, Position};
    use rstest::rstest;

    fn list_of(values: &[i32]) -> List<i32> {
        let mut list = List::new().unwrap();
        for &value in values {
            list.move_to_end();
            list.insert_after(value).unwrap();
        }
        list.move_to_head();
        list
    }

    fn values(list: &List<i32>) -> Vec<i32> {
        list.iter().copied().collect()
    }

    #[test]
    fn cursor_walks_both_ways() {
        let mut list = list_of(&[1, 2, 3]);
        assert_eq!(list.position(), Position::Head);
        assert_eq!(list.current(), None);

        for expected in 1..=3 {
            assert!(list.move_next().is_ok());
            assert_eq!(list.current(), Some(&expected));
        }
        assert_eq!(list.move_next(), Err(ListError::IllegalPosition));
        assert_eq!(list.current(), Some(&3));

        for expected in (1..=2).rev() {
            assert!(list.move_previous().is_ok());
            assert_eq!(list.current(), Some(&expected));
        }
        assert!(list.move_previous().is_ok());
        assert_eq!(list.position(), Position::Head);
        assert_eq!(list.move_previous(), Err(ListError::IllegalPosition));
        assert_eq!(list.position(), Position::Head);
    }

    #[test]
    fn cursor_move_to_end_and_head() {
        let mut empty = List::<i32>::new().unwrap();
        empty.move_to_end();
        assert_eq!(empty.position(), Position::Head);

        let mut list = list_of(&[4, 5, 6]);
        list.move_to_end();
        assert_eq!(list.current(), Some(&6));
        assert_eq!(list.peek_next(), None);

        list.move_to_head();
        assert_eq!(list.position(), Position::Head);
        assert_eq!(list.peek_next(), Some(&4));
    }

    #[test]
    fn cursor_past_end() {
        let mut list = list_of(&[1, 2]);
        list.move_past_end();
        assert_eq!(list.position(), Position::PastEnd);
        assert_eq!(list.current(), None);
        assert_eq!(list.peek_next(), None);

        assert_eq!(list.move_next(), Err(ListError::IllegalPosition));
        assert_eq!(list.insert_after(9), Err(ListError::IllegalPosition));
        assert_eq!(list.insert_before(9), Err(ListError::IllegalPosition));
        assert_eq!(list.delete_current(), Err(ListError::IllegalPosition));
        assert_eq!(list.position(), Position::PastEnd);
        assert_eq!(values(&list), vec![1, 2]);

        assert!(list.move_previous().is_ok());
        assert_eq!(list.current(), Some(&2));

        list.move_past_end();
        list.move_to_end();
        assert_eq!(list.current(), Some(&2));

        let mut empty = List::<i32>::new().unwrap();
        empty.move_past_end();
        assert!(empty.move_previous().is_ok());
        assert_eq!(empty.position(), Position::Head);
    }

    #[test]
    fn cursor_insert_after_keeps_cursor() {
        let mut list = list_of(&[1, 3]);
        list.move_next().unwrap();
        list.insert_after(2).unwrap();
        assert_eq!(list.current(), Some(&1));
        assert_eq!(list.peek_next(), Some(&2));
        assert_eq!(values(&list), vec![1, 2, 3]);

        // after the last live node: no successor to relink
        list.move_to_end();
        list.insert_after(4).unwrap();
        assert_eq!(list.current(), Some(&3));
        assert_eq!(values(&list), vec![1, 2, 3, 4]);
        assert_eq!(list.check_links(), Ok(4));
    }

    #[test]
    fn cursor_insert_before() {
        let mut list = List::new().unwrap();
        assert_eq!(list.insert_before(1), Err(ListError::IllegalPosition));
        assert!(list.is_empty());

        list.insert_after(2).unwrap();
        list.move_next().unwrap();
        list.insert_before(1).unwrap();
        assert_eq!(list.current(), Some(&2));
        assert_eq!(values(&list), vec![1, 2]);

        list.move_previous().unwrap();
        assert_eq!(list.current(), Some(&1));
        list.move_previous().unwrap();
        assert_eq!(list.position(), Position::Head);
        assert_eq!(list.check_links(), Ok(2));
    }

    #[rstest]
    #[case::first(&[1, 2, 3], 1, &[2, 3], Position::Head)]
    #[case::middle(&[1, 2, 3], 2, &[1, 3], Position::Node)]
    #[case::last(&[1, 2, 3], 3, &[1, 2], Position::Node)]
    #[case::sole(&[1], 1, &[], Position::Head)]
    fn cursor_delete(
        #[case] initial: &[i32],
        #[case] steps: usize,
        #[case] remaining: &[i32],
        #[case] position: Position,
    ) {
        let mut list = list_of(initial);
        for _ in 0..steps {
            list.move_next().unwrap();
        }
        let removed = initial[steps - 1];
        assert_eq!(list.delete_current(), Ok(removed));
        assert_eq!(list.position(), position);
        if steps > 1 {
            assert_eq!(list.current(), Some(&initial[steps - 2]));
        }
        assert_eq!(values(&list), remaining);
        assert_eq!(list.check_links(), Ok(remaining.len()));
    }

    #[test]
    fn cursor_delete_at_head_is_illegal() {
        let mut list = list_of(&[1]);
        assert_eq!(list.delete_current(), Err(ListError::IllegalPosition));
        assert_eq!(values(&list), vec![1]);
    }

    #[test]
    fn cursor_delete_then_reinsert() {
        let mut list = list_of(&[1, 2, 3]);
        list.move_to_end();
        while list.delete_current().is_ok() {}
        assert!(list.is_empty());
        assert_eq!(list.position(), Position::Head);

        list.insert_after(5).unwrap();
        list.move_next().unwrap();
        list.insert_before(4).unwrap();
        list.insert_after(6).unwrap();
        assert_eq!(values(&list), vec![4, 5, 6]);
        assert_eq!(list.check_links(), Ok(3));
    }
}
