use std::alloc::{self, Layout};
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ptr::NonNull;

use crate::error::ListError;
use crate::Iter;

pub mod cursor;
pub mod iterator;

mod algorithms;

pub use algorithms::BrokenLink;
pub use cursor::Position;

/// The `List` is a doubly-linked list with a head sentinel and a movable
/// cursor. All edits are relative to the cursor.
///
/// The `List` contains:
/// - a pointer `head` to the sentinel node, which carries no payload and is
///   never removed;
/// - the cursor `current`, which rests on the head, on a live node, or past
///   the end of the list (`None`).
///
/// There is no tail sentinel: the last live node has `next == None`.
///
/// # Naming Conventions
///
/// - "live node": any node except the head;
/// - "past-end": the position after the last live node, carrying no payload.
pub struct List<T> {
    head: NonNull<Node<MaybeUninit<T>>>,
    /// `None` means the cursor is past the end.
    pub(crate) current: Option<NonNull<Node<T>>>,
    _marker: PhantomData<Box<Node<T>>>,
}

// The head is a `Node<MaybeUninit<T>>`, which has the size and alignment of
// a `Node<T>`. Its element is never initialised nor read.
#[repr(C)]
pub(crate) struct Node<T> {
    pub(crate) next: Option<NonNull<Node<T>>>,
    pub(crate) prev: Option<NonNull<Node<T>>>,
    pub(crate) element: T,
}

// private methods
impl<T> List<T> {
    pub(crate) fn head_node(&self) -> NonNull<Node<T>> {
        self.head.cast()
    }

    pub(crate) fn is_head(&self, node: NonNull<Node<T>>) -> bool {
        node == self.head_node()
    }

    pub(crate) fn front_node(&self) -> Option<NonNull<Node<T>>> {
        // SAFETY: the head is allocated for the whole lifetime of the list.
        unsafe { next_of(self.head_node()) }
    }

    /// The last live node, or the head if the list is empty.
    ///
    /// This operation should compute in *O*(*n*) time.
    pub(crate) fn back_node(&self) -> NonNull<Node<T>> {
        let mut node = self.head_node();
        // SAFETY: every node reachable from the head is owned by the list.
        while let Some(next) = unsafe { next_of(node) } {
            node = next;
        }
        node
    }

    /// Link the detached `node` into the list right after `prev`.
    ///
    /// It is unsafe because it does not check whether `prev` belongs to the
    /// list, or whether `node` is really detached.
    pub(crate) unsafe fn attach_after(&mut self, prev: NonNull<Node<T>>, node: NonNull<Node<T>>) {
        let next = next_of(prev);
        set_prev(node, Some(prev));
        set_next(node, next);
        if let Some(next) = next {
            set_prev(next, Some(node));
        }
        set_next(prev, Some(node));
        #[cfg(debug_assertions)]
        {
            assert_adjacent(prev, node);
            if let Some(next) = next {
                assert_adjacent(node, next);
            }
        }
        self.verify_links();
    }

    /// Unlink the live `node` from its neighbours, and return it as a box.
    ///
    /// It is unsafe because it does not check whether `node` is a live node
    /// of the list. Passing the head, or a node of another list, makes the
    /// list ill-formed.
    pub(crate) unsafe fn detach_node(&mut self, node: NonNull<Node<T>>) -> Box<Node<T>> {
        let node = Box::from_raw(node.as_ptr());
        if let Some(prev) = node.prev {
            set_next(prev, node.next);
        }
        if let Some(next) = node.next {
            set_prev(next, node.prev);
        }
        #[cfg(debug_assertions)]
        {
            if let (Some(prev), Some(next)) = (node.prev, node.next) {
                assert_adjacent(prev, next);
            }
        }
        self.verify_links();
        node
    }

    #[cfg(feature = "verify-links")]
    fn verify_links(&self) {
        if let Err(broken) = self.check_links() {
            panic!("list links are broken: {}", broken);
        }
    }

    #[cfg(not(feature = "verify-links"))]
    #[inline(always)]
    fn verify_links(&self) {}
}

impl<T> List<T> {
    /// Create an empty `List`, holding only the head sentinel. The cursor
    /// rests on the head.
    ///
    /// Returns [`ListError::OutOfMemory`] if the sentinel cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_set::{List, Position};
    ///
    /// let list: List<i32> = List::new().unwrap();
    /// assert!(list.is_empty());
    /// assert_eq!(list.position(), Position::Head);
    /// ```
    pub fn new() -> Result<Self, ListError> {
        let head = Node::try_new_detached(MaybeUninit::<T>::uninit())?;
        Ok(Self {
            head,
            current: Some(head.cast()),
            _marker: PhantomData,
        })
    }

    /// Returns `true` if the `List` holds no live node.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front_node().is_none()
    }

    /// Removes all live nodes from the `List` and puts the cursor back on
    /// the head.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_set::List;
    ///
    /// let mut list = List::new().unwrap();
    /// list.insert_after(2).unwrap();
    /// list.insert_after(1).unwrap();
    /// list.clear();
    /// assert!(list.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.current = Some(self.head_node());
        while let Some(front) = self.front_node() {
            // SAFETY: `front` is the first live node of this list.
            drop(unsafe { self.detach_node(front) });
        }
    }

    /// Provides a forward iterator over the payloads, from the first live
    /// node to the last. It does not move the cursor.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_set::List;
    ///
    /// let mut list = List::new().unwrap();
    /// list.insert_after(2).unwrap();
    /// list.insert_after(1).unwrap();
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }
}

/// Layout of the head sentinel, reported when it cannot be allocated.
pub(crate) fn sentinel_layout<T>() -> Layout {
    Layout::new::<Node<MaybeUninit<T>>>()
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Node<T> {
    /// Allocate a detached node with the given element.
    pub(crate) fn try_new_detached(element: T) -> Result<NonNull<Node<T>>, ListError> {
        let layout = Layout::new::<Node<T>>();
        // SAFETY: `Node<T>` holds two pointers, so `layout` is never zero-sized.
        let raw = unsafe { alloc::alloc(layout) }.cast::<Node<T>>();
        let node = NonNull::new(raw).ok_or(ListError::OutOfMemory)?;
        // SAFETY: `node` is freshly allocated with the layout of `Node<T>`.
        unsafe {
            node.as_ptr().write(Node {
                next: None,
                prev: None,
                element,
            });
        }
        Ok(node)
    }

    pub(crate) fn into_element(self: Box<Self>) -> T {
        self.element
    }
}

// The accessors below go through raw places instead of references, because
// the element of the head is uninitialised and must never be read.

/// It is unsafe because `node` must point to a node (or the head) that is
/// still allocated.
#[inline]
pub(crate) unsafe fn next_of<T>(node: NonNull<Node<T>>) -> Option<NonNull<Node<T>>> {
    (*node.as_ptr()).next
}

/// It is unsafe because `node` must point to a node (or the head) that is
/// still allocated.
#[inline]
pub(crate) unsafe fn prev_of<T>(node: NonNull<Node<T>>) -> Option<NonNull<Node<T>>> {
    (*node.as_ptr()).prev
}

#[inline]
unsafe fn set_next<T>(node: NonNull<Node<T>>, next: Option<NonNull<Node<T>>>) {
    (*node.as_ptr()).next = next;
}

#[inline]
unsafe fn set_prev<T>(node: NonNull<Node<T>>, prev: Option<NonNull<Node<T>>>) {
    (*node.as_ptr()).prev = prev;
}

/// It is unsafe because `node` must be a live node, never the head.
#[inline]
pub(crate) unsafe fn element_of<'a, T>(node: NonNull<Node<T>>) -> &'a T {
    &(*node.as_ptr()).element
}

#[cfg(debug_assertions)]
fn assert_adjacent<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    unsafe {
        assert_eq!(next_of(prev), Some(next));
        assert_eq!(prev_of(next), Some(prev));
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: the head was allocated as a `Node<MaybeUninit<T>>` in
        // `List::new`, and every live node has been freed by `clear`.
        drop(unsafe { Box::from_raw(self.head.as_ptr()) });
    }
}

unsafe impl<T: Send> Send for List<T> {}

unsafe impl<T: Sync> Sync for List<T> {}

#[cfg(test)]
mod tests {
    use crate::list::List;
    use std::cell::RefCell;

    #[test]
    fn list_create() {
        let mut list = List::<i32>::new().unwrap();
        assert!(list.is_empty());
        list.insert_after(1).unwrap();
        assert!(!list.is_empty());
        list.move_next().unwrap();
        assert_eq!(list.delete_current(), Ok(1));
        assert!(list.is_empty());
    }

    #[test]
    fn list_drop() {
        #[derive(Debug)]
        struct DropChecker<'a, T: Copy> {
            value: T,
            dropped: &'a RefCell<Vec<T>>,
        }
        impl<'a, T: Copy> DropChecker<'a, T> {
            fn new(value: T, dropped: &'a RefCell<Vec<T>>) -> Self {
                Self { value, dropped }
            }
        }
        impl<'a, T: Copy> Drop for DropChecker<'a, T> {
            fn drop(&mut self) {
                self.dropped.borrow_mut().push(self.value);
            }
        }
        let dropped = RefCell::new(Vec::<i32>::new());
        let mut list = List::new().unwrap();
        list.insert_after(DropChecker::new(3, &dropped)).unwrap();
        list.insert_after(DropChecker::new(2, &dropped)).unwrap();
        list.insert_after(DropChecker::new(1, &dropped)).unwrap();
        drop(list);
        assert_eq!(dropped.borrow().as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn list_clear_resets_cursor() {
        let mut list = List::new().unwrap();
        for value in [3, 2, 1] {
            list.insert_after(value).unwrap();
        }
        list.move_to_end();
        assert_eq!(list.current(), Some(&3));

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.current(), None);
        assert_eq!(list.check_links(), Ok(0));

        list.insert_after(7).unwrap();
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![7]);
    }

    #[test]
    fn list_over_aligned_payload() {
        #[derive(Debug, Clone, Copy, PartialEq)]
        #[repr(align(64))]
        struct Wide(u128);

        let mut list = List::<u128>::new().unwrap();
        list.insert_after(2).unwrap();
        list.insert_after(1).unwrap();
        assert_eq!(list.peek_next(), Some(&1));
        list.move_next().unwrap();
        list.insert_before(0).unwrap();
        assert_eq!(list.delete_current(), Ok(1));
        assert_eq!(list.peek_next(), Some(&2));
        list.move_to_head();
        assert_eq!(list.peek_next(), Some(&0));
        assert_eq!(list.check_links(), Ok(2));

        let mut wide = List::new().unwrap();
        wide.insert_after(Wide(u128::MAX)).unwrap();
        wide.move_next().unwrap();
        wide.move_previous().unwrap();
        assert_eq!(wide.peek_next(), Some(&Wide(u128::MAX)));
        wide.move_next().unwrap();
        assert_eq!(wide.delete_current(), Ok(Wide(u128::MAX)));
        assert!(wide.is_empty());
    }

    #[test]
    fn list_debug() {
        let mut list = List::new().unwrap();
        list.insert_after(2).unwrap();
        list.insert_after(1).unwrap();
        assert_eq!(format!("{:?}", list), "[1, 2]");
    }
}
