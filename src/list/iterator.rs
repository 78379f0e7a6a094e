use crate::list::{List, Node};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// An iterator over the payloads of a `List`, from the first live node to
/// the last.
///
/// Though the `Iter` does not hold a reference from the list,
/// it actually *borrows* (immutably) from the list, so a phantom
/// marker of `&'a List<T>` is added to protect the list from being
/// written, including cursor moves.
///
/// # Examples
///
/// ```compile_fail
/// use ordered_set::List;
///
/// let mut list = List::new().unwrap();
/// list.insert_after(1).unwrap();
/// let mut iter = list.iter();
///
/// // Won't compile, because list is already borrowed immutably.
/// list.move_next().unwrap();
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T: 'a> {
    next: Option<NonNull<Node<T>>>,
    _marker: PhantomData<&'a List<T>>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        Self {
            next: list.front_node(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            next: self.next,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<Vec<_>>()).finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    /// Return the payload of `next` and step to its successor, or return
    /// `None` once the last live node has been yielded.
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        // SAFETY: `node` is a live node of the borrowed list, which cannot be
        // modified while `'a` lasts.
        let current = unsafe { &*node.as_ptr() };
        self.next = current.next;
        Some(&current.element)
    }
}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}
