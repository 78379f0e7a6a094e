//! The ordered integer set, a client of the cursor-based [`List`].
//!
//! Values are kept strictly ascending. Every lookup is a linear scan that
//! drives the list cursor from the head.

use std::alloc;
use std::cmp::Ordering;
use std::fmt;
use std::io;
use std::iter::Copied;

use tracing::{error, trace};

use crate::error::SetError;
use crate::list::{sentinel_layout, List};
use crate::Iter;

mod algebra;

pub use algebra::{difference, intersect, union};

/// Outcome of [`OrderedSet::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Insertion {
    /// The value was not in the set and has been linked in.
    Added,
    /// The value was already in the set; nothing changed.
    AlreadyPresent,
}

/// Outcome of [`OrderedSet::remove`] and [`destroy_set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Removal {
    /// The value was in the set and has been unlinked. [`destroy_set`]
    /// reports it once the whole set is torn down.
    Removed,
    /// The value was not in the set; nothing changed.
    NotFound,
}

/// Ascending iterator over the values of an [`OrderedSet`].
pub type Values<'a> = Copied<Iter<'a, i32>>;

/// A set of `i32` kept in strictly ascending order on top of a [`List`].
///
/// # Examples
///
/// ```
/// use ordered_set::{Insertion, OrderedSet};
///
/// let mut set = OrderedSet::new();
/// assert_eq!(set.add(5), Ok(Insertion::Added));
/// assert_eq!(set.add(1), Ok(Insertion::Added));
/// assert_eq!(set.add(3), Ok(Insertion::Added));
/// assert_eq!(set.add(3), Ok(Insertion::AlreadyPresent));
///
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.to_string(), "{1, 3, 5}");
/// ```
pub struct OrderedSet {
    list: List<i32>,
    size: usize,
}

impl OrderedSet {
    /// Create an empty set.
    ///
    /// Unlike the list engine, this is fail-fast: if the underlying list
    /// cannot be allocated, the process is terminated through
    /// [`std::alloc::handle_alloc_error`].
    pub fn new() -> Self {
        match List::new() {
            Ok(list) => Self { list, size: 0 },
            Err(err) => {
                error!(%err, "cannot allocate an ordered set, aborting");
                alloc::handle_alloc_error(sentinel_layout::<i32>())
            }
        }
    }

    /// Build a set from arbitrary values; duplicates are skipped.
    pub fn try_from_values<I>(values: I) -> Result<Self, SetError>
    where
        I: IntoIterator<Item = i32>,
    {
        let mut set = Self::new();
        for value in values {
            set.add(value)?;
        }
        Ok(set)
    }

    /// Number of values in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the set holds no value.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Ascending iterator over the values. Does not move the list cursor.
    pub fn iter(&self) -> Values<'_> {
        self.list.iter().copied()
    }

    /// Returns `true` if `value` is in the set.
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn contains(&self, value: i32) -> bool {
        self.iter()
            .take_while(|&current| current <= value)
            .any(|current| current == value)
    }

    /// Insert `value` at its ordered position.
    ///
    /// Walks from the head, comparing each successor of the cursor with
    /// `value`: an equal value means [`Insertion::AlreadyPresent`] and no
    /// change; a greater one stops the walk, and `value` is inserted right
    /// after the cursor. Reaching the end appends `value`.
    ///
    /// Returns [`SetError::Allocation`] if the node cannot be allocated.
    pub fn add(&mut self, value: i32) -> Result<Insertion, SetError> {
        self.list.move_to_head();
        while let Some(next) = self.list.peek_next().copied() {
            match next.cmp(&value) {
                Ordering::Equal => return Ok(Insertion::AlreadyPresent),
                Ordering::Greater => break,
                Ordering::Less => self.list.move_next()?,
            }
        }
        self.list.insert_after(value)?;
        self.size += 1;
        trace!(value, size = self.size, "added value to ordered set");
        Ok(Insertion::Added)
    }

    /// Remove `value` if present.
    ///
    /// The scan stops at the first value greater than `value`, since nothing
    /// after it can match.
    pub fn remove(&mut self, value: i32) -> Result<Removal, SetError> {
        self.list.move_to_head();
        while self.list.move_next().is_ok() {
            match self.list.current().copied() {
                Some(current) if current == value => {
                    self.list.delete_current()?;
                    self.size -= 1;
                    trace!(value, size = self.size, "removed value from ordered set");
                    return Ok(Removal::Removed);
                }
                Some(current) if current > value => break,
                _ => {}
            }
        }
        Ok(Removal::NotFound)
    }

    /// Write the set as text followed by a newline, and return the number of
    /// values written.
    pub fn print_to<W: io::Write>(&self, writer: &mut W) -> io::Result<usize> {
        writeln!(writer, "{}", self)?;
        Ok(self.size)
    }

    /// Like [`Clone::clone`], but reports allocation failure instead of
    /// aborting.
    pub fn try_clone(&self) -> Result<Self, SetError> {
        let mut copy = Self::new();
        // The source is already ascending, so each value goes to the back.
        for value in self.iter() {
            copy.list.insert_after(value)?;
            copy.list.move_next()?;
            copy.size += 1;
        }
        Ok(copy)
    }

    /// Verify the link structure of the underlying list, and that it agrees
    /// with the size counter and the ordering.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        assert_eq!(self.list.check_links(), Ok(self.size));
        let values: Vec<_> = self.iter().collect();
        assert!(values.windows(2).all(|pair| pair[0] < pair[1]), "{:?}", values);
    }
}

/// Create an empty set. See [`OrderedSet::new`] for the fail-fast policy.
pub fn create_set() -> OrderedSet {
    OrderedSet::new()
}

/// Tear down a set and all of its nodes.
///
/// Returns [`SetError::Allocation`] if there is no set to destroy.
pub fn destroy_set(set: Option<OrderedSet>) -> Result<Removal, SetError> {
    let set = set.ok_or(SetError::Allocation)?;
    trace!(size = set.len(), "destroying ordered set");
    drop(set);
    Ok(Removal::Removed)
}

/// Render a set as `{v1, v2, ..., vn}`; an absent set renders as `{}`.
pub fn render(set: Option<&OrderedSet>) -> String {
    set.map_or_else(|| String::from("{}"), OrderedSet::to_string)
}

impl Default for OrderedSet {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for OrderedSet {
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(copy) => copy,
            Err(err) => {
                error!(%err, "cannot clone an ordered set, aborting");
                alloc::handle_alloc_error(sentinel_layout::<i32>())
            }
        }
    }
}

impl PartialEq for OrderedSet {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl Eq for OrderedSet {}

impl fmt::Display for OrderedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str("}")
    }
}

impl fmt::Debug for OrderedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a OrderedSet {
    type Item = i32;
    type IntoIter = Values<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
