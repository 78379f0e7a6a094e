//! This crate provides an ordered set of integers, backed by a cursor-based
//! doubly-linked list with a head sentinel.
//!
//! The [`List`] engine keeps a movable cursor and performs every edit
//! relative to it: inserting after or before the cursor, and deleting the
//! node under it, all in constant time. The [`OrderedSet`] drives that
//! cursor to keep its values unique and strictly ascending.
//!
//! Here is a quick example showing how the set works.
//!
//! ```
//! use ordered_set::{render, Insertion, OrderedSet, Removal};
//!
//! let mut set = OrderedSet::new();
//! for value in [5, 1, 3] {
//!     set.add(value).unwrap();
//! }
//! assert_eq!(set.add(3), Ok(Insertion::AlreadyPresent));
//! assert_eq!(render(Some(&set)), "{1, 3, 5}");
//!
//! assert_eq!(set.remove(1), Ok(Removal::Removed));
//! assert_eq!(set.remove(1), Ok(Removal::NotFound));
//!
//! let other = OrderedSet::try_from_values([3, 4]).unwrap();
//! assert_eq!(set.union(&other).unwrap().to_string(), "{3, 4, 5}");
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the list is like the following graph:
//! ```text
//!    (Head) Node
//!    ┌───────────┐           ╔═══════════╗                        ╔═══════════╗
//!    │   next    │ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ ║   next    ║ ──→ None
//!    ├───────────┤           ╟───────────╢     Node 2, 3, ...     ╟───────────╢
//! None ← prev    │ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── ║   prev    ║
//!    ├───────────┤           ╟───────────╢                        ╟───────────╢
//!    ┊No payload ┊           ║ payload T ║                        ║ payload T ║
//!    └╌╌╌╌╌╌╌╌╌╌╌┘           ╚═══════════╝                        ╚═══════════╝
//!          ↑                     Node 1                               Node N
//! ╔═══════════╗
//! ║   head    ║
//! ╟───────────╢
//! ║  current  ║ ──→ the head, a live node, or None (past the end)
//! ╚═══════════╝
//!     List
//! ```
//!
//! Each node of the list `List<T>` is allocated on heap, which contains:
//! - the `next` pointer that points to the next node, or `None` for the last
//!   node;
//! - the `prev` pointer that points to the previous node (the head for the
//!   first node); the head itself has no predecessor;
//! - the actual payload `T`, except the head.
//!
//! Following `next` from the head reaches every live node exactly once, and
//! for every live node `n`, `n.prev.next == n`.
//!
//! # Cursor
//!
//! The cursor rests on one of three kinds of [`Position`]:
//! - [`Position::Head`]: no payload; moving before it, inserting before it
//!   and deleting it are refused;
//! - [`Position::Node`]: a live node;
//! - [`Position::PastEnd`]: no payload; only moving backwards or back to the
//!   head is allowed.
//!
//! Refused operations return [`ListError::IllegalPosition`] and leave the
//! list untouched. Node allocation failures return
//! [`ListError::OutOfMemory`].
//!
//! # Errors and Allocation
//!
//! The list engine never aborts: failures are returned to the caller.
//! [`OrderedSet::new`] is the single exception and terminates the process
//! if the set cannot be allocated. Set algebra returns `None` when a
//! partial result cannot be completed, after freeing it.
//!
//! # Features
//!
//! - `verify-links`: walk the whole list after every edit and panic if the
//!   links are inconsistent. Debug builds always check the nodes around
//!   each edit. `cargo test --features verify-links` runs the test suite
//!   with the check enabled.
//!
//! [`List`]: crate::List
//! [`OrderedSet`]: crate::OrderedSet
//! [`Position`]: crate::Position

#[doc(inline)]
pub use error::{ListError, SetError};
#[doc(inline)]
pub use list::iterator::Iter;
#[doc(inline)]
pub use list::{BrokenLink, List, Position};
#[doc(inline)]
pub use set::{
    create_set, destroy_set, difference, intersect, render, union, Insertion, OrderedSet,
    Removal, Values,
};

pub mod list;
pub mod set;

mod error;
