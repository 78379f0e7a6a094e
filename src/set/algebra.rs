use tracing::warn;

use crate::set::OrderedSet;

/// Build a fresh set by adding `values` one by one. On an allocation
/// failure the partial result is dropped and `None` is returned.
fn build<I>(operation: &'static str, values: I) -> Option<OrderedSet>
where
    I: IntoIterator<Item = i32>,
{
    let mut result = OrderedSet::new();
    for value in values {
        if let Err(err) = result.add(value) {
            warn!(operation, %err, "discarding partial set algebra result");
            return None;
        }
    }
    Some(result)
}

impl OrderedSet {
    /// Values present in both `self` and `other`, in a new set.
    ///
    /// Every value of `self` is looked up in `other` by a linear scan, so
    /// this takes *O*(*n* · *m*) time. Neither input is modified, and the
    /// result is always a fresh set, even when both inputs are the same set.
    ///
    /// Returns `None` if the result cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_set::OrderedSet;
    ///
    /// let a = OrderedSet::try_from_values([1, 2, 3]).unwrap();
    /// let b = OrderedSet::try_from_values([2, 3, 4]).unwrap();
    /// assert_eq!(a.intersection(&b).unwrap().to_string(), "{2, 3}");
    /// ```
    pub fn intersection(&self, other: &OrderedSet) -> Option<OrderedSet> {
        build(
            "intersection",
            self.iter()
                .filter(|&value| other.iter().any(|candidate| candidate == value)),
        )
    }

    /// Values present in `self` or `other`, in a new set.
    ///
    /// Returns `None` if the result cannot be allocated.
    pub fn union(&self, other: &OrderedSet) -> Option<OrderedSet> {
        build("union", self.iter().chain(other.iter()))
    }

    /// Values of `self` that have no match in `other`, in a new set.
    ///
    /// Returns `None` if the result cannot be allocated.
    pub fn difference(&self, other: &OrderedSet) -> Option<OrderedSet> {
        build(
            "difference",
            self.iter()
                .filter(|&value| !other.iter().any(|candidate| candidate == value)),
        )
    }
}

/// [`OrderedSet::intersection`] over possibly absent sets; `None` if either
/// is absent.
pub fn intersect(a: Option<&OrderedSet>, b: Option<&OrderedSet>) -> Option<OrderedSet> {
    a?.intersection(b?)
}

/// [`OrderedSet::union`] over possibly absent sets; `None` if either is
/// absent.
pub fn union(a: Option<&OrderedSet>, b: Option<&OrderedSet>) -> Option<OrderedSet> {
    a?.union(b?)
}

/// [`OrderedSet::difference`] over possibly absent sets; `None` if either
/// is absent.
pub fn difference(a: Option<&OrderedSet>, b: Option<&OrderedSet>) -> Option<OrderedSet> {
    a?.difference(b?)
}
