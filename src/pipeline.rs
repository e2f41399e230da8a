//! Lazy operator chains over any iterator.
//!
//! A `Pipeline` wraps an iterator and exposes reactive-style operators.
//! Nothing runs until a terminal operator (`subscribe`, `try_subscribe`,
//! `element_at`, `collect`, `count`) pulls elements through the chain, and
//! bounded operators such as `take` stop pulling from the source once they
//! are satisfied.
//!
//! ```
//! use user_streams::pipeline::from_iter;
//!
//! let evens: Vec<i32> = from_iter(1..=10)
//!     .filter(|n| n % 2 == 0)
//!     .take(3)
//!     .collect();
//! assert_eq!(evens, vec![2, 4, 6]);
//! ```

use std::hash::Hash;
use std::iter::{Filter, FlatMap, Inspect, Map, Once, RepeatN, Skip, Take};
use std::ops::RangeInclusive;

use tracing::debug;

use crate::error::StreamError;
use crate::stage::{self, Buffer, Distinct, Emitter, Group, SkipLast, TakeLast};

/// A chain of operators over the iterator `I`.
#[derive(Debug, Clone)]
pub struct Pipeline<I> {
    iter: I,
}

/// A sequence with exactly one element: `value`.
pub fn just<T>(value: T) -> Pipeline<Once<T>> {
    Pipeline::new(std::iter::once(value))
}

/// One element per item of `items`, in order.
pub fn from_iter<T: IntoIterator>(items: T) -> Pipeline<T::IntoIter> {
    Pipeline::new(items.into_iter())
}

/// `value`, `times` times over.
pub fn repeat<T: Clone>(value: T, times: usize) -> Pipeline<RepeatN<T>> {
    Pipeline::new(std::iter::repeat_n(value, times))
}

/// `count` consecutive integers starting at `start`.
pub fn range(start: i32, count: u32) -> Result<Pipeline<RangeInclusive<i32>>, StreamError> {
    if count == 0 {
        return Ok(Pipeline::new(RangeInclusive::new(1, 0)));
    }
    let last = i64::from(start) + i64::from(count) - 1;
    let last = i32::try_from(last).map_err(|_| StreamError::RangeOverflow { start, count })?;
    Ok(Pipeline::new(start..=last))
}

/// A sequence fed by hand: `source` pushes values through an [`Emitter`].
pub fn create<T, F>(source: F) -> Pipeline<std::vec::IntoIter<T>>
where
    F: FnOnce(&mut Emitter<T>),
{
    let mut emitter = Emitter::new();
    source(&mut emitter);
    Pipeline::new(emitter.into_items().into_iter())
}

impl<I: Iterator> Pipeline<I> {
    pub fn new(iter: I) -> Self {
        Self { iter }
    }

    pub fn map<B, F>(self, f: F) -> Pipeline<Map<I, F>>
    where
        F: FnMut(I::Item) -> B,
    {
        Pipeline::new(self.iter.map(f))
    }

    /// Replace each element with the sequence `f` returns and concatenate them.
    pub fn flat_map<U, F>(self, f: F) -> Pipeline<FlatMap<I, U, F>>
    where
        U: IntoIterator,
        F: FnMut(I::Item) -> U,
    {
        Pipeline::new(self.iter.flat_map(f))
    }

    /// Partition by key. This drains the source before the first group is
    /// produced.
    pub fn group_by<K, F>(self, key_fn: F) -> Pipeline<std::vec::IntoIter<Group<K, I::Item>>>
    where
        K: Eq + Hash + Clone,
        F: FnMut(&I::Item) -> K,
    {
        Pipeline::new(stage::group_by(self.iter, key_fn).into_iter())
    }

    /// Chunks of at most `size` elements.
    pub fn buffer(self, size: usize) -> Result<Pipeline<Buffer<I>>, StreamError> {
        if size == 0 {
            return Err(StreamError::InvalidCount {
                operator: "buffer",
                count: size,
            });
        }
        Ok(Pipeline::new(Buffer::new(self.iter, size)))
    }

    pub fn inspect<F>(self, f: F) -> Pipeline<Inspect<I, F>>
    where
        F: FnMut(&I::Item),
    {
        Pipeline::new(self.iter.inspect(f))
    }

    pub fn filter<P>(self, predicate: P) -> Pipeline<Filter<I, P>>
    where
        P: FnMut(&I::Item) -> bool,
    {
        Pipeline::new(self.iter.filter(predicate))
    }

    pub fn take(self, n: usize) -> Pipeline<Take<I>> {
        Pipeline::new(self.iter.take(n))
    }

    pub fn take_last(self, n: usize) -> Pipeline<TakeLast<I>> {
        Pipeline::new(TakeLast::new(self.iter, n))
    }

    pub fn skip(self, n: usize) -> Pipeline<Skip<I>> {
        Pipeline::new(self.iter.skip(n))
    }

    pub fn skip_last(self, n: usize) -> Pipeline<SkipLast<I>> {
        Pipeline::new(SkipLast::new(self.iter, n))
    }

    pub fn distinct(self) -> Pipeline<Distinct<I>>
    where
        I::Item: Eq + Hash + Clone,
    {
        Pipeline::new(Distinct::new(self.iter))
    }

    /// The element at zero-based `index`, or `None` if the sequence is shorter.
    pub fn element_at(mut self, index: usize) -> Option<I::Item> {
        let found = self.iter.nth(index);
        if found.is_none() {
            debug!(index, "element_at: sequence ended before index");
        }
        found
    }

    /// Hand every element to `consumer`. Returns how many were delivered.
    pub fn subscribe<F>(self, mut consumer: F) -> usize
    where
        F: FnMut(I::Item),
    {
        let mut delivered = 0;
        for item in self.iter {
            consumer(item);
            delivered += 1;
        }
        delivered
    }

    /// Like [`Pipeline::subscribe`], stopping at the first consumer error.
    pub fn try_subscribe<E, F>(self, mut consumer: F) -> Result<usize, E>
    where
        F: FnMut(I::Item) -> Result<(), E>,
    {
        let mut delivered = 0;
        for item in self.iter {
            consumer(item)?;
            delivered += 1;
        }
        Ok(delivered)
    }

    pub fn collect<B: FromIterator<I::Item>>(self) -> B {
        self.iter.collect()
    }

    pub fn count(self) -> usize {
        self.iter.count()
    }
}

impl<I: Iterator> IntoIterator for Pipeline<I> {
    type Item = I::Item;
    type IntoIter = I;

    fn into_iter(self) -> I {
        self.iter
    }
}
