//! Element-at-a-time stage trait and implementations.
//!
//! Each `Stage` receives one element at a time from upstream and returns
//! zero or more elements for downstream, mirroring an `onNext` handler.
//! Stages that can only decide at the end of the stream (TAKE_LAST) hold
//! elements back and release them from `flush`, the `onComplete` handler.

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

/// A stream stage that handles elements one at a time.
pub trait Stage<T> {
    /// Handle one upstream element, returning zero or more outputs.
    fn process(&mut self, item: T) -> Vec<T>;

    /// Release any held elements. Called once after the source ends.
    fn flush(&mut self) -> Vec<T> {
        vec![]
    }

    /// True once no further input can produce output.
    ///
    /// The executor stops pulling from the source as soon as any stage
    /// reports done.
    fn is_done(&self) -> bool {
        false
    }

    /// The display name of this stage.
    fn name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Stage implementations
// ---------------------------------------------------------------------------

/// FILTER - keeps elements matching a predicate.
pub struct FilterStage<P> {
    predicate: P,
}

impl<P> FilterStage<P> {
    pub fn new(predicate: P) -> Self {
        Self { predicate }
    }
}

impl<T, P> Stage<T> for FilterStage<P>
where
    P: FnMut(&T) -> bool,
{
    fn process(&mut self, item: T) -> Vec<T> {
        if (self.predicate)(&item) {
            vec![item]
        } else {
            vec![]
        }
    }

    fn name(&self) -> &str {
        "FILTER"
    }
}

/// MAP - rewrites each element.
pub struct MapStage<F> {
    f: F,
}

impl<F> MapStage<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<T, F> Stage<T> for MapStage<F>
where
    F: FnMut(T) -> T,
{
    fn process(&mut self, item: T) -> Vec<T> {
        vec![(self.f)(item)]
    }

    fn name(&self) -> &str {
        "MAP"
    }
}

/// FLAT_MAP - replaces each element with an inner sequence.
pub struct FlatMapStage<F> {
    f: F,
}

impl<F> FlatMapStage<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<T, F> Stage<T> for FlatMapStage<F>
where
    F: FnMut(T) -> Vec<T>,
{
    fn process(&mut self, item: T) -> Vec<T> {
        (self.f)(item)
    }

    fn name(&self) -> &str {
        "FLAT_MAP"
    }
}

/// GROUP_BY - passes the members of the one group whose key equals `key`.
///
/// Groups are never materialised: a member is forwarded the moment it
/// arrives, which is when a subscriber to that group would see it.
pub struct GroupKeyStage<F, K> {
    key_fn: F,
    key: K,
}

impl<F, K> GroupKeyStage<F, K> {
    pub fn new(key_fn: F, key: K) -> Self {
        Self { key_fn, key }
    }
}

impl<T, F, K> Stage<T> for GroupKeyStage<F, K>
where
    F: FnMut(&T) -> K,
    K: PartialEq,
{
    fn process(&mut self, item: T) -> Vec<T> {
        if (self.key_fn)(&item) == self.key {
            vec![item]
        } else {
            vec![]
        }
    }

    fn name(&self) -> &str {
        "GROUP_BY"
    }
}

/// TAKE n - keeps the first n elements, then reports done.
pub struct TakeStage {
    n: usize,
    seen: usize,
}

impl TakeStage {
    pub fn new(n: usize) -> Self {
        Self { n, seen: 0 }
    }
}

impl<T> Stage<T> for TakeStage {
    fn process(&mut self, item: T) -> Vec<T> {
        if self.seen < self.n {
            self.seen += 1;
            vec![item]
        } else {
            vec![]
        }
    }

    fn is_done(&self) -> bool {
        self.seen >= self.n
    }

    fn name(&self) -> &str {
        "TAKE"
    }
}

/// SKIP n - drops the first n elements, passes the rest.
pub struct SkipStage {
    n: usize,
    seen: usize,
}

impl SkipStage {
    pub fn new(n: usize) -> Self {
        Self { n, seen: 0 }
    }
}

impl<T> Stage<T> for SkipStage {
    fn process(&mut self, item: T) -> Vec<T> {
        if self.seen < self.n {
            self.seen += 1;
            vec![]
        } else {
            vec![item]
        }
    }

    fn name(&self) -> &str {
        "SKIP"
    }
}

/// TAKE_LAST n - holds a window of the latest n elements, released on flush.
pub struct TakeLastStage<T> {
    n: usize,
    window: VecDeque<T>,
}

impl<T> TakeLastStage<T> {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            window: VecDeque::with_capacity(n),
        }
    }
}

impl<T> Stage<T> for TakeLastStage<T> {
    fn process(&mut self, item: T) -> Vec<T> {
        if self.n > 0 {
            if self.window.len() == self.n {
                self.window.pop_front();
            }
            self.window.push_back(item);
        }
        vec![]
    }

    fn flush(&mut self) -> Vec<T> {
        self.window.drain(..).collect()
    }

    fn name(&self) -> &str {
        "TAKE_LAST"
    }
}

/// SKIP_LAST n - delays each element by n; the final n are dropped on flush.
pub struct SkipLastStage<T> {
    n: usize,
    pending: VecDeque<T>,
}

impl<T> SkipLastStage<T> {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            pending: VecDeque::with_capacity(n + 1),
        }
    }
}

impl<T> Stage<T> for SkipLastStage<T> {
    fn process(&mut self, item: T) -> Vec<T> {
        self.pending.push_back(item);
        if self.pending.len() > self.n {
            self.pending.pop_front().into_iter().collect()
        } else {
            vec![]
        }
    }

    fn flush(&mut self) -> Vec<T> {
        self.pending.clear();
        vec![]
    }

    fn name(&self) -> &str {
        "SKIP_LAST"
    }
}

/// ELEMENT_AT i - emits only the element at zero-based index i.
pub struct ElementAtStage {
    index: usize,
    seen: usize,
}

impl ElementAtStage {
    pub fn new(index: usize) -> Self {
        Self { index, seen: 0 }
    }
}

impl<T> Stage<T> for ElementAtStage {
    fn process(&mut self, item: T) -> Vec<T> {
        let position = self.seen;
        self.seen += 1;
        if position == self.index {
            vec![item]
        } else {
            vec![]
        }
    }

    fn is_done(&self) -> bool {
        self.seen > self.index
    }

    fn name(&self) -> &str {
        "ELEMENT_AT"
    }
}

/// DISTINCT - passes each value the first time it is seen.
pub struct DistinctStage<T> {
    seen: HashSet<T>,
}

impl<T> DistinctStage<T> {
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }
}

impl<T> Default for DistinctStage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone> Stage<T> for DistinctStage<T> {
    fn process(&mut self, item: T) -> Vec<T> {
        if self.seen.insert(item.clone()) {
            vec![item]
        } else {
            vec![]
        }
    }

    fn name(&self) -> &str {
        "DISTINCT"
    }
}
