//! Iterator adapters behind the stateful `Pipeline` operators.
//!
//! The stateless operators (`map`, `filter`, `take`, `skip`, ...) reuse the
//! standard iterator adapters. The ones here keep state between elements:
//! `Buffer` and `Distinct` emit as they go, while `TakeLast` and `SkipLast`
//! cannot know which elements to emit until they see the end of the source.

use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;

/// Consecutive chunks of at most `size` elements. The last chunk may be short.
pub struct Buffer<I> {
    iter: I,
    size: usize,
}

impl<I> Buffer<I> {
    pub(crate) fn new(iter: I, size: usize) -> Self {
        Self { iter, size }
    }
}

impl<I: Iterator> Iterator for Buffer<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let chunk: Vec<I::Item> = self.iter.by_ref().take(self.size).collect();
        if chunk.is_empty() { None } else { Some(chunk) }
    }
}

/// Passes each value the first time it is seen.
pub struct Distinct<I: Iterator> {
    iter: I,
    seen: HashSet<I::Item>,
}

impl<I: Iterator> Distinct<I> {
    pub(crate) fn new(iter: I) -> Self {
        Self {
            iter,
            seen: HashSet::new(),
        }
    }
}

impl<I> Iterator for Distinct<I>
where
    I: Iterator,
    I::Item: Eq + Hash + Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let seen = &mut self.seen;
        self.iter.find(|item| seen.insert(item.clone()))
    }
}

/// The final `n` elements, in source order.
///
/// The whole source is drained on the first call to `next`, keeping only a
/// window of `n` elements.
pub struct TakeLast<I: Iterator> {
    source: Option<I>,
    n: usize,
    window: VecDeque<I::Item>,
}

impl<I: Iterator> TakeLast<I> {
    pub(crate) fn new(iter: I, n: usize) -> Self {
        Self {
            source: Some(iter),
            n,
            window: VecDeque::with_capacity(n),
        }
    }
}

impl<I: Iterator> Iterator for TakeLast<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(source) = self.source.take() {
            for item in source {
                if self.n == 0 {
                    continue;
                }
                if self.window.len() == self.n {
                    self.window.pop_front();
                }
                self.window.push_back(item);
            }
        }
        self.window.pop_front()
    }
}

/// Everything except the final `n` elements.
///
/// Each element is held back until `n` newer ones have arrived, so whatever
/// is still pending when the source ends is dropped.
pub struct SkipLast<I: Iterator> {
    iter: I,
    n: usize,
    pending: VecDeque<I::Item>,
}

impl<I: Iterator> SkipLast<I> {
    pub(crate) fn new(iter: I, n: usize) -> Self {
        Self {
            iter,
            n,
            pending: VecDeque::with_capacity(n + 1),
        }
    }
}

impl<I: Iterator> Iterator for SkipLast<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let item = self.iter.next()?;
            self.pending.push_back(item);
            if self.pending.len() > self.n {
                return self.pending.pop_front();
            }
        }
    }
}

/// One partition produced by `group_by`.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<K, T> {
    pub key: K,
    pub items: Vec<T>,
}

/// Partition `iter` by key. Groups come out in order of first key
/// occurrence and members keep source order.
pub(crate) fn group_by<I, K, F>(iter: I, mut key_fn: F) -> Vec<Group<K, I::Item>>
where
    I: Iterator,
    K: Eq + Hash + Clone,
    F: FnMut(&I::Item) -> K,
{
    let mut groups: Vec<Group<K, I::Item>> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();

    for item in iter {
        let key = key_fn(&item);
        match index.get(&key) {
            Some(&slot) => groups[slot].items.push(item),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(Group {
                    key,
                    items: vec![item],
                });
            }
        }
    }

    groups
}

/// Producer handle passed to the closure given to `create`.
///
/// Values handed to `on_next` are delivered in call order. After
/// `on_complete`, further values are ignored.
#[derive(Debug)]
pub struct Emitter<T> {
    emitted: Vec<T>,
    completed: bool,
}

impl<T> Emitter<T> {
    pub(crate) fn new() -> Self {
        Self {
            emitted: Vec::new(),
            completed: false,
        }
    }

    pub fn on_next(&mut self, value: T) {
        if !self.completed {
            self.emitted.push(value);
        }
    }

    pub fn on_complete(&mut self) {
        self.completed = true;
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn into_items(self) -> Vec<T> {
        self.emitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_short_last_chunk() {
        let chunks: Vec<Vec<i32>> = Buffer::new(1..=8, 3).collect();
        assert_eq!(chunks, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8]]);
    }

    #[test]
    fn test_buffer_empty_source() {
        assert_eq!(Buffer::new(std::iter::empty::<i32>(), 3).count(), 0);
    }

    #[test]
    fn test_distinct_keeps_first_occurrence() {
        let out: Vec<char> = Distinct::new("abacbc".chars()).collect();
        assert_eq!(out, vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_take_last() {
        let out: Vec<i32> = TakeLast::new(1..=8, 3).collect();
        assert_eq!(out, vec![6, 7, 8]);
    }

    #[test]
    fn test_take_last_more_than_available() {
        let out: Vec<i32> = TakeLast::new(1..=2, 3).collect();
        assert_eq!(out, vec![1, 2]);
    }

    #[test]
    fn test_take_last_zero() {
        assert_eq!(TakeLast::new(1..=8, 0).count(), 0);
    }

    #[test]
    fn test_skip_last() {
        let out: Vec<i32> = SkipLast::new(1..=8, 3).collect();
        assert_eq!(out, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_skip_last_zero_passes_everything() {
        let out: Vec<i32> = SkipLast::new(1..=3, 0).collect();
        assert_eq!(out, vec![1, 2, 3]);
    }

    #[test]
    fn test_skip_last_more_than_available() {
        assert_eq!(SkipLast::new(1..=2, 3).count(), 0);
    }

    #[test]
    fn test_group_by_first_occurrence_order() {
        let groups = group_by(["b1", "a1", "b2", "c1", "a2"].into_iter(), |s| {
            s.chars().next()
        });
        let keys: Vec<Option<char>> = groups.iter().map(|g| g.key).collect();
        assert_eq!(keys, vec![Some('b'), Some('a'), Some('c')]);
        assert_eq!(groups[0].items, vec!["b1", "b2"]);
        assert_eq!(groups[1].items, vec!["a1", "a2"]);
    }

    #[test]
    fn test_emitter_ignores_values_after_complete() {
        let mut emitter = Emitter::new();
        emitter.on_next(1);
        emitter.on_next(2);
        emitter.on_complete();
        emitter.on_next(3);
        assert!(emitter.is_completed());
        assert_eq!(emitter.into_items(), vec![1, 2]);
    }
}
