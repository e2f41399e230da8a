//! Element-at-a-time push executor.
//!
//! Pushes each source element through the entire stage chain before the
//! next element is pulled, the way an observable delivers `onNext` calls.
//! Once every element has been pushed (or a bounded stage has reported
//! done), stages are flushed in order and each flush output is pushed
//! through the stages downstream of it.

use std::mem;

use tracing::debug;

use crate::stage::Stage;
use crate::trace::{ElementTrace, FlushTrace, PushTrace};

/// Where a batch entered the chain.
#[derive(Debug, Clone, Copy)]
enum Origin {
    Source,
    Flush(usize),
}

/// Watches batches move through the chain.
trait Observer<T> {
    /// Called with the batch entering the first stage, then with the
    /// output of every stage it passes.
    fn pipe_point(&mut self, items: &[T]);

    /// Called once a batch has left the last stage.
    fn batch_done(&mut self, origin: Origin);
}

/// Observer for untraced runs.
struct Silent;

impl<T> Observer<T> for Silent {
    fn pipe_point(&mut self, _items: &[T]) {}

    fn batch_done(&mut self, _origin: Origin) {}
}

/// Collects pipe points into element and flush traces.
struct Recorder<T> {
    points: Vec<Vec<T>>,
    element_traces: Vec<ElementTrace<T>>,
    flush_traces: Vec<FlushTrace<T>>,
}

impl<T> Recorder<T> {
    fn new() -> Self {
        Recorder {
            points: Vec::new(),
            element_traces: Vec::new(),
            flush_traces: Vec::new(),
        }
    }
}

impl<T: Clone> Observer<T> for Recorder<T> {
    fn pipe_point(&mut self, items: &[T]) {
        self.points.push(items.to_vec());
    }

    fn batch_done(&mut self, origin: Origin) {
        let pipe_points = mem::take(&mut self.points);
        match origin {
            Origin::Source => self.element_traces.push(ElementTrace { pipe_points }),
            Origin::Flush(stage_index) => self.flush_traces.push(FlushTrace {
                stage_index,
                pipe_points,
            }),
        }
    }
}

/// Run one batch through `stages` in order.
fn push_batch<T, O: Observer<T>>(
    items: Vec<T>,
    stages: &mut [Box<dyn Stage<T>>],
    observer: &mut O,
) -> Vec<T> {
    observer.pipe_point(&items);
    stages.iter_mut().fold(items, |current, stage| {
        let next: Vec<T> = current
            .into_iter()
            .flat_map(|item| stage.process(item))
            .collect();
        observer.pipe_point(&next);
        next
    })
}

/// Drive `source` through the chain, then flush every stage.
///
/// Returns the output and whether the source was abandoned because a
/// stage reported done.
fn drive<T, I, O>(source: I, stages: &mut [Box<dyn Stage<T>>], observer: &mut O) -> (Vec<T>, bool)
where
    I: IntoIterator<Item = T>,
    O: Observer<T>,
{
    let mut output = Vec::new();
    let mut source = source.into_iter();
    let mut stopped_early = false;

    loop {
        if stages.iter().any(|s| s.is_done()) {
            debug!("bounded stage done, source no longer pulled");
            stopped_early = true;
            break;
        }
        let Some(item) = source.next() else { break };
        output.extend(push_batch(vec![item], stages, observer));
        observer.batch_done(Origin::Source);
    }

    for i in 0..stages.len() {
        let flushed = stages[i].flush();
        if flushed.is_empty() {
            continue;
        }
        debug!(stage = stages[i].name(), count = flushed.len(), "flush output");
        output.extend(push_batch(flushed, &mut stages[i + 1..], observer));
        observer.batch_done(Origin::Flush(i));
    }

    (output, stopped_early)
}

/// Execute a stage chain in element-at-a-time mode.
///
/// The source is not pulled again once any stage reports done, so bounded
/// stages like TAKE stop production instead of discarding the tail.
pub fn execute_push<T, I>(source: I, stages: &mut [Box<dyn Stage<T>>]) -> Vec<T>
where
    I: IntoIterator<Item = T>,
{
    drive(source, stages, &mut Silent).0
}

/// Same as [`execute_push`], also returning a [`PushTrace`] of every
/// element's path and every stage's flush output.
pub fn execute_push_traced<T, I>(
    source: I,
    stages: &mut [Box<dyn Stage<T>>],
) -> (Vec<T>, PushTrace<T>)
where
    T: Clone,
    I: IntoIterator<Item = T>,
{
    let stage_names = stages.iter().map(|s| s.name().to_string()).collect();
    let mut recorder = Recorder::new();
    let (output, stopped_early) = drive(source, stages, &mut recorder);
    let trace = PushTrace {
        stage_names,
        element_traces: recorder.element_traces,
        flush_traces: recorder.flush_traces,
        stopped_early,
    };
    (output, trace)
}
