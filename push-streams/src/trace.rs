//! Trace types for the push executor.
//!
//! These capture the journey of each source element through the stage
//! chain, plus the journey of anything a stage releases when flushed.

use std::fmt::{self, Display};

use user_streams::DisplayList;

/// Trace of one source element's journey through the stages.
///
/// `pipe_points[0]` is the source element, `pipe_points[i]` is the output
/// after stage `i-1`. Length is `num_stages + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementTrace<T> {
    /// Elements present at each pipe point between stages.
    pub pipe_points: Vec<Vec<T>>,
}

/// Trace of one stage's flush output through downstream stages.
///
/// `pipe_points[0]` is the flush output, `pipe_points[i]` is after
/// passing through `i` downstream stages.
#[derive(Debug, Clone, PartialEq)]
pub struct FlushTrace<T> {
    /// Index of the stage that produced this flush output.
    pub stage_index: usize,
    /// Elements at each pipe point from the flushing stage downstream.
    pub pipe_points: Vec<Vec<T>>,
}

/// Complete trace of a push execution.
#[derive(Debug, Clone, PartialEq)]
pub struct PushTrace<T> {
    /// Names of each stage in the chain.
    pub stage_names: Vec<String>,
    /// One trace per source element that was pulled.
    pub element_traces: Vec<ElementTrace<T>>,
    /// One trace per stage that produced flush output.
    pub flush_traces: Vec<FlushTrace<T>>,
    /// True if a bounded stage stopped the source before it ran out.
    pub stopped_early: bool,
}

impl<T: Display> PushTrace<T> {
    /// Human-readable rendering, one line per element or flush journey.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl<T: Display> Display for PushTrace<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "stages: SOURCE -> {}", self.stage_names.join(" -> "))?;
        for (i, trace) in self.element_traces.iter().enumerate() {
            writeln!(f, "#{i} {}", render_points(&trace.pipe_points))?;
        }
        if self.stopped_early {
            writeln!(f, "source stopped early")?;
        }
        for trace in &self.flush_traces {
            let name = self
                .stage_names
                .get(trace.stage_index)
                .map_or("?", String::as_str);
            writeln!(f, "flush {name} {}", render_points(&trace.pipe_points))?;
        }
        Ok(())
    }
}

fn render_points<T: Display>(points: &[Vec<T>]) -> String {
    points
        .iter()
        .map(|p| DisplayList(p).to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let trace = PushTrace {
            stage_names: vec!["FILTER".to_string(), "TAKE_LAST".to_string()],
            element_traces: vec![
                ElementTrace {
                    pipe_points: vec![vec![1], vec![], vec![]],
                },
                ElementTrace {
                    pipe_points: vec![vec![2], vec![2], vec![]],
                },
            ],
            flush_traces: vec![FlushTrace {
                stage_index: 1,
                pipe_points: vec![vec![2]],
            }],
            stopped_early: false,
        };
        assert_eq!(
            trace.render(),
            "stages: SOURCE -> FILTER -> TAKE_LAST\n\
             #0 [1] -> [] -> []\n\
             #1 [2] -> [2] -> []\n\
             flush TAKE_LAST [2]\n"
        );
    }

    #[test]
    fn test_render_early_stop() {
        let trace: PushTrace<i32> = PushTrace {
            stage_names: vec!["TAKE".to_string()],
            element_traces: vec![],
            flush_traces: vec![],
            stopped_early: true,
        };
        assert!(trace.render().contains("source stopped early"));
    }

    #[test]
    fn test_render_matches_display() {
        let trace = PushTrace {
            stage_names: vec!["SKIP".to_string()],
            element_traces: vec![ElementTrace {
                pipe_points: vec![vec!['a'], vec![]],
            }],
            flush_traces: vec![],
            stopped_early: false,
        };
        assert_eq!(trace.render(), format!("{trace}"));
        assert_eq!(trace.render(), "stages: SOURCE -> SKIP\n#0 [a] -> []\n");
    }

    #[test]
    fn test_render_unknown_flush_stage() {
        let trace: PushTrace<i32> = PushTrace {
            stage_names: vec![],
            element_traces: vec![],
            flush_traces: vec![FlushTrace {
                stage_index: 4,
                pipe_points: vec![vec![7]],
            }],
            stopped_early: false,
        };
        assert!(trace.render().ends_with("flush ? [7]\n"));
    }
}
