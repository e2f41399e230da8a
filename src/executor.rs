//! Demo runner.
//!
//! Runs a selection of demos in order against one dataset. In
//! `StateMode::Isolated` each demo receives a fresh snapshot, so demo
//! output does not depend on which demos ran before it. In
//! `StateMode::Shared` every demo works on the runner's own records and
//! edits made by `map` and `flat-map` carry over to later demos.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::config::{RunConfig, StateMode};
use crate::dataset::Dataset;
use crate::demo::Demo;
use crate::error::StreamError;

/// Lines printed by one demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoReport {
    pub demo: Demo,
    pub lines: usize,
}

/// Runs demos against a dataset it owns.
#[derive(Debug, Clone, Default)]
pub struct Runner {
    dataset: Dataset,
    config: RunConfig,
}

impl Runner {
    pub fn new(config: RunConfig) -> Self {
        Self {
            dataset: Dataset::new(),
            config,
        }
    }

    pub fn config(&self) -> RunConfig {
        self.config
    }

    /// The runner's records. Only changes in `StateMode::Shared`.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Put the runner's records back to their literal values.
    pub fn reset(&mut self) {
        self.dataset.reset();
    }

    /// Run one demo, writing its output to `out`.
    pub fn run_demo(&mut self, demo: Demo, out: &mut dyn Write) -> Result<usize, StreamError> {
        info!(demo = demo.name(), category = demo.category().name(), "running demo");
        let rule = self.config.salary_rule;
        let lines = match self.config.state {
            StateMode::Isolated => {
                let mut users = self.dataset.snapshot();
                demo.run(&mut users, rule, out)?
            }
            StateMode::Shared => demo.run(self.dataset.as_mut_slice(), rule, out)?,
        };
        info!(demo = demo.name(), lines, "demo finished");
        Ok(lines)
    }

    /// Run `demos` in order, writing all output to `out`.
    pub fn run(
        &mut self,
        demos: &[Demo],
        out: &mut dyn Write,
    ) -> Result<Vec<DemoReport>, StreamError> {
        let mut reports = Vec::with_capacity(demos.len());
        for &demo in demos {
            let lines = self.run_demo(demo, out)?;
            reports.push(DemoReport { demo, lines });
        }
        out.flush()?;
        Ok(reports)
    }

    /// Run `demos` and write the output to `path`, creating parent
    /// directories as needed.
    pub fn run_to_path(
        &mut self,
        demos: &[Demo],
        path: &Path,
    ) -> Result<Vec<DemoReport>, StreamError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let mut out = BufWriter::new(File::create(path)?);
        self.run(demos, &mut out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SalaryRule;
    use crate::dataset::users;

    fn run_text(runner: &mut Runner, demos: &[Demo]) -> String {
        let mut out: Vec<u8> = Vec::new();
        runner.run(demos, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_isolated_runs_do_not_leak() {
        let mut runner = Runner::new(RunConfig::default());
        let before = run_text(&mut runner, &[Demo::TakeLast]);
        run_text(&mut runner, &[Demo::Map, Demo::FlatMap]);
        let after = run_text(&mut runner, &[Demo::TakeLast]);
        assert_eq!(before, after);
        assert_eq!(runner.dataset().snapshot(), users());
    }

    #[test]
    fn test_shared_runs_carry_edits_forward() {
        let mut runner = Runner::new(RunConfig {
            state: StateMode::Shared,
            salary_rule: SalaryRule::Literal,
        });
        let text = run_text(&mut runner, &[Demo::Map, Demo::TakeLast]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(
            lines[10],
            "User(name=Roy, age=60, location=Warehouse, salary=150)"
        );

        // Ages doubled, so every user is now over 25 and gets x2.
        run_text(&mut runner, &[Demo::FlatMap]);
        assert_eq!(runner.dataset().as_slice()[0].salary, 1000);

        runner.reset();
        assert_eq!(runner.dataset().snapshot(), users());
    }

    #[test]
    fn test_shared_repeated_edits_wrap_instead_of_panicking() {
        let mut runner = Runner::new(RunConfig {
            state: StateMode::Shared,
            salary_rule: SalaryRule::Literal,
        });
        let reports = runner.run(&[Demo::Map; 27], &mut std::io::sink()).unwrap();
        assert_eq!(reports.len(), 27);
        let ages: Vec<i32> = runner.dataset().iter().map(|u| u.age).collect();
        let expected: Vec<i32> = users()
            .iter()
            .map(|u| (0..27).fold(u.age, |age, _| age.wrapping_mul(2)))
            .collect();
        assert_eq!(ages, expected);
        // 20 * 2^27 wraps negative, so the literal rule keeps picking x4.
        assert!(ages[0] < 0);

        runner.run(&[Demo::FlatMap; 16], &mut std::io::sink()).unwrap();
        let michael = &runner.dataset().as_slice()[0];
        assert_eq!(michael.salary, (0..16).fold(500_i32, |s, _| s.wrapping_mul(4)));
    }

    #[test]
    fn test_run_flushes_buffered_writer() {
        let mut runner = Runner::default();
        let mut writer = std::io::BufWriter::new(Vec::new());
        runner.run(&[Demo::Take], &mut writer).unwrap();
        assert!(writer.buffer().is_empty());
        assert_eq!(writer.get_ref().iter().filter(|&&b| b == b'\n').count(), 3);
    }

    #[test]
    fn test_shared_filter_after_map_keeps_everyone() {
        let mut runner = Runner::new(RunConfig {
            state: StateMode::Shared,
            ..RunConfig::default()
        });
        let reports = runner
            .run(&[Demo::Map, Demo::Filter], &mut std::io::sink())
            .unwrap();
        assert_eq!(
            reports,
            vec![
                DemoReport {
                    demo: Demo::Map,
                    lines: 8
                },
                DemoReport {
                    demo: Demo::Filter,
                    lines: 8
                },
            ]
        );
    }

    #[test]
    fn test_full_catalogue_line_counts() {
        let mut runner = Runner::new(RunConfig::default());
        let reports = runner.run(&Demo::ALL, &mut std::io::sink()).unwrap();
        let counts: Vec<usize> = reports.iter().map(|r| r.lines).collect();
        assert_eq!(counts, vec![1, 8, 3, 3, 8, 8, 8, 2, 3, 5, 3, 3, 5, 5, 1, 3]);
    }

    #[test]
    fn test_run_to_path_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.txt");
        let mut runner = Runner::new(RunConfig::default());
        let reports = runner
            .run_to_path(&[Demo::Range, Demo::Distinct], &path)
            .unwrap();
        assert_eq!(reports.len(), 2);
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "0\n1\n2\na\nb\nc\n");
    }
}
