//! The catalogue of operator demos and what each one prints.
//!
//! Demos by category:
//! - creators: `just`, `from`, `repeat`, `range`, `create`
//! - transformers: `map`, `flat-map`, `group-by`, `buffer`
//! - filters: `filter`, `take`, `take-last`, `skip`, `skip-last`,
//!   `element-at`, `distinct`
//!
//! Each demo builds a [`Pipeline`](crate::Pipeline), drains it, and writes
//! one line per emitted element.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use tracing::debug;

use crate::config::SalaryRule;
use crate::error::StreamError;
use crate::pipeline::{create, from_iter, just, range, repeat};
use crate::user::{DisplayList, User};

/// Text emitted by the `repeat` demo.
pub const REPEATED_TEXT: &str = "I am emitted";
/// How many times `repeat` emits it.
pub const REPEAT_COUNT: usize = 3;
/// Start and length of the `range` demo.
pub const RANGE_START: i32 = 0;
pub const RANGE_COUNT: u32 = 3;
/// Location whose group the `group-by` demo prints.
pub const SALES: &str = "Sales";
/// Age threshold used by `filter`.
pub const AGE_THRESHOLD: i32 = 25;
/// Count used by `buffer`, `take`, `take-last`, `skip` and `skip-last`.
pub const WINDOW: usize = 3;
/// Index looked up by `element-at`.
pub const ELEMENT_INDEX: usize = 3;
/// Input of the `distinct` demo.
pub const DISTINCT_INPUT: [char; 6] = ['a', 'a', 'b', 'b', 'c', 'c'];

/// Demo grouping, matching the three sections of the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Creators,
    Transformers,
    Filters,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::Creators => "creators",
            Category::Transformers => "transformers",
            Category::Filters => "filters",
        }
    }

    pub fn demos(self) -> impl Iterator<Item = Demo> {
        Demo::ALL.into_iter().filter(move |d| d.category() == self)
    }
}

/// One operator demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Demo {
    Just,
    From,
    Repeat,
    Range,
    Create,
    Map,
    FlatMap,
    GroupBy,
    Buffer,
    Filter,
    Take,
    TakeLast,
    Skip,
    SkipLast,
    ElementAt,
    Distinct,
}

impl Demo {
    /// Every demo, in catalogue order.
    pub const ALL: [Demo; 16] = [
        Demo::Just,
        Demo::From,
        Demo::Repeat,
        Demo::Range,
        Demo::Create,
        Demo::Map,
        Demo::FlatMap,
        Demo::GroupBy,
        Demo::Buffer,
        Demo::Filter,
        Demo::Take,
        Demo::TakeLast,
        Demo::Skip,
        Demo::SkipLast,
        Demo::ElementAt,
        Demo::Distinct,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Demo::Just => "just",
            Demo::From => "from",
            Demo::Repeat => "repeat",
            Demo::Range => "range",
            Demo::Create => "create",
            Demo::Map => "map",
            Demo::FlatMap => "flat-map",
            Demo::GroupBy => "group-by",
            Demo::Buffer => "buffer",
            Demo::Filter => "filter",
            Demo::Take => "take",
            Demo::TakeLast => "take-last",
            Demo::Skip => "skip",
            Demo::SkipLast => "skip-last",
            Demo::ElementAt => "element-at",
            Demo::Distinct => "distinct",
        }
    }

    pub fn category(self) -> Category {
        match self {
            Demo::Just | Demo::From | Demo::Repeat | Demo::Range | Demo::Create => {
                Category::Creators
            }
            Demo::Map | Demo::FlatMap | Demo::GroupBy | Demo::Buffer => Category::Transformers,
            _ => Category::Filters,
        }
    }

    /// One-line summary for `--list`.
    pub fn description(self) -> &'static str {
        match self {
            Demo::Just => "emit the whole user list as a single element",
            Demo::From => "emit each user in order",
            Demo::Repeat => "emit a fixed string three times",
            Demo::Range => "emit the integers 0, 1, 2",
            Demo::Create => "emit each user through a hand-driven emitter",
            Demo::Map => "double every user's age in place",
            Demo::FlatMap => "upgrade salaries by age bracket, one inner stream per user",
            Demo::GroupBy => "group users by location and print the Sales group",
            Demo::Buffer => "emit users in chunks of three",
            Demo::Filter => "keep users older than 25",
            Demo::Take => "keep the first three users",
            Demo::TakeLast => "keep the last three users",
            Demo::Skip => "drop the first three users",
            Demo::SkipLast => "drop the last three users",
            Demo::ElementAt => "emit only the user at index 3",
            Demo::Distinct => "drop repeated characters from a, a, b, b, c, c",
        }
    }

    /// Whether the demo rewrites the records it is given.
    pub fn mutates(self) -> bool {
        matches!(self, Demo::Map | Demo::FlatMap)
    }

    /// Run the demo over `users`, writing one line per emitted element.
    ///
    /// Returns the number of lines written.
    pub fn run(
        self,
        users: &mut [User],
        salary_rule: SalaryRule,
        out: &mut dyn Write,
    ) -> Result<usize, StreamError> {
        let written = match self {
            Demo::Just => {
                just(&*users).try_subscribe(|list| writeln!(out, "{}", DisplayList(list)))?
            }
            Demo::From => from_iter(users.iter()).try_subscribe(|u| writeln!(out, "{u}"))?,
            Demo::Repeat => repeat(REPEATED_TEXT, REPEAT_COUNT)
                .try_subscribe(|text| writeln!(out, "{text}"))?,
            Demo::Range => {
                range(RANGE_START, RANGE_COUNT)?.try_subscribe(|n| writeln!(out, "{n}"))?
            }
            Demo::Create => create(|emitter| {
                for user in users.iter() {
                    emitter.on_next(user);
                }
                emitter.on_complete();
            })
            .try_subscribe(|u| writeln!(out, "{u}"))?,
            Demo::Map => from_iter(users.iter_mut())
                .map(|u| u.double_age())
                .try_subscribe(|u| writeln!(out, "{u}"))?,
            Demo::FlatMap => from_iter(users.iter_mut())
                .flat_map(|u| just(salary_rule.upgrade(u)))
                .try_subscribe(|u| writeln!(out, "{u}"))?,
            Demo::GroupBy => from_iter(users.iter())
                .group_by(|u| u.location().to_string())
                .filter(|group| group.key == SALES)
                .flat_map(|group| group.items)
                .try_subscribe(|u| writeln!(out, "{u}"))?,
            Demo::Buffer => from_iter(users.iter())
                .buffer(WINDOW)?
                .try_subscribe(|chunk| writeln!(out, "{}", DisplayList(&chunk)))?,
            Demo::Filter => from_iter(users.iter())
                .filter(|u| u.age > AGE_THRESHOLD)
                .try_subscribe(|u| writeln!(out, "{u}"))?,
            Demo::Take => from_iter(users.iter())
                .take(WINDOW)
                .try_subscribe(|u| writeln!(out, "{u}"))?,
            Demo::TakeLast => from_iter(users.iter())
                .take_last(WINDOW)
                .try_subscribe(|u| writeln!(out, "{u}"))?,
            Demo::Skip => from_iter(users.iter())
                .skip(WINDOW)
                .try_subscribe(|u| writeln!(out, "{u}"))?,
            Demo::SkipLast => from_iter(users.iter())
                .skip_last(WINDOW)
                .try_subscribe(|u| writeln!(out, "{u}"))?,
            Demo::ElementAt => match from_iter(users.iter()).element_at(ELEMENT_INDEX) {
                Some(u) => {
                    writeln!(out, "{u}")?;
                    1
                }
                None => 0,
            },
            Demo::Distinct => from_iter(DISTINCT_INPUT)
                .distinct()
                .try_subscribe(|c| writeln!(out, "{c}"))?,
        };
        debug!(demo = self.name(), written, "demo drained");
        Ok(written)
    }

    /// Resolve demo and category names into demos, in the order given.
    ///
    /// An empty selection means every demo.
    pub fn select<S: AsRef<str>>(names: &[S]) -> Result<Vec<Demo>, StreamError> {
        if names.is_empty() {
            return Ok(Demo::ALL.to_vec());
        }

        let mut demos = Vec::new();
        for name in names {
            let key = normalize(name.as_ref());
            match key.as_str() {
                "all" => demos.extend(Demo::ALL),
                "creators" => demos.extend(Category::Creators.demos()),
                "transformers" => demos.extend(Category::Transformers.demos()),
                "filters" => demos.extend(Category::Filters.demos()),
                _ => demos.push(name.as_ref().parse()?),
            }
        }
        Ok(demos)
    }
}

/// Lowercase and strip `-`/`_` so `take-last`, `take_last` and `takeLast` agree.
fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Demo {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        Demo::ALL
            .into_iter()
            .find(|d| normalize(d.name()) == key)
            .ok_or_else(|| StreamError::UnknownDemo(s.to_string()))
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
