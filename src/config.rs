//! Run-time choices for a demo run.

use clap::ValueEnum;

use crate::User;

/// How demos see the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StateMode {
    /// Every demo works on its own fresh copy of the records.
    #[default]
    Isolated,
    /// All demos share one set of records, so in-place edits made by one
    /// demo are visible to every demo after it.
    Shared,
}

/// Salary multiplier rule used by the `flat-map` demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SalaryRule {
    /// `age > 25` is tested before `age > 30`, so the x3 branch never fires.
    #[default]
    Literal,
    /// `age > 30` first (x3), then `age > 25` (x2), otherwise x4.
    Corrected,
}

impl SalaryRule {
    pub fn multiplier(self, age: i32) -> i32 {
        match self {
            SalaryRule::Literal => match age {
                a if a > 25 => 2,
                a if a > 30 => 3,
                _ => 4,
            },
            SalaryRule::Corrected => match age {
                a if a > 30 => 3,
                a if a > 25 => 2,
                _ => 4,
            },
        }
    }

    /// Scale `user.salary` in place. Wraps on overflow.
    pub fn upgrade(self, user: &mut User) -> &mut User {
        let factor = self.multiplier(user.age);
        user.scale_salary(factor)
    }
}

/// Settings for a [`Runner`](crate::Runner).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunConfig {
    pub state: StateMode,
    pub salary_rule: SalaryRule,
}
