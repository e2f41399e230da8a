//! The employee record and the textual forms used for console output.

use std::fmt;

/// One employee.
///
/// `name` and `location` identify the record and are read-only once built;
/// `age` and `salary` are the fields the transformation demos rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    name: String,
    pub age: i32,
    location: String,
    pub salary: i32,
}

impl User {
    pub fn new(name: &str, age: i32, location: &str, salary: i32) -> Self {
        Self {
            name: name.to_string(),
            age,
            location: location.to_string(),
            salary,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Doubles `age`, wrapping on overflow.
    pub fn double_age(&mut self) -> &mut Self {
        self.age = self.age.wrapping_mul(2);
        self
    }

    /// Multiplies `salary` by `factor`, wrapping on overflow.
    pub fn scale_salary(&mut self, factor: i32) -> &mut Self {
        self.salary = self.salary.wrapping_mul(factor);
        self
    }
}

/// Prints fields in declaration order: `User(name=Jim, age=22, location=Sales, salary=250)`.
impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User(name={}, age={}, location={}, salary={})",
            self.name, self.age, self.location, self.salary
        )
    }
}

/// Displays a slice as `[a, b, c]` using each element's `Display`.
pub struct DisplayList<'a, T>(pub &'a [T]);

impl<T: fmt::Display> fmt::Display for DisplayList<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("]")
    }
}
