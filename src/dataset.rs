//! The fixed list of employees every demo reads from.

use crate::User;

/// Number of records in the dataset.
pub const DATASET_LEN: usize = 8;

/// Build a fresh copy of the eight employee records, in dataset order.
pub fn users() -> Vec<User> {
    vec![
        User::new("Michael", 20, "Office", 500),
        User::new("Pam", 25, "Reception", 300),
        User::new("Jim", 22, "Sales", 250),
        User::new("Darell", 26, "Warehouse", 350),
        User::new("Dwight", 31, "Sales", 225),
        User::new("Angela", 27, "Accounting", 200),
        User::new("Oscar", 28, "Accounting", 350),
        User::new("Roy", 30, "Warehouse", 150),
    ]
}

/// The dataset held for the lifetime of a run.
///
/// Readers go through [`Dataset::as_slice`] or take a [`Dataset::snapshot`];
/// demos that model update-in-place get [`Dataset::as_mut_slice`].
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    users: Vec<User>,
}

impl Dataset {
    pub fn new() -> Self {
        Self { users: users() }
    }

    pub fn as_slice(&self) -> &[User] {
        &self.users
    }

    pub fn as_mut_slice(&mut self) -> &mut [User] {
        &mut self.users
    }

    /// Deep copy of the current records.
    pub fn snapshot(&self) -> Vec<User> {
        self.users.clone()
    }

    /// Restore the literal records, discarding any in-place edits.
    pub fn reset(&mut self) {
        self.users = users();
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, User> {
        self.users.iter()
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new()
    }
}
