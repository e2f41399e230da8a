//! # user-streams
//!
//! Reactive-style stream operators demonstrated over a fixed list of
//! employee records.
//!
//! ## Overview
//!
//! - **Dataset**: eight `User` records, rebuilt on demand so demos never
//!   have to share them
//! - **Pipeline**: a lazy operator chain over any iterator, with sources
//!   (`just`, `from_iter`, `repeat`, `range`, `create`), transformations
//!   (`map`, `flat_map`, `group_by`, `buffer`) and filters (`filter`,
//!   `take`, `take_last`, `skip`, `skip_last`, `element_at`, `distinct`)
//! - **Demos**: sixteen self-contained routines that each drain one
//!   pipeline and print every element
//!
//! ## Example
//!
//! ```
//! use user_streams::{from_iter, users};
//!
//! let sales: Vec<String> = from_iter(users())
//!     .filter(|u| u.location() == "Sales")
//!     .map(|u| u.name().to_string())
//!     .collect();
//!
//! assert_eq!(sales, vec!["Jim", "Dwight"]);
//! ```

pub mod config;
pub mod dataset;
pub mod demo;
pub mod error;
pub mod executor;
pub mod pipeline;
pub mod stage;
pub mod user;

pub use config::{RunConfig, SalaryRule, StateMode};
pub use dataset::{DATASET_LEN, Dataset, users};
pub use demo::{Category, Demo};
pub use error::StreamError;
pub use executor::{DemoReport, Runner};
pub use pipeline::{Pipeline, create, from_iter, just, range, repeat};
pub use stage::{Buffer, Distinct, Emitter, Group, SkipLast, TakeLast};
pub use user::{DisplayList, User};
