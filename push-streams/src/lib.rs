//! Element-at-a-time (push) executor for user-streams.
//!
//! Each source element flows through the entire stage chain before the
//! next one is pulled, the way an observable delivers `onNext` calls to a
//! chain of operators. This contrasts with the lazy `Pipeline` in
//! user-streams, where the consumer pulls elements through iterator
//! adapters.

pub mod demo;
pub mod executor;
pub mod stage;
pub mod trace;

pub use demo::{demo_stages, run_push, run_push_traced};
pub use executor::{execute_push, execute_push_traced};
pub use stage::Stage;
pub use trace::{ElementTrace, FlushTrace, PushTrace};
