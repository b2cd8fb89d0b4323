//! Key-value diagnostics emitted by environments.
//!
//! Every call to [`Env::step`](crate::Env::step) returns a [`Record`] next to the
//! [`Step`](crate::Step). Environments put whatever is useful for logging there,
//! e.g. the episode length at the end of an episode or the reward of a task.
//!
//! ```rust
//! use robot_env_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("episode_length", RecordValue::Scalar(200.0));
//! assert_eq!(record.get_scalar("episode_length").unwrap(), 200.0);
//! ```
mod base;

pub use base::{Record, RecordValue};
