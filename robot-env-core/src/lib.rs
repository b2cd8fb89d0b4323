#![warn(missing_docs)]
//! Environment contract shared by the robot environments of this workspace.
//!
//! The crate defines what an environment looks like from the outside:
//!
//! * [`Env`] - build/reset/step plus the declaration of observation and action spaces,
//! * [`Step`] - the `(obs, reward, terminated, truncated, info)` tuple emitted at every step,
//! * [`Obs`], [`Act`] and [`Info`] - marker traits for the associated types,
//! * [`record::Record`] - key-value diagnostics returned alongside each step,
//! * [`BoxSpace`], [`Space`] and [`DictSpace`] - shape and bounds declarations.
//!
//! Concrete environments live in other crates (see `generic-robot-env`).
pub mod error;
pub mod record;

mod base;
pub use base::{Act, Env, Info, Obs, Step};

mod space;
pub use space::{BoxSpace, DictSpace, Space};
