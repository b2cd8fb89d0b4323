//! Core functionalities.
mod env;
mod step;
pub use env::Env;
use std::fmt::Debug;
pub use step::{Info, Step};

/// An observation of an environment.
///
/// Environments of this workspace are not vectorized, so an observation always
/// describes a single environment instance.
pub trait Obs: Clone + Debug {
    /// Returns a dummy observation.
    ///
    /// The observation created with this method is ignored. It fills
    /// [`Step::init_obs`]-like slots when no real observation exists.
    fn dummy() -> Self;

    /// Returns the number of scalar elements in the observation, images excluded.
    fn len(&self) -> usize;
}

/// An action of an environment.
pub trait Act: Clone + Debug {
    /// Returns the number of elements of the action.
    fn len(&self) -> usize;
}
