//! Environment.
use super::{Act, Info, Obs, Step};
use crate::{record::Record, BoxSpace, DictSpace};
use anyhow::Result;

/// Represents an environment, typically an MDP.
///
/// Every stateful method takes `&mut self`: an environment is driven by exactly
/// one thread of control, matching the non-reentrant simulators behind it.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Information in the [`Step`] object.
    type Info: Info;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Performes an environment step.
    ///
    /// Fails when the action does not match the action space or when the
    /// environment has been closed.
    fn step(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)>
    where
        Self: Sized;

    /// Resets the environment and returns the initial observation.
    fn reset(&mut self) -> Result<Self::Obs>;

    /// Resets the environment with a given index.
    ///
    /// The index is used in an arbitrary way. For example, it can be used as a random seed,
    /// which is useful when evaluation of a trained agent.
    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs>;

    /// Declares the observation space.
    fn observation_space(&self) -> DictSpace;

    /// Declares the action space.
    fn action_space(&self) -> BoxSpace;

    /// Releases resources held by the environment.
    ///
    /// Calling [`Env::step`] or [`Env::reset`] after this method is an error.
    fn close(&mut self) {}

    /// Performes an environment step and reset the environment if an episode ends.
    ///
    /// The initial observation of the new episode is stored in [`Step::init_obs`].
    fn step_with_reset(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)>
    where
        Self: Sized,
    {
        let (mut step, record) = self.step(a)?;
        if step.is_done() {
            step.init_obs = Some(self.reset()?);
        }
        Ok((step, record))
    }
}
