//! Built-in tasks.
use super::Task;
use crate::{RobotAct, RobotEnvError, RobotObs};
use anyhow::Result;
use log::warn;
use serde::{Deserialize, Serialize};

/// Task without reward that never ends an episode.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTask;

impl Task for NullTask {
    type Config = ();

    fn build(_config: &Self::Config) -> Result<Self> {
        Ok(Self)
    }

    fn reward(&mut self, _obs: &RobotObs, _act: &RobotAct) -> f32 {
        0.0
    }
}

/// Configuration of [`ReachTask`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct ReachTaskConfig {
    /// Target position of the end effector.
    pub target: [f64; 3],

    /// Distance to the target counted as success.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_tolerance() -> f64 {
    0.02
}

impl ReachTaskConfig {
    /// Creates a configuration with the default tolerance.
    pub fn new(target: [f64; 3]) -> Self {
        Self {
            target,
            tolerance: default_tolerance(),
        }
    }

    /// Sets the success tolerance.
    pub fn tolerance(mut self, v: f64) -> Self {
        self.tolerance = v;
        self
    }
}

/// Move the end effector to a target position.
///
/// The reward is the negative Euclidean distance between the end-effector
/// site and the target. Without a bound end-effector site the reward is zero
/// and the task never succeeds.
#[derive(Debug, Clone)]
pub struct ReachTask {
    target: [f32; 3],
    tolerance: f32,
}

impl ReachTask {
    /// Distance between the end effector and the target.
    pub fn distance(&self, obs: &RobotObs) -> Option<f32> {
        obs.ee_pos.as_ref().map(|p| {
            p.iter()
                .zip(self.target.iter())
                .map(|(x, t)| (x - t).powi(2))
                .sum::<f32>()
                .sqrt()
        })
    }
}

impl Task for ReachTask {
    type Config = ReachTaskConfig;

    fn build(config: &Self::Config) -> Result<Self> {
        if config.tolerance.is_nan() || config.tolerance < 0.0 {
            return Err(RobotEnvError::config(
                "tolerance",
                format!("{} is not a non-negative number", config.tolerance),
            )
            .into());
        }
        Ok(Self {
            target: config.target.map(|x| x as f32),
            tolerance: config.tolerance as f32,
        })
    }

    fn reset(&mut self, obs: &RobotObs) {
        if obs.ee_pos.is_none() {
            warn!("Reach task without an end-effector site: reward is always zero");
        }
    }

    fn reward(&mut self, obs: &RobotObs, _act: &RobotAct) -> f32 {
        self.distance(obs).map_or(0.0, |d| -d)
    }

    fn is_success(&self, obs: &RobotObs) -> bool {
        self.distance(obs).map_or(false, |d| d <= self.tolerance)
    }
}
