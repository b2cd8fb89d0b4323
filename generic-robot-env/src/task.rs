//! Tasks on top of [`GenericRobotEnv`]: reward, success and failure.
//!
//! [`GenericTaskEnv`] only does the bookkeeping (step count, success and
//! failure flags, episode termination); what the robot should achieve is
//! defined by a [`Task`].
mod reach;
pub use reach::{NullTask, ReachTask, ReachTaskConfig};

use crate::{
    GenericRobotEnv, GenericRobotEnvConfig, KinematicSim, RobotAct, RobotObs, Simulator,
};
use anyhow::Result;
use log::info;
use robot_env_core::{
    record::{Record, RecordValue::Scalar},
    BoxSpace, DictSpace, Env, Info, Step,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Reward and episode outcome of a task.
pub trait Task {
    /// Configuration of the task.
    type Config: Clone + Serialize + DeserializeOwned;

    /// Builds the task.
    fn build(config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Called with the initial observation of every episode.
    fn reset(&mut self, _obs: &RobotObs) {}

    /// Reward of the transition that produced `obs`.
    fn reward(&mut self, obs: &RobotObs, act: &RobotAct) -> f32;

    /// Returns `true` when the task has been achieved.
    fn is_success(&self, _obs: &RobotObs) -> bool {
        false
    }

    /// Returns `true` when the episode cannot continue.
    fn is_failure(&self, _obs: &RobotObs) -> bool {
        false
    }
}

/// Information attached to every [`Step`] of [`GenericTaskEnv`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskInfo {
    /// Steps taken in the current episode, this one included.
    pub episode_step: usize,

    /// The task was achieved at this step.
    pub is_success: bool,

    /// The task failed at this step.
    pub is_failure: bool,
}

impl Info for TaskInfo {}

/// Configuration of [`GenericTaskEnv`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct GenericTaskEnvConfig<C> {
    /// Configuration of the wrapped environment.
    pub env: GenericRobotEnvConfig,

    /// Configuration of the task.
    pub task: C,

    /// End the episode when the task is achieved.
    #[serde(default = "default_terminate_on_success")]
    pub terminate_on_success: bool,
}

fn default_terminate_on_success() -> bool {
    true
}

impl<C> GenericTaskEnvConfig<C> {
    /// Creates a configuration terminating episodes on success.
    pub fn new(env: GenericRobotEnvConfig, task: C) -> Self {
        Self {
            env,
            task,
            terminate_on_success: true,
        }
    }

    /// Sets whether success ends the episode.
    pub fn terminate_on_success(mut self, v: bool) -> Self {
        self.terminate_on_success = v;
        self
    }
}

impl<C: Serialize + DeserializeOwned> GenericTaskEnvConfig<C> {
    /// Constructs [`GenericTaskEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`GenericTaskEnvConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

/// A [`GenericRobotEnv`] with a [`Task`].
///
/// An episode terminates on failure, or on success when
/// [`GenericTaskEnvConfig::terminate_on_success`] is set. Truncation comes
/// from the wrapped environment.
pub struct GenericTaskEnv<T: Task, S: Simulator = KinematicSim> {
    env: GenericRobotEnv<S>,
    task: T,
    terminate_on_success: bool,
}

impl<T: Task, S: Simulator> GenericTaskEnv<T, S> {
    /// The wrapped environment.
    pub fn env(&self) -> &GenericRobotEnv<S> {
        &self.env
    }

    /// The wrapped environment, e.g. for end-effector commands.
    pub fn env_mut(&mut self) -> &mut GenericRobotEnv<S> {
        &mut self.env
    }

    /// The task.
    pub fn task(&self) -> &T {
        &self.task
    }
}

impl<T: Task, S: Simulator> Env for GenericTaskEnv<T, S> {
    type Config = GenericTaskEnvConfig<T::Config>;
    type Obs = RobotObs;
    type Act = RobotAct;
    type Info = TaskInfo;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        let env = GenericRobotEnv::<S>::build(&config.env, seed)?;
        let task = T::build(&config.task)?;
        info!(
            "Built task environment for {}",
            env.robot_config().robot_name
        );
        Ok(Self {
            env,
            task,
            terminate_on_success: config.terminate_on_success,
        })
    }

    fn step(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)> {
        let (step, mut record) = self.env.step(a)?;
        let reward = self.task.reward(&step.obs, a);
        let is_success = self.task.is_success(&step.obs);
        let is_failure = self.task.is_failure(&step.obs);
        let is_terminated = (is_success && self.terminate_on_success) || is_failure;

        record.insert("reward", Scalar(reward));
        if is_terminated || step.is_truncated {
            record.insert("episode_length", Scalar(step.info.episode_step as _));
            record.insert("success", Scalar(if is_success { 1.0 } else { 0.0 }));
        }
        let info = TaskInfo {
            episode_step: step.info.episode_step,
            is_success,
            is_failure,
        };

        Ok((
            Step::new(
                step.obs,
                step.act,
                reward,
                is_terminated,
                step.is_truncated,
                info,
                None,
            ),
            record,
        ))
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        let obs = self.env.reset()?;
        self.task.reset(&obs);
        Ok(obs)
    }

    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        let obs = self.env.reset_with_index(ix)?;
        self.task.reset(&obs);
        Ok(obs)
    }

    fn observation_space(&self) -> DictSpace {
        self.env.observation_space()
    }

    fn action_space(&self) -> BoxSpace {
        self.env.action_space()
    }

    fn close(&mut self) {
        self.env.close();
    }
}
