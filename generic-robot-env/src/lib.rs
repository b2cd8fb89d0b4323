#![warn(missing_docs)]
//! Generic robot-arm environments bound from MJCF scene descriptions.
//!
//! A robot is described by name only: [`RobotConfig`] lists the joints,
//! actuators, end-effector site, gripper, home pose, workspace bounds and
//! cameras found in a scene file (see [`extract_config_from_xml`]). Building an
//! environment loads the same scene into a [`Simulator`], binds every name to
//! its index in the loaded model and exposes the [`Env`](robot_env_core::Env)
//! interface of `robot-env-core`.
//!
//! ```no_run
//! use generic_robot_env::{GenericRobotArmEnv, GenericRobotEnvConfig, RobotConfig};
//! use robot_env_core::Env;
//!
//! # fn main() -> anyhow::Result<()> {
//! let robot = RobotConfig::from_xml("mujoco_menagerie/universal_robots_ur5e/scene.xml", "ur5e")?;
//! let config = GenericRobotEnvConfig::new(robot).image_obs(true);
//! let mut env: GenericRobotArmEnv = GenericRobotArmEnv::build(&config, 0)?;
//! let obs = env.reset()?;
//! for (camera, image) in obs.pixels.iter() {
//!     image.save(format!("{camera}.png"))?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The physics engine stays behind [`Simulator`]. [`KinematicSim`] is a
//! kinematic reference implementation reading the same scene files.
mod bind;
mod config;
pub mod error;
mod extract;
mod include;
mod kinematic;
mod sim;
mod xml;

mod env;
mod task;

pub use bind::NameTable;
pub use config::{BoundsPolicy, CartesianBounds, RobotConfig};
pub use env::{GenericRobotEnv, GenericRobotEnvConfig, RenderMode, RobotAct, RobotInfo, RobotObs};
pub use error::RobotEnvError;
pub use extract::extract_config_from_xml;
pub use include::resolve_includes;
pub use kinematic::KinematicSim;
pub use sim::{ObjectKind, Simulator};
pub use task::{
    GenericTaskEnv, GenericTaskEnvConfig, NullTask, ReachTask, ReachTaskConfig, Task, TaskInfo,
};
pub use xml::{parse_f64_list, XmlElement};

/// Alias of [`GenericRobotEnv`] for robot arms.
pub type GenericRobotArmEnv<S = KinematicSim> = GenericRobotEnv<S>;
