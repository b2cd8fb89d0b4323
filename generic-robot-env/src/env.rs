//! Robot-arm environment driven by a bound [`RobotConfig`](crate::RobotConfig).
mod act;
mod base;
mod config;
mod obs;
pub use act::RobotAct;
pub use base::{GenericRobotEnv, RobotInfo};
pub use config::{GenericRobotEnvConfig, RenderMode};
pub use obs::RobotObs;
