use image::RgbImage;
use ndarray::Array1;
use robot_env_core::Obs;
use std::collections::BTreeMap;

/// Observation of [`GenericRobotEnv`](super::GenericRobotEnv).
#[derive(Clone, Debug, PartialEq)]
pub struct RobotObs {
    /// Joint positions, ordered as the joint names.
    pub joint_pos: Array1<f32>,

    /// Joint velocities, ordered as the joint names.
    pub joint_vel: Array1<f32>,

    /// World position of the end-effector site, when one is bound.
    pub ee_pos: Option<Array1<f32>>,

    /// Camera images keyed by camera name.
    ///
    /// Empty unless image observations are enabled and at least one camera was
    /// resolved.
    pub pixels: BTreeMap<String, RgbImage>,
}

impl Obs for RobotObs {
    fn dummy() -> Self {
        Self {
            joint_pos: Array1::zeros(0),
            joint_vel: Array1::zeros(0),
            ee_pos: None,
            pixels: BTreeMap::new(),
        }
    }

    fn len(&self) -> usize {
        self.joint_pos.len() + self.joint_vel.len() + self.ee_pos.as_ref().map_or(0, |p| p.len())
    }
}
