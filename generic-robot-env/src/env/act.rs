use ndarray::Array1;
use robot_env_core::Act;

/// Actuator controls, ordered as the actuator names of the robot configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct RobotAct(pub Array1<f32>);

impl RobotAct {
    /// All-zero controls for `n` actuators.
    pub fn zeros(n: usize) -> Self {
        Self(Array1::zeros(n))
    }
}

impl Act for RobotAct {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<f32>> for RobotAct {
    fn from(v: Vec<f32>) -> Self {
        Self(Array1::from(v))
    }
}

impl From<Array1<f32>> for RobotAct {
    fn from(a: Array1<f32>) -> Self {
        Self(a)
    }
}
