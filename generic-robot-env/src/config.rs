//! Robot configuration: the control surface of one robot, by name.
use crate::error::{Result, RobotEnvError};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

const AXES: [char; 3] = ['x', 'y', 'z'];

/// Axis-aligned workspace limits for the end effector, min and max per axis.
///
/// Serialized as the 2x3 array `[[xmin, ymin, zmin], [xmax, ymax, zmax]]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[[f64; 3]; 2]", into = "[[f64; 3]; 2]")]
pub struct CartesianBounds {
    min: [f64; 3],
    max: [f64; 3],
}

impl CartesianBounds {
    /// Creates bounds, failing if a value is not finite or `min > max` on any axis.
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Result<Self> {
        for (i, axis) in AXES.iter().enumerate() {
            if !(min[i].is_finite() && max[i].is_finite()) {
                return Err(RobotEnvError::config(
                    "cartesian_bounds",
                    format!("non-finite bound {} {} on axis {axis}", min[i], max[i]),
                ));
            }
            if min[i] > max[i] {
                return Err(RobotEnvError::config(
                    "cartesian_bounds",
                    format!("min {} > max {} on axis {axis}", min[i], max[i]),
                ));
            }
        }
        Ok(Self { min, max })
    }

    /// Creates bounds from `[xmin, ymin, zmin, xmax, ymax, zmax]`.
    pub fn from_flat(values: &[f64]) -> Result<Self> {
        if values.len() != 6 {
            return Err(RobotEnvError::config(
                "cartesian_bounds",
                format!("expected 6 values (min xyz, max xyz), got {}", values.len()),
            ));
        }
        Self::new(
            [values[0], values[1], values[2]],
            [values[3], values[4], values[5]],
        )
    }

    /// Lower corner.
    pub fn min(&self) -> [f64; 3] {
        self.min
    }

    /// Upper corner.
    pub fn max(&self) -> [f64; 3] {
        self.max
    }

    /// Returns `true` if `p` lies inside the bounds, faces included.
    pub fn contains(&self, p: [f64; 3]) -> bool {
        (0..3).all(|i| self.min[i] <= p[i] && p[i] <= self.max[i])
    }

    /// Clamps each coordinate of `p` into the bounds.
    pub fn clamp(&self, p: [f64; 3]) -> [f64; 3] {
        [
            p[0].clamp(self.min[0], self.max[0]),
            p[1].clamp(self.min[1], self.max[1]),
            p[2].clamp(self.min[2], self.max[2]),
        ]
    }

    /// Applies `policy` to a commanded target.
    pub fn enforce(&self, target: [f64; 3], policy: BoundsPolicy) -> Result<[f64; 3]> {
        match policy {
            BoundsPolicy::Clamp => Ok(self.clamp(target)),
            BoundsPolicy::Reject => {
                for (i, axis) in AXES.iter().enumerate() {
                    if !(self.min[i] <= target[i] && target[i] <= self.max[i]) {
                        return Err(RobotEnvError::OutOfBounds {
                            axis: *axis,
                            value: target[i],
                            min: self.min[i],
                            max: self.max[i],
                        });
                    }
                }
                Ok(target)
            }
        }
    }
}

impl TryFrom<[[f64; 3]; 2]> for CartesianBounds {
    type Error = RobotEnvError;

    fn try_from(value: [[f64; 3]; 2]) -> Result<Self> {
        Self::new(value[0], value[1])
    }
}

impl From<CartesianBounds> for [[f64; 3]; 2] {
    fn from(value: CartesianBounds) -> Self {
        [value.min, value.max]
    }
}

/// What to do with an end-effector target outside [`CartesianBounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundsPolicy {
    /// Clamp every axis into the bounds.
    #[default]
    Clamp,

    /// Refuse the command with [`RobotEnvError::OutOfBounds`].
    Reject,
}

/// The control surface of one robot.
///
/// Created unbound by [`RobotConfig::from_xml`], holding names only. Binding
/// against a loaded simulator ([`RobotConfig::bind`]) fills the id fields; an
/// id sequence always has the length and order of its name sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotConfig {
    /// Identifier used for logging and output file names.
    pub robot_name: String,

    /// Path of the root scene description.
    pub xml_path: PathBuf,

    /// Controllable joints. The order is the canonical order of joint observations.
    pub joint_names: Vec<String>,

    /// Actuators. The order is the canonical order of action vectors.
    pub actuator_names: Vec<String>,

    /// Site tracked as the end effector.
    pub end_effector_site_name: Option<String>,

    /// Actuator driving the gripper.
    pub gripper_actuator_name: Option<String>,

    /// Joint positions used at reset, one per joint.
    pub home_position: Option<Vec<f64>>,

    /// Workspace limits of end-effector targets.
    pub cartesian_bounds: Option<CartesianBounds>,

    /// Cameras available for image observations.
    pub camera_names: Vec<String>,

    /// Ids of `joint_names`, filled by binding.
    #[serde(default)]
    pub joint_ids: Option<Vec<usize>>,

    /// DOF addresses of `joint_names`, filled by binding.
    #[serde(default)]
    pub dof_ids: Option<Vec<usize>>,

    /// Ids of `actuator_names`, filled by binding.
    #[serde(default)]
    pub actuator_ids: Option<Vec<usize>>,

    /// Id of `end_effector_site_name`, filled by binding.
    #[serde(default)]
    pub end_effector_site_id: Option<usize>,

    /// Id of `gripper_actuator_name`, filled by binding.
    #[serde(default)]
    pub gripper_actuator_id: Option<usize>,

    /// Ids of `camera_names`, filled by binding.
    #[serde(default)]
    pub camera_ids: Option<Vec<usize>>,
}

impl RobotConfig {
    /// Creates an unbound configuration with the given joints and actuators.
    pub fn new(
        robot_name: impl Into<String>,
        xml_path: impl Into<PathBuf>,
        joint_names: Vec<String>,
        actuator_names: Vec<String>,
    ) -> Self {
        Self {
            robot_name: robot_name.into(),
            xml_path: xml_path.into(),
            joint_names,
            actuator_names,
            end_effector_site_name: None,
            gripper_actuator_name: None,
            home_position: None,
            cartesian_bounds: None,
            camera_names: vec![],
            joint_ids: None,
            dof_ids: None,
            actuator_ids: None,
            end_effector_site_id: None,
            gripper_actuator_id: None,
            camera_ids: None,
        }
    }

    /// Extracts the configuration from a scene description.
    ///
    /// See [`extract_config_from_xml`](crate::extract_config_from_xml).
    pub fn from_xml(path: impl AsRef<Path>, robot_name: impl Into<String>) -> Result<Self> {
        crate::extract_config_from_xml(path, robot_name)
    }

    /// Sets the end-effector site.
    pub fn end_effector_site_name(mut self, v: Option<String>) -> Self {
        self.end_effector_site_name = v;
        self
    }

    /// Sets the gripper actuator.
    pub fn gripper_actuator_name(mut self, v: Option<String>) -> Self {
        self.gripper_actuator_name = v;
        self
    }

    /// Sets the home position.
    pub fn home_position(mut self, v: Option<Vec<f64>>) -> Self {
        self.home_position = v;
        self
    }

    /// Sets the cartesian bounds.
    pub fn cartesian_bounds(mut self, v: Option<CartesianBounds>) -> Self {
        self.cartesian_bounds = v;
        self
    }

    /// Sets the cameras.
    pub fn camera_names(mut self, v: Vec<String>) -> Self {
        self.camera_names = v;
        self
    }

    /// Returns `true` once the joint and actuator ids are resolved.
    pub fn is_bound(&self) -> bool {
        self.dof_ids.is_some() && self.actuator_ids.is_some()
    }

    /// Checks that the home position has one value per joint.
    pub fn validate_home_position(&self) -> Result<()> {
        match &self.home_position {
            Some(home) if home.len() != self.joint_names.len() => Err(RobotEnvError::config(
                "home_position",
                format!(
                    "{} values for {} joints",
                    home.len(),
                    self.joint_names.len()
                ),
            )),
            _ => Ok(()),
        }
    }

    /// Constructs [`RobotConfig`] from a JSON (`.json`) or YAML file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let rdr = BufReader::new(File::open(path)?);
        let config = if is_json(path) {
            serde_json::from_reader(rdr)?
        } else {
            serde_yaml::from_reader(rdr)?
        };
        Ok(config)
    }

    /// Saves [`RobotConfig`] as JSON (`.json`) or YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            serde_yaml::to_string(self)?
        };
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    fn config() -> RobotConfig {
        RobotConfig::new(
            "arm",
            "robots/arm/scene.xml",
            vec!["j1".to_string(), "j2".to_string()],
            vec!["a1".to_string(), "a2".to_string()],
        )
        .home_position(Some(vec![0.0, 0.5]))
        .cartesian_bounds(Some(
            CartesianBounds::new([-0.5, -0.5, 0.0], [0.5, 0.5, 0.8]).unwrap(),
        ))
        .camera_names(vec!["top".to_string()])
    }

    #[test]
    fn test_bounds_validation() {
        assert!(CartesianBounds::new([0.0; 3], [0.0; 3]).is_ok());
        match CartesianBounds::new([0.0, 1.0, 0.0], [1.0, 0.5, 1.0]) {
            Err(RobotEnvError::Config { field, message }) => {
                assert_eq!(field, "cartesian_bounds");
                assert!(message.contains("axis y"), "{message}");
            }
            other => panic!("expected Config error, got {other:?}"),
        }
        assert!(CartesianBounds::from_flat(&[0.0; 5]).is_err());
        for bad in [f64::NAN, f64::INFINITY] {
            match CartesianBounds::new([bad, 0.0, 0.0], [1.0; 3]) {
                Err(RobotEnvError::Config { field, message }) => {
                    assert_eq!(field, "cartesian_bounds");
                    assert!(message.contains("axis x"), "{message}");
                }
                other => panic!("expected Config error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_bounds_policies_are_boundary_inclusive() {
        let bounds = CartesianBounds::new([-1.0, -1.0, 0.0], [1.0, 1.0, 2.0]).unwrap();
        let on_face = [1.0, -1.0, 2.0];
        assert!(bounds.contains(on_face));
        assert_eq!(bounds.enforce(on_face, BoundsPolicy::Clamp).unwrap(), on_face);
        assert_eq!(bounds.enforce(on_face, BoundsPolicy::Reject).unwrap(), on_face);

        let outside = [1.5, 0.0, -0.25];
        assert_eq!(
            bounds.enforce(outside, BoundsPolicy::Clamp).unwrap(),
            [1.0, 0.0, 0.0]
        );
        match bounds.enforce(outside, BoundsPolicy::Reject) {
            Err(RobotEnvError::OutOfBounds { axis, value, .. }) => {
                assert_eq!(axis, 'x');
                assert_eq!(value, 1.5);
            }
            other => panic!("expected OutOfBounds, got {other:?}"),
        }
    }

    #[test]
    fn test_home_position_length() {
        let mut config = config();
        assert!(config.validate_home_position().is_ok());
        config.home_position = Some(vec![0.0]);
        assert!(config.validate_home_position().unwrap_err().is_config_error());
    }

    #[test]
    fn test_save_and_load() -> anyhow::Result<()> {
        let dir = TempDir::new("robot_config")?;
        let config = config();

        for name in ["arm.json", "arm.yaml"] {
            let path = dir.path().join(name);
            config.save(&path)?;
            let loaded = RobotConfig::load(&path)?;
            assert_eq!(loaded, config);
        }
        Ok(())
    }

    #[test]
    fn test_bounds_serialize_as_2x3_array() {
        let json = serde_json::to_value(config()).unwrap();
        assert_eq!(
            json["cartesian_bounds"],
            serde_json::json!([[-0.5, -0.5, 0.0], [0.5, 0.5, 0.8]])
        );
        let inverted = r#"[[1.0, 0.0, 0.0], [0.0, 1.0, 1.0]]"#;
        assert!(serde_json::from_str::<CartesianBounds>(inverted).is_err());
    }
}
