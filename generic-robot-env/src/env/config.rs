//! Configuration of [`GenericRobotEnv`](super::GenericRobotEnv).
use crate::{BoundsPolicy, RobotConfig};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// How [`GenericRobotEnv::render`](super::GenericRobotEnv::render) produces frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Return an RGB buffer of the first camera.
    RgbArray,
}

/// Configuration of [`GenericRobotEnv`](super::GenericRobotEnv).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct GenericRobotEnvConfig {
    /// The robot, unbound; it is bound when the environment is built.
    pub robot: RobotConfig,

    /// Render every resolved camera into the observation.
    #[serde(default)]
    pub image_obs: bool,

    /// Render mode of `render()`.
    #[serde(default)]
    pub render_mode: Option<RenderMode>,

    /// Width of rendered images in pixels.
    #[serde(default = "default_image_size")]
    pub image_width: u32,

    /// Height of rendered images in pixels.
    #[serde(default = "default_image_size")]
    pub image_height: u32,

    /// Simulator steps per environment step.
    #[serde(default = "default_n_substeps")]
    pub n_substeps: usize,

    /// Episodes are truncated after this number of steps.
    #[serde(default)]
    pub max_episode_steps: Option<usize>,

    /// Handling of end-effector targets outside the cartesian bounds.
    #[serde(default)]
    pub bounds_policy: BoundsPolicy,

    /// Half-width of the uniform noise added to joint positions at reset.
    #[serde(default)]
    pub reset_noise_scale: f64,
}

fn default_image_size() -> u32 {
    128
}

fn default_n_substeps() -> usize {
    1
}

impl GenericRobotEnvConfig {
    /// Creates a configuration with default settings for `robot`.
    pub fn new(robot: RobotConfig) -> Self {
        Self {
            robot,
            image_obs: false,
            render_mode: None,
            image_width: default_image_size(),
            image_height: default_image_size(),
            n_substeps: default_n_substeps(),
            max_episode_steps: None,
            bounds_policy: BoundsPolicy::default(),
            reset_noise_scale: 0.0,
        }
    }

    /// Enables or disables image observations.
    pub fn image_obs(mut self, v: bool) -> Self {
        self.image_obs = v;
        self
    }

    /// Sets the render mode.
    pub fn render_mode(mut self, v: Option<RenderMode>) -> Self {
        self.render_mode = v;
        self
    }

    /// Sets the size of rendered images.
    pub fn image_size(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Sets the number of simulator steps per environment step.
    pub fn n_substeps(mut self, v: usize) -> Self {
        self.n_substeps = v;
        self
    }

    /// Sets the maximum number of steps in an episode.
    pub fn max_episode_steps(mut self, v: Option<usize>) -> Self {
        self.max_episode_steps = v;
        self
    }

    /// Sets the handling of out-of-bounds end-effector targets.
    pub fn bounds_policy(mut self, v: BoundsPolicy) -> Self {
        self.bounds_policy = v;
        self
    }

    /// Sets the reset noise.
    pub fn reset_noise_scale(mut self, v: f64) -> Self {
        self.reset_noise_scale = v;
        self
    }

    /// Constructs [`GenericRobotEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`GenericRobotEnvConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_serde_generic_robot_env_config() -> Result<()> {
        let robot = RobotConfig::new("arm", "scene.xml", vec!["j1".into()], vec!["a1".into()]);
        let config = GenericRobotEnvConfig::new(robot)
            .image_obs(true)
            .render_mode(Some(RenderMode::RgbArray))
            .image_size(64, 48)
            .max_episode_steps(Some(100))
            .bounds_policy(BoundsPolicy::Reject);

        let dir = TempDir::new("generic_robot_env_config")?;
        let path = dir.path().join("env_config.yaml");
        config.save(&path)?;
        let config_ = GenericRobotEnvConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }

    #[test]
    fn test_defaults_when_omitted() -> Result<()> {
        let yaml = r#"
robot:
  robot_name: arm
  xml_path: scene.xml
  joint_names: [j1]
  actuator_names: [a1]
  end_effector_site_name: ~
  gripper_actuator_name: ~
  home_position: ~
  cartesian_bounds: ~
  camera_names: []
render_mode: rgb_array
"#;
        let config: GenericRobotEnvConfig = serde_yaml::from_str(yaml)?;
        assert_eq!((config.image_width, config.image_height), (128, 128));
        assert_eq!(config.n_substeps, 1);
        assert_eq!(config.render_mode, Some(RenderMode::RgbArray));
        assert_eq!(config.bounds_policy, BoundsPolicy::Clamp);
        assert!(!config.image_obs);
        Ok(())
    }
}
