use super::{GenericRobotEnvConfig, RenderMode, RobotAct, RobotObs};
use crate::error::{Result, RobotEnvError};
use crate::{KinematicSim, RobotConfig, Simulator};
use image::RgbImage;
use log::{debug, info, trace};
use ndarray::Array1;
use robot_env_core::{
    record::{Record, RecordValue::Scalar},
    BoxSpace, DictSpace, Env, Info, Space, Step,
};
use std::collections::BTreeMap;

/// Information attached to every [`Step`] of [`GenericRobotEnv`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobotInfo {
    /// Steps taken in the current episode, this one included.
    pub episode_step: usize,
}

impl Info for RobotInfo {}

/// Robot-arm environment over any robot described by a scene file.
///
/// One type serves every robot: the robot is fully described by the bound
/// [`RobotConfig`], and all reads and writes of the simulation state go through
/// its resolved ids.
///
/// ```no_run
/// use generic_robot_env::{GenericRobotEnv, GenericRobotEnvConfig, RobotAct, RobotConfig};
/// use robot_env_core::Env;
///
/// # fn main() -> anyhow::Result<()> {
/// let robot = RobotConfig::from_xml("mujoco_menagerie/franka_emika_panda/scene.xml", "panda")?;
/// let config = GenericRobotEnvConfig::new(robot).max_episode_steps(Some(200));
/// let mut env: GenericRobotEnv = GenericRobotEnv::build(&config, 42)?;
///
/// let obs = env.reset()?;
/// let act = RobotAct::zeros(env.robot_config().actuator_names.len());
/// let (step, _record) = env.step(&act)?;
/// println!("{:?} -> {:?}", obs.joint_pos, step.obs.joint_pos);
/// # Ok(())
/// # }
/// ```
pub struct GenericRobotEnv<S: Simulator = KinematicSim> {
    config: GenericRobotEnvConfig,
    sim: S,
    rng: fastrand::Rng,
    count_steps: usize,
    closed: bool,
    observation_space: DictSpace,
    action_space: BoxSpace,
}

impl<S: Simulator> GenericRobotEnv<S> {
    /// Loads the scene of `config.robot`, binds the robot and builds the environment.
    ///
    /// `seed` seeds the generator of the reset noise.
    pub fn new(config: &GenericRobotEnvConfig, seed: u64) -> Result<Self> {
        if config.n_substeps == 0 {
            return Err(RobotEnvError::config("n_substeps", "must be at least 1"));
        }
        if config.reset_noise_scale.is_nan() || config.reset_noise_scale < 0.0 {
            return Err(RobotEnvError::config(
                "reset_noise_scale",
                format!("{} is not a non-negative number", config.reset_noise_scale),
            ));
        }

        let sim = S::load(&config.robot.xml_path)?;
        let robot = config.robot.bind(&sim)?;
        let (observation_space, action_space) = spaces(config, &robot, &sim)?;
        info!(
            "Built environment for {}: {} joints, {} actuators, cameras {:?}",
            robot.robot_name,
            robot.joint_names.len(),
            robot.actuator_names.len(),
            robot.camera_names
        );

        Ok(Self {
            config: GenericRobotEnvConfig {
                robot,
                ..config.clone()
            },
            sim,
            rng: fastrand::Rng::with_seed(seed),
            count_steps: 0,
            closed: false,
            observation_space,
            action_space,
        })
    }

    /// The configuration, holding the bound robot.
    pub fn config(&self) -> &GenericRobotEnvConfig {
        &self.config
    }

    /// The bound robot configuration.
    pub fn robot_config(&self) -> &RobotConfig {
        &self.config.robot
    }

    /// The simulator.
    pub fn simulator(&self) -> &S {
        &self.sim
    }

    /// Returns `true` after [`Env::close`].
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Steps taken since the last reset.
    pub fn episode_step(&self) -> usize {
        self.count_steps
    }

    /// Simulated seconds per environment step, the timestep times `n_substeps`.
    pub fn dt(&self) -> f64 {
        self.sim.timestep() * self.config.n_substeps as f64
    }

    /// Commands the end effector to a Cartesian target and returns the target sent
    /// to the simulator.
    ///
    /// Targets outside the cartesian bounds are clamped or rejected according to
    /// [`GenericRobotEnvConfig::bounds_policy`]. Bounds are inclusive.
    pub fn command_end_effector(&mut self, target: [f64; 3]) -> Result<[f64; 3]> {
        self.ensure_open()?;
        let site_id = self.config.robot.end_effector_site_id.ok_or_else(|| {
            RobotEnvError::config("end_effector_site_name", "no end-effector site is bound")
        })?;
        let target = match &self.config.robot.cartesian_bounds {
            Some(bounds) => bounds.enforce(target, self.config.bounds_policy)?,
            None => target,
        };
        self.sim.drive_site_to(site_id, target)?;
        debug!("End-effector target {:?}", target);
        Ok(target)
    }

    /// Renders the first camera when the render mode is [`RenderMode::RgbArray`].
    ///
    /// Returns `None` without a render mode or without any resolved camera.
    pub fn render(&mut self) -> Result<Option<RgbImage>> {
        self.ensure_open()?;
        let camera_id = match self.config.render_mode {
            Some(RenderMode::RgbArray) => self.camera_ids().first().copied(),
            None => None,
        };
        let (width, height) = (self.config.image_width, self.config.image_height);
        camera_id
            .map(|id| self.sim.render(id, width, height))
            .transpose()
    }

    /// Current observation.
    pub fn observe(&mut self) -> Result<RobotObs> {
        self.ensure_open()?;
        let robot = &self.config.robot;
        let dof_ids = robot.dof_ids.as_deref().unwrap_or(&[]);
        let qpos = self.sim.qpos();
        let qvel = self.sim.qvel();
        let joint_pos = dof_ids.iter().map(|&d| qpos[d] as f32).collect::<Array1<_>>();
        let joint_vel = dof_ids.iter().map(|&d| qvel[d] as f32).collect::<Array1<_>>();
        let ee_pos = robot.end_effector_site_id.map(|id| {
            self.sim
                .site_position(id)
                .iter()
                .map(|&x| x as f32)
                .collect::<Array1<f32>>()
        });

        let (width, height) = (self.config.image_width, self.config.image_height);
        let mut pixels = BTreeMap::new();
        if self.config.image_obs {
            let camera_ids = robot.camera_ids.as_deref().unwrap_or(&[]);
            for (name, &id) in robot.camera_names.iter().zip(camera_ids) {
                let image = self.sim.render(id, width, height)?;
                pixels.insert(name.clone(), image);
            }
        }

        Ok(RobotObs {
            joint_pos,
            joint_vel,
            ee_pos,
            pixels,
        })
    }

    fn camera_ids(&self) -> &[usize] {
        self.config.robot.camera_ids.as_deref().unwrap_or(&[])
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            Err(RobotEnvError::Closed)
        } else {
            Ok(())
        }
    }

    fn reset_state(&mut self) -> Result<RobotObs> {
        self.ensure_open()?;
        self.sim.reset();

        let dof_ids = self.config.robot.dof_ids.as_deref().unwrap_or(&[]);
        if let Some(home) = &self.config.robot.home_position {
            for (&dof, &q) in dof_ids.iter().zip(home.iter()) {
                self.sim.set_qpos(dof, q);
            }
        }
        let scale = self.config.reset_noise_scale;
        if scale > 0.0 {
            for &dof in dof_ids {
                let q = self.sim.qpos()[dof] + scale * (2.0 * self.rng.f64() - 1.0);
                self.sim.set_qpos(dof, q);
            }
        }

        self.sim.forward();
        self.sim.clear_render_cache();
        self.count_steps = 0;
        trace!("Reset {}", self.config.robot.robot_name);
        self.observe()
    }
}

impl<S: Simulator> Env for GenericRobotEnv<S> {
    type Config = GenericRobotEnvConfig;
    type Obs = RobotObs;
    type Act = RobotAct;
    type Info = RobotInfo;

    fn build(config: &Self::Config, seed: i64) -> anyhow::Result<Self> {
        Ok(Self::new(config, seed as u64)?)
    }

    fn step(&mut self, a: &Self::Act) -> anyhow::Result<(Step<Self>, Record)> {
        self.ensure_open()?;
        let actuator_ids = self.config.robot.actuator_ids.as_deref().unwrap_or(&[]);
        if a.0.len() != actuator_ids.len() {
            return Err(RobotEnvError::ActionShape {
                expected: actuator_ids.len(),
                got: a.0.len(),
            }
            .into());
        }

        for (&id, &u) in actuator_ids.iter().zip(a.0.iter()) {
            self.sim.set_ctrl(id, u as f64);
        }
        for _ in 0..self.config.n_substeps {
            self.sim.step();
        }
        self.count_steps += 1;

        let is_truncated = self
            .config
            .max_episode_steps
            .map_or(false, |max_steps| self.count_steps >= max_steps);
        let mut record = Record::empty();
        if is_truncated {
            record.insert("episode_length", Scalar(self.count_steps as _));
        }
        let info = RobotInfo {
            episode_step: self.count_steps,
        };
        let obs = self.observe()?;
        trace!(
            "Step {} of {} (t = {:.4}s)",
            self.count_steps,
            self.config.robot.robot_name,
            self.count_steps as f64 * self.dt()
        );

        Ok((
            Step::new(obs, a.clone(), 0.0, false, is_truncated, info, None),
            record,
        ))
    }

    fn reset(&mut self) -> anyhow::Result<Self::Obs> {
        Ok(self.reset_state()?)
    }

    /// `ix` reseeds the generator of the reset noise.
    fn reset_with_index(&mut self, ix: usize) -> anyhow::Result<Self::Obs> {
        self.rng.seed(ix as u64);
        self.reset()
    }

    fn observation_space(&self) -> DictSpace {
        self.observation_space.clone()
    }

    fn action_space(&self) -> BoxSpace {
        self.action_space.clone()
    }

    /// Releases the rendering context. Further calls are no-ops.
    fn close(&mut self) {
        if !self.closed {
            self.sim.close_renderer();
            self.closed = true;
            info!("Closed environment for {}", self.config.robot.robot_name);
        }
    }
}

impl<S: Simulator> Drop for GenericRobotEnv<S> {
    fn drop(&mut self) {
        self.close();
    }
}

fn spaces(
    config: &GenericRobotEnvConfig,
    robot: &RobotConfig,
    sim: &impl Simulator,
) -> Result<(DictSpace, BoxSpace)> {
    let joint_ranges = robot
        .joint_ids
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .map(|&id| sim.joint_range(id));
    let ctrl_ranges = robot
        .actuator_ids
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .map(|&id| sim.actuator_ctrl_range(id));

    let action_space = box_space("actuator_names", ctrl_ranges)?;
    let mut observation_space = DictSpace::new();
    observation_space.insert(
        "joint_pos",
        Space::Box(box_space("joint_names", joint_ranges)?),
    );
    observation_space.insert(
        "joint_vel",
        Space::Box(BoxSpace::unbounded(robot.joint_names.len())),
    );
    if robot.end_effector_site_id.is_some() {
        observation_space.insert("ee_pos", Space::Box(BoxSpace::unbounded(3)));
    }
    if config.image_obs {
        for name in &robot.camera_names {
            observation_space.insert(
                format!("pixels/{name}"),
                Space::Image {
                    height: config.image_height,
                    width: config.image_width,
                    channels: 3,
                },
            );
        }
    }
    Ok((observation_space, action_space))
}

fn box_space(field: &str, ranges: impl Iterator<Item = Option<(f64, f64)>>) -> Result<BoxSpace> {
    let (low, high): (Vec<f32>, Vec<f32>) = ranges
        .map(|r| match r {
            Some((lo, hi)) => (lo as f32, hi as f32),
            None => (f32::NEG_INFINITY, f32::INFINITY),
        })
        .unzip();
    BoxSpace::new(low, high).map_err(|e| RobotEnvError::config(field, e.to_string()))
}
