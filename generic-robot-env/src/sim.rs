//! Simulator abstraction.
//!
//! The environment never simulates anything itself. Everything physical goes
//! through [`Simulator`]: loading a model from the scene file, enumerating
//! named objects, writing controls, advancing time and rendering cameras.
use crate::error::{Result, RobotEnvError};
use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Kinds of named objects the environment binds against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// A joint.
    Joint,
    /// An actuator.
    Actuator,
    /// A site.
    Site,
    /// A camera.
    Camera,
}

impl ObjectKind {
    /// All kinds, in the order name tables are built.
    pub const ALL: [ObjectKind; 4] = [
        ObjectKind::Joint,
        ObjectKind::Actuator,
        ObjectKind::Site,
        ObjectKind::Camera,
    ];
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ObjectKind::Joint => "joint",
            ObjectKind::Actuator => "actuator",
            ObjectKind::Site => "site",
            ObjectKind::Camera => "camera",
        };
        f.write_str(s)
    }
}

/// A loaded simulation model together with its mutable state.
///
/// Ids are dense indices starting at zero within each [`ObjectKind`]. A
/// simulator instance is not reentrant; the environment owning it is the only
/// caller.
pub trait Simulator {
    /// Loads a model from the scene file.
    ///
    /// A malformed model is reported as [`RobotEnvError::ModelLoad`].
    fn load(path: &Path) -> Result<Self>
    where
        Self: Sized;

    /// Names of all objects of `kind`, indexed by id. Unnamed objects are `None`.
    fn names(&self, kind: ObjectKind) -> Vec<Option<String>>;

    /// Index of the joint's first DOF in [`Simulator::qpos`] and [`Simulator::qvel`].
    fn joint_dof_address(&self, joint_id: usize) -> usize;

    /// Position limits of a joint, `None` when unlimited.
    fn joint_range(&self, joint_id: usize) -> Option<(f64, f64)>;

    /// Control limits of an actuator, `None` when unlimited.
    fn actuator_ctrl_range(&self, actuator_id: usize) -> Option<(f64, f64)>;

    /// Restores the initial state of the model and zeroes controls.
    fn reset(&mut self);

    /// Recomputes derived quantities (site positions) after the state was written.
    fn forward(&mut self);

    /// Advances the simulation by one timestep.
    fn step(&mut self);

    /// Simulation timestep in seconds.
    fn timestep(&self) -> f64;

    /// Joint positions.
    fn qpos(&self) -> &[f64];

    /// Joint velocities.
    fn qvel(&self) -> &[f64];

    /// Writes one joint position.
    fn set_qpos(&mut self, dof: usize, value: f64);

    /// Writes one actuator control.
    fn set_ctrl(&mut self, actuator_id: usize, value: f64);

    /// World position of a site.
    fn site_position(&self, site_id: usize) -> [f64; 3];

    /// Drives a site towards a Cartesian target.
    fn drive_site_to(&mut self, site_id: usize, target: [f64; 3]) -> Result<()> {
        let _ = (site_id, target);
        Err(RobotEnvError::Unsupported("Cartesian site targets".to_string()))
    }

    /// Renders a camera into an RGB buffer of `width x height` pixels.
    fn render(&mut self, camera_id: usize, width: u32, height: u32) -> Result<RgbImage>;

    /// Drops cached render state (e.g. scene snapshots) without releasing the context.
    fn clear_render_cache(&mut self) {}

    /// Releases the rendering context.
    fn close_renderer(&mut self);
}
