//! Name-to-index binding against a loaded model.
use crate::error::{Result, RobotEnvError};
use crate::{ObjectKind, RobotConfig, Simulator};
use log::{info, warn};
use std::collections::HashMap;

/// Name lookup tables of a loaded model, one per [`ObjectKind`].
///
/// Built once per model. When a model declares the same name twice for one
/// kind, the lowest id wins.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    tables: HashMap<ObjectKind, HashMap<String, usize>>,
}

impl NameTable {
    /// Collects the names of every object kind from `model`.
    pub fn from_model(model: &impl Simulator) -> Self {
        let tables = ObjectKind::ALL
            .iter()
            .map(|&kind| {
                let mut table = HashMap::new();
                for (id, name) in model.names(kind).into_iter().enumerate() {
                    if let Some(name) = name {
                        table.entry(name).or_insert(id);
                    }
                }
                (kind, table)
            })
            .collect();
        Self { tables }
    }

    /// Returns the id of `name`, if the model declares it.
    pub fn get(&self, kind: ObjectKind, name: &str) -> Option<usize> {
        self.tables.get(&kind).and_then(|t| t.get(name)).copied()
    }

    /// Returns the id of `name`, failing with [`RobotEnvError::MissingName`].
    pub fn lookup(&self, kind: ObjectKind, name: &str) -> Result<usize> {
        self.get(kind, name).ok_or_else(|| RobotEnvError::MissingName {
            kind,
            name: name.to_string(),
        })
    }

    fn lookup_all(&self, kind: ObjectKind, names: &[String]) -> Result<Vec<usize>> {
        names.iter().map(|name| self.lookup(kind, name)).collect()
    }
}

impl RobotConfig {
    /// Resolves every declared name against `model` and returns the bound configuration.
    ///
    /// Joints, actuators, the end-effector site and the gripper actuator must
    /// all exist in the model. Cameras the model does not declare are dropped
    /// with a warning.
    pub fn bind(&self, model: &impl Simulator) -> Result<RobotConfig> {
        if self.joint_names.is_empty() {
            return Err(RobotEnvError::config("joint_names", "no joint declared"));
        }
        if self.actuator_names.is_empty() {
            return Err(RobotEnvError::config("actuator_names", "no actuator declared"));
        }
        self.validate_home_position()?;

        let table = NameTable::from_model(model);

        let joint_ids = table.lookup_all(ObjectKind::Joint, &self.joint_names)?;
        let dof_ids = joint_ids
            .iter()
            .map(|&joint_id| model.joint_dof_address(joint_id))
            .collect();
        let actuator_ids = table.lookup_all(ObjectKind::Actuator, &self.actuator_names)?;
        let end_effector_site_id = self
            .end_effector_site_name
            .as_deref()
            .map(|name| table.lookup(ObjectKind::Site, name))
            .transpose()?;
        let gripper_actuator_id = self
            .gripper_actuator_name
            .as_deref()
            .map(|name| table.lookup(ObjectKind::Actuator, name))
            .transpose()?;

        let mut camera_names = vec![];
        let mut camera_ids = vec![];
        for name in &self.camera_names {
            match table.get(ObjectKind::Camera, name) {
                Some(id) => {
                    camera_names.push(name.clone());
                    camera_ids.push(id);
                }
                None => warn!(
                    "{}: camera `{}` does not exist in the loaded model, dropped",
                    self.robot_name, name
                ),
            }
        }
        if camera_names.is_empty() {
            info!("{}: no camera available for image observations", self.robot_name);
        }

        Ok(RobotConfig {
            camera_names,
            joint_ids: Some(joint_ids),
            dof_ids: Some(dof_ids),
            actuator_ids: Some(actuator_ids),
            end_effector_site_id,
            gripper_actuator_id,
            camera_ids: Some(camera_ids),
            ..self.clone()
        })
    }
}
