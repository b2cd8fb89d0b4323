//! Extraction of a [`RobotConfig`] from an MJCF scene description.
//!
//! This is pure document parsing: no simulator is loaded. Names are collected
//! from the include-expanded tree in document order, first occurrence wins.
//!
//! Besides the standard MJCF elements, the optional parts of the configuration
//! may be declared explicitly with MuJoCo's `<custom>` section:
//!
//! ```xml
//! <custom>
//!   <text name="end_effector_site" data="attachment_site"/>
//!   <text name="gripper_actuator" data="fingers_actuator"/>
//!   <numeric name="home_position" data="0 0.3 0 -1.57 0 2.0 -0.8"/>
//!   <numeric name="cartesian_bounds" data="0.2 -0.3 0.0 0.6 0.3 0.5"/>
//! </custom>
//! ```
use crate::error::{Result, RobotEnvError};
use crate::include::resolve_includes;
use crate::xml::{parse_f64_list, XmlElement};
use crate::{CartesianBounds, RobotConfig};
use log::{debug, info};
use std::collections::HashSet;
use std::path::Path;

/// Element names of MJCF actuators.
pub(crate) const ACTUATOR_TAGS: [&str; 9] = [
    "motor",
    "position",
    "velocity",
    "general",
    "intvelocity",
    "damper",
    "cylinder",
    "muscle",
    "adhesion",
];

const EE_SITE_KEYWORDS: [&str; 5] = ["end_effector", "attachment_site", "tcp", "pinch", "grasp"];
const GRIPPER_KEYWORDS: [&str; 4] = ["gripper", "finger", "hand", "claw"];

/// Builds an unbound [`RobotConfig`] from the scene at `path`.
///
/// * Joints: named hinge and slide joints inside `<worldbody>`.
/// * Actuators: named children of `<actuator>` sections.
/// * End-effector site: `<custom><text name="end_effector_site">`, else the first
///   site whose name looks like an end effector.
/// * Gripper actuator: `<custom><text name="gripper_actuator">`, else the first
///   actuator whose name looks like a gripper.
/// * Home position: `<custom><numeric name="home_position">`, else the `qpos` of
///   `<key name="home">`. Must have one value per joint.
/// * Cartesian bounds: `<custom><numeric name="cartesian_bounds">`.
/// * Cameras: named cameras inside `<worldbody>`.
pub fn extract_config_from_xml(
    path: impl AsRef<Path>,
    robot_name: impl Into<String>,
) -> Result<RobotConfig> {
    let path = path.as_ref();
    let robot_name = robot_name.into();
    let root = resolve_includes(path)?;
    let xml_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

    let worldbody: Vec<&XmlElement> = root
        .declarations()
        .filter(|e| e.name == "worldbody")
        .flat_map(|w| w.declarations())
        .collect();

    let joint_names = unique_names(worldbody.iter().copied().filter(|e| {
        e.name == "joint" && is_scalar_joint(e)
    }));
    let actuators: Vec<&XmlElement> = root
        .declarations()
        .filter(|e| e.name == "actuator")
        .flat_map(|a| a.children.iter())
        .filter(|e| ACTUATOR_TAGS.contains(&e.name.as_str()))
        .collect();
    let actuator_names = unique_names(actuators.iter().copied());
    let camera_names = unique_names(worldbody.iter().copied().filter(|e| e.name == "camera"));

    let end_effector_site_name = custom_text(&root, "end_effector_site").or_else(|| {
        worldbody
            .iter()
            .filter(|e| e.name == "site")
            .filter_map(|e| e.attr("name"))
            .find(|name| looks_like_end_effector(name))
            .map(str::to_string)
    });
    let gripper_actuator_name = custom_text(&root, "gripper_actuator").or_else(|| {
        actuator_names
            .iter()
            .find(|name| {
                let name = name.to_lowercase();
                GRIPPER_KEYWORDS.iter().any(|k| name.contains(k))
            })
            .cloned()
    });

    let home_position = match custom_numeric(&root, "home_position")? {
        Some(values) => Some(values),
        None => home_keyframe(&root)?,
    };
    let cartesian_bounds = custom_numeric(&root, "cartesian_bounds")?
        .map(|values| CartesianBounds::from_flat(&values))
        .transpose()?;

    let config = RobotConfig::new(robot_name, xml_path, joint_names, actuator_names)
        .end_effector_site_name(end_effector_site_name)
        .gripper_actuator_name(gripper_actuator_name)
        .home_position(home_position)
        .cartesian_bounds(cartesian_bounds)
        .camera_names(camera_names);
    config.validate_home_position()?;

    info!(
        "Extracted {}: {} joints, {} actuators, {} cameras",
        config.robot_name,
        config.joint_names.len(),
        config.actuator_names.len(),
        config.camera_names.len()
    );
    Ok(config)
}

/// Hinge (the MJCF default) and slide joints have one scalar DOF.
pub(crate) fn is_scalar_joint(joint: &XmlElement) -> bool {
    matches!(joint.attr("type"), None | Some("hinge") | Some("slide"))
}

fn unique_names<'a>(elements: impl Iterator<Item = &'a XmlElement>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = vec![];
    for element in elements {
        match element.attr("name") {
            Some(name) if seen.insert(name) => names.push(name.to_string()),
            Some(name) => debug!("Skipping duplicate <{}> `{}`", element.name, name),
            None => debug!("Skipping unnamed <{}>", element.name),
        }
    }
    names
}

fn looks_like_end_effector(name: &str) -> bool {
    let name = name.to_lowercase();
    EE_SITE_KEYWORDS.iter().any(|k| name.contains(k))
        || name.split(|c| c == '_' || c == '-' || c == '.').any(|t| t == "ee")
}

fn custom_entry<'a>(root: &'a XmlElement, tag: &str, name: &str) -> Option<&'a XmlElement> {
    root.declarations()
        .filter(|e| e.name == "custom")
        .flat_map(|c| c.children.iter())
        .find(|e| e.name == tag && e.attr("name") == Some(name))
}

fn custom_text(root: &XmlElement, name: &str) -> Option<String> {
    custom_entry(root, "text", name)
        .and_then(|e| e.attr("data"))
        .map(|data| data.trim().to_string())
        .filter(|data| !data.is_empty())
}

fn custom_numeric(root: &XmlElement, name: &str) -> Result<Option<Vec<f64>>> {
    custom_entry(root, "numeric", name)
        .and_then(|e| e.attr("data"))
        .map(|data| parse_numbers(name, data))
        .transpose()
}

fn home_keyframe(root: &XmlElement) -> Result<Option<Vec<f64>>> {
    root.declarations()
        .filter(|e| e.name == "keyframe")
        .flat_map(|k| k.children_named("key"))
        .find(|k| k.attr("name") == Some("home"))
        .and_then(|k| k.attr("qpos"))
        .map(|qpos| parse_numbers("home_position", qpos))
        .transpose()
}

fn parse_numbers(field: &str, data: &str) -> Result<Vec<f64>> {
    parse_f64_list(data)
        .ok_or_else(|| RobotEnvError::config(field, format!("`{data}` is not a list of numbers")))
}
