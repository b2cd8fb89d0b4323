//! Kinematic reference backend.
//!
//! [`KinematicSim`] loads the same scene description as the extraction and
//! integrates joint positions directly from the actuator controls. There is
//! no inertia, no contact and no orientation: a body's world position is the
//! sum of the `pos` offsets of its ancestors plus the translations of slide
//! joints. Actuators respond per kind:
//!
//! * `position`, and `general` with `biastype="affine"`: first-order tracking of
//!   the control with rate `min(kp * timestep, 1)`,
//! * `velocity`: the control is the joint velocity,
//! * every other kind: acceleration `gear * ctrl - damping * qvel`.
//!
//! Rendering produces a synthetic frame: a background tinted per camera and one
//! vertical bar per joint whose height follows the joint position.
use crate::error::{Result, RobotEnvError};
use crate::extract::{is_scalar_joint, ACTUATOR_TAGS};
use crate::include::resolve_includes;
use crate::xml::{parse_f64_list, XmlElement};
use crate::{ObjectKind, Simulator};
use image::{Rgb, RgbImage};
use log::{debug, info, trace};
use std::collections::{HashMap, HashSet};
use std::path::Path;

const DEFAULT_TIMESTEP: f64 = 0.002;

const BAR_COLORS: [[u8; 3]; 6] = [
    [230, 80, 60],
    [60, 170, 90],
    [70, 110, 220],
    [235, 190, 50],
    [170, 80, 200],
    [50, 190, 200],
];

#[derive(Debug, Clone)]
struct Body {
    parent: Option<usize>,
    pos: [f64; 3],
}

#[derive(Debug, Clone)]
struct Joint {
    name: Option<String>,
    body: usize,
    slide: bool,
    axis: [f64; 3],
    qpos0: f64,
    range: Option<(f64, f64)>,
    damping: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Response {
    Servo { kp: f64 },
    Velocity,
    Force { gear: f64 },
}

#[derive(Debug, Clone)]
struct Actuator {
    name: Option<String>,
    joint: Option<usize>,
    response: Response,
    ctrl_range: Option<(f64, f64)>,
}

/// A site or a camera, fixed to a body.
#[derive(Debug, Clone)]
struct Frame {
    name: Option<String>,
    body: usize,
    pos: [f64; 3],
}

#[derive(Debug, Default)]
struct RenderContext {
    backgrounds: HashMap<(usize, u32, u32), RgbImage>,
}

/// Kinematic [`Simulator`] over MJCF scene descriptions.
#[derive(Debug)]
pub struct KinematicSim {
    timestep: f64,
    bodies: Vec<Body>,
    joints: Vec<Joint>,
    actuators: Vec<Actuator>,
    sites: Vec<Frame>,
    cameras: Vec<Frame>,
    time: f64,
    qpos: Vec<f64>,
    qvel: Vec<f64>,
    ctrl: Vec<f64>,
    site_xpos: Vec<[f64; 3]>,
    site_targets: Vec<Option<[f64; 3]>>,
    render_context: Option<RenderContext>,
}

impl KinematicSim {
    /// Builds a model from an include-expanded scene tree.
    pub fn from_element(root: &XmlElement) -> Result<Self> {
        let mut builder = ModelBuilder::default();
        let worldbodies: Vec<&XmlElement> = root
            .declarations()
            .filter(|e| e.name == "worldbody")
            .collect();
        if worldbodies.is_empty() {
            return Err(load_error("the scene has no <worldbody>"));
        }
        for worldbody in worldbodies {
            builder.walk(worldbody, 0)?;
        }
        for section in root.declarations().filter(|e| e.name == "actuator") {
            for element in &section.children {
                if ACTUATOR_TAGS.contains(&element.name.as_str()) {
                    builder.add_actuator(element)?;
                }
            }
        }

        let timestep = match root.declarations().find(|e| e.name == "option") {
            Some(option) => scalar(option, "timestep")?.unwrap_or(DEFAULT_TIMESTEP),
            None => DEFAULT_TIMESTEP,
        };
        if timestep.is_nan() || timestep <= 0.0 {
            return Err(load_error(format!("invalid timestep {timestep}")));
        }

        let mut sim = Self {
            timestep,
            qpos: builder.joints.iter().map(|j| j.qpos0).collect(),
            qvel: vec![0.0; builder.joints.len()],
            ctrl: vec![0.0; builder.actuators.len()],
            site_xpos: vec![[0.0; 3]; builder.sites.len()],
            site_targets: vec![None; builder.sites.len()],
            bodies: builder.bodies,
            joints: builder.joints,
            actuators: builder.actuators,
            sites: builder.sites,
            cameras: builder.cameras,
            time: 0.0,
            render_context: None,
        };
        sim.forward();
        Ok(sim)
    }

    /// Simulated time in seconds since the last reset.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Actuator controls, after clamping to their control ranges.
    pub fn ctrl(&self) -> &[f64] {
        &self.ctrl
    }

    /// Returns `true` while a rendering context is held.
    pub fn has_render_context(&self) -> bool {
        self.render_context.is_some()
    }

    fn background(&self, camera_id: usize, width: u32, height: u32) -> RgbImage {
        let seed = self.cameras[camera_id]
            .name
            .as_deref()
            .unwrap_or("")
            .bytes()
            .fold(camera_id as u32, |h, b| h.wrapping_mul(31).wrapping_add(b as u32));
        let tint = [
            40 + (seed % 80) as u8,
            40 + (seed / 80 % 80) as u8,
            60 + (seed / 6400 % 80) as u8,
        ];
        RgbImage::from_fn(width, height, |_, y| {
            // vertical gradient, darker towards the floor
            let shade = 1.0 - 0.5 * y as f32 / height as f32;
            Rgb(tint.map(|c| (c as f32 * shade) as u8))
        })
    }

    fn bar_fraction(&self, joint_id: usize) -> f64 {
        let q = self.qpos[joint_id];
        let fraction = match self.joints[joint_id].range {
            Some((lo, hi)) if hi > lo => (q - lo) / (hi - lo),
            _ => 0.5 + 0.5 * q.tanh(),
        };
        fraction.clamp(0.0, 1.0)
    }
}

impl Simulator for KinematicSim {
    fn load(path: &Path) -> Result<Self> {
        let root = resolve_includes(path).map_err(|e| load_error(e.to_string()))?;
        let sim = Self::from_element(&root)?;
        info!(
            "Loaded {}: {} joints, {} actuators, {} sites, {} cameras",
            path.display(),
            sim.joints.len(),
            sim.actuators.len(),
            sim.sites.len(),
            sim.cameras.len()
        );
        Ok(sim)
    }

    fn names(&self, kind: ObjectKind) -> Vec<Option<String>> {
        match kind {
            ObjectKind::Joint => self.joints.iter().map(|j| j.name.clone()).collect(),
            ObjectKind::Actuator => self.actuators.iter().map(|a| a.name.clone()).collect(),
            ObjectKind::Site => self.sites.iter().map(|s| s.name.clone()).collect(),
            ObjectKind::Camera => self.cameras.iter().map(|c| c.name.clone()).collect(),
        }
    }

    fn joint_dof_address(&self, joint_id: usize) -> usize {
        // only scalar joints are modelled, one DOF each
        joint_id
    }

    fn joint_range(&self, joint_id: usize) -> Option<(f64, f64)> {
        self.joints.get(joint_id).and_then(|j| j.range)
    }

    fn actuator_ctrl_range(&self, actuator_id: usize) -> Option<(f64, f64)> {
        self.actuators.get(actuator_id).and_then(|a| a.ctrl_range)
    }

    fn reset(&mut self) {
        self.time = 0.0;
        for (q, joint) in self.qpos.iter_mut().zip(self.joints.iter()) {
            *q = joint.qpos0;
        }
        self.qvel.iter_mut().for_each(|v| *v = 0.0);
        self.ctrl.iter_mut().for_each(|c| *c = 0.0);
        self.site_targets.iter_mut().for_each(|t| *t = None);
        self.forward();
    }

    fn forward(&mut self) {
        let mut offsets = vec![[0.0; 3]; self.bodies.len()];
        for (i, joint) in self.joints.iter().enumerate() {
            if joint.slide {
                let d = self.qpos[i] - joint.qpos0;
                for k in 0..3 {
                    offsets[joint.body][k] += d * joint.axis[k];
                }
            }
        }

        // parents precede their children
        let mut xpos = vec![[0.0; 3]; self.bodies.len()];
        for (b, body) in self.bodies.iter().enumerate() {
            let origin = body.parent.map_or([0.0; 3], |p| xpos[p]);
            xpos[b] = add(add(origin, body.pos), offsets[b]);
        }

        for (site, pos) in self.sites.iter().zip(self.site_xpos.iter_mut()) {
            *pos = add(xpos[site.body], site.pos);
        }
    }

    fn step(&mut self) {
        let dt = self.timestep;
        let n = self.joints.len();
        let mut acc: Vec<f64> = (0..n).map(|i| -self.joints[i].damping * self.qvel[i]).collect();
        let mut velocity = vec![None; n];
        let mut servo = vec![None; n];

        for (actuator, &ctrl) in self.actuators.iter().zip(self.ctrl.iter()) {
            let Some(j) = actuator.joint else { continue };
            match actuator.response {
                Response::Servo { kp } => servo[j] = Some((ctrl, (kp * dt).min(1.0))),
                Response::Velocity => velocity[j] = Some(ctrl),
                Response::Force { gear } => acc[j] += gear * ctrl,
            }
        }

        for i in 0..n {
            let q = self.qpos[i];
            let mut next = if let Some((target, rate)) = servo[i] {
                q + rate * (target - q)
            } else if let Some(v) = velocity[i] {
                q + v * dt
            } else {
                q + (self.qvel[i] + acc[i] * dt) * dt
            };
            let mut qvel = (next - q) / dt;
            if let Some((lo, hi)) = self.joints[i].range {
                if next <= lo || next >= hi {
                    next = next.clamp(lo, hi);
                    qvel = 0.0;
                }
            }
            self.qpos[i] = next;
            self.qvel[i] = qvel;
        }

        self.time += dt;
        self.forward();
        trace!("t = {:.4}, qpos = {:?}", self.time, self.qpos);
    }

    fn timestep(&self) -> f64 {
        self.timestep
    }

    fn qpos(&self) -> &[f64] {
        &self.qpos
    }

    fn qvel(&self) -> &[f64] {
        &self.qvel
    }

    fn set_qpos(&mut self, dof: usize, value: f64) {
        if let Some(q) = self.qpos.get_mut(dof) {
            *q = value;
        }
    }

    fn set_ctrl(&mut self, actuator_id: usize, value: f64) {
        let range = self.actuator_ctrl_range(actuator_id);
        if let Some(c) = self.ctrl.get_mut(actuator_id) {
            *c = match range {
                Some((lo, hi)) => value.clamp(lo, hi),
                None => value,
            };
        }
    }

    fn site_position(&self, site_id: usize) -> [f64; 3] {
        self.site_targets[site_id].unwrap_or(self.site_xpos[site_id])
    }

    fn drive_site_to(&mut self, site_id: usize, target: [f64; 3]) -> Result<()> {
        let slot = self
            .site_targets
            .get_mut(site_id)
            .ok_or_else(|| RobotEnvError::Unsupported(format!("site id {site_id}")))?;
        *slot = Some(target);
        Ok(())
    }

    fn render(&mut self, camera_id: usize, width: u32, height: u32) -> Result<RgbImage> {
        if camera_id >= self.cameras.len() {
            return Err(RobotEnvError::Render(format!("no camera with id {camera_id}")));
        }
        if width == 0 || height == 0 {
            return Err(RobotEnvError::Render(format!(
                "invalid image size {width}x{height}"
            )));
        }

        let cached = self
            .render_context
            .as_ref()
            .and_then(|ctx| ctx.backgrounds.get(&(camera_id, width, height)))
            .cloned();
        let mut frame = match cached {
            Some(frame) => frame,
            None => {
                let frame = self.background(camera_id, width, height);
                self.render_context
                    .get_or_insert_with(RenderContext::default)
                    .backgrounds
                    .insert((camera_id, width, height), frame.clone());
                frame
            }
        };

        let n = self.joints.len() as u32;
        for i in 0..n.min(width) {
            let x0 = i * width / n;
            let x1 = ((i + 1) * width / n).max(x0 + 1);
            let bar = (self.bar_fraction(i as usize) * height as f64).round() as u32;
            let color = Rgb(BAR_COLORS[i as usize % BAR_COLORS.len()]);
            for x in x0..x1.min(width) {
                for y in height - bar.min(height)..height {
                    frame.put_pixel(x, y, color);
                }
            }
        }
        Ok(frame)
    }

    fn clear_render_cache(&mut self) {
        if let Some(ctx) = self.render_context.as_mut() {
            ctx.backgrounds.clear();
        }
    }

    fn close_renderer(&mut self) {
        if self.render_context.take().is_some() {
            debug!("Released render context");
        }
    }
}

struct ModelBuilder {
    bodies: Vec<Body>,
    joints: Vec<Joint>,
    joint_ids: HashMap<String, usize>,
    other_joints: HashSet<String>,
    actuators: Vec<Actuator>,
    sites: Vec<Frame>,
    cameras: Vec<Frame>,
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self {
            // body 0 is the world
            bodies: vec![Body {
                parent: None,
                pos: [0.0; 3],
            }],
            joints: vec![],
            joint_ids: HashMap::new(),
            other_joints: HashSet::new(),
            actuators: vec![],
            sites: vec![],
            cameras: vec![],
        }
    }
}

impl ModelBuilder {
    fn walk(&mut self, element: &XmlElement, body: usize) -> Result<()> {
        for child in &element.children {
            match child.name.as_str() {
                "body" => {
                    let id = self.bodies.len();
                    self.bodies.push(Body {
                        parent: Some(body),
                        pos: vec3(child, "pos")?.unwrap_or_default(),
                    });
                    self.walk(child, id)?;
                }
                "joint" if is_scalar_joint(child) => self.add_joint(child, body)?,
                "joint" | "freejoint" => {
                    if let Some(name) = child.attr("name") {
                        self.other_joints.insert(name.to_string());
                    }
                }
                "site" => self.sites.push(frame(child, body)?),
                "camera" => self.cameras.push(frame(child, body)?),
                "default" => {}
                _ => self.walk(child, body)?,
            }
        }
        Ok(())
    }

    fn add_joint(&mut self, element: &XmlElement, body: usize) -> Result<()> {
        let name = element.attr("name").map(str::to_string);
        if let Some(name) = &name {
            self.joint_ids.entry(name.clone()).or_insert(self.joints.len());
        }
        let axis = vec3(element, "axis")?.unwrap_or([0.0, 0.0, 1.0]);
        let norm = axis.iter().map(|a| a * a).sum::<f64>().sqrt();
        if norm == 0.0 {
            return Err(load_error(format!("joint {name:?} has a zero axis")));
        }
        self.joints.push(Joint {
            name,
            body,
            slide: element.attr("type") == Some("slide"),
            axis: axis.map(|a| a / norm),
            qpos0: scalar(element, "ref")?.unwrap_or(0.0),
            range: range(element, "range", "limited")?,
            damping: scalar(element, "damping")?.unwrap_or(0.0),
        });
        Ok(())
    }

    fn add_actuator(&mut self, element: &XmlElement) -> Result<()> {
        let name = element.attr("name").map(str::to_string);
        let joint = match element.attr("joint") {
            Some(joint) => match self.joint_ids.get(joint) {
                Some(&id) => Some(id),
                None if self.other_joints.contains(joint) => None,
                None => {
                    return Err(load_error(format!(
                        "actuator {name:?} references unknown joint `{joint}`"
                    )))
                }
            },
            None => None,
        };
        if joint.is_none() {
            debug!("Actuator {name:?} drives no scalar joint and has no effect");
        }

        let response = match element.name.as_str() {
            "position" => Response::Servo {
                kp: scalar(element, "kp")?.unwrap_or(1.0),
            },
            "general" if element.attr("biastype") == Some("affine") => Response::Servo {
                kp: scalar(element, "gainprm")?.unwrap_or(1.0),
            },
            "velocity" => Response::Velocity,
            _ => Response::Force {
                gear: scalar(element, "gear")?.unwrap_or(1.0),
            },
        };

        self.actuators.push(Actuator {
            name,
            joint,
            response,
            ctrl_range: range(element, "ctrlrange", "ctrllimited")?,
        });
        Ok(())
    }
}

fn frame(element: &XmlElement, body: usize) -> Result<Frame> {
    Ok(Frame {
        name: element.attr("name").map(str::to_string),
        body,
        pos: vec3(element, "pos")?.unwrap_or_default(),
    })
}

fn numbers(element: &XmlElement, key: &str) -> Result<Option<Vec<f64>>> {
    element
        .attr(key)
        .map(|value| {
            parse_f64_list(value).ok_or_else(|| {
                load_error(format!(
                    "<{} {key}=\"{value}\">: not a list of numbers",
                    element.name
                ))
            })
        })
        .transpose()
}

fn scalar(element: &XmlElement, key: &str) -> Result<Option<f64>> {
    Ok(numbers(element, key)?.and_then(|v| v.first().copied()))
}

fn vec3(element: &XmlElement, key: &str) -> Result<Option<[f64; 3]>> {
    match numbers(element, key)? {
        Some(v) if v.len() == 3 => Ok(Some([v[0], v[1], v[2]])),
        Some(v) => Err(load_error(format!(
            "<{} {key}>: expected 3 values, got {}",
            element.name,
            v.len()
        ))),
        None => Ok(None),
    }
}

/// A `lo hi` pair; `limited="false"` and the empty range `0 0` mean unlimited.
fn range(element: &XmlElement, key: &str, limited_key: &str) -> Result<Option<(f64, f64)>> {
    if element.attr(limited_key) == Some("false") {
        return Ok(None);
    }
    match numbers(element, key)?.as_deref() {
        Some(&[lo, hi]) if lo.is_nan() || hi.is_nan() => Err(load_error(format!(
            "<{} {key}>: bounds {lo} {hi} are not numbers",
            element.name
        ))),
        Some(&[lo, hi]) if lo > hi => Err(load_error(format!(
            "<{} {key}>: lower bound {lo} exceeds upper bound {hi}",
            element.name
        ))),
        Some(&[lo, hi]) if lo == hi => Ok(None),
        Some(&[lo, hi]) => Ok(Some((lo, hi))),
        Some(v) => Err(load_error(format!(
            "<{} {key}>: expected 2 values, got {}",
            element.name,
            v.len()
        ))),
        None => Ok(None),
    }
}

fn add(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

fn load_error(message: impl Into<String>) -> RobotEnvError {
    RobotEnvError::ModelLoad(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim(xml: &str) -> Result<KinematicSim> {
        KinematicSim::from_element(&XmlElement::parse_str(xml, Path::new("scene.xml"))?)
    }

    const SCENE: &str = r#"<mujoco>
      <option timestep="0.01"/>
      <worldbody>
        <camera name="top" pos="0 0 2"/>
        <body name="carriage" pos="0 0 0.5">
          <joint name="rail" type="slide" axis="2 0 0" range="-1 1"/>
          <body name="arm" pos="0 0 0.25">
            <joint name="elbow" range="-1.5 1.5" damping="2"/>
            <site name="tcp" pos="0.1 0 0"/>
          </body>
        </body>
        <body name="tool">
          <joint name="spin" ref="0.3"/>
        </body>
      </worldbody>
      <actuator>
        <position name="rail_servo" joint="rail" kp="50" ctrlrange="-0.5 0.5"/>
        <motor name="elbow_motor" joint="elbow" gear="2"/>
        <velocity name="spin_vel" joint="spin"/>
      </actuator>
    </mujoco>"#;

    #[test]
    fn test_load_model() {
        let sim = sim(SCENE).unwrap();
        assert_eq!(sim.timestep(), 0.01);
        assert_eq!(
            sim.names(ObjectKind::Joint),
            vec![
                Some("rail".to_string()),
                Some("elbow".to_string()),
                Some("spin".to_string())
            ]
        );
        assert_eq!(sim.names(ObjectKind::Actuator).len(), 3);
        assert_eq!(sim.qpos(), &[0.0, 0.0, 0.3]);
        assert_eq!(sim.joint_range(0), Some((-1.0, 1.0)));
        assert_eq!(sim.joint_range(2), None);
        assert_eq!(sim.actuator_ctrl_range(0), Some((-0.5, 0.5)));
        assert_eq!(sim.site_position(0), [0.1, 0.0, 0.75]);
    }

    #[test]
    fn test_actuator_responses() {
        let mut sim = sim(SCENE).unwrap();
        sim.set_ctrl(0, 2.0);
        assert_eq!(sim.ctrl()[0], 0.5);
        sim.set_ctrl(2, 1.0);
        for _ in 0..100 {
            sim.step();
        }
        assert!((sim.time() - 1.0).abs() < 1e-9);

        // the servo converges to the clamped control, the slide axis is normalized
        assert!((sim.qpos()[0] - 0.5).abs() < 1e-6);
        let tcp = sim.site_position(0);
        assert!((tcp[0] - 0.6).abs() < 1e-6, "{tcp:?}");
        // velocity control integrates the control
        assert!((sim.qpos()[2] - 1.3).abs() < 1e-9);

        // the motor pushes the elbow into its upper limit
        sim.set_ctrl(1, 100.0);
        for _ in 0..100 {
            sim.step();
        }
        assert_eq!(sim.qpos()[1], 1.5);
        assert_eq!(sim.qvel()[1], 0.0);

        sim.reset();
        assert_eq!(sim.qpos(), &[0.0, 0.0, 0.3]);
        assert_eq!(sim.ctrl(), &[0.0, 0.0, 0.0]);
        assert_eq!(sim.time(), 0.0);
    }

    #[test]
    fn test_site_targets_last_until_reset() {
        let mut sim = sim(SCENE).unwrap();
        sim.drive_site_to(0, [0.3, 0.2, 0.1]).unwrap();
        sim.step();
        assert_eq!(sim.site_position(0), [0.3, 0.2, 0.1]);
        sim.reset();
        assert_eq!(sim.site_position(0), [0.1, 0.0, 0.75]);
        assert!(sim.drive_site_to(7, [0.0; 3]).is_err());
    }

    #[test]
    fn test_render() {
        let mut sim = sim(SCENE).unwrap();
        assert!(!sim.has_render_context());
        let a = sim.render(0, 32, 24).unwrap();
        assert_eq!(a.dimensions(), (32, 24));
        assert!(sim.has_render_context());
        assert_eq!(sim.render(0, 32, 24).unwrap(), a);

        sim.set_qpos(1, 1.5);
        let b = sim.render(0, 32, 24).unwrap();
        assert_ne!(a, b);

        assert!(matches!(sim.render(1, 32, 24), Err(RobotEnvError::Render(_))));
        assert!(matches!(sim.render(0, 0, 24), Err(RobotEnvError::Render(_))));

        sim.clear_render_cache();
        assert!(sim.has_render_context());
        sim.close_renderer();
        assert!(!sim.has_render_context());
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            sim("<mujoco><actuator/></mujoco>"),
            Err(RobotEnvError::ModelLoad(_))
        ));
        assert!(matches!(
            sim(
                r#"<mujoco><worldbody/><actuator><motor name="m" joint="ghost"/></actuator></mujoco>"#
            ),
            Err(RobotEnvError::ModelLoad(_))
        ));
        assert!(matches!(
            sim(r#"<mujoco><worldbody><joint name="j" range="1 0"/></worldbody></mujoco>"#),
            Err(RobotEnvError::ModelLoad(_))
        ));
        assert!(matches!(
            sim(r#"<mujoco><worldbody><joint name="j" range="nan 1"/></worldbody></mujoco>"#),
            Err(RobotEnvError::ModelLoad(_))
        ));
        assert!(matches!(
            sim(r#"<mujoco>
                  <worldbody><joint name="j"/></worldbody>
                  <actuator><motor name="m" joint="j" ctrlrange="nan 1"/></actuator>
                </mujoco>"#),
            Err(RobotEnvError::ModelLoad(_))
        ));
        // ball joints are not modelled, their actuators are inert
        let sim = sim(r#"<mujoco>
              <worldbody><body><joint name="wrist" type="ball"/></body></worldbody>
              <actuator><motor name="m" joint="wrist"/></actuator>
            </mujoco>"#)
        .unwrap();
        assert!(sim.names(ObjectKind::Joint).is_empty());
        assert_eq!(sim.names(ObjectKind::Actuator), vec![Some("m".to_string())]);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            KinematicSim::load(Path::new("/nonexistent/scene.xml")),
            Err(RobotEnvError::ModelLoad(_))
        ));
    }
}
