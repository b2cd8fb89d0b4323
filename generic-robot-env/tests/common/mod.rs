#![allow(dead_code)]
use std::{fs, path::PathBuf};
use tempdir::TempDir;

pub const ARM: &str = r#"<mujoco model="two_link">
  <option timestep="0.01"/>
  <worldbody>
    <camera name="top" pos="0 0 1.5"/>
    <body name="link1" pos="0 0 0.1">
      <joint name="j1" axis="0 0 1" range="-3.14 3.14"/>
      <body name="link2" pos="0 0 0.3">
        <joint name="j2" type="slide" axis="1 0 0" range="-1 1"/>
        <site name="ee_site" pos="0 0 0.2"/>
      </body>
    </body>
  </worldbody>
  <actuator>
    <position name="a1" joint="j1" kp="20" ctrlrange="-3 3"/>
    <position name="a2" joint="j2" kp="20" ctrlrange="-1 1"/>
  </actuator>
  <keyframe>
    <key name="home" qpos="0.0 0.5"/>
  </keyframe>
  <custom>
    <numeric name="cartesian_bounds" data="-0.5 -0.5 0 0.5 0.5 1"/>
  </custom>
</mujoco>"#;

pub const SCENE: &str = r#"<mujoco model="scene">
  <include file="robot/arm.xml"/>
  <worldbody>
    <light pos="0 0 3"/>
    <geom name="floor" type="plane" size="1 1 0.1"/>
  </worldbody>
</mujoco>"#;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Writes the two-link scene into a fresh directory and returns the directory
/// (kept alive by the caller) and the path of `scene.xml`.
pub fn write_scene() -> anyhow::Result<(TempDir, PathBuf)> {
    let dir = TempDir::new("generic_robot_env")?;
    fs::create_dir_all(dir.path().join("robot"))?;
    fs::write(dir.path().join("robot/arm.xml"), ARM)?;
    let scene = dir.path().join("scene.xml");
    fs::write(&scene, SCENE)?;
    Ok((dir, scene))
}
