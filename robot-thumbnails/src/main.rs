//! Renders one thumbnail per camera and a JSON configuration summary for every
//! robot of a model catalog.
//!
//! The catalog is a directory with one sub-directory per robot, each holding a
//! `scene.xml` (the layout of MuJoCo Menagerie). For a robot `panda` with a
//! camera `top`, the output directory receives `panda_top.png` and
//! `panda.json`.
use anyhow::{Context, Result};
use clap::Parser;
use generic_robot_env::{
    GenericRobotArmEnv, GenericRobotEnvConfig, RenderMode, RobotAct, RobotConfig,
};
use log::{error, info, warn};
use robot_env_core::Env;
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Directory with one sub-directory per robot
    #[arg(long, default_value = "mujoco_menagerie")]
    models_dir: PathBuf,

    /// Directory receiving thumbnails and configuration summaries
    #[arg(long, default_value = "thumbnails")]
    output_dir: PathBuf,

    /// Thumbnail width in pixels
    #[arg(long, default_value_t = 128)]
    width: u32,

    /// Thumbnail height in pixels
    #[arg(long, default_value_t = 128)]
    height: u32,
}

/// Counts of robots per outcome.
#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    processed: usize,
    skipped: usize,
    failed: usize,
}

enum Outcome {
    Processed,
    Skipped,
}

fn generate_thumbnails(args: &Args) -> Result<Summary> {
    let mut summary = Summary::default();
    if !args.models_dir.is_dir() {
        error!("Directory {} does not exist.", args.models_dir.display());
        return Ok(summary);
    }
    fs::create_dir_all(&args.output_dir)?;

    let mut robot_dirs = fs::read_dir(&args.models_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .collect::<Vec<_>>();
    robot_dirs.sort();

    for robot_dir in robot_dirs {
        let robot_name = match robot_dir.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => continue,
        };
        match process_robot(&robot_dir, &robot_name, args) {
            Ok(Outcome::Processed) => summary.processed += 1,
            Ok(Outcome::Skipped) => summary.skipped += 1,
            Err(e) => {
                error!("Error processing {robot_name}: {e:#}");
                summary.failed += 1;
            }
        }
    }

    info!(
        "Done: {} processed, {} skipped, {} failed",
        summary.processed, summary.skipped, summary.failed
    );
    Ok(summary)
}

fn process_robot(robot_dir: &Path, robot_name: &str, args: &Args) -> Result<Outcome> {
    let scene_xml = robot_dir.join("scene.xml");
    if !scene_xml.exists() {
        warn!("Skipping {robot_name}: scene.xml not found.");
        return Ok(Outcome::Skipped);
    }
    info!("Processing {robot_name}...");

    let robot = RobotConfig::from_xml(&scene_xml, robot_name)?;
    if robot.camera_names.is_empty() {
        warn!("Skipping {robot_name}: no cameras found (checked all includes).");
        return Ok(Outcome::Skipped);
    }
    info!(
        "Found {} cameras for {robot_name}: {}",
        robot.camera_names.len(),
        robot.camera_names.join(", ")
    );

    let config = GenericRobotEnvConfig::new(robot)
        .image_obs(true)
        .render_mode(Some(RenderMode::RgbArray))
        .image_size(args.width, args.height);
    let mut env: GenericRobotArmEnv = GenericRobotArmEnv::build(&config, 0)
        .with_context(|| format!("failed to initialize environment for {robot_name}"))?;

    let outcome = save_outputs(&mut env, robot_name, &args.output_dir);
    env.close();
    outcome
}

fn save_outputs(
    env: &mut GenericRobotArmEnv,
    robot_name: &str,
    output_dir: &Path,
) -> Result<Outcome> {
    env.reset()?;
    let act = RobotAct::from(env.action_space().zeros());
    let (step, _) = env.step(&act)?;

    if step.obs.pixels.is_empty() {
        warn!("No pixel observations for {robot_name}.");
        return Ok(Outcome::Skipped);
    }
    for (camera, image) in step.obs.pixels.iter() {
        let filename = format!("{robot_name}_{camera}.png").replace(['/', '\\'], "_");
        let path = output_dir.join(filename);
        match image.save(&path) {
            Ok(()) => info!("Saved thumbnail: {}", path.display()),
            Err(e) => error!("Failed to save image for {robot_name} camera {camera}: {e}"),
        }
    }

    let json_path = output_dir.join(format!("{robot_name}.json"));
    fs::write(&json_path, serde_json::to_string_pretty(env.robot_config())?)?;
    info!("Saved config: {}", json_path.display());
    Ok(Outcome::Processed)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    generate_thumbnails(&args)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use tempdir::TempDir;

    const ARM: &str = r#"<mujoco>
      <worldbody>
        <camera name="top" pos="0 0 2"/>
        <body name="link">
          <joint name="j1" range="-1 1"/>
          <camera name="wrist/left"/>
        </body>
      </worldbody>
      <actuator><motor name="m1" joint="j1" ctrlrange="0.5 1"/></actuator>
    </mujoco>"#;

    fn write(path: PathBuf, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn args(dir: &Path) -> Args {
        Args {
            models_dir: dir.join("models"),
            output_dir: dir.join("thumbnails"),
            width: 16,
            height: 8,
        }
    }

    #[test]
    fn test_generate_thumbnails() -> Result<()> {
        let dir = TempDir::new("robot_thumbnails")?;
        let models = dir.path().join("models");
        write(models.join("arm/scene.xml"), r#"<mujoco><include file="arm.xml"/></mujoco>"#);
        write(models.join("arm/arm.xml"), ARM);
        write(models.join("no_scene/robot.xml"), ARM);
        write(
            models.join("blind/scene.xml"),
            r#"<mujoco><worldbody><joint name="j"/></worldbody></mujoco>"#,
        );
        write(models.join("broken/scene.xml"), "<mujoco><worldbody></mujoco>");
        write(
            models.join("aa_nan_range/scene.xml"),
            &ARM.replace(r#"ctrlrange="0.5 1""#, r#"ctrlrange="nan 1""#),
        );
        write(models.join("README.md"), "not a robot");

        let args = args(dir.path());
        let summary = generate_thumbnails(&args)?;
        assert_eq!(
            summary,
            Summary {
                processed: 1,
                skipped: 2,
                failed: 2
            }
        );

        let top = image::open(args.output_dir.join("arm_top.png"))?.to_rgb8();
        assert_eq!(top.dimensions(), (16, 8));
        assert!(args.output_dir.join("arm_wrist_left.png").exists());

        let config = RobotConfig::load(args.output_dir.join("arm.json"))?;
        assert_eq!(config.joint_names, vec!["j1"]);
        assert_eq!(config.camera_ids, Some(vec![0, 1]));
        assert!(config.is_bound());
        assert!(!args.output_dir.join("broken.json").exists());
        assert!(!args.output_dir.join("aa_nan_range.json").exists());
        Ok(())
    }

    #[test]
    fn test_missing_models_dir() -> Result<()> {
        let dir = TempDir::new("robot_thumbnails")?;
        let summary = generate_thumbnails(&args(dir.path()))?;
        assert_eq!(summary, Summary::default());
        assert!(!dir.path().join("thumbnails").exists());
        Ok(())
    }
}
