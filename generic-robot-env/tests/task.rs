mod common;

use anyhow::Result;
use common::{init_logger, write_scene};
use generic_robot_env::{
    GenericRobotEnvConfig, GenericTaskEnv, GenericTaskEnvConfig, NullTask, ReachTask,
    ReachTaskConfig, RobotAct, RobotConfig,
};
use robot_env_core::Env;

fn env_config() -> Result<(tempdir::TempDir, GenericRobotEnvConfig)> {
    let (dir, scene) = write_scene()?;
    let robot = RobotConfig::from_xml(&scene, "two_link")?;
    Ok((dir, GenericRobotEnvConfig::new(robot).max_episode_steps(Some(50))))
}

#[test]
fn test_reach_terminates_on_success() -> Result<()> {
    init_logger();
    let (_dir, env_config) = env_config()?;
    // the slide joint returns from 0.5 to 0, moving the site to the target
    let config = GenericTaskEnvConfig::new(env_config, ReachTaskConfig::new([0.0, 0.0, 0.6]));
    let mut env = GenericTaskEnv::<ReachTask>::build(&config, 0)?;
    let act = RobotAct::zeros(2);

    env.reset()?;
    let mut prev_reward = f32::NEG_INFINITY;
    let mut n_steps = 0;
    loop {
        let (step, record) = env.step(&act)?;
        n_steps += 1;
        assert!(step.reward > prev_reward);
        assert_eq!(record.get_scalar("reward")?, step.reward);
        prev_reward = step.reward;

        if step.is_done() {
            assert!(step.is_terminated);
            assert!(!step.is_truncated);
            assert!(step.info.is_success);
            assert_eq!(record.get_scalar("success")?, 1.0);
            assert_eq!(record.get_scalar("episode_length")?, n_steps as f32);
            break;
        }
        assert!(!step.info.is_success);
    }
    // 0.5 * 0.8^k <= 0.02
    assert_eq!(n_steps, 15);
    Ok(())
}

#[test]
fn test_success_without_termination() -> Result<()> {
    let (_dir, env_config) = env_config()?;
    let config = GenericTaskEnvConfig::new(
        env_config.max_episode_steps(Some(20)),
        ReachTaskConfig::new([0.0, 0.0, 0.6]),
    )
    .terminate_on_success(false);
    let mut env = GenericTaskEnv::<ReachTask>::build(&config, 0)?;
    let act = RobotAct::zeros(2);

    env.reset()?;
    for i in 1..=20 {
        let (step, record) = env.step(&act)?;
        assert!(!step.is_terminated);
        assert_eq!(step.info.is_success, i >= 15);
        if i == 20 {
            assert!(step.is_truncated);
            assert_eq!(record.get_scalar("success")?, 1.0);
        }
    }
    Ok(())
}

#[test]
fn test_null_task_truncates() -> Result<()> {
    let (dir, env_config) = env_config()?;
    let config = GenericTaskEnvConfig::new(env_config.max_episode_steps(Some(5)), ());
    let path = dir.path().join("task.yaml");
    config.save(&path)?;
    let config = GenericTaskEnvConfig::<()>::load(&path)?;

    let mut env = GenericTaskEnv::<NullTask>::build(&config, 0)?;
    let act = RobotAct::zeros(2);
    env.reset()?;
    for _ in 0..4 {
        let (step, record) = env.step(&act)?;
        assert!(!step.is_done());
        assert_eq!(step.reward, 0.0);
        assert!(record.get("episode_length").is_none());
    }
    let (step, record) = env.step_with_reset(&act)?;
    assert!(step.is_truncated);
    assert!(!step.is_terminated);
    assert_eq!(record.get_scalar("episode_length")?, 5.0);
    assert_eq!(record.get_scalar("success")?, 0.0);
    assert_eq!(step.init_obs.map(|obs| obs.joint_pos[1]), Some(0.5));
    assert_eq!(env.env().episode_step(), 0);
    Ok(())
}
