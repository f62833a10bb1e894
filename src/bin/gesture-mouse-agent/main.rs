use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::{debug, info, warn};
use tether_agent::{TetherAgent, TetherAgentOptionsBuilder};

use tether_gesture_mouse::agent_config::{AgentConfig, load_config_from_file};
use tether_gesture_mouse::cursor::{EnigoCursor, LoggingCursor};
use tether_gesture_mouse::oracle::HandFramesOracle;
use tether_gesture_mouse::screenshot::{LoggingCapture, MonitorCapture};
use tether_gesture_mouse::settings::Cli;
use tether_gesture_mouse::systems::FramePipeline;
use tether_gesture_mouse::systems::dispatch::{CursorControl, ScreenCapture};
use tether_gesture_mouse::tether_interface::{Inputs, Outputs};

/// Used in dry-run mode when the config does not specify a screen size
const DRY_RUN_SCREEN_SIZE: (u32, u32) = (1920, 1080);

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize the logger from the environment

    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level))
        .filter_module("paho_mqtt", log::LevelFilter::Warn)
        .filter_module("tether_agent", log::LevelFilter::Warn)
        .init();

    debug!("Started; args: {:?}", cli);

    let config = load_config_from_file(&cli.config_path)?;
    std::fs::create_dir_all(&config.screenshot_directory)?;

    let mut tether_agent = TetherAgentOptionsBuilder::new(&cli.agent_role)
        .id(Some(&cli.agent_group))
        .host(Some(&cli.tether_host.to_string()))
        .build()?;

    let inputs = Inputs::new(&mut tether_agent, &cli.hand_frames_plug)?;
    let outputs = Outputs::new(&mut tether_agent)?;

    // Always publish on first start/load...
    tether_agent.encode_and_publish(&outputs.config_output, &config)?;

    let oracle = HandFramesOracle::new(config.min_hand_score, config.mirror_x);

    if cli.dry_run {
        warn!("Dry run: gestures will be logged, not performed");
        let screen_size = config.screen_size.unwrap_or(DRY_RUN_SCREEN_SIZE);
        let pipeline = FramePipeline::from_config(
            oracle,
            LoggingCursor::new(),
            LoggingCapture::new(&config.screenshot_directory),
            screen_size,
            &config,
        );
        run(&tether_agent, &inputs, &outputs, pipeline, &config)
    } else {
        let cursor = EnigoCursor::new()?;
        let screen_size = match config.screen_size {
            Some(size) => size,
            None => cursor.main_display()?,
        };
        let pipeline = FramePipeline::from_config(
            oracle,
            cursor,
            MonitorCapture::new(&config.screenshot_directory),
            screen_size,
            &config,
        );
        run(&tether_agent, &inputs, &outputs, pipeline, &config)
    }
}

fn run<C: CursorControl, S: ScreenCapture>(
    tether_agent: &TetherAgent,
    inputs: &Inputs,
    outputs: &Outputs,
    mut pipeline: FramePipeline<HandFramesOracle, C, S>,
    config: &AgentConfig,
) -> Result<()> {
    info!("Waiting for hand frames...");

    loop {
        let mut work_done = false;

        if let Some((topic, payload)) = tether_agent.check_messages() {
            work_done = true;
            if inputs.hand_frames_input.matches(&topic) {
                let outcome = pipeline.process_frame(&payload);
                if let Some(label) = outcome.fired {
                    info!("Gesture {:?}", label);
                }
                outputs.publish_outcome(tether_agent, &outcome, config.publish_gestures);
            }
        }

        if !work_done {
            thread::sleep(Duration::from_millis(1));
        }
    }
}
