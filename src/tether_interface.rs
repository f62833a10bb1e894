use anyhow::Result;
use log::{debug, error};
use tether_agent::{PlugDefinition, PlugOptionsBuilder, TetherAgent};

use crate::systems::FrameOutcome;

pub struct Outputs {
    pub config_output: PlugDefinition,
    pub gestures_output: PlugDefinition,
    pub screenshots_output: PlugDefinition,
}

impl Outputs {
    pub fn new(tether_agent: &mut TetherAgent) -> Result<Outputs> {
        let config_output = PlugOptionsBuilder::create_output("provideGestureConfig")
            .qos(Some(2))
            .retain(Some(true))
            .build(tether_agent)?;

        // One message per processed frame
        let gestures_output = PlugOptionsBuilder::create_output("gestures")
            .qos(Some(0))
            .build(tether_agent)?;

        // Path of each new screenshot, so that another agent can offer it for download
        let screenshots_output = PlugOptionsBuilder::create_output("screenshots")
            .qos(Some(2))
            .build(tether_agent)?;

        Ok(Outputs {
            config_output,
            gestures_output,
            screenshots_output,
        })
    }

    /// Publish what happened on this frame. Failures are logged; the
    /// frame loop carries on regardless.
    pub fn publish_outcome(
        &self,
        tether_agent: &TetherAgent,
        outcome: &FrameOutcome,
        publish_gestures: bool,
    ) {
        if publish_gestures {
            if let Err(e) = tether_agent.encode_and_publish(&self.gestures_output, outcome) {
                error!("Failed to publish gesture outcome: {}", e);
            }
        }

        if let Some(path) = &outcome.screenshot {
            debug!("Offer screenshot {}", path.display());
            if let Err(e) = tether_agent
                .encode_and_publish(&self.screenshots_output, path.to_string_lossy().as_ref())
            {
                error!("Failed to publish screenshot path: {}", e);
            }
        }
    }
}

pub struct Inputs {
    pub hand_frames_input: PlugDefinition,
}

impl Inputs {
    pub fn new(tether_agent: &mut TetherAgent, hand_frames_plug: &str) -> Result<Inputs> {
        let hand_frames_input = PlugOptionsBuilder::create_input(hand_frames_plug)
            .qos(Some(0))
            .build(tether_agent)?;

        Ok(Inputs { hand_frames_input })
    }
}
