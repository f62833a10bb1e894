use std::net::{IpAddr, Ipv4Addr};

use clap::Parser;

// Some defaults; some of which can be overriden via CLI args
const CONFIG_FILE_PATH: &str = "./gestureMouse.json";
const TETHER_HOST: std::net::IpAddr = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1));

const AGENT_ROLE: &str = "gestureMouse";
const HAND_FRAMES_PLUG: &str = "handFrames";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Where to load the agent config (created with defaults if missing)
    #[arg(long="configPath",default_value_t=String::from(CONFIG_FILE_PATH))]
    pub config_path: String,

    /// The IP address of the MQTT broker (server)
    #[arg(long = "tether.host", default_value_t=TETHER_HOST)]
    pub tether_host: std::net::IpAddr,

    /// The Agent Role (type)
    #[arg(long="tether.role",default_value_t=String::from(AGENT_ROLE))]
    pub agent_role: String,

    /// The Agent Group (ID)
    #[arg(long="tether.group",default_value_t=String::from("any"))]
    pub agent_group: String,

    /// Name of the plug that hand-tracking agents publish landmark frames on
    #[arg(long="handFramesPlug",default_value_t=String::from(HAND_FRAMES_PLUG))]
    pub hand_frames_plug: String,

    /// Log gestures and actions, but do not touch the real pointer or screen
    #[arg(long = "dryRun")]
    pub dry_run: bool,

    #[arg(long = "loglevel",default_value_t=String::from("info"))]
    pub log_level: String,
}
