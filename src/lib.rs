pub mod agent_config;
pub mod annotation;
pub mod cursor;
pub mod geometry_utils;
pub mod hand;
pub mod oracle;
pub mod screenshot;
pub mod settings;
pub mod systems;
pub mod tether_interface;

pub type Point2D = (f32, f32);
