use std::{
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::{Result, anyhow};
use log::{debug, info};
use xcap::Monitor;

use crate::systems::dispatch::ScreenCapture;

/// Generates screenshot file names that are unique within a session:
/// a millisecond timestamp plus a counter that only ever increases
pub struct ScreenshotNamer {
    count: u64,
}

impl ScreenshotNamer {
    pub fn new() -> Self {
        ScreenshotNamer { count: 0 }
    }

    pub fn next_name(&mut self) -> String {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        self.count += 1;
        format!("screenshot_{}_{:04}.png", timestamp, self.count)
    }
}

impl Default for ScreenshotNamer {
    fn default() -> Self {
        ScreenshotNamer::new()
    }
}

/// Full-screen capture of the primary monitor, saved as PNG
pub struct MonitorCapture {
    directory: PathBuf,
}

impl MonitorCapture {
    pub fn new(directory: &str) -> Self {
        MonitorCapture {
            directory: PathBuf::from(directory),
        }
    }
}

impl ScreenCapture for MonitorCapture {
    fn capture_screen(&mut self, file_name: &str) -> Result<PathBuf> {
        let monitors = Monitor::all().map_err(|e| anyhow!("failed to list monitors: {}", e))?;
        let monitor = monitors
            .iter()
            .find(|m| m.is_primary())
            .or(monitors.first())
            .ok_or(anyhow!("no monitor available to capture"))?;
        debug!("Capturing monitor \"{}\"", monitor.name());

        let image = monitor
            .capture_image()
            .map_err(|e| anyhow!("failed to capture screen: {}", e))?;

        let path = self.directory.join(file_name);
        image
            .save(&path)
            .map_err(|e| anyhow!("failed to write {}: {}", path.display(), e))?;
        Ok(path)
    }
}

/// Stands in for a real capture when running without a desktop ("dry run")
pub struct LoggingCapture {
    directory: PathBuf,
}

impl LoggingCapture {
    pub fn new(directory: &str) -> Self {
        LoggingCapture {
            directory: PathBuf::from(directory),
        }
    }
}

impl ScreenCapture for LoggingCapture {
    fn capture_screen(&mut self, file_name: &str) -> Result<PathBuf> {
        let path = self.directory.join(file_name);
        info!("(dry run) would capture screen to {}", path.display());
        Ok(path)
    }
}
