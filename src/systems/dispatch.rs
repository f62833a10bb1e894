use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::screenshot::ScreenshotNamer;

use super::classifier::{CursorTarget, GestureLabel};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

/// Moves the OS pointer and injects clicks
pub trait CursorControl {
    fn move_to(&mut self, x: i32, y: i32) -> Result<()>;

    /// Press, then release
    fn click(&mut self, button: MouseButton) -> Result<()>;

    /// Double (left) click at the current pointer position
    fn double_click(&mut self) -> Result<()>;
}

/// Captures the whole screen to an image file named `file_name`, returning
/// where it ended up
pub trait ScreenCapture {
    fn capture_screen(&mut self, file_name: &str) -> Result<PathBuf>;
}

/// The single side effect requested for a gesture
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveCursor(CursorTarget),
    Click(MouseButton),
    DoubleClick,
    Screenshot,
}

pub fn action_for(label: GestureLabel) -> Option<Action> {
    match label {
        GestureLabel::None => None,
        GestureLabel::LeftClick => Some(Action::Click(MouseButton::Left)),
        GestureLabel::RightClick => Some(Action::Click(MouseButton::Right)),
        GestureLabel::DoubleClick => Some(Action::DoubleClick),
        GestureLabel::Screenshot => Some(Action::Screenshot),
    }
}

/// Executes actions against the cursor and capture collaborators. Failures
/// are logged and otherwise ignored; nothing is retried.
pub struct GestureDispatcher<C: CursorControl, S: ScreenCapture> {
    cursor: C,
    capture: S,
    namer: ScreenshotNamer,
    last_screenshot: Option<PathBuf>,
}

impl<C: CursorControl, S: ScreenCapture> GestureDispatcher<C, S> {
    pub fn new(cursor: C, capture: S) -> Self {
        GestureDispatcher {
            cursor,
            capture,
            namer: ScreenshotNamer::new(),
            last_screenshot: None,
        }
    }

    /// Run the action; for a successful screenshot, returns the path of the
    /// new image file
    pub fn dispatch(&mut self, action: Action) -> Option<PathBuf> {
        let result = match action {
            Action::MoveCursor(CursorTarget { x, y }) => self.cursor.move_to(x, y),
            Action::Click(button) => self.cursor.click(button),
            Action::DoubleClick => self.cursor.double_click(),
            Action::Screenshot => {
                let file_name = self.namer.next_name();
                match self.capture.capture_screen(&file_name) {
                    Ok(path) => {
                        info!("Saved screenshot to {}", path.display());
                        self.last_screenshot = Some(path.clone());
                        return Some(path);
                    }
                    Err(e) => Err(e),
                }
            }
        };

        if let Err(e) = result {
            error!("Failed to perform {:?}: {}", action, e);
        }
        None
    }

    /// The most recent screenshot taken in this session, if any
    pub fn last_screenshot(&self) -> Option<&Path> {
        self.last_screenshot.as_deref()
    }

    pub fn cursor(&self) -> &C {
        &self.cursor
    }

    pub fn capture(&self) -> &S {
        &self.capture
    }
}
