use anyhow::{Result, anyhow};
use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};
use log::{debug, info};

use crate::systems::dispatch::{CursorControl, MouseButton};

/// OS-level pointer control via enigo
pub struct EnigoCursor {
    enigo: Enigo,
}

impl EnigoCursor {
    pub fn new() -> Result<Self> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| anyhow!("failed to init input injection: {}", e))?;
        Ok(EnigoCursor { enigo })
    }

    /// Size of the main display, in pixels
    pub fn main_display(&self) -> Result<(u32, u32)> {
        let (w, h) = self
            .enigo
            .main_display()
            .map_err(|e| anyhow!("failed to query display size: {}", e))?;
        Ok((w.max(0) as u32, h.max(0) as u32))
    }
}

fn to_enigo_button(button: MouseButton) -> Button {
    match button {
        MouseButton::Left => Button::Left,
        MouseButton::Right => Button::Right,
    }
}

impl CursorControl for EnigoCursor {
    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| anyhow!("{}", e))
    }

    fn click(&mut self, button: MouseButton) -> Result<()> {
        let button = to_enigo_button(button);
        self.enigo
            .button(button, Direction::Press)
            .map_err(|e| anyhow!("{}", e))?;
        self.enigo
            .button(button, Direction::Release)
            .map_err(|e| anyhow!("{}", e))
    }

    fn double_click(&mut self) -> Result<()> {
        for _ in 0..2 {
            self.enigo
                .button(Button::Left, Direction::Click)
                .map_err(|e| anyhow!("{}", e))?;
        }
        Ok(())
    }
}

/// Logs instead of moving the real pointer ("dry run")
#[derive(Default)]
pub struct LoggingCursor {
    last_position: Option<(i32, i32)>,
}

impl LoggingCursor {
    pub fn new() -> Self {
        LoggingCursor::default()
    }

    pub fn last_position(&self) -> Option<(i32, i32)> {
        self.last_position
    }
}

impl CursorControl for LoggingCursor {
    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        debug!("(dry run) move cursor to {},{}", x, y);
        self.last_position = Some((x, y));
        Ok(())
    }

    fn click(&mut self, button: MouseButton) -> Result<()> {
        info!("(dry run) {:?} click at {:?}", button, self.last_position);
        Ok(())
    }

    fn double_click(&mut self) -> Result<()> {
        info!("(dry run) double click at {:?}", self.last_position);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_mapping() {
        assert_eq!(to_enigo_button(MouseButton::Left), Button::Left);
        assert_eq!(to_enigo_button(MouseButton::Right), Button::Right);
    }

    #[test]
    fn test_dry_run_tracks_position() {
        let mut cursor = LoggingCursor::new();
        assert_eq!(cursor.last_position(), None);
        cursor.move_to(3, 4).unwrap();
        cursor.click(MouseButton::Left).unwrap();
        assert_eq!(cursor.last_position(), Some((3, 4)));
    }
}
