use serde::{Deserialize, Serialize};

use crate::systems::classifier::GestureLabel;

/// Where captions are drawn on the camera frame, in pixels
pub const CAPTION_POSITION: (i32, i32) = (50, 50);

/// Short on-frame feedback for the active gesture. Colours are BGR,
/// as used for drawing onto camera frames.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Caption {
    pub text: String,
    pub position: (i32, i32),
    pub colour: (u8, u8, u8),
}

impl Caption {
    pub fn for_label(label: GestureLabel) -> Option<Caption> {
        let (text, colour) = match label {
            GestureLabel::None => return None,
            GestureLabel::Screenshot => ("Screenshot", (255, 255, 0)),
            GestureLabel::DoubleClick => ("Double Click", (0, 255, 255)),
            GestureLabel::LeftClick => ("Left Click", (0, 255, 0)),
            GestureLabel::RightClick => ("Right Click", (0, 0, 255)),
        };
        Some(Caption {
            text: String::from(text),
            position: CAPTION_POSITION,
            colour,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captions() {
        assert_eq!(Caption::for_label(GestureLabel::None), None);
        let caption = Caption::for_label(GestureLabel::RightClick).unwrap();
        assert_eq!(caption.text, "Right Click");
        assert_eq!(caption.position, CAPTION_POSITION);
        assert_eq!(caption.colour, (0, 0, 255));
    }
}
