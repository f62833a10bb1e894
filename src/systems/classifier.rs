use log::trace;
use serde::{Deserialize, Serialize};

use crate::{
    Point2D,
    geometry_utils::{angle_at, normalized_distance},
    hand::{
        HandLandmarks, INDEX_MCP, INDEX_PIP, INDEX_TIP, MIDDLE_MCP, MIDDLE_PIP, MIDDLE_TIP,
        PINKY_MCP, PINKY_PIP, PINKY_TIP, RING_MCP, RING_PIP, RING_TIP, THUMB_TIP,
    },
};

/// A finger counts as bent when the angle at its middle joint is below this (degrees)
pub const BEND_THRESHOLD_DEGREES: f32 = 50.;

/// The thumb tip counts as "near" a base joint below this normalised distance
pub const THUMB_PROXIMITY_THRESHOLD: f32 = 50.;

/// Base joints that the thumb tip is compared against; bringing the
/// thumb close to any of them pauses the pointer
const THUMB_REFERENCES: [usize; 3] = [INDEX_MCP, MIDDLE_MCP, RING_MCP];

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureLabel {
    #[default]
    None,
    LeftClick,
    RightClick,
    DoubleClick,
    Screenshot,
}

impl GestureLabel {
    /// Every label except None maps to a one-off action
    pub fn is_discrete(&self) -> bool {
        !matches!(self, GestureLabel::None)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorTarget {
    pub x: i32,
    pub y: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FingerBendState {
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerBendState {
    pub fn from_landmarks(hand: &HandLandmarks) -> Self {
        let bent = |base: usize, mid: usize, tip: usize| {
            angle_at(hand.get(base), hand.get(mid), hand.get(tip)) < BEND_THRESHOLD_DEGREES
        };
        FingerBendState {
            index: bent(INDEX_MCP, INDEX_PIP, INDEX_TIP),
            middle: bent(MIDDLE_MCP, MIDDLE_PIP, MIDDLE_TIP),
            ring: bent(RING_MCP, RING_PIP, RING_TIP),
            pinky: bent(PINKY_MCP, PINKY_PIP, PINKY_TIP),
        }
    }

    pub fn all_bent(&self) -> bool {
        self.index && self.middle && self.ring && self.pinky
    }
}

/// Result of classifying a single frame. With no (complete) hand, there is
/// neither a cursor target nor a gesture.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub cursor_target: Option<CursorTarget>,
    pub label: GestureLabel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingers: Option<FingerBendState>,
    pub thumb_near: bool,
}

impl Classification {
    pub fn no_hand() -> Self {
        Classification::default()
    }

    pub fn hand_detected(&self) -> bool {
        self.fingers.is_some()
    }
}

pub fn is_thumb_near_any(hand: &HandLandmarks) -> bool {
    let thumb_tip = hand.get(THUMB_TIP);
    THUMB_REFERENCES
        .iter()
        .any(|r| normalized_distance(thumb_tip, hand.get(*r)) < THUMB_PROXIMITY_THRESHOLD)
}

/// Strict priority order; the first matching rule wins
pub fn label_for(fingers: &FingerBendState, thumb_near: bool) -> GestureLabel {
    let FingerBendState { index, middle, .. } = *fingers;
    if fingers.all_bent() {
        GestureLabel::Screenshot
    } else if index && middle && thumb_near {
        GestureLabel::DoubleClick
    } else if index && !middle && thumb_near {
        GestureLabel::LeftClick
    } else if middle && !index && thumb_near {
        GestureLabel::RightClick
    } else {
        GestureLabel::None
    }
}

/// Scale a normalised coordinate to pixels. Landmarks slightly outside the
/// camera frame stay pinned to the nearest screen edge.
fn to_screen(normalised: f32, extent: u32) -> i32 {
    let max = extent.saturating_sub(1) as i32;
    ((normalised * extent as f32) as i32).clamp(0, max)
}

pub struct GestureClassifier {
    screen_width: u32,
    screen_height: u32,
}

impl GestureClassifier {
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        GestureClassifier {
            screen_width,
            screen_height,
        }
    }

    /// Classify one frame worth of landmarks. An empty or partial list
    /// yields no gesture and no cursor target.
    pub fn classify(&self, points: &[Point2D]) -> Classification {
        let Some(hand) = HandLandmarks::from_points(points) else {
            if !points.is_empty() {
                trace!("Only {} landmarks; skip classification", points.len());
            }
            return Classification::no_hand();
        };

        let thumb_near = is_thumb_near_any(&hand);

        let cursor_target = if thumb_near {
            None
        } else {
            let (x, y) = *hand.get(INDEX_TIP);
            Some(CursorTarget {
                x: to_screen(x, self.screen_width),
                y: to_screen(y, self.screen_height),
            })
        };

        let fingers = FingerBendState::from_landmarks(&hand);

        Classification {
            cursor_target,
            label: label_for(&fingers, thumb_near),
            fingers: Some(fingers),
            thumb_near,
        }
    }
}
