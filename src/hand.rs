use serde::{Deserialize, Serialize};

use crate::Point2D;

/// Number of landmarks in a complete hand skeleton
pub const LANDMARK_COUNT: usize = 21;

pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DetectedHand {
    /// Detector confidence, if the tracking agent provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
    pub landmarks: Vec<Landmark>,
}

/// As published on "handFrames" by the hand tracking agent; one entry
/// per detected hand, empty if nothing was detected
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct HandFrame {
    pub hands: Vec<DetectedHand>,
}

impl DetectedHand {
    pub fn points(&self) -> Vec<Point2D> {
        self.landmarks.iter().map(|l| (l.x, l.y)).collect()
    }
}

/// A complete set of landmarks for one hand, in normalised image
/// coordinates. Can only be built from a full skeleton.
#[derive(Debug, Clone)]
pub struct HandLandmarks {
    points: Vec<Point2D>,
}

impl HandLandmarks {
    pub fn from_points(points: &[Point2D]) -> Option<Self> {
        if points.len() < LANDMARK_COUNT {
            None
        } else {
            Some(HandLandmarks {
                points: Vec::from(points),
            })
        }
    }

    pub fn get(&self, index: usize) -> &Point2D {
        &self.points[index]
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }
}

/// Flip horizontally, as if the camera image had been mirrored before detection
pub fn mirror_x(points: &[Point2D]) -> Vec<Point2D> {
    points.iter().map(|(x, y)| (1. - x, *y)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_skeleton_rejected() {
        let points = vec![(0.5, 0.5); LANDMARK_COUNT - 1];
        assert!(HandLandmarks::from_points(&points).is_none());
        assert!(HandLandmarks::from_points(&[]).is_none());

        let points = vec![(0.5, 0.5); LANDMARK_COUNT];
        let hand = HandLandmarks::from_points(&points).unwrap();
        assert_eq!(hand.points().len(), LANDMARK_COUNT);
    }

    #[test]
    fn test_mirror() {
        assert_eq!(mirror_x(&[(0.25, 0.1), (1., 0.9)]), vec![(0.75, 0.1), (0., 0.9)]);
    }

    #[test]
    fn test_decode_frame_without_optional_fields() {
        let json = r#"{"hands":[{"landmarks":[{"x":0.1,"y":0.2},{"x":0.3,"y":0.4,"z":-0.05}]}]}"#;
        let frame: HandFrame = serde_json::from_str(json).unwrap();
        assert_eq!(frame.hands.len(), 1);
        assert_eq!(frame.hands[0].score, None);
        assert_eq!(frame.hands[0].points(), vec![(0.1, 0.2), (0.3, 0.4)]);
    }
}
