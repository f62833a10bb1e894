use log::{trace, warn};

use crate::{
    Point2D,
    hand::{HandFrame, mirror_x},
};

/// Finds hand landmarks in a frame. Returns the landmarks of a single hand in
/// normalised image coordinates, or None if no hand was found.
pub trait LandmarkOracle {
    type Frame: ?Sized;

    fn detect(&mut self, frame: &Self::Frame) -> Option<Vec<Point2D>>;
}

/// Landmarks come from an external hand tracking agent, which publishes
/// MessagePack-encoded `HandFrame`s. Only the first hand is used.
pub struct HandFramesOracle {
    min_score: f32,
    mirror: bool,
}

impl HandFramesOracle {
    pub fn new(min_score: f32, mirror: bool) -> Self {
        HandFramesOracle { min_score, mirror }
    }

    pub fn detect_in_frame(&self, frame: &HandFrame) -> Option<Vec<Point2D>> {
        let hand = frame.hands.first()?;

        if let Some(score) = hand.score {
            if score < self.min_score {
                trace!("Ignore hand with score {} < {}", score, self.min_score);
                return None;
            }
        }

        let points = hand.points();
        if self.mirror {
            Some(mirror_x(&points))
        } else {
            Some(points)
        }
    }
}

impl LandmarkOracle for HandFramesOracle {
    type Frame = [u8];

    fn detect(&mut self, payload: &[u8]) -> Option<Vec<Point2D>> {
        match rmp_serde::from_slice::<HandFrame>(payload) {
            Ok(frame) => self.detect_in_frame(&frame),
            Err(e) => {
                warn!("Failed to decode hand frame: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::{DetectedHand, Landmark};

    fn detected(score: Option<f32>, x: f32) -> DetectedHand {
        DetectedHand {
            score,
            landmarks: vec![Landmark { x, y: 0.5, z: None }],
        }
    }

    #[test]
    fn test_first_hand_only() {
        let frame = HandFrame {
            hands: vec![detected(None, 0.2), detected(None, 0.9)],
        };
        let payload = rmp_serde::to_vec_named(&frame).unwrap();
        let mut oracle = HandFramesOracle::new(0.7, false);
        assert_eq!(oracle.detect(&payload), Some(vec![(0.2, 0.5)]));
    }

    #[test]
    fn test_mirrored() {
        let frame = HandFrame {
            hands: vec![detected(Some(0.9), 0.25)],
        };
        let oracle = HandFramesOracle::new(0.7, true);
        assert_eq!(oracle.detect_in_frame(&frame), Some(vec![(0.75, 0.5)]));
    }

    #[test]
    fn test_low_score_and_empty() {
        let oracle = HandFramesOracle::new(0.7, false);
        let frame = HandFrame {
            hands: vec![detected(Some(0.3), 0.25)],
        };
        assert_eq!(oracle.detect_in_frame(&frame), None);
        assert_eq!(oracle.detect_in_frame(&HandFrame::default()), None);
    }

    #[test]
    fn test_garbage_payload() {
        let mut oracle = HandFramesOracle::new(0.7, false);
        assert_eq!(oracle.detect(&[0xc1, 0x00, 0xff]), None);
    }
}
