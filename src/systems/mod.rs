pub mod classifier;
pub mod dispatch;
pub mod gesture_gate;

use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use classifier::{Classification, GestureClassifier, GestureLabel};
use dispatch::{Action, CursorControl, GestureDispatcher, ScreenCapture, action_for};
use gesture_gate::GestureGate;
use log::{debug, info};
use serde::Serialize;

use crate::{Point2D, agent_config::AgentConfig, annotation::Caption, oracle::LandmarkOracle};

/// Everything that happened for one processed frame
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FrameOutcome {
    #[serde(flatten)]
    pub classification: Classification,
    /// The discrete gesture whose action was dispatched on this frame, if any
    pub fired: Option<GestureLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<Caption>,
}

/// One gesture-control session: owns the landmark source, the classifier,
/// the debounce gate and the action collaborators. Frames are processed
/// one at a time, to completion.
pub struct FramePipeline<O: LandmarkOracle, C: CursorControl, S: ScreenCapture> {
    oracle: O,
    classifier: GestureClassifier,
    gate: GestureGate,
    dispatcher: GestureDispatcher<C, S>,
}

impl<O: LandmarkOracle, C: CursorControl, S: ScreenCapture> FramePipeline<O, C, S> {
    pub fn new(
        oracle: O,
        cursor: C,
        capture: S,
        screen_size: (u32, u32),
        cooldown: Duration,
    ) -> Self {
        let (screen_width, screen_height) = screen_size;
        FramePipeline {
            oracle,
            classifier: GestureClassifier::new(screen_width, screen_height),
            gate: GestureGate::new(cooldown),
            dispatcher: GestureDispatcher::new(cursor, capture),
        }
    }

    pub fn from_config(
        oracle: O,
        cursor: C,
        capture: S,
        screen_size: (u32, u32),
        config: &AgentConfig,
    ) -> Self {
        info!(
            "Gesture pipeline for screen {}x{}, action cooldown {}ms",
            screen_size.0, screen_size.1, config.action_cooldown_ms
        );
        FramePipeline::new(
            oracle,
            cursor,
            capture,
            screen_size,
            Duration::from_millis(config.action_cooldown_ms),
        )
    }

    pub fn process_frame(&mut self, frame: &O::Frame) -> FrameOutcome {
        self.process_frame_at(frame, Instant::now())
    }

    pub fn process_frame_at(&mut self, frame: &O::Frame, now: Instant) -> FrameOutcome {
        let points = self.oracle.detect(frame);
        self.process_landmarks(points.as_deref().unwrap_or_default(), now)
    }

    /// Classify, then move the pointer (if not paused) and run the action for
    /// a newly activated gesture
    pub fn process_landmarks(&mut self, points: &[Point2D], now: Instant) -> FrameOutcome {
        let classification = self.classifier.classify(points);
        let label = classification.label;

        if let Some(target) = classification.cursor_target {
            self.dispatcher.dispatch(Action::MoveCursor(target));
        }

        let previous = self.gate.active();
        let mut fired = None;
        let mut screenshot = None;
        let should_fire = self.gate.update(label, now);
        if previous != label {
            debug!("Active gesture {:?} -> {:?}", previous, label);
        }
        if should_fire {
            if let Some(action) = action_for(label) {
                debug!("Gesture {:?} => {:?}", label, action);
                screenshot = self.dispatcher.dispatch(action);
                fired = Some(label);
            }
        }

        FrameOutcome {
            classification,
            fired,
            screenshot,
            caption: Caption::for_label(label),
        }
    }

    pub fn last_screenshot(&self) -> Option<&Path> {
        self.dispatcher.last_screenshot()
    }

    pub fn dispatcher(&self) -> &GestureDispatcher<C, S> {
        &self.dispatcher
    }
}

#[cfg(test)]
mod tests {
    use super::classifier::test_hands::{THUMB_FAR, hand, thumb_near};
    use super::dispatch::{
        MouseButton,
        test_collaborators::{Call, RecordingCapture, RecordingCursor},
    };
    use super::*;

    struct Passthrough;

    impl LandmarkOracle for Passthrough {
        type Frame = [Point2D];

        fn detect(&mut self, frame: &[Point2D]) -> Option<Vec<Point2D>> {
            if frame.is_empty() {
                None
            } else {
                Some(Vec::from(frame))
            }
        }
    }

    type TestPipeline = FramePipeline<Passthrough, RecordingCursor, RecordingCapture>;

    fn pipeline() -> TestPipeline {
        FramePipeline::new(
            Passthrough,
            RecordingCursor::default(),
            RecordingCapture::default(),
            (1000, 500),
            Duration::from_millis(500),
        )
    }

    fn at(start: Instant, frame: u64) -> Instant {
        start + Duration::from_millis(frame * 33)
    }

    #[test]
    fn test_open_hand_moves_every_frame() {
        let mut p = pipeline();
        let start = Instant::now();
        let points = hand([170., 170., 170., 170.], THUMB_FAR);
        for frame in 0..3 {
            let outcome = p.process_frame_at(&points, at(start, frame));
            assert_eq!(outcome.fired, None);
            assert_eq!(outcome.caption, None);
        }
        let (x, y) = points[8];
        let expected = Call::MoveTo((x * 1000.) as i32, (y * 500.) as i32);
        assert_eq!(p.dispatcher().cursor().calls, vec![expected; 3]);
    }

    #[test]
    fn test_held_click_fires_once() {
        let mut p = pipeline();
        let start = Instant::now();
        let points = hand([30., 170., 170., 170.], thumb_near(0));
        let fired: Vec<Option<GestureLabel>> = (0..10)
            .map(|frame| p.process_frame_at(&points, at(start, frame)).fired)
            .collect();
        assert_eq!(fired[0], Some(GestureLabel::LeftClick));
        assert!(fired[1..].iter().all(|f| f.is_none()));
        // Thumb near: pointer paused, so just the one click
        assert_eq!(
            p.dispatcher().cursor().calls,
            vec![Call::Click(MouseButton::Left)]
        );
    }

    #[test]
    fn test_screenshot_held_captures_once() {
        let mut p = pipeline();
        let start = Instant::now();
        let fist = hand([20., 20., 20., 20.], thumb_near(1));

        let first = p.process_frame_at(&fist, at(start, 0));
        assert_eq!(first.fired, Some(GestureLabel::Screenshot));
        let path = first.screenshot.expect("screenshot path");
        assert_eq!(p.last_screenshot(), Some(path.as_path()));

        let second = p.process_frame_at(&fist, at(start, 1));
        assert_eq!(second.screenshot, None);
        assert_eq!(second.caption.map(|c| c.text), Some(String::from("Screenshot")));
        assert_eq!(p.dispatcher().capture().names.len(), 1);
        // Last screenshot survives later frames
        p.process_frame_at(&[], at(start, 2));
        assert_eq!(p.last_screenshot(), Some(path.as_path()));
    }

    #[test]
    fn test_no_hand_frame_does_nothing_and_rearms() {
        let mut p = pipeline();
        let start = Instant::now();
        let right_click = hand([170., 30., 170., 170.], thumb_near(1));

        assert!(p.process_frame_at(&right_click, at(start, 0)).fired.is_some());

        let nothing = p.process_frame_at(&[], at(start, 1));
        assert!(!nothing.classification.hand_detected());
        assert_eq!(nothing.fired, None);

        // Released, but still inside the cooldown
        assert!(p.process_frame_at(&right_click, at(start, 2)).fired.is_none());
        p.process_frame_at(&[], at(start, 3));
        // Released again, well after the cooldown
        assert_eq!(
            p.process_frame_at(&right_click, at(start, 30)).fired,
            Some(GestureLabel::RightClick)
        );
        assert_eq!(
            p.dispatcher().cursor().calls,
            vec![
                Call::Click(MouseButton::Right),
                Call::Click(MouseButton::Right)
            ]
        );
    }

    #[test]
    fn test_partial_hand_ignored() {
        let mut p = pipeline();
        let points = hand([20., 20., 20., 20.], THUMB_FAR);
        let outcome = p.process_frame_at(&points[..20], Instant::now());
        assert!(!outcome.classification.hand_detected());
        assert!(p.dispatcher().cursor().calls.is_empty());
        assert!(p.dispatcher().capture().names.is_empty());
    }

    #[test]
    fn test_raw_hand_frame_payload() {
        use crate::hand::{DetectedHand, HandFrame, Landmark};
        use crate::oracle::HandFramesOracle;

        let points = hand([30., 170., 170., 170.], thumb_near(0));
        let frame = HandFrame {
            hands: vec![DetectedHand {
                score: Some(0.9),
                landmarks: points
                    .iter()
                    .map(|&(x, y)| Landmark { x, y, z: None })
                    .collect(),
            }],
        };
        let payload: Vec<u8> = rmp_serde::to_vec_named(&frame).unwrap();

        let mut p = FramePipeline::new(
            HandFramesOracle::new(0.7, false),
            RecordingCursor::default(),
            RecordingCapture::default(),
            (1000, 500),
            Duration::from_millis(500),
        );
        let outcome = p.process_frame(&payload);
        assert_eq!(outcome.fired, Some(GestureLabel::LeftClick));
        assert_eq!(
            p.dispatcher().cursor().calls,
            vec![Call::Click(MouseButton::Left)]
        );
    }

    #[test]
    fn test_outcome_serialises() {
        let mut p = pipeline();
        let outcome = p.process_frame_at(&hand([30., 30., 170., 170.], thumb_near(0)), Instant::now());
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["label"], "DoubleClick");
        assert_eq!(json["fired"], "DoubleClick");
        assert_eq!(json["thumbNear"], true);
        assert!(json["cursorTarget"].is_null());
        assert_eq!(json["caption"]["text"], "Double Click");
    }
}
