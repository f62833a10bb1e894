use std::time::{Duration, Instant};

use indexmap::IndexMap;
use log::debug;

use super::classifier::GestureLabel;

/// Decides whether a discrete gesture should actually trigger its action.
///
/// A label fires only on the frame where it becomes active (it was not the
/// active label on the previous frame), and never twice within the cooldown.
/// Holding a gesture therefore fires once; releasing and repeating it fires
/// again once the cooldown has passed.
///
/// A repeat that arrives inside the cooldown is swallowed but still counts as
/// the active label, so holding it beyond the cooldown does not fire either.
/// The gesture has to be released and made again.
pub struct GestureGate {
    cooldown: Duration,
    active: GestureLabel,
    last_fired: IndexMap<GestureLabel, Instant>,
}

impl GestureGate {
    pub fn new(cooldown: Duration) -> Self {
        GestureGate {
            cooldown,
            active: GestureLabel::None,
            last_fired: IndexMap::new(),
        }
    }

    /// Feed the label for the current frame; returns true if its action
    /// should be dispatched now
    pub fn update(&mut self, label: GestureLabel, now: Instant) -> bool {
        let became_active = label != self.active;
        self.active = label;

        if !label.is_discrete() || !became_active {
            return false;
        }

        if let Some(last) = self.last_fired.get(&label) {
            let elapsed = now.saturating_duration_since(*last);
            if elapsed < self.cooldown {
                debug!(
                    "Suppress {:?}; fired {}ms ago, cooldown is {}ms",
                    label,
                    elapsed.as_millis(),
                    self.cooldown.as_millis()
                );
                return false;
            }
        }

        self.last_fired.insert(label, now);
        true
    }

    pub fn active(&self) -> GestureLabel {
        self.active
    }
}
