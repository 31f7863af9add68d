use std::time::Duration;

use tracing::debug;

use super::{ActionType, RecognitionState};
use crate::calibration::Calibrator;
use crate::events::{ActionEvent, EventBus};
use crate::landmarks::PoseFrame;

/// Gesture-specific check evaluated once per tick
pub trait TriggerCondition: Send + Sync {
    fn action_type(&self) -> ActionType;

    /// Whether the gesture is currently performed
    ///
    /// Only called while calibrated. Missing landmarks evaluate to false.
    fn check(&mut self, frame: &PoseFrame, calibrator: &mut Calibrator, now: Duration) -> bool;

    /// Called right after the recognizer fires
    fn on_trigger(&mut self) {}

    /// Clear any internal latch or timer
    fn reset(&mut self) {}

    /// Continuous progress for gestures that must be held
    fn progress(&self, _now: Duration) -> Option<f32> {
        None
    }
}

/// Everything a recognizer touches during one tick
pub struct RecognitionContext<'a> {
    pub frame: &'a PoseFrame,
    pub calibrator: &'a mut Calibrator,
    pub bus: &'a mut EventBus,
    pub now: Duration,
}

/// Edge-triggered state machine with cooldown around one condition
pub struct Recognizer {
    condition: Box<dyn TriggerCondition>,
    state: RecognitionState,
    last_trigger: Option<Duration>,
    condition_was_met: bool,
    cooldown: Duration,
}

impl Recognizer {
    pub fn new(condition: Box<dyn TriggerCondition>, cooldown: Duration) -> Self {
        Self {
            condition,
            state: RecognitionState::Idle,
            last_trigger: None,
            condition_was_met: false,
            cooldown,
        }
    }

    /// Advance one tick; returns true when the recognizer fired
    pub fn update(&mut self, ctx: &mut RecognitionContext<'_>) -> bool {
        if !ctx.calibrator.is_calibrated() {
            self.state = RecognitionState::Idle;
            return false;
        }

        if self.state == RecognitionState::Cooldown {
            let elapsed = self
                .last_trigger
                .map_or(self.cooldown, |last| ctx.now.saturating_sub(last));
            if elapsed < self.cooldown {
                return false;
            }
            self.state = RecognitionState::Idle;
        }

        let condition_met = self.condition.check(ctx.frame, ctx.calibrator, ctx.now);
        let rising_edge = condition_met && !self.condition_was_met;
        self.condition_was_met = condition_met;

        if rising_edge && self.trigger(ctx) {
            return true;
        }

        self.state = if condition_met {
            RecognitionState::Detecting
        } else {
            RecognitionState::Idle
        };
        false
    }

    fn trigger(&mut self, ctx: &mut RecognitionContext<'_>) -> bool {
        if self.state == RecognitionState::Cooldown {
            return false;
        }

        let action_type = self.condition.action_type();
        self.state = RecognitionState::Triggered;
        ctx.bus.publish(&ActionEvent::new(action_type, ctx.now, 1.0));
        debug!("Action triggered: {:?} at {:?}", action_type, ctx.now);

        self.condition.on_trigger();
        self.last_trigger = Some(ctx.now);
        self.state = RecognitionState::Cooldown;
        true
    }

    /// Back to Idle with no trigger history
    pub fn reset(&mut self) {
        self.state = RecognitionState::Idle;
        self.last_trigger = None;
        self.condition_was_met = false;
        self.condition.reset();
    }

    pub fn state(&self) -> RecognitionState {
        self.state
    }

    pub fn action_type(&self) -> ActionType {
        self.condition.action_type()
    }

    pub fn last_trigger(&self) -> Option<Duration> {
        self.last_trigger
    }

    pub fn progress(&self, now: Duration) -> Option<f32> {
        self.condition.progress(now)
    }
}

impl std::fmt::Debug for Recognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recognizer")
            .field("action_type", &self.action_type())
            .field("state", &self.state)
            .field("last_trigger", &self.last_trigger)
            .field("cooldown", &self.cooldown)
            .finish()
    }
}
