use std::time::Duration;

use tracing::debug;

use super::{
    ActionCategory, ActionType, EitherHandRaise, FistHold, ForwardLean, HandRaise,
    LateralDirection, LateralMove, RecognitionContext, Recognizer, Side,
};
use crate::config::{ConfigValidation, RecognitionConfig};
use crate::error::RecognitionResult;

/// Outcome of one coordinator tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Actions fired this tick, in evaluation order
    pub triggered: Vec<ActionType>,
    /// Whether a navigation gesture fired and suppressed grabbing
    pub navigation_triggered: bool,
}

/// Runs recognizers by category priority
///
/// Flow control always runs first. Every navigation recognizer runs next, and
/// if any of them fires, all grabbing recognizers are reset for the tick
/// instead of being updated.
#[derive(Debug, Default)]
pub struct Coordinator {
    flow_control: Vec<Recognizer>,
    navigation: Vec<Recognizer>,
    grabbing: Vec<Recognizer>,
}

impl Coordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Coordinator with the seven standard gestures
    ///
    /// The configuration is validated first, so out-of-range timings are
    /// reported as [`RecognitionError::InvalidConfig`](crate::error::RecognitionError).
    pub fn from_config(config: &RecognitionConfig) -> RecognitionResult<Self> {
        config.validate()?;
        let cooldown = config.cooldown();
        let nav_band = config.hysteresis_band(config.nav_x_threshold);
        let grab_band = config.hysteresis_band(config.grab_y_threshold);

        let mut coordinator = Self::new();
        coordinator.register(Recognizer::new(
            Box::new(LateralMove::new(LateralDirection::Left, nav_band)?),
            cooldown,
        ));
        coordinator.register(Recognizer::new(
            Box::new(LateralMove::new(LateralDirection::Right, nav_band)?),
            cooldown,
        ));
        coordinator.register(Recognizer::new(
            Box::new(ForwardLean::new(
                config.hysteresis_band(config.forward_y_threshold),
            )?),
            cooldown,
        ));
        coordinator.register(Recognizer::new(
            Box::new(HandRaise::new(Side::Left, grab_band)?),
            cooldown,
        ));
        coordinator.register(Recognizer::new(
            Box::new(HandRaise::new(Side::Right, grab_band)?),
            cooldown,
        ));
        coordinator.register(Recognizer::new(
            Box::new(EitherHandRaise::new(config.grab_y_threshold)),
            cooldown,
        ));
        coordinator.register(Recognizer::new(
            Box::new(FistHold::new(
                config.fist_dist_threshold,
                config.hold_duration(),
            )),
            cooldown,
        ));

        debug!("Registered {} recognizers", coordinator.len());
        Ok(coordinator)
    }

    /// Add a recognizer to the group of its action category
    pub fn register(&mut self, recognizer: Recognizer) {
        match recognizer.action_type().category() {
            ActionCategory::FlowControl => self.flow_control.push(recognizer),
            ActionCategory::Navigation => self.navigation.push(recognizer),
            ActionCategory::Grabbing => self.grabbing.push(recognizer),
        }
    }

    pub fn update(&mut self, ctx: &mut RecognitionContext<'_>) -> TickReport {
        let mut report = TickReport::default();

        for recognizer in &mut self.flow_control {
            if recognizer.update(ctx) {
                report.triggered.push(recognizer.action_type());
            }
        }

        for recognizer in &mut self.navigation {
            if recognizer.update(ctx) {
                report.navigation_triggered = true;
                report.triggered.push(recognizer.action_type());
            }
        }

        if report.navigation_triggered {
            for recognizer in &mut self.grabbing {
                recognizer.reset();
            }
        } else {
            for recognizer in &mut self.grabbing {
                if recognizer.update(ctx) {
                    report.triggered.push(recognizer.action_type());
                }
            }
        }

        report
    }

    pub fn reset_all(&mut self) {
        for recognizer in self.recognizers_mut() {
            recognizer.reset();
        }
    }

    pub fn recognizer(&self, action_type: ActionType) -> Option<&Recognizer> {
        self.recognizers().find(|r| r.action_type() == action_type)
    }

    /// Hold progress of the flow-control gesture, 0.0 when absent
    pub fn hold_progress(&self, now: Duration) -> f32 {
        self.recognizer(ActionType::GestureHold)
            .and_then(|r| r.progress(now))
            .unwrap_or(0.0)
    }

    pub fn recognizers(&self) -> impl Iterator<Item = &Recognizer> {
        self.flow_control
            .iter()
            .chain(&self.navigation)
            .chain(&self.grabbing)
    }

    fn recognizers_mut(&mut self) -> impl Iterator<Item = &mut Recognizer> {
        self.flow_control
            .iter_mut()
            .chain(&mut self.navigation)
            .chain(&mut self.grabbing)
    }

    pub fn len(&self) -> usize {
        self.flow_control.len() + self.navigation.len() + self.grabbing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
