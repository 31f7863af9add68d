//! Per-session owner of the whole recognition pipeline
//!
//! The manager wires the landmark source, smoothing, calibration, the event
//! bus and the coordinator together and is driven by exactly one `tick` per
//! game-loop frame.

use std::sync::Arc;
use std::time::Duration;

use bevy::prelude::Resource;
use crossbeam_channel::Receiver;
use tracing::{debug, info, warn};

use crate::calibration::{CalibrationProfile, Calibrator};
use crate::config::{ConfigValidation, PoseActionsConfig, SessionConfig};
use crate::error::{CalibrationError, RecognitionResult};
use crate::events::{ActionEvent, ActionListener, EventBus, SubscriptionId};
use crate::landmarks::{LandmarkSource, PoseFrame, PoseProcessor, SharedPoseSource};
use crate::recognition::{ActionType, Coordinator, RecognitionContext, RecognitionState, TickReport};

/// Gesture recognition session
#[derive(Resource)]
pub struct ActionRecognitionManager {
    source: Box<dyn LandmarkSource>,
    processor: PoseProcessor,
    calibrator: Calibrator,
    bus: EventBus,
    coordinator: Coordinator,
    session: SessionConfig,
    /// Next automatic calibration attempt, set on the first tick
    next_calibration: Option<Duration>,
}

impl ActionRecognitionManager {
    /// Build a session around an injected landmark source
    pub fn new(config: &PoseActionsConfig, source: Box<dyn LandmarkSource>) -> RecognitionResult<Self> {
        config.validate()?;
        let coordinator = Coordinator::from_config(&config.recognition)?;
        info!(
            "Action recognition initialized with {} recognizers",
            coordinator.len()
        );

        Ok(Self {
            source,
            processor: PoseProcessor::new(config.recognition.smoothing_factor),
            calibrator: Calibrator::new(),
            bus: EventBus::new(),
            coordinator,
            session: config.session.clone(),
            next_calibration: None,
        })
    }

    /// Build a session reading from a new [`SharedPoseSource`]
    ///
    /// The returned handle is what the pose estimator writes results into.
    pub fn with_shared_source(config: &PoseActionsConfig) -> RecognitionResult<(Self, SharedPoseSource)> {
        let source = SharedPoseSource::new(config.source.clone());
        let manager = Self::new(config, Box::new(source.clone()))?;
        Ok((manager, source))
    }

    /// Run one frame of the pipeline
    pub fn tick(&mut self, now: Duration) -> TickReport {
        self.bus.process_deferred_events();
        self.processor.process(self.source.as_ref());
        self.run_calibration_schedule(now);

        let mut ctx = RecognitionContext {
            frame: self.processor.frame(),
            calibrator: &mut self.calibrator,
            bus: &mut self.bus,
            now,
        };
        self.coordinator.update(&mut ctx)
    }

    fn run_calibration_schedule(&mut self, now: Duration) {
        if !self.session.auto_calibrate || self.calibrator.is_calibrated() {
            return;
        }

        let due = *self
            .next_calibration
            .get_or_insert(now + self.session.calibration_delay());
        if now < due {
            return;
        }

        if let Err(e) = self.perform_calibration() {
            let retry = now + self.session.calibration_retry();
            debug!("Automatic calibration failed ({}), retrying at {:?}", e, retry);
            self.next_calibration = Some(retry);
        }
    }

    /// Capture the neutral pose from the current smoothed frame
    ///
    /// Success restarts every recognizer; failure leaves the session as it was.
    pub fn perform_calibration(&mut self) -> Result<CalibrationProfile, CalibrationError> {
        match self.calibrator.calibrate(self.processor.frame()) {
            Ok(profile) => {
                self.coordinator.reset_all();
                Ok(profile)
            }
            Err(e) => {
                warn!("Calibration failed: {}", e);
                Err(e)
            }
        }
    }

    /// Forget calibration, smoothing history and recognizer state
    pub fn reset_session(&mut self) {
        self.calibrator.reset();
        self.processor.reset();
        self.coordinator.reset_all();
        self.next_calibration = None;
        info!("Recognition session reset");
    }

    pub fn register_listener(&mut self, listener: Arc<dyn ActionListener>) -> bool {
        self.bus.register_listener(listener)
    }

    pub fn unregister_listener(&mut self, listener: &Arc<dyn ActionListener>) -> bool {
        self.bus.unregister_listener(listener)
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&ActionEvent) + Send + Sync + 'static,
    {
        self.bus.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Bounded channel receiving every published action
    pub fn event_channel(&mut self, capacity: usize) -> Receiver<ActionEvent> {
        self.bus.channel(capacity)
    }

    /// Registered listeners and subscriptions
    pub fn listener_count(&self) -> usize {
        self.bus.listener_count()
    }

    /// Queue an event for delivery at the start of the next tick
    pub fn publish_deferred(&mut self, event: ActionEvent) {
        self.bus.publish_deferred(event);
    }

    pub fn is_calibrated(&self) -> bool {
        self.calibrator.is_calibrated()
    }

    pub fn calibration(&self) -> Option<&CalibrationProfile> {
        self.calibrator.profile()
    }

    /// Progress of the hold gesture in [0, 1]
    pub fn hold_progress(&self, now: Duration) -> f32 {
        self.coordinator.hold_progress(now)
    }

    pub fn recognizer_state(&self, action_type: ActionType) -> Option<RecognitionState> {
        self.coordinator.recognizer(action_type).map(|r| r.state())
    }

    pub fn has_valid_pose(&self) -> bool {
        self.source.has_valid_pose()
    }

    /// Smoothed landmarks of the latest tick
    pub fn frame(&self) -> &PoseFrame {
        self.processor.frame()
    }

    /// Detach every listener and drop pending events
    pub fn shutdown(&mut self) {
        self.bus.clear();
        info!("Action recognition shut down");
    }
}
