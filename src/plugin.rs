//! Bevy integration for the recognition pipeline
//!
//! [`PoseActionsPlugin`] owns one [`ActionRecognitionManager`], ticks it once
//! per `Update` with the app clock and re-emits every recognized gesture as a
//! [`PoseActionEvent`]. Pose estimators write into the [`PoseSourceHandle`]
//! resource from any thread.

use bevy::prelude::*;
use crossbeam_channel::Receiver;
use tracing::{error, info, warn};

use crate::config::PoseActionsConfig;
use crate::events::ActionEvent;
use crate::landmarks::SharedPoseSource;
use crate::manager::ActionRecognitionManager;

/// Capacity of the manager-to-ECS action channel
const ACTION_CHANNEL_CAPACITY: usize = 64;

/// A recognized gesture, as a Bevy event
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PoseActionEvent(pub ActionEvent);

/// Ask for a neutral-pose calibration on the next frame
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct CalibrationRequest;

/// Write side of the landmark source used by the manager
#[derive(Resource, Clone)]
pub struct PoseSourceHandle(pub SharedPoseSource);

/// Per-frame status for UI feedback
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PoseActionStatus {
    pub calibrated: bool,
    /// The last manual calibration request was rejected
    pub calibration_failed: bool,
    pub has_pose: bool,
    pub hold_progress: f32,
}

#[derive(Resource)]
struct ActionForwarder(Receiver<ActionEvent>);

/// Gesture recognition plugin
#[derive(Default)]
pub struct PoseActionsPlugin {
    pub config: PoseActionsConfig,
}

impl PoseActionsPlugin {
    pub fn new(config: PoseActionsConfig) -> Self {
        Self { config }
    }
}

impl Plugin for PoseActionsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PoseActionEvent>()
            .add_event::<CalibrationRequest>()
            .init_resource::<Time>()
            .init_resource::<PoseActionStatus>();

        match ActionRecognitionManager::with_shared_source(&self.config) {
            Ok((mut manager, source)) => {
                let receiver = manager.event_channel(ACTION_CHANNEL_CAPACITY);
                app.insert_resource(manager)
                    .insert_resource(PoseSourceHandle(source))
                    .insert_resource(ActionForwarder(receiver))
                    .add_systems(Update, drive_pose_actions);
            }
            Err(e) => {
                error!("Pose actions disabled, invalid configuration: {}", e);
            }
        }
    }
}

/// Apply calibration requests, tick the manager and forward its actions
///
/// Requests are handled before the tick so this frame's recognizers already
/// run against the new neutral pose.
fn drive_pose_actions(
    time: Res<Time>,
    manager: Option<ResMut<ActionRecognitionManager>>,
    forwarder: Option<Res<ActionForwarder>>,
    mut requests: EventReader<CalibrationRequest>,
    mut actions: EventWriter<PoseActionEvent>,
    mut status: ResMut<PoseActionStatus>,
) {
    let (Some(mut manager), Some(forwarder)) = (manager, forwarder) else {
        return;
    };

    let mut calibration_failed = status.calibration_failed;
    if requests.read().count() > 0 {
        match manager.perform_calibration() {
            Ok(profile) => {
                calibration_failed = false;
                info!("Manual calibration complete, scale {:.3}", profile.scale);
            }
            Err(e) => {
                calibration_failed = true;
                warn!("Manual calibration request rejected: {}", e);
            }
        }
    }

    let now = time.elapsed();
    manager.tick(now);

    for event in forwarder.0.try_iter() {
        actions.write(PoseActionEvent(event));
    }

    *status = PoseActionStatus {
        calibrated: manager.is_calibrated(),
        calibration_failed,
        has_pose: manager.has_valid_pose(),
        hold_progress: manager.hold_progress(now),
    };
}
