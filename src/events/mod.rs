//! Action events and their delivery to game-side listeners

mod bus;

pub use bus::{ActionCallback, ActionListener, ChannelListener, EventBus, SubscriptionId};

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::recognition::ActionType;

/// A recognized gesture, immutable once created
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionEvent {
    action_type: ActionType,
    timestamp: Duration,
    confidence: f32,
}

impl ActionEvent {
    pub fn new(action_type: ActionType, timestamp: Duration, confidence: f32) -> Self {
        Self {
            action_type,
            timestamp,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    pub fn action_type(&self) -> ActionType {
        self.action_type
    }

    /// Session time at which the gesture triggered
    pub fn timestamp(&self) -> Duration {
        self.timestamp
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }
}
