//! Gesture recognizers and their coordination
//!
//! Every gesture runs through the same [`Recognizer`] state machine. The
//! gesture-specific part is a [`TriggerCondition`] that turns the smoothed
//! frame into a boolean each tick:
//! - Navigation: [`LateralMove`], [`ForwardLean`]
//! - Grabbing: [`HandRaise`], [`EitherHandRaise`]
//! - Flow control: [`FistHold`]
//!
//! The [`Coordinator`] runs the categories in priority order and keeps
//! navigation and grabbing mutually exclusive.

mod coordinator;
mod flow_control;
mod grabbing;
mod navigation;
mod recognizer;

pub use coordinator::{Coordinator, TickReport};
pub use flow_control::FistHold;
pub use grabbing::{hand_raise_signal, EitherHandRaise, HandRaise, Side};
pub use navigation::{ForwardLean, LateralDirection, LateralMove};
pub use recognizer::{RecognitionContext, Recognizer, TriggerCondition};

use serde::{Deserialize, Serialize};

/// The seven recognizable gestures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    MoveLeft,
    MoveRight,
    MoveForward,
    GrabLeft,
    GrabRight,
    GrabGeneral,
    GestureHold,
}

impl ActionType {
    pub const ALL: [ActionType; 7] = [
        ActionType::MoveLeft,
        ActionType::MoveRight,
        ActionType::MoveForward,
        ActionType::GrabLeft,
        ActionType::GrabRight,
        ActionType::GrabGeneral,
        ActionType::GestureHold,
    ];

    pub fn category(self) -> ActionCategory {
        match self {
            ActionType::MoveLeft | ActionType::MoveRight | ActionType::MoveForward => {
                ActionCategory::Navigation
            }
            ActionType::GrabLeft | ActionType::GrabRight | ActionType::GrabGeneral => {
                ActionCategory::Grabbing
            }
            ActionType::GestureHold => ActionCategory::FlowControl,
        }
    }
}

/// Priority groups, evaluated FlowControl first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionCategory {
    Navigation,
    Grabbing,
    FlowControl,
}

/// Per-recognizer lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecognitionState {
    #[default]
    Idle,
    Detecting,
    Triggered,
    Cooldown,
}
