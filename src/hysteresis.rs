use crate::error::{RecognitionError, RecognitionResult};

/// Two-threshold boolean latch
///
/// Switches on only above `enter` and off only below `exit`; values inside
/// the band keep the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct HysteresisGate {
    enter: f32,
    exit: f32,
    active: bool,
}

impl HysteresisGate {
    pub fn new(enter: f32, exit: f32) -> RecognitionResult<Self> {
        if !enter.is_finite() || !exit.is_finite() || enter <= exit {
            return Err(RecognitionError::InvalidThresholds { enter, exit });
        }
        Ok(Self {
            enter,
            exit,
            active: false,
        })
    }

    /// Feed one sample and return the latch state
    pub fn update(&mut self, value: f32) -> bool {
        if self.active {
            if value < self.exit {
                self.active = false;
            }
        } else if value > self.enter {
            self.active = true;
        }
        self.active
    }

    pub fn reset(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn thresholds(&self) -> (f32, f32) {
        (self.enter, self.exit)
    }
}
