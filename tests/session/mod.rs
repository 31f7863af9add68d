//! Session-level integration tests
//!
//! Configuration files, listener delivery, automatic calibration and
//! recording replay.

pub mod config_test;
pub mod listener_test;
pub mod replay_test;
