//! Recognition integration tests
//!
//! Gesture scenarios, debounce and cooldown guarantees, and cross-category
//! exclusivity, all driven through the manager tick.

pub mod coordination_test;
pub mod edge_trigger_test;
pub mod scenario_test;
