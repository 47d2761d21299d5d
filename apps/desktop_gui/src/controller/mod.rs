//! Controller layer: UI events, reducer-like screen transitions, and command orchestration.

pub mod events;
pub mod orchestration;
pub mod reducer;
