//! Dealer worker: takes round commands off the UI queue and answers with UI events.

pub mod commands;
pub mod runtime;
