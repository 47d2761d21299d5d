//! Command orchestration helpers from UI actions to the dealer queue, and engine events
//! back onto the UI queue.

use crossbeam_channel::{Sender, TrySendError};
use shared::protocol::StackEvent;

use crate::backend_bridge::commands::DealerCommand;
use crate::controller::events::UiEvent;

pub fn dispatch_dealer_command(cmd_tx: &Sender<DealerCommand>, cmd: DealerCommand, status: &mut String) {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->dealer command"),
        Err(TrySendError::Full(_)) => {
            *status = "Dealer queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Dealer worker disconnected; restart the app".to_string();
        }
    }
}

/// Queues drained stack events for the reducer. Returns how many were queued.
pub fn forward_stack_events(
    ui_tx: &Sender<UiEvent>,
    events: Vec<StackEvent>,
    status: &mut String,
) -> usize {
    let mut queued = 0;
    for event in events {
        let name = event.name();
        match ui_tx.try_send(UiEvent::Stack(event)) {
            Ok(()) => {
                tracing::debug!(event = name, "forwarded stack event");
                queued += 1;
            }
            Err(TrySendError::Full(_)) => {
                tracing::warn!(event = name, "ui event queue full; stack event dropped");
                *status = "UI event queue is full; some card events were dropped".to_string();
            }
            Err(TrySendError::Disconnected(_)) => {
                *status = "UI event queue disconnected".to_string();
                break;
            }
        }
    }
    queued
}
