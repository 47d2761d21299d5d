use serde::{Deserialize, Serialize};

use crate::domain::CardId;

/// Lifecycle events raised by the card stack towards the hosting screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum StackEvent {
    TopCardChanged {
        card_id: CardId,
        remaining: usize,
    },
    CardDismissed {
        /// Stack position the card held when it left.
        index: usize,
        card_id: CardId,
    },
    CardFlipped {
        card_id: CardId,
    },
    StackEmptied,
}

impl StackEvent {
    pub fn name(&self) -> &'static str {
        match self {
            StackEvent::TopCardChanged { .. } => "top_card_changed",
            StackEvent::CardDismissed { .. } => "card_dismissed",
            StackEvent::CardFlipped { .. } => "card_flipped",
            StackEvent::StackEmptied => "stack_emptied",
        }
    }
}
