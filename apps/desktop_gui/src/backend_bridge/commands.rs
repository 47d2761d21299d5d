//! Commands queued from UI to the dealer worker.

use card_stack::RoundSetup;

#[derive(Debug, Clone)]
pub enum DealerCommand {
    DealRound {
        setup: RoundSetup,
        /// Fixed seed for reproducible spy assignment; fresh entropy when absent.
        seed: Option<u64>,
    },
    HowToPlay,
}

impl DealerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            DealerCommand::DealRound { .. } => "deal_round",
            DealerCommand::HowToPlay => "how_to_play",
        }
    }
}
