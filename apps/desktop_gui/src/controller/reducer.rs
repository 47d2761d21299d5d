//! Screen phase transitions driven by UI events.

use shared::protocol::StackEvent;

use crate::controller::events::{DeckKind, UiEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenPhase {
    Waiting,
    /// `passed` players have looked at their card and swiped it away.
    Dealing { passed: usize, total: usize },
    /// Every role card is gone; the round can start.
    AllRevealed,
    HowToPlay { seen: usize, total: usize },
    HowToPlayDone,
}

impl ScreenPhase {
    pub fn headline(&self) -> String {
        match *self {
            ScreenPhase::Waiting => "Dealing cards...".to_string(),
            ScreenPhase::Dealing { passed, total } => {
                format!("Player {} of {total}: tap to reveal, swipe to pass", (passed + 1).min(total))
            }
            ScreenPhase::AllRevealed => "Everyone has seen their card. Start the discussion!".to_string(),
            ScreenPhase::HowToPlay { seen, total } => {
                format!("How to play ({}/{total})", (seen + 1).min(total))
            }
            ScreenPhase::HowToPlayDone => "That's it. Start a new round when you are ready.".to_string(),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, ScreenPhase::AllRevealed | ScreenPhase::HowToPlayDone)
    }
}

pub fn reduce(phase: ScreenPhase, event: &UiEvent) -> ScreenPhase {
    match (phase, event) {
        (_, UiEvent::DeckReady { kind, descriptors }) => match kind {
            DeckKind::Round => ScreenPhase::Dealing {
                passed: 0,
                total: descriptors.len(),
            },
            DeckKind::HowToPlay => ScreenPhase::HowToPlay {
                seen: 0,
                total: descriptors.len(),
            },
        },
        (ScreenPhase::Dealing { passed, total }, UiEvent::Stack(StackEvent::CardDismissed { .. })) => {
            ScreenPhase::Dealing {
                passed: passed + 1,
                total,
            }
        }
        (ScreenPhase::HowToPlay { seen, total }, UiEvent::Stack(StackEvent::CardDismissed { .. })) => {
            ScreenPhase::HowToPlay {
                seen: seen + 1,
                total,
            }
        }
        (ScreenPhase::Dealing { .. }, UiEvent::Stack(StackEvent::StackEmptied)) => {
            ScreenPhase::AllRevealed
        }
        (ScreenPhase::HowToPlay { .. }, UiEvent::Stack(StackEvent::StackEmptied)) => {
            ScreenPhase::HowToPlayDone
        }
        (phase, _) => phase,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::{CardDescriptor, CardId};

    fn round_deck(count: usize) -> UiEvent {
        UiEvent::DeckReady {
            kind: DeckKind::Round,
            descriptors: (0..count)
                .map(|index| CardDescriptor::new(format!("Player {}", index + 1), false))
                .collect(),
        }
    }

    #[test]
    fn dealing_counts_dismissals_until_the_stack_empties() {
        let mut phase = reduce(ScreenPhase::Waiting, &round_deck(3));
        assert_eq!(phase, ScreenPhase::Dealing { passed: 0, total: 3 });

        for index in 0..3 {
            phase = reduce(
                phase,
                &UiEvent::Stack(StackEvent::CardDismissed {
                    index: 0,
                    card_id: CardId(index),
                }),
            );
        }
        assert_eq!(phase, ScreenPhase::Dealing { passed: 3, total: 3 });

        phase = reduce(phase, &UiEvent::Stack(StackEvent::StackEmptied));
        assert_eq!(phase, ScreenPhase::AllRevealed);
        assert!(phase.is_finished());
    }

    #[test]
    fn flips_and_info_do_not_change_the_phase() {
        let phase = ScreenPhase::Dealing { passed: 1, total: 4 };
        let flipped = UiEvent::Stack(StackEvent::CardFlipped { card_id: CardId(1) });
        assert_eq!(reduce(phase, &flipped), phase);
        assert_eq!(reduce(phase, &UiEvent::Info("hello".to_string())), phase);
    }

    #[test]
    fn a_new_deck_restarts_the_screen() {
        let phase = reduce(ScreenPhase::AllRevealed, &round_deck(5));
        assert_eq!(phase, ScreenPhase::Dealing { passed: 0, total: 5 });

        let how_to = reduce(
            phase,
            &UiEvent::DeckReady {
                kind: DeckKind::HowToPlay,
                descriptors: vec![CardDescriptor::new("Reveal", false)],
            },
        );
        assert_eq!(how_to, ScreenPhase::HowToPlay { seen: 0, total: 1 });
        assert_eq!(
            reduce(how_to, &UiEvent::Stack(StackEvent::StackEmptied)),
            ScreenPhase::HowToPlayDone
        );
    }
}
