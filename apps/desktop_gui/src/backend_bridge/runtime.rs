//! Worker thread that turns dealer commands into card descriptors.

use std::thread;

use card_stack::how_to_play_deck;
use crossbeam_channel::{Receiver, Sender};
use rand::{rngs::StdRng, SeedableRng};
use shared::domain::CardDescriptor;

use crate::backend_bridge::commands::DealerCommand;
use crate::controller::events::{DeckKind, UiError, UiEvent};

const HOW_TO_PLAY: [(&str, &str); 4] = [
    (
        "Reveal",
        "Pass the device around. Each player taps their card to see their role, then swipes it away.",
    ),
    (
        "Civilians",
        "Civilians all see the same secret word. Talk about it without saying it outright.",
    ),
    (
        "Spies",
        "Spies do not know the word. Listen closely and bluff until you can guess it.",
    ),
    (
        "Vote",
        "When the timer runs out, vote for who you think the spy is.",
    ),
];

pub fn launch(cmd_rx: Receiver<DealerCommand>, ui_tx: Sender<UiEvent>) {
    let spawned = thread::Builder::new()
        .name("dealer".to_string())
        .spawn(move || run(cmd_rx, ui_tx));
    if let Err(err) = spawned {
        tracing::error!("failed to spawn dealer worker: {err}");
    }
}

fn run(cmd_rx: Receiver<DealerCommand>, ui_tx: Sender<UiEvent>) {
    tracing::info!("dealer worker started");
    if let Err(err) = ui_tx.try_send(UiEvent::Info("Dealer ready".to_string())) {
        tracing::warn!("dealer ready notice not delivered: {err}");
    }
    while let Ok(cmd) = cmd_rx.recv() {
        let event = handle(cmd);
        if ui_tx.send(event).is_err() {
            break;
        }
    }
    tracing::info!("dealer worker stopped");
}

fn handle(cmd: DealerCommand) -> UiEvent {
    match cmd {
        DealerCommand::DealRound { setup, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            match setup.deal(&mut rng) {
                Ok(descriptors) => {
                    tracing::info!(
                        players = setup.player_count,
                        spies = setup.spy_count,
                        hints = setup.show_hints,
                        "round dealt"
                    );
                    UiEvent::DeckReady {
                        kind: DeckKind::Round,
                        descriptors,
                    }
                }
                Err(err) => {
                    tracing::warn!("round rejected: {err}");
                    UiEvent::Error(UiError::from_report(&err.report()))
                }
            }
        }
        DealerCommand::HowToPlay => UiEvent::DeckReady {
            kind: DeckKind::HowToPlay,
            descriptors: how_to_play_descriptors(),
        },
    }
}

fn how_to_play_descriptors() -> Vec<CardDescriptor> {
    how_to_play_deck(HOW_TO_PLAY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_stack::RoundSetup;

    #[test]
    fn seeded_deal_produces_a_round_deck() {
        let event = handle(DealerCommand::DealRound {
            setup: RoundSetup {
                player_count: 5,
                spy_count: 2,
                ..RoundSetup::default()
            },
            seed: Some(11),
        });
        match event {
            UiEvent::DeckReady { kind, descriptors } => {
                assert_eq!(kind, DeckKind::Round);
                assert_eq!(descriptors.len(), 5);
                assert_eq!(descriptors.iter().filter(|d| d.is_special).count(), 2);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn invalid_round_comes_back_as_an_error() {
        let event = handle(DealerCommand::DealRound {
            setup: RoundSetup {
                player_count: 2,
                ..RoundSetup::default()
            },
            seed: Some(1),
        });
        match event {
            UiEvent::Error(err) => assert!(err.message().contains("player count 2")),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn how_to_play_deck_has_no_special_cards() {
        let descriptors = how_to_play_descriptors();
        assert_eq!(descriptors.len(), HOW_TO_PLAY.len());
        assert!(descriptors.iter().all(|d| !d.is_special && d.hint_text.is_some()));
    }

    #[test]
    fn worker_answers_ready_then_each_command() {
        let (cmd_tx, cmd_rx) = crossbeam_channel::bounded(4);
        let (ui_tx, ui_rx) = crossbeam_channel::bounded(4);
        cmd_tx.send(DealerCommand::HowToPlay).expect("queue command");
        drop(cmd_tx);

        run(cmd_rx, ui_tx);

        let events: Vec<UiEvent> = ui_rx.try_iter().collect();
        assert!(matches!(&events[0], UiEvent::Info(message) if message == "Dealer ready"));
        assert!(matches!(
            &events[1],
            UiEvent::DeckReady {
                kind: DeckKind::HowToPlay,
                ..
            }
        ));
    }

    #[test]
    fn worker_stops_quietly_when_the_ui_is_gone() {
        let (cmd_tx, cmd_rx) = crossbeam_channel::bounded(4);
        let (ui_tx, ui_rx) = crossbeam_channel::bounded::<UiEvent>(4);
        drop(ui_rx);
        cmd_tx.send(DealerCommand::HowToPlay).expect("queue command");

        run(cmd_rx, ui_tx);
        assert!(cmd_tx.is_empty());
    }
}
