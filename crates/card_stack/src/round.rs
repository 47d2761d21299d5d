//! Turns the settings chosen before a round into card descriptors.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use shared::domain::CardDescriptor;
use tracing::debug;

use crate::error::EngineError;

pub const MIN_PLAYERS: usize = 3;
pub const MAX_PLAYERS: usize = 10;
pub const MIN_SPIES: usize = 1;
pub const MAX_SPIES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSetup {
    pub player_count: usize,
    pub spy_count: usize,
    pub show_hints: bool,
    pub category: String,
    pub secret_word: String,
}

impl Default for RoundSetup {
    fn default() -> Self {
        Self {
            player_count: MIN_PLAYERS,
            spy_count: MIN_SPIES,
            show_hints: false,
            category: "Places".to_string(),
            secret_word: "Library".to_string(),
        }
    }
}

impl RoundSetup {
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(EngineError::InvalidRound(format!(
                "player count {} outside {MIN_PLAYERS}..={MAX_PLAYERS}",
                self.player_count
            )));
        }
        if !(MIN_SPIES..=MAX_SPIES).contains(&self.spy_count) {
            return Err(EngineError::InvalidRound(format!(
                "spy count {} outside {MIN_SPIES}..={MAX_SPIES}",
                self.spy_count
            )));
        }
        if self.spy_count >= self.player_count {
            return Err(EngineError::InvalidRound(format!(
                "{} spies leave no civilians among {} players",
                self.spy_count, self.player_count
            )));
        }
        Ok(())
    }

    /// Draws `spy_count` distinct player indices uniformly.
    pub fn assign_spies<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<BTreeSet<usize>, EngineError> {
        self.validate()?;
        let spies: BTreeSet<usize> =
            rand::seq::index::sample(rng, self.player_count, self.spy_count)
                .into_iter()
                .collect();
        debug!(players = self.player_count, spies = ?spies, "spies assigned");
        Ok(spies)
    }

    /// Civilians learn the secret word; spies only get the category, and only with hints on.
    pub fn descriptors(&self, spies: &BTreeSet<usize>) -> Vec<CardDescriptor> {
        (0..self.player_count)
            .map(|index| {
                let label = format!("Player {}", index + 1);
                if spies.contains(&index) {
                    let descriptor = CardDescriptor::new(label, true);
                    if self.show_hints {
                        descriptor.with_hint(format!("Category: {}", self.category))
                    } else {
                        descriptor
                    }
                } else {
                    CardDescriptor::new(label, false).with_hint(self.secret_word.clone())
                }
            })
            .collect()
    }

    pub fn deal<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<CardDescriptor>, EngineError> {
        let spies = self.assign_spies(rng)?;
        Ok(self.descriptors(&spies))
    }
}

/// Descriptors for the how-to-play deck: one card per `(title, hint)` pair.
pub fn how_to_play_deck<I, T, H>(hints: I) -> Vec<CardDescriptor>
where
    I: IntoIterator<Item = (T, H)>,
    T: Into<String>,
    H: Into<String>,
{
    hints
        .into_iter()
        .map(|(title, hint)| CardDescriptor::new(title, false).with_hint(hint))
        .collect()
}

#[cfg(test)]
#[path = "tests/round_tests.rs"]
mod tests;
