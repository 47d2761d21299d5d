//! UI/worker events and error modeling for the card table.

use shared::{
    domain::CardDescriptor,
    error::{EngineErrorReport, ErrorCode},
    protocol::StackEvent,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckKind {
    Round,
    HowToPlay,
}

#[derive(Debug)]
pub enum UiEvent {
    DeckReady {
        kind: DeckKind,
        descriptors: Vec<CardDescriptor>,
    },
    Stack(StackEvent),
    Info(String),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Config,
    Round,
    Engine,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    message: String,
}

impl UiError {
    pub fn from_report(report: &EngineErrorReport) -> Self {
        let category = match report.code {
            ErrorCode::InvalidConfig => UiErrorCategory::Config,
            ErrorCode::InvalidRound => UiErrorCategory::Round,
            ErrorCode::InvariantViolation | ErrorCode::NotFound => UiErrorCategory::Engine,
        };
        Self {
            category,
            message: report.message.clone(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Config => "Configuration",
        UiErrorCategory::Round => "Round setup",
        UiErrorCategory::Engine => "Card stack",
    }
}
