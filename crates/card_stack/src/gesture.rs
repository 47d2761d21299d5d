//! One continuous pointer interaction, from press to release or cancel.

use shared::domain::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Start,
    Move,
    End,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub translation: Vec2,
    pub velocity: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    phase: GesturePhase,
    origin: Vec2,
    translation: Vec2,
    velocity: Vec2,
}

impl GestureSession {
    pub fn begin(origin: Vec2) -> Self {
        Self {
            phase: GesturePhase::Start,
            origin,
            translation: Vec2::ZERO,
            velocity: Vec2::ZERO,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, GesturePhase::Start | GesturePhase::Move)
    }

    /// Live translation and velocity; `None` once the session has ended or been cancelled.
    pub fn sample(&self) -> Option<GestureSample> {
        self.is_active().then_some(GestureSample {
            translation: self.translation,
            velocity: self.velocity,
        })
    }

    /// Records a pointer move and returns the accumulated translation.
    pub fn update(&mut self, point: Vec2, velocity: Vec2) -> Option<Vec2> {
        if !self.is_active() {
            return None;
        }
        self.phase = GesturePhase::Move;
        self.translation = point - self.origin;
        self.velocity = velocity;
        Some(self.translation)
    }

    /// Closes the session, returning the values the release decision is made from.
    pub fn finish(&mut self, velocity: Vec2) -> Option<GestureSample> {
        if !self.is_active() {
            return None;
        }
        self.velocity = velocity;
        let sample = GestureSample {
            translation: self.translation,
            velocity,
        };
        self.phase = GesturePhase::End;
        Some(sample)
    }

    pub fn cancel(&mut self) {
        if self.is_active() {
            self.phase = GesturePhase::Cancel;
        }
    }
}
