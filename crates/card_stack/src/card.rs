//! Card entity: two faces, a one-way flip state and the geometry it is drawn with.

use std::f32::consts::FRAC_PI_2;

use shared::domain::{CardDescriptor, CardFace, CardId, CardStatus, CardTheme, FlipState, Vec2};

use crate::theme::ThemeProvider;

const FRONT_SUBTITLE: &str = "Tap to reveal";
const FRONT_DETAIL: &str = "Swipe to dismiss";
const HINT_DETAIL: &str = "Swipe for the next hint";
const SPECIAL_TITLE: &str = "SPY";
const SPECIAL_SUBTITLE: &str = "Blend in and find the word";
const REGULAR_TITLE: &str = "CIVILIAN";
const REGULAR_SUBTITLE: &str = "The secret word is";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    pub offset: Vec2,
    pub scale: f32,
    /// In-plane rotation, radians.
    pub rotation: f32,
    /// Rotation about the vertical axis, radians in `0..=PI`.
    pub flip_angle: f32,
    pub opacity: f32,
}

impl Default for CardTransform {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            rotation: 0.0,
            flip_angle: 0.0,
            opacity: 1.0,
        }
    }
}

impl CardTransform {
    /// `t` may leave `0..=1` while a spring overshoots; opacity stays clamped.
    pub fn interpolate(&self, to: &Self, t: f32) -> Self {
        let lerp = |a: f32, b: f32| a + (b - a) * t;
        Self {
            offset: self.offset.lerp(to.offset, t),
            scale: lerp(self.scale, to.scale),
            rotation: lerp(self.rotation, to.rotation),
            flip_angle: lerp(self.flip_angle, to.flip_angle),
            opacity: lerp(self.opacity, to.opacity).clamp(0.0, 1.0),
        }
    }

    /// Horizontal projection factor of the face; negative past the flip midpoint.
    pub fn face_scale_x(&self, content_mirrored: bool) -> f32 {
        let projected = self.flip_angle.cos();
        if content_mirrored {
            -projected
        } else {
            projected
        }
    }

    /// Perspective scale of the (leading, trailing) vertical edges while flipping.
    pub fn edge_scales(&self, half_width: f32, perspective_depth: f32) -> (f32, f32) {
        if perspective_depth <= 0.0 {
            return (1.0, 1.0);
        }
        let depth = self.flip_angle.sin() * half_width / perspective_depth;
        (1.0 + depth, 1.0 / (1.0 + depth))
    }

    pub fn is_edge_on(&self) -> bool {
        (self.flip_angle - FRAC_PI_2).abs() < 1e-3
    }
}

#[derive(Debug, Clone)]
pub struct Card {
    id: CardId,
    front: CardFace,
    back: CardFace,
    flip_state: FlipState,
    is_special: bool,
    content_mirrored: bool,
    pub transform: CardTransform,
}

impl Card {
    pub fn new(id: CardId, front: CardFace, back: CardFace, is_special: bool) -> Self {
        Self {
            id,
            front,
            back,
            flip_state: FlipState::Unflipped,
            is_special,
            content_mirrored: false,
            transform: CardTransform::default(),
        }
    }

    /// Builds the card for a descriptor. Hint decks never flip, so their front carries the hint.
    pub fn from_descriptor(id: CardId, descriptor: &CardDescriptor, flip_enabled: bool) -> Self {
        let hint = descriptor.hint_text.clone().unwrap_or_default();
        let front = if flip_enabled {
            CardFace::new(&descriptor.role_label, FRONT_SUBTITLE, FRONT_DETAIL)
        } else {
            CardFace::new(&descriptor.role_label, hint.clone(), HINT_DETAIL)
        };
        let back = if descriptor.is_special {
            CardFace::new(SPECIAL_TITLE, SPECIAL_SUBTITLE, hint)
        } else {
            CardFace::new(REGULAR_TITLE, REGULAR_SUBTITLE, hint)
        };
        Self::new(id, front, back, descriptor.is_special)
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn front(&self) -> &CardFace {
        &self.front
    }

    pub fn back(&self) -> &CardFace {
        &self.back
    }

    pub fn visible_face(&self) -> &CardFace {
        match self.flip_state {
            FlipState::Unflipped => &self.front,
            FlipState::Flipped => &self.back,
        }
    }

    pub fn flip_state(&self) -> FlipState {
        self.flip_state
    }

    pub fn is_special(&self) -> bool {
        self.is_special
    }

    pub fn content_mirrored(&self) -> bool {
        self.content_mirrored
    }

    pub(crate) fn set_content_mirrored(&mut self, mirrored: bool) {
        self.content_mirrored = mirrored;
    }

    /// Unflipped -> flipped. Returns false when the card was already flipped.
    pub(crate) fn flip(&mut self) -> bool {
        if self.flip_state == FlipState::Flipped {
            return false;
        }
        self.flip_state = FlipState::Flipped;
        true
    }

    pub fn status(&self) -> CardStatus {
        CardStatus::for_card(self.flip_state, self.is_special)
    }

    pub fn theme(&self, provider: &dyn ThemeProvider) -> CardTheme {
        provider.theme_for(self.flip_state, self.is_special)
    }
}

#[cfg(test)]
#[path = "tests/card_tests.rs"]
mod tests;
