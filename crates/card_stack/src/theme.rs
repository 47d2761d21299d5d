//! Theme seam: the engine asks for colors, it never computes them.

use shared::domain::{CardStatus, CardTheme, FlipState, Rgba};

pub trait ThemeProvider {
    fn theme_for(&self, flip_state: FlipState, is_special: bool) -> CardTheme;
}

/// The blue/red/gray palette the reveal screen ships with.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPalette;

impl DefaultPalette {
    pub fn for_status(status: CardStatus) -> CardTheme {
        match status {
            CardStatus::ActiveBlue => CardTheme {
                border: Rgba::rgb(0x3d, 0x8b, 0xff),
                glow: Rgba::rgb(0x1f, 0x5f, 0xd6).with_alpha(0x80),
                fill: Rgba::rgb(0x0e, 0x1a, 0x3a),
            },
            CardStatus::ActiveRed => CardTheme {
                border: Rgba::rgb(0xff, 0x4d, 0x5e),
                glow: Rgba::rgb(0xd6, 0x1f, 0x3a).with_alpha(0x80),
                fill: Rgba::rgb(0x3a, 0x0e, 0x16),
            },
            CardStatus::Inactive => CardTheme {
                border: Rgba::rgb(0x8a, 0x8f, 0x98),
                glow: Rgba::rgb(0x5a, 0x5f, 0x66).with_alpha(0x80),
                fill: Rgba::rgb(0x1e, 0x20, 0x24),
            },
        }
    }
}

impl ThemeProvider for DefaultPalette {
    fn theme_for(&self, flip_state: FlipState, is_special: bool) -> CardTheme {
        Self::for_status(CardStatus::for_card(flip_state, is_special))
    }
}
