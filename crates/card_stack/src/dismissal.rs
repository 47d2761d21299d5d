//! Release decision: dismiss horizontally, dismiss vertically, or spring back.

use shared::domain::{Size, Vec2};

use crate::config::DismissalConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissAxis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitVector {
    pub axis: DismissAxis,
    /// `1.0` towards positive coordinates, `-1.0` towards negative.
    pub direction: f32,
    /// Offset from the card's resting position where the exit animation ends.
    pub target: Vec2,
    pub rotation: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DismissOutcome {
    NoDismiss,
    Dismiss(ExitVector),
}

impl DismissOutcome {
    pub fn is_dismiss(&self) -> bool {
        matches!(self, DismissOutcome::Dismiss(_))
    }

    pub fn axis(&self) -> Option<DismissAxis> {
        match self {
            DismissOutcome::NoDismiss => None,
            DismissOutcome::Dismiss(exit) => Some(exit.axis),
        }
    }

    pub fn exit(&self) -> Option<&ExitVector> {
        match self {
            DismissOutcome::NoDismiss => None,
            DismissOutcome::Dismiss(exit) => Some(exit),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DismissalPolicy {
    config: DismissalConfig,
    screen: Size,
}

impl DismissalPolicy {
    pub fn new(config: DismissalConfig, screen: Size) -> Self {
        Self { config, screen }
    }

    pub fn config(&self) -> &DismissalConfig {
        &self.config
    }

    /// Pure: identical inputs always give identical outcomes.
    ///
    /// When both axes qualify the one with the larger translation wins, vertical on a tie.
    pub fn decide(&self, translation: Vec2, velocity: Vec2, bounds: Size) -> DismissOutcome {
        if bounds.is_degenerate() || !translation.is_finite() || !velocity.is_finite() {
            return DismissOutcome::NoDismiss;
        }

        let threshold = self.config.velocity_threshold;
        let fraction = self.config.distance_fraction;
        let horizontal = velocity.x.abs() > threshold
            || translation.x.abs() > bounds.width * fraction;
        let vertical =
            velocity.y.abs() > threshold || translation.y.abs() > bounds.height * fraction;

        let axis = match (horizontal, vertical) {
            (false, false) => return DismissOutcome::NoDismiss,
            (true, false) => DismissAxis::Horizontal,
            (false, true) => DismissAxis::Vertical,
            (true, true) if translation.x.abs() > translation.y.abs() => DismissAxis::Horizontal,
            (true, true) => DismissAxis::Vertical,
        };

        DismissOutcome::Dismiss(self.exit_vector(axis, translation, velocity, bounds))
    }

    fn exit_vector(
        &self,
        axis: DismissAxis,
        translation: Vec2,
        velocity: Vec2,
        bounds: Size,
    ) -> ExitVector {
        match axis {
            DismissAxis::Horizontal => {
                let direction = direction_of(translation.x, velocity.x);
                let travel = self.screen.width.max(bounds.width)
                    * direction
                    * self.config.horizontal_overshoot;
                let target = Vec2::new(translation.x + travel, translation.y);
                let rotation = target.x / bounds.width
                    * self.config.max_rotation
                    * self.config.exit_rotation_factor;
                ExitVector {
                    axis,
                    direction,
                    target,
                    rotation,
                }
            }
            DismissAxis::Vertical => {
                let direction = direction_of(translation.y, velocity.y);
                let travel = self.screen.height.max(bounds.height)
                    * direction
                    * self.config.vertical_overshoot;
                ExitVector {
                    axis,
                    direction,
                    target: Vec2::new(translation.x, translation.y + travel),
                    rotation: 0.0,
                }
            }
        }
    }
}

/// Sign of the displacement, falling back to the flick direction for pure flicks.
fn direction_of(distance: f32, speed: f32) -> f32 {
    if distance != 0.0 {
        distance.signum()
    } else if speed != 0.0 {
        speed.signum()
    } else {
        1.0
    }
}

#[cfg(test)]
#[path = "tests/dismissal_tests.rs"]
mod tests;
