//! Per-card interaction state machine.
//!
//! Input arrives as [`CardEvent`]s. Every transition is a `(state, event)` arm whose action
//! returns the next state, so there are no nested completion callbacks: animation
//! completion is just another event (`AnimationDone`) produced by [`CardController::tick`].

use std::f32::consts::{FRAC_PI_2, PI};

use shared::domain::{CardFace, CardId, CardTheme, Size, Vec2};
use tracing::debug;

use crate::{
    animation::{Animation, Curve, Pulse},
    card::{Card, CardTransform},
    config::{EngineConfig, SpringParams},
    dismissal::{DismissOutcome, DismissalPolicy, ExitVector},
    gesture::GestureSession,
    stack::StackGeometry,
    theme::ThemeProvider,
};

/// Raised above any index-based z-order while a card rotates.
const FLIP_Z_BOOST: i32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Idle,
    Dragging,
    Returning,
    FlippingOut,
    FlippingIn,
    Dismissing,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardEvent {
    PointerDown { point: Vec2 },
    PointerMove { point: Vec2, velocity: Vec2 },
    PointerUp { velocity: Vec2 },
    PointerCancel,
    Tap,
    AnimationDone,
}

impl CardEvent {
    fn name(&self) -> &'static str {
        match self {
            CardEvent::PointerDown { .. } => "pointer_down",
            CardEvent::PointerMove { .. } => "pointer_move",
            CardEvent::PointerUp { .. } => "pointer_up",
            CardEvent::PointerCancel => "pointer_cancel",
            CardEvent::Tap => "tap",
            CardEvent::AnimationDone => "animation_done",
        }
    }
}

/// What a transition reports back to the owning stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardNotice {
    Dismissed,
    Flipped,
    Bounced,
}

/// Everything a host needs to paint one card.
#[derive(Debug, Clone)]
pub struct CardVisual<'a> {
    pub card_id: CardId,
    pub face: &'a CardFace,
    pub theme: CardTheme,
    pub transform: CardTransform,
    pub size: Size,
    pub z_order: i32,
    pub content_mirrored: bool,
    pub face_scale_x: f32,
    pub edge_scales: (f32, f32),
    pub interactive: bool,
    pub state: CardState,
}

#[derive(Debug, Clone)]
pub struct CardController {
    card: Card,
    state: CardState,
    /// Assigned by the stack; only the top card is active.
    active: bool,
    /// Set for the whole two-phase flip.
    flip_lock: bool,
    flip_enabled: bool,
    gesture: Option<GestureSession>,
    drag_origin: CardTransform,
    animation: Option<Animation>,
    feedback: Option<Pulse>,
    rest: StackGeometry,
    bounds: Size,
    container: Size,
    policy: DismissalPolicy,
    config: EngineConfig,
}

impl CardController {
    pub fn new(
        mut card: Card,
        rest: StackGeometry,
        bounds: Size,
        container: Size,
        config: EngineConfig,
        flip_enabled: bool,
    ) -> Self {
        card.transform = rest.transform();
        Self {
            card,
            state: CardState::Idle,
            active: false,
            flip_lock: false,
            flip_enabled,
            gesture: None,
            drag_origin: rest.transform(),
            animation: None,
            feedback: None,
            rest,
            bounds,
            container,
            policy: DismissalPolicy::new(config.dismissal, container),
            config,
        }
    }

    pub fn id(&self) -> CardId {
        self.card.id()
    }

    pub fn card(&self) -> &Card {
        &self.card
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn geometry(&self) -> StackGeometry {
        self.rest
    }

    pub fn transform(&self) -> CardTransform {
        self.card.transform
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn interaction_enabled(&self) -> bool {
        self.active && !self.flip_lock && self.state != CardState::Removed
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn gesture(&self) -> Option<&GestureSession> {
        self.gesture.as_ref()
    }

    pub fn z_order(&self) -> i32 {
        if self.flip_lock {
            self.rest.z_order + FLIP_Z_BOOST
        } else {
            self.rest.z_order
        }
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Feeds one event through the state machine.
    pub fn handle(&mut self, event: CardEvent) -> Option<CardNotice> {
        let before = self.state;
        let (next, notice) = match (self.state, event) {
            (CardState::Removed, _) => (CardState::Removed, None),
            (CardState::Idle, CardEvent::PointerDown { point }) if self.interaction_enabled() => {
                (self.begin_drag(point), None)
            }
            (CardState::Returning, CardEvent::PointerDown { point })
                if self.interaction_enabled() =>
            {
                self.stop_animation();
                self.state = CardState::Idle;
                (self.begin_drag(point), None)
            }
            (CardState::Dragging, CardEvent::PointerDown { point }) => (self.regrab(point), None),
            (CardState::Dragging, CardEvent::PointerMove { point, velocity }) => {
                (self.drag_to(point, velocity), None)
            }
            (CardState::Dragging, CardEvent::PointerUp { velocity }) => (self.release(velocity), None),
            (CardState::Dragging, CardEvent::PointerCancel) => (self.cancel_drag(), None),
            (CardState::Idle | CardState::Returning, CardEvent::Tap)
                if self.interaction_enabled() =>
            {
                self.tap()
            }
            (CardState::Returning, CardEvent::AnimationDone) => (CardState::Idle, None),
            (CardState::Dismissing, CardEvent::AnimationDone) => {
                (self.finish_dismissal(), Some(CardNotice::Dismissed))
            }
            (CardState::FlippingOut, CardEvent::AnimationDone) => (self.flip_midpoint(), None),
            (CardState::FlippingIn, CardEvent::AnimationDone) => {
                (self.finish_flip(), Some(CardNotice::Flipped))
            }
            (state, event) => {
                debug!(
                    card_id = self.id().0,
                    state = ?state,
                    event = event.name(),
                    active = self.active,
                    "ignored card event"
                );
                (state, None)
            }
        };

        self.state = next;
        if before != next {
            debug!(card_id = self.id().0, from = ?before, to = ?next, "card transition");
        }
        notice
    }

    /// Advances animations by `dt` seconds and delivers `AnimationDone` when one ends.
    pub fn tick(&mut self, dt: f32) -> Option<CardNotice> {
        if let Some(pulse) = self.feedback.as_mut() {
            if pulse.advance(dt) {
                self.feedback = None;
            }
        }

        let animation = self.animation.as_mut()?;
        let finished = animation.advance(dt);
        self.card.transform = animation.sample();
        if !finished {
            return None;
        }
        self.animation = None;
        self.handle(CardEvent::AnimationDone)
    }

    /// Moves the resting geometry, animating there when the card is not busy.
    pub(crate) fn settle_to(&mut self, rest: StackGeometry, delay: f32, params: SpringParams) {
        self.rest = rest;
        match self.state {
            CardState::Idle | CardState::Returning => {
                let mut target = rest.transform();
                target.flip_angle = self.card.transform.flip_angle;
                self.animate_to(target, params, 0.0, delay);
                self.state = CardState::Returning;
            }
            // Dragging returns to the new rest on release; flips and exits keep their course.
            _ => {}
        }
    }

    /// Places the card above its rest position, invisible, and springs it in.
    pub(crate) fn enter(&mut self, drop: f32, delay: f32, params: SpringParams) {
        let mut start = self.rest.transform();
        start.offset.y -= drop;
        start.opacity = 0.0;
        self.card.transform = start;
        self.settle_to(self.rest, delay, params);
    }

    pub fn visual<'a>(&'a self, theme: &dyn ThemeProvider) -> CardVisual<'a> {
        let mut transform = self.card.transform;
        if let Some(pulse) = &self.feedback {
            transform.scale *= pulse.scale_factor();
        }
        let mirrored = self.card.content_mirrored();
        CardVisual {
            card_id: self.id(),
            face: self.card.visible_face(),
            theme: self.card.theme(theme),
            transform,
            size: self.bounds,
            z_order: self.z_order(),
            content_mirrored: mirrored,
            face_scale_x: transform.face_scale_x(mirrored),
            edge_scales: transform
                .edge_scales(self.bounds.width * 0.5, self.config.flip.perspective_depth),
            interactive: self.interaction_enabled(),
            state: self.state,
        }
    }

    fn begin_drag(&mut self, point: Vec2) -> CardState {
        self.gesture = Some(GestureSession::begin(point));
        self.drag_origin = self.card.transform;
        self.card.transform.scale = self.drag_origin.scale * self.config.drag.lift_scale;
        CardState::Dragging
    }

    /// A fresh press mid-drag continues from where the card is, not from the first press.
    fn regrab(&mut self, point: Vec2) -> CardState {
        self.gesture = Some(GestureSession::begin(point));
        self.drag_origin.offset = self.card.transform.offset;
        CardState::Dragging
    }

    fn drag_to(&mut self, point: Vec2, velocity: Vec2) -> CardState {
        let Some(translation) = self
            .gesture
            .as_mut()
            .and_then(|gesture| gesture.update(point, velocity))
        else {
            return CardState::Dragging;
        };

        let offset = self.drag_origin.offset + translation * self.config.drag.resistance;
        let rotation = if self.container.width > 0.0 {
            offset.x / self.container.width * self.config.dismissal.max_rotation
        } else {
            0.0
        };
        self.card.transform.offset = offset;
        self.card.transform.rotation = self.drag_origin.rotation + rotation;
        self.card.transform.scale = self.drag_origin.scale * self.config.drag.lift_scale;
        CardState::Dragging
    }

    fn release(&mut self, velocity: Vec2) -> CardState {
        let sample = self
            .gesture
            .take()
            .and_then(|mut gesture| gesture.finish(velocity));
        let Some(sample) = sample else {
            self.start_return(velocity);
            return CardState::Returning;
        };

        match self
            .policy
            .decide(sample.translation, sample.velocity, self.bounds)
        {
            DismissOutcome::Dismiss(exit) => {
                debug!(
                    card_id = self.id().0,
                    axis = ?exit.axis,
                    direction = exit.direction,
                    "dismissal accepted"
                );
                self.start_dismissal(&exit, sample.velocity);
                CardState::Dismissing
            }
            DismissOutcome::NoDismiss => {
                self.start_return(sample.velocity);
                CardState::Returning
            }
        }
    }

    fn cancel_drag(&mut self) -> CardState {
        if let Some(mut gesture) = self.gesture.take() {
            gesture.cancel();
        }
        self.start_return(Vec2::ZERO);
        CardState::Returning
    }

    fn start_return(&mut self, release_velocity: Vec2) {
        let mut target = self.rest.transform();
        target.flip_angle = self.card.transform.flip_angle;
        let springs = self.config.springs;
        let velocity = springs.initial_velocity(release_velocity);
        self.animate_to(target, springs.return_to_rest, velocity, 0.0);
    }

    fn start_dismissal(&mut self, exit: &ExitVector, release_velocity: Vec2) {
        let target = CardTransform {
            offset: self.drag_origin.offset + exit.target,
            scale: self.drag_origin.scale,
            rotation: self.drag_origin.rotation + exit.rotation,
            flip_angle: self.card.transform.flip_angle,
            opacity: 0.0,
        };
        let springs = self.config.springs;
        let velocity = springs.initial_velocity(release_velocity);
        self.animate_to(target, springs.dismiss, velocity, 0.0);
    }

    fn finish_dismissal(&mut self) -> CardState {
        self.active = false;
        self.gesture = None;
        self.feedback = None;
        CardState::Removed
    }

    /// Valid in `Idle` and `Returning`. A bounce leaves any settling spring running.
    fn tap(&mut self) -> (CardState, Option<CardNotice>) {
        if self.flip_enabled && self.card.flip_state() == shared::domain::FlipState::Unflipped {
            self.stop_animation();
            return (self.begin_flip(), None);
        }
        self.feedback = Some(Pulse::new(
            self.config.flip.bounce_scale,
            self.config.flip.bounce_duration,
        ));
        (self.state, Some(CardNotice::Bounced))
    }

    /// The first half also carries the card the rest of the way to its resting geometry.
    fn begin_flip(&mut self) -> CardState {
        self.flip_lock = true;
        let mut target = self.rest.transform();
        target.flip_angle = FRAC_PI_2;
        self.animation = Some(Animation::new(
            self.card.transform,
            target,
            self.config.flip.half_duration,
            Curve::EaseIn,
        ));
        CardState::FlippingOut
    }

    /// Edge-on: swap to the back face and pre-mirror it, since the second half of the
    /// rotation reverses handedness again.
    fn flip_midpoint(&mut self) -> CardState {
        self.card.flip();
        self.card.set_content_mirrored(true);

        let mut from = self.card.transform;
        from.flip_angle = FRAC_PI_2;
        let mut target = from;
        target.flip_angle = PI;
        self.animation = Some(Animation::new(
            from,
            target,
            self.config.flip.half_duration,
            Curve::EaseOut,
        ));
        CardState::FlippingIn
    }

    /// A half-turned card with mirrored content looks the same as an unrotated one.
    fn finish_flip(&mut self) -> CardState {
        self.card.transform.flip_angle = 0.0;
        self.card.set_content_mirrored(false);
        self.flip_lock = false;
        CardState::Idle
    }

    /// Starts a new animation from wherever the card is now. Anything in flight is
    /// stopped first so its current value becomes the new start.
    fn animate_to(
        &mut self,
        target: CardTransform,
        params: SpringParams,
        initial_velocity: f32,
        delay: f32,
    ) {
        self.stop_animation();
        let curve = Curve::Spring {
            damping_ratio: params.damping_ratio,
            initial_velocity,
        };
        self.animation = Some(
            Animation::new(self.card.transform, target, params.duration, curve).with_delay(delay),
        );
    }

    fn stop_animation(&mut self) {
        if let Some(animation) = self.animation.take() {
            self.card.transform = animation.sample();
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
