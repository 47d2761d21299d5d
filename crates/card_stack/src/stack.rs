//! Ordered stack of card controllers. Index 0 is the frontmost card and the only one that
//! may take input. Geometry is always derived from `(index, stack size)` through
//! [`geometry_for`], never adjusted incrementally.

use shared::{
    domain::{CardDescriptor, CardId, Size, Vec2},
    protocol::StackEvent,
};
use tracing::{debug, info};

use crate::{
    card::{Card, CardTransform},
    config::{EngineConfig, StackConfig},
    controller::{CardController, CardEvent, CardNotice, CardVisual},
    error::EngineError,
    theme::ThemeProvider,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackGeometry {
    pub scale: f32,
    pub vertical_offset: f32,
    pub z_order: i32,
}

impl StackGeometry {
    pub fn transform(&self) -> CardTransform {
        CardTransform {
            offset: Vec2::new(0.0, self.vertical_offset),
            scale: self.scale,
            ..CardTransform::default()
        }
    }
}

/// Each card further back is `base_scale` smaller and peeks `offset_step` above the one in front.
pub fn geometry_for(config: &StackConfig, index: usize, stack_size: usize) -> StackGeometry {
    StackGeometry {
        scale: config.base_scale.powi(index as i32),
        vertical_offset: index as f32 * -config.offset_step,
        z_order: stack_size as i32 - index as i32,
    }
}

/// Construction contract handed over by the screen that sets up a round.
#[derive(Debug, Clone)]
pub struct StackSpec {
    pub descriptors: Vec<CardDescriptor>,
    /// Card height divided by card width.
    pub card_aspect_ratio: f32,
    pub container_size: Size,
    pub flip_enabled: bool,
    pub animate_entry: bool,
}

impl StackSpec {
    pub fn new(descriptors: Vec<CardDescriptor>, container_size: Size) -> Self {
        Self {
            descriptors,
            card_aspect_ratio: crate::config::LayoutConfig::default().default_aspect_ratio,
            container_size,
            flip_enabled: true,
            animate_entry: true,
        }
    }

    pub fn with_aspect_ratio(mut self, card_aspect_ratio: f32) -> Self {
        self.card_aspect_ratio = card_aspect_ratio;
        self
    }

    pub fn without_flip(mut self) -> Self {
        self.flip_enabled = false;
        self
    }

    pub fn without_entry_animation(mut self) -> Self {
        self.animate_entry = false;
        self
    }
}

#[derive(Debug)]
pub struct StackManager {
    config: EngineConfig,
    controllers: Vec<CardController>,
    events: Vec<StackEvent>,
    card_size: Size,
    container: Size,
    emptied: bool,
}

impl StackManager {
    pub fn new(config: EngineConfig, spec: StackSpec) -> Self {
        let card_size = card_size_for(&config, &spec);
        let size = spec.descriptors.len();

        let controllers = spec
            .descriptors
            .iter()
            .enumerate()
            .map(|(index, descriptor)| {
                let card = Card::from_descriptor(CardId(index as i64), descriptor, spec.flip_enabled);
                let geometry = geometry_for(&config.stack, index, size);
                let mut controller = CardController::new(
                    card,
                    geometry,
                    card_size,
                    spec.container_size,
                    config,
                    spec.flip_enabled,
                );
                if spec.animate_entry {
                    controller.enter(
                        config.stack.entry_drop,
                        index as f32 * config.stack.entry_stagger,
                        config.springs.entry,
                    );
                }
                controller
            })
            .collect();

        let mut stack = Self {
            config,
            controllers,
            events: Vec::new(),
            card_size,
            container: spec.container_size,
            emptied: false,
        };

        info!(
            cards = size,
            flip_enabled = spec.flip_enabled,
            card_width = card_size.width,
            card_height = card_size.height,
            "card stack built"
        );
        stack.promote_top();
        stack
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    pub fn card_size(&self) -> Size {
        self.card_size
    }

    pub fn container_size(&self) -> Size {
        self.container
    }

    pub fn controllers(&self) -> &[CardController] {
        &self.controllers
    }

    pub fn controller(&self, index: usize) -> Option<&CardController> {
        self.controllers.get(index)
    }

    pub fn top(&self) -> Option<&CardController> {
        self.controllers.first()
    }

    pub fn position_of(&self, card_id: CardId) -> Option<usize> {
        self.controllers
            .iter()
            .position(|controller| controller.id() == card_id)
    }

    pub fn geometry_for(&self, index: usize, stack_size: usize) -> StackGeometry {
        geometry_for(&self.config.stack, index, stack_size)
    }

    /// Resting geometry for every card at the current size. Pure: repeated calls agree.
    pub fn layout(&self) -> Vec<StackGeometry> {
        let size = self.len();
        (0..size).map(|index| self.geometry_for(index, size)).collect()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.controllers
            .iter()
            .position(CardController::is_active)
    }

    /// Makes the card at `index` interactive. Only index 0 qualifies, and never while
    /// another card is active.
    pub fn activate(&mut self, index: usize) -> Result<(), EngineError> {
        let len = self.len();
        if index >= len {
            return Err(EngineError::IndexOutOfRange { index, len });
        }
        if index != 0 {
            return Err(EngineError::NotTopCard { index });
        }
        if let Some(active) = self.active_index().filter(|&active| active != index) {
            return Err(EngineError::MultipleActive {
                active,
                requested: index,
            });
        }
        self.controllers[index].set_active(true);
        Ok(())
    }

    pub fn deactivate(&mut self, index: usize) -> Result<(), EngineError> {
        let len = self.len();
        let controller = self
            .controllers
            .get_mut(index)
            .ok_or(EngineError::IndexOutOfRange { index, len })?;
        controller.set_active(false);
        Ok(())
    }

    /// Routes input to the top card. Input never reaches any other card.
    pub fn handle(&mut self, event: CardEvent) {
        let Some(top) = self.controllers.first_mut() else {
            debug!(event = ?event, "input on empty stack ignored");
            return;
        };
        let card_id = top.id();
        if let Some(notice) = top.handle(event) {
            self.apply_notice(card_id, notice);
        }
    }

    /// Routes input addressed to a specific card; ignored unless it is the top card.
    pub fn handle_card(&mut self, card_id: CardId, event: CardEvent) {
        match self.position_of(card_id) {
            Some(0) => self.handle(event),
            position => debug!(card_id = card_id.0, ?position, "input for non-top card ignored"),
        }
    }

    /// Advances every card's animations by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let notices: Vec<(CardId, CardNotice)> = self
            .controllers
            .iter_mut()
            .filter_map(|controller| {
                let card_id = controller.id();
                controller.tick(dt).map(|notice| (card_id, notice))
            })
            .collect();

        for (card_id, notice) in notices {
            self.apply_notice(card_id, notice);
        }
    }

    pub fn is_settled(&self) -> bool {
        self.controllers
            .iter()
            .all(|controller| !controller.is_animating())
    }

    pub fn drain_events(&mut self) -> Vec<StackEvent> {
        std::mem::take(&mut self.events)
    }

    /// Paint order: back to front.
    pub fn visuals<'a>(&'a self, theme: &dyn ThemeProvider) -> Vec<CardVisual<'a>> {
        let mut visuals: Vec<CardVisual<'a>> = self
            .controllers
            .iter()
            .map(|controller| controller.visual(theme))
            .collect();
        visuals.sort_by_key(|visual| visual.z_order);
        visuals
    }

    pub fn check_invariants(&self) -> Result<(), EngineError> {
        let mut active = self
            .controllers
            .iter()
            .enumerate()
            .filter(|(_, controller)| controller.is_active())
            .map(|(index, _)| index);
        match (active.next(), active.next()) {
            (Some(first), Some(second)) => {
                return Err(EngineError::MultipleActive {
                    active: first,
                    requested: second,
                })
            }
            (Some(index), None) if index != 0 => return Err(EngineError::NotTopCard { index }),
            _ => {}
        }
        Ok(())
    }

    fn apply_notice(&mut self, card_id: CardId, notice: CardNotice) {
        match notice {
            CardNotice::Dismissed => self.on_dismissed(card_id),
            CardNotice::Flipped => {
                info!(card_id = card_id.0, "card revealed");
                self.events.push(StackEvent::CardFlipped { card_id });
            }
            CardNotice::Bounced => debug!(card_id = card_id.0, "tap feedback"),
        }
    }

    fn on_dismissed(&mut self, card_id: CardId) {
        let Some(index) = self.position_of(card_id) else {
            return;
        };
        self.controllers.remove(index);
        info!(
            card_id = card_id.0,
            index,
            remaining = self.len(),
            "card dismissed"
        );
        self.events.push(StackEvent::CardDismissed { index, card_id });
        self.reflow();
        self.promote_top();
    }

    /// Springs every survivor to its recomputed geometry, cascading front to back.
    fn reflow(&mut self) {
        let size = self.len();
        let stack = self.config.stack;
        let spring = self.config.springs.reflow;
        for (index, controller) in self.controllers.iter_mut().enumerate() {
            let geometry = geometry_for(&stack, index, size);
            controller.settle_to(geometry, index as f32 * stack.reflow_stagger, spring);
        }
    }

    fn promote_top(&mut self) {
        if self.controllers.is_empty() {
            if !self.emptied {
                self.emptied = true;
                info!("card stack emptied");
                self.events.push(StackEvent::StackEmptied);
            }
            return;
        }

        for controller in self.controllers.iter_mut().skip(1) {
            controller.set_active(false);
        }
        let activated = self.activate(0);
        debug_assert!(activated.is_ok(), "top card activation failed: {activated:?}");
        debug_assert!(self.check_invariants().is_ok());

        let card_id = self.controllers[0].id();
        self.events.push(StackEvent::TopCardChanged {
            card_id,
            remaining: self.len(),
        });
    }
}

fn card_size_for(config: &EngineConfig, spec: &StackSpec) -> Size {
    let width = spec.container_size.width * config.layout.card_width_fraction;
    let aspect = if spec.card_aspect_ratio > 0.0 && spec.card_aspect_ratio.is_finite() {
        spec.card_aspect_ratio
    } else {
        config.layout.default_aspect_ratio
    };
    Size::new(width, width * aspect)
}

#[cfg(test)]
#[path = "tests/stack_tests.rs"]
mod tests;
