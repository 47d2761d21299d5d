use super::*;
use crate::{controller::CardState, theme::DefaultPalette};

const FRAME: f32 = 1.0 / 60.0;
const SCREEN: Size = Size::new(430.0, 900.0);

fn descriptors(count: usize) -> Vec<CardDescriptor> {
    (0..count)
        .map(|index| CardDescriptor::new(format!("Player {}", index + 1), index == 1))
        .collect()
}

fn stack(count: usize) -> StackManager {
    let spec = StackSpec::new(descriptors(count), SCREEN).without_entry_animation();
    StackManager::new(EngineConfig::default(), spec)
}

fn swipe(stack: &mut StackManager, translation: Vec2, velocity: Vec2) {
    let start = Vec2::new(200.0, 400.0);
    stack.handle(CardEvent::PointerDown { point: start });
    stack.handle(CardEvent::PointerMove {
        point: start + translation,
        velocity,
    });
    stack.handle(CardEvent::PointerUp { velocity });
}

fn settle(stack: &mut StackManager) {
    for _ in 0..600 {
        stack.tick(FRAME);
        if stack.is_settled() {
            return;
        }
    }
}

#[test]
fn geometry_depends_only_on_index_and_size() {
    let config = StackConfig::default();

    let front = geometry_for(&config, 0, 4);
    assert_eq!(front.scale, 1.0);
    assert_eq!(front.vertical_offset, 0.0);
    assert_eq!(front.z_order, 4);

    let third = geometry_for(&config, 2, 5);
    assert!((third.scale - 0.94 * 0.94).abs() < 1e-6);
    assert_eq!(third.vertical_offset, -50.0);
    assert_eq!(third.z_order, 3);
}

#[test]
fn card_size_comes_from_the_container() {
    let stack = stack(3);
    let size = stack.card_size();
    assert!((size.width - 301.0).abs() < 1e-3);
    assert!((size.height - 301.0 * 1.4).abs() < 1e-2);

    let wide = StackManager::new(
        EngineConfig::default(),
        StackSpec::new(descriptors(1), SCREEN).with_aspect_ratio(1.0),
    );
    assert_eq!(wide.card_size().width, wide.card_size().height);
}

#[test]
fn new_stack_activates_only_the_top_card() {
    let mut stack = stack(4);

    assert_eq!(stack.active_index(), Some(0));
    assert!(stack.top().is_some_and(CardController::interaction_enabled));
    assert!(stack.controllers()[1..]
        .iter()
        .all(|controller| !controller.interaction_enabled()));
    stack.check_invariants().expect("invariants hold");

    assert_eq!(
        stack.drain_events(),
        vec![StackEvent::TopCardChanged {
            card_id: CardId(0),
            remaining: 4
        }]
    );
    assert!(stack.drain_events().is_empty());
}

#[test]
fn empty_stack_reports_emptied_once() {
    let mut stack = stack(0);
    assert!(stack.is_empty());
    assert_eq!(stack.drain_events(), vec![StackEvent::StackEmptied]);

    stack.handle(CardEvent::Tap);
    stack.tick(FRAME);
    assert!(stack.drain_events().is_empty());
}

#[test]
fn layout_is_idempotent() {
    let mut stack = stack(5);
    let first = stack.layout();
    assert_eq!(first, stack.layout());

    stack.reflow();
    stack.reflow();
    settle(&mut stack);
    let resting: Vec<StackGeometry> = stack.controllers().iter().map(CardController::geometry).collect();
    assert_eq!(resting, first);
    for (controller, geometry) in stack.controllers().iter().zip(&first) {
        assert_eq!(controller.transform(), geometry.transform());
    }
}

#[test]
fn activation_rules_are_enforced() {
    let mut stack = stack(3);

    assert!(matches!(
        stack.activate(2),
        Err(EngineError::NotTopCard { index: 2 })
    ));
    assert!(matches!(
        stack.activate(7),
        Err(EngineError::IndexOutOfRange { index: 7, len: 3 })
    ));
    assert!(matches!(
        stack.deactivate(3),
        Err(EngineError::IndexOutOfRange { .. })
    ));
    stack.activate(0).expect("top card stays active");

    stack.deactivate(0).expect("deactivate top");
    stack.controllers[1].set_active(true);
    assert!(matches!(
        stack.activate(0),
        Err(EngineError::MultipleActive {
            active: 1,
            requested: 0
        })
    ));
    assert!(matches!(
        stack.check_invariants(),
        Err(EngineError::NotTopCard { index: 1 })
    ));
}

#[test]
fn only_the_top_card_receives_input() {
    let mut stack = stack(3);

    stack.handle_card(CardId(1), CardEvent::Tap);
    stack.handle_card(CardId(2), CardEvent::PointerDown { point: Vec2::ZERO });
    assert!(stack
        .controllers()
        .iter()
        .all(|controller| controller.state() == CardState::Idle));

    stack.handle_card(CardId(0), CardEvent::Tap);
    assert_eq!(stack.controllers()[0].state(), CardState::FlippingOut);
}

#[test]
fn dismissals_keep_exactly_one_interactive_card() {
    let size = 5;
    let mut stack = stack(size);
    stack.drain_events();

    for dismissed in 0..size {
        let top_id = stack.top().map(CardController::id).expect("card left");
        swipe(&mut stack, Vec2::new(-200.0, 0.0), Vec2::new(-1500.0, 0.0));
        settle(&mut stack);

        let remaining = size - dismissed - 1;
        assert_eq!(stack.len(), remaining);
        assert_eq!(stack.position_of(top_id), None);
        stack.check_invariants().expect("invariants after dismissal");

        let interactive: Vec<usize> = stack
            .controllers()
            .iter()
            .enumerate()
            .filter(|(_, controller)| controller.interaction_enabled())
            .map(|(index, _)| index)
            .collect();
        if remaining == 0 {
            assert!(interactive.is_empty());
        } else {
            assert_eq!(interactive, vec![0]);
        }

        for (index, controller) in stack.controllers().iter().enumerate() {
            let expected = geometry_for(&stack.config().stack, index, remaining);
            assert_eq!(controller.geometry(), expected);
            assert_eq!(controller.transform(), expected.transform());
        }

        let events = stack.drain_events();
        assert_eq!(
            events[0],
            StackEvent::CardDismissed {
                index: 0,
                card_id: top_id
            }
        );
        if remaining == 0 {
            assert_eq!(events[1..], [StackEvent::StackEmptied]);
        } else {
            assert!(matches!(
                events[1..],
                [StackEvent::TopCardChanged { remaining: r, .. }] if r == remaining
            ));
        }
    }
}

#[test]
fn reflowing_top_card_can_be_grabbed() {
    let mut stack = stack(3);
    swipe(&mut stack, Vec2::new(0.0, 300.0), Vec2::ZERO);
    for _ in 0..600 {
        stack.tick(FRAME);
        if stack.len() == 2 {
            break;
        }
    }
    assert_eq!(stack.controllers()[0].state(), CardState::Returning);

    stack.handle(CardEvent::PointerDown {
        point: Vec2::new(100.0, 100.0),
    });
    assert_eq!(stack.controllers()[0].state(), CardState::Dragging);
}

#[test]
fn flipping_card_paints_above_the_stack() {
    let mut stack = stack(3);
    let order: Vec<CardId> = stack
        .visuals(&DefaultPalette)
        .iter()
        .map(|visual| visual.card_id)
        .collect();
    assert_eq!(order, vec![CardId(2), CardId(1), CardId(0)]);

    stack.handle(CardEvent::Tap);
    stack.tick(FRAME);
    let visuals = stack.visuals(&DefaultPalette);
    let last = visuals.last().expect("cards");
    assert_eq!(last.card_id, CardId(0));
    assert!(last.z_order > 3);
    assert!(!last.interactive);

    settle(&mut stack);
    let events = stack.drain_events();
    assert!(events.contains(&StackEvent::CardFlipped { card_id: CardId(0) }));
}

#[test]
fn entry_animation_drops_cards_into_place() {
    let spec = StackSpec::new(descriptors(3), SCREEN);
    let mut stack = StackManager::new(EngineConfig::default(), spec);
    assert!(!stack.is_settled());
    assert!(stack.controllers()[0].transform().opacity < 1.0);

    settle(&mut stack);
    assert!(stack.is_settled());
    for (controller, geometry) in stack.controllers().iter().zip(stack.layout()) {
        assert_eq!(controller.transform(), geometry.transform());
        assert_eq!(controller.state(), CardState::Idle);
    }
}

#[test]
fn new_top_card_flips_on_tap_while_reflowing() {
    let mut stack = stack(3);
    swipe(&mut stack, Vec2::new(0.0, 300.0), Vec2::ZERO);
    for _ in 0..600 {
        stack.tick(FRAME);
        if stack.len() == 2 {
            break;
        }
    }
    let top = &stack.controllers()[0];
    assert_eq!(top.state(), CardState::Returning);
    assert!(top.interaction_enabled());

    stack.handle(CardEvent::Tap);
    assert_eq!(stack.controllers()[0].state(), CardState::FlippingOut);

    settle(&mut stack);
    let events = stack.drain_events();
    assert!(events.contains(&StackEvent::CardFlipped { card_id: CardId(1) }));
    assert_eq!(
        stack.controllers()[0].transform(),
        stack.geometry_for(0, 2).transform()
    );
}

#[test]
fn tap_during_entry_animation_is_not_lost() {
    let spec = StackSpec::new(descriptors(2), SCREEN);
    let mut stack = StackManager::new(EngineConfig::default(), spec);
    stack.tick(FRAME);
    assert_eq!(stack.controllers()[0].state(), CardState::Returning);

    stack.handle(CardEvent::Tap);
    assert_eq!(stack.controllers()[0].state(), CardState::FlippingOut);
}
