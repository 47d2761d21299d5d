use std::cell::RefCell;
use std::f32::consts::PI;

use super::*;
use crate::theme::DefaultPalette;

fn spy() -> CardDescriptor {
    CardDescriptor::new("Player 2", true).with_hint("Category: Places")
}

fn civilian() -> CardDescriptor {
    CardDescriptor::new("Player 1", false).with_hint("Library")
}

#[test]
fn front_face_hides_the_role() {
    let card = Card::from_descriptor(CardId(1), &spy(), true);

    assert_eq!(card.visible_face().title, "Player 2");
    assert_eq!(card.visible_face().subtitle, FRONT_SUBTITLE);
    assert_eq!(card.flip_state(), FlipState::Unflipped);
    assert_eq!(card.back().title, SPECIAL_TITLE);
    assert_eq!(card.back().detail, "Category: Places");
}

#[test]
fn civilian_back_carries_the_secret_word() {
    let card = Card::from_descriptor(CardId(0), &civilian(), true);
    assert_eq!(card.back().title, REGULAR_TITLE);
    assert_eq!(card.back().detail, "Library");
    assert!(!card.is_special());
}

#[test]
fn hint_deck_cards_show_the_hint_up_front() {
    let descriptor = CardDescriptor::new("Ask questions", false).with_hint("Keep them vague");
    let card = Card::from_descriptor(CardId(0), &descriptor, false);

    assert_eq!(card.front().title, "Ask questions");
    assert_eq!(card.front().subtitle, "Keep them vague");
    assert_eq!(card.front().detail, HINT_DETAIL);
}

#[test]
fn flip_is_one_way() {
    let mut card = Card::from_descriptor(CardId(0), &civilian(), true);
    assert!(card.flip());
    assert_eq!(card.flip_state(), FlipState::Flipped);
    assert_eq!(card.visible_face().title, REGULAR_TITLE);

    assert!(!card.flip());
    assert_eq!(card.flip_state(), FlipState::Flipped);
}

#[test]
fn status_follows_flip_and_role() {
    let mut spy_card = Card::from_descriptor(CardId(0), &spy(), true);
    let mut civilian_card = Card::from_descriptor(CardId(1), &civilian(), true);
    assert_eq!(spy_card.status(), CardStatus::ActiveBlue);
    assert_eq!(civilian_card.status(), CardStatus::ActiveBlue);

    spy_card.flip();
    civilian_card.flip();
    assert_eq!(spy_card.status(), CardStatus::ActiveRed);
    assert_eq!(civilian_card.status(), CardStatus::Inactive);

    assert_eq!(
        spy_card.theme(&DefaultPalette),
        DefaultPalette::for_status(CardStatus::ActiveRed)
    );
}

struct RecordingTheme {
    calls: RefCell<Vec<(FlipState, bool)>>,
}

impl ThemeProvider for RecordingTheme {
    fn theme_for(&self, flip_state: FlipState, is_special: bool) -> CardTheme {
        self.calls.borrow_mut().push((flip_state, is_special));
        DefaultPalette::for_status(CardStatus::Inactive)
    }
}

#[test]
fn theme_is_delegated_to_the_provider() {
    let provider = RecordingTheme {
        calls: RefCell::new(Vec::new()),
    };
    let card = Card::from_descriptor(CardId(0), &spy(), true);

    let theme = card.theme(&provider);
    assert_eq!(theme, DefaultPalette::for_status(CardStatus::Inactive));
    assert_eq!(*provider.calls.borrow(), vec![(FlipState::Unflipped, true)]);
}

#[test]
fn mirrored_content_reads_correctly_past_the_midpoint() {
    let mut transform = CardTransform::default();
    assert_eq!(transform.face_scale_x(false), 1.0);

    transform.flip_angle = PI;
    assert!((transform.face_scale_x(false) + 1.0).abs() < 1e-6);
    assert!((transform.face_scale_x(true) - 1.0).abs() < 1e-6);

    transform.flip_angle = FRAC_PI_2;
    assert!(transform.is_edge_on());
    let (leading, trailing) = transform.edge_scales(150.0, 500.0);
    assert!((leading - 1.3).abs() < 1e-5);
    assert!((leading * trailing - 1.0).abs() < 1e-5);
}
