use rand::{rngs::StdRng, SeedableRng};

use super::*;

fn setup(player_count: usize, spy_count: usize) -> RoundSetup {
    RoundSetup {
        player_count,
        spy_count,
        ..RoundSetup::default()
    }
}

#[test]
fn player_and_spy_counts_are_bounded() {
    setup(3, 1).validate().expect("smallest round");
    setup(10, 3).validate().expect("largest round");

    for (players, spies) in [(2, 1), (11, 1), (5, 0), (8, 4), (3, 3)] {
        let err = setup(players, spies).validate().expect_err("out of range");
        assert!(matches!(err, EngineError::InvalidRound(_)), "{players}/{spies}");
    }
}

#[test]
fn spies_are_distinct_and_in_range() {
    let mut rng = StdRng::seed_from_u64(7);
    let round = setup(10, 3);
    for _ in 0..50 {
        let spies = round.assign_spies(&mut rng).expect("valid round");
        assert_eq!(spies.len(), 3);
        assert!(spies.iter().all(|&index| index < 10));
    }
}

#[test]
fn same_seed_deals_the_same_round() {
    let round = setup(6, 2);
    let first = round.deal(&mut StdRng::seed_from_u64(42)).expect("deal");
    let second = round.deal(&mut StdRng::seed_from_u64(42)).expect("deal");
    assert_eq!(first, second);
    assert_eq!(first.iter().filter(|descriptor| descriptor.is_special).count(), 2);
}

#[test]
fn civilians_get_the_word_and_spies_get_the_category_only_with_hints() {
    let spies = BTreeSet::from([1]);
    let mut round = setup(3, 1);

    let descriptors = round.descriptors(&spies);
    assert_eq!(descriptors[0].role_label, "Player 1");
    assert_eq!(descriptors[0].hint_text.as_deref(), Some("Library"));
    assert!(descriptors[1].is_special);
    assert_eq!(descriptors[1].hint_text, None);

    round.show_hints = true;
    let descriptors = round.descriptors(&spies);
    assert_eq!(descriptors[1].hint_text.as_deref(), Some("Category: Places"));
    assert!(!descriptors[2].is_special);
}

#[test]
fn how_to_play_deck_keeps_order() {
    let deck = how_to_play_deck([("Deal", "Pass the phone around"), ("Talk", "Ask about the word")]);
    assert_eq!(deck.len(), 2);
    assert_eq!(deck[1].role_label, "Talk");
    assert_eq!(deck[1].hint_text.as_deref(), Some("Ask about the word"));
    assert!(deck.iter().all(|descriptor| !descriptor.is_special));
}
